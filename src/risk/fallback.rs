//! Ordered fallback chains.
//!
//! A chain is a list of named fallible stages tried in order, ending in an
//! infallible last resort. The first stage that succeeds wins; failures are
//! logged and never reach the caller.

use serde::Serialize;
use tracing::{debug, warn};

use crate::Result;

pub struct Stage<'a, T> {
    name: &'static str,
    run: Box<dyn FnOnce() -> Result<T> + Send + 'a>,
}

impl<'a, T> Stage<'a, T> {
    pub fn new(name: &'static str, run: impl FnOnce() -> Result<T> + Send + 'a) -> Self {
        Self {
            name,
            run: Box::new(run),
        }
    }
}

/// Value produced by a chain and the stage that produced it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Resolved<T> {
    pub value: T,
    pub stage: &'static str,
    /// The last resort had to be used
    pub degraded: bool,
}

pub fn first_success<T>(
    stages: Vec<Stage<'_, T>>,
    last_resort_name: &'static str,
    last_resort: impl FnOnce() -> T,
) -> Resolved<T> {
    for stage in stages {
        match (stage.run)() {
            Ok(value) => {
                debug!("Fallback stage '{}' succeeded", stage.name);
                return Resolved {
                    value,
                    stage: stage.name,
                    degraded: false,
                };
            }
            Err(e) => warn!("Fallback stage '{}' failed: {e}", stage.name),
        }
    }

    Resolved {
        value: last_resort(),
        stage: last_resort_name,
        degraded: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SkywatchError;

    #[test]
    fn test_first_successful_stage_wins() {
        let resolved = first_success(
            vec![
                Stage::new("broken", || Err(SkywatchError::computation("nan"))),
                Stage::new("primary", || Ok(7)),
                Stage::new("never", || Ok(9)),
            ],
            "default",
            || 0,
        );
        assert_eq!(resolved.value, 7);
        assert_eq!(resolved.stage, "primary");
        assert!(!resolved.degraded);
    }

    #[test]
    fn test_last_resort_when_everything_fails() {
        let resolved = first_success(
            vec![Stage::new("broken", || {
                Err::<i32, _>(SkywatchError::upstream("down"))
            })],
            "default",
            || 42,
        );
        assert_eq!(resolved.value, 42);
        assert!(resolved.degraded);
    }

    #[test]
    fn test_later_stages_are_not_run() {
        let mut ran = false;
        let resolved = first_success(
            vec![
                Stage::new("first", || Ok("a")),
                Stage::new("second", || {
                    ran = true;
                    Ok("b")
                }),
            ],
            "default",
            || "z",
        );
        assert_eq!(resolved.value, "a");
        assert!(!ran);
    }
}
