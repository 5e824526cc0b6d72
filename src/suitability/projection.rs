//! Heuristic drift projection of a factor evaluation into the future

use chrono::{DateTime, Duration, Utc};

use super::random::RandomSource;
use super::scoring;
use crate::models::{FactorResult, TimePointProjection};

pub const INTERVAL_MINUTES: u32 = 10;

/// Number of projected points for a horizon, both ends included
#[must_use]
pub fn point_count(total_hours: u32) -> usize {
    (total_hours * 60 / INTERVAL_MINUTES) as usize + 1
}

/// Project `current` over `total_hours` at 10 minute spacing starting at `start`.
///
/// Values decay linearly with the index and get a ±10% jitter. Each factor
/// flips its verdict with a probability growing from 0 to 10% over the series.
pub fn project(
    current: &[FactorResult],
    total_hours: u32,
    point_id: &str,
    start: DateTime<Utc>,
    rng: &mut dyn RandomSource,
) -> Vec<TimePointProjection> {
    let count = point_count(total_hours);
    let n = count as f64;

    (0..count)
        .map(|i| {
            let progress = i as f64 / n;
            let decay = 1.0 - progress * 0.02;
            let flip_probability = 0.1 * progress;

            let factors: Vec<FactorResult> = current
                .iter()
                .map(|result| {
                    let jitter = 0.9 + rng.next_unit() * 0.2;
                    let flipped = rng.next_unit() < flip_probability;
                    FactorResult {
                        factor: result.factor,
                        suitable: result.suitable != flipped,
                        value: result.value * decay * jitter,
                    }
                })
                .collect();

            TimePointProjection {
                time_point: start + Duration::minutes(i64::from(INTERVAL_MINUTES) * i as i64),
                point_id: point_id.to_string(),
                percentage: scoring::percentage(&factors),
                factors,
            }
        })
        .collect()
}
