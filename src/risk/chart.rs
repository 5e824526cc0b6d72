//! Time × height risk grid for a single monitoring point

use chrono::{DateTime, Duration, Timelike, Utc};
use chrono_tz::Tz;
use serde::Serialize;

use super::RiskInputs;
use crate::suitability::RandomSource;
use crate::{Result, SkywatchError};

pub const CHART_MIN: i64 = 10;
pub const CHART_MAX: i64 = 95;

/// Horizon of a risk grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TimeRange {
    #[serde(rename = "1h")]
    OneHour,
    #[serde(rename = "3h")]
    ThreeHours,
    #[serde(rename = "6h")]
    SixHours,
    #[serde(rename = "12h")]
    TwelveHours,
}

impl TimeRange {
    /// Unknown or absent ranges default to 3h
    #[must_use]
    pub fn parse(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some("1h") => Self::OneHour,
            Some("6h") => Self::SixHours,
            Some("12h") => Self::TwelveHours,
            _ => Self::ThreeHours,
        }
    }

    #[must_use]
    pub fn point_count(self) -> usize {
        match self {
            Self::OneHour | Self::ThreeHours => 7,
            Self::SixHours => 13,
            Self::TwelveHours => 25,
        }
    }

    #[must_use]
    pub fn interval_minutes(self) -> i64 {
        match self {
            Self::OneHour => 10,
            Self::ThreeHours | Self::SixHours | Self::TwelveHours => 30,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::OneHour => "1h",
            Self::ThreeHours => "3h",
            Self::SixHours => "6h",
            Self::TwelveHours => "12h",
        }
    }
}

/// Grid density
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Resolution {
    Low,
    Medium,
    High,
}

impl Resolution {
    /// Unknown or absent resolutions default to medium
    #[must_use]
    pub fn parse(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some("low") => Self::Low,
            Some("high") => Self::High,
            _ => Self::Medium,
        }
    }

    #[must_use]
    pub fn height_layers(self) -> usize {
        match self {
            Self::Low => 5,
            Self::Medium => 8,
            Self::High => 16,
        }
    }

    #[must_use]
    pub fn layer_interval_m(self) -> u32 {
        match self {
            Self::Low => 100,
            Self::Medium => 50,
            Self::High => 25,
        }
    }

    /// Points per axis of geo and area grids
    #[must_use]
    pub fn grid_size(self) -> usize {
        match self {
            Self::Low => 8,
            Self::Medium => 12,
            Self::High => 16,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

/// Time axis shared by chart and area grids
#[derive(Debug, Clone, Copy)]
pub struct TimeAxis {
    pub start: DateTime<Utc>,
    pub range: TimeRange,
    pub timezone: Tz,
}

impl TimeAxis {
    #[must_use]
    pub fn instant(&self, index: usize) -> DateTime<Utc> {
        self.start + Duration::minutes(self.range.interval_minutes() * index as i64)
    }

    /// `HH:MM` labels in the display time zone
    #[must_use]
    pub fn labels(&self) -> Vec<String> {
        (0..self.range.point_count())
            .map(|t| {
                self.instant(t)
                    .with_timezone(&self.timezone)
                    .format("%H:%M")
                    .to_string()
            })
            .collect()
    }

    /// Temporal risk multiplier; nights outside 06:00-18:59 local add 10%
    #[must_use]
    pub fn time_factor(&self, index: usize) -> f64 {
        let wave = 0.8 + (index as f64 * 0.5).sin() * 0.2;
        let hour = self.instant(index).with_timezone(&self.timezone).hour();
        let day_night = if (6..=18).contains(&hour) { 1.0 } else { 1.1 };
        wave * day_night
    }
}

/// Random weather fluctuation, amplified by high shear and turbulent stability
pub fn weather_factor(inputs: &RiskInputs, rng: &mut dyn RandomSource) -> f64 {
    let mut factor = 0.9 + rng.next_unit() * 0.2;
    if inputs.shear_high {
        factor *= 1.3;
    }
    if inputs.turbulent {
        factor *= 1.2;
    }
    factor.clamp(0.7, 1.5)
}

/// Risk decreases with altitude; turbulent air lowers the factor further
#[must_use]
pub fn height_factor(inputs: &RiskInputs, layer: usize, layers: usize) -> f64 {
    let mut factor = 1.0 - (layer as f64 / layers as f64) * 0.4;
    if inputs.turbulent {
        factor *= 0.8;
    }
    factor.clamp(0.3, 1.2)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartGrid {
    pub times: Vec<String>,
    /// Layer heights in m
    pub heights: Vec<u32>,
    /// Risk values indexed `[height][time]`
    pub data: Vec<Vec<i64>>,
}

fn heights(resolution: Resolution) -> Vec<u32> {
    (0..resolution.height_layers())
        .map(|h| h as u32 * resolution.layer_interval_m())
        .collect()
}

pub fn generate(
    inputs: &RiskInputs,
    axis: &TimeAxis,
    resolution: Resolution,
    route_analysis: bool,
    rng: &mut dyn RandomSource,
) -> Result<ChartGrid> {
    let layers = resolution.height_layers();
    let times = axis.range.point_count();

    let mut data = Vec::with_capacity(layers);
    for h in 0..layers {
        let hf = height_factor(inputs, h, layers);
        let mut row = Vec::with_capacity(times);
        for t in 0..times {
            let tf = axis.time_factor(t);
            let wf = weather_factor(inputs, rng);

            let mut risk = inputs.base_risk * hf * tf * wf;
            if route_analysis {
                risk *= 0.8;
                risk *= (hf * 0.8 + tf * 0.4).sin() * 0.3 + 0.7;
            }
            if !risk.is_finite() {
                return Err(SkywatchError::computation(format!(
                    "non-finite chart risk at height {h}, time {t}"
                )));
            }
            row.push(((risk * 100.0).round() as i64).clamp(CHART_MIN, CHART_MAX));
        }
        data.push(row);
    }

    Ok(ChartGrid {
        times: axis.labels(),
        heights: heights(resolution),
        data,
    })
}

/// Weather-independent grid of the same shape
#[must_use]
pub fn fallback(axis: &TimeAxis, resolution: Resolution) -> ChartGrid {
    let data = (0..resolution.height_layers())
        .map(|h| {
            (0..axis.range.point_count())
                .map(|t| {
                    let wave = ((h as f64 * 0.5 + t as f64 * 0.3).sin() * 20.0).trunc() as i64;
                    (50 + wave).clamp(20, 80)
                })
                .collect()
        })
        .collect();

    ChartGrid {
        times: axis.labels(),
        heights: heights(resolution),
        data,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::suitability::{EntropySource, ScriptedSource};
    use chrono::TimeZone;

    fn axis(range: TimeRange) -> TimeAxis {
        TimeAxis {
            start: Utc.with_ymd_and_hms(2025, 6, 1, 2, 0, 0).unwrap(),
            range,
            timezone: chrono_tz::Asia::Shanghai,
        }
    }

    fn inputs(base_risk: f64) -> RiskInputs {
        RiskInputs {
            base_risk,
            shear_high: false,
            turbulent: false,
        }
    }

    #[test]
    fn test_parse_defaults() {
        assert_eq!(TimeRange::parse(None), TimeRange::ThreeHours);
        assert_eq!(TimeRange::parse(Some("48h")), TimeRange::ThreeHours);
        assert_eq!(TimeRange::parse(Some("12h")), TimeRange::TwelveHours);
        assert_eq!(Resolution::parse(Some("ultra")), Resolution::Medium);
        assert_eq!(Resolution::parse(Some("high")), Resolution::High);
    }

    #[test]
    fn test_grid_shape_and_labels() {
        let grid = generate(
            &inputs(0.4),
            &axis(TimeRange::SixHours),
            Resolution::High,
            false,
            &mut EntropySource::seeded(5),
        )
        .unwrap();
        assert_eq!(grid.times.len(), 13);
        assert_eq!(grid.heights.len(), 16);
        assert_eq!(grid.heights[1], 25);
        assert_eq!(grid.data.len(), 16);
        assert!(grid.data.iter().all(|row| row.len() == 13));
        // 02:00 UTC is 10:00 in Shanghai
        assert_eq!(grid.times[0], "10:00");
        assert_eq!(grid.times[1], "10:30");
    }

    #[test]
    fn test_values_are_clamped() {
        for base in [0.0, 0.2, 0.9, 5.0] {
            for route in [false, true] {
                let grid = generate(
                    &RiskInputs {
                        base_risk: base,
                        shear_high: true,
                        turbulent: true,
                    },
                    &axis(TimeRange::TwelveHours),
                    Resolution::Medium,
                    route,
                    &mut EntropySource::seeded(11),
                )
                .unwrap();
                assert!(grid.data.iter().flatten().all(|v| (CHART_MIN..=CHART_MAX).contains(v)));
            }
        }
    }

    #[test]
    fn test_exact_cell_with_scripted_draw() {
        // u = 0.5 gives a weather factor of exactly 1.0
        let grid = generate(
            &inputs(0.5),
            &axis(TimeRange::OneHour),
            Resolution::Low,
            false,
            &mut ScriptedSource::constant(0.5),
        )
        .unwrap();
        // height 0, time 0 at 10:00 local: 0.5 * 1.0 * 0.8 * 1.0
        assert_eq!(grid.data[0][0], 40);
    }

    #[test]
    fn test_night_hours_raise_time_factor() {
        let night = TimeAxis {
            start: Utc.with_ymd_and_hms(2025, 6, 1, 15, 0, 0).unwrap(),
            ..axis(TimeRange::OneHour)
        };
        // 23:00 local
        assert!((night.time_factor(0) - 0.88).abs() < 1e-9);
        assert!((axis(TimeRange::OneHour).time_factor(0) - 0.8).abs() < 1e-9);
    }

    #[test]
    fn test_non_finite_risk_is_an_error() {
        let result = generate(
            &inputs(f64::NAN),
            &axis(TimeRange::OneHour),
            Resolution::Low,
            false,
            &mut ScriptedSource::constant(0.5),
        );
        assert!(matches!(result, Err(SkywatchError::Computation { .. })));
    }

    #[test]
    fn test_fallback_matches_shape() {
        let grid = fallback(&axis(TimeRange::TwelveHours), Resolution::High);
        assert_eq!(grid.data.len(), 16);
        assert!(grid.data.iter().all(|row| row.len() == 25));
        assert_eq!(grid.data[0][0], 50);
        assert!(grid.data.iter().flatten().all(|v| (20..=80).contains(v)));
    }
}
