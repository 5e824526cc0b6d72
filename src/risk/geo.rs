//! Longitude × latitude risk grids for map overlays

use haversine::{Location as HaversineLocation, Units, distance};
use serde::Serialize;

use super::chart::{Resolution, TimeAxis, weather_factor};
use super::{RiskInputs, RiskLevel};
use crate::models::BoundingBox;
use crate::suitability::RandomSource;
use crate::{Result, SkywatchError};

pub const AREA_MIN: i64 = 20;
pub const AREA_MAX: i64 = 95;

/// Coastline-like spatial modulation of the base risk
#[must_use]
pub fn spatial_factor(lng: f64, lat: f64) -> f64 {
    (0.9 + (lng * 10.0).sin() * 0.1 + (lat * 10.0).cos() * 0.1).clamp(0.7, 1.3)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeoPoint {
    pub lng: f64,
    pub lat: f64,
    pub x: usize,
    pub y: usize,
    pub value: i64,
    pub level: RiskLevel,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeoGrid {
    pub bounds: BoundingBox,
    pub grid_size: usize,
    /// East-west spacing between neighbouring points in km
    pub cell_width_km: f64,
    /// North-south spacing between neighbouring points in km
    pub cell_height_km: f64,
    pub points: Vec<GeoPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AreaCell {
    pub lng: f64,
    pub lat: f64,
    pub x: usize,
    pub y: usize,
    /// Absent when the cell comes from the weather-independent fallback
    pub base_risk: Option<f64>,
    pub spatial_factor: Option<f64>,
    pub time_series: Vec<i64>,
    pub current_risk: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AreaGrid {
    pub bounds: BoundingBox,
    pub grid_size: usize,
    pub times: Vec<String>,
    pub cells: Vec<AreaCell>,
}

/// Grid coordinates, longitude index outer and latitude index inner
fn grid_coordinates(bounds: &BoundingBox, size: usize) -> impl Iterator<Item = (usize, usize, f64, f64)> + '_ {
    (0..size).flat_map(move |i| {
        (0..size).map(move |j| {
            (
                i,
                j,
                BoundingBox::axis_value(bounds.min_lng, bounds.max_lng, i, size),
                BoundingBox::axis_value(bounds.min_lat, bounds.max_lat, j, size),
            )
        })
    })
}

fn cell_spacing_km(bounds: &BoundingBox, size: usize) -> (f64, f64) {
    let steps = size.saturating_sub(1).max(1) as f64;
    let (_, center_lat) = bounds.center();
    let west = HaversineLocation {
        latitude: center_lat,
        longitude: bounds.min_lng,
    };
    let east = HaversineLocation {
        latitude: center_lat,
        longitude: bounds.max_lng,
    };
    let south = HaversineLocation {
        latitude: bounds.min_lat,
        longitude: bounds.min_lng,
    };
    let north = HaversineLocation {
        latitude: bounds.max_lat,
        longitude: bounds.min_lng,
    };
    (
        distance(west, east, Units::Kilometers) / steps,
        distance(south, north, Units::Kilometers) / steps,
    )
}

fn checked_value(risk: f64, x: usize, y: usize) -> Result<i64> {
    if !risk.is_finite() {
        return Err(SkywatchError::computation(format!(
            "non-finite geo risk at cell ({x}, {y})"
        )));
    }
    Ok(((risk * 100.0).round() as i64).clamp(AREA_MIN, AREA_MAX))
}

pub fn generate_geo(
    inputs: &RiskInputs,
    bounds: &BoundingBox,
    resolution: Resolution,
) -> Result<GeoGrid> {
    let size = resolution.grid_size();
    let points = grid_coordinates(bounds, size)
        .map(|(x, y, lng, lat)| {
            let value = checked_value(inputs.base_risk * spatial_factor(lng, lat), x, y)?;
            Ok(GeoPoint {
                lng,
                lat,
                x,
                y,
                value,
                level: RiskLevel::from_value(value),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let (cell_width_km, cell_height_km) = cell_spacing_km(bounds, size);
    Ok(GeoGrid {
        bounds: *bounds,
        grid_size: size,
        cell_width_km,
        cell_height_km,
        points,
    })
}

#[must_use]
pub fn fallback_geo(bounds: &BoundingBox, resolution: Resolution) -> GeoGrid {
    let size = resolution.grid_size();
    let points = grid_coordinates(bounds, size)
        .map(|(x, y, lng, lat)| {
            let wave = ((x as f64 * 0.5 + y as f64 * 0.3).sin() * 20.0).trunc() as i64;
            let value = (50 + wave).clamp(AREA_MIN, AREA_MAX);
            GeoPoint {
                lng,
                lat,
                x,
                y,
                value,
                level: RiskLevel::from_value(value),
            }
        })
        .collect();

    let (cell_width_km, cell_height_km) = cell_spacing_km(bounds, size);
    GeoGrid {
        bounds: *bounds,
        grid_size: size,
        cell_width_km,
        cell_height_km,
        points,
    }
}

/// Geo grid with a risk time series per cell
pub fn generate_area(
    inputs: &RiskInputs,
    bounds: &BoundingBox,
    axis: &TimeAxis,
    resolution: Resolution,
    rng: &mut dyn RandomSource,
) -> Result<AreaGrid> {
    let size = resolution.grid_size();
    let times = axis.range.point_count();
    let mut cells = Vec::with_capacity(size * size);

    for (x, y, lng, lat) in grid_coordinates(bounds, size) {
        let spatial = spatial_factor(lng, lat);
        let mut series = Vec::with_capacity(times);
        for t in 0..times {
            let risk = inputs.base_risk * spatial * axis.time_factor(t) * weather_factor(inputs, rng);
            series.push(checked_value(risk, x, y)?);
        }
        cells.push(AreaCell {
            lng,
            lat,
            x,
            y,
            base_risk: Some(inputs.base_risk),
            spatial_factor: Some(spatial),
            current_risk: series[0],
            time_series: series,
        });
    }

    Ok(AreaGrid {
        bounds: *bounds,
        grid_size: size,
        times: axis.labels(),
        cells,
    })
}

#[must_use]
pub fn fallback_area(bounds: &BoundingBox, axis: &TimeAxis, resolution: Resolution) -> AreaGrid {
    let size = resolution.grid_size();
    let cells = grid_coordinates(bounds, size)
        .map(|(x, y, lng, lat)| {
            let series: Vec<i64> = (0..axis.range.point_count())
                .map(|t| {
                    let phase = x as f64 * 0.5 + y as f64 * 0.3 + t as f64 * 0.2;
                    (50 + (phase.sin() * 20.0).trunc() as i64).clamp(AREA_MIN, 80)
                })
                .collect();
            AreaCell {
                lng,
                lat,
                x,
                y,
                base_risk: None,
                spatial_factor: None,
                current_risk: series[0],
                time_series: series,
            }
        })
        .collect();

    AreaGrid {
        bounds: *bounds,
        grid_size: size,
        times: axis.labels(),
        cells,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DEFAULT_BOUNDS;
    use crate::risk::TimeRange;
    use crate::suitability::EntropySource;
    use chrono::Utc;

    fn inputs(base_risk: f64) -> RiskInputs {
        RiskInputs {
            base_risk,
            shear_high: false,
            turbulent: false,
        }
    }

    fn axis() -> TimeAxis {
        TimeAxis {
            start: Utc::now(),
            range: TimeRange::SixHours,
            timezone: chrono_tz::UTC,
        }
    }

    #[test]
    fn test_medium_grid_has_exact_corners() {
        let grid = generate_geo(&inputs(0.4), &DEFAULT_BOUNDS, Resolution::Medium).unwrap();
        assert_eq!(grid.points.len(), 144);
        let corner = |x: usize, y: usize| {
            grid.points
                .iter()
                .find(|p| p.x == x && p.y == y)
                .map(|p| (p.lng, p.lat))
                .unwrap()
        };
        assert_eq!(corner(0, 0), (120.0, 36.0));
        assert_eq!(corner(11, 0), (121.0, 36.0));
        assert_eq!(corner(0, 11), (120.0, 37.0));
        assert_eq!(corner(11, 11), (121.0, 37.0));
        // longitude outer, latitude inner
        assert_eq!((grid.points[1].x, grid.points[1].y), (0, 1));
    }

    #[test]
    fn test_geo_values_and_levels() {
        for base in [0.0, 0.3, 0.6, 2.0] {
            let grid = generate_geo(&inputs(base), &DEFAULT_BOUNDS, Resolution::High).unwrap();
            for point in &grid.points {
                assert!((AREA_MIN..=AREA_MAX).contains(&point.value));
                assert_eq!(point.level, RiskLevel::from_value(point.value));
            }
        }
    }

    #[test]
    fn test_cell_spacing_is_plausible() {
        let grid = generate_geo(&inputs(0.3), &DEFAULT_BOUNDS, Resolution::Low).unwrap();
        // one degree of latitude over 7 steps
        assert!((grid.cell_height_km - 111.2 / 7.0).abs() < 0.5);
        assert!(grid.cell_width_km < grid.cell_height_km);
    }

    #[test]
    fn test_spatial_factor_bounds() {
        for lng in [-180.0, 0.0, 12.34, 120.5] {
            for lat in [-90.0, 0.0, 36.7] {
                let f = spatial_factor(lng, lat);
                assert!((0.7..=1.3).contains(&f));
            }
        }
    }

    #[test]
    fn test_non_finite_geo_risk_is_an_error() {
        let result = generate_geo(&inputs(f64::INFINITY), &DEFAULT_BOUNDS, Resolution::Low);
        assert!(matches!(result, Err(SkywatchError::Computation { .. })));
    }

    #[test]
    fn test_area_series_shape() {
        let grid = generate_area(
            &inputs(0.5),
            &DEFAULT_BOUNDS,
            &axis(),
            Resolution::Low,
            &mut EntropySource::seeded(3),
        )
        .unwrap();
        assert_eq!(grid.cells.len(), 64);
        assert_eq!(grid.times.len(), 13);
        for cell in &grid.cells {
            assert_eq!(cell.time_series.len(), 13);
            assert_eq!(cell.current_risk, cell.time_series[0]);
            assert!(cell.time_series.iter().all(|v| (AREA_MIN..=AREA_MAX).contains(v)));
        }
    }

    #[test]
    fn test_fallbacks_keep_shape() {
        let geo = fallback_geo(&DEFAULT_BOUNDS, Resolution::Medium);
        assert_eq!(geo.points.len(), 144);
        assert_eq!(geo.points[0].value, 50);

        let area = fallback_area(&DEFAULT_BOUNDS, &axis(), Resolution::Medium);
        assert_eq!(area.cells.len(), 144);
        assert!(area.cells.iter().all(|c| c.time_series.len() == 13 && c.base_risk.is_none()));
    }
}
