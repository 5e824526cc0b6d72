//! Monitoring points and geographic bounding boxes

use serde::{Deserialize, Serialize};

use crate::SkywatchError;

/// Box used when neither the request nor the monitoring point supplies one
pub const DEFAULT_BOUNDS: BoundingBox = BoundingBox {
    min_lng: 120.0,
    min_lat: 36.0,
    max_lng: 121.0,
    max_lat: 37.0,
};

/// Axis-aligned longitude/latitude box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_lng: f64,
    pub min_lat: f64,
    pub max_lng: f64,
    pub max_lat: f64,
}

impl BoundingBox {
    /// Parse `[minLng,minLat,maxLng,maxLat]`; brackets and whitespace are optional
    pub fn parse(input: &str) -> crate::Result<Self> {
        let cleaned: String = input
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '[' && *c != ']')
            .collect();
        if cleaned.is_empty() {
            return Err(SkywatchError::validation("Bounds cannot be empty"));
        }

        let values = cleaned
            .split(',')
            .map(|part| {
                part.parse::<f64>()
                    .ok()
                    .filter(|v| v.is_finite())
                    .ok_or_else(|| SkywatchError::validation(format!("Invalid bound value '{part}'")))
            })
            .collect::<crate::Result<Vec<f64>>>()?;

        match values.as_slice() {
            [min_lng, min_lat, max_lng, max_lat] => Ok(Self {
                min_lng: *min_lng,
                min_lat: *min_lat,
                max_lng: *max_lng,
                max_lat: *max_lat,
            }),
            _ => Err(SkywatchError::validation(format!(
                "Bounds need exactly 4 values, got {}",
                values.len()
            ))),
        }
    }

    /// Evenly spaced coordinate `index` of `count` along one axis, both edges included
    #[must_use]
    pub fn axis_value(min: f64, max: f64, index: usize, count: usize) -> f64 {
        if count <= 1 || index == 0 {
            return min;
        }
        if index >= count - 1 {
            return max;
        }
        min + (max - min) * (index as f64 / (count - 1) as f64)
    }

    #[must_use]
    pub fn center(&self) -> (f64, f64) {
        (
            (self.min_lng + self.max_lng) / 2.0,
            (self.min_lat + self.max_lat) / 2.0,
        )
    }
}

impl std::fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{},{},{},{}]",
            self.min_lng, self.min_lat, self.max_lng, self.max_lat
        )
    }
}

/// A named geographic area subject to weather tracking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonitoringPoint {
    pub id: String,
    pub name: String,
    pub longitude: f64,
    pub latitude: f64,
    pub bounds: Option<BoundingBox>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bracketed_bounds() {
        let bbox = BoundingBox::parse("[120.0, 36.0, 121.0, 37.0]").unwrap();
        assert_eq!(bbox, DEFAULT_BOUNDS);
    }

    #[test]
    fn test_parse_bare_bounds() {
        let bbox = BoundingBox::parse("116.1,39.7,116.6,40.1").unwrap();
        assert_eq!(bbox.min_lng, 116.1);
        assert_eq!(bbox.max_lat, 40.1);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(BoundingBox::parse("").is_err());
        assert!(BoundingBox::parse("[1,2,3]").is_err());
        assert!(BoundingBox::parse("[a,b,c,d]").is_err());
        assert!(BoundingBox::parse("[1,2,3,4,5]").is_err());
        assert!(BoundingBox::parse("[1,2,NaN,4]").is_err());
    }

    #[test]
    fn test_axis_value_hits_edges_exactly() {
        assert_eq!(BoundingBox::axis_value(0.1, 0.3, 0, 12), 0.1);
        assert_eq!(BoundingBox::axis_value(0.1, 0.3, 11, 12), 0.3);
        assert_eq!(BoundingBox::axis_value(120.0, 121.0, 1, 3), 120.5);
        assert_eq!(BoundingBox::axis_value(5.0, 9.0, 0, 1), 5.0);
    }

    #[test]
    fn test_display_roundtrips_through_parse() {
        let bbox = BoundingBox::parse(&DEFAULT_BOUNDS.to_string()).unwrap();
        assert_eq!(bbox, DEFAULT_BOUNDS);
    }
}
