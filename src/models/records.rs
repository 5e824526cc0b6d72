//! Rows kept by the history, indicator and vertical profile stores

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Factor;

/// One projected factor verdict written back to history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuitabilityRecord {
    pub point_id: String,
    pub factor: Factor,
    pub time_point: DateTime<Utc>,
    pub interval_minutes: u32,
    pub total_hours: u32,
    pub suitable: bool,
    pub value: f64,
    pub created_at: DateTime<Utc>,
}

/// Headline measurement shown on the dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoreIndicator {
    pub point_id: String,
    pub data_time: DateTime<Utc>,
    pub indicator_id: String,
    pub indicator_name: String,
    pub value: f64,
    pub unit: String,
    pub status: String,
    pub warning_threshold: Option<f64>,
    pub danger_threshold: Option<f64>,
}

/// Conditions at one altitude above a monitoring point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerticalProfileLayer {
    pub point_id: String,
    pub data_time: DateTime<Utc>,
    /// Height above ground in m
    pub height: f64,
    pub wind_speed: Option<f64>,
    pub temperature: Option<f64>,
    pub humidity: Option<f64>,
    pub visibility: Option<f64>,
    pub pressure: Option<f64>,
    pub turbulence_level: Option<String>,
}
