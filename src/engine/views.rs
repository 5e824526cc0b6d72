//! Request parameters and serializable results of the engine operations

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::models::{
    CoreIndicator, DataSource, Factor, Observation, Recommendation, StabilityIndex,
    SuitabilityRecord, SuitabilitySnapshot, VerticalProfileLayer, WindShearLevel,
};
use crate::risk::{AreaGrid, ChartGrid, GeoGrid, Resolution, TimeRange};
use crate::suitability::{ObservationOrigin, ResolvedObservation, ThresholdSource};

pub const RISK_UNIT: &str = "风险指数(0-100)";

#[derive(Debug, Clone, Default)]
pub struct StatusRequest {
    pub point_id: String,
    /// `None`, `composite` or `综合` select every factor
    pub factor: Option<String>,
    pub total_hours: Option<u32>,
    pub aircraft_id: Option<String>,
}

impl StatusRequest {
    pub fn for_point(point_id: impl Into<String>) -> Self {
        Self {
            point_id: point_id.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ChartRequest {
    pub point_id: String,
    pub time_range: Option<String>,
    pub resolution: Option<String>,
    pub route_analysis: bool,
}

#[derive(Debug, Clone, Default)]
pub struct GeoRequest {
    /// `[minLng,minLat,maxLng,maxLat]`
    pub bounds: Option<String>,
    /// Echoed back; the grid always reflects the latest observation
    pub time: Option<String>,
    pub resolution: Option<String>,
    pub point_id: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct AreaRequest {
    pub point_id: Option<String>,
    pub bounds: Option<String>,
    pub time_range: Option<String>,
    pub resolution: Option<String>,
    pub route_analysis: bool,
}

/// Weather fields that fed a computation
#[derive(Debug, Clone, Serialize)]
pub struct WeatherSummary {
    pub observed_at: DateTime<Utc>,
    pub wind_speed_ms: Option<f64>,
    pub visibility_km: Option<f64>,
    pub precipitation_mm_h: Option<f64>,
    pub humidity_pct: Option<f64>,
    pub wind_shear: Option<WindShearLevel>,
    pub stability: Option<StabilityIndex>,
    pub source: DataSource,
    pub origin: ObservationOrigin,
}

impl WeatherSummary {
    pub(crate) fn new(observation: &Observation, origin: ObservationOrigin) -> Self {
        Self {
            observed_at: observation.observed_at,
            wind_speed_ms: observation.wind_speed_ms,
            visibility_km: observation.visibility_km,
            precipitation_mm_h: observation.precipitation_mm_h,
            humidity_pct: observation.humidity_pct,
            wind_shear: observation.wind_shear,
            stability: observation.stability,
            source: observation.source,
            origin,
        }
    }
}

impl From<&ResolvedObservation> for WeatherSummary {
    fn from(resolved: &ResolvedObservation) -> Self {
        Self::new(&resolved.observation, resolved.origin)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FactorDetail {
    pub time_point: DateTime<Utc>,
    pub status: bool,
    /// One decimal place
    pub value: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct FactorSeries {
    pub factor: Factor,
    pub label: &'static str,
    pub detail: Vec<FactorDetail>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatusMetadata {
    pub calculation_method: &'static str,
    pub threshold_source: ThresholdSource,
    pub weather: WeatherSummary,
    /// History write-back succeeded
    pub persisted: bool,
    pub generated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SuitabilityStatus {
    pub update_time: DateTime<Utc>,
    pub point_id: String,
    pub aircraft_id: String,
    pub total_hours: u32,
    pub time_interval: u32,
    pub snapshot: SuitabilitySnapshot,
    pub recommendation: Recommendation,
    pub suitability_list: Vec<FactorSeries>,
    pub overall_scores: Vec<f64>,
    pub metadata: StatusMetadata,
}

#[derive(Debug, Clone, Serialize)]
pub struct SuitabilityHeatmap {
    pub update_time: DateTime<Utc>,
    pub time_point: Option<String>,
    pub factor: Option<Factor>,
    pub data: Vec<SuitabilityRecord>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CoreIndicators {
    pub update_time: DateTime<Utc>,
    pub point_id: Option<String>,
    pub indicators: Vec<CoreIndicator>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SafetyThresholds {
    pub max_wind_speed: f64,
    pub min_visibility: f64,
    pub max_humidity: f64,
}

pub const PROFILE_SAFETY_THRESHOLDS: SafetyThresholds = SafetyThresholds {
    max_wind_speed: 15.0,
    min_visibility: 1.0,
    max_humidity: 95.0,
};

#[derive(Debug, Clone, Serialize)]
pub struct VerticalProfile {
    pub update_time: DateTime<Utc>,
    pub point_id: String,
    pub time_type: String,
    pub since: DateTime<Utc>,
    pub height_layers: Vec<VerticalProfileLayer>,
    pub safety_thresholds: SafetyThresholds,
}

#[derive(Debug, Clone, Serialize)]
pub struct HeatmapMetadata {
    pub data_type: &'static str,
    pub unit: &'static str,
    pub calculation_method: &'static str,
    /// The weather-independent fallback grid was used
    pub degraded: bool,
    pub weather: Option<WeatherSummary>,
    pub generated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChartHeatmap {
    pub update_time: DateTime<Utc>,
    pub point_id: String,
    pub time_range: TimeRange,
    pub resolution: Resolution,
    pub route_analysis: bool,
    pub grid: ChartGrid,
    pub metadata: HeatmapMetadata,
}

#[derive(Debug, Clone, Serialize)]
pub struct GeoHeatmap {
    pub update_time: DateTime<Utc>,
    pub time: Option<String>,
    pub resolution: Resolution,
    pub point_id: Option<String>,
    /// Which step of the bounds chain supplied the box
    pub bounds_source: &'static str,
    pub point_count: usize,
    pub grid: GeoGrid,
    pub metadata: HeatmapMetadata,
}

#[derive(Debug, Clone, Serialize)]
pub struct AreaHeatmap {
    pub update_time: DateTime<Utc>,
    pub point_id: Option<String>,
    pub time_range: TimeRange,
    pub resolution: Resolution,
    pub route_analysis: bool,
    pub bounds_source: &'static str,
    pub grid_count: usize,
    pub grid: AreaGrid,
    pub metadata: HeatmapMetadata,
}

/// Area grid when bounds were supplied, point chart otherwise
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "data_type", rename_all = "snake_case")]
pub enum WeatherHeatmap {
    AreaHeatmap(AreaHeatmap),
    PointHeatmap(ChartHeatmap),
}

#[derive(Debug, Clone, Serialize)]
pub struct BatchHeatmap {
    pub update_time: DateTime<Utc>,
    pub area_ids: Vec<String>,
    pub time_range: TimeRange,
    pub resolution: Resolution,
    pub data: BTreeMap<String, ChartHeatmap>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RealtimeWeather {
    pub update_time: DateTime<Utc>,
    pub point_id: String,
    pub origin: ObservationOrigin,
    pub observation: Observation,
}
