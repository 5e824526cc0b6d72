//! Engine façade: the public suitability and risk operations.
//!
//! The engine holds `Arc`s to its collaborators and immutable settings only.
//! Every request resolves its own observation, builds its own random source
//! and formats a serializable view.

use chrono::{DateTime, Duration, Utc};
use chrono_tz::Tz;
use futures::future::join_all;
use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::config::{EngineConfig, SkywatchConfig};
use crate::models::{
    BoundingBox, DEFAULT_BOUNDS, Factor, Observation, SuitabilityRecord, SuitabilitySnapshot,
    TimePointProjection,
};
use crate::risk::{
    Resolution, Resolved, RiskInputs, Stage, TimeAxis, TimeRange, chart, first_success, geo,
};
use crate::store::{
    CoreIndicatorStore, InMemoryStore, MonitoringPointDirectory, ObservationStore,
    SuitabilityHistoryStore, ThresholdStore, VerticalProfileStore,
};
use crate::suitability::{
    ObservationOrigin, ObservationResolver, ResolvedObservation, RngPolicy, ThresholdProvider,
    evaluate, project, projection::INTERVAL_MINUTES, score,
};
use crate::weather::WeatherProvider;
use crate::{Result, SkywatchError};

pub mod views;

pub use views::{
    AreaHeatmap, AreaRequest, BatchHeatmap, ChartHeatmap, ChartRequest, CoreIndicators,
    FactorDetail, FactorSeries, GeoHeatmap, GeoRequest, HeatmapMetadata,
    PROFILE_SAFETY_THRESHOLDS, RealtimeWeather, SafetyThresholds, StatusMetadata, StatusRequest,
    SuitabilityHeatmap, SuitabilityStatus, VerticalProfile, WeatherHeatmap, WeatherSummary,
};

use views::RISK_UNIT;

const CORE_INDICATOR_LIMIT: usize = 50;

/// Everything the engine reads from or writes to
#[derive(Clone)]
pub struct Collaborators {
    pub observations: Arc<dyn ObservationStore>,
    pub thresholds: Arc<dyn ThresholdStore>,
    pub directory: Arc<dyn MonitoringPointDirectory>,
    pub history: Arc<dyn SuitabilityHistoryStore>,
    pub indicators: Arc<dyn CoreIndicatorStore>,
    pub profiles: Arc<dyn VerticalProfileStore>,
    pub provider: Arc<dyn WeatherProvider>,
}

impl Collaborators {
    /// Back every collaborator with one in-memory store
    pub fn in_memory(store: Arc<InMemoryStore>, provider: Arc<dyn WeatherProvider>) -> Self {
        Self {
            observations: store.clone(),
            thresholds: store.clone(),
            directory: store.clone(),
            history: store.clone(),
            indicators: store.clone(),
            profiles: store,
            provider,
        }
    }
}

#[derive(Clone)]
pub struct SuitabilityEngine {
    resolver: ObservationResolver,
    thresholds: ThresholdProvider,
    directory: Arc<dyn MonitoringPointDirectory>,
    history: Arc<dyn SuitabilityHistoryStore>,
    indicators: Arc<dyn CoreIndicatorStore>,
    profiles: Arc<dyn VerticalProfileStore>,
    settings: EngineConfig,
    timezone: Tz,
    rng: RngPolicy,
}

impl SuitabilityEngine {
    pub fn new(collaborators: Collaborators, config: &SkywatchConfig) -> Self {
        let attempts = config.weather.max_retries.saturating_add(1);
        let provider_timeout = std::time::Duration::from_secs(
            u64::from(config.weather.timeout_seconds) * u64::from(attempts),
        );
        let resolver = ObservationResolver::new(
            collaborators.observations,
            collaborators.directory.clone(),
            collaborators.provider,
            Duration::minutes(i64::from(config.engine.observation_max_age_minutes)),
            provider_timeout,
        );

        Self {
            resolver,
            thresholds: ThresholdProvider::new(collaborators.thresholds),
            directory: collaborators.directory,
            history: collaborators.history,
            indicators: collaborators.indicators,
            profiles: collaborators.profiles,
            timezone: config.display_timezone(),
            rng: RngPolicy::from_seed(config.engine.random_seed),
            settings: config.engine.clone(),
        }
    }

    /// Replace the random source policy, mostly for reproducible tests
    #[must_use]
    pub fn with_rng_policy(mut self, rng: RngPolicy) -> Self {
        self.rng = rng;
        self
    }

    /// Current snapshot, projected series and write-back for one point
    #[tracing::instrument(skip(self, request), fields(point_id = %request.point_id))]
    pub async fn suitability_status(&self, request: StatusRequest) -> Result<SuitabilityStatus> {
        let point_id = required_id(&request.point_id, "point id")?;
        let total_hours = request
            .total_hours
            .unwrap_or(self.settings.default_total_hours);
        if total_hours == 0 || total_hours > self.settings.max_total_hours {
            return Err(SkywatchError::validation(format!(
                "total hours must be within 1..={}, got {total_hours}",
                self.settings.max_total_hours
            )));
        }
        let factor_filter = parse_factor_filter(request.factor.as_deref())?;
        let aircraft_id = request
            .aircraft_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .unwrap_or(&self.settings.default_aircraft_id)
            .to_string();

        match self.directory.by_id(point_id).await {
            Ok(_) => {}
            Err(e @ SkywatchError::NotFound { .. }) => return Err(e),
            Err(e) => warn!("Monitoring point lookup for {point_id} failed, continuing: {e}"),
        }

        let resolved = self.resolver.latest(point_id).await;
        let (profile, threshold_source) = self.thresholds.resolve(&aircraft_id).await;
        let now = Utc::now();

        let factors = evaluate(&resolved.observation, &profile);
        let (percentage, recommendation) = score(&factors);
        let snapshot = SuitabilitySnapshot {
            calculated_at: now,
            factors,
            percentage,
            recommendation,
        };

        let projections = {
            let mut rng = self.rng.source();
            project(&snapshot.factors, total_hours, point_id, now, rng.as_mut())
        };
        let persisted = self
            .write_back(point_id, total_hours, &projections, now)
            .await;

        let selected: Vec<Factor> = match factor_filter {
            Some(factor) => vec![factor],
            None => Factor::ALL.to_vec(),
        };
        let suitability_list = selected
            .into_iter()
            .map(|factor| factor_series(factor, &projections))
            .collect();
        let overall_scores = projections.iter().map(|p| p.percentage).collect();

        info!(
            "Suitability for {point_id}: {percentage:.1}% ({}) from {:?} {} observation",
            recommendation.label(),
            resolved.origin,
            resolved.observation.source.as_str()
        );

        Ok(SuitabilityStatus {
            update_time: now,
            point_id: point_id.to_string(),
            total_hours,
            time_interval: INTERVAL_MINUTES,
            recommendation,
            suitability_list,
            overall_scores,
            metadata: StatusMetadata {
                calculation_method: "real_time_analysis",
                threshold_source,
                weather: WeatherSummary::from(&resolved),
                persisted,
                generated_at: now,
            },
            aircraft_id,
            snapshot,
        })
    }

    /// Replace the projected window of the point in history; failures only log
    async fn write_back(
        &self,
        point_id: &str,
        total_hours: u32,
        projections: &[TimePointProjection],
        now: DateTime<Utc>,
    ) -> bool {
        let (Some(first), Some(last)) = (projections.first(), projections.last()) else {
            return false;
        };

        let records: Vec<SuitabilityRecord> = projections
            .iter()
            .flat_map(|projection| {
                projection.factors.iter().map(|result| SuitabilityRecord {
                    point_id: point_id.to_string(),
                    factor: result.factor,
                    time_point: projection.time_point,
                    interval_minutes: INTERVAL_MINUTES,
                    total_hours,
                    suitable: result.suitable,
                    value: result.value,
                    created_at: now,
                })
            })
            .collect();
        let count = records.len();

        match self
            .history
            .replace_window(point_id, first.time_point, last.time_point, records)
            .await
        {
            Ok(()) => {
                debug!("Stored {count} suitability rows for {point_id}");
                true
            }
            Err(e) => {
                warn!("Suitability write-back for {point_id} failed: {e}");
                false
            }
        }
    }

    /// Latest history rows, newest first
    pub async fn suitability_heatmap(
        &self,
        time_point: Option<String>,
        factor: Option<&str>,
    ) -> Result<SuitabilityHeatmap> {
        let factor = parse_factor_filter(factor)?;
        let data = match self.history.recent(factor, self.settings.history_limit).await {
            Ok(rows) => rows,
            Err(e) => {
                warn!("Reading suitability history failed: {e}");
                Vec::new()
            }
        };

        Ok(SuitabilityHeatmap {
            update_time: Utc::now(),
            time_point,
            factor,
            data,
        })
    }

    /// Latest row of every indicator, newest indicator first
    pub async fn core_indicators(&self, point_id: Option<&str>) -> Result<CoreIndicators> {
        let point_id = point_id.map(str::trim).filter(|id| !id.is_empty());
        let rows = match self.indicators.recent(point_id, CORE_INDICATOR_LIMIT).await {
            Ok(rows) => rows,
            Err(e) => {
                warn!("Reading core indicators failed: {e}");
                Vec::new()
            }
        };

        let mut seen = HashSet::new();
        let indicators = rows
            .into_iter()
            .filter(|row| seen.insert(row.indicator_id.clone()))
            .collect();

        Ok(CoreIndicators {
            update_time: Utc::now(),
            point_id: point_id.map(str::to_string),
            indicators,
        })
    }

    /// Recent layers of a point ordered by ascending height
    pub async fn vertical_profile(
        &self,
        point_id: &str,
        time_type: Option<&str>,
    ) -> Result<VerticalProfile> {
        let point_id = required_id(point_id, "point id")?;
        let time_type = time_type.map(str::trim).unwrap_or_default();
        let window = match time_type {
            "1h" => Duration::hours(1),
            "3h" => Duration::hours(3),
            "6h" => Duration::hours(6),
            _ => Duration::minutes(30),
        };
        let now = Utc::now();
        let since = now - window;

        let mut height_layers = match self.profiles.since(point_id, since).await {
            Ok(layers) => layers,
            Err(e) => {
                warn!("Reading vertical profile of {point_id} failed: {e}");
                Vec::new()
            }
        };
        height_layers.sort_by(|a, b| a.height.total_cmp(&b.height));

        Ok(VerticalProfile {
            update_time: now,
            point_id: point_id.to_string(),
            time_type: time_type.to_string(),
            since,
            height_layers,
            safety_thresholds: PROFILE_SAFETY_THRESHOLDS,
        })
    }

    /// Time × height risk chart for a point
    #[tracing::instrument(skip(self, request), fields(point_id = %request.point_id))]
    pub async fn chart_heatmap(&self, request: ChartRequest) -> Result<ChartHeatmap> {
        let point_id = required_id(&request.point_id, "point id")?;
        let time_range = TimeRange::parse(request.time_range.as_deref());
        let resolution = Resolution::parse(request.resolution.as_deref());

        let resolved = self.resolver.latest(point_id).await;
        let inputs = self.risk_inputs(&resolved.observation).await;
        let now = Utc::now();
        let axis = self.axis(now, time_range);
        debug!(
            "Charting {point_id} over {} at {} resolution",
            time_range.as_str(),
            resolution.as_str()
        );

        let grid = {
            let mut rng = self.rng.source();
            first_success(
                vec![Stage::new("weather", || {
                    chart::generate(&inputs, &axis, resolution, request.route_analysis, rng.as_mut())
                })],
                "sinusoidal",
                || chart::fallback(&axis, resolution),
            )
        };

        Ok(ChartHeatmap {
            update_time: now,
            point_id: point_id.to_string(),
            time_range,
            resolution,
            route_analysis: request.route_analysis,
            metadata: self.metadata(
                if grid.degraded {
                    "basic_flight_risk_heatmap"
                } else {
                    "flight_risk_heatmap"
                },
                &grid,
                Some(&resolved),
                now,
            ),
            grid: grid.value,
        })
    }

    /// Geographic risk grid over a bounding box
    pub async fn geo_heatmap(&self, request: GeoRequest) -> Result<GeoHeatmap> {
        let point_id = optional_id(request.point_id.as_deref());
        let resolution = Resolution::parse(request.resolution.as_deref());
        let bounds = self.resolve_bounds(request.bounds.as_deref(), point_id).await;
        let resolved = self.observation_for(point_id).await;
        let inputs = self.risk_inputs(&resolved.observation).await;
        let now = Utc::now();

        let grid = first_success(
            vec![Stage::new("weather", || {
                geo::generate_geo(&inputs, &bounds.value, resolution)
            })],
            "sinusoidal",
            || geo::fallback_geo(&bounds.value, resolution),
        );

        Ok(GeoHeatmap {
            update_time: now,
            time: request.time,
            resolution,
            point_id: point_id.map(str::to_string),
            bounds_source: bounds.stage,
            point_count: grid.value.points.len(),
            metadata: self.metadata(
                if grid.degraded { "basic_geo_heatmap" } else { "geo_heatmap" },
                &grid,
                Some(&resolved),
                now,
            ),
            grid: grid.value,
        })
    }

    /// Geographic grid with a risk time series per cell
    pub async fn area_heatmap(&self, request: AreaRequest) -> Result<AreaHeatmap> {
        let point_id = optional_id(request.point_id.as_deref());
        let time_range = TimeRange::parse(request.time_range.as_deref());
        let resolution = Resolution::parse(request.resolution.as_deref());
        let bounds = self.resolve_bounds(request.bounds.as_deref(), point_id).await;
        let resolved = self.observation_for(point_id).await;
        let inputs = self.risk_inputs(&resolved.observation).await;
        let now = Utc::now();
        let axis = self.axis(now, time_range);

        let grid = {
            let mut rng = self.rng.source();
            first_success(
                vec![Stage::new("weather", || {
                    geo::generate_area(&inputs, &bounds.value, &axis, resolution, rng.as_mut())
                })],
                "sinusoidal",
                || geo::fallback_area(&bounds.value, &axis, resolution),
            )
        };

        Ok(AreaHeatmap {
            update_time: now,
            point_id: point_id.map(str::to_string),
            time_range,
            resolution,
            route_analysis: request.route_analysis,
            bounds_source: bounds.stage,
            grid_count: grid.value.cells.len(),
            metadata: self.metadata(
                if grid.degraded { "basic_area_heatmap" } else { "area_heatmap" },
                &grid,
                Some(&resolved),
                now,
            ),
            grid: grid.value,
        })
    }

    /// Area grid when bounds are given, otherwise the chart of the named or default point
    pub async fn weather_heatmap(&self, request: AreaRequest) -> Result<WeatherHeatmap> {
        let has_bounds = request
            .bounds
            .as_deref()
            .is_some_and(|bounds| !bounds.trim().is_empty());
        if has_bounds {
            return self.area_heatmap(request).await.map(WeatherHeatmap::AreaHeatmap);
        }

        let point_id = optional_id(request.point_id.as_deref())
            .unwrap_or(&self.settings.default_point_id)
            .to_string();
        self.chart_heatmap(ChartRequest {
            point_id,
            time_range: request.time_range,
            resolution: request.resolution,
            route_analysis: request.route_analysis,
        })
        .await
        .map(WeatherHeatmap::PointHeatmap)
    }

    /// Route-analysis charts for a comma-separated list of areas, computed concurrently
    pub async fn batch_heatmap(
        &self,
        area_ids: &str,
        time_range: Option<&str>,
        resolution: Option<&str>,
    ) -> Result<BatchHeatmap> {
        let mut ids: Vec<String> = Vec::new();
        for id in area_ids.split(',').map(str::trim).filter(|id| !id.is_empty()) {
            if !ids.iter().any(|known| known == id) {
                ids.push(id.to_string());
            }
        }
        if ids.is_empty() {
            return Err(SkywatchError::validation("area ids cannot be empty"));
        }

        let charts = join_all(ids.iter().map(|id| {
            self.chart_heatmap(ChartRequest {
                point_id: id.clone(),
                time_range: time_range.map(str::to_string),
                resolution: resolution.map(str::to_string),
                route_analysis: true,
            })
        }))
        .await;

        let mut data = BTreeMap::new();
        for (id, chart) in ids.iter().zip(charts) {
            data.insert(id.clone(), chart?);
        }
        info!("Computed batch heatmap for {} areas", data.len());

        Ok(BatchHeatmap {
            update_time: Utc::now(),
            area_ids: ids,
            time_range: TimeRange::parse(time_range),
            resolution: Resolution::parse(resolution),
            data,
        })
    }

    /// Latest observation of a point and how it was obtained
    pub async fn realtime_weather(&self, point_id: &str) -> Result<RealtimeWeather> {
        let point_id = required_id(point_id, "point id")?;
        let resolved = self.resolver.latest(point_id).await;
        Ok(RealtimeWeather {
            update_time: Utc::now(),
            point_id: point_id.to_string(),
            origin: resolved.origin,
            observation: resolved.observation,
        })
    }

    async fn risk_inputs(&self, observation: &Observation) -> RiskInputs {
        let profile = self.thresholds.profile(&self.settings.default_aircraft_id).await;
        RiskInputs::from_observation(observation, &profile)
    }

    async fn observation_for(&self, point_id: Option<&str>) -> ResolvedObservation {
        match point_id {
            Some(point_id) => self.resolver.latest(point_id).await,
            None => ResolvedObservation {
                observation: Observation::synthetic("area", Utc::now()),
                origin: ObservationOrigin::Synthetic,
            },
        }
    }

    /// Request bounds, then the point's box, then the default box
    async fn resolve_bounds(
        &self,
        bounds: Option<&str>,
        point_id: Option<&str>,
    ) -> Resolved<BoundingBox> {
        let point_bounds = match point_id {
            Some(point_id) => match self.directory.by_id(point_id).await {
                Ok(point) => point.bounds,
                Err(e) => {
                    debug!("No bounds from monitoring point {point_id}: {e}");
                    None
                }
            },
            None => None,
        };

        first_success(
            vec![
                Stage::new("request", || match bounds {
                    Some(bounds) => BoundingBox::parse(bounds),
                    None => Err(SkywatchError::validation("no bounds supplied")),
                }),
                Stage::new("monitoring_point", || {
                    point_bounds.ok_or_else(|| SkywatchError::not_found("point has no bounds"))
                }),
            ],
            "default",
            || DEFAULT_BOUNDS,
        )
    }

    fn axis(&self, start: DateTime<Utc>, range: TimeRange) -> TimeAxis {
        TimeAxis {
            start,
            range,
            timezone: self.timezone,
        }
    }

    fn metadata<T>(
        &self,
        data_type: &'static str,
        grid: &Resolved<T>,
        resolved: Option<&ResolvedObservation>,
        now: DateTime<Utc>,
    ) -> HeatmapMetadata {
        HeatmapMetadata {
            data_type,
            unit: RISK_UNIT,
            calculation_method: if grid.degraded {
                "sinusoidal_fallback"
            } else {
                "weather_risk_model"
            },
            degraded: grid.degraded,
            weather: resolved.map(WeatherSummary::from),
            generated_at: now,
        }
    }
}

fn required_id<'a>(id: &'a str, what: &str) -> Result<&'a str> {
    let id = id.trim();
    if id.is_empty() {
        return Err(SkywatchError::validation(format!("{what} cannot be empty")));
    }
    Ok(id)
}

fn optional_id(id: Option<&str>) -> Option<&str> {
    id.map(str::trim).filter(|id| !id.is_empty())
}

/// `None` selects every factor
fn parse_factor_filter(factor: Option<&str>) -> Result<Option<Factor>> {
    match factor.map(str::trim) {
        None | Some("") | Some("composite") | Some("综合") => Ok(None),
        Some(name) => Factor::parse(name)
            .map(Some)
            .ok_or_else(|| SkywatchError::validation(format!("unknown factor '{name}'"))),
    }
}

fn factor_series(factor: Factor, projections: &[TimePointProjection]) -> FactorSeries {
    let detail = projections
        .iter()
        .filter_map(|projection| {
            projection
                .factors
                .iter()
                .find(|result| result.factor == factor)
                .map(|result| FactorDetail {
                    time_point: projection.time_point,
                    status: result.suitable,
                    value: format!("{:.1}", result.value),
                })
        })
        .collect();

    FactorSeries {
        factor,
        label: factor.label(),
        detail,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MonitoringPoint, Recommendation};
    use crate::suitability::ThresholdSource;
    use crate::weather::StaticWeatherProvider;

    #[test]
    fn test_factor_filter() {
        assert_eq!(parse_factor_filter(None).unwrap(), None);
        assert_eq!(parse_factor_filter(Some("composite")).unwrap(), None);
        assert_eq!(parse_factor_filter(Some("综合")).unwrap(), None);
        assert_eq!(
            parse_factor_filter(Some("wind")).unwrap(),
            Some(Factor::Wind)
        );
        assert!(matches!(
            parse_factor_filter(Some("gravity")),
            Err(SkywatchError::Validation { .. })
        ));
    }

    #[test]
    fn test_required_id_trims() {
        assert_eq!(required_id("  p1 ", "point id").unwrap(), "p1");
        assert!(required_id("   ", "point id").is_err());
    }

    async fn engine() -> (SuitabilityEngine, Arc<InMemoryStore>) {
        let store = Arc::new(InMemoryStore::new());
        store
            .add_point(MonitoringPoint {
                id: "p1".to_string(),
                name: "Harbour".to_string(),
                longitude: 120.4,
                latitude: 36.2,
                bounds: Some(BoundingBox {
                    min_lng: 120.3,
                    min_lat: 36.1,
                    max_lng: 120.5,
                    max_lat: 36.3,
                }),
            })
            .await;
        let collaborators = Collaborators::in_memory(
            store.clone(),
            Arc::new(StaticWeatherProvider::unavailable()),
        );
        let engine = SuitabilityEngine::new(collaborators, &SkywatchConfig::default())
            .with_rng_policy(RngPolicy::Seeded(7));
        (engine, store)
    }

    #[tokio::test]
    async fn test_status_on_synthetic_weather() {
        let (engine, _) = engine().await;
        let status = engine
            .suitability_status(StatusRequest::for_point("p1"))
            .await
            .unwrap();

        // synthetic conditions fail only the turbulence factor (class C)
        assert!((status.snapshot.percentage - 500.0 / 6.0).abs() < 1e-9);
        assert_eq!(status.recommendation, Recommendation::Suitable);
        assert_eq!(status.overall_scores.len(), 19);
        assert_eq!(status.suitability_list.len(), 6);
        assert_eq!(status.metadata.threshold_source, ThresholdSource::Default);
        assert!(status.metadata.persisted);
    }

    #[tokio::test]
    async fn test_factor_filter_limits_series_not_history() {
        let (engine, store) = engine().await;
        let status = engine
            .suitability_status(StatusRequest {
                factor: Some("wind".to_string()),
                total_hours: Some(1),
                ..StatusRequest::for_point("p1")
            })
            .await
            .unwrap();

        assert_eq!(status.suitability_list.len(), 1);
        assert_eq!(status.suitability_list[0].factor, Factor::Wind);
        assert_eq!(status.suitability_list[0].detail.len(), 7);
        assert_eq!(store.history_for("p1").await.len(), 7 * 6);
    }

    #[tokio::test]
    async fn test_geo_bounds_fall_back_to_point_box() {
        let (engine, _) = engine().await;
        let heatmap = engine
            .geo_heatmap(GeoRequest {
                bounds: Some("[1,2,3]".to_string()),
                point_id: Some("p1".to_string()),
                ..GeoRequest::default()
            })
            .await
            .unwrap();
        assert_eq!(heatmap.bounds_source, "monitoring_point");
        assert_eq!(heatmap.grid.bounds.min_lng, 120.3);
    }

    #[tokio::test]
    async fn test_geo_defaults_without_bounds_or_point() {
        let (engine, _) = engine().await;
        let heatmap = engine.geo_heatmap(GeoRequest::default()).await.unwrap();
        assert_eq!(heatmap.bounds_source, "default");
        assert_eq!(heatmap.grid.bounds, DEFAULT_BOUNDS);
        assert_eq!(heatmap.point_count, 144);
    }

    #[tokio::test]
    async fn test_weather_heatmap_picks_grid_kind() {
        let (engine, _) = engine().await;
        let area = engine
            .weather_heatmap(AreaRequest {
                bounds: Some("[120,36,121,37]".to_string()),
                ..AreaRequest::default()
            })
            .await
            .unwrap();
        assert!(matches!(area, WeatherHeatmap::AreaHeatmap(_)));

        let point = engine
            .weather_heatmap(AreaRequest {
                point_id: Some("p1".to_string()),
                ..AreaRequest::default()
            })
            .await
            .unwrap();
        assert!(matches!(point, WeatherHeatmap::PointHeatmap(_)));
    }

    #[tokio::test]
    async fn test_weather_heatmap_charts_default_point() {
        let (engine, _) = engine().await;
        let heatmap = engine.weather_heatmap(AreaRequest::default()).await.unwrap();
        match heatmap {
            WeatherHeatmap::PointHeatmap(chart) => assert_eq!(chart.point_id, "point-1"),
            WeatherHeatmap::AreaHeatmap(_) => panic!("expected a point chart"),
        }
    }
}
