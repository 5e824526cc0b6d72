use anyhow::{Context, Result};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

use skywatch::engine::{ChartRequest, Collaborators, StatusRequest};
use skywatch::models::BoundingBox;
use skywatch::{InMemoryStore, MonitoringPoint, PersistentStore, SkywatchConfig, SuitabilityEngine};

fn demo_point(id: &str) -> MonitoringPoint {
    MonitoringPoint {
        id: id.to_string(),
        name: "Demo airfield".to_string(),
        longitude: 120.38,
        latitude: 36.07,
        bounds: Some(BoundingBox {
            min_lng: 120.2,
            min_lat: 35.9,
            max_lng: 120.6,
            max_lat: 36.3,
        }),
    }
}

async fn build_engine(config: &SkywatchConfig, point: MonitoringPoint) -> Result<SuitabilityEngine> {
    let provider = skywatch::weather::from_config(&config.weather)?;
    let memory = Arc::new(InMemoryStore::new());

    let collaborators = if config.storage.backend == "persistent" {
        let path = config.storage_path();
        let persistent = Arc::new(
            PersistentStore::open(&path)
                .with_context(|| format!("Failed to open store at {}", path.display()))?,
        );
        persistent.add_point(point).await?;
        Collaborators {
            observations: persistent.clone(),
            thresholds: persistent.clone(),
            directory: persistent,
            ..Collaborators::in_memory(memory, provider)
        }
    } else {
        memory.add_point(point).await;
        Collaborators::in_memory(memory, provider)
    };

    Ok(SuitabilityEngine::new(collaborators, config))
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = SkywatchConfig::load_from_path(std::env::var_os("SKYWATCH_CONFIG").map(PathBuf::from))?;
    skywatch::logging::init(&config.logging)?;
    info!("Skywatch {} starting with {} storage", skywatch::VERSION, config.storage.backend);

    let point_id = std::env::args().nth(1).unwrap_or_else(|| "point-1".to_string());
    let engine = build_engine(&config, demo_point(&point_id)).await?;

    let status = engine
        .suitability_status(StatusRequest::for_point(&point_id))
        .await?;
    println!("{}", serde_json::to_string_pretty(&status)?);

    let chart = engine
        .chart_heatmap(ChartRequest {
            point_id,
            ..ChartRequest::default()
        })
        .await?;
    println!("{}", serde_json::to_string_pretty(&chart)?);

    Ok(())
}
