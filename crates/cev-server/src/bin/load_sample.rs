//! Load a sample equipment CSV into the database
//!
//! Runs the same ingestion command the upload endpoint uses, against a
//! local file. Defaults to the bundled sample data; pass a path to load a
//! different file.

use anyhow::{Context, Result};
use cev_common::logging::{init_logging, LogConfig};
use cev_server::config::Config;
use cev_server::features::datasets::commands::ingest::{handle, IngestDatasetCommand};
use std::path::PathBuf;
use tracing::info;

const DEFAULT_SAMPLE_PATH: &str = "demos/sample_equipment_data.csv";

#[tokio::main]
async fn main() -> Result<()> {
    let log_config = LogConfig::from_env().unwrap_or_default();
    init_logging(&log_config)?;

    let path: PathBuf = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SAMPLE_PATH));

    let content = std::fs::read(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let config = Config::load()?;
    let pool = cev_server::db::create_pool(&config.database).await?;

    sqlx::migrate!("../../migrations").run(&pool).await?;

    let filename = path.file_name().map(|n| n.to_string_lossy().to_string());

    let command = IngestDatasetCommand { filename, content };
    let response = handle(pool, command).await?;

    info!(
        dataset_id = %response.dataset.id,
        dataset_name = %response.dataset.name,
        created = response.created,
        "Sample data loaded"
    );

    Ok(())
}
