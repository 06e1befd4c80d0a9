//! CEV Ingest - offline CSV parsing tool
//!
//! Parses an equipment CSV the same way the server's upload endpoint does
//! and reports the per-row outcome, without touching a database.

use anyhow::{Context, Result};
use cev_common::logging::{init_logging, LogConfig, LogLevel};
use cev_ingest::parser::parse_equipment_csv;
use clap::Parser;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "cev-ingest")]
#[command(author, version, about = "CEV equipment CSV parsing tool")]
struct Cli {
    /// CSV file to parse
    file: std::path::PathBuf,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose {
        LogLevel::Debug
    } else {
        LogLevel::Info
    };

    let log_config = LogConfig::builder()
        .level(log_level)
        .log_file_prefix("cev-ingest".to_string())
        .build();

    // Merge with environment variables (they take precedence)
    let log_config = LogConfig::from_env().unwrap_or(log_config);

    init_logging(&log_config)?;

    let bytes = std::fs::read(&cli.file)
        .with_context(|| format!("Failed to read {}", cli.file.display()))?;

    let parsed = parse_equipment_csv(&bytes)?;

    for outcome in &parsed.rows {
        if let Err(reason) = outcome {
            warn!(%reason, "Skipping row");
        }
    }

    info!(
        file = %cli.file.display(),
        total = parsed.total(),
        parsed = parsed.valid().count(),
        skipped = parsed.skipped(),
        "Parse complete"
    );

    Ok(())
}
