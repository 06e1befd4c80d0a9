//! Export command implementation

use crate::api::client::ApiClient;
use crate::error::Result;
use colored::Colorize;
use std::path::PathBuf;

/// Run the export command
pub async fn run(
    server_url: String,
    search: Option<String>,
    material: Option<String>,
    min_pressure: Option<f64>,
    min_temperature: Option<f64>,
    output: PathBuf,
) -> Result<()> {
    let client = ApiClient::new(server_url, None)?;

    let bytes = client
        .export_csv(
            search.as_deref(),
            material.as_deref(),
            min_pressure,
            min_temperature,
        )
        .await?;

    std::fs::write(&output, &bytes)?;

    // Data rows, excluding the header line.
    let rows = bytes.iter().filter(|b| **b == b'\n').count().saturating_sub(1);
    println!(
        "{} Exported {} equipment rows to {}",
        "✓".green(),
        rows,
        output.display()
    );

    Ok(())
}
