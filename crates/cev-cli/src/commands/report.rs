//! Report command implementation

use crate::api::client::ApiClient;
use crate::config;
use crate::error::Result;
use colored::Colorize;
use std::path::PathBuf;
use uuid::Uuid;

/// Run the report command
pub async fn run(server_url: String, id: Uuid, output: Option<PathBuf>) -> Result<()> {
    let token = config::load_token()?;
    let client = ApiClient::new(server_url, token)?;

    let bytes = client.download_report(id).await?;

    let output = output.unwrap_or_else(|| PathBuf::from(format!("dataset_{}.pdf", id)));
    std::fs::write(&output, &bytes)?;

    println!(
        "{} Report saved to {} ({} bytes)",
        "✓".green(),
        output.display(),
        bytes.len()
    );

    Ok(())
}
