//! Upload command implementation

use crate::api::client::ApiClient;
use crate::config;
use crate::error::Result;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Duration;

/// Run the upload command
pub async fn run(server_url: String, file: PathBuf, name: Option<String>) -> Result<()> {
    let token = config::load_token()?;
    let client = ApiClient::new(server_url, token)?;

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::with_template("{spinner} {msg}").unwrap_or_else(|_| ProgressStyle::default_spinner()));
    spinner.set_message(format!("Uploading {}", file.display()));
    spinner.enable_steady_tick(Duration::from_millis(100));

    let result = client.upload_csv(&file, name.as_deref()).await;
    spinner.finish_and_clear();

    let result = result?;

    println!(
        "{} Created dataset {} ({})",
        "✓".green(),
        result.dataset.name.bold(),
        result.dataset.id
    );
    println!(
        "  {} equipment rows created, count now {}",
        result.created, result.dataset.equipment_count
    );
    println!(
        "  avg flowrate {:.2}, avg pressure {:.2}, avg temperature {:.2}",
        result.dataset.avg_flowrate,
        result.dataset.avg_pressure,
        result.dataset.avg_temperature
    );

    Ok(())
}
