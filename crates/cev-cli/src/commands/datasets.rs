//! Datasets listing command implementation

use crate::api::client::ApiClient;
use crate::commands::summary_table;
use crate::error::Result;
use colored::Colorize;

/// Run the datasets command
pub async fn run(server_url: String) -> Result<()> {
    let client = ApiClient::new(server_url, None)?;

    let summaries = client.list_datasets().await?;

    if summaries.is_empty() {
        println!("No datasets yet. Upload one with {}", "cev upload <file.csv>".bold());
        return Ok(());
    }

    println!("{}", summary_table(&summaries));

    Ok(())
}
