//! Status command implementation

use crate::api::client::ApiClient;
use crate::error::Result;
use colored::Colorize;

/// Run the status command
pub async fn run(server_url: String) -> Result<()> {
    let client = ApiClient::new(server_url.clone(), None)?;

    if client.health_check().await? {
        println!("{} {}", "✓".green(), format!("Server is up at {}", server_url));
    } else {
        println!("{} {}", "✗".red(), format!("Server is unreachable at {}", server_url));
    }

    Ok(())
}
