//! Login command implementation

use crate::api::client::ApiClient;
use crate::config;
use crate::error::Result;
use colored::Colorize;
use tracing::debug;

/// Run the login command
pub async fn run(server_url: String, username: String, password: String) -> Result<()> {
    let client = ApiClient::new(server_url, None)?;

    let token = client.issue_token(&username, &password).await?;
    let path = config::save_token(&token)?;

    debug!(path = %path.display(), "Token stored");
    println!("{} Logged in as {}", "✓".green(), username.bold());
    println!("Token stored in {}", path.display());

    Ok(())
}
