//! CEV CLI - Main entry point

use cev_cli::{Cli, Commands};
use cev_common::logging::{init_logging, LogConfig, LogLevel, LogOutput};
use clap::Parser;
use std::process;
use tracing::error;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // Parse command-line arguments
    let cli = Cli::parse();

    // Initialize logging based on verbose flag and environment
    let log_config = if cli.verbose {
        LogConfig::builder()
            .level(LogLevel::Debug)
            .output(LogOutput::Console)
            .log_file_prefix("cev-cli".to_string())
            .build()
    } else {
        LogConfig::builder()
            .level(LogLevel::Warn)
            .output(LogOutput::Console)
            .log_file_prefix("cev-cli".to_string())
            .build()
    };

    // Merge with environment variables (they take precedence)
    let log_config = LogConfig::from_env().unwrap_or(log_config);

    // Initialize logging (ignore errors as the CLI works without logging)
    let _ = init_logging(&log_config);

    // Execute command
    let result = execute_command(cli).await;

    // Handle result
    if let Err(e) = result {
        error!(error = %e, "Command failed");
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Execute the CLI command
async fn execute_command(cli: Cli) -> cev_cli::Result<()> {
    let server_url = cli.server_url;

    match cli.command {
        Commands::Status => cev_cli::commands::status::run(server_url).await,

        Commands::Login { username, password } => {
            cev_cli::commands::login::run(server_url, username, password).await
        },

        Commands::Upload { file, name } => {
            cev_cli::commands::upload::run(server_url, file, name).await
        },

        Commands::Datasets => cev_cli::commands::datasets::run(server_url).await,

        Commands::Summary { id } => cev_cli::commands::summary::run(server_url, id).await,

        Commands::Export {
            search,
            material,
            min_pressure,
            min_temperature,
            output,
        } => {
            cev_cli::commands::export::run(
                server_url,
                search,
                material,
                min_pressure,
                min_temperature,
                output,
            )
            .await
        },

        Commands::Report { id, output } => {
            cev_cli::commands::report::run(server_url, id, output).await
        },
    }
}
