//! CEV CLI Library
//!
//! Command-line client for the CEV backend: upload equipment CSV files,
//! browse datasets and their aggregate summaries, export filtered
//! equipment, and download PDF reports. It speaks the same HTTP API the
//! desktop client uses.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod api;
pub mod commands;
pub mod config;
pub mod error;

pub use error::{CliError, Result};

/// CEV command-line interface
#[derive(Parser, Debug)]
#[command(name = "cev")]
#[command(author, version, about = "Chemical equipment dataset client")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// CEV server URL (overrides CEV_SERVER_URL)
    #[arg(long, global = true, env = "CEV_SERVER_URL", default_value = config::DEFAULT_SERVER_URL)]
    pub server_url: String,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check server health
    Status,

    /// Log in and store an API token
    Login {
        /// Username
        #[arg(short, long)]
        username: String,

        /// Password (falls back to CEV_PASSWORD)
        #[arg(short, long, env = "CEV_PASSWORD")]
        password: String,
    },

    /// Upload an equipment CSV as a new dataset
    Upload {
        /// CSV file to upload
        file: PathBuf,

        /// Override the dataset display name
        #[arg(long)]
        name: Option<String>,
    },

    /// List the most recent datasets with their summaries
    Datasets,

    /// Show the aggregate summary for one dataset
    Summary {
        /// Dataset identifier
        id: uuid::Uuid,
    },

    /// Export equipment rows as CSV
    Export {
        /// Case-insensitive name search
        #[arg(long)]
        search: Option<String>,

        /// Exact material match
        #[arg(long)]
        material: Option<String>,

        /// Minimum pressure (inclusive)
        #[arg(long)]
        min_pressure: Option<f64>,

        /// Minimum temperature (inclusive)
        #[arg(long)]
        min_temperature: Option<f64>,

        /// Output file
        #[arg(short, long, default_value = "equipment.csv")]
        output: PathBuf,
    },

    /// Download the PDF report for one dataset
    Report {
        /// Dataset identifier
        id: uuid::Uuid,

        /// Output file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}
