//! HTTP API access for the CEV server

pub mod client;
pub mod endpoints;
pub mod types;

pub use client::ApiClient;
