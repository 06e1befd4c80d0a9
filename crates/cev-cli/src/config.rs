//! CLI configuration
//!
//! The server URL comes from the command line or `CEV_SERVER_URL`. The API
//! token comes from `CEV_API_TOKEN` or the token file written by
//! `cev login`.

use crate::error::{CliError, Result};
use std::path::PathBuf;

/// Default CEV server URL when not specified via environment variable.
pub const DEFAULT_SERVER_URL: &str = "http://localhost:8000";

/// Resolve the path of the stored token file (`~/.config/cev/token`).
pub fn token_file() -> Result<PathBuf> {
    let base = dirs::config_dir()
        .ok_or_else(|| CliError::config("Could not determine the user config directory"))?;
    Ok(base.join("cev").join("token"))
}

/// Load the API token from the environment or the token file.
///
/// Returns `None` when neither source has a token; commands that need
/// authentication turn that into an actionable error.
pub fn load_token() -> Result<Option<String>> {
    if let Ok(token) = std::env::var("CEV_API_TOKEN") {
        let token = token.trim().to_string();
        if !token.is_empty() {
            return Ok(Some(token));
        }
    }

    let path = token_file()?;
    if !path.exists() {
        return Ok(None);
    }

    let token = std::fs::read_to_string(&path)?.trim().to_string();
    Ok((!token.is_empty()).then_some(token))
}

/// Persist the API token to the token file.
pub fn save_token(token: &str) -> Result<PathBuf> {
    let path = token_file()?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&path, token)?;
    Ok(path)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_token_file_ends_with_expected_path() {
        let path = token_file().unwrap();
        assert!(path.ends_with("cev/token"));
    }
}
