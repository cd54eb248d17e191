//! Client configuration: the API key and the base URL of the service.
//!
//! The command layer resolves a `Config` once and hands it to
//! `MochiClient::new`; the client never looks at the environment itself.

use crate::error::{MochiError, Result};
use std::path::PathBuf;
use tracing::debug;

pub const DEFAULT_BASE_URL: &str = "https://app.mochi.cards/api";

#[derive(Clone, Debug)]
pub struct Config {
    pub api_key: String,
    pub base_url: String,
}

impl Config {
    /// Build a config from an explicit key. Blank keys are rejected.
    pub fn new(api_key: &str, base_url: &str) -> Result<Self> {
        let api_key = api_key.trim();
        if api_key.is_empty() {
            return Err(MochiError::MissingApiKey);
        }
        Ok(Config {
            api_key: api_key.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Resolve the key from the command line value (which clap already
    /// filled from `MOCHI_API_KEY` when the flag is absent), falling back to
    /// the key file in the user's config directory.
    pub fn resolve(api_key: Option<&str>, base_url: &str) -> Result<Self> {
        if let Some(key) = api_key.filter(|k| !k.trim().is_empty()) {
            return Config::new(key, base_url);
        }
        match load_key_file() {
            Some(key) => Config::new(&key, base_url),
            None => Err(MochiError::MissingApiKey),
        }
    }
}

/// Location of the fallback key file, `<config dir>/mochi/api_key`.
pub fn key_file_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("mochi").join("api_key"))
}

fn load_key_file() -> Option<String> {
    let path = key_file_path()?;
    let data = std::fs::read_to_string(&path).ok()?;
    debug!("Loaded API key from {}", path.display());
    Some(data.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_trims_key_and_base_url() {
        let config = Config::new("  secret \n", "http://localhost:9000/api/").unwrap();
        assert_eq!(config.api_key, "secret");
        assert_eq!(config.base_url, "http://localhost:9000/api");
    }

    #[test]
    fn test_blank_key_is_missing() {
        let err = Config::new("   ", DEFAULT_BASE_URL).unwrap_err();
        assert!(matches!(err, MochiError::MissingApiKey));
    }

    #[test]
    fn test_resolve_prefers_explicit_key() {
        let config = Config::resolve(Some("from-flag"), DEFAULT_BASE_URL).unwrap();
        assert_eq!(config.api_key, "from-flag");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }
}
