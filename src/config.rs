//! Runtime configuration
//!
//! Resolution order, later wins: built-in defaults, the JSON file at
//! `<config dir>/hanip-cinema/config.json`, then `CINEMA_API_URL`.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use url::Url;

pub const DEFAULT_API_URL: &str = "http://localhost:12345";
pub const API_URL_ENV: &str = "CINEMA_API_URL";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("invalid API url {0:?}")]
    InvalidUrl(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_url: String,
}

/// Fields accepted in the config file; all optional
#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    api_url: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
        }
    }
}

impl Config {
    /// Load from the default file location and the environment
    pub fn load() -> Result<Self, ConfigError> {
        let env_url = std::env::var(API_URL_ENV).ok();
        Self::resolve(Self::default_path().as_deref(), env_url.as_deref())
    }

    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("hanip-cinema").join("config.json"))
    }

    fn resolve(file: Option<&Path>, env_url: Option<&str>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(path) = file.filter(|p| p.exists()) {
            let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })?;
            let parsed: FileConfig =
                serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
                    path: path.to_path_buf(),
                    source,
                })?;
            if let Some(url) = parsed.api_url.filter(|u| !u.trim().is_empty()) {
                config.api_url = url;
            }
        }

        if let Some(url) = env_url.filter(|u| !u.trim().is_empty()) {
            config.api_url = url.to_string();
        }

        config.api_url = config.api_url.trim().trim_end_matches('/').to_string();
        Url::parse(&config.api_url).map_err(|_| ConfigError::InvalidUrl(config.api_url.clone()))?;
        Ok(config)
    }
}
