//! Configuration for the EduWaka client.
//!
//! Resolution order for the API base URL:
//! 1. `EDUWAKA_API_BASE_URL` environment variable
//! 2. `config.toml` in the platform config directory
//! 3. the built-in default (local development backend)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default collaborator base path (local development backend).
pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8000/api/";

/// Client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the EduWaka HTTP API. All endpoint paths are relative
    /// to this value.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
        }
    }
}

impl Config {
    /// Load configuration, applying the resolution order above.
    ///
    /// A missing or unparseable config file is not an error; the defaults
    /// apply and a warning is logged.
    pub fn load() -> Self {
        let mut config = match Self::config_path() {
            Some(path) if path.exists() => match std::fs::read_to_string(&path) {
                Ok(raw) => toml::from_str(&raw).unwrap_or_else(|e| {
                    tracing::warn!("ignoring malformed config at {}: {e}", path.display());
                    Self::default()
                }),
                Err(e) => {
                    tracing::warn!("could not read config at {}: {e}", path.display());
                    Self::default()
                }
            },
            _ => Self::default(),
        };

        if let Ok(url) = std::env::var("EDUWAKA_API_BASE_URL") {
            if !url.is_empty() {
                config.api_base_url = url;
            }
        }

        config
    }

    /// Path of the TOML config file, if a platform config dir exists.
    pub fn config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "eduwaka")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Platform data directory used for the credentials file.
    pub fn data_dir() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "eduwaka")
            .map(|dirs| dirs.data_dir().to_path_buf())
    }
}
