//! Persisted token storage.
//!
//! The two credential strings live under the fixed keys `access_token` and
//! `refresh_token` in a JSON file in the platform data directory, surviving
//! process restarts. They are written together and cleared together: there is
//! no valid on-disk state with one present and the other absent.

use crate::error::ApiResult;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// The persisted token pair. Field names are the storage keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredCredentials {
    pub access_token: String,
    pub refresh_token: String,
}

/// File-backed credential store. The session manager is its sole writer.
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    /// Store backed by an explicit file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the default platform location
    /// (`<data dir>/eduwaka/credentials.json`).
    pub fn at_default_location() -> ApiResult<Self> {
        let dir = crate::config::Config::data_dir().ok_or_else(|| {
            std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "no platform data directory available",
            )
        })?;
        Ok(Self::new(dir.join("credentials.json")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored pair. Returns `Ok(None)` when no file exists or the
    /// file does not parse; an unreadable pair is the same as no pair.
    pub fn load(&self) -> ApiResult<Option<StoredCredentials>> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_str(&raw) {
            Ok(credentials) => Ok(Some(credentials)),
            Err(e) => {
                tracing::warn!("ignoring malformed credentials file: {e}");
                Ok(None)
            }
        }
    }

    /// Persist both tokens, replacing any previous pair.
    pub fn save(&self, credentials: &StoredCredentials) -> ApiResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let raw = serde_json::to_string_pretty(credentials)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        std::fs::write(&self.path, raw)?;
        Ok(())
    }

    /// Remove both tokens. Idempotent: clearing an empty store succeeds.
    pub fn clear(&self) -> ApiResult<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
