//! Profile configuration sources (Imperative Shell).

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use dynamigrate_core::profile::{parse_profiles, ConfigError, ConnectionProfile, Result};

/// Default location of the profile configuration file.
pub const DEFAULT_CONFIG_PATH: &str = "config.json";

/// Supplies the list of connection profiles.
///
/// Called on every connect; implementations must not cache.
#[async_trait]
pub trait ProfileSource: Send + Sync {
    async fn load_profiles(&self) -> Result<Vec<ConnectionProfile>>;
}

/// Profiles read from a JSON file holding an array of profile records.
#[derive(Debug, Clone)]
pub struct JsonProfileFile {
    path: PathBuf,
}

impl JsonProfileFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for JsonProfileFile {
    fn default() -> Self {
        Self::new(DEFAULT_CONFIG_PATH)
    }
}

#[async_trait]
impl ProfileSource for JsonProfileFile {
    async fn load_profiles(&self) -> Result<Vec<ConnectionProfile>> {
        let contents = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| ConfigError::Read {
                path: self.path.display().to_string(),
                reason: e.to_string(),
            })?;

        let profiles = parse_profiles(&contents)?;
        tracing::debug!(
            path = %self.path.display(),
            count = profiles.len(),
            "Loaded connection profiles"
        );
        Ok(profiles)
    }
}

/// A fixed list of profiles, for embedding and tests.
#[derive(Debug, Clone, Default)]
pub struct StaticProfiles(pub Vec<ConnectionProfile>);

#[async_trait]
impl ProfileSource for StaticProfiles {
    async fn load_profiles(&self) -> Result<Vec<ConnectionProfile>> {
        Ok(self.0.clone())
    }
}
