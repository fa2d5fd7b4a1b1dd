//! Configuration store.
//!
//! Reads and writes `config.json` in the data directory. The chat loop only
//! ever loads; saving is reserved for the `init` and `models` workflows.

use std::path::{Path, PathBuf};

use perkins_types::config::PerkinsConfig;
use perkins_types::error::ConfigError;

use crate::filesystem;

/// JSON-file-backed store for the singleton [`PerkinsConfig`].
pub struct ConfigStore {
    config_path: PathBuf,
}

impl ConfigStore {
    /// Create a store rooted at the given data directory.
    pub fn new(data_dir: &Path) -> Self {
        Self {
            config_path: filesystem::config_path(data_dir),
        }
    }

    /// Path of the backing file, for display.
    pub fn path(&self) -> &Path {
        &self.config_path
    }

    /// Whether a configuration file exists.
    pub async fn exists(&self) -> bool {
        tokio::fs::try_exists(&self.config_path).await.unwrap_or(false)
    }

    /// Load the configuration.
    ///
    /// A missing file means Perkins was never initialized, which is a hard
    /// error: every command except `init` depends on stored API keys.
    pub async fn load(&self) -> Result<PerkinsConfig, ConfigError> {
        let content = match tokio::fs::read_to_string(&self.config_path).await {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Err(ConfigError::NotInitialized);
            }
            Err(err) => return Err(ConfigError::Read(err.to_string())),
        };

        serde_json::from_str(&content).map_err(|err| ConfigError::Parse(err.to_string()))
    }

    /// Write the configuration, creating the data directory if needed.
    pub async fn save(&self, config: &PerkinsConfig) -> Result<(), ConfigError> {
        if let Some(parent) = self.config_path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|err| ConfigError::Write(err.to_string()))?;
        }

        let json = serde_json::to_string_pretty(config)
            .map_err(|err| ConfigError::Write(err.to_string()))?;
        tokio::fs::write(&self.config_path, json)
            .await
            .map_err(|err| ConfigError::Write(err.to_string()))
    }
}
