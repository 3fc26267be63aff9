//! TOML config file adapter

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;

use crate::application::ports::ConfigStore;
use crate::domain::config::AppConfig;
use crate::domain::error::ConfigError;

/// File name looked up in the working directory
pub const LOCAL_CONFIG_FILE: &str = "scribe-server.toml";

/// Config file store
pub struct TomlConfigStore {
    path: PathBuf,
    required: bool,
}

impl TomlConfigStore {
    /// Look for `./scribe-server.toml`, then the XDG config dir.
    /// A missing file yields an empty config.
    pub fn discover() -> Self {
        let local = PathBuf::from(LOCAL_CONFIG_FILE);
        let path = if local.exists() {
            local
        } else {
            Self::xdg_path()
        };

        Self {
            path,
            required: false,
        }
    }

    /// Explicit path; loading fails if the file does not exist
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            required: true,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    fn xdg_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("~/.config"))
            .join("scribe-server")
            .join("config.toml")
    }

    fn parse_toml(content: &str) -> Result<AppConfig, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }
}

impl Default for TomlConfigStore {
    fn default() -> Self {
        Self::discover()
    }
}

#[async_trait]
impl ConfigStore for TomlConfigStore {
    async fn load(&self) -> Result<AppConfig, ConfigError> {
        if !self.exists() {
            if self.required {
                return Err(ConfigError::ReadError(format!(
                    "{} does not exist",
                    self.path.display()
                )));
            }
            return Ok(AppConfig::empty());
        }

        let content = fs::read_to_string(&self.path)
            .await
            .map_err(|e| ConfigError::ReadError(format!("{}: {e}", self.path.display())))?;

        tracing::debug!(path = %self.path.display(), "Loaded config file");
        Self::parse_toml(&content)
    }
}
