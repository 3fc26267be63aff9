//! Application configuration value object

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::error::ConfigError;
use crate::domain::polling::{Backoff, PollPolicy, DEFAULT_POLL_INTERVAL_SECS};
use crate::domain::task::RetentionPolicy;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_UPLOAD_DIR: &str = "uploads";
pub const DEFAULT_MAX_UPLOAD_MB: u64 = 50;
pub const DEFAULT_MODEL: &str = "gemini-flash-latest";

/// Application configuration.
/// All fields are optional to support partial configs and merging.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    pub api_key: Option<String>,
    pub model: Option<String>,
    pub api_base_url: Option<String>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub upload_dir: Option<String>,
    pub max_upload_mb: Option<u64>,
    pub poll_interval_secs: Option<u64>,
    pub poll_max_attempts: Option<u32>,
    pub poll_backoff: Option<String>,
    pub retention: Option<String>,
    pub log_json: Option<bool>,
}

impl AppConfig {
    /// Create config with default values
    pub fn defaults() -> Self {
        Self {
            api_key: None,
            model: Some(DEFAULT_MODEL.to_string()),
            api_base_url: None,
            host: Some(DEFAULT_HOST.to_string()),
            port: Some(DEFAULT_PORT),
            upload_dir: Some(DEFAULT_UPLOAD_DIR.to_string()),
            max_upload_mb: Some(DEFAULT_MAX_UPLOAD_MB),
            poll_interval_secs: Some(DEFAULT_POLL_INTERVAL_SECS),
            poll_max_attempts: None,
            poll_backoff: Some("fixed".to_string()),
            retention: Some("retain".to_string()),
            log_json: Some(false),
        }
    }

    /// Create an empty config (all None)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Merge this config with another, where other takes precedence.
    /// Only non-None values from other will override this.
    pub fn merge(self, other: Self) -> Self {
        Self {
            api_key: other.api_key.or(self.api_key),
            model: other.model.or(self.model),
            api_base_url: other.api_base_url.or(self.api_base_url),
            host: other.host.or(self.host),
            port: other.port.or(self.port),
            upload_dir: other.upload_dir.or(self.upload_dir),
            max_upload_mb: other.max_upload_mb.or(self.max_upload_mb),
            poll_interval_secs: other.poll_interval_secs.or(self.poll_interval_secs),
            poll_max_attempts: other.poll_max_attempts.or(self.poll_max_attempts),
            poll_backoff: other.poll_backoff.or(self.poll_backoff),
            retention: other.retention.or(self.retention),
            log_json: other.log_json.or(self.log_json),
        }
    }

    /// Configured API key, ignoring blank values
    pub fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }

    pub fn model_or_default(&self) -> &str {
        self.model.as_deref().unwrap_or(DEFAULT_MODEL)
    }

    pub fn host_or_default(&self) -> &str {
        self.host.as_deref().unwrap_or(DEFAULT_HOST)
    }

    pub fn port_or_default(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }

    pub fn upload_dir_or_default(&self) -> PathBuf {
        PathBuf::from(self.upload_dir.as_deref().unwrap_or(DEFAULT_UPLOAD_DIR))
    }

    /// Upload ceiling in bytes
    pub fn max_upload_bytes(&self) -> usize {
        let mb = self.max_upload_mb.unwrap_or(DEFAULT_MAX_UPLOAD_MB);
        usize::try_from(mb.saturating_mul(1024 * 1024)).unwrap_or(usize::MAX)
    }

    /// Get backoff as parsed Backoff, or fixed if not set/invalid
    pub fn poll_backoff_or_default(&self) -> Backoff {
        self.poll_backoff
            .as_ref()
            .and_then(|s| s.parse().ok())
            .unwrap_or_default()
    }

    /// Assemble the readiness poll policy
    pub fn poll_policy(&self) -> PollPolicy {
        let interval = self
            .poll_interval_secs
            .unwrap_or(DEFAULT_POLL_INTERVAL_SECS);
        PollPolicy::fixed(Duration::from_secs(interval))
            .with_max_attempts(self.poll_max_attempts.filter(|max| *max > 0))
            .with_backoff(self.poll_backoff_or_default())
    }

    /// Get retention as parsed RetentionPolicy, or retain if not set/invalid
    pub fn retention_or_default(&self) -> RetentionPolicy {
        self.retention
            .as_ref()
            .and_then(|s| s.parse().ok())
            .unwrap_or_default()
    }

    pub fn log_json_or_default(&self) -> bool {
        self.log_json.unwrap_or(false)
    }

    /// Reject values the `_or_default` accessors would otherwise silently
    /// replace with defaults.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(backoff) = &self.poll_backoff {
            backoff
                .parse::<Backoff>()
                .map_err(|e| invalid("poll_backoff", e))?;
        }
        if let Some(retention) = &self.retention {
            retention
                .parse::<RetentionPolicy>()
                .map_err(|e| invalid("retention", e))?;
        }
        if self.max_upload_mb == Some(0) {
            return Err(invalid("max_upload_mb", "must be greater than zero"));
        }
        if let Some(model) = &self.model {
            if model.trim().is_empty() {
                return Err(invalid("model", "must not be empty"));
            }
        }
        Ok(())
    }
}

fn invalid(key: &str, message: impl ToString) -> ConfigError {
    ConfigError::ValidationError {
        key: key.to_string(),
        message: message.to_string(),
    }
}
