//! Per-request Gemini transcriber construction

use std::env;
use std::sync::Arc;

use crate::application::ports::{Transcriber, TranscriberFactory, TranscriberUnavailable};

use super::gemini::{GeminiTranscriber, API_BASE_URL};

/// Environment variables checked for the API key, in order
pub const API_KEY_ENV_VARS: &[&str] = &["GOOGLE_API_KEY", "GEMINI_API_KEY"];

/// Builds a [`GeminiTranscriber`] for each request.
///
/// The key is read from the environment on every call, falling back to the
/// key from the config file, so a server started without a key starts fine
/// and rejects uploads until one is provided.
pub struct GeminiTranscriberFactory {
    configured_key: Option<String>,
    model: String,
    base_url: String,
}

impl GeminiTranscriberFactory {
    pub fn new(configured_key: Option<String>, model: impl Into<String>) -> Self {
        Self {
            configured_key: configured_key.filter(|k| !k.trim().is_empty()),
            model: model.into(),
            base_url: API_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Whether a key is currently available
    pub fn has_api_key(&self) -> bool {
        self.api_key().is_some()
    }

    /// Resolve the API key: environment first, then config
    fn api_key(&self) -> Option<String> {
        API_KEY_ENV_VARS
            .iter()
            .filter_map(|name| env::var(name).ok())
            .map(|key| key.trim().to_string())
            .find(|key| !key.is_empty())
            .or_else(|| self.configured_key.clone())
    }
}

impl TranscriberFactory for GeminiTranscriberFactory {
    fn create(&self) -> Result<Arc<dyn Transcriber>, TranscriberUnavailable> {
        let api_key = self.api_key().ok_or(TranscriberUnavailable::MissingApiKey)?;
        Ok(Arc::new(
            GeminiTranscriber::with_model(api_key, self.model.clone())
                .with_base_url(self.base_url.clone()),
        ))
    }
}
