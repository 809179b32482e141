//! AI provider configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use crate::adapters::ai::{GroqConfig, DEFAULT_BASE_URL, DEFAULT_MODEL};

/// AI provider configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AiConfig {
    /// Access token for the hosted model
    pub api_key: Option<String>,

    /// Model identifier
    #[serde(default = "default_model")]
    pub model: String,

    /// API root of the OpenAI-compatible endpoint
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Maximum retries on transient failure
    #[serde(default)]
    pub max_retries: u32,
}

impl AiConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Check if an API key is configured
    pub fn has_api_key(&self) -> bool {
        self.api_key.as_ref().is_some_and(|k| !k.trim().is_empty())
    }

    /// Build the provider configuration
    pub fn provider_config(&self) -> Result<GroqConfig, ValidationError> {
        let api_key = self
            .api_key
            .as_ref()
            .filter(|k| !k.trim().is_empty())
            .ok_or(ValidationError::MissingRequired("AI__API_KEY"))?;

        Ok(GroqConfig::new(api_key.trim())
            .with_model(&self.model)
            .with_base_url(&self.base_url)
            .with_timeout(self.timeout())
            .with_max_retries(self.max_retries))
    }

    /// Validate AI configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.has_api_key() {
            return Err(ValidationError::MissingRequired("AI__API_KEY"));
        }
        if self.model.trim().is_empty() {
            return Err(ValidationError::MissingRequired("AI__MODEL"));
        }
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ValidationError::InvalidBaseUrl);
        }
        if self.timeout_secs == 0 || self.timeout_secs > 600 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            max_retries: 0,
        }
    }
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout() -> u64 {
    120
}
