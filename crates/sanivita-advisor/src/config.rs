//! # Advisor Configuration
//!
//! Lives under `[advisor]` in the site's `sanivita.toml`:
//!
//! ```toml
//! [advisor]
//! endpoint = "https://generativelanguage.googleapis.com/v1beta"
//! model = "gemini-2.5-flash"
//! temperature = 0.7
//! timeout_secs = 60
//! # api_key is usually supplied through SANIVITA_API_KEY
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{AdvisorError, AdvisorResult};

/// Language-model connection settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvisorConfig {
    /// Base URL of the generative-language API, without trailing slash.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    #[serde(default = "default_model")]
    pub model: String,

    /// Sampling temperature, 0.0 to 2.0.
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// API key. Missing keys are reported when a reply is requested, not at
    /// startup, so the rest of the site works without one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Connect timeout and longest gap between streamed chunks (seconds).
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_endpoint() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_temperature() -> f32 {
    0.7
}

fn default_timeout() -> u64 {
    60
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        AdvisorConfig {
            endpoint: default_endpoint(),
            model: default_model(),
            temperature: default_temperature(),
            api_key: None,
            timeout_secs: default_timeout(),
        }
    }
}

impl AdvisorConfig {
    /// Validates the configuration.
    pub fn validate(&self) -> AdvisorResult<()> {
        if !self.endpoint.starts_with("http://") && !self.endpoint.starts_with("https://") {
            return Err(AdvisorError::InvalidConfig(format!(
                "endpoint must start with http:// or https://, got: {}",
                self.endpoint
            )));
        }

        if self.model.trim().is_empty() {
            return Err(AdvisorError::InvalidConfig("model must not be empty".into()));
        }

        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(AdvisorError::InvalidConfig(format!(
                "temperature must be between 0.0 and 2.0, got: {}",
                self.temperature
            )));
        }

        Ok(())
    }

    /// The streaming endpoint for the configured model.
    pub fn stream_url(&self) -> String {
        format!(
            "{}/models/{}:streamGenerateContent?alt=sse",
            self.endpoint.trim_end_matches('/'),
            self.model
        )
    }

    /// The configured key, if non-empty.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|k| !k.is_empty())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
