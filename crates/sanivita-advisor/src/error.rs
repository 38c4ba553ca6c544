//! # Advisor Error Types
//!
//! ## Error Categories
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Configuration    MissingApiKey, InvalidConfig                          │
//! │  Transport        Http, Status                                          │
//! │  Protocol         Decode, Api                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! None of these reach the visitor as-is. The conversation turns any failure
//! into one apologetic chat message and logs the detail.

use thiserror::Error;

/// Errors produced while asking the language model for a reply.
#[derive(Debug, Error)]
pub enum AdvisorError {
    /// No API key configured.
    #[error("Advisor API key is not configured")]
    MissingApiKey,

    /// Invalid configuration value.
    #[error("Invalid advisor configuration: {0}")]
    InvalidConfig(String),

    /// Request could not be sent or the body could not be read.
    #[error("HTTP error: {0}")]
    Http(String),

    /// Server answered with a non-success status.
    #[error("Advisor returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// A streamed event was not valid JSON of the expected shape.
    #[error("Failed to decode advisor response: {0}")]
    Decode(String),

    /// The model reported an error inside the stream.
    #[error("Advisor API error: {0}")]
    Api(String),
}

impl From<reqwest::Error> for AdvisorError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => AdvisorError::Status {
                status: status.as_u16(),
                body: err.to_string(),
            },
            None => AdvisorError::Http(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for AdvisorError {
    fn from(err: serde_json::Error) -> Self {
        AdvisorError::Decode(err.to_string())
    }
}

/// Result type for advisor operations.
pub type AdvisorResult<T> = Result<T, AdvisorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AdvisorError::Status {
            status: 429,
            body: "quota".to_string(),
        };
        assert_eq!(err.to_string(), "Advisor returned status 429: quota");
    }

    #[test]
    fn test_json_error_is_decode() {
        let err: AdvisorError = serde_json::from_str::<serde_json::Value>("{")
            .unwrap_err()
            .into();
        assert!(matches!(err, AdvisorError::Decode(_)));
    }
}
