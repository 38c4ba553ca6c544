//! # Site Error Type
//!
//! Unified error type for the site shell and its commands.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  sanivita-core     CoreError ─────────┐                                 │
//! │  sanivita-store    StoreError ────────┤                                 │
//! │  sanivita-advisor  AdvisorError ──────┼──► AppError ──► error[CODE]: .. │
//! │  config / io       toml, io, url ─────┤                                 │
//! │  admin gate        Unauthorized ──────┘                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Navigation itself never fails: unknown URLs land on home and unknown ids
//! fall back to list views. Errors here come from storage, configuration,
//! the advisor, and admin commands.

use thiserror::Error;

use sanivita_advisor::AdvisorError;
use sanivita_core::{CoreError, ValidationError};
use sanivita_store::StoreError;

/// Errors surfaced by the site shell.
#[derive(Debug, Error)]
pub enum AppError {
    /// Invalid configuration value.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Config file could not be parsed.
    #[error("Failed to parse config file: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Config could not be written.
    #[error("Failed to save config: {0}")]
    ConfigSave(String),

    /// Wrong admin password, or an admin command without logging in.
    #[error("Admin access denied")]
    Unauthorized,

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Advisor(#[from] AdvisorError),

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::Core(CoreError::Validation(err))
    }
}

impl From<toml::ser::Error> for AppError {
    fn from(err: toml::ser::Error) -> Self {
        AppError::ConfigSave(err.to_string())
    }
}

/// Machine-readable error category, printed with every failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    NotFound,
    ValidationError,
    StorageError,
    AdvisorError,
    Unauthorized,
    ConfigError,
    InvalidArgument,
    Internal,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::ValidationError => "VALIDATION_ERROR",
            ErrorCode::StorageError => "STORAGE_ERROR",
            ErrorCode::AdvisorError => "ADVISOR_ERROR",
            ErrorCode::Unauthorized => "UNAUTHORIZED",
            ErrorCode::ConfigError => "CONFIG_ERROR",
            ErrorCode::InvalidArgument => "INVALID_ARGUMENT",
            ErrorCode::Internal => "INTERNAL",
        }
    }
}

impl AppError {
    /// The category of this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::InvalidConfig(_) | AppError::ConfigParse(_) | AppError::ConfigSave(_) => {
                ErrorCode::ConfigError
            }
            AppError::Unauthorized => ErrorCode::Unauthorized,
            AppError::Url(_) => ErrorCode::InvalidArgument,
            AppError::Core(CoreError::Validation(_)) => ErrorCode::ValidationError,
            AppError::Core(CoreError::UnknownPage(_)) => ErrorCode::InvalidArgument,
            AppError::Store(StoreError::NotFound { .. }) => ErrorCode::NotFound,
            AppError::Store(StoreError::Invalid(_)) => ErrorCode::ValidationError,
            AppError::Store(_) => ErrorCode::StorageError,
            AppError::Advisor(_) => ErrorCode::AdvisorError,
            AppError::Json(_) | AppError::Io(_) => ErrorCode::Internal,
        }
    }

    /// Process exit status for this error.
    pub fn exit_code(&self) -> i32 {
        match self.code() {
            ErrorCode::InvalidArgument => 2,
            ErrorCode::Unauthorized => 3,
            _ => 1,
        }
    }
}

/// Result type for site operations.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes() {
        assert_eq!(AppError::Unauthorized.code(), ErrorCode::Unauthorized);
        assert_eq!(
            AppError::from(StoreError::not_found("article", "9")).code(),
            ErrorCode::NotFound
        );
        let invalid = AppError::from(ValidationError::Required {
            field: "title".into(),
        });
        assert_eq!(invalid.code(), ErrorCode::ValidationError);
        assert_eq!(invalid.code().as_str(), "VALIDATION_ERROR");
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(AppError::Unauthorized.exit_code(), 3);
        assert_eq!(
            AppError::from(url::ParseError::RelativeUrlWithoutBase).exit_code(),
            2
        );
        assert_eq!(
            AppError::from(CoreError::UnknownPage("shop".into())).exit_code(),
            2
        );
        assert_eq!(AppError::InvalidConfig("x".into()).exit_code(), 1);
    }
}
