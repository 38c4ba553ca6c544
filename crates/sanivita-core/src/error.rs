//! # Error Types
//!
//! Domain-specific error types for sanivita-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  sanivita-core errors (this file)                                      │
//! │  ├── CoreError        - General domain errors                          │
//! │  └── ValidationError  - Admin input validation failures                │
//! │                                                                         │
//! │  sanivita-store errors                                                 │
//! │  └── StoreError       - Storage / blob failures                        │
//! │                                                                         │
//! │  sanivita-advisor errors                                               │
//! │  └── AdvisorError     - Language-model failures                        │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → StoreError → AppError → CLI       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Navigation itself never fails: unknown pages and missing entities are
//! absorbed by falling back to a safe view. These errors exist for the
//! callers that want to *ask* whether a page token is valid, and for the
//! admin surface.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core domain errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A `page` token that is not part of the closed page set.
    #[error("Unknown page: {0}")]
    UnknownPage(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors raised before content reaches the store.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Invalid format (e.g., id with whitespace).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value already used by another record (e.g. a content id).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}
