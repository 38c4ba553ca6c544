//! # Validation Module
//!
//! Input validation for content submitted through the admin surface.
//!
//! ## Where It Runs
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  admin command (apps/site)                                              │
//! │  ├── split_paragraphs / split_benefits   (raw text → Vec<String>)      │
//! │  └── validate_article / validate_product (THIS MODULE)                 │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  ContentStore::upsert_*  (sanivita-store)                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Records that pass are stored verbatim. Records loaded from storage are
//! not re-validated.

use crate::error::ValidationError;
use crate::types::{Article, Product};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Maximum length of an id, in characters.
pub const MAX_ID_LEN: usize = 64;

/// Maximum length of a title or product name, in characters.
pub const MAX_TITLE_LEN: usize = 200;

/// Maximum length of an excerpt or product description, in characters.
pub const MAX_SUMMARY_LEN: usize = 2000;

// =============================================================================
// Field Validators
// =============================================================================

/// Validates a content id.
///
/// ## Rules
/// - Must not be empty
/// - At most [`MAX_ID_LEN`] characters
/// - No whitespace (ids travel in the `?id=` parameter)
///
/// ## Example
/// ```rust
/// use sanivita_core::validation::validate_id;
///
/// assert!(validate_id("42").is_ok());
/// assert!(validate_id("").is_err());
/// assert!(validate_id("a b").is_err());
/// ```
pub fn validate_id(id: &str) -> ValidationResult<()> {
    if id.is_empty() {
        return Err(required("id"));
    }

    if id.chars().count() > MAX_ID_LEN {
        return Err(ValidationError::TooLong {
            field: "id".to_string(),
            max: MAX_ID_LEN,
        });
    }

    if id.chars().any(char::is_whitespace) {
        return Err(ValidationError::InvalidFormat {
            field: "id".to_string(),
            reason: "must not contain whitespace".to_string(),
        });
    }

    Ok(())
}

fn validate_text(field: &str, value: &str, max: usize) -> ValidationResult<()> {
    let value = value.trim();

    if value.is_empty() {
        return Err(required(field));
    }

    if value.chars().count() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }

    Ok(())
}

fn required(field: &str) -> ValidationError {
    ValidationError::Required {
        field: field.to_string(),
    }
}

// =============================================================================
// Record Validators
// =============================================================================

/// Validates an article before it is stored.
///
/// Title, excerpt, image and at least one paragraph are required.
pub fn validate_article(article: &Article) -> ValidationResult<()> {
    validate_id(&article.id)?;
    validate_text("title", &article.title, MAX_TITLE_LEN)?;
    validate_text("excerpt", &article.excerpt, MAX_SUMMARY_LEN)?;
    validate_text("image", &article.image, MAX_SUMMARY_LEN)?;

    if article.content.iter().all(|p| p.trim().is_empty()) {
        return Err(required("content"));
    }

    Ok(())
}

/// Validates a product before it is stored.
///
/// Name, category, description, image and at least one benefit are
/// required. Price is optional.
pub fn validate_product(product: &Product) -> ValidationResult<()> {
    validate_id(&product.id)?;
    validate_text("name", &product.name, MAX_TITLE_LEN)?;
    validate_text("category", &product.category, MAX_TITLE_LEN)?;
    validate_text("description", &product.description, MAX_SUMMARY_LEN)?;
    validate_text("image", &product.image, MAX_SUMMARY_LEN)?;

    if product.benefits.iter().all(|b| b.trim().is_empty()) {
        return Err(required("benefits"));
    }

    Ok(())
}

// =============================================================================
// Text Splitting
// =============================================================================

/// Splits an article body into paragraphs on blank lines.
///
/// Blank paragraphs are dropped; the rest are kept as written.
pub fn split_paragraphs(body: &str) -> Vec<String> {
    body.split("\n\n")
        .filter(|p| !p.trim().is_empty())
        .map(str::to_string)
        .collect()
}

/// Splits a benefits text area into one benefit per line.
pub fn split_benefits(text: &str) -> Vec<String> {
    text.lines()
        .filter(|b| !b.trim().is_empty())
        .map(str::to_string)
        .collect()
}
