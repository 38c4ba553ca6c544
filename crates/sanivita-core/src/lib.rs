//! # sanivita-core: Pure Routing & Content Logic
//!
//! This crate is the **heart** of the SaniVita site. It holds everything that
//! decides *which view the visitor is looking at* as pure functions with zero
//! I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       SaniVita Site Architecture                        │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Browser / CLI shell (apps/site)              │   │
//! │  │    Router ──► BrowserWindow (push/replace/popstate/scroll)      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ sanivita-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌────────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   page    │  │ navigation │  │   query   │  │ resolver  │  │   │
//! │  │   │   Page    │  │ NavState   │  │ encode /  │  │  View     │  │   │
//! │  │   │  tokens   │  │ navigate_to│  │ decode    │  │ fallback  │  │   │
//! │  │   └───────────┘  └────────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO STORAGE • NO NETWORK • PURE FUNCTIONS            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │          sanivita-store (ContentStore + local storage)          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Content types (Product, Article, ChatMessage)
//! - [`page`] - The closed set of pages and their URL tokens
//! - [`navigation`] - NavigationState and its mutators
//! - [`query`] - Bidirectional query-string codec
//! - [`resolver`] - NavigationState → View with list fallbacks
//! - [`meta`] - Document title, description and keywords per view
//! - [`catalog`] - Read accessor trait and list filters
//! - [`validation`] - Content validation for the admin surface
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use sanivita_core::query::{decode, QueryParams};
//! use sanivita_core::Page;
//!
//! let params = QueryParams::from_query("page=article_detail&id=42");
//! let state = decode(&params);
//!
//! assert_eq!(state.current_page(), Page::ArticleDetail);
//! assert_eq!(state.selected_article_id(), Some("42"));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod error;
pub mod meta;
pub mod navigation;
pub mod page;
pub mod query;
pub mod resolver;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use catalog::{ArticleFilter, Catalog, ContentCatalog, ProductFilter};
pub use error::{CoreError, ValidationError};
pub use meta::PageMeta;
pub use navigation::{NavigateOptions, NavigationState};
pub use page::Page;
pub use resolver::{resolve, View, FEATURED_PRODUCTS};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Brand name appended to every document title.
pub const BRAND_NAME: &str = "SaniVita Pharma";

/// Sentinel category that matches every product in the products list filter.
pub const ALL_CATEGORIES: &str = "all";
