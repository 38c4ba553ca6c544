//! # sanivita-store: Content Store & Local Storage
//!
//! Owns the site's article and product collections and keeps them in a
//! key-value store that outlives the process.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  apps/site (Router, admin commands)                                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 sanivita-store (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │ ContentStore  │───►│KeyValueStorage│◄───│   Database   │  │   │
//! │  │   │ (content.rs)  │    │ (storage.rs)  │    │  (pool.rs)   │  │   │
//! │  │   │ CRUD + seed   │    │ get/set/remove│    │ SQLite + WAL │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  local_storage table: sanivita_articles, sanivita_products (JSON)      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use sanivita_store::{ContentStore, Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("sanivita.db")).await?;
//! let mut store = ContentStore::load(db).await?;
//! store.delete_product("4").await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod content;
pub mod error;
pub mod migrations;
pub mod pool;
pub mod seed;
pub mod storage;

// =============================================================================
// Re-exports
// =============================================================================

pub use content::{ContentStore, Upsert};
pub use error::{StoreError, StoreResult};
pub use pool::{Database, DbConfig};
pub use storage::{KeyValueStorage, MemoryStorage, ARTICLES_KEY, PRODUCTS_KEY};
