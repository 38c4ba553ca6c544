//! # sanivita-advisor: Smart Advisor
//!
//! Streams chat replies from a generative-language model, grounded in the
//! site's product catalog.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  apps/site (advise command)                                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │               sanivita-advisor (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   Conversation ──► Advisor trait ──► GeminiClient               │   │
//! │  │   (messages)       (stream_reply)     ├── ChatSession (history) │   │
//! │  │                                       ├── prompt (catalog)      │   │
//! │  │                                       └── SseDecoder            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  POST .../models/{model}:streamGenerateContent?alt=sse                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`client`] - `Advisor` trait and the Gemini implementation
//! - [`conversation`] - Message list with placeholder and error handling
//! - [`session`] - Turn history, restarted when the catalog changes
//! - [`prompt`] - System instruction built from the catalog
//! - [`sse`] - `text/event-stream` decoder
//! - [`config`] - `[advisor]` configuration section
//! - [`error`] - Advisor error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use sanivita_advisor::{AdvisorConfig, Conversation, GeminiClient};
//!
//! let client = GeminiClient::new(AdvisorConfig::default())?;
//! let mut conversation = Conversation::new();
//! conversation
//!     .send(&client, "عندي سعال", &products, None, |c| render(c.messages()))
//!     .await;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod client;
pub mod config;
pub mod conversation;
pub mod error;
pub mod prompt;
pub mod session;
pub mod sse;

// =============================================================================
// Re-exports
// =============================================================================

pub use client::{Advisor, GeminiClient, ReplyStream};
pub use config::AdvisorConfig;
pub use conversation::{Conversation, SendOutcome, ERROR_MESSAGE, GREETING};
pub use error::{AdvisorError, AdvisorResult};
pub use session::{CatalogFingerprint, ChatSession};
