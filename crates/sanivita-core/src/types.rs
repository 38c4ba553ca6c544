//! # Content Types
//!
//! Content records shown by the site and the chat message type used by the
//! smart advisor.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │    Article      │   │  ChatMessage    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (stable)    │   │  id (stable)    │   │  role           │       │
//! │  │  name           │   │  title          │   │  text           │       │
//! │  │  category       │   │  content[]      │   │  is_error       │       │
//! │  │  benefits[]     │   │  read_time      │   └─────────────────┘       │
//! │  └─────────────────┘   └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Ids are opaque strings, unique within their collection. They are the key
//! shared between the URL (`?id=`), NavigationState and the ContentStore.
//! Field names serialize in camelCase so persisted blobs stay readable by the
//! browser frontend.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// =============================================================================
// Product
// =============================================================================

/// A supplement shown in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Stable identifier, unique within the product collection.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Category label, also used by the products-list filter.
    pub category: String,

    pub description: String,

    /// Bullet list of benefits, in display order.
    #[serde(default)]
    pub benefits: Vec<String>,

    /// Image URL.
    pub image: String,

    /// Display price, free text ("55 ج.م", "قريباً"). Absent means unpriced.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub price: Option<String>,

    /// Icon key used by the product card (`wind`, `shield`, ...).
    pub icon: String,
}

impl Product {
    /// Returns the price label, or the fallback shown for unpriced products.
    pub fn price_label(&self) -> &str {
        self.price.as_deref().unwrap_or("غير محدد")
    }
}

// =============================================================================
// Article
// =============================================================================

/// A health article with its body split into paragraphs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    /// Stable identifier, unique within the article collection.
    pub id: String,
    pub title: String,
    /// Short teaser shown in the list view.
    pub excerpt: String,
    /// Body paragraphs, in reading order.
    #[serde(default)]
    pub content: Vec<String>,
    pub image: String,
    /// Publication date as displayed (locale formatted).
    pub date: String,
    pub author: String,
    pub category: String,
    /// Estimated reading time as displayed ("3 دقائق").
    pub read_time: String,
}

// =============================================================================
// Chat
// =============================================================================

/// Who authored a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    /// The visitor.
    User,
    /// The advisor.
    Model,
}

/// One message in the advisor conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub role: ChatRole,
    pub text: String,
    /// Marks the terminal message appended when the advisor fails.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    #[ts(as = "Option<bool>", optional)]
    pub is_error: bool,
}

impl ChatMessage {
    /// A message typed by the visitor.
    pub fn user(text: impl Into<String>) -> Self {
        ChatMessage {
            role: ChatRole::User,
            text: text.into(),
            is_error: false,
        }
    }

    /// A (possibly still streaming) reply from the advisor.
    pub fn model(text: impl Into<String>) -> Self {
        ChatMessage {
            role: ChatRole::Model,
            text: text.into(),
            is_error: false,
        }
    }

    /// An advisor-side error message.
    pub fn error(text: impl Into<String>) -> Self {
        ChatMessage {
            role: ChatRole::Model,
            text: text.into(),
            is_error: true,
        }
    }
}
