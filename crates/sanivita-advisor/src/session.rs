//! # Chat Session
//!
//! Multi-turn history sent with every request, plus the catalog it was
//! grounded in.
//!
//! ## Restart Rule
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  stream_reply(message, products)                                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  fingerprint(products) == session.fingerprint ?                         │
//! │       ├── yes ──► reuse session (history kept)                         │
//! │       └── no  ──► new session: fresh system instruction, no history    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A product edited from the admin surface therefore resets the advisor's
//! memory of the conversation, and the next reply is grounded in the edit.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use serde::Serialize;
use tracing::debug;

use sanivita_core::{ChatRole, Product};

use crate::prompt::system_instruction;

/// Identifies a product catalog by content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CatalogFingerprint(u64);

impl CatalogFingerprint {
    pub fn of(products: &[Product]) -> Self {
        let mut hasher = DefaultHasher::new();
        products.hash(&mut hasher);
        CatalogFingerprint(hasher.finish())
    }
}

/// One completed exchange half, as sent back to the model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Turn {
    pub role: ChatRole,
    pub text: String,
}

/// Conversation memory for one catalog.
#[derive(Debug, Clone)]
pub struct ChatSession {
    fingerprint: CatalogFingerprint,
    system_instruction: String,
    history: Vec<Turn>,
}

impl ChatSession {
    pub fn new(products: &[Product]) -> Self {
        ChatSession {
            fingerprint: CatalogFingerprint::of(products),
            system_instruction: system_instruction(products),
            history: Vec::new(),
        }
    }

    /// Returns the session to use for `products`, restarting `slot` if the
    /// catalog changed since it was created.
    pub fn for_catalog<'a>(slot: &'a mut Option<ChatSession>, products: &[Product]) -> &'a mut Self {
        let fingerprint = CatalogFingerprint::of(products);
        let stale = slot.as_ref().map_or(true, |s| s.fingerprint != fingerprint);

        if stale {
            if slot.is_some() {
                debug!("Product catalog changed, restarting chat session");
            }
            *slot = Some(ChatSession::new(products));
        }

        slot.get_or_insert_with(|| ChatSession::new(products))
    }

    pub fn fingerprint(&self) -> CatalogFingerprint {
        self.fingerprint
    }

    pub fn system_instruction(&self) -> &str {
        &self.system_instruction
    }

    pub fn history(&self) -> &[Turn] {
        &self.history
    }

    /// Records a completed exchange.
    pub fn record(&mut self, user_text: impl Into<String>, model_text: impl Into<String>) {
        self.history.push(Turn {
            role: ChatRole::User,
            text: user_text.into(),
        });
        self.history.push(Turn {
            role: ChatRole::Model,
            text: model_text.into(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str, price: &str) -> Product {
        Product {
            id: id.to_string(),
            name: "name".to_string(),
            category: "cat".to_string(),
            description: "desc".to_string(),
            benefits: vec![],
            image: String::new(),
            price: Some(price.to_string()),
            icon: "package".to_string(),
        }
    }

    #[test]
    fn test_fingerprint_tracks_content() {
        let a = vec![product("1", "10")];
        let b = vec![product("1", "12")];
        assert_eq!(CatalogFingerprint::of(&a), CatalogFingerprint::of(&a.clone()));
        assert_ne!(CatalogFingerprint::of(&a), CatalogFingerprint::of(&b));
    }

    #[test]
    fn test_session_kept_for_same_catalog() {
        let products = vec![product("1", "10")];
        let mut slot = None;

        ChatSession::for_catalog(&mut slot, &products).record("hi", "hello");
        let session = ChatSession::for_catalog(&mut slot, &products);
        assert_eq!(session.history().len(), 2);
    }

    #[test]
    fn test_session_restarts_when_catalog_changes() {
        let mut slot = None;
        ChatSession::for_catalog(&mut slot, &[product("1", "10")]).record("hi", "hello");

        let session = ChatSession::for_catalog(&mut slot, &[product("1", "99")]);
        assert!(session.history().is_empty());
        assert!(session.system_instruction().contains("99"));
    }
}
