//! # Navigation State
//!
//! The single source of truth for "what view is the visitor looking at".
//!
//! ## Selection Policy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  current_page      selected_article_id     selected_product_id         │
//! │  ──────────────    ───────────────────     ───────────────────         │
//! │  ArticleDetail     kept / from options     cleared                     │
//! │  ProductDetail     cleared                 kept / from options         │
//! │  anything else     cleared                 cleared                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Only the selection the current page needs survives a navigation. A
//! detail page with no selection is allowed; the resolver shows the list.

use serde::Serialize;
use ts_rs::TS;

use crate::page::Page;
use crate::types::{Article, Product};

/// Optional selection passed along with a navigation request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavigateOptions {
    pub article_id: Option<String>,
    pub product_id: Option<String>,
}

impl NavigateOptions {
    pub fn article(id: impl Into<String>) -> Self {
        NavigateOptions {
            article_id: Some(id.into()),
            product_id: None,
        }
    }

    pub fn product(id: impl Into<String>) -> Self {
        NavigateOptions {
            article_id: None,
            product_id: Some(id.into()),
        }
    }
}

/// Which page is shown and which entity, if any, is selected.
///
/// The product selection is held by id; the record itself is looked up in
/// the content catalog when the page is resolved.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct NavigationState {
    current_page: Page,
    selected_article_id: Option<String>,
    selected_product_id: Option<String>,
}

impl NavigationState {
    /// The home page with nothing selected.
    pub fn home() -> Self {
        NavigationState::default()
    }

    /// A page with nothing selected.
    pub fn page(page: Page) -> Self {
        NavigationState {
            current_page: page,
            selected_article_id: None,
            selected_product_id: None,
        }
    }

    /// The article detail page for `id`.
    pub fn article(id: impl Into<String>) -> Self {
        NavigationState {
            current_page: Page::ArticleDetail,
            selected_article_id: Some(id.into()),
            selected_product_id: None,
        }
    }

    /// The product detail page for `id`.
    pub fn product(id: impl Into<String>) -> Self {
        NavigationState {
            current_page: Page::ProductDetail,
            selected_article_id: None,
            selected_product_id: Some(id.into()),
        }
    }

    pub fn current_page(&self) -> Page {
        self.current_page
    }

    pub fn selected_article_id(&self) -> Option<&str> {
        self.selected_article_id.as_deref()
    }

    pub fn selected_product_id(&self) -> Option<&str> {
        self.selected_product_id.as_deref()
    }

    /// Moves to `page`.
    ///
    /// Detail pages take their id from `options`, falling back to the id
    /// that is already selected. A missing id is not an error.
    ///
    /// Returns true if the state changed.
    pub fn navigate_to(&mut self, page: Page, options: NavigateOptions) -> bool {
        let next = match page {
            Page::ArticleDetail => NavigationState {
                current_page: page,
                selected_article_id: options
                    .article_id
                    .or_else(|| self.selected_article_id.clone()),
                selected_product_id: None,
            },
            Page::ProductDetail => NavigationState {
                current_page: page,
                selected_article_id: None,
                selected_product_id: options
                    .product_id
                    .or_else(|| self.selected_product_id.clone()),
            },
            other => NavigationState::page(other),
        };

        self.replace(next)
    }

    /// Selects `article` and shows its detail page.
    pub fn select_article(&mut self, article: &Article) -> bool {
        self.replace(NavigationState::article(article.id.clone()))
    }

    /// Selects `product` and shows its detail page.
    pub fn select_product(&mut self, product: &Product) -> bool {
        self.replace(NavigationState::product(product.id.clone()))
    }

    /// Overwrites the whole state. Returns true if it changed.
    pub fn replace(&mut self, next: NavigationState) -> bool {
        let changed = *self != next;
        *self = next;
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_home_without_selection() {
        let state = NavigationState::default();
        assert_eq!(state.current_page(), Page::Home);
        assert_eq!(state.selected_article_id(), None);
        assert_eq!(state.selected_product_id(), None);
    }

    #[test]
    fn test_navigate_to_list_clears_selection() {
        let mut state = NavigationState::article("42");
        assert!(state.navigate_to(Page::Articles, NavigateOptions::default()));
        assert_eq!(state, NavigationState::page(Page::Articles));
    }

    #[test]
    fn test_navigate_to_detail_uses_options_then_existing_selection() {
        let mut state = NavigationState::product("3");
        state.navigate_to(Page::ProductDetail, NavigateOptions::product("5"));
        assert_eq!(state.selected_product_id(), Some("5"));

        let changed = state.navigate_to(Page::ProductDetail, NavigateOptions::default());
        assert_eq!(state.selected_product_id(), Some("5"));
        assert!(!changed);
    }

    #[test]
    fn test_navigate_to_detail_without_id_is_tolerated() {
        let mut state = NavigationState::home();
        state.navigate_to(Page::ArticleDetail, NavigateOptions::default());
        assert_eq!(state.current_page(), Page::ArticleDetail);
        assert_eq!(state.selected_article_id(), None);
    }

    #[test]
    fn test_switching_detail_kind_drops_other_selection() {
        let mut state = NavigationState::article("42");
        state.navigate_to(Page::ProductDetail, NavigateOptions::product("1"));
        assert_eq!(state.selected_article_id(), None);
        assert_eq!(state.selected_product_id(), Some("1"));
    }

    #[test]
    fn test_same_page_is_not_a_change() {
        let mut state = NavigationState::page(Page::Contact);
        assert!(!state.navigate_to(Page::Contact, NavigateOptions::default()));
    }
}
