//! # Pages
//!
//! The closed set of views the site can show, and their URL tokens.
//!
//! ## Token Table
//! ```text
//! ┌──────────────────┬──────────────────┬──────────────┬──────────────────┐
//! │ Page             │ ?page= token     │ needs ?id=   │ header section   │
//! ├──────────────────┼──────────────────┼──────────────┼──────────────────┤
//! │ Home             │ (none)           │              │ home             │
//! │ Products         │ products         │              │ products         │
//! │ About            │ about            │              │ about            │
//! │ Contact          │ contact          │              │ contact          │
//! │ Advisor          │ advisor          │              │ advisor          │
//! │ Articles         │ articles         │              │ articles         │
//! │ ArticleDetail    │ article_detail   │ article id   │ articles         │
//! │ ProductDetail    │ product_detail   │ product id   │ products         │
//! │ Admin            │ admin            │              │ (chrome hidden)  │
//! └──────────────────┴──────────────────┴──────────────┴──────────────────┘
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreError;

/// Identifies which view is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum Page {
    #[default]
    Home,
    Products,
    About,
    Contact,
    Advisor,
    Articles,
    ArticleDetail,
    ProductDetail,
    Admin,
}

impl Page {
    /// Every page, in header order followed by the non-menu pages.
    pub const ALL: [Page; 9] = [
        Page::Home,
        Page::Products,
        Page::Articles,
        Page::About,
        Page::Contact,
        Page::Advisor,
        Page::ArticleDetail,
        Page::ProductDetail,
        Page::Admin,
    ];

    /// Pages listed in the header menu.
    pub const MENU: [Page; 5] = [
        Page::Home,
        Page::Products,
        Page::Articles,
        Page::About,
        Page::Contact,
    ];

    /// The URL token for this page.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Page::Home => "home",
            Page::Products => "products",
            Page::About => "about",
            Page::Contact => "contact",
            Page::Advisor => "advisor",
            Page::Articles => "articles",
            Page::ArticleDetail => "article_detail",
            Page::ProductDetail => "product_detail",
            Page::Admin => "admin",
        }
    }

    /// Returns true for pages that need a selected entity to render.
    pub const fn is_detail(&self) -> bool {
        matches!(self, Page::ArticleDetail | Page::ProductDetail)
    }

    /// The list page a detail page falls back to. Other pages map to themselves.
    pub const fn list_page(&self) -> Page {
        match self {
            Page::ArticleDetail => Page::Articles,
            Page::ProductDetail => Page::Products,
            other => *other,
        }
    }

    /// The header item highlighted while this page is shown.
    pub const fn nav_section(&self) -> Page {
        self.list_page()
    }

    /// Whether the header and footer are rendered around this page.
    pub const fn shows_chrome(&self) -> bool {
        !matches!(self, Page::Admin)
    }

    /// Header menu label.
    pub const fn label(&self) -> &'static str {
        match self {
            Page::Home => "الرئيسية",
            Page::Products => "منتجاتنا",
            Page::About => "من نحن",
            Page::Contact => "تواصل معنا",
            Page::Advisor => "المستشار الذكي",
            Page::Articles => "المقالات",
            Page::ArticleDetail => "مقال",
            Page::ProductDetail => "منتج",
            Page::Admin => "لوحة التحكم",
        }
    }

    /// Full document title, `"<title> | SaniVita Pharma"`.
    pub fn title(&self) -> String {
        self.meta().document_title()
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Page {
    type Err = CoreError;

    /// Parses a URL token. Matching is exact: the canonical URL is always
    /// lowercase, anything else is treated as unknown.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Page::ALL
            .into_iter()
            .find(|page| page.as_str() == s)
            .ok_or_else(|| CoreError::UnknownPage(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_token_parses_back() {
        for page in Page::ALL {
            assert_eq!(page.as_str().parse::<Page>().unwrap(), page);
        }
    }

    #[test]
    fn test_unknown_tokens_rejected() {
        assert!("shop".parse::<Page>().is_err());
        assert!("".parse::<Page>().is_err());
        assert!("Products".parse::<Page>().is_err());
    }

    #[test]
    fn test_nav_section_highlights_list_for_details() {
        assert_eq!(Page::ArticleDetail.nav_section(), Page::Articles);
        assert_eq!(Page::ProductDetail.nav_section(), Page::Products);
        assert_eq!(Page::Contact.nav_section(), Page::Contact);
    }

    #[test]
    fn test_admin_hides_chrome() {
        assert!(!Page::Admin.shows_chrome());
        assert!(Page::Home.shows_chrome());
    }

    #[test]
    fn test_serde_matches_url_tokens() {
        let json = serde_json::to_string(&Page::ProductDetail).unwrap();
        assert_eq!(json, "\"product_detail\"");
        assert_eq!(Page::default(), Page::Home);
        assert_eq!(Page::About.title(), "من نحن | SaniVita Pharma");
        assert_eq!(Page::Articles.label(), "المقالات");
    }
}
