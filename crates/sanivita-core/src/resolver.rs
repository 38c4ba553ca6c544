//! # Page Resolver
//!
//! Pure mapping from [`NavigationState`] to the view to render.
//!
//! ## Fallbacks
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ArticleDetail(id) ──► article found?  ── yes ──► ArticleDetail view   │
//! │                                        └─ no ───► Articles list        │
//! │                                                                         │
//! │  ProductDetail(id) ──► product found?  ── yes ──► ProductDetail view   │
//! │                                        └─ no ───► Products list        │
//! │                                                                         │
//! │  any other page    ──────────────────────────────► its own view        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A missing entity is never an error. Unknown page tokens cannot reach this
//! function: they are turned into Home while decoding the URL.

use serde::Serialize;

use crate::catalog::ContentCatalog;
use crate::meta::PageMeta;
use crate::navigation::NavigationState;
use crate::page::Page;
use crate::types::{Article, Product};

/// A renderable view plus the content it needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum View<'a> {
    /// Landing page with the first [`FEATURED_PRODUCTS`] products.
    Home { featured: &'a [Product] },
    Products { products: &'a [Product] },
    About,
    Contact,
    Advisor { products: &'a [Product] },
    Articles { articles: &'a [Article] },
    ArticleDetail { article: &'a Article },
    ProductDetail { product: &'a Product },
    Admin {
        articles: &'a [Article],
        products: &'a [Product],
    },
}

/// Number of products featured on the home page.
pub const FEATURED_PRODUCTS: usize = 3;

impl<'a> View<'a> {
    /// The page this view renders, after any fallback.
    pub fn page(&self) -> Page {
        match self {
            View::Home { .. } => Page::Home,
            View::Products { .. } => Page::Products,
            View::About => Page::About,
            View::Contact => Page::Contact,
            View::Advisor { .. } => Page::Advisor,
            View::Articles { .. } => Page::Articles,
            View::ArticleDetail { .. } => Page::ArticleDetail,
            View::ProductDetail { .. } => Page::ProductDetail,
            View::Admin { .. } => Page::Admin,
        }
    }

    /// Head metadata. Detail views describe their entity.
    pub fn meta(&self) -> PageMeta<'a> {
        match *self {
            View::ArticleDetail { article } => PageMeta::new(&article.title, &article.excerpt),
            View::ProductDetail { product } => PageMeta::new(&product.name, &product.description),
            ref other => other.page().meta(),
        }
    }

    /// Document title, `"<title> | SaniVita Pharma"`.
    pub fn title(&self) -> String {
        self.meta().document_title()
    }
}

/// Resolves `state` against `catalog`.
pub fn resolve<'a, C>(state: &NavigationState, catalog: &'a C) -> View<'a>
where
    C: ContentCatalog + ?Sized,
{
    match state.current_page() {
        Page::Home => {
            let products = catalog.list_products();
            View::Home {
                featured: &products[..products.len().min(FEATURED_PRODUCTS)],
            }
        }
        Page::Products => View::Products {
            products: catalog.list_products(),
        },
        Page::About => View::About,
        Page::Contact => View::Contact,
        Page::Advisor => View::Advisor {
            products: catalog.list_products(),
        },
        Page::Articles => View::Articles {
            articles: catalog.list_articles(),
        },
        Page::ArticleDetail => {
            match state
                .selected_article_id()
                .and_then(|id| catalog.find_article_by_id(id))
            {
                Some(article) => View::ArticleDetail { article },
                None => View::Articles {
                    articles: catalog.list_articles(),
                },
            }
        }
        Page::ProductDetail => {
            match state
                .selected_product_id()
                .and_then(|id| catalog.find_product_by_id(id))
            {
                Some(product) => View::ProductDetail { product },
                None => View::Products {
                    products: catalog.list_products(),
                },
            }
        }
        Page::Admin => View::Admin {
            articles: catalog.list_articles(),
            products: catalog.list_products(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    fn catalog() -> Catalog {
        let article = Article {
            id: "42".to_string(),
            title: "Vitamin D".to_string(),
            excerpt: "Sunshine".to_string(),
            content: vec!["p1".to_string(), "p2".to_string()],
            image: String::new(),
            date: "1/1/2025".to_string(),
            author: "Admin".to_string(),
            category: "general".to_string(),
            read_time: "3".to_string(),
        };
        let product = Product {
            id: "3".to_string(),
            name: "Calcium".to_string(),
            category: "bones".to_string(),
            description: "d".to_string(),
            benefits: vec![],
            image: String::new(),
            price: Some("60".to_string()),
            icon: "activity".to_string(),
        };
        Catalog::new(vec![article], vec![product])
    }

    #[test]
    fn test_existing_article_resolves_to_detail() {
        let catalog = catalog();
        let view = resolve(&NavigationState::article("42"), &catalog);
        match view {
            View::ArticleDetail { article } => assert_eq!(article.id, "42"),
            other => panic!("unexpected view {other:?}"),
        }
    }

    #[test]
    fn test_missing_article_falls_back_to_list() {
        let catalog = catalog();
        let view = resolve(&NavigationState::article("999"), &catalog);
        assert_eq!(view.page(), Page::Articles);
    }

    #[test]
    fn test_missing_product_falls_back_to_list() {
        let catalog = catalog();
        let view = resolve(&NavigationState::product("999"), &catalog);
        assert_eq!(view.page(), Page::Products);

        let view = resolve(&NavigationState::page(Page::ProductDetail), &catalog);
        assert_eq!(view.page(), Page::Products);
    }

    #[test]
    fn test_plain_pages_resolve_to_themselves() {
        let catalog = catalog();
        for page in Page::ALL.into_iter().filter(|p| !p.is_detail()) {
            assert_eq!(resolve(&NavigationState::page(page), &catalog).page(), page);
        }
    }

    #[test]
    fn test_detail_titles_use_entity_name() {
        let catalog = catalog();
        let view = resolve(&NavigationState::product("3"), &catalog);
        assert_eq!(view.title(), "Calcium | SaniVita Pharma");
        assert_eq!(view.meta().description, "d");

        let view = resolve(&NavigationState::article("42"), &catalog);
        assert_eq!(view.meta().description, "Sunshine");
    }

    #[test]
    fn test_fallback_view_uses_list_metadata() {
        let catalog = catalog();
        let view = resolve(&NavigationState::article("999"), &catalog);
        assert_eq!(view.meta(), Page::Articles.meta());
    }

    #[test]
    fn test_home_features_first_three_products() {
        let products: Vec<Product> = (1..=5)
            .map(|i| Product {
                id: i.to_string(),
                ..catalog().products[0].clone()
            })
            .collect();
        let catalog = Catalog::new(vec![], products);

        match resolve(&NavigationState::home(), &catalog) {
            View::Home { featured } => {
                let ids: Vec<_> = featured.iter().map(|p| p.id.as_str()).collect();
                assert_eq!(ids, vec!["1", "2", "3"]);
            }
            other => panic!("unexpected view {other:?}"),
        }

        let small = Catalog::new(vec![], catalog.products[..1].to_vec());
        assert!(matches!(
            resolve(&NavigationState::home(), &small),
            View::Home { featured } if featured.len() == 1
        ));
    }

    #[test]
    fn test_view_serializes_with_tag() {
        let catalog = catalog();
        let json = serde_json::to_value(resolve(&NavigationState::article("42"), &catalog)).unwrap();
        assert_eq!(json["view"], "article_detail");
        assert_eq!(json["article"]["id"], "42");
    }
}
