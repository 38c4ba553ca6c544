//! # Content Catalog
//!
//! Read access to the product and article collections, plus the list-page
//! filters.
//!
//! [`ContentCatalog`] is the seam between the pure resolver and whatever owns
//! the records (the `ContentStore` in sanivita-store, a plain [`Catalog`] in
//! tests). Lookups are by stable id.

use serde::{Deserialize, Serialize};

use crate::types::{Article, Product};
use crate::ALL_CATEGORIES;

// =============================================================================
// Catalog Trait
// =============================================================================

/// Read-only accessor over the content collections.
pub trait ContentCatalog {
    /// All articles, newest first.
    fn list_articles(&self) -> &[Article];

    /// All products, in catalog order.
    fn list_products(&self) -> &[Product];

    fn find_article_by_id(&self, id: &str) -> Option<&Article> {
        self.list_articles().iter().find(|a| a.id == id)
    }

    fn find_product_by_id(&self, id: &str) -> Option<&Product> {
        self.list_products().iter().find(|p| p.id == id)
    }
}

// =============================================================================
// Plain Catalog
// =============================================================================

/// Owned article and product collections.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    pub articles: Vec<Article>,
    pub products: Vec<Product>,
}

impl Catalog {
    pub fn new(articles: Vec<Article>, products: Vec<Product>) -> Self {
        Catalog { articles, products }
    }
}

impl ContentCatalog for Catalog {
    fn list_articles(&self) -> &[Article] {
        &self.articles
    }

    fn list_products(&self) -> &[Product] {
        &self.products
    }
}

// =============================================================================
// Filters
// =============================================================================

/// Search + category filter of the products page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductFilter {
    /// Substring matched against name and description. Empty matches all.
    pub search: String,
    /// Category label, or [`ALL_CATEGORIES`].
    pub category: String,
}

impl Default for ProductFilter {
    fn default() -> Self {
        ProductFilter {
            search: String::new(),
            category: ALL_CATEGORIES.to_string(),
        }
    }
}

impl ProductFilter {
    pub fn matches(&self, product: &Product) -> bool {
        let matches_search = product.name.contains(&self.search)
            || product.description.contains(&self.search);
        let matches_category =
            self.category == ALL_CATEGORIES || product.category == self.category;

        matches_search && matches_category
    }

    pub fn apply<'a>(&self, products: &'a [Product]) -> Vec<&'a Product> {
        products.iter().filter(|p| self.matches(p)).collect()
    }
}

/// Category options for the products page: `all`, then each distinct
/// category in first-seen order.
pub fn categories(products: &[Product]) -> Vec<&str> {
    let mut out = vec![ALL_CATEGORIES];
    for product in products {
        if !out.contains(&product.category.as_str()) {
            out.push(&product.category);
        }
    }
    out
}

/// Search filter of the articles page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArticleFilter {
    /// Substring matched against title and excerpt. Empty matches all.
    pub search: String,
}

impl ArticleFilter {
    pub fn matches(&self, article: &Article) -> bool {
        article.title.contains(&self.search) || article.excerpt.contains(&self.search)
    }

    pub fn apply<'a>(&self, articles: &'a [Article]) -> Vec<&'a Article> {
        articles.iter().filter(|a| self.matches(a)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str, name: &str, category: &str) -> Product {
        Product {
            id: id.to_string(),
            name: name.to_string(),
            category: category.to_string(),
            description: format!("{name} description"),
            benefits: vec![],
            image: String::new(),
            price: None,
            icon: "package".to_string(),
        }
    }

    fn catalog() -> Catalog {
        Catalog::new(
            vec![],
            vec![
                product("1", "Syrup", "respiratory"),
                product("2", "Iron", "immunity"),
                product("3", "Calcium", "bones"),
                product("6", "Calcium Plus", "bones"),
            ],
        )
    }

    #[test]
    fn test_find_by_id() {
        let catalog = catalog();
        assert_eq!(catalog.find_product_by_id("2").map(|p| p.name.as_str()), Some("Iron"));
        assert!(catalog.find_product_by_id("99").is_none());
        assert!(catalog.find_article_by_id("1").is_none());
    }

    #[test]
    fn test_product_filter() {
        let catalog = catalog();
        let filter = ProductFilter {
            search: "Calcium".to_string(),
            category: ALL_CATEGORIES.to_string(),
        };
        assert_eq!(filter.apply(&catalog.products).len(), 2);

        let filter = ProductFilter {
            search: String::new(),
            category: "immunity".to_string(),
        };
        assert_eq!(filter.apply(&catalog.products).len(), 1);

        assert_eq!(ProductFilter::default().apply(&catalog.products).len(), 4);
    }

    #[test]
    fn test_categories_are_distinct_in_first_seen_order() {
        let catalog = catalog();
        assert_eq!(
            categories(&catalog.products),
            vec!["all", "respiratory", "immunity", "bones"]
        );
    }
}
