//! # Content Store
//!
//! In-memory article and product collections, overlaid with the edits
//! persisted in [`KeyValueStorage`].
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ContentStore::load(storage)                                            │
//! │       │                                                                 │
//! │       ├── sanivita_articles  missing      ──► seed articles             │
//! │       │                      unparseable  ──► warn, seed articles       │
//! │       │                      JSON array   ──► stored articles           │
//! │       └── sanivita_products  (same rules)                               │
//! │                                                                         │
//! │  add / update / delete / upsert                                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  mutate the in-memory Vec  ──►  write the whole collection back         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Articles are added at the front (newest first), products at the end.
//! Updating or deleting an id that is not present changes nothing.

use chrono::Local;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info, warn};
use uuid::Uuid;

use sanivita_core::validation::{validate_article, validate_product};
use sanivita_core::{Article, Catalog, ContentCatalog, Product, ValidationError};

use crate::error::{StoreError, StoreResult};
use crate::seed;
use crate::storage::{KeyValueStorage, ARTICLES_KEY, PRODUCTS_KEY};

/// Outcome of an upsert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upsert {
    Created,
    Updated,
}

/// The site's content, backed by `S`.
#[derive(Debug)]
pub struct ContentStore<S> {
    storage: S,
    articles: Vec<Article>,
    products: Vec<Product>,
}

impl<S: KeyValueStorage> ContentStore<S> {
    /// Loads both collections from `storage`, falling back to the seed data
    /// for any collection that is missing or unreadable.
    pub async fn load(storage: S) -> StoreResult<Self> {
        let articles = read_collection(&storage, ARTICLES_KEY)
            .await?
            .unwrap_or_else(seed::articles);
        let products = read_collection(&storage, PRODUCTS_KEY)
            .await?
            .unwrap_or_else(seed::products);

        info!(
            articles = articles.len(),
            products = products.len(),
            "Content loaded"
        );

        Ok(ContentStore {
            storage,
            articles,
            products,
        })
    }

    /// A snapshot of both collections.
    pub fn catalog(&self) -> Catalog {
        Catalog::new(self.articles.clone(), self.products.clone())
    }

    /// Replaces both collections with the seed data and persists them.
    pub async fn reset(&mut self) -> StoreResult<()> {
        self.articles = seed::articles();
        self.products = seed::products();
        self.persist_articles().await?;
        self.persist_products().await?;
        info!("Content reset to seed data");
        Ok(())
    }

    // =========================================================================
    // Articles
    // =========================================================================

    /// Adds `article` at the front of the list. Its id must be unused.
    pub async fn add_article(&mut self, article: Article) -> StoreResult<()> {
        if self.find_article_by_id(&article.id).is_some() {
            return Err(duplicate_id(article.id));
        }
        debug!(id = %article.id, "Adding article");
        self.articles.insert(0, article);
        self.persist_articles().await
    }

    /// Replaces the article with the same id. Returns false if none exists.
    pub async fn update_article(&mut self, article: Article) -> StoreResult<bool> {
        let Some(slot) = self.articles.iter_mut().find(|a| a.id == article.id) else {
            debug!(id = %article.id, "Update of unknown article ignored");
            return Ok(false);
        };
        *slot = article;
        self.persist_articles().await?;
        Ok(true)
    }

    /// Removes the article with `id`. Returns false if none exists.
    pub async fn delete_article(&mut self, id: &str) -> StoreResult<bool> {
        let before = self.articles.len();
        self.articles.retain(|a| a.id != id);
        if self.articles.len() == before {
            return Ok(false);
        }
        debug!(id = %id, "Article deleted");
        self.persist_articles().await?;
        Ok(true)
    }

    /// Validates `article`, then updates it if its id exists or adds it
    /// otherwise.
    pub async fn upsert_article(&mut self, article: Article) -> StoreResult<Upsert> {
        validate_article(&article)?;

        if self.find_article_by_id(&article.id).is_some() {
            self.update_article(article).await?;
            Ok(Upsert::Updated)
        } else {
            self.add_article(article).await?;
            Ok(Upsert::Created)
        }
    }

    // =========================================================================
    // Products
    // =========================================================================

    /// Adds `product` at the end of the list. Its id must be unused.
    pub async fn add_product(&mut self, product: Product) -> StoreResult<()> {
        if self.find_product_by_id(&product.id).is_some() {
            return Err(duplicate_id(product.id));
        }
        debug!(id = %product.id, "Adding product");
        self.products.push(product);
        self.persist_products().await
    }

    /// Replaces the product with the same id. Returns false if none exists.
    pub async fn update_product(&mut self, product: Product) -> StoreResult<bool> {
        let Some(slot) = self.products.iter_mut().find(|p| p.id == product.id) else {
            debug!(id = %product.id, "Update of unknown product ignored");
            return Ok(false);
        };
        *slot = product;
        self.persist_products().await?;
        Ok(true)
    }

    /// Removes the product with `id`. Returns false if none exists.
    pub async fn delete_product(&mut self, id: &str) -> StoreResult<bool> {
        let before = self.products.len();
        self.products.retain(|p| p.id != id);
        if self.products.len() == before {
            return Ok(false);
        }
        debug!(id = %id, "Product deleted");
        self.persist_products().await?;
        Ok(true)
    }

    /// Validates `product`, then updates it if its id exists or adds it
    /// otherwise.
    pub async fn upsert_product(&mut self, product: Product) -> StoreResult<Upsert> {
        validate_product(&product)?;

        if self.find_product_by_id(&product.id).is_some() {
            self.update_product(product).await?;
            Ok(Upsert::Updated)
        } else {
            self.add_product(product).await?;
            Ok(Upsert::Created)
        }
    }

    async fn persist_articles(&self) -> StoreResult<()> {
        write_collection(&self.storage, ARTICLES_KEY, &self.articles).await
    }

    async fn persist_products(&self) -> StoreResult<()> {
        write_collection(&self.storage, PRODUCTS_KEY, &self.products).await
    }
}

impl<S> ContentCatalog for ContentStore<S> {
    fn list_articles(&self) -> &[Article] {
        &self.articles
    }

    fn list_products(&self) -> &[Product] {
        &self.products
    }
}

// =============================================================================
// Drafts
// =============================================================================

/// A fresh id for content created without one.
pub fn new_content_id() -> String {
    Uuid::new_v4().simple().to_string()
}

/// An empty article with a new id, today's date and the default byline.
pub fn article_draft() -> Article {
    Article {
        id: new_content_id(),
        title: String::new(),
        excerpt: String::new(),
        content: Vec::new(),
        image: String::new(),
        date: Local::now().format("%-d/%-m/%Y").to_string(),
        author: "Admin".to_string(),
        category: "صحة عامة".to_string(),
        read_time: "3 دقائق".to_string(),
    }
}

/// An empty product with a new id and the default icon.
pub fn product_draft() -> Product {
    Product {
        id: new_content_id(),
        name: String::new(),
        category: String::new(),
        description: String::new(),
        benefits: Vec::new(),
        image: String::new(),
        price: None,
        icon: "package".to_string(),
    }
}

// =============================================================================
// Blob Helpers
// =============================================================================

/// Reads a JSON collection. Returns `None` for a missing key and for a value
/// that does not parse (the latter is logged).
fn duplicate_id(id: String) -> StoreError {
    ValidationError::Duplicate {
        field: "id".to_string(),
        value: id,
    }
    .into()
}

async fn read_collection<S, T>(storage: &S, key: &str) -> StoreResult<Option<Vec<T>>>
where
    S: KeyValueStorage + ?Sized,
    T: DeserializeOwned,
{
    let Some(raw) = storage.get(key).await? else {
        debug!(key = %key, "No stored collection, using seed data");
        return Ok(None);
    };

    match serde_json::from_str(&raw) {
        Ok(items) => Ok(Some(items)),
        Err(e) => {
            warn!(key = %key, error = %e, "Stored collection is unreadable, using seed data");
            Ok(None)
        }
    }
}

async fn write_collection<S, T>(storage: &S, key: &str, items: &[T]) -> StoreResult<()>
where
    S: KeyValueStorage + ?Sized,
    T: Serialize,
{
    let json = serde_json::to_string(items)?;
    storage.set(key, &json).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use crate::storage::MemoryStorage;

    fn article(id: &str) -> Article {
        Article {
            id: id.to_string(),
            title: format!("Article {id}"),
            excerpt: "excerpt".to_string(),
            content: vec!["body".to_string()],
            image: "https://img.example/a.png".to_string(),
            date: "1/1/2025".to_string(),
            author: "Admin".to_string(),
            category: "تغذية".to_string(),
            read_time: "3 دقائق".to_string(),
        }
    }

    fn product(id: &str) -> Product {
        Product {
            id: id.to_string(),
            name: format!("Product {id}"),
            category: "العظام".to_string(),
            description: "description".to_string(),
            benefits: vec!["benefit".to_string()],
            image: "https://img.example/p.png".to_string(),
            price: Some("10 ج.م".to_string()),
            icon: "package".to_string(),
        }
    }

    #[tokio::test]
    async fn test_empty_storage_loads_seed() {
        let store = ContentStore::load(MemoryStorage::new()).await.unwrap();
        assert_eq!(store.list_products(), seed::products().as_slice());
        assert_eq!(store.list_articles(), seed::articles().as_slice());
    }

    #[tokio::test]
    async fn test_add_rejects_taken_id() {
        let storage = MemoryStorage::new();
        let mut store = ContentStore::load(storage.clone()).await.unwrap();

        let err = store.add_product(product("2")).await.unwrap_err();
        assert!(matches!(
            err,
            StoreError::Invalid(ValidationError::Duplicate { ref value, .. }) if value == "2"
        ));
        assert_eq!(store.list_products().len(), seed::products().len());

        let err = store.add_article(article("1")).await.unwrap_err();
        assert!(matches!(err, StoreError::Invalid(ValidationError::Duplicate { .. })));
        assert!(storage.get(ARTICLES_KEY).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_unparseable_blob_falls_back_to_seed() {
        let storage = MemoryStorage::new();
        storage.set(PRODUCTS_KEY, "{not json").await.unwrap();
        storage.set(ARTICLES_KEY, "[]").await.unwrap();

        let store = ContentStore::load(storage).await.unwrap();
        assert_eq!(store.list_products().len(), seed::products().len());
        assert!(store.list_articles().is_empty());
    }

    #[tokio::test]
    async fn test_add_orders_and_persists() {
        let storage = MemoryStorage::new();
        let mut store = ContentStore::load(storage.clone()).await.unwrap();

        store.add_article(article("new")).await.unwrap();
        store.add_product(product("new")).await.unwrap();

        assert_eq!(store.list_articles()[0].id, "new");
        assert_eq!(store.list_products().last().map(|p| p.id.as_str()), Some("new"));

        let reloaded = ContentStore::load(storage).await.unwrap();
        assert_eq!(reloaded.list_articles(), store.list_articles());
        assert_eq!(reloaded.list_products(), store.list_products());
    }

    #[tokio::test]
    async fn test_update_and_delete_missing_are_noops() {
        let storage = MemoryStorage::new();
        let mut store = ContentStore::load(storage.clone()).await.unwrap();
        let before = store.catalog();

        assert!(!store.update_article(article("missing")).await.unwrap());
        assert!(!store.delete_product("missing").await.unwrap());

        assert_eq!(store.catalog(), before);
        assert!(storage.is_empty().await);
    }

    #[tokio::test]
    async fn test_update_replaces_in_place() {
        let mut store = ContentStore::load(MemoryStorage::new()).await.unwrap();
        let mut edited = store.find_product_by_id("2").unwrap().clone();
        edited.price = None;

        assert!(store.update_product(edited).await.unwrap());
        assert_eq!(store.list_products()[1].id, "2");
        assert_eq!(store.list_products()[1].price_label(), "غير محدد");
    }

    #[tokio::test]
    async fn test_delete_removes_and_persists() {
        let storage = MemoryStorage::new();
        let mut store = ContentStore::load(storage.clone()).await.unwrap();

        assert!(store.delete_article("1").await.unwrap());
        assert!(store.find_article_by_id("1").is_none());

        let reloaded = ContentStore::load(storage).await.unwrap();
        assert!(reloaded.find_article_by_id("1").is_none());
    }

    #[tokio::test]
    async fn test_upsert_creates_then_updates() {
        let mut store = ContentStore::load(MemoryStorage::new()).await.unwrap();

        assert_eq!(store.upsert_product(product("9")).await.unwrap(), Upsert::Created);

        let mut changed = product("9");
        changed.name = "Renamed".to_string();
        assert_eq!(store.upsert_product(changed).await.unwrap(), Upsert::Updated);
        assert_eq!(store.find_product_by_id("9").unwrap().name, "Renamed");
    }

    #[tokio::test]
    async fn test_upsert_rejects_invalid_content() {
        let mut store = ContentStore::load(MemoryStorage::new()).await.unwrap();
        let mut bad = article("x");
        bad.title.clear();

        let err = store.upsert_article(bad).await.unwrap_err();
        assert!(matches!(err, StoreError::Invalid(_)));
        assert!(store.find_article_by_id("x").is_none());
    }

    #[tokio::test]
    async fn test_reset_restores_seed() {
        let mut store = ContentStore::load(MemoryStorage::new()).await.unwrap();
        store.delete_product("1").await.unwrap();
        store.reset().await.unwrap();
        assert!(store.find_product_by_id("1").is_some());
    }

    #[tokio::test]
    async fn test_sqlite_round_trip() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let mut store = ContentStore::load(db.clone()).await.unwrap();
        store.add_article(article("sql")).await.unwrap();

        let reloaded = ContentStore::load(db).await.unwrap();
        assert_eq!(reloaded.list_articles()[0].id, "sql");
    }

    #[test]
    fn test_drafts_get_fresh_ids() {
        let a = article_draft();
        let b = article_draft();
        assert_ne!(a.id, b.id);
        assert_eq!(a.author, "Admin");
        assert_eq!(product_draft().icon, "package");
    }
}
