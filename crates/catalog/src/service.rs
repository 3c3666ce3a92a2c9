use serde::{Deserialize, Serialize};

use crate::{Product, ProductCache, ProductId, ProductStore, Result};

/// Confirmation returned by [`ProductService::delete_product`].
pub const PRODUCT_REMOVED_MESSAGE: &str = "Product removed from cache and DB.";

/// Counters describing how the cache has been used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub store_reads: u64,
    pub entries: usize,
}

/// Product operations with cache semantics.
///
/// - reads are read-through: a miss falls back to the store and populates
///   the cache if the product exists;
/// - writes go to the store and are put into the cache;
/// - deletes remove from the store and evict from the cache.
#[derive(Debug, Default)]
pub struct ProductService {
    store: ProductStore,
    cache: ProductCache,
}

impl ProductService {
    pub fn new(store: ProductStore, cache: ProductCache) -> Self {
        Self { store, cache }
    }

    pub fn store(&self) -> &ProductStore {
        &self.store
    }

    pub fn cache(&self) -> &ProductCache {
        &self.cache
    }

    /// Returns a product, reading the store only on a cache miss.
    #[tracing::instrument(skip(self))]
    pub async fn get_product(&self, id: ProductId) -> Option<Product> {
        if let Some(product) = self.cache.get(id).await {
            return Some(product);
        }

        let store = self.store.clone();
        self.cache
            .get_or_fill(id, || async move { store.get(id).await })
            .await
    }

    /// Stores a product and puts it into the cache.
    #[tracing::instrument(skip(self), fields(product_id = %product.id))]
    pub async fn add_product(&self, product: Product) -> Result<Product> {
        product.validate()?;

        let store = self.store.clone();
        let stored = product.clone();
        self.cache
            .put_with(product.clone(), || async move { store.put(stored).await })
            .await;
        tracing::info!("product stored and cached");
        Ok(product)
    }

    /// Removes a product from the store and the cache.
    ///
    /// Succeeds whether or not the product existed.
    #[tracing::instrument(skip(self))]
    pub async fn delete_product(&self, id: ProductId) -> &'static str {
        let store = self.store.clone();
        let was_cached = self
            .cache
            .evict_with(id, || async move {
                if store.remove(id).await.is_none() {
                    tracing::debug!(product_id = %id, "product was not in the store");
                }
            })
            .await;
        tracing::info!(was_cached, "product removed");
        PRODUCT_REMOVED_MESSAGE
    }

    /// Returns cache usage counters.
    pub async fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.cache.hits(),
            misses: self.cache.misses(),
            store_reads: self.store.reads(),
            entries: self.cache.len().await,
        }
    }
}
