use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::RwLock;

use crate::{Product, ProductId};

#[derive(Debug, Default)]
struct ProductStoreInner {
    products: RwLock<HashMap<ProductId, Product>>,
    reads: AtomicU64,
}

/// Backing product store, standing in for the database.
///
/// Every lookup is counted so callers can tell whether a read was served by
/// the cache or had to come here.
#[derive(Debug, Clone, Default)]
pub struct ProductStore {
    inner: Arc<ProductStoreInner>,
}

impl ProductStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks a product up.
    pub async fn get(&self, id: ProductId) -> Option<Product> {
        self.inner.reads.fetch_add(1, Ordering::Relaxed);
        metrics::counter!("product_store_reads_total").increment(1);
        tracing::debug!(product_id = %id, "fetching product from store");
        self.inner.products.read().await.get(&id).cloned()
    }

    /// Inserts or replaces a product.
    pub async fn put(&self, product: Product) {
        self.inner.products.write().await.insert(product.id, product);
    }

    /// Removes a product, returning it if it existed.
    pub async fn remove(&self, id: ProductId) -> Option<Product> {
        self.inner.products.write().await.remove(&id)
    }

    /// Number of lookups served so far.
    pub fn reads(&self) -> u64 {
        self.inner.reads.load(Ordering::Relaxed)
    }

    pub async fn len(&self) -> usize {
        self.inner.products.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
