//! The `products` cache region, backed by Moka.

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use moka::future::Cache;
use moka::ops::compute::{CompResult, Op};

use crate::{Product, ProductId};

/// Name of the cache region holding products.
pub const PRODUCTS_CACHE: &str = "products";

#[derive(Debug, Default)]
struct CacheCounters {
    hits: AtomicU64,
    misses: AtomicU64,
}

/// The `products` cache region.
///
/// Built without a capacity or TTL, so entries leave only when evicted.
/// Fills, writes and evictions for one id go through Moka's per-key
/// compute, which runs them one at a time.
#[derive(Debug, Clone)]
pub struct ProductCache {
    inner: Cache<ProductId, Product>,
    counters: Arc<CacheCounters>,
}

impl Default for ProductCache {
    fn default() -> Self {
        Self::new()
    }
}

impl ProductCache {
    pub fn new() -> Self {
        Self {
            inner: Cache::builder().name(PRODUCTS_CACHE).build(),
            counters: Arc::new(CacheCounters::default()),
        }
    }

    /// Looks up a cached product, recording a hit or a miss.
    pub async fn get(&self, id: ProductId) -> Option<Product> {
        let cached = self.inner.get(&id).await;
        if cached.is_some() {
            self.counters.hits.fetch_add(1, Ordering::Relaxed);
            metrics::counter!("product_cache_hits_total", "cache" => PRODUCTS_CACHE).increment(1);
        } else {
            self.counters.misses.fetch_add(1, Ordering::Relaxed);
            metrics::counter!("product_cache_misses_total", "cache" => PRODUCTS_CACHE)
                .increment(1);
        }
        cached
    }

    /// Looks up a cached product without touching the counters.
    pub async fn peek(&self, id: ProductId) -> Option<Product> {
        self.inner.get(&id).await
    }

    /// Returns the cached product, or runs `load` and caches what it finds.
    ///
    /// Nothing is cached when `load` returns `None`. Concurrent callers for
    /// the same id wait for the first one rather than loading again.
    pub async fn get_or_fill<F, Fut>(&self, id: ProductId, load: F) -> Option<Product>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Option<Product>>,
    {
        let result = self
            .inner
            .entry(id)
            .and_compute_with(|entry| async move {
                if entry.is_some() {
                    return Op::Nop;
                }
                match load().await {
                    Some(product) => Op::Put(product),
                    None => Op::Nop,
                }
            })
            .await;

        match result {
            CompResult::Inserted(entry)
            | CompResult::ReplacedWith(entry)
            | CompResult::Unchanged(entry) => Some(entry.into_value()),
            CompResult::Removed(_) | CompResult::StillNone(_) => None,
        }
    }

    /// Runs `write`, then caches `product`, with no other operation on the
    /// same id in between.
    pub async fn put_with<F, Fut>(&self, product: Product, write: F)
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = ()>,
    {
        self.inner
            .entry(product.id)
            .and_compute_with(|_| async move {
                write().await;
                Op::Put(product)
            })
            .await;
    }

    /// Runs `remove`, then evicts the id. Returns true if it was cached.
    pub async fn evict_with<F, Fut>(&self, id: ProductId, remove: F) -> bool
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = ()>,
    {
        let result = self
            .inner
            .entry(id)
            .and_compute_with(|_| async move {
                remove().await;
                Op::Remove
            })
            .await;

        matches!(result, CompResult::Removed(_))
    }

    /// Number of cached entries.
    pub async fn len(&self) -> usize {
        self.inner.run_pending_tasks().await;
        usize::try_from(self.inner.entry_count()).unwrap_or(usize::MAX)
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    pub fn hits(&self) -> u64 {
        self.counters.hits.load(Ordering::Relaxed)
    }

    pub fn misses(&self) -> u64 {
        self.counters.misses.load(Ordering::Relaxed)
    }
}
