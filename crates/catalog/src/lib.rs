//! Product catalog with a read-through cache.
//!
//! The [`ProductStore`] plays the role of the database; the
//! [`ProductCache`] is the `products` cache region in front of it. Reads
//! populate the cache on a miss, writes update both, deletes evict from both.
//! The cache is unbounded: no TTL, no capacity limit, no eviction policy.

pub mod cache;
pub mod error;
pub mod product;
pub mod service;
pub mod store;

pub use cache::{PRODUCTS_CACHE, ProductCache};
pub use common::ProductId;
pub use error::{CatalogError, Result};
pub use product::Product;
pub use service::{CacheStats, PRODUCT_REMOVED_MESSAGE, ProductService};
pub use store::ProductStore;
