use thiserror::Error;

use crate::ProductId;

/// Errors that can occur while handling catalog products.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The product price was zero, negative or not a number.
    #[error("Product price must be greater than zero")]
    InvalidPrice { price: f64 },

    /// No product exists with the given id.
    #[error("Product not found with id: {0}")]
    NotFound(ProductId),
}

/// Result type for catalog operations.
pub type Result<T> = std::result::Result<T, CatalogError>;
