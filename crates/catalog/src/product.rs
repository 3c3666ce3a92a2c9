use serde::{Deserialize, Serialize};

use crate::{CatalogError, ProductId, Result};

/// A catalog product. The id is chosen by the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: f64,
}

impl Product {
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>, price: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
        }
    }

    /// Checks the price invariant.
    pub fn validate(&self) -> Result<()> {
        if self.price.is_finite() && self.price > 0.0 {
            Ok(())
        } else {
            Err(CatalogError::InvalidPrice { price: self.price })
        }
    }
}
