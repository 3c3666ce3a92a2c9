//! HTTP handlers, one module per resource.

pub mod health;
pub mod metrics;
pub mod openapi;
pub mod orders;
pub mod payments;
pub mod products;

use std::str::FromStr;

use common::ParseIdError;

use crate::error::ApiError;

/// Parses a path segment into a typed identifier.
fn parse_id<T: FromStr<Err = ParseIdError>>(raw: &str) -> Result<T, ApiError> {
    raw.parse()
        .map_err(|e: ParseIdError| ApiError::BadRequest(format!("Invalid ID format: {e}")))
}
