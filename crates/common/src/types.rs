use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Error returned when a path segment cannot be parsed into an identifier.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {kind} '{input}'")]
pub struct ParseIdError {
    kind: &'static str,
    input: String,
}

macro_rules! numeric_id {
    ($(#[$meta:meta])* $name:ident($inner:ty), $kind:literal) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
        )]
        #[serde(transparent)]
        pub struct $name($inner);

        impl $name {
            /// Wraps a raw database identifier.
            pub const fn new(value: $inner) -> Self {
                Self(value)
            }

            /// Returns the raw identifier.
            pub const fn get(&self) -> $inner {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<$inner> for $name {
            fn from(value: $inner) -> Self {
                Self(value)
            }
        }

        impl From<$name> for $inner {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl FromStr for $name {
            type Err = ParseIdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim().parse::<$inner>().map(Self).map_err(|_| ParseIdError {
                    kind: $kind,
                    input: s.to_string(),
                })
            }
        }
    };
}

numeric_id!(
    /// Identifier of a persisted order, assigned by the order repository.
    OrderId(i64),
    "order id"
);

numeric_id!(
    /// Identifier of a persisted payment, assigned by the payment repository.
    PaymentId(i64),
    "payment id"
);

numeric_id!(
    /// Identifier of a catalog product. Chosen by the client on write.
    ProductId(i32),
    "product id"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_parse_from_path_segments() {
        assert_eq!("42".parse::<OrderId>().unwrap(), OrderId::new(42));
        assert_eq!(" 7 ".parse::<PaymentId>().unwrap(), PaymentId::new(7));
        assert_eq!("-3".parse::<ProductId>().unwrap(), ProductId::new(-3));
    }

    #[test]
    fn parse_error_names_the_identifier_kind() {
        let err = "abc".parse::<OrderId>().unwrap_err();
        assert_eq!(err.to_string(), "invalid order id 'abc'");

        let err = "99999999999".parse::<ProductId>().unwrap_err();
        assert!(err.to_string().starts_with("invalid product id"));
    }

    #[test]
    fn ids_serialize_as_bare_numbers() {
        let json = serde_json::to_string(&OrderId::new(12)).unwrap();
        assert_eq!(json, "12");

        let id: PaymentId = serde_json::from_str("5").unwrap();
        assert_eq!(id.get(), 5);
    }

    #[test]
    fn ids_order_by_value() {
        assert!(OrderId::new(1) < OrderId::new(2));
    }
}
