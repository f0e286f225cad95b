//! The scan destination mode of a QR code record.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Where a scanned code sends the customer.
///
/// Maps to the `destination` PostgreSQL enum type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(
    feature = "postgres",
    sqlx(type_name = "destination", rename_all = "lowercase")
)]
#[serde(rename_all = "lowercase")]
pub enum Destination {
    /// The product page, built from the denormalized product handle.
    Product,
    /// A pre-filled cart holding one unit of the selected variant.
    Cart,
}

/// Error returned when parsing an unknown destination mode.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown destination mode: {0:?}")]
pub struct DestinationParseError(pub String);

impl Destination {
    /// The lowercase wire/storage name of the mode.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Product => "product",
            Self::Cart => "cart",
        }
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Destination {
    type Err = DestinationParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "product" => Ok(Self::Product),
            "cart" => Ok(Self::Cart),
            other => Err(DestinationParseError(other.to_owned())),
        }
    }
}
