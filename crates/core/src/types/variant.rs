//! Parsing of product variant references.
//!
//! Cart destinations embed the numeric variant id inside an opaque global
//! id of the form `gid://shopify/ProductVariant/{digits}`. The parse is
//! deliberately lenient about surroundings (the marker may appear anywhere,
//! trailing non-digits are ignored) to accept the references the catalog
//! has historically handed out.

use core::fmt;

/// Marker preceding the numeric id in a variant global id.
const VARIANT_GID_MARKER: &str = "gid://shopify/ProductVariant/";

/// Errors that can occur when parsing a variant reference.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum VariantIdError {
    /// The reference does not contain a recognizable variant id.
    ///
    /// On a stored record this is an invariant violation (corrupted or
    /// legacy data), not something a merchant can correct through the form.
    #[error("unrecognized product variant id: {0:?}")]
    Unrecognized(String),
}

/// A variant reference with its numeric id extracted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParsedVariant {
    /// The decimal id captured from the reference.
    pub numeric_id: u64,
}

impl ParsedVariant {
    /// Parse a variant global id.
    ///
    /// # Errors
    ///
    /// Returns [`VariantIdError::Unrecognized`] if the marker is absent, no
    /// digits follow it, or the digits overflow a `u64`.
    pub fn parse(reference: &str) -> Result<Self, VariantIdError> {
        let unrecognized = || VariantIdError::Unrecognized(reference.to_owned());

        let at = reference.find(VARIANT_GID_MARKER).ok_or_else(unrecognized)?;
        let tail = reference
            .get(at + VARIANT_GID_MARKER.len()..)
            .ok_or_else(unrecognized)?;

        let digits_len = tail.bytes().take_while(u8::is_ascii_digit).count();
        let digits = tail
            .get(..digits_len)
            .filter(|d| !d.is_empty())
            .ok_or_else(unrecognized)?;

        let numeric_id = digits.parse::<u64>().map_err(|_| unrecognized())?;
        Ok(Self { numeric_id })
    }
}

impl fmt::Display for ParsedVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", VARIANT_GID_MARKER, self.numeric_id)
    }
}

impl std::str::FromStr for ParsedVariant {
    type Err = VariantIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
