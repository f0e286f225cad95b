//! The QR code record identifier.

use serde::{Deserialize, Serialize};

/// Identifier of a stored QR code record.
///
/// Assigned by the store from an ascending sequence, so ordering by id
/// descending yields newest-first. Wraps an `i64` (`BIGSERIAL` column).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QrCodeId(i64);

impl QrCodeId {
    /// Create an id from an i64 value.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Get the underlying i64 value.
    #[must_use]
    pub const fn as_i64(&self) -> i64 {
        self.0
    }
}

impl core::fmt::Display for QrCodeId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for QrCodeId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl From<QrCodeId> for i64 {
    fn from(id: QrCodeId) -> Self {
        id.0
    }
}

// SQLx support (with postgres feature)
#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for QrCodeId {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <i64 as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <i64 as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for QrCodeId {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let id = <i64 as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        Ok(Self(id))
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for QrCodeId {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <i64 as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.0, buf)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(QrCodeId::new(42).to_string(), "42");
    }

    #[test]
    fn test_ordering_matches_inner() {
        assert!(QrCodeId::new(3) > QrCodeId::new(2));
    }

    #[test]
    fn test_serde_transparent() {
        let json = serde_json::to_string(&QrCodeId::new(7)).unwrap();
        assert_eq!(json, "7");

        let id: QrCodeId = serde_json::from_str("7").unwrap();
        assert_eq!(id, QrCodeId::new(7));
    }
}
