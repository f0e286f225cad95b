//! Unified error handling for the QR code feature.

use thiserror::Error;

use shopcode_core::VariantIdError;

use crate::db::RepositoryError;
use crate::qr::RenderError;
use crate::shopify::ShopifyError;

/// Failures surfaced by [`crate::services::QrCodeService`] operations.
///
/// Per-field validation messages are deliberately absent: they are data
/// returned by [`crate::models::QrCodeForm::validate`], never raised
/// through this type. Missing records are `Ok(None)`, not errors.
#[derive(Debug, Error)]
pub enum QrCodeError {
    /// Record store operation failed.
    #[error("Database error: {0}")]
    Repository(#[from] RepositoryError),

    /// Product catalog call failed.
    #[error("Shopify error: {0}")]
    Shopify(#[from] ShopifyError),

    /// QR image rendering failed.
    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    /// A stored cart record carries an unrecognizable variant reference.
    ///
    /// Invariant violation in stored data; intentionally not mapped to a
    /// user-facing field error since the form cannot correct it.
    #[error("Invalid record data: {0}")]
    InvalidVariant(#[from] VariantIdError),
}
