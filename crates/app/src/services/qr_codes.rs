//! The exposed QR code operations: validated writes and enriched reads.

use sqlx::PgPool;
use tracing::instrument;
use url::Url;

use shopcode_core::QrCodeId;

use super::enrich::{enrich_many, enrich_one};
use crate::db;
use crate::error::QrCodeError;
use crate::models::{EnrichedQrCode, QrCode, StagedQrCode};
use crate::shopify::{ProductCatalog, ShopifyError};

/// The QR code feature's front door for the host platform's route layer.
///
/// Holds the explicit context every operation needs: the connection pool,
/// the session's catalog client, and the application origin for
/// scan-landing URLs. One value per authenticated request; nothing here is
/// ambient or global.
pub struct QrCodeService<C> {
    pool: PgPool,
    catalog: C,
    app_url: Url,
}

impl<C: ProductCatalog> QrCodeService<C> {
    /// Assemble the service from its collaborators.
    pub const fn new(pool: PgPool, catalog: C, app_url: Url) -> Self {
        Self {
            pool,
            catalog,
            app_url,
        }
    }

    /// One record, enriched for display. `None` when the id is unknown.
    ///
    /// # Errors
    ///
    /// Returns [`QrCodeError`] when the store, the catalog, or the
    /// renderer fails, or when the stored record carries a malformed
    /// variant reference.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn get_one(&self, id: QrCodeId) -> Result<Option<EnrichedQrCode>, QrCodeError> {
        let Some(record) = db::qr_codes::find_qr_code(&self.pool, id).await? else {
            return Ok(None);
        };

        enrich_one(record, &self.catalog, &self.app_url)
            .await
            .map(Some)
    }

    /// Every record owned by `shop`, newest first, enriched for display.
    ///
    /// # Errors
    ///
    /// Returns [`QrCodeError`] when the store fails or any record's
    /// enrichment fails.
    #[instrument(skip(self), fields(shop = %shop))]
    pub async fn list_for_shop(&self, shop: &str) -> Result<Vec<EnrichedQrCode>, QrCodeError> {
        let records = db::qr_codes::list_qr_codes_for_shop(&self.pool, shop).await?;
        enrich_many(records, &self.catalog, &self.app_url).await
    }

    /// Create a record for `shop` from staged (validated) input.
    ///
    /// The product handle is denormalized from the catalog at write time
    /// so product-page URLs never need a second lookup. A product that
    /// vanished between form submission and the write is a hard failure,
    /// not a field error.
    ///
    /// # Errors
    ///
    /// Returns [`QrCodeError::Shopify`] when the handle lookup fails or
    /// the product no longer exists, and [`QrCodeError::Repository`] when
    /// the insert fails.
    #[instrument(skip(self, staged), fields(shop = %shop))]
    pub async fn create(&self, shop: &str, staged: StagedQrCode) -> Result<QrCode, QrCodeError> {
        let product_handle = self.fetch_handle(&staged.product_id).await?;

        let record = db::qr_codes::create_qr_code(
            &self.pool,
            db::NewQrCode {
                shop: shop.to_owned(),
                title: staged.title,
                product_id: staged.product_id,
                product_handle,
                product_variant_id: staged.product_variant_id,
                destination: staged.destination,
            },
        )
        .await?;

        Ok(record)
    }

    /// Update a record from staged (validated) input.
    ///
    /// Returns `None` when the id is unknown, without consulting the
    /// catalog. The handle is re-denormalized since the product selection
    /// may have changed.
    ///
    /// # Errors
    ///
    /// Returns [`QrCodeError::Shopify`] when the handle lookup fails or
    /// the product no longer exists, and [`QrCodeError::Repository`] when
    /// the update fails.
    #[instrument(skip(self, staged), fields(id = %id))]
    pub async fn update(
        &self,
        id: QrCodeId,
        staged: StagedQrCode,
    ) -> Result<Option<QrCode>, QrCodeError> {
        if db::qr_codes::find_qr_code(&self.pool, id).await?.is_none() {
            return Ok(None);
        }

        let product_handle = self.fetch_handle(&staged.product_id).await?;

        let record = db::qr_codes::update_qr_code(
            &self.pool,
            id,
            db::QrCodeChanges {
                title: staged.title,
                product_id: staged.product_id,
                product_handle,
                product_variant_id: staged.product_variant_id,
                destination: staged.destination,
            },
        )
        .await?;

        Ok(record)
    }

    /// Delete a record permanently.
    ///
    /// # Errors
    ///
    /// Returns [`QrCodeError::Repository`] with
    /// [`crate::db::RepositoryError::NotFound`] when the id is unknown;
    /// deleting a missing record is a caller error, not a no-op.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn delete(&self, id: QrCodeId) -> Result<(), QrCodeError> {
        db::qr_codes::delete_qr_code(&self.pool, id).await?;
        Ok(())
    }

    async fn fetch_handle(&self, product_id: &str) -> Result<String, QrCodeError> {
        let handle = self
            .catalog
            .product_handle(product_id)
            .await?
            .ok_or_else(|| ShopifyError::NotFound(format!("Product not found: {product_id}")))?;
        Ok(handle)
    }
}
