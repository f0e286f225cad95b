//! The QR code record store gateway.
//!
//! Thin tenant-scoped CRUD over the `qr_codes` table. Each operation is a
//! single atomic statement; the store assigns `id` (ascending sequence),
//! `scans`, and `created_at`. Validation happens before these calls, in
//! [`crate::models::QrCodeForm::validate`], never here.

use sqlx::PgPool;

use shopcode_core::{Destination, QrCodeId};

use super::RepositoryError;
use crate::models::QrCode;

/// Fields supplied by the caller when inserting a record.
#[derive(Debug, Clone)]
pub struct NewQrCode {
    /// Owning shop domain.
    pub shop: String,
    /// Human label for the code.
    pub title: String,
    /// Catalog product global id.
    pub product_id: String,
    /// Handle denormalized from the catalog at write time.
    pub product_handle: String,
    /// Catalog variant global id (used by cart destinations).
    pub product_variant_id: String,
    /// Scan destination mode.
    pub destination: Destination,
}

/// Caller-writable fields for an update. `shop` never changes.
#[derive(Debug, Clone)]
pub struct QrCodeChanges {
    /// Human label for the code.
    pub title: String,
    /// Catalog product global id.
    pub product_id: String,
    /// Handle denormalized from the catalog at write time.
    pub product_handle: String,
    /// Catalog variant global id (used by cart destinations).
    pub product_variant_id: String,
    /// Scan destination mode.
    pub destination: Destination,
}

/// Get a record by id, across all shops.
///
/// # Errors
///
/// Returns error if the database query fails.
pub async fn find_qr_code(pool: &PgPool, id: QrCodeId) -> Result<Option<QrCode>, RepositoryError> {
    let record = sqlx::query_as::<_, QrCode>(
        r"
        SELECT id, shop, title, product_id, product_handle, product_variant_id,
               destination, scans, created_at
        FROM qr_codes
        WHERE id = $1
        ",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(record)
}

/// All records for one shop, newest first.
///
/// Ids come from an ascending sequence, so `id DESC` is a stable
/// reverse-chronological order.
///
/// # Errors
///
/// Returns error if the database query fails.
pub async fn list_qr_codes_for_shop(
    pool: &PgPool,
    shop: &str,
) -> Result<Vec<QrCode>, RepositoryError> {
    let records = sqlx::query_as::<_, QrCode>(
        r"
        SELECT id, shop, title, product_id, product_handle, product_variant_id,
               destination, scans, created_at
        FROM qr_codes
        WHERE shop = $1
        ORDER BY id DESC
        ",
    )
    .bind(shop)
    .fetch_all(pool)
    .await?;

    Ok(records)
}

/// Insert a record. The store assigns `id`, `scans`, and `created_at`.
///
/// # Errors
///
/// Returns error if the database insert fails.
pub async fn create_qr_code(pool: &PgPool, new: NewQrCode) -> Result<QrCode, RepositoryError> {
    let record = sqlx::query_as::<_, QrCode>(
        r"
        INSERT INTO qr_codes (shop, title, product_id, product_handle, product_variant_id, destination)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING id, shop, title, product_id, product_handle, product_variant_id,
                  destination, scans, created_at
        ",
    )
    .bind(new.shop)
    .bind(new.title)
    .bind(new.product_id)
    .bind(new.product_handle)
    .bind(new.product_variant_id)
    .bind(new.destination)
    .fetch_one(pool)
    .await?;

    Ok(record)
}

/// Update a record's caller-writable fields.
///
/// Returns `None` when no record has this id.
///
/// # Errors
///
/// Returns error if the database update fails.
pub async fn update_qr_code(
    pool: &PgPool,
    id: QrCodeId,
    changes: QrCodeChanges,
) -> Result<Option<QrCode>, RepositoryError> {
    let record = sqlx::query_as::<_, QrCode>(
        r"
        UPDATE qr_codes
        SET title = $2, product_id = $3, product_handle = $4,
            product_variant_id = $5, destination = $6
        WHERE id = $1
        RETURNING id, shop, title, product_id, product_handle, product_variant_id,
                  destination, scans, created_at
        ",
    )
    .bind(id)
    .bind(changes.title)
    .bind(changes.product_id)
    .bind(changes.product_handle)
    .bind(changes.product_variant_id)
    .bind(changes.destination)
    .fetch_optional(pool)
    .await?;

    Ok(record)
}

/// Delete a record permanently. Ids are never reused.
///
/// # Errors
///
/// Returns [`RepositoryError::NotFound`] when no record has this id
/// (deleting a missing id is a caller error), or a database error if the
/// statement fails.
pub async fn delete_qr_code(pool: &PgPool, id: QrCodeId) -> Result<(), RepositoryError> {
    let result = sqlx::query("DELETE FROM qr_codes WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(RepositoryError::NotFound);
    }

    Ok(())
}
