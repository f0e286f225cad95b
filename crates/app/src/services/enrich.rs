//! Read-time enrichment of stored records.
//!
//! Every read joins each record with two external sources: a freshly
//! rendered scan image and the live product catalog. Both calls for a
//! record are started before either is awaited, so their I/O overlaps on
//! the cooperative scheduler; a batch puts every record in flight at once.

use futures::future::try_join_all;
use tracing::instrument;
use url::Url;

use crate::error::QrCodeError;
use crate::models::{EnrichedQrCode, QrCode};
use crate::qr;
use crate::shopify::ProductCatalog;

/// Join one record with live catalog data and a freshly rendered image.
///
/// A product that no longer exists upstream (absent, or stripped of its
/// title) is data, not an error: the view carries `product_deleted = true`
/// with null product fields, and `destination_url` and `image` are still
/// populated. Renderer and transport failures propagate and fail this
/// record.
///
/// # Errors
///
/// Returns [`QrCodeError::InvalidVariant`] for a cart record with a
/// malformed variant reference, and the renderer's or catalog's error when
/// either sub-call fails.
#[instrument(skip(record, catalog, app_url), fields(id = %record.id))]
pub async fn enrich_one<C: ProductCatalog>(
    record: QrCode,
    catalog: &C,
    app_url: &Url,
) -> Result<EnrichedQrCode, QrCodeError> {
    let destination_url = record.destination_url()?;
    let scan_target = qr::scan_url(app_url, record.id);

    let (image, overview) = tokio::join!(
        qr::render_data_url(&scan_target),
        catalog.product_overview(&record.product_id),
    );
    let image = image?;
    let overview = overview?;

    let (product_title, product_image, product_alt) = match overview {
        Some(product) if product.title.is_some() => {
            let (url, alt) = product
                .image
                .map_or((None, None), |img| (img.url, img.alt_text));
            (product.title, url, alt)
        }
        _ => (None, None, None),
    };

    Ok(EnrichedQrCode {
        product_deleted: product_title.is_none(),
        product_title,
        product_image,
        product_alt,
        destination_url,
        image,
        record,
    })
}

/// Enrich a batch of records, preserving input order.
///
/// All records are put in flight together, so wall-clock cost is bounded
/// by the slowest single record rather than the sum. An empty batch
/// short-circuits without touching the renderer or the catalog.
///
/// A hard failure for any record (renderer, catalog transport, malformed
/// stored data) fails the whole batch; any finer-grained resilience policy
/// belongs to the caller. A product deleted upstream is not a failure and
/// never affects the other records.
///
/// # Errors
///
/// Returns the first record-level failure encountered, as described above.
pub async fn enrich_many<C: ProductCatalog>(
    records: Vec<QrCode>,
    catalog: &C,
    app_url: &Url,
) -> Result<Vec<EnrichedQrCode>, QrCodeError> {
    if records.is_empty() {
        return Ok(Vec::new());
    }

    try_join_all(
        records
            .into_iter()
            .map(|record| enrich_one(record, catalog, app_url)),
    )
    .await
}
