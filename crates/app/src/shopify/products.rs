//! Product lookups backing enrichment and write-time denormalization.

use serde::Deserialize;
use tracing::instrument;

use super::client::AdminApiClient;
use super::{ProductCatalog, ShopifyError};

/// Title plus the first media preview image, the exact shape the admin
/// list and detail pages display next to each code.
const PRODUCT_OVERVIEW_QUERY: &str = r"
    query ProductOverview($id: ID!) {
        product(id: $id) {
            title
            media(first: 1) {
                nodes {
                    preview {
                        image {
                            url
                            altText
                        }
                    }
                }
            }
        }
    }
";

const PRODUCT_HANDLE_QUERY: &str = r"
    query ProductHandle($id: ID!) {
        product(id: $id) {
            handle
        }
    }
";

/// Display data for the product a QR code points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductOverview {
    /// Product title. A product without a title no longer exists for our
    /// purposes.
    pub title: Option<String>,
    /// First media preview image, if the product has one.
    pub image: Option<ProductImagePreview>,
}

/// A product's preview image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductImagePreview {
    /// Image URL.
    pub url: Option<String>,
    /// Image alt text.
    pub alt_text: Option<String>,
}

// =============================================================================
// Wire types
// =============================================================================

#[derive(Debug, Deserialize)]
struct ProductOverviewData {
    product: Option<ProductOverviewNode>,
}

#[derive(Debug, Deserialize)]
struct ProductOverviewNode {
    title: Option<String>,
    media: Option<MediaConnection>,
}

#[derive(Debug, Deserialize)]
struct MediaConnection {
    #[serde(default)]
    nodes: Vec<MediaNode>,
}

#[derive(Debug, Deserialize)]
struct MediaNode {
    preview: Option<MediaPreview>,
}

#[derive(Debug, Deserialize)]
struct MediaPreview {
    image: Option<PreviewImage>,
}

#[derive(Debug, Deserialize)]
struct PreviewImage {
    url: Option<String>,
    #[serde(rename = "altText")]
    alt_text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ProductHandleData {
    product: Option<ProductHandleNode>,
}

#[derive(Debug, Deserialize)]
struct ProductHandleNode {
    handle: Option<String>,
}

fn overview_from_data(data: ProductOverviewData) -> Option<ProductOverview> {
    let node = data.product?;
    let image = node
        .media
        .map(|media| media.nodes)
        .unwrap_or_default()
        .into_iter()
        .next()
        .and_then(|n| n.preview)
        .and_then(|p| p.image)
        .map(|img| ProductImagePreview {
            url: img.url,
            alt_text: img.alt_text,
        });

    Some(ProductOverview {
        title: node.title,
        image,
    })
}

impl ProductCatalog for AdminApiClient {
    #[instrument(skip(self), fields(product_id = %product_id))]
    async fn product_overview(
        &self,
        product_id: &str,
    ) -> Result<Option<ProductOverview>, ShopifyError> {
        let data: ProductOverviewData = self
            .execute(
                PRODUCT_OVERVIEW_QUERY,
                serde_json::json!({ "id": product_id }),
            )
            .await?;

        Ok(overview_from_data(data))
    }

    #[instrument(skip(self), fields(product_id = %product_id))]
    async fn product_handle(&self, product_id: &str) -> Result<Option<String>, ShopifyError> {
        let data: ProductHandleData = self
            .execute(PRODUCT_HANDLE_QUERY, serde_json::json!({ "id": product_id }))
            .await?;

        Ok(data.product.and_then(|p| p.handle))
    }
}
