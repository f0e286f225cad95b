//! Shopify Admin API product catalog access.
//!
//! The feature needs exactly two product lookups: title + preview image at
//! read time (enrichment) and the handle at write time (denormalization).
//! Both go through the [`ProductCatalog`] trait so the enrichment pipeline
//! and the service layer never touch HTTP directly.
//!
//! Queries are raw GraphQL strings POSTed with `reqwest` and deserialized
//! with `serde`; the Admin API schema is far too large to vendor for two
//! small queries.

pub mod client;
pub mod products;

use std::future::Future;

use thiserror::Error;

pub use client::AdminApiClient;
pub use products::{ProductImagePreview, ProductOverview};

/// Errors that can occur when querying the product catalog.
#[derive(Debug, Error)]
pub enum ShopifyError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// GraphQL query returned errors.
    #[error("GraphQL errors: {}", format_graphql_errors(.0))]
    GraphQL(Vec<GraphQLError>),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Rate limited by Shopify.
    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),
}

/// A GraphQL error returned by the Admin API.
#[derive(Debug, Clone)]
pub struct GraphQLError {
    /// Error message.
    pub message: String,
    /// Source locations in the query.
    pub locations: Vec<GraphQLErrorLocation>,
    /// Path to the error in the response.
    pub path: Vec<serde_json::Value>,
}

/// Location in a GraphQL query where an error occurred.
#[derive(Debug, Clone)]
pub struct GraphQLErrorLocation {
    /// Line number (1-indexed).
    pub line: i64,
    /// Column number (1-indexed).
    pub column: i64,
}

fn format_graphql_errors(errors: &[GraphQLError]) -> String {
    errors
        .iter()
        .map(|e| e.message.clone())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Narrow seam to the external product catalog.
///
/// The production implementation is [`AdminApiClient`]; tests substitute
/// in-memory fakes. Absence of a product (or of its title) is the
/// documented deleted-product signal, so both lookups return `Option`
/// rather than treating it as an error.
pub trait ProductCatalog {
    /// Title and preview image for a product; `None` when it no longer
    /// exists upstream.
    fn product_overview(
        &self,
        product_id: &str,
    ) -> impl Future<Output = Result<Option<ProductOverview>, ShopifyError>> + Send;

    /// Current handle (URL slug) of a product; `None` when it no longer
    /// exists upstream.
    fn product_handle(
        &self,
        product_id: &str,
    ) -> impl Future<Output = Result<Option<String>, ShopifyError>> + Send;
}
