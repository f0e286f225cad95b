//! Shopify Admin GraphQL API client.

use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, de::DeserializeOwned};

use super::{GraphQLError, GraphQLErrorLocation, ShopifyError};

/// Client for a single shop's Admin GraphQL API.
///
/// The host platform authenticates the embedded admin session and hands
/// over the shop domain and access token; one client is built per session
/// and passed explicitly to the operations that need it, never stashed in
/// ambient state.
#[derive(Clone)]
pub struct AdminApiClient {
    inner: Arc<AdminApiClientInner>,
}

struct AdminApiClientInner {
    client: reqwest::Client,
    endpoint: String,
    access_token: SecretString,
}

/// GraphQL response wrapper.
#[derive(Debug, Deserialize)]
struct GraphQLResponse<T> {
    data: Option<T>,
    errors: Option<Vec<GraphQLErrorResponse>>,
}

#[derive(Debug, Deserialize)]
struct GraphQLErrorResponse {
    message: String,
    #[serde(default)]
    locations: Vec<GraphQLErrorLocationResponse>,
    #[serde(default)]
    path: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct GraphQLErrorLocationResponse {
    line: i64,
    column: i64,
}

impl AdminApiClient {
    /// Create a client for one shop's Admin API.
    ///
    /// # Arguments
    ///
    /// * `shop` - Shop domain (e.g., `promo.myshopify.com`)
    /// * `access_token` - Admin API access token for that shop's session
    /// * `api_version` - API version (e.g., `2026-01`)
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client cannot be created. This should never
    /// happen under normal circumstances as we use standard TLS
    /// configuration.
    #[must_use]
    pub fn new(shop: &str, access_token: SecretString, api_version: &str) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        let endpoint = format!("https://{shop}/admin/api/{api_version}/graphql.json");

        Self {
            inner: Arc::new(AdminApiClientInner {
                client,
                endpoint,
                access_token,
            }),
        }
    }

    /// Execute a GraphQL query.
    ///
    /// # Errors
    ///
    /// Returns `ShopifyError::RateLimited` if we're being rate limited.
    /// Returns `ShopifyError::GraphQL` if the query returns errors or no
    /// data. Returns `ShopifyError::Http` on network failures and
    /// `ShopifyError::Parse` when the response body is not the expected
    /// shape.
    pub(super) async fn execute<T: DeserializeOwned>(
        &self,
        query: &str,
        variables: serde_json::Value,
    ) -> Result<T, ShopifyError> {
        let body = serde_json::json!({
            "query": query,
            "variables": variables,
        });

        let response = self
            .inner
            .client
            .post(&self.inner.endpoint)
            .header("X-Shopify-Access-Token", self.inner.access_token.expose_secret())
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        let status = response.status();

        // Check for rate limiting
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(1);
            return Err(ShopifyError::RateLimited(retry_after));
        }

        // Get response body as text first for better error diagnostics
        let response_text = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %response_text.chars().take(500).collect::<String>(),
                "Shopify API returned non-success status"
            );
            return Err(ShopifyError::GraphQL(vec![GraphQLError {
                message: format!(
                    "HTTP {status}: {}",
                    response_text.chars().take(200).collect::<String>()
                ),
                locations: vec![],
                path: vec![],
            }]));
        }

        let graphql_response: GraphQLResponse<T> = match serde_json::from_str(&response_text) {
            Ok(r) => r,
            Err(e) => {
                tracing::error!(
                    error = %e,
                    body = %response_text.chars().take(500).collect::<String>(),
                    "Failed to parse Shopify GraphQL response"
                );
                return Err(ShopifyError::Parse(e));
            }
        };

        // Check for GraphQL errors
        if let Some(errors) = graphql_response.errors
            && !errors.is_empty()
        {
            tracing::debug!(errors = ?errors, "GraphQL errors in response");

            return Err(ShopifyError::GraphQL(
                errors
                    .into_iter()
                    .map(|e| GraphQLError {
                        message: e.message,
                        locations: e
                            .locations
                            .into_iter()
                            .map(|l| GraphQLErrorLocation {
                                line: l.line,
                                column: l.column,
                            })
                            .collect(),
                        path: e.path,
                    })
                    .collect(),
            ));
        }

        graphql_response.data.ok_or_else(|| {
            ShopifyError::GraphQL(vec![GraphQLError {
                message: "No data in response".to_string(),
                locations: vec![],
                path: vec![],
            }])
        })
    }
}
