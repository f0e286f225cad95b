//! Integration tests for Shopcode.
//!
//! # Running Tests
//!
//! ```bash
//! # Pipeline tests run anywhere:
//! cargo test -p shopcode-integration-tests
//!
//! # Database-backed lifecycle tests additionally need PostgreSQL with the
//! # crates/app migrations applied, then:
//! DATABASE_URL=postgres://localhost/shopcode_test \
//!     cargo test -p shopcode-integration-tests -- --ignored
//! ```
//!
//! This crate also hosts the shared test doubles: an in-memory
//! [`ScriptedCatalog`] standing in for the Shopify Admin API.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use shopcode_app::shopify::{
    ProductCatalog, ProductImagePreview, ProductOverview, ShopifyError,
};

/// A scripted product entry served by [`ScriptedCatalog`].
#[derive(Debug, Clone)]
pub struct ScriptedProduct {
    /// Title returned by overview lookups.
    pub title: String,
    /// Handle returned by handle lookups.
    pub handle: String,
    /// Preview image URL, if the product has one.
    pub image_url: Option<String>,
    /// Preview image alt text.
    pub image_alt: Option<String>,
}

/// In-memory product catalog keyed by product global id.
///
/// Unknown ids behave like deleted products (`None`), matching the wire
/// contract. Lookup counts are recorded so tests can assert how much I/O
/// an operation issued.
#[derive(Default)]
pub struct ScriptedCatalog {
    products: HashMap<String, ScriptedProduct>,
    fail_with_rate_limit: bool,
    overview_lookups: AtomicUsize,
    handle_lookups: AtomicUsize,
}

impl ScriptedCatalog {
    /// A catalog serving the given products.
    #[must_use]
    pub fn with_products(products: Vec<(&str, ScriptedProduct)>) -> Self {
        Self {
            products: products
                .into_iter()
                .map(|(id, product)| (id.to_owned(), product))
                .collect(),
            ..Self::default()
        }
    }

    /// A catalog whose every lookup fails with a rate limit.
    #[must_use]
    pub fn unavailable() -> Self {
        Self {
            fail_with_rate_limit: true,
            ..Self::default()
        }
    }

    /// Overview lookups issued so far.
    #[must_use]
    pub fn overview_lookups(&self) -> usize {
        self.overview_lookups.load(Ordering::SeqCst)
    }

    /// Handle lookups issued so far.
    #[must_use]
    pub fn handle_lookups(&self) -> usize {
        self.handle_lookups.load(Ordering::SeqCst)
    }

    fn check_available(&self) -> Result<(), ShopifyError> {
        if self.fail_with_rate_limit {
            return Err(ShopifyError::RateLimited(30));
        }
        Ok(())
    }
}

impl ProductCatalog for ScriptedCatalog {
    async fn product_overview(
        &self,
        product_id: &str,
    ) -> Result<Option<ProductOverview>, ShopifyError> {
        self.overview_lookups.fetch_add(1, Ordering::SeqCst);
        self.check_available()?;

        Ok(self.products.get(product_id).map(|product| ProductOverview {
            title: Some(product.title.clone()),
            image: product.image_url.clone().map(|url| ProductImagePreview {
                url: Some(url),
                alt_text: product.image_alt.clone(),
            }),
        }))
    }

    async fn product_handle(&self, product_id: &str) -> Result<Option<String>, ShopifyError> {
        self.handle_lookups.fetch_add(1, Ordering::SeqCst);
        self.check_available()?;

        Ok(self.products.get(product_id).map(|p| p.handle.clone()))
    }
}

impl ScriptedProduct {
    /// A product with a title, handle, and preview image.
    #[must_use]
    pub fn new(title: &str, handle: &str) -> Self {
        Self {
            title: title.to_owned(),
            handle: handle.to_owned(),
            image_url: Some(format!("https://cdn.example/{handle}.png")),
            image_alt: Some(title.to_owned()),
        }
    }
}
