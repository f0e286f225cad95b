//! The QR code record, its write input, and the enriched display view.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use shopcode_core::{Destination, ParsedVariant, QrCodeId, VariantIdError};

/// A stored QR code configuration.
///
/// Belongs to exactly one shop for its entire lifetime. `id`, `scans`, and
/// `created_at` are store-assigned; everything else is merchant input
/// (gated by [`QrCodeForm::validate`]) or denormalized catalog data.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct QrCode {
    /// Store-assigned id, ascending with creation order.
    pub id: QrCodeId,
    /// Owning shop domain (e.g., `promo.myshopify.com`).
    pub shop: String,
    /// Human label shown in the admin list.
    pub title: String,
    /// Catalog product global id.
    pub product_id: String,
    /// Product handle denormalized from the catalog at write time, so
    /// product-page URLs never need a second lookup.
    pub product_handle: String,
    /// Catalog variant global id; only cart destinations dereference it.
    pub product_variant_id: String,
    /// Scan destination mode.
    pub destination: Destination,
    /// Redemption counter. Read-only here; scans are recorded elsewhere.
    pub scans: i32,
    /// Creation timestamp, for display.
    pub created_at: DateTime<Utc>,
}

impl QrCode {
    /// The URL a scan of this code ultimately lands on.
    ///
    /// Product mode links the product page via the denormalized handle;
    /// cart mode links a pre-filled cart with one unit of the variant.
    ///
    /// # Errors
    ///
    /// Returns [`VariantIdError`] when a cart record carries a variant
    /// reference the parser does not recognize. That is corrupted or
    /// legacy data, not merchant input: callers must treat it as a hard
    /// failure rather than a form error.
    pub fn destination_url(&self) -> Result<String, VariantIdError> {
        match self.destination {
            Destination::Product => Ok(format!(
                "https://{}/products/{}",
                self.shop, self.product_handle
            )),
            Destination::Cart => {
                let variant = ParsedVariant::parse(&self.product_variant_id)?;
                Ok(format!("https://{}/cart/{}:1", self.shop, variant.numeric_id))
            }
        }
    }
}

/// Write input for a record, as collected by the host platform's form UI.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QrCodeForm {
    /// Human label for the code.
    pub title: String,
    /// Catalog product global id.
    pub product_id: String,
    /// Catalog variant global id.
    pub product_variant_id: String,
    /// Scan destination mode, if the form supplied a recognized one.
    pub destination: Option<Destination>,
}

/// Per-field validation messages, keyed by field name.
///
/// Returned as data for the form UI to display next to each field; never
/// raised through [`crate::error::QrCodeError`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<&'static str, &'static str>);

impl ValidationErrors {
    fn insert(&mut self, field: &'static str, message: &'static str) {
        self.0.insert(field, message);
    }

    /// True when no field failed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Message for one field, if it failed.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).copied()
    }

    /// Number of failed fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

/// A form that passed validation, ready to be written.
#[derive(Debug, Clone)]
pub struct StagedQrCode {
    /// Human label for the code.
    pub title: String,
    /// Catalog product global id.
    pub product_id: String,
    /// Catalog variant global id.
    pub product_variant_id: String,
    /// Scan destination mode.
    pub destination: Destination,
}

impl QrCodeForm {
    /// Validate and stage the form for a write.
    ///
    /// Checks every required field rather than stopping at the first
    /// failure, so the form can surface all messages at once: `title`
    /// non-empty, `product_id` non-empty, `destination` present. Other
    /// fields never influence the outcome.
    ///
    /// # Errors
    ///
    /// Returns the per-field messages when any required field is missing.
    pub fn validate(self) -> Result<StagedQrCode, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        if self.title.is_empty() {
            errors.insert("title", "Title is required");
        }
        if self.product_id.is_empty() {
            errors.insert("product_id", "Product is required");
        }
        if self.destination.is_none() {
            errors.insert("destination", "Destination is required");
        }

        match self.destination {
            Some(destination) if errors.is_empty() => Ok(StagedQrCode {
                title: self.title,
                product_id: self.product_id,
                product_variant_id: self.product_variant_id,
                destination,
            }),
            _ => Err(errors),
        }
    }
}

/// A record joined with live catalog data and a freshly rendered image.
///
/// Constructed per read request by the enrichment pipeline and discarded
/// with the response; never persisted, never cached.
#[derive(Debug, Clone, Serialize)]
pub struct EnrichedQrCode {
    /// The stored record, flattened into the serialized view.
    #[serde(flatten)]
    pub record: QrCode,
    /// True when the upstream product no longer exists (its title is
    /// gone). An expected outcome, not an error.
    pub product_deleted: bool,
    /// Live product title, absent when deleted upstream.
    pub product_title: Option<String>,
    /// Preview image URL, absent when deleted upstream.
    pub product_image: Option<String>,
    /// Preview image alt text, absent when deleted upstream.
    pub product_alt: Option<String>,
    /// Resolved scan destination.
    pub destination_url: String,
    /// PNG data URL of the rendered scan code.
    pub image: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn record(destination: Destination, variant: &str) -> QrCode {
        QrCode {
            id: QrCodeId::new(1),
            shop: "promo.myshopify.com".to_owned(),
            title: "Front window".to_owned(),
            product_id: "gid://shopify/Product/10".to_owned(),
            product_handle: "promo-item".to_owned(),
            product_variant_id: variant.to_owned(),
            destination,
            scans: 0,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_destination_url_product_mode() {
        let record = record(Destination::Product, "gid://shopify/ProductVariant/42");
        assert_eq!(
            record.destination_url().unwrap(),
            "https://promo.myshopify.com/products/promo-item"
        );
    }

    #[test]
    fn test_destination_url_cart_mode() {
        let record = record(Destination::Cart, "gid://shopify/ProductVariant/42");
        assert_eq!(
            record.destination_url().unwrap(),
            "https://promo.myshopify.com/cart/42:1"
        );
    }

    #[test]
    fn test_destination_url_cart_mode_rejects_malformed_variant() {
        let record = record(Destination::Cart, "gid://shopify/Product/42");
        assert!(matches!(
            record.destination_url(),
            Err(VariantIdError::Unrecognized(_))
        ));
    }

    #[test]
    fn test_product_mode_ignores_variant_reference() {
        // Product mode never dereferences the variant, malformed or not.
        let record = record(Destination::Product, "");
        assert!(record.destination_url().is_ok());
    }

    #[test]
    fn test_validate_collects_all_errors() {
        let errors = QrCodeForm::default().validate().unwrap_err();
        assert_eq!(errors.len(), 3);
        assert_eq!(errors.get("title"), Some("Title is required"));
        assert_eq!(errors.get("product_id"), Some("Product is required"));
        assert_eq!(errors.get("destination"), Some("Destination is required"));
    }

    #[test]
    fn test_validate_reports_single_missing_field() {
        let form = QrCodeForm {
            title: "Promo".to_owned(),
            product_id: String::new(),
            product_variant_id: "gid://shopify/ProductVariant/1".to_owned(),
            destination: Some(Destination::Product),
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get("product_id"), Some("Product is required"));
    }

    #[test]
    fn test_validate_stages_complete_form() {
        let form = QrCodeForm {
            title: "Promo".to_owned(),
            product_id: "gid://shopify/Product/10".to_owned(),
            // An empty variant is fine: only cart resolution reads it,
            // and that failure is a data invariant, not a form error.
            product_variant_id: String::new(),
            destination: Some(Destination::Cart),
        };
        let staged = form.validate().unwrap();
        assert_eq!(staged.title, "Promo");
        assert_eq!(staged.destination, Destination::Cart);
    }

    #[test]
    fn test_validation_errors_serialize_as_map() {
        let errors = QrCodeForm::default().validate().unwrap_err();
        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(json["title"], "Title is required");
    }

    #[test]
    fn test_enriched_view_flattens_record() {
        let enriched = EnrichedQrCode {
            record: record(Destination::Product, ""),
            product_deleted: false,
            product_title: Some("Promo item".to_owned()),
            product_image: None,
            product_alt: None,
            destination_url: "https://promo.myshopify.com/products/promo-item".to_owned(),
            image: "data:image/png;base64,AAAA".to_owned(),
        };
        let json = serde_json::to_value(&enriched).unwrap();
        assert_eq!(json["title"], "Front window");
        assert_eq!(json["product_title"], "Promo item");
        assert_eq!(json["product_deleted"], false);
    }
}
