//! End-to-end lifecycle tests for `QrCodeService`.
//!
//! These tests require:
//! - A running `PostgreSQL` database reachable via `DATABASE_URL`
//! - The `crates/app` migrations applied (`sqlx migrate run`)
//!
//! Run with: `cargo test -p shopcode-integration-tests -- --ignored`
//!
//! Each test works under a unique shop domain so runs never interfere
//! with each other or with leftover rows.

use secrecy::SecretString;
use sqlx::PgPool;
use url::Url;

use shopcode_app::db::RepositoryError;
use shopcode_app::error::QrCodeError;
use shopcode_app::models::{QrCodeForm, StagedQrCode};
use shopcode_app::services::QrCodeService;
use shopcode_app::shopify::ShopifyError;
use shopcode_core::Destination;
use shopcode_integration_tests::{ScriptedCatalog, ScriptedProduct};

const PRODUCT_ID: &str = "gid://shopify/Product/10";

async fn test_pool() -> PgPool {
    let database_url = std::env::var("DATABASE_URL")
        .expect("DATABASE_URL must point at a migrated test database");
    shopcode_app::db::create_pool(&SecretString::from(database_url))
        .await
        .expect("Failed to connect to the test database")
}

fn app_url() -> Url {
    Url::parse("https://shop-app.example.com").expect("static URL parses")
}

fn catalog() -> ScriptedCatalog {
    ScriptedCatalog::with_products(vec![(
        PRODUCT_ID,
        ScriptedProduct::new("Promo item", "promo-item"),
    )])
}

fn unique_shop(label: &str) -> String {
    let nanos = chrono::Utc::now()
        .timestamp_nanos_opt()
        .expect("current time fits in nanoseconds");
    format!("{label}-{nanos}.example")
}

fn staged(title: &str, destination: Destination, variant: &str) -> StagedQrCode {
    QrCodeForm {
        title: title.to_owned(),
        product_id: PRODUCT_ID.to_owned(),
        product_variant_id: variant.to_owned(),
        destination: Some(destination),
    }
    .validate()
    .expect("complete form validates")
}

#[tokio::test]
#[ignore = "Requires PostgreSQL via DATABASE_URL"]
async fn test_create_then_get_one_yields_enriched_view() {
    let service = QrCodeService::new(test_pool().await, catalog(), app_url());
    let shop = unique_shop("create");

    let record = service
        .create(&shop, staged("Promo", Destination::Product, ""))
        .await
        .expect("create succeeds");

    // The handle was denormalized from the catalog at write time.
    assert_eq!(record.product_handle, "promo-item");
    assert_eq!(record.scans, 0);

    let view = service
        .get_one(record.id)
        .await
        .expect("read succeeds")
        .expect("record exists");

    assert_eq!(
        view.destination_url,
        format!("https://{shop}/products/promo-item")
    );
    assert!(view.image.starts_with("data:image/png;base64,"));
    assert_eq!(view.product_title.as_deref(), Some("Promo item"));
}

#[tokio::test]
#[ignore = "Requires PostgreSQL via DATABASE_URL"]
async fn test_update_to_cart_destination_rewrites_resolution() {
    let service = QrCodeService::new(test_pool().await, catalog(), app_url());
    let shop = unique_shop("update");

    let record = service
        .create(&shop, staged("Promo", Destination::Product, ""))
        .await
        .expect("create succeeds");

    let updated = service
        .update(
            record.id,
            staged(
                "Promo",
                Destination::Cart,
                "gid://shopify/ProductVariant/99",
            ),
        )
        .await
        .expect("update succeeds")
        .expect("record exists");

    assert_eq!(updated.destination, Destination::Cart);

    let view = service
        .get_one(updated.id)
        .await
        .expect("read succeeds")
        .expect("record exists");

    assert_eq!(view.destination_url, format!("https://{shop}/cart/99:1"));
}

#[tokio::test]
#[ignore = "Requires PostgreSQL via DATABASE_URL"]
async fn test_list_is_newest_first_and_tenant_scoped() {
    let service = QrCodeService::new(test_pool().await, catalog(), app_url());
    let shop = unique_shop("list");
    let other_shop = unique_shop("list-other");

    let mut created = Vec::new();
    for title in ["First", "Second", "Third"] {
        let record = service
            .create(&shop, staged(title, Destination::Product, ""))
            .await
            .expect("create succeeds");
        created.push(record.id);
    }
    service
        .create(&other_shop, staged("Elsewhere", Destination::Product, ""))
        .await
        .expect("create succeeds");

    let views = service.list_for_shop(&shop).await.expect("list succeeds");

    let listed: Vec<_> = views.iter().map(|v| v.record.id).collect();
    created.reverse();
    assert_eq!(listed, created);
    assert!(views.iter().all(|v| v.record.shop == shop));
}

#[tokio::test]
#[ignore = "Requires PostgreSQL via DATABASE_URL"]
async fn test_delete_is_permanent_and_double_delete_is_an_error() {
    let service = QrCodeService::new(test_pool().await, catalog(), app_url());
    let shop = unique_shop("delete");

    let record = service
        .create(&shop, staged("Doomed", Destination::Product, ""))
        .await
        .expect("create succeeds");

    service.delete(record.id).await.expect("delete succeeds");

    // A vanished record reads as absent, not as a failure.
    assert!(
        service
            .get_one(record.id)
            .await
            .expect("read succeeds")
            .is_none()
    );

    // Deleting it again is a caller error surfaced by the store.
    let err = service
        .delete(record.id)
        .await
        .expect_err("double delete fails");
    assert!(matches!(
        err,
        QrCodeError::Repository(RepositoryError::NotFound)
    ));
}

#[tokio::test]
#[ignore = "Requires PostgreSQL via DATABASE_URL"]
async fn test_update_of_unknown_id_is_absent() {
    let service = QrCodeService::new(test_pool().await, catalog(), app_url());

    let missing = service
        .update(
            shopcode_core::QrCodeId::new(i64::MAX),
            staged("Ghost", Destination::Product, ""),
        )
        .await
        .expect("update succeeds");

    assert!(missing.is_none());
}

#[tokio::test]
#[ignore = "Requires PostgreSQL via DATABASE_URL"]
async fn test_create_against_vanished_product_fails_hard() {
    let service = QrCodeService::new(test_pool().await, ScriptedCatalog::default(), app_url());
    let shop = unique_shop("vanished");

    let err = service
        .create(&shop, staged("Promo", Destination::Product, ""))
        .await
        .expect_err("missing product is a hard failure");

    assert!(matches!(
        err,
        QrCodeError::Shopify(ShopifyError::NotFound(_))
    ));
}
