//! Shopcode App - the QR code feature library.
//!
//! Merchants create QR code records that point at a product page or at a
//! pre-filled cart for one of that product's variants. This crate owns the
//! record lifecycle: validation-gated writes, tenant-scoped reads, and the
//! read-time enrichment that joins each stored record with live catalog
//! data and a freshly rendered scan image.
//!
//! Routing, page markup, and the host-platform authentication handshake
//! live outside this crate; they call in through
//! [`services::QrCodeService`].

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod qr;
pub mod services;
pub mod shopify;
