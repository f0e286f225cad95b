//! Shopcode Core - Shared domain types.
//!
//! This crate provides the types shared by the Shopcode components:
//! - `app` - The QR code feature library (storage, catalog, enrichment)
//! - the host-platform glue (routing, embedded admin UI) that calls into it
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access, no HTTP
//! clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - The record id, the destination mode, and variant-reference
//!   parsing

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
