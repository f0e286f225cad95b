//! Services composing the store, the catalog, and the renderer.

pub mod enrich;
pub mod qr_codes;

pub use enrich::{enrich_many, enrich_one};
pub use qr_codes::QrCodeService;
