//! Domain models for the QR code feature.

pub mod qr_code;

pub use qr_code::{EnrichedQrCode, QrCode, QrCodeForm, StagedQrCode, ValidationErrors};
