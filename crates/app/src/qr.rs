//! Scan-landing URL construction and QR image rendering.
//!
//! The rendered image never encodes the destination directly: it encodes
//! the application-hosted scan-landing URL, which lets the platform count
//! the redemption and redirect. Rendering is uncached; every call
//! re-renders.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use image::Luma;
use thiserror::Error;
use url::Url;

use shopcode_core::QrCodeId;

/// Errors that can occur while rendering a scan code image.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The URL could not be QR-encoded.
    #[error("QR encoding failed: {0}")]
    Qr(#[from] qrcode::types::QrError),

    /// The QR matrix could not be written as PNG.
    #[error("PNG encoding failed: {0}")]
    Png(#[from] image::ImageError),

    /// The blocking render task was cancelled or panicked.
    #[error("render task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// The scan-landing URL for one record: `/qrcodes/{id}/scan` on the
/// configured application origin. Any path, query, or fragment on the base
/// URL is replaced.
#[must_use]
pub fn scan_url(app_url: &Url, id: QrCodeId) -> Url {
    let mut url = app_url.clone();
    url.set_path(&format!("/qrcodes/{id}/scan"));
    url.set_query(None);
    url.set_fragment(None);
    url
}

/// Render `target` as a self-contained PNG data URL.
///
/// The CPU-bound encoding runs on the blocking pool so concurrent product
/// lookups keep making progress while the image is produced.
///
/// # Errors
///
/// Returns [`RenderError`] if QR or PNG encoding fails; callers treat that
/// as fatal for the record being rendered.
pub async fn render_data_url(target: &Url) -> Result<String, RenderError> {
    let contents = target.to_string();
    tokio::task::spawn_blocking(move || render_png_data_url(&contents)).await?
}

fn render_png_data_url(contents: &str) -> Result<String, RenderError> {
    let code = qrcode::QrCode::new(contents.as_bytes())?;
    let pixels = code.render::<Luma<u8>>().build();

    let mut png = Vec::new();
    image::DynamicImage::ImageLuma8(pixels)
        .write_to(&mut std::io::Cursor::new(&mut png), image::ImageFormat::Png)?;

    Ok(format!("data:image/png;base64,{}", BASE64.encode(png)))
}
