//! # QR Code Generator
//!
//! Renders check-in URLs as square PNG QR codes, returned as `data:` URIs so they
//! can be stored inline on the event record.
//!
//! Codes always use error-correction level **H**: an optional brand mark is
//! composited over the centre, destroying the modules underneath, and only the
//! highest tier reliably recovers from an occlusion of that size. The logo is
//! drawn at 22% of the image width on a white circular plate with a thin black
//! border.
//!
//! A logo that cannot be fetched or decoded never fails generation; the plain
//! code is returned instead and the problem is logged. Only an encoding failure
//! (payload too long, image too small) is an error.

use crate::error::QrError;
use base64::{Engine as _, engine::general_purpose::STANDARD};
use image::imageops::{self, FilterType};
use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use qrcode::{Color, EcLevel, QrCode};
use std::io::Cursor;
use tracing::{debug, warn};

pub const DEFAULT_SIZE: u32 = 600;
/// Light border around the code, in modules.
pub const QUIET_ZONE_MODULES: u32 = 2;
/// Logo edge length relative to the image edge.
pub const LOGO_RATIO: f32 = 0.22;
/// White space between the logo and the plate border, in pixels.
pub const LOGO_PADDING: f32 = 15.0;
pub const LOGO_BORDER_WIDTH: f32 = 3.0;

pub const PNG_DATA_URI_PREFIX: &str = "data:image/png;base64,";

const DARK: Rgba<u8> = Rgba([0, 0, 0, 255]);
const LIGHT: Rgba<u8> = Rgba([255, 255, 255, 255]);

#[derive(Debug, Clone)]
pub struct QrGenerator {
    size: u32,
    logo_url: Option<String>,
    http: reqwest::Client,
}

impl QrGenerator {
    /// `logo_url` may be an http(s) URL, a `data:` URI or a filesystem path.
    /// Blank values disable the logo.
    pub fn new(size: u32, logo_url: Option<String>, http: reqwest::Client) -> Self {
        Self {
            size,
            logo_url: logo_url.filter(|u| !u.trim().is_empty()),
            http,
        }
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    /// Generates a code for `data` using the configured logo, if any.
    pub async fn generate(&self, data: &str) -> Result<String, QrError> {
        self.generate_with_logo(data, self.logo_url.as_deref()).await
    }

    /// Generates a code for `data`, compositing `logo_url` when given.
    pub async fn generate_with_logo(
        &self,
        data: &str,
        logo_url: Option<&str>,
    ) -> Result<String, QrError> {
        let owned = data.to_owned();
        let size = self.size;
        let mut canvas = run_blocking(move || render_code(&owned, size)).await?;

        if let Some(source) = logo_url.filter(|s| !s.trim().is_empty()) {
            match self.load_logo(source).await {
                Ok(logo) => {
                    canvas = run_blocking(move || {
                        composite_logo(&mut canvas, &logo);
                        Ok(canvas)
                    })
                    .await?;
                }
                Err(err) => warn!("QR logo skipped, returning plain code: {err}"),
            }
        }

        debug!(bytes = data.len(), size, "Generated QR code");
        run_blocking(move || encode_png_data_uri(&canvas)).await
    }

    async fn load_logo(&self, source: &str) -> Result<DynamicImage, QrError> {
        let bytes = if source.starts_with("data:") {
            decode_data_uri(source)?.1
        } else if source.starts_with("http://") || source.starts_with("https://") {
            let fetch_err = |e: reqwest::Error| QrError::LogoFetch {
                source_url: source.to_owned(),
                reason: e.to_string(),
            };
            self.http
                .get(source)
                .send()
                .await
                .and_then(|r| r.error_for_status())
                .map_err(fetch_err)?
                .bytes()
                .await
                .map_err(fetch_err)?
                .to_vec()
        } else {
            tokio::fs::read(source)
                .await
                .map_err(|e| QrError::LogoFetch {
                    source_url: source.to_owned(),
                    reason: e.to_string(),
                })?
        };

        run_blocking(move || image::load_from_memory(&bytes).map_err(QrError::from)).await
    }
}

async fn run_blocking<T, F>(f: F) -> Result<T, QrError>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, QrError> + Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| QrError::Render(e.to_string()))?
}

/// Rasterises `data` at level H into a `size`×`size` canvas with whole-pixel
/// modules, centred, with a [`QUIET_ZONE_MODULES`] light border.
pub fn render_code(data: &str, size: u32) -> Result<RgbaImage, QrError> {
    let code = QrCode::with_error_correction_level(data.as_bytes(), EcLevel::H)?;
    let modules = code.width() as u32;
    let total = modules + 2 * QUIET_ZONE_MODULES;
    let scale = size / total;
    if scale == 0 {
        return Err(QrError::Render(format!(
            "{size}px is too small for a {modules}-module code"
        )));
    }

    let origin = (size - scale * total) / 2 + QUIET_ZONE_MODULES * scale;
    let mut canvas = RgbaImage::from_pixel(size, size, LIGHT);
    for my in 0..modules {
        for mx in 0..modules {
            if code[(mx as usize, my as usize)] != Color::Dark {
                continue;
            }
            let (px, py) = (origin + mx * scale, origin + my * scale);
            for y in py..py + scale {
                for x in px..px + scale {
                    canvas.put_pixel(x, y, DARK);
                }
            }
        }
    }
    Ok(canvas)
}

/// Draws the white plate, its border and the scaled logo over the centre of `canvas`.
pub fn composite_logo(canvas: &mut RgbaImage, logo: &DynamicImage) {
    let size = canvas.width().min(canvas.height());
    let logo_size = ((size as f32) * LOGO_RATIO).round().max(1.0) as u32;
    let center = size as f32 / 2.0;
    let radius = (logo_size as f32 + LOGO_PADDING * 2.0) / 2.0;
    let inner = radius - LOGO_BORDER_WIDTH / 2.0;
    let outer = radius + LOGO_BORDER_WIDTH / 2.0;

    let lo = (center - outer).floor().max(0.0) as u32;
    let hi = ((center + outer).ceil() as u32).min(size);
    for y in lo..hi {
        for x in lo..hi {
            let dx = x as f32 + 0.5 - center;
            let dy = y as f32 + 0.5 - center;
            let d = (dx * dx + dy * dy).sqrt();
            if d < inner {
                canvas.put_pixel(x, y, LIGHT);
            } else if d <= outer {
                canvas.put_pixel(x, y, DARK);
            }
        }
    }

    let scaled = logo
        .resize_exact(logo_size, logo_size, FilterType::Triangle)
        .to_rgba8();
    let pos = i64::from((size - logo_size) / 2);
    imageops::overlay(canvas, &scaled, pos, pos);
}

pub fn encode_png_data_uri(image: &RgbaImage) -> Result<String, QrError> {
    let mut buf = Cursor::new(Vec::new());
    image
        .write_to(&mut buf, ImageFormat::Png)
        .map_err(|e| QrError::Render(e.to_string()))?;
    Ok(format!(
        "{PNG_DATA_URI_PREFIX}{}",
        STANDARD.encode(buf.into_inner())
    ))
}

/// Splits a base64 `data:` URI into its media type and decoded bytes.
pub fn decode_data_uri(uri: &str) -> Result<(String, Vec<u8>), QrError> {
    let rest = uri
        .strip_prefix("data:")
        .ok_or_else(|| QrError::DataUri("missing `data:` scheme".into()))?;
    let (meta, body) = rest
        .split_once(',')
        .ok_or_else(|| QrError::DataUri("missing `,` separator".into()))?;
    let media_type = meta
        .strip_suffix(";base64")
        .ok_or_else(|| QrError::DataUri("only base64 data URIs are supported".into()))?;
    let bytes = STANDARD
        .decode(body.trim())
        .map_err(|e| QrError::DataUri(e.to_string()))?;
    Ok((media_type.to_owned(), bytes))
}
