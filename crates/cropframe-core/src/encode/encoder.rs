//! Pixel buffer encoding for committed edits.
//!
//! JPEG output uses the `image` crate's baseline encoder with a quality
//! derived from the editor's `(0, 1]` export quality. PNG output is lossless
//! and keeps the alpha channel; quality is ignored.

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::ExtendedColorType;
use image::ImageEncoder;
use thiserror::Error;

use super::OutputFormat;
use crate::decode::{PixelBuffer, CHANNELS};

/// Errors that can occur while encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 4), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// The underlying encoder failed
    #[error("Encoding failed: {0}")]
    EncodingFailure(String),
}

/// Map an export quality in `(0, 1]` to the JPEG scale 1-100.
///
/// Out-of-range values are clamped; non-finite values fall back to 100.
pub fn jpeg_quality(quality: f32) -> u8 {
    if !quality.is_finite() {
        return 100;
    }
    ((quality.clamp(0.0, 1.0) * 100.0).round() as u8).clamp(1, 100)
}

/// Encode an RGBA buffer as `format`.
///
/// `quality` is the `(0, 1]` export quality; only JPEG uses it. JPEG has no
/// alpha channel, so alpha is dropped and fully transparent pixels come out
/// black, as a browser canvas export does.
///
/// # Example
///
/// ```
/// use cropframe_core::decode::PixelBuffer;
/// use cropframe_core::encode::{encode, OutputFormat};
///
/// let image = PixelBuffer::new(10, 10, vec![128u8; 10 * 10 * 4]);
/// let jpeg = encode(&image, OutputFormat::Jpeg, 0.9).unwrap();
///
/// // Verify JPEG magic bytes
/// assert_eq!(&jpeg[0..2], &[0xFF, 0xD8]);
/// ```
pub fn encode(
    buffer: &PixelBuffer,
    format: OutputFormat,
    quality: f32,
) -> Result<Vec<u8>, EncodeError> {
    let (width, height) = (buffer.width, buffer.height);
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }

    let expected = PixelBuffer::expected_len(width, height);
    if buffer.pixels.len() != expected {
        return Err(EncodeError::InvalidPixelData {
            expected,
            actual: buffer.pixels.len(),
        });
    }

    if !format.supports_alpha() && has_transparency(buffer) {
        log::warn!("{} has no alpha channel, transparent pixels will be flattened", format);
    }

    let bytes = match format {
        OutputFormat::Jpeg => encode_jpeg(buffer, jpeg_quality(quality))?,
        OutputFormat::Png => encode_png(buffer)?,
    };

    log::debug!(
        "encoded {}x{} image as {} ({} bytes)",
        width,
        height,
        format,
        bytes.len()
    );
    Ok(bytes)
}

/// True when any pixel is not fully opaque.
fn has_transparency(buffer: &PixelBuffer) -> bool {
    buffer.pixels.chunks_exact(CHANNELS).any(|p| p[3] < u8::MAX)
}

fn encode_jpeg(buffer: &PixelBuffer, quality: u8) -> Result<Vec<u8>, EncodeError> {
    let rgb: Vec<u8> = buffer
        .pixels
        .chunks_exact(CHANNELS)
        .flat_map(|p| [p[0], p[1], p[2]])
        .collect();

    let mut output = Cursor::new(Vec::new());
    let encoder = JpegEncoder::new_with_quality(&mut output, quality);
    encoder
        .write_image(&rgb, buffer.width, buffer.height, ExtendedColorType::Rgb8)
        .map_err(|e| EncodeError::EncodingFailure(e.to_string()))?;

    Ok(output.into_inner())
}

fn encode_png(buffer: &PixelBuffer) -> Result<Vec<u8>, EncodeError> {
    let mut output = Cursor::new(Vec::new());
    let encoder = PngEncoder::new(&mut output);
    encoder
        .write_image(&buffer.pixels, buffer.width, buffer.height, ExtendedColorType::Rgba8)
        .map_err(|e| EncodeError::EncodingFailure(e.to_string()))?;

    Ok(output.into_inner())
}
