//! Image encoding WASM bindings.
//!
//! This module exposes encoding to JavaScript so a committed edit can be
//! saved in the same format as the file it came from.
//!
//! # Example
//!
//! ```typescript
//! import { encode_image } from '@cropframe/wasm';
//!
//! const bytes = encode_image(rendered, file.type, 0.95);
//! const blob = new Blob([bytes], { type: output_mime_type(file.type) });
//! ```

use cropframe_core::encode::{self, OutputFormat};
use wasm_bindgen::prelude::*;

use crate::types::JsPixelBuffer;

/// Encode an image for export.
///
/// # Arguments
///
/// * `image` - RGBA image to encode
/// * `mime_type` - Target type, e.g. `file.type`. `image/png` gives PNG;
///   anything else (including an empty string) gives JPEG.
/// * `quality` - Quality in (0, 1], as for `canvas.toBlob`. Ignored for PNG.
///
/// # Errors
///
/// Returns an error if:
/// - The pixel data length doesn't match width * height * 4
/// - Width or height is zero
/// - Encoding fails internally
#[wasm_bindgen]
pub fn encode_image(
    image: &JsPixelBuffer,
    mime_type: &str,
    quality: f32,
) -> Result<Vec<u8>, JsValue> {
    encode::encode(&image.to_buffer(), output_format(mime_type), quality)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// The MIME type `encode_image` actually produces for `mime_type`.
#[wasm_bindgen]
pub fn output_mime_type(mime_type: &str) -> String {
    output_format(mime_type).mime_type().to_string()
}

fn output_format(mime_type: &str) -> OutputFormat {
    OutputFormat::from_mime_type(mime_type).unwrap_or_else(|| {
        log::debug!("no encoder for {mime_type:?}, falling back to JPEG");
        OutputFormat::Jpeg
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_image_jpeg() {
        let img = JsPixelBuffer::new(10, 10, vec![128u8; 10 * 10 * 4]);
        let bytes = encode_image(&img, "image/jpeg", 0.9).ok().unwrap();
        assert_eq!(&bytes[0..2], &[0xFF, 0xD8]);
    }

    #[test]
    fn test_encode_image_png() {
        let img = JsPixelBuffer::new(4, 4, vec![10u8; 4 * 4 * 4]);
        let bytes = encode_image(&img, "image/png", 0.9).ok().unwrap();
        assert_eq!(&bytes[1..4], b"PNG");
    }

    #[test]
    fn test_output_mime_type_fallback() {
        assert_eq!(output_mime_type("image/png"), "image/png");
        assert_eq!(output_mime_type("image/jpeg"), "image/jpeg");
        assert_eq!(output_mime_type(""), "image/jpeg");
        assert_eq!(output_mime_type("image/gif"), "image/jpeg");
    }
}
