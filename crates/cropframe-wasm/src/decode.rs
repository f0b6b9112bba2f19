//! Image decoding WASM bindings.
//!
//! # Functions
//!
//! - [`decode_image`] - Decode JPEG or PNG bytes to RGBA, EXIF orientation applied
//! - [`get_orientation`] - Read the EXIF orientation value (1-8)
//!
//! # Example
//!
//! ```typescript
//! import { decode_image } from '@cropframe/wasm';
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const image = decode_image(bytes);
//! console.log(`Decoded ${image.width}x${image.height}`);
//! ```

use cropframe_core::decode;
use wasm_bindgen::prelude::*;

use crate::types::JsPixelBuffer;

/// Decode a JPEG or PNG image from bytes.
///
/// EXIF orientation is applied, so the result has the same size as the
/// image a browser displays for the same file.
///
/// # Errors
///
/// Returns an error if:
/// - The format is not recognized
/// - The data is corrupted or truncated
#[wasm_bindgen]
pub fn decode_image(bytes: &[u8]) -> Result<JsPixelBuffer, JsValue> {
    decode::decode_image(bytes)
        .map(JsPixelBuffer::from_buffer)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// EXIF orientation of the image (1 = normal), without decoding pixels.
#[wasm_bindgen]
pub fn get_orientation(bytes: &[u8]) -> u8 {
    decode::get_orientation(bytes) as u8
}

/// Native tests cover the paths that do not construct a `JsValue`. Decoding
/// itself is tested in `cropframe_core::decode`.
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orientation_of_garbage_is_normal() {
        assert_eq!(get_orientation(&[0x00, 0x01, 0x02]), 1);
        assert_eq!(get_orientation(&[]), 1);
    }
}

/// WASM-specific tests that require JsValue.
///
/// Use `wasm-pack test` to run these.
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_decode_image_invalid() {
        assert!(decode_image(&[0x00, 0x01, 0x02, 0x03]).is_err());
    }

    #[wasm_bindgen_test]
    fn test_decode_image_empty() {
        assert!(decode_image(&[]).is_err());
    }
}
