//! Cropframe WASM - WebAssembly bindings for Cropframe
//!
//! This crate provides WASM bindings to expose the cropframe-core engine
//! to JavaScript/TypeScript applications.
//!
//! # Module Structure
//!
//! - `types` - WASM-compatible wrapper types for pixel data, crop rectangles
//!   and render results
//! - `geometry` - Crop box interaction (`JsGeometryEngine`)
//! - `transform` - Rotation, flip and crop rendering
//! - `decode` / `encode` - Image boundary helpers (JPEG, PNG)
//! - `logging` - Console output for engine logs
//!
//! # Usage
//!
//! ```typescript
//! import init, { decode_image, render, JsGeometryEngine } from '@cropframe/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//!
//! const image = decode_image(new Uint8Array(await file.arrayBuffer()));
//! const engine = new JsGeometryEngine();
//! engine.load_image(image.width, image.height, 400, 400);
//! const cropped = render(image, 0, false, false, engine.source_crop_rect()).image();
//! ```

use wasm_bindgen::prelude::*;

mod decode;
mod encode;
mod geometry;
mod logging;
mod transform;
mod types;

// Re-export public types
pub use decode::{decode_image, get_orientation};
pub use encode::{encode_image, output_mime_type};
pub use geometry::JsGeometryEngine;
pub use logging::init_logging;
pub use transform::{render, working_size};
pub use types::{JsCropBox, JsCropRect, JsPixelBuffer, JsRenderOutput};

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    logging::install(logging::DEFAULT_LEVEL)
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
