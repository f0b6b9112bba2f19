//! WASM bindings for rendering: rotation, flips and crop.
//!
//! This module provides the preview and export render used by the editor.
//! The crop rectangle is in working-canvas pixels, i.e. the value returned by
//! `JsGeometryEngine::source_crop_rect` when the engine was loaded with the
//! rotated image size.

use cropframe_core::geometry::{CropRectSource, Dimensions};
use cropframe_core::transform::{render as core_render, TransformState};
use wasm_bindgen::prelude::*;

use crate::types::{JsCropRect, JsPixelBuffer, JsRenderOutput};

/// Render an image through rotation, flips and an optional crop.
///
/// # Arguments
///
/// * `image` - Source RGBA image
/// * `rotation_degrees` - Clockwise rotation, clamped to [0, 360]
/// * `flip_horizontal` / `flip_vertical` - Mirror in the image's own frame
/// * `crop` - Crop rectangle in working-canvas pixels, or `undefined`
///
/// A crop that misses the canvas entirely yields the full canvas with
/// `degenerate` set on the result.
///
/// # Example (TypeScript)
///
/// ```typescript
/// const out = render(source, 90, false, false, engine.source_crop_rect());
/// if (out.degenerate) showCropWarning();
/// const image = out.image();
/// ctx.putImageData(new ImageData(new Uint8ClampedArray(image.pixels()), image.width), 0, 0);
/// ```
#[wasm_bindgen]
pub fn render(
    image: &JsPixelBuffer,
    rotation_degrees: f64,
    flip_horizontal: bool,
    flip_vertical: bool,
    crop: Option<JsCropRect>,
) -> Result<JsRenderOutput, JsValue> {
    render_buffer(
        image,
        rotation_degrees,
        flip_horizontal,
        flip_vertical,
        crop.map(CropRectSource::from),
    )
    .map_err(|e| JsValue::from_str(&e))
}

fn render_buffer(
    image: &JsPixelBuffer,
    rotation_degrees: f64,
    flip_horizontal: bool,
    flip_vertical: bool,
    crop: Option<CropRectSource>,
) -> Result<JsRenderOutput, String> {
    let mut transform = TransformState::new(0.0, flip_horizontal, flip_vertical);
    transform.set_rotation(rotation_degrees);

    let source = image.to_buffer();
    let natural = Dimensions::new(source.width as f64, source.height as f64);
    core_render(&source, natural, &transform, crop)
        .map(JsRenderOutput::from)
        .map_err(|e| e.to_string())
}

/// Size of the working canvas for a rotation, as `[width, height]`.
#[wasm_bindgen]
pub fn working_size(width: u32, height: u32, rotation_degrees: f64) -> Vec<u32> {
    let mut transform = TransformState::default();
    transform.set_rotation(rotation_degrees);
    let (w, h) = transform.working_pixels(width, height);
    vec![w, h]
}
