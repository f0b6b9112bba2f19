//! WASM-compatible wrapper types for pixel data and crop rectangles.
//!
//! This module provides JavaScript-friendly types that wrap the core Cropframe
//! types, handling the conversion between Rust and JavaScript data
//! representations.

use cropframe_core::decode::PixelBuffer;
use cropframe_core::geometry::{CropBox, CropRectSource};
use cropframe_core::transform::{CropOutcome, RenderOutput};
use wasm_bindgen::prelude::*;

/// An RGBA pixel buffer for JavaScript.
///
/// The layout matches `ImageData.data`: 4 bytes per pixel, row-major, so
/// `pixels()` can be passed straight to `new ImageData(...)`.
///
/// # Memory Management
///
/// The pixel data is stored in WASM memory. When you call `pixels()`, a copy is made
/// to JavaScript memory as a `Uint8Array`.
#[wasm_bindgen]
pub struct JsPixelBuffer {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

#[wasm_bindgen]
impl JsPixelBuffer {
    /// Create a new JsPixelBuffer from dimensions and RGBA pixel data
    /// (e.g. `ImageData.data`).
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> JsPixelBuffer {
        JsPixelBuffer {
            width,
            height,
            pixels,
        }
    }

    /// Get the image width in pixels
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the image height in pixels
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of bytes in the pixel buffer (width * height * 4)
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.pixels.len()
    }

    /// Returns RGBA pixel data as Uint8Array.
    ///
    /// Note: This creates a copy of the pixel data.
    pub fn pixels(&self) -> Vec<u8> {
        self.pixels.clone()
    }
}

impl JsPixelBuffer {
    pub(crate) fn from_buffer(buffer: PixelBuffer) -> Self {
        Self {
            width: buffer.width,
            height: buffer.height,
            pixels: buffer.pixels,
        }
    }

    /// Convert to a core PixelBuffer. Clones the pixel data.
    ///
    /// No length check happens here; core operations validate.
    pub(crate) fn to_buffer(&self) -> PixelBuffer {
        PixelBuffer {
            width: self.width,
            height: self.height,
            pixels: self.pixels.clone(),
        }
    }
}

/// Result of `render`: the image plus what happened to the requested crop.
///
/// When `degenerate` is true the crop missed the canvas and `image()` is the
/// full, uncropped canvas.
#[wasm_bindgen]
pub struct JsRenderOutput {
    inner: RenderOutput,
}

#[wasm_bindgen]
impl JsRenderOutput {
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.inner.width()
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.inner.height()
    }

    /// True when a crop was requested but fell outside the canvas.
    #[wasm_bindgen(getter)]
    pub fn degenerate(&self) -> bool {
        self.inner.is_degenerate()
    }

    /// The crop rectangle actually applied, clamped to the canvas.
    /// `undefined` when nothing was cropped.
    pub fn applied_crop(&self) -> Option<JsCropRect> {
        match self.inner.crop {
            CropOutcome::Cropped(rect) => Some(rect.into()),
            CropOutcome::Uncropped | CropOutcome::Degenerate(_) => None,
        }
    }

    /// The rendered image. Copies the pixel data.
    pub fn image(&self) -> JsPixelBuffer {
        JsPixelBuffer::from_buffer(self.inner.buffer.clone())
    }
}

impl From<RenderOutput> for JsRenderOutput {
    fn from(inner: RenderOutput) -> Self {
        Self { inner }
    }
}

/// A crop rectangle in integer source pixels.
#[wasm_bindgen]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JsCropRect {
    inner: CropRectSource,
}

#[wasm_bindgen]
impl JsCropRect {
    #[wasm_bindgen(constructor)]
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> JsCropRect {
        JsCropRect {
            inner: CropRectSource::new(x, y, width, height),
        }
    }

    #[wasm_bindgen(getter)]
    pub fn x(&self) -> u32 {
        self.inner.x
    }

    #[wasm_bindgen(getter)]
    pub fn y(&self) -> u32 {
        self.inner.y
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.inner.height
    }
}

impl From<CropRectSource> for JsCropRect {
    fn from(inner: CropRectSource) -> Self {
        Self { inner }
    }
}

impl From<JsCropRect> for CropRectSource {
    fn from(rect: JsCropRect) -> Self {
        rect.inner
    }
}

/// The crop box in display (container) coordinates, for drawing the overlay.
#[wasm_bindgen]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JsCropBox {
    inner: CropBox,
}

#[wasm_bindgen]
impl JsCropBox {
    #[wasm_bindgen(getter)]
    pub fn x(&self) -> f64 {
        self.inner.position.x
    }

    #[wasm_bindgen(getter)]
    pub fn y(&self) -> f64 {
        self.inner.position.y
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> f64 {
        self.inner.size.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> f64 {
        self.inner.size.height
    }
}

impl From<CropBox> for JsCropBox {
    fn from(inner: CropBox) -> Self {
        Self { inner }
    }
}
