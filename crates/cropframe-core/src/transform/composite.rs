//! Rendering a source image through rotation, flips and an optional crop.
//!
//! # Pipeline
//!
//! 1. Size the working canvas: the source size, with width and height
//!    swapped whenever `rotation mod 180 != 0`.
//! 2. Draw the source centred on the canvas, rotated clockwise by the
//!    rotation angle and mirrored by the flips (flips are applied in the
//!    image's own frame, before rotation).
//! 3. If a crop is given, copy exactly that sub-rectangle of the canvas.
//!
//! Areas of the canvas the rotated image does not cover are transparent.

use thiserror::Error;

use super::crop::{clamp_to_canvas, copy_region};
use super::sample::{sample_bilinear, sample_nearest, RotationBasis};
use super::TransformState;
use crate::decode::{PixelBuffer, CHANNELS};
use crate::geometry::{CropRectSource, Dimensions};

/// Errors from [`render`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CompositeError {
    /// The requested natural size was zero, negative or not finite.
    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: f64, height: f64 },

    /// The source buffer is empty, malformed or disagrees with the natural size.
    #[error("Invalid source buffer: {0}")]
    InvalidSourceBuffer(String),

    /// The crop rectangle does not overlap the working canvas.
    #[error(
        "Crop {width}x{height} at ({x}, {y}) lies outside the {canvas_width}x{canvas_height} canvas"
    )]
    DegenerateCrop {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
        canvas_width: u32,
        canvas_height: u32,
    },
}

/// How the crop request was honoured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CropOutcome {
    /// No crop was requested (or it had zero width or height).
    Uncropped,
    /// The canvas was cropped to this rectangle, clamped to the canvas.
    Cropped(CropRectSource),
    /// The requested rectangle missed the canvas entirely; the full canvas
    /// was returned instead.
    Degenerate(CropRectSource),
}

/// Result of [`render`].
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOutput {
    pub buffer: PixelBuffer,
    pub crop: CropOutcome,
}

impl RenderOutput {
    pub fn width(&self) -> u32 {
        self.buffer.width
    }

    pub fn height(&self) -> u32 {
        self.buffer.height
    }

    /// True when a crop was requested but fell outside the canvas.
    pub fn is_degenerate(&self) -> bool {
        matches!(self.crop, CropOutcome::Degenerate(_))
    }

    /// The rendered buffer, whatever the crop outcome.
    pub fn into_buffer(self) -> PixelBuffer {
        self.buffer
    }

    /// The rendered buffer, or [`CompositeError::DegenerateCrop`] when the
    /// crop missed the canvas.
    pub fn into_cropped(self) -> Result<PixelBuffer, CompositeError> {
        match self.crop {
            CropOutcome::Degenerate(rect) => Err(CompositeError::DegenerateCrop {
                x: rect.x,
                y: rect.y,
                width: rect.width,
                height: rect.height,
                canvas_width: self.buffer.width,
                canvas_height: self.buffer.height,
            }),
            _ => Ok(self.buffer),
        }
    }
}

/// Render `source` through `transform`, then crop to `crop`.
///
/// `natural_size` must match the buffer's pixel size; it is taken as a
/// separate argument because callers track it independently of decoding.
/// `crop` is in working-canvas pixels. A crop that does not overlap the
/// canvas yields the full canvas with [`CropOutcome::Degenerate`].
///
/// The source buffer is only read.
///
/// # Example
///
/// ```
/// use cropframe_core::decode::PixelBuffer;
/// use cropframe_core::geometry::Dimensions;
/// use cropframe_core::transform::{render, TransformState};
///
/// let source = PixelBuffer::transparent(40, 20);
/// let mut transform = TransformState::default();
/// transform.rotate_clockwise();
///
/// let out = render(&source, Dimensions::new(40.0, 20.0), &transform, None).unwrap();
/// assert_eq!((out.width(), out.height()), (20, 40));
/// ```
pub fn render(
    source: &PixelBuffer,
    natural_size: Dimensions,
    transform: &TransformState,
    crop: Option<CropRectSource>,
) -> Result<RenderOutput, CompositeError> {
    validate_source(source, natural_size)?;

    let (canvas_w, canvas_h) = transform.working_pixels(source.width, source.height);
    let canvas = if transform.is_identity() {
        source.clone()
    } else {
        draw_transformed(source, transform, canvas_w, canvas_h)
    };

    let requested = match crop {
        Some(rect) if !rect.is_empty() => rect,
        _ => {
            return Ok(RenderOutput {
                buffer: canvas,
                crop: CropOutcome::Uncropped,
            })
        }
    };

    match clamp_to_canvas(requested, canvas_w, canvas_h) {
        Some(rect) => {
            log::debug!(
                "cropping {}x{} canvas to {}x{} at ({}, {})",
                canvas_w,
                canvas_h,
                rect.width,
                rect.height,
                rect.x,
                rect.y
            );
            Ok(RenderOutput {
                buffer: copy_region(&canvas, rect),
                crop: CropOutcome::Cropped(rect),
            })
        }
        None => {
            log::warn!(
                "crop {:?} lies outside the {}x{} canvas; returning the full canvas",
                requested,
                canvas_w,
                canvas_h
            );
            Ok(RenderOutput {
                buffer: canvas,
                crop: CropOutcome::Degenerate(requested),
            })
        }
    }
}

fn validate_source(source: &PixelBuffer, natural_size: Dimensions) -> Result<(), CompositeError> {
    if !natural_size.is_valid() {
        return Err(CompositeError::InvalidDimensions {
            width: natural_size.width,
            height: natural_size.height,
        });
    }
    if !source.is_well_formed() {
        return Err(CompositeError::InvalidSourceBuffer(format!(
            "{}x{} buffer with {} bytes (expected {})",
            source.width,
            source.height,
            source.pixels.len(),
            PixelBuffer::expected_len(source.width, source.height)
        )));
    }
    if natural_size.width.round() != source.width as f64
        || natural_size.height.round() != source.height as f64
    {
        return Err(CompositeError::InvalidSourceBuffer(format!(
            "natural size {}x{} does not match {}x{} buffer",
            natural_size.width, natural_size.height, source.width, source.height
        )));
    }
    Ok(())
}

/// Fill a `canvas_w x canvas_h` canvas by inverse-mapping every pixel
/// centre back into the source.
fn draw_transformed(
    source: &PixelBuffer,
    transform: &TransformState,
    canvas_w: u32,
    canvas_h: u32,
) -> PixelBuffer {
    let basis = RotationBasis::from_degrees(transform.rotation_degrees);
    let scale_x = if transform.flip_horizontal { -1.0 } else { 1.0 };
    let scale_y = if transform.flip_vertical { -1.0 } else { 1.0 };

    let src_cx = source.width as f64 / 2.0;
    let src_cy = source.height as f64 / 2.0;
    let dst_cx = canvas_w as f64 / 2.0;
    let dst_cy = canvas_h as f64 / 2.0;

    log::debug!(
        "rendering {}x{} source onto {}x{} canvas (rotation {}, flip h={} v={})",
        source.width,
        source.height,
        canvas_w,
        canvas_h,
        transform.rotation_degrees,
        transform.flip_horizontal,
        transform.flip_vertical
    );

    let mut output = vec![0u8; PixelBuffer::expected_len(canvas_w, canvas_h)];

    for y in 0..canvas_h {
        let vy = y as f64 + 0.5 - dst_cy;
        for x in 0..canvas_w {
            let vx = x as f64 + 0.5 - dst_cx;

            // Undo rotation, then undo flips
            let ux = basis.cos * vx + basis.sin * vy;
            let uy = -basis.sin * vx + basis.cos * vy;
            let sx = scale_x * ux + src_cx;
            let sy = scale_y * uy + src_cy;

            let pixel = if basis.quarter_turn {
                sample_nearest(source, sx, sy)
            } else {
                sample_bilinear(source, sx, sy)
            };

            let idx = (y as usize * canvas_w as usize + x as usize) * CHANNELS;
            output[idx..idx + CHANNELS].copy_from_slice(&pixel);
        }
    }

    PixelBuffer::new(canvas_w, canvas_h, output)
}
