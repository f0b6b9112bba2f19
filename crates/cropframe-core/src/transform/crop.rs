//! Pixel-rectangle extraction.
//!
//! Crop rectangles arrive in working-canvas pixels. They are intersected with
//! the canvas first, so a rectangle computed against the unrotated source
//! can still be applied after a quarter turn; only the part that overlaps
//! survives.

use crate::decode::{PixelBuffer, CHANNELS};
use crate::geometry::CropRectSource;

/// Intersect `rect` with a `width x height` canvas.
///
/// Returns `None` when nothing of `rect` overlaps the canvas.
pub fn clamp_to_canvas(rect: CropRectSource, width: u32, height: u32) -> Option<CropRectSource> {
    let x0 = rect.x.min(width);
    let y0 = rect.y.min(height);
    let x1 = rect.x.saturating_add(rect.width).min(width);
    let y1 = rect.y.saturating_add(rect.height).min(height);

    if x1 <= x0 || y1 <= y0 {
        return None;
    }
    Some(CropRectSource::new(x0, y0, x1 - x0, y1 - y0))
}

/// Copy the pixels under `rect` into a new buffer.
///
/// The rectangle is clamped to the image first; `None` means the clamped
/// rectangle is empty.
///
/// # Example
///
/// ```
/// use cropframe_core::decode::PixelBuffer;
/// use cropframe_core::geometry::CropRectSource;
/// use cropframe_core::transform::crop_pixels;
///
/// let image = PixelBuffer::transparent(100, 100);
/// let cropped = crop_pixels(&image, CropRectSource::new(25, 25, 50, 50)).unwrap();
/// assert_eq!((cropped.width, cropped.height), (50, 50));
/// ```
pub fn crop_pixels(image: &PixelBuffer, rect: CropRectSource) -> Option<PixelBuffer> {
    let rect = clamp_to_canvas(rect, image.width, image.height)?;
    Some(copy_region(image, rect))
}

/// Row-wise copy of a rectangle already known to lie inside `image`.
pub(crate) fn copy_region(image: &PixelBuffer, rect: CropRectSource) -> PixelBuffer {
    // Fast path: full canvas
    if rect.x == 0 && rect.y == 0 && rect.width == image.width && rect.height == image.height {
        return image.clone();
    }

    let src_stride = image.width as usize * CHANNELS;
    let row_len = rect.width as usize * CHANNELS;
    let mut output = Vec::with_capacity(row_len * rect.height as usize);

    for y in rect.y..rect.y + rect.height {
        let start = y as usize * src_stride + rect.x as usize * CHANNELS;
        output.extend_from_slice(&image.pixels[start..start + row_len]);
    }

    PixelBuffer::new(rect.width, rect.height, output)
}
