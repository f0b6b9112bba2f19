//! Display-space to source-pixel projection.

use super::{CropBox, CropRectSource, DisplayMapping};

/// Project a display-space crop box onto source pixels.
///
/// Coordinates are scaled by `natural / display` per axis and rounded only
/// at the end. The result is clamped so it lies inside
/// `[0, 0] - [natural_width, natural_height]` for any input box, including
/// ones that straddle the image edge after floating-point rounding.
///
/// # Example
///
/// ```ignore
/// let mapping = compute_display_mapping(
///     Dimensions::new(1000.0, 500.0),
///     Dimensions::new(400.0, 400.0),
/// )?;
/// let rect = project_to_source_space(&CropBox::new(120.0, 120.0, 160.0, 160.0), &mapping);
/// assert_eq!(rect, CropRectSource::new(300, 50, 400, 400));
/// ```
pub fn project_to_source_space(crop_box: &CropBox, mapping: &DisplayMapping) -> CropRectSource {
    let scale_x = mapping.scale_x();
    let scale_y = mapping.scale_y();

    let natural_w = mapping.natural_size.width.round().max(0.0);
    let natural_h = mapping.natural_size.height.round().max(0.0);

    let (x, width) = project_axis(
        crop_box.position.x - mapping.offset.x,
        crop_box.size.width,
        scale_x,
        natural_w,
    );
    let (y, height) = project_axis(
        crop_box.position.y - mapping.offset.y,
        crop_box.size.height,
        scale_y,
        natural_h,
    );

    CropRectSource {
        x,
        y,
        width,
        height,
    }
}

/// Scale one axis and clamp it to `[0, limit]`.
fn project_axis(relative_start: f64, len: f64, scale: f64, limit: f64) -> (u32, u32) {
    // NaN collapses to 0 through max/min
    let start = (relative_start * scale).round().max(0.0).min(limit);
    let len = (len * scale).round().min(limit - start).max(0.0);
    (to_pixel(start), to_pixel(len))
}

#[inline]
fn to_pixel(value: f64) -> u32 {
    value.min(u32::MAX as f64) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{compute_display_mapping, initialize_crop_box, Dimensions};

    fn wide_mapping() -> DisplayMapping {
        compute_display_mapping(Dimensions::new(1000.0, 500.0), Dimensions::new(400.0, 400.0))
            .unwrap()
    }

    #[test]
    fn test_initial_box_projection() {
        let m = wide_mapping();
        let b = initialize_crop_box(&m);
        let r = project_to_source_space(&b, &m);
        // 120 * 2.5 = 300, (120 - 100) * 2.5 = 50, 160 * 2.5 = 400
        assert_eq!(r, CropRectSource::new(300, 50, 400, 400));
    }

    #[test]
    fn test_full_image_projection() {
        let m = wide_mapping();
        let r = project_to_source_space(&CropBox::new(0.0, 100.0, 400.0, 200.0), &m);
        assert_eq!(r, CropRectSource::new(0, 0, 1000, 500));
    }

    #[test]
    fn test_clamps_box_left_of_image() {
        let m = wide_mapping();
        let r = project_to_source_space(&CropBox::new(-10.0, 90.0, 100.0, 100.0), &m);
        assert_eq!(r.x, 0);
        assert_eq!(r.y, 0);
    }

    #[test]
    fn test_clamps_width_at_right_edge() {
        let m = wide_mapping();
        let r = project_to_source_space(&CropBox::new(300.0, 100.0, 200.0, 200.0), &m);
        assert_eq!(r.x, 750);
        assert_eq!(r.width, 250);
        assert_eq!(r.height, 500);
    }

    #[test]
    fn test_box_entirely_past_image() {
        let m = wide_mapping();
        let r = project_to_source_space(&CropBox::new(900.0, 900.0, 60.0, 60.0), &m);
        assert_eq!(r.x, 1000);
        assert_eq!(r.y, 500);
        assert!(r.is_empty());
    }

    #[test]
    fn test_rounding_happens_at_the_end() {
        // 3x3 source shown at 7x7: scale 3/7
        let m = compute_display_mapping(Dimensions::new(3.0, 3.0), Dimensions::new(7.0, 7.0))
            .unwrap();
        let r = project_to_source_space(&CropBox::new(3.5, 3.5, 3.5, 3.5), &m);
        // 3.5 * 3/7 = 1.5 rounds to 2
        assert_eq!(r.x, 2);
        assert_eq!(r.width, 1);
    }
}
