//! Fitting an image into its container ("object-fit: contain").
//!
//! The displayed image keeps the natural aspect ratio, is as large as the
//! container allows, and is centered on the axis with slack.

use serde::{Deserialize, Serialize};

use super::{Dimensions, GeometryError, Point, Rect};

/// How a source image of `natural_size` is laid out inside `container_size`.
///
/// Always produced whole by [`compute_display_mapping`]; `display_size` and
/// `offset` are never updated independently.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DisplayMapping {
    pub natural_size: Dimensions,
    pub container_size: Dimensions,
    pub display_size: Dimensions,
    pub offset: Point,
}

impl DisplayMapping {
    /// The displayed image area in display coordinates.
    pub fn bounds(&self) -> Rect {
        Rect::new(
            self.offset.x,
            self.offset.y,
            self.display_size.width,
            self.display_size.height,
        )
    }

    /// Source pixels per display unit along x.
    pub fn scale_x(&self) -> f64 {
        self.natural_size.width / self.display_size.width
    }

    /// Source pixels per display unit along y.
    pub fn scale_y(&self) -> f64 {
        self.natural_size.height / self.display_size.height
    }
}

/// Compute the display size and offset of an image inside a container.
///
/// # Errors
///
/// Returns [`GeometryError::InvalidDimensions`] if any component of either
/// size is zero, negative or not finite.
pub fn compute_display_mapping(
    natural_size: Dimensions,
    container_size: Dimensions,
) -> Result<DisplayMapping, GeometryError> {
    for dims in [natural_size, container_size] {
        if !dims.is_valid() {
            return Err(GeometryError::InvalidDimensions {
                width: dims.width,
                height: dims.height,
            });
        }
    }

    let image_ratio = natural_size.aspect_ratio();
    let container_ratio = container_size.aspect_ratio();

    let display_size = if image_ratio > container_ratio {
        // Wider than the container: width-bound
        Dimensions::new(container_size.width, container_size.width / image_ratio)
    } else {
        Dimensions::new(container_size.height * image_ratio, container_size.height)
    };

    let offset = Point::new(
        (container_size.width - display_size.width) / 2.0,
        (container_size.height - display_size.height) / 2.0,
    );

    log::debug!(
        "display mapping: natural {}x{} in {}x{} -> {}x{} at ({}, {})",
        natural_size.width,
        natural_size.height,
        container_size.width,
        container_size.height,
        display_size.width,
        display_size.height,
        offset.x,
        offset.y
    );

    Ok(DisplayMapping {
        natural_size,
        container_size,
        display_size,
        offset,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dims(w: f64, h: f64) -> Dimensions {
        Dimensions::new(w, h)
    }

    #[test]
    fn test_wide_image_in_square_container() {
        let m = compute_display_mapping(dims(1000.0, 500.0), dims(400.0, 400.0)).unwrap();
        assert_eq!(m.display_size, dims(400.0, 200.0));
        assert_eq!(m.offset, Point::new(0.0, 100.0));
        assert!((m.scale_x() - 2.5).abs() < 1e-12);
        assert!((m.scale_y() - 2.5).abs() < 1e-12);
    }

    #[test]
    fn test_tall_image_in_wide_container() {
        let m = compute_display_mapping(dims(300.0, 600.0), dims(800.0, 400.0)).unwrap();
        assert_eq!(m.display_size, dims(200.0, 400.0));
        assert_eq!(m.offset, Point::new(300.0, 0.0));
    }

    #[test]
    fn test_same_ratio_fills_container() {
        let m = compute_display_mapping(dims(1600.0, 900.0), dims(320.0, 180.0)).unwrap();
        assert_eq!(m.display_size, dims(320.0, 180.0));
        assert_eq!(m.offset, Point::new(0.0, 0.0));
    }

    #[test]
    fn test_small_image_is_upscaled() {
        let m = compute_display_mapping(dims(10.0, 10.0), dims(200.0, 100.0)).unwrap();
        assert_eq!(m.display_size, dims(100.0, 100.0));
        assert_eq!(m.offset, Point::new(50.0, 0.0));
    }

    #[test]
    fn test_bounds() {
        let m = compute_display_mapping(dims(1000.0, 500.0), dims(400.0, 400.0)).unwrap();
        let b = m.bounds();
        assert_eq!(b, Rect::new(0.0, 100.0, 400.0, 200.0));
    }

    #[test]
    fn test_rejects_zero_natural_size() {
        let err = compute_display_mapping(dims(0.0, 500.0), dims(400.0, 400.0)).unwrap_err();
        assert!(matches!(err, GeometryError::InvalidDimensions { .. }));
    }

    #[test]
    fn test_rejects_negative_container() {
        let err = compute_display_mapping(dims(10.0, 10.0), dims(400.0, -1.0)).unwrap_err();
        assert!(matches!(err, GeometryError::InvalidDimensions { .. }));
    }

    #[test]
    fn test_rejects_nan() {
        assert!(compute_display_mapping(dims(f64::NAN, 10.0), dims(400.0, 400.0)).is_err());
    }

    #[test]
    fn test_deterministic() {
        let a = compute_display_mapping(dims(1234.0, 567.0), dims(333.3, 222.2)).unwrap();
        let b = compute_display_mapping(dims(1234.0, 567.0), dims(333.3, 222.2)).unwrap();
        assert_eq!(a, b);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn size_strategy() -> impl Strategy<Value = Dimensions> {
        (1.0f64..=8000.0, 1.0f64..=8000.0).prop_map(|(w, h)| Dimensions::new(w, h))
    }

    proptest! {
        /// Property: The displayed image keeps the natural aspect ratio.
        #[test]
        fn prop_aspect_ratio_preserved(natural in size_strategy(), container in size_strategy()) {
            let m = compute_display_mapping(natural, container).unwrap();
            let expected = natural.aspect_ratio();
            let actual = m.display_size.aspect_ratio();
            prop_assert!(
                ((actual - expected) / expected).abs() < 1e-9,
                "ratio {} vs {}", actual, expected
            );
        }

        /// Property: The displayed image fits inside the container.
        #[test]
        fn prop_display_fits_container(natural in size_strategy(), container in size_strategy()) {
            let m = compute_display_mapping(natural, container).unwrap();
            prop_assert!(m.display_size.width <= container.width * (1.0 + 1e-12));
            prop_assert!(m.display_size.height <= container.height * (1.0 + 1e-12));
            prop_assert!(m.offset.x >= -1e-9);
            prop_assert!(m.offset.y >= -1e-9);
        }

        /// Property: One axis always fills the container exactly.
        #[test]
        fn prop_one_axis_fills(natural in size_strategy(), container in size_strategy()) {
            let m = compute_display_mapping(natural, container).unwrap();
            prop_assert!(
                m.display_size.width == container.width
                    || m.display_size.height == container.height
            );
        }

        /// Property: The image is centered in the container.
        #[test]
        fn prop_centered(natural in size_strategy(), container in size_strategy()) {
            let m = compute_display_mapping(natural, container).unwrap();
            let right_gap = container.width - (m.offset.x + m.display_size.width);
            let bottom_gap = container.height - (m.offset.y + m.display_size.height);
            prop_assert!((right_gap - m.offset.x).abs() < 1e-6);
            prop_assert!((bottom_gap - m.offset.y).abs() < 1e-6);
        }
    }
}
