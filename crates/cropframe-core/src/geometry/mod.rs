//! Crop geometry: display mapping, crop-box editing and projection.
//!
//! This module keeps an interactively edited crop rectangle valid with
//! respect to the displayed image and translates it into source pixels.
//!
//! # Coordinate Spaces
//!
//! - **Display space**: container pixels, origin at the container's top-left.
//!   The image occupies `[offset, offset + display_size]`.
//! - **Source space**: integer pixels of the image being cropped, origin at
//!   its top-left.
//!
//! # Error Policy
//!
//! Only load-time shape violations are reported (zero or negative sizes).
//! Interactive edits never fail; they clamp.

mod crop_box;
mod engine;
mod mapping;
mod projection;
mod types;

use thiserror::Error;

pub use crop_box::{
    fit_crop_box, hit_test, initialize_crop_box, initialize_crop_box_with_ratio, move_crop_box,
    resize_crop_box, resize_crop_box_with_min, PointerTarget, ResizeHandle,
};
pub use engine::{GeometryEngine, InteractionState};
pub use mapping::{compute_display_mapping, DisplayMapping};
pub use projection::project_to_source_space;
pub use types::{CropBox, CropRectSource, Delta, Dimensions, Point, Rect};

/// Smallest crop box side, in display units.
pub const MIN_CROP_SIZE: f64 = 50.0;

/// Side of the initial crop square relative to the shorter displayed side.
pub const INITIAL_CROP_RATIO: f64 = 0.8;

/// Errors reported by geometry operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    /// A width or height was zero, negative or not finite.
    #[error("Invalid dimensions: {width}x{height} (both must be positive)")]
    InvalidDimensions { width: f64, height: f64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geometry_error_display() {
        let err = GeometryError::InvalidDimensions {
            width: 0.0,
            height: 10.0,
        };
        assert_eq!(
            err.to_string(),
            "Invalid dimensions: 0x10 (both must be positive)"
        );
    }
}
