//! Cropframe Core - crop and transform engine
//!
//! This crate provides the core of an interactive image crop/rotate/flip
//! editor: crop-box geometry against an object-fit display, rendering of a
//! pixel buffer through rotation, flips and crop, plus decode and encode
//! helpers at the image boundary.
//!
//! Everything here is synchronous and single-threaded; one
//! [`EditSession`] (or one [`GeometryEngine`]) serves one editor.

pub mod config;
pub mod decode;
pub mod encode;
pub mod geometry;
pub mod session;
pub mod transform;

use thiserror::Error;

pub use config::{ConfigError, EditorConfig};
pub use decode::{decode_image, DecodeError, PixelBuffer};
pub use encode::{encode, EncodeError, OutputFormat};
pub use geometry::{
    CropBox, CropRectSource, Dimensions, DisplayMapping, GeometryEngine, GeometryError,
    InteractionState, Point, PointerTarget, ResizeHandle,
};
pub use session::{CommittedImage, EditMode, EditSession};
pub use transform::{render, CompositeError, CropOutcome, RenderOutput, TransformState};

/// Any error an editing session can report.
#[derive(Debug, Error)]
pub enum EditorError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Composite(#[from] CompositeError),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Encode(#[from] EncodeError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Crop mode was requested before the display container size is known.
    #[error("No crop area: the display container size is not known yet")]
    NoCropArea,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_conversion_keeps_message() {
        let err: EditorError = GeometryError::InvalidDimensions {
            width: -1.0,
            height: 2.0,
        }
        .into();
        assert_eq!(
            err.to_string(),
            "Invalid dimensions: -1x2 (both must be positive)"
        );
        assert!(matches!(err, EditorError::Geometry(_)));
    }

    #[test]
    fn test_no_crop_area_message() {
        assert_eq!(
            EditorError::NoCropArea.to_string(),
            "No crop area: the display container size is not known yet"
        );
    }

    #[test]
    fn test_decode_error_converts() {
        let err: EditorError = decode_image(&[0u8, 1, 2, 3]).unwrap_err().into();
        assert!(matches!(err, EditorError::Decode(_)));
    }
}
