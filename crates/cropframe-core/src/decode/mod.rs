//! Image decoding for the image source provider.
//!
//! This module provides functionality for:
//! - Decoding JPEG and PNG bytes into RGBA [`PixelBuffer`]s
//! - Applying EXIF orientation the way browsers do for displayed images
//!
//! # Examples
//!
//! ```ignore
//! use cropframe_core::decode::decode_image;
//!
//! let bytes = std::fs::read("photo.jpg").unwrap();
//! let image = decode_image(&bytes).unwrap();
//! println!("Decoded {}x{} image", image.width, image.height);
//! ```

mod decoder;
mod types;

pub use decoder::{decode_image, get_orientation};
pub use types::{DecodeError, Orientation, PixelBuffer, CHANNELS};
