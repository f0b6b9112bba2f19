//! Image encoding for committed edits.
//!
//! This module provides functionality for:
//! - Encoding RGBA pixel buffers to JPEG (alpha dropped) or PNG
//! - Mapping MIME types to export formats
//!
//! # Examples
//!
//! ```ignore
//! use cropframe_core::encode::{encode, OutputFormat};
//!
//! let bytes = encode(&buffer, OutputFormat::Jpeg, 0.95).unwrap();
//! println!("Encoded {} bytes", bytes.len());
//! ```

mod encoder;
mod format;

pub use encoder::{encode, jpeg_quality, EncodeError};
pub use format::OutputFormat;
