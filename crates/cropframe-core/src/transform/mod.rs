//! Image transformation: rotation, flips and cropping of pixel buffers.
//!
//! # Transform Order
//!
//! A render applies, in this order:
//! 1. Flips, in the image's own frame
//! 2. Rotation about the image centre, onto a canvas whose axes are swapped
//!    for any angle that is not a multiple of 180 degrees
//! 3. Crop, in canvas pixels
//!
//! # Coordinate System
//!
//! - Rotation angles are in degrees, positive = clockwise on screen
//! - Crop rectangles are integer pixels of the working canvas
//! - Origin is top-left corner

mod composite;
mod crop;
mod sample;
mod state;

pub use composite::{render, CompositeError, CropOutcome, RenderOutput};
pub use crop::{clamp_to_canvas, crop_pixels};
pub use state::TransformState;
