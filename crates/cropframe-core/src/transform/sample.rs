//! Rotation basis and pixel sampling for inverse mapping.
//!
//! Rendering walks the destination canvas and asks, for each pixel centre,
//! which source location lands there. For rotation by θ (clockwise on a
//! y-down canvas) followed by the inverse flip scale `S`:
//!
//! ```text
//! u_x =  (dst_x - cx) * cos θ + (dst_y - cy) * sin θ
//! u_y = -(dst_x - cx) * sin θ + (dst_y - cy) * cos θ
//! src  = S * u + src_centre
//! ```

use super::state::quarter_turns;
use crate::decode::{PixelBuffer, CHANNELS};

const TRANSPARENT: [u8; 4] = [0, 0, 0, 0];

/// Cosine and sine of a rotation angle.
///
/// Multiples of 90 degrees (within the tolerance of [`quarter_turns`]) use exact
/// `{-1, 0, 1}` values so quarter turns map pixel centres onto pixel centres
/// without drift.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct RotationBasis {
    pub cos: f64,
    pub sin: f64,
    pub quarter_turn: bool,
}

impl RotationBasis {
    pub fn from_degrees(degrees: f64) -> Self {
        if let Some(turns) = quarter_turns(degrees) {
            let (cos, sin) = match turns.rem_euclid(4) {
                0 => (1.0, 0.0),
                1 => (0.0, 1.0),
                2 => (-1.0, 0.0),
                _ => (0.0, -1.0),
            };
            return Self {
                cos,
                sin,
                quarter_turn: true,
            };
        }

        let radians = degrees * std::f64::consts::PI / 180.0;
        Self {
            cos: radians.cos(),
            sin: radians.sin(),
            quarter_turn: false,
        }
    }
}

/// Pixel whose area contains `(x, y)`, or transparent outside the image.
#[inline]
pub(crate) fn sample_nearest(image: &PixelBuffer, x: f64, y: f64) -> [u8; 4] {
    if x < 0.0 || y < 0.0 || x >= image.width as f64 || y >= image.height as f64 {
        return TRANSPARENT;
    }
    image.pixel(x as u32, y as u32)
}

/// Bilinear sample at continuous position `(x, y)`, where pixel `(i, j)`
/// covers `[i, i + 1) x [j, j + 1)` and its value sits at the centre.
///
/// Positions outside the image area are transparent. Within the outer half
/// pixel the edge pixels are extended.
pub(crate) fn sample_bilinear(image: &PixelBuffer, x: f64, y: f64) -> [u8; 4] {
    let (w, h) = (image.width as f64, image.height as f64);
    if x < 0.0 || y < 0.0 || x >= w || y >= h {
        return TRANSPARENT;
    }

    // Shift to pixel-centre coordinates
    let cx = x - 0.5;
    let cy = y - 0.5;

    let x0f = cx.floor();
    let y0f = cy.floor();
    let fx = cx - x0f;
    let fy = cy - y0f;

    let max_x = image.width as i64 - 1;
    let max_y = image.height as i64 - 1;
    let x0 = (x0f as i64).clamp(0, max_x) as usize;
    let x1 = (x0f as i64 + 1).clamp(0, max_x) as usize;
    let y0 = (y0f as i64).clamp(0, max_y) as usize;
    let y1 = (y0f as i64 + 1).clamp(0, max_y) as usize;

    let p00 = channels(image, x0, y0);
    let p10 = channels(image, x1, y0);
    let p01 = channels(image, x0, y1);
    let p11 = channels(image, x1, y1);

    let mut result = [0u8; 4];
    for i in 0..CHANNELS {
        let v = p00[i] * (1.0 - fx) * (1.0 - fy)
            + p10[i] * fx * (1.0 - fy)
            + p01[i] * (1.0 - fx) * fy
            + p11[i] * fx * fy;
        result[i] = v.clamp(0.0, 255.0).round() as u8;
    }
    result
}

#[inline]
fn channels(image: &PixelBuffer, px: usize, py: usize) -> [f64; 4] {
    let idx = (py * image.width as usize + px) * CHANNELS;
    [
        image.pixels[idx] as f64,
        image.pixels[idx + 1] as f64,
        image.pixels[idx + 2] as f64,
        image.pixels[idx + 3] as f64,
    ]
}
