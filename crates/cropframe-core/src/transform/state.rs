//! Rotation and flip parameters for one editing session.

use serde::{Deserialize, Serialize};

use crate::geometry::Dimensions;

/// Tolerance for treating an angle as a whole number of quarter turns.
const QUARTER_TURN_EPSILON: f64 = 1e-9;

/// Whole quarter turns in `degrees`, or `None` for any other angle.
///
/// Canvas sizing and sampling both go through this, so they always agree on
/// which angles are quarter turns.
pub(crate) fn quarter_turns(degrees: f64) -> Option<i64> {
    let turns = degrees / 90.0;
    let nearest = turns.round();
    ((turns - nearest).abs() < QUARTER_TURN_EPSILON).then_some(nearest as i64)
}

/// Rotation and flip settings.
///
/// Reset to identity whenever a new source image is loaded or the user
/// resets; otherwise changed only by quarter turns, flip toggles or the
/// rotation slider.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TransformState {
    /// Clockwise rotation in degrees, in `[0, 360]`.
    pub rotation_degrees: f64,
    pub flip_horizontal: bool,
    pub flip_vertical: bool,
}

impl TransformState {
    pub fn new(rotation_degrees: f64, flip_horizontal: bool, flip_vertical: bool) -> Self {
        Self {
            rotation_degrees,
            flip_horizontal,
            flip_vertical,
        }
    }

    /// Rotate 90 degrees clockwise, wrapping at 360.
    pub fn rotate_clockwise(&mut self) {
        self.rotation_degrees = (self.rotation_degrees + 90.0) % 360.0;
    }

    /// Rotate 90 degrees counter-clockwise, wrapping at 0.
    pub fn rotate_counter_clockwise(&mut self) {
        self.rotation_degrees = (self.rotation_degrees - 90.0 + 360.0) % 360.0;
    }

    /// Set the rotation from the continuous slider.
    ///
    /// Values are clamped to `[0, 360]` and values within rounding error of
    /// a quarter turn snap to it. Non-finite values are ignored and `false`
    /// is returned.
    pub fn set_rotation(&mut self, degrees: f64) -> bool {
        if !degrees.is_finite() {
            log::warn!("ignoring non-finite rotation {degrees}");
            return false;
        }
        let clamped = degrees.clamp(0.0, 360.0);
        self.rotation_degrees = match quarter_turns(clamped) {
            Some(turns) => turns as f64 * 90.0,
            None => clamped,
        };
        true
    }

    pub fn toggle_flip_horizontal(&mut self) {
        self.flip_horizontal = !self.flip_horizontal;
    }

    pub fn toggle_flip_vertical(&mut self) {
        self.flip_vertical = !self.flip_vertical;
    }

    /// Back to no rotation and no flips.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// True when rendering with this state reproduces the source.
    pub fn is_identity(&self) -> bool {
        quarter_turns(self.rotation_degrees).is_some_and(|turns| turns.rem_euclid(4) == 0)
            && !self.flip_horizontal
            && !self.flip_vertical
    }

    /// True when the working canvas swaps the source axes
    /// (`rotation mod 180 != 0`).
    pub fn swaps_axes(&self) -> bool {
        match quarter_turns(self.rotation_degrees) {
            Some(turns) => turns.rem_euclid(2) == 1,
            None => true,
        }
    }

    /// Size of the working canvas for a source of `natural` size.
    pub fn working_size(&self, natural: Dimensions) -> Dimensions {
        if self.swaps_axes() {
            natural.transposed()
        } else {
            natural
        }
    }

    /// Working canvas size in whole pixels.
    pub fn working_pixels(&self, width: u32, height: u32) -> (u32, u32) {
        if self.swaps_axes() {
            (height, width)
        } else {
            (width, height)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_identity() {
        let t = TransformState::default();
        assert!(t.is_identity());
        assert_eq!(t.rotation_degrees, 0.0);
    }

    #[test]
    fn test_rotate_clockwise_wraps() {
        let mut t = TransformState::default();
        for expected in [90.0, 180.0, 270.0, 0.0] {
            t.rotate_clockwise();
            assert_eq!(t.rotation_degrees, expected);
        }
    }

    #[test]
    fn test_rotate_counter_clockwise_wraps() {
        let mut t = TransformState::default();
        for expected in [270.0, 180.0, 90.0, 0.0] {
            t.rotate_counter_clockwise();
            assert_eq!(t.rotation_degrees, expected);
        }
    }

    #[test]
    fn test_quarter_turns_from_slider_value() {
        let mut t = TransformState::default();
        t.set_rotation(37.0);
        t.rotate_clockwise();
        assert_eq!(t.rotation_degrees, 127.0);
        t.rotate_counter_clockwise();
        t.rotate_counter_clockwise();
        assert_eq!(t.rotation_degrees, 307.0);
    }

    #[test]
    fn test_rotate_clockwise_from_360() {
        let mut t = TransformState::default();
        t.set_rotation(360.0);
        t.rotate_clockwise();
        assert_eq!(t.rotation_degrees, 90.0);
    }

    #[test]
    fn test_set_rotation_clamps() {
        let mut t = TransformState::default();
        assert!(t.set_rotation(400.0));
        assert_eq!(t.rotation_degrees, 360.0);
        assert!(t.set_rotation(-5.0));
        assert_eq!(t.rotation_degrees, 0.0);
    }

    #[test]
    fn test_set_rotation_ignores_nan() {
        let mut t = TransformState::default();
        t.set_rotation(45.0);
        assert!(!t.set_rotation(f64::NAN));
        assert_eq!(t.rotation_degrees, 45.0);
    }

    #[test]
    fn test_flip_toggles() {
        let mut t = TransformState::default();
        t.toggle_flip_horizontal();
        assert!(t.flip_horizontal);
        assert!(!t.is_identity());
        t.toggle_flip_horizontal();
        t.toggle_flip_vertical();
        assert!(!t.flip_horizontal);
        assert!(t.flip_vertical);
    }

    #[test]
    fn test_reset() {
        let mut t = TransformState::new(90.0, true, true);
        t.reset();
        assert_eq!(t, TransformState::default());
    }

    #[test]
    fn test_360_is_identity() {
        assert!(TransformState::new(360.0, false, false).is_identity());
    }

    #[test]
    fn test_working_size() {
        let natural = Dimensions::new(1000.0, 500.0);
        assert_eq!(TransformState::new(0.0, false, false).working_size(natural), natural);
        assert_eq!(
            TransformState::new(90.0, false, false).working_size(natural),
            Dimensions::new(500.0, 1000.0)
        );
        assert_eq!(TransformState::new(180.0, true, false).working_size(natural), natural);
        assert_eq!(TransformState::new(360.0, false, false).working_size(natural), natural);
        // Any angle that is not a multiple of 180 swaps
        assert_eq!(TransformState::new(37.0, false, false).working_pixels(10, 4), (4, 10));
    }

    #[test]
    fn test_near_quarter_turn_is_a_quarter_turn() {
        // Canvas sizing treats these the same way sampling does
        let t = TransformState::new(180.0 + 1e-10, false, false);
        assert!(!t.swaps_axes());
        assert_eq!(t.working_pixels(10, 4), (10, 4));
        assert!(TransformState::new(90.0 - 1e-10, false, false).swaps_axes());
        assert!(TransformState::new(360.0 - 1e-10, false, false).is_identity());
        assert!(TransformState::new(0.5, false, false).swaps_axes());
    }

    #[test]
    fn test_quarter_turns() {
        assert_eq!(quarter_turns(0.0), Some(0));
        assert_eq!(quarter_turns(270.0), Some(3));
        assert_eq!(quarter_turns(-90.0), Some(-1));
        assert_eq!(quarter_turns(180.0 + 1e-10), Some(2));
        assert_eq!(quarter_turns(37.0), None);
        assert_eq!(quarter_turns(f64::NAN), None);
    }

    #[test]
    fn test_set_rotation_snaps_near_quarter_turns() {
        let mut t = TransformState::default();
        t.set_rotation(90.0 + 1e-12);
        assert_eq!(t.rotation_degrees, 90.0);
        t.set_rotation(90.5);
        assert_eq!(t.rotation_degrees, 90.5);
    }
}
