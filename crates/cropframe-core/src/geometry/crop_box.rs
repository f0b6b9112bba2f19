//! Crop box creation, movement and corner resizing.
//!
//! Every operation takes the current box by value and returns a new,
//! validated one. Interactive edits never fail: out-of-range input is
//! absorbed by clamping against the displayed image bounds.
//!
//! # Resize contract
//!
//! Resizing from a corner moves only the two sides adjacent to that corner.
//! The opposite corner is pinned. When a resize would push an edge outside
//! the image, the offending dimension is shrunk; the box is never shifted.

use serde::{Deserialize, Serialize};

use super::{
    CropBox, Delta, Dimensions, DisplayMapping, Point, INITIAL_CROP_RATIO, MIN_CROP_SIZE,
};

/// The corner being dragged during a resize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResizeHandle {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl ResizeHandle {
    pub const ALL: [ResizeHandle; 4] = [
        ResizeHandle::TopLeft,
        ResizeHandle::TopRight,
        ResizeHandle::BottomLeft,
        ResizeHandle::BottomRight,
    ];

    /// Location of this handle on `crop_box`.
    pub fn anchor(self, crop_box: &CropBox) -> Point {
        match self {
            ResizeHandle::TopLeft => crop_box.top_left(),
            ResizeHandle::TopRight => crop_box.top_right(),
            ResizeHandle::BottomLeft => crop_box.bottom_left(),
            ResizeHandle::BottomRight => crop_box.bottom_right(),
        }
    }

    /// The corner that stays fixed while this handle is dragged.
    pub fn opposite(self) -> ResizeHandle {
        match self {
            ResizeHandle::TopLeft => ResizeHandle::BottomRight,
            ResizeHandle::TopRight => ResizeHandle::BottomLeft,
            ResizeHandle::BottomLeft => ResizeHandle::TopRight,
            ResizeHandle::BottomRight => ResizeHandle::TopLeft,
        }
    }

    fn moves_left_edge(self) -> bool {
        matches!(self, ResizeHandle::TopLeft | ResizeHandle::BottomLeft)
    }

    fn moves_top_edge(self) -> bool {
        matches!(self, ResizeHandle::TopLeft | ResizeHandle::TopRight)
    }
}

impl std::str::FromStr for ResizeHandle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "top-left" => Ok(ResizeHandle::TopLeft),
            "top-right" => Ok(ResizeHandle::TopRight),
            "bottom-left" => Ok(ResizeHandle::BottomLeft),
            "bottom-right" => Ok(ResizeHandle::BottomRight),
            other => Err(format!("unknown resize handle: {other}")),
        }
    }
}

/// What a pointer-down landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PointerTarget {
    /// Inside the box, away from the handles.
    Body,
    Handle(ResizeHandle),
}

/// Create the initial crop box for a freshly loaded image.
///
/// A centered square whose side is [`INITIAL_CROP_RATIO`] of the shorter
/// displayed side.
pub fn initialize_crop_box(mapping: &DisplayMapping) -> CropBox {
    initialize_crop_box_with_ratio(mapping, INITIAL_CROP_RATIO)
}

/// [`initialize_crop_box`] with an explicit side ratio.
pub fn initialize_crop_box_with_ratio(mapping: &DisplayMapping, ratio: f64) -> CropBox {
    let display = mapping.display_size;
    let side = display.width.min(display.height) * ratio;
    let x = mapping.offset.x + (display.width - side) / 2.0;
    let y = mapping.offset.y + (display.height - side) / 2.0;
    CropBox::new(x, y, side, side)
}

/// Translate the box by `delta`, keeping it inside the displayed image.
///
/// If the box is wider (or taller) than the displayed image it is pinned to
/// the image's left (or top) edge; its size is left alone.
pub fn move_crop_box(current: CropBox, delta: Delta, mapping: &DisplayMapping) -> CropBox {
    let bounds = mapping.bounds();
    let x = clamp_start(
        current.position.x + delta.dx,
        bounds.x,
        bounds.right() - current.size.width,
    );
    let y = clamp_start(
        current.position.y + delta.dy,
        bounds.y,
        bounds.bottom() - current.size.height,
    );
    CropBox {
        position: Point::new(x, y),
        size: current.size,
    }
}

/// Resize the box by dragging `handle` by `delta`, with the default
/// [`MIN_CROP_SIZE`] floor.
pub fn resize_crop_box(
    current: CropBox,
    handle: ResizeHandle,
    delta: Delta,
    mapping: &DisplayMapping,
) -> CropBox {
    resize_crop_box_with_min(current, handle, delta, mapping, MIN_CROP_SIZE)
}

/// Resize the box by dragging `handle` by `delta`.
///
/// Sizes are floored at `min_size`, then shrunk so no edge leaves the
/// displayed image. The corner opposite `handle` does not move.
pub fn resize_crop_box_with_min(
    current: CropBox,
    handle: ResizeHandle,
    delta: Delta,
    mapping: &DisplayMapping,
    min_size: f64,
) -> CropBox {
    let bounds = mapping.bounds();

    let (x, width) = if handle.moves_left_edge() {
        resize_from_end(
            current.position.x + current.size.width,
            current.size.width - delta.dx,
            bounds.x,
            min_size,
        )
    } else {
        resize_from_start(
            current.position.x,
            current.size.width + delta.dx,
            bounds.right(),
            min_size,
        )
    };

    let (y, height) = if handle.moves_top_edge() {
        resize_from_end(
            current.position.y + current.size.height,
            current.size.height - delta.dy,
            bounds.y,
            min_size,
        )
    } else {
        resize_from_start(
            current.position.y,
            current.size.height + delta.dy,
            bounds.bottom(),
            min_size,
        )
    };

    CropBox::new(x, y, width, height)
}

/// Make an existing box valid for a (possibly new) mapping without
/// re-centering it.
///
/// Used when the container or the image shape changes under a box the user
/// already adjusted: the size is shrunk to fit the displayed image if needed,
/// then the position is clamped.
pub fn fit_crop_box(current: CropBox, mapping: &DisplayMapping) -> CropBox {
    let display = mapping.display_size;
    let sized = CropBox {
        position: current.position,
        size: Dimensions::new(
            current.size.width.min(display.width).max(0.0),
            current.size.height.min(display.height).max(0.0),
        ),
    };
    move_crop_box(sized, Delta::default(), mapping)
}

/// Find what a pointer at `point` would grab.
///
/// Handles win over the body, and are hit within `radius` of their corner
/// (including just outside the box).
pub fn hit_test(crop_box: &CropBox, point: Point, radius: f64) -> Option<PointerTarget> {
    let handle = ResizeHandle::ALL
        .into_iter()
        .map(|h| (h, h.anchor(crop_box).distance(point)))
        .filter(|(_, d)| *d <= radius)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(h, _)| h);

    if let Some(h) = handle {
        return Some(PointerTarget::Handle(h));
    }

    if crop_box.rect().contains(point) {
        return Some(PointerTarget::Body);
    }

    None
}

/// Clamp a start coordinate into `[min, max]`, preferring `min` when the
/// range is empty.
#[inline]
fn clamp_start(value: f64, min: f64, max: f64) -> f64 {
    value.min(max).max(min)
}

/// Start edge pinned; the far edge may not pass `limit`.
#[inline]
fn resize_from_start(start: f64, proposed: f64, limit: f64, min_size: f64) -> (f64, f64) {
    let len = proposed.max(min_size).min(limit - start).max(0.0);
    (start, len)
}

/// Far edge pinned at `end`; the start edge may not pass `limit`.
#[inline]
fn resize_from_end(end: f64, proposed: f64, limit: f64, min_size: f64) -> (f64, f64) {
    let len = proposed.max(min_size).min(end - limit).max(0.0);
    (end - len, len)
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::geometry::compute_display_mapping;
    use proptest::prelude::*;

    const EPS: f64 = 1e-6;

    #[derive(Debug, Clone, Copy)]
    enum Edit {
        Move(Delta),
        Resize(ResizeHandle, Delta),
    }

    fn mapping_strategy() -> impl Strategy<Value = DisplayMapping> {
        (
            100.0f64..=6000.0,
            100.0f64..=6000.0,
            200.0f64..=1200.0,
            200.0f64..=1200.0,
        )
            .prop_filter_map("display too small for min crop", |(nw, nh, cw, ch)| {
                let m = compute_display_mapping(Dimensions::new(nw, nh), Dimensions::new(cw, ch))
                    .ok()?;
                // The initial box must already satisfy the floor
                let shorter = m.display_size.width.min(m.display_size.height);
                (shorter * INITIAL_CROP_RATIO >= MIN_CROP_SIZE).then_some(m)
            })
    }

    fn delta_strategy() -> impl Strategy<Value = Delta> {
        (-2000.0f64..=2000.0, -2000.0f64..=2000.0).prop_map(|(dx, dy)| Delta::new(dx, dy))
    }

    fn handle_strategy() -> impl Strategy<Value = ResizeHandle> {
        prop_oneof![
            Just(ResizeHandle::TopLeft),
            Just(ResizeHandle::TopRight),
            Just(ResizeHandle::BottomLeft),
            Just(ResizeHandle::BottomRight),
        ]
    }

    fn edit_strategy() -> impl Strategy<Value = Edit> {
        prop_oneof![
            delta_strategy().prop_map(Edit::Move),
            (handle_strategy(), delta_strategy()).prop_map(|(h, d)| Edit::Resize(h, d)),
        ]
    }

    fn assert_valid(b: &CropBox, m: &DisplayMapping) -> Result<(), TestCaseError> {
        let bounds = m.bounds();
        prop_assert!(b.position.x >= bounds.x - EPS, "left {:?}", b);
        prop_assert!(b.position.y >= bounds.y - EPS, "top {:?}", b);
        prop_assert!(b.position.x + b.size.width <= bounds.right() + EPS, "right {:?}", b);
        prop_assert!(b.position.y + b.size.height <= bounds.bottom() + EPS, "bottom {:?}", b);
        prop_assert!(b.size.width >= MIN_CROP_SIZE - EPS, "width {:?}", b);
        prop_assert!(b.size.height >= MIN_CROP_SIZE - EPS, "height {:?}", b);
        Ok(())
    }

    proptest! {
        /// Property: Any sequence of edits keeps the box inside the image and
        /// above the minimum size.
        #[test]
        fn prop_edit_sequences_stay_valid(
            m in mapping_strategy(),
            edits in prop::collection::vec(edit_strategy(), 1..40),
        ) {
            let mut b = initialize_crop_box(&m);
            assert_valid(&b, &m)?;
            for edit in edits {
                b = match edit {
                    Edit::Move(d) => move_crop_box(b, d, &m),
                    Edit::Resize(h, d) => resize_crop_box(b, h, d, &m),
                };
                assert_valid(&b, &m)?;
            }
        }

        /// Property: Bottom-right resizing never moves the top-left corner.
        #[test]
        fn prop_bottom_right_pins_position(m in mapping_strategy(), d in delta_strategy()) {
            let start = initialize_crop_box(&m);
            let b = resize_crop_box(start, ResizeHandle::BottomRight, d, &m);
            prop_assert_eq!(b.position, start.position);
        }

        /// Property: Top-left resizing never moves the bottom-right corner.
        #[test]
        fn prop_top_left_pins_bottom_right(m in mapping_strategy(), d in delta_strategy()) {
            let start = initialize_crop_box(&m);
            let b = resize_crop_box(start, ResizeHandle::TopLeft, d, &m);
            let before = start.bottom_right();
            let after = b.bottom_right();
            prop_assert!((before.x - after.x).abs() < EPS);
            prop_assert!((before.y - after.y).abs() < EPS);
        }

        /// Property: Every handle pins its opposite corner.
        #[test]
        fn prop_opposite_corner_pinned(
            m in mapping_strategy(),
            h in handle_strategy(),
            d in delta_strategy(),
        ) {
            let start = initialize_crop_box(&m);
            let b = resize_crop_box(start, h, d, &m);
            let before = h.opposite().anchor(&start);
            let after = h.opposite().anchor(&b);
            prop_assert!((before.x - after.x).abs() < EPS);
            prop_assert!((before.y - after.y).abs() < EPS);
        }

        /// Property: Moving never changes the size.
        #[test]
        fn prop_move_preserves_size(m in mapping_strategy(), d in delta_strategy()) {
            let start = initialize_crop_box(&m);
            let b = move_crop_box(start, d, &m);
            prop_assert_eq!(b.size, start.size);
        }

        /// Property: Fitting any box produces one inside the image.
        #[test]
        fn prop_fit_is_inside(
            m in mapping_strategy(),
            (x, y, w, h) in (-500.0f64..2000.0, -500.0f64..2000.0, 50.0f64..3000.0, 50.0f64..3000.0),
        ) {
            let b = fit_crop_box(CropBox::new(x, y, w, h), &m);
            let bounds = m.bounds();
            prop_assert!(b.position.x >= bounds.x - EPS);
            prop_assert!(b.position.y >= bounds.y - EPS);
            prop_assert!(b.position.x + b.size.width <= bounds.right() + EPS);
            prop_assert!(b.position.y + b.size.height <= bounds.bottom() + EPS);
        }
    }
}
