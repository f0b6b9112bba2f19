//! The owning handle for one crop-editing session.
//!
//! [`GeometryEngine`] holds the current [`DisplayMapping`] and [`CropBox`]
//! and turns an ordered stream of pointer events into crop-box edits:
//!
//! ```text
//! Idle --pointer_down(body)--------> Dragging
//! Idle --pointer_down(handle h)----> Resizing(h)
//! Dragging    --pointer_move--> move_crop_box
//! Resizing(h) --pointer_move--> resize_crop_box(h)
//! Dragging | Resizing --pointer_up / pointer_leave--> Idle
//! Idle --pointer_move--> (no-op)
//! ```
//!
//! Deltas are incremental: each move is measured from the previous pointer
//! position, not from where the drag started.

use super::{
    compute_display_mapping, fit_crop_box, hit_test, initialize_crop_box_with_ratio,
    move_crop_box, project_to_source_space, resize_crop_box_with_min, CropBox, CropRectSource,
    Delta, Dimensions, DisplayMapping, GeometryError, Point, PointerTarget, ResizeHandle,
};
use crate::config::EditorConfig;

/// Pointer interaction state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InteractionState {
    #[default]
    Idle,
    Dragging,
    Resizing(ResizeHandle),
}

/// Crop geometry for one image, edited by a single writer.
#[derive(Debug, Clone)]
pub struct GeometryEngine {
    min_crop_size: f64,
    initial_crop_ratio: f64,
    handle_radius: f64,
    mapping: Option<DisplayMapping>,
    crop_box: Option<CropBox>,
    state: InteractionState,
    last_pointer: Point,
}

impl Default for GeometryEngine {
    fn default() -> Self {
        Self::new(&EditorConfig::default())
    }
}

impl GeometryEngine {
    pub fn new(config: &EditorConfig) -> Self {
        Self {
            min_crop_size: config.min_crop_size,
            initial_crop_ratio: config.initial_crop_ratio,
            handle_radius: config.handle_radius,
            mapping: None,
            crop_box: None,
            state: InteractionState::Idle,
            last_pointer: Point::default(),
        }
    }

    /// Load a new image: recompute the mapping and start from a fresh,
    /// centered crop box.
    pub fn load_image(
        &mut self,
        natural_size: Dimensions,
        container_size: Dimensions,
    ) -> Result<CropBox, GeometryError> {
        let mapping = compute_display_mapping(natural_size, container_size)?;
        let crop_box = initialize_crop_box_with_ratio(&mapping, self.initial_crop_ratio);
        self.mapping = Some(mapping);
        self.crop_box = Some(crop_box);
        self.state = InteractionState::Idle;
        Ok(crop_box)
    }

    /// The container was resized. The existing box is kept and revalidated,
    /// not re-centered.
    pub fn resize_container(
        &mut self,
        container_size: Dimensions,
    ) -> Result<Option<CropBox>, GeometryError> {
        match self.mapping {
            Some(mapping) => self.remap(mapping.natural_size, container_size),
            None => Ok(None),
        }
    }

    /// The image shape changed under the current box (e.g. a quarter-turn
    /// rotation swapped its axes). The box is kept and revalidated.
    pub fn set_natural_size(
        &mut self,
        natural_size: Dimensions,
    ) -> Result<Option<CropBox>, GeometryError> {
        match self.mapping {
            Some(mapping) => self.remap(natural_size, mapping.container_size),
            None => Ok(None),
        }
    }

    fn remap(
        &mut self,
        natural_size: Dimensions,
        container_size: Dimensions,
    ) -> Result<Option<CropBox>, GeometryError> {
        // Validate before touching state so a bad size leaves everything as is
        let mapping = compute_display_mapping(natural_size, container_size)?;
        let crop_box = match self.crop_box {
            Some(existing) => fit_crop_box(existing, &mapping),
            None => initialize_crop_box_with_ratio(&mapping, self.initial_crop_ratio),
        };
        self.mapping = Some(mapping);
        self.crop_box = Some(crop_box);
        Ok(Some(crop_box))
    }

    pub fn mapping(&self) -> Option<&DisplayMapping> {
        self.mapping.as_ref()
    }

    pub fn crop_box(&self) -> Option<CropBox> {
        self.crop_box
    }

    pub fn state(&self) -> InteractionState {
        self.state
    }

    /// Current crop box projected onto source pixels.
    pub fn source_crop_rect(&self) -> Option<CropRectSource> {
        let mapping = self.mapping.as_ref()?;
        let crop_box = self.crop_box.as_ref()?;
        Some(project_to_source_space(crop_box, mapping))
    }

    /// What a pointer at `point` would grab right now.
    pub fn hit_test(&self, point: Point) -> Option<PointerTarget> {
        let crop_box = self.crop_box.as_ref()?;
        hit_test(crop_box, point, self.handle_radius)
    }

    /// Start a drag or resize if `point` lands on the box.
    pub fn pointer_down(&mut self, point: Point) -> InteractionState {
        match self.hit_test(point) {
            Some(target) => self.begin(target, point),
            None => self.state,
        }
    }

    /// Start an interaction on an explicitly chosen target, for hosts that
    /// do their own hit-testing (e.g. separate handle elements).
    pub fn begin(&mut self, target: PointerTarget, point: Point) -> InteractionState {
        if self.crop_box.is_none() {
            return self.state;
        }
        self.state = match target {
            PointerTarget::Body => InteractionState::Dragging,
            PointerTarget::Handle(handle) => InteractionState::Resizing(handle),
        };
        self.last_pointer = point;
        self.state
    }

    /// Apply a pointer move. Returns the updated box, or `None` when idle.
    pub fn pointer_move(&mut self, point: Point) -> Option<CropBox> {
        if self.state == InteractionState::Idle {
            return None;
        }
        let delta = Delta::between(self.last_pointer, point);
        self.last_pointer = point;
        self.apply_delta(delta)
    }

    /// Apply a raw delta according to the current state.
    pub fn apply_delta(&mut self, delta: Delta) -> Option<CropBox> {
        let mapping = self.mapping.as_ref()?;
        let current = self.crop_box?;

        let next = match self.state {
            InteractionState::Idle => return None,
            InteractionState::Dragging => move_crop_box(current, delta, mapping),
            InteractionState::Resizing(handle) => {
                resize_crop_box_with_min(current, handle, delta, mapping, self.min_crop_size)
            }
        };

        self.crop_box = Some(next);
        Some(next)
    }

    pub fn pointer_up(&mut self) {
        self.state = InteractionState::Idle;
    }

    pub fn pointer_leave(&mut self) {
        self.state = InteractionState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loaded() -> GeometryEngine {
        let mut engine = GeometryEngine::default();
        engine
            .load_image(Dimensions::new(1000.0, 500.0), Dimensions::new(400.0, 400.0))
            .unwrap();
        engine
    }

    #[test]
    fn test_load_initializes_box() {
        let engine = loaded();
        assert_eq!(engine.crop_box(), Some(CropBox::new(120.0, 120.0, 160.0, 160.0)));
        assert_eq!(
            engine.source_crop_rect(),
            Some(CropRectSource::new(300, 50, 400, 400))
        );
        assert_eq!(engine.state(), InteractionState::Idle);
    }

    #[test]
    fn test_load_rejects_invalid_dimensions() {
        let mut engine = GeometryEngine::default();
        let err = engine
            .load_image(Dimensions::new(0.0, 10.0), Dimensions::new(400.0, 400.0))
            .unwrap_err();
        assert!(matches!(err, GeometryError::InvalidDimensions { .. }));
        assert!(engine.crop_box().is_none());
        assert!(engine.source_crop_rect().is_none());
    }

    #[test]
    fn test_drag_moves_box_incrementally() {
        let mut engine = loaded();
        assert_eq!(engine.pointer_down(Point::new(200.0, 200.0)), InteractionState::Dragging);
        engine.pointer_move(Point::new(210.0, 200.0));
        let b = engine.pointer_move(Point::new(215.0, 195.0)).unwrap();
        // 10 then 5 to the right, 5 up
        assert_eq!(b.position, Point::new(135.0, 115.0));
        engine.pointer_up();
        assert_eq!(engine.state(), InteractionState::Idle);
    }

    #[test]
    fn test_resize_from_handle() {
        let mut engine = loaded();
        let state = engine.pointer_down(Point::new(280.0, 280.0));
        assert_eq!(state, InteractionState::Resizing(ResizeHandle::BottomRight));
        let b = engine.pointer_move(Point::new(300.0, 290.0)).unwrap();
        assert_eq!(b, CropBox::new(120.0, 120.0, 180.0, 170.0));
    }

    #[test]
    fn test_move_while_idle_is_noop() {
        let mut engine = loaded();
        let before = engine.crop_box();
        assert!(engine.pointer_move(Point::new(300.0, 300.0)).is_none());
        assert_eq!(engine.crop_box(), before);
    }

    #[test]
    fn test_pointer_down_outside_box_stays_idle() {
        let mut engine = loaded();
        assert_eq!(engine.pointer_down(Point::new(5.0, 5.0)), InteractionState::Idle);
    }

    #[test]
    fn test_pointer_leave_ends_interaction() {
        let mut engine = loaded();
        engine.pointer_down(Point::new(200.0, 200.0));
        engine.pointer_leave();
        assert_eq!(engine.state(), InteractionState::Idle);
        assert!(engine.pointer_move(Point::new(250.0, 250.0)).is_none());
    }

    #[test]
    fn test_new_drag_starts_from_new_pointer() {
        let mut engine = loaded();
        engine.pointer_down(Point::new(200.0, 200.0));
        engine.pointer_move(Point::new(210.0, 200.0));
        engine.pointer_up();
        // A later drag must not see the jump from the old pointer position
        engine.pointer_down(Point::new(150.0, 150.0));
        let b = engine.pointer_move(Point::new(151.0, 150.0)).unwrap();
        assert_eq!(b.position, Point::new(131.0, 120.0));
    }

    #[test]
    fn test_container_resize_preserves_adjusted_box() {
        let mut engine = loaded();
        engine.begin(PointerTarget::Body, Point::new(0.0, 0.0));
        engine.pointer_move(Point::new(-100.0, 0.0));
        engine.pointer_up();
        let moved = engine.crop_box().unwrap();
        assert_eq!(moved.position, Point::new(20.0, 120.0));

        // Larger container: box still valid, not re-centered
        let b = engine
            .resize_container(Dimensions::new(600.0, 400.0))
            .unwrap()
            .unwrap();
        assert_eq!(b, moved);
    }

    #[test]
    fn test_container_shrink_revalidates_box() {
        let mut engine = loaded();
        // Displayed 200x100 at (0, 50)
        let b = engine
            .resize_container(Dimensions::new(200.0, 200.0))
            .unwrap()
            .unwrap();
        assert_eq!(b.size, Dimensions::new(160.0, 100.0));
        assert_eq!(b.position, Point::new(40.0, 50.0));
    }

    #[test]
    fn test_invalid_container_keeps_state() {
        let mut engine = loaded();
        let before = engine.crop_box();
        assert!(engine.resize_container(Dimensions::new(0.0, 0.0)).is_err());
        assert_eq!(engine.crop_box(), before);
    }

    #[test]
    fn test_resize_container_before_load() {
        let mut engine = GeometryEngine::default();
        assert_eq!(engine.resize_container(Dimensions::new(10.0, 10.0)).unwrap(), None);
    }

    #[test]
    fn test_set_natural_size_swaps_axes() {
        let mut engine = loaded();
        let b = engine
            .set_natural_size(Dimensions::new(500.0, 1000.0))
            .unwrap()
            .unwrap();
        let m = engine.mapping().unwrap();
        assert_eq!(m.display_size, Dimensions::new(200.0, 400.0));
        assert!(b.position.x >= m.offset.x);
        assert!(b.position.x + b.size.width <= m.offset.x + m.display_size.width);
    }

    #[test]
    fn test_custom_minimum_from_config() {
        let config = EditorConfig {
            min_crop_size: 20.0,
            ..EditorConfig::default()
        };
        let mut engine = GeometryEngine::new(&config);
        engine
            .load_image(Dimensions::new(1000.0, 500.0), Dimensions::new(400.0, 400.0))
            .unwrap();
        engine.begin(PointerTarget::Handle(ResizeHandle::BottomRight), Point::new(0.0, 0.0));
        let b = engine.pointer_move(Point::new(-500.0, -500.0)).unwrap();
        assert_eq!(b.size, Dimensions::new(20.0, 20.0));
    }
}
