//! WASM bindings for the crop geometry engine.
//!
//! The host forwards the image's natural size, the container size and
//! pointer events; the engine answers with the crop box to draw and the
//! crop rectangle to render.
//!
//! # Example (TypeScript)
//!
//! ```typescript
//! const engine = new JsGeometryEngine({ min_crop_size: 50 });
//! const box = engine.load_image(img.naturalWidth, img.naturalHeight, 400, 400);
//!
//! overlay.onpointerdown = (e) => engine.pointer_down(e.offsetX, e.offsetY);
//! overlay.onpointermove = (e) => draw(engine.pointer_move(e.offsetX, e.offsetY));
//! overlay.onpointerup = () => engine.pointer_up();
//!
//! const rect = engine.source_crop_rect();
//! ```

use std::str::FromStr;

use cropframe_core::config::EditorConfig;
use cropframe_core::geometry::{
    Dimensions, GeometryEngine, InteractionState, Point, PointerTarget, ResizeHandle,
};
use wasm_bindgen::prelude::*;

use crate::types::{JsCropBox, JsCropRect};

/// Crop geometry for one displayed image.
#[wasm_bindgen]
pub struct JsGeometryEngine {
    inner: GeometryEngine,
}

#[wasm_bindgen]
impl JsGeometryEngine {
    /// Create an engine from an optional configuration object. Missing
    /// fields take their defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<JsGeometryEngine, JsValue> {
        let config: EditorConfig = if config.is_undefined() || config.is_null() {
            EditorConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)
                .map_err(|e| JsValue::from_str(&e.to_string()))?
        };
        config
            .validate()
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self {
            inner: GeometryEngine::new(&config),
        })
    }

    /// Create an engine with the default configuration.
    pub fn with_defaults() -> JsGeometryEngine {
        Self {
            inner: GeometryEngine::default(),
        }
    }

    /// Load an image and start from a centered crop square.
    pub fn load_image(
        &mut self,
        natural_width: f64,
        natural_height: f64,
        container_width: f64,
        container_height: f64,
    ) -> Result<JsCropBox, JsValue> {
        self.inner
            .load_image(
                Dimensions::new(natural_width, natural_height),
                Dimensions::new(container_width, container_height),
            )
            .map(JsCropBox::from)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// The container was resized. Returns the revalidated box, or
    /// `undefined` if no image is loaded.
    pub fn resize_container(
        &mut self,
        width: f64,
        height: f64,
    ) -> Result<Option<JsCropBox>, JsValue> {
        self.inner
            .resize_container(Dimensions::new(width, height))
            .map(|b| b.map(JsCropBox::from))
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// The image changed shape (e.g. rotated a quarter turn). Returns the
    /// revalidated box, or `undefined` if no image is loaded.
    pub fn set_natural_size(
        &mut self,
        width: f64,
        height: f64,
    ) -> Result<Option<JsCropBox>, JsValue> {
        self.inner
            .set_natural_size(Dimensions::new(width, height))
            .map(|b| b.map(JsCropBox::from))
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Current crop box in container coordinates.
    pub fn crop_box(&self) -> Option<JsCropBox> {
        self.inner.crop_box().map(JsCropBox::from)
    }

    /// Current crop box projected onto source pixels.
    pub fn source_crop_rect(&self) -> Option<JsCropRect> {
        self.inner.source_crop_rect().map(JsCropRect::from)
    }

    /// The display mapping as a plain object (`natural_size`,
    /// `container_size`, `display_size`, `offset`), or `undefined`.
    pub fn mapping(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.inner.mapping())
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// What a pointer at (x, y) would grab: `"body"`, a handle name such as
    /// `"top-left"`, or `undefined`.
    pub fn hit_test(&self, x: f64, y: f64) -> Option<String> {
        self.inner
            .hit_test(Point::new(x, y))
            .map(|target| target_name(target).to_string())
    }

    /// Pointer pressed. Returns the new interaction state.
    pub fn pointer_down(&mut self, x: f64, y: f64) -> String {
        state_name(self.inner.pointer_down(Point::new(x, y))).to_string()
    }

    /// Start a drag on the box body regardless of hit-testing.
    pub fn begin_drag(&mut self, x: f64, y: f64) -> String {
        state_name(self.inner.begin(PointerTarget::Body, Point::new(x, y))).to_string()
    }

    /// Start a resize from a named corner (`"top-left"`, `"top-right"`,
    /// `"bottom-left"`, `"bottom-right"`).
    pub fn begin_resize(&mut self, handle: &str, x: f64, y: f64) -> Result<String, JsValue> {
        let handle = ResizeHandle::from_str(handle).map_err(|e| JsValue::from_str(&e))?;
        let state = self
            .inner
            .begin(PointerTarget::Handle(handle), Point::new(x, y));
        Ok(state_name(state).to_string())
    }

    /// Pointer moved. Returns the updated box while dragging or resizing.
    pub fn pointer_move(&mut self, x: f64, y: f64) -> Option<JsCropBox> {
        self.inner
            .pointer_move(Point::new(x, y))
            .map(JsCropBox::from)
    }

    pub fn pointer_up(&mut self) {
        self.inner.pointer_up();
    }

    pub fn pointer_leave(&mut self) {
        self.inner.pointer_leave();
    }

    /// `"idle"`, `"dragging"` or `"resizing"`.
    #[wasm_bindgen(getter)]
    pub fn state(&self) -> String {
        state_name(self.inner.state()).to_string()
    }

    /// The corner being dragged, if resizing.
    #[wasm_bindgen(getter)]
    pub fn active_handle(&self) -> Option<String> {
        match self.inner.state() {
            InteractionState::Resizing(handle) => Some(handle_name(handle).to_string()),
            _ => None,
        }
    }
}

fn state_name(state: InteractionState) -> &'static str {
    match state {
        InteractionState::Idle => "idle",
        InteractionState::Dragging => "dragging",
        InteractionState::Resizing(_) => "resizing",
    }
}

fn handle_name(handle: ResizeHandle) -> &'static str {
    match handle {
        ResizeHandle::TopLeft => "top-left",
        ResizeHandle::TopRight => "top-right",
        ResizeHandle::BottomLeft => "bottom-left",
        ResizeHandle::BottomRight => "bottom-right",
    }
}

fn target_name(target: PointerTarget) -> &'static str {
    match target {
        PointerTarget::Body => "body",
        PointerTarget::Handle(handle) => handle_name(handle),
    }
}
