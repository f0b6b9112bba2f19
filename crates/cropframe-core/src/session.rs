//! Editing session: one image, its transform, crop mode and commit/reset.
//!
//! [`EditSession`] is the single owner of everything a user changes while
//! editing one image. Hosts forward UI events to it and read back the
//! preview and crop box to paint.
//!
//! The crop box is edited against the *working canvas* (the source after
//! rotation and flips), so the projected crop rectangle can be handed to
//! [`render`] unchanged.

use serde::{Deserialize, Serialize};

use crate::config::EditorConfig;
use crate::decode::PixelBuffer;
use crate::encode::{encode, OutputFormat};
use crate::geometry::{
    CropBox, CropRectSource, Dimensions, GeometryEngine, GeometryError, InteractionState, Point,
};
use crate::transform::{render, CompositeError, TransformState};
use crate::EditorError;

/// Whether pointer input edits the crop box.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditMode {
    #[default]
    View,
    Crop,
}

/// An encoded, committed edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommittedImage {
    pub bytes: Vec<u8>,
    pub format: OutputFormat,
    pub width: u32,
    pub height: u32,
}

/// State of one editing session.
#[derive(Debug, Clone)]
pub struct EditSession {
    config: EditorConfig,
    original: PixelBuffer,
    original_format: OutputFormat,
    source: PixelBuffer,
    format: OutputFormat,
    transform: TransformState,
    mode: EditMode,
    geometry: GeometryEngine,
    container_size: Option<Dimensions>,
    preview: Option<PixelBuffer>,
}

impl EditSession {
    /// Start a session on `source`. `format` is the source's export format;
    /// `None` falls back to the configured default.
    pub fn new(
        source: PixelBuffer,
        format: Option<OutputFormat>,
        config: EditorConfig,
    ) -> Result<Self, EditorError> {
        config.validate()?;
        ensure_well_formed(&source)?;

        let format = format.unwrap_or(config.default_format);
        Ok(Self {
            geometry: GeometryEngine::new(&config),
            original: source.clone(),
            original_format: format,
            source,
            format,
            transform: TransformState::default(),
            mode: EditMode::View,
            container_size: None,
            preview: None,
            config,
        })
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// The image currently being edited (the last commit, or the original).
    pub fn source(&self) -> &PixelBuffer {
        &self.source
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    pub fn transform(&self) -> &TransformState {
        &self.transform
    }

    pub fn mode(&self) -> EditMode {
        self.mode
    }

    pub fn geometry(&self) -> &GeometryEngine {
        &self.geometry
    }

    pub fn container_size(&self) -> Option<Dimensions> {
        self.container_size
    }

    /// Last successfully rendered preview.
    pub fn preview(&self) -> Option<&PixelBuffer> {
        self.preview.as_ref()
    }

    pub fn crop_box(&self) -> Option<CropBox> {
        self.geometry.crop_box()
    }

    /// Crop applied when rendering: the projected box in crop mode, else none.
    pub fn active_crop(&self) -> Option<CropRectSource> {
        match self.mode {
            EditMode::Crop => self.geometry.source_crop_rect(),
            EditMode::View => None,
        }
    }

    fn natural_size(&self) -> Dimensions {
        Dimensions::new(self.source.width as f64, self.source.height as f64)
    }

    /// Size of the source after the current rotation.
    pub fn working_size(&self) -> Dimensions {
        self.transform.working_size(self.natural_size())
    }

    pub fn rotate_clockwise(&mut self) -> Result<(), EditorError> {
        self.update_transform(TransformState::rotate_clockwise)
    }

    pub fn rotate_counter_clockwise(&mut self) -> Result<(), EditorError> {
        self.update_transform(TransformState::rotate_counter_clockwise)
    }

    /// Slider rotation. Returns `false` when the value was ignored.
    pub fn set_rotation(&mut self, degrees: f64) -> Result<bool, EditorError> {
        let mut accepted = false;
        self.update_transform(|t| accepted = t.set_rotation(degrees))?;
        Ok(accepted)
    }

    pub fn toggle_flip_horizontal(&mut self) {
        self.transform.toggle_flip_horizontal();
    }

    pub fn toggle_flip_vertical(&mut self) {
        self.transform.toggle_flip_vertical();
    }

    /// Apply a transform change; in crop mode, a change of canvas shape is
    /// passed on to the geometry so the box stays inside the image.
    fn update_transform(
        &mut self,
        change: impl FnOnce(&mut TransformState),
    ) -> Result<(), EditorError> {
        let before = self.working_size();
        change(&mut self.transform);
        let after = self.working_size();

        if self.mode == EditMode::Crop && before != after {
            log::debug!(
                "working canvas changed from {}x{} to {}x{}",
                before.width,
                before.height,
                after.width,
                after.height
            );
            self.geometry.set_natural_size(after)?;
        }
        Ok(())
    }

    /// Record the size of the box the image is displayed in.
    pub fn set_container_size(
        &mut self,
        container_size: Dimensions,
    ) -> Result<Option<CropBox>, EditorError> {
        if !container_size.is_valid() {
            return Err(GeometryError::InvalidDimensions {
                width: container_size.width,
                height: container_size.height,
            }
            .into());
        }
        self.container_size = Some(container_size);
        Ok(self.geometry.resize_container(container_size)?)
    }

    /// Enter or leave crop mode, returning the new mode.
    ///
    /// Entering needs a known container size. The first entry (and the first
    /// after a commit, reset or new source) starts from a centered box;
    /// later entries keep the previous box. Leaving drops the crop from
    /// rendering.
    pub fn toggle_crop_mode(&mut self) -> Result<EditMode, EditorError> {
        match self.mode {
            EditMode::View => {
                let container = self.container_size.ok_or(EditorError::NoCropArea)?;
                let working = self.working_size();
                match self.geometry.mapping().map(|m| m.natural_size) {
                    None => {
                        self.geometry.load_image(working, container)?;
                    }
                    Some(loaded) if loaded != working => {
                        self.geometry.set_natural_size(working)?;
                    }
                    Some(_) => {}
                }
                self.mode = EditMode::Crop;
            }
            EditMode::Crop => {
                self.geometry.pointer_up();
                self.mode = EditMode::View;
            }
        }
        log::debug!("edit mode is now {:?}", self.mode);
        Ok(self.mode)
    }

    pub fn pointer_down(&mut self, point: Point) -> InteractionState {
        match self.mode {
            EditMode::Crop => self.geometry.pointer_down(point),
            EditMode::View => InteractionState::Idle,
        }
    }

    pub fn pointer_move(&mut self, point: Point) -> Option<CropBox> {
        match self.mode {
            EditMode::Crop => self.geometry.pointer_move(point),
            EditMode::View => None,
        }
    }

    pub fn pointer_up(&mut self) {
        self.geometry.pointer_up();
    }

    pub fn pointer_leave(&mut self) {
        self.geometry.pointer_leave();
    }

    /// Re-render the preview from the current state.
    ///
    /// On failure the previous preview stays in place and the error is
    /// returned.
    pub fn refresh_preview(&mut self) -> Result<&PixelBuffer, EditorError> {
        let output = match render(
            &self.source,
            self.natural_size(),
            &self.transform,
            self.active_crop(),
        ) {
            Ok(output) => output,
            Err(e) => {
                log::warn!("preview render failed, keeping the previous preview: {e}");
                return Err(e.into());
            }
        };
        let preview: &PixelBuffer = self.preview.insert(output.into_buffer());
        Ok(preview)
    }

    /// Render, encode and adopt the result as the new source.
    ///
    /// Transform and mode are reset afterwards. The original source is kept
    /// for [`reset`](Self::reset).
    pub fn commit(&mut self) -> Result<CommittedImage, EditorError> {
        let rendered = render(
            &self.source,
            self.natural_size(),
            &self.transform,
            self.active_crop(),
        )?
        .into_cropped()?;
        let bytes = encode(&rendered, self.format, self.config.export_quality)?;

        log::info!(
            "committed {}x{} {} ({} bytes)",
            rendered.width,
            rendered.height,
            self.format,
            bytes.len()
        );

        let committed = CommittedImage {
            bytes,
            format: self.format,
            width: rendered.width,
            height: rendered.height,
        };
        self.source = rendered;
        self.clear_edits();
        Ok(committed)
    }

    /// Throw away all commits and edits and return to the original source.
    pub fn reset(&mut self) {
        self.source = self.original.clone();
        self.format = self.original_format;
        self.clear_edits();
        log::info!(
            "reset to original {}x{} image",
            self.source.width,
            self.source.height
        );
    }

    /// Start over with a different image. It becomes the new original.
    pub fn replace_source(
        &mut self,
        source: PixelBuffer,
        format: Option<OutputFormat>,
    ) -> Result<(), EditorError> {
        ensure_well_formed(&source)?;
        let format = format.unwrap_or(self.config.default_format);

        log::info!("new source {}x{} ({})", source.width, source.height, format);
        self.original = source.clone();
        self.original_format = format;
        self.source = source;
        self.format = format;
        self.clear_edits();
        Ok(())
    }

    fn clear_edits(&mut self) {
        self.transform.reset();
        self.mode = EditMode::View;
        self.geometry = GeometryEngine::new(&self.config);
        self.preview = None;
    }
}

fn ensure_well_formed(source: &PixelBuffer) -> Result<(), CompositeError> {
    if source.is_well_formed() {
        Ok(())
    } else {
        Err(CompositeError::InvalidSourceBuffer(format!(
            "{}x{} buffer with {} bytes",
            source.width,
            source.height,
            source.pixels.len()
        )))
    }
}
