//! Sketch session: one editing lifetime bound to a host application.
//!
//! The session wires the viewport, the interaction controller, the renderer
//! and the export composer together and owns the raster surface. The host
//! only sees three callbacks; failures inside the session are logged and
//! turned into no-ops.

use crate::controller::SketchController;
use crate::export::{encode_png, to_data_uri, ExportComposer, ExportLayout};
use crate::markers::{MarkerKind, MarkerTable};
use crate::renderer::{SketchRenderer, DEFAULT_GRID_SPACING};
use crate::tools::Tool;
use crate::viewport::{PointerInput, SurfaceViewport};
use chrono::NaiveDate;
use floorsketch_core::{Color, Result, SketchError};
use tiny_skia::Pixmap;
use tracing::{debug, info, warn};

/// Callbacks into the embedding application.
pub trait SketchHost {
    /// Receives the finished sketch as a PNG data URI. Called at most once.
    fn on_save(&mut self, data_uri: String);

    /// The user dismissed the sketch without saving.
    fn on_close(&mut self);

    /// Asks whether the whole sketch may be erased.
    fn confirm_clear(&mut self) -> bool;
}

/// Everything a session needs to know before it is mounted.
#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub width: u32,
    pub height: u32,
    pub grid_visible: bool,
    pub grid_spacing: f32,
    pub default_color: Color,
    pub markers: MarkerTable,
    pub export: ExportLayout,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            grid_visible: true,
            grid_spacing: DEFAULT_GRID_SPACING,
            default_color: Color::rgb(0x1e, 0x40, 0xaf),
            markers: MarkerTable::default(),
            export: ExportLayout::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Open,
    Saved,
    Closed,
}

/// Result of a successful export.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportArtifact {
    pub width: u32,
    pub height: u32,
    pub png: Vec<u8>,
    pub data_uri: String,
}

pub struct SketchSession<H: SketchHost> {
    host: H,
    options: SessionOptions,
    viewport: SurfaceViewport,
    controller: SketchController,
    renderer: SketchRenderer,
    composer: ExportComposer,
    surface: Option<Pixmap>,
    status: SessionStatus,
}

impl<H: SketchHost> SketchSession<H> {
    pub fn new(host: H, options: SessionOptions) -> Self {
        let controller = SketchController::new(options.markers.clone(), options.default_color);
        let renderer = SketchRenderer::new(options.markers.clone())
            .with_grid(options.grid_visible, options.grid_spacing);
        let composer = ExportComposer::new(options.export.clone());
        Self {
            host,
            options,
            viewport: SurfaceViewport::default(),
            controller,
            renderer,
            composer,
            surface: None,
            status: SessionStatus::Open,
        }
    }

    /// Opens a session for a report that may already carry a sketch.
    /// Previous sketches are not loaded back; every session starts empty.
    pub fn with_existing_sketch(host: H, options: SessionOptions, existing: Option<&str>) -> Self {
        if let Some(uri) = existing {
            info!(
                "Existing sketch of {} bytes provided, starting with an empty surface",
                uri.len()
            );
        }
        Self::new(host, options)
    }

    /// Allocates the raster surface and draws the first frame.
    pub fn mount(&mut self) -> Result<()> {
        if self.surface.is_some() {
            return Ok(());
        }
        let (width, height) = (self.options.width, self.options.height);
        let pixmap =
            Pixmap::new(width, height).ok_or(SketchError::InvalidDimensions { width, height })?;
        self.surface = Some(pixmap);
        info!("Mounted {}x{} sketch surface", width, height);
        self.redraw();
        Ok(())
    }

    pub fn is_mounted(&self) -> bool {
        self.surface.is_some()
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn is_open(&self) -> bool {
        self.status == SessionStatus::Open
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn into_host(self) -> H {
        self.host
    }

    pub fn options(&self) -> &SessionOptions {
        &self.options
    }

    pub fn controller(&self) -> &SketchController {
        &self.controller
    }

    pub fn viewport(&self) -> &SurfaceViewport {
        &self.viewport
    }

    pub fn surface(&self) -> Option<&Pixmap> {
        self.surface.as_ref()
    }

    pub fn grid_visible(&self) -> bool {
        self.renderer.grid_visible()
    }

    /// Moves the surface on screen; affects pointer mapping only.
    pub fn set_surface_offset(&mut self, left: f64, top: f64) {
        self.viewport.set_offset(left, top);
    }

    pub fn select_tool(&mut self, tool: Tool) {
        if self.is_open() && self.controller.set_tool(tool) {
            self.redraw();
        }
    }

    pub fn select_marker(&mut self, marker: MarkerKind) {
        if self.is_open() {
            self.controller.set_marker(marker);
        }
    }

    pub fn select_color(&mut self, color: Color) {
        if self.is_open() && self.controller.set_color(color) {
            self.redraw();
        }
    }

    pub fn toggle_grid(&mut self) {
        let visible = !self.renderer.grid_visible();
        self.set_grid_visible(visible);
    }

    pub fn set_grid_visible(&mut self, visible: bool) {
        if !self.is_open() {
            return;
        }
        self.renderer.set_grid_visible(visible);
        debug!("Grid {}", if visible { "shown" } else { "hidden" });
        self.redraw();
    }

    pub fn zoom_in(&mut self) {
        if self.is_open() {
            self.viewport.zoom_in();
        }
    }

    pub fn zoom_out(&mut self) {
        if self.is_open() {
            self.viewport.zoom_out();
        }
    }

    pub fn reset_zoom(&mut self) {
        if self.is_open() {
            self.viewport.reset_zoom();
        }
    }

    pub fn pointer_down<P: PointerInput + ?Sized>(&mut self, input: &P) {
        if !self.is_open() {
            return;
        }
        if let Some(point) = self.viewport.locate(input) {
            if self.controller.pointer_start(point) {
                self.redraw();
            }
        }
    }

    pub fn pointer_move<P: PointerInput + ?Sized>(&mut self, input: &P) {
        if !self.is_open() {
            return;
        }
        if let Some(point) = self.viewport.locate(input) {
            if self.controller.pointer_move(point) {
                self.redraw();
            }
        }
    }

    pub fn pointer_up(&mut self) {
        if self.is_open() && self.controller.pointer_end() {
            self.redraw();
        }
    }

    /// Answers the open text or measurement prompt.
    pub fn confirm_label(&mut self, input: &str) {
        if self.is_open() && self.controller.confirm_label(input) {
            self.redraw();
        }
    }

    pub fn cancel_label(&mut self) {
        if self.is_open() && self.controller.cancel_label() {
            self.redraw();
        }
    }

    pub fn undo(&mut self) {
        if self.is_open() && self.controller.undo().is_some() {
            self.redraw();
        }
    }

    /// Erases all elements after the host confirms.
    pub fn clear(&mut self) {
        if !self.is_open() {
            return;
        }
        let confirmed = self.host.confirm_clear();
        if self.controller.clear(confirmed) {
            self.redraw();
        }
    }

    /// Composes the framed image of the current surface.
    pub fn export(&self, date: NaiveDate) -> Result<ExportArtifact> {
        let surface = self.surface.as_ref().ok_or(SketchError::SurfaceUnavailable)?;
        let framed = self.composer.compose(surface, date, self.controller.markers())?;
        let png = encode_png(&framed)?;
        let data_uri = to_data_uri(&png);
        Ok(ExportArtifact {
            width: framed.width(),
            height: framed.height(),
            png,
            data_uri,
        })
    }

    /// Saves with today's date. See [`SketchSession::commit_on`].
    pub fn commit(&mut self) -> Option<ExportArtifact> {
        self.commit_on(chrono::Local::now().date_naive())
    }

    /// Exports, hands the data URI to the host and ends the session.
    ///
    /// Nothing is delivered when the surface is not mounted or encoding
    /// fails; the session then stays open.
    pub fn commit_on(&mut self, date: NaiveDate) -> Option<ExportArtifact> {
        if !self.is_open() {
            return None;
        }
        match self.export(date) {
            Ok(artifact) => {
                info!(
                    "Saving sketch with {} element(s) as {}x{} PNG ({} bytes)",
                    self.controller.elements().len(),
                    artifact.width,
                    artifact.height,
                    artifact.png.len()
                );
                self.host.on_save(artifact.data_uri.clone());
                self.status = SessionStatus::Saved;
                Some(artifact)
            }
            Err(e) => {
                warn!("Sketch export skipped: {}", e);
                None
            }
        }
    }

    /// Dismisses the session without saving.
    pub fn close(&mut self) {
        if !self.is_open() {
            return;
        }
        info!("Sketch closed without saving");
        self.status = SessionStatus::Closed;
        self.host.on_close();
    }

    fn redraw(&mut self) {
        let Some(surface) = self.surface.as_mut() else {
            return;
        };
        let draft = self.controller.draft_preview();
        self.renderer.redraw(
            surface,
            self.controller.elements(),
            draft.as_ref(),
            self.controller.color(),
        );
    }
}
