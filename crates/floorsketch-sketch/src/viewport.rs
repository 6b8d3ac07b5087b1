//! Viewport and coordinate mapping for pointer input.
//!
//! The drawing surface is shown on screen with an offset (its bounding box)
//! and a zoom scale. Input backends report client coordinates; everything
//! downstream of this module works in unscaled surface space.

use floorsketch_core::Point;
use std::fmt;

pub const MIN_ZOOM: f64 = 0.25;
pub const MAX_ZOOM: f64 = 4.0;
const ZOOM_STEP: f64 = 1.2;

/// On-screen placement of the drawing surface.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceViewport {
    left: f64,
    top: f64,
    scale: f64,
}

impl SurfaceViewport {
    /// Creates a viewport whose surface starts at client `(left, top)` at 100%.
    pub fn new(left: f64, top: f64) -> Self {
        Self {
            left,
            top,
            scale: 1.0,
        }
    }

    pub fn left(&self) -> f64 {
        self.left
    }

    pub fn top(&self) -> f64 {
        self.top
    }

    /// Gets the current zoom scale (1.0 = 100%).
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Moves the surface's on-screen origin (layout change or scroll).
    pub fn set_offset(&mut self, left: f64, top: f64) {
        self.left = left;
        self.top = top;
    }

    /// Sets the zoom scale, clamped to `[MIN_ZOOM, MAX_ZOOM]`.
    pub fn set_scale(&mut self, scale: f64) {
        if scale.is_finite() {
            self.scale = scale.clamp(MIN_ZOOM, MAX_ZOOM);
        }
    }

    pub fn zoom_in(&mut self) {
        self.set_scale(self.scale * ZOOM_STEP);
    }

    pub fn zoom_out(&mut self) {
        self.set_scale(self.scale / ZOOM_STEP);
    }

    pub fn reset_zoom(&mut self) {
        self.scale = 1.0;
    }

    /// Converts client coordinates to surface space.
    ///
    /// ```text
    /// surface_x = (client_x - left) / scale
    /// surface_y = (client_y - top) / scale
    /// ```
    pub fn client_to_surface(&self, client_x: f64, client_y: f64) -> Point {
        Point::new(
            (client_x - self.left) / self.scale,
            (client_y - self.top) / self.scale,
        )
    }

    /// Converts surface coordinates back to client coordinates.
    pub fn surface_to_client(&self, point: &Point) -> (f64, f64) {
        (
            point.x * self.scale + self.left,
            point.y * self.scale + self.top,
        )
    }

    /// Maps any pointer backend to a surface point.
    ///
    /// Returns `None` when the event carries no position (e.g. a touch
    /// event with an empty touch list).
    pub fn locate<P: PointerInput + ?Sized>(&self, input: &P) -> Option<Point> {
        input
            .client_position()
            .map(|(x, y)| self.client_to_surface(x, y))
    }
}

impl Default for SurfaceViewport {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

impl fmt::Display for SurfaceViewport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Zoom: {:.0}% | Offset: ({:.1}, {:.1})",
            self.scale * 100.0,
            self.left,
            self.top
        )
    }
}

/// Anything that can report a client-space pointer position.
pub trait PointerInput {
    fn client_position(&self) -> Option<(f64, f64)>;
}

/// Mouse or stylus event position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MouseInput {
    pub client_x: f64,
    pub client_y: f64,
}

impl PointerInput for MouseInput {
    fn client_position(&self) -> Option<(f64, f64)> {
        Some((self.client_x, self.client_y))
    }
}

/// Touch event; only the first active touch is used.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TouchInput {
    pub touches: Vec<(f64, f64)>,
}

impl PointerInput for TouchInput {
    fn client_position(&self) -> Option<(f64, f64)> {
        self.touches.first().copied()
    }
}

impl PointerInput for (f64, f64) {
    fn client_position(&self) -> Option<(f64, f64)> {
        Some(*self)
    }
}
