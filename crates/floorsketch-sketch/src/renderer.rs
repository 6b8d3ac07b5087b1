//! Surface renderer for sketch elements.
//! Redraws the whole drawing surface from the committed collection plus the
//! optional draft, using tiny-skia for anti-aliased 2D rendering.
//!
//! Order of a redraw:
//! - White background
//! - Reference grid (if enabled)
//! - Committed elements in insertion order
//! - In-progress draft on top

use crate::elements::{ElementCollection, ElementKind};
use crate::markers::MarkerTable;
use crate::tools::MEASUREMENT_ACCENT;
use crate::typography::{self, FontWeight, TextStyle};
use floorsketch_core::{Color, Point};
use tiny_skia::{
    FillRule, LineCap, LineJoin, Paint, PathBuilder, Pixmap, Stroke, StrokeDash, Transform,
};

pub const DEFAULT_GRID_SPACING: f32 = 20.0;
const GRID_COLOR: Color = Color::rgb(0xe5, 0xe7, 0xeb);
const GRID_WIDTH: f32 = 0.5;
const STROKE_WIDTH: f32 = 2.0;
const TEXT_SIZE: f32 = 14.0;

const MEASUREMENT_WIDTH: f32 = 1.5;
const MEASUREMENT_DASH: [f32; 2] = [5.0, 3.0];
const MEASUREMENT_CAP: f64 = 8.0;
const MEASUREMENT_TEXT_SIZE: f32 = 12.0;
const LABEL_BOX_PADDING: f32 = 4.0;
const LABEL_BOX_HEIGHT: f32 = 20.0;

pub const MARKER_RADIUS: f32 = 16.0;
const MARKER_GLYPH_SIZE: f32 = 14.0;

pub(crate) fn skia_color(color: Color) -> tiny_skia::Color {
    tiny_skia::Color::from_rgba8(color.r, color.g, color.b, 255)
}

pub(crate) fn paint(color: Color) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color(skia_color(color));
    paint.anti_alias = true;
    paint
}

fn pen(width: f32) -> Stroke {
    Stroke {
        width,
        line_cap: LineCap::Round,
        line_join: LineJoin::Round,
        ..Default::default()
    }
}

/// Normalized bounds of the rectangle spanned by two corners, as
/// `(min_x, min_y, max_x, max_y)`, independent of drag direction.
pub fn rect_bounds(start: &Point, end: &Point) -> (f64, f64, f64, f64) {
    (
        start.x.min(end.x),
        start.y.min(end.y),
        start.x.max(end.x),
        start.y.max(end.y),
    )
}

/// Grid and marker configuration of the surface renderer.
#[derive(Debug, Clone)]
pub struct SketchRenderer {
    markers: MarkerTable,
    grid_visible: bool,
    grid_spacing: f32,
}

impl SketchRenderer {
    pub fn new(markers: MarkerTable) -> Self {
        Self {
            markers,
            grid_visible: true,
            grid_spacing: DEFAULT_GRID_SPACING,
        }
    }

    pub fn with_grid(mut self, visible: bool, spacing: f32) -> Self {
        self.grid_visible = visible;
        if spacing > 0.0 {
            self.grid_spacing = spacing;
        }
        self
    }

    pub fn grid_visible(&self) -> bool {
        self.grid_visible
    }

    pub fn set_grid_visible(&mut self, visible: bool) {
        self.grid_visible = visible;
    }

    pub fn grid_spacing(&self) -> f32 {
        self.grid_spacing
    }

    pub fn markers(&self) -> &MarkerTable {
        &self.markers
    }

    /// Full redraw. Nothing from the previous frame survives.
    pub fn redraw(
        &self,
        pixmap: &mut Pixmap,
        elements: &ElementCollection,
        draft: Option<&ElementKind>,
        draft_color: Color,
    ) {
        pixmap.fill(tiny_skia::Color::WHITE);

        if self.grid_visible {
            self.draw_grid(pixmap);
        }

        for element in elements {
            self.draw_element(pixmap, element.kind(), element.color());
        }

        if let Some(kind) = draft {
            self.draw_element(pixmap, kind, draft_color);
        }
    }

    fn draw_grid(&self, pixmap: &mut Pixmap) {
        let width = pixmap.width() as f32;
        let height = pixmap.height() as f32;

        let mut pb = PathBuilder::new();
        let mut x = 0.0;
        while x <= width {
            pb.move_to(x, 0.0);
            pb.line_to(x, height);
            x += self.grid_spacing;
        }
        let mut y = 0.0;
        while y <= height {
            pb.move_to(0.0, y);
            pb.line_to(width, y);
            y += self.grid_spacing;
        }

        if let Some(path) = pb.finish() {
            let stroke = Stroke {
                width: GRID_WIDTH,
                ..Default::default()
            };
            pixmap.stroke_path(&path, &paint(GRID_COLOR), &stroke, Transform::identity(), None);
        }
    }

    /// Draws one element of any kind with the element's color, except for
    /// measurements (fixed accent) and markers (per-type color).
    pub fn draw_element(&self, pixmap: &mut Pixmap, kind: &ElementKind, color: Color) {
        match kind {
            ElementKind::Rect { start, end } => {
                let (x1, y1, x2, y2) = rect_bounds(start, end);
                let mut pb = PathBuilder::new();
                pb.move_to(x1 as f32, y1 as f32);
                pb.line_to(x2 as f32, y1 as f32);
                pb.line_to(x2 as f32, y2 as f32);
                pb.line_to(x1 as f32, y2 as f32);
                pb.close();
                if let Some(path) = pb.finish() {
                    pixmap.stroke_path(
                        &path,
                        &paint(color),
                        &pen(STROKE_WIDTH),
                        Transform::identity(),
                        None,
                    );
                }
            }
            ElementKind::Line { start, end } => {
                stroke_polyline(pixmap, &[*start, *end], color, &pen(STROKE_WIDTH));
            }
            ElementKind::Freehand { points } => {
                if points.len() > 1 {
                    stroke_polyline(pixmap, points, color, &pen(STROKE_WIDTH));
                }
            }
            ElementKind::Circle { center, rim } => {
                let radius = center.distance_to(rim) as f32;
                if let Some(path) = PathBuilder::from_circle(center.x as f32, center.y as f32, radius)
                {
                    pixmap.stroke_path(
                        &path,
                        &paint(color),
                        &pen(STROKE_WIDTH),
                        Transform::identity(),
                        None,
                    );
                }
            }
            ElementKind::Text { anchor, text } => {
                if !text.is_empty() {
                    let style = TextStyle::new(TEXT_SIZE, FontWeight::Bold, color);
                    typography::draw_text(pixmap, text, anchor.x as f32, anchor.y as f32, &style);
                }
            }
            ElementKind::Measurement { start, end, text } => {
                self.draw_measurement(pixmap, start, end, text);
            }
            ElementKind::Marker { at, marker_type } => {
                let style = self.markers.style(*marker_type);
                if let Some(path) = PathBuilder::from_circle(at.x as f32, at.y as f32, MARKER_RADIUS)
                {
                    pixmap.fill_path(
                        &path,
                        &paint(style.color),
                        FillRule::Winding,
                        Transform::identity(),
                        None,
                    );
                }

                let glyph = style.glyph.to_string();
                let text_style = TextStyle::new(MARKER_GLYPH_SIZE, FontWeight::Bold, Color::WHITE);
                let glyph_width = typography::measure_text(&glyph, &text_style);
                typography::draw_text(
                    pixmap,
                    &glyph,
                    at.x as f32 - glyph_width / 2.0,
                    at.y as f32 + MARKER_GLYPH_SIZE / 2.0 - 2.0,
                    &text_style,
                );
            }
        }
    }

    fn draw_measurement(&self, pixmap: &mut Pixmap, start: &Point, end: &Point, text: &str) {
        let mut dashed = pen(MEASUREMENT_WIDTH);
        dashed.dash = StrokeDash::new(MEASUREMENT_DASH.to_vec(), 0.0);
        stroke_polyline(pixmap, &[*start, *end], MEASUREMENT_ACCENT, &dashed);

        let (nx, ny) = unit_normal(start, end);
        let solid = pen(MEASUREMENT_WIDTH);
        for p in [start, end] {
            let a = Point::new(p.x - nx * MEASUREMENT_CAP, p.y - ny * MEASUREMENT_CAP);
            let b = Point::new(p.x + nx * MEASUREMENT_CAP, p.y + ny * MEASUREMENT_CAP);
            stroke_polyline(pixmap, &[a, b], MEASUREMENT_ACCENT, &solid);
        }

        if text.is_empty() {
            return;
        }

        let mid = start.midpoint(end);
        let (mid_x, mid_y) = (mid.x as f32, mid.y as f32);
        let style = TextStyle::new(MEASUREMENT_TEXT_SIZE, FontWeight::Bold, MEASUREMENT_ACCENT);
        let text_width = typography::measure_text(text, &style);

        let box_left = mid_x - text_width / 2.0 - LABEL_BOX_PADDING;
        let box_top = mid_y - LABEL_BOX_HEIGHT / 2.0;
        let box_width = text_width + LABEL_BOX_PADDING * 2.0;
        if let Some(rect) = tiny_skia::Rect::from_xywh(box_left, box_top, box_width, LABEL_BOX_HEIGHT)
        {
            pixmap.fill_rect(rect, &paint(Color::WHITE), Transform::identity(), None);
            let path = PathBuilder::from_rect(rect);
            pixmap.stroke_path(
                &path,
                &paint(MEASUREMENT_ACCENT),
                &pen(MEASUREMENT_WIDTH),
                Transform::identity(),
                None,
            );
        }

        typography::draw_text(pixmap, text, mid_x - text_width / 2.0, mid_y + 4.0, &style);
    }
}

impl Default for SketchRenderer {
    fn default() -> Self {
        Self::new(MarkerTable::default())
    }
}

/// Unit vector perpendicular to `start → end`; vertical for a zero-length
/// segment.
fn unit_normal(start: &Point, end: &Point) -> (f64, f64) {
    let dx = end.x - start.x;
    let dy = end.y - start.y;
    let len = (dx * dx + dy * dy).sqrt();
    if len < f64::EPSILON {
        (0.0, 1.0)
    } else {
        (-dy / len, dx / len)
    }
}

fn stroke_polyline(pixmap: &mut Pixmap, points: &[Point], color: Color, stroke: &Stroke) {
    let Some((first, rest)) = points.split_first() else {
        return;
    };
    let mut pb = PathBuilder::new();
    pb.move_to(first.x as f32, first.y as f32);
    for p in rest {
        pb.line_to(p.x as f32, p.y as f32);
    }
    if let Some(path) = pb.finish() {
        pixmap.stroke_path(&path, &paint(color), stroke, Transform::identity(), None);
    }
}
