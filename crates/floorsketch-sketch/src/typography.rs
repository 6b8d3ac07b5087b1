//! Font discovery and text rasterization onto a pixmap.
//!
//! Fonts come from the system font database. When no sans-serif face can
//! be found, drawing calls become no-ops and widths fall back to an
//! estimate so that layouts depending on them (label boxes) stay stable.

use floorsketch_core::Color;
use fontdb::{Database, Family, Query, Stretch, Style, Weight};
use rusttype::{point as rt_point, Font, Scale};
use std::{fs, sync::OnceLock};
use tiny_skia::Pixmap;
use tracing::debug;

/// Average glyph advance as a share of the pixel size, used without a font.
const ESTIMATED_ADVANCE: f32 = 0.6;

/// Regular or bold face.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontWeight {
    Regular,
    Bold,
}

fn db() -> &'static Database {
    static DB: OnceLock<Database> = OnceLock::new();
    DB.get_or_init(|| {
        let mut db = Database::new();
        db.load_system_fonts();
        debug!("Loaded {} system font faces", db.len());
        db
    })
}

/// Sans-serif face of the given weight, cached for the process lifetime.
pub fn sans_font(weight: FontWeight) -> Option<&'static Font<'static>> {
    static REGULAR: OnceLock<Option<Font<'static>>> = OnceLock::new();
    static BOLD: OnceLock<Option<Font<'static>>> = OnceLock::new();

    let cell = match weight {
        FontWeight::Regular => &REGULAR,
        FontWeight::Bold => &BOLD,
    };
    cell.get_or_init(|| {
        let font = load_font_from_system(weight);
        if font.is_none() {
            debug!("No sans-serif {:?} font available, text will be skipped", weight);
        }
        font
    })
    .as_ref()
}

fn load_font_from_system(weight: FontWeight) -> Option<Font<'static>> {
    let families = [Family::SansSerif];
    let query = Query {
        families: &families,
        weight: match weight {
            FontWeight::Regular => Weight::NORMAL,
            FontWeight::Bold => Weight::BOLD,
        },
        stretch: Stretch::Normal,
        style: Style::Normal,
    };

    let id = db().query(&query)?;
    let face = db().face(id)?;
    let index = face.index;

    match &face.source {
        fontdb::Source::File(path) | fontdb::Source::SharedFile(path, _) => {
            let bytes = fs::read(path).ok()?;
            Font::try_from_vec_and_index(bytes, index)
        }
        fontdb::Source::Binary(bytes) => {
            Font::try_from_vec_and_index(bytes.as_ref().as_ref().to_vec(), index)
        }
    }
}

/// Text run description: content, pixel size and weight.
#[derive(Debug, Clone, Copy)]
pub struct TextStyle {
    pub size: f32,
    pub weight: FontWeight,
    pub color: Color,
}

impl TextStyle {
    pub fn new(size: f32, weight: FontWeight, color: Color) -> Self {
        Self {
            size,
            weight,
            color,
        }
    }
}

/// Advance width of `text` in pixels.
pub fn measure_text(text: &str, style: &TextStyle) -> f32 {
    match sans_font(style.weight) {
        Some(font) => {
            let scale = Scale::uniform(style.size);
            font.layout(text, scale, rt_point(0.0, 0.0))
                .last()
                .map(|glyph| glyph.position().x + glyph.unpositioned().h_metrics().advance_width)
                .unwrap_or(0.0)
        }
        None => text.chars().count() as f32 * style.size * ESTIMATED_ADVANCE,
    }
}

/// Draws `text` with its baseline starting at `(x, baseline)`.
pub fn draw_text(pixmap: &mut Pixmap, text: &str, x: f32, baseline: f32, style: &TextStyle) {
    let Some(font) = sans_font(style.weight) else {
        return;
    };

    let scale = Scale::uniform(style.size);
    let width = pixmap.width() as i32;
    let height = pixmap.height() as i32;

    for glyph in font.layout(text, scale, rt_point(x, baseline)) {
        let Some(bounding_box) = glyph.pixel_bounding_box() else {
            continue;
        };
        glyph.draw(|gx, gy, coverage| {
            let px = gx as i32 + bounding_box.min.x;
            let py = gy as i32 + bounding_box.min.y;
            if px >= 0 && px < width && py >= 0 && py < height {
                blend_pixel(pixmap, px as u32, py as u32, style.color, coverage);
            }
        });
    }
}

/// Source-over blend of an opaque color with `coverage` onto one pixel.
fn blend_pixel(pixmap: &mut Pixmap, x: u32, y: u32, color: Color, coverage: f32) {
    let alpha = coverage.clamp(0.0, 1.0);
    if alpha <= 0.0 {
        return;
    }
    let idx = ((y * pixmap.width() + x) * 4) as usize;
    let pixel = &mut pixmap.data_mut()[idx..idx + 4];

    // Pixmap data is premultiplied RGBA.
    let mix = |dst: u8, src: u8| -> u8 {
        (src as f32 * alpha + dst as f32 * (1.0 - alpha)).round() as u8
    };
    pixel[0] = mix(pixel[0], color.r);
    pixel[1] = mix(pixel[1], color.g);
    pixel[2] = mix(pixel[2], color.b);
    pixel[3] = mix(pixel[3], 255);
}
