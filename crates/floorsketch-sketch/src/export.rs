//! Export composer: frames the drawing surface into a documentation image.
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │ GRUNDRISS-SKIZZE            Erstellt: d.m.y  │ header
//! ├──────────────────────────────────────────────┤
//! │   ┌──────────────────────────────────────┐   │
//! │   │           surface (1:1 copy)         │   │ padding all around
//! │   └──────────────────────────────────────┘   │
//! ├──────────────────────────────────────────────┤
//! │ caption                       Legende: ● ● ● │ footer
//! └──────────────────────────────────────────────┘
//! ```
//!
//! Output width is `W + 2·padding`, height `H + 2·padding + header + footer`.

use crate::markers::MarkerTable;
use crate::renderer::paint;
use crate::typography::{self, FontWeight, TextStyle};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use chrono::NaiveDate;
use floorsketch_core::{Color, Result, SketchError};
use image::{ImageFormat, RgbaImage};
use serde::{Deserialize, Serialize};
use std::io::Cursor;
use tiny_skia::{FillRule, PathBuilder, Pixmap, PixmapPaint, Rect, Stroke, Transform};
use tracing::debug;

pub const DATA_URI_PREFIX: &str = "data:image/png;base64,";

const TITLE_SIZE: f32 = 20.0;
const DATE_SIZE: f32 = 12.0;
const CAPTION_SIZE: f32 = 10.0;
const LEGEND_SIZE: f32 = 9.0;
const LEGEND_WIDTH: f32 = 200.0;
const LEGEND_STEP: f32 = 50.0;
const LEGEND_DOT_RADIUS: f32 = 5.0;
const DATE_SLOT: f32 = 120.0;

/// Frame geometry, texts and colors of the exported image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportLayout {
    pub padding: u32,
    pub header_height: u32,
    pub footer_height: u32,
    pub title: String,
    pub date_prefix: String,
    pub caption: String,
    pub legend_title: String,
    pub header_color: Color,
    pub title_color: Color,
    pub date_color: Color,
    pub border_color: Color,
    pub footer_color: Color,
    pub caption_color: Color,
    pub legend_color: Color,
}

impl Default for ExportLayout {
    fn default() -> Self {
        Self {
            padding: 40,
            header_height: 60,
            footer_height: 40,
            title: "GRUNDRISS-SKIZZE".to_string(),
            date_prefix: "Erstellt:".to_string(),
            caption: "SANEO SCHADENSERVICE GMBH • Technische Dokumentation".to_string(),
            legend_title: "Legende:".to_string(),
            header_color: Color::rgb(0x00, 0x2d, 0x5b),
            title_color: Color::WHITE,
            date_color: Color::rgb(0x89, 0xd9, 0x00),
            border_color: Color::rgb(0xe5, 0xe7, 0xeb),
            footer_color: Color::rgb(0xf8, 0xfa, 0xfc),
            caption_color: Color::rgb(0x94, 0xa3, 0xb8),
            legend_color: Color::rgb(0x64, 0x74, 0x8b),
        }
    }
}

impl ExportLayout {
    /// Output size for a surface of `width × height`, or `None` when it
    /// does not fit in `u32`.
    pub fn output_size(&self, width: u32, height: u32) -> Option<(u32, u32)> {
        let frame = self.padding.checked_mul(2)?;
        let out_w = width.checked_add(frame)?;
        let out_h = height
            .checked_add(frame)?
            .checked_add(self.header_height)?
            .checked_add(self.footer_height)?;
        Some((out_w, out_h))
    }

    /// Top-left corner of the surface copy inside the output.
    pub fn surface_origin(&self) -> (u32, u32) {
        (self.padding, self.header_height.saturating_add(self.padding))
    }
}

/// `d.m.yyyy` without leading zeros.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%-d.%-m.%Y").to_string()
}

#[derive(Debug, Clone, Default)]
pub struct ExportComposer {
    layout: ExportLayout,
}

impl ExportComposer {
    pub fn new(layout: ExportLayout) -> Self {
        Self { layout }
    }

    pub fn layout(&self) -> &ExportLayout {
        &self.layout
    }

    /// Builds the framed image from the current surface content.
    pub fn compose(&self, surface: &Pixmap, date: NaiveDate, markers: &MarkerTable) -> Result<Pixmap> {
        let layout = &self.layout;
        let (width, height) = (surface.width(), surface.height());
        let (out_w, out_h) = layout
            .output_size(width, height)
            .ok_or(SketchError::InvalidDimensions { width, height })?;
        let mut out = Pixmap::new(out_w, out_h).ok_or(SketchError::InvalidDimensions {
            width: out_w,
            height: out_h,
        })?;
        debug!("Composing export {}x{}", out_w, out_h);

        let (w_out, h_out) = (out_w as f32, out_h as f32);
        let padding = layout.padding as f32;
        let header = layout.header_height as f32;
        let footer = layout.footer_height as f32;

        out.fill(tiny_skia::Color::WHITE);

        // Header
        fill_rect(&mut out, 0.0, 0.0, w_out, header, layout.header_color);
        typography::draw_text(
            &mut out,
            &layout.title,
            padding,
            38.0,
            &TextStyle::new(TITLE_SIZE, FontWeight::Bold, layout.title_color),
        );
        let created = format!("{} {}", layout.date_prefix, format_date(date));
        typography::draw_text(
            &mut out,
            &created,
            w_out - padding - DATE_SLOT,
            38.0,
            &TextStyle::new(DATE_SIZE, FontWeight::Regular, layout.date_color),
        );

        // Border, then the surface on top of it
        if let Some(rect) = Rect::from_xywh(
            padding - 1.0,
            header + padding - 1.0,
            surface.width() as f32 + 2.0,
            surface.height() as f32 + 2.0,
        ) {
            let stroke = Stroke {
                width: 1.0,
                ..Default::default()
            };
            out.stroke_path(
                &PathBuilder::from_rect(rect),
                &paint(layout.border_color),
                &stroke,
                Transform::identity(),
                None,
            );
        }
        let (x, y) = layout.surface_origin();
        out.draw_pixmap(
            x as i32,
            y as i32,
            surface.as_ref(),
            &PixmapPaint::default(),
            Transform::identity(),
            None,
        );

        // Footer
        let footer_top = h_out - footer;
        fill_rect(&mut out, 0.0, footer_top, w_out, footer, layout.footer_color);
        fill_rect(&mut out, 0.0, footer_top, w_out, 1.0, layout.border_color);
        typography::draw_text(
            &mut out,
            &layout.caption,
            padding,
            h_out - 15.0,
            &TextStyle::new(CAPTION_SIZE, FontWeight::Regular, layout.caption_color),
        );

        let legend_x = w_out - padding - LEGEND_WIDTH;
        let legend_style = TextStyle::new(LEGEND_SIZE, FontWeight::Regular, layout.legend_color);
        typography::draw_text(&mut out, &layout.legend_title, legend_x, h_out - 25.0, &legend_style);

        let mut offset = 0.0;
        for (_, style) in markers.iter() {
            if let Some(dot) =
                PathBuilder::from_circle(legend_x + 50.0 + offset, h_out - 22.0, LEGEND_DOT_RADIUS)
            {
                out.fill_path(
                    &dot,
                    &paint(style.color),
                    FillRule::Winding,
                    Transform::identity(),
                    None,
                );
            }
            typography::draw_text(
                &mut out,
                &style.label,
                legend_x + 58.0 + offset,
                h_out - 18.0,
                &legend_style,
            );
            offset += LEGEND_STEP;
        }

        Ok(out)
    }
}

fn fill_rect(pixmap: &mut Pixmap, x: f32, y: f32, w: f32, h: f32, color: Color) {
    if let Some(rect) = Rect::from_xywh(x, y, w, h) {
        pixmap.fill_rect(rect, &paint(color), Transform::identity(), None);
    }
}

/// Encodes a pixmap as PNG bytes.
pub fn encode_png(pixmap: &Pixmap) -> Result<Vec<u8>> {
    let mut rgba = RgbaImage::new(pixmap.width(), pixmap.height());
    for (dst, src) in rgba.pixels_mut().zip(pixmap.pixels()) {
        let c = src.demultiply();
        *dst = image::Rgba([c.red(), c.green(), c.blue(), c.alpha()]);
    }

    let mut bytes = Vec::new();
    rgba.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .map_err(|e| SketchError::Encode {
            reason: e.to_string(),
        })?;
    Ok(bytes)
}

/// Wraps PNG bytes as a `data:image/png;base64,` URI.
pub fn to_data_uri(png: &[u8]) -> String {
    format!("{}{}", DATA_URI_PREFIX, STANDARD.encode(png))
}
