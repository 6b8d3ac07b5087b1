//! Drawing tools and the pen palette.

use floorsketch_core::Color;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Fixed accent used for measurement elements regardless of the pen color.
pub const MEASUREMENT_ACCENT: Color = Color::rgb(0x63, 0x66, 0xf1);

/// Tool selected in the toolbar; decides how pointer events are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    Rect,
    Line,
    Freehand,
    Measurement,
    Text,
    Marker,
}

impl Tool {
    /// Toolbar order.
    pub const ALL: [Tool; 6] = [
        Tool::Rect,
        Tool::Line,
        Tool::Freehand,
        Tool::Measurement,
        Tool::Text,
        Tool::Marker,
    ];

    /// Toolbar tooltip.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Rect => "Rechteck (Raum)",
            Self::Line => "Linie (Wand)",
            Self::Freehand => "Freihand",
            Self::Measurement => "Maßlinie",
            Self::Text => "Text",
            Self::Marker => "Marker",
        }
    }

    /// True for tools that need a label before anything is committed.
    pub fn needs_label(&self) -> bool {
        matches!(self, Self::Text | Self::Measurement)
    }
}

impl Default for Tool {
    fn default() -> Self {
        Self::Rect
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rect => write!(f, "rect"),
            Self::Line => write!(f, "line"),
            Self::Freehand => write!(f, "freehand"),
            Self::Measurement => write!(f, "measurement"),
            Self::Text => write!(f, "text"),
            Self::Marker => write!(f, "marker"),
        }
    }
}

impl FromStr for Tool {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "rect" | "rectangle" => Ok(Self::Rect),
            "line" => Ok(Self::Line),
            "freehand" | "pen" => Ok(Self::Freehand),
            "measurement" => Ok(Self::Measurement),
            "text" => Ok(Self::Text),
            "marker" => Ok(Self::Marker),
            _ => Err(format!("Unknown tool: {}", s)),
        }
    }
}

/// A selectable pen color with its meaning on the floorplan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaletteColor {
    pub value: Color,
    pub label: String,
}

/// The stock pen palette; the first entry is the default pen.
pub fn default_palette() -> Vec<PaletteColor> {
    [
        ((0x1e, 0x40, 0xaf), "Blau (Wände)"),
        ((0xdc, 0x26, 0x26), "Rot (Schaden)"),
        ((0x16, 0xa3, 0x4a), "Grün (OK)"),
        ((0xca, 0x8a, 0x04), "Gelb (Warnung)"),
        ((0x6b, 0x72, 0x80), "Grau (Möbel)"),
        ((0x08, 0x91, 0xb2), "Cyan (Wasser)"),
    ]
    .into_iter()
    .map(|((r, g, b), label)| PaletteColor {
        value: Color::rgb(r, g, b),
        label: label.to_string(),
    })
    .collect()
}
