//! Marker categories and their fixed presentation.
//!
//! The table is plain configuration: the controller reads it to color a new
//! marker, the renderer reads it for the disc and glyph and the export
//! composer reads it for the legend. Nothing holds it as shared state.

use floorsketch_core::Color;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Fixed-category point annotation kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerKind {
    Damage,
    Water,
    Fire,
    Mold,
}

impl MarkerKind {
    /// All kinds in legend order.
    pub const ALL: [MarkerKind; 4] = [
        MarkerKind::Damage,
        MarkerKind::Water,
        MarkerKind::Fire,
        MarkerKind::Mold,
    ];
}

impl Default for MarkerKind {
    fn default() -> Self {
        Self::Damage
    }
}

impl fmt::Display for MarkerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Damage => write!(f, "damage"),
            Self::Water => write!(f, "water"),
            Self::Fire => write!(f, "fire"),
            Self::Mold => write!(f, "mold"),
        }
    }
}

impl FromStr for MarkerKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "damage" => Ok(Self::Damage),
            "water" => Ok(Self::Water),
            "fire" => Ok(Self::Fire),
            "mold" => Ok(Self::Mold),
            _ => Err(format!("Unknown marker type: {}", s)),
        }
    }
}

/// Color, glyph and legend label of one marker kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerStyle {
    pub color: Color,
    pub glyph: char,
    pub label: String,
}

impl MarkerStyle {
    fn new(color: Color, glyph: char, label: &str) -> Self {
        Self {
            color,
            glyph,
            label: label.to_string(),
        }
    }
}

/// Marker kind → presentation lookup, one entry per kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerTable {
    pub damage: MarkerStyle,
    pub water: MarkerStyle,
    pub fire: MarkerStyle,
    pub mold: MarkerStyle,
}

impl MarkerTable {
    pub fn style(&self, kind: MarkerKind) -> &MarkerStyle {
        match kind {
            MarkerKind::Damage => &self.damage,
            MarkerKind::Water => &self.water,
            MarkerKind::Fire => &self.fire,
            MarkerKind::Mold => &self.mold,
        }
    }

    pub fn color(&self, kind: MarkerKind) -> Color {
        self.style(kind).color
    }

    /// Entries in legend order.
    pub fn iter(&self) -> impl Iterator<Item = (MarkerKind, &MarkerStyle)> {
        MarkerKind::ALL.into_iter().map(move |kind| (kind, self.style(kind)))
    }
}

impl Default for MarkerTable {
    fn default() -> Self {
        Self {
            damage: MarkerStyle::new(Color::rgb(0xef, 0x44, 0x44), '!', "Schaden"),
            water: MarkerStyle::new(Color::rgb(0x3b, 0x82, 0xf6), '~', "Wasser"),
            fire: MarkerStyle::new(Color::rgb(0xf9, 0x73, 0x16), '*', "Brand"),
            mold: MarkerStyle::new(Color::rgb(0x22, 0xc5, 0x5e), '●', "Schimmel"),
        }
    }
}
