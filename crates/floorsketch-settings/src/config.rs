//! Configuration management for floorsketch
//!
//! Provides configuration file handling and validation. Supports JSON and
//! TOML file formats; the default location is platform-specific.
//!
//! Configuration is organized into sections:
//! - Surface (size, grid)
//! - Palette (pen colors, first entry is the default pen)
//! - Markers (color, glyph and legend label per marker kind)
//! - Export (frame geometry, texts, colors)

use crate::error::{ConfigError, SettingsError, SettingsResult};
use floorsketch_core::Color;
use floorsketch_sketch::{default_palette, ExportLayout, MarkerTable, PaletteColor, SessionOptions};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Largest accepted surface edge in pixels.
pub const MAX_SURFACE_EDGE: u32 = 8192;

/// Drawing surface settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceSettings {
    /// Surface width in pixels
    pub width: u32,
    /// Surface height in pixels
    pub height: u32,
    /// Show the reference grid when a session opens
    pub grid_visible: bool,
    /// Grid line spacing in surface units
    pub grid_spacing: f32,
}

impl Default for SurfaceSettings {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            grid_visible: true,
            grid_spacing: 20.0,
        }
    }
}

/// Complete application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub surface: SurfaceSettings,
    pub palette: Vec<PaletteColor>,
    pub markers: MarkerTable,
    pub export: ExportLayout,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            surface: SurfaceSettings::default(),
            palette: default_palette(),
            markers: MarkerTable::default(),
            export: ExportLayout::default(),
        }
    }
}

enum Format {
    Json,
    Toml,
}

fn format_of(path: &Path) -> SettingsResult<Format> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => Ok(Format::Json),
        Some("toml") => Ok(Format::Toml),
        other => Err(ConfigError::UnsupportedFormat(other.unwrap_or("").to_string()).into()),
    }
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// `<config dir>/floorsketch/config.toml`
    pub fn default_path() -> SettingsResult<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join("floorsketch").join("config.toml"))
            .ok_or_else(|| {
                SettingsError::ConfigDirectory("No configuration directory on this platform".into())
            })
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = format_of(path)?;
        let content = std::fs::read_to_string(path)?;

        let config: Self = match format {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Loads `path` when given, otherwise the default location if a file
    /// exists there, otherwise the built-in defaults.
    pub fn load_or_default(path: Option<&Path>) -> SettingsResult<Self> {
        if let Some(path) = path {
            return Self::load_from_file(path);
        }
        match Self::default_path() {
            Ok(default) if default.exists() => Self::load_from_file(&default),
            _ => {
                debug!("No configuration file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Save config to file (JSON or TOML), creating parent directories
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match format_of(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        info!("Saved configuration to {}", path.display());
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let surface = &self.surface;
        if surface.width == 0 || surface.width > MAX_SURFACE_EDGE {
            return Err(ConfigError::out_of_range("surface.width", surface.width));
        }
        if surface.height == 0 || surface.height > MAX_SURFACE_EDGE {
            return Err(ConfigError::out_of_range("surface.height", surface.height));
        }
        if !surface.grid_spacing.is_finite() || surface.grid_spacing <= 0.0 {
            return Err(ConfigError::out_of_range(
                "surface.grid_spacing",
                surface.grid_spacing,
            ));
        }

        if self.palette.is_empty() {
            return Err(ConfigError::Empty("palette".to_string()));
        }

        if self.export.padding > MAX_SURFACE_EDGE {
            return Err(ConfigError::out_of_range("export.padding", self.export.padding));
        }
        if self.export.header_height > MAX_SURFACE_EDGE {
            return Err(ConfigError::out_of_range(
                "export.header_height",
                self.export.header_height,
            ));
        }
        if self.export.footer_height > MAX_SURFACE_EDGE {
            return Err(ConfigError::out_of_range(
                "export.footer_height",
                self.export.footer_height,
            ));
        }

        Ok(())
    }

    /// Pen active when a session opens.
    pub fn default_color(&self) -> Color {
        self.palette
            .first()
            .map(|entry| entry.value)
            .unwrap_or(Color::rgb(0x1e, 0x40, 0xaf))
    }

    pub fn session_options(&self) -> SessionOptions {
        SessionOptions {
            width: self.surface.width,
            height: self.surface.height,
            grid_visible: self.surface.grid_visible,
            grid_spacing: self.surface.grid_spacing,
            default_color: self.default_color(),
            markers: self.markers.clone(),
            export: self.export.clone(),
        }
    }
}
