//! # floorsketch
//!
//! Floorplan sketch engine for damage documentation reports:
//! - Rooms, walls, freehand strokes, text labels and measurement lines
//! - Damage, water, fire and mold markers with a fixed legend
//! - Undo, clear-with-confirmation, reference grid and zoom
//! - Export to a framed, dated PNG handed over as a data URI
//!
//! ## Architecture
//!
//! floorsketch is organized as a workspace with multiple crates:
//!
//! 1. **floorsketch-core** - Points, colors and the error taxonomy
//! 2. **floorsketch-sketch** - Element model, interaction controller, renderer, export, session
//! 3. **floorsketch-settings** - Configuration files and validation
//! 4. **floorsketch** - Main binary: scripted replay and configuration inspection

pub mod replay;

pub use floorsketch_core::{Color, Error, Point, Result, SketchError};
pub use floorsketch_settings::{Config, ConfigError, SettingsError};
pub use floorsketch_sketch::{
    DrawnElement, ElementCollection, ElementKind, ExportComposer, ExportLayout, MarkerKind,
    MarkerTable, SessionOptions, SessionStatus, SketchController, SketchHost, SketchRenderer,
    SketchSession, SurfaceViewport, Tool,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Pretty formatted output on stderr, keeping stdout for command output
/// - RUST_LOG environment variable support (default level `info`)
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
