//! # floorsketch Sketch
//!
//! Freehand floorplan annotation: a fixed-size raster surface on which a
//! user draws walls, rooms, labels, measurements and damage markers, and an
//! export step that frames the result into a dated documentation image.
//!
//! ## Architecture
//!
//! ```text
//! SketchSession (host callbacks, surface ownership)
//!   ├── SurfaceViewport (client → surface mapping, zoom)
//!   ├── SketchController (tool state machine)
//!   │     └── ElementCollection (committed elements, undo)
//!   ├── SketchRenderer (full redraw, grid, draft preview)
//!   └── ExportComposer (header, border, footer, legend → PNG data URI)
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use floorsketch_sketch::{SessionOptions, SketchSession, Tool};
//!
//! let mut session = SketchSession::new(host, SessionOptions::default());
//! session.mount()?;
//! session.select_tool(Tool::Line);
//! session.pointer_down(&(10.0, 10.0));
//! session.pointer_move(&(200.0, 10.0));
//! session.pointer_up();
//! session.commit();
//! ```

pub mod controller;
pub mod elements;
pub mod export;
pub mod markers;
pub mod renderer;
pub mod session;
pub mod tools;
pub mod typography;
pub mod viewport;

pub use controller::{Draft, InteractionState, PendingLabel, SketchController};
pub use elements::{DrawnElement, ElementCollection, ElementId, ElementKind};
pub use export::{encode_png, format_date, to_data_uri, ExportComposer, ExportLayout, DATA_URI_PREFIX};
pub use markers::{MarkerKind, MarkerStyle, MarkerTable};
pub use renderer::{rect_bounds, SketchRenderer};
pub use session::{ExportArtifact, SessionOptions, SessionStatus, SketchHost, SketchSession};
pub use tools::{default_palette, PaletteColor, Tool, MEASUREMENT_ACCENT};
pub use viewport::{MouseInput, PointerInput, SurfaceViewport, TouchInput};

pub use floorsketch_core::{Color, Point};
