//! Scripted replay of input events against a sketch session.
//!
//! A script is a JSON document:
//!
//! ```json
//! {
//!   "events": [
//!     { "event": "tool", "tool": "marker" },
//!     { "event": "marker", "marker": "water" },
//!     { "event": "start", "x": 100, "y": 100 },
//!     { "event": "commit", "date": "2024-05-01" }
//!   ]
//! }
//! ```
//!
//! Coordinates are client coordinates and go through the session viewport.

use anyhow::Context;
use chrono::NaiveDate;
use floorsketch_sketch::{
    Color, DrawnElement, ExportArtifact, MarkerKind, MouseInput, SessionOptions, SessionStatus,
    SketchHost, SketchSession, Tool, TouchInput,
};
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZoomStep {
    In,
    Out,
    Reset,
}

/// One recorded user action.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "event", rename_all = "lowercase")]
pub enum ReplayEvent {
    Tool { tool: Tool },
    Color { color: Color },
    Marker { marker: MarkerKind },
    /// Sets the grid; toggles when `visible` is omitted.
    Grid { visible: Option<bool> },
    Zoom { step: ZoomStep },
    Offset { left: f64, top: f64 },
    Start {
        x: f64,
        y: f64,
        #[serde(default)]
        touch: bool,
    },
    Move {
        x: f64,
        y: f64,
        #[serde(default)]
        touch: bool,
    },
    End,
    Label { text: String },
    Cancel,
    Undo,
    Clear { confirm: bool },
    Commit { date: Option<NaiveDate> },
    Close,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ReplayScript {
    #[serde(default)]
    pub existing_sketch: Option<String>,
    pub events: Vec<ReplayEvent>,
}

impl ReplayScript {
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        serde_json::from_str(json).context("Invalid replay script")
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read replay script {}", path.display()))?;
        Self::from_json(&content)
    }
}

/// Host that records callbacks and answers the clear prompt as scripted.
#[derive(Debug, Default)]
pub struct ReplayHost {
    pub saved: Option<String>,
    pub closed: bool,
    clear_answer: bool,
}

impl SketchHost for ReplayHost {
    fn on_save(&mut self, data_uri: String) {
        self.saved = Some(data_uri);
    }

    fn on_close(&mut self) {
        self.closed = true;
    }

    fn confirm_clear(&mut self) -> bool {
        self.clear_answer
    }
}

#[derive(Debug)]
pub struct ReplayOutcome {
    pub status: SessionStatus,
    pub elements: Vec<DrawnElement>,
    pub artifact: Option<ExportArtifact>,
    pub host: ReplayHost,
}

/// Mounts a fresh session, feeds it every event and reports the result.
pub fn run(script: &ReplayScript, options: SessionOptions) -> anyhow::Result<ReplayOutcome> {
    let mut session = SketchSession::with_existing_sketch(
        ReplayHost::default(),
        options,
        script.existing_sketch.as_deref(),
    );
    session.mount().context("Failed to mount sketch surface")?;

    let mut artifact = None;
    for (index, event) in script.events.iter().enumerate() {
        debug!("Replaying event {}: {:?}", index, event);
        match event {
            ReplayEvent::Tool { tool } => session.select_tool(*tool),
            ReplayEvent::Color { color } => session.select_color(*color),
            ReplayEvent::Marker { marker } => session.select_marker(*marker),
            ReplayEvent::Grid { visible } => match visible {
                Some(visible) => session.set_grid_visible(*visible),
                None => session.toggle_grid(),
            },
            ReplayEvent::Zoom { step } => match step {
                ZoomStep::In => session.zoom_in(),
                ZoomStep::Out => session.zoom_out(),
                ZoomStep::Reset => session.reset_zoom(),
            },
            ReplayEvent::Offset { left, top } => session.set_surface_offset(*left, *top),
            ReplayEvent::Start { x, y, touch: true } => session.pointer_down(&TouchInput {
                touches: vec![(*x, *y)],
            }),
            ReplayEvent::Start { x, y, touch: false } => session.pointer_down(&MouseInput {
                client_x: *x,
                client_y: *y,
            }),
            ReplayEvent::Move { x, y, touch: true } => session.pointer_move(&TouchInput {
                touches: vec![(*x, *y)],
            }),
            ReplayEvent::Move { x, y, touch: false } => session.pointer_move(&MouseInput {
                client_x: *x,
                client_y: *y,
            }),
            ReplayEvent::End => session.pointer_up(),
            ReplayEvent::Label { text } => session.confirm_label(text),
            ReplayEvent::Cancel => session.cancel_label(),
            ReplayEvent::Undo => session.undo(),
            ReplayEvent::Clear { confirm } => {
                session.host_mut().clear_answer = *confirm;
                session.clear();
            }
            ReplayEvent::Commit { date } => {
                let result = match date {
                    Some(date) => session.commit_on(*date),
                    None => session.commit(),
                };
                if result.is_some() {
                    artifact = result;
                }
            }
            ReplayEvent::Close => session.close(),
        }
    }

    info!(
        "Replayed {} event(s), {} element(s) on the surface",
        script.events.len(),
        session.controller().elements().len()
    );

    Ok(ReplayOutcome {
        status: session.status(),
        elements: session.controller().elements().as_slice().to_vec(),
        artifact,
        host: session.into_host(),
    })
}
