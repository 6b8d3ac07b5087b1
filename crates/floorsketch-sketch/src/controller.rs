//! Interaction controller: pointer events → element construction.
//!
//! ```text
//!            start (rect/line/freehand/measurement)
//!   Idle ───────────────────────────────────────▶ Drawing
//!    ▲  ▲                                           │ end
//!    │  └──────────── commit (rect/line/freehand) ──┤
//!    │                                              │ end (measurement)
//!    │    start (text)                              ▼
//!    └───────────── confirm / cancel ◀────── AwaitingLabel
//! ```
//!
//! `marker` commits on `start` without leaving `Idle`. Every method runs to
//! completion synchronously and reports whether the surface must be redrawn.

use crate::elements::{DrawnElement, ElementCollection, ElementKind};
use crate::markers::{MarkerKind, MarkerTable};
use crate::tools::{Tool, MEASUREMENT_ACCENT};
use floorsketch_core::{Color, Point};
use tracing::debug;

/// Geometry captured while the pointer is down.
#[derive(Debug, Clone, PartialEq)]
pub struct Draft {
    anchor: Point,
    /// Starts as `[anchor]`. Segment tools keep only the latest point here;
    /// freehand appends every sample.
    points: Vec<Point>,
}

impl Draft {
    fn new(anchor: Point) -> Self {
        Self {
            anchor,
            points: vec![anchor],
        }
    }

    pub fn anchor(&self) -> Point {
        self.anchor
    }

    /// Last known pointer position, falling back to the anchor.
    pub fn current(&self) -> Point {
        self.points.last().copied().unwrap_or(self.anchor)
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }
}

/// Geometry waiting for its label prompt to be answered.
#[derive(Debug, Clone, PartialEq)]
pub enum PendingLabel {
    Text { anchor: Point },
    Measurement { start: Point, end: Point },
}

#[derive(Debug, Clone, PartialEq)]
pub enum InteractionState {
    Idle,
    Drawing(Draft),
    AwaitingLabel(PendingLabel),
}

/// Owns the committed collection and the transient draft of one session.
#[derive(Debug, Clone)]
pub struct SketchController {
    tool: Tool,
    marker: MarkerKind,
    color: Color,
    markers: MarkerTable,
    state: InteractionState,
    elements: ElementCollection,
}

impl SketchController {
    pub fn new(markers: MarkerTable, color: Color) -> Self {
        Self {
            tool: Tool::default(),
            marker: MarkerKind::default(),
            color,
            markers,
            state: InteractionState::Idle,
            elements: ElementCollection::new(),
        }
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn marker(&self) -> MarkerKind {
        self.marker
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn markers(&self) -> &MarkerTable {
        &self.markers
    }

    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    pub fn elements(&self) -> &ElementCollection {
        &self.elements
    }

    pub fn is_drawing(&self) -> bool {
        matches!(self.state, InteractionState::Drawing(_))
    }

    pub fn pending_label(&self) -> Option<&PendingLabel> {
        match &self.state {
            InteractionState::AwaitingLabel(pending) => Some(pending),
            _ => None,
        }
    }

    /// Selects a tool. An in-progress draft is abandoned; while a label
    /// prompt is open the selection is ignored.
    pub fn set_tool(&mut self, tool: Tool) -> bool {
        match self.state {
            InteractionState::AwaitingLabel(_) => false,
            InteractionState::Drawing(_) => {
                debug!("Tool change to {} abandons in-progress draft", tool);
                self.tool = tool;
                self.state = InteractionState::Idle;
                true
            }
            InteractionState::Idle => {
                self.tool = tool;
                false
            }
        }
    }

    pub fn set_marker(&mut self, marker: MarkerKind) {
        self.marker = marker;
    }

    /// Changes the pen. Returns true when a live preview needs recoloring.
    pub fn set_color(&mut self, color: Color) -> bool {
        self.color = color;
        self.is_drawing()
    }

    pub fn pointer_start(&mut self, point: Point) -> bool {
        if !matches!(self.state, InteractionState::Idle) {
            return false;
        }

        match self.tool {
            Tool::Marker => {
                let kind = ElementKind::Marker {
                    at: point,
                    marker_type: self.marker,
                };
                let color = self.markers.color(self.marker);
                self.commit(kind, color);
                true
            }
            Tool::Text => {
                debug!("Text prompt opened at {}", point);
                self.state = InteractionState::AwaitingLabel(PendingLabel::Text { anchor: point });
                false
            }
            Tool::Rect | Tool::Line | Tool::Freehand | Tool::Measurement => {
                self.state = InteractionState::Drawing(Draft::new(point));
                true
            }
        }
    }

    pub fn pointer_move(&mut self, point: Point) -> bool {
        let InteractionState::Drawing(draft) = &mut self.state else {
            return false;
        };

        if self.tool == Tool::Freehand {
            draft.points.push(point);
        } else {
            draft.points.clear();
            draft.points.push(point);
        }
        true
    }

    pub fn pointer_end(&mut self) -> bool {
        let draft = match std::mem::replace(&mut self.state, InteractionState::Idle) {
            InteractionState::Drawing(draft) => draft,
            other => {
                self.state = other;
                return false;
            }
        };

        let start = draft.anchor();
        let end = draft.current();
        match self.tool {
            Tool::Rect => self.commit(ElementKind::Rect { start, end }, self.color),
            Tool::Line => self.commit(ElementKind::Line { start, end }, self.color),
            Tool::Freehand => {
                if draft.points.len() >= 2 {
                    self.commit(
                        ElementKind::Freehand {
                            points: draft.points,
                        },
                        self.color,
                    );
                } else {
                    debug!("Discarding freehand stroke with {} point(s)", draft.points.len());
                }
            }
            Tool::Measurement => {
                debug!("Measurement prompt opened for {} → {}", start, end);
                self.state =
                    InteractionState::AwaitingLabel(PendingLabel::Measurement { start, end });
            }
            // Neither tool enters `Drawing`.
            Tool::Text | Tool::Marker => {}
        }
        true
    }

    /// Answers the open label prompt. Text that is empty after trimming
    /// discards the pending geometry; otherwise it is stored as entered.
    ///
    /// Returns true when an element was committed.
    pub fn confirm_label(&mut self, input: &str) -> bool {
        let pending = match std::mem::replace(&mut self.state, InteractionState::Idle) {
            InteractionState::AwaitingLabel(pending) => pending,
            other => {
                self.state = other;
                return false;
            }
        };

        if input.trim().is_empty() {
            debug!("Discarding label prompt with empty input");
            return false;
        }

        let text = input.to_string();
        match pending {
            PendingLabel::Text { anchor } => {
                self.commit(ElementKind::Text { anchor, text }, self.color)
            }
            PendingLabel::Measurement { start, end } => self.commit(
                ElementKind::Measurement { start, end, text },
                MEASUREMENT_ACCENT,
            ),
        }
        true
    }

    /// Closes the open label prompt without committing anything.
    pub fn cancel_label(&mut self) -> bool {
        if matches!(self.state, InteractionState::AwaitingLabel(_)) {
            debug!("Label prompt canceled");
            self.state = InteractionState::Idle;
            true
        } else {
            false
        }
    }

    /// Removes the most recent element; no-op on an empty collection.
    pub fn undo(&mut self) -> Option<DrawnElement> {
        let removed = self.elements.undo();
        if let Some(element) = &removed {
            debug!("Undo removed {} {}", element.kind().name(), element.id());
        }
        removed
    }

    /// Empties the collection when `confirmed`; otherwise leaves it untouched.
    pub fn clear(&mut self, confirmed: bool) -> bool {
        if !confirmed {
            debug!("Clear declined");
            return false;
        }
        debug!("Clearing {} element(s)", self.elements.len());
        self.elements.clear();
        true
    }

    /// In-progress geometry to draw on top of the committed elements.
    pub fn draft_preview(&self) -> Option<ElementKind> {
        let InteractionState::Drawing(draft) = &self.state else {
            return None;
        };

        let start = draft.anchor();
        let end = draft.current();
        let kind = match self.tool {
            Tool::Rect => ElementKind::Rect { start, end },
            Tool::Line => ElementKind::Line { start, end },
            Tool::Freehand => ElementKind::Freehand {
                points: draft.points.clone(),
            },
            Tool::Measurement => ElementKind::Measurement {
                start,
                end,
                text: String::new(),
            },
            Tool::Text | Tool::Marker => return None,
        };
        Some(kind)
    }

    fn commit(&mut self, kind: ElementKind, color: Color) {
        let element = DrawnElement::new(kind, color);
        debug!(
            "Committed {} {} with {} point(s)",
            element.kind().name(),
            element.id(),
            element.points().len()
        );
        self.elements.push(element);
    }
}

impl Default for SketchController {
    fn default() -> Self {
        Self::new(MarkerTable::default(), Color::rgb(0x1e, 0x40, 0xaf))
    }
}
