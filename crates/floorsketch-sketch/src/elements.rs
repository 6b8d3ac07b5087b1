//! Committed sketch elements and the append-only collection holding them.

use crate::markers::MarkerKind;
use floorsketch_core::{Color, Point};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier of a committed element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(Uuid);

impl ElementId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ElementId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Geometry and payload of an element, one variant per kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ElementKind {
    /// Opposite corners, in drag order.
    Rect { start: Point, end: Point },
    Line { start: Point, end: Point },
    /// Center and a point on the rim.
    Circle { center: Point, rim: Point },
    Freehand { points: Vec<Point> },
    /// `anchor` is the text baseline origin.
    Text { anchor: Point, text: String },
    Measurement { start: Point, end: Point, text: String },
    Marker {
        at: Point,
        #[serde(rename = "markerType")]
        marker_type: MarkerKind,
    },
}

impl ElementKind {
    /// Ordered point sequence; its meaning depends on the kind.
    pub fn points(&self) -> Vec<Point> {
        match self {
            Self::Rect { start, end }
            | Self::Line { start, end }
            | Self::Measurement { start, end, .. } => vec![*start, *end],
            Self::Circle { center, rim } => vec![*center, *rim],
            Self::Freehand { points } => points.clone(),
            Self::Text { anchor, .. } => vec![*anchor],
            Self::Marker { at, .. } => vec![*at],
        }
    }

    /// Label text for `text` and `measurement` elements.
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Text { text, .. } | Self::Measurement { text, .. } => Some(text),
            _ => None,
        }
    }

    pub fn marker_type(&self) -> Option<MarkerKind> {
        match self {
            Self::Marker { marker_type, .. } => Some(*marker_type),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Rect { .. } => "rect",
            Self::Line { .. } => "line",
            Self::Circle { .. } => "circle",
            Self::Freehand { .. } => "freehand",
            Self::Text { .. } => "text",
            Self::Measurement { .. } => "measurement",
            Self::Marker { .. } => "marker",
        }
    }
}

/// A finalized annotation. Fields are private so an element cannot change
/// after it has been committed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawnElement {
    id: ElementId,
    color: Color,
    #[serde(flatten)]
    kind: ElementKind,
}

impl DrawnElement {
    pub fn new(kind: ElementKind, color: Color) -> Self {
        Self {
            id: ElementId::new(),
            color,
            kind,
        }
    }

    pub fn id(&self) -> ElementId {
        self.id
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn kind(&self) -> &ElementKind {
        &self.kind
    }

    pub fn points(&self) -> Vec<Point> {
        self.kind.points()
    }
}

/// Append-only list of committed elements in insertion order.
#[derive(Debug, Clone, Default)]
pub struct ElementCollection {
    elements: Vec<DrawnElement>,
}

impl ElementCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, element: DrawnElement) {
        self.elements.push(element);
    }

    /// Removes and returns the most recently appended element.
    pub fn undo(&mut self) -> Option<DrawnElement> {
        self.elements.pop()
    }

    pub fn clear(&mut self) {
        self.elements.clear();
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn last(&self) -> Option<&DrawnElement> {
        self.elements.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DrawnElement> {
        self.elements.iter()
    }

    pub fn as_slice(&self) -> &[DrawnElement] {
        &self.elements
    }
}

impl<'a> IntoIterator for &'a ElementCollection {
    type Item = &'a DrawnElement;
    type IntoIter = std::slice::Iter<'a, DrawnElement>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}
