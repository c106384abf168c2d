//! Graph nodes identified by string ids.
//!
//! A node's identity is its id alone: equality and hashing ignore the
//! coordinate and label. Coordinates are fixed at construction because the
//! A* heuristic reads them; the label is display-only and may be changed.

use std::fmt;
use std::hash::{Hash, Hasher};

use crate::error::{GraphError, Result};

/// A graph node with a unique id, a 2D coordinate and a display label.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Node {
    id: String,
    x: f64,
    y: f64,
    label: String,
}

impl Node {
    /// Create a node at the origin, labelled with its id.
    pub fn new(id: impl Into<String>) -> Result<Self> {
        Self::with_label(id, 0.0, 0.0, "")
    }

    /// Create a node at the given coordinate, labelled with its id.
    pub fn at(id: impl Into<String>, x: f64, y: f64) -> Result<Self> {
        Self::with_label(id, x, y, "")
    }

    /// Create a node with an explicit label. An empty label falls back to the id.
    pub fn with_label(
        id: impl Into<String>,
        x: f64,
        y: f64,
        label: impl Into<String>,
    ) -> Result<Self> {
        let id = id.into();
        if id.is_empty() {
            return Err(GraphError::EmptyId);
        }
        let label = label.into();
        let label = if label.is_empty() { id.clone() } else { label };
        Ok(Self { id, x, y, label })
    }

    /// The unique id of this node.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// X coordinate, used only as heuristic input.
    pub fn x(&self) -> f64 {
        self.x
    }

    /// Y coordinate, used only as heuristic input.
    pub fn y(&self) -> f64 {
        self.y
    }

    /// Display label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Change the display label. An empty label falls back to the id.
    pub fn set_label(&mut self, label: impl Into<String>) {
        let label = label.into();
        self.label = if label.is_empty() {
            self.id.clone()
        } else {
            label
        };
    }

    /// Euclidean distance to another node's coordinate.
    pub fn distance_to(&self, other: &Node) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Node {}

impl Hash for Node {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}
