//! Error types for graph construction and mutation.

use std::fmt;

/// Result type for graph operations.
pub type Result<T> = std::result::Result<T, GraphError>;

/// Errors raised by graph construction and mutation.
///
/// Queries never fail; only operations that would violate a structural
/// invariant return an error, and they return it before any mutation happens.
///
/// `Display` and `Error` are implemented by hand rather than via
/// `thiserror` because the `EdgeNotFound` variant has a field named
/// `source` that is not an error source, and `thiserror` offers no way
/// to opt out of its source-field inference.
#[derive(Debug, Clone, PartialEq)]
pub enum GraphError {
    /// A node or edge id was empty
    EmptyId,

    /// A node with this id is already present
    DuplicateNode(String),

    /// An edge endpoint is not a node of the graph
    NodeNotFound(String),

    /// No edge exists between the given endpoints
    EdgeNotFound { source: String, target: String },

    /// An edge weight was NaN or infinite
    NonFiniteWeight(f64),
}

impl fmt::Display for GraphError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GraphError::EmptyId => write!(f, "id must be non-empty"),
            GraphError::DuplicateNode(id) => write!(f, "duplicate node id: {id}"),
            GraphError::NodeNotFound(id) => write!(f, "node not in graph: {id}"),
            GraphError::EdgeNotFound { source, target } => {
                write!(f, "no edge from {source} to {target}")
            }
            GraphError::NonFiniteWeight(w) => {
                write!(f, "edge weight must be finite, got {w}")
            }
        }
    }
}

impl std::error::Error for GraphError {}
