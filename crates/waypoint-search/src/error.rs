//! Error types for the search engines.

use thiserror::Error;

/// Result type for search operations.
pub type Result<T> = std::result::Result<T, SearchError>;

/// Errors raised by the search engines.
///
/// Only argument validation fails. An unreachable target or a negative cycle
/// is a normal [`AlgorithmResult`](crate::AlgorithmResult) with infinite cost,
/// not an error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SearchError {
    /// The source or target node is not part of the graph
    #[error("node not in graph: {0}")]
    NodeNotFound(String),

    /// A result was constructed with invalid inputs
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}
