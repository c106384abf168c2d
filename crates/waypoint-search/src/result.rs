//! Final outcome of one complete engine run.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SearchError};
use crate::step::AlgorithmStep;

/// The outcome of a complete algorithm execution: the full step history for
/// replay plus the final path and its cost.
///
/// "Has a path" is defined exactly as the cost being finite; a run that found
/// no route (or hit a negative cycle) carries an empty path and +∞ cost.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlgorithmResult {
    steps: Vec<AlgorithmStep>,
    shortest_path: Vec<String>,
    path_cost: f64,
    source: String,
    target: String,
    duration: Duration,
    nodes_visited: usize,
}

impl AlgorithmResult {
    /// Assemble a result. Fails if source or target is empty.
    pub fn new(
        steps: Vec<AlgorithmStep>,
        shortest_path: Vec<String>,
        path_cost: f64,
        source: impl Into<String>,
        target: impl Into<String>,
        duration: Duration,
        nodes_visited: usize,
    ) -> Result<Self> {
        let source = source.into();
        let target = target.into();
        if source.is_empty() {
            return Err(SearchError::InvalidArgument("source must be non-empty".into()));
        }
        if target.is_empty() {
            return Err(SearchError::InvalidArgument("target must be non-empty".into()));
        }
        Ok(Self {
            steps,
            shortest_path,
            path_cost,
            source,
            target,
            duration,
            nodes_visited,
        })
    }

    /// The ordered step history.
    pub fn steps(&self) -> &[AlgorithmStep] {
        &self.steps
    }

    /// The shortest path as an ordered node id sequence, empty if none exists.
    pub fn shortest_path(&self) -> &[String] {
        &self.shortest_path
    }

    /// Total cost of the path, +∞ when no path exists.
    pub fn path_cost(&self) -> f64 {
        self.path_cost
    }

    /// Id of the source node.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Id of the target node.
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Wall-clock duration of the run.
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// How many nodes the engine visited.
    pub fn nodes_visited(&self) -> usize {
        self.nodes_visited
    }

    /// Whether a path from source to target was found.
    pub fn has_path(&self) -> bool {
        self.path_cost.is_finite()
    }

    /// Number of recorded steps.
    pub fn step_count(&self) -> usize {
        self.steps.len()
    }
}

impl fmt::Display for AlgorithmResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path = if self.shortest_path.is_empty() {
            "<no path>".to_string()
        } else {
            self.shortest_path.join(" -> ")
        };
        write!(
            f,
            "path={}, cost={}, steps={}, visited={}, time={:?}",
            path,
            self.path_cost,
            self.steps.len(),
            self.nodes_visited,
            self.duration
        )
    }
}
