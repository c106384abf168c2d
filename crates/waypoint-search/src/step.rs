//! Immutable per-step snapshots of a running search.

use std::collections::{HashMap, HashSet};
use std::fmt;

use serde::{Deserialize, Serialize};

/// An immutable snapshot of algorithm state at one step.
///
/// All collections are copied out of the engine's working state at
/// construction time, so later relaxations never change an already-emitted
/// step. Nodes are referenced by id; a distance absent from the map reads as
/// +∞ and a missing predecessor reads as `None`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlgorithmStep {
    step_number: usize,
    current_node: Option<String>,
    visited: HashSet<String>,
    distances: HashMap<String, f64>,
    predecessors: HashMap<String, Option<String>>,
    frontier: Vec<String>,
    description: String,
}

impl AlgorithmStep {
    /// Snapshot the given working state. The maps and set are cloned.
    pub fn new(
        step_number: usize,
        current_node: Option<&str>,
        visited: &HashSet<String>,
        distances: &HashMap<String, f64>,
        predecessors: &HashMap<String, Option<String>>,
        frontier: Vec<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            step_number,
            current_node: current_node.map(str::to_string),
            visited: visited.clone(),
            distances: distances.clone(),
            predecessors: predecessors.clone(),
            frontier,
            description: description.into(),
        }
    }

    /// Position of this step in the sequence, starting at 0.
    pub fn step_number(&self) -> usize {
        self.step_number
    }

    /// The node being processed, if the step has one. The initialization step
    /// and Bellman-Ford passes have none.
    pub fn current_node(&self) -> Option<&str> {
        self.current_node.as_deref()
    }

    /// Node ids considered visited (closed) at this point.
    pub fn visited(&self) -> &HashSet<String> {
        &self.visited
    }

    /// Best-known distance per node id at this point.
    pub fn distances(&self) -> &HashMap<String, f64> {
        &self.distances
    }

    /// Predecessor per node id at this point.
    pub fn predecessors(&self) -> &HashMap<String, Option<String>> {
        &self.predecessors
    }

    /// The frontier (open set) at capture time, ordered by priority.
    /// May contain duplicates because the engines use lazy deletion.
    pub fn frontier(&self) -> &[String] {
        &self.frontier
    }

    /// Human-readable account of what happened in this step.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Best-known distance of a node, +∞ when unknown.
    pub fn distance(&self, node_id: &str) -> f64 {
        self.distances
            .get(node_id)
            .copied()
            .unwrap_or(f64::INFINITY)
    }

    /// Predecessor of a node, `None` when it has none.
    pub fn predecessor(&self, node_id: &str) -> Option<&str> {
        self.predecessors.get(node_id)?.as_deref()
    }

    /// Whether a node is in the visited set.
    pub fn is_visited(&self, node_id: &str) -> bool {
        self.visited.contains(node_id)
    }
}

impl fmt::Display for AlgorithmStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Step {}: {}", self.step_number, self.description)
    }
}
