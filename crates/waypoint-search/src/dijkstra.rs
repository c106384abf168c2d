//! Dijkstra shortest path engine.
//!
//! Binary-heap frontier with lazy deletion: a node may sit in the heap more
//! than once because every distance improvement pushes a fresh entry, and
//! stale entries are skipped against the visited set when popped.
//!
//! Negative edge weights are not validated; results on such graphs are
//! undefined. Use [`bellman_ford`](crate::bellman_ford) for negative weights.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap, HashSet};
use std::time::Instant;

use tracing::debug;
use waypoint_graph::Graph;

use crate::error::Result;
use crate::path::reconstruct;
use crate::result::AlgorithmResult;
use crate::step::AlgorithmStep;
use crate::validate_endpoints;

/// Frontier entry ordered by current best distance.
#[derive(Debug, Clone)]
struct DistanceNode {
    distance: f64,
    node_id: String,
}

impl PartialEq for DistanceNode {
    fn eq(&self, other: &Self) -> bool {
        self.distance == other.distance && self.node_id == other.node_id
    }
}

impl Eq for DistanceNode {}

impl Ord for DistanceNode {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.distance
            .total_cmp(&other.distance)
            .then_with(|| self.node_id.cmp(&other.node_id))
    }
}

impl PartialOrd for DistanceNode {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// Run Dijkstra from `source` to `target`, recording one step per processed
/// node. Runs in O((V+E) log V).
pub fn find_shortest_path(graph: &Graph, source: &str, target: &str) -> Result<AlgorithmResult> {
    validate_endpoints(graph, source, target)?;
    let started = Instant::now();

    let mut distances: HashMap<String, f64> = graph
        .nodes()
        .map(|n| (n.id().to_string(), f64::INFINITY))
        .collect();
    let mut predecessors: HashMap<String, Option<String>> = graph
        .nodes()
        .map(|n| (n.id().to_string(), None))
        .collect();
    let mut visited: HashSet<String> = HashSet::new();
    distances.insert(source.to_string(), 0.0);

    let mut frontier: BinaryHeap<Reverse<DistanceNode>> = BinaryHeap::new();
    frontier.push(Reverse(DistanceNode {
        distance: 0.0,
        node_id: source.to_string(),
    }));

    let mut steps = vec![AlgorithmStep::new(
        0,
        None,
        &visited,
        &distances,
        &predecessors,
        frontier_snapshot(&frontier, &distances),
        format!("Initialized source node {source} with distance 0"),
    )];

    let mut step_number = 1;
    let mut nodes_visited = 0;

    while let Some(Reverse(current)) = frontier.pop() {
        let current_id = current.node_id;
        if visited.contains(&current_id) {
            continue;
        }
        visited.insert(current_id.clone());
        nodes_visited += 1;

        if current_id == target {
            steps.push(AlgorithmStep::new(
                step_number,
                Some(&current_id),
                &visited,
                &distances,
                &predecessors,
                frontier_snapshot(&frontier, &distances),
                format!("Reached target {target}. Early exit."),
            ));
            break;
        }

        let base = distances[&current_id];
        let mut updated: Vec<String> = Vec::new();
        for edge in graph.outgoing_edges(&current_id) {
            let neighbor = edge.target();
            let alt = base + edge.weight();
            if alt < distances.get(neighbor).copied().unwrap_or(f64::INFINITY) {
                distances.insert(neighbor.to_string(), alt);
                predecessors.insert(neighbor.to_string(), Some(current_id.clone()));
                frontier.push(Reverse(DistanceNode {
                    distance: alt,
                    node_id: neighbor.to_string(),
                }));
                updated.push(neighbor.to_string());
            }
        }

        steps.push(AlgorithmStep::new(
            step_number,
            Some(&current_id),
            &visited,
            &distances,
            &predecessors,
            frontier_snapshot(&frontier, &distances),
            describe_visit(&current_id, &updated),
        ));
        step_number += 1;
    }

    let path = reconstruct(&predecessors, source, target);
    let cost = if path.is_empty() && source != target {
        f64::INFINITY
    } else {
        distances.get(target).copied().unwrap_or(f64::INFINITY)
    };

    debug!(
        source,
        target,
        cost,
        nodes_visited,
        steps = steps.len(),
        "dijkstra finished"
    );
    AlgorithmResult::new(
        steps,
        path,
        cost,
        source,
        target,
        started.elapsed(),
        nodes_visited,
    )
}

/// Heap contents ordered by current best distance. Stale duplicates stay in,
/// matching what the frontier actually holds.
fn frontier_snapshot(
    frontier: &BinaryHeap<Reverse<DistanceNode>>,
    distances: &HashMap<String, f64>,
) -> Vec<String> {
    let mut ids: Vec<String> = frontier.iter().map(|e| e.0.node_id.clone()).collect();
    ids.sort_by(|a, b| {
        distances
            .get(a)
            .copied()
            .unwrap_or(f64::INFINITY)
            .total_cmp(&distances.get(b).copied().unwrap_or(f64::INFINITY))
    });
    ids
}

fn describe_visit(current: &str, updated: &[String]) -> String {
    if updated.is_empty() {
        format!("Visiting node {current}, no updates")
    } else {
        format!(
            "Visiting node {current}, updated neighbors: {}",
            updated.join(", ")
        )
    }
}
