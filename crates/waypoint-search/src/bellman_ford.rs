//! Bellman-Ford shortest path engine.
//!
//! Relaxes every edge |V| - 1 times instead of maintaining a frontier, which
//! makes negative edge weights safe. One extra pass afterwards detects
//! negative cycles reachable from the source: if any edge can still relax,
//! the result carries no path regardless of any distance computed so far.
//! Runs in O(V * E).

use std::collections::{HashMap, HashSet};
use std::time::Instant;

use tracing::debug;
use waypoint_graph::Graph;

use crate::error::Result;
use crate::path::reconstruct;
use crate::result::AlgorithmResult;
use crate::step::AlgorithmStep;
use crate::validate_endpoints;

/// Run Bellman-Ford from `source` to `target`, recording one step per
/// relaxation pass.
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
    distances.insert(source.to_string(), 0.0);

    let mut steps = vec![pass_snapshot(
        0,
        &distances,
        &predecessors,
        format!("Initialized source node {source} with distance 0"),
    )];

    let node_count = graph.node_count();
    let mut step_number = 1;
    let mut nodes_visited = 0;

    for iteration in 1..node_count {
        let mut updates_this_pass = 0;
        for edge in graph.edges() {
            let from = distances.get(edge.source()).copied().unwrap_or(f64::INFINITY);
            if from.is_infinite() {
                continue;
            }
            let alt = from + edge.weight();
            if alt < distances.get(edge.target()).copied().unwrap_or(f64::INFINITY) {
                distances.insert(edge.target().to_string(), alt);
                predecessors.insert(edge.target().to_string(), Some(edge.source().to_string()));
                updates_this_pass += 1;
            }
        }
        nodes_visited = distances.values().filter(|d| d.is_finite()).count();
        steps.push(pass_snapshot(
            step_number,
            &distances,
            &predecessors,
            format!("Iteration {iteration}: Relaxed edges, updated {updates_this_pass} distances"),
        ));
        step_number += 1;
    }

    // One more full scan: anything still relaxable sits on a negative cycle
    let negative_cycle = graph.edges().iter().any(|edge| {
        let from = distances.get(edge.source()).copied().unwrap_or(f64::INFINITY);
        from.is_finite()
            && from + edge.weight()
                < distances.get(edge.target()).copied().unwrap_or(f64::INFINITY)
    });

    if negative_cycle {
        steps.push(pass_snapshot(
            step_number,
            &distances,
            &predecessors,
            "Negative cycle detected",
        ));
        debug!(source, target, "bellman-ford found a negative cycle");
        return AlgorithmResult::new(
            steps,
            Vec::new(),
            f64::INFINITY,
            source,
            target,
            started.elapsed(),
            nodes_visited,
        );
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
        "bellman-ford finished"
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

/// Bellman-Ford has no current node and no frontier; the visited set is every
/// node whose distance is currently finite.
fn pass_snapshot(
    step_number: usize,
    distances: &HashMap<String, f64>,
    predecessors: &HashMap<String, Option<String>>,
    description: impl Into<String>,
) -> AlgorithmStep {
    let visited: HashSet<String> = distances
        .iter()
        .filter(|(_, d)| d.is_finite())
        .map(|(id, _)| id.clone())
        .collect();
    AlgorithmStep::new(
        step_number,
        None,
        &visited,
        distances,
        predecessors,
        Vec::new(),
        description,
    )
}
