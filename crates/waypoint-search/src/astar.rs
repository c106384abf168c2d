//! A* shortest path engine.
//!
//! Guided by a Euclidean-distance heuristic over node coordinates. The
//! heuristic is admissible only when edge weights respect the coordinate
//! geometry; the engine does not verify this and will still run (possibly
//! returning a non-optimal path) when they disagree. With an uninformative
//! heuristic (all nodes at the same coordinate) expansion order degrades to
//! Dijkstra's. Negative edge weights are not validated.

use std::collections::{BinaryHeap, HashMap, HashSet};
use std::time::Instant;

use tracing::debug;
use waypoint_graph::{Graph, Node};

use crate::error::Result;
use crate::path::reconstruct;
use crate::result::AlgorithmResult;
use crate::step::AlgorithmStep;
use crate::validate_endpoints;

/// Open-set entry. Ordered as a min-heap on f, so `BinaryHeap::pop` yields
/// the lowest f-score first.
#[derive(Debug, Clone)]
struct OpenNode {
    f_cost: f64,
    node_id: String,
}

impl PartialEq for OpenNode {
    fn eq(&self, other: &Self) -> bool {
        self.f_cost == other.f_cost && self.node_id == other.node_id
    }
}

impl Eq for OpenNode {}

impl Ord for OpenNode {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        other
            .f_cost
            .total_cmp(&self.f_cost)
            .then_with(|| other.node_id.cmp(&self.node_id))
    }
}

impl PartialOrd for OpenNode {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// Run A* from `source` to `target`, recording one step per expanded node.
pub fn find_shortest_path(graph: &Graph, source: &str, target: &str) -> Result<AlgorithmResult> {
    validate_endpoints(graph, source, target)?;
    let started = Instant::now();

    // Endpoints were just validated
    let target_node = graph.node(target).expect("target validated");

    let mut g_score: HashMap<String, f64> = graph
        .nodes()
        .map(|n| (n.id().to_string(), f64::INFINITY))
        .collect();
    let mut f_score: HashMap<String, f64> = g_score.clone();
    let mut predecessors: HashMap<String, Option<String>> = graph
        .nodes()
        .map(|n| (n.id().to_string(), None))
        .collect();
    let mut closed: HashSet<String> = HashSet::new();

    let h0 = heuristic(graph.node(source).expect("source validated"), target_node);
    g_score.insert(source.to_string(), 0.0);
    f_score.insert(source.to_string(), h0);

    let mut open: BinaryHeap<OpenNode> = BinaryHeap::new();
    open.push(OpenNode {
        f_cost: h0,
        node_id: source.to_string(),
    });

    let mut steps = vec![AlgorithmStep::new(
        0,
        None,
        &closed,
        &g_score,
        &predecessors,
        frontier_snapshot(&open, &f_score),
        format!("Initialized source node {source} with g=0, h={h0}, f={h0}"),
    )];

    let mut step_number = 1;
    let mut nodes_visited = 0;

    while let Some(current) = open.pop() {
        let current_id = current.node_id;
        if closed.contains(&current_id) {
            continue;
        }

        if current_id == target {
            let g = g_score[&current_id];
            let h = heuristic(graph.node(&current_id).expect("node exists"), target_node);
            let f = f_score[&current_id];
            steps.push(AlgorithmStep::new(
                step_number,
                Some(&current_id),
                &closed,
                &g_score,
                &predecessors,
                frontier_snapshot(&open, &f_score),
                describe_visit(&current_id, g, h, f, &[]),
            ));
            break;
        }

        closed.insert(current_id.clone());
        nodes_visited += 1;

        let mut updated: Vec<String> = Vec::new();
        for edge in graph.outgoing_edges(&current_id) {
            let neighbor = edge.target();
            if closed.contains(neighbor) {
                continue;
            }
            let tentative_g = g_score[&current_id] + edge.weight();
            if tentative_g < g_score.get(neighbor).copied().unwrap_or(f64::INFINITY) {
                let h = heuristic(graph.node(neighbor).expect("node exists"), target_node);
                let f = tentative_g + h;
                g_score.insert(neighbor.to_string(), tentative_g);
                f_score.insert(neighbor.to_string(), f);
                predecessors.insert(neighbor.to_string(), Some(current_id.clone()));
                open.push(OpenNode {
                    f_cost: f,
                    node_id: neighbor.to_string(),
                });
                updated.push(neighbor.to_string());
            }
        }

        let g = g_score[&current_id];
        let h = heuristic(graph.node(&current_id).expect("node exists"), target_node);
        let f = f_score[&current_id];
        steps.push(AlgorithmStep::new(
            step_number,
            Some(&current_id),
            &closed,
            &g_score,
            &predecessors,
            frontier_snapshot(&open, &f_score),
            describe_visit(&current_id, g, h, f, &updated),
        ));
        step_number += 1;
    }

    let path = reconstruct(&predecessors, source, target);
    let cost = if path.is_empty() && source != target {
        f64::INFINITY
    } else {
        g_score.get(target).copied().unwrap_or(f64::INFINITY)
    };

    debug!(
        source,
        target,
        cost,
        nodes_visited,
        steps = steps.len(),
        "a* finished"
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

/// Euclidean distance between node coordinates.
fn heuristic(from: &Node, to: &Node) -> f64 {
    from.distance_to(to)
}

/// Open-set contents ordered by current f-score, stale duplicates included.
fn frontier_snapshot(open: &BinaryHeap<OpenNode>, f_score: &HashMap<String, f64>) -> Vec<String> {
    let mut ids: Vec<String> = open.iter().map(|e| e.node_id.clone()).collect();
    ids.sort_by(|a, b| {
        f_score
            .get(a)
            .copied()
            .unwrap_or(f64::INFINITY)
            .total_cmp(&f_score.get(b).copied().unwrap_or(f64::INFINITY))
    });
    ids
}

fn describe_visit(current: &str, g: f64, h: f64, f: f64, updated: &[String]) -> String {
    let mut text = format!("Visiting node {current} (g={g}, h={h}, f={f})");
    if !updated.is_empty() {
        text.push_str(", updated neighbors: ");
        text.push_str(&updated.join(", "));
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests_support::{diamond_graph, line_graph};
    use waypoint_graph::Node;

    #[test]
    fn line_graph_cost() {
        let graph = line_graph();
        let result = find_shortest_path(&graph, "a", "c").unwrap();

        assert_eq!(result.path_cost(), 8.0);
        assert_eq!(result.shortest_path(), ["a", "b", "c"]);
    }

    #[test]
    fn diamond_prefers_cheaper_route() {
        let graph = diamond_graph();
        let result = find_shortest_path(&graph, "a", "d").unwrap();

        assert_eq!(result.path_cost(), 4.0);
        assert_eq!(result.shortest_path(), ["a", "c", "d"]);
    }

    #[test]
    fn source_equals_target() {
        let graph = line_graph();
        let result = find_shortest_path(&graph, "b", "b").unwrap();

        assert_eq!(result.path_cost(), 0.0);
        assert_eq!(result.shortest_path(), ["b"]);
    }

    #[test]
    fn target_pop_is_not_counted_visited() {
        let graph = line_graph();
        let result = find_shortest_path(&graph, "a", "c").unwrap();

        // a and b expand; popping the target exits before it is closed
        assert_eq!(result.nodes_visited(), 2);
        let last = result.steps().last().unwrap();
        assert_eq!(last.current_node(), Some("c"));
        assert!(!last.is_visited("c"));
    }

    #[test]
    fn descriptions_show_scores() {
        let graph = line_graph();
        let result = find_shortest_path(&graph, "a", "c").unwrap();

        assert!(result.steps()[0]
            .description()
            .starts_with("Initialized source node a with g=0"));
        let visit = result.steps()[1].description();
        assert!(visit.contains("g="));
        assert!(visit.contains("h="));
        assert!(visit.contains("f="));
    }

    #[test]
    fn unreachable_target() {
        let mut graph = line_graph();
        graph.add_node(Node::at("z", 5.0, 5.0).unwrap()).unwrap();

        let result = find_shortest_path(&graph, "a", "z").unwrap();
        assert!(!result.has_path());
        assert!(result.shortest_path().is_empty());
    }

    #[test]
    fn heuristic_guides_expansion() {
        // Two routes of equal cost; the heuristic should expand the
        // geometrically closer branch first.
        let mut graph = waypoint_graph::Graph::new(true);
        graph.add_node(Node::at("s", 0.0, 0.0).unwrap()).unwrap();
        graph.add_node(Node::at("near", 1.0, 0.0).unwrap()).unwrap();
        graph.add_node(Node::at("far", 0.0, 10.0).unwrap()).unwrap();
        graph.add_node(Node::at("t", 2.0, 0.0).unwrap()).unwrap();
        graph.connect("s", "near", 1.0).unwrap();
        graph.connect("s", "far", 1.0).unwrap();
        graph.connect("near", "t", 1.0).unwrap();
        graph.connect("far", "t", 1.0).unwrap();

        let result = find_shortest_path(&graph, "s", "t").unwrap();
        assert_eq!(result.path_cost(), 2.0);
        assert_eq!(result.shortest_path(), ["s", "near", "t"]);
        // "far" never needs to be expanded
        assert!(result
            .steps()
            .iter()
            .all(|s| s.current_node() != Some("far")));
    }
}
