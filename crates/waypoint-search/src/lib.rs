//! Waypoint Search Engines
//!
//! Three interchangeable shortest-path algorithms over a
//! [`waypoint_graph::Graph`], each recording every intermediate state as an
//! immutable step sequence so an external viewer can replay the search.
//!
//! # Engines
//!
//! - [`dijkstra`]: binary-heap frontier, non-negative weights, O((V+E) log V)
//! - [`bellman_ford`]: |V| - 1 edge passes, negative weights and negative
//!   cycle detection, O(V * E)
//! - [`astar`]: Euclidean-heuristic guided frontier, O((V+E) log V) best case
//!
//! All three share the same entry-point shape:
//!
//! ```
//! use waypoint_graph::{Graph, Node};
//! use waypoint_search::dijkstra;
//!
//! let mut graph = Graph::new(true);
//! graph.add_node(Node::at("a", 0.0, 0.0).unwrap()).unwrap();
//! graph.add_node(Node::at("b", 1.0, 0.0).unwrap()).unwrap();
//! graph.connect("a", "b", 2.0).unwrap();
//!
//! let result = dijkstra::find_shortest_path(&graph, "a", "b").unwrap();
//! assert_eq!(result.path_cost(), 2.0);
//! assert_eq!(result.steps()[0].step_number(), 0);
//! ```
//!
//! Engines never mutate the graph, so independent graphs can be searched
//! concurrently. A single graph must not be mutated while an engine reads it.

pub mod astar;
pub mod bellman_ford;
pub mod dijkstra;
mod error;
mod path;
mod result;
mod step;

pub use error::{Result, SearchError};
pub use result::AlgorithmResult;
pub use step::AlgorithmStep;

use waypoint_graph::Graph;

/// Shared precondition check: both endpoints must be nodes of the graph.
pub(crate) fn validate_endpoints(graph: &Graph, source: &str, target: &str) -> Result<()> {
    if !graph.contains_node(source) {
        return Err(SearchError::NodeNotFound(source.to_string()));
    }
    if !graph.contains_node(target) {
        return Err(SearchError::NodeNotFound(target.to_string()));
    }
    Ok(())
}


#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use tests_support::{diamond_graph, line_graph};
    use waypoint_graph::{Graph, Node};

    type EngineFn = fn(&Graph, &str, &str) -> Result<AlgorithmResult>;

    const ENGINES: [(&str, EngineFn); 3] = [
        ("dijkstra", dijkstra::find_shortest_path),
        ("bellman_ford", bellman_ford::find_shortest_path),
        ("astar", astar::find_shortest_path),
    ];

    #[test]
    fn all_engines_agree_on_line_graph() {
        let graph = line_graph();
        for (name, engine) in ENGINES {
            let result = engine(&graph, "a", "c").unwrap();
            assert_eq!(result.path_cost(), 8.0, "{name}");
            assert_eq!(result.shortest_path(), ["a", "b", "c"], "{name}");
        }
    }

    #[test]
    fn all_engines_agree_on_diamond_graph() {
        let graph = diamond_graph();
        for (name, engine) in ENGINES {
            let result = engine(&graph, "a", "d").unwrap();
            assert_eq!(result.path_cost(), 4.0, "{name}");
            assert_eq!(result.shortest_path(), ["a", "c", "d"], "{name}");
        }
    }

    #[test]
    fn all_engines_handle_source_equals_target() {
        let graph = diamond_graph();
        for (name, engine) in ENGINES {
            let result = engine(&graph, "b", "b").unwrap();
            assert_eq!(result.path_cost(), 0.0, "{name}");
            assert_eq!(result.shortest_path(), ["b"], "{name}");
        }
    }

    #[test]
    fn all_engines_report_missing_route() {
        let mut graph = line_graph();
        graph.add_node(Node::new("island").unwrap()).unwrap();
        for (name, engine) in ENGINES {
            let result = engine(&graph, "a", "island").unwrap();
            assert!(!result.has_path(), "{name}");
            assert_eq!(result.path_cost(), f64::INFINITY, "{name}");
            assert!(result.shortest_path().is_empty(), "{name}");
        }
    }

    #[test]
    fn step_numbers_increase_strictly_from_zero() {
        let graph = diamond_graph();
        for (name, engine) in ENGINES {
            let result = engine(&graph, "a", "d").unwrap();
            assert!(!result.steps().is_empty(), "{name}");
            for (i, step) in result.steps().iter().enumerate() {
                assert_eq!(step.step_number(), i, "{name}");
            }
        }
    }

    #[test]
    fn step_collections_are_independent_snapshots() {
        let graph = diamond_graph();
        let result = dijkstra::find_shortest_path(&graph, "a", "d").unwrap();

        // Earlier steps keep their own view of working state: the init step
        // still reads every distance except the source as infinite even
        // though the engine relaxed them later.
        let first = &result.steps()[0];
        assert_eq!(first.distance("a"), 0.0);
        assert_eq!(first.distance("d"), f64::INFINITY);
        assert!(first.visited().is_empty());

        let last = result.steps().last().unwrap();
        assert_eq!(last.distance("d"), 4.0);
    }

    #[test]
    fn step_serialization_roundtrip() {
        let graph = line_graph();
        let result = dijkstra::find_shortest_path(&graph, "a", "c").unwrap();

        let json = serde_json::to_string(&result.steps()[1]).unwrap();
        let parsed: AlgorithmStep = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.step_number(), 1);
        assert_eq!(parsed.current_node(), result.steps()[1].current_node());
    }

    /// Build a deterministic graph from a weight list; indices derive the
    /// endpoints.
    fn graph_from_weights(node_count: usize, weights: &[f64]) -> Graph {
        let mut graph = Graph::new(true);
        for i in 0..node_count {
            graph
                .add_node(Node::at(format!("n{i}"), 0.0, 0.0).unwrap())
                .unwrap();
        }
        for (i, w) in weights.iter().enumerate() {
            let src = format!("n{}", i % node_count);
            let dst = format!("n{}", (i * 7 + 1) % node_count);
            if src != dst && graph.edge_between(&src, &dst).is_none() {
                graph.connect(&src, &dst, *w).unwrap();
            }
        }
        graph
    }

    fn costs_agree(a: f64, b: f64) -> bool {
        (a.is_infinite() && b.is_infinite()) || (a - b).abs() < 1e-9
    }

    proptest! {
        // With non-negative weights every engine must report the same
        // optimal cost. All nodes share a coordinate, which makes the A*
        // heuristic zero and keeps it trivially consistent.
        #[test]
        fn engines_agree_on_random_graphs(
            node_count in 2usize..8,
            weights in proptest::collection::vec(0.0f64..20.0, 1..30),
        ) {
            let graph = graph_from_weights(node_count, &weights);
            let source = "n0";
            let target = format!("n{}", node_count - 1);

            let d = dijkstra::find_shortest_path(&graph, source, &target).unwrap();
            let b = bellman_ford::find_shortest_path(&graph, source, &target).unwrap();
            let a = astar::find_shortest_path(&graph, source, &target).unwrap();

            prop_assert!(costs_agree(d.path_cost(), b.path_cost()),
                "dijkstra={} bellman_ford={}", d.path_cost(), b.path_cost());
            prop_assert!(costs_agree(d.path_cost(), a.path_cost()),
                "dijkstra={} astar={}", d.path_cost(), a.path_cost());
            prop_assert_eq!(d.has_path(), b.has_path());
        }

        // Step sequences are always non-empty and strictly ordered.
        #[test]
        fn step_sequences_well_formed(
            node_count in 2usize..8,
            weights in proptest::collection::vec(0.0f64..20.0, 0..30),
        ) {
            let graph = graph_from_weights(node_count, &weights);
            for (_, engine) in ENGINES {
                let result = engine(&graph, "n0", "n1").unwrap();
                prop_assert!(result.step_count() > 0);
                for (i, step) in result.steps().iter().enumerate() {
                    prop_assert_eq!(step.step_number(), i);
                }
            }
        }
    }
}
