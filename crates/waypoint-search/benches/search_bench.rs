//! Benchmarks for the search engines.
//!
//! Measures all three engines on grid graphs of growing size, where the A*
//! heuristic has real geometry to work with.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use waypoint_graph::{Graph, Node};
use waypoint_search::{astar, bellman_ford, dijkstra};

/// Build a directed side x side grid with unit-spaced coordinates and
/// rightward/downward edges of weight 1.
fn grid_graph(side: usize) -> Graph {
    let mut graph = Graph::new(true);
    for row in 0..side {
        for col in 0..side {
            graph
                .add_node(Node::at(format!("{row}-{col}"), col as f64, row as f64).unwrap())
                .unwrap();
        }
    }
    for row in 0..side {
        for col in 0..side {
            if col + 1 < side {
                graph
                    .connect(&format!("{row}-{col}"), &format!("{row}-{}", col + 1), 1.0)
                    .unwrap();
            }
            if row + 1 < side {
                graph
                    .connect(&format!("{row}-{col}"), &format!("{}-{col}", row + 1), 1.0)
                    .unwrap();
            }
        }
    }
    graph
}

fn bench_engines(c: &mut Criterion) {
    let mut group = c.benchmark_group("shortest_path");

    for &side in &[5usize, 10, 20] {
        let graph = grid_graph(side);
        let target = format!("{0}-{0}", side - 1);

        group.bench_with_input(BenchmarkId::new("dijkstra", side), &graph, |b, g| {
            b.iter(|| dijkstra::find_shortest_path(black_box(g), "0-0", &target).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("astar", side), &graph, |b, g| {
            b.iter(|| astar::find_shortest_path(black_box(g), "0-0", &target).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("bellman_ford", side), &graph, |b, g| {
            b.iter(|| bellman_ford::find_shortest_path(black_box(g), "0-0", &target).unwrap())
        });
    }
    group.finish();
}

criterion_group!(benches, bench_engines);
criterion_main!(benches);
