//! Waypoint Graph Model
//!
//! Weighted graph with string-keyed nodes, directed or undirected edges and an
//! outgoing adjacency index. This is the leaf data crate of the workspace: it
//! has no async, no I/O and no logging, just the structure the search engines
//! read.
//!
//! # Identity
//!
//! Node identity is the id string alone; coordinates only feed the A*
//! heuristic and labels are display-only. Edge equality holds when ids match
//! or when the (source, target) pair matches.
//!
//! # Invariants
//!
//! - Node ids are unique; adding a duplicate fails.
//! - Every edge's endpoints exist in the graph when the edge is added.
//! - Undirected graphs store both directions of every edge, and removal by
//!   endpoints removes both.
//! - Removing a node removes every edge into or out of it.

mod edge;
mod error;
mod graph;
mod node;

pub use edge::Edge;
pub use error::{GraphError, Result};
pub use graph::Graph;
pub use node::Node;
