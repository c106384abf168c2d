//! Weighted graph with id-keyed nodes and an outgoing adjacency index.
//!
//! The graph owns its nodes and edges; all cross-references are by id, so the
//! derived `Clone` is already a full deep copy. Search engines only read the
//! graph, callers mutate it between searches.

use std::collections::HashMap;

use crate::edge::Edge;
use crate::error::{GraphError, Result};
use crate::node::Node;

/// A weighted graph. When `directed` is false, adding an edge (u, v, w) also
/// stores the reverse edge (v, u, w), and removing by endpoints removes both.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Graph {
    directed: bool,
    nodes: HashMap<String, Node>,
    edges: Vec<Edge>,
    adjacency: HashMap<String, Vec<Edge>>,
}

impl Default for Graph {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Graph {
    /// Create an empty graph.
    pub fn new(directed: bool) -> Self {
        Self {
            directed,
            nodes: HashMap::new(),
            edges: Vec::new(),
            adjacency: HashMap::new(),
        }
    }

    /// Whether edges are one-way.
    pub fn is_directed(&self) -> bool {
        self.directed
    }

    // Node operations

    /// Add a node. Fails if a node with the same id is already present.
    pub fn add_node(&mut self, node: Node) -> Result<()> {
        if self.nodes.contains_key(node.id()) {
            return Err(GraphError::DuplicateNode(node.id().to_string()));
        }
        self.adjacency.insert(node.id().to_string(), Vec::new());
        self.nodes.insert(node.id().to_string(), node);
        Ok(())
    }

    /// Look up a node by id.
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Whether a node with this id exists.
    pub fn contains_node(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    /// Iterate over all nodes in unspecified order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Remove a node and every edge into or out of it. No-op if absent.
    pub fn remove_node(&mut self, id: &str) {
        if self.nodes.remove(id).is_none() {
            return;
        }
        self.adjacency.remove(id);
        self.edges.retain(|e| e.source() != id && e.target() != id);
        for list in self.adjacency.values_mut() {
            list.retain(|e| e.target() != id);
        }
    }

    // Edge operations

    /// Add an edge. Both endpoints must already be nodes of the graph.
    ///
    /// In an undirected graph the reverse edge is stored as well.
    pub fn add_edge(&mut self, edge: Edge) -> Result<()> {
        if !self.nodes.contains_key(edge.source()) {
            return Err(GraphError::NodeNotFound(edge.source().to_string()));
        }
        if !self.nodes.contains_key(edge.target()) {
            return Err(GraphError::NodeNotFound(edge.target().to_string()));
        }
        if !self.directed {
            let reverse = Edge::new(edge.target(), edge.source(), edge.weight())?;
            self.insert_edge(reverse);
        }
        self.insert_edge(edge);
        Ok(())
    }

    /// Build and add an edge between two existing nodes.
    pub fn connect(&mut self, source: &str, target: &str, weight: f64) -> Result<()> {
        self.add_edge(Edge::new(source, target, weight)?)
    }

    fn insert_edge(&mut self, edge: Edge) {
        self.adjacency
            .entry(edge.source().to_string())
            .or_default()
            .push(edge.clone());
        self.edges.push(edge);
    }

    /// Remove the first edge with this id. No-op if absent.
    pub fn remove_edge(&mut self, edge_id: &str) {
        let Some(pos) = self.edges.iter().position(|e| e.id() == edge_id) else {
            return;
        };
        let edge = self.edges.remove(pos);
        if let Some(list) = self.adjacency.get_mut(edge.source()) {
            if let Some(i) = list.iter().position(|e| e.id() == edge_id) {
                list.remove(i);
            }
        }
    }

    /// Remove the edge between two endpoints, and the reverse edge when the
    /// graph is undirected. No-op if absent.
    pub fn remove_edge_between(&mut self, source: &str, target: &str) {
        self.remove_one_edge(source, target);
        if !self.directed {
            self.remove_one_edge(target, source);
        }
    }

    fn remove_one_edge(&mut self, source: &str, target: &str) {
        let Some(pos) = self
            .edges
            .iter()
            .position(|e| e.source() == source && e.target() == target)
        else {
            return;
        };
        self.edges.remove(pos);
        if let Some(list) = self.adjacency.get_mut(source) {
            if let Some(i) = list.iter().position(|e| e.target() == target) {
                list.remove(i);
            }
        }
    }

    /// Look up the edge between two endpoints.
    pub fn edge_between(&self, source: &str, target: &str) -> Option<&Edge> {
        self.adjacency
            .get(source)?
            .iter()
            .find(|e| e.target() == target)
    }

    /// All edges, in insertion order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Number of edges. Undirected graphs count both directions.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    // Traversal queries

    /// Outgoing edges of a node. Empty for unknown ids.
    pub fn outgoing_edges(&self, id: &str) -> &[Edge] {
        self.adjacency.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Nodes reachable over one outgoing edge.
    pub fn neighbors(&self, id: &str) -> Vec<&Node> {
        self.outgoing_edges(id)
            .iter()
            .filter_map(|e| self.nodes.get(e.target()))
            .collect()
    }

    /// Incoming edges of a node, found by scanning all edges.
    pub fn incoming_edges(&self, id: &str) -> Vec<&Edge> {
        self.edges.iter().filter(|e| e.target() == id).collect()
    }

    /// Weight of the edge between two endpoints, or +∞ if there is none.
    pub fn edge_weight(&self, source: &str, target: &str) -> f64 {
        self.edge_between(source, target)
            .map(Edge::weight)
            .unwrap_or(f64::INFINITY)
    }

    /// Update the weight of the edge between two endpoints.
    ///
    /// Fails if the edge does not exist or the weight is not finite. In an
    /// undirected graph the reverse edge is updated too.
    pub fn set_edge_weight(&mut self, source: &str, target: &str, weight: f64) -> Result<()> {
        self.set_one_weight(source, target, weight)?;
        if !self.directed {
            self.set_one_weight(target, source, weight)?;
        }
        Ok(())
    }

    fn set_one_weight(&mut self, source: &str, target: &str, weight: f64) -> Result<()> {
        let mut found = false;
        if let Some(list) = self.adjacency.get_mut(source) {
            if let Some(edge) = list.iter_mut().find(|e| e.target() == target) {
                edge.set_weight(weight)?;
                found = true;
            }
        }
        if !found {
            return Err(GraphError::EdgeNotFound {
                source: source.to_string(),
                target: target.to_string(),
            });
        }
        if let Some(edge) = self
            .edges
            .iter_mut()
            .find(|e| e.source() == source && e.target() == target)
        {
            edge.set_weight(weight)?;
        }
        Ok(())
    }

    /// Remove all nodes and edges.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.edges.clear();
        self.adjacency.clear();
    }
}
