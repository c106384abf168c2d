//! Weighted directed edges between node ids.

use std::fmt;

use crate::error::{GraphError, Result};

/// A directed, weighted edge between two nodes, referenced by id.
///
/// Two edges are equal if their ids match or their (source, target) pairs
/// match. The weight may be changed after construction but must stay finite.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Edge {
    id: String,
    source: String,
    target: String,
    weight: f64,
}

impl Edge {
    /// Create an edge with the default id `"{source}->{target}"`.
    pub fn new(source: impl Into<String>, target: impl Into<String>, weight: f64) -> Result<Self> {
        let source = source.into();
        let target = target.into();
        let id = format!("{}->{}", source, target);
        Self::with_id(id, source, target, weight)
    }

    /// Create an edge with an explicit id.
    pub fn with_id(
        id: impl Into<String>,
        source: impl Into<String>,
        target: impl Into<String>,
        weight: f64,
    ) -> Result<Self> {
        let id = id.into();
        let source = source.into();
        let target = target.into();
        if id.is_empty() || source.is_empty() || target.is_empty() {
            return Err(GraphError::EmptyId);
        }
        validate_weight(weight)?;
        Ok(Self {
            id,
            source,
            target,
            weight,
        })
    }

    /// The edge id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Id of the source node.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Id of the target node.
    pub fn target(&self) -> &str {
        &self.target
    }

    /// The edge weight.
    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// Update the weight. Fails if the new weight is NaN or infinite.
    pub fn set_weight(&mut self, weight: f64) -> Result<()> {
        validate_weight(weight)?;
        self.weight = weight;
        Ok(())
    }
}

fn validate_weight(weight: f64) -> Result<()> {
    if weight.is_finite() {
        Ok(())
    } else {
        Err(GraphError::NonFiniteWeight(weight))
    }
}

impl PartialEq for Edge {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id || (self.source == other.source && self.target == other.target)
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}->{} (weight: {})", self.source, self.target, self.weight)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_id_from_endpoints() {
        let edge = Edge::new("a", "b", 2.5).unwrap();
        assert_eq!(edge.id(), "a->b");
        assert_eq!(edge.source(), "a");
        assert_eq!(edge.target(), "b");
        assert_eq!(edge.weight(), 2.5);
    }

    #[test]
    fn non_finite_weight_rejected() {
        assert!(matches!(
            Edge::new("a", "b", f64::NAN),
            Err(GraphError::NonFiniteWeight(_))
        ));
        assert!(matches!(
            Edge::new("a", "b", f64::INFINITY),
            Err(GraphError::NonFiniteWeight(_))
        ));

        let mut edge = Edge::new("a", "b", 1.0).unwrap();
        assert!(edge.set_weight(f64::NEG_INFINITY).is_err());
        assert_eq!(edge.weight(), 1.0);
        edge.set_weight(-3.0).unwrap();
        assert_eq!(edge.weight(), -3.0);
    }

    #[test]
    fn equality_by_id_or_endpoints() {
        let a = Edge::new("a", "b", 1.0).unwrap();
        let b = Edge::with_id("custom", "a", "b", 9.0).unwrap();
        let c = Edge::with_id("custom", "x", "y", 1.0).unwrap();
        let d = Edge::new("b", "a", 1.0).unwrap();

        // Same endpoints, different ids
        assert_eq!(a, b);
        // Same id, different endpoints
        assert_eq!(b, c);
        // Reversed endpoints are a different edge
        assert_ne!(a, d);
    }
}
