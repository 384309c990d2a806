//! Splits a generated quest graph into node and edge collections for storage, and
//! puts stored collections back together.

use std::collections::HashSet;

use thiserror::Error;

use crate::models::domain::graph::{Edge, GraphElement, Node, GRAPH_SCHEMA_VERSION};

/// Returned by quest lookups that cannot produce a graph.
pub const EMPTY_GRAPH: &str = "[]";

#[derive(Debug, Error)]
pub enum GraphParseError {
    #[error("graph text is not a valid element array: {0}")]
    Json(#[from] serde_json::Error),

    #[error("stored graph uses schema version {found}, expected {expected}")]
    SchemaVersion { found: i32, expected: i32 },
}

/// A quest graph partitioned by element shape, relative order preserved in each part.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SplitGraph {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

impl SplitGraph {
    /// Parses the model's graph reply. An empty array is accepted.
    pub fn parse(raw: &str) -> Result<Self, GraphParseError> {
        let elements: Vec<GraphElement> = serde_json::from_str(raw)?;
        Ok(Self::from_elements(elements))
    }

    pub fn from_elements(elements: impl IntoIterator<Item = GraphElement>) -> Self {
        let mut graph = SplitGraph::default();
        for element in elements {
            match element {
                GraphElement::Node(node) => graph.nodes.push(node),
                GraphElement::Edge(edge) => graph.edges.push(edge),
            }
        }
        graph
    }

    pub fn nodes_json(&self) -> Result<String, GraphParseError> {
        Ok(serde_json::to_string(&self.nodes)?)
    }

    pub fn edges_json(&self) -> Result<String, GraphParseError> {
        Ok(serde_json::to_string(&self.edges)?)
    }

    /// Nodes first, then edges.
    pub fn into_elements(self) -> Vec<GraphElement> {
        self.nodes
            .into_iter()
            .map(GraphElement::Node)
            .chain(self.edges.into_iter().map(GraphElement::Edge))
            .collect()
    }

    /// Edges whose source or target names no node in this graph.
    pub fn dangling_edges(&self) -> Vec<&Edge> {
        let ids: HashSet<&str> = self.nodes.iter().map(|n| n.id.as_str()).collect();
        self.edges
            .iter()
            .filter(|e| !ids.contains(e.source.as_str()) || !ids.contains(e.target.as_str()))
            .collect()
    }

    pub fn root(&self) -> Option<&Node> {
        self.nodes.iter().find(|n| n.is_root())
    }
}

/// Rebuilds the combined graph text from separately stored node and edge blobs.
pub fn reassemble(
    nodes_json: &str,
    edges_json: &str,
    schema_version: i32,
) -> Result<String, GraphParseError> {
    if schema_version != GRAPH_SCHEMA_VERSION {
        return Err(GraphParseError::SchemaVersion {
            found: schema_version,
            expected: GRAPH_SCHEMA_VERSION,
        });
    }

    let graph = SplitGraph {
        nodes: serde_json::from_str(nodes_json)?,
        edges: serde_json::from_str(edges_json)?,
    };

    Ok(serde_json::to_string(&graph.into_elements())?)
}
