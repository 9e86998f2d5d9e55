//! Serde description of a graph, for loading fixtures and presets.
//!
//! ```json
//! { "directed": false,
//!   "nodes": [ { "id": 0, "label": "A", "x": 10.0, "y": 20.0 } ],
//!   "edges": [ { "from": 0, "to": 1, "weight": 4 }, { "from": 1, "to": 2 } ] }
//! ```

use serde::{Deserialize, Serialize};

use crate::graph::{Graph, NodeId, Weight};

#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    #[error("invalid graph description: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphSpec {
    pub directed: bool,
    pub nodes: Vec<NodeSpec>,
    pub edges: Vec<EdgeSpec>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NodeSpec {
    pub id: NodeId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default)]
    pub x: f32,
    #[serde(default)]
    pub y: f32,
}

fn default_weight() -> Weight {
    1
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeSpec {
    pub from: NodeId,
    pub to: NodeId,
    #[serde(default = "default_weight")]
    pub weight: Weight,
}

impl Graph {
    /// Builds a graph from `spec`. Listed nodes are added first so they keep
    /// their order and positions; edge endpoints missing from the list are
    /// created at the origin.
    pub fn from_spec(spec: &GraphSpec) -> Self {
        let mut graph = Graph::new(spec.directed);
        for node in &spec.nodes {
            graph.add_node_at(node.id, node.x, node.y);
            if let Some(label) = &node.label {
                graph.set_label(node.id, label.clone());
            }
        }
        for edge in &spec.edges {
            graph.add_edge(edge.from, edge.to, edge.weight);
        }
        graph
    }

    pub fn from_json(json: &str) -> Result<Self, GraphError> {
        let spec: GraphSpec = serde_json::from_str(json)?;
        Ok(Self::from_spec(&spec))
    }

    pub fn to_spec(&self) -> GraphSpec {
        GraphSpec {
            directed: self.is_directed(),
            nodes: self
                .nodes()
                .map(|n| NodeSpec {
                    id: n.id,
                    label: (n.label != n.id.to_string()).then(|| n.label.clone()),
                    x: n.x,
                    y: n.y,
                })
                .collect(),
            edges: self
                .edges()
                .iter()
                .map(|e| EdgeSpec {
                    from: e.from,
                    to: e.to,
                    weight: e.weight,
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_defaults() {
        let graph = Graph::from_json(
            r#"{"nodes": [{"id": 7, "label": "start", "x": 1.5}], "edges": [{"from": 7, "to": 8}]}"#,
        )
        .unwrap();
        assert!(!graph.is_directed());
        assert_eq!(graph.node_ids(), vec![7, 8]);
        assert_eq!(graph.node(7).unwrap().label, "start");
        assert_eq!(graph.node(7).unwrap().x, 1.5);
        assert_eq!(graph.edges()[0].weight, 1);
        assert_eq!(graph.neighbors(8).len(), 1);
    }

    #[test]
    fn spec_survives_a_round_trip() {
        let graph = Graph::sample(true);
        let again = Graph::from_spec(&graph.to_spec());
        assert_eq!(again.edges(), graph.edges());
        assert_eq!(again.node_ids(), graph.node_ids());
        assert!(again.is_directed());
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(matches!(Graph::from_json("[1, 2"), Err(GraphError::Parse(_))));
    }
}
