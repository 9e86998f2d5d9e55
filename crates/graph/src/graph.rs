//! Graph holder.
//!
//! The canonical edge list keeps each edge once, in the direction the caller
//! gave it. For undirected graphs the adjacency list additionally holds the
//! mirrored arc, so traversals see both directions.

use std::fmt;

use algolab_core::StepLog;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub type NodeId = i64;
pub type Weight = i64;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    pub from: NodeId,
    pub to: NodeId,
    pub weight: Weight,
}

impl Edge {
    pub fn new(from: NodeId, to: NodeId, weight: Weight) -> Self {
        Self { from, to, weight }
    }

    pub fn reversed(self) -> Self {
        Self::new(self.to, self.from, self.weight)
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.weight == 1 {
            write!(f, "{}→{}", self.from, self.to)
        } else {
            write!(f, "{}→{}({})", self.from, self.to, self.weight)
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GraphNode {
    pub id: NodeId,
    pub label: String,
    pub x: f32,
    pub y: f32,
}

impl GraphNode {
    fn new(id: NodeId, x: f32, y: f32) -> Self {
        Self {
            id,
            label: id.to_string(),
            x,
            y,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct Graph {
    directed: bool,
    nodes: IndexMap<NodeId, GraphNode>,
    edges: Vec<Edge>,
    adjacency: IndexMap<NodeId, Vec<Edge>>,
}

impl Graph {
    pub fn new(directed: bool) -> Self {
        Self {
            directed,
            ..Self::default()
        }
    }

    pub fn directed() -> Self {
        Self::new(true)
    }

    pub fn undirected() -> Self {
        Self::new(false)
    }

    /// The seven-edge demo graph over nodes 0..=5.
    pub fn sample(directed: bool) -> Self {
        let mut graph = Self::new(directed);
        for (from, to, weight) in [
            (0, 1, 4),
            (0, 2, 3),
            (1, 2, 1),
            (1, 3, 2),
            (2, 3, 4),
            (3, 4, 2),
            (4, 5, 6),
        ] {
            graph.add_edge(from, to, weight);
        }
        graph
    }

    pub fn is_directed(&self) -> bool {
        self.directed
    }

    /// Adds `id` at the origin. Returns `false` if it already existed.
    pub fn add_node(&mut self, id: NodeId) -> bool {
        self.add_node_at(id, 0.0, 0.0)
    }

    /// Adds `id` at a display position. An existing node is left untouched.
    pub fn add_node_at(&mut self, id: NodeId, x: f32, y: f32) -> bool {
        if self.nodes.contains_key(&id) {
            return false;
        }
        self.nodes.insert(id, GraphNode::new(id, x, y));
        self.adjacency.insert(id, Vec::new());
        true
    }

    pub fn set_position(&mut self, id: NodeId, x: f32, y: f32) -> bool {
        match self.nodes.get_mut(&id) {
            Some(node) => {
                node.x = x;
                node.y = y;
                true
            }
            None => false,
        }
    }

    pub fn set_label(&mut self, id: NodeId, label: impl Into<String>) -> bool {
        match self.nodes.get_mut(&id) {
            Some(node) => {
                node.label = label.into();
                true
            }
            None => false,
        }
    }

    /// Adds an edge, creating missing endpoints first.
    pub fn add_edge(&mut self, from: NodeId, to: NodeId, weight: Weight) -> StepLog {
        let mut log = StepLog::new();
        for id in [from, to] {
            if self.add_node(id) {
                log.push(format!("Node {id} did not exist, created at (0, 0)"));
            }
        }
        let edge = Edge::new(from, to, weight);
        self.edges.push(edge);
        self.adjacency.entry(from).or_default().push(edge);
        log.push(format!("Added edge {from} → {to} (weight {weight})"));
        if !self.directed {
            self.adjacency.entry(to).or_default().push(edge.reversed());
            log.push(format!("Undirected graph: mirrored arc {to} → {from} added to the adjacency list"));
        }
        debug!(from, to, weight, directed = self.directed, "graph add edge");
        log
    }

    pub fn contains_node(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn node(&self, id: NodeId) -> Option<&GraphNode> {
        self.nodes.get(&id)
    }

    /// Nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &GraphNode> + '_ {
        self.nodes.values()
    }

    /// Node ids in insertion order.
    pub fn node_ids(&self) -> Vec<NodeId> {
        self.nodes.keys().copied().collect()
    }

    /// Canonical edges in insertion order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Outgoing arcs of `id`, including mirrored ones for undirected graphs.
    pub fn neighbors(&self, id: NodeId) -> &[Edge] {
        self.adjacency.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Every adjacency arc, grouped by source node in insertion order.
    pub fn arcs(&self) -> impl Iterator<Item = &Edge> + '_ {
        self.adjacency.values().flatten()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.edges.clear();
        self.adjacency.clear();
    }

    pub fn summary(&self) -> String {
        format!(
            "Nodes: {}\nEdges: {}\nDirected: {}",
            self.node_count(),
            self.edge_count(),
            if self.directed { "yes" } else { "no" }
        )
    }
}
