//! The seven graph algorithms. Each takes the graph by reference and returns
//! its steps together with a structured result.
//!
//! An unknown start node yields a single explanatory step and an empty
//! result.

mod bellman_ford;
mod bfs;
mod dfs;
mod dijkstra;
mod floyd_warshall;
mod kruskal;
mod prim;

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::distance::Distance;
use crate::graph::{Edge, Graph, NodeId, Weight};
use crate::step::{Recorder, Traced};

pub use bellman_ford::{bellman_ford, BellmanFordOutcome};
pub use bfs::bfs;
pub use dfs::dfs;
pub use dijkstra::dijkstra;
pub use floyd_warshall::{floyd_warshall, DistanceMatrix};
pub use kruskal::kruskal;
pub use prim::prim;

/// Visit order of a traversal and the edges that discovered each node.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Traversal {
    pub start: NodeId,
    pub order: Vec<NodeId>,
    pub tree_edges: Vec<(NodeId, NodeId)>,
}

impl Traversal {
    fn empty(start: NodeId) -> Self {
        Self {
            start,
            order: Vec::new(),
            tree_edges: Vec::new(),
        }
    }

    pub fn visited(&self) -> BTreeSet<NodeId> {
        self.order.iter().copied().collect()
    }
}

/// Single-source distances with the parent of each reached node.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ShortestPaths {
    pub start: NodeId,
    pub distances: BTreeMap<NodeId, Distance>,
    pub parents: BTreeMap<NodeId, NodeId>,
}

impl ShortestPaths {
    fn empty(start: NodeId) -> Self {
        Self {
            start,
            distances: BTreeMap::new(),
            parents: BTreeMap::new(),
        }
    }

    pub fn distance(&self, to: NodeId) -> Distance {
        self.distances.get(&to).copied().unwrap_or_default()
    }

    /// Node sequence from the start to `to`, following parent links.
    pub fn path_to(&self, to: NodeId) -> Option<Vec<NodeId>> {
        if !self.distance(to).is_reachable() {
            return None;
        }
        let mut path = vec![to];
        let mut curr = to;
        while curr != self.start {
            curr = *self.parents.get(&curr)?;
            path.push(curr);
            if path.len() > self.distances.len() {
                return None;
            }
        }
        path.reverse();
        Some(path)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SpanningTree {
    pub edges: Vec<Edge>,
    pub total_weight: Weight,
}

impl SpanningTree {
    /// Whether the tree reaches every node of `graph`.
    pub fn spans(&self, graph: &Graph) -> bool {
        self.edges.len() + 1 == graph.node_count()
    }
}

pub(crate) fn join_ids<I: IntoIterator<Item = NodeId>>(ids: I) -> String {
    ids.into_iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Initial distance table: `0` for `start`, unreachable elsewhere.
pub(crate) fn initial_distances(graph: &Graph, start: NodeId) -> BTreeMap<NodeId, Distance> {
    graph
        .nodes()
        .map(|n| {
            let d = if n.id == start {
                Distance::ZERO
            } else {
                Distance::Unreachable
            };
            (n.id, d)
        })
        .collect()
}

/// Records the "node: distance" listing in graph insertion order.
pub(crate) fn narrate_distances(
    graph: &Graph,
    distances: &BTreeMap<NodeId, Distance>,
    rec: &mut Recorder,
) {
    for node in graph.nodes() {
        let d = distances.get(&node.id).copied().unwrap_or_default();
        rec.note(format!("  Node {}: {d}", node.id));
    }
}

/// Shared guard for algorithms that need a start node: an unknown start
/// yields a one-step trace around an empty result.
pub(crate) fn missing_start<R>(
    graph: &Graph,
    start: NodeId,
    empty: impl FnOnce() -> R,
) -> Option<Traced<R>> {
    if graph.contains_node(start) {
        return None;
    }
    let mut rec = Recorder::new();
    rec.note(format!("Start node {start} is not in the graph"));
    Some(rec.finish(empty()))
}
