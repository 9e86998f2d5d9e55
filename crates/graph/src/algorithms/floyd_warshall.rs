use std::fmt;

use serde::Serialize;
use tracing::{debug, warn};

use crate::distance::Distance;
use crate::graph::{Graph, NodeId};
use crate::step::{Recorder, Traced};

/// All-pairs distances over the sorted node ids, with the next hop of each
/// shortest path.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DistanceMatrix {
    ids: Vec<NodeId>,
    dist: Vec<Vec<Distance>>,
    next: Vec<Vec<Option<usize>>>,
}

impl DistanceMatrix {
    fn new(mut ids: Vec<NodeId>) -> Self {
        ids.sort_unstable();
        let n = ids.len();
        let mut dist = vec![vec![Distance::Unreachable; n]; n];
        let mut next = vec![vec![None; n]; n];
        for i in 0..n {
            dist[i][i] = Distance::ZERO;
            next[i][i] = Some(i);
        }
        Self { ids, dist, next }
    }

    fn position(&self, id: NodeId) -> Option<usize> {
        self.ids.binary_search(&id).ok()
    }

    /// Row and column order.
    pub fn ids(&self) -> &[NodeId] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Distance from `from` to `to`; unknown ids are unreachable.
    pub fn get(&self, from: NodeId, to: NodeId) -> Distance {
        match (self.position(from), self.position(to)) {
            (Some(i), Some(j)) => self.dist[i][j],
            _ => Distance::Unreachable,
        }
    }

    /// Node sequence of a shortest path, rebuilt from the next-hop matrix.
    pub fn path(&self, from: NodeId, to: NodeId) -> Option<Vec<NodeId>> {
        let (mut i, j) = (self.position(from)?, self.position(to)?);
        if !self.dist[i][j].is_reachable() {
            return None;
        }
        let mut path = vec![self.ids[i]];
        while i != j {
            i = self.next[i][j]?;
            path.push(self.ids[i]);
            if path.len() > self.ids.len() {
                return None;
            }
        }
        Some(path)
    }

    /// Whether some node reaches itself with negative length.
    pub fn has_negative_cycle(&self) -> bool {
        (0..self.ids.len()).any(|i| self.dist[i][i] < Distance::ZERO)
    }

    /// Formatted rows: a header of ids, then one line per source node.
    pub fn rows(&self) -> Vec<String> {
        let mut header = String::from("    ");
        for id in &self.ids {
            header.push_str(&format!("{id:>4}"));
        }
        let mut rows = vec![header];
        for (i, id) in self.ids.iter().enumerate() {
            let mut line = format!("{id:>4}");
            for d in &self.dist[i] {
                line.push_str(&format!("{d:>4}"));
            }
            rows.push(line);
        }
        rows
    }
}

impl fmt::Display for DistanceMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.rows().join("\n"))
    }
}

/// All-pairs shortest paths over adjacency arcs. Parallel arcs keep the
/// lightest weight.
pub fn floyd_warshall(graph: &Graph) -> Traced<DistanceMatrix> {
    debug!(nodes = graph.node_count(), "floyd-warshall");
    let mut rec = Recorder::new();
    rec.note("Floyd-Warshall all-pairs shortest paths");

    let mut m = DistanceMatrix::new(graph.node_ids());
    for edge in graph.arcs() {
        let (Some(i), Some(j)) = (m.position(edge.from), m.position(edge.to)) else {
            continue;
        };
        if Distance::Finite(edge.weight) < m.dist[i][j] {
            m.dist[i][j] = Distance::Finite(edge.weight);
            m.next[i][j] = Some(j);
        }
    }
    rec.note("Initial matrix (direct edges only):");
    for row in m.rows() {
        rec.note(row);
    }

    let n = m.ids.len();
    for k in 0..n {
        let via = m.ids[k];
        rec.note(format!("=== Intermediate node {via} ==="));
        for i in 0..n {
            let Some(ik) = m.dist[i][k].finite() else {
                continue;
            };
            for j in 0..n {
                let Some(kj) = m.dist[k][j].finite() else {
                    continue;
                };
                let candidate = ik.saturating_add(kj);
                if Distance::Finite(candidate) < m.dist[i][j] {
                    let (from, to) = (m.ids[i], m.ids[j]);
                    rec.note(format!(
                        "dist[{from}][{to}] = dist[{from}][{via}] + dist[{via}][{to}] = {ik} + {kj} = {candidate} (was {})",
                        m.dist[i][j]
                    ));
                    m.dist[i][j] = Distance::Finite(candidate);
                    m.next[i][j] = m.next[i][k];
                }
            }
        }
    }

    if m.has_negative_cycle() {
        warn!("floyd-warshall negative cycle");
        rec.note("Negative cycle detected: some node reaches itself with negative length");
    }
    rec.note("Final distance matrix:");
    for row in m.rows() {
        rec.note(row);
    }
    rec.finish(m)
}
