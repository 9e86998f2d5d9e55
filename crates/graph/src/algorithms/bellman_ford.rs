use std::collections::BTreeMap;

use serde::Serialize;
use tracing::{debug, warn};

use super::{initial_distances, missing_start, narrate_distances, ShortestPaths};
use crate::distance::Distance;
use crate::graph::{Edge, Graph, NodeId};
use crate::step::{AlgorithmStep, Recorder, Traced};

/// Bellman-Ford's answer. A reachable negative cycle makes every distance
/// unreliable, so only the edge that exposed it is reported.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum BellmanFordOutcome {
    Converged(ShortestPaths),
    NegativeCycle { edge: Edge },
}

impl BellmanFordOutcome {
    pub fn paths(&self) -> Option<&ShortestPaths> {
        match self {
            Self::Converged(paths) => Some(paths),
            Self::NegativeCycle { .. } => None,
        }
    }

    pub fn negative_cycle(&self) -> Option<Edge> {
        match self {
            Self::Converged(_) => None,
            Self::NegativeCycle { edge } => Some(*edge),
        }
    }
}

/// Relaxes `edge` against `distances`, returning the improved distance.
fn relaxed(distances: &BTreeMap<NodeId, Distance>, edge: &Edge) -> Option<i64> {
    let from = distances.get(&edge.from)?.finite()?;
    let candidate = from.saturating_add(edge.weight);
    let known = distances.get(&edge.to).copied().unwrap_or_default();
    (Distance::Finite(candidate) < known).then_some(candidate)
}

/// Single-source shortest paths allowing negative weights.
///
/// Runs at most `V - 1` passes over every adjacency arc, stopping early after
/// a pass without updates, then makes one more pass to detect a negative
/// cycle reachable from `start`.
pub fn bellman_ford(graph: &Graph, start: NodeId) -> Traced<BellmanFordOutcome> {
    debug!(start, "bellman-ford");
    if let Some(done) = missing_start(graph, start, || {
        BellmanFordOutcome::Converged(ShortestPaths::empty(start))
    }) {
        return done;
    }
    let mut rec = Recorder::new();
    rec.note("Bellman-Ford shortest paths");
    rec.note(format!("Start node: {start}"));

    let mut distances = initial_distances(graph, start);
    let mut parents = BTreeMap::new();
    rec.note("Initial distances:");
    narrate_distances(graph, &distances, &mut rec);

    let passes = graph.node_count().saturating_sub(1);
    for pass in 1..=passes {
        rec.note(format!("Pass {pass} of {passes}"));
        let mut updated = false;
        for edge in graph.arcs() {
            let Some(candidate) = relaxed(&distances, edge) else {
                continue;
            };
            distances.insert(edge.to, Distance::Finite(candidate));
            parents.insert(edge.to, edge.from);
            updated = true;
            rec.push(
                AlgorithmStep::new(format!(
                    "Updated {}: dist[{}] + w({},{}) = {} + {} = {candidate}",
                    edge.to,
                    edge.from,
                    edge.from,
                    edge.to,
                    distances[&edge.from],
                    edge.weight
                ))
                .with_distances(&distances)
                .with_parents(&parents),
            );
        }
        if !updated {
            rec.note(format!("No updates in pass {pass}, stopping early"));
            break;
        }
    }

    rec.note("Checking for negative cycles");
    if let Some(edge) = graph.arcs().find(|e| relaxed(&distances, e).is_some()) {
        warn!(from = edge.from, to = edge.to, "bellman-ford negative cycle");
        rec.push(
            AlgorithmStep::new(format!(
                "Negative cycle detected: edge {}→{} (weight {}) can still be relaxed, distances are unreliable",
                edge.from, edge.to, edge.weight
            ))
            .with_distances(&distances)
            .with_parents(&parents),
        );
        return rec.finish(BellmanFordOutcome::NegativeCycle { edge: *edge });
    }

    rec.push(
        AlgorithmStep::new("No negative cycle found")
            .with_distances(&distances)
            .with_parents(&parents),
    );
    rec.note("Shortest distances:");
    narrate_distances(graph, &distances, &mut rec);
    rec.finish(BellmanFordOutcome::Converged(ShortestPaths {
        start,
        distances,
        parents,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_edge_without_cycle() {
        let mut graph = Graph::directed();
        graph.add_edge(0, 1, 4);
        graph.add_edge(0, 2, 5);
        graph.add_edge(2, 1, -3);
        graph.add_edge(1, 3, 1);
        let traced = bellman_ford(&graph, 0);
        let paths = traced.result.paths().unwrap();
        assert_eq!(paths.distance(1), Distance::Finite(2));
        assert_eq!(paths.distance(3), Distance::Finite(3));
        assert_eq!(paths.path_to(3), Some(vec![0, 2, 1, 3]));
        assert!(traced.contains_text("No negative cycle found"));
    }

    #[test]
    fn detects_negative_cycle() {
        let mut graph = Graph::directed();
        graph.add_edge(0, 1, 1);
        graph.add_edge(1, 2, -2);
        graph.add_edge(2, 1, 1);
        let traced = bellman_ford(&graph, 0);
        assert!(traced.result.paths().is_none());
        let edge = traced.result.negative_cycle().unwrap();
        assert!([(1, 2), (2, 1)].contains(&(edge.from, edge.to)));
        assert!(traced.contains_text("Negative cycle detected"));
    }

    #[test]
    fn unreachable_cycle_is_ignored() {
        let mut graph = Graph::directed();
        graph.add_edge(0, 1, 2);
        graph.add_edge(5, 6, -1);
        graph.add_edge(6, 5, -1);
        let traced = bellman_ford(&graph, 0);
        let paths = traced.result.paths().unwrap();
        assert_eq!(paths.distance(1), Distance::Finite(2));
        assert_eq!(paths.distance(5), Distance::Unreachable);
    }

    #[test]
    fn matches_dijkstra_on_sample() {
        let graph = Graph::sample(false);
        let bf = bellman_ford(&graph, 0);
        let dj = super::super::dijkstra(&graph, 0);
        assert_eq!(bf.result.paths().unwrap().distances, dj.result.distances);
        assert!(bf.contains_text("stopping early"));
    }
}
