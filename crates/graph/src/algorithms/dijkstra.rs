use std::cmp::Reverse;
use std::collections::{BTreeMap, BTreeSet, BinaryHeap};

use tracing::debug;

use super::{initial_distances, missing_start, narrate_distances, ShortestPaths};
use crate::distance::Distance;
use crate::graph::{Graph, NodeId};
use crate::step::{AlgorithmStep, Recorder, Traced};

/// Single-source shortest paths for non-negative weights.
///
/// The queue holds `(distance, push order, node)`; stale entries for nodes
/// already finalised are skipped when popped. Equal distances pop in push
/// order.
pub fn dijkstra(graph: &Graph, start: NodeId) -> Traced<ShortestPaths> {
    debug!(start, "dijkstra");
    if let Some(done) = missing_start(graph, start, || ShortestPaths::empty(start)) {
        return done;
    }
    let mut rec = Recorder::new();
    rec.note("Dijkstra's shortest paths");
    rec.note(format!("Start node: {start}"));

    let mut distances = initial_distances(graph, start);
    let mut parents = BTreeMap::new();
    let mut finalized = BTreeSet::new();
    let mut active = BTreeSet::new();
    rec.note("Initial distances:");
    narrate_distances(graph, &distances, &mut rec);

    let mut queue = BinaryHeap::new();
    let mut seq = 0u64;
    queue.push(Reverse((0i64, seq, start)));

    let mut round = 1;
    while let Some(Reverse((dist, _, curr))) = queue.pop() {
        if !finalized.insert(curr) {
            rec.note(format!("Skipping stale queue entry {curr} ({dist})"));
            continue;
        }
        rec.push(
            AlgorithmStep::new(format!(
                "Step {round}: closest unfinalized node is {curr} (distance {dist})"
            ))
            .with_visited(&finalized)
            .with_active_edges(&active)
            .with_distances(&distances),
        );
        for edge in graph.neighbors(curr) {
            let next = edge.to;
            let candidate = dist.saturating_add(edge.weight);
            let known = distances.get(&next).copied().unwrap_or_default();
            if Distance::Finite(candidate) < known {
                distances.insert(next, Distance::Finite(candidate));
                parents.insert(next, curr);
                seq += 1;
                queue.push(Reverse((candidate, seq, next)));
                active.insert((curr, next));
                rec.push(
                    AlgorithmStep::new(format!(
                        "Updated {next}: dist[{curr}] + w({curr},{next}) = {dist} + {} = {candidate}",
                        edge.weight
                    ))
                    .with_visited(&finalized)
                    .with_active_edges(&active)
                    .with_distances(&distances)
                    .with_parents(&parents),
                );
            } else {
                rec.push(
                    AlgorithmStep::new(format!("No update for {next}: {candidate} ≥ {known}"))
                        .with_visited(&finalized)
                        .with_active_edges(&active)
                        .with_distances(&distances),
                );
            }
        }
        round += 1;
    }

    rec.push(
        AlgorithmStep::new("Dijkstra complete")
            .with_visited(&finalized)
            .with_active_edges(&active)
            .with_distances(&distances)
            .with_parents(&parents),
    );
    rec.note("Shortest distances:");
    narrate_distances(graph, &distances, &mut rec);
    rec.finish(ShortestPaths {
        start,
        distances,
        parents,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_distances() {
        let graph = Graph::sample(false);
        let traced = dijkstra(&graph, 0);
        let paths = &traced.result;
        let got: Vec<i64> = (0..6).filter_map(|n| paths.distance(n).finite()).collect();
        assert_eq!(got, vec![0, 4, 3, 6, 8, 14]);
        assert_eq!(paths.path_to(5), Some(vec![0, 1, 3, 4, 5]));
        assert!(traced.contains_text("Updated 1: dist[0] + w(0,1) = 0 + 4 = 4"));
    }

    #[test]
    fn unreachable_stays_infinite() {
        let mut graph = Graph::directed();
        graph.add_edge(0, 1, 2);
        graph.add_node(9);
        let traced = dijkstra(&graph, 0);
        assert_eq!(traced.result.distance(9), Distance::Unreachable);
        assert_eq!(traced.result.path_to(9), None);
        assert!(traced.contains_text("  Node 9: ∞"));
    }
}
