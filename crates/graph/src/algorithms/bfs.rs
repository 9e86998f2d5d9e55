use std::collections::{BTreeSet, VecDeque};

use tracing::debug;

use super::{join_ids, missing_start, Traversal};
use crate::graph::{Graph, NodeId};
use crate::step::{AlgorithmStep, Recorder, Traced};

/// Breadth-first search. Nodes are marked visited when enqueued and
/// neighbours are taken in adjacency-list order.
pub fn bfs(graph: &Graph, start: NodeId) -> Traced<Traversal> {
    debug!(start, "bfs");
    if let Some(done) = missing_start(graph, start, || Traversal::empty(start)) {
        return done;
    }
    let mut rec = Recorder::new();
    rec.note("Breadth-first search");
    rec.note(format!("Start node: {start}"));

    let mut result = Traversal::empty(start);
    let mut visited = BTreeSet::from([start]);
    let mut active = BTreeSet::new();
    let mut queue = VecDeque::from([start]);
    rec.push(AlgorithmStep::new(format!("Enqueued {start}")).with_visited(&visited));

    let mut round = 1;
    while let Some(curr) = queue.pop_front() {
        result.order.push(curr);
        rec.push(
            AlgorithmStep::new(format!("Step {round}: dequeued {curr}"))
                .with_visited(&visited)
                .with_active_edges(&active),
        );
        let neighbors = graph.neighbors(curr);
        rec.push(
            AlgorithmStep::new(format!(
                "Neighbors of {curr}: {}",
                join_ids(neighbors.iter().map(|e| e.to))
            ))
            .with_visited(&visited)
            .with_active_edges(&active),
        );
        for edge in neighbors {
            let next = edge.to;
            let description = if visited.insert(next) {
                queue.push_back(next);
                active.insert((curr, next));
                result.tree_edges.push((curr, next));
                format!("Discovered {next}, enqueued")
            } else {
                format!("{next} was already visited")
            };
            rec.push(
                AlgorithmStep::new(description)
                    .with_visited(&visited)
                    .with_active_edges(&active),
            );
        }
        rec.push(
            AlgorithmStep::new(format!("Queue: [{}]", join_ids(queue.iter().copied())))
                .with_visited(&visited)
                .with_active_edges(&active),
        );
        round += 1;
    }

    rec.push(
        AlgorithmStep::new("BFS complete")
            .with_visited(&visited)
            .with_active_edges(&active),
    );
    rec.push(
        AlgorithmStep::new(format!("Visited nodes: {}", join_ids(visited.iter().copied())))
            .with_visited(&visited)
            .with_active_edges(&active),
    );
    rec.finish(result)
}
