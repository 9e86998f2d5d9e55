use std::cmp::Reverse;
use std::collections::{BTreeSet, BinaryHeap};

use tracing::debug;

use super::{join_ids, missing_start, SpanningTree};
use crate::graph::{Edge, Graph, NodeId, Weight};
use crate::step::{AlgorithmStep, Recorder, Traced};

type Candidate = Reverse<(Weight, u64, NodeId, NodeId)>;

fn push_frontier(
    graph: &Graph,
    from: NodeId,
    in_tree: &BTreeSet<NodeId>,
    queue: &mut BinaryHeap<Candidate>,
    seq: &mut u64,
) -> Vec<NodeId> {
    let mut pushed = Vec::new();
    for edge in graph.neighbors(from) {
        if in_tree.contains(&edge.to) {
            continue;
        }
        *seq += 1;
        queue.push(Reverse((edge.weight, *seq, from, edge.to)));
        pushed.push(edge.to);
    }
    pushed
}

/// Prim's minimum spanning tree grown from `start`.
///
/// Candidate edges are ordered by `(weight, push order)`. On a disconnected
/// graph the result spans only the component of `start`.
pub fn prim(graph: &Graph, start: NodeId) -> Traced<SpanningTree> {
    debug!(start, "prim");
    if let Some(done) = missing_start(graph, start, SpanningTree::default) {
        return done;
    }
    let mut rec = Recorder::new();
    rec.note("Prim's minimum spanning tree");
    rec.note(format!("Start node: {start}"));

    let mut tree = SpanningTree::default();
    let mut in_tree = BTreeSet::from([start]);
    let mut active = BTreeSet::new();
    let mut queue = BinaryHeap::new();
    let mut seq = 0u64;

    let pushed = push_frontier(graph, start, &in_tree, &mut queue, &mut seq);
    rec.push(
        AlgorithmStep::new(format!(
            "Added {start} to the tree, candidate edges to: {}",
            join_ids(pushed)
        ))
        .with_visited(&in_tree),
    );

    while let Some(Reverse((weight, _, from, to))) = queue.pop() {
        if in_tree.contains(&to) {
            rec.push(
                AlgorithmStep::new(format!(
                    "Skipped edge {from}-{to} (weight {weight}): {to} is already in the tree"
                ))
                .with_visited(&in_tree)
                .with_active_edges(&active),
            );
            continue;
        }
        in_tree.insert(to);
        active.insert((from, to));
        tree.edges.push(Edge::new(from, to, weight));
        tree.total_weight += weight;
        rec.push(
            AlgorithmStep::new(format!(
                "Selected edge {from}-{to} (weight {weight}), total weight {}",
                tree.total_weight
            ))
            .with_visited(&in_tree)
            .with_active_edges(&active),
        );
        let pushed = push_frontier(graph, to, &in_tree, &mut queue, &mut seq);
        if !pushed.is_empty() {
            rec.push(
                AlgorithmStep::new(format!("New candidate edges from {to} to: {}", join_ids(pushed)))
                    .with_visited(&in_tree)
                    .with_active_edges(&active),
            );
        }
    }

    if in_tree.len() < graph.node_count() {
        rec.note(format!(
            "Graph is disconnected: the tree covers {} of {} nodes",
            in_tree.len(),
            graph.node_count()
        ));
    }
    rec.push(
        AlgorithmStep::new(format!(
            "Prim complete: {} edges, total weight {}",
            tree.edges.len(),
            tree.total_weight
        ))
        .with_visited(&in_tree)
        .with_active_edges(&active),
    );
    rec.finish(tree)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_tree() {
        let graph = Graph::sample(false);
        let traced = prim(&graph, 0);
        let tree = &traced.result;
        assert_eq!(tree.total_weight, 14);
        assert!(tree.spans(&graph));
        let pairs: Vec<(NodeId, NodeId)> = tree.edges.iter().map(|e| (e.from, e.to)).collect();
        assert_eq!(pairs, vec![(0, 2), (2, 1), (1, 3), (3, 4), (4, 5)]);
        assert!(traced.contains_text("Skipped edge"));
    }

    #[test]
    fn disconnected_graph_covers_one_component() {
        let mut graph = Graph::undirected();
        graph.add_edge(0, 1, 3);
        graph.add_edge(5, 6, 1);
        let traced = prim(&graph, 0);
        assert_eq!(traced.result.edges, vec![Edge::new(0, 1, 3)]);
        assert!(!traced.result.spans(&graph));
        assert!(traced.contains_text("Graph is disconnected: the tree covers 2 of 4 nodes"));
    }
}
