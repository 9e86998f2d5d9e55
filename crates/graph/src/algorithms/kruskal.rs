use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use super::SpanningTree;
use crate::graph::Graph;
use crate::step::{AlgorithmStep, Recorder, Traced};
use crate::union_find::UnionFind;

/// Kruskal's minimum spanning forest over the canonical edge list.
///
/// Edges are stably sorted by weight, so equal weights keep insertion order.
/// Stops once `node_count - 1` edges are accepted.
pub fn kruskal(graph: &Graph) -> Traced<SpanningTree> {
    debug!(nodes = graph.node_count(), edges = graph.edge_count(), "kruskal");
    let mut rec = Recorder::new();
    rec.note("Kruskal's minimum spanning tree");

    let index: BTreeMap<_, _> = graph
        .nodes()
        .enumerate()
        .map(|(i, n)| (n.id, i))
        .collect();
    let mut sets = UnionFind::new(index.len());
    let target = graph.node_count().saturating_sub(1);

    let mut sorted = graph.edges().to_vec();
    sorted.sort_by_key(|e| e.weight);
    rec.note(format!(
        "Edges sorted by weight: {}",
        sorted
            .iter()
            .map(|e| format!("{}-{}({})", e.from, e.to, e.weight))
            .collect::<Vec<_>>()
            .join(", ")
    ));

    let mut tree = SpanningTree::default();
    let mut joined = BTreeSet::new();
    let mut active = BTreeSet::new();
    for edge in sorted {
        if tree.edges.len() >= target {
            rec.note(format!("{target} edges accepted, stopping"));
            break;
        }
        let (Some(&a), Some(&b)) = (index.get(&edge.from), index.get(&edge.to)) else {
            continue;
        };
        let (ra, rb) = (sets.find(a), sets.find(b));
        if ra == rb {
            rec.push(
                AlgorithmStep::new(format!(
                    "Skipped edge {}-{} (weight {}): would form a cycle",
                    edge.from, edge.to, edge.weight
                ))
                .with_visited(&joined)
                .with_active_edges(&active),
            );
            continue;
        }
        sets.union(a, b);
        joined.insert(edge.from);
        joined.insert(edge.to);
        active.insert((edge.from, edge.to));
        tree.edges.push(edge);
        tree.total_weight += edge.weight;
        rec.push(
            AlgorithmStep::new(format!(
                "Accepted edge {}-{} (weight {}), total weight {}",
                edge.from, edge.to, edge.weight, tree.total_weight
            ))
            .with_visited(&joined)
            .with_active_edges(&active),
        );
        rec.note(format!("Sets of {} ∪ {} merged", edge.from, edge.to));
    }

    if tree.edges.len() < target {
        rec.note(format!(
            "Graph is disconnected: only {} of {target} edges could be accepted",
            tree.edges.len()
        ));
    }
    rec.push(
        AlgorithmStep::new(format!(
            "Kruskal complete: {} edges, total weight {}",
            tree.edges.len(),
            tree.total_weight
        ))
        .with_visited(&joined)
        .with_active_edges(&active),
    );
    rec.finish(tree)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Edge;

    #[test]
    fn sample_tree() {
        let graph = Graph::sample(false);
        let traced = kruskal(&graph);
        let tree = &traced.result;
        assert_eq!(tree.total_weight, 14);
        assert!(tree.spans(&graph));
        assert_eq!(
            tree.edges,
            vec![
                Edge::new(1, 2, 1),
                Edge::new(1, 3, 2),
                Edge::new(3, 4, 2),
                Edge::new(0, 2, 3),
                Edge::new(4, 5, 6),
            ]
        );
        assert!(traced.contains_text("Skipped edge 0-1 (weight 4): would form a cycle"));
    }

    #[test]
    fn stops_once_tree_is_complete() {
        let mut graph = Graph::undirected();
        graph.add_edge(0, 1, 1);
        graph.add_edge(1, 2, 2);
        graph.add_edge(0, 2, 3);
        let traced = kruskal(&graph);
        assert_eq!(traced.result.total_weight, 3);
        assert!(traced.contains_text("2 edges accepted, stopping"));
        assert!(!traced.contains_text("Skipped edge 0-2"));
    }

    #[test]
    fn empty_graph() {
        let traced = kruskal(&Graph::undirected());
        assert!(traced.result.edges.is_empty());
        assert_eq!(traced.result.total_weight, 0);
    }

    #[test]
    fn forest_on_disconnected_graph() {
        let mut graph = Graph::undirected();
        graph.add_edge(0, 1, 3);
        graph.add_edge(5, 6, 1);
        let traced = kruskal(&graph);
        assert_eq!(traced.result.total_weight, 4);
        assert!(traced.contains_text("only 2 of 3 edges"));
    }
}
