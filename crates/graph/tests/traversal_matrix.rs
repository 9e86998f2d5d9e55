use std::collections::BTreeSet;

use algolab_core::Replay;
use algolab_graph::{bfs, dfs, Graph, NodeId};
use proptest::prelude::*;
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256StarStar;

fn reachable(graph: &Graph, start: NodeId) -> BTreeSet<NodeId> {
    let mut seen = BTreeSet::from([start]);
    let mut stack = vec![start];
    while let Some(curr) = stack.pop() {
        for edge in graph.neighbors(curr) {
            if seen.insert(edge.to) {
                stack.push(edge.to);
            }
        }
    }
    seen
}

fn random_graph(rng: &mut Xoshiro256StarStar, nodes: i64, edges: usize, directed: bool) -> Graph {
    let mut graph = Graph::new(directed);
    for id in 0..nodes {
        graph.add_node(id);
    }
    for _ in 0..edges {
        let from = rng.gen_range(0..nodes);
        let to = rng.gen_range(0..nodes);
        graph.add_edge(from, to, rng.gen_range(1..10));
    }
    graph
}

#[test]
fn traversal_sample_orders_matrix() {
    let graph = Graph::sample(false);
    for start in 0..6 {
        let b = bfs(&graph, start).result;
        let d = dfs(&graph, start).result;
        assert_eq!(b.order.len(), 6, "bfs from {start}");
        assert_eq!(d.order.len(), 6, "dfs from {start}");
        assert_eq!(b.order[0], start);
        assert_eq!(d.order[0], start);
        assert_eq!(b.tree_edges.len(), 5);
        assert_eq!(d.tree_edges.len(), 5);
    }
    assert_eq!(bfs(&graph, 5).result.order, vec![5, 4, 3, 1, 2, 0]);
    assert_eq!(dfs(&graph, 5).result.order, vec![5, 4, 3, 1, 0, 2]);
}

#[test]
fn traversal_component_cardinality_ladder_matrix() {
    let mut rng = Xoshiro256StarStar::seed_from_u64(2024);
    for round in 0..60 {
        let directed = round % 2 == 0;
        let edges = rng.gen_range(0..16);
        let graph = random_graph(&mut rng, 12, edges, directed);
        let start = rng.gen_range(0..12);
        let model = reachable(&graph, start);
        assert_eq!(bfs(&graph, start).result.visited(), model, "round {round}");
        assert_eq!(dfs(&graph, start).result.visited(), model, "round {round}");
    }
}

#[test]
fn traversal_tree_edges_discover_each_node_once_matrix() {
    let mut rng = Xoshiro256StarStar::seed_from_u64(7);
    let graph = random_graph(&mut rng, 20, 40, false);
    for traced in [bfs(&graph, 0), dfs(&graph, 0)] {
        let result = traced.result;
        let targets: BTreeSet<NodeId> = result.tree_edges.iter().map(|&(_, to)| to).collect();
        assert_eq!(targets.len(), result.tree_edges.len());
        assert_eq!(targets.len() + 1, result.order.len());
        assert!(!targets.contains(&0));
    }
}

#[test]
fn traversal_replay_walks_recorded_steps_matrix() {
    let graph = Graph::sample(false);
    let steps = bfs(&graph, 0).steps;
    let total = steps.len();
    let mut replay = Replay::from(steps);
    assert_eq!(replay.current().map(|s| s.description.as_str()), Some("Breadth-first search"));
    while !replay.is_at_end() {
        replay.next_step();
    }
    assert_eq!(replay.index(), total - 1);
    assert_eq!(
        replay.current().map(|s| s.description.as_str()),
        Some("Visited nodes: 0, 1, 2, 3, 4, 5")
    );
    let last_visited = replay.current().and_then(|s| s.visited.clone()).unwrap();
    assert_eq!(last_visited.len(), 6);
    replay.go_to_step(2);
    assert_eq!(replay.current().map(|s| s.description.as_str()), Some("Enqueued 0"));
}

proptest! {
    #[test]
    fn traversal_visits_exactly_the_component(
        edges in proptest::collection::vec((0i64..10, 0i64..10), 0..25),
        start in 0i64..10,
        directed in any::<bool>(),
    ) {
        let mut graph = Graph::new(directed);
        for id in 0..10 {
            graph.add_node(id);
        }
        for (from, to) in edges {
            graph.add_edge(from, to, 1);
        }
        let model = reachable(&graph, start);
        let b = bfs(&graph, start).result;
        let d = dfs(&graph, start).result;
        prop_assert_eq!(b.order.len(), model.len());
        prop_assert_eq!(d.order.len(), model.len());
        prop_assert_eq!(b.visited(), model.clone());
        prop_assert_eq!(d.visited(), model);
    }
}
