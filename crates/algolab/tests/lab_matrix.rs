use algolab::graph::{dijkstra, Distance};
use algolab::{Graph, Huffman, LabConfig, MaxHeap, RedBlackTree, Replay, SplayTree};
use proptest::prelude::*;
use std::io;
use std::sync::{Arc, Mutex};
use tracing::Level;

#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl io::Write for Captured {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn capture_events(f: impl FnOnce()) -> String {
    let sink = Captured::default();
    let writer = sink.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(Level::TRACE)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();
    tracing::subscriber::with_default(subscriber, f);
    let bytes = sink.0.lock().unwrap().clone();
    String::from_utf8(bytes).unwrap()
}

#[test]
fn lab_rotations_emit_trace_events_matrix() {
    let out = capture_events(|| {
        let mut tree = RedBlackTree::new();
        for k in [10, 20, 30] {
            tree.insert(k);
        }
    });
    assert!(out.contains("rotate left"), "{out}");
    assert!(!out.contains("rotate right"), "{out}");

    let out = capture_events(|| {
        let mut splay = SplayTree::new();
        for k in [3, 2, 1] {
            splay.insert(k);
        }
        splay.search(3);
    });
    assert!(out.contains("rotate left subtree"), "{out}");
}

#[test]
fn lab_empty_rejections_emit_debug_events_matrix() {
    let out = capture_events(|| {
        let mut splay = SplayTree::new();
        assert!(splay.delete(1).is_rejected());
        let mut heap = MaxHeap::new();
        assert!(heap.extract_max().1.is_rejected());
        assert!(heap.delete(4).is_rejected());
    });
    assert!(out.contains("splay delete rejected"), "{out}");
    assert!(out.contains("heap extract rejected"), "{out}");
    assert!(out.contains("heap delete rejected"), "{out}");
}

#[test]
fn lab_config_drives_hash_table_matrix() {
    let config = LabConfig::from_json(r#"{"hash_table": {"capacity": 5, "strategy": "quadratic"}}"#).unwrap();
    let mut table = config.hash_table().unwrap();
    for k in [5, 10, 15] {
        assert!(!table.insert(k).is_rejected());
    }
    assert!(table.contains(15));
    assert_eq!(table.len(), 3);
    assert!(table.insert(10).is_rejected());
}

#[test]
fn lab_replay_over_tree_log_matrix() {
    let mut tree = RedBlackTree::new();
    tree.insert(10);
    tree.insert(20);
    let log = tree.insert(30);
    let total = log.len();
    let last = log.last().map(str::to_owned);
    let mut replay = Replay::from(log);
    assert_eq!(replay.len(), total);
    replay.go_to_step(total - 1);
    assert!(replay.is_at_end());
    assert_eq!(replay.current().cloned(), last);
    replay.previous_step();
    assert_eq!(replay.index(), total - 2);
    assert_eq!(tree.inorder(), vec![10, 20, 30]);
}

#[test]
fn lab_engines_reject_as_final_step_matrix() {
    let mut splay = SplayTree::new();
    splay.insert(4);
    let log = splay.insert(4);
    assert!(log.is_rejected());
    assert_eq!(log.last(), log.rejection());

    let mut heap = MaxHeap::new();
    let (max, log) = heap.extract_max();
    assert_eq!(max, None);
    assert!(log.is_rejected());

    let mut huffman = Huffman::new();
    assert!(huffman.build_tree("").is_rejected());
}

#[test]
fn lab_graph_trace_serializes_matrix() {
    let graph = Graph::sample(false);
    let traced = dijkstra(&graph, 0);
    assert_eq!(traced.result.distance(5), Distance::Finite(14));
    let json = serde_json::to_value(&traced).unwrap();
    let steps = json["steps"].as_array().unwrap();
    assert_eq!(steps.len(), traced.steps.len());
    assert_eq!(json["result"]["distances"]["5"], 14);
    let unreachable = Graph::directed();
    assert!(dijkstra(&unreachable, 0).result.distances.is_empty());
}

proptest! {
    #[test]
    fn lab_huffman_roundtrip(text in "[a-e]{1,40}") {
        let mut huffman = Huffman::new();
        huffman.build_tree(&text);
        let bits = huffman.encode(&text);
        prop_assert_eq!(huffman.decode(&bits), text);
    }
}
