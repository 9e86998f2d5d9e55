//! algolab: self-balancing trees, a max-heap, an open-addressing hash table,
//! a Huffman coder and seven graph algorithms, each narrating the steps it
//! takes.
//!
//! | Crate | Re-exported as | Contents |
//! |-------|----------------|----------|
//! `algolab-core` | crate root | [`StepLog`], [`Replay`], [`Key`] |
//! `algolab-forest` | [`forest`] | Red-Black, AVL and Splay trees |
//! `algolab-collections` | [`collections`] | max-heap, hash table, Huffman |
//! `algolab-graph` | [`graph`] | [`Graph`] and the algorithms |
//!
//! [`config`] holds the serde [`LabConfig`]; [`logging`] installs a
//! `tracing` subscriber for hosts that want the step events on stderr.

pub mod config;
pub mod logging;

pub use algolab_collections as collections;
pub use algolab_forest as forest;
pub use algolab_graph as graph;

pub use algolab_collections::{HashTable, HashTableConfig, Huffman, MaxHeap, ProbeStrategy};
pub use algolab_core::step_log::STEP_TARGET;
pub use algolab_core::{Key, Replay, StepLog};
pub use algolab_forest::{AvlTree, RedBlackTree, SplayTree};
pub use algolab_graph::{AlgorithmStep, Graph, Traced};
pub use config::LabConfig;
