//! Array-backed teaching collections.
//!
//! | Module | Contents |
//! |--------|----------|
//! [`heap`] | [`MaxHeap`] and its derived [`HeapTree`] view |
//! [`hash_table`] | [`HashTable`] with linear, quadratic and double-hash probing |
//! [`huffman`] | [`Huffman`] tree builder, encoder and decoder |
//!
//! Every mutating call returns a [`StepLog`]; inputs that cannot be applied
//! are recorded as a rejection in that log instead of an `Err`.

pub mod hash_table;
pub mod heap;
pub mod huffman;

pub use algolab_core::{Key, StepLog};
pub use hash_table::{ConfigError, HashRejection, HashTable, HashTableConfig, ProbeStrategy, Slot};
pub use heap::{HeapRejection, HeapTree, HeapViewNode, MaxHeap};
pub use huffman::{CompressionStats, Huffman, HuffmanError, HuffmanNode, HuffmanRejection};
