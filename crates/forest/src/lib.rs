//! Self-balancing binary search trees for teaching.
//!
//! Three engines share one arena layout: nodes live in a [`Arena`] and every
//! "pointer" is an `Option<u32>` index into it. Parent links are plain indices
//! too, used for rotation bookkeeping and sibling/uncle lookup, so no node is
//! ever shared or reference-counted.
//!
//! Each mutating call returns a [`StepLog`] narrating the decisions it took:
//! comparisons on the way down, the imbalance case detected, every rotation
//! and recolouring.
//!
//! # Module layout
//!
//! | Module | Contents |
//! |--------|----------|
//! [`types`] | [`Node`] / [`KeyNode`] link traits, [`Arena`], [`NodeRef`] views |
//! [`util`] | rotations, in-order walk, search, height, structural checks, printing |
//! [`red_black`] | [`RedBlackTree`] |
//! [`avl`] | [`AvlTree`] |
//! [`splay`] | [`SplayTree`] |

pub mod avl;
pub mod red_black;
pub mod rejection;
pub mod splay;
pub mod types;
pub mod util;

pub use algolab_core::{Key, StepLog};
pub use avl::{AvlNode, AvlTree};
pub use red_black::{Color, RbNode, RedBlackTree};
pub use rejection::TreeRejection;
pub use splay::{SplayNode, SplayTree};
pub use types::{Arena, KeyNode, Node, NodeRef};
