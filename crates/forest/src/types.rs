//! Node link traits and the arena that owns every node.
//!
//! Each "pointer" is an `Option<u32>` index into an [`Arena`]. Tree
//! manipulation functions take the arena as `&mut [N]` (the arena derefs to
//! its node slice) and work with indices only.

use std::fmt;
use std::ops::{Deref, DerefMut};

use algolab_core::Key;

/// Parent / left / right links.
pub trait Node {
    fn p(&self) -> Option<u32>;
    fn l(&self) -> Option<u32>;
    fn r(&self) -> Option<u32>;
    fn set_p(&mut self, v: Option<u32>);
    fn set_l(&mut self, v: Option<u32>);
    fn set_r(&mut self, v: Option<u32>);
}

/// A linked node carrying an integer key.
pub trait KeyNode: Node {
    fn key(&self) -> Key;
    fn set_key(&mut self, key: Key);
}

/// Implements [`Node`] and [`KeyNode`] for a struct with `key`, `p`, `l`
/// and `r` fields.
macro_rules! impl_key_node {
    ($ty:ty) => {
        impl $crate::types::Node for $ty {
            #[inline]
            fn p(&self) -> Option<u32> {
                self.p
            }
            #[inline]
            fn l(&self) -> Option<u32> {
                self.l
            }
            #[inline]
            fn r(&self) -> Option<u32> {
                self.r
            }
            #[inline]
            fn set_p(&mut self, v: Option<u32>) {
                self.p = v;
            }
            #[inline]
            fn set_l(&mut self, v: Option<u32>) {
                self.l = v;
            }
            #[inline]
            fn set_r(&mut self, v: Option<u32>) {
                self.r = v;
            }
        }

        impl $crate::types::KeyNode for $ty {
            #[inline]
            fn key(&self) -> algolab_core::Key {
                self.key
            }
            #[inline]
            fn set_key(&mut self, key: algolab_core::Key) {
                self.key = key;
            }
        }
    };
}
pub(crate) use impl_key_node;

/// Vec-backed node storage with a free list.
///
/// Released slots keep their stale node until [`Arena::alloc`] reuses them,
/// so indices handed out earlier never shift.
#[derive(Clone, Debug)]
pub struct Arena<N> {
    nodes: Vec<N>,
    free: Vec<u32>,
}

impl<N> Default for Arena<N> {
    fn default() -> Self {
        Self {
            nodes: Vec::new(),
            free: Vec::new(),
        }
    }
}

impl<N> Arena<N> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `node` and returns its index.
    pub fn alloc(&mut self, node: N) -> u32 {
        if let Some(idx) = self.free.pop() {
            self.nodes[idx as usize] = node;
            return idx;
        }
        self.nodes.push(node);
        (self.nodes.len() - 1) as u32
    }

    /// Marks `idx` as reusable. The caller must already have unlinked it.
    pub fn release(&mut self, idx: u32) {
        self.free.push(idx);
    }

    /// Number of live nodes.
    pub fn live(&self) -> usize {
        self.nodes.len() - self.free.len()
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.free.clear();
    }
}

impl<N> Deref for Arena<N> {
    type Target = [N];

    fn deref(&self) -> &[N] {
        &self.nodes
    }
}

impl<N> DerefMut for Arena<N> {
    fn deref_mut(&mut self) -> &mut [N] {
        &mut self.nodes
    }
}

/// Read-only view of one node, for renderers and tests.
///
/// Follows links through the arena, so a view is only valid while the tree
/// is borrowed.
pub struct NodeRef<'a, N> {
    arena: &'a [N],
    idx: u32,
}

impl<N> Clone for NodeRef<'_, N> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<N> Copy for NodeRef<'_, N> {}

impl<'a, N: KeyNode> NodeRef<'a, N> {
    pub(crate) fn new(arena: &'a [N], idx: u32) -> Self {
        Self { arena, idx }
    }

    pub(crate) fn maybe(arena: &'a [N], idx: Option<u32>) -> Option<Self> {
        idx.map(|idx| Self::new(arena, idx))
    }

    /// Arena index of this node.
    pub fn index(&self) -> u32 {
        self.idx
    }

    pub fn node(&self) -> &'a N {
        &self.arena[self.idx as usize]
    }

    pub fn key(&self) -> Key {
        self.node().key()
    }

    pub fn left(&self) -> Option<Self> {
        Self::maybe(self.arena, self.node().l())
    }

    pub fn right(&self) -> Option<Self> {
        Self::maybe(self.arena, self.node().r())
    }

    pub fn parent(&self) -> Option<Self> {
        Self::maybe(self.arena, self.node().p())
    }

    pub fn is_leaf(&self) -> bool {
        self.node().l().is_none() && self.node().r().is_none()
    }
}

impl<N: KeyNode> fmt::Debug for NodeRef<'_, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("index", &self.idx)
            .field("key", &self.key())
            .finish()
    }
}
