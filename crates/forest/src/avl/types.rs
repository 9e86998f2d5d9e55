use algolab_core::Key;

use crate::types::{impl_key_node, NodeRef};

#[derive(Clone, Debug)]
pub struct AvlNode {
    pub key: Key,
    /// Height of the subtree rooted here; a leaf has height 1.
    pub height: i32,
    pub p: Option<u32>,
    pub l: Option<u32>,
    pub r: Option<u32>,
}

impl AvlNode {
    pub fn new(key: Key) -> Self {
        Self {
            key,
            height: 1,
            p: None,
            l: None,
            r: None,
        }
    }
}

impl_key_node!(AvlNode);

impl NodeRef<'_, AvlNode> {
    pub fn height(&self) -> i32 {
        self.node().height
    }

    /// Right height minus left height.
    pub fn balance(&self) -> i32 {
        self.right().map_or(0, |n| n.height()) - self.left().map_or(0, |n| n.height())
    }
}
