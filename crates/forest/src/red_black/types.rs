use std::fmt;

use algolab_core::Key;

use crate::types::{impl_key_node, NodeRef};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    Red,
    Black,
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Color::Red => "red",
            Color::Black => "black",
        })
    }
}

#[derive(Clone, Debug)]
pub struct RbNode {
    pub key: Key,
    pub color: Color,
    pub p: Option<u32>,
    pub l: Option<u32>,
    pub r: Option<u32>,
}

impl RbNode {
    /// New nodes start red.
    pub fn new(key: Key) -> Self {
        Self {
            key,
            color: Color::Red,
            p: None,
            l: None,
            r: None,
        }
    }
}

impl_key_node!(RbNode);

impl NodeRef<'_, RbNode> {
    pub fn color(&self) -> Color {
        self.node().color
    }

    pub fn is_red(&self) -> bool {
        self.color() == Color::Red
    }
}
