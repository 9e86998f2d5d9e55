//! Red-Black tree with CLRS-style insert and delete fix-ups.

pub mod types;
pub mod util;

use algolab_core::{Key, StepLog};
use tracing::debug;

pub use types::{Color, RbNode};
pub use util::assert_red_black_tree;

use crate::rejection::TreeRejection;
use crate::types::{Arena, NodeRef};
use crate::util::{
    attach_left, attach_right, find, get_l, get_p, get_r, height, in_order, key_of, min_under,
    narrate_search, print, replace_child, set_p,
};
use util::{color, fix_after_delete, fix_after_insert};

#[derive(Clone, Debug, Default)]
pub struct RedBlackTree {
    arena: Arena<RbNode>,
    root: Option<u32>,
    len: usize,
}

impl RedBlackTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn root(&self) -> Option<NodeRef<'_, RbNode>> {
        NodeRef::maybe(&self.arena, self.root)
    }

    pub fn search(&self, key: Key) -> Option<NodeRef<'_, RbNode>> {
        NodeRef::maybe(&self.arena, find(&self.arena, self.root, key))
    }

    pub fn contains(&self, key: Key) -> bool {
        find(&self.arena, self.root, key).is_some()
    }

    /// Nodes on the longest root-to-leaf path.
    pub fn height(&self) -> usize {
        height(&self.arena, self.root)
    }

    pub fn inorder(&self) -> Vec<Key> {
        in_order(&self.arena, self.root)
    }

    pub fn clear(&mut self) {
        self.arena.clear();
        self.root = None;
        self.len = 0;
    }

    pub fn assert_valid(&self) -> Result<(), String> {
        assert_red_black_tree(&self.arena, self.root)
    }

    /// Box-drawing dump with each node's colour.
    pub fn print(&self) -> String {
        print(&self.arena, self.root, |n| format!("{} ({})", n.key, n.color))
    }

    /// Inserts `key` as a red node, then repairs any red-red violation
    /// bottom-up. Duplicates are rejected without touching the tree.
    pub fn insert(&mut self, key: Key) -> StepLog {
        let mut log = StepLog::new();
        if find(&self.arena, self.root, key).is_some() {
            narrate_search(&self.arena, self.root, key, &mut log);
            log.reject(TreeRejection::Duplicate(key));
            debug!(key, "red-black insert rejected");
            return log;
        }

        let n = self.arena.alloc(RbNode::new(key));
        log.push(format!("Created node {key} (red)"));
        let mut parent = None;
        let mut curr = self.root;
        while let Some(c) = curr {
            let ck = key_of(&self.arena, c);
            if key < ck {
                log.push(format!("{key} < {ck}, going left"));
                curr = get_l(&self.arena, c);
            } else {
                log.push(format!("{key} > {ck}, going right"));
                curr = get_r(&self.arena, c);
            }
            parent = Some(c);
        }
        match parent {
            None => {
                self.root = Some(n);
                log.push(format!("Tree was empty, {key} becomes the root"));
            }
            Some(p) => {
                let pk = key_of(&self.arena, p);
                if key < pk {
                    attach_left(&mut self.arena, p, Some(n));
                    log.push(format!("Inserted {key} as left child of {pk}"));
                } else {
                    attach_right(&mut self.arena, p, Some(n));
                    log.push(format!("Inserted {key} as right child of {pk}"));
                }
            }
        }

        self.root = fix_after_insert(&mut self.arena, self.root, n, &mut log);
        self.len += 1;
        debug!(key, steps = log.len(), "red-black insert");
        log
    }

    /// Removes `key`. A node with two children takes its in-order
    /// successor's key and the successor node is spliced out instead. Missing
    /// keys are rejected without touching the tree.
    pub fn delete(&mut self, key: Key) -> StepLog {
        let mut log = StepLog::new();
        let Some(z) = narrate_search(&self.arena, self.root, key, &mut log) else {
            log.reject(TreeRejection::NotFound(key));
            debug!(key, "red-black delete rejected");
            return log;
        };

        let target = match (get_l(&self.arena, z), get_r(&self.arena, z)) {
            (Some(_), Some(zr)) => {
                let y = min_under(&self.arena, zr);
                let yk = key_of(&self.arena, y);
                log.push(format!(
                    "{key} has two children, copying in-order successor {yk} (minimum of the right subtree)"
                ));
                self.arena[z as usize].key = yk;
                y
            }
            _ => z,
        };

        let tk = key_of(&self.arena, target);
        let child = get_l(&self.arena, target).or(get_r(&self.arena, target));
        let parent = get_p(&self.arena, target);
        let removed = color(&self.arena, Some(target));
        self.root = replace_child(&mut self.arena, self.root, parent, target, child);
        if let Some(c) = child {
            set_p(&mut self.arena, c, parent);
            log.push(format!(
                "Spliced out {tk} ({removed}), its child {} takes its place",
                key_of(&self.arena, c)
            ));
        } else {
            log.push(format!("Removed leaf {tk} ({removed})"));
        }
        self.arena.release(target);
        self.len -= 1;

        if removed == Color::Black {
            log.push("A black node was removed, fixing the double black".to_string());
            self.root = fix_after_delete(&mut self.arena, self.root, child, parent, &mut log);
        } else {
            log.push("Removed node was red, no fix needed".to_string());
        }
        debug!(key, steps = log.len(), "red-black delete");
        log
    }
}
