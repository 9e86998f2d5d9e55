//! AVL tree with cached heights and recursive, rebalance-on-unwind updates.
//!
//! Balance factor is `height(right) - height(left)`; any node outside
//! `-1..=1` is rotated on the way back up.

pub mod types;
pub mod util;

use algolab_core::{Key, StepLog};
use tracing::debug;

pub use types::AvlNode;
pub use util::assert_avl_tree;

use crate::rejection::TreeRejection;
use crate::types::{Arena, NodeRef};
use crate::util::{
    attach_left, attach_right, find, get_l, get_r, in_order, key_of, min_under,
    narrate_search, print, set_p,
};
use util::{balance, rotate_left, rotate_right, update_height};

#[derive(Clone, Debug, Default)]
pub struct AvlTree {
    arena: Arena<AvlNode>,
    root: Option<u32>,
    len: usize,
}

impl AvlTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn root(&self) -> Option<NodeRef<'_, AvlNode>> {
        NodeRef::maybe(&self.arena, self.root)
    }

    pub fn search(&self, key: Key) -> Option<NodeRef<'_, AvlNode>> {
        NodeRef::maybe(&self.arena, find(&self.arena, self.root, key))
    }

    pub fn contains(&self, key: Key) -> bool {
        find(&self.arena, self.root, key).is_some()
    }

    /// Cached height of the root.
    pub fn height(&self) -> usize {
        self.root().map_or(0, |r| r.height() as usize)
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
        assert_avl_tree(&self.arena, self.root)
    }

    /// Box-drawing dump with each node's height and balance factor.
    pub fn print(&self) -> String {
        let arena: &[AvlNode] = &self.arena;
        print(arena, self.root, |n| {
            let bf = n.r.map_or(0, |r| arena[r as usize].height)
                - n.l.map_or(0, |l| arena[l as usize].height);
            format!("{} (h={}, bf={bf})", n.key, n.height)
        })
    }

    pub fn insert(&mut self, key: Key) -> StepLog {
        let mut log = StepLog::new();
        if find(&self.arena, self.root, key).is_some() {
            narrate_search(&self.arena, self.root, key, &mut log);
            log.reject(TreeRejection::Duplicate(key));
            debug!(key, "avl insert rejected");
            return log;
        }
        let root = self.insert_at(self.root, key, &mut log);
        set_p(&mut self.arena, root, None);
        self.root = Some(root);
        self.len += 1;
        debug!(key, steps = log.len(), "avl insert");
        log
    }

    pub fn delete(&mut self, key: Key) -> StepLog {
        let mut log = StepLog::new();
        let Some(root) = self.root.filter(|_| find(&self.arena, self.root, key).is_some()) else {
            narrate_search(&self.arena, self.root, key, &mut log);
            log.reject(TreeRejection::NotFound(key));
            debug!(key, "avl delete rejected");
            return log;
        };
        self.root = self.delete_at(root, key, &mut log);
        if let Some(r) = self.root {
            set_p(&mut self.arena, r, None);
        }
        self.len -= 1;
        debug!(key, steps = log.len(), "avl delete");
        log
    }

    fn insert_at(&mut self, node: Option<u32>, key: Key, log: &mut StepLog) -> u32 {
        let Some(n) = node else {
            log.push(format!("Reached an empty position, created node {key}"));
            return self.arena.alloc(AvlNode::new(key));
        };
        let nk = key_of(&self.arena, n);
        if key < nk {
            log.push(format!("{key} < {nk}, going left"));
            let child = self.insert_at(get_l(&self.arena, n), key, log);
            attach_left(&mut self.arena, n, Some(child));
        } else {
            log.push(format!("{key} > {nk}, going right"));
            let child = self.insert_at(get_r(&self.arena, n), key, log);
            attach_right(&mut self.arena, n, Some(child));
        }
        self.rebalance(n, log)
    }

    /// Removes `key` from the subtree at `n`, which must contain it.
    fn delete_at(&mut self, n: u32, key: Key, log: &mut StepLog) -> Option<u32> {
        let nk = key_of(&self.arena, n);
        if key < nk {
            log.push(format!("{key} < {nk}, going left"));
            if let Some(l) = get_l(&self.arena, n) {
                let child = self.delete_at(l, key, log);
                attach_left(&mut self.arena, n, child);
            }
        } else if key > nk {
            log.push(format!("{key} > {nk}, going right"));
            if let Some(r) = get_r(&self.arena, n) {
                let child = self.delete_at(r, key, log);
                attach_right(&mut self.arena, n, child);
            }
        } else {
            log.push(format!("Found {key}"));
            match (get_l(&self.arena, n), get_r(&self.arena, n)) {
                (None, None) => {
                    log.push(format!("{key} is a leaf, removed"));
                    self.arena.release(n);
                    return None;
                }
                (Some(c), None) | (None, Some(c)) => {
                    log.push(format!(
                        "{key} has one child, {} takes its place",
                        key_of(&self.arena, c)
                    ));
                    self.arena.release(n);
                    return Some(c);
                }
                (Some(_), Some(r)) => {
                    let s = min_under(&self.arena, r);
                    let sk = key_of(&self.arena, s);
                    log.push(format!(
                        "{key} has two children, copying in-order successor {sk} and deleting it from the right subtree"
                    ));
                    self.arena[n as usize].key = sk;
                    let child = self.delete_at(r, sk, log);
                    attach_right(&mut self.arena, n, child);
                }
            }
        }
        Some(self.rebalance(n, log))
    }

    /// Refreshes the height of `n` and rotates if it is out of balance.
    /// Returns the subtree's new root.
    fn rebalance(&mut self, n: u32, log: &mut StepLog) -> u32 {
        let arena: &mut [AvlNode] = &mut self.arena;
        update_height(arena, n);
        let bf = balance(arena, n);
        let nk = key_of(arena, n);
        match (bf, get_l(arena, n), get_r(arena, n)) {
            (bf, Some(l), _) if bf < -1 => {
                if balance(arena, l) > 0 {
                    log.push(format!("Balance factor of {nk} is {bf}, Left-Right case"));
                    let nl = rotate_left(arena, l, log);
                    attach_left(arena, n, Some(nl));
                } else {
                    log.push(format!("Balance factor of {nk} is {bf}, Left-Left case"));
                }
                rotate_right(arena, n, log)
            }
            (bf, _, Some(r)) if bf > 1 => {
                if balance(arena, r) < 0 {
                    log.push(format!("Balance factor of {nk} is {bf}, Right-Left case"));
                    let nr = rotate_right(arena, r, log);
                    attach_right(arena, n, Some(nr));
                } else {
                    log.push(format!("Balance factor of {nk} is {bf}, Right-Right case"));
                }
                rotate_left(arena, n, log)
            }
            _ => {
                log.push(format!("Balance factor of {nk} is {bf}, balanced"));
                n
            }
        }
    }
}
