//! Splay tree: no balance metadata, every access rotates the touched key to
//! the root.
//!
//! Splaying descends two levels at a time, remembering the shape of each
//! step, then applies the rotation pairs from the bottom of the path up.

use algolab_core::{Key, StepLog};
use tracing::debug;

use crate::rejection::TreeRejection;
use crate::types::{impl_key_node, Arena, NodeRef};
use crate::util::{
    attach_left, attach_right, check_links_and_order, find, get_l, get_r, height, in_order,
    key_of, print, rotate_left_subtree, rotate_right_subtree, set_p,
};

#[derive(Clone, Debug)]
pub struct SplayNode {
    pub key: Key,
    pub p: Option<u32>,
    pub l: Option<u32>,
    pub r: Option<u32>,
}

impl SplayNode {
    pub fn new(key: Key) -> Self {
        Self {
            key,
            p: None,
            l: None,
            r: None,
        }
    }
}

impl_key_node!(SplayNode);

/// Rotation pair owed to a node passed on the way down.
#[derive(Clone, Copy, Debug)]
enum Shape {
    LeftLeft,
    LeftRight,
    RightRight,
    RightLeft,
}

/// A node two levels above the current search position, with the child the
/// path went through.
struct Pending {
    n: u32,
    child: u32,
    nk: Key,
    ck: Key,
    shape: Shape,
}

/// Splays `key` (or the last node visited looking for it) to the top of the
/// subtree at `n` and returns the new subtree root.
///
/// The descent moves two levels at a time and records the shape found at each
/// step. The bottom of the path gets a single zig when only one level is
/// left; the recorded pairs are then applied bottom-up.
///
/// ```text
///  zig-zig        zig-zag
///      n             n
///     /             /
///    l             l
///   /               \
///  x                 x
/// ```
pub(crate) fn splay(arena: &mut [SplayNode], mut n: u32, key: Key, log: &mut StepLog) -> u32 {
    let mut path: Vec<Pending> = Vec::new();
    let mut top = loop {
        let nk = key_of(arena, n);
        if key == nk {
            break n;
        }
        if key < nk {
            let Some(l) = get_l(arena, n) else {
                break n;
            };
            let lk = key_of(arena, l);
            let next = if key < lk {
                get_l(arena, l).map(|g| (g, Shape::LeftLeft))
            } else if key > lk {
                get_r(arena, l).map(|g| (g, Shape::LeftRight))
            } else {
                None
            };
            let Some((g, shape)) = next else {
                log.push(format!("Zig: right rotation at {nk}, {lk} moves up"));
                break rotate_right_subtree(arena, n);
            };
            path.push(Pending { n, child: l, nk, ck: lk, shape });
            n = g;
        } else {
            let Some(r) = get_r(arena, n) else {
                break n;
            };
            let rk = key_of(arena, r);
            let next = if key > rk {
                get_r(arena, r).map(|g| (g, Shape::RightRight))
            } else if key < rk {
                get_l(arena, r).map(|g| (g, Shape::RightLeft))
            } else {
                None
            };
            let Some((g, shape)) = next else {
                log.push(format!("Zig: left rotation at {nk}, {rk} moves up"));
                break rotate_left_subtree(arena, n);
            };
            path.push(Pending { n, child: r, nk, ck: rk, shape });
            n = g;
        }
    };

    while let Some(Pending { n, child, nk, ck, shape }) = path.pop() {
        top = match shape {
            Shape::LeftLeft => {
                attach_left(arena, child, Some(top));
                log.push(format!(
                    "Zig-zig (left-left): right rotation at {nk}, then right rotation at {ck}"
                ));
                let up = rotate_right_subtree(arena, n);
                rotate_right_subtree(arena, up)
            }
            Shape::LeftRight => {
                attach_right(arena, child, Some(top));
                log.push(format!(
                    "Zig-zag (left-right): left rotation at {ck}, then right rotation at {nk}"
                ));
                let nl = rotate_left_subtree(arena, child);
                attach_left(arena, n, Some(nl));
                rotate_right_subtree(arena, n)
            }
            Shape::RightRight => {
                attach_right(arena, child, Some(top));
                log.push(format!(
                    "Zig-zig (right-right): left rotation at {nk}, then left rotation at {ck}"
                ));
                let up = rotate_left_subtree(arena, n);
                rotate_left_subtree(arena, up)
            }
            Shape::RightLeft => {
                attach_left(arena, child, Some(top));
                log.push(format!(
                    "Zig-zag (right-left): right rotation at {ck}, then left rotation at {nk}"
                ));
                let nr = rotate_right_subtree(arena, child);
                attach_right(arena, n, Some(nr));
                rotate_left_subtree(arena, n)
            }
        };
    }
    top
}

#[derive(Clone, Debug, Default)]
pub struct SplayTree {
    arena: Arena<SplayNode>,
    root: Option<u32>,
    len: usize,
}

impl SplayTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn root(&self) -> Option<NodeRef<'_, SplayNode>> {
        NodeRef::maybe(&self.arena, self.root)
    }

    /// Membership test that leaves the shape alone.
    pub fn contains(&self, key: Key) -> bool {
        find(&self.arena, self.root, key).is_some()
    }

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
        let count = check_links_and_order(&self.arena, self.root)?;
        if count != self.len {
            return Err(format!("{count} reachable nodes but len is {}", self.len));
        }
        Ok(())
    }

    pub fn print(&self) -> String {
        print(&self.arena, self.root, |n| n.key.to_string())
    }

    /// Splays the root subtree around `key` and reattaches the result as the
    /// root.
    fn splay_root(&mut self, root: u32, key: Key, log: &mut StepLog) -> u32 {
        let top = splay(&mut self.arena, root, key, log);
        set_p(&mut self.arena, top, None);
        self.root = Some(top);
        top
    }

    /// Plain BST insert followed by a splay of the new key. An existing key
    /// is splayed to the root and reported as a duplicate.
    pub fn insert(&mut self, key: Key) -> StepLog {
        let mut log = StepLog::new();
        let Some(root) = self.root else {
            self.root = Some(self.arena.alloc(SplayNode::new(key)));
            self.len = 1;
            log.push(format!("Tree was empty, {key} becomes the root"));
            debug!(key, "splay insert");
            return log;
        };

        let mut curr = root;
        loop {
            let ck = key_of(&self.arena, curr);
            if key == ck {
                self.splay_root(root, key, &mut log);
                log.reject(TreeRejection::Duplicate(key));
                debug!(key, "splay insert rejected");
                return log;
            }
            let next = if key < ck {
                log.push(format!("{key} < {ck}, going left"));
                get_l(&self.arena, curr)
            } else {
                log.push(format!("{key} > {ck}, going right"));
                get_r(&self.arena, curr)
            };
            match next {
                Some(n) => curr = n,
                None => break,
            }
        }

        let n = self.arena.alloc(SplayNode::new(key));
        let ck = key_of(&self.arena, curr);
        if key < ck {
            attach_left(&mut self.arena, curr, Some(n));
            log.push(format!("Inserted {key} as left child of {ck}"));
        } else {
            attach_right(&mut self.arena, curr, Some(n));
            log.push(format!("Inserted {key} as right child of {ck}"));
        }
        self.len += 1;
        log.push(format!("Splaying {key} to the root"));
        self.splay_root(root, key, &mut log);
        log.push(format!("{key} is now the root"));
        debug!(key, steps = log.len(), "splay insert");
        log
    }

    /// Splays `key` to the root, then joins the two subtrees by splaying the
    /// maximum of the left subtree and hanging the right subtree under it.
    /// Without a left subtree the successor is splayed up instead.
    pub fn delete(&mut self, key: Key) -> StepLog {
        let mut log = StepLog::new();
        let Some(root) = self.root else {
            log.reject(TreeRejection::NotFound(key));
            debug!(key, "splay delete rejected");
            return log;
        };
        log.push(format!("Splaying {key} to the root"));
        let top = self.splay_root(root, key, &mut log);
        let tk = key_of(&self.arena, top);
        if tk != key {
            log.push(format!("{tk} is now the root, nearest to {key}"));
            log.reject(TreeRejection::NotFound(key));
            debug!(key, "splay delete rejected");
            return log;
        }

        let left = get_l(&self.arena, top);
        let right = get_r(&self.arena, top);
        self.arena.release(top);
        self.len -= 1;
        match left {
            None => match right {
                None => {
                    self.root = None;
                    log.push(format!("Removed {key}, the tree is now empty"));
                }
                Some(r) => {
                    set_p(&mut self.arena, r, None);
                    log.push(format!(
                        "Removed {key}, no left subtree so the minimum of the right subtree is splayed up"
                    ));
                    let joint = self.splay_root(r, key, &mut log);
                    log.push(format!("{} is now the root", key_of(&self.arena, joint)));
                }
            },
            Some(l) => {
                set_p(&mut self.arena, l, None);
                log.push(format!(
                    "Removed {key}, splaying the maximum of the left subtree to join both halves"
                ));
                let joint = self.splay_root(l, key, &mut log);
                attach_right(&mut self.arena, joint, right);
                log.push(format!(
                    "{} is now the root with the right subtree reattached",
                    key_of(&self.arena, joint)
                ));
            }
        }
        debug!(key, steps = log.len(), "splay delete");
        log
    }

    /// Splays `key` (or the last node visited) to the root and reports
    /// whether it was present.
    pub fn search(&mut self, key: Key) -> (bool, StepLog) {
        let mut log = StepLog::new();
        let Some(root) = self.root else {
            log.push(format!("Tree is empty, {key} not found"));
            return (false, log);
        };
        let top = self.splay_root(root, key, &mut log);
        let found = key_of(&self.arena, top) == key;
        if found {
            log.push(format!("Found {key}, now at the root"));
        } else {
            log.push(format!("{key} not found, {} splayed to the root", key_of(&self.arena, top)));
        }
        debug!(key, found, "splay search");
        (found, log)
    }
}
