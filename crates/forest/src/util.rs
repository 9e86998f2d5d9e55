//! Link helpers shared by every engine: rotations, in-order walk, search,
//! height, structural checks and text rendering.

use algolab_core::{Key, StepLog};
use tracing::trace;

use crate::types::{KeyNode, Node};

#[inline]
pub(crate) fn get_p<N: Node>(arena: &[N], idx: u32) -> Option<u32> {
    arena[idx as usize].p()
}

#[inline]
pub(crate) fn get_l<N: Node>(arena: &[N], idx: u32) -> Option<u32> {
    arena[idx as usize].l()
}

#[inline]
pub(crate) fn get_r<N: Node>(arena: &[N], idx: u32) -> Option<u32> {
    arena[idx as usize].r()
}

#[inline]
pub(crate) fn set_p<N: Node>(arena: &mut [N], idx: u32, v: Option<u32>) {
    arena[idx as usize].set_p(v);
}

#[inline]
pub(crate) fn set_l<N: Node>(arena: &mut [N], idx: u32, v: Option<u32>) {
    arena[idx as usize].set_l(v);
}

#[inline]
pub(crate) fn set_r<N: Node>(arena: &mut [N], idx: u32, v: Option<u32>) {
    arena[idx as usize].set_r(v);
}

#[inline]
pub(crate) fn key_of<N: KeyNode>(arena: &[N], idx: u32) -> Key {
    arena[idx as usize].key()
}

/// Sets the left link of `parent` and the parent link of `child`.
pub(crate) fn attach_left<N: Node>(arena: &mut [N], parent: u32, child: Option<u32>) {
    set_l(arena, parent, child);
    if let Some(c) = child {
        set_p(arena, c, Some(parent));
    }
}

/// Sets the right link of `parent` and the parent link of `child`.
pub(crate) fn attach_right<N: Node>(arena: &mut [N], parent: u32, child: Option<u32>) {
    set_r(arena, parent, child);
    if let Some(c) = child {
        set_p(arena, c, Some(parent));
    }
}

/// Points whichever link of `parent` held `old` at `new` and returns the
/// resulting root. Without a parent, `new` becomes the root. Does not touch
/// `new`'s own parent link.
pub(crate) fn replace_child<N: Node>(
    arena: &mut [N],
    root: Option<u32>,
    parent: Option<u32>,
    old: u32,
    new: Option<u32>,
) -> Option<u32> {
    match parent {
        None => new,
        Some(p) => {
            if get_l(arena, p) == Some(old) {
                set_l(arena, p, new);
            } else {
                set_r(arena, p, new);
            }
            root
        }
    }
}

/// Rotates `x` down to the left, fully relinking its parent. Returns the new
/// tree root.
pub fn rotate_left<N: Node>(arena: &mut [N], root: Option<u32>, x: u32) -> Option<u32> {
    let Some(y) = get_r(arena, x) else {
        return root;
    };
    trace!(x, y, "rotate left");
    let p = get_p(arena, x);
    attach_right(arena, x, get_l(arena, y));
    set_p(arena, y, p);
    let root = replace_child(arena, root, p, x, Some(y));
    attach_left(arena, y, Some(x));
    root
}

/// Rotates `x` down to the right, fully relinking its parent. Returns the new
/// tree root.
pub fn rotate_right<N: Node>(arena: &mut [N], root: Option<u32>, x: u32) -> Option<u32> {
    let Some(y) = get_l(arena, x) else {
        return root;
    };
    trace!(x, y, "rotate right");
    let p = get_p(arena, x);
    attach_left(arena, x, get_r(arena, y));
    set_p(arena, y, p);
    let root = replace_child(arena, root, p, x, Some(y));
    attach_right(arena, y, Some(x));
    root
}

/// Rotates the subtree rooted at `x` to the left and returns its new root.
///
/// The new root inherits `x`'s parent index, but the parent's child link is
/// left for the caller to reattach.
pub(crate) fn rotate_left_subtree<N: Node>(arena: &mut [N], x: u32) -> u32 {
    let Some(y) = get_r(arena, x) else {
        return x;
    };
    trace!(x, y, "rotate left subtree");
    let p = get_p(arena, x);
    attach_right(arena, x, get_l(arena, y));
    attach_left(arena, y, Some(x));
    set_p(arena, y, p);
    y
}

/// Mirror of [`rotate_left_subtree`].
pub(crate) fn rotate_right_subtree<N: Node>(arena: &mut [N], x: u32) -> u32 {
    let Some(y) = get_l(arena, x) else {
        return x;
    };
    trace!(x, y, "rotate right subtree");
    let p = get_p(arena, x);
    attach_left(arena, x, get_r(arena, y));
    attach_right(arena, y, Some(x));
    set_p(arena, y, p);
    y
}

/// Leftmost node under `idx`.
pub fn min_under<N: Node>(arena: &[N], mut idx: u32) -> u32 {
    while let Some(l) = get_l(arena, idx) {
        idx = l;
    }
    idx
}

/// Rightmost node under `idx`.
pub fn max_under<N: Node>(arena: &[N], mut idx: u32) -> u32 {
    while let Some(r) = get_r(arena, idx) {
        idx = r;
    }
    idx
}

/// Leftmost node in the tree.
pub fn first<N: Node>(arena: &[N], root: Option<u32>) -> Option<u32> {
    root.map(|r| min_under(arena, r))
}

/// In-order successor.
pub fn next<N: Node>(arena: &[N], mut curr: u32) -> Option<u32> {
    if let Some(r) = get_r(arena, curr) {
        return Some(min_under(arena, r));
    }
    let mut p = get_p(arena, curr);
    while let Some(pi) = p {
        if get_r(arena, pi) == Some(curr) {
            curr = pi;
            p = get_p(arena, pi);
        } else {
            return Some(pi);
        }
    }
    None
}

/// Keys in ascending order.
pub fn in_order<N: KeyNode>(arena: &[N], root: Option<u32>) -> Vec<Key> {
    let mut keys = Vec::new();
    let mut curr = first(arena, root);
    while let Some(idx) = curr {
        keys.push(key_of(arena, idx));
        curr = next(arena, idx);
    }
    keys
}

/// Finds a node by key.
pub fn find<N: KeyNode>(arena: &[N], root: Option<u32>, key: Key) -> Option<u32> {
    let mut curr = root;
    while let Some(i) = curr {
        let k = key_of(arena, i);
        if key == k {
            return Some(i);
        }
        curr = if key < k {
            get_l(arena, i)
        } else {
            get_r(arena, i)
        };
    }
    None
}

/// Like [`find`], narrating each comparison into `log`.
pub fn narrate_search<N: KeyNode>(
    arena: &[N],
    root: Option<u32>,
    key: Key,
    log: &mut StepLog,
) -> Option<u32> {
    let mut curr = root;
    while let Some(i) = curr {
        let k = key_of(arena, i);
        if key == k {
            log.push(format!("Found {key}"));
            return Some(i);
        }
        if key < k {
            log.push(format!("{key} < {k}, going left"));
            curr = get_l(arena, i);
        } else {
            log.push(format!("{key} > {k}, going right"));
            curr = get_r(arena, i);
        }
    }
    None
}

/// Number of nodes on the longest root-to-leaf path; `0` for an empty tree.
///
/// Walks with an explicit stack, so degenerate spines of any depth are fine.
pub fn height<N: Node>(arena: &[N], root: Option<u32>) -> usize {
    let mut best = 0;
    let mut stack: Vec<(u32, usize)> = root.map(|r| (r, 1)).into_iter().collect();
    while let Some((idx, depth)) = stack.pop() {
        best = best.max(depth);
        for child in [get_l(arena, idx), get_r(arena, idx)].into_iter().flatten() {
            stack.push((child, depth + 1));
        }
    }
    best
}

/// Number of nodes under `root`.
pub fn size<N: Node>(arena: &[N], root: Option<u32>) -> usize {
    let mut count = 0;
    let mut stack: Vec<u32> = root.into_iter().collect();
    while let Some(idx) = stack.pop() {
        count += 1;
        stack.extend([get_l(arena, idx), get_r(arena, idx)].into_iter().flatten());
    }
    count
}

/// Checks parent/child link agreement and strict BST ordering.
///
/// Returns the node count on success, a description of the first violation
/// otherwise.
pub fn check_links_and_order<N: KeyNode>(arena: &[N], root: Option<u32>) -> Result<usize, String> {
    let Some(r) = root else {
        return Ok(0);
    };
    if get_p(arena, r).is_some() {
        return Err(format!("root {} has a parent link", key_of(arena, r)));
    }
    let mut count = 0;
    let mut stack: Vec<(u32, Option<Key>, Option<Key>)> = vec![(r, None, None)];
    while let Some((idx, lo, hi)) = stack.pop() {
        let k = key_of(arena, idx);
        if lo.is_some_and(|lo| k <= lo) || hi.is_some_and(|hi| k >= hi) {
            return Err(format!("{k} is out of order"));
        }
        count += 1;
        // Right first so the left subtree is checked first.
        for (child, lo, hi) in [
            (get_r(arena, idx), Some(k), hi),
            (get_l(arena, idx), lo, Some(k)),
        ] {
            if let Some(c) = child {
                if get_p(arena, c) != Some(idx) {
                    return Err(format!("{} does not point back to parent {k}", key_of(arena, c)));
                }
                stack.push((c, lo, hi));
            }
        }
    }
    Ok(count)
}

/// Renders the tree as an indented box-drawing dump, one node per line.
pub fn print<N, F>(arena: &[N], root: Option<u32>, describe: F) -> String
where
    N: KeyNode,
    F: Fn(&N) -> String,
{
    let Some(r) = root else {
        return "∅".to_string();
    };
    let mut out = describe(&arena[r as usize]);
    // (indent, side label, child, is last sibling)
    let mut stack: Vec<(String, &'static str, Option<u32>, bool)> = Vec::new();
    push_children(arena, r, String::new(), &mut stack);
    while let Some((tab, side, child, is_last)) = stack.pop() {
        let branch = if is_last { "└─" } else { "├─" };
        out.push('\n');
        out.push_str(&tab);
        out.push_str(branch);
        out.push(' ');
        out.push_str(side);
        out.push_str(": ");
        match child {
            None => out.push('∅'),
            Some(c) => {
                out.push_str(&describe(&arena[c as usize]));
                let child_tab = format!("{tab}{}  ", if is_last { " " } else { "│" });
                push_children(arena, c, child_tab, &mut stack);
            }
        }
    }
    out
}

/// Queues the two child lines of `idx`, left on top. Leaves queue nothing.
fn push_children<N: Node>(
    arena: &[N],
    idx: u32,
    tab: String,
    stack: &mut Vec<(String, &'static str, Option<u32>, bool)>,
) {
    let l = get_l(arena, idx);
    let r = get_r(arena, idx);
    if l.is_none() && r.is_none() {
        return;
    }
    stack.push((tab.clone(), "R", r, true));
    stack.push((tab, "L", l, false));
}
