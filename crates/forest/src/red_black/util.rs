//! Red-Black fix-up procedures and the invariant checker.
//!
//! Absent children count as black leaves everywhere in this module.

use algolab_core::StepLog;

use super::types::{Color, RbNode};
use crate::util::{get_l, get_p, get_r, key_of, rotate_left, rotate_right};

#[inline]
pub(crate) fn color(arena: &[RbNode], idx: Option<u32>) -> Color {
    idx.map_or(Color::Black, |i| arena[i as usize].color)
}

#[inline]
pub(crate) fn is_red(arena: &[RbNode], idx: Option<u32>) -> bool {
    color(arena, idx) == Color::Red
}

#[inline]
pub(crate) fn paint(arena: &mut [RbNode], idx: u32, c: Color) {
    arena[idx as usize].color = c;
}

/// Restores the red-black properties after the red node `n` was linked in.
/// Returns the new root.
pub(crate) fn fix_after_insert(
    arena: &mut [RbNode],
    mut root: Option<u32>,
    n: u32,
    log: &mut StepLog,
) -> Option<u32> {
    let nk = key_of(arena, n);
    match get_p(arena, n) {
        None => {
            paint(arena, n, Color::Black);
            log.push(format!("Case 1: {nk} is the root, recolored black (the root is always black)"));
            return root;
        }
        Some(p) if !is_red(arena, Some(p)) => {
            log.push(format!(
                "Case 2: parent {} is black, no red-red violation",
                key_of(arena, p)
            ));
            return root;
        }
        Some(_) => {}
    }

    let mut z = n;
    while let Some(p) = get_p(arena, z).filter(|&p| is_red(arena, Some(p))) {
        let zk = key_of(arena, z);
        let pk = key_of(arena, p);
        let Some(g) = get_p(arena, p) else {
            paint(arena, p, Color::Black);
            log.push(format!("Parent {pk} is the root, recolored black"));
            break;
        };
        let gk = key_of(arena, g);
        let parent_is_left = get_l(arena, g) == Some(p);
        let uncle = if parent_is_left {
            get_r(arena, g)
        } else {
            get_l(arena, g)
        };

        if let Some(u) = uncle.filter(|&u| is_red(arena, Some(u))) {
            let uk = key_of(arena, u);
            log.push(format!(
                "Case 3a: parent {pk} and node {zk} are both red, uncle {uk} is red, recoloring"
            ));
            paint(arena, p, Color::Black);
            paint(arena, u, Color::Black);
            paint(arena, g, Color::Red);
            log.push(format!(
                "Parent {pk} and uncle {uk} recolored black, grandparent {gk} recolored red"
            ));
            log.push(format!("Black-height preserved, checking grandparent {gk} for a new violation"));
            z = g;
            continue;
        }

        log.push(format!(
            "Case 3b: parent {pk} and node {zk} are both red, uncle is black or absent, rotation needed"
        ));
        let node_is_left = get_l(arena, p) == Some(z);
        let top = match (parent_is_left, node_is_left) {
            (true, true) => {
                log.push(format!("Left-Left case: right rotation at grandparent {gk}"));
                root = rotate_right(arena, root, g);
                p
            }
            (true, false) => {
                log.push(format!(
                    "Left-Right case: left rotation at parent {pk}, then right rotation at grandparent {gk}"
                ));
                root = rotate_left(arena, root, p);
                root = rotate_right(arena, root, g);
                z
            }
            (false, false) => {
                log.push(format!("Right-Right case: left rotation at grandparent {gk}"));
                root = rotate_left(arena, root, g);
                p
            }
            (false, true) => {
                log.push(format!(
                    "Right-Left case: right rotation at parent {pk}, then left rotation at grandparent {gk}"
                ));
                root = rotate_right(arena, root, p);
                root = rotate_left(arena, root, g);
                z
            }
        };
        paint(arena, top, Color::Black);
        paint(arena, g, Color::Red);
        log.push(format!(
            "{} recolored black, former grandparent {gk} recolored red",
            key_of(arena, top)
        ));
        break;
    }

    if let Some(r) = root.filter(|&r| is_red(arena, Some(r))) {
        paint(arena, r, Color::Black);
        log.push(format!("Final check: root {} recolored black", key_of(arena, r)));
    }
    root
}

/// Resolves the "double black" left behind when a black node was spliced
/// out. `x` is the child that took its place (possibly absent) and `parent`
/// is where it now hangs. Returns the new root.
pub(crate) fn fix_after_delete(
    arena: &mut [RbNode],
    mut root: Option<u32>,
    mut x: Option<u32>,
    mut parent: Option<u32>,
    log: &mut StepLog,
) -> Option<u32> {
    while x != root && !is_red(arena, x) {
        let Some(p) = parent else {
            break;
        };
        let pk = key_of(arena, p);
        let x_is_left = get_l(arena, p) == x;
        let sibling_of = |arena: &[RbNode]| {
            if x_is_left {
                get_r(arena, p)
            } else {
                get_l(arena, p)
            }
        };
        let Some(mut w) = sibling_of(arena) else {
            log.push(format!("Double black under {pk} has no sibling, moving up"));
            x = Some(p);
            parent = get_p(arena, p);
            continue;
        };

        if is_red(arena, Some(w)) {
            log.push(format!(
                "Case 1: sibling {} is red, recolor it black and parent {pk} red, rotate at {pk}",
                key_of(arena, w)
            ));
            paint(arena, w, Color::Black);
            paint(arena, p, Color::Red);
            root = if x_is_left {
                rotate_left(arena, root, p)
            } else {
                rotate_right(arena, root, p)
            };
            match sibling_of(arena) {
                Some(s) => w = s,
                None => break,
            }
        }

        let (near, far) = if x_is_left {
            (get_l(arena, w), get_r(arena, w))
        } else {
            (get_r(arena, w), get_l(arena, w))
        };
        let wk = key_of(arena, w);

        if !is_red(arena, near) && !is_red(arena, far) {
            log.push(format!(
                "Case 2: sibling {wk} and both its children are black, recolor {wk} red and move the double black up to {pk}"
            ));
            paint(arena, w, Color::Red);
            x = Some(p);
            parent = get_p(arena, p);
            continue;
        }

        if !is_red(arena, far) {
            if let Some(n) = near {
                log.push(format!(
                    "Case 3: far child of sibling {wk} is black but near child {} is red, rotate at {wk} away from the double black",
                    key_of(arena, n)
                ));
                paint(arena, n, Color::Black);
            }
            paint(arena, w, Color::Red);
            root = if x_is_left {
                rotate_right(arena, root, w)
            } else {
                rotate_left(arena, root, w)
            };
            match sibling_of(arena) {
                Some(s) => w = s,
                None => break,
            }
        }

        let wk = key_of(arena, w);
        log.push(format!(
            "Case 4: far child of sibling {wk} is red, sibling takes parent {pk}'s color, rotate at {pk}"
        ));
        paint(arena, w, color(arena, Some(p)));
        paint(arena, p, Color::Black);
        let far = if x_is_left {
            get_r(arena, w)
        } else {
            get_l(arena, w)
        };
        if let Some(f) = far {
            paint(arena, f, Color::Black);
        }
        root = if x_is_left {
            rotate_left(arena, root, p)
        } else {
            rotate_right(arena, root, p)
        };
        x = root;
        parent = None;
    }

    if let Some(xi) = x.filter(|&xi| is_red(arena, Some(xi))) {
        paint(arena, xi, Color::Black);
        log.push(format!("{} recolored black", key_of(arena, xi)));
    }
    root
}

/// Checks root colour, parent links, ordering, red-red and black-height.
pub fn assert_red_black_tree(arena: &[RbNode], root: Option<u32>) -> Result<(), String> {
    crate::util::check_links_and_order(arena, root)?;
    let Some(root) = root else {
        return Ok(());
    };
    if is_red(arena, Some(root)) {
        return Err("Root is not black".to_string());
    }

    fn black_height(arena: &[RbNode], node: Option<u32>) -> Result<usize, String> {
        let Some(node) = node else {
            return Ok(1);
        };
        let l = get_l(arena, node);
        let r = get_r(arena, node);
        if is_red(arena, Some(node)) && (is_red(arena, l) || is_red(arena, r)) {
            return Err(format!("Red node {} has a red child", key_of(arena, node)));
        }
        let lh = black_height(arena, l)?;
        let rh = black_height(arena, r)?;
        if lh != rh {
            return Err(format!(
                "Black height mismatch under {}: {lh} vs {rh}",
                key_of(arena, node)
            ));
        }
        Ok(lh + usize::from(!is_red(arena, Some(node))))
    }

    black_height(arena, Some(root)).map(|_| ())
}
