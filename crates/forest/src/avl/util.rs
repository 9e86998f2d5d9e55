use algolab_core::StepLog;

use super::types::AvlNode;
use crate::util::{get_l, get_r, key_of, rotate_left_subtree, rotate_right_subtree};

#[inline]
pub(crate) fn h(arena: &[AvlNode], idx: Option<u32>) -> i32 {
    idx.map_or(0, |i| arena[i as usize].height)
}

/// Right height minus left height.
#[inline]
pub(crate) fn balance(arena: &[AvlNode], idx: u32) -> i32 {
    h(arena, get_r(arena, idx)) - h(arena, get_l(arena, idx))
}

#[inline]
pub(crate) fn update_height(arena: &mut [AvlNode], idx: u32) {
    let height = 1 + h(arena, get_l(arena, idx)).max(h(arena, get_r(arena, idx)));
    arena[idx as usize].height = height;
}

/// Left rotation of the subtree at `x`, refreshing both heights.
pub(crate) fn rotate_left(arena: &mut [AvlNode], x: u32, log: &mut StepLog) -> u32 {
    let y = rotate_left_subtree(arena, x);
    if y != x {
        update_height(arena, x);
        update_height(arena, y);
        log.push(format!(
            "Left rotation at {}: {} moves up",
            key_of(arena, x),
            key_of(arena, y)
        ));
    }
    y
}

/// Right rotation of the subtree at `x`, refreshing both heights.
pub(crate) fn rotate_right(arena: &mut [AvlNode], x: u32, log: &mut StepLog) -> u32 {
    let y = rotate_right_subtree(arena, x);
    if y != x {
        update_height(arena, x);
        update_height(arena, y);
        log.push(format!(
            "Right rotation at {}: {} moves up",
            key_of(arena, x),
            key_of(arena, y)
        ));
    }
    y
}

/// Checks ordering, links, cached heights and `|balance| <= 1` everywhere.
pub fn assert_avl_tree(arena: &[AvlNode], root: Option<u32>) -> Result<(), String> {
    crate::util::check_links_and_order(arena, root)?;

    fn check(arena: &[AvlNode], node: Option<u32>) -> Result<i32, String> {
        let Some(n) = node else {
            return Ok(0);
        };
        let lh = check(arena, get_l(arena, n))?;
        let rh = check(arena, get_r(arena, n))?;
        let k = key_of(arena, n);
        if (rh - lh).abs() > 1 {
            return Err(format!("{k} is unbalanced: {}", rh - lh));
        }
        let height = 1 + lh.max(rh);
        if arena[n as usize].height != height {
            return Err(format!(
                "{k} caches height {} but has {height}",
                arena[n as usize].height
            ));
        }
        Ok(height)
    }

    check(arena, root).map(|_| ())
}
