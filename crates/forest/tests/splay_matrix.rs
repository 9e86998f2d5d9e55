use std::collections::BTreeSet;

use algolab_forest::SplayTree;
use proptest::prelude::*;
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256StarStar;

#[test]
fn splay_access_moves_to_root_matrix() {
    let mut tree = SplayTree::new();
    for k in [40, 20, 60, 10, 30, 50, 70] {
        tree.insert(k);
    }
    for k in [10, 70, 30, 50, 40] {
        let (found, _) = tree.search(k);
        assert!(found);
        assert_eq!(tree.root().unwrap().key(), k);
        tree.assert_valid().unwrap();
    }
}

#[test]
fn splay_delete_leaves_neighbour_at_root_matrix() {
    let mut tree = SplayTree::new();
    for k in 1..=9 {
        tree.insert(k * 10);
    }
    // Predecessor when there is a left subtree, successor otherwise.
    for (k, neighbour) in [(50, 40), (10, 20), (90, 80)] {
        let log = tree.delete(k);
        assert!(!log.is_rejected());
        assert_eq!(tree.root().unwrap().key(), neighbour, "{k}");
        tree.assert_valid().unwrap();
    }
    assert_eq!(tree.inorder(), vec![20, 30, 40, 60, 70, 80]);
}

#[test]
fn splay_sequential_access_flattens_matrix() {
    let mut tree = SplayTree::new();
    for k in 0..64 {
        tree.insert(k);
    }
    // Ascending inserts leave a left spine.
    assert_eq!(tree.height(), 64);
    tree.search(0);
    assert!(tree.height() < 64);
}

#[test]
fn splay_deep_spine_access_matrix() {
    const N: i64 = 20_000;
    let mut ascending = SplayTree::new();
    for k in 0..N {
        ascending.insert(k);
    }
    assert_eq!(ascending.height(), N as usize);
    let (found, log) = ascending.search(0);
    assert!(found);
    assert!(log.contains_text("Zig-zig (left-left)"));
    assert_eq!(ascending.root().unwrap().key(), 0);
    assert!(ascending.height() < N as usize);
    ascending.assert_valid().unwrap();
    assert!(!ascending.delete(1).is_rejected());
    assert_eq!(ascending.len(), N as usize - 1);

    let mut descending = SplayTree::new();
    for k in (0..N).rev() {
        descending.insert(k);
    }
    let (found, log) = descending.search(N - 1);
    assert!(found);
    assert!(log.contains_text("Zig-zig (right-right)"));
    assert_eq!(descending.root().unwrap().key(), N - 1);
    descending.assert_valid().unwrap();
    assert_eq!(descending.inorder(), (0..N).collect::<Vec<_>>());
}

#[test]
fn splay_ladder_matrix() {
    let mut rng = Xoshiro256StarStar::seed_from_u64(7);
    let mut tree = SplayTree::new();
    let mut model = BTreeSet::new();
    for _ in 0..1_000 {
        let key = rng.gen_range(0..100);
        match rng.gen_range(0..3) {
            0 => {
                tree.insert(key);
                model.insert(key);
                assert_eq!(tree.root().unwrap().key(), key);
            }
            1 => {
                let log = tree.delete(key);
                assert_eq!(log.is_rejected(), !model.remove(&key));
            }
            _ => {
                let (found, _) = tree.search(key);
                assert_eq!(found, model.contains(&key));
            }
        }
        tree.assert_valid().unwrap();
    }
    assert_eq!(tree.inorder(), model.into_iter().collect::<Vec<_>>());
}

proptest! {
    #[test]
    fn splay_keeps_order(keys in proptest::collection::vec(-30i64..30, 1..60)) {
        let mut tree = SplayTree::new();
        for &k in &keys {
            tree.insert(k);
            prop_assert_eq!(tree.root().map(|r| r.key()), Some(k));
        }
        prop_assert_eq!(tree.assert_valid(), Ok(()));
        let model: BTreeSet<i64> = keys.into_iter().collect();
        prop_assert_eq!(tree.inorder(), model.into_iter().collect::<Vec<_>>());
    }
}
