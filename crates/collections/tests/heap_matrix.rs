use algolab_collections::MaxHeap;
use proptest::prelude::*;
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256StarStar;

#[test]
fn heap_small_insert_extract_matrix() {
    let mut heap = MaxHeap::new();
    for k in [5, 3, 8, 1] {
        heap.insert(k);
        heap.assert_valid().unwrap();
    }
    assert_eq!(heap.peek(), Some(8));
    assert_eq!(heap.tree().root().map(|n| n.key), Some(8));

    let (max, _) = heap.extract_max();
    assert_eq!(max, Some(8));
    heap.assert_valid().unwrap();
    let mut rest = heap.elements().to_vec();
    rest.sort_unstable();
    assert_eq!(rest, vec![1, 3, 5]);
}

#[test]
fn heap_drains_in_descending_order_matrix() {
    let mut rng = Xoshiro256StarStar::seed_from_u64(11);
    let mut heap = MaxHeap::new();
    let mut model: Vec<i64> = (0..200).map(|_| rng.gen_range(-50..50)).collect();
    for &k in &model {
        heap.insert(k);
    }
    model.sort_unstable_by(|a, b| b.cmp(a));
    let mut drained = Vec::new();
    while let (Some(max), _) = heap.extract_max() {
        drained.push(max);
        heap.assert_valid().unwrap();
    }
    assert_eq!(drained, model);
    assert!(heap.is_empty());
    assert_eq!(heap.height(), 0);
    assert!(heap.tree().is_empty());
}

#[test]
fn heap_delete_arbitrary_matrix() {
    let mut heap = MaxHeap::new();
    for k in [50, 40, 45, 10, 20, 44, 43, 1, 2, 3] {
        heap.insert(k);
    }
    for k in [40, 1, 50, 43, 3] {
        assert!(!heap.delete(k).is_rejected(), "{k}");
        heap.assert_valid().unwrap();
    }
    let mut rest = heap.elements().to_vec();
    rest.sort_unstable();
    assert_eq!(rest, vec![2, 10, 20, 44, 45]);
    assert!(heap.delete(40).is_rejected());
}

#[test]
fn heap_duplicates_matrix() {
    let mut heap = MaxHeap::new();
    for k in [7, 7, 7] {
        heap.insert(k);
    }
    assert!(!heap.delete(7).is_rejected());
    assert_eq!(heap.elements(), &[7, 7]);
}

proptest! {
    #[test]
    fn heap_property_holds(ops in proptest::collection::vec((0u8..3, -20i64..20), 0..150)) {
        let mut heap = MaxHeap::new();
        let mut model: Vec<i64> = Vec::new();
        for (op, key) in ops {
            match op {
                0 => {
                    heap.insert(key);
                    model.push(key);
                }
                1 => {
                    let (max, _) = heap.extract_max();
                    let expected = model.iter().copied().max();
                    prop_assert_eq!(max, expected);
                    if let Some(m) = expected {
                        let at = model.iter().position(|&v| v == m).unwrap();
                        model.swap_remove(at);
                    }
                }
                _ => {
                    let log = heap.delete(key);
                    match model.iter().position(|&v| v == key) {
                        Some(at) => {
                            prop_assert!(!log.is_rejected());
                            model.swap_remove(at);
                        }
                        None => prop_assert!(log.is_rejected()),
                    }
                }
            }
            prop_assert_eq!(heap.assert_valid(), Ok(()));
            prop_assert_eq!(heap.len(), model.len());
        }
    }
}
