use std::collections::BTreeSet;

use algolab_collections::{HashTable, HashTableConfig, ProbeStrategy, Slot};
use proptest::prelude::*;

const STRATEGIES: [ProbeStrategy; 3] = [
    ProbeStrategy::Linear,
    ProbeStrategy::Quadratic,
    ProbeStrategy::DoubleHashing,
];

#[test]
fn hash_tombstone_round_trip_matrix() {
    for strategy in STRATEGIES {
        let mut table = HashTable::new(strategy);
        table.insert(5);
        table.insert(16);
        assert!(!table.delete(5).is_rejected());
        assert!(table.contains(16), "{strategy:?}");
        assert!(!table.insert(27).is_rejected());
        assert!(table.contains(16) && table.contains(27), "{strategy:?}");
        assert!(!table.contains(5));
        assert!(table.delete(5).is_rejected());
        table.assert_valid().unwrap();
    }
}

#[test]
fn hash_linear_scenario_slots_matrix() {
    let mut table = HashTable::new(ProbeStrategy::Linear);
    table.insert(5);
    table.insert(16);
    table.delete(5);
    table.insert(27);
    let mut expected = vec![Slot::Empty; 11];
    expected[5] = Slot::Occupied(27);
    expected[6] = Slot::Occupied(16);
    assert_eq!(table.slots(), expected.as_slice());
    assert!(table.tombstones().iter().all(|&t| !t));
}

#[test]
fn hash_probe_narration_matrix() {
    let cases = [
        (ProbeStrategy::Linear, "Linear probing: (5 + 1) mod 11 = 6"),
        (ProbeStrategy::Quadratic, "Quadratic probing: (5 + 1²) mod 11 = (5 + 1) mod 11 = 6"),
        (ProbeStrategy::DoubleHashing, "Double hashing: (5 + 1 × 5) mod 11 = (5 + 5) mod 11 = 10"),
    ];
    for (strategy, expected) in cases {
        let mut table = HashTable::new(strategy);
        table.insert(5);
        let log = table.insert(16);
        assert!(log.contains_text(expected), "{strategy:?}: {log}");
    }
}

#[test]
fn hash_fills_to_capacity_matrix() {
    let mut table = HashTable::with_capacity(7, ProbeStrategy::Linear).unwrap();
    for k in 0..7 {
        assert!(!table.insert(k * 7).is_rejected());
    }
    assert_eq!(table.len(), 7);
    assert!((table.load_factor() - 1.0).abs() < f64::EPSILON);
    assert!(table.insert(100).is_rejected());
    table.assert_valid().unwrap();
}

#[test]
fn hash_config_matrix() {
    let config = HashTableConfig::from_json(r#"{"strategy": "quadratic"}"#).unwrap();
    let table = HashTable::with_config(&config).unwrap();
    assert_eq!(table.capacity(), 11);
    assert_eq!(table.strategy(), ProbeStrategy::Quadratic);
    assert!(HashTable::with_capacity(0, ProbeStrategy::Linear).is_err());
}

proptest! {
    #[test]
    fn hash_membership_matches_model(
        strategy in prop_oneof![
            Just(ProbeStrategy::Linear),
            Just(ProbeStrategy::Quadratic),
            Just(ProbeStrategy::DoubleHashing),
        ],
        ops in proptest::collection::vec((any::<bool>(), -40i64..40), 0..120),
    ) {
        let mut table = HashTable::with_capacity(13, strategy).unwrap();
        let mut model = BTreeSet::new();
        for (insert, key) in ops {
            if insert {
                let log = table.insert(key);
                if !log.is_rejected() {
                    model.insert(key);
                }
            } else {
                let log = table.delete(key);
                prop_assert_eq!(log.is_rejected(), !model.remove(&key));
            }
            prop_assert_eq!(table.assert_valid(), Ok(()));
            prop_assert_eq!(table.len(), model.len());
        }
        for key in -40..40 {
            prop_assert_eq!(table.contains(key), model.contains(&key));
        }
    }
}
