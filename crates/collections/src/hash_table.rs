//! Fixed-capacity open-addressing hash table with lazy deletion.
//!
//! The primary hash is the identity, `h(k) = k mod m`. Collisions are
//! resolved by one of three probe sequences; deleted slots become
//! tombstones that later inserts may reuse but searches must probe through.

use std::fmt;

use algolab_core::{Key, StepLog};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

pub const DEFAULT_CAPACITY: usize = 11;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProbeStrategy {
    /// `(h + i) mod m`
    #[default]
    Linear,
    /// `(h + i²) mod m`
    Quadratic,
    /// `(h + i·h2) mod m` with `h2(k) = 7 - (k mod 7)`
    DoubleHashing,
}

impl fmt::Display for ProbeStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ProbeStrategy::Linear => "Linear probing",
            ProbeStrategy::Quadratic => "Quadratic probing",
            ProbeStrategy::DoubleHashing => "Double hashing",
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("hash table capacity must be at least 1")]
    ZeroCapacity,
    #[error("invalid configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct HashTableConfig {
    pub capacity: usize,
    pub strategy: ProbeStrategy,
}

impl Default for HashTableConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            strategy: ProbeStrategy::default(),
        }
    }
}

impl HashTableConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum HashRejection {
    #[error("{0} is already in the table")]
    Duplicate(Key),
    #[error("Table is full, {key} could not be placed in any of the {capacity} slots")]
    TableFull { key: Key, capacity: usize },
    #[error("{0} was not found in the table")]
    NotFound(Key),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub enum Slot {
    /// Never used. Searches stop here.
    #[default]
    Empty,
    Occupied(Key),
    /// Deleted; keeps the old key for display but counts as free.
    Tombstone(Key),
}

impl Slot {
    pub fn key(&self) -> Option<Key> {
        match *self {
            Slot::Occupied(k) => Some(k),
            _ => None,
        }
    }

    pub fn is_tombstone(&self) -> bool {
        matches!(self, Slot::Tombstone(_))
    }
}

#[derive(Clone, Debug)]
pub struct HashTable {
    slots: Vec<Slot>,
    strategy: ProbeStrategy,
    len: usize,
}

impl Default for HashTable {
    fn default() -> Self {
        Self::new(ProbeStrategy::default())
    }
}

impl HashTable {
    /// Table with the default capacity of 11.
    pub fn new(strategy: ProbeStrategy) -> Self {
        Self {
            slots: vec![Slot::Empty; DEFAULT_CAPACITY],
            strategy,
            len: 0,
        }
    }

    pub fn with_config(config: &HashTableConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            slots: vec![Slot::Empty; config.capacity],
            strategy: config.strategy,
            len: 0,
        })
    }

    pub fn with_capacity(capacity: usize, strategy: ProbeStrategy) -> Result<Self, ConfigError> {
        Self::with_config(&HashTableConfig { capacity, strategy })
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn strategy(&self) -> ProbeStrategy {
        self.strategy
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn load_factor(&self) -> f64 {
        self.len as f64 / self.capacity() as f64
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// Tombstone flag per slot.
    pub fn tombstones(&self) -> Vec<bool> {
        self.slots.iter().map(Slot::is_tombstone).collect()
    }

    pub fn clear(&mut self) {
        self.slots.fill(Slot::Empty);
        self.len = 0;
    }

    fn home(&self, key: Key) -> usize {
        key.rem_euclid(self.capacity() as i64) as usize
    }

    fn step(key: Key) -> i64 {
        7 - key.rem_euclid(7)
    }

    /// Index examined on attempt `i`; attempt `0` is the home slot.
    fn probe(&self, key: Key, i: usize) -> usize {
        let m = self.capacity() as i128;
        let h = self.home(key) as i128;
        let i = i as i128;
        let offset = match self.strategy {
            ProbeStrategy::Linear => i,
            ProbeStrategy::Quadratic => i * i,
            ProbeStrategy::DoubleHashing => i * Self::step(key) as i128,
        };
        (h + offset).rem_euclid(m) as usize
    }

    /// The full, deterministic order in which slots are examined for `key`.
    pub fn probe_sequence(&self, key: Key) -> Vec<usize> {
        (0..self.capacity()).map(|i| self.probe(key, i)).collect()
    }

    fn narrate_probe(&self, key: Key, i: usize, log: &mut StepLog) {
        let m = self.capacity();
        let h = self.home(key);
        let idx = self.probe(key, i);
        match self.strategy {
            ProbeStrategy::Linear => {
                log.push(format!("{}: ({h} + {i}) mod {m} = {idx}", self.strategy));
            }
            ProbeStrategy::Quadratic => log.push(format!(
                "{}: ({h} + {i}²) mod {m} = ({h} + {}) mod {m} = {idx}",
                self.strategy,
                i * i
            )),
            ProbeStrategy::DoubleHashing => {
                let h2 = Self::step(key);
                log.push(format!(
                    "{}: ({h} + {i} × {h2}) mod {m} = ({h} + {}) mod {m} = {idx}",
                    self.strategy,
                    i as i64 * h2
                ));
            }
        }
    }

    fn narrate_hash(&self, key: Key, log: &mut StepLog) {
        let m = self.capacity();
        log.push(format!("h({key}) = {key} mod {m} = {}", self.home(key)));
        if self.strategy == ProbeStrategy::DoubleHashing {
            log.push(format!(
                "h2({key}) = 7 - ({key} mod 7) = {}",
                Self::step(key)
            ));
        }
    }

    /// Slot holding `key`, skipping tombstones and stopping at the first
    /// never-used slot.
    fn locate(&self, key: Key) -> Option<usize> {
        for i in 0..self.capacity() {
            let idx = self.probe(key, i);
            match self.slots[idx] {
                Slot::Empty => return None,
                Slot::Occupied(k) if k == key => return Some(idx),
                _ => {}
            }
        }
        None
    }

    pub fn contains(&self, key: Key) -> bool {
        self.locate(key).is_some()
    }

    pub fn insert(&mut self, key: Key) -> StepLog {
        let mut log = StepLog::new();
        log.push(format!("Inserting {key}"));
        self.narrate_hash(key, &mut log);
        if let Some(idx) = self.locate(key) {
            log.push(format!("{key} already sits at index {idx}"));
            log.reject(HashRejection::Duplicate(key));
            debug!(key, "hash insert rejected");
            return log;
        }

        for i in 0..self.capacity() {
            if i > 0 {
                self.narrate_probe(key, i, &mut log);
            }
            let idx = self.probe(key, i);
            match self.slots[idx] {
                Slot::Occupied(other) => {
                    log.push(format!("Collision: index {idx} is occupied by {other}"));
                }
                Slot::Tombstone(old) => {
                    self.slots[idx] = Slot::Occupied(key);
                    self.len += 1;
                    log.push(format!(
                        "Index {idx} holds a tombstone (deleted {old}), reusing it: {key} stored at index {idx}"
                    ));
                    debug!(key, idx, attempts = i + 1, "hash insert");
                    return log;
                }
                Slot::Empty => {
                    self.slots[idx] = Slot::Occupied(key);
                    self.len += 1;
                    log.push(format!("Index {idx} is free: {key} stored at index {idx}"));
                    debug!(key, idx, attempts = i + 1, "hash insert");
                    return log;
                }
            }
        }

        let capacity = self.capacity();
        warn!(key, capacity, strategy = ?self.strategy, "hash table probe sequence exhausted");
        log.reject(HashRejection::TableFull { key, capacity });
        log
    }

    /// Follows the same probe sequence as insert and turns the matching slot
    /// into a tombstone.
    pub fn delete(&mut self, key: Key) -> StepLog {
        let mut log = StepLog::new();
        log.push(format!("Deleting {key}"));
        self.narrate_hash(key, &mut log);
        for i in 0..self.capacity() {
            if i > 0 {
                self.narrate_probe(key, i, &mut log);
            }
            let idx = self.probe(key, i);
            match self.slots[idx] {
                Slot::Empty => {
                    log.push(format!("Index {idx} was never used, the search stops"));
                    break;
                }
                Slot::Occupied(k) if k == key => {
                    self.slots[idx] = Slot::Tombstone(key);
                    self.len -= 1;
                    log.push(format!("{key} removed from index {idx}, slot marked as a tombstone"));
                    debug!(key, idx, "hash delete");
                    return log;
                }
                Slot::Occupied(other) => {
                    log.push(format!("Index {idx} holds {other}, continuing"));
                }
                Slot::Tombstone(_) => {
                    log.push(format!("Index {idx} is a tombstone, continuing"));
                }
            }
        }
        log.reject(HashRejection::NotFound(key));
        debug!(key, "hash delete rejected");
        log
    }

    /// Every live key is reachable from its home slot without crossing a
    /// never-used slot, and appears exactly once.
    pub fn assert_valid(&self) -> Result<(), String> {
        let mut live = 0;
        for (idx, slot) in self.slots.iter().enumerate() {
            let Slot::Occupied(key) = *slot else {
                continue;
            };
            live += 1;
            if self.locate(key) != Some(idx) {
                return Err(format!("{key} at index {idx} is not reachable by its probe sequence"));
            }
            if self.slots.iter().filter(|s| s.key() == Some(key)).count() > 1 {
                return Err(format!("{key} occupies more than one slot"));
            }
        }
        if live != self.len {
            return Err(format!("{live} occupied slots but len is {}", self.len));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tombstone_is_probed_through() {
        let mut table = HashTable::new(ProbeStrategy::Linear);
        table.insert(5);
        let log = table.insert(16);
        assert!(log.contains_text("Collision: index 5 is occupied by 5"));
        assert_eq!(table.slots()[6], Slot::Occupied(16));

        table.delete(5);
        assert_eq!(table.slots()[5], Slot::Tombstone(5));
        assert!(table.contains(16));
        assert!(!table.contains(5));

        let log = table.insert(27);
        assert!(log.contains_text("tombstone"));
        assert_eq!(table.slots()[5], Slot::Occupied(27));
        assert!(table.contains(16));
        assert_eq!(table.len(), 2);
        table.assert_valid().unwrap();
    }

    #[test]
    fn quadratic_offsets() {
        let table = HashTable::with_capacity(7, ProbeStrategy::Quadratic).unwrap();
        assert_eq!(table.probe_sequence(3)[..4], [3, 4, 0, 5]);
    }

    #[test]
    fn double_hashing_offsets() {
        let table = HashTable::new(ProbeStrategy::DoubleHashing);
        // h(14) = 3, h2(14) = 7
        assert_eq!(table.probe_sequence(14)[..3], [3, 10, 6]);
    }

    #[test]
    fn negative_keys_wrap() {
        let mut table = HashTable::new(ProbeStrategy::Linear);
        table.insert(-1);
        assert_eq!(table.slots()[10], Slot::Occupied(-1));
        assert!(table.contains(-1));
    }

    #[test]
    fn full_table_rejects_without_writing() {
        let mut table = HashTable::with_capacity(3, ProbeStrategy::Linear).unwrap();
        for k in [0, 1, 2] {
            table.insert(k);
        }
        let before = table.slots().to_vec();
        let log = table.insert(3);
        assert_eq!(
            log.rejection(),
            Some("Table is full, 3 could not be placed in any of the 3 slots")
        );
        assert_eq!(table.slots(), before.as_slice());
    }

    #[test]
    fn duplicate_is_rejected() {
        let mut table = HashTable::default();
        table.insert(4);
        assert!(table.insert(4).is_rejected());
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn delete_missing_stops_at_empty() {
        let mut table = HashTable::default();
        table.insert(1);
        let log = table.delete(12);
        assert!(log.contains_text("never used"));
        assert!(log.is_rejected());
    }

    #[test]
    fn config_from_json() {
        let config = HashTableConfig::from_json(r#"{"capacity": 13, "strategy": "double_hashing"}"#).unwrap();
        assert_eq!(config.capacity, 13);
        assert_eq!(config.strategy, ProbeStrategy::DoubleHashing);
        assert_eq!(HashTableConfig::from_json("{}").unwrap(), HashTableConfig::default());
        assert!(matches!(
            HashTableConfig::from_json(r#"{"capacity": 0}"#),
            Err(ConfigError::ZeroCapacity)
        ));
        assert!(matches!(
            HashTableConfig::from_json("{"),
            Err(ConfigError::Parse(_))
        ));
    }
}
