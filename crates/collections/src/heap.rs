//! Binary max-heap over a dense array, with a tree-shaped projection for
//! renderers.

use algolab_core::{Key, StepLog};
use tracing::{debug, trace};

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum HeapRejection {
    #[error("Heap is empty, nothing to remove")]
    Empty,
    #[error("{0} was not found in the heap")]
    NotFound(Key),
}

#[inline]
fn parent(i: usize) -> usize {
    (i - 1) / 2
}

#[inline]
fn left(i: usize) -> usize {
    2 * i + 1
}

#[inline]
fn right(i: usize) -> usize {
    2 * i + 2
}

/// One node of the derived tree view. Links are positions in
/// [`HeapTree::nodes`], which coincide with array indices.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeapViewNode {
    pub key: Key,
    pub index: usize,
    pub parent: Option<usize>,
    pub left: Option<usize>,
    pub right: Option<usize>,
}

impl HeapViewNode {
    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}

/// Parent/child-linked mirror of the heap array. Never mutated in place;
/// the heap rebuilds it wholesale after every change.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HeapTree {
    nodes: Vec<HeapViewNode>,
}

impl HeapTree {
    pub fn from_array(values: &[Key]) -> Self {
        let len = values.len();
        let link = |i: usize| (i < len).then_some(i);
        let nodes = values
            .iter()
            .enumerate()
            .map(|(i, &key)| HeapViewNode {
                key,
                index: i,
                parent: (i > 0).then(|| parent(i)),
                left: link(left(i)),
                right: link(right(i)),
            })
            .collect();
        Self { nodes }
    }

    pub fn root(&self) -> Option<&HeapViewNode> {
        self.nodes.first()
    }

    pub fn get(&self, index: usize) -> Option<&HeapViewNode> {
        self.nodes.get(index)
    }

    pub fn nodes(&self) -> &[HeapViewNode] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Max-heap where `values[i] >= values[2i + 1]` and `values[i] >= values[2i + 2]`.
/// Duplicate values are allowed.
#[derive(Clone, Debug, Default)]
pub struct MaxHeap {
    values: Vec<Key>,
    view: HeapTree,
}

impl MaxHeap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn peek(&self) -> Option<Key> {
        self.values.first().copied()
    }

    /// The authoritative array.
    pub fn elements(&self) -> &[Key] {
        &self.values
    }

    /// Levels in the complete tree: `floor(log2(n)) + 1`, or `0` when empty.
    pub fn height(&self) -> usize {
        (usize::BITS - self.values.len().leading_zeros()) as usize
    }

    pub fn tree(&self) -> &HeapTree {
        &self.view
    }

    pub fn clear(&mut self) {
        self.values.clear();
        self.rebuild_view();
    }

    pub fn assert_valid(&self) -> Result<(), String> {
        for i in 1..self.values.len() {
            let p = parent(i);
            if self.values[p] < self.values[i] {
                return Err(format!(
                    "values[{p}]={} < values[{i}]={}",
                    self.values[p], self.values[i]
                ));
            }
        }
        if self.view != HeapTree::from_array(&self.values) {
            return Err("tree view is stale".to_string());
        }
        Ok(())
    }

    fn rebuild_view(&mut self) {
        self.view = HeapTree::from_array(&self.values);
        trace!(len = self.values.len(), "heap view rebuilt");
    }

    pub fn insert(&mut self, key: Key) -> StepLog {
        let mut log = StepLog::new();
        log.push(format!("Inserting {key} into the heap"));
        self.values.push(key);
        let i = self.values.len() - 1;
        log.push(format!("{key} appended at the end (index {i})"));
        self.sift_up(i, &mut log);
        self.rebuild_view();
        debug!(key, steps = log.len(), "heap insert");
        log
    }

    /// Removes the root. Returns the removed value alongside the narration.
    pub fn extract_max(&mut self) -> (Option<Key>, StepLog) {
        let mut log = StepLog::new();
        let Some(&max) = self.values.first() else {
            log.reject(HeapRejection::Empty);
            debug!("heap extract rejected");
            return (None, log);
        };
        log.push(format!("Maximum value is the root: {max}"));
        let last = self.values.len() - 1;
        self.values.swap(0, last);
        self.values.pop();
        if self.values.is_empty() {
            log.push("The heap held a single element and is now empty".to_string());
        } else {
            log.push(format!("Last element {} moved to the root", self.values[0]));
            self.sift_down(0, &mut log);
        }
        self.rebuild_view();
        debug!(max, steps = log.len(), "heap extract max");
        (Some(max), log)
    }

    /// Removes the first occurrence of `key`, found by linear scan.
    pub fn delete(&mut self, key: Key) -> StepLog {
        let mut log = StepLog::new();
        if self.values.is_empty() {
            log.reject(HeapRejection::Empty);
            debug!(key, "heap delete rejected");
            return log;
        }
        log.push(format!("Deleting {key} from the heap"));
        let Some(i) = self.values.iter().position(|&v| v == key) else {
            log.reject(HeapRejection::NotFound(key));
            debug!(key, "heap delete rejected");
            return log;
        };
        log.push(format!("Found {key} at index {i}"));
        let last = self.values.len() - 1;
        if i == last {
            self.values.pop();
            log.push("It was the last element, removed directly".to_string());
        } else {
            self.values.swap(i, last);
            self.values.pop();
            let moved = self.values[i];
            log.push(format!("Replaced by the last element {moved}"));
            if i > 0 && self.values[parent(i)] < moved {
                log.push(format!("{moved} is larger than its new parent, sifting up from index {i}"));
                self.sift_up(i, &mut log);
            } else {
                log.push(format!("Sifting down from index {i}"));
                self.sift_down(i, &mut log);
            }
        }
        self.rebuild_view();
        debug!(key, steps = log.len(), "heap delete");
        log
    }

    fn sift_up(&mut self, mut i: usize, log: &mut StepLog) {
        if i == 0 {
            log.push("Inserted at the root, nothing to sift".to_string());
            return;
        }
        while i > 0 {
            let p = parent(i);
            let (pv, cv) = (self.values[p], self.values[i]);
            if pv >= cv {
                log.push(format!(
                    "Heap property holds: parent[{p}]={pv} >= current[{i}]={cv}"
                ));
                return;
            }
            log.push(format!("Violation: parent[{p}]={pv} < current[{i}]={cv}, swapping"));
            self.values.swap(p, i);
            log.push(format!(
                "Swapped: parent[{p}]={}, current[{i}]={}",
                self.values[p], self.values[i]
            ));
            i = p;
        }
        log.push("Reached the root, sift up complete".to_string());
    }

    fn sift_down(&mut self, mut i: usize, log: &mut StepLog) {
        let len = self.values.len();
        loop {
            let mut largest = i;
            log.push(format!("Checking current[{i}]={}", self.values[i]));
            for (side, c) in [("Left", left(i)), ("Right", right(i))] {
                if c >= len {
                    continue;
                }
                if self.values[c] > self.values[largest] {
                    log.push(format!(
                        "{side} child[{c}]={} > largest so far {}, marked as largest",
                        self.values[c], self.values[largest]
                    ));
                    largest = c;
                } else {
                    log.push(format!(
                        "{side} child[{c}]={} <= largest so far {}",
                        self.values[c], self.values[largest]
                    ));
                }
            }
            if largest == i {
                log.push("Heap property holds: current >= both children, sift down complete".to_string());
                return;
            }
            log.push(format!(
                "Violation: child[{largest}]={} > parent[{i}]={}, swapping",
                self.values[largest], self.values[i]
            ));
            self.values.swap(i, largest);
            i = largest;
        }
    }
}
