//! Huffman coding: frequency count, priority-queue tree construction, code
//! table generation, encoding and decoding.
//!
//! Nodes with equal frequency leave the queue in the order they entered it:
//! leaves in first-occurrence order, merged nodes after everything already
//! queued. Any other tie-break would be equally valid.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use algolab_core::StepLog;
use indexmap::IndexMap;
use serde::Serialize;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum HuffmanRejection {
    #[error("Text is empty, no tree can be built")]
    EmptyText,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum HuffmanError {
    #[error("'{0}' has no code in the current table")]
    UnknownSymbol(char),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HuffmanNode {
    Leaf {
        symbol: char,
        frequency: usize,
    },
    Internal {
        frequency: usize,
        left: Box<HuffmanNode>,
        right: Box<HuffmanNode>,
    },
}

impl HuffmanNode {
    pub fn frequency(&self) -> usize {
        match self {
            HuffmanNode::Leaf { frequency, .. } | HuffmanNode::Internal { frequency, .. } => {
                *frequency
            }
        }
    }

    pub fn symbol(&self) -> Option<char> {
        match self {
            HuffmanNode::Leaf { symbol, .. } => Some(*symbol),
            HuffmanNode::Internal { .. } => None,
        }
    }

    pub fn left(&self) -> Option<&HuffmanNode> {
        match self {
            HuffmanNode::Internal { left, .. } => Some(left),
            HuffmanNode::Leaf { .. } => None,
        }
    }

    pub fn right(&self) -> Option<&HuffmanNode> {
        match self {
            HuffmanNode::Internal { right, .. } => Some(right),
            HuffmanNode::Leaf { .. } => None,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, HuffmanNode::Leaf { .. })
    }

    fn label(&self) -> String {
        match self {
            HuffmanNode::Leaf { symbol, frequency } => format!("'{symbol}' ({frequency})"),
            HuffmanNode::Internal { frequency, .. } => format!("internal ({frequency})"),
        }
    }
}

/// Min-queue entry ordered by `(frequency, seq)`.
struct Queued {
    seq: u64,
    node: HuffmanNode,
}

impl Queued {
    fn rank(&self) -> (usize, u64) {
        (self.node.frequency(), self.seq)
    }
}

impl PartialEq for Queued {
    fn eq(&self, other: &Self) -> bool {
        self.rank() == other.rank()
    }
}

impl Eq for Queued {}

impl PartialOrd for Queued {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Queued {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed so the std max-heap pops the smallest rank first.
        other.rank().cmp(&self.rank())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct CompressionStats {
    /// 8 bits per character.
    pub original_bits: usize,
    pub huffman_bits: usize,
    pub bits_saved: i64,
    /// Percentage of the original size saved.
    pub ratio: f64,
}

#[derive(Clone, Debug, Default)]
pub struct Huffman {
    root: Option<HuffmanNode>,
    codes: IndexMap<char, String>,
    frequencies: IndexMap<char, usize>,
    stats: Option<CompressionStats>,
}

impl Huffman {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn root(&self) -> Option<&HuffmanNode> {
        self.root.as_ref()
    }

    /// Code table in the order leaves are met by a pre-order walk.
    pub fn codes(&self) -> &IndexMap<char, String> {
        &self.codes
    }

    /// Character counts in first-occurrence order.
    pub fn frequencies(&self) -> &IndexMap<char, usize> {
        &self.frequencies
    }

    pub fn stats(&self) -> Option<CompressionStats> {
        self.stats
    }

    /// Discards any previous tree and builds a new one for `text`.
    pub fn build_tree(&mut self, text: &str) -> StepLog {
        *self = Self::default();
        let mut log = StepLog::new();
        if text.is_empty() {
            log.reject(HuffmanRejection::EmptyText);
            debug!("huffman build rejected");
            return log;
        }
        log.push(format!("Building a Huffman tree for \"{text}\""));

        log.push("Step 1: counting character frequencies".to_string());
        for c in text.chars() {
            *self.frequencies.entry(c).or_insert(0) += 1;
        }
        for (c, f) in &self.frequencies {
            log.push(format!("'{c}' occurs {f} time(s)"));
        }

        log.push("Step 2: seeding the min-priority queue".to_string());
        let mut queue = BinaryHeap::new();
        let mut seq = 0u64;
        for (&symbol, &frequency) in &self.frequencies {
            queue.push(Queued {
                seq,
                node: HuffmanNode::Leaf { symbol, frequency },
            });
            seq += 1;
            log.push(format!("Queued leaf '{symbol}' (frequency {frequency})"));
        }
        log.push(format!("Queue size: {}", queue.len()));

        log.push("Step 3: merging the two smallest nodes until one remains".to_string());
        let mut round = 1;
        let root = loop {
            let Some(first) = queue.pop() else {
                return log;
            };
            let Some(second) = queue.pop() else {
                break first.node;
            };
            let (left, right) = (first.node, second.node);
            let frequency = left.frequency() + right.frequency();
            log.push(format!(
                "Round {round}: popped {} and {}, merged into internal ({frequency})",
                left.label(),
                right.label()
            ));
            queue.push(Queued {
                seq,
                node: HuffmanNode::Internal {
                    frequency,
                    left: Box::new(left),
                    right: Box::new(right),
                },
            });
            seq += 1;
            round += 1;
        };
        log.push(format!("Huffman tree complete, root frequency {}", root.frequency()));

        log.push("Step 4: generating codes (left = 0, right = 1)".to_string());
        if let HuffmanNode::Leaf { symbol, .. } = root {
            self.codes.insert(symbol, "0".to_string());
            log.push(format!("'{symbol}': 0 (single symbol, degenerate code)"));
        } else {
            collect_codes(&root, &mut String::new(), &mut self.codes);
            for (c, code) in &self.codes {
                log.push(format!("'{c}': {code} ({} bit)", code.len()));
            }
        }
        self.root = Some(root);

        log.push("Step 5: compression analysis".to_string());
        let original_bits = text.chars().count() * 8;
        let huffman_bits: usize = self
            .frequencies
            .iter()
            .map(|(c, f)| f * self.codes.get(c).map_or(0, String::len))
            .sum();
        let bits_saved = original_bits as i64 - huffman_bits as i64;
        let ratio = bits_saved as f64 * 100.0 / original_bits as f64;
        log.push(format!(
            "Original size: {original_bits} bits ({} characters × 8)",
            original_bits / 8
        ));
        log.push(format!("Huffman size: {huffman_bits} bits"));
        log.push(format!("Saved: {bits_saved} bits"));
        log.push(format!("Compression ratio: {ratio:.2}%"));
        self.stats = Some(CompressionStats {
            original_bits,
            huffman_bits,
            bits_saved,
            ratio,
        });

        debug!(symbols = self.codes.len(), huffman_bits, "huffman build");
        log
    }

    /// Concatenated codes of `text`. Characters without a code contribute
    /// nothing.
    pub fn encode(&self, text: &str) -> String {
        text.chars()
            .filter_map(|c| self.codes.get(&c))
            .map(String::as_str)
            .collect()
    }

    /// Like [`Huffman::encode`] but fails on the first character without a
    /// code.
    pub fn encode_checked(&self, text: &str) -> Result<String, HuffmanError> {
        text.chars().try_fold(String::new(), |mut out, c| {
            let code = self.codes.get(&c).ok_or(HuffmanError::UnknownSymbol(c))?;
            out.push_str(code);
            Ok(out)
        })
    }

    /// Walks the tree bit by bit from the root, emitting a symbol at each
    /// leaf. Stops at the first character that is not a bit or that walks
    /// off the tree.
    pub fn decode(&self, bits: &str) -> String {
        let mut out = String::new();
        let Some(root) = &self.root else {
            return out;
        };
        if let HuffmanNode::Leaf { symbol, .. } = root {
            out.extend(bits.chars().take_while(|&b| b == '0').map(|_| *symbol));
            return out;
        }
        let mut curr = root;
        for bit in bits.chars() {
            let next = match bit {
                '0' => curr.left(),
                '1' => curr.right(),
                _ => None,
            };
            let Some(next) = next else {
                break;
            };
            if let HuffmanNode::Leaf { symbol, .. } = next {
                out.push(*symbol);
                curr = root;
            } else {
                curr = next;
            }
        }
        out
    }
}

fn collect_codes(node: &HuffmanNode, prefix: &mut String, codes: &mut IndexMap<char, String>) {
    match node {
        HuffmanNode::Leaf { symbol, .. } => {
            codes.insert(*symbol, prefix.clone());
        }
        HuffmanNode::Internal { left, right, .. } => {
            prefix.push('0');
            collect_codes(left, prefix, codes);
            prefix.pop();
            prefix.push('1');
            collect_codes(right, prefix, codes);
            prefix.pop();
        }
    }
}
