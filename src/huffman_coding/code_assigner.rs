//! Turns a finished huffman tree into a table of codewords.
//!
//! The tree is walked depth first, left before right. The path taken to reach each leaf (0 for a
//! left branch, 1 for a right branch) is that leaf's codeword. A tree that is a single leaf gives
//! its symbol the empty codeword.

use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

use log::trace;
use rustc_hash::FxHashMap;

use super::node::ForestNode;
use crate::tools::freq_count::FrequencyTable;

/// The bits from the root down to a leaf. false = left (0), true = right (1).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Codeword {
    bits: Vec<bool>,
}

impl Codeword {
    pub fn new() -> Self {
        Self { bits: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    pub fn bits(&self) -> &[bool] {
        &self.bits
    }

    /// True if this codeword is a (non strict) prefix of other.
    pub fn is_prefix_of(&self, other: &Codeword) -> bool {
        other.bits.starts_with(&self.bits)
    }
}

impl From<Vec<bool>> for Codeword {
    fn from(bits: Vec<bool>) -> Self {
        Self { bits }
    }
}

impl Display for Codeword {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for &bit in &self.bits {
            write!(f, "{}", if bit { '1' } else { '0' })?;
        }
        Ok(())
    }
}

/// Symbol to codeword mapping, ordered by symbol.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeTable {
    codes: BTreeMap<u8, Codeword>,
}

impl CodeTable {
    /// Walk the tree from the root and record the path to every leaf.
    pub fn from_tree(root: &ForestNode) -> Self {
        let mut codes = BTreeMap::new();
        let mut path = Vec::new();
        assign_codes(root, &mut path, &mut codes);
        CodeTable { codes }
    }

    pub fn get(&self, symbol: u8) -> Option<&Codeword> {
        self.codes.get(&symbol)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u8, &Codeword)> + '_ {
        self.codes.iter().map(|(&sym, code)| (sym, code))
    }

    /// Longest codeword length in the table.
    pub fn max_len(&self) -> usize {
        self.codes.values().map(|c| c.len()).max().unwrap_or(0)
    }

    /// Total encoded length in bits: the sum of count * codeword length over the symbols in freqs.
    /// Saturates at u64::MAX.
    pub fn weighted_length(&self, freqs: &FrequencyTable) -> u64 {
        freqs
            .iter()
            .filter_map(|(sym, count)| self.get(sym).map(|c| count.saturating_mul(c.len() as u64)))
            .fold(0, u64::saturating_add)
    }

    /// Codeword to symbol lookup.
    pub fn inverse(&self) -> FxHashMap<Codeword, u8> {
        self.codes
            .iter()
            .map(|(&sym, code)| (code.clone(), sym))
            .collect()
    }
}

/// Depth first walk. path holds the bits from the root to node, and is restored before returning.
fn assign_codes(node: &ForestNode, path: &mut Vec<bool>, codes: &mut BTreeMap<u8, Codeword>) {
    match node {
        ForestNode::Internal { left, right, .. } => {
            path.push(false);
            assign_codes(left, path, codes);
            path.pop();
            path.push(true);
            assign_codes(right, path, codes);
            path.pop();
        }
        ForestNode::Leaf { symbol, .. } => {
            let code = Codeword::from(path.clone());
            trace!("{:#04x} -> {}", symbol, code);
            codes.insert(*symbol, code);
        }
    }
}
