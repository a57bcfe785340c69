use log::debug;

use super::code_assigner::{CodeTable, Codeword};
use super::error::BuildError;
use super::node::ForestNode;
use super::tree_builder::{build_tree, MergeStrategy};
use crate::tools::freq_count::FrequencyTable;

/// A finished huffman code: the tree and the codewords read off of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanCode {
    root: ForestNode,
    table: CodeTable,
}

/// Build the huffman code for the symbol counts, using the default linear scan merge.
pub fn build_code(freqs: &FrequencyTable) -> Result<HuffmanCode, BuildError> {
    build_code_with(freqs, MergeStrategy::default())
}

/// Build the huffman code for the symbol counts with the given merge strategy.
pub fn build_code_with(
    freqs: &FrequencyTable,
    strategy: MergeStrategy,
) -> Result<HuffmanCode, BuildError> {
    let root = build_tree(freqs, strategy)?;
    let table = CodeTable::from_tree(&root);
    debug!(
        "Built code for {} symbols, longest codeword {} bits",
        table.len(),
        table.max_len()
    );
    Ok(HuffmanCode { root, table })
}

impl HuffmanCode {
    pub fn root(&self) -> &ForestNode {
        &self.root
    }

    pub fn table(&self) -> &CodeTable {
        &self.table
    }

    /// Codeword for a symbol, None if the symbol is not in the code.
    pub fn codeword(&self, symbol: u8) -> Option<&Codeword> {
        self.table.get(symbol)
    }

    /// Walk the tree from the root, taking one bit per branch, and return the symbol at the leaf
    /// reached. Only the bits of a single codeword are consumed. Returns None if the bits run
    /// out first. A single leaf tree consumes no bits.
    pub fn decode_symbol<I: Iterator<Item = bool>>(&self, bits: &mut I) -> Option<u8> {
        let mut node = &self.root;
        loop {
            match node {
                ForestNode::Leaf { symbol, .. } => return Some(*symbol),
                ForestNode::Internal { .. } => node = node.child(bits.next()?)?,
            }
        }
    }
}
