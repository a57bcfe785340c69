//! Builds the huffman tree from symbol counts.
//!
//! Every present symbol becomes a leaf, in ascending symbol order. The two lowest frequency nodes
//! are then repeatedly pulled out of the working collection and joined under a new parent, which
//! goes on the end of the collection. When a single node remains, it is the root.
//!
//! Ties are settled by position: among equal frequencies, the node that sits earliest in the
//! collection is taken first. Removing a node keeps the order of the others, and new parents are
//! always appended, so the position of a node is the same as the order in which it was created.
//! The heap strategy relies on this by keying each candidate on (frequency, creation number).

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use log::{debug, trace};

use super::error::BuildError;
use super::node::ForestNode;
use crate::tools::freq_count::FrequencyTable;

/// How the two lowest frequency nodes are found on each merge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MergeStrategy {
    /// Scan the whole collection each time. O(n^2), which is fine for 256 symbols.
    #[default]
    LinearScan,
    /// Binary min-heap keyed on (frequency, creation order). Same trees, O(n log n).
    Heap,
}

/// Build a huffman tree from the symbol counts. Fails when no symbol has a nonzero count, or
/// when the counts do not fit in a u64 total.
pub fn build_tree(freqs: &FrequencyTable, strategy: MergeStrategy) -> Result<ForestNode, BuildError> {
    // The root holds the sum of every count, so no merge can overflow once the total fits.
    if freqs.checked_total().is_none() {
        return Err(BuildError::FrequencyOverflow);
    }
    let leaves = freqs
        .iter()
        .map(|(sym, count)| ForestNode::leaf(sym, count))
        .collect::<Vec<ForestNode>>();

    if leaves.is_empty() {
        return Err(BuildError::EmptyAlphabet);
    }
    debug!("Building tree from {} leaves using {:?}", leaves.len(), strategy);

    let root = match strategy {
        MergeStrategy::LinearScan => build_by_scan(leaves),
        MergeStrategy::Heap => build_by_heap(leaves),
    };
    // Both builders only come back empty handed if they were given nothing
    root.ok_or(BuildError::EmptyAlphabet)
}

/// Merge by scanning the working collection for the minimum each time.
fn build_by_scan(mut nodes: Vec<ForestNode>) -> Option<ForestNode> {
    while nodes.len() >= 2 {
        let left = pop_min(&mut nodes)?;
        let right = pop_min(&mut nodes)?;
        trace!(
            "merge {} + {} ({} left)",
            left.frequency(),
            right.frequency(),
            nodes.len()
        );
        nodes.push(ForestNode::merge(left, right));
    }
    nodes.pop()
}

/// Remove and return the node with the smallest frequency. The first one found wins a tie, and
/// the rest of the nodes keep their order.
fn pop_min(nodes: &mut Vec<ForestNode>) -> Option<ForestNode> {
    let mut min = nodes.first()?.frequency();
    let mut argmin = 0;
    for (i, node) in nodes.iter().enumerate().skip(1) {
        if node.frequency() < min {
            min = node.frequency();
            argmin = i;
        }
    }
    Some(nodes.remove(argmin))
}

/// A node waiting in the heap, tagged with the order it was created in.
#[derive(Debug)]
struct Candidate {
    frequency: u64,
    seq: usize,
    node: ForestNode,
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.frequency == other.frequency && self.seq == other.seq
    }
}

impl Eq for Candidate {}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Candidate {
    /// Reversed so the BinaryHeap (a max-heap) hands back the lowest frequency, then the oldest node.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .frequency
            .cmp(&self.frequency)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Merge using a priority queue. Produces the same tree as build_by_scan.
fn build_by_heap(leaves: Vec<ForestNode>) -> Option<ForestNode> {
    let mut seq = leaves.len();
    let mut heap = leaves
        .into_iter()
        .enumerate()
        .map(|(i, node)| Candidate {
            frequency: node.frequency(),
            seq: i,
            node,
        })
        .collect::<BinaryHeap<Candidate>>();

    while heap.len() >= 2 {
        let left = heap.pop()?.node;
        let right = heap.pop()?.node;
        let node = ForestNode::merge(left, right);
        trace!("merge -> {} (seq {})", node.frequency(), seq);
        heap.push(Candidate {
            frequency: node.frequency(),
            seq,
            node,
        });
        seq += 1;
    }
    heap.pop().map(|c| c.node)
}
