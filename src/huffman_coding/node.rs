/// A node in the huffman tree. Leaves carry a symbol, internal nodes own exactly two children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ForestNode {
    Leaf {
        symbol: u8,
        frequency: u64,
    },
    Internal {
        frequency: u64,
        left: Box<ForestNode>,
        right: Box<ForestNode>,
    },
}

impl ForestNode {
    /// Create a new leaf
    pub fn leaf(symbol: u8, frequency: u64) -> Self {
        ForestNode::Leaf { symbol, frequency }
    }

    /// Join two nodes under a new parent. The first node becomes the left (0) child.
    ///
    /// The two frequencies must not add past u64::MAX. build_tree() checks the table total
    /// before merging, which bounds every internal node.
    pub fn merge(left: ForestNode, right: ForestNode) -> Self {
        ForestNode::Internal {
            frequency: left.frequency() + right.frequency(),
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Occurrence count of a leaf, or the summed count of everything below an internal node.
    pub fn frequency(&self) -> u64 {
        match self {
            ForestNode::Leaf { frequency, .. } => *frequency,
            ForestNode::Internal { frequency, .. } => *frequency,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, ForestNode::Leaf { .. })
    }

    /// Symbol held by a leaf, None for internal nodes.
    pub fn symbol(&self) -> Option<u8> {
        match self {
            ForestNode::Leaf { symbol, .. } => Some(*symbol),
            ForestNode::Internal { .. } => None,
        }
    }

    /// Step one level down the tree. false = left, true = right. Leaves have no children.
    pub fn child(&self, bit: bool) -> Option<&ForestNode> {
        match self {
            ForestNode::Leaf { .. } => None,
            ForestNode::Internal { left, right, .. } => Some(if bit { &**right } else { &**left }),
        }
    }

    /// Count of leaves below (and including) this node.
    pub fn leaf_count(&self) -> usize {
        match self {
            ForestNode::Leaf { .. } => 1,
            ForestNode::Internal { left, right, .. } => left.leaf_count() + right.leaf_count(),
        }
    }

    /// Length of the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        match self {
            ForestNode::Leaf { .. } => 0,
            ForestNode::Internal { left, right, .. } => 1 + left.depth().max(right.depth()),
        }
    }
}
