use super::frequency::FrequencyTable;
use crate::heap::PriorityQueue;
use core::cmp::Ordering;
use core::fmt;

/// A node of a Huffman tree.
///
/// Internal nodes own their children. The children are optional only because the
/// decoder builds nodes before it has read their subtrees, a finished tree always
/// has both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HuffmanNode {
    Leaf {
        symbol: u8,
        /// How often the symbol occurs in the input
        weight: u64,
    },
    Internal {
        weight: u64,
        left: Option<Box<HuffmanNode>>,
        right: Option<Box<HuffmanNode>>,
    },
}

impl HuffmanNode {
    pub fn leaf(symbol: u8, weight: u64) -> Self {
        HuffmanNode::Leaf { symbol, weight }
    }

    /// Create an internal node. Its weight is the sum of both children's weights, or 0 if
    /// one of them is missing.
    pub fn internal(left: Option<HuffmanNode>, right: Option<HuffmanNode>) -> Self {
        let weight = match (&left, &right) {
            (Some(left), Some(right)) => left.weight() + right.weight(),
            _ => 0,
        };
        HuffmanNode::Internal {
            weight,
            left: left.map(Box::new),
            right: right.map(Box::new),
        }
    }

    /// Combine two subtrees under a new internal node.
    pub fn merge(left: HuffmanNode, right: HuffmanNode) -> Self {
        Self::internal(Some(left), Some(right))
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, HuffmanNode::Leaf { .. })
    }

    pub fn weight(&self) -> u64 {
        match self {
            HuffmanNode::Leaf { weight, .. } | HuffmanNode::Internal { weight, .. } => *weight,
        }
    }

    /// The symbol of a leaf, `None` for internal nodes.
    pub fn symbol(&self) -> Option<u8> {
        match self {
            HuffmanNode::Leaf { symbol, .. } => Some(*symbol),
            HuffmanNode::Internal { .. } => None,
        }
    }

    pub fn left(&self) -> Option<&HuffmanNode> {
        match self {
            HuffmanNode::Internal { left, .. } => left.as_deref(),
            HuffmanNode::Leaf { .. } => None,
        }
    }

    pub fn right(&self) -> Option<&HuffmanNode> {
        match self {
            HuffmanNode::Internal { right, .. } => right.as_deref(),
            HuffmanNode::Leaf { .. } => None,
        }
    }

    /// The child selected by one code bit, `false` is left and `true` is right.
    pub fn child(&self, bit: bool) -> Option<&HuffmanNode> {
        if bit {
            self.right()
        } else {
            self.left()
        }
    }

    /// Store `node` as the left child unless that slot is already taken.
    ///
    /// Returns whether `node` was stored. Leaves have no slots and never store anything.
    pub fn set_left(&mut self, node: HuffmanNode) -> bool {
        match self {
            HuffmanNode::Internal { left: slot @ None, .. } => {
                *slot = Some(Box::new(node));
                true
            }
            _ => false,
        }
    }

    /// Store `node` as the right child unless that slot is already taken.
    pub fn set_right(&mut self, node: HuffmanNode) -> bool {
        match self {
            HuffmanNode::Internal { right: slot @ None, .. } => {
                *slot = Some(Box::new(node));
                true
            }
            _ => false,
        }
    }

    /// Number of leaves in this subtree.
    pub fn leaf_count(&self) -> usize {
        match self {
            HuffmanNode::Leaf { .. } => 1,
            HuffmanNode::Internal { left, right, .. } => {
                left.as_ref().map_or(0, |n| n.leaf_count())
                    + right.as_ref().map_or(0, |n| n.leaf_count())
            }
        }
    }

    /// Length of the longest path from this node down to a leaf.
    pub fn depth(&self) -> usize {
        match self {
            HuffmanNode::Leaf { .. } => 0,
            HuffmanNode::Internal { left, right, .. } => {
                let left = left.as_ref().map_or(0, |n| n.depth());
                let right = right.as_ref().map_or(0, |n| n.depth());
                1 + left.max(right)
            }
        }
    }
}

/// Orders nodes by weight only. Nodes of equal weight compare equal no matter
/// what they contain.
pub fn compare_weight(a: &HuffmanNode, b: &HuffmanNode) -> Ordering {
    a.weight().cmp(&b.weight())
}

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum TreeBuildError {
    #[error("Can't build a huffman tree without any symbols")]
    EmptyAlphabet,
    #[error("Node queue overflowed its capacity of {capacity} nodes")]
    QueueOverflow { capacity: usize },
}

/// A complete Huffman tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree {
    root: HuffmanNode,
}

impl HuffmanTree {
    /// Build the tree for the symbols counted in `frequencies`.
    ///
    /// Every symbol that occurs becomes a leaf in a queue sized to the number of
    /// distinct symbols. The two lightest nodes are merged, first extracted on the
    /// left, until one node is left. With a single distinct symbol that node is
    /// the leaf itself.
    pub fn build(frequencies: &FrequencyTable) -> Result<HuffmanTree, TreeBuildError> {
        let capacity = frequencies.distinct_symbols();
        let mut queue: PriorityQueue<HuffmanNode> =
            PriorityQueue::with_comparator(capacity, compare_weight);
        let overflow = |_| TreeBuildError::QueueOverflow { capacity };

        for (symbol, weight) in frequencies.iter() {
            queue.insert(HuffmanNode::leaf(symbol, weight)).map_err(overflow)?;
        }

        while queue.len() > 1 {
            let (Some(left), Some(right)) = (queue.extract_min(), queue.extract_min()) else {
                unreachable!("queue holds at least two nodes");
            };
            queue.insert(HuffmanNode::merge(left, right)).map_err(overflow)?;
        }

        let root = queue.extract_min().ok_or(TreeBuildError::EmptyAlphabet)?;
        vprintln!(
            "Built huffman tree over {} symbols with depth {}",
            capacity,
            root.depth()
        );
        Ok(HuffmanTree { root })
    }

    pub fn from_root(root: HuffmanNode) -> Self {
        HuffmanTree { root }
    }

    pub fn root(&self) -> &HuffmanNode {
        &self.root
    }

    pub fn into_root(self) -> HuffmanNode {
        self.root
    }

    /// The root's weight, which is the number of symbols the tree was built from.
    pub fn total_symbols(&self) -> u64 {
        self.root.weight()
    }

    /// True if the root is a leaf, i.e. the input only contained one distinct symbol.
    pub fn is_single_symbol(&self) -> bool {
        self.root.is_leaf()
    }

    pub fn leaf_count(&self) -> usize {
        self.root.leaf_count()
    }

    pub fn depth(&self) -> usize {
        self.root.depth()
    }
}

/// Draws the tree sideways: right subtrees above their parent, left subtrees below,
/// one level of indentation per depth. Leaves show their symbol, internal nodes their weight.
impl fmt::Display for HuffmanTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn draw(f: &mut fmt::Formatter<'_>, node: &HuffmanNode, depth: usize) -> fmt::Result {
            if let Some(right) = node.right() {
                draw(f, right, depth + 1)?;
            }
            for _ in 0..depth {
                f.write_str("  ")?;
            }
            match node {
                HuffmanNode::Leaf { symbol, .. } => {
                    writeln!(f, "{:?}", char::from(*symbol))?;
                }
                HuffmanNode::Internal { weight, .. } => writeln!(f, "{weight}")?,
            }
            if let Some(left) = node.left() {
                draw(f, left, depth + 1)?;
            }
            Ok(())
        }
        draw(f, &self.root, 0)
    }
}
