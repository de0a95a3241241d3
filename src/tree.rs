//! Huffman tree construction over index-addressed node arenas.
//!
//! Leaves live in one arena in ranked order, internal nodes in another in
//! creation order. Children are referenced by [`NodeRef`], so the whole
//! tree is dropped at once with its two vectors.
pub mod code;
pub mod rank;

use std::collections::VecDeque;

use crate::frequency::{FrequencyTable, SYMBOLS};
pub use crate::tree::code::{Code, CodeTable};
pub use crate::tree::rank::rank_symbols;

/// Index of a node in one of the two arenas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeRef {
    Leaf(usize),
    Internal(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeafNode {
    pub symbol: u8,
    pub count: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InternalNode {
    /// Sum of both children's counts.
    pub count: u64,
    pub left: NodeRef,
    pub right: NodeRef,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Node {
    Leaf(LeafNode),
    Internal(InternalNode),
}

impl Node {
    pub fn count(&self) -> u64 {
        match self {
            Node::Leaf(leaf) => leaf.count as u64,
            Node::Internal(internal) => internal.count,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree {
    leaves: Vec<LeafNode>,
    internals: Vec<InternalNode>,
    root: NodeRef,
}

impl HuffmanTree {
    /// Builds the tree for `table`, or `None` when every count is zero.
    pub fn from_frequencies(table: &FrequencyTable) -> Option<Self> {
        let leaves = rank_symbols(table)
            .into_iter()
            .map(|symbol| LeafNode { symbol, count: table.get(symbol) })
            .collect::<Vec<_>>();
        let tree = TreeBuilder::new(leaves).build();
        if let Some(tree) = &tree {
            log::debug!(
                "built tree with {} leaves and {} internal nodes",
                tree.leaf_count(),
                tree.internal_count()
            );
        }
        tree
    }

    pub fn root(&self) -> NodeRef {
        self.root
    }

    pub fn node(&self, node: NodeRef) -> Node {
        match node {
            NodeRef::Leaf(index) => Node::Leaf(self.leaves[index]),
            NodeRef::Internal(index) => Node::Internal(self.internals[index]),
        }
    }

    pub fn leaf_count(&self) -> usize {
        self.leaves.len()
    }

    pub fn internal_count(&self) -> usize {
        self.internals.len()
    }

    /// Leaves in ranked order (ascending count, then symbol).
    pub fn leaves(&self) -> &[LeafNode] {
        &self.leaves
    }

    pub fn codes(&self) -> CodeTable {
        CodeTable::from_tree(self)
    }
}

/// Greedy two-queue Huffman merge.
///
/// Leaves are consumed in ranked order. Internal nodes are queued in
/// creation order, which is also ascending count order, so both sources
/// stay sorted and the minimum is always at the front of one of them.
struct TreeBuilder {
    leaves: Vec<LeafNode>,
    internals: Vec<InternalNode>,
    next_leaf: usize,
    queue: VecDeque<usize>,
}

impl TreeBuilder {
    fn new(leaves: Vec<LeafNode>) -> Self {
        let capacity = leaves.len().saturating_sub(1);
        Self {
            leaves,
            internals: Vec::with_capacity(capacity.min(SYMBOLS - 1)),
            next_leaf: 0,
            queue: VecDeque::with_capacity(capacity),
        }
    }

    fn count_of(&self, node: NodeRef) -> u64 {
        match node {
            NodeRef::Leaf(index) => self.leaves[index].count as u64,
            NodeRef::Internal(index) => self.internals[index].count,
        }
    }

    /// True once only the leaf sentinel is left on both sources.
    fn exhausted(&self) -> bool {
        self.next_leaf == self.leaves.len() && self.queue.is_empty()
    }

    /// Removes the lowest-count node from either source. Leaves win ties.
    fn take_min(&mut self) -> Option<NodeRef> {
        let leaf = self.leaves.get(self.next_leaf).map(|leaf| leaf.count as u64);
        let internal = self.queue.front().map(|index| self.internals[*index].count);
        match (leaf, internal) {
            (Some(leaf), Some(internal)) if leaf <= internal => {
                self.next_leaf += 1;
                Some(NodeRef::Leaf(self.next_leaf - 1))
            }
            (Some(_), None) => {
                self.next_leaf += 1;
                Some(NodeRef::Leaf(self.next_leaf - 1))
            }
            (_, Some(_)) => self.queue.pop_front().map(NodeRef::Internal),
            (None, None) => None,
        }
    }

    fn merge(&mut self, left: NodeRef, right: NodeRef) {
        let count = self.count_of(left) + self.count_of(right);
        debug_assert!(self
            .queue
            .back()
            .map_or(true, |last| self.internals[*last].count <= count));
        self.internals.push(InternalNode { count, left, right });
        self.queue.push_back(self.internals.len() - 1);
    }

    fn build(mut self) -> Option<HuffmanTree> {
        loop {
            let left = self.take_min()?;
            if self.exhausted() {
                return Some(HuffmanTree {
                    leaves: self.leaves,
                    internals: self.internals,
                    root: left,
                });
            }
            let right = self.take_min()?;
            self.merge(left, right);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree_for(input: &[u8]) -> HuffmanTree {
        let table = FrequencyTable::count(input).unwrap();
        HuffmanTree::from_frequencies(&table).unwrap()
    }

    /// Checks that every internal node has two children whose counts sum
    /// to its own, and that each arena entry is reachable exactly once.
    fn assert_full_binary(tree: &HuffmanTree) {
        let mut seen_leaves = vec![false; tree.leaf_count()];
        let mut seen_internals = vec![false; tree.internal_count()];
        let mut stack = vec![tree.root()];
        while let Some(node) = stack.pop() {
            match node {
                NodeRef::Leaf(index) => {
                    assert!(!seen_leaves[index]);
                    seen_leaves[index] = true;
                }
                NodeRef::Internal(index) => {
                    assert!(!seen_internals[index]);
                    seen_internals[index] = true;
                    let internal = tree.internals[index];
                    let sum = tree.node(internal.left).count() + tree.node(internal.right).count();
                    assert_eq!(internal.count, sum);
                    stack.push(internal.left);
                    stack.push(internal.right);
                }
            }
        }
        assert!(seen_leaves.iter().all(|s| *s));
        assert!(seen_internals.iter().all(|s| *s));
    }

    #[test]
    fn test_empty_table() {
        assert!(HuffmanTree::from_frequencies(&FrequencyTable::default()).is_none());
    }

    #[test]
    fn test_single_symbol() {
        let tree = tree_for(b"AAAA");
        assert_eq!(tree.leaf_count(), 1);
        assert_eq!(tree.internal_count(), 0);
        assert_eq!(tree.root(), NodeRef::Leaf(0));
        assert_eq!(tree.node(tree.root()), Node::Leaf(LeafNode { symbol: b'A', count: 4 }));
    }

    #[test]
    fn test_two_symbols() {
        let tree = tree_for(b"AAAAAAAAB");
        assert_eq!(tree.root(), NodeRef::Internal(0));
        let Node::Internal(root) = tree.node(tree.root()) else {
            panic!("root should be internal");
        };
        assert_eq!(root.count, 9);
        assert_eq!(tree.node(root.left), Node::Leaf(LeafNode { symbol: b'B', count: 1 }));
        assert_eq!(tree.node(root.right), Node::Leaf(LeafNode { symbol: b'A', count: 8 }));
    }

    #[test]
    fn test_leaf_wins_tie() {
        // a=1 b=1 c=2: after merging (a, b) into 2, leaf c ties with it and is taken first.
        let tree = tree_for(b"abcc");
        let Node::Internal(root) = tree.node(tree.root()) else {
            panic!("root should be internal");
        };
        assert_eq!(tree.node(root.left), Node::Leaf(LeafNode { symbol: b'c', count: 2 }));
        assert_eq!(root.right, NodeRef::Internal(0));
    }

    #[test]
    fn test_node_counts() {
        let tree = tree_for(b"the quick brown fox jumps over the lazy dog");
        let distinct = FrequencyTable::count(b"the quick brown fox jumps over the lazy dog")
            .unwrap()
            .distinct();
        assert_eq!(tree.leaf_count(), distinct);
        assert_eq!(tree.internal_count(), distinct - 1);
        assert_full_binary(&tree);
    }

    #[test]
    fn test_all_symbols_tie_is_deterministic() {
        let input = (0..=255u8).collect::<Vec<_>>();
        let first = tree_for(&input);
        let second = tree_for(&input);
        assert_eq!(first, second);
        assert_eq!(first.leaf_count(), 256);
        assert_eq!(first.internal_count(), 255);
        assert_full_binary(&first);
        let symbols = first.leaves().iter().map(|leaf| leaf.symbol).collect::<Vec<_>>();
        assert_eq!(symbols, input);
    }

    #[test]
    fn test_internal_counts_ascending() {
        let tree = tree_for(b"abracadabra alakazam mississippi");
        let counts = tree.internals.iter().map(|n| n.count).collect::<Vec<_>>();
        assert!(counts.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(counts.last().copied(), Some(32));
    }
}
