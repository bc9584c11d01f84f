//! Frequency tree nodes.
//!
//! A node is either a leaf holding a symbol and its count, or an internal
//! node aggregating the counts of its children. An internal node always has a
//! left child and may lack a right one (a promoted odd node).

use crate::code::Code;
use crate::codemap::CodeMap;
use oxiprefix_core::error::{OxiPrefixError, Result};

/// A node in a frequency tree.
///
/// Nodes can only be created through [`Node::leaf`] and [`Node::join`], so a
/// node with neither a symbol nor a child cannot exist.
#[derive(Debug, Clone, PartialEq)]
pub struct Node<T> {
    symbol: Option<T>,
    count: u64,
    left: Option<Box<Node<T>>>,
    right: Option<Box<Node<T>>>,
}

impl<T> Node<T> {
    /// Create a leaf.
    pub fn leaf(symbol: T, count: u64) -> Self {
        Self {
            symbol: Some(symbol),
            count,
            left: None,
            right: None,
        }
    }

    /// Create an internal node over `left` and an optional `right`.
    ///
    /// The count is the sum of the children's counts.
    pub fn join(left: Node<T>, right: Option<Node<T>>) -> Result<Self> {
        let count = match &right {
            Some(right) => left
                .count
                .checked_add(right.count)
                .ok_or(OxiPrefixError::CountOverflow)?,
            None => left.count,
        };

        Ok(Self {
            symbol: None,
            count,
            left: Some(Box::new(left)),
            right: right.map(Box::new),
        })
    }

    /// Occurrence count (aggregate for internal nodes).
    pub fn count(&self) -> u64 {
        self.count
    }

    /// The symbol, for leaves.
    pub fn symbol(&self) -> Option<&T> {
        self.symbol.as_ref()
    }

    /// Left child.
    pub fn left(&self) -> Option<&Node<T>> {
        self.left.as_deref()
    }

    /// Right child.
    pub fn right(&self) -> Option<&Node<T>> {
        self.right.as_deref()
    }

    /// Whether this node is a leaf.
    pub fn is_leaf(&self) -> bool {
        self.symbol.is_some()
    }

    /// Number of leaves below (and including) this node.
    pub fn leaf_count(&self) -> usize {
        let mut leaves = 0;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            if node.is_leaf() {
                leaves += 1;
            }
            stack.extend(node.left());
            stack.extend(node.right());
        }
        leaves
    }

    /// Length of the longest root-to-leaf path, in edges.
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack = vec![(self, 0usize)];
        while let Some((node, depth)) = stack.pop() {
            deepest = deepest.max(depth);
            stack.extend(node.left().map(|child| (child, depth + 1)));
            stack.extend(node.right().map(|child| (child, depth + 1)));
        }
        deepest
    }
}

impl<T> Drop for Node<T> {
    // Dismantle iteratively so deep trees cannot exhaust the call stack.
    fn drop(&mut self) {
        let mut stack: Vec<Box<Node<T>>> = Vec::new();
        stack.extend(self.left.take());
        stack.extend(self.right.take());
        while let Some(mut node) = stack.pop() {
            stack.extend(node.left.take());
            stack.extend(node.right.take());
        }
    }
}

/// An immutable snapshot of a built frequency tree.
#[derive(Debug, Clone, PartialEq)]
pub struct FrequencyTree<T> {
    root: Node<T>,
}

impl<T> FrequencyTree<T> {
    /// Wrap an existing root node.
    pub fn from_root(root: Node<T>) -> Self {
        Self { root }
    }

    /// The root node.
    pub fn root(&self) -> &Node<T> {
        &self.root
    }

    /// Total count recorded in the tree.
    pub fn count(&self) -> u64 {
        self.root.count()
    }

    /// Number of distinct symbols (leaves).
    pub fn leaf_count(&self) -> usize {
        self.root.leaf_count()
    }

    /// Longest code length the tree produces.
    pub fn depth(&self) -> usize {
        self.root.depth()
    }
}

impl<T: PartialEq + Clone> FrequencyTree<T> {
    /// Generate the symbol-to-code map for this tree.
    pub fn code_map(&self) -> CodeMap<T> {
        CodeMap::generate(self)
    }

    /// Look up the code of one symbol by walking the tree.
    pub fn code_of(&self, symbol: &T) -> Option<Code> {
        self.code_map().get(symbol).cloned()
    }
}
