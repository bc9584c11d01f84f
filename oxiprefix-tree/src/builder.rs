//! Frequency tree construction.
//!
//! [`FrequencyTreeBuilder`] counts symbol occurrences and merges the counted
//! leaves into a single tree using an averaging heuristic:
//!
//! 1. Sort the current level ascending by count (stable, so ties keep
//!    insertion order).
//! 2. Compute `avg = floor(sum / len)`.
//! 3. Scan left to right. A node strictly below `avg` becomes the left child
//!    of a new parent, and the node after it (if any) becomes the right child.
//!    Every other node is carried to the next level unchanged.
//! 4. Repeat until one node remains.
//!
//! When a pass leaves the level as large as it was (for example when every
//! count is equal, so nothing is below the average), the two lowest-count
//! nodes are merged instead. Every pass therefore removes at least one node
//! and construction always terminates.
//!
//! The resulting codes are prefix-free but not entropy-minimal.

use crate::node::{FrequencyTree, Node};
use oxiprefix_core::error::{OxiPrefixError, Result};

/// Accumulates symbol counts and builds a [`FrequencyTree`].
///
/// Symbols only need `PartialEq`; each insertion scans the distinct symbols
/// seen so far.
#[derive(Debug, Clone)]
pub struct FrequencyTreeBuilder<T> {
    /// Distinct symbols with their counts, in first-seen order.
    leaves: Vec<(T, u64)>,
    /// Sum of all counts.
    total: u64,
}

impl<T> Default for FrequencyTreeBuilder<T> {
    fn default() -> Self {
        Self {
            leaves: Vec::new(),
            total: 0,
        }
    }
}

impl<T> FrequencyTreeBuilder<T> {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct symbols seen.
    pub fn distinct_symbols(&self) -> usize {
        self.leaves.len()
    }

    /// Number of symbols added, counting repeats.
    pub fn total_count(&self) -> u64 {
        self.total
    }

    /// Whether no symbol has been added.
    pub fn is_empty(&self) -> bool {
        self.leaves.is_empty()
    }

    /// Forget every counted symbol.
    pub fn clear(&mut self) {
        self.leaves.clear();
        self.total = 0;
    }
}

impl<T: PartialEq> FrequencyTreeBuilder<T> {
    /// Count one occurrence of `symbol`.
    ///
    /// Fails with [`OxiPrefixError::CountOverflow`] if the total would exceed
    /// `u64::MAX`; the builder is left unchanged in that case.
    pub fn add_value(&mut self, symbol: T) -> Result<()> {
        // Each leaf count is bounded by the total, so checking it suffices.
        let total = self
            .total
            .checked_add(1)
            .ok_or(OxiPrefixError::CountOverflow)?;

        match self.leaves.iter_mut().find(|(seen, _)| *seen == symbol) {
            Some(entry) => entry.1 += 1,
            None => self.leaves.push((symbol, 1)),
        }
        self.total = total;

        Ok(())
    }

    /// Count every symbol in `symbols`, stopping at the first error.
    pub fn add_values<I>(&mut self, symbols: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
    {
        for symbol in symbols {
            self.add_value(symbol)?;
        }
        Ok(())
    }

    /// Occurrences of `symbol` counted so far.
    pub fn count_of(&self, symbol: &T) -> u64 {
        self.leaves
            .iter()
            .find(|(seen, _)| seen == symbol)
            .map_or(0, |(_, count)| *count)
    }
}

impl<T: PartialEq + Clone> FrequencyTreeBuilder<T> {
    /// Build a tree from the current counts.
    ///
    /// The builder is not modified and can keep accumulating; later calls
    /// build fresh snapshots.
    ///
    /// # Errors
    ///
    /// [`OxiPrefixError::EmptyTree`] if no symbol was added.
    pub fn build_tree(&self) -> Result<FrequencyTree<T>> {
        let mut level: Vec<Node<T>> = self
            .leaves
            .iter()
            .map(|(symbol, count)| Node::leaf(symbol.clone(), *count))
            .collect();

        while level.len() > 1 {
            level = merge_pass(level)?;
        }

        level
            .pop()
            .map(FrequencyTree::from_root)
            .ok_or(OxiPrefixError::EmptyTree)
    }
}

/// Run one merge pass over `level`, returning the next level.
fn merge_pass<T>(mut level: Vec<Node<T>>) -> Result<Vec<Node<T>>> {
    let before = level.len();

    level.sort_by_key(Node::count);
    let avg = average_count(&level);

    let mut next = Vec::with_capacity(before);
    let mut nodes = level.into_iter();
    while let Some(node) = nodes.next() {
        if node.count() < avg {
            let right = nodes.next();
            next.push(Node::join(node, right)?);
        } else {
            next.push(node);
        }
    }

    if next.len() == before {
        merge_lowest_pair(&mut next)?;
    }

    Ok(next)
}

/// Truncating average of the counts in `level`.
///
/// The level's counts always sum to the builder total, which fits in `u64`.
fn average_count<T>(level: &[Node<T>]) -> u64 {
    if level.is_empty() {
        return 0;
    }
    let sum: u64 = level.iter().map(Node::count).sum();
    sum / level.len() as u64
}

/// Replace the two lowest-count nodes of `level` with their parent.
fn merge_lowest_pair<T>(level: &mut Vec<Node<T>>) -> Result<()> {
    level.sort_by_key(Node::count);

    let mut nodes = std::mem::take(level).into_iter();
    match (nodes.next(), nodes.next()) {
        (Some(lowest), Some(second)) => level.push(Node::join(lowest, Some(second))?),
        (Some(lowest), None) => level.push(lowest),
        _ => {}
    }
    level.extend(nodes);

    Ok(())
}
