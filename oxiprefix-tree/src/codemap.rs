//! Code map generation.
//!
//! [`CodeMap`] assigns every leaf of a frequency tree the path that reaches
//! it. [`InverseCodeMap`] reverses that assignment for decoding.
//!
//! # Single-Symbol Alphabets
//!
//! A tree whose root is a leaf yields the empty code for its symbol. An empty
//! code cannot be recognised by growing a bit buffer, so the decoder treats
//! such maps separately (see [`InverseCodeMap::sole_symbol`]).

use crate::code::Code;
use crate::node::{FrequencyTree, Node};
use std::collections::HashMap;

/// Mapping from symbol to code.
///
/// Symbols are compared only by equality, so entries live in a list in
/// traversal order (left subtree before right subtree). Lookups are linear in
/// the alphabet size.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CodeMap<T> {
    entries: Vec<(T, Code)>,
}

impl<T> Default for CodeMap<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<T> CodeMap<T> {
    /// Number of symbols in the map.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(symbol, code)` pairs in traversal order.
    pub fn iter(&self) -> impl Iterator<Item = (&T, &Code)> {
        self.entries.iter().map(|(symbol, code)| (symbol, code))
    }

    /// Length of the longest code, or 0 for an empty map.
    pub fn longest_code_length(&self) -> usize {
        self.entries
            .iter()
            .map(|(_, code)| code.len())
            .max()
            .unwrap_or(0)
    }
}

impl<T: PartialEq> CodeMap<T> {
    /// Look up the code for `symbol`.
    pub fn get(&self, symbol: &T) -> Option<&Code> {
        self.entries
            .iter()
            .find(|(candidate, _)| candidate == symbol)
            .map(|(_, code)| code)
    }

    /// Whether `symbol` has a code.
    pub fn contains(&self, symbol: &T) -> bool {
        self.get(symbol).is_some()
    }

    /// Insert or replace the code for `symbol`.
    fn insert(&mut self, symbol: T, code: Code) {
        match self
            .entries
            .iter_mut()
            .find(|(candidate, _)| *candidate == symbol)
        {
            Some(entry) => entry.1 = code,
            None => self.entries.push((symbol, code)),
        }
    }
}

impl<T: PartialEq + Clone> CodeMap<T> {
    /// Generate the map for a built tree.
    pub fn generate(tree: &FrequencyTree<T>) -> Self {
        Self::from_root(tree.root())
    }

    /// Generate the map by depth-first traversal from `root`.
    pub fn from_root(root: &Node<T>) -> Self {
        let mut map = Self::default();
        let mut stack = vec![(root, Code::new())];

        while let Some((node, path)) = stack.pop() {
            // Right is pushed first so the left subtree is visited first.
            if let Some(right) = node.right() {
                stack.push((right, path.child(true)));
            }
            if let Some(left) = node.left() {
                stack.push((left, path.child(false)));
            }
            if let Some(symbol) = node.symbol() {
                map.insert(symbol.clone(), path);
            }
        }

        map
    }
}

impl<T: Clone> CodeMap<T> {
    /// Build the reverse (code to symbol) map.
    pub fn invert(&self) -> InverseCodeMap<T> {
        InverseCodeMap::new(self)
    }
}

/// Mapping from code to symbol, with the longest code length.
#[derive(Debug, Clone)]
pub struct InverseCodeMap<T> {
    codes: HashMap<Code, T>,
    longest: usize,
}

impl<T: Clone> InverseCodeMap<T> {
    /// Invert `map`.
    pub fn new(map: &CodeMap<T>) -> Self {
        let mut codes = HashMap::with_capacity(map.len());
        let mut longest = 0;
        for (symbol, code) in map.iter() {
            longest = longest.max(code.len());
            codes.insert(code.clone(), symbol.clone());
        }
        Self { codes, longest }
    }
}

impl<T> InverseCodeMap<T> {
    /// Look up the symbol for `code`.
    pub fn get(&self, code: &Code) -> Option<&T> {
        self.codes.get(code)
    }

    /// Length of the longest code.
    pub fn longest_code_length(&self) -> usize {
        self.longest
    }

    /// Number of codes.
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// Whether the map is empty.
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// The only symbol of a single-symbol alphabet, whose code is empty.
    pub fn sole_symbol(&self) -> Option<&T> {
        if self.longest == 0 {
            self.codes.get(&Code::new())
        } else {
            None
        }
    }
}
