//! Bit-path codes.
//!
//! A [`Code`] is the path from the tree root to a leaf: `0` steps to the left
//! child, `1` to the right child. It renders as a string of `'0'`/`'1'`
//! characters and parses back from one.

use oxiprefix_core::error::{OxiPrefixError, Result};
use std::fmt;
use std::str::FromStr;

/// A variable-length binary code.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(into = "String", try_from = "String")
)]
pub struct Code {
    bits: Vec<bool>,
}

impl Code {
    /// Create an empty code.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of bits in the code.
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// Whether the code has no bits (single-symbol alphabets only).
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Append one bit.
    pub fn push(&mut self, bit: bool) {
        self.bits.push(bit);
    }

    /// Remove all bits.
    pub fn clear(&mut self) {
        self.bits.clear();
    }

    /// The bits, root first.
    pub fn bits(&self) -> &[bool] {
        &self.bits
    }

    /// Iterate over the bits, root first.
    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        self.bits.iter().copied()
    }

    /// Whether `self` is a (non-strict) prefix of `other`.
    pub fn is_prefix_of(&self, other: &Code) -> bool {
        other.bits.starts_with(&self.bits)
    }

    /// A copy of this code extended by one bit.
    pub(crate) fn child(&self, bit: bool) -> Code {
        let mut bits = Vec::with_capacity(self.bits.len() + 1);
        bits.extend_from_slice(&self.bits);
        bits.push(bit);
        Code { bits }
    }

    /// Append the textual form to `out`.
    pub(crate) fn push_to(&self, out: &mut String) {
        out.extend(self.bits.iter().map(|&bit| if bit { '1' } else { '0' }));
    }
}

impl From<Vec<bool>> for Code {
    fn from(bits: Vec<bool>) -> Self {
        Self { bits }
    }
}

impl From<Code> for String {
    fn from(code: Code) -> Self {
        code.to_string()
    }
}

impl TryFrom<String> for Code {
    type Error = OxiPrefixError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = String::with_capacity(self.bits.len());
        self.push_to(&mut s);
        f.write_str(&s)
    }
}

impl FromStr for Code {
    type Err = OxiPrefixError;

    fn from_str(s: &str) -> Result<Self> {
        s.chars()
            .enumerate()
            .map(|(index, c)| parse_bit(c, index))
            .collect::<Result<Vec<bool>>>()
            .map(Code::from)
    }
}

/// Parse one character of a bit string.
pub(crate) fn parse_bit(c: char, index: usize) -> Result<bool> {
    match c {
        '0' => Ok(false),
        '1' => Ok(true),
        other => Err(OxiPrefixError::invalid_argument(format!(
            "bit string contains {other:?} at index {index}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_and_parse() {
        let code: Code = "0110".parse().unwrap();
        assert_eq!(code.len(), 4);
        assert_eq!(code.bits(), &[false, true, true, false]);
        assert_eq!(code.to_string(), "0110");

        let empty: Code = "".parse().unwrap();
        assert!(empty.is_empty());
        assert_eq!(empty.to_string(), "");
    }

    #[test]
    fn test_parse_rejects_other_chars() {
        let err = "01a1".parse::<Code>().unwrap_err();
        assert!(matches!(err, OxiPrefixError::InvalidArgument { .. }));
        assert!(err.to_string().contains("index 2"));
    }

    #[test]
    fn test_prefix() {
        let short: Code = "01".parse().unwrap();
        let long: Code = "0110".parse().unwrap();
        assert!(short.is_prefix_of(&long));
        assert!(!long.is_prefix_of(&short));
        assert!(Code::new().is_prefix_of(&short));
    }

    #[test]
    fn test_child_and_clear() {
        let mut code = Code::new().child(true).child(false);
        assert_eq!(code.to_string(), "10");
        code.push(true);
        assert_eq!(code.to_string(), "101");
        code.clear();
        assert!(code.is_empty());
    }
}
