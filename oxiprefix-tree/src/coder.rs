//! All-in-one coder: accumulate symbols, build the tree, hand out codecs.

use crate::builder::FrequencyTreeBuilder;
use crate::codemap::CodeMap;
use crate::config::DecoderConfig;
use crate::decoder::PrefixDecoder;
use crate::encoder::PrefixEncoder;
use crate::node::FrequencyTree;
use oxiprefix_core::error::{OxiPrefixError, Result};

/// Owns a [`FrequencyTreeBuilder`] and the last tree built from it.
///
/// Adding symbols after [`generate_tree`](Self::generate_tree) does not
/// change the current tree; call it again and refresh any encoder or decoder
/// with the new map.
#[derive(Debug, Clone)]
pub struct PrefixCoder<T> {
    builder: FrequencyTreeBuilder<T>,
    tree: Option<FrequencyTree<T>>,
}

impl<T> Default for PrefixCoder<T> {
    fn default() -> Self {
        Self {
            builder: FrequencyTreeBuilder::new(),
            tree: None,
        }
    }
}

impl<T> PrefixCoder<T> {
    /// Create an empty coder.
    pub fn new() -> Self {
        Self::default()
    }

    /// The underlying builder.
    pub fn builder(&self) -> &FrequencyTreeBuilder<T> {
        &self.builder
    }

    /// The last generated tree, if any.
    pub fn tree(&self) -> Option<&FrequencyTree<T>> {
        self.tree.as_ref()
    }
}

impl<T: PartialEq + Clone> PrefixCoder<T> {
    /// Count one occurrence of `symbol`.
    pub fn add_value(&mut self, symbol: T) -> Result<()> {
        self.builder.add_value(symbol)
    }

    /// Count every symbol in `symbols`.
    pub fn add_values<I>(&mut self, symbols: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
    {
        self.builder.add_values(symbols)
    }

    /// Build a new tree from the current counts and keep it.
    pub fn generate_tree(&mut self) -> Result<&FrequencyTree<T>> {
        let tree = self.tree.insert(self.builder.build_tree()?);
        Ok(&*tree)
    }

    /// Generate the code map of the current tree.
    ///
    /// # Errors
    ///
    /// [`OxiPrefixError::InvalidArgument`] if no tree has been generated.
    pub fn generate_map(&self) -> Result<CodeMap<T>> {
        self.tree.as_ref().map(CodeMap::generate).ok_or_else(|| {
            OxiPrefixError::invalid_argument("no tree generated; call generate_tree first")
        })
    }

    /// An encoder for the current tree.
    pub fn encoder(&self) -> Result<PrefixEncoder<T>> {
        Ok(PrefixEncoder::new(self.generate_map()?))
    }

    /// A decoder for the current tree.
    pub fn decoder(&self) -> Result<PrefixDecoder<T>> {
        self.decoder_with_config(DecoderConfig::default())
    }

    /// A decoder for the current tree with the given configuration.
    pub fn decoder_with_config(&self, config: DecoderConfig) -> Result<PrefixDecoder<T>> {
        Ok(PrefixDecoder::with_config(&self.generate_map()?, config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_requires_tree() {
        let mut coder = PrefixCoder::new();
        coder.add_values("hello".chars()).unwrap();
        assert!(coder.tree().is_none());
        assert!(matches!(
            coder.generate_map(),
            Err(OxiPrefixError::InvalidArgument { .. })
        ));
        assert!(coder.encoder().is_err());
    }

    #[test]
    fn test_generate_tree_empty() {
        let mut coder: PrefixCoder<char> = PrefixCoder::new();
        assert!(matches!(coder.generate_tree(), Err(OxiPrefixError::EmptyTree)));
    }

    #[test]
    fn test_roundtrip() {
        let text: Vec<char> = "hello world".chars().collect();
        let mut coder = PrefixCoder::new();
        coder.add_values(text.iter().copied()).unwrap();
        assert_eq!(coder.generate_tree().unwrap().count(), 11);

        let encoded = coder.encoder().unwrap().encode(&text).unwrap();
        assert_eq!(coder.decoder().unwrap().decode(&encoded).unwrap(), text);
    }

    #[test]
    fn test_stale_tree_until_regenerated() {
        let mut coder = PrefixCoder::new();
        coder.add_values("abab".chars()).unwrap();
        coder.generate_tree().unwrap();
        coder.add_value('c').unwrap();

        assert!(coder.encoder().unwrap().encode(&['c']).is_err());
        coder.generate_tree().unwrap();
        assert!(coder.encoder().unwrap().encode(&['c']).is_ok());
        assert_eq!(coder.builder().total_count(), 5);
    }
}
