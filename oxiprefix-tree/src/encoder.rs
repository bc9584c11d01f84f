//! Prefix-code encoder.

use crate::code::Code;
use crate::codemap::CodeMap;
use oxiprefix_core::bitstream::BitSink;
use oxiprefix_core::error::{OxiPrefixError, Result};
use std::io::Write;

/// Encoder that maps symbols to their codes.
///
/// The encoder keeps its own copy of the code map. After the source tree is
/// rebuilt, call [`update_map`](Self::update_map) with the new map.
#[derive(Debug, Clone)]
pub struct PrefixEncoder<T> {
    /// Symbol to code map.
    map: CodeMap<T>,
}

impl<T: PartialEq> PrefixEncoder<T> {
    /// Create an encoder for `map`.
    pub fn new(map: CodeMap<T>) -> Self {
        Self { map }
    }

    /// Replace the code map.
    pub fn update_map(&mut self, map: CodeMap<T>) {
        self.map = map;
    }

    /// The active code map.
    pub fn map(&self) -> &CodeMap<T> {
        &self.map
    }

    /// Encode `symbols` as a string of `'0'` and `'1'` characters.
    ///
    /// # Errors
    ///
    /// [`OxiPrefixError::UnknownSymbol`] if a symbol has no code.
    pub fn encode(&self, symbols: &[T]) -> Result<String> {
        let codes = self.lookup_all(symbols)?;

        let mut output = String::with_capacity(codes.iter().map(|code| code.len()).sum());
        for code in codes {
            code.push_to(&mut output);
        }

        Ok(output)
    }

    /// Write the codes of `symbols` to `sink`.
    ///
    /// Every symbol is looked up before the first bit is written, so an
    /// unknown symbol leaves the sink untouched. The sink is not closed.
    pub fn encode_into<W: Write>(&self, symbols: &[T], sink: &mut BitSink<W>) -> Result<()> {
        for code in self.lookup_all(symbols)? {
            sink.write_bits(code.iter())?;
        }
        Ok(())
    }

    /// Total number of bits `symbols` encode to.
    pub fn encoded_bits(&self, symbols: &[T]) -> Result<u64> {
        Ok(self
            .lookup_all(symbols)?
            .iter()
            .map(|code| code.len() as u64)
            .sum())
    }

    fn lookup_all(&self, symbols: &[T]) -> Result<Vec<&Code>> {
        symbols
            .iter()
            .enumerate()
            .map(|(position, symbol)| {
                self.map
                    .get(symbol)
                    .ok_or_else(|| OxiPrefixError::unknown_symbol(position))
            })
            .collect()
    }
}
