//! Prefix-code decoder.
//!
//! The decoder grows a candidate code one bit at a time. A candidate that
//! matches a known code yields its symbol and starts over; a candidate longer
//! than every known code is an error. Because the codes are prefix-free the
//! first match is always the right one.
//!
//! The bitstream carries no symbol count, so the zero padding of the final
//! byte may decode as extra symbols or leave an incomplete code. Use
//! [`PrefixDecoder::decode_exact_from`] when the symbol count is known.

use crate::code::{Code, parse_bit};
use crate::codemap::{CodeMap, InverseCodeMap};
use crate::config::{DecoderConfig, TrailingBits};
use oxiprefix_core::bitstream::BitSource;
use oxiprefix_core::error::{OxiPrefixError, Result};
use std::io::Read;

/// Decoder that maps codes back to symbols.
///
/// The decoder inverts the code map once and caches the result. After the
/// source tree is rebuilt, call [`update_map`](Self::update_map).
#[derive(Debug, Clone)]
pub struct PrefixDecoder<T> {
    /// Code to symbol map.
    inverse: InverseCodeMap<T>,
    /// Configuration.
    config: DecoderConfig,
}

impl<T: Clone> PrefixDecoder<T> {
    /// Create a decoder for `map` with the default (lenient) configuration.
    pub fn new(map: &CodeMap<T>) -> Self {
        Self::with_config(map, DecoderConfig::default())
    }

    /// Create a decoder for `map` with the given configuration.
    pub fn with_config(map: &CodeMap<T>, config: DecoderConfig) -> Self {
        Self {
            inverse: map.invert(),
            config,
        }
    }

    /// Re-invert `map` and recompute the longest code length.
    pub fn update_map(&mut self, map: &CodeMap<T>) {
        self.inverse = map.invert();
    }

    /// The active configuration.
    pub fn config(&self) -> DecoderConfig {
        self.config
    }

    /// Replace the configuration.
    pub fn set_config(&mut self, config: DecoderConfig) {
        self.config = config;
    }

    /// Length of the longest code in the active map.
    pub fn longest_code_length(&self) -> usize {
        self.inverse.longest_code_length()
    }

    /// Decode a string of `'0'` and `'1'` characters.
    ///
    /// # Errors
    ///
    /// - [`OxiPrefixError::InvalidArgument`] for any other character
    /// - [`OxiPrefixError::CodeTooLong`] if no code matches
    /// - [`OxiPrefixError::TrailingBits`] for an incomplete final code in
    ///   strict mode
    pub fn decode(&self, code: &str) -> Result<Vec<T>> {
        let bits = code
            .chars()
            .enumerate()
            .map(|(index, c)| parse_bit(c, index));
        self.decode_bits(bits, 0, None)
    }

    /// Decode every remaining bit of `source`.
    ///
    /// Error positions count from the start of the stream, including bits
    /// consumed by earlier calls.
    pub fn decode_from<R: Read>(&self, source: &mut BitSource<R>) -> Result<Vec<T>> {
        let offset = source.bits_read();
        self.decode_bits(
            std::iter::from_fn(|| source.read_bit().transpose()),
            offset,
            None,
        )
    }

    /// Decode exactly `count` symbols from `source`.
    ///
    /// Bits after the last symbol (such as byte padding) are left unread.
    ///
    /// # Errors
    ///
    /// [`OxiPrefixError::Truncated`] if the source ends first.
    pub fn decode_exact_from<R: Read>(
        &self,
        source: &mut BitSource<R>,
        count: usize,
    ) -> Result<Vec<T>> {
        let offset = source.bits_read();
        let symbols = self.decode_bits(
            std::iter::from_fn(|| source.read_bit().transpose()),
            offset,
            Some(count),
        )?;
        if symbols.len() < count {
            return Err(OxiPrefixError::truncated(count, symbols.len()));
        }
        Ok(symbols)
    }

    fn decode_bits<I>(&self, bits: I, offset: u64, limit: Option<usize>) -> Result<Vec<T>>
    where
        I: Iterator<Item = Result<bool>>,
    {
        if let Some(symbol) = self.inverse.sole_symbol() {
            return Self::decode_sole(symbol, bits, limit);
        }

        let longest = self.inverse.longest_code_length();
        let mut symbols = Vec::new();
        let mut buffer = Code::new();

        if limit == Some(0) {
            return Ok(symbols);
        }

        for (position, bit) in bits.enumerate() {
            buffer.push(bit?);

            if let Some(symbol) = self.inverse.get(&buffer) {
                symbols.push(symbol.clone());
                buffer.clear();
                if limit == Some(symbols.len()) {
                    return Ok(symbols);
                }
            } else if buffer.len() > longest {
                return Err(OxiPrefixError::code_too_long(
                    offset + position as u64,
                    longest,
                ));
            }
        }

        if !buffer.is_empty() && self.config.trailing == TrailingBits::Reject {
            return Err(OxiPrefixError::trailing_bits(buffer.len()));
        }

        Ok(symbols)
    }

    /// Decoding for a single-symbol alphabet, whose only code is empty.
    ///
    /// With a known count, the symbol is repeated without consuming input.
    /// Otherwise every input bit position yields one occurrence.
    fn decode_sole<I>(symbol: &T, bits: I, limit: Option<usize>) -> Result<Vec<T>>
    where
        I: Iterator<Item = Result<bool>>,
    {
        if let Some(count) = limit {
            return Ok(vec![symbol.clone(); count]);
        }

        let mut symbols = Vec::new();
        for bit in bits {
            bit?;
            symbols.push(symbol.clone());
        }
        Ok(symbols)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::FrequencyTreeBuilder;
    use crate::encoder::PrefixEncoder;
    use oxiprefix_core::bitstream::BitSink;
    use std::io::Cursor;

    fn map_for(text: &str) -> CodeMap<char> {
        let mut builder = FrequencyTreeBuilder::new();
        builder.add_values(text.chars()).unwrap();
        builder.build_tree().unwrap().code_map()
    }

    #[test]
    fn test_decode_string() {
        let decoder = PrefixDecoder::new(&map_for("AAAAABBCD"));
        assert_eq!(decoder.longest_code_length(), 3);
        assert_eq!(decoder.decode("101000001").unwrap(), vec!['A', 'B', 'C', 'D']);
        assert!(decoder.decode("").unwrap().is_empty());
    }

    #[test]
    fn test_decode_roundtrip() {
        let text: Vec<char> = "mississippi river".chars().collect();
        let map = map_for("mississippi river");
        let encoded = PrefixEncoder::new(map.clone()).encode(&text).unwrap();
        let decoded = PrefixDecoder::new(&map).decode(&encoded).unwrap();
        assert_eq!(decoded, text);
    }

    #[test]
    fn test_decode_invalid_char() {
        let decoder = PrefixDecoder::new(&map_for("ab"));
        let err = decoder.decode("01x").unwrap_err();
        assert!(matches!(err, OxiPrefixError::InvalidArgument { .. }));
    }

    #[test]
    fn test_code_too_long() {
        // Left-only node: codes are a=00, b=1; "01" matches nothing.
        let lonely = crate::node::Node::join(crate::node::Node::leaf('a', 2), None).unwrap();
        let root =
            crate::node::Node::join(lonely, Some(crate::node::Node::leaf('b', 2))).unwrap();
        let decoder = PrefixDecoder::new(&CodeMap::from_root(&root));
        let err = decoder.decode("1011").unwrap_err();
        match err {
            OxiPrefixError::CodeTooLong { position, longest } => {
                assert_eq!(longest, 2);
                assert_eq!(position, 3);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_code_too_long_position_spans_calls() {
        let lonely = crate::node::Node::join(crate::node::Node::leaf('a', 2), None).unwrap();
        let root =
            crate::node::Node::join(lonely, Some(crate::node::Node::leaf('b', 2))).unwrap();
        let decoder = PrefixDecoder::new(&CodeMap::from_root(&root));

        // Eight b's, then "011" which no code matches.
        let mut source = BitSource::new(Cursor::new(vec![0xFF, 0b0110_0000]));
        assert_eq!(decoder.decode_exact_from(&mut source, 8).unwrap(), vec!['b'; 8]);
        assert_eq!(source.bits_read(), 8);

        match decoder.decode_from(&mut source).unwrap_err() {
            OxiPrefixError::CodeTooLong { position, longest } => {
                assert_eq!(position, 10);
                assert_eq!(longest, 2);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(source.bits_read(), 11);
    }

    #[test]
    fn test_decoder_needs_only_clone() {
        fn decoder_for<T: Clone>(map: &CodeMap<T>) -> PrefixDecoder<T> {
            let mut decoder = PrefixDecoder::new(map);
            decoder.update_map(map);
            decoder
        }

        let map = map_for("AAAAABBCD");
        let inverse = map.invert();
        let decoder = decoder_for(&map);
        assert_eq!(decoder.longest_code_length(), inverse.longest_code_length());
        assert_eq!(decoder.decode("001").unwrap(), vec!['D']);
    }

    #[test]
    fn test_trailing_bits_policy() {
        let map = map_for("AAAAABBCD");
        // "1" (A) then "00", an incomplete C or D.
        let lenient = PrefixDecoder::new(&map);
        assert_eq!(lenient.decode("100").unwrap(), vec!['A']);

        let strict = PrefixDecoder::with_config(&map, DecoderConfig::STRICT);
        let err = strict.decode("100").unwrap_err();
        assert!(matches!(err, OxiPrefixError::TrailingBits { bits: 2 }));
        assert_eq!(strict.decode("1").unwrap(), vec!['A']);
    }

    #[test]
    fn test_decode_from_source() {
        let map = map_for("AAAAABBCD");
        let mut sink = BitSink::new(Vec::new());
        PrefixEncoder::new(map.clone())
            .encode_into(&['D', 'A', 'B'], &mut sink)
            .unwrap();
        let bytes = sink.close().unwrap();
        // 001 1 01 + padding 0: the padding is a partial C/D code.
        assert_eq!(bytes, vec![0b0011_0100]);

        let decoder = PrefixDecoder::new(&map);
        let mut source = BitSource::new(Cursor::new(bytes));
        assert_eq!(decoder.decode_from(&mut source).unwrap(), vec!['D', 'A', 'B']);
    }

    #[test]
    fn test_decode_exact_from_ignores_padding() {
        let map = map_for("AAAAABBCD");
        let mut sink = BitSink::new(Vec::new());
        PrefixEncoder::new(map.clone())
            .encode_into(&['A', 'A'], &mut sink)
            .unwrap();
        let bytes = sink.close().unwrap();
        // 11 + 000000 padding, which reads as two extra C's.
        assert_eq!(bytes, vec![0b1100_0000]);

        let decoder = PrefixDecoder::new(&map);
        let mut source = BitSource::new(Cursor::new(bytes.clone()));
        assert_eq!(decoder.decode_from(&mut source).unwrap(), vec!['A', 'A', 'C', 'C']);

        let mut source = BitSource::new(Cursor::new(bytes));
        assert_eq!(decoder.decode_exact_from(&mut source, 2).unwrap(), vec!['A', 'A']);
        assert_eq!(source.bits_read(), 2);
    }

    #[test]
    fn test_decode_exact_from_truncated() {
        let decoder = PrefixDecoder::new(&map_for("AAAAABBCD"));
        let mut source = BitSource::new(Cursor::new(vec![0xFF]));
        let err = decoder.decode_exact_from(&mut source, 9).unwrap_err();
        assert!(matches!(
            err,
            OxiPrefixError::Truncated {
                expected: 9,
                decoded: 8
            }
        ));
    }

    #[test]
    fn test_single_symbol_alphabet() {
        let map = map_for("xxxx");
        let decoder = PrefixDecoder::new(&map);
        assert_eq!(decoder.longest_code_length(), 0);
        assert!(decoder.decode("").unwrap().is_empty());
        assert_eq!(decoder.decode("000").unwrap(), vec!['x'; 3]);

        let mut source = BitSource::new(Cursor::new(Vec::<u8>::new()));
        assert_eq!(decoder.decode_exact_from(&mut source, 4).unwrap(), vec!['x'; 4]);
    }

    #[test]
    fn test_update_map() {
        let mut decoder = PrefixDecoder::new(&map_for("ab"));
        assert_eq!(decoder.longest_code_length(), 1);
        decoder.update_map(&map_for("AAAAABBCD"));
        assert_eq!(decoder.longest_code_length(), 3);
        assert_eq!(decoder.decode("01").unwrap(), vec!['B']);
    }
}
