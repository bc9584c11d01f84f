//! # OxiPrefix Tree: Frequency-Tree Prefix Codes
//!
//! This crate builds variable-length prefix codes for any alphabet of
//! equality-comparable symbols and encodes/decodes symbol sequences with
//! them, either as `'0'`/`'1'` strings or as MSB-first bitstreams.
//!
//! ## Features
//!
//! - **Any symbol type**: symbols only need `PartialEq` and `Clone`
//! - **Averaging merge heuristic**: not classical Huffman; codes are
//!   prefix-free but not entropy-minimal
//! - **Guaranteed termination**: a smallest-pair fallback when a pass cannot
//!   make progress
//! - **True bitstreams**: via [`oxiprefix_core::BitSink`] and
//!   [`oxiprefix_core::BitSource`]
//!
//! ## Pipeline
//!
//! ```text
//! symbols ─► FrequencyTreeBuilder ─► FrequencyTree ─► CodeMap ─┬─► PrefixEncoder
//!                                                               └─► PrefixDecoder
//! ```
//!
//! ## Example
//!
//! ```rust
//! use oxiprefix_tree::{FrequencyTreeBuilder, PrefixDecoder, PrefixEncoder};
//!
//! let text: Vec<char> = "abracadabra".chars().collect();
//!
//! let mut builder = FrequencyTreeBuilder::new();
//! builder.add_values(text.iter().copied()).unwrap();
//! let map = builder.build_tree().unwrap().code_map();
//!
//! let encoded = PrefixEncoder::new(map.clone()).encode(&text).unwrap();
//! let decoded = PrefixDecoder::new(&map).decode(&encoded).unwrap();
//! assert_eq!(decoded, text);
//! ```
//!
//! ## Wire Format
//!
//! A bitstream is the concatenation of the symbol codes, MSB-first within
//! each byte, zero-padded to the next byte boundary. No code table, symbol
//! count, or header is embedded: both sides must hold the same [`CodeMap`].
//!
//! ## Usage Contract
//!
//! Every type here is single-owner and synchronous. Encoders and decoders
//! keep their own map snapshot; after rebuilding the tree, pass the new map
//! to `update_map`.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

mod builder;
mod code;
mod coder;
mod codemap;
mod config;
mod decoder;
mod encoder;
mod node;

pub use builder::FrequencyTreeBuilder;
pub use code::Code;
pub use coder::PrefixCoder;
pub use codemap::{CodeMap, InverseCodeMap};
pub use config::{DecoderConfig, TrailingBits};
pub use decoder::PrefixDecoder;
pub use encoder::PrefixEncoder;
pub use node::{FrequencyTree, Node};
pub use oxiprefix_core::error::{OxiPrefixError, Result};

use oxiprefix_core::bitstream::{BitSink, BitSource};

/// Encode `symbols` into zero-padded bytes.
///
/// # Example
///
/// ```rust
/// use oxiprefix_tree::{FrequencyTreeBuilder, encode_to_bytes};
///
/// let mut builder = FrequencyTreeBuilder::new();
/// builder.add_values("AAAAABBCD".chars()).unwrap();
/// let map = builder.build_tree().unwrap().code_map();
///
/// // A=1 B=01 C=000 D=001
/// let bytes = encode_to_bytes(&map, &['A', 'B', 'C', 'D']).unwrap();
/// assert_eq!(bytes, vec![0b1010_0000, 0b1000_0000]);
/// ```
pub fn encode_to_bytes<T: PartialEq>(map: &CodeMap<T>, symbols: &[T]) -> Result<Vec<u8>> {
    let mut sink = BitSink::new(Vec::new());
    for (position, symbol) in symbols.iter().enumerate() {
        let code = map
            .get(symbol)
            .ok_or_else(|| OxiPrefixError::unknown_symbol(position))?;
        sink.write_bits(code.iter())?;
    }
    sink.close()
}

/// Decode `symbol_count` symbols from bytes produced by [`encode_to_bytes`].
///
/// The count must travel out of band: the bytes alone cannot tell padding
/// from data.
///
/// # Example
///
/// ```rust
/// use oxiprefix_tree::{FrequencyTreeBuilder, decode_from_bytes, encode_to_bytes};
///
/// let text: Vec<char> = "banana bandana".chars().collect();
/// let mut builder = FrequencyTreeBuilder::new();
/// builder.add_values(text.iter().copied()).unwrap();
/// let map = builder.build_tree().unwrap().code_map();
///
/// let bytes = encode_to_bytes(&map, &text).unwrap();
/// let decoded = decode_from_bytes(&map, &bytes, text.len()).unwrap();
/// assert_eq!(decoded, text);
/// ```
pub fn decode_from_bytes<T: Clone>(
    map: &CodeMap<T>,
    bytes: &[u8],
    symbol_count: usize,
) -> Result<Vec<T>> {
    let mut source = BitSource::new(bytes);
    PrefixDecoder::new(map).decode_exact_from(&mut source, symbol_count)
}
