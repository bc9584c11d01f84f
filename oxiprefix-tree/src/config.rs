//! Decoder configuration.

/// What the decoder does with an incomplete code at end of input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TrailingBits {
    /// Drop the incomplete code silently.
    ///
    /// This tolerates the zero padding a closed bit sink adds, at the cost
    /// of not detecting truncated streams.
    #[default]
    Discard,
    /// Fail with [`TrailingBits`](oxiprefix_core::OxiPrefixError::TrailingBits).
    Reject,
}

/// Decoder configuration parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DecoderConfig {
    /// Policy for an incomplete trailing code.
    pub trailing: TrailingBits,
}

impl DecoderConfig {
    /// Padding-tolerant decoding (the default).
    pub const LENIENT: Self = Self {
        trailing: TrailingBits::Discard,
    };

    /// Decoding that rejects any incomplete trailing code.
    ///
    /// Use with string input, or with byte streams whose bit length is known
    /// to be a multiple of eight.
    pub const STRICT: Self = Self {
        trailing: TrailingBits::Reject,
    };

    /// Create a configuration with the given trailing-bits policy.
    pub fn new(trailing: TrailingBits) -> Self {
        Self { trailing }
    }
}
