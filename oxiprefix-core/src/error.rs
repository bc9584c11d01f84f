//! Error types for OxiPrefix operations.
//!
//! Every fallible operation in the workspace reports an [`OxiPrefixError`].
//! Errors are terminal for the operation that raised them: callers must
//! discard any partially built output.

use std::io;
use thiserror::Error;

/// The main error type for OxiPrefix operations.
#[derive(Debug, Error)]
pub enum OxiPrefixError {
    /// I/O error from the underlying byte channel.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A public entry point received an argument it cannot act on.
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Description of the rejected argument.
        message: String,
    },

    /// A tree was requested before any symbol was added.
    #[error("Cannot build a frequency tree without symbols")]
    EmptyTree,

    /// The encoder was asked for a symbol that has no code.
    #[error("Unknown symbol at input position {position}")]
    UnknownSymbol {
        /// Index of the offending symbol in the input sequence.
        position: usize,
    },

    /// The decode buffer outgrew every known code without a match.
    #[error("No code matches at bit position {position}: longest code is {longest} bits")]
    CodeTooLong {
        /// Bit position (zero based) at which decoding gave up.
        position: u64,
        /// Length of the longest code in the active map.
        longest: usize,
    },

    /// A symbol count would exceed the counter width.
    #[error("Symbol count overflow")]
    CountOverflow,

    /// The input ended before the expected number of symbols was decoded.
    #[error("Truncated input: expected {expected} symbols, decoded {decoded}")]
    Truncated {
        /// Number of symbols requested.
        expected: usize,
        /// Number of symbols decoded before the input ended.
        decoded: usize,
    },

    /// Strict decoding found an incomplete code at end of input.
    #[error("Incomplete code at end of input: {bits} trailing bits")]
    TrailingBits {
        /// Number of bits left in the decode buffer.
        bits: usize,
    },
}

/// Result type alias for OxiPrefix operations.
pub type Result<T> = std::result::Result<T, OxiPrefixError>;

impl OxiPrefixError {
    /// Create an invalid argument error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create an unknown symbol error.
    pub fn unknown_symbol(position: usize) -> Self {
        Self::UnknownSymbol { position }
    }

    /// Create a code too long error.
    pub fn code_too_long(position: u64, longest: usize) -> Self {
        Self::CodeTooLong { position, longest }
    }

    /// Create a truncated input error.
    pub fn truncated(expected: usize, decoded: usize) -> Self {
        Self::Truncated { expected, decoded }
    }

    /// Create a trailing bits error.
    pub fn trailing_bits(bits: usize) -> Self {
        Self::TrailingBits { bits }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = OxiPrefixError::invalid_argument("bit string contains 'x'");
        assert!(err.to_string().contains("'x'"));

        let err = OxiPrefixError::code_too_long(17, 3);
        assert!(err.to_string().contains("17"));
        assert!(err.to_string().contains("3 bits"));

        let err = OxiPrefixError::unknown_symbol(4);
        assert!(err.to_string().contains("position 4"));

        let err = OxiPrefixError::truncated(10, 7);
        assert!(err.to_string().contains("expected 10"));

        assert!(OxiPrefixError::EmptyTree.to_string().contains("without symbols"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::BrokenPipe, "channel closed");
        let err: OxiPrefixError = io_err.into();
        assert!(matches!(err, OxiPrefixError::Io(_)));
    }
}
