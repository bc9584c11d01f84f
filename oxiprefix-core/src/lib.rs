//! # OxiPrefix Core
//!
//! Core components for the OxiPrefix coding library.
//!
//! This crate provides the building blocks shared by the codec crates:
//!
//! - [`bitstream`]: MSB-first bit-level I/O over byte channels
//! - [`trace`]: Optional per-bit instrumentation hooks
//! - [`error`]: Error types
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │ L2: Codec (oxiprefix-tree)                              │
//! │     Frequency tree, code maps, encoder/decoder          │
//! ├─────────────────────────────────────────────────────────┤
//! │ L1: BitStream (this crate)                              │
//! │     BitSink/BitSource, trace hooks, errors              │
//! ├─────────────────────────────────────────────────────────┤
//! │ L0: Byte channel                                        │
//! │     Any std::io::Read / std::io::Write                  │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use oxiprefix_core::bitstream::{BitSink, BitSource};
//! use std::io::Cursor;
//!
//! let mut sink = BitSink::new(Vec::new());
//! sink.write_bits([true, true, false, true]).unwrap();
//! let bytes = sink.close().unwrap();
//!
//! let mut source = BitSource::new(Cursor::new(bytes));
//! assert_eq!(source.read_bit().unwrap(), Some(true));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]
#![forbid(unsafe_code)]

pub mod bitstream;
pub mod error;
pub mod trace;

// Re-exports for convenience
pub use bitstream::{BitSink, BitSource};
pub use error::{OxiPrefixError, Result};
pub use trace::{BitEvent, BitTrace, StderrTrace};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::bitstream::{BitSink, BitSource};
    pub use crate::error::{OxiPrefixError, Result};
    pub use crate::trace::{BitEvent, BitTrace};
}
