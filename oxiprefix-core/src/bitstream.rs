//! Bit-level I/O over byte channels.
//!
//! [`BitSink`] and [`BitSource`] move single bits to and from any
//! [`Write`] / [`Read`] implementation.
//!
//! # Bit Ordering
//!
//! Bits are packed MSB-first (Most Significant Bit first): the first bit
//! written lands in bit 7 of the first byte. A partially filled final byte is
//! zero-padded when the sink is closed, so a reader sees up to seven extra
//! zero bits at the end of the stream.
//!
//! # Example
//!
//! ```
//! use oxiprefix_core::bitstream::{BitSink, BitSource};
//! use std::io::Cursor;
//!
//! let mut sink = BitSink::new(Vec::new());
//! for bit in [1, 0, 1] {
//!     sink.write(bit).unwrap();
//! }
//! let bytes = sink.close().unwrap();
//! assert_eq!(bytes, vec![0b1010_0000]);
//!
//! let mut source = BitSource::new(Cursor::new(bytes));
//! assert_eq!(source.read().unwrap(), Some(1));
//! assert_eq!(source.read().unwrap(), Some(0));
//! assert_eq!(source.read().unwrap(), Some(1));
//! ```

use crate::error::Result;
use crate::trace::{BitEvent, BitTrace};
use std::fmt;
use std::io::{self, Read, Write};

/// Mask of the first (most significant) bit in a byte.
const FIRST_BIT: u8 = 0x80;

/// A bit-level writer that wraps any `Write` implementation.
///
/// Bits accumulate in a single byte that is emitted as soon as it is full.
/// Call [`close`](Self::close) to emit a trailing partial byte; dropping the
/// sink without closing it loses up to seven pending bits.
#[derive(Debug)]
pub struct BitSink<W: Write> {
    /// Underlying writer.
    writer: W,
    /// Byte being assembled.
    current: u8,
    /// Mask of the next bit position to write.
    mask: u8,
    /// Total bits written.
    total_bits_written: u64,
}

impl<W: Write> BitSink<W> {
    /// Create a new `BitSink` wrapping the given writer.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            current: 0,
            mask: FIRST_BIT,
            total_bits_written: 0,
        }
    }

    /// Get a reference to the underlying writer.
    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    /// Get the total number of bits written so far.
    pub fn bits_written(&self) -> u64 {
        self.total_bits_written
    }

    /// Whether bits are waiting in a partially filled byte.
    pub fn has_pending_bits(&self) -> bool {
        self.mask != FIRST_BIT
    }

    /// Write one bit. Any non-zero value writes a 1.
    #[inline]
    pub fn write(&mut self, bit: u8) -> Result<()> {
        self.write_bit(bit != 0)
    }

    /// Write one bit.
    #[inline]
    pub fn write_bit(&mut self, bit: bool) -> Result<()> {
        if bit {
            self.current |= self.mask;
        }
        self.mask >>= 1;
        self.total_bits_written += 1;

        if self.mask == 0 {
            self.writer.write_all(&[self.current])?;
            self.current = 0;
            self.mask = FIRST_BIT;
        }

        Ok(())
    }

    /// Write a sequence of bits in order.
    pub fn write_bits<I>(&mut self, bits: I) -> Result<()>
    where
        I: IntoIterator<Item = bool>,
    {
        for bit in bits {
            self.write_bit(bit)?;
        }
        Ok(())
    }

    /// Emit any partial byte (zero-padded), flush, and return the writer.
    pub fn close(mut self) -> Result<W> {
        if self.has_pending_bits() {
            self.writer.write_all(&[self.current])?;
        }
        self.writer.flush()?;
        Ok(self.writer)
    }
}

/// A bit-level reader that wraps any `Read` implementation.
///
/// One byte is pulled from the reader whenever the current byte is used up.
/// An optional [`BitTrace`] hook observes every bit handed out.
pub struct BitSource<R: Read> {
    /// Underlying reader.
    reader: R,
    /// Byte being consumed.
    current: u8,
    /// Mask of the next bit to read; zero when a new byte is needed.
    mask: u8,
    /// Total bits read (for error reporting).
    total_bits_read: u64,
    /// Instrumentation hook.
    trace: Option<Box<dyn BitTrace>>,
}

impl<R: Read> BitSource<R> {
    /// Create a new `BitSource` wrapping the given reader.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            current: 0,
            mask: 0,
            total_bits_read: 0,
            trace: None,
        }
    }

    /// Create a new `BitSource` that reports every bit to `trace`.
    pub fn with_trace(reader: R, trace: impl BitTrace + 'static) -> Self {
        let mut source = Self::new(reader);
        source.set_trace(Box::new(trace));
        source
    }

    /// Install an instrumentation hook, replacing any previous one.
    pub fn set_trace(&mut self, trace: Box<dyn BitTrace>) {
        self.trace = Some(trace);
    }

    /// Remove and return the instrumentation hook.
    pub fn take_trace(&mut self) -> Option<Box<dyn BitTrace>> {
        self.trace.take()
    }

    /// Get a reference to the underlying reader.
    pub fn get_ref(&self) -> &R {
        &self.reader
    }

    /// Get the total number of bits read so far.
    pub fn bits_read(&self) -> u64 {
        self.total_bits_read
    }

    /// Read one bit.
    ///
    /// Returns `Ok(None)` once the underlying reader is exhausted. A byte
    /// read that fails with [`io::ErrorKind::Interrupted`] is reissued, as
    /// [`Read::read_exact`] does; every other error is returned as is.
    pub fn read(&mut self) -> Result<Option<u8>> {
        if self.mask == 0 {
            match self.next_byte()? {
                Some(byte) => {
                    self.current = byte;
                    self.mask = FIRST_BIT;
                }
                None => return Ok(None),
            }
        }

        let bit = u8::from(self.current & self.mask != 0);

        if let Some(trace) = self.trace.as_mut() {
            trace.on_bit(&BitEvent {
                position: self.total_bits_read,
                mask: self.mask,
                bit,
            });
        }

        self.mask >>= 1;
        self.total_bits_read += 1;

        Ok(Some(bit))
    }

    /// Read one bit as a `bool`.
    pub fn read_bit(&mut self) -> Result<Option<bool>> {
        Ok(self.read()?.map(|bit| bit != 0))
    }

    /// Return the underlying reader. Unread bits of the current byte are lost.
    pub fn close(self) -> R {
        self.reader
    }

    fn next_byte(&mut self) -> Result<Option<u8>> {
        let mut byte = [0u8; 1];
        loop {
            match self.reader.read(&mut byte) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(byte[0])),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
    }
}

impl<R: Read + fmt::Debug> fmt::Debug for BitSource<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BitSource")
            .field("reader", &self.reader)
            .field("current", &self.current)
            .field("mask", &self.mask)
            .field("total_bits_read", &self.total_bits_read)
            .field("traced", &self.trace.is_some())
            .finish()
    }
}

impl<R: Read> Iterator for BitSource<R> {
    type Item = Result<u8>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read().transpose()
    }
}
