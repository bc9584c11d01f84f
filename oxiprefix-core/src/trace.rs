//! Optional per-bit instrumentation for [`BitSource`](crate::bitstream::BitSource).
//!
//! Nothing is traced unless a hook is installed. A hook receives one
//! [`BitEvent`] for every bit handed out by the source.
//!
//! # Example
//!
//! ```
//! use oxiprefix_core::bitstream::BitSource;
//! use oxiprefix_core::trace::{BitEvent, StderrTrace};
//! use std::io::Cursor;
//!
//! // Print every bit to standard error.
//! let mut source = BitSource::with_trace(Cursor::new(vec![0x80]), StderrTrace);
//! assert_eq!(source.read().unwrap(), Some(1));
//!
//! // Or collect events with a closure.
//! let mut ones = 0;
//! let mut source = BitSource::with_trace(Cursor::new(vec![0xF0]), move |e: &BitEvent| {
//!     ones += e.bit;
//! });
//! while source.read().unwrap().is_some() {}
//! ```

use std::fmt;

/// A single bit read from a [`BitSource`](crate::bitstream::BitSource).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitEvent {
    /// Zero-based position of the bit in the stream.
    pub position: u64,
    /// Mask selecting the bit inside its byte (`0x80` for the first bit).
    pub mask: u8,
    /// The bit value (0 or 1).
    pub bit: u8,
}

impl fmt::Display for BitEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "bit {} mask {:#04x} -> {}",
            self.position, self.mask, self.bit
        )
    }
}

/// Receiver of bit-level trace events.
pub trait BitTrace {
    /// Called once for each bit read.
    fn on_bit(&mut self, event: &BitEvent);
}

impl<F: FnMut(&BitEvent)> BitTrace for F {
    fn on_bit(&mut self, event: &BitEvent) {
        self(event)
    }
}

/// Trace hook that prints every event to standard error.
#[derive(Debug, Default, Clone, Copy)]
pub struct StderrTrace;

impl BitTrace for StderrTrace {
    fn on_bit(&mut self, event: &BitEvent) {
        eprintln!("[bitstream] {event}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_display() {
        let event = BitEvent {
            position: 9,
            mask: 0x40,
            bit: 1,
        };
        assert_eq!(event.to_string(), "bit 9 mask 0x40 -> 1");
    }

    #[test]
    fn test_closure_hook() {
        let mut seen = Vec::new();
        {
            let mut hook = |e: &BitEvent| seen.push(e.bit);
            hook.on_bit(&BitEvent {
                position: 0,
                mask: 0x80,
                bit: 1,
            });
        }
        assert_eq!(seen, vec![1]);
    }
}
