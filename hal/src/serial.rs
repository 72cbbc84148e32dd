//! Serial byte device abstraction
//!
//! The terminal talks to the outside world through a character device:
//! one side yields input bytes, the other accepts output bytes.
//!
//! ## Design
//!
//! The interface is minimal:
//! - Poll-based input (no interrupts, no blocking)
//! - Byte-at-a-time output with convenience helpers
//! - Decoding into key events happens above this layer

use std::collections::VecDeque;
use thiserror::Error;

/// ANSI "clear screen, cursor home" sequence
pub const CLEAR_AND_HOME: &[u8] = b"\x1B[2J\x1B[H";

/// Backspace, space, backspace: erases the previous glyph on a dumb terminal
pub const DESTRUCTIVE_BACKSPACE: &[u8] = b"\x08 \x08";

/// Errors reported by an output device
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SerialError {
    /// The device went away
    #[error("Serial device disconnected")]
    Disconnected,

    /// Underlying I/O failure
    #[error("Serial I/O error: {0}")]
    Io(String),
}

/// Input side of a character device
///
/// ## Implementation Notes
///
/// - **Non-blocking**: `get_byte()` returns `None` when no data is waiting
/// - **Stateless**: the device does not interpret escape sequences
pub trait ByteSource {
    /// Tries to take one byte from the device
    fn get_byte(&mut self) -> Option<u8>;

    /// Returns true once the device will never yield data again
    ///
    /// Hardware UARTs never close; host adapters close on end of input.
    fn is_closed(&self) -> bool {
        false
    }
}

/// Output side of a character device
pub trait ByteSink {
    /// Writes one byte
    fn put_byte(&mut self, byte: u8) -> Result<(), SerialError>;

    /// Writes a run of bytes
    fn put_bytes(&mut self, bytes: &[u8]) -> Result<(), SerialError> {
        for &byte in bytes {
            self.put_byte(byte)?;
        }
        Ok(())
    }

    /// Writes a string's bytes
    fn put_str(&mut self, s: &str) -> Result<(), SerialError> {
        self.put_bytes(s.as_bytes())
    }

    /// Pushes buffered output to the device
    fn flush(&mut self) -> Result<(), SerialError> {
        Ok(())
    }
}

impl ByteSink for Vec<u8> {
    fn put_byte(&mut self, byte: u8) -> Result<(), SerialError> {
        self.push(byte);
        Ok(())
    }

    fn put_bytes(&mut self, bytes: &[u8]) -> Result<(), SerialError> {
        self.extend_from_slice(bytes);
        Ok(())
    }
}

/// In-memory byte source
///
/// Replays a fixed byte sequence; closes once drained.
#[derive(Debug, Clone, Default)]
pub struct ScriptedSource {
    bytes: VecDeque<u8>,
}

impl ScriptedSource {
    pub fn new(bytes: impl Into<VecDeque<u8>>) -> Self {
        Self {
            bytes: bytes.into(),
        }
    }

    /// Queues more input
    pub fn push_bytes(&mut self, bytes: &[u8]) {
        self.bytes.extend(bytes.iter().copied());
    }

    /// Number of bytes still pending
    pub fn remaining(&self) -> usize {
        self.bytes.len()
    }
}

impl ByteSource for ScriptedSource {
    fn get_byte(&mut self) -> Option<u8> {
        self.bytes.pop_front()
    }

    fn is_closed(&self) -> bool {
        self.bytes.is_empty()
    }
}
