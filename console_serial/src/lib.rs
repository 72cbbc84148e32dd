//! # Serial Text Console
//!
//! This crate provides the per-desktop screen: an output sink that buffers
//! bytes until the host pushes them to the serial device.
//!
//! ## Philosophy
//!
//! This is NOT a terminal emulator. The only escape sequence it ever emits
//! is clear-and-home; everything else is bytes in, bytes out.
//!
//! ## Design Principles
//!
//! 1. **Components never touch the device**: handlers draw into a `Screen`,
//!    the host decides when pending output reaches the wire
//! 2. **Testable**: pending output is inspectable and takeable
//! 3. **Bounded by the host**: nothing is kept once it has been flushed
//! 4. **Infallible drawing**: buffering cannot fail, only flushing can

use core::fmt;
use hal::{ByteSink, SerialError, CLEAR_AND_HOME, DESTRUCTIVE_BACKSPACE};

/// Output sink for one desktop
#[derive(Debug, Clone, Default)]
pub struct Screen {
    /// Bytes not yet flushed to the device
    pending: Vec<u8>,
}

impl Screen {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draws one byte
    pub fn putc(&mut self, byte: u8) {
        self.pending.push(byte);
    }

    /// Draws a run of bytes
    pub fn put_bytes(&mut self, bytes: &[u8]) {
        self.pending.extend_from_slice(bytes);
    }

    /// Draws a string
    pub fn puts(&mut self, s: &str) {
        self.put_bytes(s.as_bytes());
    }

    /// Clears the terminal and homes the cursor
    pub fn clear(&mut self) {
        self.put_bytes(CLEAR_AND_HOME);
    }

    /// Erases the glyph left of the cursor
    pub fn backspace(&mut self) {
        self.put_bytes(DESTRUCTIVE_BACKSPACE);
    }

    /// Output waiting for the device
    pub fn pending(&self) -> &[u8] {
        &self.pending
    }

    /// Pending output rendered as text, one char per byte
    pub fn pending_text(&self) -> String {
        self.pending.iter().map(|&b| b as char).collect()
    }

    /// Takes the pending output, leaving it empty
    pub fn take_pending(&mut self) -> Vec<u8> {
        core::mem::take(&mut self.pending)
    }

    /// Writes pending output to `sink`
    ///
    /// On failure the output stays pending.
    pub fn flush_to<S: ByteSink + ?Sized>(&mut self, sink: &mut S) -> Result<(), SerialError> {
        if self.pending.is_empty() {
            return Ok(());
        }
        sink.put_bytes(&self.pending)?;
        sink.flush()?;
        self.pending.clear();
        Ok(())
    }
}

impl fmt::Write for Screen {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.puts(s);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::fmt::Write;

    #[test]
    fn test_puts_buffers_output() {
        let mut screen = Screen::new();
        screen.puts("[Desktop 1]$ ");
        screen.putc(b'x');
        assert_eq!(screen.pending(), b"[Desktop 1]$ x");
        assert_eq!(screen.pending_text(), "[Desktop 1]$ x");
    }

    #[test]
    fn test_clear_emits_sequence() {
        let mut screen = Screen::new();
        screen.puts("old");
        screen.clear();
        assert_eq!(screen.pending(), b"old\x1b[2J\x1b[H");
    }

    #[test]
    fn test_backspace_is_destructive() {
        let mut screen = Screen::new();
        screen.backspace();
        assert_eq!(screen.pending(), b"\x08 \x08");
    }

    #[test]
    fn test_flush_moves_pending_to_sink() {
        let mut screen = Screen::new();
        screen.puts("hello");
        let mut sink: Vec<u8> = Vec::new();
        screen.flush_to(&mut sink).unwrap();

        assert_eq!(sink, b"hello".to_vec());
        assert!(screen.pending().is_empty());
    }

    #[test]
    fn test_flushed_output_is_not_retained() {
        let mut screen = Screen::new();
        let mut sink: Vec<u8> = Vec::new();
        let line = "Desktop: Desktop 1\nIndex: 1 of 2\n";
        for _ in 0..2000 {
            screen.puts(line);
            screen.flush_to(&mut sink).unwrap();
            assert!(screen.pending().is_empty());
        }
        assert_eq!(sink.len(), 2000 * line.len());
        assert_eq!(screen.pending_text(), "");
    }

    struct BrokenSink;

    impl ByteSink for BrokenSink {
        fn put_byte(&mut self, _byte: u8) -> Result<(), SerialError> {
            Err(SerialError::Disconnected)
        }
    }

    #[test]
    fn test_failed_flush_keeps_output() {
        let mut screen = Screen::new();
        screen.puts("keep");
        assert_eq!(screen.flush_to(&mut BrokenSink), Err(SerialError::Disconnected));
        assert_eq!(screen.pending(), b"keep");
    }

    #[test]
    fn test_take_pending() {
        let mut screen = Screen::new();
        screen.puts("a");
        assert_eq!(screen.take_pending(), b"a".to_vec());
        assert!(screen.pending().is_empty());
    }

    #[test]
    fn test_fmt_write() {
        let mut screen = Screen::new();
        write!(screen, "Index: {} of {}", 1, 2).unwrap();
        assert_eq!(screen.pending_text(), "Index: 1 of 2");
    }
}
