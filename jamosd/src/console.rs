//! Host character devices
//!
//! Adapts process stdio to the HAL byte traits. Input is read on a helper
//! thread and handed over a channel so polling never blocks. When stdin is
//! a terminal it is switched to raw mode, so every key arrives as typed.

use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use crossterm::tty::IsTty;
use hal::{ByteSink, ByteSource, SerialError};
use std::io::{self, Read, Write};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

/// Byte that ends an interactive raw-mode session (Ctrl+])
pub const EXIT_BYTE: u8 = 0x1D;

/// Keeps the host terminal in raw mode until dropped
#[derive(Debug)]
pub struct RawModeGuard {
    _private: (),
}

impl RawModeGuard {
    /// Enables raw mode if stdin is a terminal
    ///
    /// Returns `None` for pipes and files, which are already unbuffered
    /// byte streams.
    pub fn enable() -> io::Result<Option<Self>> {
        if !io::stdin().is_tty() {
            return Ok(None);
        }
        enable_raw_mode()?;
        Ok(Some(Self { _private: () }))
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
    }
}

/// Byte source fed by a reader thread
#[derive(Debug)]
pub struct ReaderSource {
    rx: Receiver<u8>,
    closed: bool,
}

impl ReaderSource {
    /// Starts a thread draining `reader` byte by byte
    pub fn spawn<R: Read + Send + 'static>(reader: R) -> Self {
        Self::spawn_until(reader, None)
    }

    /// Like [`ReaderSource::spawn`], but the source closes when `stop` is read
    ///
    /// The stop byte itself is never delivered.
    pub fn spawn_until<R: Read + Send + 'static>(reader: R, stop: Option<u8>) -> Self {
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            for byte in reader.bytes() {
                match byte {
                    Ok(b) if Some(b) == stop => break,
                    Ok(b) => {
                        if tx.send(b).is_err() {
                            break;
                        }
                    }
                    Err(_) => break,
                }
            }
        });
        Self { rx, closed: false }
    }

    /// Reads process stdin
    pub fn stdin() -> Self {
        Self::spawn(io::stdin())
    }

    /// Reads a raw-mode terminal, closing on [`EXIT_BYTE`]
    pub fn raw_stdin() -> Self {
        Self::spawn_until(io::stdin(), Some(EXIT_BYTE))
    }
}

impl ByteSource for ReaderSource {
    fn get_byte(&mut self) -> Option<u8> {
        match self.rx.try_recv() {
            Ok(b) => Some(b),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                self.closed = true;
                None
            }
        }
    }

    fn is_closed(&self) -> bool {
        self.closed
    }
}

/// Byte sink over any writer
#[derive(Debug)]
pub struct WriterSink<W: Write> {
    writer: W,
    /// Expand `\n` to `\r\n`; a raw-mode tty no longer does it
    crlf: bool,
}

impl<W: Write> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            crlf: false,
        }
    }

    pub fn with_crlf(mut self, crlf: bool) -> Self {
        self.crlf = crlf;
        self
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl WriterSink<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

fn io_error(err: io::Error) -> SerialError {
    match err.kind() {
        io::ErrorKind::BrokenPipe => SerialError::Disconnected,
        _ => SerialError::Io(err.to_string()),
    }
}

impl<W: Write> ByteSink for WriterSink<W> {
    fn put_byte(&mut self, byte: u8) -> Result<(), SerialError> {
        self.put_bytes(&[byte])
    }

    fn put_bytes(&mut self, bytes: &[u8]) -> Result<(), SerialError> {
        if !self.crlf {
            return self.writer.write_all(bytes).map_err(io_error);
        }
        for chunk in bytes.split_inclusive(|&b| b == b'\n') {
            match chunk.strip_suffix(b"\n") {
                Some(line) => {
                    self.writer.write_all(line).map_err(io_error)?;
                    self.writer.write_all(b"\r\n").map_err(io_error)?;
                }
                None => self.writer.write_all(chunk).map_err(io_error)?,
            }
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<(), SerialError> {
        self.writer.flush().map_err(io_error)
    }
}
