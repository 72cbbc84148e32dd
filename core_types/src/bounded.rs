//! Bounded byte strings
//!
//! Every fixed-capacity text field in the terminal (desktop names, the
//! input line, file names, file contents, the editor buffer) is a
//! `BoundedBytes<N>`. Writes past the capacity are dropped without error.

use std::fmt;

/// Returns the longest prefix of `bytes` that fits in `capacity`
///
/// This is the single truncation rule used everywhere: keep the first
/// `capacity` bytes, drop the rest, report nothing.
pub fn truncate(bytes: &[u8], capacity: usize) -> &[u8] {
    &bytes[..bytes.len().min(capacity)]
}

/// A byte string holding at most `N` bytes
#[derive(Clone, PartialEq, Eq, Hash, Default)]
pub struct BoundedBytes<const N: usize> {
    bytes: Vec<u8>,
}

impl<const N: usize> BoundedBytes<N> {
    /// Maximum number of bytes this string can hold
    pub const CAPACITY: usize = N;

    /// Creates an empty string
    pub fn new() -> Self {
        Self { bytes: Vec::new() }
    }

    /// Creates a string from the first `N` bytes of `bytes`
    pub fn from_truncated(bytes: &[u8]) -> Self {
        Self {
            bytes: truncate(bytes, N).to_vec(),
        }
    }

    /// Replaces the whole content, truncating to capacity
    ///
    /// Returns the number of bytes actually stored.
    pub fn set(&mut self, bytes: &[u8]) -> usize {
        self.bytes.clear();
        self.bytes.extend_from_slice(truncate(bytes, N));
        self.bytes.len()
    }

    /// Appends one byte
    ///
    /// Returns false (and stores nothing) when the string is full.
    pub fn push(&mut self, byte: u8) -> bool {
        if self.is_full() {
            return false;
        }
        self.bytes.push(byte);
        true
    }

    /// Removes and returns the last byte
    pub fn pop(&mut self) -> Option<u8> {
        self.bytes.pop()
    }

    pub fn clear(&mut self) {
        self.bytes.clear();
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.bytes.len() >= N
    }

    /// Exact byte-for-byte comparison
    pub fn eq_bytes(&self, other: &[u8]) -> bool {
        self.bytes == other
    }

    pub fn starts_with(&self, prefix: &[u8]) -> bool {
        self.bytes.starts_with(prefix)
    }
}

impl<const N: usize> fmt::Display for BoundedBytes<N> {
    /// Renders each byte as a Latin-1 character
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &byte in &self.bytes {
            write!(f, "{}", byte as char)?;
        }
        Ok(())
    }
}

impl<const N: usize> fmt::Debug for BoundedBytes<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BoundedBytes<{}>({:?})", N, self.to_string())
    }
}

impl<const N: usize> From<&str> for BoundedBytes<N> {
    fn from(s: &str) -> Self {
        Self::from_truncated(s.as_bytes())
    }
}

impl<const N: usize> From<&[u8]> for BoundedBytes<N> {
    fn from(bytes: &[u8]) -> Self {
        Self::from_truncated(bytes)
    }
}

impl<const N: usize> AsRef<[u8]> for BoundedBytes<N> {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}
