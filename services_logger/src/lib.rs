//! # Logger Service
//!
//! This crate implements structured logging for the terminal.
//!
//! ## Philosophy
//!
//! Logging is explicit and structured, not text-based or printf-style.
//! Entries are kept in a bounded in-memory ring; the host decides whether
//! and where to print them. Nothing here writes to the serial device.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;

/// Default number of entries retained
pub const DEFAULT_LOG_CAPACITY: usize = 256;

/// Log level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub enum LogLevel {
    /// Debug information
    Debug,
    /// Informational messages
    #[default]
    Info,
    /// Warnings
    Warn,
    /// Errors
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Debug => write!(f, "DEBUG"),
            LogLevel::Info => write!(f, "INFO"),
            LogLevel::Warn => write!(f, "WARN"),
            LogLevel::Error => write!(f, "ERROR"),
        }
    }
}

/// A structured log entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Monotonic sequence number
    pub seq: u64,
    /// Log level
    pub level: LogLevel,
    /// Subsystem that produced the entry
    pub source: Option<String>,
    /// Log message
    pub message: String,
    /// Structured fields
    pub fields: Vec<(String, String)>,
}

impl LogEntry {
    /// Creates a new log entry
    pub fn new(level: LogLevel, message: impl Into<String>) -> Self {
        Self {
            seq: 0,
            level,
            source: None,
            message: message.into(),
            fields: Vec::new(),
        }
    }

    /// Sets the source subsystem
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Adds a field to the log entry
    pub fn with_field(mut self, key: impl Into<String>, value: impl fmt::Display) -> Self {
        self.fields.push((key.into(), value.to_string()));
        self
    }

    /// Looks up a field value by key
    pub fn field(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} {}", self.seq, self.level)?;
        if let Some(source) = &self.source {
            write!(f, " [{}]", source)?;
        }
        write!(f, " {}", self.message)?;
        for (key, value) in &self.fields {
            write!(f, " {}={}", key, value)?;
        }
        Ok(())
    }
}

/// Bounded log ring
///
/// Oldest entries are evicted once `capacity` is reached. Entries below
/// `min_level` are dropped on arrival.
#[derive(Debug, Clone)]
pub struct Logger {
    entries: VecDeque<LogEntry>,
    capacity: usize,
    min_level: LogLevel,
    next_seq: u64,
}

impl Logger {
    /// Creates a logger keeping at most `capacity` entries
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity.min(DEFAULT_LOG_CAPACITY)),
            capacity,
            min_level: LogLevel::Info,
            next_seq: 0,
        }
    }

    /// Sets the lowest level that is recorded
    pub fn with_min_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }

    pub fn min_level(&self) -> LogLevel {
        self.min_level
    }

    /// Records an entry
    pub fn log(&mut self, mut entry: LogEntry) {
        if entry.level < self.min_level || self.capacity == 0 {
            return;
        }
        entry.seq = self.next_seq;
        self.next_seq += 1;
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    pub fn debug(&mut self, source: &str, message: impl Into<String>) {
        self.log(LogEntry::new(LogLevel::Debug, message).with_source(source));
    }

    pub fn info(&mut self, source: &str, message: impl Into<String>) {
        self.log(LogEntry::new(LogLevel::Info, message).with_source(source));
    }

    pub fn warn(&mut self, source: &str, message: impl Into<String>) {
        self.log(LogEntry::new(LogLevel::Warn, message).with_source(source));
    }

    pub fn error(&mut self, source: &str, message: impl Into<String>) {
        self.log(LogEntry::new(LogLevel::Error, message).with_source(source));
    }

    /// Retained entries, oldest first
    pub fn entries(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }

    /// Retained entries at or above `level`
    pub fn entries_at_least(&self, level: LogLevel) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter().filter(move |e| e.level >= level)
    }

    /// Most recent entry
    pub fn last(&self) -> Option<&LogEntry> {
        self.entries.back()
    }

    /// Removes and returns every retained entry
    pub fn drain(&mut self) -> Vec<LogEntry> {
        self.entries.drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new(DEFAULT_LOG_CAPACITY)
    }
}
