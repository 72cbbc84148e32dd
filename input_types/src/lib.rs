#![no_std]

//! # Input Types
//!
//! This crate defines the key event types shared by the Jamos terminal.
//!
//! ## Philosophy
//!
//! - **Events, not bytes**: Handlers see structured key events, never raw escape sequences
//! - **Bytes, not text**: The alphabet is raw 8-bit bytes, there is no Unicode layer
//! - **Testable**: Events are serializable and can be injected for testing
//!
//! ## Non-Goals
//!
//! This is NOT:
//! - Raw hardware scan codes (PS/2, USB HID)
//! - A terminal emulator
//! - Global keyboard state

extern crate alloc;

use alloc::vec::Vec;
use core::fmt;
use serde::{Deserialize, Serialize};

/// Logical key decoded from the input byte stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    /// A single byte, printable or control
    Char(u8),
    Enter,
    Backspace,
    Escape,

    // Arrow keys
    Up,
    Down,
    Left,
    Right,

    /// Escape sequence that did not map to a known key
    Unknown,
}

impl Key {
    /// Returns the byte carried by a `Char` key
    pub fn as_byte(&self) -> Option<u8> {
        match self {
            Key::Char(byte) => Some(*byte),
            _ => None,
        }
    }

    /// Returns true for the four arrow keys
    pub fn is_arrow(&self) -> bool {
        matches!(self, Key::Up | Key::Down | Key::Left | Key::Right)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Char(byte) if byte.is_ascii_graphic() => write!(f, "'{}'", *byte as char),
            Key::Char(byte) => write!(f, "0x{:02X}", byte),
            other => write!(f, "{:?}", other),
        }
    }
}

/// Keyboard event
///
/// One decoded key plus the modifier flags that accompanied it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyEvent {
    /// The decoded key
    pub key: Key,
    /// Modifier keys that were active
    pub modifiers: Modifiers,
}

impl KeyEvent {
    /// Creates a new key event
    pub fn new(key: Key, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }

    /// Creates a key event without modifiers
    pub fn plain(key: Key) -> Self {
        Self::new(key, Modifiers::none())
    }

    /// Creates a Ctrl-modified key event
    pub fn ctrl(key: Key) -> Self {
        Self::new(key, Modifiers::CTRL)
    }

    /// Creates a character event with no modifiers
    pub fn char(byte: u8) -> Self {
        Self::plain(Key::Char(byte))
    }

    pub fn is_ctrl(&self) -> bool {
        self.modifiers.is_ctrl()
    }

    pub fn is_shift(&self) -> bool {
        self.modifiers.is_shift()
    }

    pub fn is_meta(&self) -> bool {
        self.modifiers.is_meta()
    }

    /// Returns true if this is Ctrl plus the given letter
    ///
    /// Matches the letter in either case, and also the raw control byte a
    /// terminal sends for that chord (Ctrl+S arrives as 0x13).
    pub fn is_ctrl_letter(&self, letter: u8) -> bool {
        if !self.is_ctrl() {
            return false;
        }
        let letter = letter.to_ascii_lowercase();
        match self.key {
            Key::Char(byte) => {
                byte.to_ascii_lowercase() == letter || byte == (letter & 0x1F)
            }
            _ => false,
        }
    }

    /// Returns true if this is Ctrl plus the given key (arrows etc.)
    pub fn is_ctrl_key(&self, key: Key) -> bool {
        self.is_ctrl() && self.key == key
    }
}

/// Modifier keys
///
/// Bitflags representing modifier key states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Modifiers {
    bits: u8,
}

impl Modifiers {
    /// No modifiers
    pub const NONE: Self = Self { bits: 0 };
    /// Control key
    pub const CTRL: Self = Self { bits: 1 << 0 };
    /// Shift key
    pub const SHIFT: Self = Self { bits: 1 << 1 };
    /// Meta/Super/Windows key
    pub const META: Self = Self { bits: 1 << 2 };

    /// Creates a new modifier set with no modifiers
    pub fn none() -> Self {
        Self::NONE
    }

    /// Builds a modifier set from the three independent flags
    pub fn from_flags(meta: bool, ctrl: bool, shift: bool) -> Self {
        let mut mods = Self::none();
        if meta {
            mods = mods.with(Self::META);
        }
        if ctrl {
            mods = mods.with(Self::CTRL);
        }
        if shift {
            mods = mods.with(Self::SHIFT);
        }
        mods
    }

    /// Returns the raw bits
    pub fn bits(&self) -> u8 {
        self.bits
    }

    /// Adds a modifier
    pub fn with(mut self, other: Modifiers) -> Self {
        self.bits |= other.bits;
        self
    }

    /// Checks if a modifier is present
    pub fn contains(&self, other: Modifiers) -> bool {
        (self.bits & other.bits) == other.bits
    }

    pub fn is_ctrl(&self) -> bool {
        self.contains(Self::CTRL)
    }

    pub fn is_shift(&self) -> bool {
        self.contains(Self::SHIFT)
    }

    pub fn is_meta(&self) -> bool {
        self.contains(Self::META)
    }

    /// Returns true if no modifiers are pressed
    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }
}

impl Default for Modifiers {
    fn default() -> Self {
        Self::none()
    }
}

impl fmt::Display for Modifiers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "none");
        }

        let mut parts = Vec::new();
        if self.is_ctrl() {
            parts.push("Ctrl");
        }
        if self.is_shift() {
            parts.push("Shift");
        }
        if self.is_meta() {
            parts.push("Meta");
        }
        write!(f, "{}", parts.join("+"))
    }
}
