//! # Input Script Parser
//!
//! A line-based key script, expanded to the raw bytes a serial terminal
//! would send. Scripts drive the host deterministically in tests and demos.
//!
//! ## Format
//!
//! Each line is one input action:
//! - Key names: `Enter`, `Escape`, `Backspace`, `Tab`, `Space`
//! - Arrow keys: `Up`, `Down`, `Left`, `Right`
//! - Modifiers: `Ctrl+s`, `Ctrl+Right`
//! - Single characters: `a`, `Z`, `?`
//! - Text strings: `"touch foo"` (one byte per character)
//! - Raw bytes: `0x1b`
//! - Comments: `# This is a comment`
//!
//! ## Example
//!
//! ```text
//! # Create a file and list it
//! "touch notes"
//! Enter
//! "ls"
//! Enter
//! Ctrl+Right
//! ```

use hal::ScriptedSource;
use thiserror::Error;

/// Input script error types
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputScriptError {
    #[error("Invalid key name: {0}")]
    InvalidKeyName(String),

    #[error("Invalid modifier: {0}")]
    InvalidModifier(String),

    #[error("Parse error at line {line}: {message}")]
    ParseError { line: usize, message: String },

    #[error("Empty script")]
    EmptyScript,

    #[error("Invalid byte literal: {0}")]
    InvalidByte(String),
}

/// A parsed script: the byte stream it expands to
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputScript {
    bytes: Vec<u8>,
}

impl InputScript {
    /// Parses a script from text
    pub fn from_text(text: &str) -> Result<Self, InputScriptError> {
        let mut bytes = Vec::new();

        for (line_num, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let parsed = Self::parse_line(line).map_err(|e| match e {
                InputScriptError::InvalidModifier(_) => e,
                other => InputScriptError::ParseError {
                    line: line_num + 1,
                    message: other.to_string(),
                },
            })?;
            bytes.extend(parsed);
        }

        if bytes.is_empty() {
            return Err(InputScriptError::EmptyScript);
        }

        Ok(Self { bytes })
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Turns the script into a byte source for the host loop
    pub fn into_source(self) -> ScriptedSource {
        ScriptedSource::new(self.bytes)
    }

    fn parse_line(line: &str) -> Result<Vec<u8>, InputScriptError> {
        if line.len() >= 2 && line.starts_with('"') && line.ends_with('"') {
            return Ok(line[1..line.len() - 1].bytes().collect());
        }

        if let Some(hex) = line.strip_prefix("0x") {
            return u8::from_str_radix(hex, 16)
                .map(|b| vec![b])
                .map_err(|_| InputScriptError::InvalidByte(line.to_string()));
        }

        match line.split_once('+') {
            Some((modifier, key)) if !key.is_empty() => {
                match modifier.trim().to_lowercase().as_str() {
                    "ctrl" | "control" => Self::ctrl_key(key.trim()),
                    other => Err(InputScriptError::InvalidModifier(other.to_string())),
                }
            }
            _ => Self::plain_key(line),
        }
    }

    fn plain_key(name: &str) -> Result<Vec<u8>, InputScriptError> {
        let bytes: &[u8] = match name.to_lowercase().as_str() {
            "enter" | "return" => b"\r",
            // A lone ESC only decodes once the next byte arrives; a second
            // ESC completes it without producing a key of its own.
            "escape" | "esc" => b"\x1b\x1b",
            "backspace" | "back" => b"\x7f",
            "tab" => b"\t",
            "space" => b" ",
            "up" | "arrowup" => b"\x1b[A",
            "down" | "arrowdown" => b"\x1b[B",
            "right" | "arrowright" => b"\x1b[C",
            "left" | "arrowleft" => b"\x1b[D",
            _ if name.len() == 1 => return Ok(name.as_bytes().to_vec()),
            _ => return Err(InputScriptError::InvalidKeyName(name.to_string())),
        };
        Ok(bytes.to_vec())
    }

    fn ctrl_key(name: &str) -> Result<Vec<u8>, InputScriptError> {
        let bytes: &[u8] = match name.to_lowercase().as_str() {
            "up" | "arrowup" => b"\x1b[1;5A",
            "down" | "arrowdown" => b"\x1b[1;5B",
            "right" | "arrowright" => b"\x1b[1;5C",
            "left" | "arrowleft" => b"\x1b[1;5D",
            _ => match name.as_bytes() {
                [letter] if letter.is_ascii_alphabetic() => {
                    return Ok(vec![letter.to_ascii_lowercase() & 0x1F])
                }
                _ => return Err(InputScriptError::InvalidKeyName(name.to_string())),
            },
        };
        Ok(bytes.to_vec())
    }
}
