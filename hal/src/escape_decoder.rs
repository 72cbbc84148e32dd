//! Byte stream to KeyEvent decoding
//!
//! Translates raw terminal input bytes into structured key events.
//!
//! ## Protocol
//!
//! - `ESC [ A|B|C|D` → Up / Down / Right / Left
//! - `ESC [ 1 ; 5 A|B|C|D` → the same arrows with Ctrl held
//! - bare `ESC` followed by anything but `[` → Escape (the follower is consumed)
//! - `0x0A` / `0x0D` → Enter, `0x08` / `0x7F` → Backspace
//! - other bytes below `0x20` → Ctrl-flagged characters
//!
//! The decoder is fed one byte at a time and produces at most one event per byte.

use input_types::{Key, KeyEvent, Modifiers};

const ESC: u8 = 0x1B;

/// Position inside an escape sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DecoderState {
    #[default]
    Idle,
    /// Saw `ESC`
    SawEscape,
    /// Saw `ESC [`
    SawBracket,
    /// Saw `ESC [ 1`
    SawBracketOne,
    /// Saw `ESC [ 1 ;`
    SawBracketOneSemicolon,
    /// Saw `ESC [ 1 ; 5`
    SawBracketOneSemicolonFive,
}

/// Incremental key decoder
///
/// Holds the escape-sequence state between bytes.
#[derive(Debug, Clone, Default)]
pub struct KeyDecoder {
    state: DecoderState,
    /// Meta modifier source. Nothing on a serial line reports a meta key,
    /// so this stays false; events still carry it.
    meta_pressed: bool,
}

impl KeyDecoder {
    /// Creates a decoder in the idle state
    pub fn new() -> Self {
        Self::default()
    }

    /// Current escape-sequence state
    pub fn state(&self) -> DecoderState {
        self.state
    }

    /// Current meta flag
    pub fn meta_flag(&self) -> bool {
        self.meta_pressed
    }

    /// Abandons any partial sequence
    pub fn reset(&mut self) {
        self.state = DecoderState::Idle;
    }

    /// Feeds one input byte
    ///
    /// Returns `None` while a sequence is in progress.
    pub fn poll_byte(&mut self, byte: u8) -> Option<KeyEvent> {
        match self.state {
            DecoderState::Idle => {
                if byte == ESC {
                    self.state = DecoderState::SawEscape;
                    return None;
                }
                Some(self.decode_char(byte))
            }
            DecoderState::SawEscape => {
                self.state = DecoderState::Idle;
                if byte == b'[' {
                    self.state = DecoderState::SawBracket;
                    return None;
                }
                // The byte after a lone ESC is swallowed, not replayed.
                Some(KeyEvent::plain(Key::Escape))
            }
            DecoderState::SawBracket => {
                if byte == b'1' {
                    self.state = DecoderState::SawBracketOne;
                    return None;
                }
                self.state = DecoderState::Idle;
                Some(self.arrow_event(byte, false))
            }
            DecoderState::SawBracketOne => {
                if byte == b';' {
                    self.state = DecoderState::SawBracketOneSemicolon;
                    return None;
                }
                self.state = DecoderState::Idle;
                Some(self.decode_char(byte))
            }
            DecoderState::SawBracketOneSemicolon => {
                if byte == b'5' {
                    self.state = DecoderState::SawBracketOneSemicolonFive;
                    return None;
                }
                self.state = DecoderState::Idle;
                Some(self.decode_char(byte))
            }
            DecoderState::SawBracketOneSemicolonFive => {
                self.state = DecoderState::Idle;
                Some(self.arrow_event(byte, true))
            }
        }
    }

    /// Feeds a run of bytes, collecting every event produced
    pub fn decode_all(&mut self, bytes: &[u8]) -> Vec<KeyEvent> {
        bytes.iter().filter_map(|&b| self.poll_byte(b)).collect()
    }

    fn arrow_event(&self, byte: u8, ctrl: bool) -> KeyEvent {
        let key = final_byte_to_key(byte);
        KeyEvent::new(key, Modifiers::from_flags(self.meta_pressed, ctrl, false))
    }

    /// Decodes a byte that is not part of an escape sequence
    fn decode_char(&self, byte: u8) -> KeyEvent {
        match byte {
            0x0A | 0x0D => KeyEvent::plain(Key::Enter),
            0x08 | 0x7F => KeyEvent::plain(Key::Backspace),
            c if c < 0x20 => KeyEvent::ctrl(Key::Char(c)),
            c => KeyEvent::new(
                Key::Char(c),
                Modifiers::from_flags(self.meta_pressed, false, c.is_ascii_uppercase()),
            ),
        }
    }
}

/// Maps the final byte of a cursor sequence to an arrow key
pub fn final_byte_to_key(byte: u8) -> Key {
    match byte {
        b'A' => Key::Up,
        b'B' => Key::Down,
        b'C' => Key::Right,
        b'D' => Key::Left,
        _ => Key::Unknown,
    }
}
