//! Editor session state machine
//!
//! A single append-only edit buffer bound to a file name. The session never
//! touches storage itself: saving is requested through [`EditorAction`] and
//! performed by the host, which calls [`EditorSession::mark_saved`] on
//! success.

use console_serial::Screen;
use core_types::BoundedBytes;
use input_types::{Key, KeyEvent};

use crate::action::EditorAction;

/// Largest buffer the editor holds, in bytes
pub const EDITOR_BUFFER_SIZE: usize = 2048;
/// Longest file name the editor tracks, in bytes
pub const EDITOR_FILENAME_SIZE: usize = 32;

pub type EditorFilename = BoundedBytes<EDITOR_FILENAME_SIZE>;
pub type EditorBuffer = BoundedBytes<EDITOR_BUFFER_SIZE>;

/// The editor session
#[derive(Debug, Clone, Default)]
pub struct EditorSession {
    filename: EditorFilename,
    buffer: EditorBuffer,
    modified: bool,
}

impl EditorSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds the session to a file name (truncated to 32 bytes)
    pub fn set_filename(&mut self, name: &[u8]) {
        self.filename.set(name);
    }

    pub fn filename(&self) -> &EditorFilename {
        &self.filename
    }

    /// Replaces the buffer with `content`
    ///
    /// Content beyond the buffer size is dropped. The cursor moves to the end
    /// and the session is considered unmodified.
    pub fn load_content(&mut self, content: &[u8]) {
        self.buffer.set(content);
        self.modified = false;
    }

    /// Empties the buffer for a file that does not exist yet
    pub fn clear(&mut self) {
        self.load_content(&[]);
    }

    pub fn content(&self) -> &[u8] {
        self.buffer.as_bytes()
    }

    /// Insertion point; edits only ever happen at the end of the buffer
    pub fn cursor(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// Clears the modified flag after a successful write
    pub fn mark_saved(&mut self) {
        self.modified = false;
    }

    /// Draws the full editor view
    pub fn render(&self, screen: &mut Screen) {
        screen.clear();
        screen.puts("=== Editor: ");
        screen.put_bytes(self.filename.as_bytes());
        screen.puts(" ===\n");
        screen.puts("Ctrl+S: Save | Ctrl+X: Save & Quit | Ctrl+Q: Quit\n");
        screen.puts("---\n");
        screen.put_bytes(self.buffer.as_bytes());
        screen.puts("\n---\n");
    }

    /// Applies one key, echoing any change to `screen`
    pub fn handle_key(&mut self, event: &KeyEvent, screen: &mut Screen) -> EditorAction {
        if event.is_ctrl_letter(b's') {
            return EditorAction::Save;
        }
        if event.is_ctrl_letter(b'x') {
            return EditorAction::SaveAndQuit;
        }
        if event.is_ctrl_letter(b'q') {
            return EditorAction::Quit;
        }

        match event.key {
            Key::Char(byte) if !event.is_ctrl() => self.insert(byte, screen),
            Key::Enter => self.insert(b'\n', screen),
            Key::Backspace => {
                if self.buffer.pop().is_some() {
                    screen.backspace();
                    self.modified = true;
                }
            }
            _ => {}
        }

        EditorAction::Continue
    }

    fn insert(&mut self, byte: u8, screen: &mut Screen) {
        if self.buffer.push(byte) {
            screen.putc(byte);
            self.modified = true;
        }
    }
}
