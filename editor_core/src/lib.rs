//! # Editor Core
//!
//! Line-mode editor shared by every desktop.
//!
//! ## Philosophy
//!
//! - **One session system-wide**: opening a file replaces whatever was being edited
//! - **Append-only**: keys add to or remove from the end of the buffer
//! - **No ambient authority**: saving is a request returned to the host, never a direct write
//!
//! ## Design
//!
//! The core provides:
//! - EditorSession: buffer, file name and modified flag
//! - EditorAction: structured result of each key

pub mod action;
pub mod session;

pub use action::EditorAction;
pub use session::{
    EditorBuffer, EditorFilename, EditorSession, EDITOR_BUFFER_SIZE, EDITOR_FILENAME_SIZE,
};
