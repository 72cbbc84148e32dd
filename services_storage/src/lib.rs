//! # Storage Service
//!
//! This crate defines the terminal's file storage.
//!
//! ## Philosophy
//!
//! **Storage is a fixed table, not a filesystem.**
//!
//! There are no paths and no directories, and nothing survives a restart.
//! Instead, we provide:
//! - A fixed number of named slots (inodes)
//! - Whole-file reads and writes
//! - Explicit, documented truncation at every capacity boundary
//!
//! ## Design
//!
//! - **FileTable**: the slot array and its name-keyed operations
//! - **SlotId**: the handle returned by `create`/`find`
//! - **FileTableError**: why a create or write was refused

pub mod file_table;

pub use core_types::SlotId;
pub use file_table::{
    FileData, FileEntry, FileName, FileTable, FileTableError, MAX_FILENAME_LEN, MAX_FILES,
    MAX_FILE_SIZE,
};
