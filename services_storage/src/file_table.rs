//! Fixed-capacity in-memory file table
//!
//! A flat array of inode slots addressed by name. There are no directories,
//! no offsets and no persistence: a file is a name plus up to
//! [`MAX_FILE_SIZE`] bytes, replaced wholesale on every write.
//!
//! ## Slot lifecycle
//!
//! free → (create) → in use → (delete) → free
//!
//! Freed slots keep their stale bytes but report size 0 and are reused by
//! the next create, always picking the lowest free index.

use core_types::{BoundedBytes, SlotId};
use thiserror::Error;

/// Number of slots in the table
pub const MAX_FILES: usize = 16;
/// Longest stored file name, in bytes
pub const MAX_FILENAME_LEN: usize = 32;
/// Largest stored file, in bytes
pub const MAX_FILE_SIZE: usize = 2048;

/// A file name, truncated to [`MAX_FILENAME_LEN`] bytes
pub type FileName = BoundedBytes<MAX_FILENAME_LEN>;

/// File contents, truncated to [`MAX_FILE_SIZE`] bytes
pub type FileData = BoundedBytes<MAX_FILE_SIZE>;

/// Errors from file table operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FileTableError {
    /// An in-use slot already carries this name
    #[error("File already exists: {0}")]
    AlreadyExists(String),

    /// Every slot is in use
    #[error("File table full")]
    TableFull,

    /// Slot id out of range or slot not in use
    #[error("Invalid slot: {0}")]
    InvalidSlot(SlotId),
}

/// One inode slot
#[derive(Debug, Clone, Default)]
pub struct FileEntry {
    name: FileName,
    data: FileData,
    in_use: bool,
}

impl FileEntry {
    pub fn name(&self) -> &FileName {
        &self.name
    }

    /// Stored content
    pub fn data(&self) -> &[u8] {
        self.data.as_bytes()
    }

    pub fn size(&self) -> usize {
        self.data.len()
    }

    pub fn in_use(&self) -> bool {
        self.in_use
    }

    fn matches(&self, name: &FileName) -> bool {
        self.in_use && self.name == *name
    }
}

/// The file table
#[derive(Debug, Clone)]
pub struct FileTable {
    slots: Vec<FileEntry>,
}

impl FileTable {
    /// Creates a table with every slot free
    pub fn new() -> Self {
        Self {
            slots: vec![FileEntry::default(); MAX_FILES],
        }
    }

    /// Finds the in-use slot carrying `name`
    ///
    /// `name` is truncated to [`MAX_FILENAME_LEN`] before comparing, the
    /// same way it was truncated when the file was created.
    pub fn find(&self, name: &[u8]) -> Option<SlotId> {
        let name = FileName::from_truncated(name);
        self.slots
            .iter()
            .position(|entry| entry.matches(&name))
            .map(SlotId::new)
    }

    /// Creates an empty file in the first free slot
    pub fn create(&mut self, name: &[u8]) -> Result<SlotId, FileTableError> {
        let name = FileName::from_truncated(name);
        if self.slots.iter().any(|entry| entry.matches(&name)) {
            return Err(FileTableError::AlreadyExists(name.to_string()));
        }

        let index = self
            .slots
            .iter()
            .position(|entry| !entry.in_use)
            .ok_or(FileTableError::TableFull)?;

        let slot = &mut self.slots[index];
        slot.in_use = true;
        slot.name = name;
        slot.data.clear();
        Ok(SlotId::new(index))
    }

    /// Frees the slot carrying `name`
    ///
    /// Returns whether such a file existed.
    pub fn delete(&mut self, name: &[u8]) -> bool {
        match self.find(name) {
            Some(id) => {
                let slot = &mut self.slots[id.index()];
                slot.in_use = false;
                slot.data.clear();
                true
            }
            None => false,
        }
    }

    /// Reads up to `capacity` bytes of a file
    ///
    /// Invalid or free slots read as empty; a short `capacity` silently
    /// truncates.
    pub fn read(&self, id: SlotId, capacity: usize) -> Vec<u8> {
        match self.live_slot(id) {
            Some(entry) => core_types::truncate(entry.data(), capacity).to_vec(),
            None => Vec::new(),
        }
    }

    /// Replaces a file's entire content
    ///
    /// Data beyond [`MAX_FILE_SIZE`] is dropped. Returns the number of bytes
    /// stored.
    pub fn write(&mut self, id: SlotId, data: &[u8]) -> Result<usize, FileTableError> {
        if self.live_slot(id).is_none() {
            return Err(FileTableError::InvalidSlot(id));
        }
        Ok(self.slots[id.index()].data.set(data))
    }

    /// Names of in-use files in slot order, at most `capacity` of them
    pub fn list(&self, capacity: usize) -> Vec<FileName> {
        self.slots
            .iter()
            .filter(|entry| entry.in_use)
            .take(capacity)
            .map(|entry| entry.name.clone())
            .collect()
    }

    /// Returns the entry at `id` if it is in use
    pub fn entry(&self, id: SlotId) -> Option<&FileEntry> {
        self.live_slot(id)
    }

    /// Number of files currently stored
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|entry| entry.in_use).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_full(&self) -> bool {
        self.len() == MAX_FILES
    }

    fn live_slot(&self, id: SlotId) -> Option<&FileEntry> {
        self.slots.get(id.index()).filter(|entry| entry.in_use)
    }
}

impl Default for FileTable {
    fn default() -> Self {
        Self::new()
    }
}
