//! Identifiers for system entities

use serde::{Deserialize, Serialize};
use std::fmt;

/// Index of a file-table slot
///
/// Slots are addressed by array position once created. A `SlotId` can
/// outlive the file it named; operations on a freed slot fail softly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SlotId(usize);

impl SlotId {
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns the slot's array index
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Slot({})", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_id_index() {
        let id = SlotId::new(3);
        assert_eq!(id.index(), 3);
        assert_eq!(id.to_string(), "Slot(3)");
    }

    #[test]
    fn test_slot_id_ordering() {
        assert!(SlotId::new(0) < SlotId::new(1));
    }

    #[test]
    fn test_slot_id_serialization() {
        let id = SlotId::new(7);
        let json = serde_json::to_string(&id).unwrap();
        let deserialized: SlotId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deserialized);
    }
}
