//! Editor actions

/// What the host should do after a key reached the editor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorAction {
    /// Keep editing
    Continue,
    /// Write the buffer to the file
    Save,
    /// Write the buffer, then leave the editor
    SaveAndQuit,
    /// Leave the editor, discarding unsaved changes
    Quit,
}

impl EditorAction {
    /// Returns true if the host should write the buffer
    pub fn wants_save(&self) -> bool {
        matches!(self, EditorAction::Save | EditorAction::SaveAndQuit)
    }

    /// Returns true if the editor closes after this action
    pub fn closes_editor(&self) -> bool {
        matches!(self, EditorAction::SaveAndQuit | EditorAction::Quit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_predicates() {
        assert!(!EditorAction::Continue.wants_save());
        assert!(EditorAction::Save.wants_save());
        assert!(EditorAction::SaveAndQuit.wants_save());
        assert!(!EditorAction::Quit.wants_save());

        assert!(!EditorAction::Save.closes_editor());
        assert!(EditorAction::SaveAndQuit.closes_editor());
        assert!(EditorAction::Quit.closes_editor());
    }
}
