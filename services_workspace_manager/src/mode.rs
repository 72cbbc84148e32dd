use core::fmt;
use serde::{Deserialize, Serialize};

/// Which handler receives the next key event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TerminalMode {
    /// Shell input on the active desktop
    #[default]
    Normal,
    /// Typing a new name for the active desktop
    NamingDesktop,
    /// Keys go to the editor session
    Editor,
}

impl fmt::Display for TerminalMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TerminalMode::Normal => write!(f, "normal"),
            TerminalMode::NamingDesktop => write!(f, "naming"),
            TerminalMode::Editor => write!(f, "editor"),
        }
    }
}
