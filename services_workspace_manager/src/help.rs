//! # Help System
//!
//! Command reference printed by `help`.

/// One line of the command reference
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HelpEntry {
    pub command: &'static str,
    pub summary: &'static str,
}

/// Every shell command, in display order
pub const HELP_ENTRIES: &[HelpEntry] = &[
    HelpEntry { command: "help", summary: "Show this help" },
    HelpEntry { command: "clear", summary: "Clear screen" },
    HelpEntry { command: "info", summary: "Show desktop info" },
    HelpEntry { command: "ls", summary: "List files" },
    HelpEntry { command: "touch", summary: "Create file (usage: touch <name>)" },
    HelpEntry { command: "rm", summary: "Delete file (usage: rm <name>)" },
    HelpEntry { command: "edit", summary: "Edit file (usage: edit <name>)" },
    HelpEntry { command: "cat", summary: "Display file (usage: cat <name>)" },
    HelpEntry {
        command: "wayland",
        summary: "Wayland compositor (usage: wayland [start|stop|status])",
    },
];

/// Renders the full help text
pub fn help_text() -> String {
    let mut text = String::from("Available commands:\n");
    for entry in HELP_ENTRIES {
        text.push_str(&format!("  {:<7} - {}\n", entry.command, entry.summary));
    }
    text
}
