//! Shell command parsing
//!
//! A command line is at most 32 bytes of input. Keywords are matched
//! exactly; commands taking a name require a single space after the
//! keyword and treat the rest of the line as the name.

use serde::{Deserialize, Serialize};
use services_storage::FileName;
use thiserror::Error;

use crate::compositor::CompositorCommand;

pub const TOUCH_USAGE: &str = "touch <filename>";
pub const RM_USAGE: &str = "rm <filename>";
pub const EDIT_USAGE: &str = "edit <filename>";
pub const CAT_USAGE: &str = "cat <filename>";

/// Errors raised while parsing a command line
///
/// `Display` escapes non-ASCII input for logs; the shell prints
/// [`CommandError::to_bytes`] instead.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// A command that needs a file name got none
    #[error("Usage: {usage}")]
    MissingArgument { usage: &'static str },

    /// No command matches the line
    #[error("Unknown command: {}", .0.escape_ascii())]
    Unknown(Vec<u8>),
}

impl CommandError {
    /// The message exactly as the terminal shows it, input bytes untouched
    pub fn to_bytes(&self) -> Vec<u8> {
        match self {
            CommandError::MissingArgument { usage } => format!("Usage: {}", usage).into_bytes(),
            CommandError::Unknown(input) => [b"Unknown command: ".as_slice(), input].concat(),
        }
    }
}

/// A parsed shell command
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShellCommand {
    Help,
    Clear,
    Info,
    Ls,
    Touch(FileNameArg),
    Rm(FileNameArg),
    Edit(FileNameArg),
    Cat(FileNameArg),
    Wayland(CompositorCommand),
}

/// File name argument, as typed (already bounded by the input line)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileNameArg(Vec<u8>);

impl FileNameArg {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// The name as stored in the file table
    pub fn to_file_name(&self) -> FileName {
        FileName::from_truncated(&self.0)
    }
}

impl core::fmt::Display for FileNameArg {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        for &b in &self.0 {
            write!(f, "{}", b as char)?;
        }
        Ok(())
    }
}

impl ShellCommand {
    /// Parses one input line
    ///
    /// Returns `Ok(None)` for an empty line.
    pub fn parse(line: &[u8]) -> Result<Option<Self>, CommandError> {
        if line.is_empty() {
            return Ok(None);
        }

        let command = match line {
            b"help" => ShellCommand::Help,
            b"clear" => ShellCommand::Clear,
            b"info" => ShellCommand::Info,
            b"ls" => ShellCommand::Ls,
            b"wayland" => ShellCommand::Wayland(CompositorCommand::Status),
            _ => {
                if let Some(rest) = line.strip_prefix(b"touch ") {
                    ShellCommand::Touch(required(rest, TOUCH_USAGE)?)
                } else if let Some(rest) = line.strip_prefix(b"rm ") {
                    ShellCommand::Rm(required(rest, RM_USAGE)?)
                } else if let Some(rest) = line.strip_prefix(b"edit ") {
                    ShellCommand::Edit(required(rest, EDIT_USAGE)?)
                } else if let Some(rest) = line.strip_prefix(b"cat ") {
                    ShellCommand::Cat(required(rest, CAT_USAGE)?)
                } else if let Some(rest) = line.strip_prefix(b"wayland ") {
                    ShellCommand::Wayland(CompositorCommand::parse(rest))
                } else {
                    return Err(CommandError::Unknown(line.to_vec()));
                }
            }
        };

        Ok(Some(command))
    }

    /// Keyword as typed at the prompt
    pub fn keyword(&self) -> &'static str {
        match self {
            ShellCommand::Help => "help",
            ShellCommand::Clear => "clear",
            ShellCommand::Info => "info",
            ShellCommand::Ls => "ls",
            ShellCommand::Touch(_) => "touch",
            ShellCommand::Rm(_) => "rm",
            ShellCommand::Edit(_) => "edit",
            ShellCommand::Cat(_) => "cat",
            ShellCommand::Wayland(_) => "wayland",
        }
    }
}

fn required(rest: &[u8], usage: &'static str) -> Result<FileNameArg, CommandError> {
    if rest.is_empty() {
        Err(CommandError::MissingArgument { usage })
    } else {
        Ok(FileNameArg(rest.to_vec()))
    }
}
