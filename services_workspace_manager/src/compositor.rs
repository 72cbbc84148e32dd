//! Compositor toggle
//!
//! Stands in for a display compositor. It has no behavior beyond a running
//! flag that `wayland` commands inspect and flip.

use serde::{Deserialize, Serialize};

/// Usage text for the `wayland` command
pub const WAYLAND_USAGE: &str = "Usage: wayland [start|stop|status]\n  \
     start  - Start the Wayland compositor\n  \
     stop   - Stop the Wayland compositor\n  \
     status - Show compositor status (default)\n";

/// Subcommand of `wayland`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompositorCommand {
    Start,
    Stop,
    Status,
    /// Anything else prints usage
    Usage,
}

impl CompositorCommand {
    /// Parses the text after `wayland `
    pub fn parse(arg: &[u8]) -> Self {
        match arg {
            b"start" => CompositorCommand::Start,
            b"stop" => CompositorCommand::Stop,
            b"status" => CompositorCommand::Status,
            _ => CompositorCommand::Usage,
        }
    }
}

/// The compositor running flag
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Compositor {
    running: bool,
}

impl Compositor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Applies a subcommand and returns the text to print
    pub fn apply(&mut self, command: CompositorCommand) -> &'static str {
        match command {
            CompositorCommand::Status => {
                if self.running {
                    "Wayland Compositor Status: Running\n"
                } else {
                    "Wayland Compositor Status: Stopped\n"
                }
            }
            CompositorCommand::Start => {
                if self.running {
                    "Wayland compositor is already running.\n"
                } else {
                    self.running = true;
                    "Wayland compositor started.\n"
                }
            }
            CompositorCommand::Stop => {
                if self.running {
                    self.running = false;
                    "Wayland compositor stopped.\n"
                } else {
                    "Wayland compositor is not running.\n"
                }
            }
            CompositorCommand::Usage => WAYLAND_USAGE,
        }
    }
}
