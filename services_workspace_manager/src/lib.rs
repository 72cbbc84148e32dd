//! # Session Manager
//!
//! This crate implements the terminal session: virtual desktops, the shell
//! and the mode dispatcher that routes every key event.
//!
//! ## Philosophy
//!
//! - **One event, one handler**: the current mode picks exactly one handler
//! - **Desktops own their output**: handlers draw into the active desktop's
//!   screen, the host decides when bytes reach the device
//! - **Single-threaded and deterministic**: the same key stream always
//!   produces the same output
//!
//! ## Non-Goals
//!
//! This is NOT:
//! - A POSIX shell
//! - A job control system
//! - A terminal emulator

pub mod commands;
pub mod compositor;
pub mod config;
pub mod desktop;
pub mod help;
pub mod mode;
mod shell;

pub use commands::{CommandError, ShellCommand};
pub use compositor::{Compositor, CompositorCommand};
pub use config::{ConfigError, TerminalConfig};
pub use desktop::{Desktop, DesktopManager, SwitchOutcome};
pub use mode::TerminalMode;
pub use shell::CAT_READ_LIMIT;

use editor_core::{EditorAction, EditorSession};
use hal::{ByteSink, SerialError};
use input_types::{Key, KeyEvent};
use services_logger::{LogEntry, LogLevel, Logger};
use services_storage::FileTable;

/// The terminal session
///
/// Owns every piece of mutable state: desktops, the current mode, the file
/// table, the shared editor session and the log.
#[derive(Debug)]
pub struct SessionManager {
    config: TerminalConfig,
    desktops: DesktopManager,
    mode: TerminalMode,
    files: FileTable,
    editor: EditorSession,
    compositor: Compositor,
    logger: Logger,
}

impl SessionManager {
    /// Creates a session from a validated config
    pub fn new(config: TerminalConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: TerminalConfig) -> Self {
        let desktops =
            DesktopManager::new(config.desktop_capacity, config.first_desktop_name.as_bytes());
        let logger = Logger::new(config.log_capacity).with_min_level(config.log_level);
        Self {
            config,
            desktops,
            mode: TerminalMode::Normal,
            files: FileTable::new(),
            editor: EditorSession::new(),
            compositor: Compositor::new(),
            logger,
        }
    }

    /// Prints the greeting and the first prompt
    pub fn boot(&mut self) {
        let greeting = self.config.greeting.clone();
        if let Some(desktop) = self.desktops.current_mut() {
            for line in &greeting {
                desktop.screen_mut().puts(line);
                desktop.screen_mut().puts("\n");
            }
            desktop.show_prompt();
        }
        self.logger.log(
            LogEntry::new(LogLevel::Info, "session started")
                .with_source("vdm")
                .with_field("capacity", self.desktops.capacity()),
        );
    }

    /// Routes one key event to the handler for the current mode
    pub fn dispatch(&mut self, event: &KeyEvent) {
        match self.mode {
            TerminalMode::Normal => self.handle_normal(event),
            TerminalMode::NamingDesktop => self.handle_naming(event),
            TerminalMode::Editor => self.handle_editor(event),
        }
    }

    pub fn config(&self) -> &TerminalConfig {
        &self.config
    }

    pub fn mode(&self) -> TerminalMode {
        self.mode
    }

    pub fn active_index(&self) -> usize {
        self.desktops.index()
    }

    pub fn desktop_count(&self) -> usize {
        self.desktops.count()
    }

    pub fn desktops(&self) -> &DesktopManager {
        &self.desktops
    }

    pub fn active_desktop(&self) -> Option<&Desktop> {
        self.desktops.current()
    }

    pub fn files(&self) -> &FileTable {
        &self.files
    }

    pub fn files_mut(&mut self) -> &mut FileTable {
        &mut self.files
    }

    pub fn editor(&self) -> &EditorSession {
        &self.editor
    }

    pub fn compositor(&self) -> &Compositor {
        &self.compositor
    }

    pub fn logger(&self) -> &Logger {
        &self.logger
    }

    pub fn logger_mut(&mut self) -> &mut Logger {
        &mut self.logger
    }

    /// Takes the active desktop's pending output
    pub fn take_output(&mut self) -> Vec<u8> {
        self.desktops
            .current_mut()
            .map(|d| d.screen_mut().take_pending())
            .unwrap_or_default()
    }

    /// Writes every desktop's pending output to `sink`, in desktop order
    pub fn flush_to<S: ByteSink + ?Sized>(&mut self, sink: &mut S) -> Result<(), SerialError> {
        for desktop in self.desktops.iter_mut() {
            desktop.screen_mut().flush_to(sink)?;
        }
        Ok(())
    }

    fn handle_normal(&mut self, event: &KeyEvent) {
        if event.is_ctrl_key(Key::Right) {
            self.switch_forward();
            return;
        }
        if event.is_ctrl_key(Key::Left) {
            self.switch_back();
            return;
        }
        if event.is_ctrl_letter(b'n') {
            self.start_naming();
            return;
        }

        match event.key {
            Key::Char(byte) => {
                if let Some(desktop) = self.desktops.current_mut() {
                    desktop.screen_mut().putc(byte);
                    desktop.add_input(byte);
                }
            }
            Key::Enter => self.submit_line(),
            Key::Backspace => self.erase_input(),
            _ => {}
        }
    }

    fn handle_naming(&mut self, event: &KeyEvent) {
        let Some(desktop) = self.desktops.current_mut() else {
            return;
        };

        match event.key {
            Key::Char(byte) => {
                desktop.screen_mut().putc(byte);
                desktop.add_input(byte);
            }
            Key::Enter => {
                let input = desktop.input().clone();
                if input.is_empty() {
                    desktop.screen_mut().puts("\n[Name unchanged]\n");
                } else {
                    desktop.set_name(input.as_bytes());
                    let name = desktop.name().clone();
                    desktop.screen_mut().puts("\n[Desktop renamed to: ");
                    desktop.screen_mut().put_bytes(name.as_bytes());
                    desktop.screen_mut().puts("]\n");
                    self.logger.log(
                        LogEntry::new(LogLevel::Info, "desktop renamed")
                            .with_source("vdm")
                            .with_field("index", self.desktops.index())
                            .with_field("name", &name),
                    );
                }
                self.finish_naming();
            }
            Key::Backspace => self.erase_input(),
            Key::Escape => {
                desktop.screen_mut().puts("\n[Cancelled]\n");
                self.finish_naming();
            }
            _ => {}
        }
    }

    fn handle_editor(&mut self, event: &KeyEvent) {
        let Some(desktop) = self.desktops.current_mut() else {
            return;
        };

        let action = self.editor.handle_key(event, desktop.screen_mut());
        match action {
            EditorAction::Continue => {}
            EditorAction::Save | EditorAction::SaveAndQuit => {
                if !self.save_editor() {
                    return;
                }
                if action.closes_editor() {
                    self.close_editor();
                }
            }
            EditorAction::Quit => {
                self.print("\nEditor closed.\n");
                self.close_editor();
            }
        }
    }

    /// Writes the editor buffer to its file, creating the file if needed
    ///
    /// Returns false only when the file could not be created.
    fn save_editor(&mut self) -> bool {
        let filename = self.editor.filename().clone();
        let slot = match self.files.find(filename.as_bytes()) {
            Some(slot) => slot,
            None => match self.files.create(filename.as_bytes()) {
                Ok(slot) => slot,
                Err(err) => {
                    self.logger.log(
                        LogEntry::new(LogLevel::Error, "save failed")
                            .with_source("editor")
                            .with_field("file", &filename)
                            .with_field("error", &err),
                    );
                    self.print("\nError creating file\n");
                    return false;
                }
            },
        };

        match self.files.write(slot, self.editor.content()) {
            Ok(written) => {
                self.editor.mark_saved();
                self.logger.log(
                    LogEntry::new(LogLevel::Info, "file saved")
                        .with_source("editor")
                        .with_field("file", &filename)
                        .with_field("bytes", written),
                );
                self.print_line("\nFile saved: ", filename.as_bytes());
            }
            Err(err) => {
                self.logger.log(
                    LogEntry::new(LogLevel::Error, "write failed")
                        .with_source("editor")
                        .with_field("file", &filename)
                        .with_field("error", &err),
                );
                self.print("\nError saving file\n");
            }
        }
        true
    }

    /// Returns to the shell with an empty input line
    ///
    /// The `edit <name>` line stays in the input buffer while editing.
    fn close_editor(&mut self) {
        self.set_mode(TerminalMode::Normal);
        if let Some(desktop) = self.desktops.current_mut() {
            desktop.clear_input();
            desktop.show_prompt();
        }
    }

    fn switch_forward(&mut self) {
        let Some(outcome) = self.desktops.next() else {
            self.logger.debug("vdm", "no further desktop");
            return;
        };

        if let Some(desktop) = self.desktops.current_mut() {
            let name = desktop.name().clone();
            desktop.screen_mut().clear();
            desktop.screen_mut().puts(">>> Switched to ");
            desktop.screen_mut().put_bytes(name.as_bytes());
            desktop.screen_mut().puts(" <<<\n\n");
            desktop.show_prompt();

            let message = match outcome {
                SwitchOutcome::Created => "desktop created",
                SwitchOutcome::Switched => "desktop switched",
            };
            self.logger.log(
                LogEntry::new(LogLevel::Info, message)
                    .with_source("vdm")
                    .with_field("index", self.desktops.index())
                    .with_field("name", &name),
            );
        }
    }

    fn switch_back(&mut self) {
        if !self.desktops.previous() {
            return;
        }

        if let Some(desktop) = self.desktops.current_mut() {
            let name = desktop.name().clone();
            desktop.screen_mut().puts("\n>>> Switched to ");
            desktop.screen_mut().put_bytes(name.as_bytes());
            desktop.screen_mut().puts(" <<<\n");
            desktop.show_prompt();
            self.logger.log(
                LogEntry::new(LogLevel::Info, "desktop switched")
                    .with_source("vdm")
                    .with_field("index", self.desktops.index())
                    .with_field("name", &name),
            );
        }
    }

    fn start_naming(&mut self) {
        if let Some(desktop) = self.desktops.current_mut() {
            desktop.clear_input();
            desktop.screen_mut().puts("\n[Enter new name for desktop]: ");
            self.set_mode(TerminalMode::NamingDesktop);
        }
    }

    fn finish_naming(&mut self) {
        if let Some(desktop) = self.desktops.current_mut() {
            desktop.clear_input();
            desktop.show_prompt();
        }
        self.set_mode(TerminalMode::Normal);
    }

    fn erase_input(&mut self) {
        if let Some(desktop) = self.desktops.current_mut() {
            desktop.remove_input();
            desktop.screen_mut().backspace();
        }
    }

    pub(crate) fn set_mode(&mut self, mode: TerminalMode) {
        if self.mode != mode {
            self.logger.log(
                LogEntry::new(LogLevel::Debug, "mode changed")
                    .with_source("vdm")
                    .with_field("from", self.mode)
                    .with_field("to", mode),
            );
            self.mode = mode;
        }
    }

    pub(crate) fn print(&mut self, text: &str) {
        self.print_bytes(text.as_bytes());
    }

    pub(crate) fn print_bytes(&mut self, bytes: &[u8]) {
        if let Some(desktop) = self.desktops.current_mut() {
            desktop.screen_mut().put_bytes(bytes);
        }
    }

    /// Prints `label`, the raw `bytes`, then a newline
    pub(crate) fn print_line(&mut self, label: &str, bytes: &[u8]) {
        if let Some(desktop) = self.desktops.current_mut() {
            let screen = desktop.screen_mut();
            screen.puts(label);
            screen.put_bytes(bytes);
            screen.puts("\n");
        }
    }
}

impl Default for SessionManager {
    fn default() -> Self {
        Self::build(TerminalConfig::default())
    }
}
