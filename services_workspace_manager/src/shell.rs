//! Shell command execution
//!
//! Runs one parsed command against the session, printing its output to
//! the active desktop.

use editor_core::EDITOR_BUFFER_SIZE;
use services_logger::{LogEntry, LogLevel};
use services_storage::MAX_FILES;

use crate::commands::{CommandError, FileNameArg, ShellCommand, EDIT_USAGE};
use crate::help::help_text;
use crate::{SessionManager, TerminalMode};

/// Bytes of a file shown by `cat`
pub const CAT_READ_LIMIT: usize = 512;

/// What the dispatcher does after a command ran
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Completion {
    /// Clear the input line and print a prompt
    Prompt,
    /// Leave the input line and screen as they are
    Return,
}

impl SessionManager {
    /// Handles Enter in normal mode
    pub(crate) fn submit_line(&mut self) {
        let line = match self.desktops.current_mut() {
            Some(desktop) => {
                desktop.screen_mut().puts("\n");
                desktop.input().as_bytes().to_vec()
            }
            None => return,
        };

        let completion = match ShellCommand::parse(&line) {
            Ok(Some(command)) => self.execute(command),
            Ok(None) => Completion::Prompt,
            Err(err) => {
                if let CommandError::Unknown(input) = &err {
                    self.logger.log(
                        LogEntry::new(LogLevel::Warn, "unknown command")
                            .with_source("shell")
                            .with_field("input", input.escape_ascii()),
                    );
                }
                let mut message = err.to_bytes();
                message.push(b'\n');
                self.print_bytes(&message);
                match err {
                    CommandError::MissingArgument { usage: EDIT_USAGE } => Completion::Return,
                    _ => Completion::Prompt,
                }
            }
        };

        if completion == Completion::Prompt {
            if let Some(desktop) = self.desktops.current_mut() {
                desktop.clear_input();
                desktop.show_prompt();
            }
        }
    }

    fn execute(&mut self, command: ShellCommand) -> Completion {
        self.logger.debug("shell", format!("run {}", command.keyword()));
        match command {
            ShellCommand::Help => self.print(&help_text()),
            ShellCommand::Clear => {
                if let Some(desktop) = self.desktops.current_mut() {
                    desktop.screen_mut().clear();
                }
            }
            ShellCommand::Info => self.info(),
            ShellCommand::Ls => self.ls(),
            ShellCommand::Touch(name) => self.touch(&name),
            ShellCommand::Rm(name) => self.rm(&name),
            ShellCommand::Cat(name) => self.cat(&name),
            ShellCommand::Edit(name) => {
                self.edit(&name);
                return Completion::Return;
            }
            ShellCommand::Wayland(sub) => {
                let text = self.compositor.apply(sub);
                self.print(text);
            }
        }
        Completion::Prompt
    }

    fn info(&mut self) {
        let index = self.desktops.index();
        let count = self.desktops.count();
        if let Some(desktop) = self.desktops.current_mut() {
            let name = desktop.name().clone();
            let screen = desktop.screen_mut();
            screen.puts("Desktop: ");
            screen.put_bytes(name.as_bytes());
            screen.puts(&format!("\nIndex: {} of {}\n", index + 1, count));
        }
    }

    fn ls(&mut self) {
        let names = self.files.list(MAX_FILES);
        if names.is_empty() {
            self.print("No files.\n");
            return;
        }
        let mut text = b"Files:\n".to_vec();
        for name in &names {
            text.extend_from_slice(b"  ");
            text.extend_from_slice(name.as_bytes());
            text.push(b'\n');
        }
        self.print_bytes(&text);
    }

    fn touch(&mut self, arg: &FileNameArg) {
        let name = arg.to_file_name();
        match self.files.create(name.as_bytes()) {
            Ok(slot) => {
                self.logger.log(
                    LogEntry::new(LogLevel::Info, "file created")
                        .with_source("vfs")
                        .with_field("name", &name)
                        .with_field("slot", slot),
                );
                self.print_line("File created: ", name.as_bytes());
            }
            Err(err) => {
                self.logger.log(
                    LogEntry::new(LogLevel::Warn, "create failed")
                        .with_source("vfs")
                        .with_field("name", &name)
                        .with_field("error", &err),
                );
                self.print("Error: Could not create file\n");
            }
        }
    }

    fn rm(&mut self, arg: &FileNameArg) {
        let name = arg.to_file_name();
        if self.files.delete(name.as_bytes()) {
            self.logger.log(
                LogEntry::new(LogLevel::Info, "file deleted")
                    .with_source("vfs")
                    .with_field("name", &name),
            );
            self.print_line("File deleted: ", name.as_bytes());
        } else {
            self.print("Error: File not found\n");
        }
    }

    fn cat(&mut self, arg: &FileNameArg) {
        let name = arg.to_file_name();
        match self.files.find(name.as_bytes()) {
            Some(slot) => {
                let mut bytes = self.files.read(slot, CAT_READ_LIMIT);
                bytes.push(b'\n');
                self.print_bytes(&bytes);
            }
            None => self.print_line("File not found: ", name.as_bytes()),
        }
    }

    fn edit(&mut self, arg: &FileNameArg) {
        self.editor.set_filename(arg.as_bytes());
        let filename = self.editor.filename().clone();
        match self.files.find(filename.as_bytes()) {
            Some(slot) => {
                let content = self.files.read(slot, EDITOR_BUFFER_SIZE);
                self.editor.load_content(&content);
            }
            None => self.editor.clear(),
        }

        if let Some(desktop) = self.desktops.current_mut() {
            self.editor.render(desktop.screen_mut());
        }
        self.set_mode(TerminalMode::Editor);
        self.logger.log(
            LogEntry::new(LogLevel::Info, "editing")
                .with_source("editor")
                .with_field("file", &filename)
                .with_field("bytes", self.editor.content().len()),
        );
    }
}
