//! # Host Runtime
//!
//! The polling loop that ties everything together:
//! byte source → decoder → session dispatch → flush to sink.

use hal::{ByteSink, ByteSource, KeyDecoder, ScriptedSource};
use services_workspace_manager::{ConfigError, SessionManager, TerminalConfig};
use std::thread;
use std::time::Duration;
use thiserror::Error;

use crate::input_script::{InputScript, InputScriptError};

/// Host runtime error types
#[derive(Debug, Error)]
pub enum HostRuntimeError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Script error: {0}")]
    Script(#[from] InputScriptError),

    #[error("I/O error: {0}")]
    Io(String),

    #[error("System halted: {0}")]
    Halted(String),
}

/// Host runtime configuration
#[derive(Debug, Clone)]
pub struct HostRuntimeConfig {
    /// Session settings
    pub terminal: TerminalConfig,
    /// Optional input script text; stdin is used when absent
    pub script: Option<String>,
    /// Maximum input bytes to consume (0 = unlimited)
    pub max_steps: usize,
    /// Print the session log to stderr on exit
    pub dump_log: bool,
    /// Pause between polls when no input is waiting
    pub idle_pause: Duration,
}

impl Default for HostRuntimeConfig {
    fn default() -> Self {
        Self {
            terminal: TerminalConfig::default(),
            script: None,
            max_steps: 0,
            dump_log: false,
            idle_pause: Duration::from_millis(1),
        }
    }
}

/// Text written to the sink when the system halts
pub fn halt_message(reason: &str) -> String {
    format!("\n\n*** {} ***\nSystem halted.\n", reason)
}

/// Host runtime
pub struct HostRuntime<Src: ByteSource, Sink: ByteSink> {
    config: HostRuntimeConfig,
    session: SessionManager,
    decoder: KeyDecoder,
    source: Src,
    sink: Sink,
    steps: usize,
}

impl HostRuntime<ScriptedSource, Vec<u8>> {
    /// Creates a runtime replaying `config.script` into an in-memory sink
    pub fn scripted(config: HostRuntimeConfig) -> Result<Self, HostRuntimeError> {
        let source = match &config.script {
            Some(text) => InputScript::from_text(text)?.into_source(),
            None => ScriptedSource::default(),
        };
        Self::new(config, source, Vec::new())
    }
}

impl<Src: ByteSource, Sink: ByteSink> HostRuntime<Src, Sink> {
    /// Creates a new host runtime
    pub fn new(
        config: HostRuntimeConfig,
        source: Src,
        sink: Sink,
    ) -> Result<Self, HostRuntimeError> {
        let session = SessionManager::new(config.terminal.clone())?;
        Ok(Self {
            config,
            session,
            decoder: KeyDecoder::new(),
            source,
            sink,
            steps: 0,
        })
    }

    /// Prints the greeting and first prompt
    pub fn boot(&mut self) -> Result<(), HostRuntimeError> {
        self.session.boot();
        self.flush()
    }

    /// Runs the host loop
    ///
    /// Returns when:
    /// - The source closes (end of script or stdin)
    /// - Max steps reached (if configured)
    /// - The sink fails, which halts the system
    pub fn run(&mut self) -> Result<(), HostRuntimeError> {
        self.boot()?;
        loop {
            if self.config.max_steps > 0 && self.steps >= self.config.max_steps {
                break;
            }

            if self.step()? {
                self.steps += 1;
            } else if self.source.is_closed() {
                break;
            } else {
                thread::sleep(self.config.idle_pause);
            }
        }
        Ok(())
    }

    /// Polls one byte and handles it
    ///
    /// Returns false when no input was waiting.
    pub fn step(&mut self) -> Result<bool, HostRuntimeError> {
        let Some(byte) = self.source.get_byte() else {
            return Ok(false);
        };

        if let Some(event) = self.decoder.poll_byte(byte) {
            self.session.dispatch(&event);
        }
        self.flush()?;
        Ok(true)
    }

    /// Stops the system: prints the halt banner and reports why
    pub fn halt(&mut self, reason: &str) -> HostRuntimeError {
        self.session.logger_mut().error("host", format!("halted: {}", reason));
        // The sink may be the reason for halting; this write is best effort.
        let _ = self
            .sink
            .put_str(&halt_message(reason))
            .and_then(|_| self.sink.flush());
        HostRuntimeError::Halted(reason.to_string())
    }

    fn flush(&mut self) -> Result<(), HostRuntimeError> {
        match self.session.flush_to(&mut self.sink) {
            Ok(()) => Ok(()),
            Err(err) => Err(self.halt(&err.to_string())),
        }
    }

    pub fn session(&self) -> &SessionManager {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut SessionManager {
        &mut self.session
    }

    pub fn sink(&self) -> &Sink {
        &self.sink
    }

    pub fn into_sink(self) -> Sink {
        self.sink
    }

    /// Input bytes consumed so far
    pub fn step_count(&self) -> usize {
        self.steps
    }

    pub fn config(&self) -> &HostRuntimeConfig {
        &self.config
    }
}
