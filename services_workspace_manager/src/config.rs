//! Terminal configuration
//!
//! Every field has a default, so an empty JSON object is a valid config.

use serde::{Deserialize, Serialize};
use services_logger::{LogLevel, DEFAULT_LOG_CAPACITY};
use thiserror::Error;

use crate::desktop::{DEFAULT_DESKTOP_CAPACITY, MAX_DESKTOP_CAPACITY};

/// Configuration errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Config parse error: {0}")]
    Parse(String),

    #[error("Invalid desktop capacity: {0} (expected 1 to {})", MAX_DESKTOP_CAPACITY)]
    InvalidCapacity(usize),
}

/// Session settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerminalConfig {
    /// Maximum number of desktops
    pub desktop_capacity: usize,
    /// Name of the desktop that exists at boot
    pub first_desktop_name: String,
    /// Lines printed once at boot, each followed by a newline
    pub greeting: Vec<String>,
    /// Log entries retained
    pub log_capacity: usize,
    /// Lowest level recorded
    pub log_level: LogLevel,
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            desktop_capacity: DEFAULT_DESKTOP_CAPACITY,
            first_desktop_name: "Desktop 1".to_string(),
            greeting: vec![
                "Hello lovely Anna!".to_string(),
                String::new(),
                "=== Jamos Experimental Terminal ===".to_string(),
                "Ctrl+Right: New desktop | Ctrl+Left: Prev desktop | Ctrl+N: Name".to_string(),
                String::new(),
            ],
            log_capacity: DEFAULT_LOG_CAPACITY,
            log_level: LogLevel::Info,
        }
    }
}

impl TerminalConfig {
    /// Parses and validates a JSON config
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        serde_json::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=MAX_DESKTOP_CAPACITY).contains(&self.desktop_capacity) {
            return Err(ConfigError::InvalidCapacity(self.desktop_capacity));
        }
        Ok(())
    }

    pub fn with_desktop_capacity(mut self, capacity: usize) -> Self {
        self.desktop_capacity = capacity;
        self
    }

    pub fn with_greeting(mut self, greeting: Vec<String>) -> Self {
        self.greeting = greeting;
        self
    }

    pub fn with_log_level(mut self, level: LogLevel) -> Self {
        self.log_level = level;
        self
    }
}
