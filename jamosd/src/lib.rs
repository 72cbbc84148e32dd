//! # Jamos Host Runtime
//!
//! This crate runs the Jamos terminal against host stdio or a key script.
//!
//! ## Philosophy
//!
//! - **Host owns I/O**: the session only draws into desktop screens
//! - **Input is raw bytes**: exactly what a serial line would deliver
//! - **Deterministic mode is first-class**: scripts replay byte for byte
//!
//! ## Responsibilities
//!
//! The host runtime:
//! - Boots the session and prints the greeting
//! - Runs the polling loop (poll → decode → dispatch → flush)
//! - Switches a terminal stdin to raw mode for the session
//! - Halts with a banner when the output device fails
//!
//! ## Non-Responsibilities
//!
//! The host does NOT:
//! - Interpret output escape sequences
//! - Persist anything between runs

pub mod console;
pub mod input_script;
pub mod runtime;

pub use console::{RawModeGuard, ReaderSource, WriterSink, EXIT_BYTE};
pub use input_script::{InputScript, InputScriptError};
pub use runtime::{halt_message, HostRuntime, HostRuntimeConfig, HostRuntimeError};
