//! # Hardware Abstraction Layer (HAL)
//!
//! This crate defines the device seam of the Jamos terminal.
//!
//! ## Philosophy
//!
//! **The character device is just a source and a sink.**
//!
//! No board-specific assumptions should leak into the shell logic.
//! The HAL provides traits that the bare-metal UART driver and the
//! host adapters both implement, plus the decoder that turns the raw
//! byte stream into key events.
//!
//! ## Design Principles
//!
//! 1. **Trait-based**: All device I/O goes through `ByteSource` / `ByteSink`
//! 2. **Poll, don't block**: Input is polled one byte at a time
//! 3. **Testable**: Devices can be replaced by in-memory fakes

pub mod escape_decoder;
pub mod serial;

pub use escape_decoder::{final_byte_to_key, DecoderState, KeyDecoder};
pub use serial::{
    ByteSink, ByteSource, ScriptedSource, SerialError, CLEAR_AND_HOME, DESTRUCTIVE_BACKSPACE,
};
