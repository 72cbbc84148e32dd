//! # Core Types
//!
//! This crate defines the fundamental types shared across the Jamos terminal.
//!
//! ## Philosophy
//!
//! - **Length-prefixed, not NUL-terminated**: byte strings carry their length
//! - **Bounded by type**: capacities are const parameters, not loose conventions
//! - **Truncation is a contract**: overflow is dropped silently, and that is
//!   the documented, tested behavior of [`BoundedBytes`]
//!
//! ## Key Types
//!
//! - [`BoundedBytes<N>`]: a byte string that never exceeds `N` bytes
//! - [`SlotId`]: index of a file-table slot

pub mod bounded;
pub mod ids;

pub use bounded::{truncate, BoundedBytes};
pub use ids::SlotId;
