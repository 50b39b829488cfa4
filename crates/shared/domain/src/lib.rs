//! # Domain
//!
//! Plain data shared by every Trek crate. Only `serde` is allowed here: no I/O,
//! networking or business logic.

pub mod config;
pub mod constants;
pub mod preferences;
pub mod registry;
