//! CLI tool for inspecting consistent hash rings.
//!
//! Provides commands for:
//! - Locating the owner of keys
//! - Inspecting ring entries and key distribution
//! - Measuring key movement when nodes join or leave
//! - An interactive shell over the file store

pub mod commands;
pub mod config;
pub mod shell;

pub use commands::{Command, CommandResult};
pub use config::CliConfig;
