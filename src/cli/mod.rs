//! Command-line interface
//!
//! This module contains the CLI commands and argument parsing for the
//! terminal front end of the builder.

pub mod commands;

pub use commands::{Command, Gesture, Opt};
