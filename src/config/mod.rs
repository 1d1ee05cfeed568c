//! Configuration management
//!
//! Storefront credentials, the quote phone number and a couple of engine
//! switches. Values come from defaults, then environment variables, then
//! an optional TOML file.

pub mod settings;

pub use settings::{Config, GLOBAL_CONFIG, PLACEHOLDER_ACCESS_TOKEN};
