//! Error handling for the rig builder
//!
//! These are faults: a catalog that could not be loaded, a config file that
//! does not parse, a quote for an empty build. Engine validation outcomes
//! (incompatible parts, a capped memory stepper) are not errors and live in
//! `core::rules` and `core::engine` as plain return values.

use thiserror::Error;

/// Result type alias for builder operations
pub type Result<T> = std::result::Result<T, BuilderError>;

/// Error types for everything around the build engine
#[derive(Debug, Clone, Error)]
pub enum BuilderError {
    /// The remote catalog reported an error or returned unusable data
    #[error("Catalog error: {0}")]
    Catalog(String),
    /// HTTP transport errors while fetching the catalog
    #[error("Transport error: {0}")]
    Transport(String),
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),
    /// Parsing errors for categories, gestures and tag values
    #[error("Parse error: {0}")]
    Parse(String),
    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),
    /// Quote could not be assembled
    #[error("Quote error: {0}")]
    Quote(String),
    /// A part id that does not exist in the category
    #[error("Unknown part '{id}' in category {category}")]
    UnknownPart { category: String, id: String },
}

impl From<std::io::Error> for BuilderError {
    fn from(err: std::io::Error) -> Self {
        BuilderError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for BuilderError {
    fn from(err: serde_json::Error) -> Self {
        BuilderError::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for BuilderError {
    fn from(err: toml::de::Error) -> Self {
        BuilderError::Config(err.to_string())
    }
}

impl From<url::ParseError> for BuilderError {
    fn from(err: url::ParseError) -> Self {
        BuilderError::Quote(err.to_string())
    }
}

#[cfg(feature = "storefront")]
impl From<reqwest::Error> for BuilderError {
    fn from(err: reqwest::Error) -> Self {
        BuilderError::Transport(err.to_string())
    }
}
