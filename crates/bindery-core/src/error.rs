//! Error types for Bindery

use thiserror::Error;

/// The main error type for binding operations
#[derive(Debug, Error)]
pub enum BindError {
    #[error("Unknown key: {0}")]
    UnknownKey(String),

    #[error("Unknown mouse button: {0}")]
    UnknownMouseButton(String),

    #[error("Malformed action config: {0}")]
    MalformedAction(String),

    #[error("Script fault: {0}")]
    ScriptFault(String),

    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("Missing required argument: {0}")]
    MissingArgument(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParseError(String),

    #[error("TOML serialization error: {0}")]
    TomlSerError(String),

    #[error("JSON error: {0}")]
    JsonError(String),
}

/// Result type alias for binding operations
pub type Result<T> = std::result::Result<T, BindError>;

impl From<toml::de::Error> for BindError {
    fn from(err: toml::de::Error) -> Self {
        BindError::TomlParseError(err.to_string())
    }
}

impl From<toml::ser::Error> for BindError {
    fn from(err: toml::ser::Error) -> Self {
        BindError::TomlSerError(err.to_string())
    }
}

impl From<serde_json::Error> for BindError {
    fn from(err: serde_json::Error) -> Self {
        BindError::JsonError(err.to_string())
    }
}
