//! Error types for nodecode.
//!
//! All errors are represented by the `NodecodeError` enum. Conversion errors
//! are raised synchronously to the caller and never leave a partial result.

use std::io::ErrorKind;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type for all nodecode operations.
#[derive(Deserialize, Serialize, Error, Debug, Clone, PartialEq)]
pub enum NodecodeError {
    /// The node handed to a conversion carries no content.
    ///
    /// Holds the display label of the node kind, e.g. `API request`.
    #[error("{0} node content is undefined")]
    MissingContent(String),

    /// Configuration parsing or validation errors.
    #[error("{0}")]
    Config(String),

    /// Data conversion errors (JSON, TOML).
    #[error("{0}")]
    Convert(String),

    /// Node content rejected by the node schema.
    #[error("{0}")]
    Schema(String),

    /// Node lookup or kind errors.
    #[error("{0}")]
    Node(String),

    /// Generated source rejected by the script engine.
    #[error("ecode: {ecode}, message: {message}")]
    Script {
        ecode: String,
        message: String,
    },

    /// Invalid glob pattern.
    #[error("{0}")]
    Pattern(String),

    /// I/O operation errors.
    #[error("{0}")]
    IoError(String),
}

impl From<NodecodeError> for String {
    fn from(val: NodecodeError) -> Self {
        val.to_string()
    }
}

impl From<std::io::Error> for NodecodeError {
    fn from(error: std::io::Error) -> Self {
        NodecodeError::IoError(error.to_string())
    }
}

impl From<NodecodeError> for std::io::Error {
    fn from(val: NodecodeError) -> Self {
        #[allow(clippy::io_other_error)]
        std::io::Error::new(ErrorKind::Other, val.to_string())
    }
}

impl From<serde_json::Error> for NodecodeError {
    fn from(error: serde_json::Error) -> Self {
        NodecodeError::Convert(error.to_string())
    }
}

impl From<toml::de::Error> for NodecodeError {
    fn from(error: toml::de::Error) -> Self {
        NodecodeError::Config(error.to_string())
    }
}

impl From<jsonschema::ValidationError<'_>> for NodecodeError {
    fn from(error: jsonschema::ValidationError<'_>) -> Self {
        NodecodeError::Schema(error.to_string())
    }
}

impl From<globset::Error> for NodecodeError {
    fn from(error: globset::Error) -> Self {
        NodecodeError::Pattern(error.to_string())
    }
}
