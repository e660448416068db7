//! Error types for content loading and persistence

use std::fmt;
use thiserror::Error;

/// A content document, or one of its fields, could not be decoded.
///
/// Always recoverable: the affected field falls back to its default.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ContentParseError {
    #[error("Malformed content document: {0}")]
    Document(String),

    #[error("Malformed content field `{path}`: {message}")]
    Field { path: String, message: String },
}

impl ContentParseError {
    pub fn field(path: impl Into<String>, message: impl fmt::Display) -> Self {
        ContentParseError::Field {
            path: path.into(),
            message: message.to_string(),
        }
    }
}

/// Failure talking to the record store
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Store not found: {0}")]
    NotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store backend error: {0}")]
    Backend(String),
}
