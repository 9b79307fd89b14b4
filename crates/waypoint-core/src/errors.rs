//! Error types for Waypoint

use thiserror::Error;

/// Core errors that can occur in Waypoint
#[derive(Debug, Error)]
pub enum Error {
    #[error("Node error: {0}")]
    Node(#[from] NodeError),

    #[error("Type tag error: {0}")]
    TypeTag(#[from] TypeTagError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Fullnode connection and query errors
#[derive(Debug, Error)]
pub enum NodeError {
    #[error("Node unreachable at {url}: {message}")]
    Unreachable { url: String, message: String },

    #[error("Node returned {status}: {message}")]
    ApiError { status: u16, message: String },

    #[error("Failed to parse response: {0}")]
    ParseError(String),

    #[error("Resource not found: {resource} at {address}")]
    ResourceNotFound { address: String, resource: String },
}

/// Move type descriptor parse errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeTagError {
    #[error("invalid type tag: {0}")]
    Invalid(String),

    #[error("not a struct tag: {0}")]
    NotAStruct(String),
}

/// Result type alias for Waypoint operations
pub type Result<T> = std::result::Result<T, Error>;
