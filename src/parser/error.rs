//! Error types for the request parser.

use thiserror::Error;

/// Errors that can occur while parsing and validating a request line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The client closed the connection without sending anything.
    #[error("Empty request")]
    EmptyRequest,

    /// The method token is not `GET`.
    #[error("Unsupported HTTP method: {0}")]
    UnsupportedMethod(String),

    /// The path is empty or contains `..` or `//`.
    #[error("Invalid path: {0:?}")]
    InvalidPath(String),

    /// The path does not fit in the caller's path buffer.
    #[error("Path of {len} bytes exceeds the {max} byte limit")]
    PathTooLong { len: usize, max: usize },
}
