//! Error types for the connection layer.

use std::io;

use thiserror::Error;

use crate::parser::Error as ParserError;

/// Errors that can occur while listening, accepting, or serving a connection.
#[derive(Debug, Error)]
pub enum Error {
    /// The request could not be read or the response could not be written.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The request was read but rejected.
    #[error("Parse error: {0}")]
    Parse(#[from] ParserError),

    /// The listening socket could not be set up.
    #[error("Failed to {stage} on port {port}: {source}")]
    Startup {
        stage: StartupStage,
        port: u16,
        #[source]
        source: io::Error,
    },

    /// A pending connection could not be accepted.
    #[error("Failed to accept connection: {0}")]
    Accept(#[source] io::Error),

    /// The configuration document could not be deserialized.
    #[error("Configuration error: {0}")]
    Config(#[from] serde_json::Error),

    /// The configuration holds an unusable value.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// The step of listener setup that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartupStage {
    Socket,
    Bind,
    Listen,
}

impl std::fmt::Display for StartupStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StartupStage::Socket => write!(f, "make socket"),
            StartupStage::Bind => write!(f, "bind socket"),
            StartupStage::Listen => write!(f, "listen"),
        }
    }
}

/// The cause of a failure, coarse enough to branch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Socket, read, write, or configuration trouble.
    Io,
    /// The request used a method other than `GET`, or sent nothing at all.
    UnsupportedMethod,
    /// The requested path failed validation.
    InvalidPath,
}

impl Error {
    /// Classify the error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Parse(ParserError::EmptyRequest | ParserError::UnsupportedMethod(_)) => {
                ErrorKind::UnsupportedMethod
            }
            Error::Parse(ParserError::InvalidPath(_) | ParserError::PathTooLong { .. }) => {
                ErrorKind::InvalidPath
            }
            _ => ErrorKind::Io,
        }
    }
}
