//! The connection layer.
//!
//! This module owns the listening socket, accepts clients, reads and
//! validates their request, and writes the single response each connection
//! gets before it is closed.

mod response;
mod config;
mod connection;
mod error;
mod listener;

// Re-export public items
pub use response::{ResponseHead, StatusCode, ERROR_CONTENT_TYPE};
pub use config::ServerConfig;
pub use connection::{Connection, Rejected, Request};
pub use error::{Error, ErrorKind, StartupStage};
pub use listener::Listener;
