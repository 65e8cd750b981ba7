//! Request parser module.
//!
//! This module extracts the method and path from the first bytes a client
//! sends and applies the path policy before any file lookup happens.

mod request;
mod method;
mod error;

// Re-export public items
pub use request::{RequestLine, DEFAULT_MAX_PATH_LEN};
pub use method::Method;
pub use error::Error;

// Re-export the parse_request function
pub use request::parse_request;
