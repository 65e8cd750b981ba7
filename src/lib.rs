//! A minimal HTTP/1.1 file-serving protocol layer.
//!
//! This library supplies the wire mechanics of a small static file server:
//! it listens on a port, accepts clients, reads and validates a `GET`
//! request line, and writes back either the file bytes it is handed or a
//! `404 Not Found` page. Reading files, choosing content types and deciding
//! how connections are spread over tasks are left to the caller.
//!
//! # Features
//!
//! - An explicitly owned [`Listener`], so several can coexist in one process
//! - Request lines tokenized with explicit bounds on method and path length
//! - Paths containing `..` or `//` refused before any lookup can happen
//! - Responses always announce `Connection: Close` and the exact body length
//! - Handles that move through the request lifecycle by value, so a
//!   connection cannot be answered twice or left open
//!
//! # Limitations
//!
//! There are no timeouts. A client that connects and never sends, or never
//! reads, holds the task serving it until the operating system gives up on
//! the socket.
//!
//! # Examples
//!
//! ## Parsing a request line
//!
//! ```
//! use filewire::{parse_request, ParserError, DEFAULT_MAX_PATH_LEN};
//!
//! let line = parse_request(b"GET /index.html HTTP/1.1\r\nHost: x\r\n\r\n", DEFAULT_MAX_PATH_LEN).unwrap();
//! assert_eq!(line.path(), "/index.html");
//!
//! let refused = parse_request(b"GET /../secret HTTP/1.1\r\n\r\n", DEFAULT_MAX_PATH_LEN);
//! assert!(matches!(refused, Err(ParserError::InvalidPath(_))));
//! ```
//!
//! ## Serving
//!
//! ```no_run
//! use filewire::Listener;
//!
//! # async fn serve() -> Result<(), filewire::ServerError> {
//! let listener = Listener::init(8080).await?;
//! loop {
//!     let Ok(connection) = listener.accept_connection().await else {
//!         continue;
//!     };
//!     match connection.get_request().await {
//!         Ok(request) => {
//!             let _ = request.return_result("text/plain", b"hello").await;
//!         }
//!         Err(rejected) => {
//!             let _ = rejected.return_error("Not found").await;
//!         }
//!     }
//! }
//! # }
//! ```
//!
//! See the `demos` directory for a complete file server.

// Export the parser module
pub mod parser;

// Export the server module
pub mod server;

// Re-export commonly used items for convenience
pub use parser::{Error as ParserError, Method, RequestLine, DEFAULT_MAX_PATH_LEN, parse_request};
pub use server::{
    Connection, Error as ServerError, ErrorKind, Listener, Rejected, Request, ResponseHead,
    ServerConfig, StatusCode,
};
