//! The lifecycle of one accepted connection.
//!
//! A [`Connection`] is consumed by [`Connection::get_request`], which hands
//! it back inside either a [`Request`] or a [`Rejected`]. Only a [`Request`]
//! can send file contents, and every way out of either type closes the
//! stream, so a handle can neither answer twice nor be left open.

use std::fmt;
use std::io;
use std::net::SocketAddr;

use log::{debug, error, warn};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::net::TcpStream;

use crate::parser::{parse_request, Method, RequestLine};
use crate::server::config::ServerConfig;
use crate::server::error::{Error, ErrorKind};
use crate::server::response::ResponseHead;

/// An accepted client connection that has not been read from yet.
pub struct Connection<S = TcpStream> {
    stream: S,
    peer: Option<SocketAddr>,
    read_buffer_size: usize,
    max_path_len: usize,
}

impl<S> Connection<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    /// Wrap a byte stream using the default read and path limits.
    pub fn new(stream: S) -> Self {
        Self::with_limits(stream, &ServerConfig::default())
    }

    /// Wrap a byte stream using the limits from `config`.
    pub fn with_limits(stream: S, config: &ServerConfig) -> Self {
        Self {
            stream,
            peer: None,
            read_buffer_size: config.read_buffer_size,
            max_path_len: config.max_path_len,
        }
    }

    pub(crate) fn with_peer(mut self, peer: SocketAddr) -> Self {
        self.peer = Some(peer);
        self
    }

    /// The address of the client, when the stream is a socket.
    pub fn peer_addr(&self) -> Option<SocketAddr> {
        self.peer
    }

    /// Read the request with a single read call and validate it.
    ///
    /// The bytes are consumed; nothing is read past the first read, so
    /// pipelined requests are not supported.
    pub async fn get_request(mut self) -> Result<Request<S>, Rejected<S>> {
        let mut buf = vec![0; self.read_buffer_size];

        let n = match self.stream.read(&mut buf).await {
            Ok(n) => n,
            Err(e) => {
                error!("Failed to read request from {peer}: {e}", peer = self.peer_label());
                return Err(Rejected {
                    error: Error::Io(e),
                    connection: self,
                });
            }
        };

        match parse_request(&buf[..n], self.max_path_len) {
            Ok(line) => Ok(Request {
                line,
                connection: self,
            }),
            Err(e) => {
                warn!("Rejected request from {peer}: {e}", peer = self.peer_label());
                Err(Rejected {
                    error: e.into(),
                    connection: self,
                })
            }
        }
    }

    /// Answer with a `404 Not Found` page carrying `message`, then close.
    pub async fn return_error(self, message: &str) -> Result<(), Error> {
        self.respond(&ResponseHead::not_found(message), message.as_bytes())
            .await
    }

    /// Close without answering.
    pub async fn discard(mut self) {
        self.close().await;
    }

    /// Write `head` line by line, then `body`, then close.
    ///
    /// The first failed write stops the response. The stream is closed on
    /// every path.
    async fn respond(mut self, head: &ResponseHead, body: &[u8]) -> Result<(), Error> {
        let written = self.write_response(head, body).await;
        if let Err(e) = &written {
            error!("Write failed to {peer}: {e}", peer = self.peer_label());
        }
        self.close().await;
        written.map_err(Error::Io)
    }

    async fn write_response(&mut self, head: &ResponseHead, body: &[u8]) -> io::Result<()> {
        for line in head.lines() {
            self.stream.write_all(line.as_bytes()).await?;
        }
        self.stream.write_all(body).await?;
        self.stream.flush().await
    }

    async fn close(&mut self) {
        if let Err(e) = self.stream.shutdown().await {
            debug!("Failed to shut down connection to {peer}: {e}", peer = self.peer_label());
        }
    }
}

impl<S> Connection<S> {
    fn peer_label(&self) -> String {
        match self.peer {
            Some(peer) => peer.to_string(),
            None => "client".to_string(),
        }
    }
}

impl<S> fmt::Debug for Connection<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Connection")
            .field("peer", &self.peer)
            .field("read_buffer_size", &self.read_buffer_size)
            .field("max_path_len", &self.max_path_len)
            .finish_non_exhaustive()
    }
}

/// A connection whose request passed validation.
pub struct Request<S = TcpStream> {
    line: RequestLine,
    connection: Connection<S>,
}

impl<S> Request<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    /// The validated path.
    pub fn path(&self) -> &str {
        self.line.path()
    }

    pub fn method(&self) -> Method {
        self.line.method
    }

    pub fn peer_addr(&self) -> Option<SocketAddr> {
        self.connection.peer_addr()
    }

    /// Answer `200 OK` with `body` as `content_type`, then close.
    pub async fn return_result(self, content_type: &str, body: &[u8]) -> Result<(), Error> {
        debug!(
            "Returning {path} as {content_type} ({len} bytes)",
            path = self.line.path,
            len = body.len()
        );
        self.connection
            .respond(&ResponseHead::ok(content_type, body), body)
            .await
    }

    /// Answer with a `404 Not Found` page, e.g. when the file cannot be read.
    pub async fn return_error(self, message: &str) -> Result<(), Error> {
        self.connection.return_error(message).await
    }
}

/// A connection whose request could not be read or was refused.
///
/// It can still be answered with an error page, or discarded.
pub struct Rejected<S = TcpStream> {
    error: Error,
    connection: Connection<S>,
}

impl<S> Rejected<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    /// Why the request was refused.
    pub fn error(&self) -> &Error {
        &self.error
    }

    pub fn kind(&self) -> ErrorKind {
        self.error.kind()
    }

    pub fn peer_addr(&self) -> Option<SocketAddr> {
        self.connection.peer_addr()
    }

    /// Answer with a `404 Not Found` page, then close.
    pub async fn return_error(self, message: &str) -> Result<(), Error> {
        self.connection.return_error(message).await
    }

    /// Close without answering and give back the error.
    pub async fn discard(self) -> Error {
        self.connection.discard().await;
        self.error
    }
}

impl<S> fmt::Debug for Request<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Request")
            .field("line", &self.line)
            .field("connection", &self.connection)
            .finish()
    }
}

impl<S> fmt::Debug for Rejected<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rejected")
            .field("error", &self.error)
            .field("connection", &self.connection)
            .finish()
    }
}
