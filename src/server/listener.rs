//! The listening socket and the acceptor.

use std::io;
use std::net::{Ipv4Addr, SocketAddr};

use log::{debug, error, info, warn};
use tokio::net::{TcpListener, TcpSocket, TcpStream};

use crate::server::config::ServerConfig;
use crate::server::connection::Connection;
use crate::server::error::{Error, StartupStage};

/// A bound, listening IPv4 socket.
///
/// Accepting only needs `&self`, so one listener can be shared (for example
/// behind an `Arc`) by any number of tasks accepting at the same time.
#[derive(Debug)]
pub struct Listener {
    inner: TcpListener,
    config: ServerConfig,
}

fn startup_error(stage: StartupStage, port: u16) -> impl FnOnce(io::Error) -> Error {
    move |source| Error::Startup {
        stage,
        port,
        source,
    }
}

impl Listener {
    /// Listen on `port` on all interfaces with the default settings.
    ///
    /// See [`Listener::bind`].
    pub async fn init(port: u16) -> Result<Self, Error> {
        Self::bind(&ServerConfig::with_port(port)).await
    }

    /// Create the socket, bind it to all interfaces and start listening.
    ///
    /// A listener that cannot be set up leaves nothing to serve with, so
    /// callers should treat an error here as the end of the process.
    ///
    /// Nothing here is awaited. The function is `async` because the socket is
    /// registered with the tokio reactor, which must be running, and so that
    /// it reads like [`Listener::accept_connection`].
    pub async fn bind(config: &ServerConfig) -> Result<Self, Error> {
        config.validate()?;

        let inner = match Self::listen(config) {
            Ok(inner) => inner,
            Err(e) => {
                error!("{e}");
                return Err(e);
            }
        };

        match inner.local_addr() {
            Ok(addr) => info!("Listening on http://{addr} (backlog {})", config.backlog),
            Err(e) => info!("Listening on port {} ({e})", config.port),
        }

        Ok(Self {
            inner,
            config: config.clone(),
        })
    }

    fn listen(config: &ServerConfig) -> Result<TcpListener, Error> {
        let addr = SocketAddr::from((Ipv4Addr::UNSPECIFIED, config.port));

        let socket = TcpSocket::new_v4().map_err(startup_error(StartupStage::Socket, config.port))?;
        // Not fatal.
        if let Err(e) = socket.set_reuseaddr(true) {
            warn!("Failed to set SO_REUSEADDR on port {port}: {e}", port = config.port);
        }
        socket
            .bind(addr)
            .map_err(startup_error(StartupStage::Bind, config.port))?;
        socket
            .listen(config.backlog)
            .map_err(startup_error(StartupStage::Listen, config.port))
    }

    /// The address the socket is bound to.
    pub fn local_addr(&self) -> Result<SocketAddr, Error> {
        Ok(self.inner.local_addr()?)
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Wait for the next client.
    ///
    /// A failure is logged and returned; it only concerns this attempt and
    /// the caller may simply call again.
    pub async fn accept_connection(&self) -> Result<Connection<TcpStream>, Error> {
        match self.inner.accept().await {
            Ok((stream, peer)) => {
                debug!("Accepted connection from {peer}");
                Ok(Connection::with_limits(stream, &self.config).with_peer(peer))
            }
            Err(e) => {
                error!("Failed to accept connection: {e}");
                Err(Error::Accept(e))
            }
        }
    }
}
