//! Listener and connection configuration.

use serde::Deserialize;

use crate::parser::DEFAULT_MAX_PATH_LEN;
use crate::server::error::Error;

/// Listener and connection configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// The port to listen on, on all IPv4 interfaces. `0` picks a free port.
    pub port: u16,
    /// The number of pending connections the kernel may queue.
    pub backlog: u32,
    /// The most bytes read from a connection when looking for the request.
    pub read_buffer_size: usize,
    /// The longest path, in bytes, a request may name.
    pub max_path_len: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            backlog: 20,
            read_buffer_size: 2048,
            max_path_len: DEFAULT_MAX_PATH_LEN,
        }
    }
}

impl ServerConfig {
    /// The default configuration on another port.
    pub fn with_port(port: u16) -> Self {
        Self {
            port,
            ..Self::default()
        }
    }

    /// Read a configuration from JSON. Missing fields keep their defaults.
    pub fn from_json(input: &str) -> Result<Self, Error> {
        let config: Self = serde_json::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would make every request fail.
    pub fn validate(&self) -> Result<(), Error> {
        if self.backlog == 0 {
            return Err(Error::InvalidConfig("backlog must be positive".to_string()));
        }
        if self.read_buffer_size == 0 {
            return Err(Error::InvalidConfig("read_buffer_size must be positive".to_string()));
        }
        if self.max_path_len == 0 {
            return Err(Error::InvalidConfig("max_path_len must be positive".to_string()));
        }
        Ok(())
    }
}
