//! Process configuration loaded via OrthoConfig.
//!
//! Values come from CLI flags, `USERS_*` environment variables and an
//! optional config file, falling back to the defaults below.

use std::io;
use std::net::{SocketAddr, ToSocketAddrs};

use ortho_config::OrthoConfig;
use serde::Deserialize;

/// Host bound when none is configured.
pub const DEFAULT_HOST: &str = "0.0.0.0";
/// Port bound when none is configured.
pub const DEFAULT_PORT: u16 = 3000;

/// Failures turning settings into a listen address.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// The host/port pair could not be resolved.
    #[error("invalid bind address {host}:{port}: {source}")]
    InvalidBindAddress {
        host: String,
        port: u16,
        #[source]
        source: io::Error,
    },
    /// Resolution succeeded but yielded no address.
    #[error("bind address {host}:{port} resolved to nothing")]
    NoAddress { host: String, port: u16 },
}

/// Server settings.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "USERS")]
pub struct AppSettings {
    /// Interface to listen on.
    pub host: Option<String>,
    /// TCP port to listen on.
    pub port: Option<u16>,
    /// Emit logs as JSON lines instead of human-readable text.
    #[ortho_config(default = false)]
    pub json_logs: bool,
}

impl AppSettings {
    /// Configured host, or [`DEFAULT_HOST`].
    pub fn host(&self) -> &str {
        self.host.as_deref().unwrap_or(DEFAULT_HOST)
    }

    /// Configured port, or [`DEFAULT_PORT`].
    pub fn port(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }

    /// Resolve the socket address the server binds to.
    ///
    /// # Errors
    /// Returns [`SettingsError`] when the host cannot be resolved.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let (host, port) = (self.host(), self.port());
        let mut addrs = (host, port).to_socket_addrs().map_err(|source| {
            SettingsError::InvalidBindAddress {
                host: host.to_owned(),
                port,
                source,
            }
        })?;
        addrs.next().ok_or_else(|| SettingsError::NoAddress {
            host: host.to_owned(),
            port,
        })
    }
}
