use crate::{BIND_HOST, DEFAULT_PORT};

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use serde::Deserialize;

/// Listening port shared by the primary and the fallback server.
///
/// There is no host setting: the hosting platform probes the port from
/// outside the container, so every listener binds all interfaces.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { port: DEFAULT_PORT }
    }
}

impl ServerConfig {
    /// Socket address the fallback server binds.
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), self.port)
    }

    /// `host:port` form handed to the primary's `--bind` argument.
    pub fn bind_arg(&self) -> String {
        format!("{}:{}", BIND_HOST, self.port)
    }
}
