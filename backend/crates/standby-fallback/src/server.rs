use crate::{FallbackError, FallbackResult, FallbackState, build_router};

use std::net::SocketAddr;
use std::panic::Location;

use axum::Router;
use error_location::ErrorLocation;
use log::info;
use standby_config::Config;
use tokio::net::TcpListener;

/// Fallback server not yet bound to a port.
#[derive(Debug, Clone, Default)]
pub struct FallbackServer {
    environment: Option<String>,
}

impl FallbackServer {
    pub fn new(environment: Option<String>) -> Self {
        Self { environment }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.environment.mode().map(String::from))
    }

    /// Bind the listener. Failure here is fatal for the whole process: there
    /// is no further tier to hand the port to.
    pub async fn bind(&self, addr: SocketAddr) -> FallbackResult<BoundFallback> {
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| FallbackError::Bind {
                addr,
                source,
                location: ErrorLocation::from(Location::caller()),
            })?;

        // Actual bound address (differs from `addr` when port is 0)
        let local_addr = listener
            .local_addr()
            .map_err(|source| FallbackError::Bind {
                addr,
                source,
                location: ErrorLocation::from(Location::caller()),
            })?;

        let router = build_router(FallbackState {
            port: local_addr.port(),
            environment: self.environment.clone(),
        });

        info!("Fallback server listening on {}", local_addr);

        Ok(BoundFallback {
            listener,
            router,
            local_addr,
        })
    }

    /// Bind and serve until the returned future is dropped.
    pub async fn run(&self, addr: SocketAddr) -> FallbackResult<()> {
        self.bind(addr).await?.serve().await
    }
}

/// Fallback server holding its listener, ready to serve.
pub struct BoundFallback {
    listener: TcpListener,
    router: Router,
    local_addr: SocketAddr,
}

impl BoundFallback {
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    pub async fn serve(self) -> FallbackResult<()> {
        axum::serve(self.listener, self.router)
            .await
            .map_err(|source| FallbackError::Serve {
                source,
                location: ErrorLocation::from(Location::caller()),
            })
    }
}
