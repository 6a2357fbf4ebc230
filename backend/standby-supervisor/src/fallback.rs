use std::net::SocketAddr;

use async_trait::async_trait;
use standby_fallback::{FallbackResult, FallbackServer};

/// Server the supervisor hands the port to once the primary is out.
///
/// `serve` is expected to run until dropped; returning `Err` means the port
/// could not be served at all.
#[async_trait]
pub trait Fallback: Send + Sync {
    async fn serve(&self, addr: SocketAddr) -> FallbackResult<()>;
}

#[async_trait]
impl Fallback for FallbackServer {
    async fn serve(&self, addr: SocketAddr) -> FallbackResult<()> {
        self.run(addr).await
    }
}
