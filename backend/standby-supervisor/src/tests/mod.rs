
use crate::Fallback;

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use standby_fallback::FallbackResult;

/// Fallback double that returns immediately without binding anything
pub(crate) struct NoopFallback;

#[async_trait]
impl Fallback for NoopFallback {
    async fn serve(&self, _addr: SocketAddr) -> FallbackResult<()> {
        Ok(())
    }
}

/// Write a shell script that `sh <path>` will run
pub(crate) fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, body).unwrap();
    path
}
