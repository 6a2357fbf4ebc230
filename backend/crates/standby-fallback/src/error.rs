use std::net::SocketAddr;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FallbackError {
    #[error("Failed to bind fallback server on {addr}: {source} {location}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
        location: ErrorLocation,
    },

    #[error("Fallback server stopped with an error: {source} {location}")]
    Serve {
        #[source]
        source: std::io::Error,
        location: ErrorLocation,
    },
}

pub type Result<T> = std::result::Result<T, FallbackError>;
