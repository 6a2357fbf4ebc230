//! Secondary HTTP responder used when the primary application cannot run.
//!
//! Serves `GET /health` and a static landing page on the shared port. It has
//! no shutdown hook: callers stop it by dropping the serve future.

pub mod error;
pub mod fallback_state;
pub mod health;
pub mod landing;
pub mod routes;
pub mod server;


pub use error::{FallbackError, Result as FallbackResult};
pub use fallback_state::FallbackState;
pub use routes::build_router;
pub use server::{BoundFallback, FallbackServer};
