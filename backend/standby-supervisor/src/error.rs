use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SupervisorError {
    #[error("Config error: {0}")]
    Config(#[from] standby_config::ConfigError),

    #[error("Fallback server error: {0}")]
    Fallback(#[from] standby_fallback::FallbackError),

    #[error("Logger error: {message} {location}")]
    Logger {
        message: String,
        location: ErrorLocation,
    },

    #[error("Failed to spawn primary process {program}: {source} {location}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
        location: ErrorLocation,
    },
}

pub type Result<T> = std::result::Result<T, SupervisorError>;
