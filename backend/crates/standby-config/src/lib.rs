mod config;
mod environment_config;
mod error;
mod log_level;
mod logging_config;
mod primary_config;
mod server_config;

#[cfg(test)]
mod tests;

pub use config::Config;
pub use environment_config::EnvironmentConfig;
pub use error::{ConfigError, ConfigErrorResult};
pub use log_level::LogLevel;
pub use logging_config::LoggingConfig;
pub use primary_config::PrimaryConfig;
pub use server_config::ServerConfig;

// Server
const DEFAULT_PORT: u16 = 10000;
const BIND_HOST: &str = "0.0.0.0";

// Primary (mirrors the start command declared in deploy/render.yaml)
const DEFAULT_PRIMARY_PROGRAM: &str = "gunicorn";
const DEFAULT_PRIMARY_APP: &str = "wsgi:app";
const DEFAULT_PRIMARY_ENTRY_POINT: &str = "wsgi.py";
const DEFAULT_PRIMARY_VERSION_ARG: &str = "--version";
const DEFAULT_PRIMARY_TIMEOUT_SECS: u64 = 120;
const DEFAULT_PRIMARY_WORKERS: u32 = 1;
const DEFAULT_PRIMARY_THREADS: u32 = 4;
const DEFAULT_FATAL_MARKERS: [&str; 2] = ["ImportError", "ModuleNotFoundError"];
const MIN_PRIMARY_TIMEOUT_SECS: u64 = 1;
const MIN_PRIMARY_WORKERS: u32 = 1;
const MIN_PRIMARY_THREADS: u32 = 1;

// Logging
const DEFAULT_LOG_LEVEL_STRING: &str = "info";
const DEFAULT_LOG_LEVEL: log::LevelFilter = log::LevelFilter::Info;
const DEFAULT_LOG_COLORED: bool = false;

// Environment
const CONFIG_FILE_ENV: &str = "STANDBY_CONFIG_FILE";
