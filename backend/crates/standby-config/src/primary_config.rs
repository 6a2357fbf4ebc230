use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_FATAL_MARKERS, DEFAULT_PRIMARY_APP,
    DEFAULT_PRIMARY_ENTRY_POINT, DEFAULT_PRIMARY_PROGRAM, DEFAULT_PRIMARY_THREADS,
    DEFAULT_PRIMARY_TIMEOUT_SECS, DEFAULT_PRIMARY_VERSION_ARG, DEFAULT_PRIMARY_WORKERS,
    MIN_PRIMARY_THREADS, MIN_PRIMARY_TIMEOUT_SECS, MIN_PRIMARY_WORKERS, ServerConfig,
};

use std::path::PathBuf;

use serde::Deserialize;

/// How to probe and launch the primary application server.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PrimaryConfig {
    /// Executable of the primary runtime (looked up on PATH)
    pub program: String,
    /// Application target passed as the first argument
    pub app: String,
    /// Argument that makes `program` print its version and exit
    pub version_arg: String,
    /// File that must exist before the primary is attempted
    pub entry_point: PathBuf,
    /// Worker timeout forwarded as `--timeout`
    pub timeout_secs: u64,
    pub workers: u32,
    pub threads: u32,
    /// Substrings on stderr that mean the primary cannot import its code
    pub fatal_markers: Vec<String>,
}

impl Default for PrimaryConfig {
    fn default() -> Self {
        Self {
            program: String::from(DEFAULT_PRIMARY_PROGRAM),
            app: String::from(DEFAULT_PRIMARY_APP),
            version_arg: String::from(DEFAULT_PRIMARY_VERSION_ARG),
            entry_point: PathBuf::from(DEFAULT_PRIMARY_ENTRY_POINT),
            timeout_secs: DEFAULT_PRIMARY_TIMEOUT_SECS,
            workers: DEFAULT_PRIMARY_WORKERS,
            threads: DEFAULT_PRIMARY_THREADS,
            fatal_markers: DEFAULT_FATAL_MARKERS.iter().map(|m| m.to_string()).collect(),
        }
    }
}

impl PrimaryConfig {
    /// Command-line arguments for the primary, bound to the server port.
    pub fn args(&self, server: &ServerConfig) -> Vec<String> {
        vec![
            self.app.clone(),
            String::from("--bind"),
            server.bind_arg(),
            String::from("--timeout"),
            self.timeout_secs.to_string(),
            String::from("--workers"),
            self.workers.to_string(),
            String::from("--threads"),
            self.threads.to_string(),
        ]
    }

    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.program.trim().is_empty() {
            return Err(ConfigError::primary("primary.program must not be empty"));
        }

        if self.app.trim().is_empty() {
            return Err(ConfigError::primary("primary.app must not be empty"));
        }

        if self.timeout_secs < MIN_PRIMARY_TIMEOUT_SECS {
            return Err(ConfigError::primary(format!(
                "primary.timeout_secs must be >= {}, got {}",
                MIN_PRIMARY_TIMEOUT_SECS, self.timeout_secs
            )));
        }

        if self.workers < MIN_PRIMARY_WORKERS {
            return Err(ConfigError::primary(format!(
                "primary.workers must be >= {}, got {}",
                MIN_PRIMARY_WORKERS, self.workers
            )));
        }

        if self.threads < MIN_PRIMARY_THREADS {
            return Err(ConfigError::primary(format!(
                "primary.threads must be >= {}, got {}",
                MIN_PRIMARY_THREADS, self.threads
            )));
        }

        if self.fatal_markers.is_empty() {
            return Err(ConfigError::primary(
                "primary.fatal_markers must list at least one marker",
            ));
        }

        if self.fatal_markers.iter().any(|m| m.is_empty()) {
            return Err(ConfigError::primary(
                "primary.fatal_markers must not contain empty markers",
            ));
        }

        Ok(())
    }
}
