use crate::{
    CONFIG_FILE_ENV, ConfigError, ConfigErrorResult, EnvironmentConfig, LoggingConfig,
    PrimaryConfig, ServerConfig,
};

use std::path::{Path, PathBuf};

use log::info;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub environment: EnvironmentConfig,
    pub primary: PrimaryConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Build the runtime configuration once at startup.
    ///
    /// Loading order:
    /// 1. Load `.env` from the working directory if present
    /// 2. Load the TOML file named by STANDBY_CONFIG_FILE, else use defaults
    /// 3. Apply environment variable overrides (PORT, NODE_ENV, STANDBY_*, ...)
    ///
    /// Does NOT validate - call validate() after load().
    pub fn load() -> ConfigErrorResult<Self> {
        let _ = dotenvy::dotenv();

        let mut config = match std::env::var(CONFIG_FILE_ENV) {
            Ok(path) if !path.is_empty() => Self::load_toml(Path::new(&path))?,
            _ => Config::default(),
        };

        config.apply_env_overrides();

        Ok(config)
    }

    /// Load and parse TOML file with detailed error context.
    fn load_toml(path: &Path) -> ConfigErrorResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: PathBuf::from(path),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::Toml {
            path: PathBuf::from(path),
            source: e,
        })
    }

    /// Validate all configuration.
    /// Call after load() to catch all errors at startup.
    pub fn validate(&self) -> ConfigErrorResult<()> {
        self.primary.validate()?;

        Ok(())
    }

    /// Primary invocation arguments for the configured port.
    pub fn primary_args(&self) -> Vec<String> {
        self.primary.args(&self.server)
    }

    /// Log configuration summary (NEVER logs secrets).
    pub fn log_summary(&self) {
        info!("Configuration loaded:");
        info!("  server: {}", self.server.bind_addr());
        info!(
            "  primary: {} {} (entry point: {})",
            self.primary.program,
            self.primary_args().join(" "),
            self.primary.entry_point.display()
        );
        info!("  fatal markers: {:?}", self.primary.fatal_markers);
        info!(
            "  logging: {} (colored: {})",
            self.logging.level, self.logging.colored
        );
    }

    fn apply_env_overrides(&mut self) {
        // Platform-provided
        Self::apply_env_parse("PORT", &mut self.server.port);
        Self::apply_env_option_string("NODE_ENV", &mut self.environment.node_env);
        Self::apply_env_option_string("FLASK_ENV", &mut self.environment.flask_env);
        Self::apply_env_option_string("FLASK_DEBUG", &mut self.environment.flask_debug);
        Self::apply_env_presence(
            "OPENAI_API_KEY",
            &mut self.environment.openai_key_present,
        );
        Self::apply_env_presence(
            "PERPLEXITY_API_KEY",
            &mut self.environment.perplexity_key_present,
        );

        // Primary
        Self::apply_env_string("STANDBY_PRIMARY_PROGRAM", &mut self.primary.program);
        Self::apply_env_string("STANDBY_PRIMARY_APP", &mut self.primary.app);
        Self::apply_env_string(
            "STANDBY_PRIMARY_VERSION_ARG",
            &mut self.primary.version_arg,
        );
        Self::apply_env_parse(
            "STANDBY_PRIMARY_ENTRY_POINT",
            &mut self.primary.entry_point,
        );
        Self::apply_env_parse(
            "STANDBY_PRIMARY_TIMEOUT_SECS",
            &mut self.primary.timeout_secs,
        );
        Self::apply_env_parse("STANDBY_PRIMARY_WORKERS", &mut self.primary.workers);
        Self::apply_env_parse("STANDBY_PRIMARY_THREADS", &mut self.primary.threads);
        Self::apply_env_list(
            "STANDBY_PRIMARY_FATAL_MARKERS",
            &mut self.primary.fatal_markers,
        );

        // Logging
        Self::apply_env_parse("STANDBY_LOG_LEVEL", &mut self.logging.level);
        Self::apply_env_bool("STANDBY_LOG_COLORED", &mut self.logging.colored);
    }

    /// Helper: Apply environment variable override for String values
    fn apply_env_string(var_name: &str, target: &mut String) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val;
        }
    }

    /// Helper: Apply environment variable override for bool values (accepts "true"/"1")
    fn apply_env_bool(var_name: &str, target: &mut bool) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val == "true" || val == "1";
        }
    }

    /// Helper: Apply environment variable override for parseable values.
    /// Unparseable values leave the current value in place.
    fn apply_env_parse<T: std::str::FromStr>(var_name: &str, target: &mut T) {
        if let Ok(val) = std::env::var(var_name)
            && let Ok(parsed) = val.trim().parse()
        {
            *target = parsed;
        }
    }

    /// Helper: Apply environment variable override for Option<String> values
    fn apply_env_option_string(var_name: &str, target: &mut Option<String>) {
        if let Ok(val) = std::env::var(var_name) {
            *target = Some(val);
        }
    }

    /// Helper: Record whether a variable is set to a non-empty value
    fn apply_env_presence(var_name: &str, target: &mut bool) {
        *target = std::env::var(var_name).is_ok_and(|val| !val.is_empty());
    }

    /// Helper: Apply a comma-separated list override, skipping blank items
    fn apply_env_list(var_name: &str, target: &mut Vec<String>) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val
                .split(',')
                .map(str::trim)
                .filter(|item| !item.is_empty())
                .map(String::from)
                .collect();
        }
    }
}
