mod primary;

use std::env;

/// Variables read by `Config::load`; cleared so the host shell cannot leak in.
const CONFIG_ENV_VARS: [&str; 17] = [
    "STANDBY_CONFIG_FILE",
    "PORT",
    "NODE_ENV",
    "FLASK_ENV",
    "FLASK_DEBUG",
    "OPENAI_API_KEY",
    "PERPLEXITY_API_KEY",
    "STANDBY_PRIMARY_PROGRAM",
    "STANDBY_PRIMARY_APP",
    "STANDBY_PRIMARY_VERSION_ARG",
    "STANDBY_PRIMARY_ENTRY_POINT",
    "STANDBY_PRIMARY_TIMEOUT_SECS",
    "STANDBY_PRIMARY_WORKERS",
    "STANDBY_PRIMARY_THREADS",
    "STANDBY_PRIMARY_FATAL_MARKERS",
    "STANDBY_LOG_LEVEL",
    "STANDBY_LOG_COLORED",
];

/// RAII guard for environment variables - automatically restores on drop
pub(crate) struct EnvGuard {
    key: &'static str,
    original: Option<String>,
}

impl EnvGuard {
    pub(crate) fn set(key: &'static str, value: &str) -> Self {
        unsafe {
            let original = env::var(key).ok();
            env::set_var(key, value);
            Self { key, original }
        }
    }

    pub(crate) fn remove(key: &'static str) -> Self {
        unsafe {
            let original = env::var(key).ok();
            env::remove_var(key);
            Self { key, original }
        }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        unsafe {
            match &self.original {
                Some(val) => env::set_var(self.key, val),
                None => env::remove_var(self.key),
            }
        }
    }
}

/// Remove every config variable for the duration of a test
pub(crate) fn clean_env() -> Vec<EnvGuard> {
    CONFIG_ENV_VARS.iter().map(|key| EnvGuard::remove(key)).collect()
}
