//! Boot-time diagnostic dump of the configuration and working directory.

use std::io;
use std::path::Path;

use log::{info, warn};
use standby_config::Config;

/// Log the platform-provided settings. Secrets are reported by presence only.
/// Never fails.
pub fn inspect(config: &Config) {
    let env = &config.environment;

    info!("Environment:");
    info!("  PORT: {}", config.server.port);
    info!("  NODE_ENV: {}", env.node_env.as_deref().unwrap_or("not set"));
    info!("  FLASK_ENV: {}", env.flask_env.as_deref().unwrap_or("not set"));
    info!("  OPENAI_API_KEY present: {}", env.openai_key_present);
    info!("  PERPLEXITY_API_KEY present: {}", env.perplexity_key_present);
    info!(
        "  FLASK_DEBUG: {} (debug {})",
        env.flask_debug.as_deref().unwrap_or("not set"),
        if env.debug_enabled() { "on" } else { "off" }
    );

    match std::env::current_dir() {
        Ok(cwd) => {
            info!("  working directory: {}", cwd.display());
            inspect_directory(&cwd);
        }
        Err(e) => warn!("Cannot determine working directory: {e}"),
    }
}

/// Log a directory's entries, swallowing any listing error.
pub fn inspect_directory(dir: &Path) {
    match list_directory(dir) {
        Ok(entries) => info!("  contents: {}", entries.join(", ")),
        Err(e) => warn!("Cannot list {}: {e}", dir.display()),
    }
}

/// Sorted entry names of `dir`.
pub fn list_directory(dir: &Path) -> io::Result<Vec<String>> {
    let mut names = std::fs::read_dir(dir)?
        .map(|entry| entry.map(|e| e.file_name().to_string_lossy().into_owned()))
        .collect::<io::Result<Vec<_>>>()?;
    names.sort();
    Ok(names)
}
