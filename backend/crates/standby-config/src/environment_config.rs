use serde::Deserialize;

/// Advisory flags injected by the hosting platform.
///
/// Only the presence of API keys is recorded; their values are never read
/// into the config.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EnvironmentConfig {
    pub node_env: Option<String>,
    pub flask_env: Option<String>,
    pub flask_debug: Option<String>,
    #[serde(skip)]
    pub openai_key_present: bool,
    #[serde(skip)]
    pub perplexity_key_present: bool,
}

impl EnvironmentConfig {
    /// Environment mode reported by the health endpoint.
    pub fn mode(&self) -> Option<&str> {
        self.node_env.as_deref().or(self.flask_env.as_deref())
    }

    /// Whether `FLASK_DEBUG` is switched on (`true`/`1`, case-insensitive).
    pub fn debug_enabled(&self) -> bool {
        self.flask_debug
            .as_deref()
            .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
            .unwrap_or(false)
    }
}
