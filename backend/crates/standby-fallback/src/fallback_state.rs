/// Shared state for the fallback routes.
#[derive(Debug, Clone)]
pub struct FallbackState {
    /// Port actually bound (reported by `/health`)
    pub port: u16,
    /// Active environment mode, if the platform set one
    pub environment: Option<String>,
}
