/// Point-in-time answer to "can the primary run here?".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeResult {
    pub available: bool,
    pub reason: Option<String>,
}

impl ProbeResult {
    pub fn available() -> Self {
        Self {
            available: true,
            reason: None,
        }
    }

    pub fn unavailable<S: Into<String>>(reason: S) -> Self {
        Self {
            available: false,
            reason: Some(reason.into()),
        }
    }
}
