use std::fmt;

/// Why the supervisor abandoned the primary for the fallback server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureTrigger {
    /// Prober said the primary cannot run at all
    Unavailable { reason: String },
    /// stderr contained a fatal import marker
    FatalOutput { marker: String },
    /// Primary exited non-zero (`None` when killed by a signal)
    AbnormalExit { code: Option<i32> },
    /// Error inside the supervisor while the primary was running
    Internal { message: String },
}

impl fmt::Display for FailureTrigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable { reason } => write!(f, "primary unavailable: {reason}"),
            Self::FatalOutput { marker } => write!(f, "primary reported fatal error: {marker}"),
            Self::AbnormalExit { code: Some(code) } => {
                write!(f, "primary exited with code {code}")
            }
            Self::AbnormalExit { code: None } => write!(f, "primary terminated by signal"),
            Self::Internal { message } => write!(f, "supervisor error: {message}"),
        }
    }
}
