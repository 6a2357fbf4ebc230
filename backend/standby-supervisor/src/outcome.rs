use std::fmt;

/// How supervision ended. Every variant maps to a clean exit: the only
/// failing exit is a fallback bind error, which surfaces as `Err` instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Primary chose to stop with exit code 0
    PrimaryExited,
    /// SIGINT/SIGTERM received
    ShutdownRequested,
    /// Fallback server returned without error
    FallbackStopped,
}

impl Outcome {
    pub fn exit_code(&self) -> u8 {
        0
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::PrimaryExited => "primary exited cleanly",
            Self::ShutdownRequested => "shutdown requested",
            Self::FallbackStopped => "fallback server stopped",
        };
        f.write_str(text)
    }
}
