/// Which server currently owns the port.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SupervisionState {
    /// Nothing launched yet
    NotStarted,
    /// Primary child process is running
    RunningPrimary { pid: Option<u32> },
    /// Fallback server owns the port; never left except for shutdown
    RunningSecondary { port: u16 },
    /// Termination signal received, or the primary exited cleanly
    ShuttingDown,
}

impl SupervisionState {
    /// The fallback transition is allowed at most once, and not during shutdown.
    pub fn can_fall_back(&self) -> bool {
        matches!(self, Self::NotStarted | Self::RunningPrimary { .. })
    }
}
