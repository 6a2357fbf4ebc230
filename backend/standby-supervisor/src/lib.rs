pub mod error;
pub mod error_scanner;
pub mod failure_trigger;
pub mod fallback;
pub mod inspector;
pub mod logger;
pub mod outcome;
pub mod primary_command;
pub mod probe_result;
pub mod prober;
pub mod signal;
pub mod supervision_state;
pub mod supervisor;

#[cfg(test)]
mod tests;

pub use error::{Result as SupervisorResult, SupervisorError};
pub use error_scanner::ErrorScanner;
pub use failure_trigger::FailureTrigger;
pub use fallback::Fallback;
pub use outcome::Outcome;
pub use primary_command::PrimaryCommand;
pub use probe_result::ProbeResult;
pub use prober::AvailabilityProber;
pub use supervision_state::SupervisionState;
pub use supervisor::Supervisor;
