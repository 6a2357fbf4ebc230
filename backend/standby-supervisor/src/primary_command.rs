use crate::{SupervisorError, SupervisorResult};

use std::panic::Location;
use std::process::Stdio;

use error_location::ErrorLocation;
use log::info;
use standby_config::Config;
use tokio::process::{Child, Command};

/// Fully resolved invocation of the primary server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrimaryCommand {
    pub program: String,
    pub args: Vec<String>,
    pub port: u16,
}

impl PrimaryCommand {
    pub fn from_config(config: &Config) -> Self {
        Self {
            program: config.primary.program.clone(),
            args: config.primary_args(),
            port: config.server.port,
        }
    }

    /// Spawn with piped stdout/stderr. The child is killed if its handle is
    /// dropped, so it can never outlive the supervisor's ownership of it.
    ///
    /// On Unix the child leads its own process group, so the workers it
    /// forks can be killed together with it.
    pub fn spawn(&self) -> SupervisorResult<Child> {
        info!("Spawning primary: {} {}", self.program, self.args.join(" "));

        let mut command = Command::new(&self.program);
        command
            .args(&self.args)
            .env("PORT", self.port.to_string())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        #[cfg(unix)]
        command.process_group(0);

        command.spawn().map_err(|source| SupervisorError::Spawn {
            program: self.program.clone(),
            source,
            location: ErrorLocation::from(Location::caller()),
        })
    }
}
