//! Preconditions for running the primary, checked without starting it.

use crate::ProbeResult;

use std::path::PathBuf;
use std::process::Stdio;

use log::{debug, info};
use standby_config::PrimaryConfig;
use tokio::process::Command;

pub struct AvailabilityProber {
    program: String,
    version_arg: String,
    entry_point: PathBuf,
}

impl AvailabilityProber {
    pub fn new(program: String, version_arg: String, entry_point: PathBuf) -> Self {
        Self {
            program,
            version_arg,
            entry_point,
        }
    }

    pub fn from_config(primary: &PrimaryConfig) -> Self {
        Self::new(
            primary.program.clone(),
            primary.version_arg.clone(),
            primary.entry_point.clone(),
        )
    }

    /// Check that the runtime answers its version query and that the entry
    /// point exists. No caching and no retry.
    pub async fn probe(&self) -> ProbeResult {
        let output = Command::new(&self.program)
            .arg(&self.version_arg)
            .stdin(Stdio::null())
            .output()
            .await;

        match output {
            Ok(output) if output.status.success() => {
                let version = String::from_utf8_lossy(&output.stdout);
                info!("Primary runtime found: {}", version.trim());
            }
            Ok(output) => {
                let stderr = String::from_utf8_lossy(&output.stderr);
                return ProbeResult::unavailable(format!(
                    "`{} {}` failed with {}: {}",
                    self.program,
                    self.version_arg,
                    output.status,
                    stderr.trim()
                ));
            }
            Err(e) => {
                return ProbeResult::unavailable(format!(
                    "`{} {}` could not be executed: {}",
                    self.program, self.version_arg, e
                ));
            }
        }

        match tokio::fs::try_exists(&self.entry_point).await {
            Ok(true) => {
                debug!("Entry point present: {}", self.entry_point.display());
                ProbeResult::available()
            }
            Ok(false) => ProbeResult::unavailable(format!(
                "entry point {} not found",
                self.entry_point.display()
            )),
            Err(e) => ProbeResult::unavailable(format!(
                "entry point {} could not be checked: {}",
                self.entry_point.display(),
                e
            )),
        }
    }
}
