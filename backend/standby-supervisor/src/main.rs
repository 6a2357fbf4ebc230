use standby_fallback::FallbackServer;
use standby_supervisor::{Supervisor, logger, signal};

use std::error::Error;
use std::process::ExitCode;

use log::info;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode, Box<dyn Error>> {
    // Load and validate configuration
    let config = standby_config::Config::load()?;
    config.validate()?;

    // Initialize logger (before any other logging)
    logger::initialize(config.logging.level, config.logging.colored)?;

    info!("Starting standby v{}", env!("CARGO_PKG_VERSION"));
    config.log_summary();

    let fallback = FallbackServer::from_config(&config);
    let supervisor = Supervisor::new(config, fallback);

    // A fallback bind failure propagates from here as a non-zero exit
    let outcome = supervisor.run(signal::shutdown_signal()).await?;

    info!("Exiting: {}", outcome);
    Ok(ExitCode::from(outcome.exit_code()))
}
