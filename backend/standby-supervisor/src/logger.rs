use crate::error::{Result as SupervisorErrorResult, SupervisorError};

use std::panic::Location;
use std::time::SystemTime;

use error_location::ErrorLocation;
use fern::Dispatch;
use fern::colors::{Color, ColoredLevelConfig};
use log::info;

/// Initialize the global logger with fern, writing to stdout.
///
/// Colors are for interactive terminals; platform log drains get plain text.
#[track_caller]
pub fn initialize(log_level: standby_config::LogLevel, colored: bool) -> SupervisorErrorResult<()> {
    let level_filter = log_level.0;
    let location = ErrorLocation::from(Location::caller());

    let colors = colored.then(|| {
        ColoredLevelConfig::new()
            .trace(Color::Magenta)
            .debug(Color::Blue)
            .info(Color::Green)
            .warn(Color::Yellow)
            .error(Color::Red)
    });

    Dispatch::new()
        .level(level_filter)
        .format(move |out, message, record| {
            let level = match colors {
                Some(colors) => colors.color(record.level()).to_string(),
                None => record.level().to_string(),
            };
            out.finish(format_args!(
                "[{date} - {level}] {message} [{file}:{line}]",
                date = humantime::format_rfc3339(SystemTime::now()),
                level = level,
                message = message,
                file = record.file().unwrap_or("unknown"),
                line = record.line().unwrap_or(0),
            ))
        })
        .chain(std::io::stdout())
        .apply()
        .map_err(|e| SupervisorError::Logger {
            message: format!("Failed to initialize logger: {e}"),
            location,
        })?;

    info!(
        "Logger initialized: level={:?}, colored={}",
        level_filter, colored
    );

    Ok(())
}
