//! Process-wide logging bootstrap for the `divecards` binary.
//!
//! The library only emits through the `log` facade; this module wires it to
//! stderr exactly once per process. `RUST_LOG` overrides the requested level.

use flexi_logger::{Logger, LoggerHandle};
use log::debug;
use once_cell::sync::OnceCell;

static LOGGER: OnceCell<(String, LoggerHandle)> = OnceCell::new();

const LEVELS: [&str; 6] = ["off", "error", "warn", "info", "debug", "trace"];

/// Start stderr logging at `level`.
///
/// Repeating the call with the same level is a no-op; switching to a
/// different level after start is rejected.
pub fn init_logging(level: &str) -> Result<(), String> {
    let level = normalize_level(level)?;

    if let Some((active, _)) = LOGGER.get() {
        if *active == level {
            return Ok(());
        }
        return Err(format!(
            "logging already initialized with level `{active}`; refusing to switch to `{level}`"
        ));
    }

    LOGGER.get_or_try_init(|| -> Result<(String, LoggerHandle), String> {
        let handle = Logger::try_with_env_or_str(&level)
            .map_err(|err| format!("invalid log level `{level}`: {err}"))?
            .log_to_stderr()
            .format(flexi_logger::default_format)
            .start()
            .map_err(|err| format!("failed to start logger: {err}"))?;
        debug!("logging started at level {level}");
        Ok((level.clone(), handle))
    })?;
    Ok(())
}

fn normalize_level(level: &str) -> Result<String, String> {
    let normalized = level.trim().to_ascii_lowercase();
    if LEVELS.contains(&normalized.as_str()) {
        Ok(normalized)
    } else {
        Err(format!(
            "unsupported log level `{level}`; expected one of {}",
            LEVELS.join(", ")
        ))
    }
}
