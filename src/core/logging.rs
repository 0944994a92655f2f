//! Logging setup for host binaries and tests
//!
//! The library itself only emits through the `log` facade. Hosts that do not
//! bring their own logger can call [`init_logging`] once at startup.

use flexi_logger::{LogSpecification, Logger, LoggerHandle};
use std::sync::OnceLock;

static LOGGER_HANDLE: OnceLock<LoggerHandle> = OnceLock::new();

/// Initialise the process-wide logger
///
/// `spec` is a `flexi_logger` specification such as `"info"` or
/// `"eventq=debug"`; the `RUST_LOG` environment variable takes precedence.
/// Calling this more than once is a no-op.
pub fn init_logging(spec: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    if LOGGER_HANDLE.get().is_some() {
        return Ok(());
    }

    let handle = Logger::try_with_env_or_str(spec.unwrap_or("info"))?
        .format(flexi_logger::detailed_format)
        .start()?;

    let _ = LOGGER_HANDLE.set(handle);
    Ok(())
}

/// Replace the active log specification at runtime
pub fn reconfigure_logging(spec: &str) -> Result<(), Box<dyn std::error::Error>> {
    match LOGGER_HANDLE.get() {
        Some(handle) => {
            handle.set_new_spec(LogSpecification::parse(spec)?);
            Ok(())
        }
        None => Err("logger is not initialised; call init_logging first".into()),
    }
}
