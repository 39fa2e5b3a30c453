use std::path::Path;

use anyhow::Result;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::config::DeployConfig;

/// Default filter when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str =
    "info,sonicpad_app=debug,sonicpad_ignition=debug,sonicpad_networks=debug";

/// Initializes logging with a daily-rotated file under `~/.sonicpad/logs`
/// plus compact console output on stderr.
/// Returns a guard that must be kept alive for the duration of the process.
pub fn init_logging(filter: Option<&str>) -> Result<WorkerGuard> {
    init_logging_to_dir(&DeployConfig::logs_dir()?, filter)
}

/// Same as [`init_logging`] but writes the log file into `logs_dir`.
/// `RUST_LOG` wins over `filter`, which falls back to [`DEFAULT_FILTER`].
pub fn init_logging_to_dir(logs_dir: &Path, filter: Option<&str>) -> Result<WorkerGuard> {
    std::fs::create_dir_all(logs_dir)?;

    let file_appender = tracing_appender::rolling::daily(logs_dir, "sonicpad");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter.unwrap_or(DEFAULT_FILTER)));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_ansi(false)
                .with_writer(non_blocking),
        )
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {e}"))?;

    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_logging_to_dir_creates_directory() {
        let tmp = tempfile::tempdir().expect("Failed to create tempdir");
        let logs_dir = tmp.path().join("nested").join("logs");
        assert!(!logs_dir.exists());

        // Only one global subscriber per process; a second test may lose the
        // race, but the directory is created either way.
        let result = init_logging_to_dir(&logs_dir, Some("warn"));
        assert!(logs_dir.exists());

        if let Err(e) = result {
            assert!(e.to_string().contains("logging"), "unexpected error: {e}");
        }
    }

    #[test]
    fn default_filter_parses() {
        let filter = EnvFilter::try_new(DEFAULT_FILTER);
        assert!(filter.is_ok());
    }
}
