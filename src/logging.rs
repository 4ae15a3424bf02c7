//! Tracing setup. The terminal belongs to the UI, so events are written to a
//! daily-rolling file in the data directory instead of stderr.

use std::fs;

use anyhow::{anyhow, Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::config::{Config, LOG_FILE_PREFIX};

/// Install the global subscriber. The returned guard flushes buffered lines
/// when dropped, so `main` must hold it until exit.
pub fn init_logging(config: &Config) -> Result<WorkerGuard> {
    let log_dir = config.log_dir();
    fs::create_dir_all(&log_dir).context("failed to create log directory")?;

    let appender = tracing_appender::rolling::daily(&log_dir, LOG_FILE_PREFIX);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(writer)
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|err| anyhow!(err))
        .context("failed to install tracing subscriber")?;

    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creates_log_directory_under_data_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let config = Config::with_data_dir(tmp.path().join("data"));

        let guard = init_logging(&config).unwrap();
        tracing::info!("log directory check");
        drop(guard);

        assert!(config.log_dir().is_dir());
    }
}
