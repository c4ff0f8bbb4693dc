//! Console and run-log setup

use anyhow::Result;
use std::sync::Arc;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

pub const LOG_DIR: &str = "output/logs";
pub const RUNS_DIR: &str = "output/runs";
pub const LOG_FILE_PREFIX: &str = "swap-supply-borrow.log";

/// Keeps the file writer flushing until the process exits.
pub struct LoggingGuard {
    pub _guard: tracing_appender::non_blocking::WorkerGuard,
}

/// Human-readable events on the console and one JSON object per event in
/// a daily log file under [`LOG_DIR`]. `RUST_LOG` overrides the `info`
/// default for both.
pub fn setup_logging() -> Result<Arc<LoggingGuard>> {
    let file_appender = tracing_appender::rolling::daily(LOG_DIR, LOG_FILE_PREFIX);
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::new("info"),
    };

    let console = fmt::layer()
        .with_target(false)
        .with_ansi(true);

    // tx hashes, amounts and stages land as structured fields
    let run_log = fmt::layer()
        .json()
        .with_writer(file_writer)
        .with_target(true)
        .with_current_span(false)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(console)
        .with(run_log)
        .try_init()?;

    Ok(Arc::new(LoggingGuard { _guard: guard }))
}

pub fn setup_output_directories() -> Result<()> {
    std::fs::create_dir_all(LOG_DIR)?;
    std::fs::create_dir_all(RUNS_DIR)?;
    Ok(())
}
