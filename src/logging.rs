// File logging setup.
// The terminal belongs to the UI, so tracing output goes to a log file.

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::error::Result;

pub const LOG_FILE: &str = "folio.log";

/// Install a global subscriber writing to `<dir>/folio.log`.
///
/// Filtered by `RUST_LOG`, defaulting to `info`. Keep the guard alive until
/// exit so buffered lines are flushed.
pub fn init(dir: &Path) -> Result<WorkerGuard> {
    std::fs::create_dir_all(dir)?;

    let appender = tracing_appender::rolling::never(dir, LOG_FILE);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(writer)
        .with_ansi(false)
        .init();

    Ok(guard)
}
