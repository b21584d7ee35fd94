use crate::error::Result;
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Environment variable that overrides where log files are written.
pub const LOG_DIR_ENV: &str = "REFDIFF_LOG_DIR";

/// `$REFDIFF_LOG_DIR` when set, otherwise `~/.refdiff/logs`.
pub fn default_log_dir() -> PathBuf {
    log_dir_from(
        std::env::var_os(LOG_DIR_ENV).map(PathBuf::from),
        std::env::var_os("HOME").map(PathBuf::from),
    )
}

fn log_dir_from(explicit: Option<PathBuf>, home: Option<PathBuf>) -> PathBuf {
    match explicit.filter(|p| !p.as_os_str().is_empty()) {
        Some(dir) => dir,
        None => home
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".refdiff")
            .join("logs"),
    }
}

/// Installs the global subscriber: a daily file named after `component` in
/// `log_dir`, plus stderr when `to_stderr` is set. `RUST_LOG` picks the level.
///
/// The returned guard flushes the file writer on drop and must outlive the run.
pub fn init_logging(component: &str, log_dir: &Path, to_stderr: bool) -> Result<WorkerGuard> {
    std::fs::create_dir_all(log_dir)?;

    let (file_writer, guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::daily(log_dir, component));
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let stderr_layer = to_stderr.then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .without_time()
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(file_writer).with_ansi(false))
        .with(stderr_layer)
        .init();

    tracing::debug!("Logging {} to {}", component, log_dir.display());
    Ok(guard)
}
