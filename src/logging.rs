//! File logging setup with tracing
//!
//! The terminal belongs to the UI, so log output goes to a daily rolling file
//! under the XDG state directory. The filter comes from `TWINCMD_LOG`.

use std::path::Path;

use tracing_appender::{
    non_blocking::WorkerGuard,
    rolling::{RollingFileAppender, Rotation},
};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const LOG_ENV: &str = "TWINCMD_LOG";
const LOG_FILE_PREFIX: &str = "twincmd.log";

/// Initialize logging into `log_dir`.
///
/// The returned guard flushes pending lines when dropped, keep it alive until exit.
pub fn init_logging(log_dir: &Path) -> std::io::Result<WorkerGuard> {
    std::fs::create_dir_all(log_dir)?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, log_dir, LOG_FILE_PREFIX);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));

    // A second init (e.g. from tests) is harmless, keep the first subscriber
    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_ansi(false).with_writer(non_blocking))
        .try_init();

    tracing::info!(dir = %log_dir.display(), "logging initialized");
    Ok(guard)
}
