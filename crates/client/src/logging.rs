//! Logging setup for the `autofarm` binary.
use std::path::{Path, PathBuf};

use anyhow::Result;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Platform-specific log directory
///
/// - macOS: `~/Library/Caches/autofarm/logs`
/// - Linux: `~/.cache/autofarm/logs` (or `$XDG_CACHE_HOME/autofarm/logs`)
/// - Windows: `%LOCALAPPDATA%\autofarm\logs`
/// - Fallback: `/tmp/autofarm/logs`
pub fn default_log_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "autofarm")
        .map(|dirs| dirs.cache_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("/tmp/autofarm"))
        .join("logs")
}

/// Initializes stderr and file logging.
///
/// `RUST_LOG` refines the filter; the default level is INFO.
pub fn setup_logging(log_dir: Option<&Path>) -> Result<()> {
    let log_dir = log_dir.map_or_else(default_log_dir, Path::to_path_buf);
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = tracing_appender::rolling::daily(&log_dir, "autofarm.log");
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = EnvFilter::builder()
        .with_default_directive(tracing::Level::INFO.into())
        .from_env_lossy();

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false);
    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    // Keep the file writer alive for the whole process
    std::mem::forget(guard);

    tracing::info!("Log file: {}/autofarm.log", log_dir.display());
    Ok(())
}
