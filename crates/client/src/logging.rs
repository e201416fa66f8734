//! Tracing setup for the kiosk binary.
//!
//! Logs go to stderr and to a per-session file under the platform cache
//! directory:
//! - macOS: `~/Library/Caches/kiosk/logs/<session>/kiosk.log`
//! - Linux: `~/.cache/kiosk/logs/<session>/kiosk.log`
//! - Windows: `%LOCALAPPDATA%\kiosk\logs\<session>\kiosk.log`
//! - Fallback: `/tmp/kiosk/logs/<session>/kiosk.log`
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

pub const LOG_FILE_NAME: &str = "kiosk.log";

/// Platform-specific log directory for the kiosk.
pub fn log_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "kiosk")
        .map(|dirs| dirs.cache_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("/tmp/kiosk"))
        .join("logs")
}

/// Session name used for the log directory when none is configured.
pub fn default_session_id() -> String {
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or_default();
    format!("session_{timestamp}")
}

/// Install the global subscriber.
///
/// The returned guard flushes the file writer on drop and must be held for
/// the lifetime of the process.
pub fn setup_logging(session_id: Option<&str>) -> Result<WorkerGuard> {
    let session_id = session_id.map_or_else(default_session_id, str::to_string);
    let session_log_dir = log_dir().join(&session_id);
    std::fs::create_dir_all(&session_log_dir).with_context(|| {
        format!(
            "Failed to create log directory: {}",
            session_log_dir.display()
        )
    })?;

    let file_appender = tracing_appender::rolling::never(&session_log_dir, LOG_FILE_NAME);
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

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
        .try_init()
        .context("Failed to install tracing subscriber")?;

    tracing::info!(session = %session_id, "logging initialized");
    tracing::info!(
        "Log file: {}",
        session_log_dir.join(LOG_FILE_NAME).display()
    );

    Ok(guard)
}
