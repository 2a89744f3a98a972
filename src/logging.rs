//! Tracing setup for the timeline ruler binary.
//!
//! One global subscriber writes to stdout and to a per-launch file under the
//! application logs directory. Only `timeruler_*.log` launch files are pruned.
//! `TIMERULER_LOG` takes precedence over `RUST_LOG`; host bridge reports go to
//! their own `host_bridge` target so they can be filtered separately.

use std::{
    fs::{self, OpenOptions},
    path::{Path, PathBuf},
    sync::OnceLock,
    time::SystemTime,
};

use time::{OffsetDateTime, UtcOffset, format_description::FormatItem, macros::format_description};
use tracing_appender::{non_blocking::WorkerGuard, rolling};
use tracing_subscriber::{EnvFilter, Registry, fmt, prelude::*};

use crate::app_dirs;
use crate::config::RulerSettings;
use crate::timeline::TimeScale;

/// Launch files kept in the logs directory.
const MAX_LOG_FILES: usize = 10;
const LOG_FILE_PREFIX: &str = "timeruler";
/// Filter env var checked before `RUST_LOG`.
pub const LOG_FILTER_ENV: &str = "TIMERULER_LOG";
const DEFAULT_FILTER: &str = "info,host_bridge=info,timeruler::timeline=info";

static LOG_STATE: OnceLock<(WorkerGuard, PathBuf)> = OnceLock::new();

/// Errors that may occur while initializing logging.
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    /// No platform-specific data directory could be resolved.
    #[error("No suitable data directory available for logs")]
    NoDataDir,
    /// Failed to create or access the log directory.
    #[error("Failed to prepare log directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Failed to enumerate existing log files for pruning.
    #[error("Failed to read log directory {path}: {source}")]
    ReadDir {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Failed to remove an obsolete log file.
    #[error("Failed to remove old log file {path}: {source}")]
    RemoveFile {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Failed to format a timestamp for the log filename.
    #[error("Failed to format log filename time: {0}")]
    FormatTime(time::error::Format),
    /// Failed to set the global tracing subscriber.
    #[error("Failed to install global tracing subscriber: {0}")]
    SetGlobal(tracing::subscriber::SetGlobalDefaultError),
    /// Failed to create the log file for this launch.
    #[error("Failed to create log file at {path}: {source}")]
    CreateLogFile {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl From<app_dirs::AppDirError> for LoggingError {
    fn from(error: app_dirs::AppDirError) -> Self {
        match error {
            app_dirs::AppDirError::NoBaseDir => LoggingError::NoDataDir,
            app_dirs::AppDirError::CreateDir { path, source } => {
                LoggingError::CreateDir { path, source }
            }
        }
    }
}

/// Install the stdout + file subscriber and return this launch's log file.
///
/// Subsequent calls return the same path. Errors are returned so `main` can
/// keep running without file logging.
pub fn init() -> Result<PathBuf, LoggingError> {
    if let Some((_, path)) = LOG_STATE.get() {
        return Ok(path.clone());
    }

    let log_dir = app_dirs::logs_dir()?;
    let log_file_name = format_log_file_name(now_local_or_utc())?;
    let log_path = log_dir.join(&log_file_name);
    touch(&log_path)?;
    prune_old_logs(&log_dir, MAX_LOG_FILES)?;

    let (file_writer, guard) = tracing_appender::non_blocking(rolling::never(&log_dir, log_file_name));
    let timer = build_timer();
    let stdout_layer = fmt::layer()
        .with_timer(timer.clone())
        .with_writer(std::io::stdout);
    let file_layer = fmt::layer()
        .with_ansi(false)
        .with_timer(timer)
        .with_writer(file_writer);

    let subscriber = Registry::default()
        .with(build_env_filter())
        .with(stdout_layer)
        .with(file_layer);
    tracing::subscriber::set_global_default(subscriber).map_err(LoggingError::SetGlobal)?;
    let _ = LOG_STATE.set((guard, log_path.clone()));

    tracing::info!("Logging initialized; log file at {}", log_path.display());
    Ok(log_path)
}

/// Record the settings the ruler starts with.
pub fn log_startup_context(settings: &RulerSettings) {
    let scale = TimeScale::new(settings.scale, settings.tick_pixels, settings.duration_seconds);
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        seconds_per_tick = settings.scale,
        tick_pixels = settings.tick_pixels,
        pixels_per_second = scale.pixels_per_second().unwrap_or_default(),
        duration = settings.duration_seconds,
        render_width = scale.render_width(settings.min_ruler_width),
        frame_rate = %format_args!("{}/{}", settings.frame_rate.num, settings.frame_rate.den),
        host_bridge = settings.host_bridge,
        "Timeline ruler starting"
    );
}

fn touch(path: &Path) -> Result<(), LoggingError> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map(|_| ())
        .map_err(|source| LoggingError::CreateLogFile {
            path: path.to_path_buf(),
            source,
        })
}

fn prune_old_logs(dir: &Path, max_files: usize) -> Result<(), LoggingError> {
    let mut entries = fs::read_dir(dir)
        .map_err(|source| LoggingError::ReadDir {
            path: dir.to_path_buf(),
            source,
        })?
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().map(|ft| ft.is_file()).unwrap_or(false))
        .filter(|entry| is_launch_log(&entry.path()))
        .map(|entry| {
            let modified = entry
                .metadata()
                .and_then(|meta| meta.modified())
                .unwrap_or(SystemTime::UNIX_EPOCH);
            (modified, entry.path())
        })
        .collect::<Vec<_>>();

    if entries.len() <= max_files {
        return Ok(());
    }
    entries.sort_by_key(|(modified, _)| *modified);
    let excess = entries.len() - max_files;
    for (_, path) in entries.into_iter().take(excess) {
        fs::remove_file(&path).map_err(|source| LoggingError::RemoveFile { path, source })?;
    }
    Ok(())
}

fn is_launch_log(path: &Path) -> bool {
    let is_log = path.extension().and_then(|ext| ext.to_str()) == Some("log");
    let ours = path
        .file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.starts_with(&format!("{LOG_FILE_PREFIX}_")));
    is_log && ours
}

fn format_log_file_name(now: OffsetDateTime) -> Result<String, LoggingError> {
    const NAME_FORMAT: &[FormatItem<'_>] =
        format_description!("[year]-[month]-[day]_[hour]-[minute]-[second]");
    let name = now.format(NAME_FORMAT).map_err(LoggingError::FormatTime)?;
    Ok(format!("{LOG_FILE_PREFIX}_{name}.log"))
}

fn build_timer() -> fmt::time::OffsetTime<time::format_description::BorrowedFormatItem<'static>> {
    const DISPLAY_FORMAT: &[FormatItem<'static>] =
        format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
    let offset = UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC);
    fmt::time::OffsetTime::new(offset, DISPLAY_FORMAT.into())
}

fn now_local_or_utc() -> OffsetDateTime {
    OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc())
}

fn build_env_filter() -> EnvFilter {
    let directives = filter_directives(
        std::env::var(LOG_FILTER_ENV).ok(),
        std::env::var(EnvFilter::DEFAULT_ENV).ok(),
    );
    EnvFilter::try_new(&directives).unwrap_or_else(|err| {
        eprintln!("Ignoring invalid log filter {directives:?}: {err}");
        EnvFilter::new(DEFAULT_FILTER)
    })
}

/// Pick the first non-empty filter: ruler-specific, then `RUST_LOG`, then the default.
fn filter_directives(ruler: Option<String>, rust_log: Option<String>) -> String {
    [ruler, rust_log]
        .into_iter()
        .flatten()
        .map(|value| value.trim().to_string())
        .find(|value| !value.is_empty())
        .unwrap_or_else(|| DEFAULT_FILTER.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{thread, time::Duration};
    use tempfile::tempdir;

    fn log_count(dir: &Path) -> usize {
        fs::read_dir(dir)
            .unwrap()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().extension().and_then(|ext| ext.to_str()) == Some("log"))
            .count()
    }

    #[test]
    fn log_filename_has_timestamp_and_prefix() {
        let fixed = OffsetDateTime::from_unix_timestamp(1_700_000_000).unwrap();
        let name = format_log_file_name(fixed).unwrap();
        assert_eq!(name, "timeruler_2023-11-14_22-13-20.log");
    }

    #[test]
    fn prune_removes_oldest_files_beyond_limit() {
        let dir = tempdir().unwrap();
        for idx in 0..12 {
            touch(&dir.path().join(format!("timeruler_{idx}.log"))).unwrap();
            thread::sleep(Duration::from_millis(10));
        }

        prune_old_logs(dir.path(), 10).unwrap();
        assert_eq!(log_count(dir.path()), 10);
        assert!(!dir.path().join("timeruler_0.log").exists());
        assert!(dir.path().join("timeruler_11.log").exists());
    }

    #[test]
    fn prune_only_touches_launch_logs() {
        let dir = tempdir().unwrap();
        touch(&dir.path().join("notes.txt")).unwrap();
        touch(&dir.path().join("host_capture.log")).unwrap();
        touch(&dir.path().join("timeruler_a.log")).unwrap();
        prune_old_logs(dir.path(), 0).unwrap();
        assert_eq!(log_count(dir.path()), 1);
        assert!(dir.path().join("notes.txt").exists());
        assert!(dir.path().join("host_capture.log").exists());
        assert!(!dir.path().join("timeruler_a.log").exists());
    }

    #[test]
    fn ruler_filter_wins_over_rust_log() {
        assert_eq!(
            filter_directives(Some("debug".into()), Some("warn".into())),
            "debug"
        );
        assert_eq!(filter_directives(Some("  ".into()), Some("warn".into())), "warn");
        assert_eq!(filter_directives(None, None), DEFAULT_FILTER);
    }

    #[test]
    fn default_filter_parses() {
        assert!(EnvFilter::try_new(DEFAULT_FILTER).is_ok());
    }
}
