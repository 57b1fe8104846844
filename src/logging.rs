use std::fs::{File, OpenOptions};
use std::path::Path;
use std::sync::Arc;

use tracing::subscriber::DefaultGuard;
use tracing_subscriber::{filter::LevelFilter, layer::SubscriberExt, Layer};

/// Keeps the logger installed. Logging stops when this is dropped.
pub(crate) struct LogGuard {
    _guard: DefaultGuard,
}

/// Install a logger that writes debug-and-above to `log_path` and, when
/// `console` is set, info-and-above to stderr.
///
/// If the log file cannot be opened the file layer is skipped and a warning
/// is emitted through whatever layers remain.
pub(crate) fn init(log_path: &Path, console: bool) -> LogGuard {
    let file = open_log_file(log_path);
    let open_error = file.as_ref().err().cloned();

    let file_layer = file.ok().map(|f| {
        tracing_subscriber::fmt::layer()
            .with_ansi(false)
            .with_writer(Arc::new(f))
            .with_filter(LevelFilter::DEBUG)
    });

    let console_layer = console.then(|| {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_filter(LevelFilter::INFO)
    });

    let subscriber = tracing_subscriber::registry()
        .with(file_layer)
        .with(console_layer);
    let guard = tracing::subscriber::set_default(subscriber);

    if let Some(e) = open_error {
        tracing::warn!(path = %log_path.display(), "could not open log file: {e}");
    }

    LogGuard { _guard: guard }
}

/// Open `log_path` for appending, creating its directory first. The error
/// message includes the directory failure, if there was one.
fn open_log_file(log_path: &Path) -> Result<File, String> {
    let dir_error = log_path
        .parent()
        .filter(|d| !d.as_os_str().is_empty())
        .and_then(|dir| {
            std::fs::create_dir_all(dir)
                .err()
                .map(|e| format!("could not create {}: {e}", dir.display()))
        });

    OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)
        .map_err(|e| match dir_error {
            Some(cause) => format!("{e} ({cause})"),
            None => e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_debug_events_reach_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs").join("app.log");

        let guard = init(&path, false);
        tracing::debug!("inserted a test expense");
        tracing::info!("table initialized");
        drop(guard);

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("inserted a test expense"));
        assert!(contents.contains("table initialized"));
        assert!(contents.contains("DEBUG"));
    }

    #[test]
    fn test_events_after_drop_are_not_written() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.log");

        drop(init(&path, false));
        tracing::error!("nobody is listening");

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(!contents.contains("nobody is listening"));
    }

    #[test]
    fn test_unopenable_log_file_does_not_panic() {
        let dir = tempfile::tempdir().unwrap();
        // A directory cannot be opened for appending.
        let guard = init(dir.path(), false);
        tracing::info!("still running");
        drop(guard);
    }

    #[test]
    fn test_open_error_includes_directory_cause() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, "x").unwrap();

        let err = open_log_file(&blocker.join("app.log")).unwrap_err();
        assert!(err.contains("could not create"), "{err}");
        assert!(err.contains("not-a-dir"), "{err}");
    }
}
