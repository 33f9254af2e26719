use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Route `tracing` events to a log file; the terminal belongs to the TUI.
///
/// Logging is optional: if the file cannot be opened nothing is installed
/// and `false` is returned. Safe to call more than once.
pub fn init(level: &str, path: Option<&Path>) -> bool {
    let Some(path) = path else {
        return false;
    };
    if let Some(parent) = path.parent() {
        if std::fs::create_dir_all(parent).is_err() {
            return false;
        }
    }
    let Ok(file) = OpenOptions::new().create(true).append(true).open(path) else {
        return false;
    };

    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));
    let layer = fmt::layer()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(layer)
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_path_disables_logging() {
        assert!(!init("info", None));
    }

    #[test]
    fn test_unwritable_path_is_silent() {
        let dir = tempfile::tempdir().unwrap();
        // A directory cannot be opened as a log file.
        assert!(!init("debug", Some(dir.path())));
    }
}
