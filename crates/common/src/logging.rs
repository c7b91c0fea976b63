//! Logging and tracing initialization.
//!
//! Filter precedence: `RUST_LOG` wins, then the configured level string,
//! then [`DEFAULT_DIRECTIVE`]. With [`LoggingConfig::file`] set, output
//! goes to that file in append mode (ANSI stripped); otherwise to stderr.

use std::sync::Arc;

use crate::config::LoggingConfig;

/// Fallback filter: tiltdrift crates at info, everything else at warn.
pub const DEFAULT_DIRECTIVE: &str = "tiltdrift=info,warn";

/// Initialize the tracing subscriber with the given configuration.
pub fn init_logging(config: &LoggingConfig) {
    use tracing_subscriber::{fmt, EnvFilter};

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));

    match (open_log_file(config), config.json) {
        (Some(file), true) => {
            let subscriber = fmt::Subscriber::builder()
                .with_env_filter(env_filter)
                .with_writer(Arc::new(file))
                .with_ansi(false)
                .json()
                .finish();
            tracing::subscriber::set_global_default(subscriber).ok();
        }
        (Some(file), false) => {
            let subscriber = fmt::Subscriber::builder()
                .with_env_filter(env_filter)
                .with_writer(Arc::new(file))
                .with_ansi(false)
                .with_target(true)
                .finish();
            tracing::subscriber::set_global_default(subscriber).ok();
        }
        (None, true) => {
            let subscriber = fmt::Subscriber::builder()
                .with_env_filter(env_filter)
                .json()
                .finish();
            tracing::subscriber::set_global_default(subscriber).ok();
        }
        (None, false) => {
            let subscriber = fmt::Subscriber::builder()
                .with_env_filter(env_filter)
                .with_target(true)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .finish();
            tracing::subscriber::set_global_default(subscriber).ok();
        }
    }
}

/// Initialize logging with defaults (useful for tests and quick scripts).
pub fn init_default_logging() {
    init_logging(&LoggingConfig::default());
}

/// Open the configured log file in append mode, creating parent
/// directories. Returns `None` (stderr logging) when no file is
/// configured or it cannot be opened.
fn open_log_file(config: &LoggingConfig) -> Option<std::fs::File> {
    let path = config.file.as_ref()?;

    if let Some(parent) = path.parent() {
        if let Err(e) = std::fs::create_dir_all(parent) {
            eprintln!(
                "Failed to create log directory {}: {e}; logging to stderr",
                parent.display()
            );
            return None;
        }
    }

    match std::fs::OpenOptions::new().create(true).append(true).open(path) {
        Ok(file) => Some(file),
        Err(e) => {
            eprintln!(
                "Failed to open log file {}: {e}; logging to stderr",
                path.display()
            );
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_directive_parses() {
        use tracing_subscriber::EnvFilter;
        assert!(EnvFilter::try_new(DEFAULT_DIRECTIVE).is_ok());
    }

    #[test]
    fn test_no_file_configured_means_stderr() {
        assert!(open_log_file(&LoggingConfig::default()).is_none());
    }

    #[test]
    fn test_log_file_opened_with_parents_in_append_mode() {
        let dir = std::env::temp_dir().join("tiltdrift_test_logging");
        let _ = std::fs::remove_dir_all(&dir);

        let path = dir.join("nested").join("tiltdrift.log");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "existing line\n").unwrap();

        let config = LoggingConfig {
            level: "info".to_string(),
            json: false,
            file: Some(path.clone()),
        };

        let mut file = open_log_file(&config).expect("configured log file should open");
        writeln!(file, "appended line").unwrap();
        drop(file);

        // Append mode keeps what was already there.
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("existing line\n"));
        assert!(content.contains("appended line"));

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_unopenable_file_falls_back_to_stderr() {
        // A directory path cannot be opened as a log file.
        let dir = std::env::temp_dir().join("tiltdrift_test_logging_dir");
        std::fs::create_dir_all(&dir).unwrap();

        let config = LoggingConfig {
            level: "info".to_string(),
            json: false,
            file: Some(dir.clone()),
        };
        assert!(open_log_file(&config).is_none());

        std::fs::remove_dir_all(&dir).ok();
    }
}
