//! Rolling Logger
//!
//! Installs a global `tracing` subscriber that writes to stderr and to a
//! size-rotated log file.
//!
//! `log` records are bridged into `tracing`, so crates using either facade
//! end up in the same file.

mod writer;

use std::path::PathBuf;
use std::sync::OnceLock;

use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

pub use writer::RollingWriter;

/// Errors raised while setting up or using the logger
#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    #[error("failed to prepare log directory {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("a global logger is already installed")]
    AlreadyInitialized,
    #[error("logger not initialized")]
    NotInitialized,
}

/// Rotation and filtering knobs
#[derive(Debug, Clone)]
pub struct LoggerConfig {
    /// Rotate the active file once it grows past this many bytes
    pub max_file_bytes: u64,
    /// Total number of files kept, including the active one
    pub max_files: usize,
    /// Environment variable holding an `EnvFilter` directive
    pub filter_env: String,
    /// Directive used when the environment variable is unset or invalid
    pub default_directive: String,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            max_file_bytes: 5 * 1024 * 1024,
            max_files: 5,
            filter_env: "RUST_LOG".to_string(),
            default_directive: "info".to_string(),
        }
    }
}

/// App name used as the target of the `log` helpers
static LOGGER: OnceLock<String> = OnceLock::new();

struct LocalTimer;

impl FormatTime for LocalTimer {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        write!(w, "{}", chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"))
    }
}

/// Initialize the global logger
///
/// Creates `log_dir` if needed and writes to `<log_dir>/<app_name>.log`,
/// returning that path. Fails with [`LoggerError::AlreadyInitialized`] when
/// any global subscriber is already set.
pub fn init_logger(
    log_dir: PathBuf,
    app_name: &str,
    config: LoggerConfig,
) -> Result<PathBuf, LoggerError> {
    std::fs::create_dir_all(&log_dir).map_err(|source| LoggerError::Io {
        path: log_dir.clone(),
        source,
    })?;

    let writer = RollingWriter::open(&log_dir, app_name, config.max_file_bytes, config.max_files)
        .map_err(|source| LoggerError::Io {
            path: log_dir.clone(),
            source,
        })?;
    let log_path = writer.active_path();

    let filter = EnvFilter::try_from_env(&config.filter_env)
        .unwrap_or_else(|_| EnvFilter::new(&config.default_directive));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_timer(LocalTimer)
                .with_writer(std::io::stderr),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_timer(LocalTimer)
                .with_ansi(false)
                .with_writer(writer),
        )
        .try_init()
        .map_err(|_| LoggerError::AlreadyInitialized)?;

    LOGGER
        .set(app_name.to_string())
        .map_err(|_| LoggerError::AlreadyInitialized)?;
    Ok(log_path)
}

fn installed() -> Result<&'static str, LoggerError> {
    LOGGER.get().map(String::as_str).ok_or(LoggerError::NotInitialized)
}

pub fn info(message: &str) -> Result<(), LoggerError> {
    let target = installed()?;
    log::info!(target: target, "{message}");
    Ok(())
}

pub fn error(message: &str) -> Result<(), LoggerError> {
    let target = installed()?;
    log::error!(target: target, "{message}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = LoggerConfig::default();
        assert_eq!(config.max_files, 5);
        assert!(config.max_file_bytes > 0);
        assert_eq!(config.default_directive, "info");
    }

    // Only test in this crate that touches the global subscriber
    #[test]
    fn test_init_installs_file_logger() {
        assert!(matches!(info("too early"), Err(LoggerError::NotInitialized)));

        let dir = tempfile::tempdir().unwrap();
        let log_dir = dir.path().join("logs");
        let log_path = init_logger(log_dir.clone(), "grocery-test", LoggerConfig::default()).unwrap();
        assert_eq!(log_path, log_dir.join("grocery-test.log"));
        assert!(log_path.exists());

        assert!(info("ready").is_ok());
        assert!(error("boom").is_ok());
        assert!(matches!(
            init_logger(log_dir, "grocery-test", LoggerConfig::default()),
            Err(LoggerError::AlreadyInitialized)
        ));
    }
}
