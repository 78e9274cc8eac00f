//! Tracing setup for Docent
//!
//! Provides dual output: console logs at the level the operator picked and
//! full debug logs to disk.

use std::fs::{File, create_dir_all};
use std::path::Path;

use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, fmt};

use crate::{DocentError, Result};

/// Crates whose logs follow the console level picked on the command line.
const DOCENT_TARGETS: [&str; 3] = ["docent_core", "docent_web", "docent"];

/// Console filter directives for `console_level`.
///
/// Docent's own crates log at `console_level`. Dependencies stay at `warn`,
/// except per-request `tower_http` spans which only show at `debug` and up.
pub fn console_directives(console_level: Level) -> String {
    let request_level = if console_level >= Level::DEBUG {
        "debug"
    } else {
        "warn"
    };
    let level = console_level.to_string().to_lowercase();

    let mut directives = vec!["warn".to_string(), format!("tower_http={request_level}")];
    directives.extend(DOCENT_TARGETS.iter().map(|target| format!("{target}={level}")));
    directives.join(",")
}

/// File filter: everything from docent, requests at `debug`, the rest at `info`.
fn file_directives() -> String {
    let mut directives = vec!["info".to_string(), "tower_http=debug".to_string()];
    directives.extend(DOCENT_TARGETS.iter().map(|target| format!("{target}=trace")));
    directives.join(",")
}

/// Initialize tracing with dual output: console (user level) + file (full debug)
///
/// # Arguments
/// * `console_level` - Log level for docent's own console output
/// * `logs_dir` - Directory to write debug logs (defaults to "./logs")
///
/// Writes debug logs to `logs/docent-last-run.log`, overwriting the previous
/// run. `RUST_LOG` replaces the console directives when set.
///
/// # Errors
///
/// - `DocentError::Io` - Logs directory cannot be created or the log file cannot be opened
/// - `DocentError::Configuration` - A global subscriber is already installed
pub fn init_tracing(console_level: Level, logs_dir: Option<&Path>) -> Result<()> {
    let logs_path = logs_dir.unwrap_or_else(|| Path::new("logs"));

    create_dir_all(logs_path)?;

    let log_file_path = logs_path.join("docent-last-run.log");
    let log_file = File::create(&log_file_path)?;

    let console_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(console_directives(console_level)));

    let console_layer = fmt::layer()
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_filter(console_filter);

    let file_layer = fmt::layer()
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .with_ansi(false)
        .with_writer(log_file)
        .with_filter(EnvFilter::new(file_directives()));

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| DocentError::Configuration {
            reason: format!("tracing already initialized: {e}"),
        })?;

    tracing::info!(
        "Tracing initialized: console={}, debug_file={}",
        console_level,
        log_file_path.display()
    );

    Ok(())
}

/// CLI log levels for user control
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum CliLogLevel {
    /// Only error messages
    Error,
    /// Warning and error messages
    Warn,
    /// Informational, warning, and error messages
    Info,
    /// Debug, informational, warning, and error messages
    Debug,
    /// All messages including detailed tracing
    Trace,
}

impl CliLogLevel {
    /// Converts CLI log level to tracing Level enum.
    ///
    /// # Examples
    /// ```
    /// use docent_core::tracing_setup::CliLogLevel;
    ///
    /// let level = CliLogLevel::Info.as_tracing_level();
    /// assert_eq!(level, tracing::Level::INFO);
    /// ```
    pub fn as_tracing_level(self) -> Level {
        match self {
            CliLogLevel::Error => Level::ERROR,
            CliLogLevel::Warn => Level::WARN,
            CliLogLevel::Info => Level::INFO,
            CliLogLevel::Debug => Level::DEBUG,
            CliLogLevel::Trace => Level::TRACE,
        }
    }
}

impl std::fmt::Display for CliLogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliLogLevel::Error => write!(f, "error"),
            CliLogLevel::Warn => write!(f, "warn"),
            CliLogLevel::Info => write!(f, "info"),
            CliLogLevel::Debug => write!(f, "debug"),
            CliLogLevel::Trace => write!(f, "trace"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_console_directives_scope_level_to_docent() {
        let info = console_directives(Level::INFO);
        assert!(info.starts_with("warn,"));
        assert!(info.contains("tower_http=warn"));
        assert!(info.contains("docent_core=info"));
        assert!(info.contains("docent_web=info"));

        let debug = console_directives(CliLogLevel::Debug.as_tracing_level());
        assert!(debug.contains("tower_http=debug"));
        assert!(debug.contains("docent=debug"));
        assert!(EnvFilter::try_new(debug).is_ok());
    }

    #[test]
    fn test_unwritable_logs_dir_is_io_error() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let blocked = file.path().join("logs");

        let result = init_tracing(Level::INFO, Some(&blocked));

        assert!(matches!(result, Err(DocentError::Io(_))));
    }
}
