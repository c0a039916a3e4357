//! Logging setup for the `dbcheck` binary
//!
//! Console output goes to stderr so stdout stays reserved for the verdict.
//! An optional daily-rolling JSON file is written when a log directory is
//! configured. `RUST_LOG` takes precedence over the built-in filter.

use anyhow::Context;
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

use crate::args::LogFormat;

const LOG_FILE_PREFIX: &str = "dbcheck.log";

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Directory for rolling JSON log files; `None` disables file output
    pub log_dir: Option<PathBuf>,

    /// Console output format
    pub format: LogFormat,

    /// Whether to include file/line information in console logs
    pub include_location: bool,

    /// Whether to log span open/close events
    pub enable_spans: bool,

    /// Filter used when `RUST_LOG` is unset
    pub default_filter: String,
}

impl LoggingConfig {
    /// Verbose console output, no log files
    pub fn development() -> Self {
        Self {
            log_dir: None,
            format: LogFormat::Pretty,
            include_location: true,
            enable_spans: true,
            default_filter: "info,dbcheck_cli=debug,dbcheck_gate=debug,dbcheck_driver_mysql=debug"
                .to_string(),
        }
    }

    /// Quiet console output, JSON log files under the user data directory
    pub fn production() -> Self {
        Self {
            log_dir: Some(log_directory()),
            format: LogFormat::Pretty,
            include_location: false,
            enable_spans: false,
            default_filter: "warn,dbcheck_cli=info,dbcheck_gate=info,dbcheck_driver_mysql=info"
                .to_string(),
        }
    }

    fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.default_filter))
    }
}

/// Initialize the global subscriber.
///
/// The returned guard flushes the file writer on drop and must be held until
/// the process exits.
pub fn init(config: LoggingConfig) -> anyhow::Result<Option<WorkerGuard>> {
    // NEW fires once per span; ENTER would repeat on every async re-poll.
    let span_events = if config.enable_spans {
        FmtSpan::NEW | FmtSpan::CLOSE
    } else {
        FmtSpan::NONE
    };

    let mut layers = Vec::new();

    let console = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(config.include_location)
        .with_line_number(config.include_location)
        .with_span_events(span_events.clone());
    let console_layer = match config.format {
        LogFormat::Pretty => console.pretty().with_filter(config.env_filter()).boxed(),
        LogFormat::Compact => console.compact().with_filter(config.env_filter()).boxed(),
        LogFormat::Json => console
            .with_ansi(false)
            .json()
            .with_current_span(true)
            .with_filter(config.env_filter())
            .boxed(),
    };
    layers.push(console_layer);

    let mut guard = None;
    if let Some(log_dir) = &config.log_dir {
        std::fs::create_dir_all(log_dir)
            .with_context(|| format!("Failed to create log directory {}", log_dir.display()))?;

        let file_appender = tracing_appender::rolling::daily(log_dir, LOG_FILE_PREFIX);
        let (non_blocking, worker_guard) = tracing_appender::non_blocking(file_appender);
        guard = Some(worker_guard);

        let json_layer = fmt::layer()
            .with_target(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
            .with_span_events(span_events)
            .with_ansi(false)
            .json()
            .with_current_span(true)
            .with_span_list(true)
            .with_writer(non_blocking)
            .with_filter(config.env_filter())
            .boxed();
        layers.push(json_layer);
    }

    tracing_subscriber::registry()
        .with(layers)
        .try_init()
        .context("Logging has already been initialized")?;

    tracing::debug!(
        log_dir = ?config.log_dir,
        format = ?config.format,
        "Logging initialized"
    );

    Ok(guard)
}

/// Default directory for rolling log files
pub fn log_directory() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("dbcheck")
        .join("logs")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_production_writes_files() {
        let config = LoggingConfig::production();
        assert_eq!(config.log_dir, Some(log_directory()));
        assert!(!config.enable_spans);
    }

    #[test]
    fn test_development_is_console_only() {
        let config = LoggingConfig::development();
        assert!(config.log_dir.is_none());
        assert!(config.default_filter.contains("dbcheck_gate=debug"));
    }

    #[test]
    fn test_log_directory_is_namespaced() {
        assert!(log_directory().ends_with("dbcheck/logs"));
    }
}
