//! Logging and tracing configuration
//!
//! Logs always go to stderr so that the stdout transport owns stdout. An
//! optional daily rolling file receives the same events as JSON.

use std::io;
use tracing::{debug, Level};
use tracing_appender::{non_blocking, rolling};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Registry,
};

use crate::types::{CliArgs, SimulationConfig};

/// Error returned when the global subscriber cannot be installed
pub type LoggingInitError = Box<dyn std::error::Error + Send + Sync>;

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level for the application
    pub level: Level,
    /// Whether to enable JSON formatting
    pub json_format: bool,
    /// Daily rolling log directory, if file logging is enabled
    pub log_directory: Option<String>,
    /// Log file prefix
    pub log_file_prefix: String,
    /// Whether to enable span events
    pub enable_span_events: bool,
    /// Whether to enable ansi colors in console output
    pub enable_ansi: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Level::WARN,
            json_format: false,
            log_directory: None,
            log_file_prefix: "step-activity-simulator".to_string(),
            enable_span_events: false,
            enable_ansi: true,
        }
    }
}

impl LoggingConfig {
    /// Create a new logging configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Level implied by the command line flags: WARN, `-v` INFO, `-d` DEBUG
    ///
    /// Debug logging also reports span timings.
    pub fn from_flags(verbose: bool, debug: bool, json: bool) -> Self {
        let mut config = Self::new();
        if debug {
            config = config.with_level(Level::DEBUG).with_span_events();
        } else if verbose {
            config = config.with_level(Level::INFO);
        }
        if json {
            config = config.with_json_format().without_ansi();
        }
        config
    }

    /// Logging for one run: the command line flags plus the configured log directory
    pub fn for_run(args: &CliArgs, config: &SimulationConfig) -> Self {
        let logging = Self::from_flags(args.verbose, args.debug, args.json_logs);
        match &config.log_dir {
            Some(directory) => logging.with_file_logging(directory.clone()),
            None => logging,
        }
    }

    /// Set the log level
    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Enable JSON formatting
    pub fn with_json_format(mut self) -> Self {
        self.json_format = true;
        self
    }

    /// Enable daily rolling file logging
    pub fn with_file_logging(mut self, directory: impl Into<String>) -> Self {
        self.log_directory = Some(directory.into());
        self
    }

    /// Enable span events
    pub fn with_span_events(mut self) -> Self {
        self.enable_span_events = true;
        self
    }

    /// Disable ANSI colors
    pub fn without_ansi(mut self) -> Self {
        self.enable_ansi = false;
        self
    }

    /// Filter directive used when `RUST_LOG` is not set
    pub fn default_directive(&self) -> String {
        format!("{}={}", env!("CARGO_PKG_NAME").replace('-', "_"), self.level)
    }

    fn span_events(&self) -> FmtSpan {
        if self.enable_span_events {
            FmtSpan::CLOSE
        } else {
            FmtSpan::NONE
        }
    }

    fn build_filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(self.default_directive()))
    }

    /// Initialize the global tracing subscriber
    pub fn init(self) -> Result<(), LoggingInitError> {
        let registry = Registry::default().with(self.build_filter());

        let console_json = self.json_format.then(|| {
            fmt::layer()
                .json()
                .with_writer(io::stderr)
                .with_span_events(self.span_events())
        });
        let console_pretty = (!self.json_format).then(|| {
            fmt::layer()
                .pretty()
                .with_writer(io::stderr)
                .with_ansi(self.enable_ansi)
                .with_span_events(self.span_events())
        });

        let file_layer = match &self.log_directory {
            Some(directory) => {
                let appender = rolling::daily(directory, &self.log_file_prefix);
                let (writer, guard) = non_blocking(appender);
                // The subscriber lives for the whole process.
                std::mem::forget(guard);
                Some(fmt::layer().json().with_writer(writer).with_span_events(self.span_events()))
            }
            None => None,
        };

        registry.with(console_json).with(console_pretty).with(file_layer).try_init()?;

        debug!(
            level = %self.level,
            json = self.json_format,
            log_directory = self.log_directory.as_deref().unwrap_or("-"),
            "logging initialized"
        );
        Ok(())
    }
}

/// Structured log event tagged with the simulation component
#[macro_export]
macro_rules! sim_event {
    ($level:ident, $message:expr, $($key:ident = $value:expr),* $(,)?) => {
        tracing::$level!(
            component = "simulation",
            $($key = $value,)*
            "{}", $message
        );
    };
    ($level:ident, $message:expr) => {
        tracing::$level!(component = "simulation", "{}", $message);
    };
}
