//! Configuration structures for the step activity simulator
//!
//! This module contains the command line surface, the optional JSON config file
//! and the validated simulation configuration built from both.

use super::{BehaviorClass, TransportKind};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Fixed constants of the run loop
pub mod defaults {
    /// Real-time period between two ticks, in milliseconds
    pub const TICK_INTERVAL_MS: u64 = 1_000;

    /// NATS server the generator publishes to when none is given
    pub const NATS_URL: &str = "nats://localhost:4222";

    /// User count written by `--print-config`
    pub const TEMPLATE_USER_COUNT: usize = 10;
}

/// Command line arguments structure
#[derive(Debug, Clone, Parser)]
#[command(
    name = "step-activity-simulator",
    version,
    about = "Step Activity Simulator - Publishes synthetic wearable step telemetry",
    long_about = "Simulates a population of wearable users whose hourly step counts follow a behavioral class, renders every reading as an Apple or Android style JSON event and publishes it once per tick to the user-activity-ios or user-activity-android topic, keyed by user id.

EXAMPLES:
    # Ten moderately active users on a local NATS server
    step-activity-simulator MEDIUM 10

    # Ramping users, printed to stdout instead of published
    step-activity-simulator LOW_TO_HIGH 4 --transport stdout

    # Stop after 24 simulated hours, reproducible draws
    step-activity-simulator HIGH 100 --max-ticks 24 --seed 42

    # Keep daily rolling JSON log files next to the console output
    step-activity-simulator MEDIUM 10 --verbose --log-dir ./logs

    # Generate a configuration template
    step-activity-simulator --print-config > my-config.json

CONFIGURATION:
    Configuration can be provided via:
    1. Command line arguments (highest priority)
    2. Configuration file (--config flag, JSON)
    3. Default values (lowest priority)

    BEHAVIOR_CLASS is one of HIGH, MEDIUM, LOW, LOW_TO_HIGH.
    USER_COUNT must be a positive integer."
)]
pub struct CliArgs {
    /// Behavioral class shared by all simulated users
    #[arg(value_name = "BEHAVIOR_CLASS", help = "Behavioral class (HIGH, MEDIUM, LOW, LOW_TO_HIGH)")]
    pub behavior_class: Option<String>,

    /// Number of users to simulate
    #[arg(
        value_name = "USER_COUNT",
        allow_negative_numbers = true,
        help = "Number of users to simulate (positive integer)"
    )]
    pub user_count: Option<String>,

    /// Configuration file path (JSON format)
    #[arg(
        short,
        long,
        help = "Configuration file path (JSON format)",
        long_help = "Path to a JSON configuration file. CLI arguments will override file settings."
    )]
    pub config: Option<String>,

    /// Random seed for reproducible results
    #[arg(long, help = "Random seed for reproducible results")]
    pub seed: Option<u64>,

    /// Milliseconds between ticks
    #[arg(long, help = "Milliseconds between ticks (default: 1000)")]
    pub tick_interval_ms: Option<u64>,

    /// Stop after this many ticks
    #[arg(long, help = "Stop after this many ticks (default: run until interrupted)")]
    pub max_ticks: Option<u64>,

    /// Transport used to publish events
    #[arg(long, help = "Transport (nats or stdout)")]
    pub transport: Option<String>,

    /// NATS server URL
    #[arg(long, help = "NATS server URL (default: nats://localhost:4222)")]
    pub nats_url: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, help = "Enable verbose logging")]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(short, long, help = "Enable debug logging")]
    pub debug: bool,

    /// Emit logs as JSON
    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,

    /// Directory for daily rolling JSON log files
    #[arg(
        long,
        value_name = "DIR",
        help = "Also write JSON logs to a daily rolling file in this directory"
    )]
    pub log_dir: Option<String>,

    /// Dry run mode - validate configuration without publishing
    #[arg(long, help = "Validate configuration and build users without publishing")]
    pub dry_run: bool,

    /// Print default configuration and exit
    #[arg(long, help = "Print default configuration in JSON format and exit")]
    pub print_config: bool,
}

/// Configuration file structure (allows partial configuration)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ConfigFile {
    /// Behavioral class tag
    pub behavior_class: Option<String>,

    /// Number of users to simulate
    pub user_count: Option<i64>,

    /// Milliseconds between ticks
    pub tick_interval_ms: Option<u64>,

    /// Stop after this many ticks
    pub max_ticks: Option<u64>,

    /// Random seed for reproducible results
    pub seed: Option<u64>,

    /// Transport name
    pub transport: Option<String>,

    /// NATS server URL
    pub nats_url: Option<String>,

    /// Directory for daily rolling log files
    pub log_dir: Option<String>,
}

/// Configuration for the step telemetry generator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Behavioral class shared by all users
    pub behavior_class: BehaviorClass,

    /// Number of users to simulate
    pub user_count: usize,

    /// Milliseconds between ticks
    pub tick_interval_ms: u64,

    /// Stop after this many ticks; `None` runs until interrupted
    pub max_ticks: Option<u64>,

    /// Random seed for reproducible results
    pub seed: Option<u64>,

    /// Transport used to publish events
    pub transport: TransportKind,

    /// NATS server URL
    pub nats_url: String,

    /// Directory for daily rolling log files; `None` logs to stderr only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_dir: Option<String>,
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Configuration file not found
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    /// Configuration file read error
    #[error("Failed to read configuration file: {0}")]
    ReadError(#[from] std::io::Error),

    /// JSON parsing error
    #[error("Failed to parse JSON configuration: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Unsupported configuration file format
    #[error("Unsupported configuration file format: {0} (supported: .json)")]
    UnsupportedFormat(String),

    /// A startup parameter was present but invalid
    #[error(transparent)]
    Invalid(#[from] ConfigValidationError),
}

/// Validation errors for startup parameters
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    /// No behavioral class on the command line or in the config file
    #[error("Missing behavior class. Please choose from: {}", BehaviorClass::valid_values())]
    MissingBehaviorClass,

    /// Behavioral class tag not recognised
    #[error("Invalid behavior class '{0}'. Please choose from: {}", BehaviorClass::valid_values())]
    UnknownBehaviorClass(String),

    /// No user count on the command line or in the config file
    #[error("Missing user count. Please specify a valid number of users")]
    MissingUserCount,

    /// User count is not an integer
    #[error("User count must be a positive integer, got '{0}'")]
    UserCountNotANumber(String),

    /// User count is zero or negative
    #[error("User count must be greater than 0, got {0}")]
    InvalidUserCount(i64),

    /// Tick interval is zero
    #[error("Tick interval must be greater than 0 ms, got {0}")]
    InvalidTickInterval(u64),

    /// Tick limit is zero
    #[error("Max ticks must be greater than 0 when given, got {0}")]
    InvalidMaxTicks(u64),

    /// Transport name not recognised
    #[error("{0}")]
    UnknownTransport(String),

    /// NATS URL is empty
    #[error("NATS URL must not be empty")]
    EmptyNatsUrl,

    /// Log directory given but empty
    #[error("Log directory must not be empty")]
    EmptyLogDirectory,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            behavior_class: BehaviorClass::High,
            user_count: defaults::TEMPLATE_USER_COUNT,
            tick_interval_ms: defaults::TICK_INTERVAL_MS,
            max_ticks: None,
            seed: None,
            transport: TransportKind::Nats,
            nats_url: defaults::NATS_URL.to_string(),
            log_dir: None,
        }
    }
}

/// Parse a raw user count, accepting only positive integers
pub fn parse_user_count(raw: &str) -> Result<usize, ConfigValidationError> {
    let value: i64 = raw
        .trim()
        .parse()
        .map_err(|_| ConfigValidationError::UserCountNotANumber(raw.to_string()))?;
    positive_user_count(value)
}

fn positive_user_count(value: i64) -> Result<usize, ConfigValidationError> {
    if value <= 0 {
        return Err(ConfigValidationError::InvalidUserCount(value));
    }
    usize::try_from(value).map_err(|_| ConfigValidationError::UserCountNotANumber(value.to_string()))
}

impl SimulationConfig {
    /// Create a new configuration from command line arguments and optional config file
    pub fn from_args() -> Result<Self, ConfigError> {
        let args = CliArgs::parse();
        Self::from_cli_args(args)
    }

    /// Create configuration from parsed CLI arguments
    ///
    /// Behavior class and user count are required; each may come from either
    /// the command line or the config file, the command line winning.
    pub fn from_cli_args(args: CliArgs) -> Result<Self, ConfigError> {
        let file = match &args.config {
            Some(path) => Self::load_config_file(path)?,
            None => ConfigFile::default(),
        };

        let class_tag = args
            .behavior_class
            .clone()
            .or_else(|| file.behavior_class.clone())
            .ok_or(ConfigValidationError::MissingBehaviorClass)?;
        let behavior_class = class_tag
            .parse::<BehaviorClass>()
            .map_err(|_| ConfigValidationError::UnknownBehaviorClass(class_tag.clone()))?;

        let user_count = match (&args.user_count, file.user_count) {
            (Some(raw), _) => parse_user_count(raw)?,
            (None, Some(value)) => positive_user_count(value)?,
            (None, None) => return Err(ConfigValidationError::MissingUserCount.into()),
        };

        let mut config = Self::from_config_file(file, behavior_class, user_count)?;
        Self::apply_cli_overrides(&mut config, args)?;

        Ok(config)
    }

    /// Load configuration from a JSON file with every field present
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = Self::read_json(path.as_ref())?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Load a partial configuration file
    pub fn load_config_file<P: AsRef<Path>>(path: P) -> Result<ConfigFile, ConfigError> {
        let content = Self::read_json(path.as_ref())?;
        Ok(serde_json::from_str(&content)?)
    }

    fn read_json(path: &Path) -> Result<String, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()));
        }

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(fs::read_to_string(path)?),
            Some(ext) => Err(ConfigError::UnsupportedFormat(ext.to_string())),
            None => Err(ConfigError::UnsupportedFormat("no extension".to_string())),
        }
    }

    /// Create configuration from a config file, merging with defaults
    fn from_config_file(
        config_file: ConfigFile,
        behavior_class: BehaviorClass,
        user_count: usize,
    ) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let transport = match config_file.transport {
            Some(name) => name.parse().map_err(ConfigValidationError::UnknownTransport)?,
            None => defaults.transport,
        };

        Ok(Self {
            behavior_class,
            user_count,
            tick_interval_ms: config_file.tick_interval_ms.unwrap_or(defaults.tick_interval_ms),
            max_ticks: config_file.max_ticks.or(defaults.max_ticks),
            seed: config_file.seed.or(defaults.seed),
            transport,
            nats_url: config_file.nats_url.unwrap_or(defaults.nats_url),
            log_dir: config_file.log_dir.or(defaults.log_dir),
        })
    }

    /// Apply CLI argument overrides to configuration
    fn apply_cli_overrides(config: &mut Self, args: CliArgs) -> Result<(), ConfigError> {
        if let Some(value) = args.tick_interval_ms {
            config.tick_interval_ms = value;
        }
        if let Some(value) = args.max_ticks {
            config.max_ticks = Some(value);
        }
        if let Some(value) = args.seed {
            config.seed = Some(value);
        }
        if let Some(value) = args.transport {
            config.transport = value.parse().map_err(ConfigValidationError::UnknownTransport)?;
        }
        if let Some(value) = args.nats_url {
            config.nats_url = value;
        }
        if let Some(value) = args.log_dir {
            config.log_dir = Some(value);
        }
        Ok(())
    }

    /// Save configuration to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Print configuration as JSON
    pub fn print_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Validate the configuration parameters
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.user_count == 0 {
            return Err(ConfigValidationError::InvalidUserCount(0));
        }

        if self.tick_interval_ms == 0 {
            return Err(ConfigValidationError::InvalidTickInterval(self.tick_interval_ms));
        }

        if let Some(0) = self.max_ticks {
            return Err(ConfigValidationError::InvalidMaxTicks(0));
        }

        if self.transport == TransportKind::Nats && self.nats_url.trim().is_empty() {
            return Err(ConfigValidationError::EmptyNatsUrl);
        }

        if matches!(&self.log_dir, Some(dir) if dir.trim().is_empty()) {
            return Err(ConfigValidationError::EmptyLogDirectory);
        }

        Ok(())
    }

    /// Tick period as a std duration
    pub fn tick_interval(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.tick_interval_ms)
    }
}
