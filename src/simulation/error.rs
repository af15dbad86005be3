//! Error types and handling
//!
//! This module contains the aggregate error type of the simulation.

use thiserror::Error;

use crate::publish::PublishError;
use crate::types::{ConfigError, ConfigValidationError};

/// Errors that can occur during simulation
#[derive(Debug, Error)]
pub enum SimulationError {
    /// Startup parameters were rejected
    #[error("Configuration validation failed: {0}")]
    ConfigurationError(String),

    /// The transport could not be connected at startup
    #[error("Transport connection failed")]
    ConnectionError(#[source] PublishError),

    /// An operation was attempted in the wrong scheduler state
    #[error("Scheduler state error: {0}")]
    SchedulerStateError(String),
}

impl From<ConfigError> for SimulationError {
    fn from(error: ConfigError) -> Self {
        SimulationError::ConfigurationError(error.to_string())
    }
}

impl From<ConfigValidationError> for SimulationError {
    fn from(error: ConfigValidationError) -> Self {
        SimulationError::ConfigurationError(error.to_string())
    }
}

// Only `connect` errors travel back to the caller; send failures go to the hook.
impl From<PublishError> for SimulationError {
    fn from(error: PublishError) -> Self {
        SimulationError::ConnectionError(error)
    }
}

impl SimulationError {
    /// Create a configuration error
    pub fn configuration_error(msg: impl Into<String>) -> Self {
        Self::ConfigurationError(msg.into())
    }

    /// Create a scheduler state error
    pub fn scheduler_state_error(msg: impl Into<String>) -> Self {
        Self::SchedulerStateError(msg.into())
    }

    /// Get the error category
    pub fn category(&self) -> &'static str {
        match self {
            SimulationError::ConfigurationError(_) => "Configuration",
            SimulationError::ConnectionError(_) => "Connection",
            SimulationError::SchedulerStateError(_) => "Scheduler",
        }
    }
}

/// Result type for simulation operations
pub type SimulationResult<T> = Result<T, SimulationError>;
