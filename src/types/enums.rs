//! Enumeration types for the step activity simulator
//!
//! This module contains the behavioral classes that drive step-count generation
//! and the device platforms that decide schema and destination topic.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Step-count generation profile shared by every user of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BehaviorClass {
    /// Very active users, 130-179 steps per hour
    High,
    /// Moderately active users, 50-99 steps per hour
    Medium,
    /// Sedentary users, 0-29 steps per hour
    Low,
    /// Users whose hourly steps ramp up by 50 each tick until 500
    LowToHigh,
}

impl BehaviorClass {
    /// All known classes, in declaration order
    pub const ALL: [BehaviorClass; 4] = [
        BehaviorClass::High,
        BehaviorClass::Medium,
        BehaviorClass::Low,
        BehaviorClass::LowToHigh,
    ];

    /// Canonical upper-case tag used in user ids and on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            BehaviorClass::High => "HIGH",
            BehaviorClass::Medium => "MEDIUM",
            BehaviorClass::Low => "LOW",
            BehaviorClass::LowToHigh => "LOW_TO_HIGH",
        }
    }

    /// Comma separated list of valid tags, for error messages
    pub fn valid_values() -> String {
        Self::ALL.iter().map(|c| c.as_str()).collect::<Vec<_>>().join(", ")
    }

    /// Whether samples for this class depend on per-user ramp state
    pub fn is_ramping(&self) -> bool {
        matches!(self, BehaviorClass::LowToHigh)
    }
}

impl fmt::Display for BehaviorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BehaviorClass {
    type Err = String;

    // Tags are matched exactly; "high" is not a valid class.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "HIGH" => Ok(BehaviorClass::High),
            "MEDIUM" => Ok(BehaviorClass::Medium),
            "LOW" => Ok(BehaviorClass::Low),
            "LOW_TO_HIGH" => Ok(BehaviorClass::LowToHigh),
            _ => Err(format!(
                "Unknown behavior class: {} (choose from: {})",
                s,
                Self::valid_values()
            )),
        }
    }
}

/// Device vendor category of a simulated user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DevicePlatform {
    /// Apple wearable, flat record schema
    Apple,
    /// Android wearable, nested record schema
    Android,
}

impl DevicePlatform {
    /// Platform for the user at the given 0-based ordinal: even is Apple, odd is Android
    pub fn for_ordinal(index: usize) -> Self {
        if index % 2 == 0 {
            DevicePlatform::Apple
        } else {
            DevicePlatform::Android
        }
    }
}

impl fmt::Display for DevicePlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DevicePlatform::Apple => write!(f, "Apple"),
            DevicePlatform::Android => write!(f, "Android"),
        }
    }
}

/// Message transport used to publish rendered events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportKind {
    /// NATS server, topic as subject
    Nats,
    /// JSON lines on standard output
    Stdout,
}

impl fmt::Display for TransportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportKind::Nats => write!(f, "nats"),
            TransportKind::Stdout => write!(f, "stdout"),
        }
    }
}

impl FromStr for TransportKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "nats" => Ok(TransportKind::Nats),
            "stdout" | "console" => Ok(TransportKind::Stdout),
            _ => Err(format!("Unknown transport: {} (choose from: nats, stdout)", s)),
        }
    }
}
