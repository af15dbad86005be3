//! Core types and identifiers for the step activity simulator
//!
//! This module contains fundamental types, identifiers, and configuration structures
//! used throughout the simulation system.
//!
//! # Overview
//!
//! - **Identifiers**: deterministic `{CLASS}-user-{n}` user ids
//! - **Enums**: behavioral classes, device platforms and transports
//! - **Configuration**: startup parameters with validation and CLI support
//!
//! # Usage Example
//!
//! ```rust
//! use step_activity_simulator::types::*;
//!
//! let class: BehaviorClass = "LOW_TO_HIGH".parse().unwrap();
//! let id = UserId::for_ordinal(class, 0);
//! assert_eq!(id.as_str(), "LOW_TO_HIGH-user-1");
//! assert_eq!(DevicePlatform::for_ordinal(1), DevicePlatform::Android);
//!
//! let config = SimulationConfig {
//!     behavior_class: class,
//!     user_count: 4,
//!     ..Default::default()
//! };
//! assert!(config.validate().is_ok());
//! ```

pub mod config;
pub mod enums;
pub mod identifiers;

// Re-export all public types for convenience
pub use config::*;
pub use enums::*;
pub use identifiers::*;
