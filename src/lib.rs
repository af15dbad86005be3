//! Step Activity Simulator
//!
//! A synthetic wearable telemetry generator. A fixed population of users,
//! all sharing one behavioral class, produces an hourly step count once per
//! tick; every reading is rendered in the schema of the user's device vendor
//! and published to a per-platform topic keyed by user id.
//!
//! # Overview
//!
//! Downstream pipelines need a steady, plausible stream of fitness events to
//! develop against. This library models the users, draws their step counts,
//! shapes them into Apple-style or Android-style JSON and hands them to a
//! message publisher without waiting on the broker.
//!
//! ## Key Features
//!
//! - **Behavioral classes**: HIGH, MEDIUM and LOW draw from fixed ranges; LOW_TO_HIGH ramps
//! - **Deterministic population**: `{CLASS}-user-{n}` ids, Apple/Android split by ordinal parity
//! - **Two wire schemas**: flat Apple records with null geo fields, nested Android records
//! - **Pluggable transport**: NATS, stdout or in-memory behind one trait
//! - **Seedable randomness**: every draw comes from one injectable source
//!
//! ## Quick Start
//!
//! ```rust
//! use step_activity_simulator::*;
//!
//! let config = SimulationConfig {
//!     behavior_class: BehaviorClass::LowToHigh,
//!     user_count: 3,
//!     ..Default::default()
//! };
//! config.validate()?;
//!
//! let registry = UserRegistry::from_config(&config)?;
//! println!("Simulating {}", registry);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Module Organization
//!
//! - [`types`]: Enums, identifiers and configuration
//! - [`user`]: Users, step profiles and the registry
//! - [`events`]: Wire schemas, rendering and the normalized view
//! - [`publish`]: Topic routing, the publish queue and transports
//! - [`simulation`]: Scheduler, statistics, logging and errors
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐    ┌─────────────┐    ┌─────────────┐
//! │    User     │    │   Events    │    │   Publish   │
//! │             │    │             │    │             │
//! │ Registry    │───►│ Renderer    │───►│ Router      │
//! │ Profiles    │    │ Schemas     │    │ Dispatcher  │
//! │ Ramp state  │    │             │    │ Transports  │
//! └─────────────┘    └─────────────┘    └─────────────┘
//!        ▲                   ▲                   ▲
//!        │                   │                   │
//!        └───────────┬───────┴───────────────────┘
//!                    │
//!             ┌─────────────┐
//!             │ Simulation  │
//!             │             │
//!             │ Scheduler   │
//!             │ Statistics  │
//!             └─────────────┘
//! ```
#![warn(missing_docs, missing_debug_implementations, unreachable_pub)]

// Module declarations
pub mod events;
pub mod publish;
pub mod simulation;
pub mod types;
pub mod user;

// Core types and configuration
pub use types::{
    BehaviorClass, CliArgs, ConfigError, ConfigValidationError, DevicePlatform,
    SimulationConfig, TransportKind, UserId,
};

// Users and step profiles
pub use user::{sample_steps, RampState, Sample, User, UserRegistry};

// Events
pub use events::{
    ActivityEvent, AndroidActivityEvent, EventRenderer, GeoLocation, IosActivityEvent,
    NormalizedActivity,
};

// Publishing
pub use publish::{
    InMemoryPublisher, MessagePublisher, NatsPublisher, OutboundMessage, PublishDispatcher,
    PublishError, PublishFailure, StdoutPublisher, TopicRouter, ANDROID_TOPIC, IOS_TOPIC,
};

// Simulation control
pub use simulation::{
    rng_from_seed, LoggingConfig, Scheduler, SchedulerState, SimulationError, SimulationResult,
    SimulationStatistics,
};
