//! User modeling and step-count profiles
//!
//! This module contains the simulated users, the per-class step-count
//! profiles, and the registry that owns the population of a run.
//!
//! # Overview
//!
//! - **User**: identity, behavioral class, device platform and ramp state
//! - **Profile model**: [`sample_steps`] maps class and ramp state to a step count
//! - **UserRegistry**: creates `count` users of one class in a fixed order
//!
//! # Usage Example
//!
//! ```rust
//! use step_activity_simulator::user::*;
//! use step_activity_simulator::types::*;
//! use rand::SeedableRng;
//!
//! let mut registry = UserRegistry::create_users(BehaviorClass::LowToHigh, 2).unwrap();
//! let mut rng = rand::rngs::StdRng::seed_from_u64(7);
//!
//! for user in registry.iter_mut() {
//!     let sample = user.next_sample(0, &mut rng);
//!     assert_eq!(sample.steps, 50);
//! }
//! ```

pub mod profile;
pub mod registry;
#[allow(clippy::module_inception)]
pub mod user;

// Re-export all public types for convenience
pub use profile::{sample_steps, step_range, RampState, Sample};
pub use registry::UserRegistry;
pub use user::User;
