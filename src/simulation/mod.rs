//! Simulation control
//!
//! This module contains the tick scheduler, the random source, statistics
//! collection, logging setup and error handling.
//!
//! # Overview
//!
//! - **Scheduler**: IDLE/RUNNING state machine driving one pass per tick
//! - **SimulationStatistics**: counters reported at shutdown
//! - **LoggingConfig**: tracing subscriber setup
//! - **SimulationError**: aggregate error for aborted runs, with a category
//!
//! # Usage Example
//!
//! ```rust
//! use std::sync::Arc;
//! use step_activity_simulator::publish::InMemoryPublisher;
//! use step_activity_simulator::simulation::*;
//! use step_activity_simulator::types::*;
//! use step_activity_simulator::user::UserRegistry;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> SimulationResult<()> {
//! let publisher = Arc::new(InMemoryPublisher::new());
//! let registry = UserRegistry::create_users(BehaviorClass::Medium, 1)?;
//! let mut scheduler = Scheduler::new(registry, publisher.clone(), rng_from_seed(Some(1)));
//!
//! scheduler.start().await?;
//! scheduler.tick()?;
//! let stats = scheduler.shutdown().await;
//!
//! assert_eq!(stats.published, 1);
//! assert_eq!(publisher.messages()[0].key, "MEDIUM-user-1");
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod logging;
pub mod random;
pub mod scheduler;
pub mod statistics;

// Re-export all public types for convenience
pub use error::*;
pub use logging::*;
pub use random::*;
pub use scheduler::*;
pub use statistics::*;
