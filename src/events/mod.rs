//! Activity event schemas and rendering
//!
//! This module holds the two vendor wire schemas, the renderer that picks one
//! per user platform, and a normalized view over both.
//!
//! # Overview
//!
//! - **ActivityEvent**: tagged variant over the Apple and Android schemas
//! - **EventRenderer**: stamps, locates and shapes one reading
//! - **NormalizedActivity**: schema-independent projection of an event
//!
//! # Usage Example
//!
//! ```rust
//! use step_activity_simulator::events::*;
//! use step_activity_simulator::types::*;
//! use step_activity_simulator::user::*;
//! use chrono::Utc;
//!
//! let renderer = EventRenderer::new(Utc::now());
//! let user = User::new(BehaviorClass::Medium, 0);
//! let event = renderer.render_with_location(&user, &Sample { steps: 64, tick: 0 }, None);
//!
//! assert_eq!(event.platform(), DevicePlatform::Apple);
//! let body = event.to_json().unwrap();
//! assert!(body.contains("\"Geo_lat\":null"));
//! ```

pub mod activity_event;
pub mod normalized;
pub mod renderer;

// Re-export all public types for convenience
pub use activity_event::*;
pub use normalized::*;
pub use renderer::*;
