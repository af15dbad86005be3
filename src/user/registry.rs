//! User registry
//!
//! This module creates the fixed population of a run and holds it for the
//! lifetime of the process.

use std::fmt;

use tracing::{debug, info};

use crate::types::{BehaviorClass, ConfigValidationError, DevicePlatform, SimulationConfig};
use crate::user::User;

/// Ordered collection of every simulated user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRegistry {
    users: Vec<User>,
}

impl UserRegistry {
    /// Create `count` users of `class`, named `{class}-user-{i}` for i in 1..=count.
    ///
    /// Platforms alternate by position: index 0 is Apple, index 1 Android, and so on.
    pub fn create_users(class: BehaviorClass, count: usize) -> Result<Self, ConfigValidationError> {
        if count == 0 {
            return Err(ConfigValidationError::InvalidUserCount(0));
        }

        let users: Vec<User> = (0..count).map(|index| User::new(class, index)).collect();

        let registry = Self { users };
        info!(
            "Created {} {} users ({} Apple, {} Android)",
            registry.len(),
            class,
            registry.count_for(DevicePlatform::Apple),
            registry.count_for(DevicePlatform::Android)
        );
        debug!(first = %registry.users[0].id(), "user registry ready");

        Ok(registry)
    }

    /// Create the registry described by a validated configuration
    pub fn from_config(config: &SimulationConfig) -> Result<Self, ConfigValidationError> {
        Self::create_users(config.behavior_class, config.user_count)
    }

    /// Number of users
    pub fn len(&self) -> usize {
        self.users.len()
    }

    /// Whether the registry holds no users; never true for a created registry
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Users in registry order
    pub fn users(&self) -> &[User] {
        &self.users
    }

    /// Mutable iteration in registry order, used by the scheduler to sample
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, User> {
        self.users.iter_mut()
    }

    /// Look up a user by id
    pub fn get(&self, id: &str) -> Option<&User> {
        self.users.iter().find(|u| u.id().as_str() == id)
    }

    /// Number of users on a platform
    pub fn count_for(&self, platform: DevicePlatform) -> usize {
        self.users.iter().filter(|u| u.platform() == platform).count()
    }
}

impl fmt::Display for UserRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} users ({} Apple, {} Android)",
            self.len(),
            self.count_for(DevicePlatform::Apple),
            self.count_for(DevicePlatform::Android)
        )
    }
}
