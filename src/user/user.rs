//! Core user struct and methods
//!
//! This module contains the User struct and its per-tick sampling.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::types::{BehaviorClass, DevicePlatform, UserId};
use crate::user::profile::{sample_steps, RampState, Sample};

/// Represents a simulated wearable user
///
/// Id and platform are fixed at creation. The ramp state is only changed by
/// [`User::next_sample`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    behavior_class: BehaviorClass,
    platform: DevicePlatform,
    ramp: RampState,
}

impl User {
    /// Create the user at the given 0-based position of a registry
    pub fn new(behavior_class: BehaviorClass, index: usize) -> Self {
        Self {
            id: UserId::for_ordinal(behavior_class, index),
            behavior_class,
            platform: DevicePlatform::for_ordinal(index),
            ramp: RampState::new(),
        }
    }

    /// Unique identifier, also the partition key of published messages
    pub fn id(&self) -> &UserId {
        &self.id
    }

    /// Behavioral class driving step generation
    pub fn behavior_class(&self) -> BehaviorClass {
        self.behavior_class
    }

    /// Device platform deciding schema and topic
    pub fn platform(&self) -> DevicePlatform {
        self.platform
    }

    /// Current ramp state
    pub fn ramp_state(&self) -> RampState {
        self.ramp
    }

    /// Whether this user wears an Apple device
    pub fn is_apple_device(&self) -> bool {
        self.platform == DevicePlatform::Apple
    }

    /// Produce this user's sample for `tick`, advancing ramp state when the class ramps
    pub fn next_sample<R: Rng + ?Sized>(&mut self, tick: u64, rng: &mut R) -> Sample {
        let (steps, ramp) = sample_steps(self.behavior_class, self.ramp, rng);
        self.ramp = ramp;
        Sample { steps, tick }
    }
}
