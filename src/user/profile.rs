//! Step-count profiles
//!
//! This module maps a behavioral class, plus the ramp state a LOW_TO_HIGH user
//! carries between ticks, to the step count for one simulated hour.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::types::BehaviorClass;

/// Hourly step ranges and ramp parameters per behavioral class
pub mod steps {
    /// Lowest hourly steps for HIGH users
    pub const HIGH_BASE: u32 = 130;
    /// Width of the HIGH draw; values fall in `HIGH_BASE..HIGH_BASE + HIGH_SPREAD`
    pub const HIGH_SPREAD: u32 = 50;

    /// Lowest hourly steps for MEDIUM users
    pub const MEDIUM_BASE: u32 = 50;
    /// Width of the MEDIUM draw
    pub const MEDIUM_SPREAD: u32 = 50;

    /// Width of the LOW draw, starting at zero
    pub const LOW_SPREAD: u32 = 30;

    /// Increment applied to ramp state on every tick
    pub const RAMP_INCREMENT: u32 = 50;
    /// Ramp state never exceeds this value
    pub const RAMP_CEILING: u32 = 500;
}

/// Accumulated hourly steps of a ramping user, bounded to `[0, 500]`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RampState(u32);

impl RampState {
    /// Ramp state at the start of a run
    pub fn new() -> Self {
        Self(0)
    }

    /// Ramp state at a given level, clamped to the ceiling
    pub fn at(level: u32) -> Self {
        Self(level.min(steps::RAMP_CEILING))
    }

    /// Current level
    pub fn value(&self) -> u32 {
        self.0
    }

    /// State after one more tick: +50, saturating at 500
    pub fn advanced(self) -> Self {
        Self(self.0.saturating_add(steps::RAMP_INCREMENT).min(steps::RAMP_CEILING))
    }

    /// Whether the ramp has reached its ceiling
    pub fn is_saturated(&self) -> bool {
        self.0 >= steps::RAMP_CEILING
    }
}

/// Step count produced for one user on one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sample {
    /// Steps walked during the simulated hour
    pub steps: u32,
    /// Hour offset from the reference instant
    pub tick: u64,
}

/// Draw the step count for one tick.
///
/// Returns the steps and the ramp state to carry into the next tick. Only
/// LOW_TO_HIGH reads or changes the ramp; the other classes hand it back
/// untouched and draw uniformly from their range.
pub fn sample_steps<R: Rng + ?Sized>(
    class: BehaviorClass,
    ramp: RampState,
    rng: &mut R,
) -> (u32, RampState) {
    match class {
        BehaviorClass::High => (steps::HIGH_BASE + rng.gen_range(0..steps::HIGH_SPREAD), ramp),
        BehaviorClass::Medium => {
            (steps::MEDIUM_BASE + rng.gen_range(0..steps::MEDIUM_SPREAD), ramp)
        }
        BehaviorClass::Low => (rng.gen_range(0..steps::LOW_SPREAD), ramp),
        BehaviorClass::LowToHigh => {
            let next = ramp.advanced();
            (next.value(), next)
        }
    }
}

/// Inclusive step range a class can produce on any tick
pub fn step_range(class: BehaviorClass) -> (u32, u32) {
    match class {
        BehaviorClass::High => (steps::HIGH_BASE, steps::HIGH_BASE + steps::HIGH_SPREAD - 1),
        BehaviorClass::Medium => {
            (steps::MEDIUM_BASE, steps::MEDIUM_BASE + steps::MEDIUM_SPREAD - 1)
        }
        BehaviorClass::Low => (0, steps::LOW_SPREAD - 1),
        BehaviorClass::LowToHigh => (steps::RAMP_INCREMENT, steps::RAMP_CEILING),
    }
}
