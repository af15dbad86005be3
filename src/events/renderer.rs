//! Event rendering
//!
//! This module turns a (user, sample) pair into the schema of the user's
//! platform, stamping it `reference + tick hours` and attaching a location on
//! roughly half of the events.

use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use tracing::trace;

use crate::events::activity_event::{
    placeholder, ActivityEvent, AndroidActivityEvent, GeoLocation, IosActivityEvent, Person,
    PhysicalActivity,
};
use crate::types::{DevicePlatform, UserId};
use crate::user::{Sample, User};

/// Probability that a rendered event carries a location
pub const LOCATION_PROBABILITY: f64 = 0.5;

/// Renders samples into vendor-specific events
#[derive(Debug, Clone)]
pub struct EventRenderer {
    /// Instant that tick 0 maps to
    reference: DateTime<Utc>,
    /// Chance of attaching a location to an event
    location_probability: f64,
}

impl EventRenderer {
    /// Create a renderer anchored at `reference`
    pub fn new(reference: DateTime<Utc>) -> Self {
        Self { reference, location_probability: LOCATION_PROBABILITY }
    }

    /// Override the location probability, clamped to `[0, 1]`
    pub fn with_location_probability(mut self, probability: f64) -> Self {
        self.location_probability = if probability.is_nan() { 0.0 } else { probability.clamp(0.0, 1.0) };
        self
    }

    /// Instant that tick 0 maps to
    pub fn reference(&self) -> DateTime<Utc> {
        self.reference
    }

    /// Chance of attaching a location to an event
    pub fn location_probability(&self) -> f64 {
        self.location_probability
    }

    /// Timestamp of a tick: one simulated hour per tick
    pub fn timestamp_for(&self, tick: u64) -> DateTime<Utc> {
        let hours = i64::try_from(tick).unwrap_or(i64::MAX);
        self.reference + Duration::hours(hours)
    }

    /// Independent coin flip deciding whether an event carries a location
    pub fn sample_location<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<GeoLocation> {
        rng.gen_bool(self.location_probability).then(GeoLocation::fixed)
    }

    /// Render one event, drawing the location from `rng`
    pub fn render<R: Rng + ?Sized>(&self, user: &User, sample: &Sample, rng: &mut R) -> ActivityEvent {
        let location = self.sample_location(rng);
        self.render_with_location(user, sample, location)
    }

    /// Render one event with a known location
    pub fn render_with_location(
        &self,
        user: &User,
        sample: &Sample,
        location: Option<GeoLocation>,
    ) -> ActivityEvent {
        let timestamp = self.timestamp_for(sample.tick);
        trace!(
            user_id = %user.id(),
            tick = sample.tick,
            steps = sample.steps,
            located = location.is_some(),
            "rendering event"
        );

        match user.platform() {
            DevicePlatform::Apple => {
                ActivityEvent::Ios(render_ios(user.id(), sample.steps, location, timestamp))
            }
            DevicePlatform::Android => {
                ActivityEvent::Android(render_android(user.id(), sample.steps, location, timestamp))
            }
        }
    }
}

/// Flat Apple record; a missing location becomes three null fields
pub fn render_ios(
    user_id: &UserId,
    steps: u32,
    location: Option<GeoLocation>,
    timestamp: DateTime<Utc>,
) -> IosActivityEvent {
    IosActivityEvent {
        first_name: user_id.to_string(),
        last_name: placeholder::LAST_NAME.to_string(),
        user_id: user_id.to_string(),
        gender: placeholder::GENDER.to_string(),
        height: placeholder::HEIGHT,
        weight: placeholder::WEIGHT,
        activity: PhysicalActivity::with_steps(steps),
        latitude: location.map(|l| l.lat),
        longitude: location.map(|l| l.lon),
        pincode: location.map(|l| l.pincode),
        timestamp,
    }
}

/// Nested Android record; a missing location leaves the block out
pub fn render_android(
    user_id: &UserId,
    steps: u32,
    location: Option<GeoLocation>,
    timestamp: DateTime<Utc>,
) -> AndroidActivityEvent {
    AndroidActivityEvent {
        person: Person {
            first_name: user_id.to_string(),
            last_name: placeholder::LAST_NAME.to_string(),
            id: user_id.to_string(),
            gender: placeholder::GENDER.to_string(),
            height: placeholder::HEIGHT,
            weight: placeholder::WEIGHT,
        },
        activity: PhysicalActivity::with_steps(steps),
        location,
        timestamp,
    }
}
