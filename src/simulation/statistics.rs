//! Statistics collection and reporting
//!
//! Counters accumulated by the scheduler over a run and rendered as a summary
//! report at shutdown.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

use crate::events::NormalizedActivity;
use crate::publish::PublishCounts;
use crate::types::DevicePlatform;

/// Counters for one simulation run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationStatistics {
    /// Users in the registry
    pub total_users: usize,
    /// Apple-platform users
    pub apple_users: usize,
    /// Android-platform users
    pub android_users: usize,

    /// Completed passes over the registry
    pub ticks_completed: u64,
    /// Events rendered in the Apple schema
    pub ios_events: u64,
    /// Events rendered in the Android schema
    pub android_events: u64,
    /// Events that carried a location
    pub located_events: u64,
    /// Sum of all emitted step counts
    pub total_steps: u64,
    /// Events that could not be serialized
    pub serialization_failures: u64,

    /// Sends the transport accepted
    pub published: u64,
    /// Sends the transport refused
    pub publish_failures: u64,

    /// Wall-clock run time
    pub simulation_duration: Duration,
}

impl SimulationStatistics {
    /// Start counting for a registry with the given platform split
    pub fn new(apple_users: usize, android_users: usize) -> Self {
        Self {
            total_users: apple_users + android_users,
            apple_users,
            android_users,
            ..Default::default()
        }
    }

    /// Record one rendered event
    pub fn record_event(&mut self, platform: DevicePlatform, activity: &NormalizedActivity) {
        match platform {
            DevicePlatform::Apple => self.ios_events += 1,
            DevicePlatform::Android => self.android_events += 1,
        }
        if activity.is_located() {
            self.located_events += 1;
        }
        self.total_steps += u64::from(activity.steps);
    }

    /// Record an event that failed to serialize
    pub fn record_serialization_failure(&mut self) {
        self.serialization_failures += 1;
    }

    /// Record a completed tick
    pub fn record_tick(&mut self) {
        self.ticks_completed += 1;
    }

    /// Fold in the dispatcher's final counters
    pub fn apply_publish_counts(&mut self, counts: PublishCounts) {
        self.published = counts.published;
        self.publish_failures = counts.failed;
    }

    /// All rendered events
    pub fn total_events(&self) -> u64 {
        self.ios_events + self.android_events
    }

    /// Share of events carrying a location, as a percentage
    pub fn located_percentage(&self) -> f64 {
        match self.total_events() {
            0 => 0.0,
            n => self.located_events as f64 / n as f64 * 100.0,
        }
    }

    /// Mean steps per event
    pub fn average_steps(&self) -> f64 {
        match self.total_events() {
            0 => 0.0,
            n => self.total_steps as f64 / n as f64,
        }
    }

    /// Human-readable summary
    pub fn generate_summary_report(&self) -> String {
        let mut report = String::new();

        report.push_str("=== Simulation Summary Report ===\n\n");
        report.push_str(&format!(
            "Simulation Duration: {:.2} seconds\n",
            self.simulation_duration.as_secs_f64()
        ));
        report.push_str(&format!("Ticks Completed: {}\n\n", self.ticks_completed));

        report.push_str("Users:\n");
        report.push_str(&format!("  • Total Users: {}\n", self.total_users));
        report.push_str(&format!("  • Apple Users: {}\n", self.apple_users));
        report.push_str(&format!("  • Android Users: {}\n\n", self.android_users));

        report.push_str("Event Statistics:\n");
        report.push_str(&format!("  • Total Events: {}\n", self.total_events()));
        report.push_str(&format!("  • iOS Events: {}\n", self.ios_events));
        report.push_str(&format!("  • Android Events: {}\n", self.android_events));
        report.push_str(&format!(
            "  • Located Events: {} ({:.1}%)\n",
            self.located_events,
            self.located_percentage()
        ));
        report.push_str(&format!(
            "  • Total Steps: {} (avg {:.1}/event)\n\n",
            self.total_steps,
            self.average_steps()
        ));

        report.push_str("Publishing:\n");
        report.push_str(&format!("  • Published: {}\n", self.published));
        report.push_str(&format!("  • Failed: {}\n", self.publish_failures));
        if self.serialization_failures > 0 {
            report.push_str(&format!(
                "  • Serialization Failures: {}\n",
                self.serialization_failures
            ));
        }

        report
    }
}

impl fmt::Display for SimulationStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.generate_summary_report())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{render_android, render_ios, ActivityEvent, GeoLocation};
    use crate::types::UserId;
    use chrono::Utc;

    #[test]
    fn test_new_statistics() {
        let stats = SimulationStatistics::new(3, 2);
        assert_eq!(stats.total_users, 5);
        assert_eq!(stats.total_events(), 0);
        assert_eq!(stats.located_percentage(), 0.0);
        assert_eq!(stats.average_steps(), 0.0);
    }

    #[test]
    fn test_record_events() {
        let mut stats = SimulationStatistics::new(1, 1);
        let id = UserId::from("MEDIUM-user-1");
        let ios = ActivityEvent::Ios(render_ios(&id, 60, Some(GeoLocation::fixed()), Utc::now()));
        let android = ActivityEvent::Android(render_android(&id, 80, None, Utc::now()));

        stats.record_event(DevicePlatform::Apple, &NormalizedActivity::from(&ios));
        stats.record_event(DevicePlatform::Android, &NormalizedActivity::from(&android));
        stats.record_tick();

        assert_eq!(stats.ios_events, 1);
        assert_eq!(stats.android_events, 1);
        assert_eq!(stats.located_events, 1);
        assert_eq!(stats.total_steps, 140);
        assert_eq!(stats.average_steps(), 70.0);
        assert_eq!(stats.located_percentage(), 50.0);
        assert_eq!(stats.ticks_completed, 1);
    }

    #[test]
    fn test_summary_report() {
        let mut stats = SimulationStatistics::new(1, 0);
        stats.apply_publish_counts(PublishCounts { enqueued: 4, published: 3, failed: 1 });
        let report = stats.to_string();

        assert!(report.contains("=== Simulation Summary Report ==="));
        assert!(report.contains("Total Users: 1"));
        assert!(report.contains("Published: 3"));
        assert!(report.contains("Failed: 1"));
        assert!(!report.contains("Serialization Failures"));
    }
}
