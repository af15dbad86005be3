//! Schema-independent view of an activity event

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::events::activity_event::ActivityEvent;

/// One reading with the vendor schema differences folded away
///
/// Both the Apple null geo fields and the missing Android `Location` block
/// become `None` here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedActivity {
    /// User id
    pub user_id: String,
    /// First name
    pub first_name: String,
    /// Last name
    pub last_name: String,
    /// Steps walked during the hour
    pub steps: u32,
    /// Latitude, if located
    pub latitude: Option<f64>,
    /// Longitude, if located
    pub longitude: Option<f64>,
    /// Postal code, if located
    pub pincode: Option<String>,
    /// Reading time
    pub timestamp: DateTime<Utc>,
}

impl From<&ActivityEvent> for NormalizedActivity {
    fn from(event: &ActivityEvent) -> Self {
        let (first_name, last_name) = match event {
            ActivityEvent::Ios(e) => (e.first_name.clone(), e.last_name.clone()),
            ActivityEvent::Android(e) => (e.person.first_name.clone(), e.person.last_name.clone()),
        };
        let location = event.location();

        Self {
            user_id: event.user_id().to_string(),
            first_name,
            last_name,
            steps: event.steps(),
            latitude: location.map(|l| l.lat),
            longitude: location.map(|l| l.lon),
            pincode: location.map(|l| l.pincode.to_string()),
            timestamp: event.timestamp(),
        }
    }
}

impl NormalizedActivity {
    /// Whether the reading carried a location
    pub fn is_located(&self) -> bool {
        self.latitude.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{render_android, render_ios, GeoLocation};
    use crate::types::UserId;
    use chrono::TimeZone;

    #[test]
    fn test_both_schemas_normalize_the_same_way() {
        let id = UserId::from("LOW-user-1");
        let ts = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();

        for location in [None, Some(GeoLocation::fixed())] {
            let apple = ActivityEvent::Ios(render_ios(&id, 12, location, ts));
            let droid = ActivityEvent::Android(render_android(&id, 12, location, ts));

            let a = NormalizedActivity::from(&apple);
            let b = NormalizedActivity::from(&droid);
            assert_eq!(a, b);
            assert_eq!(a.is_located(), location.is_some());
        }
    }

    #[test]
    fn test_located_fields() {
        let id = UserId::from("HIGH-user-3");
        let ts = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        let normalized =
            NormalizedActivity::from(&ActivityEvent::Ios(render_ios(&id, 140, Some(GeoLocation::fixed()), ts)));

        assert_eq!(normalized.user_id, "HIGH-user-3");
        assert_eq!(normalized.first_name, "HIGH-user-3");
        assert_eq!(normalized.last_name, "Doe");
        assert_eq!(normalized.steps, 140);
        assert_eq!(normalized.latitude, Some(1.3521));
        assert_eq!(normalized.longitude, Some(103.8198));
        assert_eq!(normalized.pincode.as_deref(), Some("333001"));
    }
}
