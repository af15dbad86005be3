//! Activity event schemas
//!
//! Two vendor schemas carry the same reading. The Apple record is flat and
//! writes `null` geo fields when no location was sampled; the Android record
//! nests person, activity and location and leaves `Location` out entirely.
//! Field names and placeholder values are part of the wire contract.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::DevicePlatform;

/// Placeholder profile fields shared by both schemas
pub mod placeholder {
    /// Last name of every simulated user
    pub const LAST_NAME: &str = "Doe";
    /// Gender of every simulated user
    pub const GENDER: &str = "male";
    /// Height in centimetres
    pub const HEIGHT: u32 = 175;
    /// Weight in kilograms
    pub const WEIGHT: u32 = 70;
    /// Dance minutes reported per event
    pub const DANCE_MINUTES: u32 = 100;
    /// Yoga minutes reported per event
    pub const YOGA_MINUTES: u32 = 100;
    /// Sleep hours reported per event
    pub const SLEEP_HOURS: u32 = 3;
}

/// Fixed coordinate attached to events that carry a location
pub mod fixed_location {
    /// Latitude
    pub const LATITUDE: f64 = 1.3521;
    /// Longitude
    pub const LONGITUDE: f64 = 103.8198;
    /// Postal code
    pub const PINCODE: u32 = 333001;
}

/// ISO-8601 instants with millisecond precision and a `Z` suffix
mod iso_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub(super) fn serialize<S>(timestamp: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&timestamp.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub(super) fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}

/// Sampled location of a reading
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    /// Latitude in degrees
    pub lat: f64,
    /// Longitude in degrees
    pub lon: f64,
    /// Postal code
    pub pincode: u32,
}

impl GeoLocation {
    /// The coordinate every located event carries
    pub fn fixed() -> Self {
        Self {
            lat: fixed_location::LATITUDE,
            lon: fixed_location::LONGITUDE,
            pincode: fixed_location::PINCODE,
        }
    }
}

/// Activity block of the Apple schema
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhysicalActivity {
    /// Minutes spent dancing
    #[serde(rename = "Dance_minutes")]
    pub dance_minutes: u32,
    /// Minutes spent on yoga
    #[serde(rename = "Yoga_minutes")]
    pub yoga_minutes: u32,
    /// Hours slept
    #[serde(rename = "Sleep_hours")]
    pub sleep_hours: u32,
    /// Steps walked during the hour
    pub walking_steps: u32,
}

impl PhysicalActivity {
    /// Placeholder activity carrying the sampled steps
    pub fn with_steps(walking_steps: u32) -> Self {
        Self {
            dance_minutes: placeholder::DANCE_MINUTES,
            yoga_minutes: placeholder::YOGA_MINUTES,
            sleep_hours: placeholder::SLEEP_HOURS,
            walking_steps,
        }
    }
}

/// Apple-style flat record, published to `user-activity-ios`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IosActivityEvent {
    /// First name; the user id in simulated data
    #[serde(rename = "UserFirstName")]
    pub first_name: String,
    /// Last name
    #[serde(rename = "UserLastName")]
    pub last_name: String,
    /// User id
    #[serde(rename = "UserId")]
    pub user_id: String,
    /// Gender
    #[serde(rename = "UserGender")]
    pub gender: String,
    /// Height in centimetres
    #[serde(rename = "UserHeight")]
    pub height: u32,
    /// Weight in kilograms
    #[serde(rename = "UserWeight")]
    pub weight: u32,
    /// Activity block
    #[serde(rename = "PhysicalActivity")]
    pub activity: PhysicalActivity,
    /// Latitude, null without a location
    #[serde(rename = "Geo_lat")]
    pub latitude: Option<f64>,
    /// Longitude, null without a location
    #[serde(rename = "Geo_lon")]
    pub longitude: Option<f64>,
    /// Postal code, null without a location
    pub pincode: Option<u32>,
    /// Reading time
    #[serde(rename = "event_timestamp", with = "iso_millis")]
    pub timestamp: DateTime<Utc>,
}

/// Person block of the Android schema
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    /// First name; the user id in simulated data
    #[serde(rename = "FirstName")]
    pub first_name: String,
    /// Last name
    #[serde(rename = "LastName")]
    pub last_name: String,
    /// User id
    #[serde(rename = "Id")]
    pub id: String,
    /// Gender
    #[serde(rename = "Gender")]
    pub gender: String,
    /// Height in centimetres
    #[serde(rename = "Height")]
    pub height: u32,
    /// Weight in kilograms
    #[serde(rename = "Weight")]
    pub weight: u32,
}

/// Android-style nested record, published to `user-activity-android`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AndroidActivityEvent {
    /// Who the reading belongs to
    #[serde(rename = "Person")]
    pub person: Person,
    /// Activity block, same fields as the Apple one
    #[serde(rename = "Activity")]
    pub activity: PhysicalActivity,
    /// Location, omitted from the JSON when not sampled
    #[serde(rename = "Location", default, skip_serializing_if = "Option::is_none")]
    pub location: Option<GeoLocation>,
    /// Reading time
    #[serde(rename = "ts", with = "iso_millis")]
    pub timestamp: DateTime<Utc>,
}

/// A rendered reading in exactly one vendor schema
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ActivityEvent {
    /// Apple-platform reading
    Ios(IosActivityEvent),
    /// Android-platform reading
    Android(AndroidActivityEvent),
}

impl ActivityEvent {
    /// Platform whose schema this event uses
    pub fn platform(&self) -> DevicePlatform {
        match self {
            ActivityEvent::Ios(_) => DevicePlatform::Apple,
            ActivityEvent::Android(_) => DevicePlatform::Android,
        }
    }

    /// Id of the user the reading belongs to
    pub fn user_id(&self) -> &str {
        match self {
            ActivityEvent::Ios(event) => &event.user_id,
            ActivityEvent::Android(event) => &event.person.id,
        }
    }

    /// Steps walked during the hour
    pub fn steps(&self) -> u32 {
        match self {
            ActivityEvent::Ios(event) => event.activity.walking_steps,
            ActivityEvent::Android(event) => event.activity.walking_steps,
        }
    }

    /// Reading time
    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            ActivityEvent::Ios(event) => event.timestamp,
            ActivityEvent::Android(event) => event.timestamp,
        }
    }

    /// Location carried by the event, whichever way the schema encodes it
    pub fn location(&self) -> Option<GeoLocation> {
        match self {
            ActivityEvent::Ios(event) => match (event.latitude, event.longitude, event.pincode) {
                (Some(lat), Some(lon), Some(pincode)) => Some(GeoLocation { lat, lon, pincode }),
                _ => None,
            },
            ActivityEvent::Android(event) => event.location,
        }
    }

    /// UTF-8 JSON body as published
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::{json, Value};

    fn ts() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap()
    }

    fn ios(location: Option<GeoLocation>) -> IosActivityEvent {
        IosActivityEvent {
            first_name: "HIGH-user-1".to_string(),
            last_name: placeholder::LAST_NAME.to_string(),
            user_id: "HIGH-user-1".to_string(),
            gender: placeholder::GENDER.to_string(),
            height: placeholder::HEIGHT,
            weight: placeholder::WEIGHT,
            activity: PhysicalActivity::with_steps(142),
            latitude: location.map(|l| l.lat),
            longitude: location.map(|l| l.lon),
            pincode: location.map(|l| l.pincode),
            timestamp: ts(),
        }
    }

    fn android(location: Option<GeoLocation>) -> AndroidActivityEvent {
        AndroidActivityEvent {
            person: Person {
                first_name: "HIGH-user-2".to_string(),
                last_name: placeholder::LAST_NAME.to_string(),
                id: "HIGH-user-2".to_string(),
                gender: placeholder::GENDER.to_string(),
                height: placeholder::HEIGHT,
                weight: placeholder::WEIGHT,
            },
            activity: PhysicalActivity::with_steps(171),
            location,
            timestamp: ts(),
        }
    }

    #[test]
    fn test_ios_wire_format_with_location() {
        let value = serde_json::to_value(ActivityEvent::Ios(ios(Some(GeoLocation::fixed())))).unwrap();
        assert_eq!(
            value,
            json!({
                "UserFirstName": "HIGH-user-1",
                "UserLastName": "Doe",
                "UserId": "HIGH-user-1",
                "UserGender": "male",
                "UserHeight": 175,
                "UserWeight": 70,
                "PhysicalActivity": {
                    "Dance_minutes": 100,
                    "Yoga_minutes": 100,
                    "Sleep_hours": 3,
                    "walking_steps": 142
                },
                "Geo_lat": 1.3521,
                "Geo_lon": 103.8198,
                "pincode": 333001,
                "event_timestamp": "2024-03-01T08:00:00.000Z"
            })
        );
    }

    #[test]
    fn test_ios_without_location_writes_nulls() {
        let value = serde_json::to_value(ios(None)).unwrap();
        let object = value.as_object().unwrap();
        for key in ["Geo_lat", "Geo_lon", "pincode"] {
            assert_eq!(object.get(key), Some(&Value::Null), "{} should be an explicit null", key);
        }
    }

    #[test]
    fn test_android_wire_format_with_location() {
        let value =
            serde_json::to_value(ActivityEvent::Android(android(Some(GeoLocation::fixed())))).unwrap();
        assert_eq!(
            value,
            json!({
                "Person": {
                    "FirstName": "HIGH-user-2",
                    "LastName": "Doe",
                    "Id": "HIGH-user-2",
                    "Gender": "male",
                    "Height": 175,
                    "Weight": 70
                },
                "Activity": {
                    "Dance_minutes": 100,
                    "Yoga_minutes": 100,
                    "Sleep_hours": 3,
                    "walking_steps": 171
                },
                "Location": {"lat": 1.3521, "lon": 103.8198, "pincode": 333001},
                "ts": "2024-03-01T08:00:00.000Z"
            })
        );
    }

    #[test]
    fn test_android_without_location_omits_key() {
        let value = serde_json::to_value(android(None)).unwrap();
        assert!(!value.as_object().unwrap().contains_key("Location"));
    }

    #[test]
    fn test_accessors_agree_across_schemas() {
        let apple = ActivityEvent::Ios(ios(None));
        let droid = ActivityEvent::Android(android(Some(GeoLocation::fixed())));

        assert_eq!(apple.platform(), DevicePlatform::Apple);
        assert_eq!(apple.user_id(), "HIGH-user-1");
        assert_eq!(apple.steps(), 142);
        assert_eq!(apple.location(), None);

        assert_eq!(droid.platform(), DevicePlatform::Android);
        assert_eq!(droid.user_id(), "HIGH-user-2");
        assert_eq!(droid.steps(), 171);
        assert_eq!(droid.location(), Some(GeoLocation::fixed()));
        assert_eq!(droid.timestamp(), ts());
    }

    #[test]
    fn test_published_body_parses_back_to_same_schema() {
        let body = ActivityEvent::Android(android(None)).to_json().unwrap();
        let parsed: ActivityEvent = serde_json::from_str(&body).unwrap();
        assert_eq!(parsed.platform(), DevicePlatform::Android);
        assert_eq!(parsed.location(), None);
    }
}
