//! Tests for event rendering
//!
//! These tests check the exact wire shape of both vendor schemas, including
//! the null-versus-absent handling of a missing location.

use chrono::{TimeZone, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::Value;
use step_activity_simulator::events::{ActivityEvent, EventRenderer, GeoLocation, NormalizedActivity};
use step_activity_simulator::types::{BehaviorClass, DevicePlatform};
use step_activity_simulator::user::{Sample, User, UserRegistry};

fn renderer() -> EventRenderer {
    EventRenderer::new(Utc.with_ymd_and_hms(2024, 5, 20, 6, 0, 0).unwrap())
}

fn json(event: &ActivityEvent) -> Value {
    serde_json::from_str(&event.to_json().unwrap()).unwrap()
}

#[test]
fn test_apple_schema_without_location() {
    let user = User::new(BehaviorClass::High, 0);
    let event = renderer().render_with_location(&user, &Sample { steps: 150, tick: 0 }, None);
    let body = json(&event);

    assert_eq!(body["UserFirstName"], "HIGH-user-1");
    assert_eq!(body["UserLastName"], "Doe");
    assert_eq!(body["UserId"], "HIGH-user-1");
    assert_eq!(body["UserGender"], "male");
    assert_eq!(body["UserHeight"], 175);
    assert_eq!(body["UserWeight"], 70);
    assert_eq!(body["PhysicalActivity"]["Dance_minutes"], 100);
    assert_eq!(body["PhysicalActivity"]["Yoga_minutes"], 100);
    assert_eq!(body["PhysicalActivity"]["Sleep_hours"], 3);
    assert_eq!(body["PhysicalActivity"]["walking_steps"], 150);
    assert_eq!(body["event_timestamp"], "2024-05-20T06:00:00.000Z");

    let object = body.as_object().unwrap();
    for key in ["Geo_lat", "Geo_lon", "pincode"] {
        assert!(object.contains_key(key), "{} must be present", key);
        assert!(object[key].is_null(), "{} must be null", key);
    }
}

#[test]
fn test_apple_schema_with_location() {
    let user = User::new(BehaviorClass::High, 0);
    let event = renderer().render_with_location(
        &user,
        &Sample { steps: 150, tick: 0 },
        Some(GeoLocation::fixed()),
    );
    let body = json(&event);

    assert_eq!(body["Geo_lat"], 1.3521);
    assert_eq!(body["Geo_lon"], 103.8198);
    assert_eq!(body["pincode"], 333001);
}

#[test]
fn test_android_schema_without_location() {
    let user = User::new(BehaviorClass::Low, 1);
    let event = renderer().render_with_location(&user, &Sample { steps: 12, tick: 2 }, None);
    let body = json(&event);

    assert_eq!(body["Person"]["FirstName"], "LOW-user-2");
    assert_eq!(body["Person"]["LastName"], "Doe");
    assert_eq!(body["Person"]["Id"], "LOW-user-2");
    assert_eq!(body["Person"]["Gender"], "male");
    assert_eq!(body["Person"]["Height"], 175);
    assert_eq!(body["Person"]["Weight"], 70);
    assert_eq!(body["Activity"]["walking_steps"], 12);
    assert_eq!(body["ts"], "2024-05-20T08:00:00.000Z");
    assert!(!body.as_object().unwrap().contains_key("Location"));
}

#[test]
fn test_android_schema_with_location() {
    let user = User::new(BehaviorClass::Low, 1);
    let event = renderer().render_with_location(
        &user,
        &Sample { steps: 12, tick: 0 },
        Some(GeoLocation::fixed()),
    );
    let body = json(&event);

    assert_eq!(body["Location"]["lat"], 1.3521);
    assert_eq!(body["Location"]["lon"], 103.8198);
    assert_eq!(body["Location"]["pincode"], 333001);
}

#[test]
fn test_rendering_is_schema_pure() {
    let renderer = renderer();
    let mut rng = StdRng::seed_from_u64(99);
    let mut registry = UserRegistry::create_users(BehaviorClass::Medium, 6).unwrap();

    for tick in 0..20 {
        for user in registry.iter_mut() {
            let sample = user.next_sample(tick, &mut rng);
            let event = renderer.render(user, &sample, &mut rng);
            let body = json(&event);
            let object = body.as_object().unwrap();

            assert_eq!(event.platform(), user.platform());
            match user.platform() {
                DevicePlatform::Apple => {
                    assert!(object.contains_key("UserId"));
                    assert!(!object.contains_key("Person"));
                    assert!(!object.contains_key("Location"));
                }
                DevicePlatform::Android => {
                    assert!(object.contains_key("Person"));
                    assert!(!object.contains_key("UserId"));
                    assert!(!object.contains_key("Geo_lat"));
                }
            }
        }
    }
}

#[test]
fn test_wire_json_parses_back() {
    let renderer = renderer();
    let mut rng = StdRng::seed_from_u64(3);
    for index in 0..2 {
        let user = User::new(BehaviorClass::High, index);
        let event = renderer.render(&user, &Sample { steps: 140, tick: 5 }, &mut rng);
        let parsed: ActivityEvent = serde_json::from_str(&event.to_json().unwrap()).unwrap();
        let (a, b) = (NormalizedActivity::from(&parsed), NormalizedActivity::from(&event));

        assert_eq!(parsed.platform(), event.platform());
        assert_eq!(a.user_id, b.user_id);
        assert_eq!(a.steps, 140);
        assert_eq!(a.timestamp, b.timestamp);
        assert_eq!(a.is_located(), b.is_located());
        assert_eq!(a.pincode, b.pincode);
    }
}
