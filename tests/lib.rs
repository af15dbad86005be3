// Integration tests test your crate's public API. They only have access to items
// in your crate that are marked pub. See the Cargo Targets page of the Cargo Book
// for more information.
//
//   https://doc.rust-lang.org/cargo/reference/cargo-targets.html#integration-tests
//

use step_activity_simulator::*;


// Rendering and publishing
mod event_rendering_tests;


#[test]
fn test_user_ids() {
    let id = UserId::for_ordinal(BehaviorClass::Low, 4);
    assert_eq!(id.as_str(), "LOW-user-5");
    assert_eq!(id.to_string(), "LOW-user-5");
    assert_ne!(id, UserId::for_ordinal(BehaviorClass::High, 4));
}

#[test]
fn test_enum_types() {
    for class in BehaviorClass::ALL {
        assert!(!class.to_string().is_empty());
        assert_eq!(class.as_str().parse::<BehaviorClass>().unwrap(), class);
    }

    assert_eq!(DevicePlatform::for_ordinal(0), DevicePlatform::Apple);
    assert_eq!(DevicePlatform::for_ordinal(1), DevicePlatform::Android);
    assert_eq!(TransportKind::Stdout.to_string(), "stdout");
}

#[test]
fn test_topics_are_fixed() {
    assert_eq!(IOS_TOPIC, "user-activity-ios");
    assert_eq!(ANDROID_TOPIC, "user-activity-android");
}

#[test]
fn test_default_configuration_is_valid() {
    let config = SimulationConfig::default();
    assert!(config.validate().is_ok());
    assert_eq!(config.tick_interval(), std::time::Duration::from_secs(1));
}
