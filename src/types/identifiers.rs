//! Identifier types for the step activity simulator
//!
//! User ids are human readable and deterministic: `{CLASS}-user-{n}` with `n`
//! starting at 1. They double as the partition key of every published message.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::BehaviorClass;

/// Unique identifier for a simulated user
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Build the id for the user at the given 0-based position in the registry
    pub fn for_ordinal(class: BehaviorClass, index: usize) -> Self {
        Self(format!("{}-user-{}", class.as_str(), index + 1))
    }

    /// Borrow the id as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for UserId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_user_id_is_one_indexed() {
        assert_eq!(UserId::for_ordinal(BehaviorClass::High, 0).as_str(), "HIGH-user-1");
        assert_eq!(UserId::for_ordinal(BehaviorClass::High, 2).as_str(), "HIGH-user-3");
        assert_eq!(
            UserId::for_ordinal(BehaviorClass::LowToHigh, 9).to_string(),
            "LOW_TO_HIGH-user-10"
        );
    }

    #[test]
    fn test_user_ids_do_not_collide() {
        let ids: HashSet<UserId> =
            (0..1000).map(|i| UserId::for_ordinal(BehaviorClass::Medium, i)).collect();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn test_user_id_serializes_as_plain_string() {
        let id = UserId::for_ordinal(BehaviorClass::Low, 4);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"LOW-user-5\"");

        let parsed: UserId = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, id);
    }
}
