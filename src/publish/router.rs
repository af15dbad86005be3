//! Topic routing
//!
//! Apple events go to `user-activity-ios`, Android events to
//! `user-activity-android`. The user id is the partition key, so all events
//! of one user stay in encounter order on one partition.

use crate::events::ActivityEvent;
use crate::publish::OutboundMessage;
use crate::types::DevicePlatform;

/// Topic for Apple-platform events
pub const IOS_TOPIC: &str = "user-activity-ios";

/// Topic for Android-platform events
pub const ANDROID_TOPIC: &str = "user-activity-android";

/// Destination of one event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    /// Destination topic
    pub topic: &'static str,
    /// Partition key
    pub key: String,
}

/// Maps events to topics and keys
#[derive(Debug, Clone, Copy, Default)]
pub struct TopicRouter;

impl TopicRouter {
    /// Create a router
    pub fn new() -> Self {
        Self
    }

    /// Topic that events of `platform` are published to
    pub fn topic_for(platform: DevicePlatform) -> &'static str {
        match platform {
            DevicePlatform::Apple => IOS_TOPIC,
            DevicePlatform::Android => ANDROID_TOPIC,
        }
    }

    /// Topic and key for an event
    pub fn route(&self, event: &ActivityEvent) -> Route {
        Route { topic: Self::topic_for(event.platform()), key: event.user_id().to_string() }
    }

    /// Serialize an event into a message addressed by its route
    pub fn outbound(
        &self,
        event: &ActivityEvent,
        tick: u64,
    ) -> Result<OutboundMessage, serde_json::Error> {
        let Route { topic, key } = self.route(event);
        Ok(OutboundMessage {
            topic: topic.to_string(),
            key,
            platform: event.platform(),
            body: event.to_json()?,
            tick,
        })
    }
}
