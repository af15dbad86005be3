//! Publisher that prints messages as JSON lines

use std::io::Write;

use async_trait::async_trait;
use serde::de::IgnoredAny;

use crate::publish::{MessagePublisher, OutboundMessage, PublishError};

/// Writes `{"topic":..,"key":..,"value":..}` lines to stdout
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutPublisher;

impl StdoutPublisher {
    /// Create a stdout publisher
    pub fn new() -> Self {
        Self
    }

    /// The line written for a message
    ///
    /// The body is embedded as sent, so its field order matches the schema.
    pub fn format_line(message: &OutboundMessage) -> Result<String, PublishError> {
        let rejected = |reason: String| PublishError::Rejected { topic: message.topic.clone(), reason };

        serde_json::from_str::<IgnoredAny>(&message.body)
            .map_err(|e| rejected(format!("body is not JSON: {}", e)))?;
        let topic = serde_json::to_string(&message.topic).map_err(|e| rejected(e.to_string()))?;
        let key = serde_json::to_string(&message.key).map_err(|e| rejected(e.to_string()))?;

        Ok(format!(r#"{{"topic":{},"key":{},"value":{}}}"#, topic, key, message.body.trim()))
    }
}

#[async_trait]
impl MessagePublisher for StdoutPublisher {
    fn name(&self) -> &'static str {
        "stdout"
    }

    async fn connect(&self) -> Result<(), PublishError> {
        Ok(())
    }

    async fn send(&self, message: &OutboundMessage) -> Result<(), PublishError> {
        let line = Self::format_line(message)?;
        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "{}", line).map_err(|e| PublishError::send(&message.topic, e))
    }

    async fn flush(&self) -> Result<(), PublishError> {
        std::io::stdout()
            .flush()
            .map_err(|e| PublishError::send("stdout", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DevicePlatform;
    use serde_json::Value;

    fn message(topic: &str, body: &str) -> OutboundMessage {
        OutboundMessage {
            topic: topic.into(),
            key: "LOW-user-2".into(),
            platform: DevicePlatform::Android,
            body: body.into(),
            tick: 0,
        }
    }

    #[test]
    fn test_line_wraps_body() {
        let message = message("user-activity-android", r#"{"ts":"2024-01-01T00:00:00.000Z"}"#);
        let line: Value = serde_json::from_str(&StdoutPublisher::format_line(&message).unwrap()).unwrap();

        assert_eq!(line["topic"], "user-activity-android");
        assert_eq!(line["key"], "LOW-user-2");
        assert_eq!(line["value"]["ts"], "2024-01-01T00:00:00.000Z");
    }

    #[test]
    fn test_non_json_body_is_rejected() {
        assert!(matches!(
            StdoutPublisher::format_line(&message("user-activity-ios", "not json")),
            Err(PublishError::Rejected { .. })
        ));
    }

    #[test]
    fn test_body_field_order_is_kept() {
        let body = r#"{"UserId":"LOW-user-2","FirstName":"LOW-user-2","LastName":"Doe","Geo_lat":null}"#;
        let line = StdoutPublisher::format_line(&message("user-activity-ios", body)).unwrap();

        assert_eq!(
            line,
            format!(r#"{{"topic":"user-activity-ios","key":"LOW-user-2","value":{}}}"#, body)
        );
    }

    #[test]
    fn test_topic_and_key_are_escaped() {
        let mut message = message("user-activity-ios", "{}");
        message.key = "odd\"key".into();
        let line: Value = serde_json::from_str(&StdoutPublisher::format_line(&message).unwrap()).unwrap();

        assert_eq!(line["key"], "odd\"key");
    }
}
