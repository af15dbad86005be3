//! NATS publisher
//!
//! The topic becomes the subject and the user id travels in a `key` header.

use async_trait::async_trait;
use tokio::sync::OnceCell;
use tracing::{debug, info};

use crate::publish::{MessagePublisher, OutboundMessage, PublishError};

/// Header carrying the partition key
pub const KEY_HEADER: &str = "key";

/// Publishes to a NATS server
pub struct NatsPublisher {
    url: String,
    client: OnceCell<async_nats::Client>,
}

impl NatsPublisher {
    /// Create a publisher for `url`; nothing is dialed until `connect`
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into(), client: OnceCell::new() }
    }

    /// Server address
    pub fn url(&self) -> &str {
        &self.url
    }

    fn client(&self) -> Result<&async_nats::Client, PublishError> {
        self.client.get().ok_or(PublishError::NotConnected)
    }
}

impl std::fmt::Debug for NatsPublisher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NatsPublisher")
            .field("url", &self.url)
            .field("connected", &self.client.initialized())
            .finish()
    }
}

#[async_trait]
impl MessagePublisher for NatsPublisher {
    fn name(&self) -> &'static str {
        "nats"
    }

    async fn connect(&self) -> Result<(), PublishError> {
        self.client
            .get_or_try_init(|| async {
                info!(url = %self.url, "connecting to NATS server");
                let client = async_nats::connect(self.url.as_str())
                    .await
                    .map_err(|e| PublishError::connection(&self.url, e))?;
                info!("NATS connection established");
                Ok::<_, PublishError>(client)
            })
            .await?;
        Ok(())
    }

    async fn send(&self, message: &OutboundMessage) -> Result<(), PublishError> {
        let client = self.client()?;
        let mut headers = async_nats::HeaderMap::new();
        headers.insert(KEY_HEADER, message.key.as_str());

        debug!(subject = %message.topic, key = %message.key, "publishing");
        client
            .publish_with_headers(message.topic.clone(), headers, message.body.clone().into_bytes().into())
            .await
            .map_err(|e| PublishError::send(&message.topic, e))
    }

    async fn flush(&self) -> Result<(), PublishError> {
        match self.client.get() {
            Some(client) => client.flush().await.map_err(|e| PublishError::send("*", e)),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DevicePlatform;

    #[tokio::test]
    async fn test_send_before_connect_fails() {
        let publisher = NatsPublisher::new("nats://localhost:4222");
        let message = OutboundMessage {
            topic: "user-activity-ios".into(),
            key: "HIGH-user-1".into(),
            platform: DevicePlatform::Apple,
            body: "{}".into(),
            tick: 0,
        };
        assert_eq!(publisher.send(&message).await, Err(PublishError::NotConnected));
        assert!(publisher.flush().await.is_ok());
    }

    #[tokio::test]
    async fn test_unreachable_server_is_a_connection_error() {
        let publisher = NatsPublisher::new("nats://127.0.0.1:1");
        assert!(matches!(publisher.connect().await, Err(PublishError::Connection { .. })));
        assert!(format!("{:?}", publisher).contains("connected: false"));
    }

    // Needs a live server.
    #[tokio::test]
    #[ignore]
    async fn test_connect_is_idempotent() {
        let publisher = NatsPublisher::new("nats://localhost:4222");
        publisher.connect().await.unwrap();
        publisher.connect().await.unwrap();
        assert_eq!(publisher.url(), "nats://localhost:4222");
    }
}
