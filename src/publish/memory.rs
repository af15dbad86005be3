//! In-memory publisher that records every message

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::publish::{MessagePublisher, OutboundMessage, PublishError};

/// Records sent messages; can be told to fail
#[derive(Debug, Default)]
pub struct InMemoryPublisher {
    connected: AtomicBool,
    connect_calls: AtomicUsize,
    refuse_connect: bool,
    failing_topics: HashSet<String>,
    sent: Mutex<Vec<OutboundMessage>>,
}

impl InMemoryPublisher {
    /// Create an empty, unconnected publisher
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail every send to `topic`
    pub fn failing_topic(mut self, topic: impl Into<String>) -> Self {
        self.failing_topics.insert(topic.into());
        self
    }

    /// Make `connect` fail
    pub fn refusing_connect(mut self) -> Self {
        self.refuse_connect = true;
        self
    }

    /// Whether `connect` has succeeded
    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }

    /// How many times `connect` was called
    pub fn connect_calls(&self) -> usize {
        self.connect_calls.load(Ordering::SeqCst)
    }

    /// Messages accepted so far, in send order
    pub fn messages(&self) -> Vec<OutboundMessage> {
        self.sent.lock().map(|sent| sent.clone()).unwrap_or_default()
    }

    /// Accepted messages with a given key
    pub fn messages_for_key(&self, key: &str) -> Vec<OutboundMessage> {
        self.messages().into_iter().filter(|m| m.key == key).collect()
    }

    /// Accepted messages on a given topic
    pub fn messages_on(&self, topic: &str) -> Vec<OutboundMessage> {
        self.messages().into_iter().filter(|m| m.topic == topic).collect()
    }
}

#[async_trait]
impl MessagePublisher for InMemoryPublisher {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn connect(&self) -> Result<(), PublishError> {
        self.connect_calls.fetch_add(1, Ordering::SeqCst);
        if self.refuse_connect {
            return Err(PublishError::connection("memory://", "connection refused"));
        }
        self.connected.store(true, Ordering::SeqCst);
        Ok(())
    }

    async fn send(&self, message: &OutboundMessage) -> Result<(), PublishError> {
        if !self.is_connected() {
            return Err(PublishError::NotConnected);
        }
        if self.failing_topics.contains(&message.topic) {
            return Err(PublishError::send(&message.topic, "topic unavailable"));
        }
        let mut sent = self
            .sent
            .lock()
            .map_err(|_| PublishError::send(&message.topic, "recorder poisoned"))?;
        sent.push(message.clone());
        Ok(())
    }
}
