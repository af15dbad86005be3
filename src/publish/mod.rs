//! Message publishing
//!
//! The core never talks to a broker directly. It renders events, asks the
//! [`TopicRouter`] where they go, and hands the resulting
//! [`OutboundMessage`] to a [`PublishDispatcher`], which performs the
//! asynchronous sends against whatever [`MessagePublisher`] back-end was
//! chosen at startup.
//!
//! # Overview
//!
//! - **MessagePublisher**: narrow `connect` / `send` contract
//! - **TopicRouter**: platform to topic, user id as key
//! - **PublishDispatcher**: fire-and-forget queue with a failure hook
//! - **Back-ends**: NATS, stdout and an in-memory recorder

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

use crate::types::DevicePlatform;

pub mod dispatcher;
pub mod memory;
pub mod nats;
pub mod router;
pub mod stdout;

pub use dispatcher::{FailureHook, PublishCounts, PublishDispatcher};
pub use memory::InMemoryPublisher;
pub use nats::NatsPublisher;
pub use router::{Route, TopicRouter, ANDROID_TOPIC, IOS_TOPIC};
pub use stdout::StdoutPublisher;

/// One message ready for the transport
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutboundMessage {
    /// Destination topic
    pub topic: String,
    /// Partition key; the user id
    pub key: String,
    /// Platform of the user the event belongs to
    pub platform: DevicePlatform,
    /// UTF-8 JSON event body
    pub body: String,
    /// Tick that produced the event
    pub tick: u64,
}

/// Errors raised by publisher back-ends
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PublishError {
    /// `send` was called before `connect` succeeded
    #[error("Publisher is not connected")]
    NotConnected,

    /// The transport could not be reached
    #[error("Failed to connect to {endpoint}: {reason}")]
    Connection {
        /// Address that was dialed
        endpoint: String,
        /// Underlying cause
        reason: String,
    },

    /// A single send failed
    #[error("Failed to send to topic '{topic}': {reason}")]
    Send {
        /// Destination topic
        topic: String,
        /// Underlying cause
        reason: String,
    },

    /// The message was refused before it reached the transport
    #[error("Message for topic '{topic}' rejected: {reason}")]
    Rejected {
        /// Destination topic
        topic: String,
        /// Why it was refused
        reason: String,
    },
}

impl PublishError {
    /// Create a send error
    pub fn send(topic: impl Into<String>, reason: impl ToString) -> Self {
        Self::Send { topic: topic.into(), reason: reason.to_string() }
    }

    /// Create a connection error
    pub fn connection(endpoint: impl Into<String>, reason: impl ToString) -> Self {
        Self::Connection { endpoint: endpoint.into(), reason: reason.to_string() }
    }
}

/// Record handed to the failure hook when a send fails
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishFailure {
    /// Key of the failed message
    pub user_id: String,
    /// Platform of the user
    pub platform: DevicePlatform,
    /// Destination topic
    pub topic: String,
    /// Tick that produced the event
    pub tick: u64,
    /// What went wrong
    pub error: PublishError,
}

/// Message-publishing collaborator
///
/// `connect` must be idempotent and must succeed before the scheduler
/// starts. `send` may fail independently per call.
#[async_trait]
pub trait MessagePublisher: Send + Sync + std::fmt::Debug {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Establish the transport connection
    async fn connect(&self) -> Result<(), PublishError>;

    /// Deliver one message
    async fn send(&self, message: &OutboundMessage) -> Result<(), PublishError>;

    /// Push out anything the transport buffered
    async fn flush(&self) -> Result<(), PublishError> {
        Ok(())
    }
}
