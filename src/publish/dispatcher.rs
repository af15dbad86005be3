//! Fire-and-forget publish queue
//!
//! The scheduler enqueues messages without awaiting the broker. A single
//! background task drains the queue in order, so per-user and global
//! encounter order survive. Failures are counted, logged and passed to an
//! optional hook; they never travel back to the scheduler.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::publish::{MessagePublisher, OutboundMessage, PublishFailure};

/// Callback observing failed sends
pub type FailureHook = Arc<dyn Fn(&PublishFailure) + Send + Sync>;

#[derive(Debug, Default)]
struct Counters {
    enqueued: AtomicU64,
    published: AtomicU64,
    failed: AtomicU64,
}

/// Point-in-time publish counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PublishCounts {
    /// Messages handed to the queue
    pub enqueued: u64,
    /// Messages the transport accepted
    pub published: u64,
    /// Messages the transport refused
    pub failed: u64,
}

impl PublishCounts {
    /// Messages enqueued but not yet attempted
    pub fn pending(&self) -> u64 {
        self.enqueued.saturating_sub(self.published + self.failed)
    }
}

/// Background sender in front of a [`MessagePublisher`]
pub struct PublishDispatcher {
    sender: Option<mpsc::UnboundedSender<OutboundMessage>>,
    worker: Option<JoinHandle<()>>,
    counters: Arc<Counters>,
    publisher_name: &'static str,
}

impl fmt::Debug for PublishDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PublishDispatcher")
            .field("publisher", &self.publisher_name)
            .field("open", &self.sender.is_some())
            .field("counts", &self.counts())
            .finish()
    }
}

impl PublishDispatcher {
    /// Start the background task. Must be called inside a tokio runtime.
    pub fn spawn(publisher: Arc<dyn MessagePublisher>, on_failure: Option<FailureHook>) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        let counters = Arc::new(Counters::default());
        let publisher_name = publisher.name();
        let worker = tokio::spawn(drain(publisher, receiver, Arc::clone(&counters), on_failure));

        Self { sender: Some(sender), worker: Some(worker), counters, publisher_name }
    }

    /// Queue a message; returns `false` once the dispatcher is shut down
    pub fn enqueue(&self, message: OutboundMessage) -> bool {
        let Some(sender) = &self.sender else {
            return false;
        };
        self.counters.enqueued.fetch_add(1, Ordering::Relaxed);
        if sender.send(message).is_err() {
            self.counters.enqueued.fetch_sub(1, Ordering::Relaxed);
            return false;
        }
        true
    }

    /// Current counters
    pub fn counts(&self) -> PublishCounts {
        PublishCounts {
            enqueued: self.counters.enqueued.load(Ordering::Relaxed),
            published: self.counters.published.load(Ordering::Relaxed),
            failed: self.counters.failed.load(Ordering::Relaxed),
        }
    }

    /// Close the queue and wait for every queued send to be attempted
    pub async fn shutdown(&mut self) -> PublishCounts {
        self.sender.take();
        if let Some(worker) = self.worker.take() {
            if let Err(e) = worker.await {
                warn!(error = %e, "publish task ended abnormally");
            }
        }
        self.counts()
    }
}

async fn drain(
    publisher: Arc<dyn MessagePublisher>,
    mut receiver: mpsc::UnboundedReceiver<OutboundMessage>,
    counters: Arc<Counters>,
    on_failure: Option<FailureHook>,
) {
    while let Some(message) = receiver.recv().await {
        match publisher.send(&message).await {
            Ok(()) => {
                counters.published.fetch_add(1, Ordering::Relaxed);
                info!(
                    user_id = %message.key,
                    platform = %message.platform,
                    topic = %message.topic,
                    tick = message.tick,
                    "produced message"
                );
            }
            Err(error) => {
                counters.failed.fetch_add(1, Ordering::Relaxed);
                warn!(
                    user_id = %message.key,
                    platform = %message.platform,
                    topic = %message.topic,
                    tick = message.tick,
                    error = %error,
                    "publish failed"
                );
                if let Some(hook) = &on_failure {
                    hook(&PublishFailure {
                        user_id: message.key,
                        platform: message.platform,
                        topic: message.topic,
                        tick: message.tick,
                        error,
                    });
                }
            }
        }
    }

    if let Err(e) = publisher.flush().await {
        warn!(publisher = publisher.name(), error = %e, "flush on shutdown failed");
    }
    debug!(publisher = publisher.name(), "publish queue drained");
}
