//! Tick scheduler
//!
//! The scheduler owns the user registry, the random source and the tick
//! counter. It starts IDLE, moves to RUNNING once the publisher connects and
//! never goes back. Each tick walks every user in registry order, samples
//! steps, renders an event and hands it to the publish queue; the counter
//! advances once per full pass.

use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::Utc;
use tokio::time::{interval_at, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::events::{EventRenderer, NormalizedActivity};
use crate::publish::{FailureHook, MessagePublisher, PublishDispatcher, TopicRouter};
use crate::simulation::error::{SimulationError, SimulationResult};
use crate::simulation::random::RandomSource;
use crate::simulation::statistics::SimulationStatistics;
use crate::types::DevicePlatform;
use crate::user::UserRegistry;

/// Lifecycle of a scheduler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    /// Created, publisher not yet connected
    Idle,
    /// Publisher connected, ticks may fire
    Running,
}

impl fmt::Display for SchedulerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchedulerState::Idle => write!(f, "IDLE"),
            SchedulerState::Running => write!(f, "RUNNING"),
        }
    }
}

/// Periodic driver of the simulation
pub struct Scheduler {
    registry: UserRegistry,
    renderer: EventRenderer,
    router: TopicRouter,
    publisher: Arc<dyn MessagePublisher>,
    rng: RandomSource,
    failure_hook: Option<FailureHook>,
    dispatcher: Option<PublishDispatcher>,
    tick: u64,
    statistics: SimulationStatistics,
    started_at: Option<Instant>,
}

impl fmt::Debug for Scheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scheduler")
            .field("state", &self.state())
            .field("tick", &self.tick)
            .field("users", &self.registry.len())
            .field("publisher", &self.publisher.name())
            .finish()
    }
}

impl Scheduler {
    /// Create an idle scheduler whose tick 0 maps to the current instant
    pub fn new(
        registry: UserRegistry,
        publisher: Arc<dyn MessagePublisher>,
        rng: RandomSource,
    ) -> Self {
        let statistics = SimulationStatistics::new(
            registry.count_for(DevicePlatform::Apple),
            registry.count_for(DevicePlatform::Android),
        );
        Self {
            registry,
            renderer: EventRenderer::new(Utc::now()),
            router: TopicRouter::new(),
            publisher,
            rng,
            failure_hook: None,
            dispatcher: None,
            tick: 0,
            statistics,
            started_at: None,
        }
    }

    /// Replace the renderer, e.g. to pin the reference instant
    pub fn with_renderer(mut self, renderer: EventRenderer) -> Self {
        self.renderer = renderer;
        self
    }

    /// Observe failed publishes
    pub fn with_failure_hook(mut self, hook: FailureHook) -> Self {
        self.failure_hook = Some(hook);
        self
    }

    /// Current lifecycle state
    pub fn state(&self) -> SchedulerState {
        if self.dispatcher.is_some() {
            SchedulerState::Running
        } else {
            SchedulerState::Idle
        }
    }

    /// Number of the next tick; equals the number of completed ticks
    pub fn current_tick(&self) -> u64 {
        self.tick
    }

    /// The simulated users
    pub fn registry(&self) -> &UserRegistry {
        &self.registry
    }

    /// Counters so far; publish counts are folded in at shutdown
    pub fn statistics(&self) -> &SimulationStatistics {
        &self.statistics
    }

    /// Connect the publisher and move to RUNNING
    pub async fn start(&mut self) -> SimulationResult<()> {
        if self.state() == SchedulerState::Running {
            return Err(SimulationError::scheduler_state_error("scheduler is already running"));
        }

        self.publisher.connect().await?;
        self.dispatcher = Some(PublishDispatcher::spawn(
            Arc::clone(&self.publisher),
            self.failure_hook.clone(),
        ));
        self.started_at = Some(Instant::now());

        crate::sim_event!(
            info,
            "scheduler running",
            users = self.registry.len(),
            publisher = self.publisher.name(),
        );
        Ok(())
    }

    /// Emit one event per user and advance the tick counter
    ///
    /// Returns the number of the tick that was emitted.
    pub fn tick(&mut self) -> SimulationResult<u64> {
        let Some(dispatcher) = &self.dispatcher else {
            return Err(SimulationError::scheduler_state_error(format!(
                "cannot tick while {}",
                SchedulerState::Idle
            )));
        };

        let tick = self.tick;
        for user in self.registry.iter_mut() {
            let sample = user.next_sample(tick, &mut *self.rng);
            let event = self.renderer.render(user, &sample, &mut *self.rng);
            self.statistics.record_event(user.platform(), &NormalizedActivity::from(&event));

            let message = match self.router.outbound(&event, tick) {
                Ok(message) => message,
                Err(e) => {
                    self.statistics.record_serialization_failure();
                    warn!(user_id = %user.id(), tick, error = %e, "failed to serialize event");
                    continue;
                }
            };
            if !dispatcher.enqueue(message) {
                warn!(user_id = %user.id(), tick, "publish queue closed, event dropped");
            }
        }

        self.tick += 1;
        self.statistics.record_tick();
        debug!(tick, users = self.registry.len(), "tick complete");
        Ok(tick)
    }

    /// Tick every `period` until `max_ticks` ticks have completed or Ctrl-C
    pub async fn run(&mut self, period: Duration, max_ticks: Option<u64>) -> SimulationResult<()> {
        let interrupted = async {
            if tokio::signal::ctrl_c().await.is_err() {
                warn!("Ctrl-C handler unavailable; running until the tick limit");
                std::future::pending::<()>().await;
            }
            info!("interrupt received, stopping");
        };
        self.run_until(period, max_ticks, interrupted).await
    }

    /// Tick every `period` until `max_ticks` ticks have completed or `stop` resolves
    ///
    /// The first tick fires one period after the call. Late ticks are
    /// delayed, never replayed in a burst.
    pub async fn run_until<F>(
        &mut self,
        period: Duration,
        max_ticks: Option<u64>,
        stop: F,
    ) -> SimulationResult<()>
    where
        F: Future<Output = ()>,
    {
        if self.state() != SchedulerState::Running {
            return Err(SimulationError::scheduler_state_error("run called before start"));
        }
        if period.is_zero() {
            return Err(SimulationError::configuration_error("tick period must be non-zero"));
        }

        let mut interval = interval_at(tokio::time::Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        tokio::pin!(stop);

        loop {
            if max_ticks.is_some_and(|max| self.tick >= max) {
                info!(ticks = self.tick, "tick limit reached");
                break;
            }
            tokio::select! {
                _ = &mut stop => break,
                _ = interval.tick() => {
                    self.tick()?;
                }
            }
        }
        Ok(())
    }

    /// Drain the publish queue and return the final statistics
    pub async fn shutdown(mut self) -> SimulationStatistics {
        if let Some(mut dispatcher) = self.dispatcher.take() {
            let counts = dispatcher.shutdown().await;
            self.statistics.apply_publish_counts(counts);
        }
        if let Some(started_at) = self.started_at {
            self.statistics.simulation_duration = started_at.elapsed();
        }
        crate::sim_event!(
            info,
            "scheduler stopped",
            ticks = self.statistics.ticks_completed,
            published = self.statistics.published,
            failed = self.statistics.publish_failures,
        );
        self.statistics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::publish::{InMemoryPublisher, ANDROID_TOPIC, IOS_TOPIC};
    use crate::simulation::random::rng_from_seed;
    use crate::types::BehaviorClass;
    use serde_json::Value;

    fn scheduler(class: BehaviorClass, count: usize) -> (Scheduler, Arc<InMemoryPublisher>) {
        let publisher = Arc::new(InMemoryPublisher::new());
        let registry = UserRegistry::create_users(class, count).unwrap();
        let scheduler = Scheduler::new(registry, publisher.clone(), rng_from_seed(Some(7)));
        (scheduler, publisher)
    }

    #[tokio::test]
    async fn test_tick_requires_running() {
        let (mut scheduler, publisher) = scheduler(BehaviorClass::High, 2);
        assert_eq!(scheduler.state(), SchedulerState::Idle);
        assert!(matches!(scheduler.tick(), Err(SimulationError::SchedulerStateError(_))));
        assert_eq!(scheduler.current_tick(), 0);
        assert!(!publisher.is_connected());
    }

    #[tokio::test]
    async fn test_start_connects_then_runs() {
        let (mut scheduler, publisher) = scheduler(BehaviorClass::High, 2);
        scheduler.start().await.unwrap();

        assert!(publisher.is_connected());
        assert_eq!(scheduler.state(), SchedulerState::Running);
        assert!(matches!(scheduler.start().await, Err(SimulationError::SchedulerStateError(_))));
    }

    #[tokio::test]
    async fn test_refused_connect_stays_idle() {
        let publisher = Arc::new(InMemoryPublisher::new().refusing_connect());
        let registry = UserRegistry::create_users(BehaviorClass::Low, 1).unwrap();
        let mut scheduler = Scheduler::new(registry, publisher, rng_from_seed(Some(1)));

        assert!(matches!(scheduler.start().await, Err(SimulationError::ConnectionError(_))));
        assert_eq!(scheduler.state(), SchedulerState::Idle);
    }

    #[tokio::test]
    async fn test_tick_counter_advances_once_per_pass() {
        let (mut scheduler, publisher) = scheduler(BehaviorClass::Medium, 3);
        scheduler.start().await.unwrap();

        assert_eq!(scheduler.tick().unwrap(), 0);
        assert_eq!(scheduler.tick().unwrap(), 1);
        assert_eq!(scheduler.current_tick(), 2);

        let stats = scheduler.shutdown().await;
        assert_eq!(stats.ticks_completed, 2);
        assert_eq!(stats.total_events(), 6);
        assert_eq!(stats.published, 6);
        assert_eq!(publisher.messages_on(IOS_TOPIC).len(), 4);
        assert_eq!(publisher.messages_on(ANDROID_TOPIC).len(), 2);
    }

    #[tokio::test]
    async fn test_ramp_progresses_across_ticks() {
        let (mut scheduler, publisher) = scheduler(BehaviorClass::LowToHigh, 1);
        scheduler.start().await.unwrap();
        for _ in 0..12 {
            scheduler.tick().unwrap();
        }
        scheduler.shutdown().await;

        let steps: Vec<u64> = publisher
            .messages_for_key("LOW_TO_HIGH-user-1")
            .iter()
            .map(|m| {
                let body: Value = serde_json::from_str(&m.body).unwrap();
                body["PhysicalActivity"]["walking_steps"].as_u64().unwrap()
            })
            .collect();
        assert_eq!(steps, vec![50, 100, 150, 200, 250, 300, 350, 400, 450, 500, 500, 500]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_stops_at_tick_limit() {
        let (mut scheduler, publisher) = scheduler(BehaviorClass::Low, 2);
        scheduler.start().await.unwrap();
        scheduler
            .run_until(Duration::from_secs(1), Some(5), std::future::pending())
            .await
            .unwrap();

        assert_eq!(scheduler.current_tick(), 5);
        let stats = scheduler.shutdown().await;
        assert_eq!(stats.published, 10);
        assert_eq!(publisher.messages().len(), 10);
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_stops_when_signalled() {
        let (mut scheduler, _publisher) = scheduler(BehaviorClass::High, 1);
        scheduler.start().await.unwrap();
        scheduler
            .run_until(
                Duration::from_secs(1),
                None,
                tokio::time::sleep(Duration::from_millis(3_500)),
            )
            .await
            .unwrap();

        assert_eq!(scheduler.current_tick(), 3);
    }

    #[tokio::test]
    async fn test_run_before_start_is_rejected() {
        let (mut scheduler, _publisher) = scheduler(BehaviorClass::High, 1);
        let result = scheduler.run_until(Duration::from_secs(1), Some(1), async {}).await;
        assert!(matches!(result, Err(SimulationError::SchedulerStateError(_))));
    }
}
