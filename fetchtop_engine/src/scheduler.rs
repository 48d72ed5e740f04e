//! Refresh cadences, lifecycle, and publication of engine output.

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};

use crate::aggregate::Aggregator;
use crate::smooth::{MetricKind, MetricSampler, Smoother};
use crate::snapshot::Snapshot;

/// Cadence configuration. Defaults: 5 s aggregation, 500 ms meter tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    pub refresh: Duration,
    pub tick: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            refresh: Duration::from_secs(5),
            tick: Duration::from_millis(500),
        }
    }
}

/// Latest eased value per metric kind, 0-100. Copied out whole so a reader
/// never sees a torn update.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MeterValues {
    values: [f64; MetricKind::ALL.len()],
}

impl MeterValues {
    pub fn get(self, kind: MetricKind) -> f64 {
        self.values[kind as usize]
    }

    fn set(&mut self, kind: MetricKind, value: f64) {
        self.values[kind as usize] = value;
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SchedulerError {
    #[error("scheduler already running")]
    AlreadyRunning,
    #[error("scheduler is stopped and cannot be restarted")]
    Stopped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    Idle,
    Running,
    Stopped,
}

/// Owns the two periodic tasks and the channels they publish into. The
/// engine side is the only writer; subscribers read the latest value.
pub struct Scheduler {
    config: EngineConfig,
    state: SchedulerState,
    shutdown_tx: watch::Sender<bool>,
    snapshot_rx: watch::Receiver<Arc<Snapshot>>,
    meters_rx: watch::Receiver<MeterValues>,
    publishers: Option<Publishers>,
    tasks: Vec<JoinHandle<()>>,
}

struct Publishers {
    snapshot: watch::Sender<Arc<Snapshot>>,
    meters: watch::Sender<MeterValues>,
}

impl Scheduler {
    pub fn new(config: EngineConfig) -> Self {
        let (shutdown_tx, _) = watch::channel(false);
        let (snapshot_tx, snapshot_rx) = watch::channel(Arc::new(Snapshot::default()));
        let (meters_tx, meters_rx) = watch::channel(MeterValues::default());
        Self {
            config,
            state: SchedulerState::Idle,
            shutdown_tx,
            snapshot_rx,
            meters_rx,
            publishers: Some(Publishers {
                snapshot: snapshot_tx,
                meters: meters_tx,
            }),
            tasks: Vec::new(),
        }
    }

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    /// Subscribe to published snapshots. The receiver starts on the sentinel
    /// default until the first aggregation lands.
    pub fn snapshots(&self) -> watch::Receiver<Arc<Snapshot>> {
        self.snapshot_rx.clone()
    }

    /// Subscribe to the eased meter values.
    pub fn meters(&self) -> watch::Receiver<MeterValues> {
        self.meters_rx.clone()
    }

    /// Idle -> Running: spawns the aggregation and meter tasks. The first
    /// aggregation begins immediately.
    pub fn start(&mut self) -> Result<(), SchedulerError> {
        match self.state {
            SchedulerState::Running => return Err(SchedulerError::AlreadyRunning),
            SchedulerState::Stopped => return Err(SchedulerError::Stopped),
            SchedulerState::Idle => {}
        }
        let Some(publishers) = self.publishers.take() else {
            return Err(SchedulerError::Stopped);
        };
        self.tasks.push(tokio::spawn(run_aggregation(
            self.config.refresh,
            publishers.snapshot,
            self.shutdown_tx.subscribe(),
        )));
        self.tasks.push(tokio::spawn(run_meters(
            self.config.tick,
            publishers.meters,
            self.shutdown_tx.subscribe(),
        )));
        self.state = SchedulerState::Running;
        tracing::info!(refresh = ?self.config.refresh, tick = ?self.config.tick, "scheduler started");
        Ok(())
    }

    /// Running -> Stopped. Cancels both cadences and waits for the tasks to
    /// wind down; an in-flight aggregation is dropped unpublished. Terminal:
    /// a stopped scheduler never restarts.
    pub async fn stop(&mut self) {
        if self.state == SchedulerState::Running {
            let _ = self.shutdown_tx.send(true);
            for task in self.tasks.drain(..) {
                let _ = task.await;
            }
            tracing::info!("scheduler stopped");
        }
        self.state = SchedulerState::Stopped;
    }
}

/// Slow cadence. The aggregation is awaited inline, so a new cycle can never
/// start while one is outstanding; Skip keeps a long cycle from queueing
/// missed ticks behind it.
async fn run_aggregation(
    period: Duration,
    publisher: watch::Sender<Arc<Snapshot>>,
    mut shutdown: watch::Receiver<bool>,
) {
    let aggregator = Aggregator::new();
    let mut ticker = interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    loop {
        tokio::select! {
            biased;
            _ = shutdown.changed() => break,
            _ = ticker.tick() => {
                tokio::select! {
                    biased;
                    // Shutdown mid-cycle abandons the result.
                    _ = shutdown.changed() => break,
                    snapshot = aggregator.aggregate() => {
                        let _ = publisher.send(Arc::new(snapshot));
                    }
                }
            }
        }
    }
}

/// Fast cadence: sample each metric kind, ease it, publish the whole set.
async fn run_meters(
    period: Duration,
    publisher: watch::Sender<MeterValues>,
    mut shutdown: watch::Receiver<bool>,
) {
    let mut sampler = MetricSampler::new();
    let mut smoother = Smoother::new();
    let mut ticker = interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    loop {
        tokio::select! {
            biased;
            _ = shutdown.changed() => break,
            _ = ticker.tick() => {
                let mut values = MeterValues::default();
                for kind in MetricKind::ALL {
                    let raw = sampler.sample(kind);
                    values.set(kind, smoother.tick(kind, raw));
                }
                let _ = publisher.send(values);
            }
        }
    }
}
