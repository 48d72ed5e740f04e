//! Host information aggregation engine behind the fetchtop panel.
//!
//! Static fields (user, OS, kernel, hardware, ...) are resolved through
//! ordered probe chains that always produce a value, falling back to a
//! sentinel when every source fails. The [`Scheduler`] runs aggregation on a
//! slow cadence and CPU/memory sampling on a fast one, publishing both
//! through watch channels so any number of readers can follow along.

pub mod aggregate;
pub mod battery;
pub mod desktop;
pub mod fields;
pub mod gpu;
pub mod packages;
pub mod probe;
pub mod resolver;
pub mod scanner;
pub mod scheduler;
pub mod smooth;
pub mod snapshot;

pub use aggregate::Aggregator;
pub use battery::BatteryState;
pub use scheduler::{EngineConfig, MeterValues, Scheduler, SchedulerError, SchedulerState};
pub use smooth::{MetricKind, MetricSample, Smoother};
pub use snapshot::Snapshot;

/// Run one aggregation cycle outside the scheduler. Used for one-shot
/// output where no cadence or smoothing is wanted.
pub async fn fetch_once() -> Snapshot {
    Aggregator::new().aggregate().await
}
