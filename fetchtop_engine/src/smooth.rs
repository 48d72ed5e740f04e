//! Eased gauge values for the live meters.

use sysinfo::{CpuRefreshKind, MemoryRefreshKind, RefreshKind, System};

/// Smoothing factor: each tick closes a fifth of the gap to the target.
pub const SMOOTHING: f64 = 0.2;

/// The closed set of live metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricKind {
    Cpu,
    Memory,
}

impl MetricKind {
    pub const ALL: [MetricKind; 2] = [MetricKind::Cpu, MetricKind::Memory];

    pub fn label(self) -> &'static str {
        match self {
            MetricKind::Cpu => "cpu",
            MetricKind::Memory => "memory",
        }
    }
}

/// Per-metric easing state. `current` trails `target`; only the Smoother
/// writes either.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MetricSample {
    pub current: f64,
    pub target: f64,
}

/// Exponential smoothing toward the most recent raw sample, clamped to the
/// gauge range. One sample slot per metric kind, created once and updated in
/// place for the life of the process.
#[derive(Debug, Default)]
pub struct Smoother {
    samples: [MetricSample; MetricKind::ALL.len()],
}

impl Smoother {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the raw sample as the new target and advances `current`
    /// toward it. Returns the eased value.
    pub fn tick(&mut self, kind: MetricKind, raw: f64) -> f64 {
        let sample = &mut self.samples[kind as usize];
        sample.target = raw.clamp(0.0, 100.0);
        sample.current =
            (sample.current + SMOOTHING * (sample.target - sample.current)).clamp(0.0, 100.0);
        sample.current
    }

    pub fn sample(&self, kind: MetricKind) -> MetricSample {
        self.samples[kind as usize]
    }
}

/// Gauge label value: floor of the eased figure, never the raw sample.
pub fn displayed(current: f64) -> u16 {
    current.clamp(0.0, 100.0).floor() as u16
}

/// Raw metric sampling. One named function per kind; `sample` is the
/// dispatch table.
pub struct MetricSampler {
    sys: System,
}

impl MetricSampler {
    pub fn new() -> Self {
        Self {
            sys: System::new_with_specifics(
                RefreshKind::nothing()
                    .with_cpu(CpuRefreshKind::nothing().with_cpu_usage())
                    .with_memory(MemoryRefreshKind::nothing().with_ram()),
            ),
        }
    }

    pub fn sample(&mut self, kind: MetricKind) -> f64 {
        match kind {
            MetricKind::Cpu => sample_cpu(&mut self.sys),
            MetricKind::Memory => sample_memory(&mut self.sys),
        }
    }
}

impl Default for MetricSampler {
    fn default() -> Self {
        Self::new()
    }
}

fn sample_cpu(sys: &mut System) -> f64 {
    sys.refresh_cpu_usage();
    f64::from(sys.global_cpu_usage())
}

fn sample_memory(sys: &mut System) -> f64 {
    sys.refresh_memory();
    let total = sys.total_memory();
    if total == 0 {
        return 0.0;
    }
    let used = total.saturating_sub(sys.available_memory());
    used as f64 / total as f64 * 100.0
}
