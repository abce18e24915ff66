//! Trial timing for the in-crate runner.
//!
//! One configuration (experiment × variant × size) is measured at a time:
//! warmup passes, then a fixed number of timed runs with the thread pinned,
//! then statistics. The closure does its own timing so cache scrubbing stays
//! outside the measured region.

use std::hint::black_box;
use std::time::Duration;

use super::bench::compute_stats;
use super::cpu_affinity::CpuPinGuard;
use crate::registry::VariantClosure;

/// CPU pinning strategy during measurements
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PinStrategy {
    /// Pin once for the whole configuration
    #[default]
    Global,
    /// Pin/unpin around every trial
    PerTrial,
}

/// Configuration for timing measurements
#[derive(Clone, Debug)]
pub struct TimingConfig {
    /// Number of timed runs per configuration (default: 30)
    pub runs_per_variant: usize,
    /// Number of untimed passes before measuring (default: 3)
    pub warmup_iterations: usize,
    /// CPU pinning strategy (default: Global)
    pub pin_strategy: PinStrategy,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            runs_per_variant: 30,
            warmup_iterations: 3,
            pin_strategy: PinStrategy::default(),
        }
    }
}

/// Result from measuring a single configuration
#[derive(Clone, Debug)]
pub struct VariantResult {
    /// Name of the variant
    pub name: String,
    /// Description of the variant
    pub description: String,
    /// Dataset size the variant ran with
    pub size: usize,
    pub avg_time: Duration,
    pub median_time: Duration,
    pub min_time: Duration,
    pub max_time: Duration,
    pub std_dev: Duration,
    /// Number of timed runs
    pub runs: usize,
    /// Average nanoseconds per element a trial touches
    pub per_element_nanos: f64,
}

/// Warm up and measure one configuration.
pub fn measure_variant(variant: VariantClosure<'_>, config: &TimingConfig) -> VariantResult {
    let VariantClosure {
        name,
        description,
        size,
        elements,
        mut run,
    } = variant;

    for _ in 0..config.warmup_iterations {
        black_box(run());
    }

    let _global_pin = (config.pin_strategy == PinStrategy::Global).then(CpuPinGuard::new);

    let mut times = Vec::with_capacity(config.runs_per_variant);
    for _ in 0..config.runs_per_variant {
        let _trial_pin = (config.pin_strategy == PinStrategy::PerTrial).then(CpuPinGuard::new);
        times.push(run());
    }

    let stats = compute_stats(&times);
    let per_element_nanos = if elements == 0 {
        0.0
    } else {
        stats.avg.as_nanos() as f64 / elements as f64
    };

    VariantResult {
        name: name.to_string(),
        description: description.to_string(),
        size,
        avg_time: stats.avg,
        median_time: stats.median,
        min_time: stats.min,
        max_time: stats.max,
        std_dev: stats.std_dev,
        runs: times.len(),
        per_element_nanos,
    }
}
