//! Shared benchmark utilities.
//!
//! Time units, seeding and the small statistics helpers used by the timer and
//! the result tables.

use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Duration;

/// Unit an experiment reports its timings in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TimeUnit {
    Nanoseconds,
    Microseconds,
    #[default]
    Milliseconds,
}

impl TimeUnit {
    /// Short suffix used in tables
    pub const fn suffix(self) -> &'static str {
        match self {
            TimeUnit::Nanoseconds => "ns",
            TimeUnit::Microseconds => "us",
            TimeUnit::Milliseconds => "ms",
        }
    }

    /// Express a duration as a floating point count of this unit
    pub fn scale(self, d: Duration) -> f64 {
        let nanos = d.as_nanos() as f64;
        match self {
            TimeUnit::Nanoseconds => nanos,
            TimeUnit::Microseconds => nanos / 1e3,
            TimeUnit::Milliseconds => nanos / 1e6,
        }
    }

    /// Format a duration for display, e.g. `12.345 ms`
    pub fn format(self, d: Duration) -> String {
        match self {
            TimeUnit::Nanoseconds => format!("{:.0} {}", self.scale(d), self.suffix()),
            _ => format!("{:.3} {}", self.scale(d), self.suffix()),
        }
    }
}

/// Get a seed from current time for randomization
pub fn time_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0x12345678)
}

/// Deterministic RNG for a seed, or a time-seeded one
pub fn seeded_rng(seed: Option<u64>) -> StdRng {
    StdRng::seed_from_u64(seed.unwrap_or_else(time_seed))
}

/// Calculate standard deviation from a list of durations
pub fn calculate_std_dev(times: &[Duration], mean: Duration) -> Duration {
    if times.len() < 2 {
        return Duration::ZERO;
    }

    let mean_ns = mean.as_nanos() as f64;
    let variance: f64 = times
        .iter()
        .map(|t| {
            let diff = t.as_nanos() as f64 - mean_ns;
            diff * diff
        })
        .sum::<f64>()
        / (times.len() - 1) as f64;

    Duration::from_nanos(variance.sqrt() as u64)
}

/// Calculate median from a slice of durations.
pub fn calculate_median(times: &[Duration]) -> Duration {
    if times.is_empty() {
        return Duration::ZERO;
    }
    let mut sorted: Vec<_> = times.to_vec();
    sorted.sort_unstable();
    sorted[sorted.len() / 2]
}

/// Summary of a set of trial timings
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Stats {
    pub avg: Duration,
    pub median: Duration,
    pub min: Duration,
    pub max: Duration,
    pub std_dev: Duration,
}

/// Compute timing statistics from a list of durations
pub fn compute_stats(times: &[Duration]) -> Stats {
    let (Some(&min), Some(&max)) = (times.iter().min(), times.iter().max()) else {
        return Stats::default();
    };

    let total: Duration = times.iter().sum();
    let avg = total / times.len() as u32;

    Stats {
        avg,
        median: calculate_median(times),
        min,
        max,
        std_dev: calculate_std_dev(times, avg),
    }
}
