//! Utility modules for benchmarking and execution.

pub mod bench;
pub mod cache;
pub mod cpu_affinity;
pub mod runner;
pub mod timer;
pub mod tui;

// Re-export commonly used items
pub use bench::{compute_stats, seeded_rng, time_seed, TimeUnit};
pub use cache::CacheScrubber;
pub use cpu_affinity::CpuPinGuard;
pub use timer::{measure_variant, PinStrategy, TimingConfig, VariantResult};

/// Information about an experiment configuration.
/// Generic over F which is whatever builds or runs it.
pub struct VariantInfo<F> {
    /// Unique identifier for this variant (e.g., "vector", "modulo/u32")
    pub name: &'static str,
    /// Human-readable description
    pub description: &'static str,
    /// The specific implementation function
    pub function: F,
}
