//! # Layout Bench
//!
//! Micro-benchmarks of how memory layout and instruction choice show up in
//! wall-clock time: sorting contiguous vs heap-scattered values, updating
//! entities through trait objects vs contiguous arrays, and wrapping integers
//! with modulo vs masks and branches.
//!
//! Each experiment builds a dataset, optionally scrubs the cache, and times a
//! fixed operation over the dataset through [`harness::TrialHarness`].

pub mod arithmetic;
pub mod config;
pub mod error;
pub mod harness;
pub mod memory;
pub mod registry;
pub mod utils;

/// Re-export tui from utils
pub use utils::tui;

/// Re-export commonly used items
pub mod prelude {
    pub use crate::config::{Command, LayoutFlags, RunConfig};
    pub use crate::error::{ConfigError, SetupError};
    pub use crate::harness::{LayoutTrial, TrialHarness};
    pub use crate::registry::{build_registry, ExperimentRegistry, ExperimentRunner};
    pub use crate::utils::cache::CacheScrubber;
}
