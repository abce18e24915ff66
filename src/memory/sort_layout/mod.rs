//! # Sort Layout
//!
//! Sorts the same values stored three ways: a boxed slice, a `Vec`, and a
//! `Vec` of individually boxed values. The first two are contiguous; the third
//! makes every comparison chase two pointers into scattered allocations.
//!
//! Every trial re-sorts the same sequence, which is already ascending after
//! construction and stays ascending after the first sort. The numbers
//! therefore describe the cost of sorting sorted data, not random data. This
//! matches how the experiment has always been run, so results stay
//! comparable with earlier runs.

pub mod code;
pub mod test;

use crate::error::SetupError;
use crate::harness::{LayoutTrial, TrialHarness};
use crate::registry::{ExperimentRunner, SizePlan, VariantClosure};
use crate::utils::cache::CacheScrubber;

/// Smallest and largest sizes, stepped by [`SIZE_MULTIPLIER`]
pub const MIN_SIZE: usize = 1024;
pub const MAX_SIZE: usize = 1024 << 12;
pub const SIZE_MULTIPLIER: usize = 8;
pub const RUNS: usize = 100;

pub struct SortLayoutRunner {
    scrubber: CacheScrubber,
}

impl SortLayoutRunner {
    pub fn new() -> Self {
        Self {
            scrubber: CacheScrubber::detect(),
        }
    }

    pub fn with_scrubber(scrubber: CacheScrubber) -> Self {
        Self { scrubber }
    }
}

impl Default for SortLayoutRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl ExperimentRunner for SortLayoutRunner {
    fn name(&self) -> &'static str {
        "sort_layout"
    }

    fn description(&self) -> &'static str {
        "Sorting contiguous values vs individually heap-allocated values"
    }

    fn category(&self) -> &'static str {
        "memory"
    }

    fn size_plans(&self) -> Vec<SizePlan> {
        vec![SizePlan::range(MIN_SIZE, MAX_SIZE, SIZE_MULTIPLIER, Some(RUNS))]
    }

    fn available_variants(&self) -> Vec<&'static str> {
        code::available_variants().iter().map(|v| v.name).collect()
    }

    fn build_variant<'a>(
        &'a self,
        variant: &str,
        size: usize,
        _seed: Option<u64>,
    ) -> Result<VariantClosure<'a>, SetupError> {
        let info = code::available_variants()
            .into_iter()
            .find(|v| v.name == variant)
            .ok_or_else(|| SetupError::UnknownVariant {
                experiment: self.name(),
                variant: variant.to_string(),
            })?;
        if size == 0 {
            return Err(SetupError::EmptyDataset {
                experiment: self.name(),
            });
        }

        let mut layout = (info.function)(size);
        let harness = TrialHarness::cold(&self.scrubber);

        Ok(VariantClosure {
            name: info.name,
            description: info.description,
            size,
            elements: layout.elements(),
            run: Box::new(move || harness.time_trial(&mut *layout)),
        })
    }

    fn verify(&self) -> Result<(), String> {
        test::verify_all()
    }
}
