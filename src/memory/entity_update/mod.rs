//! # Entity Update
//!
//! Moves N entities by `position += velocity * dt` under different layouts:
//!
//! - **oop**: one boxed trait object per entity. Each update is a virtual
//!   call through a pointer into a separate allocation.
//! - **oop via component** (second experiment): the entity forwards the update
//!   to a boxed component, adding another pointer hop and virtual call.
//! - **dod**: one contiguous `Vec` of records.
//! - **dod_soa**: positions and velocities in two parallel `Vec`s.
//!
//! The object-oriented variants can be made worse on purpose: extra
//! allocations between entities scatter them across the heap, and shuffling
//! the handle sequence decorrelates iteration order from allocation order.

pub mod code;
pub mod test;

use crate::error::SetupError;
use crate::harness::{LayoutTrial, TrialHarness};
use crate::registry::{ExperimentRunner, SizePlan, VariantClosure};
use crate::utils::bench::seeded_rng;
use crate::utils::cache::CacheScrubber;
use code::{build_layout, default_state, EntityTrial, EntityVariant};

/// Sizes run 200 times each
pub const SHORT_SIZES: [usize; 3] = [1_000, 10_000, 100_000];
pub const SHORT_RUNS: usize = 200;
/// Sizes run 5 times each
pub const LONG_RUNS: usize = 5;

fn build_entity_variant<'a>(
    experiment: &'static str,
    variants: Vec<EntityVariant>,
    scrubber: &'a CacheScrubber,
    variant: &str,
    size: usize,
    seed: Option<u64>,
) -> Result<VariantClosure<'a>, SetupError> {
    let info = variants
        .into_iter()
        .find(|v| v.name == variant)
        .ok_or_else(|| SetupError::UnknownVariant {
            experiment,
            variant: variant.to_string(),
        })?;
    if size == 0 {
        return Err(SetupError::EmptyDataset { experiment });
    }

    let mut rng = seeded_rng(seed);
    let layout = build_layout(info.layout, size, info.flags, &mut rng, default_state);
    let mut trial = EntityTrial::new(layout);
    let harness = TrialHarness::new(scrubber, info.flags.clear_cache_each_trial);

    log::debug!(
        "{}/{}: built {} entities ({:?}, {:?})",
        experiment,
        info.name,
        size,
        info.layout,
        info.flags
    );

    Ok(VariantClosure {
        name: info.name,
        description: info.description,
        size,
        elements: trial.elements(),
        run: Box::new(move || harness.time_trial(&mut trial)),
    })
}

/// Entities updated through one virtual call
pub struct EntityUpdateRunner {
    scrubber: CacheScrubber,
}

impl EntityUpdateRunner {
    pub fn new() -> Self {
        Self {
            scrubber: CacheScrubber::detect(),
        }
    }

    pub fn with_scrubber(scrubber: CacheScrubber) -> Self {
        Self { scrubber }
    }
}

impl Default for EntityUpdateRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl ExperimentRunner for EntityUpdateRunner {
    fn name(&self) -> &'static str {
        "entity_update"
    }

    fn description(&self) -> &'static str {
        "Heap-scattered trait objects vs contiguous entity data"
    }

    fn category(&self) -> &'static str {
        "memory"
    }

    fn size_plans(&self) -> Vec<SizePlan> {
        vec![
            SizePlan::new(SHORT_SIZES.to_vec(), Some(SHORT_RUNS)),
            SizePlan::new(
                vec![1_000_000, 10_000_000, 20_000_000, 40_000_000],
                Some(LONG_RUNS),
            ),
        ]
    }

    fn available_variants(&self) -> Vec<&'static str> {
        code::direct_variants().iter().map(|v| v.name).collect()
    }

    fn build_variant<'a>(
        &'a self,
        variant: &str,
        size: usize,
        seed: Option<u64>,
    ) -> Result<VariantClosure<'a>, SetupError> {
        build_entity_variant(
            self.name(),
            code::direct_variants(),
            &self.scrubber,
            variant,
            size,
            seed,
        )
    }

    fn verify(&self) -> Result<(), String> {
        test::verify_variants(&code::direct_variants())
    }
}

/// Entities updated through a virtual call that forwards to a component
pub struct EntityComponentRunner {
    scrubber: CacheScrubber,
}

impl EntityComponentRunner {
    pub fn new() -> Self {
        Self {
            scrubber: CacheScrubber::detect(),
        }
    }

    pub fn with_scrubber(scrubber: CacheScrubber) -> Self {
        Self { scrubber }
    }
}

impl Default for EntityComponentRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl ExperimentRunner for EntityComponentRunner {
    fn name(&self) -> &'static str {
        "entity_component"
    }

    fn description(&self) -> &'static str {
        "Entities updating through an owned component vs struct of arrays"
    }

    fn category(&self) -> &'static str {
        "memory"
    }

    fn size_plans(&self) -> Vec<SizePlan> {
        vec![
            SizePlan::new(SHORT_SIZES.to_vec(), Some(SHORT_RUNS)),
            SizePlan::new(vec![1_000_000, 10_000_000], Some(LONG_RUNS)),
        ]
    }

    fn available_variants(&self) -> Vec<&'static str> {
        code::component_variants().iter().map(|v| v.name).collect()
    }

    fn build_variant<'a>(
        &'a self,
        variant: &str,
        size: usize,
        seed: Option<u64>,
    ) -> Result<VariantClosure<'a>, SetupError> {
        build_entity_variant(
            self.name(),
            code::component_variants(),
            &self.scrubber,
            variant,
            size,
            seed,
        )
    }

    fn verify(&self) -> Result<(), String> {
        test::verify_variants(&code::component_variants())
    }
}
