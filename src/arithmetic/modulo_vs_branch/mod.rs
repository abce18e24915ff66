//! # Modulo vs Branch
//!
//! Compares ways of wrapping a counter into a range, for `i32`, `u32`, `i64`
//! and `u64`:
//!
//! - **modulo**: hardware division with a modulus only known at run time
//! - **modulo_const**: division by a constant, which the compiler can
//!   strength-reduce
//! - **bitmask**: `& 0xF`, the power-of-two special case
//! - **addif**: one compare and conditional subtract
//! - **addwhile**: a subtraction loop
//!
//! The sweeps have no dataset, so the experiment runs once with size 1 and
//! reports nanoseconds per sweep. Per-element figures divide by the kernel
//! evaluations in one sweep.

pub mod code;
pub mod test;

use crate::error::SetupError;
use crate::harness::{LayoutTrial, TrialHarness};
use crate::registry::{ExperimentRunner, SizePlan, VariantClosure};
use crate::utils::bench::TimeUnit;
use code::SweepTrial;

pub struct ModuloVsBranchRunner;

impl ExperimentRunner for ModuloVsBranchRunner {
    fn name(&self) -> &'static str {
        "modulo_vs_branch"
    }

    fn description(&self) -> &'static str {
        "Integer modulo vs bitmask and conditional subtraction"
    }

    fn category(&self) -> &'static str {
        "arithmetic"
    }

    fn time_unit(&self) -> TimeUnit {
        TimeUnit::Nanoseconds
    }

    fn size_plans(&self) -> Vec<SizePlan> {
        vec![SizePlan::new(vec![1], None)]
    }

    fn size_independent(&self) -> bool {
        true
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

        let mut trial = SweepTrial::new(info.function);
        let harness = TrialHarness::warm();

        Ok(VariantClosure {
            name: info.name,
            description: info.description,
            size,
            elements: trial.elements(),
            run: Box::new(move || harness.time_trial(&mut trial)),
        })
    }

    fn verify(&self) -> Result<(), String> {
        test::verify_all()
    }
}
