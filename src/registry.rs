//! Experiment registry for explicit discovery and execution.
//!
//! Experiments register themselves from [`build_registry`] rather than at
//! load time, so the binary decides what exists and in which order.

use crate::error::SetupError;
use crate::utils::bench::TimeUnit;
use crate::utils::timer::VariantResult;

/// Result from running a configuration (alias for VariantResult)
pub type BenchmarkResult = VariantResult;

/// One configuration, built and ready to be timed.
pub struct VariantClosure<'a> {
    pub name: &'static str,
    pub description: &'static str,
    /// Dataset size the configuration was built for
    pub size: usize,
    /// Elements one trial touches, used to normalize timings
    pub elements: usize,
    /// Runs one trial and returns the time inside the timed region. Cache
    /// scrubbing happens inside the closure but before its clock starts.
    pub run: Box<dyn FnMut() -> std::time::Duration + 'a>,
}

/// A list of dataset sizes and how many runs each gets.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SizePlan {
    pub sizes: Vec<usize>,
    /// Overrides the configured run count when set
    pub runs: Option<usize>,
}

impl SizePlan {
    pub fn new(sizes: Vec<usize>, runs: Option<usize>) -> Self {
        Self { sizes, runs }
    }

    /// `start, start*multiplier, ...` up to and including `end`.
    pub fn range(start: usize, end: usize, multiplier: usize, runs: Option<usize>) -> Self {
        let mut sizes = Vec::new();
        let mut size = start.max(1);
        while size < end {
            sizes.push(size);
            size = size.saturating_mul(multiplier.max(2));
        }
        sizes.push(end);
        Self { sizes, runs }
    }
}

/// Trait that all experiments must implement
pub trait ExperimentRunner: Send + Sync {
    /// Name of the experiment (e.g., "sort_layout")
    fn name(&self) -> &'static str;

    /// Human-readable description
    fn description(&self) -> &'static str;

    /// Category (e.g., "memory", "arithmetic")
    fn category(&self) -> &'static str;

    /// Unit used when printing this experiment's timings
    fn time_unit(&self) -> TimeUnit {
        TimeUnit::Milliseconds
    }

    /// Sizes to run when the user does not pass `--sizes`
    fn size_plans(&self) -> Vec<SizePlan>;

    /// Whether the dataset size has no effect on the measured operation
    fn size_independent(&self) -> bool {
        false
    }

    /// Names of the registered configurations
    fn available_variants(&self) -> Vec<&'static str>;

    /// Build the dataset for one configuration.
    ///
    /// The dataset lives inside the returned closure and is dropped with it.
    fn build_variant<'a>(
        &'a self,
        variant: &str,
        size: usize,
        seed: Option<u64>,
    ) -> Result<VariantClosure<'a>, SetupError>;

    /// Verify that all variants compute the same thing
    fn verify(&self) -> Result<(), String>;
}

/// Registry of all experiments
pub struct ExperimentRegistry {
    experiments: Vec<Box<dyn ExperimentRunner>>,
}

impl ExperimentRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            experiments: Vec::new(),
        }
    }

    /// Register an experiment
    pub fn register<E: ExperimentRunner + 'static>(&mut self, experiment: E) {
        self.experiments.push(Box::new(experiment));
    }

    /// Get all registered experiments
    pub fn all(&self) -> &[Box<dyn ExperimentRunner>] {
        &self.experiments
    }

    /// Find experiment by name
    pub fn find(&self, name: &str) -> Option<&dyn ExperimentRunner> {
        self.experiments
            .iter()
            .find(|e| e.name() == name)
            .map(|e| e.as_ref())
    }

    /// List experiment names
    pub fn list_names(&self) -> Vec<&'static str> {
        self.experiments.iter().map(|e| e.name()).collect()
    }
}

impl Default for ExperimentRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Build the default registry with all experiments
pub fn build_registry() -> ExperimentRegistry {
    let mut registry = ExperimentRegistry::new();

    registry.register(crate::memory::sort_layout::SortLayoutRunner::new());
    registry.register(crate::memory::entity_update::EntityUpdateRunner::new());
    registry.register(crate::memory::entity_update::EntityComponentRunner::new());
    registry.register(crate::arithmetic::modulo_vs_branch::ModuloVsBranchRunner);

    registry
}
