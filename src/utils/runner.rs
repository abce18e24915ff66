//! Experiment execution and CSV export.
//!
//! Configurations run strictly one after another: a variant's dataset is
//! built, warmed up, measured and dropped before the next variant is built.
//! Only the order of variants within a size is randomized.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use super::bench::{time_seed, TimeUnit};
use super::timer::{measure_variant, TimingConfig, VariantResult};
use crate::config::RunConfig;
use crate::error::SetupError;
use crate::registry::ExperimentRunner;

/// Results of every variant at one size
#[derive(Clone, Debug)]
pub struct SizeResults {
    pub size: usize,
    pub runs: usize,
    /// In registration order, so the first entry is the baseline
    pub results: Vec<VariantResult>,
}

/// Results of one experiment across its sizes
#[derive(Clone, Debug)]
pub struct ExperimentReport {
    pub name: &'static str,
    pub time_unit: TimeUnit,
    pub sizes: Vec<SizeResults>,
}

/// Raw timing data for a single configuration (used for CSV export)
#[derive(Clone, Debug, PartialEq)]
pub struct RawTimingData {
    pub experiment: String,
    pub variant: String,
    pub size: usize,
    pub runs: usize,
    pub avg_nanos: u128,
    pub median_nanos: u128,
    pub min_nanos: u128,
    pub max_nanos: u128,
    pub ns_per_element: f64,
}

impl RawTimingData {
    pub fn from_result(experiment: &str, result: &VariantResult) -> Self {
        Self {
            experiment: experiment.to_string(),
            variant: result.name.clone(),
            size: result.size,
            runs: result.runs,
            avg_nanos: result.avg_time.as_nanos(),
            median_nanos: result.median_time.as_nanos(),
            min_nanos: result.min_time.as_nanos(),
            max_nanos: result.max_time.as_nanos(),
            ns_per_element: result.per_element_nanos,
        }
    }
}

impl ExperimentReport {
    /// Flatten into one CSV row per configuration
    pub fn raw_data(&self) -> Vec<RawTimingData> {
        self.sizes
            .iter()
            .flat_map(|s| s.results.iter())
            .map(|r| RawTimingData::from_result(self.name, r))
            .collect()
    }
}

/// Sizes to run and the timing to run them with.
///
/// `--sizes` replaces the experiment's plans unless the experiment ignores
/// the dataset size.
pub fn planned_sizes(
    experiment: &dyn ExperimentRunner,
    config: &RunConfig,
) -> Vec<(usize, TimingConfig)> {
    match &config.sizes {
        Some(sizes) if !experiment.size_independent() => sizes
            .iter()
            .map(|&size| (size, config.timing_for(None)))
            .collect(),
        _ => experiment
            .size_plans()
            .into_iter()
            .flat_map(|plan| {
                let timing = config.timing_for(plan.runs);
                plan.sizes
                    .into_iter()
                    .map(move |size| (size, timing.clone()))
            })
            .collect(),
    }
}

/// Run every variant of one experiment at every planned size.
pub fn run_experiment<R: Rng + ?Sized>(
    experiment: &dyn ExperimentRunner,
    config: &RunConfig,
    rng: &mut R,
) -> Result<ExperimentReport, SetupError> {
    let registered = experiment.available_variants();
    let mut sizes = Vec::new();

    for (size, timing) in planned_sizes(experiment, config) {
        let mut order = registered.clone();
        order.shuffle(rng);

        let mut results = Vec::with_capacity(order.len());
        for variant in order {
            log::info!(
                "{}/{} size={} runs={}",
                experiment.name(),
                variant,
                size,
                timing.runs_per_variant
            );
            let closure = experiment.build_variant(variant, size, Some(rng.random()))?;
            results.push(measure_variant(closure, &timing));
        }

        results.sort_by_key(|r| {
            registered
                .iter()
                .position(|&name| name == r.name)
                .unwrap_or(usize::MAX)
        });

        sizes.push(SizeResults {
            size,
            runs: timing.runs_per_variant,
            results,
        });
    }

    Ok(ExperimentReport {
        name: experiment.name(),
        time_unit: experiment.time_unit(),
        sizes,
    })
}

/// Run several experiments in order with one shared, seeded RNG.
pub fn run_experiments(
    experiments: &[&dyn ExperimentRunner],
    config: &RunConfig,
) -> Result<Vec<ExperimentReport>, SetupError> {
    let seed = config.seed.unwrap_or_else(time_seed);
    log::debug!("variant order seed: {}", seed);
    let mut rng = StdRng::seed_from_u64(seed);

    experiments
        .iter()
        .map(|experiment| run_experiment(*experiment, config, &mut rng))
        .collect()
}

/// Export timing data to CSV file
pub fn export_csv(path: &str, data: &[RawTimingData]) -> std::io::Result<()> {
    use std::io::Write;

    let mut file = std::io::BufWriter::new(std::fs::File::create(path)?);

    writeln!(
        file,
        "experiment,variant,size,runs,avg_ns,median_ns,min_ns,max_ns,ns_per_element"
    )?;

    for entry in data {
        writeln!(
            file,
            "{},{},{},{},{},{},{},{},{:.4}",
            entry.experiment,
            entry.variant,
            entry.size,
            entry.runs,
            entry.avg_nanos,
            entry.median_nanos,
            entry.min_nanos,
            entry.max_nanos,
            entry.ns_per_element
        )?;
    }

    file.flush()?;
    log::info!("exported {} rows to {}", data.len(), path);
    Ok(())
}
