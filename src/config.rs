//! Run configuration for the `layout-bench` binary.
//!
//! Everything comes from the command line; there are no config files.

use crate::error::ConfigError;
use crate::utils::timer::{PinStrategy, TimingConfig};

/// Layout toggles for the entity experiments.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LayoutFlags {
    /// Scrub the cache before every timed trial
    pub clear_cache_each_trial: bool,
    /// Shuffle the handle sequence after creation
    pub shuffle_before_run: bool,
    /// Allocate 1-3 extra objects after each entity to fragment the heap
    pub interleave_extra_allocations: bool,
}

impl LayoutFlags {
    pub const NONE: Self = Self {
        clear_cache_each_trial: false,
        shuffle_before_run: false,
        interleave_extra_allocations: false,
    };

    pub const fn clear_cache(mut self) -> Self {
        self.clear_cache_each_trial = true;
        self
    }

    pub const fn shuffled(mut self) -> Self {
        self.shuffle_before_run = true;
        self
    }

    pub const fn extra_allocations(mut self) -> Self {
        self.interleave_extra_allocations = true;
        self
    }
}

/// Options of one `layout-bench` invocation
#[derive(Clone, Debug)]
pub struct RunConfig {
    /// Replaces every experiment's own size plans when set
    pub sizes: Option<Vec<usize>>,
    /// Replaces every plan's run count when set
    pub runs: Option<usize>,
    pub warmup_iterations: usize,
    pub pin_strategy: PinStrategy,
    /// Seed for shuffles and variant order; time-based when absent
    pub seed: Option<u64>,
    pub csv_path: Option<String>,
    /// Only run this experiment
    pub experiment: Option<String>,
}

impl Default for RunConfig {
    fn default() -> Self {
        let timing = TimingConfig::default();
        Self {
            sizes: None,
            runs: None,
            warmup_iterations: timing.warmup_iterations,
            pin_strategy: timing.pin_strategy,
            seed: None,
            csv_path: None,
            experiment: None,
        }
    }
}

impl RunConfig {
    /// Timing configuration for a plan, honouring `--runs` first, then the
    /// plan's own run count, then the default.
    pub fn timing_for(&self, plan_runs: Option<usize>) -> TimingConfig {
        let default = TimingConfig::default();
        TimingConfig {
            runs_per_variant: self
                .runs
                .or(plan_runs)
                .unwrap_or(default.runs_per_variant),
            warmup_iterations: self.warmup_iterations,
            pin_strategy: self.pin_strategy,
        }
    }
}

/// What the binary was asked to do
#[derive(Clone, Debug)]
pub enum Command {
    Help,
    List,
    Run(RunConfig),
}

impl Command {
    /// Parse arguments (without the program name).
    pub fn parse<I, S>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut config = RunConfig::default();
        let mut args = args.into_iter().map(Into::into);

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--help" | "-h" => return Ok(Command::Help),
                "--list" | "-l" => return Ok(Command::List),
                "--sizes" => {
                    let value = next_value(&mut args, &arg)?;
                    let sizes = value
                        .split(',')
                        .map(|s| parse_number::<usize>(&arg, s.trim()))
                        .collect::<Result<Vec<_>, _>>()?;
                    if sizes.is_empty() || sizes.contains(&0) {
                        return Err(invalid(&arg, &value));
                    }
                    config.sizes = Some(sizes);
                }
                "--runs" | "-r" => {
                    let value = next_value(&mut args, &arg)?;
                    let runs = parse_number::<usize>(&arg, &value)?;
                    if runs == 0 {
                        return Err(invalid(&arg, &value));
                    }
                    config.runs = Some(runs);
                }
                "--warmup" => {
                    let value = next_value(&mut args, &arg)?;
                    config.warmup_iterations = parse_number(&arg, &value)?;
                }
                "--seed" => {
                    let value = next_value(&mut args, &arg)?;
                    config.seed = Some(parse_number(&arg, &value)?);
                }
                "--csv" => {
                    config.csv_path = Some(next_value(&mut args, &arg)?);
                }
                "--pin" => {
                    let value = next_value(&mut args, &arg)?;
                    config.pin_strategy = match value.as_str() {
                        "global" => PinStrategy::Global,
                        "per-trial" => PinStrategy::PerTrial,
                        _ => return Err(invalid(&arg, &value)),
                    };
                }
                other if !other.starts_with('-') => {
                    config.experiment = Some(other.to_string());
                }
                other => return Err(ConfigError::UnknownOption(other.to_string())),
            }
        }

        Ok(Command::Run(config))
    }
}

fn next_value(
    args: &mut impl Iterator<Item = String>,
    option: &str,
) -> Result<String, ConfigError> {
    args.next()
        .ok_or_else(|| ConfigError::MissingValue(option.to_string()))
}

fn parse_number<T: std::str::FromStr>(option: &str, value: &str) -> Result<T, ConfigError> {
    value.parse().map_err(|_| invalid(option, value))
}

fn invalid(option: &str, value: &str) -> ConfigError {
    ConfigError::InvalidValue {
        option: option.to_string(),
        value: value.to_string(),
    }
}
