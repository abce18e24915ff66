//! Text User Interface (TUI) utilities.
//!
//! Handles formatted output for the CLI.

use super::bench::TimeUnit;
use super::runner::{self, ExperimentReport, RawTimingData, SizeResults};
use crate::config::RunConfig;
use crate::error::SetupError;
use crate::registry::{ExperimentRegistry, ExperimentRunner};
use terminal_size::{terminal_size, Width};

/// Get the current terminal width, constrained to a reasonable range
fn get_term_width() -> usize {
    if let Some((Width(w), _)) = terminal_size() {
        (w as usize).clamp(40, 200)
    } else {
        80
    }
}

/// Truncate string with ellipsis if it exceeds width (character-wise)
fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        s.to_string()
    } else {
        let mut result: String = s.chars().take(width.saturating_sub(3)).collect();
        result.push_str("...");
        result
    }
}

/// Print experiment info box
pub fn print_experiment_info_box(experiment: &dyn ExperimentRunner) {
    let term_width = get_term_width();
    let max_content_width = term_width.saturating_sub(4).max(40);

    let name_line = format!("Experiment: {}", experiment.name());
    let cat_line = format!("Category:   {}", experiment.category());
    let desc_line = experiment.description();
    let var_line = format!("Variants: {}", experiment.available_variants().join(", "));

    let content_width = [
        name_line.chars().count(),
        cat_line.chars().count(),
        desc_line.chars().count(),
        var_line.chars().count(),
    ]
    .into_iter()
    .max()
    .unwrap_or(60)
    .min(max_content_width);

    let border = "─".repeat(content_width + 2);

    println!("┌{}┐", border);
    for line in [name_line.as_str(), cat_line.as_str(), desc_line] {
        println!(
            "│ {:<width$} │",
            truncate(line, content_width),
            width = content_width
        );
    }
    println!("├{}┤", border);
    println!(
        "│ {:<width$} │",
        truncate(&var_line, content_width),
        width = content_width
    );
    println!("└{}┘", border);
    println!();
}

/// Print results table for a single size.
/// Speedup is relative to the first row.
pub fn print_results_table(size: &SizeResults, unit: TimeUnit, show_size: bool) {
    let results = &size.results;
    if results.is_empty() {
        return;
    }

    let term_width = get_term_width();
    // 12+12+12+12+9+9 = 66 chars + 6 spaces + 2 indent
    let fixed_width = 74;
    let variant_col_width = term_width.saturating_sub(fixed_width).max(15);
    let table_width = variant_col_width + 66 + 6;

    let baseline_time = results
        .first()
        .map(|r| r.avg_time.as_nanos() as f64)
        .unwrap_or(1.0);

    if show_size {
        println!("  Size: {} ({} runs)", size.size, size.runs);
    } else {
        println!("  {} runs", size.runs);
    }
    println!("  {}", "─".repeat(table_width));
    println!(
        "  {:<v_width$} {:>12} {:>12} {:>12} {:>12} {:>9} {:>9}",
        "Variant",
        "Average",
        "Min",
        "Max",
        "Per elem",
        "Speedup",
        "CV",
        v_width = variant_col_width
    );
    println!("  {}", "─".repeat(table_width));

    for result in results {
        let avg_ns = result.avg_time.as_nanos() as f64;
        let speedup = if avg_ns > 0.0 {
            baseline_time / avg_ns
        } else {
            0.0
        };
        let cv = if avg_ns > 0.0 {
            result.std_dev.as_nanos() as f64 / avg_ns
        } else {
            0.0
        };

        println!(
            "  {:<v_width$} {:>12} {:>12} {:>12} {:>9.3} ns {:>8.2}x {:>8.2}%",
            truncate(&result.name, variant_col_width),
            unit.format(result.avg_time),
            unit.format(result.min_time),
            unit.format(result.max_time),
            result.per_element_nanos,
            speedup,
            cv * 100.0,
            v_width = variant_col_width
        );
    }
    println!();
}

/// Print every table of an experiment report
pub fn print_report(report: &ExperimentReport, show_size: bool) {
    for size in &report.sizes {
        print_results_table(size, report.time_unit, show_size);
    }
}

/// Print the application header
pub fn print_header() {
    let term_width = get_term_width().min(80);
    let title = " Layout Bench ";
    let padding = term_width.saturating_sub(title.len() + 2) / 2;
    let right_padding = term_width.saturating_sub(padding + title.len());

    let border = "═".repeat(term_width);

    println!("╔{}╗", border);
    println!(
        "║{}{}{}║",
        " ".repeat(padding),
        title,
        " ".repeat(right_padding)
    );
    println!("╚{}╝", border);
    println!();
}

/// Print the help message
pub fn print_help() {
    println!("Usage: layout-bench [OPTIONS] [EXPERIMENT]");
    println!();
    println!("Options:");
    println!("  --list, -l       List all experiments and their variants");
    println!("  --help, -h       Show this help message");
    println!("  --sizes SIZES    Comma-separated dataset sizes (default: per experiment)");
    println!("  --runs N, -r N   Timed runs per configuration (default: per plan, else 30)");
    println!("  --warmup N       Untimed passes before measuring (default: 3)");
    println!("  --seed N         Seed for shuffles and variant order (default: time-based)");
    println!("  --csv PATH       Export results to CSV");
    println!("  --pin MODE       CPU pinning: global (default) or per-trial");
    println!();
    println!("Arguments:");
    println!("  EXPERIMENT       Name of a single experiment to run (omit for all)");
    println!();
    println!("Environment:");
    println!("  RUST_LOG         Log level, e.g. RUST_LOG=info");
    println!();
    println!("Examples:");
    println!("  layout-bench                          # Run all experiments");
    println!("  layout-bench sort_layout              # Run only sort_layout");
    println!("  layout-bench --sizes 1000,100000 entity_update");
    println!("  layout-bench --seed 12345 --csv out.csv");
}

/// Print the list of available experiments
pub fn print_available_experiments(registry: &ExperimentRegistry) {
    println!("Available experiments:");
    println!();
    for experiment in registry.all() {
        println!(
            "  {:<20} [{}] - {}",
            experiment.name(),
            experiment.category(),
            experiment.description()
        );
        println!(
            "  {:<20}   variants: {}",
            "",
            experiment.available_variants().join(", ")
        );
    }
}

/// Run experiments one by one and print each one's tables as it finishes.
/// Returns the rows for CSV export.
pub fn run_and_display(
    experiments: &[&dyn ExperimentRunner],
    config: &RunConfig,
) -> Result<Vec<RawTimingData>, SetupError> {
    let mut raw_data = Vec::new();

    for (index, experiment) in experiments.iter().enumerate() {
        print_experiment_info_box(*experiment);

        // Distinct but reproducible order per experiment
        let config = RunConfig {
            seed: config.seed.map(|s| s.wrapping_add(index as u64)),
            ..config.clone()
        };
        let reports = runner::run_experiments(&[*experiment], &config)?;

        for report in &reports {
            print_report(report, !experiment.size_independent());
            raw_data.extend(report.raw_data());
        }
    }

    Ok(raw_data)
}
