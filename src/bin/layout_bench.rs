//! CLI for running layout experiments.
//!
//! Usage:
//!   layout-bench                # Run all experiments
//!   layout-bench --list         # List available experiments
//!   layout-bench sort_layout    # Run specific experiment
//!   layout-bench --help         # Show help

use layout_bench::config::Command;
use layout_bench::registry::build_registry;
use layout_bench::tui;
use layout_bench::utils::runner;
use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::init();

    let config = match Command::parse(std::env::args().skip(1)) {
        Ok(Command::Help) => {
            tui::print_help();
            return ExitCode::SUCCESS;
        }
        Ok(Command::List) => {
            tui::print_available_experiments(&build_registry());
            return ExitCode::SUCCESS;
        }
        Ok(Command::Run(config)) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!("Run with --help for usage.");
            return ExitCode::FAILURE;
        }
    };

    let registry = build_registry();
    let experiments: Vec<_> = match &config.experiment {
        Some(name) => match registry.find(name) {
            Some(experiment) => vec![experiment],
            None => {
                eprintln!("Experiment '{}' not found.", name);
                eprintln!("Available: {:?}", registry.list_names());
                return ExitCode::FAILURE;
            }
        },
        None => registry.all().iter().map(|e| e.as_ref()).collect(),
    };

    tui::print_header();

    let raw_data = match tui::run_and_display(&experiments, &config) {
        Ok(raw_data) => raw_data,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Some(path) = &config.csv_path {
        match runner::export_csv(path, &raw_data) {
            Ok(()) => println!("  Raw data exported to: {}", path),
            Err(e) => {
                eprintln!("Error: failed to export CSV to {}: {}", path, e);
                return ExitCode::FAILURE;
            }
        }
        println!();
    }

    println!("Note: Speedup is relative to the first variant of each table.");
    ExitCode::SUCCESS
}
