use layout_bench::config::{Command, LayoutFlags, RunConfig};
use layout_bench::harness::{LayoutTrial, TrialHarness};
use layout_bench::memory::entity_update::code::{
    build_layout, default_state, EntityKind, EntityLayout, EntityTrial, LayoutChoice, Vector3, DT,
};
use layout_bench::memory::entity_update::EntityUpdateRunner;
use layout_bench::registry::{build_registry, ExperimentRunner};
use layout_bench::utils::bench::seeded_rng;
use layout_bench::utils::cache::CacheScrubber;
use layout_bench::utils::runner::{export_csv, run_experiments};
use std::time::Instant;

#[test]
fn one_update_from_rest_in_every_layout() {
    let expected = Vector3::new(0.016, 0.032, 0.048);
    let layouts = [
        LayoutChoice::Oop(EntityKind::Direct),
        LayoutChoice::Oop(EntityKind::ViaComponent),
        LayoutChoice::ArrayOfStructs,
        LayoutChoice::StructOfArrays,
    ];
    let flag_sets = [
        LayoutFlags::NONE,
        LayoutFlags::NONE.extra_allocations(),
        LayoutFlags::NONE.extra_allocations().shuffled(),
    ];

    for layout in layouts {
        for flags in flag_sets {
            let mut rng = seeded_rng(Some(2024));
            let built = build_layout(layout, 1000, flags, &mut rng, default_state);
            let mut trial = EntityTrial::new(built);
            assert_eq!(trial.dt, DT);
            trial.run();

            let positions = trial.layout.positions_by_id();
            assert_eq!(positions.len(), 1000);
            for position in positions {
                assert!(
                    position.approx_eq(expected, 1e-5),
                    "{:?} {:?}: {:?}",
                    layout,
                    flags,
                    position
                );
            }
        }
    }
}

#[test]
fn every_experiment_verifies() {
    for experiment in build_registry().all() {
        experiment
            .verify()
            .unwrap_or_else(|e| panic!("{} failed verification: {}", experiment.name(), e));
    }
}

#[test]
fn scrub_stays_outside_timed_region() {
    let scrubber = CacheScrubber::with_size(64 << 20).unwrap();
    assert_eq!(scrubber.scrub(), 64 << 20);
    let scrub_time = (0..3)
        .map(|_| {
            let start = Instant::now();
            scrubber.scrub();
            start.elapsed()
        })
        .min()
        .unwrap();

    // `oop_cc` scrubs before every trial; ten entities take next to no time
    let runner = EntityUpdateRunner::with_scrubber(scrubber);
    let mut closure = runner.build_variant("oop_cc", 10, Some(1)).unwrap();
    let trial_time = (0..3).map(|_| (closure.run)()).min().unwrap();

    assert!(
        trial_time * 4 < scrub_time,
        "cold trial took {:?}, scrub alone takes {:?}",
        trial_time,
        scrub_time
    );

    let mut rng = seeded_rng(Some(1));
    let mut trial = EntityTrial::new(build_layout(
        LayoutChoice::Oop(EntityKind::Direct),
        10,
        LayoutFlags::NONE.clear_cache(),
        &mut rng,
        default_state,
    ));
    let small = CacheScrubber::with_size(1 << 16).unwrap();
    TrialHarness::cold(&small).time_trials(&mut trial, 3);
    assert_eq!(trial.elements(), 10);
}

#[test]
fn short_run_through_the_cli_path() {
    let args = [
        "--sizes", "100", "--runs", "2", "--warmup", "0", "--seed", "9", "entity_update",
    ];
    let config = match Command::parse(args) {
        Ok(Command::Run(config)) => config,
        other => panic!("unexpected parse result: {:?}", other),
    };
    assert_eq!(config.experiment.as_deref(), Some("entity_update"));

    let runner = EntityUpdateRunner::with_scrubber(CacheScrubber::with_size(4096).unwrap());
    let reports = run_experiments(&[&runner as &dyn ExperimentRunner], &config).unwrap();
    assert_eq!(reports.len(), 1);

    let rows = reports[0].raw_data();
    assert_eq!(rows.len(), runner.available_variants().len());
    assert!(rows.iter().all(|r| r.size == 100 && r.runs == 2));

    let file_name = format!("layout-bench-e2e-{}.csv", std::process::id());
    let path = std::env::temp_dir().join(file_name);
    let path = path.to_string_lossy().into_owned();
    export_csv(&path, &rows).unwrap();
    let text = std::fs::read_to_string(&path).unwrap();
    std::fs::remove_file(&path).ok();
    assert_eq!(text.lines().count(), rows.len() + 1);
}

#[test]
fn default_config_has_no_overrides() {
    let config = RunConfig::default();
    assert!(config.sizes.is_none());
    assert!(config.csv_path.is_none());
}
