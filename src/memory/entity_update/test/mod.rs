//! Tests for entity layouts

use super::code::{build_layout, EntityState, EntityVariant, Vector3, DT};
use crate::utils::bench::seeded_rng;

const REL_TOLERANCE: f32 = 1e-5;

/// Distinct state per entity so per-entity mix-ups show up
fn ramp_state(index: usize) -> EntityState {
    let i = index as f32;
    EntityState::new(
        Vector3::new(i, -i, 0.5 * i),
        Vector3::new(1.0 + i, 2.0 - i, 3.0 * i),
    )
}

/// Verify every configuration moves every entity to the same place after one
/// update, regardless of layout, shuffling or heap fragmentation.
pub fn verify_variants(variants: &[EntityVariant]) -> Result<(), String> {
    let count = 257;

    for variant in variants {
        let mut rng = seeded_rng(Some(0x5EED));
        let mut layout = build_layout(variant.layout, count, variant.flags, &mut rng, ramp_state);
        layout.update_all(DT);

        let positions = layout.positions_by_id();
        if positions.len() != count {
            return Err(format!(
                "Variant '{}' has {} entities, expected {}",
                variant.name,
                positions.len(),
                count
            ));
        }

        for (id, position) in positions.iter().enumerate() {
            let state = ramp_state(id);
            let expected = state.position + state.velocity * DT;
            if !position.approx_eq(expected, REL_TOLERANCE) {
                return Err(format!(
                    "Variant '{}' entity {}: expected {:?}, got {:?}",
                    variant.name, id, expected, position
                ));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LayoutFlags;
    use crate::harness::{LayoutTrial, TrialHarness};
    use crate::memory::entity_update::code::{
        component_variants, default_state, direct_variants, EntityKind, EntityLayout,
        EntityTrial, LayoutChoice, OopPopulation, EXTRA_ALLOCATIONS,
    };

    #[test]
    fn test_direct_variants_agree() {
        verify_variants(&direct_variants()).expect("direct layouts should agree");
    }

    #[test]
    fn test_component_variants_agree() {
        verify_variants(&component_variants()).expect("component layouts should agree");
    }

    #[test]
    fn test_one_step_from_rest() {
        let expected = Vector3::new(0.016, 0.032, 0.048);

        for variant in direct_variants().iter().chain(component_variants().iter()) {
            let mut rng = seeded_rng(Some(1));
            let layout = build_layout(variant.layout, 1000, variant.flags, &mut rng, default_state);
            let mut trial = EntityTrial::new(layout);
            assert_eq!(trial.elements(), 1000);
            trial.run();

            for position in trial.layout.positions_by_id() {
                assert!(
                    position.approx_eq(expected, REL_TOLERANCE),
                    "{}: got {:?}",
                    variant.name,
                    position
                );
            }
        }
    }

    #[test]
    fn test_shuffle_changes_order_not_contents() {
        let flags = LayoutFlags::NONE.shuffled();
        let mut rng = seeded_rng(Some(99));
        let mut shuffled =
            OopPopulation::build(EntityKind::Direct, 100, flags, &mut rng, ramp_state);
        let mut rng = seeded_rng(Some(99));
        let mut ordered = OopPopulation::build(
            EntityKind::Direct,
            100,
            LayoutFlags::NONE,
            &mut rng,
            ramp_state,
        );

        let ids = shuffled.ids();
        assert_ne!(ids, ordered.ids(), "handles should be reordered");

        let mut sorted = ids.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, ordered.ids());

        shuffled.update_all(DT);
        ordered.update_all(DT);
        assert_eq!(shuffled.positions_by_id(), ordered.positions_by_id());
    }

    #[test]
    fn test_extra_allocations_are_kept_alive() {
        let count = 50;
        let mut rng = seeded_rng(Some(3));
        let population = OopPopulation::build(
            EntityKind::ViaComponent,
            count,
            LayoutFlags::NONE.extra_allocations(),
            &mut rng,
            default_state,
        );
        let ballast = population.ballast_len();
        assert!(ballast >= count * EXTRA_ALLOCATIONS.start());
        assert!(ballast <= count * EXTRA_ALLOCATIONS.end());
        assert_eq!(population.len(), count);

        let mut rng = seeded_rng(Some(3));
        let plain = OopPopulation::build(
            EntityKind::Direct,
            count,
            LayoutFlags::NONE,
            &mut rng,
            default_state,
        );
        assert_eq!(plain.ballast_len(), 0);
    }

    #[test]
    fn test_component_hop_matches_direct() {
        let mut rng = seeded_rng(None);
        let mut direct = build_layout(
            LayoutChoice::Oop(EntityKind::Direct),
            32,
            LayoutFlags::NONE,
            &mut rng,
            ramp_state,
        );
        let mut hop = build_layout(
            LayoutChoice::Oop(EntityKind::ViaComponent),
            32,
            LayoutFlags::NONE,
            &mut rng,
            ramp_state,
        );
        for _ in 0..10 {
            direct.update_all(DT);
            hop.update_all(DT);
        }
        assert_eq!(direct.positions_by_id(), hop.positions_by_id());
    }

    #[test]
    fn test_runners_build_and_reject_empty() {
        use crate::memory::entity_update::{EntityComponentRunner, EntityUpdateRunner};
        use crate::registry::ExperimentRunner;
        use crate::utils::cache::CacheScrubber;

        let scrubber = CacheScrubber::with_size(4096).unwrap();
        let runners: [Box<dyn ExperimentRunner>; 2] = [
            Box::new(EntityUpdateRunner::with_scrubber(scrubber.clone())),
            Box::new(EntityComponentRunner::with_scrubber(scrubber)),
        ];
        for runner in &runners {
            for name in runner.available_variants() {
                let mut closure = runner.build_variant(name, 64, Some(11)).unwrap();
                assert_eq!(closure.size, 64);
                assert_eq!(closure.elements, 64);
                (closure.run)();
            }
            assert!(matches!(
                runner.build_variant("oop", 0, None),
                Err(crate::error::SetupError::EmptyDataset { .. })
            ));
        }
    }

    #[test]
    fn test_cold_trial_still_updates() {
        let scrubber = crate::utils::cache::CacheScrubber::with_size(1 << 12).unwrap();
        let mut rng = seeded_rng(Some(5));
        let layout = build_layout(
            LayoutChoice::StructOfArrays,
            8,
            LayoutFlags::NONE,
            &mut rng,
            default_state,
        );
        let mut trial = EntityTrial::new(layout);
        TrialHarness::cold(&scrubber).time_trials(&mut trial, 2);

        let expected = Vector3::new(0.032, 0.064, 0.096);
        for position in trial.layout.positions_by_id() {
            assert!(position.approx_eq(expected, REL_TOLERANCE));
        }
    }
}
