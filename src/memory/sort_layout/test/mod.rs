//! Tests for sort layout implementations

use rand::seq::SliceRandom;

use super::code::{
    ascending_sequence, available_variants, ArrayLayout, HeapValuesLayout, SortLayout,
    VectorLayout,
};
use crate::harness::LayoutTrial;
use crate::utils::bench::seeded_rng;

/// Every layout over the same values, named like the registered variants
fn layouts_over(values: &[u32]) -> Vec<(&'static str, Box<dyn SortLayout>)> {
    let array: Box<dyn SortLayout> = Box::new(ArrayLayout::from_values(values.to_vec()));
    let vector: Box<dyn SortLayout> = Box::new(VectorLayout::from_values(values.to_vec()));
    let heap: Box<dyn SortLayout> = Box::new(HeapValuesLayout::from_values(values.to_vec()));
    vec![("array", array), ("vector", vector), ("values_on_heap", heap)]
}

/// Sort `input` with every layout and check each result is the sorted
/// permutation of `input`.
fn verify_input(input: &[u32], label: &str) -> Result<(), String> {
    let mut expected = input.to_vec();
    expected.sort_unstable();

    for (name, mut layout) in layouts_over(input) {
        // Sort twice: the second trial sorts already-sorted data
        layout.run();
        layout.run();
        let values = layout.values();

        if values.windows(2).any(|w| w[0] > w[1]) {
            return Err(format!("Variant '{}' left {} input unsorted", name, label));
        }
        if values != expected {
            return Err(format!(
                "Variant '{}' on {} input is not a permutation of it",
                name, label
            ));
        }
    }

    Ok(())
}

/// Check every layout sorts reversed and shuffled input to the same
/// non-decreasing permutation, and that registered layouts start ascending.
pub fn verify_all() -> Result<(), String> {
    let registered: Vec<_> = available_variants().iter().map(|v| v.name).collect();
    let checked: Vec<_> = layouts_over(&[]).into_iter().map(|(name, _)| name).collect();
    if registered != checked {
        return Err(format!(
            "Registered variants {:?} differ from verified layouts {:?}",
            registered, checked
        ));
    }

    let mut rng = seeded_rng(Some(0x50F7));
    for size in [1usize, 2, 17, 1000, 4096] {
        let ascending: Vec<u32> = ascending_sequence(size).collect();

        let reversed: Vec<u32> = ascending.iter().rev().copied().collect();
        verify_input(&reversed, "reversed")?;

        let mut shuffled = ascending.clone();
        shuffled.shuffle(&mut rng);
        verify_input(&shuffled, "shuffled")?;

        // Duplicates must survive sorting
        let repeated: Vec<u32> = ascending.iter().map(|v| v % 7).collect();
        verify_input(&repeated, "repeated")?;

        for variant in available_variants() {
            let layout = (variant.function)(size);
            if layout.values() != ascending {
                return Err(format!(
                    "Variant '{}' does not start from 0..{}",
                    variant.name, size
                ));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::sort_layout::SortLayoutRunner;
    use crate::registry::ExperimentRunner;
    use crate::utils::cache::CacheScrubber;

    #[test]
    fn test_all_variants() {
        verify_all().expect("All layouts should sort to the same sequence");
    }

    #[test]
    fn test_layouts_sort_unsorted_input() {
        let input = vec![5, 3, 9, 1, 3, 0];
        for (name, mut layout) in layouts_over(&input) {
            assert_eq!(layout.values(), input, "{} keeps input order until run", name);
            layout.run();
            assert_eq!(layout.values(), vec![0, 1, 3, 3, 5, 9], "{}", name);
        }
    }

    #[test]
    fn test_input_is_already_ascending() {
        let layout = VectorLayout::new(10);
        assert_eq!(layout.values(), (0..10).collect::<Vec<u32>>());
    }

    #[test]
    fn test_heap_values_are_separate_allocations() {
        let layout = HeapValuesLayout::new(3);
        assert_eq!(layout.values(), vec![0, 1, 2]);
        assert_eq!(layout.elements(), 3);
    }

    #[test]
    fn test_variant_names() {
        let names: Vec<_> = available_variants().iter().map(|v| v.name).collect();
        assert_eq!(names, vec!["array", "vector", "values_on_heap"]);
    }

    #[test]
    fn test_runner_builds_and_times() {
        let runner = SortLayoutRunner::with_scrubber(CacheScrubber::with_size(4096).unwrap());
        for name in runner.available_variants() {
            let mut closure = runner.build_variant(name, 256, None).unwrap();
            assert_eq!(closure.size, 256);
            assert_eq!(closure.elements, 256);
            (closure.run)();
        }
    }

    #[test]
    fn test_empty_dataset_rejected() {
        let runner = SortLayoutRunner::with_scrubber(CacheScrubber::with_size(64).unwrap());
        assert!(runner.build_variant("array", 0, None).is_err());
    }
}
