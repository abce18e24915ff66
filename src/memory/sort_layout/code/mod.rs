//! Sort layout implementations.
//!
//! All layouts start from the same ascending sequence `0..N` and sort it with
//! the standard unstable sort. Only storage differs.

mod contiguous;
mod indirect;

pub use contiguous::{ArrayLayout, VectorLayout};
pub use indirect::{HeapValue, HeapValuesLayout};

use crate::harness::LayoutTrial;
use crate::utils::VariantInfo;

/// A sortable dataset under one storage layout.
pub trait SortLayout: LayoutTrial {
    /// Current values, in storage order
    fn values(&self) -> Vec<u32>;
}

/// Builds a layout holding `0..size`
pub type BuildLayoutFn = fn(usize) -> Box<dyn SortLayout>;

/// `0, 1, ..., size - 1`
pub fn ascending_sequence(size: usize) -> impl Iterator<Item = u32> {
    (0..size).map(|i| i as u32)
}

fn build_array(size: usize) -> Box<dyn SortLayout> {
    Box::new(ArrayLayout::new(size))
}

fn build_vector(size: usize) -> Box<dyn SortLayout> {
    Box::new(VectorLayout::new(size))
}

fn build_values_on_heap(size: usize) -> Box<dyn SortLayout> {
    Box::new(HeapValuesLayout::new(size))
}

/// Get all available variants
pub fn available_variants() -> Vec<VariantInfo<BuildLayoutFn>> {
    vec![
        VariantInfo {
            name: "array",
            description: "Contiguous boxed slice, std unstable sort",
            function: build_array as BuildLayoutFn,
        },
        VariantInfo {
            name: "vector",
            description: "Contiguous Vec, std unstable sort",
            function: build_vector,
        },
        VariantInfo {
            name: "values_on_heap",
            description: "Vec of boxed values, comparator dereferences each handle",
            function: build_values_on_heap,
        },
    ]
}
