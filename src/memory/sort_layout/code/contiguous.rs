//! Contiguous layouts: every value sits next to its neighbours.

use super::{ascending_sequence, SortLayout};
use crate::harness::LayoutTrial;

/// Values in a single fixed-size heap block.
pub struct ArrayLayout {
    values: Box<[u32]>,
}

impl ArrayLayout {
    pub fn new(size: usize) -> Self {
        Self {
            values: ascending_sequence(size).collect(),
        }
    }

    /// Layout over arbitrary values, in the given order
    pub fn from_values(values: Vec<u32>) -> Self {
        Self {
            values: values.into_boxed_slice(),
        }
    }
}

impl LayoutTrial for ArrayLayout {
    fn elements(&self) -> usize {
        self.values.len()
    }

    fn run(&mut self) {
        self.values.sort_unstable();
    }
}

impl SortLayout for ArrayLayout {
    fn values(&self) -> Vec<u32> {
        self.values.to_vec()
    }
}

/// Values in a growable vector.
pub struct VectorLayout {
    values: Vec<u32>,
}

impl VectorLayout {
    pub fn new(size: usize) -> Self {
        let mut values = Vec::new();
        values.resize(size, 0);
        for (slot, value) in values.iter_mut().zip(ascending_sequence(size)) {
            *slot = value;
        }
        Self { values }
    }

    pub fn from_values(values: Vec<u32>) -> Self {
        Self { values }
    }
}

impl LayoutTrial for VectorLayout {
    fn elements(&self) -> usize {
        self.values.len()
    }

    fn run(&mut self) {
        self.values.sort_unstable();
    }
}

impl SortLayout for VectorLayout {
    fn values(&self) -> Vec<u32> {
        self.values.clone()
    }
}
