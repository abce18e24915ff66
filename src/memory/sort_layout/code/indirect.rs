//! Indirect layout: each value is its own heap allocation.
//!
//! Sorting moves the handles; every comparison chases two pointers.

use super::SortLayout;
use crate::harness::LayoutTrial;

/// A value living in its own allocation.
#[derive(Debug)]
pub struct HeapValue {
    pub value: u32,
}

pub struct HeapValuesLayout {
    handles: Vec<Box<HeapValue>>,
}

impl HeapValuesLayout {
    pub fn new(size: usize) -> Self {
        let mut handles = Vec::with_capacity(size);
        for i in 0..size {
            handles.push(Box::new(HeapValue { value: i as u32 }));
        }
        Self { handles }
    }

    /// One allocation per value, handles in the given order
    pub fn from_values(values: Vec<u32>) -> Self {
        Self {
            handles: values
                .into_iter()
                .map(|value| Box::new(HeapValue { value }))
                .collect(),
        }
    }
}

impl LayoutTrial for HeapValuesLayout {
    fn elements(&self) -> usize {
        self.handles.len()
    }

    fn run(&mut self) {
        self.handles.sort_unstable_by(|lhs, rhs| lhs.value.cmp(&rhs.value));
    }
}

impl SortLayout for HeapValuesLayout {
    fn values(&self) -> Vec<u32> {
        self.handles.iter().map(|h| h.value).collect()
    }
}
