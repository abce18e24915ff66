//! Experiments on how data placement affects the cache.

pub mod entity_update;
pub mod sort_layout;
