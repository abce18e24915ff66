//! Data-oriented layouts: entity data stored contiguously.

use super::vector3::Vector3;
use super::{EntityLayout, EntityState};

/// One record per entity, fields interleaved.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DodEntity {
    pub position: Vector3,
    pub velocity: Vector3,
}

/// Array of structs
pub struct AosEntities {
    entities: Vec<DodEntity>,
}

impl AosEntities {
    pub fn build<F: Fn(usize) -> EntityState>(count: usize, state_at: F) -> Self {
        Self {
            entities: (0..count)
                .map(|i| {
                    let state = state_at(i);
                    DodEntity {
                        position: state.position,
                        velocity: state.velocity,
                    }
                })
                .collect(),
        }
    }
}

impl EntityLayout for AosEntities {
    fn len(&self) -> usize {
        self.entities.len()
    }

    fn update_all(&mut self, dt: f32) {
        for entity in self.entities.iter_mut() {
            entity.position = entity.position + entity.velocity * dt;
        }
    }

    fn positions_by_id(&self) -> Vec<Vector3> {
        self.entities.iter().map(|e| e.position).collect()
    }
}

/// Struct of arrays: `positions[i]` and `velocities[i]` belong to entity `i`.
pub struct SoaEntities {
    positions: Vec<Vector3>,
    velocities: Vec<Vector3>,
}

impl SoaEntities {
    pub fn build<F: Fn(usize) -> EntityState>(count: usize, state_at: F) -> Self {
        let mut positions = Vec::with_capacity(count);
        let mut velocities = Vec::with_capacity(count);
        for i in 0..count {
            let state = state_at(i);
            positions.push(state.position);
            velocities.push(state.velocity);
        }
        Self {
            positions,
            velocities,
        }
    }
}

impl EntityLayout for SoaEntities {
    fn len(&self) -> usize {
        self.positions.len()
    }

    fn update_all(&mut self, dt: f32) {
        for (position, velocity) in self.positions.iter_mut().zip(&self.velocities) {
            *position = *position + *velocity * dt;
        }
    }

    fn positions_by_id(&self) -> Vec<Vector3> {
        self.positions.clone()
    }
}
