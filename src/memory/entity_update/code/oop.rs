//! Object-oriented layout: one heap object per entity behind a trait object.

use rand::seq::SliceRandom;
use rand::Rng;

use super::component::ComponentEntity;
use super::vector3::Vector3;
use super::{EntityLayout, EntityState};
use crate::config::LayoutFlags;

/// Extra allocations made after each entity when fragmenting the heap
pub const EXTRA_ALLOCATIONS: std::ops::RangeInclusive<usize> = 1..=3;

/// Capability every polymorphic entity exposes.
pub trait Updatable {
    fn update(&mut self, dt: f32);

    /// Creation index
    fn id(&self) -> u32;

    fn position(&self) -> Vector3;
}

/// Entity that integrates its own position.
pub struct DirectEntity {
    id: u32,
    position: Vector3,
    velocity: Vector3,
}

impl DirectEntity {
    pub fn new(id: u32, state: EntityState) -> Self {
        Self {
            id,
            position: state.position,
            velocity: state.velocity,
        }
    }
}

impl Updatable for DirectEntity {
    fn update(&mut self, dt: f32) {
        self.position += self.velocity * dt;
    }

    fn id(&self) -> u32 {
        self.id
    }

    fn position(&self) -> Vector3 {
        self.position
    }
}

/// Which concrete entity type a population is made of.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntityKind {
    /// Update is one virtual call
    Direct,
    /// Update is a virtual call that makes a second virtual call on a
    /// separately allocated component
    ViaComponent,
}

impl EntityKind {
    pub fn spawn(self, id: u32, state: EntityState) -> Box<dyn Updatable> {
        match self {
            EntityKind::Direct => Box::new(DirectEntity::new(id, state)),
            EntityKind::ViaComponent => Box::new(ComponentEntity::new(id, state)),
        }
    }
}

/// Entities owned through an ordered sequence of boxed handles.
pub struct OopPopulation {
    entities: Vec<Box<dyn Updatable>>,
    /// Objects allocated between entities to scatter them; never updated
    ballast: Vec<Box<dyn Updatable>>,
}

impl OopPopulation {
    pub fn build<R, F>(
        kind: EntityKind,
        count: usize,
        flags: LayoutFlags,
        rng: &mut R,
        state_at: F,
    ) -> Self
    where
        R: Rng + ?Sized,
        F: Fn(usize) -> EntityState,
    {
        let mut entities = Vec::with_capacity(count);
        let mut ballast = Vec::new();

        for i in 0..count {
            entities.push(kind.spawn(i as u32, state_at(i)));

            if flags.interleave_extra_allocations {
                for _ in 0..rng.random_range(EXTRA_ALLOCATIONS) {
                    ballast.push(kind.spawn(u32::MAX, EntityState::default()));
                }
            }
        }

        if flags.shuffle_before_run {
            entities.shuffle(rng);
        }

        Self { entities, ballast }
    }

    /// Entity ids in iteration order
    pub fn ids(&self) -> Vec<u32> {
        self.entities.iter().map(|e| e.id()).collect()
    }

    pub fn ballast_len(&self) -> usize {
        self.ballast.len()
    }
}

impl EntityLayout for OopPopulation {
    fn len(&self) -> usize {
        self.entities.len()
    }

    fn update_all(&mut self, dt: f32) {
        for entity in self.entities.iter_mut() {
            entity.update(dt);
        }
    }

    fn positions_by_id(&self) -> Vec<Vector3> {
        let mut by_id: Vec<(u32, Vector3)> = self
            .entities
            .iter()
            .map(|e| (e.id(), e.position()))
            .collect();
        by_id.sort_unstable_by_key(|&(id, _)| id);
        by_id.into_iter().map(|(_, p)| p).collect()
    }
}
