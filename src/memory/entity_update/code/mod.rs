//! Entity layouts and the configurations registered for them.

mod component;
mod dod;
mod oop;
mod vector3;

pub use component::{ComponentEntity, EntityComponent, PhysicsComponent, Transform};
pub use dod::{AosEntities, DodEntity, SoaEntities};
pub use oop::{DirectEntity, EntityKind, OopPopulation, Updatable, EXTRA_ALLOCATIONS};
pub use vector3::Vector3;

use rand::Rng;
use std::hint::black_box;

use crate::config::LayoutFlags;
use crate::harness::LayoutTrial;

/// Fixed simulation timestep
pub const DT: f32 = 0.016;

/// Initial position and velocity of one entity.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct EntityState {
    pub position: Vector3,
    pub velocity: Vector3,
}

impl EntityState {
    pub const fn new(position: Vector3, velocity: Vector3) -> Self {
        Self { position, velocity }
    }
}

/// State every benchmark entity starts from.
pub const DEFAULT_STATE: EntityState =
    EntityState::new(Vector3::ZERO, Vector3::new(1.0, 2.0, 3.0));

pub fn default_state(_index: usize) -> EntityState {
    DEFAULT_STATE
}

/// A population of entities under one memory layout.
pub trait EntityLayout {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// `position += velocity * dt` for every entity
    fn update_all(&mut self, dt: f32);

    /// Positions ordered by entity id, independent of iteration order
    fn positions_by_id(&self) -> Vec<Vector3>;
}

/// How a configuration stores its entities.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayoutChoice {
    Oop(EntityKind),
    ArrayOfStructs,
    StructOfArrays,
}

/// A named entity configuration.
#[derive(Clone, Copy, Debug)]
pub struct EntityVariant {
    pub name: &'static str,
    pub description: &'static str,
    pub layout: LayoutChoice,
    pub flags: LayoutFlags,
}

/// Build a population. Flags that do not apply to a layout (shuffling and
/// extra allocations for contiguous layouts) are ignored.
pub fn build_layout<R, F>(
    layout: LayoutChoice,
    count: usize,
    flags: LayoutFlags,
    rng: &mut R,
    state_at: F,
) -> Box<dyn EntityLayout>
where
    R: Rng + ?Sized,
    F: Fn(usize) -> EntityState,
{
    match layout {
        LayoutChoice::Oop(kind) => {
            Box::new(OopPopulation::build(kind, count, flags, rng, state_at))
        }
        LayoutChoice::ArrayOfStructs => Box::new(AosEntities::build(count, state_at)),
        LayoutChoice::StructOfArrays => Box::new(SoaEntities::build(count, state_at)),
    }
}

/// One update step over a population, as a timed trial.
pub struct EntityTrial<L: ?Sized> {
    pub dt: f32,
    pub layout: Box<L>,
}

impl<L: EntityLayout + ?Sized> EntityTrial<L> {
    pub fn new(layout: Box<L>) -> Self {
        Self { dt: DT, layout }
    }
}

impl<L: EntityLayout + ?Sized> LayoutTrial for EntityTrial<L> {
    fn elements(&self) -> usize {
        self.layout.len()
    }

    fn run(&mut self) {
        self.layout.update_all(black_box(self.dt));
    }
}

/// Configurations of the direct-dispatch experiment
pub fn direct_variants() -> Vec<EntityVariant> {
    let oop = LayoutChoice::Oop(EntityKind::Direct);
    vec![
        EntityVariant {
            name: "oop",
            description: "Boxed trait objects in creation order",
            layout: oop,
            flags: LayoutFlags::NONE,
        },
        EntityVariant {
            name: "oop_cc",
            description: "Boxed trait objects, cache scrubbed before each trial",
            layout: oop,
            flags: LayoutFlags::NONE.clear_cache(),
        },
        EntityVariant {
            name: "oop_ealloc",
            description: "Boxed trait objects, heap fragmented by extra allocations",
            layout: oop,
            flags: LayoutFlags::NONE.extra_allocations(),
        },
        EntityVariant {
            name: "oop_ealloc_shfl",
            description: "Boxed trait objects, fragmented heap, shuffled handles",
            layout: oop,
            flags: LayoutFlags::NONE.extra_allocations().shuffled(),
        },
        EntityVariant {
            name: "dod",
            description: "Contiguous array of structs, cache scrubbed before each trial",
            layout: LayoutChoice::ArrayOfStructs,
            flags: LayoutFlags::NONE.clear_cache(),
        },
        EntityVariant {
            name: "dod_soa",
            description: "Struct of arrays (positions and velocities)",
            layout: LayoutChoice::StructOfArrays,
            flags: LayoutFlags::NONE,
        },
    ]
}

/// Configurations of the component-hop experiment
pub fn component_variants() -> Vec<EntityVariant> {
    let oop = LayoutChoice::Oop(EntityKind::ViaComponent);
    vec![
        EntityVariant {
            name: "oop",
            description: "Boxed entities updating through a boxed component",
            layout: oop,
            flags: LayoutFlags::NONE,
        },
        EntityVariant {
            name: "oop_ealloc",
            description: "Component entities, heap fragmented by extra allocations",
            layout: oop,
            flags: LayoutFlags::NONE.extra_allocations(),
        },
        EntityVariant {
            name: "oop_ealloc_shfl",
            description: "Component entities, fragmented heap, shuffled handles",
            layout: oop,
            flags: LayoutFlags::NONE.extra_allocations().shuffled(),
        },
        EntityVariant {
            name: "dod_soa",
            description: "Struct of arrays (positions and velocities)",
            layout: LayoutChoice::StructOfArrays,
            flags: LayoutFlags::NONE,
        },
    ]
}
