//! Entities that delegate their update to an owned component.
//!
//! The entity owns the component; the component never holds a reference back.
//! Instead the entity lends its transform for the duration of the call, which
//! keeps the extra indirection hop without an ownership cycle.

use super::oop::Updatable;
use super::vector3::Vector3;
use super::EntityState;

/// The part of an entity its components may read and write.
#[derive(Clone, Copy, Debug, Default)]
pub struct Transform {
    pub position: Vector3,
}

/// Behaviour attached to an entity.
pub trait EntityComponent {
    fn update(&mut self, owner: &mut Transform, dt: f32);
}

/// Integrates the owner's position.
pub struct PhysicsComponent {
    velocity: Vector3,
}

impl PhysicsComponent {
    pub fn new(velocity: Vector3) -> Self {
        Self { velocity }
    }
}

impl EntityComponent for PhysicsComponent {
    fn update(&mut self, owner: &mut Transform, dt: f32) {
        owner.position += self.velocity * dt;
    }
}

pub struct ComponentEntity {
    id: u32,
    transform: Transform,
    physics: Option<Box<dyn EntityComponent>>,
}

impl ComponentEntity {
    pub fn new(id: u32, state: EntityState) -> Self {
        Self {
            id,
            transform: Transform {
                position: state.position,
            },
            physics: Some(Box::new(PhysicsComponent::new(state.velocity))),
        }
    }
}

impl Updatable for ComponentEntity {
    fn update(&mut self, dt: f32) {
        if let Some(physics) = self.physics.as_mut() {
            physics.update(&mut self.transform, dt);
        }
    }

    fn id(&self) -> u32 {
        self.id
    }

    fn position(&self) -> Vector3 {
        self.transform.position
    }
}
