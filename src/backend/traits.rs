//! Physics backend abstraction.
//!
//! This module defines the trait that physics backends must implement
//! to work with the character controller. This allows easy swapping
//! between physics engines (Avian, Rapier, custom, etc.).

use bevy::prelude::*;

/// Trait for physics backend implementations.
///
/// The generic controller systems use these accessors from exclusive
/// systems; backend-specific work that needs engine system parameters
/// (spatial queries for the sensors) lives in the plugin returned by
/// [`CharacterPhysicsBackend::plugin`].
pub trait CharacterPhysicsBackend: 'static + Send + Sync {
    /// The velocity component type used by this backend.
    type VelocityComponent: Component;

    /// Returns the plugin that sets up this backend. The plugin is expected
    /// to register the sensor systems in
    /// [`CharacterControllerSet::Sensors`](crate::CharacterControllerSet::Sensors).
    fn plugin() -> impl Plugin;

    /// Get the current velocity of an entity.
    fn get_velocity(world: &World, entity: Entity) -> Vec3;

    /// Set the velocity of an entity.
    fn set_velocity(world: &mut World, entity: Entity, velocity: Vec3);

    /// Get the current position of an entity.
    fn get_position(world: &World, entity: Entity) -> Vec3;

    /// Get the fixed timestep delta time.
    fn get_fixed_timestep(world: &World) -> f32;

    /// Get the collision groups for an entity (memberships, filters).
    /// Returns None if the entity doesn't have collision groups.
    fn get_collision_groups(_world: &World, _entity: Entity) -> Option<(u32, u32)> {
        None
    }

    /// Resize the entity's capsule collider to the given total height,
    /// keeping its radius. Used by the crouch transition. Backends without
    /// resizable colliders may ignore this.
    fn set_capsule_height(_world: &mut World, _entity: Entity, _height: f32) {}
}
