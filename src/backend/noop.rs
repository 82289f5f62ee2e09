//! Backend for headless use and tests.
//!
//! `NoopBackend` stores velocity in a plain [`KinematicVelocity`] component
//! and integrates the transform itself, with no collision resolution. The
//! sensor systems are not provided; tests drive sensor state directly.

use bevy::prelude::*;

use super::CharacterPhysicsBackend;
use crate::controller::CharacterController;
use crate::CharacterControllerSet;

/// Velocity component used by [`NoopBackend`].
#[derive(Component, Reflect, Debug, Clone, Copy, Default)]
#[reflect(Component)]
pub struct KinematicVelocity(pub Vec3);

/// Physics backend with no physics engine behind it.
pub struct NoopBackend;

impl CharacterPhysicsBackend for NoopBackend {
    type VelocityComponent = KinematicVelocity;

    fn plugin() -> impl Plugin {
        NoopBackendPlugin
    }

    fn get_velocity(world: &World, entity: Entity) -> Vec3 {
        world
            .get::<KinematicVelocity>(entity)
            .map(|v| v.0)
            .unwrap_or(Vec3::ZERO)
    }

    fn set_velocity(world: &mut World, entity: Entity, velocity: Vec3) {
        if let Some(mut vel) = world.get_mut::<KinematicVelocity>(entity) {
            vel.0 = velocity;
        }
    }

    fn get_position(world: &World, entity: Entity) -> Vec3 {
        world
            .get::<Transform>(entity)
            .map(|t| t.translation)
            .or_else(|| {
                world
                    .get::<GlobalTransform>(entity)
                    .map(|t| t.translation())
            })
            .unwrap_or(Vec3::ZERO)
    }

    fn get_fixed_timestep(world: &World) -> f32 {
        world
            .get_resource::<Time<Fixed>>()
            .map(|t| t.delta_secs())
            .filter(|&d| d > 0.0)
            .unwrap_or(1.0 / 60.0)
    }
}

/// Plugin that integrates [`KinematicVelocity`] into the transform each
/// fixed tick.
pub struct NoopBackendPlugin;

impl Plugin for NoopBackendPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<KinematicVelocity>();
        app.add_systems(
            FixedUpdate,
            integrate_kinematic_velocity.after(CharacterControllerSet::FinalApplication),
        );
    }
}

fn integrate_kinematic_velocity(
    time: Res<Time>,
    mut q_bodies: Query<(&KinematicVelocity, &mut Transform), With<CharacterController>>,
) {
    for (velocity, mut transform) in &mut q_bodies {
        transform.translation += velocity.0 * time.delta_secs();
    }
}
