//! Avian3D physics backend implementation.
//!
//! This module provides the physics backend for Avian3D. Enable with the
//! `avian3d` feature (on by default).
//!
//! The backend contributes the sensor systems: ground, wall, and ceiling
//! raycasts plus the grapple aim ray, all using Avian's `SpatialQuery`.

use avian3d::prelude::*;
use bevy::prelude::*;

use crate::backend::CharacterPhysicsBackend;
use crate::config::ControllerConfig;
use crate::controller::CharacterController;
use crate::detection::SensorCast;
use crate::CharacterControllerSet;

/// Avian3D physics backend for the character controller.
///
/// Character bodies are dynamic with locked rotation; the controller owns
/// gravity, so Avian's is scaled to zero on the body. See
/// [`character_body`] for the component set.
pub struct Avian3dBackend;

impl CharacterPhysicsBackend for Avian3dBackend {
    type VelocityComponent = LinearVelocity;

    fn plugin() -> impl Plugin {
        Avian3dBackendPlugin
    }

    fn get_velocity(world: &World, entity: Entity) -> Vec3 {
        world
            .get::<LinearVelocity>(entity)
            .map(|v| v.0)
            .unwrap_or(Vec3::ZERO)
    }

    fn set_velocity(world: &mut World, entity: Entity, velocity: Vec3) {
        if let Some(mut vel) = world.get_mut::<LinearVelocity>(entity) {
            vel.0 = velocity;
        }
    }

    fn get_position(world: &World, entity: Entity) -> Vec3 {
        // Try Avian's Position component first, then fall back to Transform
        world
            .get::<Position>(entity)
            .map(|p| p.0)
            .or_else(|| world.get::<Transform>(entity).map(|t| t.translation))
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

    fn get_collision_groups(world: &World, entity: Entity) -> Option<(u32, u32)> {
        world
            .get::<CollisionLayers>(entity)
            .map(|cl| (cl.memberships.0, cl.filters.0))
    }

    fn set_capsule_height(world: &mut World, entity: Entity, height: f32) {
        let Some(collider) = world.get::<Collider>(entity) else {
            return;
        };
        let Some((radius, current_height)) = capsule_dimensions(collider) else {
            return;
        };
        if (current_height - height).abs() < 1e-3 {
            return;
        }
        let cylinder = (height - 2.0 * radius).max(0.01);
        if let Ok(mut entity_mut) = world.get_entity_mut(entity) {
            entity_mut.insert(Collider::capsule(radius, cylinder));
        }
    }
}

/// Physics components for a character body. Spawn these next to
/// [`CharacterController`] and [`ControllerConfig`].
pub fn character_body(radius: f32, config: &ControllerConfig) -> impl Bundle {
    let cylinder = (config.crouch.standing_height - 2.0 * radius).max(0.01);
    (
        RigidBody::Dynamic,
        Collider::capsule(radius, cylinder),
        LockedAxes::ROTATION_LOCKED,
        // The controller integrates its own gravity.
        GravityScale(0.0),
    )
}

/// Radius and total height of a capsule collider.
fn capsule_dimensions(collider: &Collider) -> Option<(f32, f32)> {
    let capsule = collider.shape_scaled().as_capsule()?;
    let segment_length = (capsule.segment.a.y - capsule.segment.b.y).abs();
    Some((capsule.radius, segment_length + 2.0 * capsule.radius))
}

/// Plugin that sets up Avian3D-specific sensor systems.
pub struct Avian3dBackendPlugin;

impl Plugin for Avian3dBackendPlugin {
    fn build(&self, app: &mut App) {
        // Ground detection runs first because it resets the per-tick sensor
        // state; the remaining sensors can run in parallel after it.
        app.add_systems(
            FixedUpdate,
            (
                avian_ground_sensor,
                (avian_wall_sensor, avian_ceiling_sensor, avian_aim_sensor),
            )
                .chain()
                .in_set(CharacterControllerSet::Sensors),
        );
    }
}

/// Perform a raycast through SpatialQuery, excluding the casting entity.
fn avian_raycast(
    spatial_query: &SpatialQuery,
    origin: Vec3,
    direction: Vec3,
    max_distance: f32,
    mask: u32,
    exclude_entity: Entity,
) -> Option<SensorCast> {
    let direction = Dir3::new(direction).ok()?;
    let filter =
        SpatialQueryFilter::from_mask(mask).with_excluded_entities([exclude_entity]);

    spatial_query
        .cast_ray(origin, direction, max_distance, true, &filter)
        .map(|hit| {
            let point = origin + *direction * hit.distance;
            SensorCast::hit(hit.distance, hit.normal, point, Some(hit.entity))
        })
}

/// Ground detection: a downward ray from the body center covering the lower
/// half of the capsule plus the configured margin.
fn avian_ground_sensor(
    spatial_query: SpatialQuery,
    mut q_controllers: Query<(
        Entity,
        &GlobalTransform,
        &ControllerConfig,
        &mut CharacterController,
    )>,
) {
    for (entity, transform, config, mut controller) in &mut q_controllers {
        controller.reset_sensors();

        let origin = transform.translation();
        let cast_length =
            controller.collider_height * 0.5 + config.fall_damage.ground_check_margin;

        controller.ground = avian_raycast(
            &spatial_query,
            origin,
            Vec3::NEG_Y,
            cast_length,
            config.fall_damage.ground_layers,
            entity,
        );
        controller.grounded = controller.ground.is_some();
    }
}

/// Wall detection: rays to the left and right of the body within the
/// configured wall distance.
fn avian_wall_sensor(
    spatial_query: SpatialQuery,
    mut q_controllers: Query<(
        Entity,
        &GlobalTransform,
        &ControllerConfig,
        &mut CharacterController,
    )>,
) {
    for (entity, transform, config, mut controller) in &mut q_controllers {
        if !config.wall_run.enabled {
            continue;
        }

        let origin = transform.translation();
        let right = controller.right();

        controller.right_wall = avian_raycast(
            &spatial_query,
            origin,
            right,
            config.wall_run.wall_distance,
            config.wall_run.wall_layers,
            entity,
        );
        controller.left_wall = avian_raycast(
            &spatial_query,
            origin,
            -right,
            config.wall_run.wall_distance,
            config.wall_run.wall_layers,
            entity,
        );
    }
}

/// Ceiling detection: an upward ray covering the headroom a standing capsule
/// would need. Used to block standing up under low ceilings.
fn avian_ceiling_sensor(
    spatial_query: SpatialQuery,
    mut q_controllers: Query<(
        Entity,
        &GlobalTransform,
        &ControllerConfig,
        &mut CharacterController,
    )>,
) {
    for (entity, transform, config, mut controller) in &mut q_controllers {
        let origin = transform.translation();
        let cast_length =
            config.crouch.standing_height + config.crouch.ceiling_clearance;

        controller.ceiling = avian_raycast(
            &spatial_query,
            origin,
            Vec3::Y,
            cast_length,
            u32::MAX,
            entity,
        );
    }
}

/// Grapple aim: a ray from the eye along the view direction against the
/// grapple layers, discarded when an obstruction sits in front of the hit.
fn avian_aim_sensor(
    spatial_query: SpatialQuery,
    mut q_controllers: Query<(
        Entity,
        &GlobalTransform,
        &ControllerConfig,
        &mut CharacterController,
    )>,
) {
    for (entity, transform, config, mut controller) in &mut q_controllers {
        let origin = transform.translation() + controller.eye_offset();
        let direction = controller.view_direction();

        let Some(hit) = avian_raycast(
            &spatial_query,
            origin,
            direction,
            config.grapple.max_distance,
            config.grapple.grapple_layers,
            entity,
        ) else {
            continue;
        };

        // A second ray against the obstruction layers over the same segment
        // must come up empty, otherwise something blocks the hook. The small
        // pull-back keeps the target surface itself from counting when it is
        // on both layers.
        if config.grapple.obstruction_layers != 0 {
            let blocked = avian_raycast(
                &spatial_query,
                origin,
                direction,
                (hit.distance - 0.01).max(0.0),
                config.grapple.obstruction_layers,
                entity,
            )
            .is_some();
            if blocked {
                continue;
            }
        }

        controller.aim = Some(hit);
    }
}
