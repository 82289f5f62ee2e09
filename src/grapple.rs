//! Grappling hook traversal.
//!
//! Attach/pull/detach state machine. The aim sensor (backend) writes the
//! current crosshair target into the controller; this module consumes it on
//! a grapple press, pulls the character toward the point, and hands off to
//! the gravity-blend recovery state when the pull ends.
//!
//! The rope itself is exposed as data through [`GrappleRope`] so the host
//! can render it however it likes (line mesh, gizmo, ...).

use bevy::prelude::*;

use crate::config::ControllerConfig;
use crate::controller::{CharacterController, TraversalState};
use crate::intent::MovementIntent;

/// Rope endpoints for host-side rendering. Updated every tick while a
/// grapple is active.
#[derive(Component, Reflect, Debug, Clone, Copy, Default)]
#[reflect(Component)]
pub struct GrappleRope {
    /// Whether the rope should be drawn.
    pub active: bool,
    /// Rope start, at the character.
    pub start: Vec3,
    /// Rope end, at the grapple point.
    pub end: Vec3,
}

/// Velocity that pulls the character from `position` toward `point`.
///
/// Returns `None` when the two coincide and no direction exists.
pub(crate) fn pull_velocity(position: Vec3, point: Vec3, speed: f32) -> Option<Vec3> {
    (point - position).try_normalize().map(|dir| dir * speed)
}

/// Grapple state machine: attach on press, pull while attached, detach on
/// release or on reaching the target.
pub(crate) fn update_grapple(
    mut q_controllers: Query<(
        &Transform,
        &MovementIntent,
        &ControllerConfig,
        &mut CharacterController,
        &mut GrappleRope,
    )>,
) {
    for (transform, intent, config, mut controller, mut rope) in &mut q_controllers {
        // Attach takes priority over everything but an already-active
        // grapple. It cancels a running wall run.
        if intent.grapple_pressed && !controller.is_grappling() {
            if let Some(aim) = controller.aim {
                controller.traversal = TraversalState::Grappling { point: aim.point };
                // Kill vertical velocity so the pull starts clean.
                controller.velocity.y = 0.0;
            }
        }

        let TraversalState::Grappling { point } = controller.traversal else {
            rope.active = false;
            continue;
        };

        if intent.grapple_released {
            controller.traversal = TraversalState::Normal;
            rope.active = false;
            continue;
        }

        let position = transform.translation;
        let distance = position.distance(point);

        if distance < config.grapple.detach_radius {
            // Arrived: pop upward to carry the character over the ledge,
            // then blend gravity back in.
            controller.traversal = TraversalState::GrappleRecovery;
            controller.velocity = Vec3::Y * config.grapple.jump_force;
            rope.active = false;
            continue;
        }

        match pull_velocity(position, point, config.grapple.speed) {
            Some(velocity) => controller.velocity = velocity,
            None => controller.velocity = Vec3::ZERO,
        }

        rope.active = true;
        rope.start = position;
        rope.end = point;
    }
}
