//! Wall running.
//!
//! A jump press while airborne and touching a side wall starts a timed run
//! along the wall with reduced gravity. The run ends when the timer expires
//! or wall contact is lost.

use bevy::prelude::*;

use crate::config::ControllerConfig;
use crate::controller::{CharacterController, TraversalState};
use crate::intent::JumpRequest;

/// Direction along the wall, chosen to match the way the character faces.
pub(crate) fn wall_run_direction(wall_normal: Vec3, forward: Vec3) -> Option<Vec3> {
    let along = wall_normal.cross(Vec3::Y).try_normalize()?;
    if along.dot(forward) < 0.0 {
        Some(-along)
    } else {
        Some(along)
    }
}

/// Wall run state machine.
pub(crate) fn update_wall_run(
    time: Res<Time>,
    mut q_controllers: Query<(
        &ControllerConfig,
        &mut CharacterController,
        &mut JumpRequest,
    )>,
) {
    let now = time.elapsed_secs();
    let dt = time.delta_secs();

    for (config, mut controller, mut jump) in &mut q_controllers {
        if !config.wall_run.enabled {
            continue;
        }

        match controller.traversal {
            TraversalState::Normal => {
                // Airborne jump press next to a wall starts the run. Ground
                // jumps keep their request for the locomotion system.
                if controller.grounded
                    || !jump.is_valid(now, config.movement.jump_buffer_time)
                {
                    continue;
                }
                let Some(wall) = controller.touched_wall().copied() else {
                    continue;
                };
                jump.consume();
                controller.traversal = TraversalState::WallRunning {
                    normal: wall.normal,
                    time_remaining: config.wall_run.duration,
                };
            }
            TraversalState::WallRunning {
                normal,
                time_remaining,
            } => {
                let remaining = time_remaining - dt;
                let contact = controller.touched_wall().copied();

                if remaining <= 0.0 || contact.is_none() {
                    controller.traversal = TraversalState::Normal;
                    continue;
                }

                // Track the live sensor normal so curved walls steer the run.
                let normal = contact.map_or(normal, |wall| wall.normal);
                controller.traversal = TraversalState::WallRunning {
                    normal,
                    time_remaining: remaining,
                };

                let forward = controller.forward();
                if let Some(along) = wall_run_direction(normal, forward) {
                    let lateral = along * config.wall_run.speed;
                    controller.velocity.x = lateral.x;
                    controller.velocity.z = lateral.z;
                }
            }
            _ => {}
        }
    }
}
