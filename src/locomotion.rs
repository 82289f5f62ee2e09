//! Core locomotion: look, walk, jump, gravity, crouch.
//!
//! These systems only steer [`TraversalState::Normal`] and the post-grapple
//! recovery; the grapple and wall-run state machines own the velocity while
//! they are active.

use bevy::prelude::*;

use crate::config::ControllerConfig;
use crate::controller::{CharacterController, TraversalState};
use crate::intent::{JumpRequest, MovementIntent};

/// Initial vertical velocity that reaches `jump_height` under `gravity`.
pub(crate) fn jump_velocity(jump_height: f32, gravity: f32) -> f32 {
    (2.0 * jump_height * -gravity).max(0.0).sqrt()
}

/// Move `current` toward `target` at `rate` per second, snapping when close.
pub(crate) fn approach(current: f32, target: f32, rate: f32, dt: f32) -> f32 {
    let t = (rate * dt).clamp(0.0, 1.0);
    let next = current + (target - current) * t;
    if (next - target).abs() < 0.01 {
        target
    } else {
        next
    }
}

/// Apply look input: yaw rotates the body, pitch is stored for the camera
/// rig and clamped to the configured limit.
pub(crate) fn apply_look(
    mut q_controllers: Query<(
        &MovementIntent,
        &ControllerConfig,
        &mut CharacterController,
        &mut Transform,
    )>,
) {
    for (intent, config, mut controller, mut transform) in &mut q_controllers {
        let sensitivity = config.look.sensitivity;
        let invert = if config.look.invert_y { -1.0 } else { 1.0 };

        controller.yaw -= intent.look.x * sensitivity;
        controller.pitch = (controller.pitch + intent.look.y * sensitivity * invert)
            .clamp(-config.look.pitch_limit, config.look.pitch_limit);

        transform.rotation = Quat::from_rotation_y(controller.yaw);
    }
}

/// Crouch toggle and height interpolation.
///
/// Standing back up is deferred while the ceiling sensor reports too little
/// headroom for the standing capsule.
pub(crate) fn update_crouch(
    time: Res<Time>,
    mut q_controllers: Query<(
        &MovementIntent,
        &ControllerConfig,
        &mut CharacterController,
    )>,
) {
    let dt = time.delta_secs();

    for (intent, config, mut controller) in &mut q_controllers {
        if intent.crouch {
            if controller.crouching {
                if headroom_clear(&controller, &config.crouch) {
                    controller.crouching = false;
                }
            } else {
                controller.crouching = true;
            }
        }

        let target = if controller.crouching {
            config.crouch.crouch_height
        } else {
            config.crouch.standing_height
        };

        // Growing back up also waits for headroom, in case the ceiling
        // arrived after the toggle.
        if target > controller.collider_height && !headroom_clear(&controller, &config.crouch) {
            continue;
        }

        controller.collider_height = approach(
            controller.collider_height,
            target,
            config.crouch.transition_speed,
            dt,
        );
    }
}

/// Whether there is room above the body center for the standing capsule.
fn headroom_clear(
    controller: &CharacterController,
    crouch: &crate::config::CrouchConfig,
) -> bool {
    let needed = crouch.standing_height - controller.collider_height * 0.5 + crouch.ceiling_clearance;
    match &controller.ceiling {
        Some(ceiling) => ceiling.distance >= needed,
        None => true,
    }
}

/// Horizontal movement relative to body yaw, with sprint and crouch speeds.
pub(crate) fn apply_walk(
    mut q_controllers: Query<(
        &MovementIntent,
        &ControllerConfig,
        &mut CharacterController,
    )>,
) {
    for (intent, config, mut controller) in &mut q_controllers {
        if !matches!(
            controller.traversal,
            TraversalState::Normal | TraversalState::GrappleRecovery
        ) {
            continue;
        }

        let speed = if controller.crouching {
            config.movement.crouch_speed
        } else if intent.sprint {
            config.movement.move_speed * config.movement.sprint_multiplier
        } else {
            config.movement.move_speed
        };

        let direction = controller.right() * intent.walk.x + controller.forward() * intent.walk.y;
        controller.velocity.x = direction.x * speed;
        controller.velocity.z = direction.z * speed;
    }
}

/// Jumping and gravity integration, per traversal state.
pub(crate) fn apply_jump_and_gravity(
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
        match controller.traversal {
            TraversalState::Normal => {
                if controller.grounded && controller.velocity.y < 0.0 {
                    controller.velocity.y = config.movement.grounded_stick_velocity;
                }
                if controller.grounded
                    && jump.is_valid(now, config.movement.jump_buffer_time)
                {
                    jump.consume();
                    controller.velocity.y =
                        jump_velocity(config.movement.jump_height, config.movement.gravity);
                }
                controller.velocity.y += config.movement.gravity * dt;
            }
            TraversalState::GrappleRecovery => {
                // Blend from the post-grapple pop back into free fall.
                let target = config.grapple.blend_fall_speed;
                let t = (config.grapple.gravity_lerp_speed * dt).clamp(0.0, 1.0);
                controller.velocity.y += (target - controller.velocity.y) * t;
                if (controller.velocity.y - target).abs() < 0.1 {
                    controller.traversal = TraversalState::Normal;
                }
            }
            TraversalState::WallRunning { .. } => {
                controller.velocity.y +=
                    config.movement.gravity * config.wall_run.gravity_multiplier * dt;
            }
            TraversalState::Grappling { .. } => {
                // Velocity is owned by the grapple pull.
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn jump_velocity_reaches_height() {
        // v = sqrt(2gh); rising under constant g peaks at exactly h.
        let g: f32 = -9.81;
        let v = jump_velocity(2.0, g);
        let peak = v * v / (2.0 * -g);
        assert_relative_eq!(peak, 2.0, epsilon = 1e-4);
    }

    #[test]
    fn jump_velocity_degenerate_gravity() {
        assert_eq!(jump_velocity(2.0, 0.0), 0.0);
    }

    #[test]
    fn approach_converges_and_snaps() {
        let mut h = 2.0;
        for _ in 0..200 {
            h = approach(h, 1.0, 5.0, 1.0 / 60.0);
        }
        assert_eq!(h, 1.0);
    }

    #[test]
    fn approach_does_not_overshoot() {
        let h = approach(2.0, 1.0, 5.0, 10.0);
        assert_eq!(h, 1.0);
    }
}
