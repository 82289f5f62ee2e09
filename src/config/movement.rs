//! Configuration for ground movement and jumping.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Configuration for ground movement and jumping.
#[derive(Reflect, Serialize, Deserialize, Debug, Clone, Copy)]
pub struct MovementConfig {
    /// Normal movement speed (units/second).
    pub move_speed: f32,

    /// Speed multiplier while the sprint modifier is held.
    pub sprint_multiplier: f32,

    /// Movement speed while crouched (units/second).
    pub crouch_speed: f32,

    /// Apex height of a jump (world units). The jump impulse is derived as
    /// `sqrt(2 * jump_height * |gravity|)`.
    pub jump_height: f32,

    /// Jump buffer duration in seconds.
    pub jump_buffer_time: f32,

    /// Gravity acceleration (units/second^2, negative = down).
    pub gravity: f32,

    /// Small downward velocity held while grounded so the character stays
    /// pressed to the floor.
    pub grounded_stick_velocity: f32,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            move_speed: 5.0,
            sprint_multiplier: 2.0,
            crouch_speed: 2.5,
            jump_height: 2.0,
            jump_buffer_time: 0.1,
            gravity: -9.81,
            grounded_stick_velocity: -2.0,
        }
    }
}
