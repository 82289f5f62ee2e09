//! Configuration for wall running.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Configuration for wall running.
#[derive(Reflect, Serialize, Deserialize, Debug, Clone, Copy)]
pub struct WallRunConfig {
    /// Whether wall running is enabled.
    pub enabled: bool,

    /// Speed of movement along the wall (units/second).
    pub speed: f32,

    /// Maximum duration of a wall run (seconds).
    pub duration: f32,

    /// Distance from the body at which side sensors detect walls.
    pub wall_distance: f32,

    /// Gravity multiplier while wall running (0.0-1.0).
    pub gravity_multiplier: f32,

    /// Collision layer mask for runnable walls.
    pub wall_layers: u32,
}

impl Default for WallRunConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            speed: 10.0,
            duration: 2.0,
            wall_distance: 1.5,
            gravity_multiplier: 0.1,
            wall_layers: u32::MAX,
        }
    }
}
