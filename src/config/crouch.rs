//! Configuration for crouching.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Configuration for crouching.
#[derive(Reflect, Serialize, Deserialize, Debug, Clone, Copy)]
pub struct CrouchConfig {
    /// Collider height while standing (world units).
    pub standing_height: f32,

    /// Collider height while crouched (world units).
    pub crouch_height: f32,

    /// Interpolation rate between heights, as the fraction of the remaining
    /// distance covered per second. At the default of 5.0 the transition
    /// settles in roughly a second; higher values snap faster.
    pub transition_speed: f32,

    /// Extra headroom above the standing height that must be clear of
    /// ceiling before the character may stand back up.
    pub ceiling_clearance: f32,
}

impl Default for CrouchConfig {
    fn default() -> Self {
        Self {
            standing_height: 2.0,
            crouch_height: 1.0,
            transition_speed: 5.0,
            ceiling_clearance: 0.05,
        }
    }
}
