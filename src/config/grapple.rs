//! Configuration for the grappling hook.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Configuration for the grappling hook.
#[derive(Reflect, Serialize, Deserialize, Debug, Clone, Copy)]
pub struct GrappleConfig {
    /// Maximum aim/attach distance of the grappling hook (world units).
    pub max_distance: f32,

    /// Speed at which the character is pulled to the grapple point
    /// (units/second).
    pub speed: f32,

    /// Distance to the grapple point at which the pull ends.
    pub detach_radius: f32,

    /// Upward velocity applied when the pull ends, to carry the character
    /// over the edge it grappled to.
    pub jump_force: f32,

    /// Rate at which vertical velocity blends back to free fall after a
    /// grapple ends (per second).
    pub gravity_lerp_speed: f32,

    /// Vertical velocity the post-grapple blend converges to
    /// (units/second, negative = down).
    pub blend_fall_speed: f32,

    /// Collision layer mask for grappleable surfaces.
    pub grapple_layers: u32,

    /// Collision layer mask for obstacles that block the grapple.
    pub obstruction_layers: u32,
}

impl Default for GrappleConfig {
    fn default() -> Self {
        Self {
            max_distance: 20.0,
            speed: 10.0,
            detach_radius: 1.0,
            jump_force: 5.0,
            gravity_lerp_speed: 2.0,
            blend_fall_speed: -9.8,
            grapple_layers: u32::MAX,
            obstruction_layers: 0,
        }
    }
}
