//! Detection result structures.
//!
//! These structures hold the results of physics queries (raycasts) used
//! for ground detection, wall detection, ceiling detection, and grapple
//! aiming.

use bevy::prelude::*;

/// Information about a raycast result.
#[derive(Reflect, Debug, Clone, Copy, Default)]
pub struct SensorCast {
    /// Whether the raycast hit something.
    pub hit: bool,
    /// Distance to the hit point (if hit).
    pub distance: f32,
    /// Normal of the surface at hit point.
    pub normal: Vec3,
    /// World position of the hit point.
    pub point: Vec3,
    /// Entity that was hit (if any).
    pub entity: Option<Entity>,
}

impl SensorCast {
    /// Create an empty (no hit) result.
    pub fn miss() -> Self {
        Self::default()
    }

    /// Create a hit result.
    pub fn hit(distance: f32, normal: Vec3, point: Vec3, entity: Option<Entity>) -> Self {
        Self {
            hit: true,
            distance,
            normal,
            point,
            entity,
        }
    }
}
