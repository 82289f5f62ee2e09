//! Configuration for fall damage and ground checks.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Configuration for fall damage and ground checks.
#[derive(Reflect, Serialize, Deserialize, Debug, Clone, Copy)]
pub struct FallDamageConfig {
    /// Whether fall damage is applied.
    pub enabled: bool,

    /// Minimum fall height (world units) before damage is taken.
    pub threshold: f32,

    /// Damage per unit of fall height beyond the threshold.
    pub damage_multiplier: f32,

    /// Extra distance below the collider bottom within which the character
    /// counts as grounded.
    pub ground_check_margin: f32,

    /// Collision layer mask for ground detection.
    pub ground_layers: u32,
}

impl Default for FallDamageConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            threshold: 10.0,
            damage_multiplier: 2.0,
            ground_check_margin: 0.1,
            ground_layers: u32::MAX,
        }
    }
}
