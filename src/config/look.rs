//! Configuration for mouse look.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Configuration for mouse look.
#[derive(Reflect, Serialize, Deserialize, Debug, Clone, Copy)]
pub struct LookConfig {
    /// Look sensitivity (radians per input unit).
    pub sensitivity: f32,

    /// Maximum pitch magnitude (radians). Clamped to prevent a full flip.
    pub pitch_limit: f32,

    /// Invert the vertical look axis.
    pub invert_y: bool,
}

impl Default for LookConfig {
    fn default() -> Self {
        Self {
            sensitivity: 0.002,
            pitch_limit: std::f32::consts::FRAC_PI_2,
            invert_y: false,
        }
    }
}
