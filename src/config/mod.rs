//! Controller configuration.
//!
//! Tunable parameters are grouped per concern and aggregated into a single
//! [`ControllerConfig`] component attached to the character entity. Configs
//! are plain data: they can be built in code, reflected in an editor, or
//! loaded from JSON via [`ControllerConfig::from_json`].

mod crouch;
mod fall_damage;
mod grapple;
mod look;
mod movement;
mod wall_run;

pub use crouch::CrouchConfig;
pub use fall_damage::FallDamageConfig;
pub use grapple::GrappleConfig;
pub use look::LookConfig;
pub use movement::MovementConfig;
pub use wall_run::WallRunConfig;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error produced when a controller configuration is invalid or fails to
/// parse.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A parameter that must be strictly positive was zero or negative.
    #[error("`{field}` must be positive, got {value}")]
    NonPositive {
        /// Name of the offending field.
        field: &'static str,
        /// The rejected value.
        value: f32,
    },
    /// A parameter pair violated an ordering constraint.
    #[error("`{lesser}` ({lesser_value}) must be smaller than `{greater}` ({greater_value})")]
    Ordering {
        /// Name of the field that must be smaller.
        lesser: &'static str,
        /// Its value.
        lesser_value: f32,
        /// Name of the field that must be greater.
        greater: &'static str,
        /// Its value.
        greater_value: f32,
    },
    /// Gravity must point downward.
    #[error("`gravity` must be negative, got {0}")]
    NonNegativeGravity(f32),
    /// The JSON document could not be parsed.
    #[error("failed to parse controller config")]
    Parse(#[from] serde_json::Error),
}

/// Aggregate configuration for the character controller.
///
/// Attach this next to
/// [`CharacterController`](crate::controller::CharacterController); every
/// controller system reads its parameters from here.
#[derive(Component, Reflect, Serialize, Deserialize, Debug, Clone, Default)]
#[reflect(Component)]
#[serde(default)]
pub struct ControllerConfig {
    /// Ground movement and jumping.
    pub movement: MovementConfig,
    /// Mouse look.
    pub look: LookConfig,
    /// Crouching.
    pub crouch: CrouchConfig,
    /// Grappling hook.
    pub grapple: GrappleConfig,
    /// Wall running.
    pub wall_run: WallRunConfig,
    /// Fall damage and ground checks.
    pub fall_damage: FallDamageConfig,
}

impl ControllerConfig {
    /// Parse a configuration from a JSON document and validate it.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the configuration for values the controller cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
            if value > 0.0 {
                Ok(())
            } else {
                Err(ConfigError::NonPositive { field, value })
            }
        }

        positive("movement.move_speed", self.movement.move_speed)?;
        positive("movement.sprint_multiplier", self.movement.sprint_multiplier)?;
        positive("movement.crouch_speed", self.movement.crouch_speed)?;
        positive("movement.jump_height", self.movement.jump_height)?;
        positive("look.sensitivity", self.look.sensitivity)?;
        positive("crouch.standing_height", self.crouch.standing_height)?;
        positive("crouch.crouch_height", self.crouch.crouch_height)?;
        positive("crouch.transition_speed", self.crouch.transition_speed)?;
        positive("grapple.max_distance", self.grapple.max_distance)?;
        positive("grapple.speed", self.grapple.speed)?;
        positive("grapple.detach_radius", self.grapple.detach_radius)?;
        positive("wall_run.speed", self.wall_run.speed)?;
        positive("wall_run.duration", self.wall_run.duration)?;
        positive("wall_run.wall_distance", self.wall_run.wall_distance)?;

        if self.movement.gravity >= 0.0 {
            return Err(ConfigError::NonNegativeGravity(self.movement.gravity));
        }

        if self.crouch.crouch_height >= self.crouch.standing_height {
            return Err(ConfigError::Ordering {
                lesser: "crouch.crouch_height",
                lesser_value: self.crouch.crouch_height,
                greater: "crouch.standing_height",
                greater_value: self.crouch.standing_height,
            });
        }

        Ok(())
    }
}
