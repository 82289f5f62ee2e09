//! Health and fall damage.
//!
//! Health is a scalar clamped to `[0, max]`. Damage arrives as
//! [`DamageMessage`]s from any source; the fall tracker records the height
//! the character was last grounded at and converts hard landings into
//! damage.

use bevy::log::{info, warn};
use bevy::prelude::*;

use crate::config::ControllerConfig;
use crate::controller::CharacterController;

/// Health scalar clamped to `[0, max]`.
#[derive(Component, Reflect, Debug, Clone, Copy)]
#[reflect(Component)]
pub struct Health {
    /// Current health.
    pub current: f32,
    /// Maximum health.
    pub max: f32,
}

impl Default for Health {
    fn default() -> Self {
        Self::new(100.0)
    }
}

impl Health {
    /// Create a health pool at full capacity.
    pub fn new(max: f32) -> Self {
        Self { current: max, max }
    }

    /// Subtract damage, clamping to `[0, max]`. Negative amounts heal.
    pub fn take_damage(&mut self, amount: f32) {
        self.current = (self.current - amount).clamp(0.0, self.max);
    }

    /// Fill ratio in `[0, 1]` for health-bar binding.
    pub fn ratio(&self) -> f32 {
        if self.max > 0.0 {
            self.current / self.max
        } else {
            0.0
        }
    }

    /// Whether health has reached zero.
    pub fn is_dead(&self) -> bool {
        self.current <= 0.0
    }
}

/// Tracks grounded transitions and the last grounded height for fall
/// damage.
#[derive(Component, Reflect, Debug, Clone, Copy, Default)]
#[reflect(Component)]
pub struct FallTracker {
    /// Whether the character was grounded last tick.
    pub was_grounded: bool,
    /// World Y the character was last standing at.
    pub last_grounded_height: f32,
}

/// Damage request for an entity with a [`Health`] component.
#[derive(Message, Debug, Clone, Copy)]
pub struct DamageMessage {
    /// The entity taking damage.
    pub entity: Entity,
    /// Damage amount.
    pub amount: f32,
}

/// Fired once when an entity's health reaches zero.
#[derive(Message, Debug, Clone, Copy)]
pub struct PlayerDied {
    /// The entity that died.
    pub entity: Entity,
}

/// Fall damage for a landing from `fall_height`, or `None` below the
/// threshold.
pub(crate) fn fall_damage(fall_height: f32, threshold: f32, multiplier: f32) -> Option<f32> {
    (fall_height > threshold).then(|| (fall_height - threshold) * multiplier)
}

/// Watch grounded transitions and emit damage for hard landings.
pub(crate) fn track_fall_damage(
    mut q_controllers: Query<(
        Entity,
        &Transform,
        &ControllerConfig,
        &CharacterController,
        &mut FallTracker,
    )>,
    mut damage: MessageWriter<DamageMessage>,
) {
    for (entity, transform, config, controller, mut tracker) in &mut q_controllers {
        let height = transform.translation.y;

        if controller.grounded {
            if !tracker.was_grounded && config.fall_damage.enabled {
                let fall_height = tracker.last_grounded_height - height;
                if let Some(amount) = fall_damage(
                    fall_height,
                    config.fall_damage.threshold,
                    config.fall_damage.damage_multiplier,
                ) {
                    damage.write(DamageMessage { entity, amount });
                }
            }
            tracker.was_grounded = true;
            tracker.last_grounded_height = height;
        } else {
            tracker.was_grounded = false;
        }
    }
}

/// Apply queued damage and fire [`PlayerDied`] on the transition to zero.
pub(crate) fn apply_damage(
    mut messages: MessageReader<DamageMessage>,
    mut q_health: Query<&mut Health>,
    mut died: MessageWriter<PlayerDied>,
) {
    for msg in messages.read() {
        let Ok(mut health) = q_health.get_mut(msg.entity) else {
            warn!("damage message for entity {:?} without Health", msg.entity);
            continue;
        };

        let was_dead = health.is_dead();
        health.take_damage(msg.amount);

        if health.is_dead() && !was_dead {
            info!("entity {:?} died", msg.entity);
            died.write(PlayerDied { entity: msg.entity });
        }
    }
}
