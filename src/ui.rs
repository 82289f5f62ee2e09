//! UI binding data.
//!
//! The controller does not draw anything; it keeps crosshair and health-bar
//! state up to date on plain components that the host binds to its own UI
//! widgets.

use bevy::prelude::*;

use crate::controller::CharacterController;
use crate::health::Health;

/// Crosshair appearance settings.
#[derive(Resource, Reflect, Debug, Clone)]
#[reflect(Resource)]
pub struct CrosshairSettings {
    /// Crosshair size in UI units.
    pub size: f32,
    /// Color when not aiming at anything grappleable.
    pub default_color: Color,
    /// Color when aiming at an unobstructed grappleable surface.
    pub target_color: Color,
}

impl Default for CrosshairSettings {
    fn default() -> Self {
        Self {
            size: 16.0,
            default_color: Color::WHITE,
            target_color: Color::srgb(0.0, 1.0, 0.0),
        }
    }
}

/// Crosshair state for the host's crosshair widget.
#[derive(Component, Reflect, Debug, Clone, Default)]
#[reflect(Component)]
pub struct Crosshair {
    /// Active color, driven by the aim sensor.
    pub color: Color,
    /// Active size, mirrored from [`CrosshairSettings`].
    pub size: f32,
}

/// Fill ratio for the host's health-bar widget, in `[0, 1]`.
#[derive(Component, Reflect, Debug, Clone, Copy, Default)]
#[reflect(Component)]
pub struct HealthBarFill(pub f32);

/// Color the crosshair by whether the aim sensor has a grapple target.
pub(crate) fn update_crosshair(
    settings: Res<CrosshairSettings>,
    q_controllers: Query<&CharacterController>,
    mut q_crosshairs: Query<&mut Crosshair>,
) {
    let Ok(controller) = q_controllers.single() else {
        return;
    };

    let color = if controller.aim.is_some() {
        settings.target_color
    } else {
        settings.default_color
    };

    for mut crosshair in &mut q_crosshairs {
        crosshair.color = color;
        crosshair.size = settings.size;
    }
}

/// Mirror the character's health ratio onto health-bar widgets.
pub(crate) fn update_health_bar(
    q_health: Query<&Health, With<CharacterController>>,
    mut q_bars: Query<&mut HealthBarFill>,
) {
    let Ok(health) = q_health.single() else {
        return;
    };

    for mut bar in &mut q_bars {
        bar.0 = health.ratio().clamp(0.0, 1.0);
    }
}
