//! Movement intent components.
//!
//! Intents represent the desired movement from player input or AI. The host
//! application polls its input devices and writes intents; the controller
//! systems read them each fixed tick and apply the appropriate motion.
//!
//! Continuous axes (`walk`, `look`) are cleared by the controller after each
//! fixed tick, so the host should re-accumulate them every frame. Edge flags
//! (`crouch`, `grapple_pressed`, ...) are likewise consumed once per tick.

use bevy::prelude::*;

/// Unified movement intent for a first-person character.
///
/// # Example
///
/// ```rust
/// use fps_character_controller::prelude::*;
///
/// let mut intent = MovementIntent::new();
/// intent.set_walk(bevy::math::Vec2::new(0.0, 1.0));
/// assert!(intent.is_walking());
///
/// intent.press_grapple();
/// assert!(intent.grapple_pressed);
///
/// intent.clear_edges();
/// assert!(!intent.grapple_pressed);
/// ```
#[derive(Component, Reflect, Debug, Clone, Copy, Default)]
#[reflect(Component)]
pub struct MovementIntent {
    /// Planar movement axes relative to the body: `x` = strafe right,
    /// `y` = forward. Clamped to the unit disc.
    pub walk: Vec2,
    /// Accumulated look delta for this tick: `x` = turn right, `y` = look up
    /// (before sensitivity scaling).
    pub look: Vec2,
    /// Whether the sprint modifier is held.
    pub sprint: bool,
    /// Edge flag: a crouch toggle was requested.
    pub crouch: bool,
    /// Whether the grapple key is currently held.
    pub grapple_held: bool,
    /// Edge flag: the grapple key was pressed this tick.
    pub grapple_pressed: bool,
    /// Edge flag: the grapple key was released this tick.
    pub grapple_released: bool,
    /// Edge flag: a pause toggle was requested.
    pub pause: bool,
}

impl MovementIntent {
    /// Create a new empty movement intent.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the planar movement axes, clamped to the unit disc.
    pub fn set_walk(&mut self, axes: Vec2) {
        self.walk = axes.clamp_length_max(1.0);
    }

    /// Accumulate a look delta (e.g. mouse motion since last frame).
    pub fn add_look(&mut self, delta: Vec2) {
        self.look += delta;
    }

    /// Register a grapple key press.
    pub fn press_grapple(&mut self) {
        self.grapple_pressed = true;
        self.grapple_held = true;
    }

    /// Register a grapple key release.
    pub fn release_grapple(&mut self) {
        self.grapple_released = true;
        self.grapple_held = false;
    }

    /// Request a crouch toggle.
    pub fn toggle_crouch(&mut self) {
        self.crouch = true;
    }

    /// Request a pause toggle.
    pub fn toggle_pause(&mut self) {
        self.pause = true;
    }

    /// Clear edge flags and per-tick accumulators.
    ///
    /// Called by the controller at the end of each fixed tick; hosts only
    /// need this when discarding buffered input (e.g. when pausing).
    ///
    /// The `pause` edge is exempt: it is consumed by the pause-toggle
    /// system, which runs outside the fixed loop.
    pub fn clear_edges(&mut self) {
        self.look = Vec2::ZERO;
        self.crouch = false;
        self.grapple_pressed = false;
        self.grapple_released = false;
    }

    /// Check if there is active walking input.
    pub fn is_walking(&self) -> bool {
        self.walk.length_squared() > 1e-6
    }
}

/// Jump request component.
///
/// Add this component to request a jump. The controller will consume
/// this request and attempt to execute a jump (or start a wall run)
/// if conditions allow.
#[derive(Component, Reflect, Debug, Clone, Copy, Default)]
#[reflect(Component)]
pub struct JumpRequest {
    /// Whether a jump is currently requested.
    pub requested: bool,
    /// Time the request was made (for jump buffering).
    pub request_time: f32,
    /// Whether this request has been consumed.
    pub consumed: bool,
}

impl JumpRequest {
    /// Request a jump.
    pub fn request(&mut self, current_time: f32) {
        if !self.requested {
            self.requested = true;
            self.request_time = current_time;
            self.consumed = false;
        }
    }

    /// Check if the request is valid (not consumed and within buffer time).
    pub fn is_valid(&self, current_time: f32, buffer_time: f32) -> bool {
        self.requested && !self.consumed && (current_time - self.request_time) < buffer_time
    }

    /// Consume the jump request.
    pub fn consume(&mut self) {
        self.consumed = true;
    }

    /// Reset the request.
    pub fn reset(&mut self) {
        self.requested = false;
        self.consumed = false;
    }
}

/// Clears per-tick intent state after the controller has consumed it.
///
/// Registered in the final application phase so edges survive exactly one
/// fixed tick.
pub(crate) fn clear_intent_edges(mut q_intents: Query<(&mut MovementIntent, &mut JumpRequest)>) {
    for (mut intent, mut jump) in &mut q_intents {
        intent.clear_edges();
        if jump.consumed {
            jump.reset();
        }
    }
}
