//! Character controller state.
//!
//! [`CharacterController`] is the central component: sensor systems write
//! raycast results into it, the state-machine systems drive
//! [`TraversalState`], and the locomotion systems turn both into an output
//! velocity that the backend applies to the physics body.

use bevy::prelude::*;

use crate::detection::SensorCast;
use crate::health::{FallTracker, Health};
use crate::intent::{JumpRequest, MovementIntent};
use crate::grapple::GrappleRope;

/// Exclusive traversal states of the character.
///
/// Grappling and wall running never overlap: attaching the grapple cancels a
/// wall run, and a wall run can only start from [`TraversalState::Normal`].
#[derive(Reflect, Debug, Clone, Copy, PartialEq, Default)]
pub enum TraversalState {
    /// Regular ground/air locomotion.
    #[default]
    Normal,
    /// Being pulled toward a grapple point.
    Grappling {
        /// World-space target the hook is attached to.
        point: Vec3,
    },
    /// Post-grapple state: gravity is blended back in gradually.
    GrappleRecovery,
    /// Running along a wall.
    WallRunning {
        /// Surface normal of the wall being run on.
        normal: Vec3,
        /// Seconds of wall run remaining.
        time_remaining: f32,
    },
}

/// Central character controller component.
///
/// Requires the intent, health, and rope components; spawning just a
/// `CharacterController` and a
/// [`ControllerConfig`](crate::config::ControllerConfig) is enough to get a
/// working character.
#[derive(Component, Reflect, Debug, Clone)]
#[reflect(Component)]
#[require(MovementIntent, JumpRequest, Health, FallTracker, GrappleRope)]
pub struct CharacterController {
    /// Velocity to be applied to the physics body this tick.
    pub velocity: Vec3,
    /// Whether the ground sensor currently reports contact.
    pub grounded: bool,
    /// Body yaw in radians (rotation about +Y).
    pub yaw: f32,
    /// View pitch in radians, clamped by the look config. Positive looks up.
    pub pitch: f32,
    /// Current collider height. Interpolates between the crouch and standing
    /// heights.
    pub collider_height: f32,
    /// Whether the crouch height is the current target.
    pub crouching: bool,
    /// Active traversal state.
    pub traversal: TraversalState,
    /// Ground sensor result for this tick.
    pub ground: Option<SensorCast>,
    /// Left wall sensor result for this tick.
    pub left_wall: Option<SensorCast>,
    /// Right wall sensor result for this tick.
    pub right_wall: Option<SensorCast>,
    /// Ceiling sensor result for this tick.
    pub ceiling: Option<SensorCast>,
    /// Grapple aim result for this tick: a grappleable, unobstructed surface
    /// under the crosshair.
    pub aim: Option<SensorCast>,
}

impl Default for CharacterController {
    fn default() -> Self {
        Self {
            velocity: Vec3::ZERO,
            grounded: false,
            yaw: 0.0,
            pitch: 0.0,
            collider_height: 2.0,
            crouching: false,
            traversal: TraversalState::Normal,
            ground: None,
            left_wall: None,
            right_wall: None,
            ceiling: None,
            aim: None,
        }
    }
}

impl CharacterController {
    /// Create a controller with the given initial collider height.
    pub fn new(collider_height: f32) -> Self {
        Self {
            collider_height,
            ..Default::default()
        }
    }

    /// Reset per-tick sensor results. Called at the start of the sensor
    /// phase.
    pub fn reset_sensors(&mut self) {
        self.ground = None;
        self.left_wall = None;
        self.right_wall = None;
        self.ceiling = None;
        self.aim = None;
    }

    /// Horizontal forward direction derived from yaw.
    pub fn forward(&self) -> Vec3 {
        Quat::from_rotation_y(self.yaw) * Vec3::NEG_Z
    }

    /// Horizontal right direction derived from yaw.
    pub fn right(&self) -> Vec3 {
        Quat::from_rotation_y(self.yaw) * Vec3::X
    }

    /// View direction derived from yaw and pitch.
    pub fn view_direction(&self) -> Vec3 {
        Quat::from_rotation_y(self.yaw) * Quat::from_rotation_x(self.pitch) * Vec3::NEG_Z
    }

    /// Eye offset from the body center: at the top of the collider, like a
    /// head-height camera mount.
    pub fn eye_offset(&self) -> Vec3 {
        Vec3::Y * (self.collider_height * 0.5)
    }

    /// Local transform for a head-mounted camera: eye offset plus pitch.
    ///
    /// Hosts typically copy this onto a camera entity parented to the
    /// character every frame.
    pub fn eye_transform(&self) -> Transform {
        Transform::from_translation(self.eye_offset())
            .with_rotation(Quat::from_rotation_x(self.pitch))
    }

    /// Whether the controller is currently grappling.
    pub fn is_grappling(&self) -> bool {
        matches!(self.traversal, TraversalState::Grappling { .. })
    }

    /// Whether the controller is currently wall running.
    pub fn is_wall_running(&self) -> bool {
        matches!(self.traversal, TraversalState::WallRunning { .. })
    }

    /// The wall sensor hit to use for a wall run, preferring the right wall
    /// like the side sensors scan it.
    pub fn touched_wall(&self) -> Option<&SensorCast> {
        self.right_wall.as_ref().or(self.left_wall.as_ref())
    }
}
