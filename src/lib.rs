//! First-person traversal character controller for Bevy.
//!
//! Provides grappling-hook traversal, wall running, crouch/look/move
//! locomotion, fall damage with health tracking, and menu/pause glue, on
//! top of a pluggable physics backend (Avian3D by default).
//!
//! # Quick start
//!
//! ```no_run
//! use bevy::prelude::*;
//! use fps_character_controller::prelude::*;
//!
//! let mut app = App::new();
//! app.add_plugins(DefaultPlugins);
//! # #[cfg(feature = "avian3d")]
//! app.add_plugins(avian3d::prelude::PhysicsPlugins::default());
//! # #[cfg(feature = "avian3d")]
//! app.add_plugins(CharacterControllerPlugin::<Avian3dBackend>::default());
//! ```
//!
//! Spawn a character by pairing [`CharacterController`] with a
//! [`ControllerConfig`] and the backend's physics components
//! ([`avian::character_body`] for Avian). The host feeds input through
//! [`MovementIntent`] and [`JumpRequest`]; everything else runs in
//! `FixedUpdate` while the app is in [`AppState::InGame`].
//!
//! [`CharacterController`]: controller::CharacterController
//! [`ControllerConfig`]: config::ControllerConfig
//! [`MovementIntent`]: intent::MovementIntent
//! [`JumpRequest`]: intent::JumpRequest
//! [`AppState::InGame`]: menu::AppState::InGame

#[cfg(feature = "avian3d")]
pub mod avian;
pub mod backend;
pub mod config;
pub mod controller;
pub mod detection;
pub mod grapple;
pub mod health;
pub mod intent;
pub mod locomotion;
pub mod menu;
pub mod ui;
pub mod wall_run;

use std::marker::PhantomData;

use bevy::prelude::*;

use crate::backend::CharacterPhysicsBackend;
use crate::controller::CharacterController;
use crate::menu::AppState;

/// Execution phases of the character controller, all in `FixedUpdate`.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharacterControllerSet {
    /// Pull physics state (post-collision velocity) into the controller.
    Preparation,
    /// Backend raycasts: ground, walls, ceiling, grapple aim.
    Sensors,
    /// Traversal state machines: grapple, wall run, crouch.
    StateMachines,
    /// Look, walk, jump, gravity, fall-damage tracking.
    Locomotion,
    /// Push the resulting velocity and collider shape back to physics.
    FinalApplication,
}

/// The character controller plugin, generic over the physics backend.
///
/// ```ignore
/// app.add_plugins(CharacterControllerPlugin::<Avian3dBackend>::default());
/// ```
pub struct CharacterControllerPlugin<B: CharacterPhysicsBackend> {
    _backend: PhantomData<B>,
}

impl<B: CharacterPhysicsBackend> Default for CharacterControllerPlugin<B> {
    fn default() -> Self {
        Self {
            _backend: PhantomData,
        }
    }
}

impl<B: CharacterPhysicsBackend> Plugin for CharacterControllerPlugin<B> {
    fn build(&self, app: &mut App) {
        app.init_state::<AppState>();
        app.init_resource::<ui::CrosshairSettings>();

        app.add_message::<health::DamageMessage>();
        app.add_message::<health::PlayerDied>();
        app.add_message::<menu::MenuCommand>();
        app.add_message::<menu::CursorLockRequest>();

        app.register_type::<config::ControllerConfig>();
        app.register_type::<controller::CharacterController>();
        app.register_type::<intent::MovementIntent>();
        app.register_type::<intent::JumpRequest>();
        app.register_type::<grapple::GrappleRope>();
        app.register_type::<health::Health>();
        app.register_type::<health::FallTracker>();
        app.register_type::<ui::Crosshair>();
        app.register_type::<ui::HealthBarFill>();
        app.register_type::<ui::CrosshairSettings>();

        app.configure_sets(
            FixedUpdate,
            (
                CharacterControllerSet::Preparation,
                CharacterControllerSet::Sensors,
                CharacterControllerSet::StateMachines,
                CharacterControllerSet::Locomotion,
                CharacterControllerSet::FinalApplication,
            )
                .chain(),
        );
        app.configure_sets(
            FixedUpdate,
            CharacterControllerSet::Preparation.run_if(in_state(AppState::InGame)),
        );
        app.configure_sets(
            FixedUpdate,
            CharacterControllerSet::Sensors.run_if(in_state(AppState::InGame)),
        );
        app.configure_sets(
            FixedUpdate,
            CharacterControllerSet::StateMachines.run_if(in_state(AppState::InGame)),
        );
        app.configure_sets(
            FixedUpdate,
            CharacterControllerSet::Locomotion.run_if(in_state(AppState::InGame)),
        );
        app.configure_sets(
            FixedUpdate,
            CharacterControllerSet::FinalApplication.run_if(in_state(AppState::InGame)),
        );

        app.add_systems(
            FixedUpdate,
            sync_from_physics::<B>.in_set(CharacterControllerSet::Preparation),
        );
        app.add_systems(
            FixedUpdate,
            (
                grapple::update_grapple,
                wall_run::update_wall_run,
                locomotion::update_crouch,
            )
                .chain()
                .in_set(CharacterControllerSet::StateMachines),
        );
        app.add_systems(
            FixedUpdate,
            (
                locomotion::apply_look,
                locomotion::apply_walk,
                locomotion::apply_jump_and_gravity,
                health::track_fall_damage,
            )
                .chain()
                .in_set(CharacterControllerSet::Locomotion),
        );
        app.add_systems(
            FixedUpdate,
            (apply_to_physics::<B>, intent::clear_intent_edges)
                .chain()
                .in_set(CharacterControllerSet::FinalApplication),
        );

        app.add_systems(
            Update,
            (health::apply_damage, ui::update_crosshair, ui::update_health_bar),
        );
        app.add_systems(Update, (menu::toggle_pause, menu::handle_menu_commands));
        app.add_systems(OnEnter(AppState::InGame), menu::on_enter_game);
        app.add_systems(OnEnter(AppState::Paused), menu::on_enter_paused);
        app.add_systems(OnEnter(AppState::MainMenu), menu::on_enter_main_menu);

        app.add_plugins(B::plugin());
    }
}

/// Read post-collision velocity from the physics body into the controller,
/// so collision responses (landing, sliding) feed back into the state
/// machines.
fn sync_from_physics<B: CharacterPhysicsBackend>(world: &mut World) {
    let mut q_controllers = world.query_filtered::<Entity, With<CharacterController>>();
    let entities: Vec<Entity> = q_controllers.iter(world).collect();

    for entity in entities {
        let velocity = B::get_velocity(world, entity);
        if let Some(mut controller) = world.get_mut::<CharacterController>(entity) {
            controller.velocity = velocity;
        }
    }
}

/// Write the controller's velocity and collider height back to the physics
/// body.
fn apply_to_physics<B: CharacterPhysicsBackend>(world: &mut World) {
    let mut q_controllers = world.query::<(Entity, &CharacterController)>();
    let outputs: Vec<(Entity, Vec3, f32)> = q_controllers
        .iter(world)
        .map(|(entity, controller)| (entity, controller.velocity, controller.collider_height))
        .collect();

    for (entity, velocity, height) in outputs {
        B::set_velocity(world, entity, velocity);
        B::set_capsule_height(world, entity, height);
    }
}

/// Commonly used types.
pub mod prelude {
    #[cfg(feature = "avian3d")]
    pub use crate::avian::{character_body, Avian3dBackend};
    pub use crate::backend::{CharacterPhysicsBackend, KinematicVelocity, NoopBackend};
    pub use crate::config::{
        ConfigError, ControllerConfig, CrouchConfig, FallDamageConfig, GrappleConfig,
        LookConfig, MovementConfig, WallRunConfig,
    };
    pub use crate::controller::{CharacterController, TraversalState};
    pub use crate::detection::SensorCast;
    pub use crate::grapple::GrappleRope;
    pub use crate::health::{DamageMessage, FallTracker, Health, PlayerDied};
    pub use crate::intent::{JumpRequest, MovementIntent};
    pub use crate::menu::{AppState, CursorLockRequest, MenuCommand};
    pub use crate::ui::{Crosshair, CrosshairSettings, HealthBarFill};
    pub use crate::{CharacterControllerPlugin, CharacterControllerSet};
}
