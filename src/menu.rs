//! Menu and pause glue.
//!
//! The controller gates its fixed-tick systems on [`AppState::InGame`].
//! Pausing freezes virtual time (and with it the fixed-update accumulator),
//! and cursor lock changes are surfaced as [`CursorLockRequest`] messages
//! because window access stays with the host.

use bevy::app::AppExit;
use bevy::prelude::*;

use crate::intent::MovementIntent;

/// Top-level application states the controller cares about.
#[derive(States, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AppState {
    /// Main menu; no character is simulated.
    #[default]
    MainMenu,
    /// Gameplay; controller systems run.
    InGame,
    /// Paused; time is frozen and the cursor released.
    Paused,
}

/// Commands emitted by the host's menu UI.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuCommand {
    /// Start (or resume from the main menu into) the game.
    Play,
    /// Restart the current session. The host is expected to respawn the
    /// scene; the controller resets time and state.
    Restart,
    /// Quit the application.
    Quit,
}

/// Request to lock or release the cursor. The host applies this to its
/// window.
#[derive(Message, Debug, Clone, Copy)]
pub struct CursorLockRequest {
    /// `true` to lock and hide the cursor, `false` to release it.
    pub locked: bool,
}

/// Toggle between `InGame` and `Paused` on a pause intent.
///
/// Consumes the pause edge directly: the fixed-tick edge clearing does not
/// run while paused.
pub(crate) fn toggle_pause(
    state: Res<State<AppState>>,
    mut next: ResMut<NextState<AppState>>,
    mut q_intents: Query<&mut MovementIntent>,
) {
    let mut requested = false;
    for mut intent in &mut q_intents {
        if intent.pause {
            intent.pause = false;
            requested = true;
        }
    }
    if !requested {
        return;
    }

    match state.get() {
        AppState::InGame => next.set(AppState::Paused),
        AppState::Paused => next.set(AppState::InGame),
        AppState::MainMenu => {}
    }
}

/// Apply host menu commands.
pub(crate) fn handle_menu_commands(
    mut messages: MessageReader<MenuCommand>,
    mut next: ResMut<NextState<AppState>>,
    mut exit: MessageWriter<AppExit>,
) {
    for command in messages.read() {
        match command {
            MenuCommand::Play | MenuCommand::Restart => next.set(AppState::InGame),
            MenuCommand::Quit => {
                exit.write(AppExit::Success);
            }
        }
    }
}

pub(crate) fn on_enter_game(
    mut time: ResMut<Time<Virtual>>,
    mut cursor: MessageWriter<CursorLockRequest>,
) {
    time.unpause();
    cursor.write(CursorLockRequest { locked: true });
}

pub(crate) fn on_enter_paused(
    mut time: ResMut<Time<Virtual>>,
    mut cursor: MessageWriter<CursorLockRequest>,
    mut q_intents: Query<&mut MovementIntent>,
) {
    time.pause();
    cursor.write(CursorLockRequest { locked: false });
    // Drop input buffered before the pause so it doesn't fire on resume.
    for mut intent in &mut q_intents {
        intent.clear_edges();
        intent.walk = bevy::math::Vec2::ZERO;
    }
}

pub(crate) fn on_enter_main_menu(
    mut time: ResMut<Time<Virtual>>,
    mut cursor: MessageWriter<CursorLockRequest>,
) {
    time.unpause();
    cursor.write(CursorLockRequest { locked: false });
}
