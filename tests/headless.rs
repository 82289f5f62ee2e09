//! Headless integration tests using the no-op backend.
//!
//! These drive the controller's state machines without a physics engine:
//! sensor results are written directly, and time is stepped manually so
//! every `app.update()` advances a predictable amount.

use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use fps_character_controller::prelude::*;

const TICK: f64 = 1.0 / 60.0;

fn create_test_app() -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    app.add_plugins(bevy::transform::TransformPlugin);
    // CharacterControllerPlugin calls init_state, which needs StatesPlugin
    // (normally provided by DefaultPlugins).
    app.add_plugins(bevy::state::app::StatesPlugin);
    app.add_plugins(CharacterControllerPlugin::<NoopBackend>::default());
    app.insert_resource(Time::<Fixed>::from_hz(60.0));
    app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(
        TICK,
    )));
    app.finish();
    app.cleanup();
    app
}

fn spawn_character(app: &mut App, position: Vec3) -> Entity {
    app.world_mut()
        .spawn((
            Transform::from_translation(position),
            CharacterController::new(2.0),
            ControllerConfig::default(),
            KinematicVelocity::default(),
        ))
        .id()
}

/// Enter `InGame` (message frame + transition frame).
fn start_game(app: &mut App) {
    app.world_mut().write_message(MenuCommand::Play);
    app.update();
    app.update();
    assert_eq!(
        *app.world().resource::<State<AppState>>().get(),
        AppState::InGame
    );
}

fn controller(app: &App, entity: Entity) -> &CharacterController {
    app.world().get::<CharacterController>(entity).unwrap()
}

fn controller_mut(app: &mut App, entity: Entity) -> Mut<'_, CharacterController> {
    app.world_mut().get_mut::<CharacterController>(entity).unwrap()
}

fn intent_mut(app: &mut App, entity: Entity) -> Mut<'_, MovementIntent> {
    app.world_mut().get_mut::<MovementIntent>(entity).unwrap()
}

#[test]
fn controller_idle_in_main_menu() {
    let mut app = create_test_app();
    let entity = spawn_character(&mut app, Vec3::ZERO);

    for _ in 0..10 {
        app.update();
    }

    // Fixed-tick systems are gated on InGame: no gravity was integrated.
    assert_eq!(controller(&app, entity).velocity, Vec3::ZERO);
}

#[test]
fn gravity_accumulates_while_airborne() {
    let mut app = create_test_app();
    let entity = spawn_character(&mut app, Vec3::new(0.0, 10.0, 0.0));
    start_game(&mut app);

    for _ in 0..30 {
        app.update();
    }

    let controller = controller(&app, entity);
    assert!(controller.velocity.y < -2.0);
    let y = app.world().get::<Transform>(entity).unwrap().translation.y;
    assert!(y < 10.0);
}

#[test]
fn grounded_sticks_and_jumps() {
    let mut app = create_test_app();
    let entity = spawn_character(&mut app, Vec3::ZERO);
    start_game(&mut app);

    controller_mut(&mut app, entity).grounded = true;
    app.update();

    // Grounded downward velocity is clamped to the stick value (plus one
    // tick of gravity).
    let vy = controller(&app, entity).velocity.y;
    assert!(vy > -3.0 && vy < 0.0);

    let now = app.world().resource::<Time>().elapsed_secs();
    app.world_mut()
        .get_mut::<JumpRequest>(entity)
        .unwrap()
        .request(now);
    app.update();

    let vy = controller(&app, entity).velocity.y;
    // sqrt(2 * 2.0 * 9.81) ~= 6.26, minus one tick of gravity
    assert!(vy > 5.5, "expected jump velocity, got {vy}");
}

#[test]
fn walk_sets_horizontal_velocity() {
    let mut app = create_test_app();
    let entity = spawn_character(&mut app, Vec3::ZERO);
    start_game(&mut app);

    intent_mut(&mut app, entity).set_walk(Vec2::new(0.0, 1.0));
    app.update();

    let velocity = controller(&app, entity).velocity;
    // Forward is -Z at zero yaw, default speed 5.
    assert!((velocity.z + 5.0).abs() < 1e-3, "got {velocity:?}");
    assert!(velocity.x.abs() < 1e-3);
}

#[test]
fn sprint_doubles_walk_speed() {
    let mut app = create_test_app();
    let entity = spawn_character(&mut app, Vec3::ZERO);
    start_game(&mut app);

    {
        let mut intent = intent_mut(&mut app, entity);
        intent.set_walk(Vec2::new(0.0, 1.0));
        intent.sprint = true;
    }
    app.update();

    let velocity = controller(&app, entity).velocity;
    assert!((velocity.z + 10.0).abs() < 1e-3, "got {velocity:?}");
}

#[test]
fn look_clamps_pitch() {
    let mut app = create_test_app();
    let entity = spawn_character(&mut app, Vec3::ZERO);
    start_game(&mut app);

    for _ in 0..50 {
        intent_mut(&mut app, entity).add_look(Vec2::new(0.0, 100.0));
        app.update();
    }

    let pitch = controller(&app, entity).pitch;
    assert!(pitch <= std::f32::consts::FRAC_PI_2 + 1e-4);
}

#[test]
fn grapple_attach_pull_and_recover() {
    let mut app = create_test_app();
    let entity = spawn_character(&mut app, Vec3::ZERO);
    start_game(&mut app);

    let point = Vec3::new(0.0, 5.0, -10.0);
    controller_mut(&mut app, entity).aim =
        Some(SensorCast::hit(point.length(), Vec3::Z, point, None));
    intent_mut(&mut app, entity).press_grapple();
    app.update();

    {
        let controller = controller(&app, entity);
        assert!(controller.is_grappling());
        // Pulled toward the point at grapple speed.
        assert!((controller.velocity.length() - 10.0).abs() < 1e-3);
        assert!(controller.velocity.z < 0.0);
    }
    let rope = app.world().get::<GrappleRope>(entity).unwrap();
    assert!(rope.active);
    assert_eq!(rope.end, point);

    // Arriving inside the detach radius pops the character upward.
    app.world_mut().get_mut::<Transform>(entity).unwrap().translation =
        point - Vec3::Z * 0.5;
    app.update();

    {
        let controller = controller(&app, entity);
        assert_eq!(controller.traversal, TraversalState::GrappleRecovery);
        // jump_force minus up to one tick of recovery blending
        assert!((controller.velocity.y - 5.0).abs() < 0.6);
    }
    assert!(!app.world().get::<GrappleRope>(entity).unwrap().active);

    // Recovery blends toward free fall and eventually returns to Normal.
    for _ in 0..600 {
        app.update();
    }
    assert_eq!(controller(&app, entity).traversal, TraversalState::Normal);
}

#[test]
fn grapple_release_detaches_without_pop() {
    let mut app = create_test_app();
    let entity = spawn_character(&mut app, Vec3::ZERO);
    start_game(&mut app);

    let point = Vec3::new(0.0, 0.0, -10.0);
    controller_mut(&mut app, entity).aim =
        Some(SensorCast::hit(10.0, Vec3::Z, point, None));
    intent_mut(&mut app, entity).press_grapple();
    app.update();
    assert!(controller(&app, entity).is_grappling());

    intent_mut(&mut app, entity).release_grapple();
    app.update();

    let controller = controller(&app, entity);
    assert_eq!(controller.traversal, TraversalState::Normal);
}

#[test]
fn grapple_press_without_target_does_nothing() {
    let mut app = create_test_app();
    let entity = spawn_character(&mut app, Vec3::ZERO);
    start_game(&mut app);

    intent_mut(&mut app, entity).press_grapple();
    app.update();

    assert!(!controller(&app, entity).is_grappling());
}

#[test]
fn wall_run_starts_airborne_and_times_out() {
    let mut app = create_test_app();
    let entity = spawn_character(&mut app, Vec3::new(0.0, 5.0, 0.0));
    start_game(&mut app);

    {
        let mut controller = controller_mut(&mut app, entity);
        controller.grounded = false;
        controller.right_wall = Some(SensorCast::hit(
            0.5,
            Vec3::NEG_X,
            Vec3::new(1.5, 5.0, 0.0),
            None,
        ));
    }
    let now = app.world().resource::<Time>().elapsed_secs();
    app.world_mut()
        .get_mut::<JumpRequest>(entity)
        .unwrap()
        .request(now);
    app.update();

    {
        let controller = controller(&app, entity);
        assert!(controller.is_wall_running());
        // Running along the wall at wall-run speed, facing -Z.
        assert!(controller.velocity.z < -5.0);
    }

    // Default duration is 2 seconds; run past it.
    for _ in 0..150 {
        app.update();
    }
    assert!(!controller(&app, entity).is_wall_running());
}

#[test]
fn wall_run_stops_when_contact_lost() {
    let mut app = create_test_app();
    let entity = spawn_character(&mut app, Vec3::new(0.0, 5.0, 0.0));
    start_game(&mut app);

    {
        let mut controller = controller_mut(&mut app, entity);
        controller.grounded = false;
        controller.right_wall = Some(SensorCast::hit(
            0.5,
            Vec3::NEG_X,
            Vec3::new(1.5, 5.0, 0.0),
            None,
        ));
    }
    let now = app.world().resource::<Time>().elapsed_secs();
    app.world_mut()
        .get_mut::<JumpRequest>(entity)
        .unwrap()
        .request(now);
    app.update();
    assert!(controller(&app, entity).is_wall_running());

    controller_mut(&mut app, entity).right_wall = None;
    app.update();
    assert!(!controller(&app, entity).is_wall_running());
}

#[test]
fn grapple_attach_cancels_wall_run() {
    let mut app = create_test_app();
    let entity = spawn_character(&mut app, Vec3::new(0.0, 5.0, 0.0));
    start_game(&mut app);

    {
        let mut controller = controller_mut(&mut app, entity);
        controller.grounded = false;
        controller.right_wall = Some(SensorCast::hit(
            0.5,
            Vec3::NEG_X,
            Vec3::new(1.5, 5.0, 0.0),
            None,
        ));
    }
    let now = app.world().resource::<Time>().elapsed_secs();
    app.world_mut()
        .get_mut::<JumpRequest>(entity)
        .unwrap()
        .request(now);
    app.update();
    assert!(controller(&app, entity).is_wall_running());

    // Grappling mid-run takes over: the run ends and the pull owns the
    // velocity, even though the wall sensor still reports contact.
    let point = Vec3::new(0.0, 10.0, -15.0);
    controller_mut(&mut app, entity).aim =
        Some(SensorCast::hit(point.length(), Vec3::Z, point, None));
    intent_mut(&mut app, entity).press_grapple();
    app.update();

    let controller = controller(&app, entity);
    assert!(controller.is_grappling());
    assert!(!controller.is_wall_running());
    assert!((controller.velocity.length() - 10.0).abs() < 1e-3);
}

#[test]
fn crouch_toggle_shrinks_and_restores_height() {
    let mut app = create_test_app();
    let entity = spawn_character(&mut app, Vec3::ZERO);
    start_game(&mut app);

    intent_mut(&mut app, entity).toggle_crouch();
    for _ in 0..120 {
        app.update();
    }
    assert!((controller(&app, entity).collider_height - 1.0).abs() < 1e-3);

    intent_mut(&mut app, entity).toggle_crouch();
    for _ in 0..120 {
        app.update();
    }
    assert!((controller(&app, entity).collider_height - 2.0).abs() < 1e-3);
}

#[test]
fn crouch_stand_blocked_by_ceiling() {
    let mut app = create_test_app();
    let entity = spawn_character(&mut app, Vec3::ZERO);
    start_game(&mut app);

    intent_mut(&mut app, entity).toggle_crouch();
    for _ in 0..120 {
        app.update();
    }
    assert!(controller(&app, entity).crouching);

    // A ceiling right above the head blocks standing. The ceiling sensor
    // result persists with the noop backend, so set it once.
    controller_mut(&mut app, entity).ceiling = Some(SensorCast::hit(
        0.6,
        Vec3::NEG_Y,
        Vec3::new(0.0, 0.6, 0.0),
        None,
    ));
    intent_mut(&mut app, entity).toggle_crouch();
    for _ in 0..60 {
        app.update();
    }
    let c = controller(&app, entity);
    assert!(c.crouching);
    assert!((c.collider_height - 1.0).abs() < 1e-3);

    // Clearing the ceiling lets the character stand.
    controller_mut(&mut app, entity).ceiling = None;
    intent_mut(&mut app, entity).toggle_crouch();
    for _ in 0..120 {
        app.update();
    }
    assert!(!controller(&app, entity).crouching);
}

#[test]
fn fall_damage_applied_on_hard_landing() {
    let mut app = create_test_app();
    let entity = spawn_character(&mut app, Vec3::new(0.0, 20.0, 0.0));
    start_game(&mut app);

    // Stand at y=20 so the tracker records the height.
    controller_mut(&mut app, entity).grounded = true;
    app.update();

    // Fall to y=0 and land.
    controller_mut(&mut app, entity).grounded = false;
    app.update();
    app.world_mut().get_mut::<Transform>(entity).unwrap().translation = Vec3::ZERO;
    controller_mut(&mut app, entity).grounded = true;
    app.update();
    app.update(); // damage message consumed in Update

    let health = app.world().get::<Health>(entity).unwrap();
    // Fell ~20 units: damage ~= (20 - 10) * 2 = 20.
    assert!(
        health.current < 85.0 && health.current > 75.0,
        "got {}",
        health.current
    );
}

#[test]
fn soft_landing_deals_no_damage() {
    let mut app = create_test_app();
    let entity = spawn_character(&mut app, Vec3::new(0.0, 5.0, 0.0));
    start_game(&mut app);

    controller_mut(&mut app, entity).grounded = true;
    app.update();
    controller_mut(&mut app, entity).grounded = false;
    app.update();
    app.world_mut().get_mut::<Transform>(entity).unwrap().translation = Vec3::ZERO;
    controller_mut(&mut app, entity).grounded = true;
    app.update();
    app.update();

    let health = app.world().get::<Health>(entity).unwrap();
    assert_eq!(health.current, 100.0);
}

#[test]
fn lethal_damage_fires_death_once() {
    let mut app = create_test_app();
    let entity = spawn_character(&mut app, Vec3::ZERO);
    start_game(&mut app);

    app.world_mut().write_message(DamageMessage {
        entity,
        amount: 150.0,
    });
    app.update();
    app.world_mut().write_message(DamageMessage {
        entity,
        amount: 10.0,
    });
    app.update();

    let health = app.world().get::<Health>(entity).unwrap();
    assert!(health.is_dead());

    let died = app.world().resource::<Messages<PlayerDied>>();
    // One death message total, not one per damage message.
    assert_eq!(died.len(), 1);
}

#[test]
fn pause_freezes_controller() {
    let mut app = create_test_app();
    let entity = spawn_character(&mut app, Vec3::new(0.0, 10.0, 0.0));
    start_game(&mut app);

    for _ in 0..5 {
        app.update();
    }
    assert!(controller(&app, entity).velocity.y < 0.0);

    intent_mut(&mut app, entity).toggle_pause();
    app.update();
    app.update();
    assert_eq!(
        *app.world().resource::<State<AppState>>().get(),
        AppState::Paused
    );

    let velocity_before = controller(&app, entity).velocity;
    for _ in 0..10 {
        app.update();
    }
    // No further gravity was integrated while paused.
    assert_eq!(controller(&app, entity).velocity, velocity_before);

    // Unpause resumes simulation.
    intent_mut(&mut app, entity).toggle_pause();
    app.update();
    app.update();
    for _ in 0..5 {
        app.update();
    }
    assert!(controller(&app, entity).velocity.y < velocity_before.y);
}

#[test]
fn crosshair_reflects_aim_target() {
    let mut app = create_test_app();
    let entity = spawn_character(&mut app, Vec3::ZERO);
    let crosshair = app.world_mut().spawn(Crosshair::default()).id();
    start_game(&mut app);

    app.update();
    let settings = app.world().resource::<CrosshairSettings>().clone();
    assert_eq!(
        app.world().get::<Crosshair>(crosshair).unwrap().color,
        settings.default_color
    );

    controller_mut(&mut app, entity).aim =
        Some(SensorCast::hit(5.0, Vec3::Z, Vec3::new(0.0, 0.0, -5.0), None));
    app.update();
    assert_eq!(
        app.world().get::<Crosshair>(crosshair).unwrap().color,
        settings.target_color
    );
}

#[test]
fn health_bar_mirrors_ratio() {
    let mut app = create_test_app();
    let entity = spawn_character(&mut app, Vec3::ZERO);
    let bar = app.world_mut().spawn(HealthBarFill::default()).id();
    start_game(&mut app);

    app.world_mut().write_message(DamageMessage {
        entity,
        amount: 25.0,
    });
    app.update();
    app.update();

    let fill = app.world().get::<HealthBarFill>(bar).unwrap().0;
    assert!((fill - 0.75).abs() < 1e-4, "got {fill}");
}

#[test]
fn quit_command_exits() {
    let mut app = create_test_app();
    app.world_mut().write_message(MenuCommand::Quit);
    app.update();

    let exits = app.world().resource::<Messages<bevy::app::AppExit>>();
    assert!(!exits.is_empty());
}
