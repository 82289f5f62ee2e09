//! First-person playground demo.
//!
//! A floor, a few pillars to grapple onto, and a wall corridor to wall run
//! through.
//!
//! ## Controls
//! - **Enter**: start (from the main menu)
//! - **WASD**: move, **Shift**: sprint, **Space**: jump / wall run
//! - **C**: crouch toggle
//! - **Right mouse**: grapple (hold)
//! - **P** / **Escape**: pause
//!
//! ## Running
//! ```bash
//! cargo run --example playground --features demos
//! ```

use avian3d::prelude::*;
use bevy::input::mouse::AccumulatedMouseMotion;
use bevy::prelude::*;
use bevy::window::{CursorGrabMode, CursorOptions, PrimaryWindow};
use fps_character_controller::prelude::*;

#[derive(Component)]
struct Player;

#[derive(Component)]
struct PlayerCamera;

#[derive(Component)]
struct HealthBarWidget;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins)
        .add_plugins(PhysicsPlugins::default())
        .add_plugins(CharacterControllerPlugin::<Avian3dBackend>::default())
        .add_systems(Startup, setup)
        .add_systems(
            Update,
            (
                start_on_enter,
                gather_input,
                sync_camera,
                apply_cursor_requests,
                sync_crosshair_widget,
                sync_health_bar_widget,
                draw_rope,
            ),
        )
        .run();
}

fn setup(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let config = ControllerConfig::default();

    // Player with a head-mounted camera.
    commands
        .spawn((
            Player,
            Transform::from_xyz(0.0, 1.2, 0.0),
            CharacterController::new(config.crouch.standing_height),
            character_body(0.4, &config),
            config,
            Visibility::default(),
        ))
        .with_children(|parent| {
            parent.spawn((PlayerCamera, Camera3d::default(), Transform::default()));
        });

    // Floor.
    spawn_block(
        &mut commands,
        &mut meshes,
        &mut materials,
        Vec3::new(0.0, -0.5, 0.0),
        Vec3::new(120.0, 1.0, 120.0),
        Color::srgb(0.3, 0.5, 0.3),
    );

    // Grapple pillars at increasing heights.
    for (i, z) in [-15.0_f32, -30.0, -45.0].iter().enumerate() {
        let height = 6.0 + i as f32 * 4.0;
        spawn_block(
            &mut commands,
            &mut meshes,
            &mut materials,
            Vec3::new(8.0, height / 2.0, *z),
            Vec3::new(3.0, height, 3.0),
            Color::srgb(0.6, 0.6, 0.7),
        );
    }

    // Wall-run corridor.
    for x in [-6.0, 6.0] {
        spawn_block(
            &mut commands,
            &mut meshes,
            &mut materials,
            Vec3::new(x, 3.0, 20.0),
            Vec3::new(1.0, 6.0, 24.0),
            Color::srgb(0.7, 0.5, 0.4),
        );
    }

    commands.spawn((
        DirectionalLight {
            illuminance: 8_000.0,
            shadows_enabled: true,
            ..Default::default()
        },
        Transform::from_rotation(Quat::from_euler(EulerRot::XYZ, -1.0, 0.4, 0.0)),
    ));

    // Crosshair widget, centered.
    commands.spawn((
        Crosshair::default(),
        Node {
            position_type: PositionType::Absolute,
            left: Val::Percent(50.0),
            top: Val::Percent(50.0),
            width: Val::Px(8.0),
            height: Val::Px(8.0),
            ..Default::default()
        },
        BackgroundColor(Color::WHITE),
    ));

    // Health bar widget, bottom left.
    commands.spawn((
        HealthBarWidget,
        HealthBarFill::default(),
        Node {
            position_type: PositionType::Absolute,
            left: Val::Px(20.0),
            bottom: Val::Px(20.0),
            width: Val::Px(200.0),
            height: Val::Px(16.0),
            ..Default::default()
        },
        BackgroundColor(Color::srgb(0.8, 0.2, 0.2)),
    ));
}

fn spawn_block(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    position: Vec3,
    size: Vec3,
    color: Color,
) {
    commands.spawn((
        Transform::from_translation(position),
        RigidBody::Static,
        Collider::cuboid(size.x, size.y, size.z),
        Mesh3d(meshes.add(Cuboid::new(size.x, size.y, size.z))),
        MeshMaterial3d(materials.add(StandardMaterial::from(color))),
    ));
}

fn start_on_enter(
    state: Res<State<AppState>>,
    keys: Res<ButtonInput<KeyCode>>,
    mut commands: MessageWriter<MenuCommand>,
) {
    if *state.get() == AppState::MainMenu && keys.just_pressed(KeyCode::Enter) {
        commands.write(MenuCommand::Play);
    }
}

fn gather_input(
    state: Res<State<AppState>>,
    keys: Res<ButtonInput<KeyCode>>,
    buttons: Res<ButtonInput<MouseButton>>,
    mouse_motion: Res<AccumulatedMouseMotion>,
    time: Res<Time>,
    mut q_players: Query<(&mut MovementIntent, &mut JumpRequest), With<Player>>,
) {
    let Ok((mut intent, mut jump)) = q_players.single_mut() else {
        return;
    };

    if keys.just_pressed(KeyCode::KeyP) || keys.just_pressed(KeyCode::Escape) {
        intent.toggle_pause();
    }
    if *state.get() != AppState::InGame {
        return;
    }

    let mut walk = Vec2::ZERO;
    if keys.pressed(KeyCode::KeyW) {
        walk.y += 1.0;
    }
    if keys.pressed(KeyCode::KeyS) {
        walk.y -= 1.0;
    }
    if keys.pressed(KeyCode::KeyD) {
        walk.x += 1.0;
    }
    if keys.pressed(KeyCode::KeyA) {
        walk.x -= 1.0;
    }
    intent.set_walk(walk);
    intent.sprint = keys.pressed(KeyCode::ShiftLeft) || keys.pressed(KeyCode::ShiftRight);

    // Screen-space mouse delta: +y is down, so flip it for look-up.
    let delta = mouse_motion.delta;
    intent.add_look(Vec2::new(delta.x, -delta.y));

    if keys.just_pressed(KeyCode::KeyC) {
        intent.toggle_crouch();
    }
    if keys.just_pressed(KeyCode::Space) {
        jump.request(time.elapsed_secs());
    }
    if buttons.just_pressed(MouseButton::Right) {
        intent.press_grapple();
    }
    if buttons.just_released(MouseButton::Right) {
        intent.release_grapple();
    }
}

fn sync_camera(
    q_players: Query<&CharacterController, With<Player>>,
    mut q_cameras: Query<&mut Transform, With<PlayerCamera>>,
) {
    let Ok(controller) = q_players.single() else {
        return;
    };
    for mut transform in &mut q_cameras {
        *transform = controller.eye_transform();
    }
}

fn apply_cursor_requests(
    mut requests: MessageReader<CursorLockRequest>,
    mut q_windows: Query<&mut CursorOptions, With<PrimaryWindow>>,
) {
    for request in requests.read() {
        for mut cursor in &mut q_windows {
            cursor.grab_mode = if request.locked {
                CursorGrabMode::Locked
            } else {
                CursorGrabMode::None
            };
            cursor.visible = !request.locked;
        }
    }
}

fn sync_crosshair_widget(
    mut q_crosshairs: Query<(&Crosshair, &mut Node, &mut BackgroundColor)>,
) {
    for (crosshair, mut node, mut background) in &mut q_crosshairs {
        background.0 = crosshair.color;
        node.width = Val::Px(crosshair.size);
        node.height = Val::Px(crosshair.size);
    }
}

fn sync_health_bar_widget(
    mut q_bars: Query<(&HealthBarFill, &mut Node), With<HealthBarWidget>>,
) {
    for (fill, mut node) in &mut q_bars {
        node.width = Val::Px(200.0 * fill.0);
    }
}

fn draw_rope(mut gizmos: Gizmos, q_ropes: Query<&GrappleRope>) {
    for rope in &q_ropes {
        if rope.active {
            gizmos.line(rope.start, rope.end, Color::WHITE);
        }
    }
}
