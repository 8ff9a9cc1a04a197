//! Agent scenario tests
//!
//! Полный headless App (SimulationPlugin), шаг ровно по одному fixed tick'у.
//! События живут два tick'а: cursor читаем после каждого шага.
//!
//! Проверяем:
//! - Patrol → Chase → Attack при приближении к игроку
//! - Rate limit пушки (cooldown 2s) при запросах каждый tick
//! - Заморозку без цели
//! - Backup Maneuver у стены

use bevy::prelude::*;
use tankbrain_simulation::ai::{AIStateChanged, BackupStarted, PatrolPhase};
use tankbrain_simulation::*;

fn count<E: Event>(app: &App, cursor: &mut bevy::ecs::event::EventCursor<E>) -> usize {
    cursor.read(app.world().resource::<Events<E>>()).count()
}

fn read_all<E: Event + Clone>(app: &App, cursor: &mut bevy::ecs::event::EventCursor<E>) -> Vec<E> {
    cursor.read(app.world().resource::<Events<E>>()).cloned().collect()
}

fn cursor<E: Event>(app: &App) -> bevy::ecs::event::EventCursor<E> {
    app.world().resource::<Events<E>>().get_cursor()
}

#[test]
fn test_approach_chase_then_attack() {
    let mut app = create_headless_app(42);
    let world = app.world_mut();
    let player = spawn_player_tank(world, 0, Transform::from_xyz(0.0, 0.0, -10.0));
    let tank = spawn_ai_tank(world, 1, Transform::default(), AIConfig::default());

    let mut transitions = cursor::<AIStateChanged>(&app);
    let mut events = Vec::new();

    advance_fixed_ticks(&mut app, 1);
    events.extend(read_all(&app, &mut transitions));
    assert_eq!(app.world().get::<TargetHandle>(tank).and_then(|h| h.target), Some(player));
    assert_eq!(app.world().get::<TankBrain>(tank).map(|b| b.state), Some(AIState::Chase));

    advance_fixed_ticks(&mut app, 1);
    events.extend(read_all(&app, &mut transitions));
    assert_eq!(app.world().get::<TankBrain>(tank).map(|b| b.state), Some(AIState::Attack));

    assert_eq!(
        events,
        vec![
            AIStateChanged {
                entity: tank,
                from: AIStateKind::Patrol,
                to: AIStateKind::Chase
            },
            AIStateChanged {
                entity: tank,
                from: AIStateKind::Chase,
                to: AIStateKind::Attack
            },
        ]
    );

    let drive = app.world().get::<DriveCommand>(tank).copied().unwrap_or_default();
    assert_eq!(drive.forward, 0.0);
    assert!(drive.facing.is_some());
}

#[test]
fn test_cannon_rate_limits_attack_requests() {
    let mut app = create_headless_app(7);
    let world = app.world_mut();
    spawn_player_tank(world, 0, Transform::from_xyz(0.0, 0.0, -8.0));
    let tank = spawn_ai_tank(world, 1, Transform::default(), AIConfig::default());

    let mut requests = cursor::<FireRequested>(&app);
    let mut shells = cursor::<ShellFired>(&app);

    // 2.5s: первый выстрел сразу, второй через cooldown 2s
    let mut requested = 0;
    let mut fired = 0;
    for _ in 0..150 {
        advance_fixed_ticks(&mut app, 1);
        requested += count(&app, &mut requests);
        fired += count(&app, &mut shells);
    }

    assert!(requested > 100, "Attack просит выстрел каждый tick, got {}", requested);
    assert_eq!(fired, 2);

    let brain = app.world().get::<TankBrain>(tank).map(|b| b.state);
    assert_eq!(brain, Some(AIState::Attack));
}

#[test]
fn test_no_player_means_no_motion() {
    let mut app = create_headless_app(42);
    let tank = spawn_ai_tank(
        app.world_mut(),
        1,
        Transform::from_xyz(3.0, 0.0, 4.0),
        AIConfig::default(),
    );

    advance_fixed_ticks(&mut app, 120);

    let world = app.world();
    assert_eq!(world.get::<Transform>(tank).map(|t| t.translation), Some(Vec3::new(3.0, 0.0, 4.0)));
    assert_eq!(world.get::<DriveCommand>(tank).copied(), Some(DriveCommand::IDLE));
    assert_eq!(
        world.get::<TankBrain>(tank).map(|b| b.state),
        Some(AIState::Patrol(PatrolPhase::Selecting))
    );
}

#[test]
fn test_despawned_player_freezes_tank() {
    let mut app = create_headless_app(42);
    let world = app.world_mut();
    let player = spawn_player_tank(world, 0, Transform::from_xyz(0.0, 0.0, -14.0));
    let tank = spawn_ai_tank(world, 1, Transform::default(), AIConfig::default());

    advance_fixed_ticks(&mut app, 5);
    assert_eq!(app.world().get::<TankBrain>(tank).map(|b| b.state.kind()), Some(AIStateKind::Chase));

    app.world_mut().despawn(player);
    advance_fixed_ticks(&mut app, 1);

    let world = app.world();
    assert_eq!(world.get::<TargetHandle>(tank).and_then(|h| h.target), None);
    assert_eq!(world.get::<DriveCommand>(tank).copied(), Some(DriveCommand::IDLE));
    // Без цели переходов нет: остаёмся в Chase
    assert_eq!(world.get::<TankBrain>(tank).map(|b| b.state.kind()), Some(AIStateKind::Chase));
}

#[test]
fn test_far_player_patrols() {
    let mut app = create_headless_app(3);
    let world = app.world_mut();
    spawn_player_tank(world, 0, Transform::from_xyz(100.0, 0.0, 100.0));
    // Крошечный порог прибытия: первая точка точно не "уже достигнута"
    let config = AIConfig {
        arrival_threshold: 0.01,
        ..default()
    };
    let tank = spawn_ai_tank(world, 1, Transform::default(), config);

    advance_fixed_ticks(&mut app, 30);

    let world = app.world();
    assert_eq!(world.get::<TankBrain>(tank).map(|b| b.state.kind()), Some(AIStateKind::Patrol));
    let moved = world.get::<Transform>(tank).map(|t| t.translation.length()).unwrap_or(0.0);
    assert!(moved > 0.0, "patrol must drive somewhere");
}

#[test]
fn test_wall_ahead_triggers_timed_backup() {
    let mut app = create_headless_app(11);
    let world = app.world_mut();
    world.insert_resource(ObstacleField::new().with(Obstacle::cuboid(
        Vec3::new(0.0, 1.0, -2.0),
        Vec3::new(5.0, 1.0, 0.25),
    )));
    spawn_player_tank(world, 0, Transform::from_xyz(100.0, 0.0, 100.0));
    let tank = spawn_ai_tank(world, 1, Transform::default(), AIConfig::default());
    if let Some(mut brain) = world.get_mut::<TankBrain>(tank) {
        brain.state = AIState::Patrol(PatrolPhase::Moving {
            target: Vec3::new(0.0, 0.0, -8.0),
        });
    }

    let mut backups = cursor::<BackupStarted>(&app);

    advance_fixed_ticks(&mut app, 1);
    assert_eq!(count(&app, &mut backups), 1);
    let drive = app.world().get::<DriveCommand>(tank).copied().unwrap_or_default();
    assert!(drive.forward < 0.0);

    // 1.5s при 60Hz = 90 tick'ов, включая tick запуска
    advance_fixed_ticks(&mut app, 88);
    assert_eq!(app.world().get::<TankBrain>(tank).map(|b| b.is_backing_up()), Some(true));

    advance_fixed_ticks(&mut app, 1);
    let world = app.world();
    let brain = world.get::<TankBrain>(tank).cloned().unwrap_or_default();
    assert!(!brain.is_backing_up());
    assert_eq!(brain.stuck.streak(), 0);
    assert!(matches!(brain.state, AIState::Patrol(PatrolPhase::Moving { .. })));

    let position = world.get::<Transform>(tank).map(|t| t.translation).unwrap_or_default();
    assert!(position.z > 1.0, "tank must reverse away from the wall, at {:?}", position);
}
