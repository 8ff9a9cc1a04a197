//! Тесты детерминизма
//!
//! Симуляция с одинаковым seed даёт идентичные результаты

use bevy::prelude::*;
use tankbrain_simulation::*;

/// Запускает арену и возвращает snapshot мира
fn run_simulation(seed: u64, tick_count: u32) -> (Vec<u8>, Vec<u8>) {
    let mut app = create_headless_app(seed);
    let world = app.world_mut();

    world.insert_resource(
        ObstacleField::new()
            .with(Obstacle::cuboid(Vec3::new(-6.0, 1.0, -4.0), Vec3::new(2.0, 1.0, 2.0)))
            .with(Obstacle::cuboid(Vec3::new(5.0, 1.0, 6.0), Vec3::new(3.0, 1.0, 0.5))),
    );
    spawn_player_tank(world, 0, Transform::from_xyz(0.0, 0.0, 0.0));
    for (number, position) in [
        (1, Vec3::new(-20.0, 0.0, -20.0)),
        (2, Vec3::new(20.0, 0.0, -18.0)),
        (3, Vec3::new(18.0, 0.0, 22.0)),
    ] {
        spawn_ai_tank(world, number, Transform::from_translation(position), AIConfig::default());
    }

    advance_fixed_ticks(&mut app, tick_count);

    let world = app.world_mut();
    (world_snapshot::<Transform>(world), world_snapshot::<TankBrain>(world))
}

#[test]
fn test_determinism_same_seed() {
    const SEED: u64 = 12345;

    let run1 = run_simulation(SEED, 600);
    let run2 = run_simulation(SEED, 600);

    assert_eq!(
        run1, run2,
        "Симуляция с одинаковым seed ({}) дала разные результаты!",
        SEED
    );
}

#[test]
fn test_determinism_multiple_runs() {
    const SEED: u64 = 42;

    let snapshots: Vec<_> = (0..3).map(|_| run_simulation(SEED, 300)).collect();

    for (i, snapshot) in snapshots.iter().enumerate().skip(1) {
        assert_eq!(
            snapshots[0], *snapshot,
            "Прогон {} дал результат отличный от прогона 0",
            i
        );
    }
}

#[test]
fn test_different_seeds_diverge() {
    let (transforms_a, _) = run_simulation(1, 300);
    let (transforms_b, _) = run_simulation(2, 300);

    assert_ne!(transforms_a, transforms_b);
}
