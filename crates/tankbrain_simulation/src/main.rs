//! Headless демо-арена Tankbrain
//!
//! Игрок стоит в центре, AI танки патрулируют вокруг, находят его и
//! атакуют. Без рендера: прогресс только в логах.

use std::path::PathBuf;
use std::process::ExitCode;

use bevy::prelude::*;
use clap::Parser;
use tankbrain_simulation::ai::AIStateChanged;
use tankbrain_simulation::{
    advance_fixed_ticks, create_headless_app, log_error, log_info, set_log_level, spawn_ai_tank,
    spawn_player_tank, AIConfig, LogLevel, Obstacle, ObstacleField, ShellFired, TankBrain,
};

/// Headless tank AI arena
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// RNG seed (одинаковый seed = одинаковый прогон)
    #[arg(short, long, default_value_t = 42)]
    seed: u64,

    /// Сколько fixed tick'ов (60 в секунду) прогнать
    #[arg(short, long, default_value_t = 1800)]
    ticks: u32,

    /// JSON с параметрами AI (недостающие поля = defaults)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Debug логи (переходы FSM, backup, выстрелы)
    #[arg(short, long)]
    verbose: bool,
}

const ARENA_HALF_SIZE: f32 = 30.0;
const REPORT_EVERY: u32 = 60;

fn arena() -> ObstacleField {
    let wall_height = Vec3::Y * 1.5;
    let mut field = ObstacleField::new();

    // Периметр
    for (center, half) in [
        (Vec3::new(0.0, 0.0, -ARENA_HALF_SIZE), Vec3::new(ARENA_HALF_SIZE, 0.0, 0.5)),
        (Vec3::new(0.0, 0.0, ARENA_HALF_SIZE), Vec3::new(ARENA_HALF_SIZE, 0.0, 0.5)),
        (Vec3::new(-ARENA_HALF_SIZE, 0.0, 0.0), Vec3::new(0.5, 0.0, ARENA_HALF_SIZE)),
        (Vec3::new(ARENA_HALF_SIZE, 0.0, 0.0), Vec3::new(0.5, 0.0, ARENA_HALF_SIZE)),
    ] {
        field.insert(Obstacle::cuboid(center + wall_height, half + wall_height));
    }

    // Укрытия
    for center in [
        Vec3::new(-10.0, 0.0, -8.0),
        Vec3::new(12.0, 0.0, 6.0),
        Vec3::new(0.0, 0.0, 15.0),
    ] {
        field.insert(Obstacle::cuboid(center + wall_height, Vec3::new(2.0, 0.0, 2.0) + wall_height));
    }

    field
}

fn main() -> ExitCode {
    let args = Args::parse();

    let mut app = create_headless_app(args.seed);
    set_log_level(if args.verbose { LogLevel::Debug } else { LogLevel::Info });

    let config = match &args.config {
        Some(path) => match AIConfig::load(path) {
            Ok(config) => config,
            Err(err) => {
                log_error(&format!("Invalid AI config {}: {}", path.display(), err));
                return ExitCode::FAILURE;
            }
        },
        None => AIConfig::default(),
    };

    log_info(&format!(
        "Starting Tankbrain arena (seed: {}, ticks: {})",
        args.seed, args.ticks
    ));

    let world = app.world_mut();
    world.insert_resource(arena());
    spawn_player_tank(world, 0, Transform::from_xyz(0.0, 0.0, 0.0));
    for (number, position) in [
        (1, Vec3::new(-22.0, 0.0, -22.0)),
        (2, Vec3::new(22.0, 0.0, -20.0)),
        (3, Vec3::new(20.0, 0.0, 22.0)),
    ] {
        spawn_ai_tank(world, number, Transform::from_translation(position), config.clone());
    }

    let mut shells = world.resource::<Events<ShellFired>>().get_cursor();
    let mut transitions = world.resource::<Events<AIStateChanged>>().get_cursor();
    let mut shots_total = 0;
    let mut transitions_total = 0;

    for tick in 1..=args.ticks {
        advance_fixed_ticks(&mut app, 1);

        let world = app.world();
        shots_total += shells.read(world.resource::<Events<ShellFired>>()).count();
        transitions_total += transitions
            .read(world.resource::<Events<AIStateChanged>>())
            .count();

        if tick % REPORT_EVERY == 0 {
            report(app.world_mut(), tick);
        }
    }

    log_info(&format!(
        "Simulation complete: {} shells fired, {} state transitions",
        shots_total, transitions_total
    ));
    ExitCode::SUCCESS
}

fn report(world: &mut World, tick: u32) {
    let mut tanks = world.query::<(&tankbrain_simulation::Tank, &TankBrain, &Transform)>();
    let mut lines: Vec<_> = tanks
        .iter(world)
        .map(|(tank, brain, transform)| {
            format!(
                "#{} {:?}{} at ({:.1}, {:.1})",
                tank.number,
                brain.state.kind(),
                if brain.is_backing_up() { " [backup]" } else { "" },
                transform.translation.x,
                transform.translation.z
            )
        })
        .collect();
    lines.sort();

    log_info(&format!("Tick {}: {}", tick, lines.join(", ")));
}
