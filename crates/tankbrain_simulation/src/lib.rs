//! Tankbrain Simulation Core
//!
//! Headless ECS-симуляция танкового AI на Bevy 0.16.
//!
//! Поток одного fixed tick'а (60Hz):
//! 1. Targeting — Target Handle → ближайший `Player`
//! 2. Think — `TankBrain::tick` → `DriveCommand` + `FireRequested`
//! 3. Weapons — cooldown пушек, `FireRequested` → `ShellFired`
//! 4. Motion — `DriveCommand` → `Transform`
//!
//! Детерминизм: fixed timestep + seeded `ChaCha8Rng` resource.

use bevy::app::FixedMain;
use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// Публичные модули
pub mod ai;
pub mod combat;
pub mod components;
pub mod logger;
pub mod physics;

// Re-export базовых компонентов для удобства
pub use ai::{AIConfig, AIPlugin, AIState, AIStateKind, ConfigError, SensingBackend, TankBrain, TargetHandle};
pub use combat::{Cannon, CombatPlugin, FireRequested, ShellFired};
pub use components::*;
pub use logger::{init_logger, log, log_error, log_info, log_warning, set_log_level, LogLevel, LogPrinter};
pub use physics::{Obstacle, ObstacleField, TankMotor};

/// Фазы fixed tick'а (выполняются строго по порядку)
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    Targeting,
    Think,
    Weapons,
    Motion,
}

/// Главный plugin симуляции (объединяет все подсистемы)
#[derive(Default)]
pub struct SimulationPlugin {
    pub sensing: SensingBackend,
}

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app
            // Fixed timestep 60Hz для simulation tick
            .insert_resource(Time::<Fixed>::from_hz(60.0))
            // Детерминистичный RNG (seed по умолчанию)
            .insert_resource(DeterministicRng::new(42))
            .init_resource::<ObstacleField>()
            .configure_sets(
                FixedUpdate,
                (
                    SimulationSet::Targeting,
                    SimulationSet::Think,
                    SimulationSet::Weapons,
                    SimulationSet::Motion,
                )
                    .chain(),
            )
            .register_type::<Tank>()
            .register_type::<Player>()
            .register_type::<DriveCommand>()
            .register_type::<TankMotor>()
            .add_plugins((
                AIPlugin {
                    sensing: self.sensing,
                },
                CombatPlugin,
            ))
            .add_systems(
                FixedUpdate,
                physics::apply_drive_commands.in_set(SimulationSet::Motion),
            );
    }
}

/// Детерминистичный RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Создаёт minimal Bevy App для headless симуляции
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins((MinimalPlugins, SimulationPlugin::default()))
        .insert_resource(DeterministicRng::new(seed));

    app
}

/// Прогнать `ticks` fixed tick'ов без реального времени
///
/// `app.update()` крутит FixedMain по wall clock, тут шаг ровно один timestep.
/// После каждого tick'а буферы событий симуляции переключаются (как `First`
/// в обычном кадре): событие живёт два tick'а, читать надо каждый tick.
pub fn advance_fixed_ticks(app: &mut App, ticks: u32) {
    for _ in 0..ticks {
        let world = app.world_mut();
        let step = world.resource::<Time<Fixed>>().timestep();
        world.resource_mut::<Time<Fixed>>().advance_by(step);
        world.run_schedule(FixedMain);
        update_simulation_events(world);
    }
}

fn update_simulation_events(world: &mut World) {
    update_events::<ai::AIStateChanged>(world);
    update_events::<ai::BackupStarted>(world);
    update_events::<FireRequested>(world);
    update_events::<ShellFired>(world);
}

fn update_events<E: Event>(world: &mut World) {
    if let Some(mut events) = world.get_resource_mut::<Events<E>>() {
        events.update();
    }
}

/// AI танк: мозг, пушка, привод (через Required Components)
pub fn spawn_ai_tank(world: &mut World, number: u32, transform: Transform, config: AIConfig) -> Entity {
    world
        .spawn((Tank { number }, transform, TankBrain::default(), config, Cannon::default()))
        .id()
}

/// Танк игрока (цель для AI, управляется host'ом через `DriveCommand`)
pub fn spawn_player_tank(world: &mut World, number: u32, transform: Transform) -> Entity {
    world.spawn((Tank { number }, Player, transform)).id()
}

/// Snapshot мира для сравнения детерминизма
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    let mut snapshot = Vec::new();

    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();

    // Сортируем по Entity ID для детерминизма
    entities.sort_by_key(|(entity, _)| entity.index());

    // Сериализуем в байты через Debug (простейший способ)
    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}
