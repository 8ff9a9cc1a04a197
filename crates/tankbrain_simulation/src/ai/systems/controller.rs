//! Controller: ECS обвязка вокруг `TankBrain::tick`.
//!
//! Два backend'а World Query:
//! - `tick_tank_brains` — headless `ObstacleField` (тесты, demo арена)
//! - `tick_tank_brains_rapier` — коллайдеры Rapier (host с физикой)
//!
//! Результат tick'а: `DriveCommand` компонент + события
//! `AIStateChanged`, `BackupStarted`, `FireRequested`.

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;
use bevy_rapier3d::prelude::ReadRapierContext;

use crate::ai::{AIConfig, AIStateChanged, AgentOutput, AgentSense, BackupStarted, TankBrain, TargetHandle};
use crate::combat::FireRequested;
use crate::components::DriveCommand;
use crate::physics::{ObstacleField, RapierWorldQuery, WorldQuery};
use crate::DeterministicRng;

type BrainData = (
    Entity,
    &'static Transform,
    &'static AIConfig,
    &'static TargetHandle,
    &'static mut TankBrain,
    &'static mut DriveCommand,
);

/// Все события, которые пишет мозг
#[derive(SystemParam)]
pub struct BrainEvents<'w> {
    state_changed: EventWriter<'w, AIStateChanged>,
    backup_started: EventWriter<'w, BackupStarted>,
    fire_requested: EventWriter<'w, FireRequested>,
}

impl BrainEvents<'_> {
    fn publish(&mut self, entity: Entity, output: &AgentOutput) {
        if let Some(transition) = output.transition {
            crate::log(&format!(
                "AI: {:?} {:?} → {:?}",
                entity, transition.from, transition.to
            ));
            self.state_changed.write(AIStateChanged {
                entity,
                from: transition.from,
                to: transition.to,
            });
        }

        if let Some(direction) = output.backup_started {
            self.backup_started.write(BackupStarted { entity, direction });
        }

        if output.fire {
            self.fire_requested.write(FireRequested { shooter: entity });
        }
    }
}

/// Система: tick мозгов против headless `ObstacleField`
///
/// Нет resource'а → пустой мир (лучи никогда не попадают).
pub fn tick_tank_brains(
    mut tanks: Query<BrainData>,
    targets: Query<&Transform>,
    obstacles: Option<Res<ObstacleField>>,
    time: Res<Time<Fixed>>,
    mut rng: ResMut<DeterministicRng>,
    mut events: BrainEvents,
) {
    let empty = ObstacleField::default();
    let field = obstacles.as_deref().unwrap_or(&empty);

    run_brains(
        &mut tanks,
        &targets,
        time.delta_secs(),
        &mut rng,
        &mut events,
        |_| field,
    );
}

/// Система: tick мозгов против Rapier коллайдеров
///
/// Требует `RapierPhysicsPlugin` у host'а. Свой коллайдер танка исключается из лучей.
pub fn tick_tank_brains_rapier(
    mut tanks: Query<BrainData>,
    targets: Query<&Transform>,
    rapier: ReadRapierContext,
    time: Res<Time<Fixed>>,
    mut rng: ResMut<DeterministicRng>,
    mut events: BrainEvents,
) {
    let Ok(context) = rapier.single() else {
        crate::log_error("AI: RapierContext not found, skipping brain tick");
        return;
    };

    run_brains(
        &mut tanks,
        &targets,
        time.delta_secs(),
        &mut rng,
        &mut events,
        |entity| RapierWorldQuery::new(&context).excluding(entity),
    );
}

fn run_brains<Q: WorldQuery>(
    tanks: &mut Query<BrainData>,
    targets: &Query<&Transform>,
    delta: f32,
    rng: &mut DeterministicRng,
    events: &mut BrainEvents,
    world_for: impl Fn(Entity) -> Q,
) {
    for (entity, transform, config, handle, mut brain, mut drive) in tanks.iter_mut() {
        // Dangling handle = "нет цели" до следующего acquire_player_targets
        let target = handle
            .target
            .and_then(|target| targets.get(target).ok())
            .map(|target| target.translation);

        let sense = AgentSense::from_transform(transform, target, delta);
        let world = world_for(entity);
        let output = brain.tick(config, &sense, &world, &mut rng.rng);

        *drive = output.drive;
        events.publish(entity, &output);
    }
}
