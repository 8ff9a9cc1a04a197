//! AI decision-making module
//!
//! Один мозг на танк: FSM Patrol/Chase/Attack + obstacle sensor,
//! stuck detector и backup maneuver для выхода из тупиков.
//!
//! Слои:
//! - чистая логика (`brain`, `patrol`, `sensor`, `stuck`, `backup`, `steering`)
//! - ECS обвязка (`systems`): target resolution → brain tick → `DriveCommand`

use bevy::prelude::*;

pub mod backup;
pub mod brain;
pub mod components;
pub mod events;
pub mod patrol;
pub mod sensor;
pub mod steering;
pub mod stuck;
pub mod systems;


// Re-export основных типов
pub use backup::{BackupEpisode, BackupManeuver};
pub use brain::{AgentOutput, AgentSense, StateTransition, TankBrain};
pub use components::*;
pub use events::{AIStateChanged, BackupStarted};
pub use sensor::CorridorReading;
pub use stuck::StuckDetector;
pub use systems::*;

use crate::combat::FireRequested;
use crate::SimulationSet;

/// Откуда мозги берут лучи
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SensingBackend {
    /// `physics::ObstacleField` resource (headless)
    #[default]
    ObstacleField,
    /// Коллайдеры Rapier (нужен `RapierPhysicsPlugin` у host'а)
    Rapier,
}

/// AI Plugin
///
/// Регистрирует AI системы в FixedUpdate для детерминизма:
/// 1. `acquire_player_targets` (SimulationSet::Targeting)
/// 2. `tick_tank_brains` / `tick_tank_brains_rapier` (SimulationSet::Think)
#[derive(Default)]
pub struct AIPlugin {
    pub sensing: SensingBackend,
}

impl AIPlugin {
    pub fn rapier() -> Self {
        Self {
            sensing: SensingBackend::Rapier,
        }
    }
}

impl Plugin for AIPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<AIStateChanged>()
            .add_event::<BackupStarted>()
            .add_event::<FireRequested>()
            .register_type::<TankBrain>()
            .register_type::<AIConfig>()
            .register_type::<TargetHandle>()
            .add_systems(
                FixedUpdate,
                acquire_player_targets.in_set(SimulationSet::Targeting),
            );

        match self.sensing {
            SensingBackend::ObstacleField => {
                app.add_systems(FixedUpdate, tick_tank_brains.in_set(SimulationSet::Think));
            }
            SensingBackend::Rapier => {
                app.add_systems(
                    FixedUpdate,
                    tick_tank_brains_rapier.in_set(SimulationSet::Think),
                );
            }
        }
    }
}
