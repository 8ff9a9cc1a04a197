//! Combat module: пушки танков
//!
//! ECS ответственность:
//! - Cannon cooldown (rate limit выстрелов)
//! - FireRequested (от AI) → ShellFired (для host'а)
//!
//! Баллистика и попадания снарядов — за пределами симуляции.

use bevy::prelude::*;

pub mod components;
pub mod events;
pub mod systems;

// Re-export основных типов
pub use components::*;
pub use events::{FireRequested, ShellFired};
pub use systems::{fire_cannons, tick_cannon_cooldowns};

use crate::SimulationSet;

/// Combat Plugin
///
/// Регистрирует combat системы в FixedUpdate (SimulationSet::Weapons).
///
/// Порядок выполнения:
/// 1. tick_cannon_cooldowns — обновление cooldown таймеров
/// 2. fire_cannons — FireRequested → ShellFired
pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<FireRequested>()
            .add_event::<ShellFired>()
            .register_type::<Cannon>();

        app.add_systems(
            FixedUpdate,
            (tick_cannon_cooldowns, fire_cannons)
                .chain()
                .in_set(SimulationSet::Weapons),
        );
    }
}
