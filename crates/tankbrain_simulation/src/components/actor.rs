//! Базовые компоненты акторов: Tank, Player

use bevy::prelude::*;

use crate::components::DriveCommand;
use crate::physics::TankMotor;

/// Танк — любое транспортное средство на арене (игрок или AI)
///
/// Автоматически добавляет привод и команду приводу через Required Components.
#[derive(Component, Debug, Clone, Default, Reflect)]
#[reflect(Component)]
#[require(Transform, TankMotor, DriveCommand)]
pub struct Tank {
    /// Номер танка (для логов)
    pub number: u32,
}

/// Marker component для player-controlled entity
///
/// AI цели ищутся только среди entity с этим компонентом
/// (см. `ai::systems::acquire_player_targets`).
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct Player;
