//! AI Events — доменные события поведения танков
//!
//! Пишутся `ai::systems::controller` после tick'а мозга.
//! Читатели: логирование, тесты, будущий UI/звук.

use bevy::prelude::*;

use crate::ai::AIStateKind;

/// FSM танка сменила состояние
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct AIStateChanged {
    /// Танк, чья FSM переключилась
    pub entity: Entity,
    pub from: AIStateKind,
    pub to: AIStateKind,
}

/// Танк начал Backup Maneuver (упёрся или застрял)
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct BackupStarted {
    pub entity: Entity,
    /// Куда едет корма
    pub direction: Vec3,
}
