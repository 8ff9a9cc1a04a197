//! Combat events

use bevy::prelude::*;

/// AI просит выстрел (каждый Attack tick, без rate limit)
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct FireRequested {
    pub shooter: Entity,
}

/// Пушка реально выстрелила
///
/// Снаряд (баллистика, попадания) — забота host'а.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct ShellFired {
    pub shooter: Entity,
    /// Позиция дула (world space)
    pub origin: Vec3,
    /// Направление ствола (единичный вектор)
    pub direction: Vec3,
    /// Начальная скорость (m/s)
    pub speed: f32,
}
