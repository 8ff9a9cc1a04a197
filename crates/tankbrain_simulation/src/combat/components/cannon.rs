//! Cannon component: пушка танка со своим cooldown'ом.
//!
//! AI только просит выстрел (`FireRequested`), пушка решает, готова ли.

use bevy::prelude::*;

/// Допуск накопления f32 при обратном отсчёте cooldown'а
const COOLDOWN_EPSILON: f32 = 1e-4;

/// Пушка танка
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct Cannon {
    /// Интервал между выстрелами (секунды)
    pub cooldown: f32,
    /// Сколько ещё ждать до следующего выстрела (секунды)
    pub cooldown_timer: f32,
    /// Начальная скорость снаряда (m/s)
    pub launch_speed: f32,
    /// Дуло относительно корпуса (local space, forward = -Z)
    pub muzzle_offset: Vec3,
}

impl Default for Cannon {
    fn default() -> Self {
        Self {
            cooldown: 2.0,
            cooldown_timer: 0.0,
            launch_speed: 15.0,
            muzzle_offset: Vec3::new(0.0, 1.0, -1.5),
        }
    }
}

impl Cannon {
    pub fn can_fire(&self) -> bool {
        self.cooldown_timer <= COOLDOWN_EPSILON
    }

    pub fn start_cooldown(&mut self) {
        self.cooldown_timer = self.cooldown;
    }

    pub fn tick(&mut self, delta: f32) {
        self.cooldown_timer = (self.cooldown_timer - delta).max(0.0);
    }
}
