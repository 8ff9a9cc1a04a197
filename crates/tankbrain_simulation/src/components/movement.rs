//! Movement компоненты: команда приводу танка

use bevy::prelude::*;

/// Команда приводу (Vehicle Actuator) на текущий tick
///
/// Пишется AI controller'ом, читается `physics::apply_drive_commands`.
/// Инвариант: `forward` и `turn` всегда в [-1, 1].
#[derive(Component, Debug, Clone, Copy, PartialEq, Default, Reflect)]
#[reflect(Component)]
pub struct DriveCommand {
    /// Газ: 1 = полный вперёд, -1 = полный назад
    pub forward: f32,
    /// Поворот: 1 = полный влево (CCW сверху), -1 = полный вправо
    pub turn: f32,
    /// Прямая ориентация корпуса (Attack: плавный доворот на цель)
    pub facing: Option<Quat>,
}

impl DriveCommand {
    pub const IDLE: Self = Self {
        forward: 0.0,
        turn: 0.0,
        facing: None,
    };

    /// Команда с clamp'ом обоих скаляров в [-1, 1]
    pub fn new(forward: f32, turn: f32) -> Self {
        Self {
            forward: clamp_unit(forward),
            turn: clamp_unit(turn),
            facing: None,
        }
    }

    /// Стоять на месте, но развернуть корпус в `rotation`
    pub fn hold_facing(rotation: Quat) -> Self {
        Self {
            facing: Some(rotation),
            ..Self::IDLE
        }
    }

    /// Тот же поворот, газ в обратную сторону (задний ход)
    pub fn reversed(self) -> Self {
        Self {
            forward: -self.forward,
            ..self
        }
    }

    /// Есть ли намерение ехать (для stuck detector)
    pub fn wants_to_move(&self) -> bool {
        self.forward.abs() > f32::EPSILON
    }
}

fn clamp_unit(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(-1.0, 1.0)
    }
}
