//! Target Handle — ссылка на преследуемую entity.

use bevy::prelude::*;

/// Кого преследует танк
///
/// Заполняется при spawn (явная инъекция) или `acquire_player_targets`,
/// если пусто. Позиция читается каждый tick; если entity исчезла, handle
/// сбрасывается и AI замирает до следующего разрешения.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct TargetHandle {
    pub target: Option<Entity>,
}

impl TargetHandle {
    pub fn new(target: Entity) -> Self {
        Self {
            target: Some(target),
        }
    }

    pub fn clear(&mut self) {
        self.target = None;
    }
}
