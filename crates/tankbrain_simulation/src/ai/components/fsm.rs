//! FSM AI components (behavior state, patrol sub-state).

use bevy::prelude::*;

/// Поведение танка (ровно одно активно на каждом tick'е)
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub enum AIState {
    /// Patrol — бродим по случайным точкам вокруг себя
    Patrol(PatrolPhase),

    /// Chase — едем прямо на цель (без obstacle sensing)
    Chase,

    /// Attack — стоим, доворачиваем на цель, просим выстрел каждый tick
    Attack,
}

impl Default for AIState {
    fn default() -> Self {
        Self::Patrol(PatrolPhase::Selecting)
    }
}

impl AIState {
    /// Короткое имя для логов и сравнений без patrol деталей
    pub fn kind(&self) -> AIStateKind {
        match self {
            AIState::Patrol(_) => AIStateKind::Patrol,
            AIState::Chase => AIStateKind::Chase,
            AIState::Attack => AIStateKind::Attack,
        }
    }
}

/// Верхний уровень поведения без внутреннего состояния Patrol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum AIStateKind {
    Patrol,
    Chase,
    Attack,
}

/// Внутреннее состояние Patrol
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub enum PatrolPhase {
    /// Нужна новая точка (вход в Patrol)
    Selecting,

    /// Едем к точке
    Moving {
        target: Vec3,
    },

    /// Стоим на достигнутой точке
    Waiting {
        target: Vec3,
        /// Сколько ещё ждать (секунды)
        remaining: f32,
    },
}

impl PatrolPhase {
    pub fn target(&self) -> Option<Vec3> {
        match self {
            PatrolPhase::Selecting => None,
            PatrolPhase::Moving { target } | PatrolPhase::Waiting { target, .. } => Some(*target),
        }
    }
}
