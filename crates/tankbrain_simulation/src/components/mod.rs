//! ECS Components для игровых entity
//!
//! Организация по доменам:
//! - actor: танки и маркер игрока (Tank, Player)
//! - movement: команда приводу (DriveCommand)
//!
//! AI компоненты (TankBrain, AIConfig, TargetHandle) живут в `crate::ai`.

pub mod actor;
pub mod movement;

// Re-exports для удобного импорта
pub use actor::*;
pub use movement::*;
