//! Physics module
//!
//! - movement: привод танка (DriveCommand → Transform)
//! - query: World Query Service (ray-cast трейт для AI)
//! - obstacles: headless препятствия (без Rapier)
//! - rapier: World Query через `RapierContext`
//! - layers: collision layer битовые маски

pub mod layers;
pub mod movement;
pub mod obstacles;
pub mod query;
pub mod rapier;

// Re-export основных типов
pub use movement::{apply_drive_commands, integrate_drive, TankMotor};
pub use obstacles::{Obstacle, ObstacleField};
pub use query::{RayHit, RayQuery, WorldQuery};
pub use rapier::RapierWorldQuery;
