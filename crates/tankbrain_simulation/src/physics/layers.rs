//! Collision Layers Constants
//!
//! Centralised битовые маски для всего проекта (Rapier collision groups и
//! headless `ObstacleField` используют одни и те же биты).
//!
//! - Layer 1 (0b1 = 1): Reserved
//! - Layer 2 (0b10 = 2): Actors (танки)
//! - Layer 3 (0b100 = 4): Environment (стены, ящики, камни)
//! - Layer 4 (0b1000 = 8): Projectiles (снаряды)

use bevy_rapier3d::prelude::{CollisionGroups, Group};

/// Layer 2: Actors (танки игрока и AI)
pub const COLLISION_LAYER_ACTORS: u32 = 0b10;

/// Layer 3: Environment (статические препятствия)
pub const COLLISION_LAYER_ENVIRONMENT: u32 = 0b100;

/// Layer 4: Projectiles
pub const COLLISION_LAYER_PROJECTILES: u32 = 0b1000;

/// Mask: Obstacle Sensor видит и стены, и другие танки
pub const COLLISION_MASK_OBSTACLE_SENSOR: u32 =
    COLLISION_LAYER_ACTORS | COLLISION_LAYER_ENVIRONMENT;

/// Mask: Line-of-sight блокируется только окружением
pub const COLLISION_MASK_LINE_OF_SIGHT: u32 = COLLISION_LAYER_ENVIRONMENT;

/// Collision groups для танка (Rapier backend)
pub fn actor_groups() -> CollisionGroups {
    CollisionGroups::new(
        Group::from_bits_truncate(COLLISION_LAYER_ACTORS),
        Group::from_bits_truncate(COLLISION_LAYER_ACTORS | COLLISION_LAYER_ENVIRONMENT),
    )
}

/// Collision groups для статического препятствия (Rapier backend)
pub fn environment_groups() -> CollisionGroups {
    CollisionGroups::new(
        Group::from_bits_truncate(COLLISION_LAYER_ENVIRONMENT),
        Group::from_bits_truncate(COLLISION_LAYER_ACTORS | COLLISION_LAYER_PROJECTILES),
    )
}

/// Фильтр запроса: "попадать только в слои `mask`"
pub fn query_groups(mask: u32) -> CollisionGroups {
    CollisionGroups::new(Group::ALL, Group::from_bits_truncate(mask))
}
