//! Obstacle Sensor — веер из трёх коротких лучей перед танком.
//!
//! Лучи: по направлению движения, +30° и -30° (yaw вокруг up).
//! Коридор "blocked", если попали хотя бы два луча из трёх:
//! - одиночный боковой луч → едем, руление выправит линию
//! - одиночный центральный луч → тонкое препятствие, тоже едем
//! - два любых луча → стена, запускаем Backup Maneuver

use bevy::prelude::*;

use crate::ai::steering::flatten;
use crate::ai::AIConfig;
use crate::physics::layers::{COLLISION_MASK_LINE_OF_SIGHT, COLLISION_MASK_OBSTACLE_SENSOR};
use crate::physics::{RayQuery, WorldQuery};

/// Результат сканирования коридора
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CorridorReading {
    pub center: bool,
    pub left: bool,
    pub right: bool,
}

impl CorridorReading {
    pub fn hit_count(&self) -> usize {
        [self.center, self.left, self.right]
            .into_iter()
            .filter(|hit| *hit)
            .count()
    }

    pub fn is_blocked(&self) -> bool {
        self.hit_count() >= 2
    }
}

/// Точка старта лучей: чуть выше основания танка
pub fn sensor_origin(position: Vec3, config: &AIConfig) -> Vec3 {
    position + Vec3::Y * config.sensor_height
}

/// Просканировать коридор вдоль `direction`
///
/// Вырожденное направление (ноль, вертикаль) = коридор свободен.
///
/// Попадание одного центрального луча намеренно не блокирует коридор:
/// тонкое препятствие (столб, дерево) объезжается рулением, а не задним
/// ходом. См. `CorridorReading::is_blocked`.
pub fn scan_corridor<Q: WorldQuery>(
    world: &Q,
    position: Vec3,
    direction: Vec3,
    config: &AIConfig,
) -> CorridorReading {
    let Some(direction) = flatten(direction) else {
        return CorridorReading::default();
    };

    let origin = sensor_origin(position, config);
    let side = config.side_ray_angle_deg.to_radians();
    let hits = |yaw: f32| {
        let Ok(ray_direction) = Dir3::new(Quat::from_rotation_y(yaw) * direction) else {
            return false;
        };
        let ray = RayQuery::new(
            origin,
            ray_direction,
            config.check_distance,
            COLLISION_MASK_OBSTACLE_SENSOR,
        );
        world.cast_ray(&ray).is_some()
    };

    CorridorReading {
        center: hits(0.0),
        left: hits(side),
        right: hits(-side),
    }
}

/// Прямая видимость цели (препятствия окружения между нами)
pub fn has_line_of_sight<Q: WorldQuery>(
    world: &Q,
    position: Vec3,
    target: Vec3,
    config: &AIConfig,
) -> bool {
    let origin = sensor_origin(position, config);
    let eye_target = sensor_origin(target, config);
    let to_target = eye_target - origin;

    let Ok(direction) = Dir3::new(to_target) else {
        // Цель в той же точке — видим
        return true;
    };

    let ray = RayQuery::new(
        origin,
        direction,
        to_target.length(),
        COLLISION_MASK_LINE_OF_SIGHT,
    );
    world.cast_ray(&ray).is_none()
}
