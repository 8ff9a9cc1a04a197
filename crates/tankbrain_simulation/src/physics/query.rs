//! World Query Service — ray-cast примитив, который потребляет AI.
//!
//! AI не знает, откуда берутся попадания: headless `ObstacleField` или
//! Rapier `RapierContext`. Обе реализации живут рядом в `physics`.

use bevy::prelude::*;

/// Запрос луча: (origin, direction, max distance, layer filter)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayQuery {
    pub origin: Vec3,
    pub direction: Dir3,
    pub max_distance: f32,
    /// Битовая маска слоёв (см. `physics::layers`)
    pub layers: u32,
}

impl RayQuery {
    pub fn new(origin: Vec3, direction: Dir3, max_distance: f32, layers: u32) -> Self {
        Self {
            origin,
            direction,
            max_distance,
            layers,
        }
    }

    /// Точка на луче на расстоянии `distance` от origin
    pub fn point_at(&self, distance: f32) -> Vec3 {
        self.origin + self.direction * distance
    }
}

/// Попадание луча
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// Entity препятствия (если backend его знает)
    pub entity: Option<Entity>,
    /// Расстояние от origin до точки попадания
    pub distance: f32,
    pub point: Vec3,
}

pub trait WorldQuery {
    fn cast_ray(&self, ray: &RayQuery) -> Option<RayHit>;
}

impl<T: WorldQuery + ?Sized> WorldQuery for &T {
    fn cast_ray(&self, ray: &RayQuery) -> Option<RayHit> {
        (**self).cast_ray(ray)
    }
}
