//! Headless препятствия: статические AABB на плоскости земли.
//!
//! Замена физическим коллайдерам, когда Rapier не подключен (headless
//! симуляция, тесты). Реализует `WorldQuery` через `bevy::math::bounding`
//! и умеет блокировать движение танка внутрь препятствия.

use bevy::math::bounding::{Aabb3d, RayCast3d};
use bevy::math::Vec3A;
use bevy::prelude::*;

use super::layers::COLLISION_LAYER_ENVIRONMENT;
use super::query::{RayHit, RayQuery, WorldQuery};

/// Одно статическое препятствие
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Obstacle {
    pub bounds: Aabb3d,
    /// Слой (битовая маска), по которому фильтруются лучи
    pub layer: u32,
}

impl Obstacle {
    /// Ящик на слое Environment
    pub fn cuboid(center: Vec3, half_size: Vec3) -> Self {
        Self {
            bounds: Aabb3d::new(center, half_size),
            layer: COLLISION_LAYER_ENVIRONMENT,
        }
    }

    /// Точка внутри AABB, расширенного на `clearance`
    pub fn contains(&self, point: Vec3, clearance: f32) -> bool {
        let point = Vec3A::from(point);
        let min = self.bounds.min - Vec3A::splat(clearance);
        let max = self.bounds.max + Vec3A::splat(clearance);
        point.cmpge(min).all() && point.cmple(max).all()
    }
}

/// Resource: все статические препятствия арены
#[derive(Resource, Debug, Clone, Default)]
pub struct ObstacleField {
    obstacles: Vec<Obstacle>,
}

impl ObstacleField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, obstacle: Obstacle) -> Self {
        self.obstacles.push(obstacle);
        self
    }

    pub fn insert(&mut self, obstacle: Obstacle) {
        self.obstacles.push(obstacle);
    }

    /// Занята ли точка (с учётом радиуса танка)
    pub fn blocks(&self, point: Vec3, clearance: f32) -> bool {
        self.obstacles
            .iter()
            .any(|obstacle| obstacle.contains(point, clearance))
    }
}

impl WorldQuery for ObstacleField {
    fn cast_ray(&self, ray: &RayQuery) -> Option<RayHit> {
        let cast = RayCast3d::new(ray.origin, ray.direction, ray.max_distance);

        self.obstacles
            .iter()
            .filter(|obstacle| obstacle.layer & ray.layers != 0)
            .filter_map(|obstacle| {
                cast.aabb_intersection_at(&obstacle.bounds)
                    .map(|distance| (obstacle, distance))
            })
            .min_by(|(_, a), (_, b)| a.total_cmp(b))
            .map(|(_, distance)| RayHit {
                entity: None,
                distance,
                point: ray.point_at(distance),
            })
    }
}
