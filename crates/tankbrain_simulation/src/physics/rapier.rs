//! Rapier backend для World Query Service.
//!
//! Используется, когда host подключил `RapierPhysicsPlugin` и препятствия —
//! это настоящие коллайдеры (`physics::layers::environment_groups`).

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use super::layers::query_groups;
use super::query::{RayHit, RayQuery, WorldQuery};

/// Обёртка над `RapierContext` для одного агента
///
/// `exclude` — собственное тело агента (луч стартует внутри его коллайдера).
pub struct RapierWorldQuery<'a, 'w> {
    context: &'a RapierContext<'w>,
    exclude: Option<Entity>,
}

impl<'a, 'w> RapierWorldQuery<'a, 'w> {
    pub fn new(context: &'a RapierContext<'w>) -> Self {
        Self {
            context,
            exclude: None,
        }
    }

    pub fn excluding(mut self, entity: Entity) -> Self {
        self.exclude = Some(entity);
        self
    }
}

impl WorldQuery for RapierWorldQuery<'_, '_> {
    fn cast_ray(&self, ray: &RayQuery) -> Option<RayHit> {
        let mut filter = QueryFilter::new().groups(query_groups(ray.layers));
        if let Some(entity) = self.exclude {
            filter = filter.exclude_rigid_body(entity).exclude_collider(entity);
        }

        let (entity, distance) = self.context.cast_ray(
            ray.origin,
            ray.direction.as_vec3(),
            ray.max_distance,
            true,
            filter,
        )?;

        Some(RayHit {
            entity: Some(entity),
            distance,
            point: ray.point_at(distance),
        })
    }
}
