//! Patrol waypoints.
//!
//! Диск выбора точки всегда центрируется на текущей позиции танка: патруль
//! "бродит", а не возвращается к точке spawn'а.

use std::f32::consts::TAU;

use bevy::prelude::*;
use rand::Rng;

use crate::ai::steering::flatten;

/// Вес "назад от препятствия" относительно бокового разброса
pub const ESCAPE_BIAS: f32 = 0.5;

/// Равномерная точка внутри диска радиуса `radius` вокруг `origin`
///
/// Радиус через `sqrt(u)`, иначе точки скучиваются у центра. Y = высота origin.
pub fn sample_patrol_point<R: Rng + ?Sized>(origin: Vec3, radius: f32, rng: &mut R) -> Vec3 {
    let angle = rng.gen::<f32>() * TAU;
    let distance = radius * rng.gen::<f32>().sqrt();
    origin + Vec3::new(angle.cos(), 0.0, angle.sin()) * distance
}

/// Точка после Backup Maneuver: боковой разброс + смещение против направления отъезда
///
/// Дистанция в [0.5, 1.0] × `radius`, так что точка всё ещё внутри диска.
pub fn sample_escape_point<R: Rng + ?Sized>(
    origin: Vec3,
    backup_direction: Vec3,
    radius: f32,
    rng: &mut R,
) -> Vec3 {
    let Some(away) = flatten(-backup_direction) else {
        return sample_patrol_point(origin, radius, rng);
    };
    let lateral = Vec3::Y.cross(away);

    let jitter = rng.gen_range(-1.0..=1.0_f32);
    let direction = (lateral * jitter + away * ESCAPE_BIAS)
        .try_normalize()
        .unwrap_or(away);
    let distance = radius * rng.gen_range(0.5..=1.0_f32);

    origin + direction * distance
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    const TOLERANCE: f32 = 1e-3;

    proptest! {
        #[test]
        fn patrol_point_stays_inside_disk(
            seed in any::<u64>(),
            x in -500.0f32..500.0,
            z in -500.0f32..500.0,
            radius in 0.1f32..100.0,
        ) {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let origin = Vec3::new(x, 0.3, z);

            for _ in 0..16 {
                let point = sample_patrol_point(origin, radius, &mut rng);
                prop_assert!(point.distance(origin) <= radius + TOLERANCE);
                prop_assert_eq!(point.y, origin.y);
            }
        }

        #[test]
        fn escape_point_stays_inside_disk(
            seed in any::<u64>(),
            yaw in 0.0f32..TAU,
            radius in 0.1f32..100.0,
        ) {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let backup_direction = Quat::from_rotation_y(yaw) * Vec3::Z;

            let point = sample_escape_point(Vec3::ZERO, backup_direction, radius, &mut rng);
            let distance = point.length();
            prop_assert!(distance <= radius + TOLERANCE);
            prop_assert!(distance >= radius * 0.5 - TOLERANCE);
        }
    }

    #[test]
    fn test_escape_point_never_lies_along_backup_direction() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let backup_direction = Vec3::Z;

        for _ in 0..100 {
            let point = sample_escape_point(Vec3::ZERO, backup_direction, 10.0, &mut rng);
            // смещение всегда имеет компоненту против backup_direction
            assert!(point.dot(backup_direction) < 0.0, "point = {:?}", point);
        }
    }

    #[test]
    fn test_same_seed_same_points() {
        let mut a = ChaCha8Rng::seed_from_u64(42);
        let mut b = ChaCha8Rng::seed_from_u64(42);
        for _ in 0..10 {
            assert_eq!(
                sample_patrol_point(Vec3::ZERO, 10.0, &mut a),
                sample_patrol_point(Vec3::ZERO, 10.0, &mut b)
            );
        }
    }
}
