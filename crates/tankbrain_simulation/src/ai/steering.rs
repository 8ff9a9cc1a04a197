//! Direction-to-Actuation Translator
//!
//! Единственная точка перевода "куда хочу ехать" (world direction) в
//! forward/turn скаляры привода. Используется Patrol, Chase и Backup, чтобы
//! управление ощущалось одинаково во всех состояниях.

use bevy::prelude::*;

use crate::components::DriveCommand;

/// Ошибка курса, при которой поворот насыщается (|turn| = 1)
pub const TURN_SATURATION_ANGLE: f32 = std::f32::consts::FRAC_PI_4;

/// Проекция на плоскость земли (XZ), нормализованная
///
/// `None` для нулевых/вертикальных векторов.
pub fn flatten(direction: Vec3) -> Option<Vec3> {
    Vec3::new(direction.x, 0.0, direction.z).try_normalize()
}

/// Курс корпуса: forward transform'а на плоскости земли
pub fn heading_of(transform: &Transform) -> Vec3 {
    flatten(*transform.forward()).unwrap_or(Vec3::NEG_Z)
}

/// Угол со знаком от `from` к `to` вокруг `axis` (радианы)
///
/// Знак по правилу правой руки: положительный = против часовой стрелки,
/// если смотреть с конца `axis`. Ровно 180° даёт положительный знак.
pub fn signed_angle(from: Vec3, to: Vec3, axis: Vec3) -> f32 {
    let angle = from.angle_between(to);
    if axis.dot(from.cross(to)) < 0.0 {
        -angle
    } else {
        angle
    }
}

/// Желаемое направление + текущий курс → команда приводу
///
/// - `forward = dot(heading, direction)`
/// - `turn = signed_angle / 45°`
///
/// Оба скаляра clamp'ятся в [-1, 1]. Вырожденное направление = стоим.
pub fn translate_direction(direction: Vec3, heading: Vec3) -> DriveCommand {
    let Some(direction) = flatten(direction) else {
        return DriveCommand::IDLE;
    };
    let heading = flatten(heading).unwrap_or(Vec3::NEG_Z);

    let forward = heading.dot(direction);
    let turn = signed_angle(heading, direction, Vec3::Y) / TURN_SATURATION_ANGLE;

    DriveCommand::new(forward, turn)
}
