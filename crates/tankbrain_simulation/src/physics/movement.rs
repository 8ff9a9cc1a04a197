//! Привод танка (Vehicle Actuator) для headless симуляции
//!
//! Архитектура:
//! - AI пишет `DriveCommand` (forward/turn в [-1, 1])
//! - `apply_drive_commands` интегрирует команду в `Transform`
//! - Поворот: yaw вокруг Y, движение: вдоль forward корпуса
//!
//! Детерминизм: fixed timestep (`Time<Fixed>`), без Rapier forces.

use bevy::prelude::*;

use crate::components::DriveCommand;
use crate::physics::ObstacleField;

/// Параметры привода танка
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct TankMotor {
    /// Скорость движения (m/s)
    pub move_speed: f32,
    /// Скорость поворота (градусы/сек)
    pub turn_speed: f32,
    /// Радиус корпуса для блокировки об препятствия (метры)
    pub hull_radius: f32,
}

impl Default for TankMotor {
    fn default() -> Self {
        Self {
            move_speed: 12.0,
            turn_speed: 180.0,
            hull_radius: 0.9,
        }
    }
}

/// Применить одну команду к transform за `delta` секунд
///
/// Возвращает `true`, если корпус сдвинулся (движение не упёрлось в препятствие).
pub fn integrate_drive(
    motor: &TankMotor,
    command: &DriveCommand,
    transform: &mut Transform,
    delta: f32,
    obstacles: Option<&ObstacleField>,
) -> bool {
    match command.facing {
        Some(facing) => transform.rotation = facing,
        None => {
            let yaw = command.turn * motor.turn_speed.to_radians() * delta;
            transform.rotate_y(yaw);
        }
    }

    let step = command.forward * motor.move_speed * delta;
    if step == 0.0 {
        return false;
    }

    let heading = crate::ai::steering::heading_of(transform);
    let next = transform.translation + heading * step;

    // Упёрлись в препятствие → стоим (если уже внутри — выпускаем)
    if let Some(field) = obstacles {
        let blocked_now = field.blocks(transform.translation, motor.hull_radius);
        if !blocked_now && field.blocks(next, motor.hull_radius) {
            return false;
        }
    }

    transform.translation = next;
    true
}

/// Система: DriveCommand → Transform
///
/// Работает в FixedUpdate после AI, до следующего tick'а.
pub fn apply_drive_commands(
    mut tanks: Query<(&TankMotor, &DriveCommand, &mut Transform)>,
    obstacles: Option<Res<ObstacleField>>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();
    let field = obstacles.as_deref();

    for (motor, command, mut transform) in tanks.iter_mut() {
        integrate_drive(motor, command, &mut transform, delta, field);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::Obstacle;

    const DELTA: f32 = 1.0 / 60.0;

    #[test]
    fn test_forward_moves_along_heading() {
        let motor = TankMotor::default();
        let mut transform = Transform::default(); // forward = -Z

        let moved = integrate_drive(&motor, &DriveCommand::new(1.0, 0.0), &mut transform, 0.5, None);

        assert!(moved);
        assert!((transform.translation.z + 6.0).abs() < 1e-4, "z = {}", transform.translation.z);
        assert!(transform.translation.x.abs() < 1e-4);
    }

    #[test]
    fn test_turn_rotates_counter_clockwise() {
        let motor = TankMotor::default();
        let mut transform = Transform::default();

        // 180°/s * 0.5s = 90° влево: -Z → -X
        integrate_drive(&motor, &DriveCommand::new(0.0, 1.0), &mut transform, 0.5, None);

        let forward = transform.forward();
        assert!((forward.x + 1.0).abs() < 1e-4, "forward = {:?}", forward);
    }

    #[test]
    fn test_facing_overrides_turn() {
        let motor = TankMotor::default();
        let mut transform = Transform::default();
        let facing = Quat::from_rotation_y(1.0);

        integrate_drive(&motor, &DriveCommand::hold_facing(facing), &mut transform, DELTA, None);

        assert!(transform.rotation.angle_between(facing) < 1e-4);
        assert_eq!(transform.translation, Vec3::ZERO);
    }

    #[test]
    fn test_obstacle_blocks_motion() {
        let motor = TankMotor::default();
        let field = ObstacleField::new().with(Obstacle::cuboid(
            Vec3::new(0.0, 0.0, -1.5),
            Vec3::new(2.0, 1.0, 0.5),
        ));
        let mut transform = Transform::default();

        let moved = integrate_drive(
            &motor,
            &DriveCommand::new(1.0, 0.0),
            &mut transform,
            DELTA,
            Some(&field),
        );

        assert!(!moved);
        assert_eq!(transform.translation, Vec3::ZERO);
    }
}
