//! Backup Maneuver — таймерный задний ход для выхода из тупика.
//!
//! Триггер (из Patrol): коридор blocked или stuck streak ≥ порога.
//! - направление отъезда = обратный курс, повернутый на случайный угол ±45°
//! - пока эпизод активен, он полностью перекрывает движение Patrol/Chase
//! - ровно через `backup_duration` симулированного времени эпизод завершается,
//!   какие бы препятствия сенсор ни видел в процессе

use bevy::prelude::*;
use rand::Rng;

use crate::ai::steering::{flatten, translate_direction};
use crate::ai::AIConfig;
use crate::components::DriveCommand;

/// Допуск накопления f32 при сравнении с длительностью
const DURATION_EPSILON: f32 = 1e-4;

/// Один активный эпизод отъезда
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct BackupEpisode {
    /// Куда физически едет корма танка (на плоскости земли)
    pub direction: Vec3,
    /// Сколько уже едем (секунды)
    pub elapsed: f32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Reflect)]
pub struct BackupManeuver {
    episode: Option<BackupEpisode>,
}

impl BackupManeuver {
    pub fn is_active(&self) -> bool {
        self.episode.is_some()
    }

    pub fn episode(&self) -> Option<&BackupEpisode> {
        self.episode.as_ref()
    }

    /// Начать эпизод со случайным отклонением в [-max, +max]
    ///
    /// Конфиг, собранный в коде, мог не пройти `validate`: нечисловой или
    /// отрицательный разброс трактуем как 0 (строго назад).
    pub fn begin<R: Rng + ?Sized>(&mut self, heading: Vec3, config: &AIConfig, rng: &mut R) -> Vec3 {
        let max_deviation = config.backup_max_deviation_deg.to_radians();
        let deviation = if max_deviation.is_finite() && max_deviation > 0.0 {
            rng.gen_range(-max_deviation..=max_deviation)
        } else {
            0.0
        };
        self.begin_with_deviation(heading, deviation)
    }

    /// Начать эпизод с заданным отклонением (радианы, yaw вокруг up)
    pub fn begin_with_deviation(&mut self, heading: Vec3, deviation: f32) -> Vec3 {
        let reverse = flatten(-heading).unwrap_or(Vec3::Z);
        let direction = Quat::from_rotation_y(deviation) * reverse;

        self.episode = Some(BackupEpisode {
            direction,
            elapsed: 0.0,
        });
        direction
    }

    /// Команда приводу на этот tick
    ///
    /// Нос разворачивается против `direction`, газ инвертирован: танк едет
    /// задом вдоль `direction`.
    pub fn drive(&self, heading: Vec3) -> DriveCommand {
        match self.episode {
            Some(episode) => translate_direction(-episode.direction, heading).reversed(),
            None => DriveCommand::IDLE,
        }
    }

    /// Продвинуть таймер
    ///
    /// Возвращает завершившийся эпизод ровно один раз — на tick'е, где
    /// накопилось `backup_duration`.
    pub fn advance(&mut self, delta: f32, config: &AIConfig) -> Option<BackupEpisode> {
        let episode = self.episode.as_mut()?;
        episode.elapsed += delta;

        if episode.elapsed + DURATION_EPSILON < config.backup_duration {
            return None;
        }
        self.episode.take()
    }
}
