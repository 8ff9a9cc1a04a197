//! AIConfig — все пороги и длительности поведения танка.

use std::path::Path;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Ошибки конфигурации AI
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("`{field}` must be positive, got {value}")]
    NotPositive { field: &'static str, value: f32 },

    #[error("`{field}` must not be negative, got {value}")]
    Negative { field: &'static str, value: f32 },

    #[error("`{field}` must be a finite number, got {value}")]
    NotFinite { field: &'static str, value: f32 },

    #[error("shoot_distance ({shoot}) must be less than chase_distance ({chase})")]
    ShootBeyondChase { shoot: f32, chase: f32 },

    #[error("stuck_streak_threshold must be at least 1")]
    ZeroStreakThreshold,

    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Параметры AI танка
///
/// Все поля имеют defaults; в JSON можно указать только нужные.
#[derive(Component, Debug, Clone, PartialEq, Reflect, Serialize, Deserialize)]
#[reflect(Component)]
#[serde(default)]
pub struct AIConfig {
    /// Радиус диска, в котором выбирается patrol точка (метры)
    pub patrol_radius: f32,
    /// Patrol → Chase ближе этой дистанции, Chase → Patrol дальше (метры)
    pub chase_distance: f32,
    /// Chase → Attack ближе этой дистанции, Attack → Chase дальше (метры)
    pub shoot_distance: f32,
    /// Пауза на достигнутой patrol точке (секунды)
    pub patrol_wait_time: f32,
    /// Длина лучей Obstacle Sensor (метры)
    pub check_distance: f32,
    /// Смещение меньше этого за окно = "не едем" (метры)
    pub stuck_distance: f32,
    /// Длительность Backup Maneuver (секунды)
    pub backup_duration: f32,

    /// Patrol точка достигнута ближе этой дистанции (метры)
    pub arrival_threshold: f32,
    /// Окно выборки Stuck Detector (секунды)
    pub stuck_sample_window: f32,
    /// Stuck streak, начиная с которого запускается Backup
    pub stuck_streak_threshold: u32,
    /// Высота origin лучей над основанием танка (метры)
    pub sensor_height: f32,
    /// Угол боковых лучей относительно центрального (градусы)
    pub side_ray_angle_deg: f32,
    /// Максимальный случайный разворот направления отъезда (градусы)
    pub backup_max_deviation_deg: f32,
    /// Скорость доворота на цель в Attack (коэффициент slerp в секунду)
    pub attack_turn_gain: f32,
    /// Patrol → Chase только при прямой видимости цели
    pub require_line_of_sight: bool,
}

impl Default for AIConfig {
    fn default() -> Self {
        Self {
            patrol_radius: 10.0,
            chase_distance: 15.0,
            shoot_distance: 12.0,
            patrol_wait_time: 2.0,
            check_distance: 2.5,
            stuck_distance: 0.2,
            backup_duration: 1.5,
            arrival_threshold: 1.0,
            stuck_sample_window: 1.0,
            stuck_streak_threshold: 2,
            sensor_height: 0.5,
            side_ray_angle_deg: 30.0,
            backup_max_deviation_deg: 45.0,
            attack_turn_gain: 5.0,
            require_line_of_sight: false,
        }
    }
}

impl AIConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("patrol_radius", self.patrol_radius),
            ("chase_distance", self.chase_distance),
            ("shoot_distance", self.shoot_distance),
            ("check_distance", self.check_distance),
            ("stuck_distance", self.stuck_distance),
            ("backup_duration", self.backup_duration),
            ("arrival_threshold", self.arrival_threshold),
            ("stuck_sample_window", self.stuck_sample_window),
            ("attack_turn_gain", self.attack_turn_gain),
        ];
        for (field, value) in positive {
            if value.is_nan() || value <= 0.0 {
                return Err(ConfigError::NotPositive { field, value });
            }
        }

        // Углы и высота лучей идут прямо в геометрию и RNG диапазон
        let finite = [
            ("sensor_height", self.sensor_height),
            ("side_ray_angle_deg", self.side_ray_angle_deg),
            ("backup_max_deviation_deg", self.backup_max_deviation_deg),
        ];
        for (field, value) in finite {
            if !value.is_finite() {
                return Err(ConfigError::NotFinite { field, value });
            }
        }

        let non_negative = [
            ("patrol_wait_time", self.patrol_wait_time),
            ("backup_max_deviation_deg", self.backup_max_deviation_deg),
        ];
        for (field, value) in non_negative {
            if value.is_nan() || value < 0.0 {
                return Err(ConfigError::Negative { field, value });
            }
        }

        if self.shoot_distance >= self.chase_distance {
            return Err(ConfigError::ShootBeyondChase {
                shoot: self.shoot_distance,
                chase: self.chase_distance,
            });
        }

        if self.stuck_streak_threshold == 0 {
            return Err(ConfigError::ZeroStreakThreshold);
        }

        Ok(())
    }

    /// Распарсить и провалидировать JSON
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Загрузить JSON файл конфигурации
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }
}
