//! Stuck Detector — leaky counter "едем, но не двигаемся".
//!
//! Раз в окно (`stuck_sample_window`) сравниваем позицию с прошлой выборкой:
//! - смещение < `stuck_distance` и была команда ехать → streak += 1
//! - иначе streak -= 1 (не ниже нуля)
//!
//! Одиночная помеха рассасывается, устойчивая копится за несколько окон.

use bevy::prelude::*;

use crate::ai::AIConfig;
use crate::components::DriveCommand;

/// Допуск накопления f32 при сравнении с длиной окна
const WINDOW_EPSILON: f32 = 1e-4;

#[derive(Debug, Clone, Copy, Default, PartialEq, Reflect)]
pub struct StuckDetector {
    streak: u32,
    /// Позиция на начало текущего окна (`None` до первого tick'а)
    last_sample: Option<Vec3>,
    window_elapsed: f32,
    /// Была ли в окне ненулевая команда газа
    move_intent: bool,
}

impl StuckDetector {
    pub fn streak(&self) -> u32 {
        self.streak
    }

    pub fn window_elapsed(&self) -> f32 {
        self.window_elapsed
    }

    /// Учесть один tick
    ///
    /// Возвращает новый streak, если на этом tick'е закрылось окно.
    pub fn observe(
        &mut self,
        position: Vec3,
        command: &DriveCommand,
        delta: f32,
        config: &AIConfig,
    ) -> Option<u32> {
        let Some(last_sample) = self.last_sample else {
            self.restart(position);
            self.move_intent = command.wants_to_move();
            return None;
        };

        self.window_elapsed += delta;
        self.move_intent |= command.wants_to_move();

        if self.window_elapsed + WINDOW_EPSILON < config.stuck_sample_window {
            return None;
        }

        let displacement = position.distance(last_sample);
        if displacement < config.stuck_distance && self.move_intent {
            self.streak += 1;
        } else {
            self.streak = self.streak.saturating_sub(1);
        }

        self.restart(position);
        Some(self.streak)
    }

    /// Начать новое окно от `position`, streak не трогаем
    pub fn restart(&mut self, position: Vec3) {
        self.last_sample = Some(position);
        self.window_elapsed = 0.0;
        self.move_intent = false;
    }

    /// Новое окно + streak = 0 (конец Backup Maneuver)
    pub fn reset(&mut self, position: Vec3) {
        self.streak = 0;
        self.restart(position);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELTA: f32 = 0.25;

    fn driving() -> DriveCommand {
        DriveCommand::new(1.0, 0.0)
    }

    /// Прогнать одно окно (4 tick'а по 0.25с), смещаясь на `step` за tick
    fn run_window(
        detector: &mut StuckDetector,
        position: &mut Vec3,
        step: f32,
        command: DriveCommand,
        config: &AIConfig,
    ) -> Option<u32> {
        let mut result = None;
        for _ in 0..4 {
            *position += Vec3::NEG_Z * step;
            result = detector.observe(*position, &command, DELTA, config);
        }
        result
    }

    fn anchored(position: Vec3) -> StuckDetector {
        let mut detector = StuckDetector::default();
        detector.observe(position, &DriveCommand::IDLE, DELTA, &AIConfig::default());
        detector
    }

    #[test]
    fn test_blocked_while_driving_increments() {
        let config = AIConfig::default();
        let mut position = Vec3::ZERO;
        let mut detector = anchored(position);

        assert_eq!(run_window(&mut detector, &mut position, 0.0, driving(), &config), Some(1));
        assert_eq!(run_window(&mut detector, &mut position, 0.01, driving(), &config), Some(2));
        assert_eq!(detector.streak(), 2);
    }

    #[test]
    fn test_standing_still_without_intent_does_not_count() {
        let config = AIConfig::default();
        let mut position = Vec3::ZERO;
        let mut detector = anchored(position);

        run_window(&mut detector, &mut position, 0.0, DriveCommand::IDLE, &config);
        assert_eq!(detector.streak(), 0);
    }

    #[test]
    fn test_progress_decays_to_zero_and_never_below() {
        let config = AIConfig::default();
        let mut position = Vec3::ZERO;
        let mut detector = anchored(position);

        for _ in 0..3 {
            run_window(&mut detector, &mut position, 0.0, driving(), &config);
        }
        assert_eq!(detector.streak(), 3);

        // N окон с нормальным смещением → streak доходит до 0 за N уменьшений
        for expected in [2, 1, 0, 0, 0] {
            let streak = run_window(&mut detector, &mut position, 1.0, driving(), &config);
            assert_eq!(streak, Some(expected));
        }
    }

    #[test]
    fn test_window_closes_only_after_full_window() {
        let config = AIConfig::default();
        let mut detector = anchored(Vec3::ZERO);

        for _ in 0..3 {
            assert_eq!(detector.observe(Vec3::ZERO, &driving(), DELTA, &config), None);
        }
        assert_eq!(detector.observe(Vec3::ZERO, &driving(), DELTA, &config), Some(1));
        assert_eq!(detector.window_elapsed(), 0.0);
    }

    #[test]
    fn test_reset_clears_streak() {
        let config = AIConfig::default();
        let mut position = Vec3::ZERO;
        let mut detector = anchored(position);
        run_window(&mut detector, &mut position, 0.0, driving(), &config);

        detector.reset(Vec3::ONE);
        assert_eq!(detector.streak(), 0);
        assert_eq!(detector.window_elapsed(), 0.0);
    }
}
