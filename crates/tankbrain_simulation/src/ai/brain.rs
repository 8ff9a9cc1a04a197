//! TankBrain — поведение одного танка на одном fixed tick'е.
//!
//! Порядок внутри tick'а:
//! 1. Нет цели → полная заморозка (никаких переходов и таймеров)
//! 2. Ровно один переход FSM из текущего состояния
//! 3. Активный Backup Maneuver перекрывает движение Patrol/Chase
//! 4. Логика состояния (Patrol / Chase / Attack)
//! 5. Stuck Detector (только если в этом tick'е не было отъезда)
//!
//! Вся логика чистая: мир только через `WorldQuery`, случайность только
//! через переданный RNG. ECS обвязка в `ai::systems::controller`.

use bevy::prelude::*;
use rand::Rng;

use crate::ai::backup::{BackupEpisode, BackupManeuver};
use crate::ai::patrol::{sample_escape_point, sample_patrol_point};
use crate::ai::sensor::{has_line_of_sight, scan_corridor};
use crate::ai::steering::{flatten, translate_direction};
use crate::ai::stuck::StuckDetector;
use crate::ai::{AIConfig, AIState, AIStateKind, PatrolPhase, TargetHandle};
use crate::components::DriveCommand;
use crate::physics::WorldQuery;

const WAIT_EPSILON: f32 = 1e-4;

/// Мозг танка: FSM + patrol + stuck/backup
///
/// Один на spawn, умирает вместе с entity.
#[derive(Component, Debug, Clone, Default, Reflect)]
#[reflect(Component)]
#[require(AIConfig, DriveCommand, TargetHandle)]
pub struct TankBrain {
    pub state: AIState,
    pub stuck: StuckDetector,
    pub backup: BackupManeuver,
}

/// Что танк знает о мире на этом tick'е
#[derive(Debug, Clone, Copy)]
pub struct AgentSense {
    pub position: Vec3,
    pub rotation: Quat,
    /// Позиция цели (`None` — Target Handle не разрешился)
    pub target: Option<Vec3>,
    pub delta: f32,
}

impl AgentSense {
    pub fn from_transform(transform: &Transform, target: Option<Vec3>, delta: f32) -> Self {
        Self {
            position: transform.translation,
            rotation: transform.rotation,
            target,
            delta,
        }
    }

    fn heading(&self) -> Vec3 {
        flatten(self.rotation * Vec3::NEG_Z).unwrap_or(Vec3::NEG_Z)
    }
}

/// Переход FSM, случившийся на этом tick'е
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateTransition {
    pub from: AIStateKind,
    pub to: AIStateKind,
}

/// Результат tick'а для актуаторов
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AgentOutput {
    pub drive: DriveCommand,
    /// Запрос выстрела (пушка сама решает, готова ли)
    pub fire: bool,
    pub transition: Option<StateTransition>,
    /// Направление отъезда, если Backup Maneuver начался на этом tick'е
    pub backup_started: Option<Vec3>,
}

impl AgentOutput {
    fn drive(drive: DriveCommand) -> Self {
        Self {
            drive,
            ..default()
        }
    }
}

impl TankBrain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_backing_up(&self) -> bool {
        self.backup.is_active()
    }

    /// Один fixed tick
    pub fn tick<Q: WorldQuery, R: Rng + ?Sized>(
        &mut self,
        config: &AIConfig,
        sense: &AgentSense,
        world: &Q,
        rng: &mut R,
    ) -> AgentOutput {
        let Some(target) = sense.target else {
            return AgentOutput::default();
        };

        let transition = self.evaluate_transition(config, sense, target, world);

        let backing_up_before = self.backup.is_active();
        let heading = sense.heading();

        let mut output = if backing_up_before {
            let drive = self.backup.drive(heading);
            self.advance_backup(config, sense, rng);

            match self.state {
                AIState::Attack => self.attack(config, sense, target),
                _ => AgentOutput::drive(drive),
            }
        } else {
            match self.state {
                AIState::Patrol(_) => AgentOutput::drive(self.patrol(config, sense, heading, world, rng)),
                AIState::Chase => AgentOutput::drive(self.chase(sense, target, heading)),
                AIState::Attack => self.attack(config, sense, target),
            }
        };

        if !backing_up_before {
            match self.backup.episode() {
                Some(episode) => output.backup_started = Some(episode.direction),
                None => {
                    self.stuck.observe(sense.position, &output.drive, sense.delta, config);
                }
            }
        }

        output.transition = transition;
        output
    }

    /// Ровно один переход из текущего состояния (или ни одного)
    fn evaluate_transition<Q: WorldQuery>(
        &mut self,
        config: &AIConfig,
        sense: &AgentSense,
        target: Vec3,
        world: &Q,
    ) -> Option<StateTransition> {
        let distance = sense.position.distance(target);
        let from = self.state.kind();

        let next = match self.state {
            AIState::Patrol(_) => {
                let in_range = distance < config.chase_distance;
                let visible = !config.require_line_of_sight
                    || has_line_of_sight(world, sense.position, target, config);
                (in_range && visible).then_some(AIState::Chase)
            }
            AIState::Chase => {
                if distance < config.shoot_distance {
                    Some(AIState::Attack)
                } else if distance > config.chase_distance {
                    // Вход в Patrol: новая точка вокруг текущей позиции
                    Some(AIState::Patrol(PatrolPhase::Selecting))
                } else {
                    None
                }
            }
            AIState::Attack => (distance > config.shoot_distance).then_some(AIState::Chase),
        }?;

        self.state = next;
        Some(StateTransition {
            from,
            to: next.kind(),
        })
    }

    fn patrol<Q: WorldQuery, R: Rng + ?Sized>(
        &mut self,
        config: &AIConfig,
        sense: &AgentSense,
        heading: Vec3,
        world: &Q,
        rng: &mut R,
    ) -> DriveCommand {
        let AIState::Patrol(phase) = self.state else {
            return DriveCommand::IDLE;
        };

        let phase = match phase {
            PatrolPhase::Selecting => PatrolPhase::Moving {
                target: sample_patrol_point(sense.position, config.patrol_radius, rng),
            },
            other => other,
        };

        match phase {
            PatrolPhase::Selecting => DriveCommand::IDLE,

            PatrolPhase::Moving { target } => {
                let offset = Vec3::new(target.x - sense.position.x, 0.0, target.z - sense.position.z);
                let distance = offset.length();

                if distance < config.arrival_threshold {
                    self.state = AIState::Patrol(PatrolPhase::Waiting {
                        target,
                        remaining: config.patrol_wait_time,
                    });
                    return DriveCommand::IDLE;
                }

                self.state = AIState::Patrol(PatrolPhase::Moving { target });
                let direction = offset / distance;

                let reading = scan_corridor(world, sense.position, direction, config);
                let stuck = self.stuck.streak() >= config.stuck_streak_threshold;
                if reading.is_blocked() || stuck {
                    let backup_direction = self.backup.begin(heading, config, rng);
                    crate::log(&format!(
                        "AI: backup started (rays {}/3, stuck streak {}), reversing along {:?}",
                        reading.hit_count(),
                        self.stuck.streak(),
                        backup_direction
                    ));

                    let drive = self.backup.drive(heading);
                    self.advance_backup(config, sense, rng);
                    return drive;
                }

                translate_direction(direction, heading)
            }

            PatrolPhase::Waiting { target, remaining } => {
                let remaining = remaining - sense.delta;
                self.state = if remaining <= WAIT_EPSILON {
                    AIState::Patrol(PatrolPhase::Moving {
                        target: sample_patrol_point(sense.position, config.patrol_radius, rng),
                    })
                } else {
                    AIState::Patrol(PatrolPhase::Waiting { target, remaining })
                };
                DriveCommand::IDLE
            }
        }
    }

    /// Chase: прямо на цель, без obstacle sensing
    fn chase(&self, sense: &AgentSense, target: Vec3, heading: Vec3) -> DriveCommand {
        translate_direction(target - sense.position, heading)
    }

    /// Attack: стоим, плавно доворачиваем корпус, стреляем
    fn attack(&self, config: &AIConfig, sense: &AgentSense, target: Vec3) -> AgentOutput {
        let facing = match flatten(target - sense.position) {
            Some(look) => {
                // forward = -Z: yaw θ переводит -Z в (-sin θ, 0, -cos θ)
                let desired = Quat::from_rotation_y(f32::atan2(-look.x, -look.z));
                let factor = (config.attack_turn_gain * sense.delta).clamp(0.0, 1.0);
                sense.rotation.slerp(desired, factor)
            }
            None => sense.rotation,
        };

        AgentOutput {
            drive: DriveCommand::hold_facing(facing),
            fire: true,
            ..default()
        }
    }

    fn advance_backup<R: Rng + ?Sized>(&mut self, config: &AIConfig, sense: &AgentSense, rng: &mut R) {
        if let Some(episode) = self.backup.advance(sense.delta, config) {
            self.finish_backup(config, sense, episode, rng);
        }
    }

    /// Конец отъезда: streak = 0, новая patrol точка в сторону от препятствия
    fn finish_backup<R: Rng + ?Sized>(
        &mut self,
        config: &AIConfig,
        sense: &AgentSense,
        episode: BackupEpisode,
        rng: &mut R,
    ) {
        self.stuck.reset(sense.position);

        if let AIState::Patrol(_) = self.state {
            let target = sample_escape_point(sense.position, episode.direction, config.patrol_radius, rng);
            self.state = AIState::Patrol(PatrolPhase::Moving { target });
        }

        crate::log(&format!(
            "AI: backup finished after {:.2}s in {:?}",
            episode.elapsed,
            self.state.kind()
        ));
    }
}
