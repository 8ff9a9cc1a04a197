//! Tests for FSM AI components.

#[cfg(test)]
mod tests {
    use bevy::prelude::*;

    use super::super::fsm::{AIState, AIStateKind, PatrolPhase};

    #[test]
    fn test_ai_state_default() {
        let state = AIState::default();
        assert!(matches!(state, AIState::Patrol(PatrolPhase::Selecting)));
        assert_eq!(state.kind(), AIStateKind::Patrol);
    }

    #[test]
    fn test_patrol_phase_target() {
        let target = Vec3::new(1.0, 0.0, 2.0);
        assert_eq!(PatrolPhase::Selecting.target(), None);
        assert_eq!(PatrolPhase::Moving { target }.target(), Some(target));
        assert_eq!(
            PatrolPhase::Waiting { target, remaining: 1.0 }.target(),
            Some(target)
        );
    }

    #[test]
    fn test_kind_ignores_patrol_phase() {
        let moving = AIState::Patrol(PatrolPhase::Moving { target: Vec3::ONE });
        assert_eq!(moving.kind(), AIState::default().kind());
        assert_ne!(AIState::Chase.kind(), AIState::Attack.kind());
    }
}
