//! Target resolution: Target Handle → entity с Transform.

use bevy::prelude::*;

use crate::ai::{TankBrain, TargetHandle};
use crate::components::Player;

/// Система: заполнить пустые Target Handle ближайшим `Player`
///
/// Handle, указывающий на despawned entity, сбрасывается и тут же
/// переразрешается. Нет игроков → handle остаётся пустым, мозг замирает.
pub fn acquire_player_targets(
    mut tanks: Query<(Entity, &Transform, &mut TargetHandle), With<TankBrain>>,
    players: Query<(Entity, &Transform), With<Player>>,
    alive: Query<(), With<Transform>>,
) {
    for (entity, transform, mut handle) in tanks.iter_mut() {
        if let Some(target) = handle.target {
            if alive.contains(target) {
                continue;
            }
            crate::log(&format!("AI: {:?} target {:?} is gone, clearing handle", entity, target));
            handle.clear();
        }

        let position = transform.translation;
        let nearest = players
            .iter()
            .filter(|(player, _)| *player != entity)
            .min_by(|(a, ta), (b, tb)| {
                let da = ta.translation.distance_squared(position);
                let db = tb.translation.distance_squared(position);
                // Равные дистанции: меньший index, чтобы порядок не зависел от archetype
                da.total_cmp(&db).then(a.index().cmp(&b.index()))
            });

        if let Some((player, _)) = nearest {
            handle.target = Some(player);
            crate::log(&format!("AI: {:?} acquired target {:?}", entity, player));
        }
    }
}
