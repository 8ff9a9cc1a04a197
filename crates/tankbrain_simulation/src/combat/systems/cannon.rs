//! Cannon systems (cooldowns + fire requests).

use bevy::prelude::*;

use crate::combat::{Cannon, FireRequested, ShellFired};

/// System: обратный отсчёт cooldown'ов всех пушек
pub fn tick_cannon_cooldowns(mut cannons: Query<&mut Cannon>, time: Res<Time<Fixed>>) {
    let delta = time.delta_secs();
    for mut cannon in cannons.iter_mut() {
        if cannon.cooldown_timer > 0.0 {
            cannon.tick(delta);
        }
    }
}

/// System: FireRequested → ShellFired
///
/// Пушка на cooldown'е молча игнорирует запрос. Несколько запросов от
/// одного танка за tick дают максимум один выстрел.
pub fn fire_cannons(
    mut requests: EventReader<FireRequested>,
    mut cannons: Query<(&Transform, &mut Cannon)>,
    mut fired: EventWriter<ShellFired>,
) {
    for request in requests.read() {
        let Ok((transform, mut cannon)) = cannons.get_mut(request.shooter) else {
            continue;
        };

        if !cannon.can_fire() {
            continue;
        }

        let origin = transform.transform_point(cannon.muzzle_offset);
        let direction = *transform.forward();

        fired.write(ShellFired {
            shooter: request.shooter,
            origin,
            direction,
            speed: cannon.launch_speed,
        });
        cannon.start_cooldown();

        crate::log(&format!(
            "Tank {:?} fired shell from {:?} (speed {:.1})",
            request.shooter, origin, cannon.launch_speed
        ));
    }
}
