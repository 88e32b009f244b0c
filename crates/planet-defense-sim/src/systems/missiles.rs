//! Enemy missile flight: advance, split MIRV carriers, resolve impacts.

use hecs::World;
use rand::Rng;
use tracing::debug;

use planet_defense_core::components::Planet;
use planet_defense_core::events::GameEvent;
use planet_defense_core::missile::EnemyMissile;

use crate::session::Session;
use crate::silo_ring::SiloRing;
use crate::world_setup;

/// Advance every live missile. Warheads from splits join the world after
/// the pass and do not move until the next tick. Impacts are then checked
/// against the silo ring in order.
///
/// Returns true if this tick destroyed the last surviving silo.
pub fn run<R: Rng + ?Sized>(
    world: &mut World,
    dt: f32,
    rng: &mut R,
    planet: &Planet,
    silos: &mut SiloRing,
    session: &mut Session,
    events: &mut Vec<GameEvent>,
) -> bool {
    let mut warheads = Vec::new();
    let mut impacts = Vec::new();

    for (_entity, missile) in world.query_mut::<&mut EnemyMissile>() {
        if !missile.is_alive() {
            continue;
        }
        missile.update(dt, planet.center);

        if let Some(split) = missile.check_split(planet.center, planet.radius, rng) {
            debug!(warheads = split.len(), "mirv split");
            events.push(GameEvent::MirvSplit {
                x: missile.position.x,
                y: missile.position.y,
                warheads: split.len() as u32,
            });
            warheads.extend(split);
            continue;
        }

        if missile.is_impacted() {
            impacts.push(missile.position);
        }
    }

    for warhead in warheads {
        world_setup::spawn_enemy(world, warhead);
    }

    let mut last_silo_lost = false;
    for point in impacts {
        let silo = silos.check_silo_hit(point, planet);
        events.push(GameEvent::EnemyImpacted {
            x: point.x,
            y: point.y,
            silo,
        });

        let Some(index) = silo else {
            continue;
        };
        let remaining = silos.active_count();
        session.wave_silos_lost += 1;
        session.active_silo_count = remaining;
        debug!(silo = index, remaining, "silo destroyed");
        events.push(GameEvent::SiloDestroyed {
            silo_index: index,
            remaining,
        });
        if remaining == 0 && !last_silo_lost {
            last_silo_lost = true;
            events.push(GameEvent::AllSilosDestroyed);
        }
    }
    last_silo_lost
}
