//! Cleanup system: removes missiles, interceptors and blasts that are done.

use hecs::{Entity, World};

use planet_defense_core::blast::Blast;
use planet_defense_core::components::Interceptor;
use planet_defense_core::missile::EnemyMissile;

/// Despawn impacted/destroyed missiles, detonated interceptors and faded
/// blasts. Uses a pre-allocated buffer to avoid per-tick allocation.
pub fn run(world: &mut World, despawn_buffer: &mut Vec<Entity>) {
    despawn_buffer.clear();

    for (entity, missile) in world.query_mut::<&EnemyMissile>() {
        if !missile.is_alive() {
            despawn_buffer.push(entity);
        }
    }

    for (entity, interceptor) in world.query_mut::<&Interceptor>() {
        if interceptor.detonated {
            despawn_buffer.push(entity);
        }
    }

    for (entity, blast) in world.query_mut::<&Blast>() {
        if !blast.alive {
            despawn_buffer.push(entity);
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
