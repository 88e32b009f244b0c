//! Entity spawn factories for the transient entities of a session.
//!
//! Missiles, interceptors and blasts live in the hecs world as single
//! component entities. Silos and the planet are owned by the engine.

use hecs::{Entity, World};

use planet_defense_core::blast::Blast;
use planet_defense_core::components::Interceptor;
use planet_defense_core::missile::EnemyMissile;

pub fn spawn_enemy(world: &mut World, missile: EnemyMissile) -> Entity {
    world.spawn((missile,))
}

pub fn spawn_interceptor(world: &mut World, interceptor: Interceptor) -> Entity {
    world.spawn((interceptor,))
}

pub fn spawn_blast(world: &mut World, blast: Blast) -> Entity {
    world.spawn((blast,))
}

/// Stable numeric id for presentation and events.
pub fn entity_id(entity: Entity) -> u64 {
    entity.to_bits().get()
}

/// Number of enemy missiles still in flight.
pub fn alive_enemy_count(world: &World) -> usize {
    world
        .query::<&EnemyMissile>()
        .iter()
        .filter(|(_, m)| m.is_alive())
        .count()
}
