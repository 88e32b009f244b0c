//! Interceptor flight. Each arrival detonates into a blast.

use hecs::World;

use planet_defense_core::blast::Blast;
use planet_defense_core::components::Interceptor;
use planet_defense_core::events::GameEvent;

use crate::world_setup;

/// Advance interceptors and spawn a blast of `blast_radius` at every
/// detonation point. Detonated interceptors are left for cleanup.
pub fn run(world: &mut World, dt: f32, blast_radius: f32, events: &mut Vec<GameEvent>) {
    let mut detonations = Vec::new();
    for (_entity, interceptor) in world.query_mut::<&mut Interceptor>() {
        if let Some(point) = interceptor.update(dt) {
            detonations.push(point);
        }
    }

    for point in detonations {
        events.push(GameEvent::InterceptorDetonated {
            x: point.x,
            y: point.y,
        });
        world_setup::spawn_blast(world, Blast::new(point, blast_radius));
    }
}
