//! Snapshot system: queries the world and builds a complete `GameSnapshot`.
//!
//! Read-only; it never modifies the world.

use hecs::World;

use planet_defense_core::blast::Blast;
use planet_defense_core::components::{Interceptor, Planet};
use planet_defense_core::enums::GamePhase;
use planet_defense_core::missile::EnemyMissile;
use planet_defense_core::silo::Silo;
use planet_defense_core::state::*;
use planet_defense_core::types::SimTime;

use crate::session::Session;
use crate::world_setup::entity_id;

pub fn build_snapshot(
    world: &World,
    time: &SimTime,
    phase: GamePhase,
    planet: &Planet,
    silos: &[Silo],
    session: &Session,
) -> GameSnapshot {
    GameSnapshot {
        time: *time,
        phase,
        planet: PlanetView {
            x: planet.center.x,
            y: planet.center.y,
            radius: planet.radius,
            rotation: planet.rotation,
        },
        silos: silos.iter().map(build_silo).collect(),
        missiles: build_missiles(world),
        interceptors: build_interceptors(world),
        blasts: build_blasts(world),
        score: build_score(session),
    }
}

fn build_silo(silo: &Silo) -> SiloView {
    SiloView {
        index: silo.index,
        state: silo.state,
        x: silo.position.x,
        y: silo.position.y,
        angle: silo.angle,
        reload_progress: silo.reload_progress(),
    }
}

fn build_missiles(world: &World) -> Vec<MissileView> {
    world
        .query::<&EnemyMissile>()
        .iter()
        .filter(|(_, m)| m.is_alive())
        .map(|(entity, m)| {
            let velocity = m.velocity();
            MissileView {
                id: entity_id(entity),
                kind: m.kind(),
                x: m.position.x,
                y: m.position.y,
                vx: velocity.x,
                vy: velocity.y,
                target_x: m.target.x,
                target_y: m.target.y,
                trail: m.trail.points().map(|p| [p.x, p.y]).collect(),
            }
        })
        .collect()
}

fn build_interceptors(world: &World) -> Vec<InterceptorView> {
    world
        .query::<&Interceptor>()
        .iter()
        .filter(|(_, i)| !i.detonated)
        .map(|(entity, i)| InterceptorView {
            id: entity_id(entity),
            x: i.position.x,
            y: i.position.y,
            target_x: i.target.x,
            target_y: i.target.y,
            silo_index: i.silo_index,
            progress: i.progress(),
        })
        .collect()
}

fn build_blasts(world: &World) -> Vec<BlastView> {
    world
        .query::<&Blast>()
        .iter()
        .filter(|(_, b)| b.alive)
        .map(|(_, b)| BlastView {
            x: b.center.x,
            y: b.center.y,
            radius: b.current_radius,
            phase: b.phase,
            opacity: b.opacity(),
            chain_depth: b.chain_depth,
        })
        .collect()
}

fn build_score(session: &Session) -> ScoreView {
    ScoreView {
        wave: session.current_wave,
        score: session.score,
        high_score: session.high_score,
        shots_fired: session.shots_fired,
        shots_hit: session.shots_hit,
        enemies_destroyed: session.total_enemies_destroyed,
        active_silos: session.active_silo_count,
        upgrades: session.upgrades,
        interceptor_speed: session.effective_interceptor_speed(),
        blast_radius: session.effective_blast_radius(),
        reload_time: session.effective_reload_time(),
    }
}
