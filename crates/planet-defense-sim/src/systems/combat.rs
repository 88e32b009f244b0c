//! Blast resolution: advance blasts and test every lethal one against the
//! live missiles. Kills are scored through the session.

use hecs::World;
use tracing::debug;

use planet_defense_core::blast::Blast;
use planet_defense_core::constants::{MAX_CHAIN_DEPTH, MULTI_KILL_BONUS};
use planet_defense_core::events::GameEvent;
use planet_defense_core::missile::EnemyMissile;

use crate::session::Session;
use crate::world_setup;

pub fn run(
    world: &mut World,
    dt: f32,
    session: &mut Session,
    events: &mut Vec<GameEvent>,
    chain_reactions: bool,
) {
    let mut lethal = Vec::new();
    for (_entity, blast) in world.query_mut::<&mut Blast>() {
        blast.update(dt);
        if blast.lethal {
            lethal.push(*blast);
        }
    }

    let base_radius = session.effective_blast_radius();
    let mut chained = Vec::new();

    for blast in &lethal {
        let mut kills = 0u32;
        for (_entity, missile) in world.query_mut::<&mut EnemyMissile>() {
            if !missile.is_alive() || !blast.is_in_range(missile.position) {
                continue;
            }

            let points = missile.kill_points();
            missile.kill();
            session.add_score(points);
            session.record_shot_hit();
            session.total_enemies_destroyed += 1;
            kills += 1;

            events.push(GameEvent::EnemyDestroyed {
                kind: missile.kind(),
                x: missile.position.x,
                y: missile.position.y,
                points,
            });
            events.push(GameEvent::ScoreChanged {
                score: session.score,
            });

            if chain_reactions && blast.chain_depth < MAX_CHAIN_DEPTH {
                chained.push(Blast::chained(
                    missile.position,
                    base_radius,
                    blast.chain_depth + 1,
                ));
            }
        }

        if kills >= 2 {
            let bonus = MULTI_KILL_BONUS * kills;
            session.add_score(bonus);
            debug!(kills, bonus, "multi-kill");
            events.push(GameEvent::MultiKill {
                count: kills,
                bonus,
                x: blast.center.x,
                y: blast.center.y,
            });
            events.push(GameEvent::ScoreChanged {
                score: session.score,
            });
        }
    }

    for blast in chained {
        events.push(GameEvent::ChainReaction {
            x: blast.center.x,
            y: blast.center.y,
            depth: blast.chain_depth,
        });
        world_setup::spawn_blast(world, blast);
    }
}
