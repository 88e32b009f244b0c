//! Autopilot: a simple player that drives the engine through commands.
//!
//! While a wave is running it aims every ready silo at the live missile
//! closest to the planet, leading the target by the interceptor flight time.
//! In the upgrade shop it buys the cheapest affordable upgrade, then starts
//! the next wave.

use std::collections::HashMap;

use glam::Vec2;

use planet_defense_core::commands::PlayerCommand;
use planet_defense_core::enums::GamePhase;
use planet_defense_core::upgrades::UpgradeId;
use planet_defense_sim::SimulationEngine;

/// Seconds before a missile that survived a shot is targeted again.
const RETARGET_DELAY: f64 = 1.2;

#[derive(Debug, Default)]
pub struct Autopilot {
    /// Missile id to the sim time it was last shot at.
    engaged: HashMap<u64, f64>,
}

impl Autopilot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands for the coming tick.
    pub fn plan(&mut self, engine: &SimulationEngine) -> Vec<PlayerCommand> {
        match engine.phase() {
            GamePhase::Playing if engine.wave_active() => self.plan_shots(engine),
            GamePhase::UpgradeShop => vec![plan_shop(engine)],
            _ => Vec::new(),
        }
    }

    fn plan_shots(&mut self, engine: &SimulationEngine) -> Vec<PlayerCommand> {
        let now = engine.time().elapsed_secs;
        let snapshot = engine.snapshot();
        let planet = engine.planet();
        let speed = engine.session().effective_interceptor_speed();

        self.engaged
            .retain(|id, _| snapshot.missiles.iter().any(|m| m.id == *id));

        let mut targets: Vec<_> = snapshot
            .missiles
            .iter()
            .filter(|m| {
                self.engaged
                    .get(&m.id)
                    .map_or(true, |fired_at| now - fired_at >= RETARGET_DELAY)
            })
            .collect();
        targets.sort_by(|a, b| {
            let da = Vec2::new(a.x, a.y).distance_squared(planet.center);
            let db = Vec2::new(b.x, b.y).distance_squared(planet.center);
            da.total_cmp(&db)
        });

        let mut commands = Vec::new();
        for missile in targets.into_iter().take(engine.silos().ready_count()) {
            let position = Vec2::new(missile.x, missile.y);
            let velocity = Vec2::new(missile.vx, missile.vy);
            let Some(silo) = engine
                .silos()
                .nearest_ready(position)
                .and_then(|i| engine.silos().get(i))
            else {
                break;
            };

            let flight_time = silo.position.distance(position) / speed;
            let mut aim = position + velocity * flight_time;
            if planet.contains(aim) {
                aim = position;
            }
            if planet.contains(aim) {
                continue;
            }

            self.engaged.insert(missile.id, now);
            commands.push(PlayerCommand::Fire { x: aim.x, y: aim.y });
        }
        commands
    }
}

fn plan_shop(engine: &SimulationEngine) -> PlayerCommand {
    let session = engine.session();
    let cheapest = UpgradeId::ALL
        .into_iter()
        .filter(|&id| session.can_afford_upgrade(id) && !session.is_upgrade_maxed(id))
        .filter_map(|id| session.upgrade_cost(id).map(|cost| (id, cost)))
        .min_by_key(|&(_, cost)| cost);

    match cheapest {
        Some((upgrade, _)) => PlayerCommand::PurchaseUpgrade { upgrade },
        None => PlayerCommand::StartNextWave,
    }
}
