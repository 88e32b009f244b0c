//! Simulation engine: the core of the game.
//!
//! `SimulationEngine` owns the hecs world, the planet and silo ring, the
//! session and the wave spawner. It processes queued player commands, runs
//! all systems in a fixed order each tick and collects outbound events.
//! Completely headless and deterministic for a given seed.

use std::collections::VecDeque;

use glam::Vec2;
use hecs::World;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

use planet_defense_core::commands::PlayerCommand;
use planet_defense_core::components::{Interceptor, Planet};
use planet_defense_core::constants::*;
use planet_defense_core::enums::{GamePhase, ShotRejection};
use planet_defense_core::events::GameEvent;
use planet_defense_core::missile::EnemyMissile;
use planet_defense_core::state::GameSnapshot;
use planet_defense_core::types::SimTime;
use planet_defense_core::upgrades::UpgradeId;

use crate::session::Session;
use crate::silo_ring::SiloRing;
use crate::systems;
use crate::systems::wave_spawner::{SpawnContext, WaveSpawner};
use crate::world_setup;

/// Configuration for starting a new simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed and commands = same game.
    pub seed: u64,
    pub screen_width: f32,
    pub screen_height: f32,
    /// Kills by a blast spawn smaller secondary blasts.
    pub chain_reactions: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            screen_width: GAME_WIDTH,
            screen_height: GAME_HEIGHT,
            chain_reactions: false,
        }
    }
}

impl SimConfig {
    fn screen(&self) -> Vec2 {
        Vec2::new(self.screen_width, self.screen_height)
    }
}

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine {
    world: World,
    config: SimConfig,
    time: SimTime,
    phase: GamePhase,
    rng: ChaCha8Rng,
    planet: Planet,
    silos: SiloRing,
    session: Session,
    spawner: WaveSpawner,
    command_queue: VecDeque<PlayerCommand>,
    despawn_buffer: Vec<hecs::Entity>,
    events: Vec<GameEvent>,
    wave_active: bool,
    wave_all_spawned: bool,
    transition_timer: f32,
}

impl SimulationEngine {
    pub fn new(config: SimConfig) -> Self {
        Self::with_high_score(config, 0)
    }

    /// Engine whose session starts from a stored high score.
    pub fn with_high_score(config: SimConfig, high_score: u32) -> Self {
        let screen = config.screen();
        let planet = Planet::new(screen / 2.0, PLANET_RADIUS);
        let mut silos = SiloRing::new(INITIAL_SILO_COUNT);
        silos.update_positions(&planet);

        Self {
            world: World::new(),
            time: SimTime::default(),
            phase: GamePhase::default(),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            planet,
            silos,
            session: Session::new(high_score),
            spawner: WaveSpawner::new(),
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            events: Vec::new(),
            wave_active: false,
            wave_all_spawned: false,
            transition_timer: 0.0,
            config,
        }
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Process queued commands, then advance the world by `dt` seconds if a
    /// wave or wave transition is running.
    pub fn tick(&mut self, dt: f32) {
        self.process_commands();

        if matches!(self.phase, GamePhase::Playing | GamePhase::WaveTransition) {
            self.run_systems(dt);
            self.time.tick += 1;
            self.time.elapsed_secs += f64::from(dt);
        }
    }

    /// Take every event emitted since the last drain, in emission order.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot(&self) -> GameSnapshot {
        systems::snapshot::build_snapshot(
            &self.world,
            &self.time,
            self.phase,
            &self.planet,
            self.silos.silos(),
            &self.session,
        )
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn planet(&self) -> &Planet {
        &self.planet
    }

    pub fn silos(&self) -> &SiloRing {
        &self.silos
    }

    pub fn silos_mut(&mut self) -> &mut SiloRing {
        &mut self.silos
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn wave_active(&self) -> bool {
        self.wave_active
    }

    pub fn alive_enemies(&self) -> usize {
        world_setup::alive_enemy_count(&self.world)
    }

    /// Put a missile into play and announce it.
    pub fn spawn_enemy(&mut self, missile: EnemyMissile) -> hecs::Entity {
        let kind = missile.kind();
        let position = missile.position;
        let entity = world_setup::spawn_enemy(&mut self.world, missile);
        let id = world_setup::entity_id(entity);
        trace!(id, ?kind, x = position.x, y = position.y, "enemy spawned");
        self.events.push(GameEvent::EnemySpawned {
            id,
            kind,
            x: position.x,
            y: position.y,
        });
        entity
    }

    // --- Session flow ---

    /// Start a fresh session from the menu or the game-over screen.
    pub fn start_game(&mut self) {
        if !matches!(self.phase, GamePhase::Menu | GamePhase::GameOver) {
            return;
        }
        self.world.clear();
        self.spawner.stop();
        self.session.start_game();
        self.planet.rotation = 0.0;
        self.silos.init(INITIAL_SILO_COUNT);
        self.silos.update_positions(&self.planet);

        info!(high_score = self.session.high_score, "game started");
        self.events.push(GameEvent::GameStarted);
        self.begin_wave();
    }

    /// Close the upgrade shop and start the next wave.
    pub fn start_next_wave(&mut self) {
        if self.phase != GamePhase::UpgradeShop {
            return;
        }
        self.begin_wave();
    }

    fn begin_wave(&mut self) {
        let wave = self.session.start_next_wave();
        self.session.active_silo_count = self.silos.active_count();
        self.spawner.start_wave(wave);
        self.wave_active = true;
        self.wave_all_spawned = false;
        self.phase = GamePhase::Playing;

        info!(
            wave = wave.wave_number,
            enemies = wave.enemy_count,
            bursts = wave.burst_count,
            mirv_chance = wave.mirv_chance,
            "wave started"
        );
        self.events.push(GameEvent::WaveStarted {
            wave: wave.wave_number,
            enemy_count: wave.enemy_count,
        });
    }

    pub fn pause(&mut self) {
        if self.phase == GamePhase::Playing {
            self.phase = GamePhase::Paused;
            self.events.push(GameEvent::Paused);
        }
    }

    pub fn resume(&mut self) {
        if self.phase == GamePhase::Paused {
            self.phase = GamePhase::Playing;
            self.events.push(GameEvent::Resumed);
        }
    }

    // --- Player actions ---

    /// Launch an interceptor from the ready silo nearest to `target`.
    /// Returns the silo index, or why the shot was refused.
    pub fn fire(&mut self, target: Vec2) -> Result<usize, ShotRejection> {
        if self.phase != GamePhase::Playing || !self.wave_active {
            return Err(self.reject_shot(ShotRejection::NotPlaying));
        }
        if self.planet.contains(target) {
            return Err(self.reject_shot(ShotRejection::InsidePlanet));
        }

        let reload = self.session.effective_reload_time();
        let Some((index, start)) = self.silos.fire_nearest(target, reload) else {
            return Err(self.reject_shot(ShotRejection::NoSiloReady));
        };
        self.session.record_shot_fired();

        let speed = self.session.effective_interceptor_speed();

        world_setup::spawn_interceptor(
            &mut self.world,
            Interceptor::new(start, target, speed, index),
        );
        self.events.push(GameEvent::InterceptorLaunched {
            silo_index: index,
            x: start.x,
            y: start.y,
            target_x: target.x,
            target_y: target.y,
        });
        Ok(index)
    }

    fn reject_shot(&mut self, reason: ShotRejection) -> ShotRejection {
        trace!(?reason, "shot rejected");
        self.events.push(GameEvent::ShotRejected { reason });
        reason
    }

    /// Buy an upgrade while the shop is open. Silo repair restores the first
    /// destroyed silo.
    pub fn purchase_upgrade(&mut self, upgrade: UpgradeId) -> bool {
        self.session.active_silo_count = self.silos.active_count();
        if self.phase != GamePhase::UpgradeShop || !self.session.purchase_upgrade(upgrade) {
            debug!(upgrade = upgrade.as_str(), score = self.session.score, "upgrade rejected");
            self.events.push(GameEvent::UpgradeRejected { upgrade });
            return false;
        }

        if upgrade == UpgradeId::SiloRepair {
            let reload = self.session.effective_reload_time();
            if let Some(silo) = self.silos.first_destroyed() {
                silo.repair(reload);
            }
            self.silos.update_positions(&self.planet);
            self.session.active_silo_count = self.silos.active_count();
        }

        let level = self.session.upgrades.level_for(upgrade);
        debug!(upgrade = upgrade.as_str(), level, score = self.session.score, "upgrade purchased");
        self.events.push(GameEvent::UpgradePurchased {
            upgrade,
            level,
            score: self.session.score,
        });
        self.events.push(GameEvent::ScoreChanged {
            score: self.session.score,
        });
        true
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    fn handle_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::StartGame => self.start_game(),
            PlayerCommand::Fire { x, y } => {
                let _ = self.fire(Vec2::new(x, y));
            }
            PlayerCommand::PurchaseUpgrade { upgrade } => {
                self.purchase_upgrade(upgrade);
            }
            PlayerCommand::StartNextWave => self.start_next_wave(),
            PlayerCommand::Pause => self.pause(),
            PlayerCommand::Resume => self.resume(),
        }
    }

    /// Run all systems in order.
    fn run_systems(&mut self, dt: f32) {
        // 1. Wave spawning
        if self.wave_active {
            let ctx = SpawnContext {
                planet: &self.planet,
                silos: self.silos.silos(),
                screen: self.config.screen(),
            };
            let spawned = self.spawner.update(dt, &mut self.rng, &ctx);
            for missile in spawned.missiles {
                self.spawn_enemy(missile);
            }
            if spawned.all_spawned {
                self.wave_all_spawned = true;
                self.events.push(GameEvent::WaveAllSpawned {
                    wave: self.session.current_wave,
                });
            }
        }

        // 2. Planet rotation, silo positions, then reload timers
        self.planet.advance(dt);
        for silo_index in self.silos.update(dt, &self.planet) {
            self.events.push(GameEvent::SiloReloaded { silo_index });
        }
        self.session.active_silo_count = self.silos.active_count();

        // 3. Interceptor flight and detonation
        systems::interceptors::run(
            &mut self.world,
            dt,
            self.session.effective_blast_radius(),
            &mut self.events,
        );

        // 4. Blasts and hit resolution
        systems::combat::run(
            &mut self.world,
            dt,
            &mut self.session,
            &mut self.events,
            self.config.chain_reactions,
        );

        // 5. Missile flight, MIRV split, impacts
        let last_silo_lost = systems::missiles::run(
            &mut self.world,
            dt,
            &mut self.rng,
            &self.planet,
            &mut self.silos,
            &mut self.session,
            &mut self.events,
        );

        // 6. Cleanup
        systems::cleanup::run(&mut self.world, &mut self.despawn_buffer);

        if last_silo_lost {
            self.game_over();
            return;
        }

        // 7. Wave completion, or the countdown to the shop
        if self.phase == GamePhase::WaveTransition {
            self.transition_timer -= dt;
            if self.transition_timer <= 0.0 {
                self.phase = GamePhase::UpgradeShop;
                self.events.push(GameEvent::UpgradeShopOpened {
                    wave: self.session.current_wave,
                });
            }
        } else {
            self.check_wave_complete();
        }
    }

    fn check_wave_complete(&mut self) {
        if !self.wave_active || !self.wave_all_spawned || self.alive_enemies() > 0 {
            return;
        }
        self.wave_active = false;

        let wave = self.session.current_wave;
        let accuracy = self.session.wave_accuracy();
        let bonus = self.session.calculate_wave_bonuses();
        self.session.add_score(bonus);

        info!(
            wave,
            bonus,
            accuracy,
            silos = self.session.active_silo_count,
            score = self.session.score,
            "wave complete"
        );
        self.events.push(GameEvent::WaveComplete {
            wave,
            bonus,
            accuracy,
        });
        self.events.push(GameEvent::ScoreChanged {
            score: self.session.score,
        });

        self.phase = GamePhase::WaveTransition;
        self.transition_timer = WAVE_TRANSITION_DELAY;
    }

    fn game_over(&mut self) {
        self.spawner.stop();
        self.wave_active = false;
        self.phase = GamePhase::GameOver;
        let new_high_score = self.session.record_high_score();

        info!(
            score = self.session.score,
            wave = self.session.current_wave,
            new_high_score,
            "game over"
        );
        self.events.push(GameEvent::GameOver {
            score: self.session.score,
            wave: self.session.current_wave,
            accuracy: self.session.overall_accuracy(),
            high_score: self.session.high_score,
            new_high_score,
        });
    }
}
