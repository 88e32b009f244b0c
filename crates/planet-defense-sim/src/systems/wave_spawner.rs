//! Wave spawner: releases a wave's enemies in timed bursts.
//!
//! All waiting is countdown state advanced by the tick's `dt`. Leftover time
//! carries into the next step, so spawn timing does not depend on frame rate.

use glam::Vec2;
use rand::Rng;

use planet_defense_core::components::Planet;
use planet_defense_core::constants::*;
use planet_defense_core::math::random_between;
use planet_defense_core::missile::{EnemyMissile, MirvPayload};
use planet_defense_core::silo::Silo;
use planet_defense_core::types::WaveData;

use super::spawn_validator::{generate_spawn_point, generate_target_point};

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum SpawnerState {
    #[default]
    Idle,
    /// Counting down to the next burst.
    AwaitingBurst { delay: f32 },
    /// Spawning one burst; `next_in` is the countdown to the next spawn (or,
    /// once the quota is met, to the end-of-burst check).
    Bursting {
        burst_total: u32,
        spawned_in_burst: u32,
        next_in: f32,
    },
    /// Every enemy of the wave has been created.
    Complete,
}

/// World context the spawner reads when creating enemies.
pub struct SpawnContext<'a> {
    pub planet: &'a Planet,
    pub silos: &'a [Silo],
    pub screen: Vec2,
}

/// Output of one spawner step.
#[derive(Debug, Default)]
pub struct SpawnerTick {
    pub missiles: Vec<EnemyMissile>,
    /// True on the one step that finishes the wave's spawning.
    pub all_spawned: bool,
}

#[derive(Debug, Clone, Default)]
pub struct WaveSpawner {
    wave: Option<WaveData>,
    state: SpawnerState,
    spawned: u32,
    current_burst: u32,
    enemies_per_burst: u32,
}

impl WaveSpawner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start_wave(&mut self, wave: WaveData) {
        self.enemies_per_burst = wave.enemies_per_burst();
        self.wave = Some(wave);
        self.spawned = 0;
        self.current_burst = 0;
        self.state = SpawnerState::AwaitingBurst {
            delay: WAVE_START_DELAY,
        };
    }

    /// Cancel everything still scheduled. Safe to call repeatedly.
    pub fn stop(&mut self) {
        self.state = SpawnerState::Idle;
    }

    pub fn state(&self) -> SpawnerState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        matches!(
            self.state,
            SpawnerState::AwaitingBurst { .. } | SpawnerState::Bursting { .. }
        )
    }

    pub fn spawned(&self) -> u32 {
        self.spawned
    }

    pub fn current_burst(&self) -> u32 {
        self.current_burst
    }

    fn remaining(&self) -> u32 {
        let total = self.wave.map_or(0, |w| w.enemy_count);
        total.saturating_sub(self.spawned)
    }

    /// Advance the schedule by `dt` seconds.
    pub fn update<R: Rng + ?Sized>(
        &mut self,
        dt: f32,
        rng: &mut R,
        ctx: &SpawnContext<'_>,
    ) -> SpawnerTick {
        let mut out = SpawnerTick::default();
        let Some(wave) = self.wave else {
            return out;
        };
        let mut budget = dt;

        loop {
            match self.state {
                SpawnerState::Idle | SpawnerState::Complete => break,
                SpawnerState::AwaitingBurst { delay } => {
                    if delay > budget {
                        self.state = SpawnerState::AwaitingBurst {
                            delay: delay - budget,
                        };
                        break;
                    }
                    budget -= delay;
                    self.start_burst(&mut out);
                }
                SpawnerState::Bursting {
                    burst_total,
                    spawned_in_burst,
                    next_in,
                } => {
                    if next_in > budget {
                        self.state = SpawnerState::Bursting {
                            burst_total,
                            spawned_in_burst,
                            next_in: next_in - budget,
                        };
                        break;
                    }
                    budget -= next_in;

                    if spawned_in_burst >= burst_total {
                        self.end_burst(&mut out);
                        continue;
                    }

                    out.missiles.push(create_enemy(rng, &wave, ctx));
                    self.spawned += 1;
                    self.state = SpawnerState::Bursting {
                        burst_total,
                        spawned_in_burst: spawned_in_burst + 1,
                        next_in: SPAWN_INTERVAL,
                    };
                }
            }
        }
        out
    }

    fn start_burst(&mut self, out: &mut SpawnerTick) {
        self.current_burst += 1;
        let to_spawn = self.enemies_per_burst.min(self.remaining());
        if to_spawn == 0 {
            self.complete(out);
            return;
        }
        self.state = SpawnerState::Bursting {
            burst_total: to_spawn,
            spawned_in_burst: 0,
            next_in: 0.0,
        };
    }

    fn end_burst(&mut self, out: &mut SpawnerTick) {
        if self.remaining() > 0 {
            self.state = SpawnerState::AwaitingBurst {
                delay: BURST_INTERVAL,
            };
        } else {
            self.complete(out);
        }
    }

    fn complete(&mut self, out: &mut SpawnerTick) {
        self.state = SpawnerState::Complete;
        out.all_spawned = true;
    }
}

/// Roll target, spawn point, speed and kind for one enemy.
fn create_enemy<R: Rng + ?Sized>(rng: &mut R, wave: &WaveData, ctx: &SpawnContext<'_>) -> EnemyMissile {
    let planet = ctx.planet;

    let targets_silo = rng.gen::<f32>() < wave.silo_target_ratio;
    let silo_angle = if targets_silo {
        let active: Vec<&Silo> = ctx.silos.iter().filter(|s| !s.is_destroyed()).collect();
        if active.is_empty() {
            None
        } else {
            Some(active[rng.gen_range(0..active.len())].angle)
        }
    } else {
        None
    };

    let target = generate_target_point(rng, planet.center, planet.radius, silo_angle);
    let spawn = generate_spawn_point(rng, target, planet.center, planet.radius, ctx.screen);
    let speed = random_between(rng, wave.speed_min, wave.speed_max);

    if rng.gen::<f32>() < wave.mirv_chance {
        let payload = MirvPayload::roll(rng, wave.mirv_min_warheads, wave.mirv_max_warheads);
        return EnemyMissile::mirv(spawn, target, speed, payload);
    }
    if rng.gen::<f32>() < wave.sine_chance {
        return EnemyMissile::sine(spawn, target, speed, SINE_AMPLITUDE, SINE_FREQUENCY);
    }
    EnemyMissile::plain(spawn, target, speed)
}
