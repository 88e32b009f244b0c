//! Events emitted by the simulation for the presentation layer.
//!
//! Within a tick, events are pushed in system order: spawns, reloads,
//! detonations, blast hits, splits and impacts, then wave completion.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::upgrades::UpgradeId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    GameStarted,
    WaveStarted {
        wave: u32,
        enemy_count: u32,
    },
    /// A spawner-created missile entered play. Warheads do not emit this.
    EnemySpawned {
        id: u64,
        kind: MissileKind,
        x: f32,
        y: f32,
    },
    /// The spawner has created every enemy of the wave.
    WaveAllSpawned {
        wave: u32,
    },
    InterceptorLaunched {
        silo_index: usize,
        x: f32,
        y: f32,
        target_x: f32,
        target_y: f32,
    },
    ShotRejected {
        reason: ShotRejection,
    },
    SiloReloaded {
        silo_index: usize,
    },
    InterceptorDetonated {
        x: f32,
        y: f32,
    },
    EnemyDestroyed {
        kind: MissileKind,
        x: f32,
        y: f32,
        points: u32,
    },
    ScoreChanged {
        score: u32,
    },
    /// One blast destroyed two or more enemies.
    MultiKill {
        count: u32,
        bonus: u32,
        x: f32,
        y: f32,
    },
    /// A kill spawned a secondary blast.
    ChainReaction {
        x: f32,
        y: f32,
        depth: u32,
    },
    MirvSplit {
        x: f32,
        y: f32,
        warheads: u32,
    },
    /// A missile reached the surface. `silo` is the silo it destroyed, if any.
    EnemyImpacted {
        x: f32,
        y: f32,
        silo: Option<usize>,
    },
    SiloDestroyed {
        silo_index: usize,
        remaining: usize,
    },
    AllSilosDestroyed,
    WaveComplete {
        wave: u32,
        bonus: u32,
        accuracy: f32,
    },
    UpgradeShopOpened {
        wave: u32,
    },
    UpgradePurchased {
        upgrade: UpgradeId,
        level: u32,
        score: u32,
    },
    UpgradeRejected {
        upgrade: UpgradeId,
    },
    GameOver {
        score: u32,
        wave: u32,
        accuracy: f32,
        high_score: u32,
        new_high_score: bool,
    },
    Paused,
    Resumed,
}
