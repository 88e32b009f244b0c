//! Game state snapshot: the complete visible state a host draws from.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::SimTime;
use crate::upgrades::UpgradeLevels;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    pub planet: PlanetView,
    pub silos: Vec<SiloView>,
    pub missiles: Vec<MissileView>,
    pub interceptors: Vec<InterceptorView>,
    pub blasts: Vec<BlastView>,
    pub score: ScoreView,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanetView {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub rotation: f32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SiloView {
    pub index: usize,
    pub state: SiloState,
    pub x: f32,
    pub y: f32,
    pub angle: f32,
    pub reload_progress: f32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MissileView {
    pub id: u64,
    pub kind: MissileKind,
    pub x: f32,
    pub y: f32,
    /// Base-path velocity (px/s). Sine missiles deviate from it laterally.
    pub vx: f32,
    pub vy: f32,
    pub target_x: f32,
    pub target_y: f32,
    pub trail: Vec<[f32; 2]>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InterceptorView {
    pub id: u64,
    pub x: f32,
    pub y: f32,
    pub target_x: f32,
    pub target_y: f32,
    pub silo_index: usize,
    /// Flight progress in `[0, 1]`.
    pub progress: f32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BlastView {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub phase: BlastPhase,
    pub opacity: f32,
    pub chain_depth: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreView {
    pub wave: u32,
    pub score: u32,
    pub high_score: u32,
    pub shots_fired: u32,
    pub shots_hit: u32,
    pub enemies_destroyed: u32,
    pub active_silos: usize,
    pub upgrades: UpgradeLevels,
    pub interceptor_speed: f32,
    pub blast_radius: f32,
    pub reload_time: f32,
}
