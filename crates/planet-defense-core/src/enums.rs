//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Top-level game phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the player to start.
    #[default]
    Menu,
    /// A wave is in progress.
    Playing,
    /// Wave cleared; brief pause before the shop opens.
    WaveTransition,
    /// Between waves; upgrades may be bought.
    UpgradeShop,
    /// Every silo is gone.
    GameOver,
    Paused,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SiloState {
    #[default]
    Ready,
    Reloading,
    Destroyed,
}

/// Blast lifecycle: only `Expanding` and `Holding` are lethal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlastPhase {
    #[default]
    Expanding,
    Holding,
    Fading,
}

/// Terminal state of an enemy missile. Once it leaves `Alive` it never returns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MissileStatus {
    #[default]
    Alive,
    /// Reached its target point.
    Impacted,
    /// Killed by a blast, or a MIRV carrier that split.
    Destroyed,
}

/// Enemy missile kind, without kind-specific data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MissileKind {
    #[default]
    Plain,
    MirvCarrier,
    MirvWarhead,
    Sine,
}

/// Why a fire request was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShotRejection {
    /// No wave in progress.
    NotPlaying,
    /// Target point lies on or inside the planet.
    InsidePlanet,
    /// Every surviving silo is reloading.
    NoSiloReady,
}
