//! Player commands sent from the host to the simulation.
//!
//! Commands are queued and processed at the next tick boundary.

use serde::{Deserialize, Serialize};

use crate::upgrades::UpgradeId;

/// All possible player actions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    /// Start a new session from the menu or game-over screen.
    StartGame,
    /// Launch an interceptor from the nearest ready silo toward a point.
    Fire { x: f32, y: f32 },
    /// Buy an upgrade while the shop is open.
    PurchaseUpgrade { upgrade: UpgradeId },
    /// Leave the shop and begin the next wave.
    StartNextWave,
    Pause,
    Resume,
}
