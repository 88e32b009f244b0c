//! Upgrade catalogue, cost tables and per-session upgrade levels.

use serde::{Deserialize, Serialize};

/// Purchasable upgrades. Serialized with the snake_case ids the shop uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpgradeId {
    InterceptorSpeed,
    BlastRadius,
    ReloadSpeed,
    SiloRepair,
}

/// Static description of one upgrade.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UpgradeSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub max_level: u32,
    /// Cost per level; `None` when the price is computed at purchase time.
    pub costs: Option<&'static [u32]>,
    /// Stat change per level. Negative for reload time.
    pub per_level: f32,
}

const INTERCEPTOR_SPEED_COSTS: [u32; 5] = [1000, 2000, 4000, 8000, 16000];
const BLAST_RADIUS_COSTS: [u32; 5] = [1500, 3000, 6000, 12000, 24000];
const RELOAD_SPEED_COSTS: [u32; 5] = [1200, 2400, 4800, 9600, 19200];

impl UpgradeId {
    pub const ALL: [UpgradeId; 4] = [
        UpgradeId::InterceptorSpeed,
        UpgradeId::BlastRadius,
        UpgradeId::ReloadSpeed,
        UpgradeId::SiloRepair,
    ];

    pub fn spec(self) -> UpgradeSpec {
        match self {
            Self::InterceptorSpeed => UpgradeSpec {
                name: "Interceptor Speed",
                description: "Faster interceptors",
                max_level: 5,
                costs: Some(&INTERCEPTOR_SPEED_COSTS),
                per_level: 60.0,
            },
            Self::BlastRadius => UpgradeSpec {
                name: "Blast Radius",
                description: "Larger explosions",
                max_level: 5,
                costs: Some(&BLAST_RADIUS_COSTS),
                per_level: 6.0,
            },
            Self::ReloadSpeed => UpgradeSpec {
                name: "Reload Speed",
                description: "Faster silo reload",
                max_level: 5,
                costs: Some(&RELOAD_SPEED_COSTS),
                per_level: -0.18,
            },
            Self::SiloRepair => UpgradeSpec {
                name: "Repair Silo",
                description: "Restore one destroyed silo",
                max_level: 99,
                costs: None,
                per_level: 1.0,
            },
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InterceptorSpeed => "interceptor_speed",
            Self::BlastRadius => "blast_radius",
            Self::ReloadSpeed => "reload_speed",
            Self::SiloRepair => "silo_repair",
        }
    }
}

/// Cost of the next level of a leveled upgrade.
/// Returns None at max level, and for upgrades without a cost table.
pub fn upgrade_cost(id: UpgradeId, current_level: u32) -> Option<u32> {
    let spec = id.spec();
    if current_level >= spec.max_level {
        return None;
    }
    spec.costs?.get(current_level as usize).copied()
}

/// Purchased levels of the leveled upgrades.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpgradeLevels {
    pub interceptor_speed: u32,
    pub blast_radius: u32,
    pub reload_speed: u32,
}

impl UpgradeLevels {
    /// Level for `id`. Silo repair carries no level and reports 0.
    pub fn level_for(&self, id: UpgradeId) -> u32 {
        match id {
            UpgradeId::InterceptorSpeed => self.interceptor_speed,
            UpgradeId::BlastRadius => self.blast_radius,
            UpgradeId::ReloadSpeed => self.reload_speed,
            UpgradeId::SiloRepair => 0,
        }
    }

    pub fn set_level(&mut self, id: UpgradeId, level: u32) {
        match id {
            UpgradeId::InterceptorSpeed => self.interceptor_speed = level,
            UpgradeId::BlastRadius => self.blast_radius = level,
            UpgradeId::ReloadSpeed => self.reload_speed = level,
            UpgradeId::SiloRepair => {}
        }
    }
}
