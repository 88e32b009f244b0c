//! Session state: wave counter, score, accuracy and the upgrade economy.
//!
//! The session is the single owner of score and upgrade levels. Entities
//! never touch it directly; the engine's combat systems call into it.

use serde::{Deserialize, Serialize};

use planet_defense_core::constants::*;
use planet_defense_core::types::WaveData;
use planet_defense_core::upgrades::{self, UpgradeId, UpgradeLevels};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub current_wave: u32,
    pub score: u32,
    pub high_score: u32,
    pub shots_fired: u32,
    pub shots_hit: u32,
    pub wave_shots_fired: u32,
    pub wave_shots_hit: u32,
    pub total_enemies_destroyed: u32,
    pub wave_silos_lost: u32,
    pub active_silo_count: usize,
    pub upgrades: UpgradeLevels,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(0)
    }
}

impl Session {
    /// Fresh session. `high_score` comes from storage, 0 when unavailable.
    pub fn new(high_score: u32) -> Self {
        Self {
            current_wave: 0,
            score: 0,
            high_score,
            shots_fired: 0,
            shots_hit: 0,
            wave_shots_fired: 0,
            wave_shots_hit: 0,
            total_enemies_destroyed: 0,
            wave_silos_lost: 0,
            active_silo_count: INITIAL_SILO_COUNT,
            upgrades: UpgradeLevels::default(),
        }
    }

    /// Zero every field except the high score.
    pub fn reset(&mut self) {
        *self = Self::new(self.high_score);
    }

    /// Clear the run counters for a new game. Per-wave counters are left for
    /// [`Session::start_next_wave`].
    pub fn start_game(&mut self) {
        self.score = 0;
        self.current_wave = 0;
        self.shots_fired = 0;
        self.shots_hit = 0;
        self.total_enemies_destroyed = 0;
        self.active_silo_count = INITIAL_SILO_COUNT;
        self.upgrades = UpgradeLevels::default();
    }

    /// Advance the wave counter, clear per-wave counters and return the new
    /// wave's parameters.
    pub fn start_next_wave(&mut self) -> WaveData {
        self.current_wave += 1;
        self.wave_shots_fired = 0;
        self.wave_shots_hit = 0;
        self.wave_silos_lost = 0;
        self.generate_wave_data(self.current_wave)
    }

    pub fn generate_wave_data(&self, wave: u32) -> WaveData {
        WaveData::for_wave(wave)
    }

    // --- Effective stats ---

    pub fn effective_interceptor_speed(&self) -> f32 {
        let spec = UpgradeId::InterceptorSpeed.spec();
        INTERCEPTOR_SPEED + self.upgrades.interceptor_speed as f32 * spec.per_level
    }

    pub fn effective_blast_radius(&self) -> f32 {
        let spec = UpgradeId::BlastRadius.spec();
        BLAST_RADIUS + self.upgrades.blast_radius as f32 * spec.per_level
    }

    pub fn effective_reload_time(&self) -> f32 {
        let spec = UpgradeId::ReloadSpeed.spec();
        (SILO_RELOAD_TIME + self.upgrades.reload_speed as f32 * spec.per_level)
            .max(MIN_RELOAD_TIME)
    }

    // --- Scoring ---

    pub fn add_score(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
    }

    pub fn record_shot_fired(&mut self) {
        self.shots_fired += 1;
        self.wave_shots_fired += 1;
    }

    /// One blast kill. Several kills per shot are possible, so hits may
    /// exceed shots; accuracy is capped at 1.
    pub fn record_shot_hit(&mut self) {
        self.shots_hit += 1;
        self.wave_shots_hit += 1;
    }

    pub fn wave_accuracy(&self) -> f32 {
        ratio(self.wave_shots_hit, self.wave_shots_fired)
    }

    pub fn overall_accuracy(&self) -> f32 {
        ratio(self.shots_hit, self.shots_fired)
    }

    /// Bonus for clearing the current wave. Does not add it to the score.
    pub fn calculate_wave_bonuses(&self) -> u32 {
        let wave = self.current_wave;
        let mut bonus = WAVE_CLEAR_BONUS * wave;
        bonus += SILO_SURVIVAL_BONUS * self.active_silo_count as u32 * wave;
        if self.wave_accuracy() >= ACCURACY_BONUS_THRESHOLD {
            bonus += ACCURACY_BONUS * wave;
        }
        bonus
    }

    /// Raise the high score to the current score if it is higher.
    /// Returns true when the high score changed.
    pub fn record_high_score(&mut self) -> bool {
        if self.score > self.high_score {
            self.high_score = self.score;
            return true;
        }
        false
    }

    // --- Upgrades ---

    /// Price of the next purchase of `id`. `None` means it cannot be bought
    /// at any price.
    pub fn upgrade_cost(&self, id: UpgradeId) -> Option<u32> {
        match id {
            UpgradeId::SiloRepair => Some(SILO_REPAIR_COST_MULT.saturating_mul(self.current_wave)),
            _ => upgrades::upgrade_cost(id, self.upgrades.level_for(id)),
        }
    }

    pub fn can_afford_upgrade(&self, id: UpgradeId) -> bool {
        self.upgrade_cost(id).is_some_and(|cost| self.score >= cost)
    }

    pub fn is_upgrade_maxed(&self, id: UpgradeId) -> bool {
        match id {
            UpgradeId::SiloRepair => self.active_silo_count >= INITIAL_SILO_COUNT,
            _ => self.upgrades.level_for(id) >= id.spec().max_level,
        }
    }

    /// Deduct the cost and raise the level. Silo repair only takes payment;
    /// restoring the silo is up to the caller.
    pub fn purchase_upgrade(&mut self, id: UpgradeId) -> bool {
        let Some(cost) = self.upgrade_cost(id) else {
            return false;
        };
        if self.score < cost || self.is_upgrade_maxed(id) {
            return false;
        }

        self.score -= cost;
        if id != UpgradeId::SiloRepair {
            let level = self.upgrades.level_for(id);
            self.upgrades.set_level(id, level + 1);
        }
        true
    }
}

fn ratio(hit: u32, fired: u32) -> f32 {
    if fired == 0 {
        return 0.0;
    }
    (hit as f32 / fired as f32).min(1.0)
}
