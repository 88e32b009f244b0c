//! Per-wave escalation data and simulation time.

use serde::{Deserialize, Serialize};

use crate::constants::*;

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

/// Parameters of one wave, computed once when the wave starts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WaveData {
    pub wave_number: u32,
    pub enemy_count: u32,
    pub speed_min: f32,
    pub speed_max: f32,
    pub mirv_chance: f32,
    pub mirv_min_warheads: u32,
    pub mirv_max_warheads: u32,
    pub sine_chance: f32,
    pub burst_count: u32,
    pub silo_target_ratio: f32,
}

impl WaveData {
    /// Escalation curve for a 1-indexed wave. Every value is capped and
    /// non-decreasing in `wave`. Wave 0 is treated as wave 1.
    pub fn for_wave(wave: u32) -> Self {
        let wave = wave.max(1);
        let steps = wave - 1;

        let enemy_count = INITIAL_ENEMY_COUNT
            .saturating_add(steps.saturating_mul(ENEMY_COUNT_ESCALATION))
            .min(ENEMY_COUNT_CAP);

        let speed_min = (ENEMY_SPEED_MIN_BASE + steps as f32 * ENEMY_SPEED_ESCALATION)
            .min(ENEMY_SPEED_CAP - ENEMY_SPEED_MIN_GAP);
        let speed_max = (ENEMY_SPEED_MAX_BASE + steps as f32 * ENEMY_SPEED_MAX_ESCALATION)
            .min(ENEMY_SPEED_CAP);

        let mirv_chance = if wave < MIRV_START_WAVE {
            0.0
        } else {
            (MIRV_BASE_CHANCE + (wave - MIRV_START_WAVE) as f32 * MIRV_CHANCE_PER_WAVE)
                .min(MIRV_CHANCE_CAP)
        };

        let mirv_max_warheads = if wave >= MIRV_MAX_WARHEAD_WAVE {
            MIRV_MAX_WARHEADS
        } else if wave >= MIRV_MID_WARHEAD_WAVE {
            MIRV_MID_WARHEADS
        } else {
            MIRV_MIN_WARHEADS
        };

        let sine_chance = if wave < SINE_START_WAVE {
            0.0
        } else {
            (SINE_BASE_CHANCE + (wave - SINE_START_WAVE) as f32 * SINE_CHANCE_PER_WAVE)
                .min(SINE_CHANCE_CAP)
        };

        let burst_count = (BURST_BASE_COUNT + wave / BURST_WAVE_DIVISOR).min(BURST_COUNT_CAP);

        Self {
            wave_number: wave,
            enemy_count,
            speed_min,
            speed_max,
            mirv_chance,
            mirv_min_warheads: MIRV_MIN_WARHEADS,
            mirv_max_warheads,
            sine_chance,
            burst_count,
            silo_target_ratio: SILO_TARGET_RATIO,
        }
    }

    /// `ceil(enemy_count / burst_count)`.
    pub fn enemies_per_burst(&self) -> u32 {
        if self.burst_count == 0 {
            return self.enemy_count;
        }
        self.enemy_count.div_ceil(self.burst_count)
    }
}
