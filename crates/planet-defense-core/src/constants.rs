//! Simulation constants and tuning parameters.

use std::f32::consts::PI;

/// Simulation tick rate (Hz) used by headless hosts.
pub const TICK_RATE: u32 = 60;

/// Seconds per tick.
pub const DT: f32 = 1.0 / TICK_RATE as f32;

// --- Play field ---

pub const GAME_WIDTH: f32 = 800.0;
pub const GAME_HEIGHT: f32 = 600.0;

// --- Planet & silos ---

pub const PLANET_RADIUS: f32 = 80.0;

pub const INITIAL_SILO_COUNT: usize = 6;

/// Planet spin in radians per second.
pub const ROTATION_SPEED: f32 = 0.15;

/// Arc length (px) along the rim within which an impact destroys a silo.
pub const SILO_HIT_TOLERANCE: f32 = 15.0;

/// Share of enemies aimed at an active silo instead of a random rim point.
pub const SILO_TARGET_RATIO: f32 = 0.6;

// --- Interceptors & blasts ---

/// Interceptor flight speed (px/s).
pub const INTERCEPTOR_SPEED: f32 = 400.0;

pub const BLAST_RADIUS: f32 = 40.0;
pub const BLAST_EXPAND_TIME: f32 = 0.3;
pub const BLAST_HOLD_TIME: f32 = 0.2;
pub const BLAST_FADE_TIME: f32 = 0.2;

pub const SILO_RELOAD_TIME: f32 = 1.5;

/// Reload time never drops below this, whatever the upgrade level.
pub const MIN_RELOAD_TIME: f32 = 0.6;

/// Deepest secondary blast generation when chain reactions are enabled.
pub const MAX_CHAIN_DEPTH: u32 = 3;

/// Radius multiplier applied per chain generation.
pub const CHAIN_RADIUS_FALLOFF: f32 = 0.6;

// --- Enemy missiles ---

pub const ENEMY_SPEED_MIN_BASE: f32 = 80.0;
pub const ENEMY_SPEED_MAX_BASE: f32 = 120.0;
pub const ENEMY_SPEED_ESCALATION: f32 = 6.0;
pub const ENEMY_SPEED_MAX_ESCALATION: f32 = 14.0;
pub const ENEMY_SPEED_CAP: f32 = 300.0;

/// Gap kept between the minimum speed cap and the maximum speed cap.
pub const ENEMY_SPEED_MIN_GAP: f32 = 20.0;

pub const INITIAL_ENEMY_COUNT: u32 = 6;
pub const ENEMY_COUNT_ESCALATION: u32 = 2;
pub const ENEMY_COUNT_CAP: u32 = 60;

/// Distance outside the screen edge at which enemies appear.
pub const SPAWN_MARGIN: f32 = 20.0;

/// Random spawn candidates tried before the corner fallback.
pub const SPAWN_ATTEMPTS: u32 = 50;

/// Clearance subtracted from the planet radius when checking flight paths.
pub const SPAWN_PATH_CLEARANCE: f32 = 5.0;

pub const TRAIL_MAX_POINTS: usize = 200;

// --- MIRV ---

pub const MIRV_START_WAVE: u32 = 5;
pub const MIRV_BASE_CHANCE: f32 = 0.15;
pub const MIRV_CHANCE_PER_WAVE: f32 = 0.03;
pub const MIRV_CHANCE_CAP: f32 = 0.55;

/// Carrier splits once within this distance range of the planet center.
pub const MIRV_SPLIT_DISTANCE_MIN: f32 = 150.0;
pub const MIRV_SPLIT_DISTANCE_MAX: f32 = 250.0;

pub const MIRV_MIN_WARHEADS: u32 = 2;
pub const MIRV_MID_WARHEADS: u32 = 3;
pub const MIRV_MAX_WARHEADS: u32 = 4;
pub const MIRV_MID_WARHEAD_WAVE: u32 = 8;
pub const MIRV_MAX_WARHEAD_WAVE: u32 = 15;

/// Minimum angular gap (radians) between warhead targets.
pub const MIRV_WARHEAD_SPREAD: f32 = 0.52;

/// Attempts to find a spread-respecting warhead angle before accepting any.
pub const MIRV_SPREAD_TRIES: u32 = 20;

/// Arc (radians) around the carrier's bearing that warheads may target.
pub const MIRV_TARGET_ARC: f32 = PI * 1.5;

pub const MIRV_WARHEAD_SPEED_FACTOR: f32 = 0.9;

// --- Sine-wave missiles ---

pub const SINE_START_WAVE: u32 = 3;
pub const SINE_BASE_CHANCE: f32 = 0.10;
pub const SINE_CHANCE_PER_WAVE: f32 = 0.02;
pub const SINE_CHANCE_CAP: f32 = 0.30;
pub const SINE_AMPLITUDE: f32 = 30.0;

/// Full oscillations over the whole flight path.
pub const SINE_FREQUENCY: f32 = 3.0;

// --- Bursts ---

pub const BURST_BASE_COUNT: u32 = 2;
pub const BURST_WAVE_DIVISOR: u32 = 3;
pub const BURST_COUNT_CAP: u32 = 7;

// --- Scoring ---

pub const POINTS_ENEMY_KILL: u32 = 100;
pub const POINTS_MIRV_KILL: u32 = 250;
pub const POINTS_WARHEAD_KILL: u32 = 75;
pub const POINTS_SINE_KILL: u32 = 150;

/// Bonus per kill when one blast destroys two or more enemies.
pub const MULTI_KILL_BONUS: u32 = 150;

pub const WAVE_CLEAR_BONUS: u32 = 500;
pub const SILO_SURVIVAL_BONUS: u32 = 200;
pub const ACCURACY_BONUS_THRESHOLD: f32 = 0.8;
pub const ACCURACY_BONUS: u32 = 300;

/// Silo repair costs this much per current wave number.
pub const SILO_REPAIR_COST_MULT: u32 = 5000;

// --- Wave timing (seconds) ---

pub const WAVE_START_DELAY: f32 = 1.5;
pub const BURST_INTERVAL: f32 = 2.0;
pub const SPAWN_INTERVAL: f32 = 0.3;

/// Pause between wave completion and the upgrade shop.
pub const WAVE_TRANSITION_DELAY: f32 = 2.0;

// --- Leaderboard ---

pub const MAX_LEADERBOARD_ENTRIES: usize = 10;
