//! Planet Defense headless host.
//!
//! Runs one simulation engine on a game loop thread, plays it with a simple
//! autopilot and keeps the high score and leaderboard on disk.

pub mod autopilot;
pub mod config;
pub mod game_loop;
pub mod store;

pub use planet_defense_core as core;
