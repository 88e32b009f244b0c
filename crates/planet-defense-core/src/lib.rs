//! Core types and definitions for the Planet Defense simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! entity components, commands, events, wave data, upgrades and constants.
//! It has no dependency on the ECS or any runtime framework.

pub mod blast;
pub mod commands;
pub mod components;
pub mod constants;
pub mod enums;
pub mod events;
pub mod leaderboard;
pub mod math;
pub mod missile;
pub mod silo;
pub mod state;
pub mod types;
pub mod upgrades;
