//! Simulation engine for Planet Defense.
//!
//! Owns the hecs ECS world of missiles, interceptors and blasts, the silo
//! ring and the session score state, and advances them by variable time
//! steps. Headless and deterministic for a given seed.

pub mod engine;
pub mod session;
pub mod silo_ring;
pub mod systems;
pub mod world_setup;

pub use engine::{SimConfig, SimulationEngine};
pub use planet_defense_core as core;
pub use session::Session;

#[cfg(test)]
mod tests;
