//! ECS systems that operate on the simulation world each tick.
//!
//! Systems are plain functions over `&mut World` plus whatever engine state
//! they need. They run in a fixed order from `SimulationEngine::run_systems`.

pub mod cleanup;
pub mod combat;
pub mod interceptors;
pub mod missiles;
pub mod snapshot;
pub mod spawn_validator;
pub mod wave_spawner;
