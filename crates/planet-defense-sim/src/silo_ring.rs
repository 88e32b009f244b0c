//! The ring of silos around the planet.

use std::f32::consts::TAU;

use glam::Vec2;

use planet_defense_core::components::Planet;
use planet_defense_core::constants::SILO_HIT_TOLERANCE;
use planet_defense_core::math::{angle_diff, angle_to};
use planet_defense_core::silo::Silo;

#[derive(Debug, Clone, Default)]
pub struct SiloRing {
    silos: Vec<Silo>,
}

impl SiloRing {
    /// `count` silos evenly spaced, silo `i` at base angle `i / count · 2π`.
    pub fn new(count: usize) -> Self {
        let mut ring = Self::default();
        ring.init(count);
        ring
    }

    pub fn init(&mut self, count: usize) {
        self.silos = (0..count)
            .map(|i| Silo::new(i, i as f32 / count as f32 * TAU))
            .collect();
    }

    pub fn silos(&self) -> &[Silo] {
        &self.silos
    }

    pub fn get(&self, index: usize) -> Option<&Silo> {
        self.silos.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Silo> {
        self.silos.get_mut(index)
    }

    /// Reposition every silo for the planet's rotation, then tick reloads.
    /// Returns the indices of silos that finished reloading this tick.
    pub fn update(&mut self, dt: f32, planet: &Planet) -> Vec<usize> {
        let mut reloaded = Vec::new();
        for silo in &mut self.silos {
            silo.update_position(planet.center, planet.radius, planet.rotation);
            if silo.update(dt) {
                reloaded.push(silo.index);
            }
        }
        reloaded
    }

    pub fn update_positions(&mut self, planet: &Planet) {
        for silo in &mut self.silos {
            silo.update_position(planet.center, planet.radius, planet.rotation);
        }
    }

    /// Ready silo closest to `point`.
    pub fn nearest_ready(&self, point: Vec2) -> Option<usize> {
        self.silos
            .iter()
            .filter(|s| s.is_ready())
            .min_by(|a, b| {
                a.position
                    .distance_squared(point)
                    .total_cmp(&b.position.distance_squared(point))
            })
            .map(|s| s.index)
    }

    /// Fire the ready silo nearest to `point` with `reload_time`.
    /// Returns its index and launch position.
    pub fn fire_nearest(&mut self, point: Vec2, reload_time: f32) -> Option<(usize, Vec2)> {
        let index = self.nearest_ready(point)?;
        let silo = self.silos.get_mut(index)?;
        silo.fire(reload_time);
        Some((index, silo.position))
    }

    /// Destroy the first surviving silo (in ring order) whose arc distance to
    /// `impact` is under [`SILO_HIT_TOLERANCE`]. Returns its index.
    pub fn check_silo_hit(&mut self, impact: Vec2, planet: &Planet) -> Option<usize> {
        let impact_angle = angle_to(planet.center, impact);
        let silo = self.silos.iter_mut().filter(|s| !s.is_destroyed()).find(|s| {
            let silo_angle = angle_to(planet.center, s.position);
            angle_diff(impact_angle, silo_angle) * planet.radius < SILO_HIT_TOLERANCE
        })?;
        silo.destroy();
        Some(silo.index)
    }

    pub fn active_count(&self) -> usize {
        self.silos.iter().filter(|s| !s.is_destroyed()).count()
    }

    pub fn ready_count(&self) -> usize {
        self.silos.iter().filter(|s| s.is_ready()).count()
    }

    pub fn first_destroyed(&mut self) -> Option<&mut Silo> {
        self.silos.iter_mut().find(|s| s.is_destroyed())
    }
}
