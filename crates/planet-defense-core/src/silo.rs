//! Defense silo: a fixed point on the rotating rim with a reload cycle.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::constants::SILO_RELOAD_TIME;
use crate::enums::SiloState;
use crate::math::point_on_circle;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Silo {
    pub index: usize,
    /// Angle on the planet before rotation is applied.
    pub base_angle: f32,
    /// Current world angle, `base_angle + rotation`.
    pub angle: f32,
    pub position: Vec2,
    pub state: SiloState,
    pub reload_timer: f32,
    pub reload_duration: f32,
}

impl Silo {
    pub fn new(index: usize, base_angle: f32) -> Self {
        Self {
            index,
            base_angle,
            angle: base_angle,
            position: Vec2::ZERO,
            state: SiloState::Ready,
            reload_timer: 0.0,
            reload_duration: SILO_RELOAD_TIME,
        }
    }

    pub fn is_ready(&self) -> bool {
        self.state == SiloState::Ready
    }

    pub fn is_destroyed(&self) -> bool {
        self.state == SiloState::Destroyed
    }

    pub fn update_position(&mut self, center: Vec2, radius: f32, rotation: f32) {
        self.angle = self.base_angle + rotation;
        self.position = point_on_circle(center, radius, self.angle);
    }

    /// Start a reload cycle of `reload_time` seconds. Only a ready silo fires.
    pub fn fire(&mut self, reload_time: f32) -> bool {
        if self.state != SiloState::Ready {
            return false;
        }
        self.state = SiloState::Reloading;
        self.reload_duration = reload_time;
        self.reload_timer = reload_time;
        true
    }

    /// Tick the reload timer. Returns true on the tick the silo becomes ready.
    pub fn update(&mut self, dt: f32) -> bool {
        if self.state != SiloState::Reloading {
            return false;
        }
        self.reload_timer -= dt;
        if self.reload_timer <= 0.0 {
            self.reload_timer = 0.0;
            self.state = SiloState::Ready;
            return true;
        }
        false
    }

    pub fn destroy(&mut self) {
        self.state = SiloState::Destroyed;
        self.reload_timer = 0.0;
    }

    /// Force the silo back to ready, whatever its prior state.
    pub fn repair(&mut self, reload_time: f32) {
        self.state = SiloState::Ready;
        self.reload_timer = 0.0;
        self.reload_duration = reload_time;
    }

    /// Reload progress in `[0, 1]`. 1 whenever the silo is not reloading.
    pub fn reload_progress(&self) -> f32 {
        if self.state != SiloState::Reloading || self.reload_duration <= 0.0 {
            return 1.0;
        }
        (1.0 - self.reload_timer / self.reload_duration).clamp(0.0, 1.0)
    }
}
