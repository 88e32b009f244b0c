//! Interceptor blast: expands, holds, then fades. Lethal until fading starts.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::enums::BlastPhase;

/// Phase durations in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BlastTimings {
    pub expand: f32,
    pub hold: f32,
    pub fade: f32,
}

impl Default for BlastTimings {
    fn default() -> Self {
        Self {
            expand: BLAST_EXPAND_TIME,
            hold: BLAST_HOLD_TIME,
            fade: BLAST_FADE_TIME,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Blast {
    pub center: Vec2,
    pub max_radius: f32,
    pub current_radius: f32,
    pub phase: BlastPhase,
    /// Time spent in the current phase.
    pub timer: f32,
    pub lethal: bool,
    /// False once fading has finished; the blast is then removed.
    pub alive: bool,
    /// 0 for interceptor blasts, n for the n-th generation of a chain reaction.
    pub chain_depth: u32,
    pub timings: BlastTimings,
}

impl Blast {
    pub fn new(center: Vec2, max_radius: f32) -> Self {
        Self {
            center,
            max_radius,
            current_radius: 0.0,
            phase: BlastPhase::Expanding,
            timer: 0.0,
            lethal: true,
            alive: true,
            chain_depth: 0,
            timings: BlastTimings::default(),
        }
    }

    /// Secondary blast; radius shrinks by [`CHAIN_RADIUS_FALLOFF`] per generation.
    pub fn chained(center: Vec2, base_radius: f32, chain_depth: u32) -> Self {
        let radius = base_radius * CHAIN_RADIUS_FALLOFF.powi(chain_depth as i32);
        Self {
            chain_depth,
            ..Self::new(center, radius)
        }
    }

    pub fn with_timings(mut self, timings: BlastTimings) -> Self {
        self.timings = timings;
        self
    }

    pub fn update(&mut self, dt: f32) {
        if !self.alive {
            return;
        }
        self.timer += dt;

        match self.phase {
            BlastPhase::Expanding => {
                if self.timings.expand > 0.0 {
                    let t = (self.timer / self.timings.expand).min(1.0);
                    self.current_radius = self.max_radius * t;
                }
                if self.timer >= self.timings.expand {
                    self.current_radius = self.max_radius;
                    self.phase = BlastPhase::Holding;
                    self.timer = 0.0;
                }
            }
            BlastPhase::Holding => {
                if self.timer >= self.timings.hold {
                    self.phase = BlastPhase::Fading;
                    self.lethal = false;
                    self.timer = 0.0;
                }
            }
            BlastPhase::Fading => {
                if self.timer >= self.timings.fade {
                    self.alive = false;
                }
            }
        }
    }

    /// Squared-distance hit test against the current radius.
    pub fn is_in_range(&self, point: Vec2) -> bool {
        if !self.lethal {
            return false;
        }
        point.distance_squared(self.center) <= self.current_radius * self.current_radius
    }

    /// Draw opacity: 1 until fading, then linearly down to 0.
    pub fn opacity(&self) -> f32 {
        match self.phase {
            BlastPhase::Fading if self.timings.fade > 0.0 => {
                (1.0 - self.timer / self.timings.fade).clamp(0.0, 1.0)
            }
            BlastPhase::Fading => 0.0,
            _ => 1.0,
        }
    }
}
