//! Enemy missiles: one entity type, behavior selected by [`MissileBehavior`].
//!
//! All kinds fly at constant speed along the straight line fixed at creation.
//! Sine missiles add a perpendicular offset on top of that base path, and MIRV
//! carriers split into warheads once they come close enough to the planet.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::components::Trail;
use crate::constants::*;
use crate::enums::{MissileKind, MissileStatus};
use crate::math::{angle_diff, angle_to, point_on_circle, random_between, random_int};

/// Split parameters of a MIRV carrier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MirvPayload {
    /// Distance to the planet center at which the carrier splits.
    pub split_distance: f32,
    pub warhead_count: u32,
    pub has_split: bool,
}

impl MirvPayload {
    pub fn roll<R: Rng + ?Sized>(rng: &mut R, min_warheads: u32, max_warheads: u32) -> Self {
        Self {
            split_distance: random_between(rng, MIRV_SPLIT_DISTANCE_MIN, MIRV_SPLIT_DISTANCE_MAX),
            warhead_count: random_int(rng, min_warheads, max_warheads),
            has_split: false,
        }
    }
}

/// Perpendicular oscillation layered on the straight base path.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SineWave {
    pub amplitude: f32,
    /// Oscillations over the whole flight.
    pub frequency: f32,
    /// Position on the unperturbed path.
    pub base_position: Vec2,
    pub perpendicular: Vec2,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MissileBehavior {
    Plain,
    MirvCarrier(MirvPayload),
    MirvWarhead,
    Sine(SineWave),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyMissile {
    pub position: Vec2,
    pub target: Vec2,
    pub direction: Vec2,
    pub total_distance: f32,
    /// Distance covered along the base path, never beyond `total_distance`
    /// while alive.
    pub traveled: f32,
    pub speed: f32,
    pub status: MissileStatus,
    pub behavior: MissileBehavior,
    pub trail: Trail,
}

impl EnemyMissile {
    pub fn new(start: Vec2, target: Vec2, speed: f32, behavior: MissileBehavior) -> Self {
        Self {
            position: start,
            target,
            direction: (target - start).normalize_or_zero(),
            total_distance: start.distance(target),
            traveled: 0.0,
            speed,
            status: MissileStatus::Alive,
            behavior,
            trail: Trail::new(start),
        }
    }

    pub fn plain(start: Vec2, target: Vec2, speed: f32) -> Self {
        Self::new(start, target, speed, MissileBehavior::Plain)
    }

    pub fn warhead(start: Vec2, target: Vec2, speed: f32) -> Self {
        Self::new(start, target, speed, MissileBehavior::MirvWarhead)
    }

    pub fn mirv(start: Vec2, target: Vec2, speed: f32, payload: MirvPayload) -> Self {
        Self::new(start, target, speed, MissileBehavior::MirvCarrier(payload))
    }

    pub fn sine(start: Vec2, target: Vec2, speed: f32, amplitude: f32, frequency: f32) -> Self {
        let direction = (target - start).normalize_or_zero();
        let wave = SineWave {
            amplitude,
            frequency,
            base_position: start,
            perpendicular: direction.perp(),
        };
        Self::new(start, target, speed, MissileBehavior::Sine(wave))
    }

    pub fn kind(&self) -> MissileKind {
        match self.behavior {
            MissileBehavior::Plain => MissileKind::Plain,
            MissileBehavior::MirvCarrier(_) => MissileKind::MirvCarrier,
            MissileBehavior::MirvWarhead => MissileKind::MirvWarhead,
            MissileBehavior::Sine(_) => MissileKind::Sine,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.status == MissileStatus::Alive
    }

    pub fn is_impacted(&self) -> bool {
        self.status == MissileStatus::Impacted
    }

    pub fn is_destroyed(&self) -> bool {
        self.status == MissileStatus::Destroyed
    }

    pub fn has_split(&self) -> bool {
        matches!(self.behavior, MissileBehavior::MirvCarrier(p) if p.has_split)
    }

    pub fn velocity(&self) -> Vec2 {
        self.direction * self.speed
    }

    /// Points awarded for shooting this missile down.
    pub fn kill_points(&self) -> u32 {
        match self.behavior {
            MissileBehavior::Plain => POINTS_ENEMY_KILL,
            MissileBehavior::MirvCarrier(_) => POINTS_MIRV_KILL,
            MissileBehavior::MirvWarhead => POINTS_WARHEAD_KILL,
            MissileBehavior::Sine(_) => POINTS_SINE_KILL,
        }
    }

    /// Advance one step. Returns the distance to the planet center while the
    /// missile is still in flight, `None` once it has impacted or died.
    pub fn update(&mut self, dt: f32, planet_center: Vec2) -> Option<f32> {
        if !self.is_alive() {
            return None;
        }

        let step = self.speed * dt;
        self.traveled += step;

        match &mut self.behavior {
            MissileBehavior::Sine(wave) => {
                wave.base_position += self.direction * step;
                let progress = if self.total_distance > 0.0 {
                    self.traveled / self.total_distance
                } else {
                    1.0
                };
                let offset =
                    wave.amplitude * (std::f32::consts::TAU * wave.frequency * progress).sin();
                self.position = wave.base_position + wave.perpendicular * offset;
            }
            _ => self.position += self.direction * step,
        }
        self.trail.push(self.position);

        if self.traveled >= self.total_distance {
            self.traveled = self.total_distance;
            self.position = self.target;
            self.status = MissileStatus::Impacted;
            return None;
        }

        Some(self.position.distance(planet_center))
    }

    /// Mark as shot down. No-op unless alive.
    pub fn kill(&mut self) {
        if self.is_alive() {
            self.status = MissileStatus::Destroyed;
        }
    }

    /// Split a MIRV carrier once it is within its split distance of the planet.
    ///
    /// Returns the new warheads on the one call that performs the split; the
    /// carrier is killed in the process. Any other call returns `None`.
    pub fn check_split<R: Rng + ?Sized>(
        &mut self,
        planet_center: Vec2,
        planet_radius: f32,
        rng: &mut R,
    ) -> Option<Vec<EnemyMissile>> {
        if !self.is_alive() {
            return None;
        }
        let MissileBehavior::MirvCarrier(payload) = &mut self.behavior else {
            return None;
        };
        if payload.has_split || self.position.distance(planet_center) > payload.split_distance {
            return None;
        }
        payload.has_split = true;
        let count = payload.warhead_count;

        let base_angle = angle_to(planet_center, self.target);
        let speed = self.speed * MIRV_WARHEAD_SPEED_FACTOR;
        let warheads = spread_warhead_angles(rng, base_angle, count)
            .into_iter()
            .map(|angle| {
                let target = point_on_circle(planet_center, planet_radius, angle);
                EnemyMissile::warhead(self.position, target, speed)
            })
            .collect();

        self.kill();
        Some(warheads)
    }
}

/// Target angles for `count` warheads. The first keeps `base_angle`; the rest
/// are sampled across [`MIRV_TARGET_ARC`] and resampled while closer than
/// [`MIRV_WARHEAD_SPREAD`] to an earlier angle, up to [`MIRV_SPREAD_TRIES`]
/// times. The last sample is kept even if it is still crowded.
pub fn spread_warhead_angles<R: Rng + ?Sized>(rng: &mut R, base_angle: f32, count: u32) -> Vec<f32> {
    let mut angles: Vec<f32> = Vec::with_capacity(count as usize);
    for i in 0..count {
        if i == 0 {
            angles.push(base_angle);
            continue;
        }
        let mut tries = 0;
        let angle = loop {
            let candidate = base_angle + (rng.gen::<f32>() - 0.5) * MIRV_TARGET_ARC;
            tries += 1;
            let crowded = angles
                .iter()
                .any(|&a| angle_diff(candidate, a) < MIRV_WARHEAD_SPREAD);
            if !crowded || tries >= MIRV_SPREAD_TRIES {
                break candidate;
            }
        };
        angles.push(angle);
    }
    angles
}
