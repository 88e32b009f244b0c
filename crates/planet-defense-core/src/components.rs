//! Planet, trail and interceptor components.

use std::collections::VecDeque;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::math::normalize_angle;

/// The defended planet. Rotation stays in `[0, 2π)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Planet {
    pub center: Vec2,
    pub radius: f32,
    pub rotation: f32,
}

impl Planet {
    pub fn new(center: Vec2, radius: f32) -> Self {
        Self {
            center,
            radius,
            rotation: 0.0,
        }
    }

    pub fn advance(&mut self, dt: f32) {
        self.rotation = normalize_angle(self.rotation + ROTATION_SPEED * dt);
    }

    /// Whether `point` lies strictly inside the planet.
    pub fn contains(&self, point: Vec2) -> bool {
        point.distance_squared(self.center) < self.radius * self.radius
    }
}

impl Default for Planet {
    fn default() -> Self {
        Self::new(Vec2::new(GAME_WIDTH / 2.0, GAME_HEIGHT / 2.0), PLANET_RADIUS)
    }
}

/// Recent positions of a moving entity, oldest first, capped at [`TRAIL_MAX_POINTS`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Trail {
    points: VecDeque<Vec2>,
}

impl Trail {
    pub fn new(start: Vec2) -> Self {
        let mut points = VecDeque::with_capacity(16);
        points.push_back(start);
        Self { points }
    }

    pub fn push(&mut self, point: Vec2) {
        self.points.push_back(point);
        while self.points.len() > TRAIL_MAX_POINTS {
            self.points.pop_front();
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> impl Iterator<Item = &Vec2> {
        self.points.iter()
    }
}

/// Player projectile flying in a straight line from a silo to its aim point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interceptor {
    pub position: Vec2,
    pub target: Vec2,
    pub direction: Vec2,
    pub total_distance: f32,
    pub traveled: f32,
    pub speed: f32,
    /// Index of the silo that launched it.
    pub silo_index: usize,
    pub detonated: bool,
    pub trail: Trail,
}

impl Interceptor {
    pub fn new(start: Vec2, target: Vec2, speed: f32, silo_index: usize) -> Self {
        Self {
            position: start,
            target,
            direction: (target - start).normalize_or_zero(),
            total_distance: start.distance(target),
            traveled: 0.0,
            speed,
            silo_index,
            detonated: false,
            trail: Trail::new(start),
        }
    }

    /// Advance along the flight path. Returns the detonation point on the
    /// tick the interceptor reaches its target, and `None` otherwise.
    pub fn update(&mut self, dt: f32) -> Option<Vec2> {
        if self.detonated {
            return None;
        }

        let step = self.speed * dt;
        self.traveled += step;
        self.position += self.direction * step;
        self.trail.push(self.position);

        if self.traveled >= self.total_distance {
            self.position = self.target;
            self.detonated = true;
            return Some(self.target);
        }
        None
    }

    /// Flight progress in `[0, 1]`.
    pub fn progress(&self) -> f32 {
        if self.total_distance <= 0.0 {
            return 1.0;
        }
        (self.traveled / self.total_distance).min(1.0)
    }
}
