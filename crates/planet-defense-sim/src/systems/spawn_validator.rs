//! Spawn and target point selection for enemy missiles.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;

use planet_defense_core::constants::{SPAWN_ATTEMPTS, SPAWN_MARGIN, SPAWN_PATH_CLEARANCE};
use planet_defense_core::math::{line_intersects_circle, point_on_circle, random_between};

/// Point on the planet's circumference: at `silo_angle` when aiming at a
/// silo, otherwise at a uniformly random angle.
pub fn generate_target_point<R: Rng + ?Sized>(
    rng: &mut R,
    planet_center: Vec2,
    planet_radius: f32,
    silo_angle: Option<f32>,
) -> Vec2 {
    let angle = match silo_angle {
        Some(angle) => angle,
        None => rng.gen::<f32>() * TAU,
    };
    point_on_circle(planet_center, planet_radius, angle)
}

/// Point on a margin-inset screen edge whose straight path to `target`
/// clears the planet. After [`SPAWN_ATTEMPTS`] misses, falls back to the
/// inset corner farthest from the planet center.
pub fn generate_spawn_point<R: Rng + ?Sized>(
    rng: &mut R,
    target: Vec2,
    planet_center: Vec2,
    planet_radius: f32,
    screen: Vec2,
) -> Vec2 {
    let m = SPAWN_MARGIN;
    let (w, h) = (screen.x, screen.y);
    let clearance = planet_radius - SPAWN_PATH_CLEARANCE;

    for _ in 0..SPAWN_ATTEMPTS {
        let spawn = match rng.gen_range(0..4) {
            0 => Vec2::new(random_between(rng, m, w - m), m),
            1 => Vec2::new(random_between(rng, m, w - m), h - m),
            2 => Vec2::new(m, random_between(rng, m, h - m)),
            _ => Vec2::new(w - m, random_between(rng, m, h - m)),
        };
        if !line_intersects_circle(spawn, target, planet_center, clearance) {
            return spawn;
        }
    }

    farthest_corner(planet_center, screen)
}

fn farthest_corner(planet_center: Vec2, screen: Vec2) -> Vec2 {
    let m = SPAWN_MARGIN;
    let corners = [
        Vec2::new(m, m),
        Vec2::new(screen.x - m, m),
        Vec2::new(m, screen.y - m),
        Vec2::new(screen.x - m, screen.y - m),
    ];
    let mut best = corners[0];
    let mut best_dist = 0.0;
    for corner in corners {
        let d = corner.distance_squared(planet_center);
        if d > best_dist {
            best_dist = d;
            best = corner;
        }
    }
    best
}
