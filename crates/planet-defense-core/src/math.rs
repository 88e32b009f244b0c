//! Geometry and random-range helpers.

use std::f32::consts::{PI, TAU};

use glam::Vec2;
use rand::Rng;

/// Uniform sample in `[min, max)`. A degenerate range yields `min`.
pub fn random_between<R: Rng + ?Sized>(rng: &mut R, min: f32, max: f32) -> f32 {
    min + rng.gen::<f32>() * (max - min)
}

/// Uniform integer in `[min, max]` (inclusive).
pub fn random_int<R: Rng + ?Sized>(rng: &mut R, min: u32, max: u32) -> u32 {
    if max <= min {
        return min;
    }
    rng.gen_range(min..=max)
}

/// Wrap an angle into `[0, 2π)`.
pub fn normalize_angle(angle: f32) -> f32 {
    angle.rem_euclid(TAU)
}

/// Smallest absolute difference between two angles, in `[0, π]`.
pub fn angle_diff(a: f32, b: f32) -> f32 {
    ((b - a + PI).rem_euclid(TAU) - PI).abs()
}

/// Point on a circle at `angle` (radians, 0 = +x).
pub fn point_on_circle(center: Vec2, radius: f32, angle: f32) -> Vec2 {
    center + Vec2::new(angle.cos(), angle.sin()) * radius
}

/// Bearing of `point` as seen from `center`.
pub fn angle_to(center: Vec2, point: Vec2) -> f32 {
    let d = point - center;
    d.y.atan2(d.x)
}

/// Whether the segment `p1 → p2` touches the circle.
///
/// Solves `|p1 + t·d − c|² = r²` and reports a hit when either root lies in
/// `[0, 1]`, or when the roots straddle the segment (it lies wholly inside).
pub fn line_intersects_circle(p1: Vec2, p2: Vec2, center: Vec2, radius: f32) -> bool {
    let d = p2 - p1;
    let f = p1 - center;
    let c = f.length_squared() - radius * radius;

    let a = d.length_squared();
    if a <= f32::EPSILON {
        return c <= 0.0;
    }
    let b = 2.0 * f.dot(d);

    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return false;
    }

    let root = discriminant.sqrt();
    let t1 = (-b - root) / (2.0 * a);
    let t2 = (-b + root) / (2.0 * a);

    (0.0..=1.0).contains(&t1) || (0.0..=1.0).contains(&t2) || (t1 < 0.0 && t2 > 1.0)
}
