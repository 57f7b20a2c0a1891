//! Value noise used for procedural heightmaps.

use glam::{Vec2, Vec3};

fn hash21(p: Vec2) -> f32 {
    let p3 = Vec3::new(p.x, p.y, p.x) * 0.1031;
    let p3 = p3 - p3.floor();
    let p3 = p3 + Vec3::splat(p3.dot(Vec3::new(p3.y, p3.z, p3.x) + Vec3::splat(33.33)));
    ((p3.x + p3.y) * p3.z).fract()
}

/// Smooth 2D value noise in [0, 1).
pub fn noise2d(p: Vec2) -> f32 {
    let i = p.floor();
    let f = p - i;
    let u = f * f * (Vec2::splat(3.0) - f * 2.0);

    let a = hash21(i);
    let b = hash21(i + Vec2::new(1.0, 0.0));
    let c = hash21(i + Vec2::new(0.0, 1.0));
    let d = hash21(i + Vec2::new(1.0, 1.0));

    let ab = a + (b - a) * u.x;
    let cd = c + (d - c) * u.x;
    ab + (cd - ab) * u.y
}

/// Fractal Brownian motion over `octaves` layers of `noise2d`.
///
/// The amplitudes sum to `1 - 0.5^octaves`, so the result stays below 1.
pub fn fbm(p: Vec2, octaves: u32) -> f32 {
    let mut value = 0.0;
    let mut amplitude = 0.5;
    let mut p = p;

    for _ in 0..octaves {
        value += amplitude * noise2d(p);
        p *= 2.0;
        amplitude *= 0.5;
    }

    value
}
