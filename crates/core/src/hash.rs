//! Deterministic position hashes used by both pattern kernels.
//!
//! Every random-looking decision in the system traces back to these
//! functions plus the explicit seed — there is no stateful PRNG and no
//! process-wide entropy source. Same inputs always produce the same
//! outputs across platforms (pure f32 arithmetic).
//!
//! The constants are the classic fractional-sine-free shader hash family:
//! multiply into an irrational-looking frequency, fold with a dot product,
//! take the fractional part. Quality is visual rather than cryptographic:
//! what matters is low correlation between neighboring integer cells at
//! the grid scales the kernels use (roughly 1–20).

use glam::{Vec2, Vec3};

/// GLSL-style fractional part: `x - floor(x)`, always in [0, 1) for finite x.
#[inline]
pub fn fract(x: f32) -> f32 {
    x - x.floor()
}

/// Componentwise [`fract`] for 2-D vectors.
#[inline]
pub fn fract2(v: Vec2) -> Vec2 {
    v - v.floor()
}

#[inline]
fn fract3(v: Vec3) -> Vec3 {
    v - v.floor()
}

/// Scalar hash of a 2-D position, uniformly spread over [0, 1).
#[inline]
pub fn hash21(p: Vec2) -> f32 {
    let mut p = fract2(p * Vec2::new(443.8975, 397.2973));
    p += Vec2::splat(p.dot(Vec2::new(p.y, p.x) + Vec2::splat(19.19)));
    fract(p.x * p.y)
}

/// Vector hash of a 2-D position; both components in [0, 1).
#[inline]
pub fn hash22(p: Vec2) -> Vec2 {
    let mut a = fract3(Vec3::new(p.x, p.y, p.x) * Vec3::new(443.897, 397.297, 491.105));
    a += Vec3::splat(a.dot(Vec3::new(a.y, a.z, a.x) + Vec3::splat(19.19)));
    Vec2::new(fract(a.x * a.z), fract(a.y * a.z))
}

/// Seeded scalar hash: offsets the position by a seed-derived jitter
/// before hashing, decorrelating layers that share grid coordinates.
#[inline]
pub fn hash21s(p: Vec2, seed: f32) -> f32 {
    hash21(p + fract2(seed * Vec2::new(12.9898, 78.233)))
}

/// Seeded vector hash; see [`hash21s`].
#[inline]
pub fn hash22s(p: Vec2, seed: f32) -> Vec2 {
    hash22(p + fract2(seed * Vec2::new(12.9898, 78.233)))
}

/// Maps an integer seed into the compact f32 domain the kernels consume.
///
/// Folds the seed into [0, 1) at a low frequency, then spreads it over
/// [0, 100) so nearby integer seeds land far apart.
#[inline]
pub fn seed_value(seed: u32) -> f32 {
    fract(seed as f32 * 0.0013) * 100.0
}
