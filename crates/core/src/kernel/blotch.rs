//! Blotch kernel: five painted layers of merged Voronoi cells.
//!
//! Each layer lays a jittered Voronoi grid over the plane at its own
//! rotation, scale, and offset, then "paints" its color wherever a
//! blended per-cell / per-coarse-group random value falls below the
//! layer's threshold. Blending toward the coarse-group value makes
//! neighboring cells share the outcome, so shapes are bold connected
//! blotches instead of one color per tiny cell. Layers composite in
//! fixed painter's-algorithm order: later layers overwrite, never blend.
//!
//! Complexity steers four derived shape parameters: point jitter, grid
//! density, merge-group scale, and per-cell variation (inverted, so
//! coarse grids get more per-cell color variation and the overall color
//! balance holds).

use crate::hash::{hash21s, hash22s};
use glam::Vec2;

/// Point jitter range over complexity: 0.4 (regular polygons) to 0.85
/// (fully irregular placement).
const JITTER_RANGE: (f32, f32) = (0.4, 0.85);
/// Grid density range over complexity: coarse (few corners) to fine.
const DENSITY_RANGE: (f32, f32) = (0.55, 1.05);
/// Merge-group scale range: minimal to aggressive cell merging.
const GROUP_RANGE: (f32, f32) = (1.1, 1.7);
/// Per-cell variation range, inverted over complexity.
const VARIATION_RANGE: (f32, f32) = (0.40, 0.25);

/// Per-layer table: rotation angle, grid-density multiplier, seed-derived
/// offset coefficients (sx, ox, sy, oy), seed offset, paint threshold,
/// painted palette slot. Distinct angles and seed offsets per layer keep
/// cell boundaries from aligning across layers.
const LAYERS: [Layer; 4] = [
    Layer { angle: 0.55, density: 0.88, offset: (0.31, 3.1, 0.17, 7.3), seed: 10.0, threshold: 0.25, slot: 0 },
    Layer { angle: -0.35, density: 0.94, offset: (0.47, 8.3, 0.23, 13.1), seed: 30.0, threshold: 0.35, slot: 1 },
    Layer { angle: -0.65, density: 0.94, offset: (0.53, 11.7, 0.41, 5.9), seed: 50.0, threshold: 0.30, slot: 2 },
    Layer { angle: 0.95, density: 1.0, offset: (0.29, 19.3, 0.63, 2.1), seed: 90.0, threshold: 0.27, slot: 3 },
];

/// Grid-density multiplier of the base layer.
const BASE_DENSITY: f32 = 0.82;
/// Paint split of the base layer between slots 1 and 0.
const BASE_SPLIT: f32 = 0.50;
/// Extra per-cell weight the base layer adds on top of the derived value.
const BASE_VARIATION_BIAS: f32 = 0.10;

struct Layer {
    angle: f32,
    density: f32,
    offset: (f32, f32, f32, f32),
    seed: f32,
    threshold: f32,
    slot: usize,
}

#[inline]
fn mix(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

#[inline]
fn rotate(v: Vec2, angle: f32) -> Vec2 {
    let (s, c) = angle.sin_cos();
    Vec2::new(c * v.x + s * v.y, c * v.y - s * v.x)
}

/// Nearest-seed Voronoi assignment: returns the integer ID of the cell
/// whose jittered representative point is closest to `uv`.
///
/// Searches the 5x5 neighborhood around the point's own cell, which is
/// sufficient because jitter never exceeds 1. The representative point
/// is blended between cell corner and cell center by `jitter` (0 = a
/// regular grid, 1 = fully randomized placement).
pub(crate) fn voronoi_nearest(uv: Vec2, seed: f32, jitter: f32) -> Vec2 {
    let id = uv.floor();
    let fd = uv - id;
    let mut min_dist = 10.0f32;
    let mut nearest = Vec2::ZERO;
    for y in -2..=2 {
        for x in -2..=2 {
            let offset = Vec2::new(x as f32, y as f32);
            let cell = id + offset;
            let point = hash22s(cell, seed) * jitter + Vec2::splat((1.0 - jitter) * 0.5);
            let diff = offset + point - fd;
            let d = diff.dot(diff);
            if d < min_dist {
                min_dist = d;
                nearest = cell;
            }
        }
    }
    nearest
}

/// Merged-region test: true where this layer paints.
///
/// Blends the cell's own random value with its coarse group's value
/// (coarse group = cell ID / `group_scale`, floored), weighted by
/// `variation` toward the per-cell value. Cells sharing a coarse group
/// tend to share the outcome, which is what merges them into one shape.
fn merged_region(
    st: Vec2,
    seed: f32,
    group_scale: f32,
    threshold: f32,
    jitter: f32,
    variation: f32,
) -> bool {
    let cell = voronoi_nearest(st, seed, jitter);
    let cell_rand = hash21s(cell, seed + 3.7);
    let coarse = (cell / group_scale).floor();
    let coarse_rand = hash21s(coarse, seed + 19.5);
    mix(coarse_rand, cell_rand, variation) < threshold
}

/// Evaluates the blotch pattern at one scaled coordinate.
///
/// `seed` is the kernel-domain seed (see [`crate::hash::seed_value`]).
/// Returns the palette slot index (0..4) for this position. Pure
/// function: identical inputs always yield the identical slot.
pub fn shade(st: Vec2, seed: f32, complexity: f32) -> usize {
    let jitter = mix(JITTER_RANGE.0, JITTER_RANGE.1, complexity);
    let density = mix(DENSITY_RANGE.0, DENSITY_RANGE.1, complexity);
    let group_scale = mix(GROUP_RANGE.0, GROUP_RANGE.1, complexity);
    let variation = mix(VARIATION_RANGE.0, VARIATION_RANGE.1, complexity);

    // Base layer: split the whole plane between slots 1 and 0.
    let cell = voronoi_nearest(st * (density * BASE_DENSITY), seed, jitter);
    let cell_rand = hash21s(cell, seed + 1.0);
    let coarse = (cell / group_scale).floor();
    let coarse_rand = hash21s(coarse, seed + 2.0);
    let blended = mix(coarse_rand, cell_rand, variation + BASE_VARIATION_BIAS);
    let mut slot = if blended < BASE_SPLIT { 1 } else { 0 };

    // Overwrite layers in fixed order; each rotated and offset by its
    // own seed-derived amount.
    for layer in &LAYERS {
        let (sx, ox, sy, oy) = layer.offset;
        let st_l = rotate(st, layer.angle) * (density * layer.density)
            + Vec2::new(seed * sx + ox, seed * sy + oy);
        if merged_region(
            st_l,
            seed + layer.seed,
            group_scale,
            layer.threshold,
            jitter,
            variation,
        ) {
            slot = layer.slot;
        }
    }

    slot
}
