//! Dazzle kernel: angular regions filled with scrolling diagonal stripes.
//!
//! Three independently rotated grids (angles derived from the seed, not
//! fixed constants) are hash-combined pairwise into a single scalar
//! region ID per position. Because each grid contributes straight-line
//! cell boundaries at its own angle, the combined regions are irregular
//! straight-edged polygons rather than axis-aligned bands.
//!
//! The region ID then derives everything the stripe fill needs: a stripe
//! angle, a pair of palette slots, a frequency multiplier, and a signed
//! scroll speed. The stripe itself is a 1-D traveling square wave along
//! the region's axis — the only place time enters the system, so region
//! boundaries stay pixel-identical across animation frames.
//!
//! Two overlay passes (enabled at higher complexity, gated by a hashed
//! per-region test) re-run the same construction with a fourth and fifth
//! grid, fragmenting large regions into sub-regions that overwrite the
//! base color outright.

use crate::hash::{fract, hash21s};
use glam::Vec2;

use std::f32::consts::PI;

/// Stripe frequency range over complexity.
const STRIPE_FREQ_RANGE: (f32, f32) = (3.0, 7.0);
/// Grid size range over complexity (inverse: finer grid when complex).
const GRID_SIZE_RANGE: (f32, f32) = (2.8, 1.2);

/// Complexity thresholds that enable the two overlay passes.
const OVERLAY_MIN_COMPLEXITY: f32 = 0.25;
const ACCENT_MIN_COMPLEXITY: f32 = 0.35;

/// Hashed per-region gates for the overlay passes. Tunable constants,
/// not behavioral contracts: raising a gate leaves more of the base
/// pattern intact.
const OVERLAY_GATE: f32 = 0.5;
const ACCENT_GATE: f32 = 0.8;

/// Scroll speed range shared by all passes.
const SCROLL_SPEED_RANGE: (f32, f32) = (0.3, 0.8);

/// A region's stripe recipe, fully determined by position and seed.
/// Time plays no part here; see [`stripe_slot`] for the moving part.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Region {
    /// Region identity in [0, 1); drives every derived quantity.
    id: f32,
    /// Stripe axis angle in [0, pi].
    angle: f32,
    /// Palette slot shown on the stripe's "on" phase.
    slot_a: usize,
    /// Palette slot shown on the "off" phase.
    slot_b: usize,
    /// Stripe frequency after the region's own multiplier.
    frequency: f32,
    /// Signed scroll velocity (speed times direction).
    velocity: f32,
}

#[inline]
fn mix(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Cell ID of `st` in a grid rotated by `angle` with cells of `size`.
#[inline]
fn rotated_grid_cell(st: Vec2, angle: f32, size: f32) -> Vec2 {
    let (s, c) = angle.sin_cos();
    let rotated = Vec2::new(c * st.x + s * st.y, c * st.y - s * st.x);
    (rotated / size).floor()
}

/// Combines two grid-cell IDs into one scalar in [0, 1).
#[inline]
fn region_hash(cell_a: Vec2, cell_b: Vec2, seed: f32) -> f32 {
    crate::hash::hash21(
        cell_a * 17.31 + cell_b * 43.77 + crate::hash::fract2(seed * Vec2::new(7.13, 11.97)),
    )
}

/// Derives a full stripe recipe from a region ID.
///
/// Each pass reads the flip bit and frequency multiplier from its own
/// hash lane (`flip_lane` / `freq_lane`), so overlapping passes never
/// reuse each other's decisions. The second palette slot is the first
/// XORed with 1 or 3, which can never map a slot onto itself, so the
/// pair is always two distinct slots.
fn region_from_id(
    id: f32,
    stripe_freq: f32,
    freq_range: (f32, f32),
    freq_lane: f32,
    flip_lane: f32,
) -> Region {
    let slot_a = (fract(id * 4.0) * 4.0) as usize;
    let flip = if fract(id * flip_lane) > 0.5 { 1 } else { 3 };
    Region {
        id,
        angle: id * PI,
        slot_a,
        slot_b: slot_a ^ flip,
        frequency: stripe_freq * mix(freq_range.0, freq_range.1, fract(id * freq_lane)),
        velocity: mix(SCROLL_SPEED_RANGE.0, SCROLL_SPEED_RANGE.1, fract(id * 17.3))
            * if fract(id * 23.7) > 0.5 { 1.0 } else { -1.0 },
    }
}

/// Resolves which region governs `st`, including overlay fragmentation.
///
/// Pure function of position, seed, and complexity only — deliberately
/// independent of time so that animation scrolls stripes without moving
/// region boundaries.
pub(crate) fn region_at(st: Vec2, seed: f32, complexity: f32) -> Region {
    let stripe_freq = mix(STRIPE_FREQ_RANGE.0, STRIPE_FREQ_RANGE.1, complexity);
    let grid_size = mix(GRID_SIZE_RANGE.0, GRID_SIZE_RANGE.1, complexity);

    // Three base grids at seed-derived angles and staggered scales.
    let a0 = hash21s(Vec2::new(seed, 0.0), seed) * 0.8 + 0.1;
    let a1 = a0 + hash21s(Vec2::new(seed, 1.0), seed) * 0.6 + 0.5;
    let a2 = a0 - hash21s(Vec2::new(seed, 2.0), seed) * 0.6 - 0.4;

    let g0 = rotated_grid_cell(st, a0, grid_size);
    let g1 = rotated_grid_cell(st, a1, grid_size * 3.5);
    let g2 = rotated_grid_cell(st, a2, grid_size * 0.7);

    let r01 = region_hash(g0, g1, seed + 10.0);
    let r12 = region_hash(g1, g2, seed + 20.0);
    let r02 = region_hash(g0, g2, seed + 30.0);

    let id = fract(r01 * 3.17 + r12 * 7.31 + r02 * 13.73);
    let mut region = region_from_id(id, stripe_freq, (0.7, 1.4), 11.3, 7.0);

    // First overlay: diagonal cuts fragmenting large regions.
    if complexity > OVERLAY_MIN_COMPLEXITY {
        let a3 = hash21s(Vec2::new(seed, 3.0), seed) * 1.0 + 0.3;
        let g3 = rotated_grid_cell(st, a3, grid_size * 2.0);
        if hash21s(g3, seed + 40.0) > OVERLAY_GATE {
            let id2 = fract(region_hash(g0, g3, seed + 50.0) * 5.71 + r12 * 3.13);
            region = region_from_id(id2, stripe_freq, (0.6, 1.3), 9.7, 9.7);
        }
    }

    // Second overlay: fine striped accents over a small fraction of area.
    if complexity > ACCENT_MIN_COMPLEXITY {
        let a4 = hash21s(Vec2::new(seed, 4.0), seed) * 0.7 + 0.8;
        let g4 = rotated_grid_cell(st, a4, grid_size * 0.4);
        if hash21s(g4, seed + 60.0) > ACCENT_GATE {
            let id3 = fract(region_hash(g0, g4, seed + 70.0) * 5.31 + r02 * 2.17);
            region = region_from_id(id3, stripe_freq, (0.8, 1.5), 6.3, 6.3);
        }
    }

    region
}

/// The time-varying half: projects `st` onto the region's stripe axis
/// and thresholds a traveling square wave at 0.5.
#[inline]
pub(crate) fn stripe_slot(st: Vec2, region: &Region, time: f32, time_scale: f32) -> usize {
    let (s, c) = region.angle.sin_cos();
    let proj = st.x * c + st.y * s;
    let phase = fract(proj * region.frequency + region.id * 10.0 + time * region.velocity * time_scale);
    if phase >= 0.5 {
        region.slot_a
    } else {
        region.slot_b
    }
}

/// Evaluates the dazzle pattern at one scaled coordinate.
///
/// Returns the palette slot index (0..4). With `time` fixed the output
/// is a pure function of position; frame 0 of an animation is
/// bit-identical to a still rendered at `time = 0`.
pub fn shade(st: Vec2, seed: f32, complexity: f32, time: f32, time_scale: f32) -> usize {
    let region = region_at(st, seed, complexity);
    stripe_slot(st, &region, time, time_scale)
}
