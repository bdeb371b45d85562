//! Per-pixel pattern kernels.
//!
//! Each kernel is a pure function from a scaled coordinate plus
//! parameters to a palette slot index — no shared mutable state, no
//! hidden randomness. The evaluation surface may therefore invoke them
//! in any pixel order, or concurrently, without changing the output.

pub mod blotch;
pub mod dazzle;

use crate::hash::seed_value;
use crate::params::{PatternKind, PatternParams};
use glam::Vec2;

/// Evaluates the kernel selected by `params.kind` at one scaled
/// coordinate, returning the palette slot index (0..4).
pub fn color_index(st: Vec2, params: &PatternParams) -> usize {
    let seed = seed_value(params.seed);
    match params.kind {
        PatternKind::Blotch => blotch::shade(st, seed, params.complexity),
        PatternKind::Dazzle => dazzle::shade(
            st,
            seed,
            params.complexity,
            params.time,
            params.time_scale,
        ),
    }
}
