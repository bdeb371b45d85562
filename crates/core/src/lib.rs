#![deny(unsafe_code)]
//! Core types and pattern kernels for the camo-engine.
//!
//! Provides the hash primitives, the `Blotch` (merged-Voronoi) and
//! `Dazzle` (angular stripe) kernels, the `ImageSurface`/`evaluate`
//! pipeline, the `Animator` playback driver, `Palette` presets, and
//! `PatternParams`.

pub mod animator;
pub mod color;
pub mod error;
pub mod hash;
pub mod kernel;
pub mod palette;
pub mod params;
pub mod surface;

pub use animator::{Animator, AnimatorState};
pub use color::Srgb;
pub use error::CamoError;
pub use palette::Palette;
pub use params::{PatternKind, PatternParams};
pub use surface::{evaluate, ImageSurface};
