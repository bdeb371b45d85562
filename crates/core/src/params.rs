//! Immutable parameter set for one pattern evaluation.
//!
//! A [`PatternParams`] value is built fresh whenever any control changes
//! (seed randomize, slider move, preset pick) and is read-only for the
//! duration of one evaluation. Two identical values produce bit-identical
//! images.

use crate::error::CamoError;
use crate::palette::Palette;
use serde::{Deserialize, Serialize};

/// Default pattern scale (recommended range 1–20).
pub const DEFAULT_SCALE: f32 = 6.0;
/// Default complexity (0 = simple, 1 = intricate).
pub const DEFAULT_COMPLEXITY: f32 = 0.5;
/// Default animation speed multiplier.
pub const DEFAULT_TIME_SCALE: f32 = 1.0;

/// Which pattern kernel to evaluate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatternKind {
    /// Layered merged-Voronoi blotches.
    Blotch,
    /// Overlapping rotated angular grids with scrolling stripes.
    Dazzle,
}

impl PatternKind {
    /// Parses a kind name as used on the CLI ("blotch" / "dazzle").
    pub fn from_name(name: &str) -> Result<Self, CamoError> {
        match name.to_ascii_lowercase().as_str() {
            "blotch" => Ok(PatternKind::Blotch),
            "dazzle" => Ok(PatternKind::Dazzle),
            _ => Err(CamoError::UnknownPattern(name.to_string())),
        }
    }

    /// The canonical lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            PatternKind::Blotch => "blotch",
            PatternKind::Dazzle => "dazzle",
        }
    }

    /// All recognized kind names.
    pub fn list_names() -> &'static [&'static str] {
        &["blotch", "dazzle"]
    }
}

/// Everything a single evaluation needs, immutable once built.
///
/// `time` and `time_scale` only affect the Dazzle kernel; the Blotch
/// kernel ignores them entirely. `digital_pixel_size = 0` disables the
/// mosaic snapping post-step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PatternParams {
    pub seed: u32,
    pub scale: f32,
    pub complexity: f32,
    pub palette: Palette,
    pub kind: PatternKind,
    pub time: f32,
    pub time_scale: f32,
    pub digital_pixel_size: u32,
}

impl PatternParams {
    /// Creates params for a still image with library defaults.
    pub fn new(kind: PatternKind, seed: u32, palette: Palette) -> Self {
        Self {
            seed,
            scale: DEFAULT_SCALE,
            complexity: DEFAULT_COMPLEXITY,
            palette,
            kind,
            time: 0.0,
            time_scale: DEFAULT_TIME_SCALE,
            digital_pixel_size: 0,
        }
    }

    /// Returns a copy with `time` replaced; everything else unchanged.
    ///
    /// This is the only field the animation driver and the sequence
    /// exporter vary between frames.
    pub fn at_time(&self, time: f32) -> Self {
        Self { time, ..*self }
    }

    /// Checks every field against its documented domain.
    ///
    /// Rejection happens before evaluation; no partial rendering occurs
    /// for invalid params.
    pub fn validate(&self) -> Result<(), CamoError> {
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(CamoError::invalid_param(
                "scale",
                format!("must be a positive finite number, got {}", self.scale),
            ));
        }
        if !self.complexity.is_finite() || !(0.0..=1.0).contains(&self.complexity) {
            return Err(CamoError::invalid_param(
                "complexity",
                format!("must lie in [0, 1], got {}", self.complexity),
            ));
        }
        if !self.time.is_finite() || self.time < 0.0 {
            return Err(CamoError::invalid_param(
                "time",
                format!("must be non-negative and finite, got {}", self.time),
            ));
        }
        if !self.time_scale.is_finite() || self.time_scale <= 0.0 {
            return Err(CamoError::invalid_param(
                "time_scale",
                format!("must be a positive finite number, got {}", self.time_scale),
            ));
        }
        // Palette gamut is enforced at construction and under serde;
        // re-checked here so evaluation never starts from a bad palette.
        Palette::new(*self.palette.colors())?;
        Ok(())
    }
}
