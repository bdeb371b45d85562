//! Four-slot camouflage palettes and the named preset catalog.
//!
//! Every pattern is painted from exactly four colors: two base tones
//! (slots 0 and 1) and two accents (slots 2 and 3). The kernels address
//! slots by index and never mix colors, so the palette is a plain lookup
//! table rather than a gradient.

use crate::color::Srgb;
use crate::error::CamoError;
use serde::{Deserialize, Serialize};

/// Number of color slots in every palette.
pub const PALETTE_SIZE: usize = 4;

/// Built-in presets: `(name, [base_a, base_b, accent_a, accent_b])`.
const PRESETS: &[(&str, [&str; PALETTE_SIZE])] = &[
    ("m90", ["#808030", "#505032", "#9F9578", "#3A3440"]),
    ("arctic", ["#C8D5E0", "#8A9BAE", "#E8EDF2", "#4A5568"]),
    ("ember", ["#C4572A", "#8B3A1F", "#E8A84C", "#2D1B14"]),
    ("ocean", ["#2B7A99", "#1B4965", "#5FA8C4", "#0D2137"]),
    ("dusk", ["#9B7EC8", "#5C4B8A", "#D4A9A8", "#2A2240"]),
    ("moss", ["#7A8C5E", "#4A5A3A", "#B8AD98", "#2E3028"]),
    ("noir", ["#4A4A4A", "#1A1A1A", "#787878", "#0A0A0A"]),
    ("sakura", ["#E8A0BF", "#C06090", "#F5D5E0", "#6B3050"]),
    ("desert", ["#D4A76A", "#A07840", "#E8D4B0", "#5C3D1E"]),
    ("neon", ["#00E5A0", "#0080FF", "#FF3090", "#0A0A2A"]),
    ("terracotta", ["#C07050", "#8B4535", "#D8B49A", "#3D2520"]),
    ("mint", ["#7EC8B0", "#4A8C78", "#C8E8D8", "#2A1E18"]),
    ("storm", ["#607090", "#3A4A60", "#8898A8", "#1E2830"]),
    ("autumn", ["#C8783C", "#8B4513", "#D4A850", "#2D1F0E"]),
    ("lavender", ["#A89CC8", "#7060A0", "#D8D0E8", "#E8D888"]),
    ("coral", ["#FF7F6B", "#1B8C8C", "#FFB89A", "#104050"]),
];

/// An ordered set of exactly four colors addressed by slot index.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Palette {
    colors: [Srgb; PALETTE_SIZE],
}

impl Palette {
    /// Creates a palette from four colors.
    ///
    /// Returns `CamoError::InvalidPalette` if any component lies outside [0, 1].
    pub fn new(colors: [Srgb; PALETTE_SIZE]) -> Result<Self, CamoError> {
        for (i, c) in colors.iter().enumerate() {
            if !c.in_gamut() {
                return Err(CamoError::InvalidPalette(format!(
                    "slot {i} has a component outside [0, 1]"
                )));
            }
        }
        Ok(Self { colors })
    }

    /// Creates a palette by parsing four hex color strings.
    pub fn from_hex(hexes: &[&str; PALETTE_SIZE]) -> Result<Self, CamoError> {
        Ok(Self {
            colors: [
                Srgb::from_hex(hexes[0])?,
                Srgb::from_hex(hexes[1])?,
                Srgb::from_hex(hexes[2])?,
                Srgb::from_hex(hexes[3])?,
            ],
        })
    }

    /// Looks up a built-in preset by name (case insensitive).
    ///
    /// Returns `CamoError::UnknownPreset` if the name is not in the catalog.
    pub fn from_name(name: &str) -> Result<Self, CamoError> {
        let lower = name.to_ascii_lowercase();
        PRESETS
            .iter()
            .find(|(id, _)| *id == lower)
            .map(|(_, hexes)| Self::from_hex(hexes))
            .transpose()?
            .ok_or_else(|| CamoError::UnknownPreset(name.to_string()))
    }

    /// Returns the names of all built-in presets, in catalog order.
    pub fn list_names() -> Vec<&'static str> {
        PRESETS.iter().map(|(id, _)| *id).collect()
    }

    /// Returns the color at `slot`. Slots wrap modulo [`PALETTE_SIZE`],
    /// so kernel index arithmetic can never read out of bounds.
    pub fn color(&self, slot: usize) -> Srgb {
        self.colors[slot % PALETTE_SIZE]
    }

    /// Read-only access to all four slots.
    pub fn colors(&self) -> &[Srgb; PALETTE_SIZE] {
        &self.colors
    }

    /// The two-color transform: `[A, B, C, D] -> [A, B, A, B]`.
    ///
    /// Applied before `PatternParams` is built (never inside a kernel),
    /// this collapses a dazzle pattern to two distinct colors while
    /// keeping all four slots addressable.
    pub fn two_color(&self) -> Palette {
        Palette {
            colors: [self.colors[0], self.colors[1], self.colors[0], self.colors[1]],
        }
    }
}

impl Default for Palette {
    /// The M90 Classic preset.
    fn default() -> Self {
        Self::from_name("m90").expect("m90 preset hex values are valid")
    }
}
