//! The `Srgb` color type used by palettes and surfaces.
//!
//! Both pattern kernels pick whole palette slots; colors are never
//! interpolated or blended, so a single gamma-space type is all the
//! pipeline needs. Components are `f64` in [0, 1].

use crate::error::CamoError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// sRGB color with components in [0, 1].
///
/// Serializes as a hex string `"#rrggbb"` for human-readable formats.
/// The hex round-trip has 8-bit quantization (1/255 precision loss),
/// which is acceptable since hex colors are inherently 8-bit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Srgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Srgb {
    /// Parses a hex color string like "#ff00aa" or "ff00aa" (case insensitive).
    ///
    /// Returns `CamoError::InvalidColor` if the input is not a valid 6-digit hex color.
    pub fn from_hex(hex: &str) -> Result<Srgb, CamoError> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 {
            return Err(CamoError::InvalidColor(format!(
                "expected 6 hex digits, got {}",
                hex.len()
            )));
        }
        let r = u8::from_str_radix(&hex[0..2], 16)
            .map_err(|e| CamoError::InvalidColor(format!("invalid red component: {e}")))?;
        let g = u8::from_str_radix(&hex[2..4], 16)
            .map_err(|e| CamoError::InvalidColor(format!("invalid green component: {e}")))?;
        let b = u8::from_str_radix(&hex[4..6], 16)
            .map_err(|e| CamoError::InvalidColor(format!("invalid blue component: {e}")))?;
        Ok(Srgb {
            r: r as f64 / 255.0,
            g: g as f64 / 255.0,
            b: b as f64 / 255.0,
        })
    }

    /// Converts the color to a hex string like `"#rrggbb"`.
    ///
    /// Components are quantized to 8-bit (0–255) with rounding.
    pub fn to_hex(self) -> String {
        let [r, g, b, _] = self.to_rgba8();
        format!("#{r:02x}{g:02x}{b:02x}")
    }

    /// Quantizes the color to an opaque RGBA8 pixel.
    pub fn to_rgba8(self) -> [u8; 4] {
        let q = |c: f64| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b), 255]
    }

    /// Returns true if every component lies in [0, 1].
    pub fn in_gamut(self) -> bool {
        let ok = |c: f64| (0.0..=1.0).contains(&c);
        ok(self.r) && ok(self.g) && ok(self.b)
    }
}

impl Serialize for Srgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Srgb {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Srgb::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -- Hex parsing --

    #[test]
    fn from_hex_parses_with_and_without_hash() {
        let a = Srgb::from_hex("#808030").unwrap();
        let b = Srgb::from_hex("808030").unwrap();
        assert_eq!(a, b);
        assert!((a.r - 128.0 / 255.0).abs() < 1e-12);
        assert!((a.g - 128.0 / 255.0).abs() < 1e-12);
        assert!((a.b - 48.0 / 255.0).abs() < 1e-12);
    }

    #[test]
    fn from_hex_is_case_insensitive() {
        let lower = Srgb::from_hex("#a0b1c2").unwrap();
        let upper = Srgb::from_hex("#A0B1C2").unwrap();
        assert_eq!(lower, upper);
    }

    #[test]
    fn from_hex_rejects_wrong_length() {
        assert!(Srgb::from_hex("#fff").is_err());
        assert!(Srgb::from_hex("#ff00aa00").is_err());
        assert!(Srgb::from_hex("").is_err());
    }

    #[test]
    fn from_hex_rejects_non_hex_digits() {
        assert!(Srgb::from_hex("#gg0000").is_err());
        assert!(Srgb::from_hex("#00zz00").is_err());
    }

    #[test]
    fn hex_round_trip_is_stable() {
        for hex in ["#000000", "#ffffff", "#3a3440", "#9f9578"] {
            let c = Srgb::from_hex(hex).unwrap();
            assert_eq!(c.to_hex(), hex);
        }
    }

    // -- RGBA8 --

    #[test]
    fn to_rgba8_is_opaque() {
        let c = Srgb::from_hex("#505032").unwrap();
        assert_eq!(c.to_rgba8(), [0x50, 0x50, 0x32, 255]);
    }

    #[test]
    fn to_rgba8_clamps_out_of_range_components() {
        let c = Srgb {
            r: -0.5,
            g: 1.5,
            b: 0.5,
        };
        let [r, g, _, a] = c.to_rgba8();
        assert_eq!(r, 0);
        assert_eq!(g, 255);
        assert_eq!(a, 255);
    }

    #[test]
    fn in_gamut_detects_out_of_range() {
        assert!(Srgb { r: 0.0, g: 0.5, b: 1.0 }.in_gamut());
        assert!(!Srgb { r: 1.1, g: 0.5, b: 0.5 }.in_gamut());
        assert!(!Srgb { r: 0.5, g: -0.1, b: 0.5 }.in_gamut());
    }

    // -- Serde --

    #[test]
    fn serializes_as_hex_string() {
        let c = Srgb::from_hex("#c4572a").unwrap();
        let json = serde_json::to_string(&c).unwrap();
        assert_eq!(json, "\"#c4572a\"");
    }

    #[test]
    fn deserializes_from_hex_string() {
        let c: Srgb = serde_json::from_str("\"#1b4965\"").unwrap();
        assert_eq!(c.to_hex(), "#1b4965");
    }

    #[test]
    fn deserialize_rejects_malformed_hex() {
        let result: Result<Srgb, _> = serde_json::from_str("\"#xyz\"");
        assert!(result.is_err());
    }
}
