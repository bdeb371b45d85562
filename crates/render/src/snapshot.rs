//! Still-image export: lossless RGBA PNG.

use camo_core::{CamoError, ImageSurface};
use image::{ImageFormat, RgbaImage};
use std::io::Cursor;
use std::path::Path;

/// Encodes a surface as a PNG byte stream (lossless, RGBA).
pub fn encode_png(surface: &ImageSurface) -> Result<Vec<u8>, CamoError> {
    let img = RgbaImage::from_raw(surface.width(), surface.height(), surface.data().to_vec())
        .ok_or_else(|| CamoError::Encode("RGBA buffer size mismatch".into()))?;
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .map_err(|e| CamoError::Encode(e.to_string()))?;
    Ok(bytes)
}

/// Encodes a surface as PNG and writes it to `path`.
pub fn write_png(surface: &ImageSurface, path: &Path) -> Result<(), CamoError> {
    let bytes = encode_png(surface)?;
    std::fs::write(path, bytes).map_err(|e| CamoError::Io(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use camo_core::{evaluate, Palette, PatternKind, PatternParams};

    fn rendered() -> ImageSurface {
        let params = PatternParams::new(PatternKind::Blotch, 42, Palette::default());
        evaluate(&params, 16, 16).unwrap()
    }

    #[test]
    fn encode_png_produces_decodable_bytes() {
        let surface = rendered();
        let bytes = encode_png(&surface).unwrap();
        let img = image::load_from_memory(&bytes).unwrap().to_rgba8();
        assert_eq!(img.width(), 16);
        assert_eq!(img.height(), 16);
        // PNG is lossless: the decoded pixels are the surface bytes.
        assert_eq!(img.into_raw(), surface.data());
    }

    #[test]
    fn write_png_round_trip() {
        let surface = rendered();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blotch-camo-42.png");

        write_png(&surface, &path).unwrap();

        let img = image::open(&path).unwrap().to_rgba8();
        assert_eq!(img.width(), 16);
        assert_eq!(img.height(), 16);
    }

    #[test]
    fn write_png_surfaces_io_failure() {
        let surface = rendered();
        let result = write_png(&surface, Path::new("/nonexistent-dir/out.png"));
        assert!(matches!(result, Err(CamoError::Io(_))));
    }
}
