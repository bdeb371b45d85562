//! RGBA8 image surface and full-frame pattern evaluation.
//!
//! `evaluate` is the bridge from a per-pixel kernel to a finished image:
//! it normalizes pixel coordinates into a resolution-independent space
//! (dividing by image height, so patterns never stretch with the window
//! shape), applies the optional digital-camo snap, invokes the selected
//! kernel, and writes the palette color. Pixels carry no cross-pixel
//! dependency, so any evaluation order is valid.

use crate::error::CamoError;
use crate::kernel;
use crate::params::PatternParams;
use glam::Vec2;

/// A 2-D buffer of RGBA8 samples with explicit dimensions.
///
/// Owned exclusively by whichever component requested it (interactive
/// view vs. exporter); evaluation never shares a surface between
/// concurrent users.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageSurface {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl ImageSurface {
    /// Creates a transparent-black surface of the given dimensions.
    ///
    /// Returns `CamoError::InvalidDimensions` if either dimension is zero
    /// or the byte length would overflow `usize`.
    pub fn new(width: u32, height: u32) -> Result<Self, CamoError> {
        if width == 0 || height == 0 {
            return Err(CamoError::InvalidDimensions);
        }
        let len = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(4))
            .ok_or(CamoError::InvalidDimensions)?;
        Ok(Self {
            width,
            height,
            data: vec![0; len],
        })
    }

    /// Surface width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Surface height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Read-only access to the row-major RGBA8 bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Consumes the surface, returning its RGBA8 bytes.
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// Reads the pixel at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinate is out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        assert!(x < self.width && y < self.height, "pixel out of bounds");
        let i = (y as usize * self.width as usize + x as usize) * 4;
        [self.data[i], self.data[i + 1], self.data[i + 2], self.data[i + 3]]
    }

    #[inline]
    fn put(&mut self, x: u32, y: u32, rgba: [u8; 4]) {
        let i = (y as usize * self.width as usize + x as usize) * 4;
        self.data[i..i + 4].copy_from_slice(&rgba);
    }
}

/// Evaluates the selected kernel over every pixel of a fresh surface.
///
/// Coordinates follow the fragment convention: pixel centers sit at
/// +0.5 and are divided by the image height, so rendering the same
/// params at 2x the resolution reproduces the same layout at 2x linear
/// scale. With `digital_pixel_size = k > 0` the coordinate is snapped to
/// the center of its k-by-k block before the kernel runs, giving every
/// pixel of a block the identical color (mosaic look).
///
/// Params are validated up front; nothing is rendered for invalid input.
pub fn evaluate(
    params: &PatternParams,
    width: u32,
    height: u32,
) -> Result<ImageSurface, CamoError> {
    params.validate()?;
    let mut surface = ImageSurface::new(width, height)?;

    let rgba: [[u8; 4]; 4] = [
        params.palette.color(0).to_rgba8(),
        params.palette.color(1).to_rgba8(),
        params.palette.color(2).to_rgba8(),
        params.palette.color(3).to_rgba8(),
    ];
    let inv_height = 1.0 / height as f32;
    let block = params.digital_pixel_size;

    for y in 0..height {
        for x in 0..width {
            let (cx, cy) = if block > 0 {
                // Block center, constant across the whole block.
                (
                    (x / block * block) as f32 + block as f32 * 0.5,
                    (y / block * block) as f32 + block as f32 * 0.5,
                )
            } else {
                (x as f32 + 0.5, y as f32 + 0.5)
            };
            let st = Vec2::new(cx, cy) * inv_height * params.scale;
            let slot = kernel::color_index(st, params);
            surface.put(x, y, rgba[slot % 4]);
        }
    }

    Ok(surface)
}
