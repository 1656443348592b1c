// ============================================================================
// PIXEL BUFFER — the in-memory RGB surface every pipeline stage consumes
// ============================================================================

use image::{RgbImage, RgbaImage};

use crate::error::{Error, Result};

/// An owned RGB8 pixel buffer, row-major, origin top-left.
///
/// The length invariant `data.len() == width * height` holds for every
/// buffer ever constructed; `from_raw` rejects inconsistent input and the
/// pipeline operations always produce consistently sized output.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<[u8; 3]>,
}

impl PixelBuffer {
    /// A black buffer of the given dimensions.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![[0, 0, 0]; width as usize * height as usize],
        }
    }

    /// Wrap an existing pixel vector. Fails with `DimensionMismatch` when
    /// the length does not equal `width * height`.
    pub fn from_raw(width: u32, height: u32, data: Vec<[u8; 3]>) -> Result<Self> {
        let expected = width as usize * height as usize;
        if data.len() != expected {
            return Err(Error::DimensionMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self { width, height, data })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Flat row-major pixel slice.
    pub fn pixels(&self) -> &[[u8; 3]] {
        &self.data
    }

    pub fn pixels_mut(&mut self) -> &mut [[u8; 3]] {
        &mut self.data
    }

    pub fn into_raw(self) -> Vec<[u8; 3]> {
        self.data
    }

    #[inline]
    pub fn get(&self, x: u32, y: u32) -> [u8; 3] {
        self.data[y as usize * self.width as usize + x as usize]
    }

    #[inline]
    pub fn set(&mut self, x: u32, y: u32, px: [u8; 3]) {
        self.data[y as usize * self.width as usize + x as usize] = px;
    }

    /// One row of pixels.
    #[inline]
    pub fn row(&self, y: u32) -> &[[u8; 3]] {
        let w = self.width as usize;
        let off = y as usize * w;
        &self.data[off..off + w]
    }

    // ------------------------------------------------------------------
    //  Interop with the external codec collaborator (`image` crate)
    // ------------------------------------------------------------------

    /// Import from a decoded RGB image.
    pub fn from_rgb_image(img: &RgbImage) -> Self {
        let data = img.pixels().map(|p| p.0).collect();
        Self {
            width: img.width(),
            height: img.height(),
            data,
        }
    }

    /// Import from a decoded RGBA image; alpha is dropped.
    pub fn from_rgba_image(img: &RgbaImage) -> Self {
        let data = img.pixels().map(|p| [p.0[0], p.0[1], p.0[2]]).collect();
        Self {
            width: img.width(),
            height: img.height(),
            data,
        }
    }

    /// Export for the encoding side of the codec collaborator.
    pub fn to_rgb_image(&self) -> RgbImage {
        let raw: Vec<u8> = self.data.iter().flatten().copied().collect();
        // Length invariant guarantees from_raw succeeds.
        RgbImage::from_raw(self.width, self.height, raw)
            .unwrap_or_else(|| RgbImage::new(self.width, self.height))
    }

    /// Export as RGBA with opaque alpha.
    pub fn to_rgba_image(&self) -> RgbaImage {
        let raw: Vec<u8> = self
            .data
            .iter()
            .flat_map(|p| [p[0], p[1], p[2], 255])
            .collect();
        RgbaImage::from_raw(self.width, self.height, raw)
            .unwrap_or_else(|| RgbaImage::new(self.width, self.height))
    }
}
