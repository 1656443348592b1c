// ============================================================================
// BINARY MORPHOLOGY — dilation, erosion, hit-or-miss and friends
// ============================================================================

use rayon::prelude::*;

use crate::buffer::PixelBuffer;
use crate::error::{Error, Result};

/// A binary image: flat `{0, 1}` array with the same row-major indexing
/// as [`PixelBuffer`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BinaryImage {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl BinaryImage {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; width as usize * height as usize],
        }
    }

    /// Wrap an existing bit vector; any nonzero byte counts as foreground.
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        let expected = width as usize * height as usize;
        if data.len() != expected {
            return Err(Error::DimensionMismatch {
                expected,
                actual: data.len(),
            });
        }
        let data = data.into_iter().map(|v| u8::from(v != 0)).collect();
        Ok(Self { width, height, data })
    }

    /// Binarize a pixel buffer: mean channel value >= 128 is foreground.
    pub fn from_pixels(buf: &PixelBuffer) -> Self {
        let data = buf
            .pixels()
            .iter()
            .map(|p| {
                let mean = (u32::from(p[0]) + u32::from(p[1]) + u32::from(p[2])) / 3;
                u8::from(mean >= 128)
            })
            .collect();
        Self {
            width: buf.width(),
            height: buf.height(),
            data,
        }
    }

    /// Render back to pixels: foreground white, background black.
    pub fn to_pixels(&self) -> PixelBuffer {
        let data = self
            .data
            .iter()
            .map(|&v| if v != 0 { [255, 255, 255] } else { [0, 0, 0] })
            .collect();
        PixelBuffer::from_raw(self.width, self.height, data)
            .expect("binary image upholds the length invariant")
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn bits(&self) -> &[u8] {
        &self.data
    }

    #[inline]
    pub fn get(&self, x: u32, y: u32) -> u8 {
        self.data[y as usize * self.width as usize + x as usize]
    }

    #[inline]
    pub fn set(&mut self, x: u32, y: u32, v: u8) {
        self.data[y as usize * self.width as usize + x as usize] = u8::from(v != 0);
    }
}

/// A rectangular structuring element over `{-1, 0, 1}`:
/// 1 requires foreground, -1 requires background, 0 is ignored.
/// The center sits at `(rows / 2, cols / 2)`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StructuringElement {
    cells: Vec<Vec<i8>>,
    width: usize,
    height: usize,
}

impl StructuringElement {
    pub fn new(cells: Vec<Vec<i8>>) -> Result<Self> {
        if cells.is_empty() || cells[0].is_empty() {
            return Err(Error::InvalidParameter(
                "structuring element must be at least 1x1".into(),
            ));
        }
        let width = cells[0].len();
        if cells.iter().any(|r| r.len() != width) {
            return Err(Error::InvalidParameter(
                "structuring element rows must all have the same length".into(),
            ));
        }
        if cells.iter().flatten().any(|&c| !(-1..=1).contains(&c)) {
            return Err(Error::InvalidParameter(
                "structuring element cells must be -1, 0 or 1".into(),
            ));
        }
        let height = cells.len();
        Ok(Self { cells, width, height })
    }

    /// A `size x size` all-foreground square.
    pub fn square(size: usize) -> Result<Self> {
        if size < 1 {
            return Err(Error::InvalidParameter(
                "structuring element must be at least 1x1".into(),
            ));
        }
        Self::new(vec![vec![1; size]; size])
    }

    /// `(width, height)`.
    pub fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    #[inline]
    fn get(&self, x: usize, y: usize) -> i8 {
        self.cells[y][x]
    }
}

/// Row-parallel scan shared by all the morphology operators: `probe`
/// decides each output bit from the source and the SE anchored at
/// `(x, y)`.
fn scan<F>(bin: &BinaryImage, probe: F) -> BinaryImage
where
    F: Fn(i64, i64) -> u8 + Sync,
{
    let w = bin.width as usize;
    let mut out = BinaryImage::new(bin.width, bin.height);
    out.data
        .par_chunks_mut(w.max(1))
        .enumerate()
        .for_each(|(y, row_out)| {
            for (x, dst) in row_out.iter_mut().enumerate() {
                *dst = probe(x as i64, y as i64);
            }
        });
    out
}

#[inline]
fn sample(bin: &BinaryImage, x: i64, y: i64) -> Option<u8> {
    if x < 0 || y < 0 || x >= i64::from(bin.width) || y >= i64::from(bin.height) {
        None
    } else {
        Some(bin.data[y as usize * bin.width as usize + x as usize])
    }
}

/// Dilation: output is foreground wherever any SE cell marked 1 overlaps
/// a foreground pixel. Out-of-bounds samples contribute nothing.
pub fn dilate(bin: &BinaryImage, se: &StructuringElement) -> BinaryImage {
    let (sw, sh) = se.size();
    let (cx, cy) = (sw as i64 / 2, sh as i64 / 2);
    scan(bin, |x, y| {
        for j in 0..sh {
            for i in 0..sw {
                if se.get(i, j) != 1 {
                    continue;
                }
                let hit = sample(bin, x + i as i64 - cx, y + j as i64 - cy);
                if hit == Some(1) {
                    return 1;
                }
            }
        }
        0
    })
}

/// Erosion: output is foreground only when every SE cell marked 1 sits on
/// an in-bounds foreground pixel. Out-of-bounds fails the match.
pub fn erode(bin: &BinaryImage, se: &StructuringElement) -> BinaryImage {
    let (sw, sh) = se.size();
    let (cx, cy) = (sw as i64 / 2, sh as i64 / 2);
    scan(bin, |x, y| {
        for j in 0..sh {
            for i in 0..sw {
                if se.get(i, j) != 1 {
                    continue;
                }
                if sample(bin, x + i as i64 - cx, y + j as i64 - cy) != Some(1) {
                    return 0;
                }
            }
        }
        1
    })
}

/// Opening: erosion followed by dilation.
pub fn open(bin: &BinaryImage, se: &StructuringElement) -> BinaryImage {
    dilate(&erode(bin, se), se)
}

/// Closing: dilation followed by erosion.
pub fn close(bin: &BinaryImage, se: &StructuringElement) -> BinaryImage {
    erode(&dilate(bin, se), se)
}

/// Hit-or-miss: cells marked 1 must land on in-bounds foreground, cells
/// marked -1 on background (out-of-bounds counts as background), cells
/// marked 0 are ignored.
pub fn hit_or_miss(bin: &BinaryImage, se: &StructuringElement) -> BinaryImage {
    let (sw, sh) = se.size();
    let (cx, cy) = (sw as i64 / 2, sh as i64 / 2);
    scan(bin, |x, y| {
        for j in 0..sh {
            for i in 0..sw {
                let want = se.get(i, j);
                if want == 0 {
                    continue;
                }
                let got = sample(bin, x + i as i64 - cx, y + j as i64 - cy);
                let ok = match want {
                    1 => got == Some(1),
                    _ => got != Some(1), // -1: background or out of bounds
                };
                if !ok {
                    return 0;
                }
            }
        }
        1
    })
}

/// Thinning: remove foreground pixels matching the hit-or-miss pattern.
pub fn thin(bin: &BinaryImage, se: &StructuringElement) -> BinaryImage {
    let matched = hit_or_miss(bin, se);
    let mut out = bin.clone();
    for (dst, &m) in out.data.iter_mut().zip(&matched.data) {
        if m == 1 {
            *dst = 0;
        }
    }
    out
}

/// Thickening: add pixels matching the hit-or-miss pattern.
pub fn thicken(bin: &BinaryImage, se: &StructuringElement) -> BinaryImage {
    let matched = hit_or_miss(bin, se);
    let mut out = bin.clone();
    for (dst, &m) in out.data.iter_mut().zip(&matched.data) {
        if m == 1 {
            *dst = 1;
        }
    }
    out
}
