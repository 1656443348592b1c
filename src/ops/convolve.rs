// ============================================================================
// CONVOLUTION FILTERS — generic 2D kernels plus the named specializations
// ============================================================================

use rayon::prelude::*;

use crate::buffer::PixelBuffer;
use crate::error::{Error, Result};
use crate::ops::point::{clamp_channel, grayscale_average};

/// A rectangular convolution kernel with its implicit center at
/// `(rows / 2, cols / 2)`.
#[derive(Clone, Debug, PartialEq)]
pub struct Kernel {
    rows: Vec<Vec<f64>>,
    width: usize,
    height: usize,
}

impl Kernel {
    /// Build a kernel from a row-major grid. Empty or ragged grids are
    /// rejected; even dimensions are unconventional but allowed here
    /// (the named filters enforce odd sizes themselves).
    pub fn new(rows: Vec<Vec<f64>>) -> Result<Self> {
        if rows.is_empty() || rows[0].is_empty() {
            return Err(Error::InvalidParameter("kernel must be at least 1x1".into()));
        }
        let width = rows[0].len();
        if rows.iter().any(|r| r.len() != width) {
            return Err(Error::InvalidParameter(
                "kernel rows must all have the same length".into(),
            ));
        }
        let height = rows.len();
        Ok(Kernel { rows, width, height })
    }

    /// Uniform `size x size` kernel summing to 1.
    pub fn box_filter(size: usize) -> Result<Self> {
        require_odd_window(size)?;
        let v = 1.0 / (size * size) as f64;
        Kernel::new(vec![vec![v; size]; size])
    }

    /// `(width, height)`.
    pub fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> f64 {
        self.rows[y][x]
    }
}

fn require_odd_window(size: usize) -> Result<()> {
    if size < 1 || size % 2 == 0 {
        return Err(Error::InvalidParameter(format!(
            "window size must be odd and >= 1, got {size}"
        )));
    }
    Ok(())
}

/// Convolve each RGB channel independently with `kernel`.
///
/// Samples outside the image replicate the nearest border pixel; output
/// is rounded and clamped per channel. Dimensions are preserved.
pub fn convolve(buf: &PixelBuffer, kernel: &Kernel) -> PixelBuffer {
    let w = buf.width() as usize;
    let h = buf.height() as usize;
    if w == 0 || h == 0 {
        return buf.clone();
    }
    let (kw, kh) = kernel.size();
    let (cx, cy) = (kw as i64 / 2, kh as i64 / 2);
    let src = buf.pixels();

    let mut out = PixelBuffer::new(buf.width(), buf.height());
    out.pixels_mut()
        .par_chunks_mut(w)
        .enumerate()
        .for_each(|(y, row_out)| {
            for (x, dst) in row_out.iter_mut().enumerate() {
                let mut acc = [0.0f64; 3];
                for j in 0..kh {
                    let sy = (y as i64 + j as i64 - cy).clamp(0, h as i64 - 1) as usize;
                    for i in 0..kw {
                        let sx = (x as i64 + i as i64 - cx).clamp(0, w as i64 - 1) as usize;
                        let wgt = kernel.get(i, j);
                        let px = src[sy * w + sx];
                        acc[0] += f64::from(px[0]) * wgt;
                        acc[1] += f64::from(px[1]) * wgt;
                        acc[2] += f64::from(px[2]) * wgt;
                    }
                }
                *dst = [
                    clamp_channel(acc[0]),
                    clamp_channel(acc[1]),
                    clamp_channel(acc[2]),
                ];
            }
        });
    out
}

/// Uniform averaging blur over an odd `size x size` window.
pub fn box_blur(buf: &PixelBuffer, size: usize) -> Result<PixelBuffer> {
    Ok(convolve(buf, &Kernel::box_filter(size)?))
}

/// Gaussian blur with the fixed normalized 5x5 binomial kernel
/// (`[1,4,6,4,1]` outer product, divided by 256).
pub fn gaussian_blur(buf: &PixelBuffer) -> PixelBuffer {
    let row = [1.0, 4.0, 6.0, 4.0, 1.0];
    let rows = row
        .iter()
        .map(|&a| row.iter().map(|&b| a * b / 256.0).collect())
        .collect();
    let kernel = Kernel::new(rows).expect("fixed 5x5 kernel is rectangular");
    convolve(buf, &kernel)
}

/// Classic 3x3 sharpening mask.
pub fn sharpen(buf: &PixelBuffer) -> PixelBuffer {
    let kernel = Kernel::new(vec![
        vec![0.0, -1.0, 0.0],
        vec![-1.0, 5.0, -1.0],
        vec![0.0, -1.0, 0.0],
    ])
    .expect("fixed 3x3 kernel is rectangular");
    convolve(buf, &kernel)
}

/// Sobel edge magnitude on the average-grayscale intermediate.
///
/// Not a generic RGB convolution: the image is reduced to one channel
/// first, both gradients are accumulated together, and the magnitude
/// `sqrt(gx² + gy²)` is clamped and replicated to RGB.
pub fn sobel(buf: &PixelBuffer) -> PixelBuffer {
    const GX: [[f64; 3]; 3] = [[-1.0, 0.0, 1.0], [-2.0, 0.0, 2.0], [-1.0, 0.0, 1.0]];
    const GY: [[f64; 3]; 3] = [[-1.0, -2.0, -1.0], [0.0, 0.0, 0.0], [1.0, 2.0, 1.0]];

    let w = buf.width() as usize;
    let h = buf.height() as usize;
    if w == 0 || h == 0 {
        return buf.clone();
    }
    let gray = grayscale_average(buf);
    let src = gray.pixels();

    let mut out = PixelBuffer::new(buf.width(), buf.height());
    out.pixels_mut()
        .par_chunks_mut(w)
        .enumerate()
        .for_each(|(y, row_out)| {
            for (x, dst) in row_out.iter_mut().enumerate() {
                let mut gx = 0.0f64;
                let mut gy = 0.0f64;
                for j in 0..3 {
                    let sy = (y as i64 + j as i64 - 1).clamp(0, h as i64 - 1) as usize;
                    for i in 0..3 {
                        let sx = (x as i64 + i as i64 - 1).clamp(0, w as i64 - 1) as usize;
                        let v = f64::from(src[sy * w + sx][0]);
                        gx += v * GX[j][i];
                        gy += v * GY[j][i];
                    }
                }
                let mag = clamp_channel((gx * gx + gy * gy).sqrt());
                *dst = [mag, mag, mag];
            }
        });
    out
}

/// Median rank filter over an odd `size x size` window, per channel.
/// Edge samples replicate the border. Keeps the lower median
/// (`sorted[n / 2]`) should an even window ever be permitted.
pub fn median(buf: &PixelBuffer, size: usize) -> Result<PixelBuffer> {
    require_odd_window(size)?;
    let w = buf.width() as usize;
    let h = buf.height() as usize;
    if w == 0 || h == 0 {
        return Ok(buf.clone());
    }
    let r = size as i64 / 2;
    let src = buf.pixels();

    let mut out = PixelBuffer::new(buf.width(), buf.height());
    out.pixels_mut()
        .par_chunks_mut(w)
        .enumerate()
        .for_each(|(y, row_out)| {
            let mut neigh = [Vec::new(), Vec::new(), Vec::new()];
            for (x, dst) in row_out.iter_mut().enumerate() {
                for n in &mut neigh {
                    n.clear();
                }
                for j in -r..=r {
                    let sy = (y as i64 + j).clamp(0, h as i64 - 1) as usize;
                    for i in -r..=r {
                        let sx = (x as i64 + i).clamp(0, w as i64 - 1) as usize;
                        let px = src[sy * w + sx];
                        neigh[0].push(px[0]);
                        neigh[1].push(px[1]);
                        neigh[2].push(px[2]);
                    }
                }
                let mid = neigh[0].len() / 2;
                for n in &mut neigh {
                    n.sort_unstable();
                }
                *dst = [neigh[0][mid], neigh[1][mid], neigh[2][mid]];
            }
        });
    Ok(out)
}

/// Convolve with an arbitrary user-supplied kernel.
pub fn custom(buf: &PixelBuffer, kernel: &Kernel) -> PixelBuffer {
    convolve(buf, kernel)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient(w: u32, h: u32) -> PixelBuffer {
        let data = (0..w * h)
            .map(|i| {
                let v = (i * 7 % 256) as u8;
                [v, v.wrapping_add(40), v.wrapping_mul(3)]
            })
            .collect();
        PixelBuffer::from_raw(w, h, data).unwrap()
    }

    #[test]
    fn identity_kernel_preserves_buffer() {
        let buf = gradient(9, 6);
        let id = Kernel::new(vec![vec![1.0]]).unwrap();
        assert_eq!(convolve(&buf, &id), buf);
    }

    #[test]
    fn kernel_rejects_empty_and_ragged() {
        assert!(Kernel::new(vec![]).is_err());
        assert!(Kernel::new(vec![vec![]]).is_err());
        assert!(Kernel::new(vec![vec![1.0, 2.0], vec![3.0]]).is_err());
    }

    #[test]
    fn box_blur_flattens_constant_image() {
        let buf = PixelBuffer::from_raw(4, 4, vec![[90, 120, 30]; 16]).unwrap();
        assert_eq!(box_blur(&buf, 3).unwrap(), buf);
    }

    #[test]
    fn box_blur_requires_odd_window() {
        let buf = PixelBuffer::new(4, 4);
        assert!(matches!(box_blur(&buf, 2), Err(Error::InvalidParameter(_))));
        assert!(matches!(box_blur(&buf, 0), Err(Error::InvalidParameter(_))));
    }

    #[test]
    fn box_blur_averages_neighborhood() {
        // Single bright pixel in the middle of black: center becomes 255/9.
        let mut buf = PixelBuffer::new(3, 3);
        buf.set(1, 1, [255, 255, 255]);
        let out = box_blur(&buf, 3).unwrap();
        assert_eq!(out.get(1, 1), [28, 28, 28]); // round(255 / 9)
    }

    #[test]
    fn gaussian_kernel_is_normalized() {
        let buf = PixelBuffer::from_raw(5, 5, vec![[200, 10, 60]; 25]).unwrap();
        assert_eq!(gaussian_blur(&buf), buf);
    }

    #[test]
    fn sharpen_preserves_flat_regions() {
        let buf = PixelBuffer::from_raw(5, 5, vec![[77, 140, 200]; 25]).unwrap();
        assert_eq!(sharpen(&buf), buf);
    }

    #[test]
    fn sobel_is_dark_on_flat_and_bright_on_edges() {
        let mut data = vec![[0, 0, 0]; 36];
        for y in 0..6usize {
            for x in 3..6usize {
                data[y * 6 + x] = [255, 255, 255];
            }
        }
        let buf = PixelBuffer::from_raw(6, 6, data).unwrap();
        let out = sobel(&buf);
        // Flat interior far from the edge.
        assert_eq!(out.get(0, 2), [0, 0, 0]);
        assert_eq!(out.get(5, 2), [0, 0, 0]);
        // Strong vertical edge between columns 2 and 3.
        assert_eq!(out.get(2, 2), [255, 255, 255]);
        let p = out.get(3, 3);
        assert_eq!(p[0], p[1]);
        assert_eq!(p[1], p[2]);
        assert!(p[0] > 200);
    }

    #[test]
    fn median_removes_single_outlier() {
        let mut buf = PixelBuffer::from_raw(3, 3, vec![[10, 10, 10]; 9]).unwrap();
        buf.set(1, 1, [255, 0, 255]);
        let out = median(&buf, 3).unwrap();
        assert_eq!(out.get(1, 1), [10, 10, 10]);
    }

    #[test]
    fn median_requires_odd_window() {
        let buf = PixelBuffer::new(3, 3);
        assert!(matches!(median(&buf, 4), Err(Error::InvalidParameter(_))));
    }

    #[test]
    fn edge_clamp_replicates_border() {
        // A 1-wide image blurred horizontally must stay unchanged because
        // every out-of-bounds sample replicates the single column.
        let buf = PixelBuffer::from_raw(1, 4, vec![[5, 6, 7]; 4]).unwrap();
        let k = Kernel::new(vec![vec![1.0 / 3.0, 1.0 / 3.0, 1.0 / 3.0]]).unwrap();
        assert_eq!(convolve(&buf, &k), buf);
    }
}
