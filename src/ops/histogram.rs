// ============================================================================
// HISTOGRAM & THRESHOLDS — luminance statistics and binarization
// ============================================================================
//
// All operations here work on the luminance scalar (0.299 R + 0.587 G +
// 0.114 B) and produce grayscale or binary output with all three
// channels equal. Degenerate inputs (flat histograms, one-sided
// partitions) take documented fallback paths instead of failing.

use rayon::prelude::*;

use crate::buffer::PixelBuffer;
use crate::ops::point::map_pixels;

/// Luminance bucket for a pixel, clamped to `0..=255`.
#[inline]
pub fn luminance(r: u8, g: u8, b: u8) -> u8 {
    let y = 0.299 * f64::from(r) + 0.587 * f64::from(g) + 0.114 * f64::from(b);
    y.round().clamp(0.0, 255.0) as u8
}

/// Count of pixels per luminance bucket. Sums to `width * height`.
pub fn histogram(buf: &PixelBuffer) -> [u64; 256] {
    let mut hist = [0u64; 256];
    for px in buf.pixels() {
        hist[luminance(px[0], px[1], px[2]) as usize] += 1;
    }
    hist
}

/// Map every pixel through a luminance lookup table, row-parallel.
fn apply_luma_lut(buf: &PixelBuffer, lut: &[u8; 256]) -> PixelBuffer {
    let w = buf.width() as usize;
    let src = buf.pixels();
    let mut out = PixelBuffer::new(buf.width(), buf.height());
    out.pixels_mut()
        .par_chunks_mut(w.max(1))
        .enumerate()
        .for_each(|(y, row_out)| {
            let row_in = &src[y * w..(y + 1) * w];
            for (dst, px) in row_out.iter_mut().zip(row_in) {
                let v = lut[luminance(px[0], px[1], px[2]) as usize];
                *dst = [v, v, v];
            }
        });
    out
}

/// Histogram stretch: remap the occupied luminance range `[imin, imax]`
/// to `[0, 255]`. A flat image collapses to solid gray at its single
/// occupied bucket. Output is grayscale.
pub fn stretch(buf: &PixelBuffer) -> PixelBuffer {
    let hist = histogram(buf);
    if buf.pixels().is_empty() {
        return buf.clone();
    }

    let imin = hist.iter().position(|&c| c > 0).unwrap_or(0);
    let imax = hist.iter().rposition(|&c| c > 0).unwrap_or(255);
    if imin >= imax {
        let gray = imin as u8;
        return map_pixels(buf, move |_, _, _| {
            (f64::from(gray), f64::from(gray), f64::from(gray))
        });
    }

    let scale = 255.0 / (imax - imin) as f64;
    let mut lut = [0u8; 256];
    for (i, v) in lut.iter_mut().enumerate() {
        *v = if i <= imin {
            0
        } else if i >= imax {
            255
        } else {
            (((i - imin) as f64) * scale).round().clamp(0.0, 255.0) as u8
        };
    }
    apply_luma_lut(buf, &lut)
}

/// Histogram equalization via the cumulative distribution function.
/// Near-zero spread (`cdf_min == 0` or no range above it) degrades to the
/// identity luminance mapping. Output is grayscale.
pub fn equalize(buf: &PixelBuffer) -> PixelBuffer {
    let hist = histogram(buf);
    let total: u64 = hist.iter().sum();
    if total == 0 {
        return buf.clone();
    }

    let mut cdf = [0u64; 256];
    let mut cumsum = 0u64;
    for (i, &c) in hist.iter().enumerate() {
        cumsum += c;
        cdf[i] = cumsum;
    }
    let cdf_min = cdf.iter().copied().find(|&c| c > 0).unwrap_or(0);

    let mut lut = [0u8; 256];
    if cdf_min == 0 || cdf[255] == cdf_min {
        for (i, v) in lut.iter_mut().enumerate() {
            *v = i as u8;
        }
    } else {
        let denom = (total - cdf_min) as f64;
        for (i, v) in lut.iter_mut().enumerate() {
            let frac = ((cdf[i] - cdf_min) as f64 / denom).clamp(0.0, 1.0);
            *v = (frac * 255.0).round().clamp(0.0, 255.0) as u8;
        }
    }
    apply_luma_lut(buf, &lut)
}

fn binary_lut(t: u8) -> [u8; 256] {
    let mut lut = [255u8; 256];
    for v in lut.iter_mut().take(t as usize) {
        *v = 0;
    }
    lut
}

/// Fixed-threshold binarization: luminance below `t` goes black, the
/// rest white.
pub fn threshold_manual(buf: &PixelBuffer, t: u8) -> PixelBuffer {
    apply_luma_lut(buf, &binary_lut(t))
}

/// Percent-black binarization: the smallest threshold whose cumulative
/// histogram count reaches `percent` of all pixels. `percent` is clamped
/// to `[0, 100]`.
pub fn threshold_percent_black(buf: &PixelBuffer, percent: f64) -> PixelBuffer {
    let percent = percent.clamp(0.0, 100.0);
    let hist = histogram(buf);
    let total: u64 = hist.iter().sum();
    if total == 0 {
        return buf.clone();
    }

    let target = total as f64 * (percent / 100.0);
    let mut cumsum = 0u64;
    let mut t = 0u8;
    for (i, &c) in hist.iter().enumerate() {
        cumsum += c;
        if cumsum as f64 >= target {
            t = i as u8;
            break;
        }
    }
    threshold_manual(buf, t)
}

/// Iterative two-class mean threshold (Ridler-Calvard style).
///
/// Starts at the global mean luminance, then repeatedly re-centers the
/// threshold on the midpoint of the two class means until it moves less
/// than `eps`, `max_iter` is hit, or one class empties.
pub fn threshold_mean_iterative(buf: &PixelBuffer, max_iter: u32, eps: f64) -> PixelBuffer {
    let hist = histogram(buf);
    let total: u64 = hist.iter().sum();
    if total == 0 {
        return buf.clone();
    }

    let weighted: u64 = hist
        .iter()
        .enumerate()
        .map(|(i, &c)| i as u64 * c)
        .sum();
    let mut t = weighted as f64 / total as f64;

    for _ in 0..max_iter {
        let (mut n1, mut s1, mut n2, mut s2) = (0u64, 0u64, 0u64, 0u64);
        for (i, &c) in hist.iter().enumerate() {
            if i as f64 <= t {
                n1 += c;
                s1 += i as u64 * c;
            } else {
                n2 += c;
                s2 += i as u64 * c;
            }
        }
        if n1 == 0 || n2 == 0 {
            break;
        }
        let m1 = s1 as f64 / n1 as f64;
        let m2 = s2 as f64 / n2 as f64;
        let new_t = (m1 + m2) / 2.0;
        let done = (new_t - t).abs() < eps;
        t = new_t;
        if done {
            break;
        }
    }
    threshold_manual(buf, t.round().clamp(0.0, 255.0) as u8)
}

/// Kapur entropy threshold: pick the split maximizing the summed Shannon
/// entropy of the background `[0, T]` and foreground `[T+1, 255]`
/// partitions. Candidates leaving either partition empty are skipped;
/// ties keep the first (lowest) maximizer.
pub fn threshold_entropy(buf: &PixelBuffer) -> PixelBuffer {
    let hist = histogram(buf);
    let total: u64 = hist.iter().sum();
    if total == 0 {
        return buf.clone();
    }

    let p: Vec<f64> = hist.iter().map(|&c| c as f64 / total as f64).collect();
    let mut best_t = 0u8;
    let mut best_h = f64::NEG_INFINITY;

    for t in 0usize..255 {
        let p1: f64 = p[..=t].iter().sum();
        let p2: f64 = p[t + 1..].iter().sum();
        if p1 <= 0.0 || p2 <= 0.0 {
            continue;
        }

        let h1: f64 = p[..=t]
            .iter()
            .filter(|&&pi| pi > 0.0)
            .map(|&pi| {
                let q = pi / p1;
                -q * (q + 1e-12).ln()
            })
            .sum();
        let h2: f64 = p[t + 1..]
            .iter()
            .filter(|&&pi| pi > 0.0)
            .map(|&pi| {
                let q = pi / p2;
                -q * (q + 1e-12).ln()
            })
            .sum();

        let h = h1 + h2;
        if h > best_h {
            best_h = h;
            best_t = t as u8;
        }
    }
    threshold_manual(buf, best_t)
}
