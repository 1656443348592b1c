// ============================================================================
// POINT OPERATIONS — per-pixel arithmetic and color mapping
// ============================================================================
//
// Every operation is a pure function from one buffer to a new buffer of
// identical dimensions. Channels are computed in f64, rounded, and
// clamped to [0, 255]. Rows are processed in parallel; each output row
// reads only the immutable input snapshot.

use rayon::prelude::*;

use crate::buffer::PixelBuffer;
use crate::error::{Error, Result};

/// Apply a per-pixel transform to the whole buffer, row-parallel.
/// `f` receives (r, g, b) as f64 and returns the new channel triple.
pub(crate) fn map_pixels<F>(buf: &PixelBuffer, f: F) -> PixelBuffer
where
    F: Fn(f64, f64, f64) -> (f64, f64, f64) + Sync,
{
    let w = buf.width() as usize;
    let src = buf.pixels();
    let mut out = PixelBuffer::new(buf.width(), buf.height());
    out.pixels_mut()
        .par_chunks_mut(w.max(1))
        .enumerate()
        .for_each(|(y, row_out)| {
            let row_in = &src[y * w..(y + 1) * w];
            for (dst, px) in row_out.iter_mut().zip(row_in) {
                let (r, g, b) = f(f64::from(px[0]), f64::from(px[1]), f64::from(px[2]));
                *dst = [clamp_channel(r), clamp_channel(g), clamp_channel(b)];
            }
        });
    out
}

#[inline]
pub(crate) fn clamp_channel(v: f64) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}

/// Add a constant to every channel.
pub fn add(buf: &PixelBuffer, value: f64) -> PixelBuffer {
    map_pixels(buf, |r, g, b| (r + value, g + value, b + value))
}

/// Multiply every channel by a constant.
pub fn multiply(buf: &PixelBuffer, k: f64) -> PixelBuffer {
    map_pixels(buf, |r, g, b| (r * k, g * k, b * k))
}

/// Divide every channel by a constant. A zero divisor is an error, never
/// a silently black image.
pub fn divide(buf: &PixelBuffer, k: f64) -> Result<PixelBuffer> {
    if k == 0.0 {
        return Err(Error::DivisionByZero);
    }
    Ok(map_pixels(buf, |r, g, b| (r / k, g / k, b / k)))
}

/// Brightness shift; identical to [`add`].
pub fn brightness(buf: &PixelBuffer, delta: f64) -> PixelBuffer {
    add(buf, delta)
}

/// Grayscale via the plain channel average.
pub fn grayscale_average(buf: &PixelBuffer) -> PixelBuffer {
    map_pixels(buf, |r, g, b| {
        let gray = (r + g + b) / 3.0;
        (gray, gray, gray)
    })
}

/// Grayscale via the 0.299/0.587/0.114 luma weighting.
pub fn grayscale_luma(buf: &PixelBuffer) -> PixelBuffer {
    map_pixels(buf, |r, g, b| {
        let gray = 0.299 * r + 0.587 * g + 0.114 * b;
        (gray, gray, gray)
    })
}

/// Linear level stretch: remap `[in_min, in_max]` to `[0, 255]` per
/// channel, clamping outside. Returns the input unchanged when
/// `in_max <= in_min`.
pub fn levels_stretch(buf: &PixelBuffer, in_min: u8, in_max: u8) -> PixelBuffer {
    if in_max <= in_min {
        return buf.clone();
    }
    let lo = f64::from(in_min);
    let k = 255.0 / (f64::from(in_max) - lo);
    map_pixels(buf, |r, g, b| ((r - lo) * k, (g - lo) * k, (b - lo) * k))
}
