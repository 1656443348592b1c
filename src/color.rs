// ============================================================================
// COLOR SPACES — RGB <-> CMYK, RGB <-> HSV, hue-range coverage
// ============================================================================

use crate::buffer::PixelBuffer;

/// RGB (0-255) to CMYK (each channel 0.0-1.0).
/// Pure black short-circuits to `(0, 0, 0, 1)`.
pub fn rgb_to_cmyk(r: u8, g: u8, b: u8) -> (f64, f64, f64, f64) {
    if r == 0 && g == 0 && b == 0 {
        return (0.0, 0.0, 0.0, 1.0);
    }
    let rf = f64::from(r) / 255.0;
    let gf = f64::from(g) / 255.0;
    let bf = f64::from(b) / 255.0;

    let k = 1.0 - rf.max(gf).max(bf);
    if k >= 1.0 {
        return (0.0, 0.0, 0.0, 1.0);
    }
    let c = ((1.0 - rf - k) / (1.0 - k)).clamp(0.0, 1.0);
    let m = ((1.0 - gf - k) / (1.0 - k)).clamp(0.0, 1.0);
    let y = ((1.0 - bf - k) / (1.0 - k)).clamp(0.0, 1.0);
    (c, m, y, k.clamp(0.0, 1.0))
}

/// CMYK (0.0-1.0, clamped) to RGB (0-255).
pub fn cmyk_to_rgb(c: f64, m: f64, y: f64, k: f64) -> (u8, u8, u8) {
    let c = c.clamp(0.0, 1.0);
    let m = m.clamp(0.0, 1.0);
    let y = y.clamp(0.0, 1.0);
    let k = k.clamp(0.0, 1.0);
    let to_byte = |f: f64| (f * 255.0).round().clamp(0.0, 255.0) as u8;
    (
        to_byte((1.0 - c) * (1.0 - k)),
        to_byte((1.0 - m) * (1.0 - k)),
        to_byte((1.0 - y) * (1.0 - k)),
    )
}

/// RGB (0-255) to HSV: hue in degrees `[0, 360)`, saturation and value
/// in `[0, 1]`. Achromatic input reports hue 0.
pub fn rgb_to_hsv(r: u8, g: u8, b: u8) -> (f64, f64, f64) {
    let rf = f64::from(r) / 255.0;
    let gf = f64::from(g) / 255.0;
    let bf = f64::from(b) / 255.0;
    let max = rf.max(gf).max(bf);
    let min = rf.min(gf).min(bf);
    let delta = max - min;

    let h = if delta == 0.0 {
        0.0
    } else if max == rf {
        60.0 * (((gf - bf) / delta).rem_euclid(6.0))
    } else if max == gf {
        60.0 * ((bf - rf) / delta + 2.0)
    } else {
        60.0 * ((rf - gf) / delta + 4.0)
    };
    let s = if max == 0.0 { 0.0 } else { delta / max };
    (h.rem_euclid(360.0), s, max)
}

/// HSV (hue in degrees, s and v in `[0, 1]`) to RGB (0-255).
pub fn hsv_to_rgb(h: f64, s: f64, v: f64) -> (u8, u8, u8) {
    let s = s.clamp(0.0, 1.0);
    let v = v.clamp(0.0, 1.0);
    let h = h.rem_euclid(360.0);

    let c = v * s;
    let x = c * (1.0 - ((h / 60.0).rem_euclid(2.0) - 1.0).abs());
    let m = v - c;
    let (rf, gf, bf) = match h {
        h if h < 60.0 => (c, x, 0.0),
        h if h < 120.0 => (x, c, 0.0),
        h if h < 180.0 => (0.0, c, x),
        h if h < 240.0 => (0.0, x, c),
        h if h < 300.0 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let to_byte = |f: f64| ((f + m) * 255.0).round().clamp(0.0, 255.0) as u8;
    (to_byte(rf), to_byte(gf), to_byte(bf))
}

/// Fraction of pixels whose hue falls inside `[h_min, h_max]` degrees
/// with saturation and value at or above the given floors.
///
/// A range with `h_min > h_max` wraps through 0° (e.g. 330..30 covers
/// reds). Empty buffers report 0.0.
pub fn hsv_coverage(buf: &PixelBuffer, h_min: f64, h_max: f64, s_min: f64, v_min: f64) -> f64 {
    let total = buf.pixels().len();
    if total == 0 {
        return 0.0;
    }
    let matching = buf
        .pixels()
        .iter()
        .filter(|p| {
            let (h, s, v) = rgb_to_hsv(p[0], p[1], p[2]);
            if s < s_min || v < v_min {
                return false;
            }
            if h_min <= h_max {
                h >= h_min && h <= h_max
            } else {
                h >= h_min || h <= h_max
            }
        })
        .count();
    matching as f64 / total as f64
}
