use std::collections::HashSet;

/// Midpoint (Bresenham) circle rasterization with 8-way symmetry.
///
/// Returns the unique pixels on the circle of radius `r` around
/// `(cx, cy)` in deterministic first-occurrence order. The octant
/// reflections literally coincide on the axes and the `x == y` diagonal,
/// so duplicates are filtered out. `r <= 0` yields no points.
pub fn rasterize_circle(cx: i32, cy: i32, r: i32) -> Vec<(i32, i32)> {
    if r <= 0 {
        return Vec::new();
    }

    let mut points = Vec::new();
    let mut seen = HashSet::new();
    let mut push8 = |x: i32, y: i32| {
        let reflections = [
            (cx + x, cy + y),
            (cx - x, cy + y),
            (cx + x, cy - y),
            (cx - x, cy - y),
            (cx + y, cy + x),
            (cx - y, cy + x),
            (cx + y, cy - x),
            (cx - y, cy - x),
        ];
        for p in reflections {
            if seen.insert(p) {
                points.push(p);
            }
        }
    };

    let mut x = 0;
    let mut y = r;
    let mut d = 3 - 2 * r;
    while x <= y {
        push8(x, y);
        if d < 0 {
            d += 4 * x + 6;
        } else {
            d += 4 * (x - y) + 10;
            y -= 1;
        }
        x += 1;
    }
    points
}
