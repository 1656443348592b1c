/// Integer Bresenham line walk.
///
/// Returns every pixel on the 8-connected path from `(x1, y1)` to
/// `(x2, y2)` inclusive, starting at the first endpoint and ending at the
/// second. Coincident endpoints yield a single point.
pub fn rasterize_line(x1: i32, y1: i32, x2: i32, y2: i32) -> Vec<(i32, i32)> {
    let mut points = Vec::new();
    let dx = (x2 - x1).abs();
    let dy = (y2 - y1).abs();
    let sx = if x1 < x2 { 1 } else { -1 };
    let sy = if y1 < y2 { 1 } else { -1 };

    let (mut x, mut y) = (x1, y1);
    let mut err = dx - dy;
    loop {
        points.push((x, y));
        if x == x2 && y == y2 {
            break;
        }
        let e2 = err * 2;
        if e2 > -dy {
            err -= dy;
            x += sx;
        }
        if e2 < dx {
            err += dx;
            y += sy;
        }
    }
    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn diagonal_line() {
        assert_eq!(
            rasterize_line(0, 0, 3, 3),
            vec![(0, 0), (1, 1), (2, 2), (3, 3)]
        );
    }

    #[test]
    fn degenerate_line_is_single_point() {
        assert_eq!(rasterize_line(5, -2, 5, -2), vec![(5, -2)]);
    }

    #[test]
    fn endpoints_and_order() {
        let pts = rasterize_line(2, 7, 11, 3);
        assert_eq!(*pts.first().unwrap(), (2, 7));
        assert_eq!(*pts.last().unwrap(), (11, 3));
    }

    #[test]
    fn horizontal_and_vertical() {
        assert_eq!(rasterize_line(0, 0, 3, 0), vec![(0, 0), (1, 0), (2, 0), (3, 0)]);
        assert_eq!(rasterize_line(0, 2, 0, 0), vec![(0, 2), (0, 1), (0, 0)]);
    }

    #[test]
    fn reversed_line_is_same_point_set() {
        let fwd: HashSet<_> = rasterize_line(-3, 4, 10, -7).into_iter().collect();
        let rev: HashSet<_> = rasterize_line(10, -7, -3, 4).into_iter().collect();
        assert_eq!(fwd, rev);
    }

    #[test]
    fn path_is_eight_connected() {
        let pts = rasterize_line(1, 1, 9, 4);
        for pair in pts.windows(2) {
            let (ax, ay) = pair[0];
            let (bx, by) = pair[1];
            assert!((ax - bx).abs() <= 1 && (ay - by).abs() <= 1);
        }
    }
}
