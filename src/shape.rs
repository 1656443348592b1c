// ============================================================================
// VECTOR SHAPES — tagged variants dispatched to the scanline rasterizers
// ============================================================================

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::raster::{evaluate_bezier, rasterize_circle, rasterize_line};

/// A vector primitive described by plain numeric parameters, matching
/// what the external scene-persistence collaborator stores.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Shape {
    Line {
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
    },
    Rect {
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
    },
    Circle {
        cx: i32,
        cy: i32,
        r: i32,
    },
    Bezier {
        control: Vec<(f64, f64)>,
        steps: u32,
    },
    Polygon {
        points: Vec<(f64, f64)>,
        closed: bool,
    },
}

impl Shape {
    /// Build a line, rect, or circle from its kind name and the
    /// comma-separated parameter text the interactive editor round-trips
    /// through its parameter fields. Bezier and polygon shapes are built
    /// structurally, not from text.
    pub fn from_params(kind: &str, text: &str) -> Result<Shape> {
        match kind {
            "line" => {
                let v = crate::parse::numbers(text, 4)?;
                Ok(Shape::Line {
                    x1: v[0] as i32,
                    y1: v[1] as i32,
                    x2: v[2] as i32,
                    y2: v[3] as i32,
                })
            }
            "rect" => {
                let v = crate::parse::numbers(text, 4)?;
                Ok(Shape::Rect {
                    x1: v[0] as i32,
                    y1: v[1] as i32,
                    x2: v[2] as i32,
                    y2: v[3] as i32,
                })
            }
            "circle" => {
                let v = crate::parse::numbers(text, 3)?;
                let r = v[2] as i32;
                if r <= 0 {
                    return Err(Error::InvalidParameter(
                        "circle radius must be > 0".into(),
                    ));
                }
                Ok(Shape::Circle {
                    cx: v[0] as i32,
                    cy: v[1] as i32,
                    r,
                })
            }
            other => Err(Error::InvalidParameter(format!(
                "unknown shape kind '{other}'"
            ))),
        }
    }

    /// The comma-separated parameter text for the editor fields.
    pub fn params_text(&self) -> String {
        match self {
            Shape::Line { x1, y1, x2, y2 } | Shape::Rect { x1, y1, x2, y2 } => {
                format!("{x1},{y1},{x2},{y2}")
            }
            Shape::Circle { cx, cy, r } => format!("{cx},{cy},{r}"),
            Shape::Bezier { control, .. } => join_pairs(control),
            Shape::Polygon { points, .. } => join_pairs(points),
        }
    }

    /// Rasterize to an ordered pixel-coordinate list for the external
    /// drawing surface. Duplicate pixels (rect corners, closed-polygon
    /// vertices, adjoining bezier segments) appear once, first
    /// occurrence wins.
    pub fn rasterize(&self) -> Result<Vec<(i32, i32)>> {
        match self {
            Shape::Line { x1, y1, x2, y2 } => Ok(rasterize_line(*x1, *y1, *x2, *y2)),
            Shape::Rect { x1, y1, x2, y2 } => {
                let (xa, xb) = (*x1.min(x2), *x1.max(x2));
                let (ya, yb) = (*y1.min(y2), *y1.max(y2));
                let mut pts = rasterize_line(xa, ya, xb, ya);
                pts.extend(rasterize_line(xb, ya, xb, yb));
                pts.extend(rasterize_line(xb, yb, xa, yb));
                pts.extend(rasterize_line(xa, yb, xa, ya));
                Ok(dedup_in_order(pts))
            }
            Shape::Circle { cx, cy, r } => {
                if *r <= 0 {
                    return Err(Error::InvalidParameter(
                        "circle radius must be > 0".into(),
                    ));
                }
                Ok(rasterize_circle(*cx, *cy, *r))
            }
            Shape::Bezier { control, steps } => {
                let samples = evaluate_bezier(control, *steps)?;
                Ok(connect_samples(&samples, false))
            }
            Shape::Polygon { points, closed } => {
                if *closed && points.len() < 3 {
                    return Err(Error::DegenerateGeometry(format!(
                        "closed polygon needs at least 3 points, got {}",
                        points.len()
                    )));
                }
                if points.len() < 2 {
                    return Err(Error::DegenerateGeometry(format!(
                        "polyline needs at least 2 points, got {}",
                        points.len()
                    )));
                }
                Ok(connect_samples(points, *closed))
            }
        }
    }

    /// Shift the shape by an integer offset (interactive move).
    pub fn translate(&mut self, dx: i32, dy: i32) {
        match self {
            Shape::Line { x1, y1, x2, y2 } | Shape::Rect { x1, y1, x2, y2 } => {
                *x1 += dx;
                *y1 += dy;
                *x2 += dx;
                *y2 += dy;
            }
            Shape::Circle { cx, cy, .. } => {
                *cx += dx;
                *cy += dy;
            }
            Shape::Bezier { control, .. } => {
                for p in control {
                    p.0 += f64::from(dx);
                    p.1 += f64::from(dy);
                }
            }
            Shape::Polygon { points, .. } => {
                for p in points {
                    p.0 += f64::from(dx);
                    p.1 += f64::from(dy);
                }
            }
        }
    }

    /// Axis-aligned bounding box `(x1, y1, x2, y2)`.
    pub fn bbox(&self) -> (f64, f64, f64, f64) {
        match self {
            Shape::Line { x1, y1, x2, y2 } | Shape::Rect { x1, y1, x2, y2 } => (
                f64::from(*x1.min(x2)),
                f64::from(*y1.min(y2)),
                f64::from(*x1.max(x2)),
                f64::from(*y1.max(y2)),
            ),
            Shape::Circle { cx, cy, r } => (
                f64::from(cx - r),
                f64::from(cy - r),
                f64::from(cx + r),
                f64::from(cy + r),
            ),
            Shape::Bezier { control: pts, .. } | Shape::Polygon { points: pts, .. } => {
                let mut bb = (f64::MAX, f64::MAX, f64::MIN, f64::MIN);
                for &(x, y) in pts {
                    bb.0 = bb.0.min(x);
                    bb.1 = bb.1.min(y);
                    bb.2 = bb.2.max(x);
                    bb.3 = bb.3.max(y);
                }
                bb
            }
        }
    }
}

fn join_pairs(pts: &[(f64, f64)]) -> String {
    pts.iter()
        .map(|(x, y)| format!("{x},{y}"))
        .collect::<Vec<_>>()
        .join(",")
}

/// Connect consecutive float samples with Bresenham segments so the
/// rasterized outline has no gaps, optionally closing the loop.
fn connect_samples(samples: &[(f64, f64)], closed: bool) -> Vec<(i32, i32)> {
    let rounded: Vec<(i32, i32)> = samples
        .iter()
        .map(|&(x, y)| (x.round() as i32, y.round() as i32))
        .collect();
    let mut pts = Vec::new();
    for pair in rounded.windows(2) {
        pts.extend(rasterize_line(pair[0].0, pair[0].1, pair[1].0, pair[1].1));
    }
    if closed && rounded.len() > 2 {
        let first = rounded[0];
        let last = rounded[rounded.len() - 1];
        pts.extend(rasterize_line(last.0, last.1, first.0, first.1));
    }
    dedup_in_order(pts)
}

fn dedup_in_order(pts: Vec<(i32, i32)>) -> Vec<(i32, i32)> {
    let mut seen = std::collections::HashSet::new();
    pts.into_iter().filter(|p| seen.insert(*p)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn line_rasterizes_via_bresenham() {
        let shape = Shape::Line { x1: 0, y1: 0, x2: 3, y2: 3 };
        assert_eq!(
            shape.rasterize().unwrap(),
            vec![(0, 0), (1, 1), (2, 2), (3, 3)]
        );
    }

    #[test]
    fn rect_outline_has_unique_pixels() {
        let shape = Shape::Rect { x1: 4, y1: 3, x2: 0, y2: 0 };
        let pts = shape.rasterize().unwrap();
        let unique: HashSet<_> = pts.iter().copied().collect();
        assert_eq!(unique.len(), pts.len());
        // Perimeter of a 5x4 pixel rectangle outline.
        assert_eq!(pts.len(), 14);
        for corner in [(0, 0), (4, 0), (4, 3), (0, 3)] {
            assert!(unique.contains(&corner));
        }
        // Interior stays empty.
        assert!(!unique.contains(&(2, 1)));
    }

    #[test]
    fn circle_rejects_bad_radius() {
        let shape = Shape::Circle { cx: 0, cy: 0, r: 0 };
        assert!(matches!(
            shape.rasterize(),
            Err(Error::InvalidParameter(_))
        ));
    }

    #[test]
    fn bezier_outline_is_connected() {
        let shape = Shape::Bezier {
            control: vec![(0.0, 0.0), (10.0, 20.0), (20.0, 0.0)],
            steps: 8,
        };
        let pts = shape.rasterize().unwrap();
        assert_eq!(pts[0], (0, 0));
        assert_eq!(*pts.last().unwrap(), (20, 0));
        for pair in pts.windows(2) {
            let (ax, ay) = pair[0];
            let (bx, by) = pair[1];
            assert!((ax - bx).abs() <= 1 && (ay - by).abs() <= 1);
        }
    }

    #[test]
    fn closed_polygon_needs_three_points() {
        let shape = Shape::Polygon {
            points: vec![(0.0, 0.0), (5.0, 5.0)],
            closed: true,
        };
        assert!(matches!(
            shape.rasterize(),
            Err(Error::DegenerateGeometry(_))
        ));
    }

    #[test]
    fn closed_polygon_returns_to_start() {
        let shape = Shape::Polygon {
            points: vec![(0.0, 0.0), (6.0, 0.0), (3.0, 4.0)],
            closed: true,
        };
        let pts = shape.rasterize().unwrap();
        let unique: HashSet<_> = pts.iter().copied().collect();
        assert_eq!(unique.len(), pts.len());
        for v in [(0, 0), (6, 0), (3, 4)] {
            assert!(unique.contains(&v));
        }
    }

    #[test]
    fn params_text_round_trip() {
        let shape = Shape::from_params("circle", "10, 20, 5").unwrap();
        assert_eq!(shape, Shape::Circle { cx: 10, cy: 20, r: 5 });
        assert_eq!(shape.params_text(), "10,20,5");
        assert!(Shape::from_params("circle", "10,20,0").is_err());
        assert!(Shape::from_params("line", "1,2,3").is_err());
        assert!(Shape::from_params("blob", "1").is_err());
    }

    #[test]
    fn translate_and_bbox() {
        let mut shape = Shape::Circle { cx: 5, cy: 5, r: 2 };
        shape.translate(-3, 4);
        assert_eq!(shape, Shape::Circle { cx: 2, cy: 9, r: 2 });
        assert_eq!(shape.bbox(), (0.0, 7.0, 4.0, 11.0));
    }

    #[test]
    fn serde_round_trip_preserves_shape() {
        let shapes = vec![
            Shape::Line { x1: 0, y1: 1, x2: 2, y2: 3 },
            Shape::Circle { cx: 9, cy: 9, r: 4 },
            Shape::Bezier {
                control: vec![(0.0, 0.0), (1.5, 2.5)],
                steps: 16,
            },
        ];
        let json = serde_json::to_string(&shapes).unwrap();
        assert!(json.contains("\"type\":\"circle\""));
        let back: Vec<Shape> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, shapes);
    }
}
