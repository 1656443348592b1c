use crate::error::{Error, Result};

/// Sample a Bézier curve of arbitrary degree at `steps + 1` uniform
/// parameter values `t = i / steps`.
///
/// Evaluation uses De Casteljau's recursive interpolation, so the degree
/// is simply `control.len() - 1` and no polynomial coefficients are ever
/// formed. Fewer than two control points is `DegenerateGeometry`; zero
/// steps is `InvalidParameter`.
pub fn evaluate_bezier(control: &[(f64, f64)], steps: u32) -> Result<Vec<(f64, f64)>> {
    if control.len() < 2 {
        return Err(Error::DegenerateGeometry(format!(
            "bezier curve needs at least 2 control points, got {}",
            control.len()
        )));
    }
    if steps == 0 {
        return Err(Error::InvalidParameter(
            "bezier sampling needs at least 1 step".into(),
        ));
    }

    let mut samples = Vec::with_capacity(steps as usize + 1);
    for i in 0..=steps {
        let t = f64::from(i) / f64::from(steps);
        samples.push(de_casteljau(control, t));
    }
    Ok(samples)
}

/// One De Casteljau evaluation: repeatedly lerp consecutive points by `t`
/// until a single point remains.
fn de_casteljau(control: &[(f64, f64)], t: f64) -> (f64, f64) {
    let mut pts = control.to_vec();
    let m = pts.len();
    for level in 1..m {
        for i in 0..m - level {
            let (x1, y1) = pts[i];
            let (x2, y2) = pts[i + 1];
            pts[i] = ((1.0 - t) * x1 + t * x2, (1.0 - t) * y1 + t * y2);
        }
    }
    pts[0]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: (f64, f64), b: (f64, f64)) -> bool {
        (a.0 - b.0).abs() < 1e-9 && (a.1 - b.1).abs() < 1e-9
    }

    #[test]
    fn endpoints_are_exact() {
        let control = [(80.0, 250.0), (180.0, 80.0), (320.0, 80.0), (420.0, 250.0)];
        for steps in [1, 2, 17, 100] {
            let pts = evaluate_bezier(&control, steps).unwrap();
            assert_eq!(pts.len(), steps as usize + 1);
            assert_eq!(pts[0], control[0]);
            assert_eq!(*pts.last().unwrap(), *control.last().unwrap());
        }
    }

    #[test]
    fn two_points_degenerate_to_a_line() {
        let pts = evaluate_bezier(&[(0.0, 0.0), (10.0, 20.0)], 4).unwrap();
        for (i, &p) in pts.iter().enumerate() {
            let t = i as f64 / 4.0;
            assert!(close(p, (10.0 * t, 20.0 * t)));
        }
    }

    #[test]
    fn quadratic_midpoint() {
        // B(0.5) for quadratic = 0.25 P0 + 0.5 P1 + 0.25 P2
        let pts = evaluate_bezier(&[(0.0, 0.0), (2.0, 4.0), (4.0, 0.0)], 2).unwrap();
        assert!(close(pts[1], (2.0, 2.0)));
    }

    #[test]
    fn high_degree_is_supported() {
        let control: Vec<(f64, f64)> = (0..11).map(|i| (f64::from(i), f64::from(i % 3))).collect();
        let pts = evaluate_bezier(&control, 50).unwrap();
        assert_eq!(pts.len(), 51);
        assert_eq!(pts[0], control[0]);
    }

    #[test]
    fn rejects_degenerate_input() {
        assert!(matches!(
            evaluate_bezier(&[(1.0, 1.0)], 10),
            Err(Error::DegenerateGeometry(_))
        ));
        assert!(matches!(
            evaluate_bezier(&[(0.0, 0.0), (1.0, 1.0)], 0),
            Err(Error::InvalidParameter(_))
        ));
    }
}
