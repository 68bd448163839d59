//! Monotone cubic Hermite interpolation (Fritsch–Carlson).
//!
//! Node tangents are limited so that every segment of monotone input data is
//! itself monotone, i.e. the curve never overshoots between control points.

use bo_core::Evaluation;

/// Compute monotonicity-preserving node tangents for strictly increasing `xs`.
pub fn monotone_tangents(xs: &[f64], ys: &[f64]) -> Vec<f64> {
    let n = xs.len();
    debug_assert_eq!(n, ys.len());
    debug_assert!(n >= 2);

    let secants: Vec<f64> = (0..n - 1)
        .map(|i| (ys[i + 1] - ys[i]) / (xs[i + 1] - xs[i]))
        .collect();

    let mut m = vec![0.0; n];
    m[0] = secants[0];
    m[n - 1] = secants[n - 2];
    for i in 1..n - 1 {
        // local extremum or flat spot: tangent must vanish
        if secants[i - 1] * secants[i] <= 0.0 {
            m[i] = 0.0;
        } else {
            m[i] = 0.5 * (secants[i - 1] + secants[i]);
        }
    }

    for i in 0..n - 1 {
        let d = secants[i];
        if d == 0.0 {
            m[i] = 0.0;
            m[i + 1] = 0.0;
            continue;
        }
        let a = m[i] / d;
        let b = m[i + 1] / d;
        let norm2 = a * a + b * b;
        if norm2 > 9.0 {
            let tau = 3.0 / norm2.sqrt();
            m[i] = tau * a * d;
            m[i + 1] = tau * b * d;
        }
    }

    m
}

/// Evaluate the cubic Hermite segment `i` at `x`.
pub(crate) fn hermite_segment<D: Evaluation>(
    xs: &[f64],
    ys: &[f64],
    tangents: &[f64],
    i: usize,
    x: D,
) -> D {
    let h = xs[i + 1] - xs[i];
    let t = (x - xs[i]) / h;
    let t2 = t * t;
    let t3 = t2 * t;

    let h00 = t3 * 2.0 - t2 * 3.0 + 1.0;
    let h10 = t3 - t2 * 2.0 + t;
    let h01 = t2 * 3.0 - t3 * 2.0;
    let h11 = t3 - t2;

    h00 * ys[i] + h10 * (h * tangents[i]) + h01 * ys[i + 1] + h11 * (h * tangents[i + 1])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tangents_vanish_at_extrema() {
        let xs = [0.0, 1.0, 2.0];
        let ys = [0.0, 1.0, 0.0];
        let m = monotone_tangents(&xs, &ys);
        assert_eq!(m[1], 0.0);
    }

    #[test]
    fn linear_data_keeps_linear_tangents() {
        let xs = [0.0, 1.0, 3.0];
        let ys = [1.0, 3.0, 7.0];
        let m = monotone_tangents(&xs, &ys);
        for mi in m {
            assert!((mi - 2.0).abs() < 1e-14);
        }
    }

    #[test]
    fn segment_hits_control_points() {
        let xs = [0.0, 1.0, 2.0, 5.0];
        let ys = [0.0, 0.1, 2.0, 2.1];
        let m = monotone_tangents(&xs, &ys);
        for i in 0..3 {
            let left: f64 = hermite_segment(&xs, &ys, &m, i, xs[i]);
            let right: f64 = hermite_segment(&xs, &ys, &m, i, xs[i + 1]);
            assert!((left - ys[i]).abs() < 1e-12);
            assert!((right - ys[i + 1]).abs() < 1e-12);
        }
    }
}
