//! Tabulated function of one variable.

use crate::error::{TableError, TableResult};
use crate::segment_index;
use crate::spline::{hermite_segment, monotone_tangents};
use bo_core::{Evaluation, Real, ensure_finite};

/// Interpolation scheme between sample points, chosen when the table is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Interpolation {
    /// Straight lines between neighbouring samples.
    #[default]
    Linear,
    /// Monotone cubic Hermite spline (continuous first derivative, no overshoot).
    MonotoneSpline,
}

/// A function `y(x)` given by samples with strictly increasing `x`.
///
/// Outside the sampled range the function continues linearly with the slope
/// of the boundary (the boundary segment's slope for linear tables, the end
/// tangent for splines).
#[derive(Debug, Clone, PartialEq)]
pub struct Tabulated1d {
    xs: Vec<Real>,
    ys: Vec<Real>,
    /// Node tangents, only present for splines.
    tangents: Option<Vec<Real>>,
}

impl Tabulated1d {
    /// Build a table from `(x, y)` samples.
    pub fn new(samples: &[(Real, Real)], interpolation: Interpolation) -> TableResult<Self> {
        let xs: Vec<Real> = samples.iter().map(|&(x, _)| x).collect();
        let ys: Vec<Real> = samples.iter().map(|&(_, y)| y).collect();
        Self::from_xy(xs, ys, interpolation)
    }

    /// Build a table from separate coordinate and value arrays.
    pub fn from_xy(
        xs: Vec<Real>,
        ys: Vec<Real>,
        interpolation: Interpolation,
    ) -> TableResult<Self> {
        let len = xs.len().min(ys.len());
        if len < 2 || xs.len() != ys.len() {
            return Err(TableError::TooFewSamples {
                what: "1-D table",
                len,
            });
        }
        for (&x, &y) in xs.iter().zip(&ys) {
            ensure_finite(x, "1-D table coordinate")?;
            ensure_finite(y, "1-D table value")?;
        }
        if let Some(index) = xs.windows(2).position(|w| w[1] <= w[0]) {
            return Err(TableError::NotIncreasing {
                what: "1-D table",
                index: index + 1,
            });
        }

        let tangents = match interpolation {
            Interpolation::Linear => None,
            Interpolation::MonotoneSpline => Some(monotone_tangents(&xs, &ys)),
        };

        Ok(Self {
            xs,
            ys,
            tangents,
        })
    }

    pub fn num_samples(&self) -> usize {
        self.xs.len()
    }

    pub fn x_min(&self) -> Real {
        self.xs[0]
    }

    pub fn x_max(&self) -> Real {
        self.xs[self.xs.len() - 1]
    }

    pub fn x_at(&self, i: usize) -> Real {
        self.xs[i]
    }

    pub fn y_at(&self, i: usize) -> Real {
        self.ys[i]
    }

    pub fn applies(&self, x: Real) -> bool {
        self.x_min() <= x && x <= self.x_max()
    }

    /// Evaluate the function at `x`.
    ///
    /// With `extrapolate == false` a query outside `[x_min, x_max]` yields
    /// `TableError::OutOfRange`.
    pub fn eval<D: Evaluation>(&self, x: D, extrapolate: bool) -> TableResult<D> {
        let xv = x.re();
        if !self.applies(xv) {
            if !extrapolate {
                return Err(TableError::OutOfRange {
                    x: xv,
                    min: self.x_min(),
                    max: self.x_max(),
                });
            }
            return Ok(self.extrapolate(x));
        }

        let i = segment_index(&self.xs, xv);
        Ok(match &self.tangents {
            None => (x - self.xs[i]) * self.segment_slope(i) + self.ys[i],
            Some(m) => hermite_segment(&self.xs, &self.ys, m, i, x),
        })
    }

    fn segment_slope(&self, i: usize) -> Real {
        (self.ys[i + 1] - self.ys[i]) / (self.xs[i + 1] - self.xs[i])
    }

    fn extrapolate<D: Evaluation>(&self, x: D) -> D {
        let n = self.xs.len();
        let (x0, y0, slope) = if x.re() < self.xs[0] {
            let slope = match &self.tangents {
                None => self.segment_slope(0),
                Some(m) => m[0],
            };
            (self.xs[0], self.ys[0], slope)
        } else {
            let slope = match &self.tangents {
                None => self.segment_slope(n - 2),
                Some(m) => m[n - 1],
            };
            (self.xs[n - 1], self.ys[n - 1], slope)
        };
        (x - x0) * slope + y0
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn monotone_spline_does_not_overshoot(
            steps in prop::collection::vec((0.01_f64..10.0, 0.0_f64..5.0), 2..12)
        ) {
            let mut x = 0.0;
            let mut y = 1.0;
            let mut samples = vec![(x, y)];
            for (dx, dy) in steps {
                x += dx;
                y += dy;
                samples.push((x, y));
            }
            let table = Tabulated1d::new(&samples, Interpolation::MonotoneSpline).unwrap();

            let n = 400;
            let mut prev: f64 = table.eval(table.x_min(), false).unwrap();
            for k in 1..=n {
                let xq = table.x_min() + (table.x_max() - table.x_min()) * k as f64 / n as f64;
                let yq: f64 = table.eval(xq, false).unwrap();
                prop_assert!(yq >= prev - 1e-9 * prev.abs().max(1.0));
                prev = yq;
            }
        }

        #[test]
        fn monotone_spline_stays_within_segment_bounds(
            steps in prop::collection::vec((0.01_f64..10.0, 0.0_f64..5.0), 2..12)
        ) {
            let mut x = 0.0;
            let mut y = 1.0;
            let mut samples = vec![(x, y)];
            for (dx, dy) in steps {
                x += dx;
                y += dy;
                samples.push((x, y));
            }
            let table = Tabulated1d::new(&samples, Interpolation::MonotoneSpline).unwrap();
            for w in samples.windows(2) {
                let mid: f64 = table.eval(0.5 * (w[0].0 + w[1].0), false).unwrap();
                prop_assert!(mid >= w[0].1 - 1e-9 && mid <= w[1].1 + 1e-9);
            }
        }
    }
}
