use crate::CoreError;
use num_dual::DualNum;
use num_traits::{One, Zero};

/// Floating point type used for stored table data.
pub type Real = f64;

/// Value type every PVT relation is evaluated in.
///
/// Either a plain `f64` or a dual number carrying partial derivatives with
/// respect to the primary unknowns. Relations are written only in terms of
/// the arithmetic this trait provides so that both instantiate identically.
pub trait Evaluation: DualNum<f64> + Copy {}

impl<T: DualNum<f64> + Copy> Evaluation for T {}

/// Lift a constant into the evaluation type (all derivatives zero).
#[inline]
pub fn constant<D: Evaluation>(v: Real) -> D {
    D::zero() + v
}

/// `1 - x` without requiring `f64 - D`.
#[inline]
pub fn one_minus<D: Evaluation>(x: D) -> D {
    D::one() - x
}

/// One tolerance for everything
#[derive(Clone, Copy, Debug)]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-12,
            rel: 1e-9,
        }
    }
}

pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    if diff <= tol.abs {
        return true;
    }
    diff <= tol.rel * a.abs().max(b.abs())
}

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, CoreError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(CoreError::NonFinite { what, value: v })
    }
}

/// Reference densities, molar masses and table parameters must be positive.
pub fn ensure_positive(v: Real, what: &'static str) -> Result<Real, CoreError> {
    let v = ensure_finite(v, what)?;
    if v > 0.0 {
        Ok(v)
    } else {
        Err(CoreError::NonPositive { what, value: v })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_dual::Dual64;

    #[test]
    fn nearly_equal_basic() {
        let tol = Tolerances {
            abs: 1e-12,
            rel: 1e-9,
        };
        assert!(nearly_equal(1.0, 1.0 + 1e-12, tol));
        assert!(nearly_equal(0.0, 1e-13, tol));
        assert!(!nearly_equal(1.0, 1.0 + 1e-6, tol));
    }

    #[test]
    fn ensure_finite_detects_nan() {
        let err = ensure_finite(Real::NAN, "test").unwrap_err();
        let msg = format!("{err}");
        assert!(msg.contains("Non-finite"));
    }

    #[test]
    fn ensure_positive_rejects_zero_and_negative() {
        assert!(ensure_positive(800.0, "rho").is_ok());
        assert!(ensure_positive(0.0, "rho").is_err());
        assert!(ensure_positive(-1.0, "rho").is_err());
        assert!(ensure_positive(Real::INFINITY, "rho").is_err());
    }

    #[test]
    fn constant_has_no_derivative() {
        let c: Dual64 = constant(3.5);
        assert_eq!(c.re, 3.5);
        assert_eq!(c.eps, 0.0);

        let x = Dual64::new(2.0, 1.0);
        let y = one_minus(x);
        assert_eq!(y.re, -1.0);
        assert_eq!(y.eps, -1.0);
    }
}
