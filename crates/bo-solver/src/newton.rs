//! Newton iteration for saturation pressures.

use crate::error::SolverError;
use bo_core::Evaluation;
use tracing::warn;

/// Newton solver configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NewtonConfig {
    /// Maximum iterations
    pub max_iterations: usize,
    /// Converged once |Δp| < |p| * rel_tol
    pub rel_tol: f64,
    /// Finite-difference step relative to the current pressure
    pub fd_rel_step: f64,
}

impl Default for NewtonConfig {
    fn default() -> Self {
        Self {
            max_iterations: 20,
            rel_tol: 1e-10,
            fd_rel_step: 1e-11,
        }
    }
}

/// Find the pressure `p` with `mass_fraction(p) == target`, starting at `seed`.
///
/// The slope is approximated by a one-sided finite difference. Derivatives
/// carried by `target` and `mass_fraction` propagate into the returned
/// pressure. Running out of iterations is reported as
/// `SolverError::ConvergenceFailed`, never as a silently wrong value.
pub fn solve_saturation_pressure<D, E, F>(
    seed: D,
    target: D,
    config: &NewtonConfig,
    what: &'static str,
    mass_fraction: F,
) -> Result<D, E>
where
    D: Evaluation,
    E: From<SolverError>,
    F: Fn(D) -> Result<D, E>,
{
    let mut p = seed;

    for _ in 0..config.max_iterations {
        let mut eps = p.re() * config.fd_rel_step;
        if eps == 0.0 {
            eps = config.fd_rel_step;
        }

        let f = mass_fraction(p)? - target;
        let f_shifted = mass_fraction(p + eps)? - target;
        let slope = (f_shifted - f) / eps;
        if slope.re() == 0.0 || !slope.re().is_finite() {
            warn!(what, pressure = p.re(), "saturation pressure solve hit a flat spot");
            return Err(SolverError::ZeroSlope {
                what,
                pressure: p.re(),
            }
            .into());
        }

        let delta = f / slope;
        p = p - delta;

        if delta.re().abs() < p.re().abs() * config.rel_tol {
            return Ok(p);
        }
    }

    warn!(
        what,
        target = target.re(),
        last_pressure = p.re(),
        iterations = config.max_iterations,
        "saturation pressure solve did not converge"
    );
    Err(SolverError::ConvergenceFailed {
        what,
        target: target.re(),
        last_pressure: p.re(),
    }
    .into())
}
