//! Seeding and solving of saturation pressures.

use crate::error::{PvtError, PvtResult};
use bo_core::{Evaluation, Real, constant};
use bo_solver::{NewtonConfig, solve_saturation_pressure};
use bo_tables::{Interpolation, Tabulated1d};

/// Samples of the seed spline per sample of the saturation table.
const SEED_SAMPLES_PER_NODE: usize = 5;

/// Inverse of the saturated mass fraction relation, used as Newton seed.
///
/// `saturation_table` is the table of Rs (or Rv) over pressure; `mass_fraction`
/// evaluates the saturated mass fraction at a pressure. Pressures whose mass
/// fraction does not increase over the previous kept sample are skipped, so
/// the spline stays a function even where the relation is flat. When fewer
/// than two samples survive the seed falls back to a constant.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum SaturationSeed {
    Spline(Tabulated1d),
    Constant(Real),
}

impl SaturationSeed {
    pub(crate) fn build<F>(saturation_table: &Tabulated1d, mass_fraction: F) -> PvtResult<Self>
    where
        F: Fn(Real) -> PvtResult<Real>,
    {
        let p_min = saturation_table.x_min();
        let p_max = saturation_table.x_max();
        let n = saturation_table.num_samples() * SEED_SAMPLES_PER_NODE;
        let delta = (p_max - p_min) / n as Real;

        let mut samples: Vec<(Real, Real)> = Vec::with_capacity(n + 1);
        for i in 0..=n {
            let p = p_min + i as Real * delta;
            let x = mass_fraction(p)?;
            if samples.last().is_none_or(|&(x_prev, _)| x > x_prev) {
                samples.push((x, p));
            }
        }

        if samples.len() < 2 {
            return Ok(SaturationSeed::Constant(p_max));
        }
        Ok(SaturationSeed::Spline(Tabulated1d::new(
            &samples,
            Interpolation::MonotoneSpline,
        )?))
    }

    pub(crate) fn eval<D: Evaluation>(&self, mass_fraction: D) -> PvtResult<D> {
        match self {
            SaturationSeed::Spline(spline) => Ok(spline.eval(mass_fraction, true)?),
            SaturationSeed::Constant(p) => Ok(constant(*p)),
        }
    }
}

/// Newton inversion of `mass_fraction` at `target`, seeded from `seed`.
pub(crate) fn saturation_pressure<D, F>(
    seed: &SaturationSeed,
    target: D,
    config: &NewtonConfig,
    what: &'static str,
    mass_fraction: F,
) -> PvtResult<D>
where
    D: Evaluation,
    F: Fn(D) -> PvtResult<D>,
{
    let p0 = seed.eval(target)?;
    solve_saturation_pressure::<D, PvtError, _>(p0, target, config, what, mass_fraction)
}
