//! Tables of a phase that holds a dissolved component: live oil (Rs) and
//! wet gas (Rv).

use crate::error::{PvtError, PvtResult};
use crate::saturation::SaturationSeed;
use bo_core::{Evaluation, Real, Tolerances, ensure_positive, nearly_equal};
use bo_tables::{
    Interpolation, PvtRecord, PvtSample, Tabulated1d, Tabulated2d, extend_undersaturated,
};

/// Compressibility of the phase away from saturation when only saturated
/// data is given: B grows from 1.1189 to 1.1200 over 4000 to 5000 psi.
pub(crate) const UNDERSATURATED_COMPRESSIBILITY: Real =
    (1.1200 - 1.1189) / ((5000.0 - 4000.0) * 6894.76);

/// Evenly spaced dissolution factors in a grid built from saturated data.
const SATURATED_GRID_FACTORS: usize = 20;

const BISECTION_STEPS: usize = 100;

/// Names used in errors raised for one phase.
#[derive(Debug, Clone, Copy)]
pub(crate) struct TableNames {
    pub saturated: &'static str,
    pub formation_volume_factor: &'static str,
    pub viscosity: &'static str,
    pub grids: &'static str,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct DissolutionTables {
    /// Rs(p) or Rv(p) of the saturated phase
    pub saturated: Option<Tabulated1d>,
    /// 1/B over (outer, inner)
    pub inverse_formation_volume_factor: Tabulated2d,
    /// μ over (outer, inner)
    pub viscosity: Tabulated2d,
    /// 1/(B μ) over (outer, inner), derived in `finish`
    pub inverse_b_mu: Tabulated2d,
    pub seed: Option<SaturationSeed>,
}

/// 2-D tables and saturated samples built from extended records.
pub(crate) struct RecordTables {
    pub saturated: Vec<(Real, Real)>,
    pub inverse_formation_volume_factor: Tabulated2d,
    pub viscosity: Tabulated2d,
}

impl RecordTables {
    /// Extend the records and split them into tables. `saturated_sample`
    /// maps a record and its saturated row to a `(pressure, factor)` pair.
    pub fn from_records<F>(
        mut records: Vec<PvtRecord>,
        names: &TableNames,
        saturated_sample: F,
    ) -> PvtResult<Self>
    where
        F: Fn(&PvtRecord, &PvtSample) -> (Real, Real),
    {
        extend_undersaturated(&mut records)?;

        let mut saturated = Vec::with_capacity(records.len());
        let mut inv_b = Tabulated2d::new();
        let mut mu = Tabulated2d::new();
        for record in &records {
            let x_idx = inv_b.append_x_pos(record.outer);
            mu.append_x_pos(record.outer);
            for sample in &record.samples {
                let b = ensure_positive(sample.b, names.formation_volume_factor)?;
                let viscosity = ensure_positive(sample.mu, names.viscosity)?;
                inv_b.append_sample_point(x_idx, sample.inner, 1.0 / b);
                mu.append_sample_point(x_idx, sample.inner, viscosity);
            }
            if let Some(sat) = record.saturated() {
                saturated.push(saturated_sample(record, sat));
            }
        }

        Ok(Self {
            saturated,
            inverse_formation_volume_factor: inv_b,
            viscosity: mu,
        })
    }
}

impl DissolutionTables {
    pub fn saturated_table(&self, region: usize, names: &TableNames) -> PvtResult<&Tabulated1d> {
        self.saturated.as_ref().ok_or(PvtError::MissingTable {
            what: names.saturated,
            region,
        })
    }

    pub fn seed(&self) -> PvtResult<&SaturationSeed> {
        self.seed.as_ref().ok_or(PvtError::NotInitialized)
    }

    pub fn inverse_formation_volume_factor<D: Evaluation>(
        &self,
        outer: D,
        inner: D,
    ) -> PvtResult<D> {
        Ok(self
            .inverse_formation_volume_factor
            .eval(outer, inner, true)?)
    }

    /// μ = (1/B) / (1/(B μ))
    pub fn viscosity<D: Evaluation>(&self, outer: D, inner: D) -> PvtResult<D> {
        let inv_b: D = self.inverse_formation_volume_factor.eval(outer, inner, true)?;
        let inv_b_mu: D = self.inverse_b_mu.eval(outer, inner, true)?;
        Ok(inv_b / inv_b_mu)
    }

    /// Validate the tables, derive 1/(B μ) and build the saturation seed.
    /// `mass_fraction` maps a saturated factor (Rs or Rv) to a mass fraction.
    pub fn finish<F>(&mut self, region: usize, names: &TableNames, mass_fraction: F) -> PvtResult<()>
    where
        F: Fn(Real) -> Real,
    {
        self.inverse_formation_volume_factor.finalize()?;
        self.viscosity.finalize()?;

        let inv_b = &self.inverse_formation_volume_factor;
        let mu = &self.viscosity;
        if !same_grid(inv_b, mu) {
            return Err(PvtError::InconsistentTables {
                what: names.grids,
                region,
            });
        }

        let mut inverse_b_mu = Tabulated2d::new();
        for i in 0..inv_b.num_x() {
            let x_idx = inverse_b_mu.append_x_pos(inv_b.x_at(i));
            for j in 0..inv_b.num_y(i) {
                let value = inv_b.value_at(i, j) / mu.value_at(i, j);
                inverse_b_mu.append_sample_point(x_idx, inv_b.y_at(i, j), value);
            }
        }
        inverse_b_mu.finalize()?;
        self.inverse_b_mu = inverse_b_mu;

        let table = self.saturated_table(region, names)?;
        let seed = SaturationSeed::build(table, |p| {
            let factor: Real = table.eval(p, true)?;
            Ok(mass_fraction(factor))
        })?;
        self.seed = Some(seed);
        Ok(())
    }
}

/// Coordinate of the 2-D tables that holds the dissolution factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FactorAxis {
    /// live oil: (Rs, p)
    Outer,
    /// wet gas: (p, Rv)
    Inner,
}

/// A grid node of a table derived from saturated data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct GridPoint {
    pub pressure: Real,
    /// pressure at which the node's dissolution factor is saturated
    pub saturation_pressure: Real,
}

/// Full (factor, pressure) grid for phases given only along saturation.
///
/// Pressures are the saturated table's sample pressures plus `2 n` evenly
/// spaced ones over its range. Factors are the saturated factors at those
/// pressures plus evenly spaced ones from zero to the factor at the highest
/// pressure. Every saturated state at a grid pressure is a grid node, and
/// the grid only depends on the saturated table, so 1/B and μ built from it
/// share one grid.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct SaturatedGrid {
    axis: FactorAxis,
    /// (factor, saturation pressure), increasing in factor
    factors: Vec<(Real, Real)>,
    pressures: Vec<Real>,
}

impl SaturatedGrid {
    pub fn build(
        saturated: &Tabulated1d,
        axis: FactorAxis,
        what: &'static str,
    ) -> PvtResult<Self> {
        let tol = Tolerances::default();
        let p_min = saturated.x_min();
        let p_max = saturated.x_max();

        let mut pressures: Vec<Real> = (0..saturated.num_samples())
            .map(|i| saturated.x_at(i))
            .collect();
        let num_even = 2 * saturated.num_samples();
        for i in 1..num_even - 1 {
            let p = p_min + (p_max - p_min) * i as Real / (num_even - 1) as Real;
            if !pressures.iter().any(|&q| nearly_equal(p, q, tol)) {
                pressures.push(p);
            }
        }
        pressures.sort_by(Real::total_cmp);

        let factor_max = ensure_positive(saturated.eval(p_max, true)?, what)?;
        let mut factors = Vec::with_capacity(pressures.len() + SATURATED_GRID_FACTORS);
        for &p in &pressures {
            let factor: Real = saturated.eval(p, true)?;
            factors.push((factor, p));
        }
        for i in 0..SATURATED_GRID_FACTORS {
            let factor = factor_max * i as Real / (SATURATED_GRID_FACTORS - 1) as Real;
            if !factors.iter().any(|&(f, _)| nearly_equal(factor, f, tol)) {
                factors.push((factor, invert_saturated(saturated, factor)?));
            }
        }
        // stable sort keeps the lowest pressure of a flat stretch first
        factors.sort_by(|a, b| a.0.total_cmp(&b.0));
        factors.dedup_by(|later, kept| nearly_equal(later.0, kept.0, tol));

        Ok(Self {
            axis,
            factors,
            pressures,
        })
    }

    /// 1/B on the grid from saturated `(pressure, B)` samples.
    ///
    /// Away from saturation B follows `B_sat(p_sat) / (1 + c (p - p_sat))`
    /// with `c = UNDERSATURATED_COMPRESSIBILITY`.
    pub fn inverse_formation_volume_factor(
        &self,
        samples: &[(Real, Real)],
        what: &'static str,
    ) -> PvtResult<Tabulated2d> {
        let b_curve = Tabulated1d::new(samples, Interpolation::MonotoneSpline)?;
        self.table(|point| {
            let b_sat: Real = b_curve.eval(point.saturation_pressure, true)?;
            let b = b_sat
                / (1.0
                    + UNDERSATURATED_COMPRESSIBILITY
                        * (point.pressure - point.saturation_pressure));
            Ok(1.0 / ensure_positive(b, what)?)
        })
    }

    /// μ on the grid from saturated `(pressure, μ)` samples; μ depends on
    /// pressure only.
    pub fn viscosity(
        &self,
        samples: &[(Real, Real)],
        what: &'static str,
    ) -> PvtResult<Tabulated2d> {
        let mu_sat = Tabulated1d::new(samples, Interpolation::MonotoneSpline)?;
        self.table(|point| {
            let mu: Real = mu_sat.eval(point.pressure, true)?;
            Ok(ensure_positive(mu, what)?)
        })
    }

    fn table<F>(&self, value: F) -> PvtResult<Tabulated2d>
    where
        F: Fn(GridPoint) -> PvtResult<Real>,
    {
        let mut table = Tabulated2d::new();
        match self.axis {
            FactorAxis::Outer => {
                for &(factor, saturation_pressure) in &self.factors {
                    let x_idx = table.append_x_pos(factor);
                    for &pressure in &self.pressures {
                        let point = GridPoint {
                            pressure,
                            saturation_pressure,
                        };
                        table.append_sample_point(x_idx, pressure, value(point)?);
                    }
                }
            }
            FactorAxis::Inner => {
                for &pressure in &self.pressures {
                    let x_idx = table.append_x_pos(pressure);
                    for &(factor, saturation_pressure) in &self.factors {
                        let point = GridPoint {
                            pressure,
                            saturation_pressure,
                        };
                        table.append_sample_point(x_idx, factor, value(point)?);
                    }
                }
            }
        }
        table.finalize()?;
        Ok(table)
    }
}

/// Pressure at which the saturated factor equals `factor`, by bisection
/// over the table range. Factors outside the tabulated values clamp to the
/// range ends.
fn invert_saturated(saturated: &Tabulated1d, factor: Real) -> PvtResult<Real> {
    let mut p_low = saturated.x_min();
    let mut p_high = saturated.x_max();
    if factor <= saturated.eval(p_low, true)? {
        return Ok(p_low);
    }
    if factor >= saturated.eval(p_high, true)? {
        return Ok(p_high);
    }
    for _ in 0..BISECTION_STEPS {
        let p_mid = 0.5 * (p_low + p_high);
        let f_mid: Real = saturated.eval(p_mid, true)?;
        if f_mid < factor {
            p_low = p_mid;
        } else {
            p_high = p_mid;
        }
        if p_high - p_low <= Real::EPSILON * p_high {
            break;
        }
    }
    Ok(0.5 * (p_low + p_high))
}

fn same_grid(a: &Tabulated2d, b: &Tabulated2d) -> bool {
    a.num_x() == b.num_x()
        && (0..a.num_x()).all(|i| {
            a.x_at(i) == b.x_at(i)
                && a.num_y(i) == b.num_y(i)
                && (0..a.num_y(i)).all(|j| a.y_at(i, j) == b.y_at(i, j))
        })
}
