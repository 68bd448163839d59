//! Wet gas: gas with vaporized oil.
//!
//! Input records are keyed by pressure. Each record lists `(Rv, Bg, μg)`
//! rows; the first row is the oil-saturated state, the remaining rows
//! describe gas carrying less oil.

use crate::dissolution::{
    DissolutionTables, FactorAxis, RecordTables, SaturatedGrid, TableNames,
};
use crate::error::{PvtError, PvtResult, check_region};
use crate::fugacity::{LOW_AFFINITY_FACTOR, flash_consistent};
use crate::gas::gas_component_coefficient;
use crate::multiplexer::{OilPvtApproach, OilPvtMultiplexer};
use crate::region::RegionReference;
use crate::saturation::saturation_pressure;
use crate::traits::{GasPvtModel, OilPvtModel};
use bo_core::{Evaluation, Real};
use bo_solver::NewtonConfig;
use bo_tables::{Interpolation, PvtRecord, Tabulated1d, Tabulated2d};

const NAMES: TableNames = TableNames {
    saturated: "oil vaporization factor",
    formation_volume_factor: "gas formation volume factor",
    viscosity: "gas viscosity",
    grids: "gas 1/Bg and viscosity",
};

#[derive(Debug, Clone, Default, PartialEq)]
struct WetGasRegion {
    reference: RegionReference,
    /// outer coordinate p, inner coordinate Rv
    tables: DissolutionTables,
}

/// Gas with vaporized oil, tabulated over (p, Rv).
///
/// Density is `(ρg_ref + Rv ρo_ref) / Bg`. Requires a configured oil selector.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WetGasPvt {
    regions: Vec<WetGasRegion>,
    newton: NewtonConfig,
}

impl WetGasPvt {
    pub fn new(num_regions: usize) -> Self {
        Self {
            regions: vec![WetGasRegion::default(); num_regions],
            newton: NewtonConfig::default(),
        }
    }

    pub fn set_newton_config(&mut self, config: NewtonConfig) {
        self.newton = config;
    }

    /// Populate a region from pressure-keyed records.
    pub fn set_table(&mut self, region: usize, records: Vec<PvtRecord>) -> PvtResult<()> {
        check_region(region, self.regions.len())?;
        let split = RecordTables::from_records(records, &NAMES, |record, sat| {
            (record.outer, sat.inner)
        })?;
        self.set_saturated_oil_vaporization_factor(region, &split.saturated, Interpolation::Linear)?;
        self.set_inverse_formation_volume_factor(region, split.inverse_formation_volume_factor)?;
        self.set_viscosity(region, split.viscosity)
    }

    /// Set Rv(p) of saturated gas from `(pressure, Rv)` samples.
    pub fn set_saturated_oil_vaporization_factor(
        &mut self,
        region: usize,
        samples: &[(Real, Real)],
        interpolation: Interpolation,
    ) -> PvtResult<()> {
        check_region(region, self.regions.len())?;
        self.regions[region].tables.saturated = Some(Tabulated1d::new(samples, interpolation)?);
        Ok(())
    }

    /// Set 1/Bg over (p, Rv).
    pub fn set_inverse_formation_volume_factor(
        &mut self,
        region: usize,
        mut table: Tabulated2d,
    ) -> PvtResult<()> {
        check_region(region, self.regions.len())?;
        table.finalize()?;
        self.regions[region].tables.inverse_formation_volume_factor = table;
        Ok(())
    }

    /// Set μg over (p, Rv).
    pub fn set_viscosity(&mut self, region: usize, mut table: Tabulated2d) -> PvtResult<()> {
        check_region(region, self.regions.len())?;
        table.finalize()?;
        self.regions[region].tables.viscosity = table;
        Ok(())
    }

    /// Derive 1/Bg over (p, Rv) from saturated `(pressure, Bg)` samples.
    ///
    /// The saturated Rv table must be set first. Gas carrying less oil than
    /// at saturation is compressed from the pressure where its Rv saturates.
    pub fn set_saturated_formation_volume_factor(
        &mut self,
        region: usize,
        samples: &[(Real, Real)],
    ) -> PvtResult<()> {
        let table = self
            .saturated_grid(region)?
            .inverse_formation_volume_factor(samples, NAMES.formation_volume_factor)?;
        self.set_inverse_formation_volume_factor(region, table)
    }

    /// Derive μg over (p, Rv) from saturated `(pressure, μg)` samples; the
    /// viscosity does not depend on Rv.
    pub fn set_saturated_viscosity(
        &mut self,
        region: usize,
        samples: &[(Real, Real)],
    ) -> PvtResult<()> {
        let table = self
            .saturated_grid(region)?
            .viscosity(samples, NAMES.viscosity)?;
        self.set_viscosity(region, table)
    }

    fn saturated_grid(&self, region: usize) -> PvtResult<SaturatedGrid> {
        let saturated = self.region(region)?.tables.saturated_table(region, &NAMES)?;
        SaturatedGrid::build(saturated, FactorAxis::Inner, NAMES.saturated)
    }

    fn region(&self, region: usize) -> PvtResult<&WetGasRegion> {
        self.regions.get(region).ok_or(PvtError::InvalidRegion {
            region,
            num_regions: self.regions.len(),
        })
    }
}

impl GasPvtModel for WetGasPvt {
    fn num_regions(&self) -> usize {
        self.regions.len()
    }

    fn set_num_regions(&mut self, num_regions: usize) {
        self.regions.resize(num_regions, WetGasRegion::default());
    }

    fn set_region_reference(&mut self, region: usize, reference: RegionReference) {
        debug_assert!(region < self.regions.len(), "region {region} out of bounds");
        self.regions[region].reference = reference;
    }

    fn init_end(&mut self, oil: &OilPvtMultiplexer) -> PvtResult<()> {
        if oil.approach() == OilPvtApproach::NoPvt {
            return Err(PvtError::Unconfigured { phase: "oil" });
        }
        for (region, data) in self.regions.iter_mut().enumerate() {
            data.reference.validate()?;
            let reference = data.reference;
            data.tables.finish(region, &NAMES, |rv| {
                reference.gas_oil_mass_fraction_from_rv(rv)
            })?;
        }
        Ok(())
    }

    fn formation_volume_factor<D: Evaluation>(
        &self,
        region: usize,
        _temperature: D,
        pressure: D,
        x_g_o: D,
    ) -> PvtResult<D> {
        let data = self.region(region)?;
        let rv = data.reference.rv_from_gas_oil_mass_fraction(x_g_o);
        let inv_b = data.tables.inverse_formation_volume_factor(pressure, rv)?;
        Ok(inv_b.recip())
    }

    fn density<D: Evaluation>(
        &self,
        region: usize,
        _temperature: D,
        pressure: D,
        x_g_o: D,
    ) -> PvtResult<D> {
        let data = self.region(region)?;
        let rv = data.reference.rv_from_gas_oil_mass_fraction(x_g_o);
        let inv_b = data.tables.inverse_formation_volume_factor(pressure, rv)?;
        Ok((rv * data.reference.oil_density + data.reference.gas_density) * inv_b)
    }

    fn viscosity<D: Evaluation>(
        &self,
        region: usize,
        _temperature: D,
        pressure: D,
        x_g_o: D,
    ) -> PvtResult<D> {
        let data = self.region(region)?;
        let rv = data.reference.rv_from_gas_oil_mass_fraction(x_g_o);
        data.tables.viscosity(pressure, rv)
    }

    fn oil_vaporization_factor<D: Evaluation>(
        &self,
        region: usize,
        _temperature: D,
        pressure: D,
    ) -> PvtResult<D> {
        let table = self.region(region)?.tables.saturated_table(region, &NAMES)?;
        Ok(table.eval(pressure, true)?)
    }

    fn saturated_gas_oil_mass_fraction<D: Evaluation>(
        &self,
        region: usize,
        temperature: D,
        pressure: D,
    ) -> PvtResult<D> {
        let rv = self.oil_vaporization_factor(region, temperature, pressure)?;
        Ok(self.region(region)?.reference.gas_oil_mass_fraction_from_rv(rv))
    }

    fn saturated_gas_oil_mole_fraction<D: Evaluation>(
        &self,
        region: usize,
        temperature: D,
        pressure: D,
    ) -> PvtResult<D> {
        let x_g_o = self.saturated_gas_oil_mass_fraction(region, temperature, pressure)?;
        Ok(self.region(region)?.reference.gas_oil_mole_fraction(x_g_o))
    }

    fn saturation_pressure<D: Evaluation>(
        &self,
        region: usize,
        temperature: D,
        x_g_o: D,
    ) -> PvtResult<D> {
        saturation_pressure(
            self.region(region)?.tables.seed()?,
            x_g_o,
            &self.newton,
            "gas saturation pressure",
            |p| self.saturated_gas_oil_mass_fraction(region, temperature, p),
        )
    }

    fn fugacity_coefficient_gas<D: Evaluation>(
        &self,
        _region: usize,
        _temperature: D,
        _pressure: D,
    ) -> PvtResult<D> {
        Ok(gas_component_coefficient())
    }

    fn fugacity_coefficient_oil<D: Evaluation>(
        &self,
        oil: &OilPvtMultiplexer,
        region: usize,
        temperature: D,
        pressure: D,
    ) -> PvtResult<D> {
        let phi_o_o = oil.fugacity_coefficient_oil(region, temperature, pressure)?;
        let x_sat = self.saturated_gas_oil_mole_fraction(region, temperature, pressure)?;
        Ok(flash_consistent(phi_o_o, x_sat))
    }

    fn fugacity_coefficient_water<D: Evaluation>(
        &self,
        oil: &OilPvtMultiplexer,
        region: usize,
        temperature: D,
        pressure: D,
    ) -> PvtResult<D> {
        let phi_o_w = oil.fugacity_coefficient_water(region, temperature, pressure)?;
        Ok(phi_o_w * LOW_AFFINITY_FACTOR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oil::DeadOilPvt;
    use approx::assert_relative_eq;
    use bo_core::units::kg_per_m3;
    use bo_tables::PvtSample;
    use num_dual::{Dual64, DualNum};

    const T: f64 = 360.0;

    fn reference() -> RegionReference {
        RegionReference::from_densities(kg_per_m3(800.0), kg_per_m3(1000.0), kg_per_m3(0.9))
            .unwrap()
    }

    fn records() -> Vec<PvtRecord> {
        vec![
            PvtRecord::new(5e6, vec![PvtSample::new(2e-5, 0.02, 1.3e-5)]),
            PvtRecord::new(1.5e7, vec![PvtSample::new(6e-5, 0.0075, 1.8e-5)]),
            PvtRecord::new(
                3e7,
                vec![
                    PvtSample::new(1.5e-4, 0.0045, 2.6e-5),
                    PvtSample::new(0.0, 0.0042, 2.4e-5),
                ],
            ),
        ]
    }

    fn oil() -> OilPvtMultiplexer {
        let mut oil = DeadOilPvt::new(1);
        oil.set_table(
            0,
            &[(1e5, 1.0, 1e-3), (4e7, 1.2, 1.5e-3)],
            Interpolation::Linear,
        )
        .unwrap();
        oil.set_region_reference(0, reference());
        OilPvtMultiplexer::from(oil)
    }

    fn wet_gas() -> WetGasPvt {
        let mut gas = WetGasPvt::new(1);
        gas.set_table(0, records()).unwrap();
        gas.set_region_reference(0, reference());
        gas.init_end(&oil()).unwrap();
        gas
    }

    #[test]
    fn saturated_density_includes_vaporized_oil() {
        let gas = wet_gas();
        let rho: f64 = gas.saturated_density(0, T, 1.5e7).unwrap();
        assert_relative_eq!(rho, (0.9 + 6e-5 * 800.0) / 0.0075, max_relative = 1e-9);
    }

    #[test]
    fn single_row_records_are_extended() {
        let gas = wet_gas();
        let bg: f64 = gas.formation_volume_factor(0, T, 5e6, 0.0).unwrap();
        assert_relative_eq!(bg, 0.02 * 0.0042 / 0.0045, max_relative = 1e-10);
        let mu: f64 = gas.viscosity(0, T, 5e6, 0.0).unwrap();
        assert_relative_eq!(mu, 1.3e-5 * 2.4 / 2.6, max_relative = 1e-10);
    }

    #[test]
    fn saturation_pressure_round_trip() {
        let gas = wet_gas();
        for p in [6e6, 1.2e7, 2.2e7] {
            let x: f64 = gas.saturated_gas_oil_mass_fraction(0, T, p).unwrap();
            let p_sat: f64 = gas.saturation_pressure(0, T, x).unwrap();
            assert_relative_eq!(p_sat, p, max_relative = 1e-8);
        }
    }

    #[test]
    fn oil_fugacity_is_flash_consistent() {
        let gas = wet_gas();
        let oil = oil();
        let p = 2e7;
        let phi: f64 = gas.fugacity_coefficient_oil(&oil, 0, T, p).unwrap();
        let x_sat: f64 = gas.saturated_gas_oil_mole_fraction(0, T, p).unwrap();
        let phi_o_o: f64 = oil.fugacity_coefficient_oil(0, T, p).unwrap();
        assert_relative_eq!(phi * x_sat, phi_o_o, max_relative = 1e-12);
    }

    #[test]
    fn water_fugacity_scales_oil_phase_coefficient() {
        let gas = wet_gas();
        let oil = oil();
        let phi: f64 = gas.fugacity_coefficient_water(&oil, 0, T, 1e7).unwrap();
        let phi_o_w: f64 = oil.fugacity_coefficient_water(0, T, 1e7).unwrap();
        assert_relative_eq!(phi, 1e8 * phi_o_w, max_relative = 1e-12);
    }

    #[test]
    fn requires_oil_counterpart() {
        let mut gas = WetGasPvt::new(1);
        gas.set_table(0, records()).unwrap();
        gas.set_region_reference(0, reference());
        let err = gas.init_end(&OilPvtMultiplexer::NoPvt).unwrap_err();
        assert_eq!(err, PvtError::Unconfigured { phase: "oil" });
    }

    #[test]
    fn density_derivative_matches_finite_difference() {
        let gas = wet_gas();
        let (p, x) = (1.2e7, 0.02);
        let rho = gas
            .density(0, Dual64::from_re(T), Dual64::new(p, 1.0), Dual64::from_re(x))
            .unwrap();
        let h = 10.0;
        let up: f64 = gas.density(0, T, p + h, x).unwrap();
        let down: f64 = gas.density(0, T, p - h, x).unwrap();
        assert_relative_eq!(rho.eps, (up - down) / (2.0 * h), max_relative = 1e-5);
    }

    const SATURATED_BG: [(Real, Real); 3] = [(5e6, 0.02), (1.5e7, 0.0075), (3e7, 0.0045)];
    const SATURATED_MU: [(Real, Real); 3] = [(5e6, 1.3e-5), (1.5e7, 1.8e-5), (3e7, 2.6e-5)];

    fn saturated_only_gas() -> WetGasPvt {
        let mut gas = WetGasPvt::new(1);
        gas.set_saturated_oil_vaporization_factor(
            0,
            &[(5e6, 2e-5), (1.5e7, 6e-5), (3e7, 1.5e-4)],
            Interpolation::Linear,
        )
        .unwrap();
        gas.set_saturated_formation_volume_factor(0, &SATURATED_BG).unwrap();
        gas.set_saturated_viscosity(0, &SATURATED_MU).unwrap();
        gas.set_region_reference(0, reference());
        gas.init_end(&oil()).unwrap();
        gas
    }

    #[test]
    fn saturated_only_data_is_reproduced_along_saturation() {
        let gas = saturated_only_gas();
        let bg_curve = Tabulated1d::new(&SATURATED_BG, Interpolation::MonotoneSpline).unwrap();
        let mu_curve = Tabulated1d::new(&SATURATED_MU, Interpolation::MonotoneSpline).unwrap();
        // sample pressures and evenly spaced grid pressures
        for p in [5e6, 1e7, 1.5e7, 2.5e7, 3e7] {
            let bg: f64 = gas.saturated_formation_volume_factor(0, T, p).unwrap();
            let expected: f64 = bg_curve.eval(p, false).unwrap();
            assert_relative_eq!(bg, expected, max_relative = 1e-12);
            let mu: f64 = gas.saturated_viscosity(0, T, p).unwrap();
            let expected: f64 = mu_curve.eval(p, false).unwrap();
            assert_relative_eq!(mu, expected, max_relative = 1e-12);
        }
    }

    #[test]
    fn leaner_gas_is_compressed_from_its_saturation_pressure() {
        let gas = saturated_only_gas();
        // Rv 2e-5 saturates at 5e6
        let x = reference().gas_oil_mass_fraction_from_rv(2e-5);
        let bg: f64 = gas.formation_volume_factor(0, T, 1.5e7, x).unwrap();
        let c = crate::dissolution::UNDERSATURATED_COMPRESSIBILITY;
        assert_relative_eq!(bg, 0.02 / (1.0 + c * 1e7), max_relative = 1e-9);
        // viscosity follows pressure only
        let mu: f64 = gas.viscosity(0, T, 1.5e7, x).unwrap();
        assert_relative_eq!(mu, 1.8e-5, max_relative = 1e-12);
    }

    #[test]
    fn evaluators_reject_unknown_region() {
        let gas = wet_gas();
        let err = gas.viscosity::<f64>(1, T, 1e7, 0.0).unwrap_err();
        assert!(matches!(err, PvtError::InvalidRegion { region: 1, .. }));
        let err = gas.oil_vaporization_factor::<f64>(1, T, 1e7).unwrap_err();
        assert!(matches!(err, PvtError::InvalidRegion { region: 1, .. }));
    }
}
