//! Live oil: oil with dissolved gas.
//!
//! Input records are keyed by the gas dissolution factor Rs. Each record
//! lists `(pressure, Bo, μo)` rows; the first row is the saturated state,
//! the following rows describe under-saturated oil at higher pressures.
//! Records with a single row are completed by `extend_undersaturated`.

use crate::dissolution::{
    DissolutionTables, FactorAxis, RecordTables, SaturatedGrid, TableNames,
};
use crate::error::{PvtError, PvtResult, check_region};
use crate::fugacity::flash_consistent;
use crate::multiplexer::{GasPvtApproach, GasPvtMultiplexer};
use crate::oil::{excluded_component_coefficient, oil_component_coefficient};
use crate::region::RegionReference;
use crate::saturation::saturation_pressure;
use crate::traits::{GasPvtModel, OilPvtModel};
use bo_core::{Evaluation, Real};
use bo_solver::NewtonConfig;
use bo_tables::{Interpolation, PvtRecord, Tabulated1d, Tabulated2d};

const NAMES: TableNames = TableNames {
    saturated: "gas dissolution factor",
    formation_volume_factor: "oil formation volume factor",
    viscosity: "oil viscosity",
    grids: "oil 1/Bo and viscosity",
};

#[derive(Debug, Clone, Default, PartialEq)]
struct LiveOilRegion {
    reference: RegionReference,
    /// outer coordinate Rs, inner coordinate p
    tables: DissolutionTables,
}

/// Oil with dissolved gas, tabulated over (Rs, p).
///
/// Density is `(ρo_ref + Rs ρg_ref) / Bo`, viscosity is recovered as
/// `(1/Bo) / (1/(Bo μo))`. Requires a configured gas selector.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LiveOilPvt {
    regions: Vec<LiveOilRegion>,
    newton: NewtonConfig,
}

impl LiveOilPvt {
    pub fn new(num_regions: usize) -> Self {
        Self {
            regions: vec![LiveOilRegion::default(); num_regions],
            newton: NewtonConfig::default(),
        }
    }

    pub fn set_newton_config(&mut self, config: NewtonConfig) {
        self.newton = config;
    }

    /// Populate a region from Rs-keyed records.
    ///
    /// Records with a single (saturated) row are extended from the next
    /// record that carries under-saturated rows.
    pub fn set_table(&mut self, region: usize, records: Vec<PvtRecord>) -> PvtResult<()> {
        check_region(region, self.regions.len())?;
        let split = RecordTables::from_records(records, &NAMES, |record, sat| {
            (sat.inner, record.outer)
        })?;
        self.set_saturated_gas_dissolution_factor(region, &split.saturated, Interpolation::Linear)?;
        self.set_inverse_formation_volume_factor(region, split.inverse_formation_volume_factor)?;
        self.set_viscosity(region, split.viscosity)
    }

    /// Set Rs(p) of saturated oil from `(pressure, Rs)` samples.
    pub fn set_saturated_gas_dissolution_factor(
        &mut self,
        region: usize,
        samples: &[(Real, Real)],
        interpolation: Interpolation,
    ) -> PvtResult<()> {
        check_region(region, self.regions.len())?;
        self.regions[region].tables.saturated =
            Some(Tabulated1d::new(samples, interpolation)?);
        Ok(())
    }

    /// Set 1/Bo over (Rs, p).
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

    /// Set μo over (Rs, p).
    pub fn set_viscosity(&mut self, region: usize, mut table: Tabulated2d) -> PvtResult<()> {
        check_region(region, self.regions.len())?;
        table.finalize()?;
        self.regions[region].tables.viscosity = table;
        Ok(())
    }

    /// Derive 1/Bo over (Rs, p) from saturated `(pressure, Bo)` samples.
    ///
    /// The saturated Rs table must be set first. Under-saturated oil is
    /// compressed from its saturated state with a constant compressibility.
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

    /// Derive μo over (Rs, p) from saturated `(pressure, μo)` samples.
    ///
    /// The saturated Rs table must be set first.
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
        SaturatedGrid::build(saturated, FactorAxis::Outer, NAMES.saturated)
    }

    fn region(&self, region: usize) -> PvtResult<&LiveOilRegion> {
        self.regions.get(region).ok_or(PvtError::InvalidRegion {
            region,
            num_regions: self.regions.len(),
        })
    }
}

impl OilPvtModel for LiveOilPvt {
    fn num_regions(&self) -> usize {
        self.regions.len()
    }

    fn set_num_regions(&mut self, num_regions: usize) {
        self.regions.resize(num_regions, LiveOilRegion::default());
    }

    fn set_region_reference(&mut self, region: usize, reference: RegionReference) {
        debug_assert!(region < self.regions.len(), "region {region} out of bounds");
        self.regions[region].reference = reference;
    }

    fn init_end(&mut self, gas: &GasPvtMultiplexer) -> PvtResult<()> {
        if gas.approach() == GasPvtApproach::NoPvt {
            return Err(PvtError::Unconfigured { phase: "gas" });
        }
        for (region, data) in self.regions.iter_mut().enumerate() {
            data.reference.validate()?;
            let reference = data.reference;
            data.tables.finish(region, &NAMES, |rs| {
                reference.oil_gas_mass_fraction_from_rs(rs)
            })?;
        }
        Ok(())
    }

    fn formation_volume_factor<D: Evaluation>(
        &self,
        region: usize,
        _temperature: D,
        pressure: D,
        x_o_g: D,
    ) -> PvtResult<D> {
        let data = self.region(region)?;
        let rs = data.reference.rs_from_oil_gas_mass_fraction(x_o_g);
        let inv_b = data.tables.inverse_formation_volume_factor(rs, pressure)?;
        Ok(inv_b.recip())
    }

    fn density<D: Evaluation>(
        &self,
        region: usize,
        _temperature: D,
        pressure: D,
        x_o_g: D,
    ) -> PvtResult<D> {
        let data = self.region(region)?;
        let rs = data.reference.rs_from_oil_gas_mass_fraction(x_o_g);
        let inv_b = data.tables.inverse_formation_volume_factor(rs, pressure)?;
        Ok((rs * data.reference.gas_density + data.reference.oil_density) * inv_b)
    }

    fn viscosity<D: Evaluation>(
        &self,
        region: usize,
        _temperature: D,
        pressure: D,
        x_o_g: D,
    ) -> PvtResult<D> {
        let data = self.region(region)?;
        let rs = data.reference.rs_from_oil_gas_mass_fraction(x_o_g);
        data.tables.viscosity(rs, pressure)
    }

    fn saturated_gas_dissolution_factor<D: Evaluation>(
        &self,
        region: usize,
        _temperature: D,
        pressure: D,
    ) -> PvtResult<D> {
        let table = self.region(region)?.tables.saturated_table(region, &NAMES)?;
        Ok(table.eval(pressure, true)?)
    }

    fn saturated_oil_gas_mass_fraction<D: Evaluation>(
        &self,
        region: usize,
        temperature: D,
        pressure: D,
    ) -> PvtResult<D> {
        let rs = self.saturated_gas_dissolution_factor(region, temperature, pressure)?;
        Ok(self.region(region)?.reference.oil_gas_mass_fraction_from_rs(rs))
    }

    fn saturated_oil_gas_mole_fraction<D: Evaluation>(
        &self,
        region: usize,
        temperature: D,
        pressure: D,
    ) -> PvtResult<D> {
        let x_o_g = self.saturated_oil_gas_mass_fraction(region, temperature, pressure)?;
        Ok(self.region(region)?.reference.oil_gas_mole_fraction(x_o_g))
    }

    fn saturation_pressure<D: Evaluation>(
        &self,
        region: usize,
        temperature: D,
        x_o_g: D,
    ) -> PvtResult<D> {
        saturation_pressure(
            self.region(region)?.tables.seed()?,
            x_o_g,
            &self.newton,
            "oil saturation pressure",
            |p| self.saturated_oil_gas_mass_fraction(region, temperature, p),
        )
    }

    fn fugacity_coefficient_oil<D: Evaluation>(
        &self,
        _region: usize,
        _temperature: D,
        pressure: D,
    ) -> PvtResult<D> {
        Ok(oil_component_coefficient(pressure))
    }

    fn fugacity_coefficient_water<D: Evaluation>(
        &self,
        _region: usize,
        _temperature: D,
        pressure: D,
    ) -> PvtResult<D> {
        excluded_component_coefficient(pressure)
    }

    fn fugacity_coefficient_gas<D: Evaluation>(
        &self,
        gas: &GasPvtMultiplexer,
        region: usize,
        temperature: D,
        pressure: D,
    ) -> PvtResult<D> {
        let phi_g_g = gas.fugacity_coefficient_gas(region, temperature, pressure)?;
        let x_sat = self.saturated_oil_gas_mole_fraction(region, temperature, pressure)?;
        Ok(flash_consistent(phi_g_g, x_sat))
    }
}
