//! Dead oil: oil without dissolved gas, tabulated over pressure.

use crate::error::{PvtError, PvtResult, check_region};
use crate::multiplexer::GasPvtMultiplexer;
use crate::oil::{excluded_component_coefficient, oil_component_coefficient};
use crate::region::RegionReference;
use crate::traits::OilPvtModel;
use bo_core::{Evaluation, Real};
use bo_tables::{Interpolation, Tabulated1d};

#[derive(Debug, Clone, Default, PartialEq)]
struct DeadOilRegion {
    reference: RegionReference,
    formation_volume_factor: Option<Tabulated1d>,
    viscosity: Option<Tabulated1d>,
}

/// Oil whose formation volume factor `Bo(p)` and viscosity `μo(p)` are
/// given as 1-D tables. Density is `ρo_ref / Bo`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeadOilPvt {
    regions: Vec<DeadOilRegion>,
}

impl DeadOilPvt {
    pub fn new(num_regions: usize) -> Self {
        Self {
            regions: vec![DeadOilRegion::default(); num_regions],
        }
    }

    /// Set `Bo(p)` from `(pressure, Bo)` samples.
    pub fn set_formation_volume_factor(
        &mut self,
        region: usize,
        samples: &[(Real, Real)],
        interpolation: Interpolation,
    ) -> PvtResult<()> {
        check_region(region, self.regions.len())?;
        self.regions[region].formation_volume_factor =
            Some(Tabulated1d::new(samples, interpolation)?);
        Ok(())
    }

    /// Set `μo(p)` from `(pressure, viscosity)` samples.
    pub fn set_viscosity(
        &mut self,
        region: usize,
        samples: &[(Real, Real)],
        interpolation: Interpolation,
    ) -> PvtResult<()> {
        check_region(region, self.regions.len())?;
        self.regions[region].viscosity = Some(Tabulated1d::new(samples, interpolation)?);
        Ok(())
    }

    /// Set both tables from `(pressure, Bo, viscosity)` rows.
    pub fn set_table(
        &mut self,
        region: usize,
        rows: &[(Real, Real, Real)],
        interpolation: Interpolation,
    ) -> PvtResult<()> {
        let b: Vec<(Real, Real)> = rows.iter().map(|&(p, b, _)| (p, b)).collect();
        let mu: Vec<(Real, Real)> = rows.iter().map(|&(p, _, mu)| (p, mu)).collect();
        self.set_formation_volume_factor(region, &b, interpolation)?;
        self.set_viscosity(region, &mu, interpolation)
    }

    fn region(&self, region: usize) -> PvtResult<&DeadOilRegion> {
        self.regions.get(region).ok_or(PvtError::InvalidRegion {
            region,
            num_regions: self.regions.len(),
        })
    }

    fn formation_volume_factor_table(&self, region: usize) -> PvtResult<&Tabulated1d> {
        self.region(region)?
            .formation_volume_factor
            .as_ref()
            .ok_or(PvtError::MissingTable {
                what: "oil formation volume factor",
                region,
            })
    }

    fn viscosity_table(&self, region: usize) -> PvtResult<&Tabulated1d> {
        self.region(region)?
            .viscosity
            .as_ref()
            .ok_or(PvtError::MissingTable {
                what: "oil viscosity",
                region,
            })
    }
}

impl OilPvtModel for DeadOilPvt {
    fn num_regions(&self) -> usize {
        self.regions.len()
    }

    fn set_num_regions(&mut self, num_regions: usize) {
        self.regions.resize(num_regions, DeadOilRegion::default());
    }

    fn set_region_reference(&mut self, region: usize, reference: RegionReference) {
        debug_assert!(region < self.regions.len(), "region {region} out of bounds");
        self.regions[region].reference = reference;
    }

    fn init_end(&mut self, _gas: &GasPvtMultiplexer) -> PvtResult<()> {
        for (region, data) in self.regions.iter().enumerate() {
            data.reference.validate()?;
            self.formation_volume_factor_table(region)?;
            self.viscosity_table(region)?;
        }
        Ok(())
    }

    fn formation_volume_factor<D: Evaluation>(
        &self,
        region: usize,
        _temperature: D,
        pressure: D,
        _x_o_g: D,
    ) -> PvtResult<D> {
        Ok(self.formation_volume_factor_table(region)?.eval(pressure, true)?)
    }

    fn density<D: Evaluation>(
        &self,
        region: usize,
        temperature: D,
        pressure: D,
        x_o_g: D,
    ) -> PvtResult<D> {
        let bo = self.formation_volume_factor(region, temperature, pressure, x_o_g)?;
        Ok(bo.recip() * self.region(region)?.reference.oil_density)
    }

    fn viscosity<D: Evaluation>(
        &self,
        region: usize,
        _temperature: D,
        pressure: D,
        _x_o_g: D,
    ) -> PvtResult<D> {
        Ok(self.viscosity_table(region)?.eval(pressure, true)?)
    }

    fn saturated_gas_dissolution_factor<D: Evaluation>(
        &self,
        _region: usize,
        _temperature: D,
        _pressure: D,
    ) -> PvtResult<D> {
        Ok(D::zero())
    }

    fn saturated_oil_gas_mass_fraction<D: Evaluation>(
        &self,
        _region: usize,
        _temperature: D,
        _pressure: D,
    ) -> PvtResult<D> {
        Ok(D::zero())
    }

    fn saturated_oil_gas_mole_fraction<D: Evaluation>(
        &self,
        _region: usize,
        _temperature: D,
        _pressure: D,
    ) -> PvtResult<D> {
        Ok(D::zero())
    }

    fn saturation_pressure<D: Evaluation>(
        &self,
        _region: usize,
        _temperature: D,
        _x_o_g: D,
    ) -> PvtResult<D> {
        Err(PvtError::NotSupported {
            what: "saturation pressure of dead oil",
        })
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
        _gas: &GasPvtMultiplexer,
        _region: usize,
        _temperature: D,
        pressure: D,
    ) -> PvtResult<D> {
        excluded_component_coefficient(pressure)
    }
}
