//! Dry gas: gas without vaporized oil, tabulated over pressure.

use crate::error::{PvtError, PvtResult, check_region};
use crate::fugacity::LOW_AFFINITY_FACTOR;
use crate::gas::gas_component_coefficient;
use crate::multiplexer::OilPvtMultiplexer;
use crate::region::RegionReference;
use crate::traits::GasPvtModel;
use bo_core::{Evaluation, Real, constant};
use bo_tables::{Interpolation, Tabulated1d};

#[derive(Debug, Clone, Default, PartialEq)]
struct DryGasRegion {
    reference: RegionReference,
    formation_volume_factor: Option<Tabulated1d>,
    viscosity: Option<Tabulated1d>,
}

/// Gas whose `Bg(p)` and `μg(p)` are 1-D tables. Density is `ρg_ref / Bg`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DryGasPvt {
    regions: Vec<DryGasRegion>,
}

impl DryGasPvt {
    pub fn new(num_regions: usize) -> Self {
        Self {
            regions: vec![DryGasRegion::default(); num_regions],
        }
    }

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

    /// Set both tables from `(pressure, Bg, viscosity)` rows.
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

    fn region(&self, region: usize) -> PvtResult<&DryGasRegion> {
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
                what: "gas formation volume factor",
                region,
            })
    }

    fn viscosity_table(&self, region: usize) -> PvtResult<&Tabulated1d> {
        self.region(region)?
            .viscosity
            .as_ref()
            .ok_or(PvtError::MissingTable {
                what: "gas viscosity",
                region,
            })
    }
}

impl GasPvtModel for DryGasPvt {
    fn num_regions(&self) -> usize {
        self.regions.len()
    }

    fn set_num_regions(&mut self, num_regions: usize) {
        self.regions.resize(num_regions, DryGasRegion::default());
    }

    fn set_region_reference(&mut self, region: usize, reference: RegionReference) {
        debug_assert!(region < self.regions.len(), "region {region} out of bounds");
        self.regions[region].reference = reference;
    }

    fn init_end(&mut self, _oil: &OilPvtMultiplexer) -> PvtResult<()> {
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
        _x_g_o: D,
    ) -> PvtResult<D> {
        Ok(self.formation_volume_factor_table(region)?.eval(pressure, true)?)
    }

    fn density<D: Evaluation>(
        &self,
        region: usize,
        temperature: D,
        pressure: D,
        x_g_o: D,
    ) -> PvtResult<D> {
        let bg = self.formation_volume_factor(region, temperature, pressure, x_g_o)?;
        Ok(bg.recip() * self.region(region)?.reference.gas_density)
    }

    fn viscosity<D: Evaluation>(
        &self,
        region: usize,
        _temperature: D,
        pressure: D,
        _x_g_o: D,
    ) -> PvtResult<D> {
        Ok(self.viscosity_table(region)?.eval(pressure, true)?)
    }

    fn oil_vaporization_factor<D: Evaluation>(
        &self,
        _region: usize,
        _temperature: D,
        _pressure: D,
    ) -> PvtResult<D> {
        Ok(D::zero())
    }

    fn saturated_gas_oil_mass_fraction<D: Evaluation>(
        &self,
        _region: usize,
        _temperature: D,
        _pressure: D,
    ) -> PvtResult<D> {
        Ok(D::zero())
    }

    fn saturated_gas_oil_mole_fraction<D: Evaluation>(
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
        _x_g_o: D,
    ) -> PvtResult<D> {
        Err(PvtError::NotSupported {
            what: "saturation pressure of dry gas",
        })
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
        _oil: &OilPvtMultiplexer,
        _region: usize,
        _temperature: D,
        _pressure: D,
    ) -> PvtResult<D> {
        Ok(constant(LOW_AFFINITY_FACTOR))
    }

    fn fugacity_coefficient_water<D: Evaluation>(
        &self,
        _oil: &OilPvtMultiplexer,
        _region: usize,
        _temperature: D,
        _pressure: D,
    ) -> PvtResult<D> {
        Ok(constant(LOW_AFFINITY_FACTOR))
    }
}
