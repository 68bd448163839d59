//! Operation sets of the oil and gas PVT models.
//!
//! Every relation takes the PVT region, the temperature and the pressure.
//! The isothermal black-oil relations accept the temperature and ignore it.

use crate::error::PvtResult;
use crate::multiplexer::{GasPvtMultiplexer, OilPvtMultiplexer};
use crate::region::RegionReference;
use bo_core::Evaluation;

/// An oil phase PVT model.
pub trait OilPvtModel {
    fn num_regions(&self) -> usize;

    /// Resize the per-region storage; new regions start without data.
    fn set_num_regions(&mut self, num_regions: usize);

    fn set_region_reference(&mut self, region: usize, reference: RegionReference);

    /// Finish initialization. `gas` is the gas selector of the same fluid
    /// system; models that depend on it check that it is configured.
    fn init_end(&mut self, gas: &GasPvtMultiplexer) -> PvtResult<()>;

    /// Formation volume factor at the given mass fraction of dissolved gas.
    fn formation_volume_factor<D: Evaluation>(
        &self,
        region: usize,
        temperature: D,
        pressure: D,
        x_o_g: D,
    ) -> PvtResult<D>;

    /// Density [kg/m³] at the given mass fraction of dissolved gas.
    fn density<D: Evaluation>(
        &self,
        region: usize,
        temperature: D,
        pressure: D,
        x_o_g: D,
    ) -> PvtResult<D>;

    /// Dynamic viscosity [Pa s] at the given mass fraction of dissolved gas.
    fn viscosity<D: Evaluation>(
        &self,
        region: usize,
        temperature: D,
        pressure: D,
        x_o_g: D,
    ) -> PvtResult<D>;

    /// Rs of gas-saturated oil.
    fn saturated_gas_dissolution_factor<D: Evaluation>(
        &self,
        region: usize,
        temperature: D,
        pressure: D,
    ) -> PvtResult<D>;

    fn saturated_oil_gas_mass_fraction<D: Evaluation>(
        &self,
        region: usize,
        temperature: D,
        pressure: D,
    ) -> PvtResult<D>;

    fn saturated_oil_gas_mole_fraction<D: Evaluation>(
        &self,
        region: usize,
        temperature: D,
        pressure: D,
    ) -> PvtResult<D>;

    /// Pressure at which oil with gas mass fraction `x_o_g` is saturated.
    fn saturation_pressure<D: Evaluation>(
        &self,
        region: usize,
        temperature: D,
        x_o_g: D,
    ) -> PvtResult<D>;

    fn fugacity_coefficient_oil<D: Evaluation>(
        &self,
        region: usize,
        temperature: D,
        pressure: D,
    ) -> PvtResult<D>;

    fn fugacity_coefficient_water<D: Evaluation>(
        &self,
        region: usize,
        temperature: D,
        pressure: D,
    ) -> PvtResult<D>;

    fn fugacity_coefficient_gas<D: Evaluation>(
        &self,
        gas: &GasPvtMultiplexer,
        region: usize,
        temperature: D,
        pressure: D,
    ) -> PvtResult<D>;

    fn saturated_formation_volume_factor<D: Evaluation>(
        &self,
        region: usize,
        temperature: D,
        pressure: D,
    ) -> PvtResult<D> {
        let x_o_g = self.saturated_oil_gas_mass_fraction(region, temperature, pressure)?;
        self.formation_volume_factor(region, temperature, pressure, x_o_g)
    }

    fn saturated_density<D: Evaluation>(
        &self,
        region: usize,
        temperature: D,
        pressure: D,
    ) -> PvtResult<D> {
        let x_o_g = self.saturated_oil_gas_mass_fraction(region, temperature, pressure)?;
        self.density(region, temperature, pressure, x_o_g)
    }

    fn saturated_viscosity<D: Evaluation>(
        &self,
        region: usize,
        temperature: D,
        pressure: D,
    ) -> PvtResult<D> {
        let x_o_g = self.saturated_oil_gas_mass_fraction(region, temperature, pressure)?;
        self.viscosity(region, temperature, pressure, x_o_g)
    }
}

/// A gas phase PVT model.
pub trait GasPvtModel {
    fn num_regions(&self) -> usize;

    fn set_num_regions(&mut self, num_regions: usize);

    fn set_region_reference(&mut self, region: usize, reference: RegionReference);

    /// Finish initialization against the oil selector of the same fluid system.
    fn init_end(&mut self, oil: &OilPvtMultiplexer) -> PvtResult<()>;

    /// Formation volume factor at the given mass fraction of vaporized oil.
    fn formation_volume_factor<D: Evaluation>(
        &self,
        region: usize,
        temperature: D,
        pressure: D,
        x_g_o: D,
    ) -> PvtResult<D>;

    fn density<D: Evaluation>(
        &self,
        region: usize,
        temperature: D,
        pressure: D,
        x_g_o: D,
    ) -> PvtResult<D>;

    fn viscosity<D: Evaluation>(
        &self,
        region: usize,
        temperature: D,
        pressure: D,
        x_g_o: D,
    ) -> PvtResult<D>;

    /// Rv of oil-saturated gas.
    fn oil_vaporization_factor<D: Evaluation>(
        &self,
        region: usize,
        temperature: D,
        pressure: D,
    ) -> PvtResult<D>;

    fn saturated_gas_oil_mass_fraction<D: Evaluation>(
        &self,
        region: usize,
        temperature: D,
        pressure: D,
    ) -> PvtResult<D>;

    fn saturated_gas_oil_mole_fraction<D: Evaluation>(
        &self,
        region: usize,
        temperature: D,
        pressure: D,
    ) -> PvtResult<D>;

    /// Pressure at which gas with oil mass fraction `x_g_o` is saturated.
    fn saturation_pressure<D: Evaluation>(
        &self,
        region: usize,
        temperature: D,
        x_g_o: D,
    ) -> PvtResult<D>;

    fn fugacity_coefficient_gas<D: Evaluation>(
        &self,
        region: usize,
        temperature: D,
        pressure: D,
    ) -> PvtResult<D>;

    fn fugacity_coefficient_oil<D: Evaluation>(
        &self,
        oil: &OilPvtMultiplexer,
        region: usize,
        temperature: D,
        pressure: D,
    ) -> PvtResult<D>;

    fn fugacity_coefficient_water<D: Evaluation>(
        &self,
        oil: &OilPvtMultiplexer,
        region: usize,
        temperature: D,
        pressure: D,
    ) -> PvtResult<D>;

    fn saturated_formation_volume_factor<D: Evaluation>(
        &self,
        region: usize,
        temperature: D,
        pressure: D,
    ) -> PvtResult<D> {
        let x_g_o = self.saturated_gas_oil_mass_fraction(region, temperature, pressure)?;
        self.formation_volume_factor(region, temperature, pressure, x_g_o)
    }

    fn saturated_density<D: Evaluation>(
        &self,
        region: usize,
        temperature: D,
        pressure: D,
    ) -> PvtResult<D> {
        let x_g_o = self.saturated_gas_oil_mass_fraction(region, temperature, pressure)?;
        self.density(region, temperature, pressure, x_g_o)
    }

    fn saturated_viscosity<D: Evaluation>(
        &self,
        region: usize,
        temperature: D,
        pressure: D,
    ) -> PvtResult<D> {
        let x_g_o = self.saturated_gas_oil_mass_fraction(region, temperature, pressure)?;
        self.viscosity(region, temperature, pressure, x_g_o)
    }
}
