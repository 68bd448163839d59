//! Oil with constant compressibility and viscosibility.

use crate::compressibility::ConstantCompressibility;
use crate::error::{PvtError, PvtResult, check_region};
use crate::multiplexer::GasPvtMultiplexer;
use crate::oil::{excluded_component_coefficient, oil_component_coefficient};
use crate::region::RegionReference;
use crate::traits::OilPvtModel;
use bo_core::Evaluation;

#[derive(Debug, Clone, Default, PartialEq)]
struct CompressibleOilRegion {
    reference: RegionReference,
    parameters: Option<ConstantCompressibility>,
}

/// Gas-free oil following the closed-form constant-compressibility law.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConstantCompressibilityOilPvt {
    regions: Vec<CompressibleOilRegion>,
}

impl ConstantCompressibilityOilPvt {
    pub fn new(num_regions: usize) -> Self {
        Self {
            regions: vec![CompressibleOilRegion::default(); num_regions],
        }
    }

    pub fn set_parameters(
        &mut self,
        region: usize,
        parameters: ConstantCompressibility,
    ) -> PvtResult<()> {
        check_region(region, self.regions.len())?;
        parameters.validate()?;
        self.regions[region].parameters = Some(parameters);
        Ok(())
    }

    pub fn parameters(&self, region: usize) -> PvtResult<&ConstantCompressibility> {
        self.region(region)?
            .parameters
            .as_ref()
            .ok_or(PvtError::MissingTable {
                what: "oil compressibility",
                region,
            })
    }

    fn region(&self, region: usize) -> PvtResult<&CompressibleOilRegion> {
        self.regions.get(region).ok_or(PvtError::InvalidRegion {
            region,
            num_regions: self.regions.len(),
        })
    }
}

impl OilPvtModel for ConstantCompressibilityOilPvt {
    fn num_regions(&self) -> usize {
        self.regions.len()
    }

    fn set_num_regions(&mut self, num_regions: usize) {
        self.regions
            .resize(num_regions, CompressibleOilRegion::default());
    }

    fn set_region_reference(&mut self, region: usize, reference: RegionReference) {
        debug_assert!(region < self.regions.len(), "region {region} out of bounds");
        self.regions[region].reference = reference;
    }

    fn init_end(&mut self, _gas: &GasPvtMultiplexer) -> PvtResult<()> {
        for (region, data) in self.regions.iter().enumerate() {
            data.reference.validate()?;
            self.parameters(region)?;
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
        Ok(self.parameters(region)?.formation_volume_factor(pressure))
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
        Ok(self.parameters(region)?.viscosity(pressure))
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
            what: "saturation pressure of constant-compressibility oil",
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
