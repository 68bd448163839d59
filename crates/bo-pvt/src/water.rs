//! Water with constant compressibility.

use crate::compressibility::ConstantCompressibility;
use crate::error::{PvtError, PvtResult, check_region};
use crate::fugacity::{LOW_AFFINITY_FACTOR, WATER_PSEUDO_VAPOR_PRESSURE_PA, pseudo_vapor_coefficient};
use crate::region::RegionReference;
use bo_core::Evaluation;

#[derive(Debug, Clone, Default, PartialEq)]
struct WaterRegion {
    reference: RegionReference,
    parameters: Option<ConstantCompressibility>,
}

/// Water following the closed-form constant-compressibility law.
/// Density is `ρw_ref / Bw`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConstantCompressibilityWaterPvt {
    regions: Vec<WaterRegion>,
}

impl ConstantCompressibilityWaterPvt {
    pub fn new(num_regions: usize) -> Self {
        Self {
            regions: vec![WaterRegion::default(); num_regions],
        }
    }

    pub fn num_regions(&self) -> usize {
        self.regions.len()
    }

    pub fn set_num_regions(&mut self, num_regions: usize) {
        self.regions.resize(num_regions, WaterRegion::default());
    }

    pub fn set_region_reference(&mut self, region: usize, reference: RegionReference) {
        debug_assert!(region < self.regions.len(), "region {region} out of bounds");
        self.regions[region].reference = reference;
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
                what: "water compressibility",
                region,
            })
    }

    fn region(&self, region: usize) -> PvtResult<&WaterRegion> {
        self.regions.get(region).ok_or(PvtError::InvalidRegion {
            region,
            num_regions: self.regions.len(),
        })
    }

    pub fn init_end(&mut self) -> PvtResult<()> {
        for (region, data) in self.regions.iter().enumerate() {
            data.reference.validate()?;
            self.parameters(region)?;
        }
        Ok(())
    }

    pub fn formation_volume_factor<D: Evaluation>(
        &self,
        region: usize,
        _temperature: D,
        pressure: D,
    ) -> PvtResult<D> {
        Ok(self.parameters(region)?.formation_volume_factor(pressure))
    }

    pub fn density<D: Evaluation>(&self, region: usize, temperature: D, pressure: D) -> PvtResult<D> {
        let bw = self.formation_volume_factor(region, temperature, pressure)?;
        Ok(bw.recip() * self.region(region)?.reference.water_density)
    }

    pub fn viscosity<D: Evaluation>(
        &self,
        region: usize,
        _temperature: D,
        pressure: D,
    ) -> PvtResult<D> {
        Ok(self.parameters(region)?.viscosity(pressure))
    }

    pub fn fugacity_coefficient_water<D: Evaluation>(
        &self,
        _region: usize,
        _temperature: D,
        pressure: D,
    ) -> PvtResult<D> {
        Ok(pseudo_vapor_coefficient(WATER_PSEUDO_VAPOR_PRESSURE_PA, pressure))
    }

    pub fn fugacity_coefficient_oil<D: Evaluation>(
        &self,
        region: usize,
        temperature: D,
        pressure: D,
    ) -> PvtResult<D> {
        Ok(self.fugacity_coefficient_water(region, temperature, pressure)? * LOW_AFFINITY_FACTOR)
    }

    pub fn fugacity_coefficient_gas<D: Evaluation>(
        &self,
        region: usize,
        temperature: D,
        pressure: D,
    ) -> PvtResult<D> {
        Ok(self.fugacity_coefficient_water(region, temperature, pressure)? * LOW_AFFINITY_FACTOR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use bo_core::units::kg_per_m3;
    use proptest::prelude::*;

    fn water() -> ConstantCompressibilityWaterPvt {
        let mut water = ConstantCompressibilityWaterPvt::new(1);
        water
            .set_parameters(0, ConstantCompressibility::new(2.5e7, 1.03, 4.5e-10, 5e-4, 0.0))
            .unwrap();
        let reference =
            RegionReference::from_densities(kg_per_m3(800.0), kg_per_m3(1025.0), kg_per_m3(1.0))
                .unwrap();
        water.set_region_reference(0, reference);
        water.init_end().unwrap();
        water
    }

    #[test]
    fn reference_state() {
        let water = water();
        let rho: f64 = water.density(0, 330.0, 2.5e7).unwrap();
        assert_relative_eq!(rho, 1025.0 / 1.03, max_relative = 1e-12);
        let mu: f64 = water.viscosity(0, 330.0, 1e7).unwrap();
        assert_relative_eq!(mu, 5e-4, max_relative = 1e-12);
    }

    #[test]
    fn fugacity_coefficients() {
        let water = water();
        let phi_w: f64 = water.fugacity_coefficient_water(0, 330.0, 1e6).unwrap();
        let phi_o: f64 = water.fugacity_coefficient_oil(0, 330.0, 1e6).unwrap();
        let phi_g: f64 = water.fugacity_coefficient_gas(0, 330.0, 1e6).unwrap();
        assert_relative_eq!(phi_w, 3.169e-3, max_relative = 1e-12);
        assert_relative_eq!(phi_o, 3.169e5, max_relative = 1e-12);
        assert_relative_eq!(phi_g, 3.169e5, max_relative = 1e-12);
    }

    #[test]
    fn missing_parameters() {
        let water = ConstantCompressibilityWaterPvt::new(1);
        let err = water.density::<f64>(0, 330.0, 1e7).unwrap_err();
        assert!(matches!(err, PvtError::MissingTable { .. }));
    }

    #[test]
    fn unknown_region_is_not_a_missing_table() {
        let water = water();
        let err = water.density::<f64>(2, 330.0, 1e7).unwrap_err();
        assert!(matches!(err, PvtError::InvalidRegion { region: 2, .. }));
    }

    proptest! {
        #[test]
        fn density_is_positive_and_increasing(p in 1e5f64..6e7, dp in 1e3f64..1e6) {
            let water = water();
            let rho: f64 = water.density(0, 330.0, p).unwrap();
            let rho_up: f64 = water.density(0, 330.0, p + dp).unwrap();
            prop_assert!(rho > 0.0);
            prop_assert!(rho_up > rho);
        }
    }
}
