use crate::error::{PvtError, PvtResult};
use crate::region::RegionReference;
use crate::water::ConstantCompressibilityWaterPvt;
use bo_core::Evaluation;
use tracing::debug;

/// Water PVT approaches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WaterPvtApproach {
    NoPvt,
    ConstantCompressibility,
}

/// The active water PVT model.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum WaterPvtMultiplexer {
    #[default]
    NoPvt,
    ConstantCompressibility(ConstantCompressibilityWaterPvt),
}

macro_rules! dispatch {
    ($self:expr, $pvt:ident => $call:expr) => {
        match $self {
            WaterPvtMultiplexer::ConstantCompressibility($pvt) => $call,
            WaterPvtMultiplexer::NoPvt => Err(PvtError::Unconfigured { phase: "water" }),
        }
    };
}

impl WaterPvtMultiplexer {
    pub fn approach(&self) -> WaterPvtApproach {
        match self {
            WaterPvtMultiplexer::NoPvt => WaterPvtApproach::NoPvt,
            WaterPvtMultiplexer::ConstantCompressibility(_) => {
                WaterPvtApproach::ConstantCompressibility
            }
        }
    }

    pub fn set_approach(&mut self, approach: WaterPvtApproach) -> PvtResult<()> {
        let num_regions = self.num_regions();
        *self = match approach {
            WaterPvtApproach::ConstantCompressibility => {
                ConstantCompressibilityWaterPvt::new(num_regions).into()
            }
            WaterPvtApproach::NoPvt => {
                return Err(PvtError::NotSupported {
                    what: "selecting NoPvt as water PVT approach",
                });
            }
        };
        debug!(?approach, num_regions, "water PVT approach set");
        Ok(())
    }

    pub fn constant_compressibility(&self) -> Option<&ConstantCompressibilityWaterPvt> {
        match self {
            WaterPvtMultiplexer::ConstantCompressibility(pvt) => Some(pvt),
            WaterPvtMultiplexer::NoPvt => None,
        }
    }

    pub fn constant_compressibility_mut(&mut self) -> Option<&mut ConstantCompressibilityWaterPvt> {
        match self {
            WaterPvtMultiplexer::ConstantCompressibility(pvt) => Some(pvt),
            WaterPvtMultiplexer::NoPvt => None,
        }
    }

    pub fn num_regions(&self) -> usize {
        match self {
            WaterPvtMultiplexer::ConstantCompressibility(pvt) => pvt.num_regions(),
            WaterPvtMultiplexer::NoPvt => 0,
        }
    }

    pub fn set_num_regions(&mut self, num_regions: usize) {
        if let WaterPvtMultiplexer::ConstantCompressibility(pvt) = self {
            pvt.set_num_regions(num_regions);
        }
    }

    pub fn set_region_reference(&mut self, region: usize, reference: RegionReference) {
        if let WaterPvtMultiplexer::ConstantCompressibility(pvt) = self {
            pvt.set_region_reference(region, reference);
        }
    }

    pub fn init_end(&mut self) -> PvtResult<()> {
        dispatch!(self, pvt => pvt.init_end())
    }

    pub fn formation_volume_factor<D: Evaluation>(
        &self,
        region: usize,
        temperature: D,
        pressure: D,
    ) -> PvtResult<D> {
        dispatch!(self, pvt => pvt.formation_volume_factor(region, temperature, pressure))
    }

    pub fn density<D: Evaluation>(&self, region: usize, temperature: D, pressure: D) -> PvtResult<D> {
        dispatch!(self, pvt => pvt.density(region, temperature, pressure))
    }

    pub fn viscosity<D: Evaluation>(&self, region: usize, temperature: D, pressure: D) -> PvtResult<D> {
        dispatch!(self, pvt => pvt.viscosity(region, temperature, pressure))
    }

    pub fn fugacity_coefficient_water<D: Evaluation>(
        &self,
        region: usize,
        temperature: D,
        pressure: D,
    ) -> PvtResult<D> {
        dispatch!(self, pvt => pvt.fugacity_coefficient_water(region, temperature, pressure))
    }

    pub fn fugacity_coefficient_oil<D: Evaluation>(
        &self,
        region: usize,
        temperature: D,
        pressure: D,
    ) -> PvtResult<D> {
        dispatch!(self, pvt => pvt.fugacity_coefficient_oil(region, temperature, pressure))
    }

    pub fn fugacity_coefficient_gas<D: Evaluation>(
        &self,
        region: usize,
        temperature: D,
        pressure: D,
    ) -> PvtResult<D> {
        dispatch!(self, pvt => pvt.fugacity_coefficient_gas(region, temperature, pressure))
    }
}

impl From<ConstantCompressibilityWaterPvt> for WaterPvtMultiplexer {
    fn from(pvt: ConstantCompressibilityWaterPvt) -> Self {
        WaterPvtMultiplexer::ConstantCompressibility(pvt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unconfigured_selector_is_a_logic_error() {
        let water = WaterPvtMultiplexer::default();
        let err = water.density::<f64>(0, 300.0, 1e7).unwrap_err();
        assert_eq!(err, PvtError::Unconfigured { phase: "water" });
    }

    #[test]
    fn set_approach() {
        let mut water = WaterPvtMultiplexer::default();
        water
            .set_approach(WaterPvtApproach::ConstantCompressibility)
            .unwrap();
        assert_eq!(water.approach(), WaterPvtApproach::ConstantCompressibility);
        assert!(water.constant_compressibility_mut().is_some());
    }
}
