use crate::error::{PvtError, PvtResult};
use crate::multiplexer::GasPvtMultiplexer;
use crate::oil::{ConstantCompressibilityOilPvt, DeadOilPvt, LiveOilPvt};
use crate::region::RegionReference;
use crate::traits::OilPvtModel;
use bo_core::Evaluation;
use tracing::debug;

/// Oil PVT approaches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OilPvtApproach {
    NoPvt,
    LiveOil,
    DeadOil,
    ConstantCompressibility,
}

/// The active oil PVT model.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum OilPvtMultiplexer {
    #[default]
    NoPvt,
    LiveOil(LiveOilPvt),
    DeadOil(DeadOilPvt),
    ConstantCompressibility(ConstantCompressibilityOilPvt),
}

macro_rules! dispatch {
    ($self:expr, $pvt:ident => $call:expr) => {
        match $self {
            OilPvtMultiplexer::LiveOil($pvt) => $call,
            OilPvtMultiplexer::DeadOil($pvt) => $call,
            OilPvtMultiplexer::ConstantCompressibility($pvt) => $call,
            OilPvtMultiplexer::NoPvt => Err(PvtError::Unconfigured { phase: "oil" }),
        }
    };
}

impl OilPvtMultiplexer {
    pub fn approach(&self) -> OilPvtApproach {
        match self {
            OilPvtMultiplexer::NoPvt => OilPvtApproach::NoPvt,
            OilPvtMultiplexer::LiveOil(_) => OilPvtApproach::LiveOil,
            OilPvtMultiplexer::DeadOil(_) => OilPvtApproach::DeadOil,
            OilPvtMultiplexer::ConstantCompressibility(_) => {
                OilPvtApproach::ConstantCompressibility
            }
        }
    }

    /// Replace the active model with an empty model of `approach`, keeping
    /// the number of regions.
    pub fn set_approach(&mut self, approach: OilPvtApproach) -> PvtResult<()> {
        let num_regions = self.num_regions();
        *self = match approach {
            OilPvtApproach::LiveOil => LiveOilPvt::new(num_regions).into(),
            OilPvtApproach::DeadOil => DeadOilPvt::new(num_regions).into(),
            OilPvtApproach::ConstantCompressibility => {
                ConstantCompressibilityOilPvt::new(num_regions).into()
            }
            OilPvtApproach::NoPvt => {
                return Err(PvtError::NotSupported {
                    what: "selecting NoPvt as oil PVT approach",
                });
            }
        };
        debug!(?approach, num_regions, "oil PVT approach set");
        Ok(())
    }

    pub fn live_oil(&self) -> Option<&LiveOilPvt> {
        match self {
            OilPvtMultiplexer::LiveOil(pvt) => Some(pvt),
            _ => None,
        }
    }

    pub fn live_oil_mut(&mut self) -> Option<&mut LiveOilPvt> {
        match self {
            OilPvtMultiplexer::LiveOil(pvt) => Some(pvt),
            _ => None,
        }
    }

    pub fn dead_oil(&self) -> Option<&DeadOilPvt> {
        match self {
            OilPvtMultiplexer::DeadOil(pvt) => Some(pvt),
            _ => None,
        }
    }

    pub fn dead_oil_mut(&mut self) -> Option<&mut DeadOilPvt> {
        match self {
            OilPvtMultiplexer::DeadOil(pvt) => Some(pvt),
            _ => None,
        }
    }

    pub fn constant_compressibility(&self) -> Option<&ConstantCompressibilityOilPvt> {
        match self {
            OilPvtMultiplexer::ConstantCompressibility(pvt) => Some(pvt),
            _ => None,
        }
    }

    pub fn constant_compressibility_mut(&mut self) -> Option<&mut ConstantCompressibilityOilPvt> {
        match self {
            OilPvtMultiplexer::ConstantCompressibility(pvt) => Some(pvt),
            _ => None,
        }
    }
}

impl From<LiveOilPvt> for OilPvtMultiplexer {
    fn from(pvt: LiveOilPvt) -> Self {
        OilPvtMultiplexer::LiveOil(pvt)
    }
}

impl From<DeadOilPvt> for OilPvtMultiplexer {
    fn from(pvt: DeadOilPvt) -> Self {
        OilPvtMultiplexer::DeadOil(pvt)
    }
}

impl From<ConstantCompressibilityOilPvt> for OilPvtMultiplexer {
    fn from(pvt: ConstantCompressibilityOilPvt) -> Self {
        OilPvtMultiplexer::ConstantCompressibility(pvt)
    }
}

impl OilPvtModel for OilPvtMultiplexer {
    fn num_regions(&self) -> usize {
        match self {
            OilPvtMultiplexer::LiveOil(pvt) => pvt.num_regions(),
            OilPvtMultiplexer::DeadOil(pvt) => pvt.num_regions(),
            OilPvtMultiplexer::ConstantCompressibility(pvt) => pvt.num_regions(),
            OilPvtMultiplexer::NoPvt => 0,
        }
    }

    fn set_num_regions(&mut self, num_regions: usize) {
        match self {
            OilPvtMultiplexer::LiveOil(pvt) => pvt.set_num_regions(num_regions),
            OilPvtMultiplexer::DeadOil(pvt) => pvt.set_num_regions(num_regions),
            OilPvtMultiplexer::ConstantCompressibility(pvt) => pvt.set_num_regions(num_regions),
            OilPvtMultiplexer::NoPvt => {}
        }
    }

    fn set_region_reference(&mut self, region: usize, reference: RegionReference) {
        match self {
            OilPvtMultiplexer::LiveOil(pvt) => pvt.set_region_reference(region, reference),
            OilPvtMultiplexer::DeadOil(pvt) => pvt.set_region_reference(region, reference),
            OilPvtMultiplexer::ConstantCompressibility(pvt) => {
                pvt.set_region_reference(region, reference)
            }
            OilPvtMultiplexer::NoPvt => {}
        }
    }

    fn init_end(&mut self, gas: &GasPvtMultiplexer) -> PvtResult<()> {
        dispatch!(self, pvt => pvt.init_end(gas))
    }

    fn formation_volume_factor<D: Evaluation>(
        &self,
        region: usize,
        temperature: D,
        pressure: D,
        x_o_g: D,
    ) -> PvtResult<D> {
        dispatch!(self, pvt => pvt.formation_volume_factor(region, temperature, pressure, x_o_g))
    }

    fn density<D: Evaluation>(
        &self,
        region: usize,
        temperature: D,
        pressure: D,
        x_o_g: D,
    ) -> PvtResult<D> {
        dispatch!(self, pvt => pvt.density(region, temperature, pressure, x_o_g))
    }

    fn viscosity<D: Evaluation>(
        &self,
        region: usize,
        temperature: D,
        pressure: D,
        x_o_g: D,
    ) -> PvtResult<D> {
        dispatch!(self, pvt => pvt.viscosity(region, temperature, pressure, x_o_g))
    }

    fn saturated_gas_dissolution_factor<D: Evaluation>(
        &self,
        region: usize,
        temperature: D,
        pressure: D,
    ) -> PvtResult<D> {
        dispatch!(self, pvt => pvt.saturated_gas_dissolution_factor(region, temperature, pressure))
    }

    fn saturated_oil_gas_mass_fraction<D: Evaluation>(
        &self,
        region: usize,
        temperature: D,
        pressure: D,
    ) -> PvtResult<D> {
        dispatch!(self, pvt => pvt.saturated_oil_gas_mass_fraction(region, temperature, pressure))
    }

    fn saturated_oil_gas_mole_fraction<D: Evaluation>(
        &self,
        region: usize,
        temperature: D,
        pressure: D,
    ) -> PvtResult<D> {
        dispatch!(self, pvt => pvt.saturated_oil_gas_mole_fraction(region, temperature, pressure))
    }

    fn saturation_pressure<D: Evaluation>(
        &self,
        region: usize,
        temperature: D,
        x_o_g: D,
    ) -> PvtResult<D> {
        dispatch!(self, pvt => pvt.saturation_pressure(region, temperature, x_o_g))
    }

    fn fugacity_coefficient_oil<D: Evaluation>(
        &self,
        region: usize,
        temperature: D,
        pressure: D,
    ) -> PvtResult<D> {
        dispatch!(self, pvt => pvt.fugacity_coefficient_oil(region, temperature, pressure))
    }

    fn fugacity_coefficient_water<D: Evaluation>(
        &self,
        region: usize,
        temperature: D,
        pressure: D,
    ) -> PvtResult<D> {
        dispatch!(self, pvt => pvt.fugacity_coefficient_water(region, temperature, pressure))
    }

    fn fugacity_coefficient_gas<D: Evaluation>(
        &self,
        gas: &GasPvtMultiplexer,
        region: usize,
        temperature: D,
        pressure: D,
    ) -> PvtResult<D> {
        dispatch!(self, pvt => pvt.fugacity_coefficient_gas(gas, region, temperature, pressure))
    }

    fn saturated_formation_volume_factor<D: Evaluation>(
        &self,
        region: usize,
        temperature: D,
        pressure: D,
    ) -> PvtResult<D> {
        dispatch!(self, pvt => pvt.saturated_formation_volume_factor(region, temperature, pressure))
    }

    fn saturated_density<D: Evaluation>(
        &self,
        region: usize,
        temperature: D,
        pressure: D,
    ) -> PvtResult<D> {
        dispatch!(self, pvt => pvt.saturated_density(region, temperature, pressure))
    }

    fn saturated_viscosity<D: Evaluation>(
        &self,
        region: usize,
        temperature: D,
        pressure: D,
    ) -> PvtResult<D> {
        dispatch!(self, pvt => pvt.saturated_viscosity(region, temperature, pressure))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bo_tables::Interpolation;

    #[test]
    fn unconfigured_selector_is_a_logic_error() {
        let oil = OilPvtMultiplexer::default();
        assert_eq!(oil.approach(), OilPvtApproach::NoPvt);
        let err = oil.density::<f64>(0, 300.0, 1e7, 0.0).unwrap_err();
        assert_eq!(err, PvtError::Unconfigured { phase: "oil" });
        assert!(err.class().is_logic());
    }

    #[test]
    fn set_approach_replaces_model_and_keeps_regions() {
        let mut oil = OilPvtMultiplexer::from(DeadOilPvt::new(3));
        oil.dead_oil_mut()
            .unwrap()
            .set_table(0, &[(1e5, 1.0, 1e-3), (1e7, 1.1, 1e-3)], Interpolation::Linear)
            .unwrap();

        oil.set_approach(OilPvtApproach::LiveOil).unwrap();
        assert_eq!(oil.approach(), OilPvtApproach::LiveOil);
        assert_eq!(oil.num_regions(), 3);
        assert!(oil.dead_oil().is_none());
        assert!(oil.live_oil().is_some());

        oil.set_approach(OilPvtApproach::DeadOil).unwrap();
        // the previous dead oil data is gone
        assert_eq!(oil.dead_oil(), Some(&DeadOilPvt::new(3)));
    }

    #[test]
    fn selecting_no_pvt_is_rejected() {
        let mut oil = OilPvtMultiplexer::default();
        let err = oil.set_approach(OilPvtApproach::NoPvt).unwrap_err();
        assert!(err.class().is_logic());
    }
}
