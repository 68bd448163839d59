use crate::error::{PvtError, PvtResult};
use crate::gas::{DryGasPvt, WetGasPvt};
use crate::multiplexer::OilPvtMultiplexer;
use crate::region::RegionReference;
use crate::traits::GasPvtModel;
use bo_core::Evaluation;
use tracing::debug;

/// Gas PVT approaches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GasPvtApproach {
    NoPvt,
    DryGas,
    WetGas,
}

/// The active gas PVT model.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum GasPvtMultiplexer {
    #[default]
    NoPvt,
    DryGas(DryGasPvt),
    WetGas(WetGasPvt),
}

macro_rules! dispatch {
    ($self:expr, $pvt:ident => $call:expr) => {
        match $self {
            GasPvtMultiplexer::DryGas($pvt) => $call,
            GasPvtMultiplexer::WetGas($pvt) => $call,
            GasPvtMultiplexer::NoPvt => Err(PvtError::Unconfigured { phase: "gas" }),
        }
    };
}

impl GasPvtMultiplexer {
    pub fn approach(&self) -> GasPvtApproach {
        match self {
            GasPvtMultiplexer::NoPvt => GasPvtApproach::NoPvt,
            GasPvtMultiplexer::DryGas(_) => GasPvtApproach::DryGas,
            GasPvtMultiplexer::WetGas(_) => GasPvtApproach::WetGas,
        }
    }

    /// Replace the active model with an empty model of `approach`, keeping
    /// the number of regions.
    pub fn set_approach(&mut self, approach: GasPvtApproach) -> PvtResult<()> {
        let num_regions = self.num_regions();
        *self = match approach {
            GasPvtApproach::DryGas => DryGasPvt::new(num_regions).into(),
            GasPvtApproach::WetGas => WetGasPvt::new(num_regions).into(),
            GasPvtApproach::NoPvt => {
                return Err(PvtError::NotSupported {
                    what: "selecting NoPvt as gas PVT approach",
                });
            }
        };
        debug!(?approach, num_regions, "gas PVT approach set");
        Ok(())
    }

    pub fn dry_gas(&self) -> Option<&DryGasPvt> {
        match self {
            GasPvtMultiplexer::DryGas(pvt) => Some(pvt),
            _ => None,
        }
    }

    pub fn dry_gas_mut(&mut self) -> Option<&mut DryGasPvt> {
        match self {
            GasPvtMultiplexer::DryGas(pvt) => Some(pvt),
            _ => None,
        }
    }

    pub fn wet_gas(&self) -> Option<&WetGasPvt> {
        match self {
            GasPvtMultiplexer::WetGas(pvt) => Some(pvt),
            _ => None,
        }
    }

    pub fn wet_gas_mut(&mut self) -> Option<&mut WetGasPvt> {
        match self {
            GasPvtMultiplexer::WetGas(pvt) => Some(pvt),
            _ => None,
        }
    }
}

impl From<DryGasPvt> for GasPvtMultiplexer {
    fn from(pvt: DryGasPvt) -> Self {
        GasPvtMultiplexer::DryGas(pvt)
    }
}

impl From<WetGasPvt> for GasPvtMultiplexer {
    fn from(pvt: WetGasPvt) -> Self {
        GasPvtMultiplexer::WetGas(pvt)
    }
}

impl GasPvtModel for GasPvtMultiplexer {
    fn num_regions(&self) -> usize {
        match self {
            GasPvtMultiplexer::DryGas(pvt) => pvt.num_regions(),
            GasPvtMultiplexer::WetGas(pvt) => pvt.num_regions(),
            GasPvtMultiplexer::NoPvt => 0,
        }
    }

    fn set_num_regions(&mut self, num_regions: usize) {
        match self {
            GasPvtMultiplexer::DryGas(pvt) => pvt.set_num_regions(num_regions),
            GasPvtMultiplexer::WetGas(pvt) => pvt.set_num_regions(num_regions),
            GasPvtMultiplexer::NoPvt => {}
        }
    }

    fn set_region_reference(&mut self, region: usize, reference: RegionReference) {
        match self {
            GasPvtMultiplexer::DryGas(pvt) => pvt.set_region_reference(region, reference),
            GasPvtMultiplexer::WetGas(pvt) => pvt.set_region_reference(region, reference),
            GasPvtMultiplexer::NoPvt => {}
        }
    }

    fn init_end(&mut self, oil: &OilPvtMultiplexer) -> PvtResult<()> {
        dispatch!(self, pvt => pvt.init_end(oil))
    }

    fn formation_volume_factor<D: Evaluation>(
        &self,
        region: usize,
        temperature: D,
        pressure: D,
        x_g_o: D,
    ) -> PvtResult<D> {
        dispatch!(self, pvt => pvt.formation_volume_factor(region, temperature, pressure, x_g_o))
    }

    fn density<D: Evaluation>(
        &self,
        region: usize,
        temperature: D,
        pressure: D,
        x_g_o: D,
    ) -> PvtResult<D> {
        dispatch!(self, pvt => pvt.density(region, temperature, pressure, x_g_o))
    }

    fn viscosity<D: Evaluation>(
        &self,
        region: usize,
        temperature: D,
        pressure: D,
        x_g_o: D,
    ) -> PvtResult<D> {
        dispatch!(self, pvt => pvt.viscosity(region, temperature, pressure, x_g_o))
    }

    fn oil_vaporization_factor<D: Evaluation>(
        &self,
        region: usize,
        temperature: D,
        pressure: D,
    ) -> PvtResult<D> {
        dispatch!(self, pvt => pvt.oil_vaporization_factor(region, temperature, pressure))
    }

    fn saturated_gas_oil_mass_fraction<D: Evaluation>(
        &self,
        region: usize,
        temperature: D,
        pressure: D,
    ) -> PvtResult<D> {
        dispatch!(self, pvt => pvt.saturated_gas_oil_mass_fraction(region, temperature, pressure))
    }

    fn saturated_gas_oil_mole_fraction<D: Evaluation>(
        &self,
        region: usize,
        temperature: D,
        pressure: D,
    ) -> PvtResult<D> {
        dispatch!(self, pvt => pvt.saturated_gas_oil_mole_fraction(region, temperature, pressure))
    }

    fn saturation_pressure<D: Evaluation>(
        &self,
        region: usize,
        temperature: D,
        x_g_o: D,
    ) -> PvtResult<D> {
        dispatch!(self, pvt => pvt.saturation_pressure(region, temperature, x_g_o))
    }

    fn fugacity_coefficient_gas<D: Evaluation>(
        &self,
        region: usize,
        temperature: D,
        pressure: D,
    ) -> PvtResult<D> {
        dispatch!(self, pvt => pvt.fugacity_coefficient_gas(region, temperature, pressure))
    }

    fn fugacity_coefficient_oil<D: Evaluation>(
        &self,
        oil: &OilPvtMultiplexer,
        region: usize,
        temperature: D,
        pressure: D,
    ) -> PvtResult<D> {
        dispatch!(self, pvt => pvt.fugacity_coefficient_oil(oil, region, temperature, pressure))
    }

    fn fugacity_coefficient_water<D: Evaluation>(
        &self,
        oil: &OilPvtMultiplexer,
        region: usize,
        temperature: D,
        pressure: D,
    ) -> PvtResult<D> {
        dispatch!(self, pvt => pvt.fugacity_coefficient_water(oil, region, temperature, pressure))
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
