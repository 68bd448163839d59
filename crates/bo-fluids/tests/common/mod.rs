#![allow(dead_code)]

use bo_core::units::kg_per_m3;
use bo_core::{Component, Evaluation, Phase, one_minus};
use bo_fluids::{BlackOilFluidSystem, FluidState};
use bo_pvt::{
    ConstantCompressibility, ConstantCompressibilityWaterPvt, DeadOilPvt, DryGasPvt, LiveOilPvt,
    WetGasPvt,
};
use bo_tables::{Interpolation, PvtRecord, PvtSample};

pub const T: f64 = 350.0;

/// Uniform pressure and temperature; dissolved fractions set per phase.
#[derive(Debug, Clone, Copy)]
pub struct TestState<D> {
    pub temperature: D,
    pub pressure: D,
    pub x_o_g: D,
    pub x_g_o: D,
}

impl<D: Evaluation> TestState<D> {
    pub fn new(temperature: D, pressure: D) -> Self {
        Self {
            temperature,
            pressure,
            x_o_g: D::zero(),
            x_g_o: D::zero(),
        }
    }

    pub fn with_oil_gas_fraction(mut self, x_o_g: D) -> Self {
        self.x_o_g = x_o_g;
        self
    }

    pub fn with_gas_oil_fraction(mut self, x_g_o: D) -> Self {
        self.x_g_o = x_g_o;
        self
    }
}

impl<D: Evaluation> FluidState<D> for TestState<D> {
    fn temperature(&self, _phase: Phase) -> D {
        self.temperature
    }

    fn pressure(&self, _phase: Phase) -> D {
        self.pressure
    }

    fn mass_fraction(&self, phase: Phase, component: Component) -> D {
        match (phase, component) {
            (Phase::Oil, Component::Gas) => self.x_o_g,
            (Phase::Oil, Component::Oil) => one_minus(self.x_o_g),
            (Phase::Gas, Component::Oil) => self.x_g_o,
            (Phase::Gas, Component::Gas) => one_minus(self.x_g_o),
            (Phase::Water, Component::Water) => D::one(),
            _ => D::zero(),
        }
    }
}

pub fn water() -> ConstantCompressibilityWaterPvt {
    let mut water = ConstantCompressibilityWaterPvt::new(1);
    water
        .set_parameters(0, ConstantCompressibility::new(1e5, 1.01, 4.5e-10, 5e-4, 1e-10))
        .unwrap();
    water
}

pub fn dry_gas() -> DryGasPvt {
    let mut gas = DryGasPvt::new(1);
    gas.set_table(
        0,
        &[(1e5, 1.0, 1e-5), (1e7, 0.011, 1.6e-5), (4e7, 0.004, 3e-5)],
        Interpolation::Linear,
    )
    .unwrap();
    gas
}

/// Single region dead oil with `Bo` rising linearly from 1.0 to 1.2.
pub fn dead_oil_system() -> BlackOilFluidSystem {
    let mut oil = DeadOilPvt::new(1);
    oil.set_table(0, &[(1e5, 1.0, 1e-3), (2e7, 1.2, 1.5e-3)], Interpolation::Linear)
        .unwrap();

    let mut fs = BlackOilFluidSystem::init_begin(1);
    fs.set_enable_dissolved_gas(false);
    fs.set_reference_densities(kg_per_m3(800.0), kg_per_m3(1000.0), kg_per_m3(1.2), 0)
        .unwrap();
    fs.set_oil_pvt(oil);
    fs.set_gas_pvt(dry_gas());
    fs.set_water_pvt(water());
    fs.init_end().unwrap();
    fs
}

pub fn live_oil_records() -> Vec<PvtRecord> {
    vec![
        PvtRecord::new(10.0, vec![PvtSample::new(2e6, 1.10, 1.2e-3)]),
        PvtRecord::new(50.0, vec![PvtSample::new(1e7, 1.25, 0.9e-3)]),
        PvtRecord::new(
            90.0,
            vec![
                PvtSample::new(2e7, 1.40, 0.70e-3),
                PvtSample::new(3e7, 1.38, 0.75e-3),
                PvtSample::new(4e7, 1.36, 0.80e-3),
            ],
        ),
    ]
}

pub fn wet_gas_records() -> Vec<PvtRecord> {
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

/// Live oil with dry gas.
pub fn live_oil_system() -> BlackOilFluidSystem {
    let mut oil = LiveOilPvt::new(1);
    oil.set_table(0, live_oil_records()).unwrap();

    let mut fs = BlackOilFluidSystem::init_begin(1);
    fs.set_reference_densities(kg_per_m3(800.0), kg_per_m3(1000.0), kg_per_m3(0.9), 0)
        .unwrap();
    fs.set_oil_pvt(oil);
    fs.set_gas_pvt(dry_gas());
    fs.set_water_pvt(water());
    fs.init_end().unwrap();
    fs
}

/// Live oil with wet gas and both miscibility switches on.
pub fn volatile_system() -> BlackOilFluidSystem {
    let mut oil = LiveOilPvt::new(1);
    oil.set_table(0, live_oil_records()).unwrap();
    let mut gas = WetGasPvt::new(1);
    gas.set_table(0, wet_gas_records()).unwrap();

    let mut fs = BlackOilFluidSystem::init_begin(1);
    fs.set_enable_vaporized_oil(true);
    fs.set_reference_densities(kg_per_m3(800.0), kg_per_m3(1000.0), kg_per_m3(0.9), 0)
        .unwrap();
    fs.set_oil_pvt(oil);
    fs.set_gas_pvt(gas);
    fs.set_water_pvt(water());
    fs.init_end().unwrap();
    fs
}
