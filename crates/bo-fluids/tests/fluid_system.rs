mod common;

use approx::assert_relative_eq;
use bo_core::units::kg_per_m3;
use bo_core::{Component, Phase};
use bo_fluids::{BlackOilFluidSystem, ParameterCache};
use bo_pvt::{
    ConstantCompressibility, ConstantCompressibilityOilPvt, DeadOilPvt, OilPvtApproach,
    OilPvtMultiplexer, PvtError,
};
use bo_tables::Interpolation;
use common::*;
use num_dual::{Dual64, DualNum};
use proptest::prelude::*;

fn cache() -> ParameterCache {
    ParameterCache::default()
}

#[test]
fn dead_oil_density_follows_formation_volume_factor() {
    let fs = dead_oil_system();
    let density = |p: f64| -> f64 {
        fs.density(&TestState::new(300.0, p), &cache(), Phase::Oil)
            .unwrap()
    };
    assert_relative_eq!(density(1e5), 800.0, max_relative = 1e-12);
    assert_relative_eq!(density(2e7), 800.0 / 1.2, max_relative = 1e-12);
    // halfway between the two samples Bo is 1.1
    assert_relative_eq!(density(1.005e7), 800.0 / 1.1, max_relative = 1e-12);
}

#[test]
fn pass_through_matches_state_query() {
    let fs = dead_oil_system();
    let p = 7e6;
    let via_state: f64 = fs
        .formation_volume_factor(&TestState::new(T, p), &cache(), Phase::Oil)
        .unwrap();
    let direct: f64 = fs.oil_formation_volume_factor(0, T, p, 0.0).unwrap();
    assert_eq!(via_state, direct);

    let rho_w: f64 = fs
        .density(&TestState::new(T, p), &cache(), Phase::Water)
        .unwrap();
    assert_eq!(rho_w, fs.water_density(0, T, p).unwrap());
    let b_w: f64 = fs.water_formation_volume_factor(0, T, p).unwrap();
    assert_relative_eq!(rho_w, 1000.0 / b_w, max_relative = 1e-12);
}

#[test]
fn live_oil_saturated_node() {
    let fs = live_oil_system();
    let p = 1e7;
    let rs: f64 = fs.gas_dissolution_factor(0, T, p).unwrap();
    assert_relative_eq!(rs, 50.0, max_relative = 1e-12);

    let x_o_g: f64 = fs.saturated_oil_gas_mass_fraction(0, T, p).unwrap();
    let state = TestState::new(T, p).with_oil_gas_fraction(x_o_g);
    let rho: f64 = fs.density(&state, &cache(), Phase::Oil).unwrap();
    assert_relative_eq!(rho, (800.0 + 50.0 * 0.9) / 1.25, max_relative = 1e-9);
    let mu: f64 = fs.viscosity(&state, &cache(), Phase::Oil).unwrap();
    assert_relative_eq!(mu, 0.9e-3, max_relative = 1e-9);

    let saturated: f64 = fs.saturated_oil_density(0, T, p).unwrap();
    assert_relative_eq!(saturated, rho, max_relative = 1e-12);
    let b: f64 = fs.saturated_oil_formation_volume_factor(0, T, p).unwrap();
    assert_relative_eq!(b, 1.25, max_relative = 1e-9);
}

#[test]
fn saturated_mole_fraction_is_bounded_by_mass_fraction_ordering() {
    let fs = live_oil_system();
    let x_mass: f64 = fs.saturated_oil_gas_mass_fraction(0, T, 1.5e7).unwrap();
    let x_mole: f64 = fs.saturated_oil_gas_mole_fraction(0, T, 1.5e7).unwrap();
    // gas is much lighter than oil, so it is richer on a molar basis
    assert!(x_mole > x_mass);
    assert!(x_mole < 1.0);
}

#[test]
fn disabled_dissolved_gas_evaluates_dead_branch() {
    let mut fs = live_oil_system();
    fs.set_enable_dissolved_gas(false);
    fs.init_end().unwrap();
    assert!(!fs.enable_dissolved_gas());

    let p = 2.5e7;
    let state = TestState::new(T, p).with_oil_gas_fraction(0.05);
    let rho: f64 = fs.density(&state, &cache(), Phase::Oil).unwrap();
    let expected: f64 = fs.oil_density(0, T, p, 0.0).unwrap();
    assert_eq!(rho, expected);
}

#[test]
fn disabled_vaporized_oil_evaluates_dry_branch() {
    let fs = live_oil_system();
    assert!(!fs.enable_vaporized_oil());
    let p = 1e7;
    let state = TestState::new(T, p).with_gas_oil_fraction(0.3);
    let rho: f64 = fs.density(&state, &cache(), Phase::Gas).unwrap();
    let expected: f64 = fs.gas_density(0, T, p, 0.0).unwrap();
    assert_eq!(rho, expected);
    assert_relative_eq!(rho, 0.9 / 0.011, max_relative = 1e-12);
}

#[test]
fn oil_saturation_pressure_round_trip() {
    let fs = live_oil_system();
    for p in [3e6, 5e6, 1e7, 1.5e7, 1.9e7] {
        let x: f64 = fs.saturated_oil_gas_mass_fraction(0, T, p).unwrap();
        let p_sat: f64 = fs.oil_saturation_pressure(0, T, x).unwrap();
        assert_relative_eq!(p_sat, p, max_relative = 1e-8);
    }
}

#[test]
fn gas_saturation_pressure_round_trip() {
    let fs = volatile_system();
    for p in [6e6, 1e7, 2e7, 2.8e7] {
        let x: f64 = fs.saturated_gas_oil_mass_fraction(0, T, p).unwrap();
        let p_sat: f64 = fs.gas_saturation_pressure(0, T, x).unwrap();
        assert_relative_eq!(p_sat, p, max_relative = 1e-8);
    }
}

#[test]
fn wet_gas_vaporization_factor_at_nodes() {
    let fs = volatile_system();
    let rv: f64 = fs.oil_vaporization_factor(0, T, 1.5e7).unwrap();
    assert_relative_eq!(rv, 6e-5, max_relative = 1e-12);
    let x_mass: f64 = fs.saturated_gas_oil_mass_fraction(0, T, 1.5e7).unwrap();
    let x_mole: f64 = fs.saturated_gas_oil_mole_fraction(0, T, 1.5e7).unwrap();
    // oil is heavier than gas, so it is leaner on a molar basis
    assert!(x_mole < x_mass);
}

#[test]
fn fugacity_coefficients_reproduce_saturated_compositions() {
    let fs = volatile_system();
    let p = 2e7;
    let state = TestState::new(T, p);
    let phi = |phase, component| -> f64 {
        fs.fugacity_coefficient(&state, &cache(), phase, component)
            .unwrap()
    };

    let x_g_o: f64 = fs.saturated_gas_oil_mole_fraction(0, T, p).unwrap();
    assert_relative_eq!(
        phi(Phase::Gas, Component::Oil) * x_g_o,
        phi(Phase::Oil, Component::Oil),
        max_relative = 1e-12
    );

    let x_o_g: f64 = fs.saturated_oil_gas_mole_fraction(0, T, p).unwrap();
    assert_relative_eq!(
        phi(Phase::Oil, Component::Gas) * x_o_g,
        phi(Phase::Gas, Component::Gas),
        max_relative = 1e-12
    );

    assert_eq!(phi(Phase::Gas, Component::Gas), 1.0);
    assert_relative_eq!(phi(Phase::Oil, Component::Oil), 20e3 / p, max_relative = 1e-12);
    assert_relative_eq!(phi(Phase::Water, Component::Water), 3.169e3 / p, max_relative = 1e-12);
    assert!(phi(Phase::Water, Component::Gas) > 1e6 * phi(Phase::Water, Component::Water));
    assert_relative_eq!(
        phi(Phase::Gas, Component::Water),
        1e8 * phi(Phase::Oil, Component::Water),
        max_relative = 1e-12
    );
}

#[test]
fn density_derivative_matches_finite_difference() {
    let fs = live_oil_system();
    let x_o_g: f64 = fs.saturated_oil_gas_mass_fraction(0, T, 1.5e7).unwrap();
    let p = 2.5e7;

    let state = TestState::new(Dual64::from_re(T), Dual64::new(p, 1.0))
        .with_oil_gas_fraction(Dual64::from_re(x_o_g));
    let rho: Dual64 = fs.density(&state, &cache(), Phase::Oil).unwrap();

    let h = 1e2;
    let at = |p: f64| -> f64 {
        let state = TestState::new(T, p).with_oil_gas_fraction(x_o_g);
        fs.density(&state, &cache(), Phase::Oil).unwrap()
    };
    let fd = (at(p + h) - at(p - h)) / (2.0 * h);
    assert_relative_eq!(rho.re, at(p), max_relative = 1e-14);
    assert_relative_eq!(rho.eps, fd, max_relative = 1e-5);
}

#[test]
fn saturation_pressure_derivative_is_inverse_slope() {
    let fs = live_oil_system();
    let p = 1.2e7;
    let x: Dual64 = fs
        .saturated_oil_gas_mass_fraction(0, Dual64::from_re(T), Dual64::new(p, 1.0))
        .unwrap();
    let p_sat: Dual64 = fs
        .oil_saturation_pressure(0, Dual64::from_re(T), Dual64::new(x.re, 1.0))
        .unwrap();
    assert_relative_eq!(p_sat.re, p, max_relative = 1e-8);
    assert_relative_eq!(p_sat.eps * x.eps, 1.0, max_relative = 1e-4);
}

#[test]
fn init_end_is_idempotent() {
    let fs = volatile_system();
    let mut again = fs.clone();
    again.init_end().unwrap();
    assert_eq!(fs, again);
    for component in [Component::Oil, Component::Water, Component::Gas] {
        assert_eq!(
            fs.molar_mass(component, 0).unwrap(),
            again.molar_mass(component, 0).unwrap()
        );
    }
}

#[test]
fn setters_invalidate_initialization() {
    let mut fs = dead_oil_system();
    assert!(fs.is_initialized());
    fs.set_enable_vaporized_oil(true);
    assert!(!fs.is_initialized());
    let err = fs
        .density::<f64, _>(&TestState::new(T, 1e7), &cache(), Phase::Oil)
        .unwrap_err();
    assert_eq!(err, PvtError::NotInitialized);
    fs.init_end().unwrap();
    assert!(fs.is_initialized());
}

#[test]
fn unconfigured_phase_fails_with_logic_error() {
    let mut oil = DeadOilPvt::new(1);
    oil.set_table(0, &[(1e5, 1.0, 1e-3), (2e7, 1.2, 1.5e-3)], Interpolation::Linear)
        .unwrap();
    let mut fs = BlackOilFluidSystem::init_begin(1);
    fs.set_enable_dissolved_gas(false);
    fs.set_reference_densities(kg_per_m3(800.0), kg_per_m3(1000.0), kg_per_m3(1.2), 0)
        .unwrap();
    fs.set_oil_pvt(oil);
    fs.set_water_pvt(water());
    fs.init_end().unwrap();

    let state = TestState::new(T, 1e7);
    let rho_o: f64 = fs.density(&state, &cache(), Phase::Oil).unwrap();
    assert!(rho_o > 0.0);

    let err = fs
        .density::<f64, _>(&state, &cache(), Phase::Gas)
        .unwrap_err();
    assert_eq!(err, PvtError::Unconfigured { phase: "gas" });
    assert!(err.class().is_logic());
}

#[test]
fn live_oil_requires_gas_model() {
    let mut oil = bo_pvt::LiveOilPvt::new(1);
    oil.set_table(0, live_oil_records()).unwrap();
    let mut fs = BlackOilFluidSystem::init_begin(1);
    fs.set_reference_densities(kg_per_m3(800.0), kg_per_m3(1000.0), kg_per_m3(0.9), 0)
        .unwrap();
    fs.set_oil_pvt(oil);
    fs.set_water_pvt(water());
    let err = fs.init_end().unwrap_err();
    assert_eq!(err, PvtError::Unconfigured { phase: "gas" });
}

#[test]
fn region_count_mismatch_is_reported() {
    let mut fs = BlackOilFluidSystem::init_begin(1);
    fs.set_reference_densities(kg_per_m3(800.0), kg_per_m3(1000.0), kg_per_m3(1.2), 0)
        .unwrap();
    fs.set_oil_pvt(DeadOilPvt::new(2));
    fs.set_gas_pvt(dry_gas());
    fs.set_water_pvt(water());
    let err = fs.init_end().unwrap_err();
    assert_eq!(
        err,
        PvtError::RegionCountMismatch {
            what: "oil PVT",
            expected: 1,
            found: 2
        }
    );
}

#[test]
fn regions_use_their_own_reference_data() {
    let mut oil = ConstantCompressibilityOilPvt::new(2);
    let mut water = bo_pvt::ConstantCompressibilityWaterPvt::new(2);
    let mut gas = bo_pvt::DryGasPvt::new(2);
    for region in 0..2 {
        oil.set_parameters(region, ConstantCompressibility::new(1e5, 1.1, 1e-9, 2e-3, 0.0))
            .unwrap();
        water
            .set_parameters(region, ConstantCompressibility::new(1e5, 1.0, 4e-10, 5e-4, 0.0))
            .unwrap();
        gas.set_table(region, &[(1e5, 1.0, 1e-5), (4e7, 0.004, 3e-5)], Interpolation::Linear)
            .unwrap();
    }

    let mut fs = BlackOilFluidSystem::init_begin(2);
    fs.set_enable_dissolved_gas(false);
    fs.set_reference_densities(kg_per_m3(800.0), kg_per_m3(1000.0), kg_per_m3(0.8), 0)
        .unwrap();
    fs.set_reference_densities(kg_per_m3(880.0), kg_per_m3(1030.0), kg_per_m3(1.0), 1)
        .unwrap();
    fs.set_oil_pvt(oil);
    fs.set_gas_pvt(gas);
    fs.set_water_pvt(water);
    fs.init_end().unwrap();

    let state = TestState::new(T, 1e5);
    let rho = |region, phase| -> f64 {
        fs.density(&state, &ParameterCache::new(region), phase)
            .unwrap()
    };
    assert_relative_eq!(rho(0, Phase::Oil), 800.0 / 1.1, max_relative = 1e-12);
    assert_relative_eq!(rho(1, Phase::Oil), 880.0 / 1.1, max_relative = 1e-12);
    assert_relative_eq!(rho(1, Phase::Water), 1030.0, max_relative = 1e-12);
    assert!(fs.molar_mass(Component::Gas, 1).unwrap() > fs.molar_mass(Component::Gas, 0).unwrap());
    assert_eq!(fs.reference_density(Phase::Water, 1).unwrap(), kg_per_m3(1030.0));

    let err = fs
        .density::<f64, _>(&state, &ParameterCache::new(2), Phase::Oil)
        .unwrap_err();
    assert_eq!(
        err,
        PvtError::InvalidRegion {
            region: 2,
            num_regions: 2
        }
    );
}

#[test]
fn selector_reports_approach() {
    let mut selector = OilPvtMultiplexer::default();
    assert_eq!(selector.approach(), OilPvtApproach::NoPvt);
    selector
        .set_approach(OilPvtApproach::ConstantCompressibility)
        .unwrap();
    assert_eq!(selector.approach(), OilPvtApproach::ConstantCompressibility);

    let mut fs = dead_oil_system();
    fs.set_oil_pvt(selector);
    assert_eq!(fs.oil_pvt().approach(), OilPvtApproach::ConstantCompressibility);
}

#[test]
fn phase_and_component_indices() {
    assert_eq!(Phase::try_from(1).unwrap(), Phase::Oil);
    assert_eq!(Component::try_from(2).unwrap(), Component::Gas);
    let err: PvtError = Phase::try_from(3).unwrap_err().into();
    assert!(matches!(err, PvtError::InvalidPhase { index: 3 }));
    assert!(err.class().is_logic());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn properties_stay_positive(p in 5e6f64..2e7, s in 0.0f64..1.0) {
        let fs = volatile_system();
        let x_o_g: f64 = fs.saturated_oil_gas_mass_fraction(0, T, p).unwrap() * s;
        let x_g_o: f64 = fs.saturated_gas_oil_mass_fraction(0, T, p).unwrap() * s;
        let state = TestState::new(T, p)
            .with_oil_gas_fraction(x_o_g)
            .with_gas_oil_fraction(x_g_o);
        for phase in [Phase::Water, Phase::Oil, Phase::Gas] {
            let rho: f64 = fs.density(&state, &cache(), phase).unwrap();
            let mu: f64 = fs.viscosity(&state, &cache(), phase).unwrap();
            let b: f64 = fs.formation_volume_factor(&state, &cache(), phase).unwrap();
            prop_assert!(rho > 0.0, "{phase:?} density {rho} at p = {p}");
            prop_assert!(mu > 0.0, "{phase:?} viscosity {mu} at p = {p}");
            prop_assert!(b > 0.0, "{phase:?} Bo {b} at p = {p}");
        }
    }
}
