//! Pseudo fugacity coefficients of the black-oil components.
//!
//! The black-oil model does not describe phase equilibrium with an equation
//! of state. Fugacity coefficients are chosen so that a flash reproduces the
//! tabulated saturated compositions: every component gets a pseudo vapor
//! pressure in its own phase, and components that do not partition into a
//! phase get a coefficient `LOW_AFFINITY_FACTOR` times larger.

use bo_core::{Evaluation, Real, constant};

/// Pseudo vapor pressure of the oil component in the oil phase [Pa].
pub const OIL_PSEUDO_VAPOR_PRESSURE_PA: Real = 20e3;

/// Pseudo vapor pressure of the water component in the water phase [Pa].
pub const WATER_PSEUDO_VAPOR_PRESSURE_PA: Real = 3.169e3;

/// Scale applied to components with negligible affinity to a phase.
pub const LOW_AFFINITY_FACTOR: Real = 1e8;

/// Lower bound of the saturated mole fraction used as a divisor.
pub const MIN_SATURATED_MOLE_FRACTION: Real = 1e-10;

/// φ = p_vap / p
pub fn pseudo_vapor_coefficient<D: Evaluation>(vapor_pressure: Real, pressure: D) -> D {
    pressure.recip() * vapor_pressure
}

/// Scale a component's coefficient in its own phase so a flash ends at the
/// saturated mole fraction `x_sat` of that component in the other phase.
///
/// `x_sat` below `MIN_SATURATED_MOLE_FRACTION` (a phase that dissolves none
/// of the component, e.g. Rs = 0 at low pressure) is replaced by that bound
/// so the coefficient stays finite. The replaced value carries no
/// derivatives.
pub fn flash_consistent<D: Evaluation>(phi_own_phase: D, x_sat: D) -> D {
    let x_sat = if x_sat.re() < MIN_SATURATED_MOLE_FRACTION {
        constant(MIN_SATURATED_MOLE_FRACTION)
    } else {
        x_sat
    };
    phi_own_phase / x_sat
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_dual::{Dual64, DualNum};

    #[test]
    fn pseudo_vapor_pressure_scales_inversely() {
        let phi: f64 = pseudo_vapor_coefficient(OIL_PSEUDO_VAPOR_PRESSURE_PA, 1e7);
        assert_eq!(phi, 2e-3);
    }

    #[test]
    fn flash_consistent_floors_the_mole_fraction() {
        let phi: f64 = flash_consistent(1.0, 0.0);
        assert_eq!(phi, 1.0 / MIN_SATURATED_MOLE_FRACTION);
        let phi: f64 = flash_consistent(1.0, 0.25);
        assert_eq!(phi, 4.0);

        let phi = flash_consistent(Dual64::from_re(2.0), Dual64::new(1e-12, 1.0));
        assert_eq!(phi.re, 2.0 / MIN_SATURATED_MOLE_FRACTION);
        assert_eq!(phi.eps, 0.0);
        assert!(flash_consistent(1.0, -1e-14_f64).is_finite());
    }
}
