// bo-core/src/units.rs

use uom::si::f64::{
    DynamicViscosity as UomDynamicViscosity, MassDensity as UomMassDensity,
    MolarMass as UomMolarMass, Pressure as UomPressure,
    ThermodynamicTemperature as UomThermodynamicTemperature,
};

// Public canonical unit types (SI, f64)
pub type Density = UomMassDensity;
pub type DynVisc = UomDynamicViscosity;
pub type MolarMass = UomMolarMass;
pub type Pressure = UomPressure;
pub type Temperature = UomThermodynamicTemperature;

#[inline]
pub fn pa(v: f64) -> Pressure {
    use uom::si::pressure::pascal;
    Pressure::new::<pascal>(v)
}

#[inline]
pub fn k(v: f64) -> Temperature {
    use uom::si::thermodynamic_temperature::kelvin;
    Temperature::new::<kelvin>(v)
}

#[inline]
pub fn kg_per_m3(v: f64) -> Density {
    use uom::si::mass_density::kilogram_per_cubic_meter;
    Density::new::<kilogram_per_cubic_meter>(v)
}

#[inline]
pub fn kg_per_mol(v: f64) -> MolarMass {
    use uom::si::molar_mass::kilogram_per_mole;
    MolarMass::new::<kilogram_per_mole>(v)
}

#[inline]
pub fn pa_s(v: f64) -> DynVisc {
    use uom::si::dynamic_viscosity::pascal_second;
    DynVisc::new::<pascal_second>(v)
}

pub mod constants {
    use super::*;

    /// Universal gas constant [J/(mol K)]
    pub const R_J_PER_MOL_K: f64 = 8.314_462_618;

    /// Standard (surface) conditions the reference densities refer to.
    pub const SURFACE_PRESSURE_PA: f64 = 101_325.0;
    pub const SURFACE_TEMPERATURE_K: f64 = 273.15 + 15.56;

    /// Fixed component molar masses [kg/mol]. The gas molar mass is derived
    /// from its surface density instead.
    pub const WATER_MOLAR_MASS_KG_PER_MOL: f64 = 18.0e-3;
    pub const OIL_MOLAR_MASS_KG_PER_MOL: f64 = 175.0e-3;

    #[inline]
    pub fn surface_pressure() -> Pressure {
        pa(SURFACE_PRESSURE_PA)
    }

    #[inline]
    pub fn surface_temperature() -> Temperature {
        k(SURFACE_TEMPERATURE_K)
    }

    /// Molar mass of an ideal gas with the given density at surface conditions.
    #[inline]
    pub fn ideal_gas_molar_mass(surface_density: Density) -> MolarMass {
        kg_per_mol(
            R_J_PER_MOL_K * SURFACE_TEMPERATURE_K * surface_density.value / SURFACE_PRESSURE_PA,
        )
    }
}
