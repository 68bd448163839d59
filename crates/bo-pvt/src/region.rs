//! Per-region reference data and the composition conversions built on it.

use crate::error::PvtResult;
use bo_core::units::constants::{
    OIL_MOLAR_MASS_KG_PER_MOL, WATER_MOLAR_MASS_KG_PER_MOL, ideal_gas_molar_mass,
};
use bo_core::units::Density;
use bo_core::{Evaluation, Real, ensure_positive, one_minus};

/// Surface densities [kg/m³] and component molar masses [kg/mol] of one region.
///
/// The all-zero default marks a region whose reference data has not been
/// provided yet; `validate` rejects it.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RegionReference {
    pub oil_density: Real,
    pub water_density: Real,
    pub gas_density: Real,
    pub oil_molar_mass: Real,
    pub water_molar_mass: Real,
    pub gas_molar_mass: Real,
}

impl RegionReference {
    /// Reference data from surface densities, with molar masses derived the
    /// black-oil way: fixed oil and water values, ideal gas at surface
    /// conditions for the gas component.
    pub fn from_densities(oil: Density, water: Density, gas: Density) -> PvtResult<Self> {
        let oil_density = ensure_positive(oil.value, "oil reference density")?;
        let water_density = ensure_positive(water.value, "water reference density")?;
        let gas_density = ensure_positive(gas.value, "gas reference density")?;

        Ok(Self {
            oil_density,
            water_density,
            gas_density,
            oil_molar_mass: OIL_MOLAR_MASS_KG_PER_MOL,
            water_molar_mass: WATER_MOLAR_MASS_KG_PER_MOL,
            gas_molar_mass: ideal_gas_molar_mass(gas).value,
        })
    }

    pub fn validate(&self) -> PvtResult<()> {
        ensure_positive(self.oil_density, "oil reference density")?;
        ensure_positive(self.water_density, "water reference density")?;
        ensure_positive(self.gas_density, "gas reference density")?;
        ensure_positive(self.oil_molar_mass, "oil molar mass")?;
        ensure_positive(self.water_molar_mass, "water molar mass")?;
        ensure_positive(self.gas_molar_mass, "gas molar mass")?;
        Ok(())
    }

    /// Rs = XoG/(1 - XoG) * ρo/ρg
    pub fn rs_from_oil_gas_mass_fraction<D: Evaluation>(&self, x_o_g: D) -> D {
        x_o_g / one_minus(x_o_g) * (self.oil_density / self.gas_density)
    }

    /// XoG = Rs ρg / (ρo + Rs ρg)
    pub fn oil_gas_mass_fraction_from_rs<D: Evaluation>(&self, rs: D) -> D {
        let rho_o_g = rs * self.gas_density;
        rho_o_g / (rho_o_g + self.oil_density)
    }

    /// Rv = XgO/(1 - XgO) * ρg/ρo
    pub fn rv_from_gas_oil_mass_fraction<D: Evaluation>(&self, x_g_o: D) -> D {
        x_g_o / one_minus(x_g_o) * (self.gas_density / self.oil_density)
    }

    /// XgO = Rv ρo / (ρg + Rv ρo)
    pub fn gas_oil_mass_fraction_from_rv<D: Evaluation>(&self, rv: D) -> D {
        let rho_g_o = rv * self.oil_density;
        rho_g_o / (rho_g_o + self.gas_density)
    }

    /// Mole fraction of the gas component dissolved in oil.
    pub fn oil_gas_mole_fraction<D: Evaluation>(&self, x_o_g: D) -> D {
        mass_to_mole_fraction(x_o_g, self.gas_molar_mass, self.oil_molar_mass)
    }

    /// Mole fraction of the oil component vaporized in gas.
    pub fn gas_oil_mole_fraction<D: Evaluation>(&self, x_g_o: D) -> D {
        mass_to_mole_fraction(x_g_o, self.oil_molar_mass, self.gas_molar_mass)
    }
}

/// x = X M̄ / M_solute with M̄ = 1 / (X/M_solute + (1 - X)/M_solvent).
fn mass_to_mole_fraction<D: Evaluation>(mass_fraction: D, solute: Real, solvent: Real) -> D {
    let solute_moles = mass_fraction / solute;
    solute_moles / (solute_moles + one_minus(mass_fraction) / solvent)
}
