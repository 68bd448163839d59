//! Closed-form constant-compressibility relations shared by oil and water.

use crate::error::PvtResult;
use bo_core::{Evaluation, Real, ensure_finite, ensure_positive};

/// Parameters of one region of a constant-compressibility phase.
///
/// With `X = c (p - p_ref)` and `Y = (c - c_v)(p - p_ref)`:
///
/// ```text
/// B(p)  = B_ref / (1 + X + X²/2)
/// μ(p)  = μ_ref B_ref / (B(p) (1 + Y + Y²/2))
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ConstantCompressibility {
    /// Reference pressure [Pa]
    pub reference_pressure: Real,
    /// Formation volume factor at the reference pressure [-]
    pub reference_formation_volume_factor: Real,
    /// Compressibility [1/Pa]
    pub compressibility: Real,
    /// Viscosity at the reference pressure [Pa s]
    pub reference_viscosity: Real,
    /// Viscosibility [1/Pa]
    pub viscosibility: Real,
}

impl ConstantCompressibility {
    pub fn new(
        reference_pressure: Real,
        reference_formation_volume_factor: Real,
        compressibility: Real,
        reference_viscosity: Real,
        viscosibility: Real,
    ) -> Self {
        Self {
            reference_pressure,
            reference_formation_volume_factor,
            compressibility,
            reference_viscosity,
            viscosibility,
        }
    }

    pub fn validate(&self) -> PvtResult<()> {
        ensure_finite(self.reference_pressure, "reference pressure")?;
        ensure_positive(
            self.reference_formation_volume_factor,
            "reference formation volume factor",
        )?;
        ensure_finite(self.compressibility, "compressibility")?;
        ensure_positive(self.reference_viscosity, "reference viscosity")?;
        ensure_finite(self.viscosibility, "viscosibility")?;
        Ok(())
    }

    pub fn formation_volume_factor<D: Evaluation>(&self, pressure: D) -> D {
        let x = (pressure - self.reference_pressure) * self.compressibility;
        second_order_exp(x).recip() * self.reference_formation_volume_factor
    }

    pub fn viscosity<D: Evaluation>(&self, pressure: D) -> D {
        let y = (pressure - self.reference_pressure) * (self.compressibility - self.viscosibility);
        let b = self.formation_volume_factor(pressure);
        (b * second_order_exp(y)).recip()
            * (self.reference_viscosity * self.reference_formation_volume_factor)
    }
}

/// 1 + x + x²/2
fn second_order_exp<D: Evaluation>(x: D) -> D {
    x * (x * 0.5 + 1.0) + 1.0
}
