//! Inputs of a property query.

use bo_core::{Component, Evaluation, Phase};

/// Read-only view of the thermodynamic state of the three phases.
///
/// The fluid system only reads what a relation needs: temperature and
/// pressure of the queried phase, and for oil and gas the mass fraction of
/// the dissolved component.
pub trait FluidState<D: Evaluation> {
    fn temperature(&self, phase: Phase) -> D;

    fn pressure(&self, phase: Phase) -> D;

    /// Mass fraction of `component` in `phase`.
    fn mass_fraction(&self, phase: Phase, component: Component) -> D;
}

/// Per-query auxiliary data: the PVT region of the cell being evaluated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ParameterCache {
    region: usize,
}

impl ParameterCache {
    pub fn new(region: usize) -> Self {
        Self { region }
    }

    pub fn region(&self) -> usize {
        self.region
    }

    pub fn set_region(&mut self, region: usize) {
        self.region = region;
    }
}
