//! The black-oil fluid system.
//!
//! Three pseudo components (oil, water, gas) are distributed over three
//! phases. Water is immiscible, gas may dissolve in oil (Rs) and oil may
//! vaporize into gas (Rv). The phase relations are delegated to the PVT
//! selectors; the fluid system owns the selectors, the reference data of
//! every region and the miscibility switches.
//!
//! # Lifecycle
//!
//! ```text
//! init_begin(num_regions)
//!   set_enable_dissolved_gas / set_enable_vaporized_oil
//!   set_reference_densities (per region)
//!   set_oil_pvt / set_gas_pvt / set_water_pvt
//! init_end()
//! ```
//!
//! Every setter takes `&mut self` and clears the initialized flag, so queries
//! only ever observe a completely initialized system.

use crate::state::{FluidState, ParameterCache};
use bo_core::units::Density;
use bo_core::{Component, Evaluation, Phase, Real};
use bo_pvt::{
    GasPvtApproach, GasPvtModel, GasPvtMultiplexer, OilPvtApproach, OilPvtModel,
    OilPvtMultiplexer, PvtError, PvtResult, RegionReference, WaterPvtApproach,
    WaterPvtMultiplexer, check_region,
};
use tracing::info;

/// Surface densities of one region as given by the user.
#[derive(Debug, Clone, Copy, PartialEq)]
struct ReferenceDensities {
    oil: Density,
    water: Density,
    gas: Density,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BlackOilFluidSystem {
    num_regions: usize,
    enable_dissolved_gas: bool,
    enable_vaporized_oil: bool,
    densities: Vec<Option<ReferenceDensities>>,
    /// Derived in `init_end`
    references: Vec<RegionReference>,
    oil: OilPvtMultiplexer,
    gas: GasPvtMultiplexer,
    water: WaterPvtMultiplexer,
    initialized: bool,
}

impl BlackOilFluidSystem {
    /// Start initializing a system with `num_regions` PVT regions.
    ///
    /// Dissolved gas is enabled and vaporized oil disabled by default.
    pub fn init_begin(num_regions: usize) -> Self {
        Self {
            num_regions,
            enable_dissolved_gas: true,
            enable_vaporized_oil: false,
            densities: vec![None; num_regions],
            references: Vec::new(),
            oil: OilPvtMultiplexer::NoPvt,
            gas: GasPvtMultiplexer::NoPvt,
            water: WaterPvtMultiplexer::NoPvt,
            initialized: false,
        }
    }

    pub fn set_enable_dissolved_gas(&mut self, enable: bool) {
        self.enable_dissolved_gas = enable;
        self.initialized = false;
    }

    pub fn set_enable_vaporized_oil(&mut self, enable: bool) {
        self.enable_vaporized_oil = enable;
        self.initialized = false;
    }

    /// Set the surface densities of one region.
    pub fn set_reference_densities(
        &mut self,
        oil: Density,
        water: Density,
        gas: Density,
        region: usize,
    ) -> PvtResult<()> {
        check_region(region, self.num_regions)?;
        // validates positivity before anything is stored
        RegionReference::from_densities(oil, water, gas)?;
        self.densities[region] = Some(ReferenceDensities { oil, water, gas });
        self.initialized = false;
        Ok(())
    }

    pub fn set_oil_pvt(&mut self, oil: impl Into<OilPvtMultiplexer>) {
        self.oil = oil.into();
        self.initialized = false;
    }

    pub fn set_gas_pvt(&mut self, gas: impl Into<GasPvtMultiplexer>) {
        self.gas = gas.into();
        self.initialized = false;
    }

    pub fn set_water_pvt(&mut self, water: impl Into<WaterPvtMultiplexer>) {
        self.water = water.into();
        self.initialized = false;
    }

    /// Derive the molar masses, hand the reference data to the selectors and
    /// finalize them. Calling it again recomputes the same state.
    pub fn init_end(&mut self) -> PvtResult<()> {
        let mut references = Vec::with_capacity(self.num_regions);
        for (region, densities) in self.densities.iter().enumerate() {
            let d = densities.ok_or(PvtError::MissingReferenceDensities { region })?;
            references.push(RegionReference::from_densities(d.oil, d.water, d.gas)?);
        }

        let configured = [
            ("oil PVT", self.oil.approach() != OilPvtApproach::NoPvt, self.oil.num_regions()),
            ("gas PVT", self.gas.approach() != GasPvtApproach::NoPvt, self.gas.num_regions()),
            (
                "water PVT",
                self.water.approach() != WaterPvtApproach::NoPvt,
                self.water.num_regions(),
            ),
        ];
        // unconfigured phases stay unconfigured and fail on evaluation
        for &(what, _, found) in configured.iter().filter(|(_, active, _)| *active) {
            if found != self.num_regions {
                return Err(PvtError::RegionCountMismatch {
                    what,
                    expected: self.num_regions,
                    found,
                });
            }
        }

        for (region, reference) in references.iter().enumerate() {
            self.oil.set_region_reference(region, *reference);
            self.gas.set_region_reference(region, *reference);
            self.water.set_region_reference(region, *reference);
        }

        if configured[0].1 {
            self.oil.init_end(&self.gas)?;
        }
        if configured[1].1 {
            self.gas.init_end(&self.oil)?;
        }
        if configured[2].1 {
            self.water.init_end()?;
        }

        self.references = references;
        self.initialized = true;
        info!(
            num_regions = self.num_regions,
            oil = ?self.oil.approach(),
            gas = ?self.gas.approach(),
            water = ?self.water.approach(),
            dissolved_gas = self.enable_dissolved_gas,
            vaporized_oil = self.enable_vaporized_oil,
            "black-oil fluid system initialized"
        );
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn num_regions(&self) -> usize {
        self.num_regions
    }

    pub fn enable_dissolved_gas(&self) -> bool {
        self.enable_dissolved_gas
    }

    pub fn enable_vaporized_oil(&self) -> bool {
        self.enable_vaporized_oil
    }

    pub fn oil_pvt(&self) -> &OilPvtMultiplexer {
        &self.oil
    }

    pub fn gas_pvt(&self) -> &GasPvtMultiplexer {
        &self.gas
    }

    pub fn water_pvt(&self) -> &WaterPvtMultiplexer {
        &self.water
    }

    fn checked_region(&self, region: usize) -> PvtResult<usize> {
        if !self.initialized {
            return Err(PvtError::NotInitialized);
        }
        check_region(region, self.num_regions)?;
        Ok(region)
    }

    // ---------------------------------------------------------------------
    // static information

    pub fn phase_name(phase: Phase) -> &'static str {
        phase.name()
    }

    pub fn component_name(component: Component) -> &'static str {
        component.name()
    }

    pub fn is_liquid(phase: Phase) -> bool {
        phase.is_liquid()
    }

    /// Fugacity coefficients do not depend on the phase composition.
    pub fn is_ideal_mixture(_phase: Phase) -> bool {
        true
    }

    pub fn is_compressible(_phase: Phase) -> bool {
        true
    }

    pub fn is_ideal_gas(_phase: Phase) -> bool {
        false
    }

    /// Molar mass [kg/mol] of a component in a region.
    pub fn molar_mass(&self, component: Component, region: usize) -> PvtResult<Real> {
        let reference = &self.references[self.checked_region(region)?];
        Ok(match component {
            Component::Oil => reference.oil_molar_mass,
            Component::Water => reference.water_molar_mass,
            Component::Gas => reference.gas_molar_mass,
        })
    }

    /// Surface density of a phase in a region.
    pub fn reference_density(&self, phase: Phase, region: usize) -> PvtResult<Density> {
        check_region(region, self.num_regions)?;
        let densities = self.densities[region]
            .as_ref()
            .ok_or(PvtError::MissingReferenceDensities { region })?;
        Ok(match phase {
            Phase::Oil => densities.oil,
            Phase::Water => densities.water,
            Phase::Gas => densities.gas,
        })
    }

    // ---------------------------------------------------------------------
    // state-based relations

    /// Gas mass fraction in oil as the oil relations see it.
    fn oil_gas_mass_fraction<D, S>(&self, state: &S) -> D
    where
        D: Evaluation,
        S: FluidState<D> + ?Sized,
    {
        if self.enable_dissolved_gas {
            state.mass_fraction(Phase::Oil, Component::Gas)
        } else {
            D::zero()
        }
    }

    /// Oil mass fraction in gas as the gas relations see it.
    fn gas_oil_mass_fraction<D, S>(&self, state: &S) -> D
    where
        D: Evaluation,
        S: FluidState<D> + ?Sized,
    {
        if self.enable_vaporized_oil {
            state.mass_fraction(Phase::Gas, Component::Oil)
        } else {
            D::zero()
        }
    }

    /// Density [kg/m³] of `phase`.
    pub fn density<D, S>(&self, state: &S, cache: &ParameterCache, phase: Phase) -> PvtResult<D>
    where
        D: Evaluation,
        S: FluidState<D> + ?Sized,
    {
        let region = self.checked_region(cache.region())?;
        let t = state.temperature(phase);
        let p = state.pressure(phase);
        match phase {
            Phase::Oil => self
                .oil
                .density(region, t, p, self.oil_gas_mass_fraction(state)),
            Phase::Gas => self
                .gas
                .density(region, t, p, self.gas_oil_mass_fraction(state)),
            Phase::Water => self.water.density(region, t, p),
        }
    }

    /// Dynamic viscosity [Pa s] of `phase`.
    pub fn viscosity<D, S>(&self, state: &S, cache: &ParameterCache, phase: Phase) -> PvtResult<D>
    where
        D: Evaluation,
        S: FluidState<D> + ?Sized,
    {
        let region = self.checked_region(cache.region())?;
        let t = state.temperature(phase);
        let p = state.pressure(phase);
        match phase {
            Phase::Oil => self
                .oil
                .viscosity(region, t, p, self.oil_gas_mass_fraction(state)),
            Phase::Gas => self
                .gas
                .viscosity(region, t, p, self.gas_oil_mass_fraction(state)),
            Phase::Water => self.water.viscosity(region, t, p),
        }
    }

    /// Formation volume factor of `phase`.
    pub fn formation_volume_factor<D, S>(
        &self,
        state: &S,
        cache: &ParameterCache,
        phase: Phase,
    ) -> PvtResult<D>
    where
        D: Evaluation,
        S: FluidState<D> + ?Sized,
    {
        let region = self.checked_region(cache.region())?;
        let t = state.temperature(phase);
        let p = state.pressure(phase);
        match phase {
            Phase::Oil => {
                self.oil
                    .formation_volume_factor(region, t, p, self.oil_gas_mass_fraction(state))
            }
            Phase::Gas => {
                self.gas
                    .formation_volume_factor(region, t, p, self.gas_oil_mass_fraction(state))
            }
            Phase::Water => self.water.formation_volume_factor(region, t, p),
        }
    }

    /// Fugacity coefficient of `component` in `phase`.
    pub fn fugacity_coefficient<D, S>(
        &self,
        state: &S,
        cache: &ParameterCache,
        phase: Phase,
        component: Component,
    ) -> PvtResult<D>
    where
        D: Evaluation,
        S: FluidState<D> + ?Sized,
    {
        let region = self.checked_region(cache.region())?;
        let t = state.temperature(phase);
        let p = state.pressure(phase);
        match (phase, component) {
            (Phase::Water, Component::Water) => self.water.fugacity_coefficient_water(region, t, p),
            (Phase::Water, Component::Oil) => self.water.fugacity_coefficient_oil(region, t, p),
            (Phase::Water, Component::Gas) => self.water.fugacity_coefficient_gas(region, t, p),
            (Phase::Gas, Component::Gas) => self.gas.fugacity_coefficient_gas(region, t, p),
            (Phase::Gas, Component::Oil) => {
                self.gas.fugacity_coefficient_oil(&self.oil, region, t, p)
            }
            (Phase::Gas, Component::Water) => {
                self.gas.fugacity_coefficient_water(&self.oil, region, t, p)
            }
            (Phase::Oil, Component::Oil) => self.oil.fugacity_coefficient_oil(region, t, p),
            (Phase::Oil, Component::Water) => self.oil.fugacity_coefficient_water(region, t, p),
            (Phase::Oil, Component::Gas) => {
                self.oil.fugacity_coefficient_gas(&self.gas, region, t, p)
            }
        }
    }

    // ---------------------------------------------------------------------
    // pass-through relations

    /// Rs of gas-saturated oil.
    pub fn gas_dissolution_factor<D: Evaluation>(
        &self,
        region: usize,
        temperature: D,
        pressure: D,
    ) -> PvtResult<D> {
        let region = self.checked_region(region)?;
        self.oil
            .saturated_gas_dissolution_factor(region, temperature, pressure)
    }

    /// Rv of oil-saturated gas.
    pub fn oil_vaporization_factor<D: Evaluation>(
        &self,
        region: usize,
        temperature: D,
        pressure: D,
    ) -> PvtResult<D> {
        let region = self.checked_region(region)?;
        self.gas.oil_vaporization_factor(region, temperature, pressure)
    }

    pub fn saturated_oil_gas_mass_fraction<D: Evaluation>(
        &self,
        region: usize,
        temperature: D,
        pressure: D,
    ) -> PvtResult<D> {
        let region = self.checked_region(region)?;
        self.oil
            .saturated_oil_gas_mass_fraction(region, temperature, pressure)
    }

    pub fn saturated_oil_gas_mole_fraction<D: Evaluation>(
        &self,
        region: usize,
        temperature: D,
        pressure: D,
    ) -> PvtResult<D> {
        let region = self.checked_region(region)?;
        self.oil
            .saturated_oil_gas_mole_fraction(region, temperature, pressure)
    }

    pub fn saturated_gas_oil_mass_fraction<D: Evaluation>(
        &self,
        region: usize,
        temperature: D,
        pressure: D,
    ) -> PvtResult<D> {
        let region = self.checked_region(region)?;
        self.gas
            .saturated_gas_oil_mass_fraction(region, temperature, pressure)
    }

    pub fn saturated_gas_oil_mole_fraction<D: Evaluation>(
        &self,
        region: usize,
        temperature: D,
        pressure: D,
    ) -> PvtResult<D> {
        let region = self.checked_region(region)?;
        self.gas
            .saturated_gas_oil_mole_fraction(region, temperature, pressure)
    }

    /// Bubble point pressure of oil with gas mass fraction `x_o_g`.
    pub fn oil_saturation_pressure<D: Evaluation>(
        &self,
        region: usize,
        temperature: D,
        x_o_g: D,
    ) -> PvtResult<D> {
        let region = self.checked_region(region)?;
        self.oil.saturation_pressure(region, temperature, x_o_g)
    }

    /// Dew point pressure of gas with oil mass fraction `x_g_o`.
    pub fn gas_saturation_pressure<D: Evaluation>(
        &self,
        region: usize,
        temperature: D,
        x_g_o: D,
    ) -> PvtResult<D> {
        let region = self.checked_region(region)?;
        self.gas.saturation_pressure(region, temperature, x_g_o)
    }

    pub fn saturated_oil_formation_volume_factor<D: Evaluation>(
        &self,
        region: usize,
        temperature: D,
        pressure: D,
    ) -> PvtResult<D> {
        let region = self.checked_region(region)?;
        self.oil
            .saturated_formation_volume_factor(region, temperature, pressure)
    }

    pub fn saturated_oil_density<D: Evaluation>(
        &self,
        region: usize,
        temperature: D,
        pressure: D,
    ) -> PvtResult<D> {
        let region = self.checked_region(region)?;
        self.oil.saturated_density(region, temperature, pressure)
    }

    pub fn oil_formation_volume_factor<D: Evaluation>(
        &self,
        region: usize,
        temperature: D,
        pressure: D,
        x_o_g: D,
    ) -> PvtResult<D> {
        let region = self.checked_region(region)?;
        self.oil
            .formation_volume_factor(region, temperature, pressure, x_o_g)
    }

    pub fn oil_density<D: Evaluation>(
        &self,
        region: usize,
        temperature: D,
        pressure: D,
        x_o_g: D,
    ) -> PvtResult<D> {
        let region = self.checked_region(region)?;
        self.oil.density(region, temperature, pressure, x_o_g)
    }

    pub fn gas_formation_volume_factor<D: Evaluation>(
        &self,
        region: usize,
        temperature: D,
        pressure: D,
        x_g_o: D,
    ) -> PvtResult<D> {
        let region = self.checked_region(region)?;
        self.gas
            .formation_volume_factor(region, temperature, pressure, x_g_o)
    }

    pub fn gas_density<D: Evaluation>(
        &self,
        region: usize,
        temperature: D,
        pressure: D,
        x_g_o: D,
    ) -> PvtResult<D> {
        let region = self.checked_region(region)?;
        self.gas.density(region, temperature, pressure, x_g_o)
    }

    pub fn water_formation_volume_factor<D: Evaluation>(
        &self,
        region: usize,
        temperature: D,
        pressure: D,
    ) -> PvtResult<D> {
        let region = self.checked_region(region)?;
        self.water
            .formation_volume_factor(region, temperature, pressure)
    }

    pub fn water_density<D: Evaluation>(
        &self,
        region: usize,
        temperature: D,
        pressure: D,
    ) -> PvtResult<D> {
        let region = self.checked_region(region)?;
        self.water.density(region, temperature, pressure)
    }
}
