//! Fluid system configuration documents.
//!
//! A configuration names the miscibility switches, the reference densities
//! of every PVT region and one PVT model per phase. Tables are given row by
//! row as `[x, B, mu]` triples:
//!
//! ```yaml
//! enable_dissolved_gas: false
//! regions:
//!   - { oil_kg_per_m3: 800.0, water_kg_per_m3: 1000.0, gas_kg_per_m3: 1.0 }
//! oil:
//!   type: DeadOil
//!   regions:
//!     - [[1.0e5, 1.0, 1.0e-3], [2.0e7, 1.2, 1.5e-3]]
//! gas:
//!   type: DryGas
//!   regions:
//!     - [[1.0e5, 1.0, 1.0e-5], [2.0e7, 0.005, 2.0e-5]]
//! water:
//!   type: ConstantCompressibility
//!   regions:
//!     - { reference_pressure_pa: 1.0e5, formation_volume_factor: 1.0,
//!         compressibility_per_pa: 4.0e-10, viscosity_pa_s: 5.0e-4 }
//! ```

use crate::error::{ConfigError, ConfigResult};
use crate::fluid_system::BlackOilFluidSystem;
use bo_core::units::kg_per_m3;
use bo_pvt::{
    ConstantCompressibility, ConstantCompressibilityOilPvt, ConstantCompressibilityWaterPvt,
    DeadOilPvt, DryGasPvt, GasPvtMultiplexer, LiveOilPvt, OilPvtMultiplexer, WetGasPvt,
};
use bo_tables::{Interpolation, PvtRecord, PvtSample};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A table row: `[x, formation volume factor, viscosity]`.
pub type RowDef = [f64; 3];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FluidSystemConfig {
    #[serde(default = "default_true")]
    pub enable_dissolved_gas: bool,
    #[serde(default)]
    pub enable_vaporized_oil: bool,
    pub regions: Vec<ReferenceDensitiesDef>,
    pub oil: OilPvtDef,
    pub gas: GasPvtDef,
    pub water: WaterPvtDef,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ReferenceDensitiesDef {
    pub oil_kg_per_m3: f64,
    pub water_kg_per_m3: f64,
    pub gas_kg_per_m3: f64,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum InterpolationDef {
    #[default]
    Linear,
    MonotoneSpline,
}

impl From<InterpolationDef> for Interpolation {
    fn from(def: InterpolationDef) -> Self {
        match def {
            InterpolationDef::Linear => Interpolation::Linear,
            InterpolationDef::MonotoneSpline => Interpolation::MonotoneSpline,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum OilPvtDef {
    /// Rows are `[p, Bo, mu_o]`.
    DeadOil {
        #[serde(default)]
        interpolation: InterpolationDef,
        regions: Vec<Vec<RowDef>>,
    },
    LiveOil {
        regions: Vec<Vec<LiveOilRecordDef>>,
    },
    ConstantCompressibility {
        regions: Vec<CompressibilityDef>,
    },
}

/// One Rs node of a live oil table. Rows are `[p, Bo, mu_o]`; the first row
/// is the saturated state.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LiveOilRecordDef {
    pub rs: f64,
    pub rows: Vec<RowDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum GasPvtDef {
    /// Rows are `[p, Bg, mu_g]`.
    DryGas {
        #[serde(default)]
        interpolation: InterpolationDef,
        regions: Vec<Vec<RowDef>>,
    },
    WetGas {
        regions: Vec<Vec<WetGasRecordDef>>,
    },
}

/// One pressure node of a wet gas table. Rows are `[Rv, Bg, mu_g]` with the
/// saturated state first.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WetGasRecordDef {
    pub pressure_pa: f64,
    pub rows: Vec<RowDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum WaterPvtDef {
    ConstantCompressibility { regions: Vec<CompressibilityDef> },
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct CompressibilityDef {
    pub reference_pressure_pa: f64,
    pub formation_volume_factor: f64,
    pub compressibility_per_pa: f64,
    pub viscosity_pa_s: f64,
    #[serde(default)]
    pub viscosibility_per_pa: f64,
}

impl From<CompressibilityDef> for ConstantCompressibility {
    fn from(def: CompressibilityDef) -> Self {
        ConstantCompressibility::new(
            def.reference_pressure_pa,
            def.formation_volume_factor,
            def.compressibility_per_pa,
            def.viscosity_pa_s,
            def.viscosibility_per_pa,
        )
    }
}

fn invalid(what: impl Into<String>) -> ConfigError {
    ConfigError::Validation { what: what.into() }
}

fn check_positive(value: f64, field: &str) -> ConfigResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(format!("{field} must be positive and finite, got {value}")))
    }
}

fn check_region_count(found: usize, expected: usize, context: &str) -> ConfigResult<()> {
    if found == expected {
        Ok(())
    } else {
        Err(invalid(format!(
            "{context} has {found} regions but {expected} reference density sets are given"
        )))
    }
}

fn check_rows(rows: &[RowDef], context: &str) -> ConfigResult<()> {
    if rows.is_empty() {
        return Err(invalid(format!("{context} has no rows")));
    }
    for (i, &[x, b, mu]) in rows.iter().enumerate() {
        if !x.is_finite() {
            return Err(invalid(format!("{context} row {i}: non-finite abscissa {x}")));
        }
        check_positive(b, &format!("{context} row {i} formation volume factor"))?;
        check_positive(mu, &format!("{context} row {i} viscosity"))?;
    }
    Ok(())
}

fn check_compressibility(def: &CompressibilityDef, context: &str) -> ConfigResult<()> {
    if !def.reference_pressure_pa.is_finite()
        || !def.compressibility_per_pa.is_finite()
        || !def.viscosibility_per_pa.is_finite()
    {
        return Err(invalid(format!("{context}: non-finite parameter")));
    }
    check_positive(
        def.formation_volume_factor,
        &format!("{context} formation volume factor"),
    )?;
    check_positive(def.viscosity_pa_s, &format!("{context} viscosity"))
}

/// Structural checks: region counts agree, densities and table values are
/// positive. Table monotonicity is left to the table constructors.
pub fn validate_config(config: &FluidSystemConfig) -> ConfigResult<()> {
    let n = config.regions.len();
    if n == 0 {
        return Err(invalid("at least one PVT region is required"));
    }
    for (region, d) in config.regions.iter().enumerate() {
        check_positive(d.oil_kg_per_m3, &format!("region {region} oil density"))?;
        check_positive(d.water_kg_per_m3, &format!("region {region} water density"))?;
        check_positive(d.gas_kg_per_m3, &format!("region {region} gas density"))?;
    }

    match &config.oil {
        OilPvtDef::DeadOil { regions, .. } => {
            check_region_count(regions.len(), n, "dead oil")?;
            for (region, rows) in regions.iter().enumerate() {
                check_rows(rows, &format!("dead oil region {region}"))?;
            }
        }
        OilPvtDef::LiveOil { regions } => {
            check_region_count(regions.len(), n, "live oil")?;
            for (region, records) in regions.iter().enumerate() {
                if records.is_empty() {
                    return Err(invalid(format!("live oil region {region} has no records")));
                }
                for record in records {
                    if !record.rs.is_finite() || record.rs < 0.0 {
                        return Err(invalid(format!(
                            "live oil region {region}: invalid Rs {}",
                            record.rs
                        )));
                    }
                    check_rows(
                        &record.rows,
                        &format!("live oil region {region} Rs {}", record.rs),
                    )?;
                }
            }
        }
        OilPvtDef::ConstantCompressibility { regions } => {
            check_region_count(regions.len(), n, "oil compressibility")?;
            for (region, def) in regions.iter().enumerate() {
                check_compressibility(def, &format!("oil compressibility region {region}"))?;
            }
        }
    }

    match &config.gas {
        GasPvtDef::DryGas { regions, .. } => {
            check_region_count(regions.len(), n, "dry gas")?;
            for (region, rows) in regions.iter().enumerate() {
                check_rows(rows, &format!("dry gas region {region}"))?;
            }
        }
        GasPvtDef::WetGas { regions } => {
            check_region_count(regions.len(), n, "wet gas")?;
            for (region, records) in regions.iter().enumerate() {
                if records.is_empty() {
                    return Err(invalid(format!("wet gas region {region} has no records")));
                }
                for record in records {
                    check_positive(
                        record.pressure_pa,
                        &format!("wet gas region {region} pressure"),
                    )?;
                    check_rows(
                        &record.rows,
                        &format!("wet gas region {region} p {}", record.pressure_pa),
                    )?;
                }
            }
        }
    }

    match &config.water {
        WaterPvtDef::ConstantCompressibility { regions } => {
            check_region_count(regions.len(), n, "water compressibility")?;
            for (region, def) in regions.iter().enumerate() {
                check_compressibility(def, &format!("water compressibility region {region}"))?;
            }
        }
    }

    Ok(())
}

fn pvt_records<R>(records: &[R], split: impl Fn(&R) -> (f64, &[RowDef])) -> Vec<PvtRecord> {
    records
        .iter()
        .map(|record| {
            let (outer, rows) = split(record);
            let samples = rows
                .iter()
                .map(|&[inner, b, mu]| PvtSample::new(inner, b, mu))
                .collect();
            PvtRecord::new(outer, samples)
        })
        .collect()
}

fn tuples(rows: &[RowDef]) -> Vec<(f64, f64, f64)> {
    rows.iter().map(|&[x, b, mu]| (x, b, mu)).collect()
}

impl OilPvtDef {
    fn build(&self) -> ConfigResult<OilPvtMultiplexer> {
        Ok(match self {
            OilPvtDef::DeadOil {
                interpolation,
                regions,
            } => {
                let mut pvt = DeadOilPvt::new(regions.len());
                for (region, rows) in regions.iter().enumerate() {
                    pvt.set_table(region, &tuples(rows), (*interpolation).into())?;
                }
                pvt.into()
            }
            OilPvtDef::LiveOil { regions } => {
                let mut pvt = LiveOilPvt::new(regions.len());
                for (region, records) in regions.iter().enumerate() {
                    let records = pvt_records(records, |r| (r.rs, r.rows.as_slice()));
                    pvt.set_table(region, records)?;
                }
                pvt.into()
            }
            OilPvtDef::ConstantCompressibility { regions } => {
                let mut pvt = ConstantCompressibilityOilPvt::new(regions.len());
                for (region, def) in regions.iter().enumerate() {
                    pvt.set_parameters(region, (*def).into())?;
                }
                pvt.into()
            }
        })
    }
}

impl GasPvtDef {
    fn build(&self) -> ConfigResult<GasPvtMultiplexer> {
        Ok(match self {
            GasPvtDef::DryGas {
                interpolation,
                regions,
            } => {
                let mut pvt = DryGasPvt::new(regions.len());
                for (region, rows) in regions.iter().enumerate() {
                    pvt.set_table(region, &tuples(rows), (*interpolation).into())?;
                }
                pvt.into()
            }
            GasPvtDef::WetGas { regions } => {
                let mut pvt = WetGasPvt::new(regions.len());
                for (region, records) in regions.iter().enumerate() {
                    let records = pvt_records(records, |r| (r.pressure_pa, r.rows.as_slice()));
                    pvt.set_table(region, records)?;
                }
                pvt.into()
            }
        })
    }
}

impl WaterPvtDef {
    fn build(&self) -> ConfigResult<ConstantCompressibilityWaterPvt> {
        match self {
            WaterPvtDef::ConstantCompressibility { regions } => {
                let mut pvt = ConstantCompressibilityWaterPvt::new(regions.len());
                for (region, def) in regions.iter().enumerate() {
                    pvt.set_parameters(region, (*def).into())?;
                }
                Ok(pvt)
            }
        }
    }
}

impl FluidSystemConfig {
    /// Validate the document and produce an initialized fluid system.
    pub fn build(&self) -> ConfigResult<BlackOilFluidSystem> {
        validate_config(self)?;

        let mut fs = BlackOilFluidSystem::init_begin(self.regions.len());
        fs.set_enable_dissolved_gas(self.enable_dissolved_gas);
        fs.set_enable_vaporized_oil(self.enable_vaporized_oil);
        for (region, d) in self.regions.iter().enumerate() {
            fs.set_reference_densities(
                kg_per_m3(d.oil_kg_per_m3),
                kg_per_m3(d.water_kg_per_m3),
                kg_per_m3(d.gas_kg_per_m3),
                region,
            )?;
        }
        fs.set_oil_pvt(self.oil.build()?);
        fs.set_gas_pvt(self.gas.build()?);
        fs.set_water_pvt(self.water.build()?);
        fs.init_end()?;
        Ok(fs)
    }
}

pub fn load_yaml(path: &Path) -> ConfigResult<FluidSystemConfig> {
    let content = std::fs::read_to_string(path)?;
    let config: FluidSystemConfig = serde_yaml::from_str(&content)?;
    validate_config(&config)?;
    Ok(config)
}

pub fn save_yaml(path: &Path, config: &FluidSystemConfig) -> ConfigResult<()> {
    validate_config(config)?;
    let content = serde_yaml::to_string(config)?;
    std::fs::write(path, content)?;
    Ok(())
}

pub fn load_json(path: &Path) -> ConfigResult<FluidSystemConfig> {
    let content = std::fs::read_to_string(path)?;
    let config: FluidSystemConfig = serde_json::from_str(&content)?;
    validate_config(&config)?;
    Ok(config)
}

pub fn save_json(path: &Path, config: &FluidSystemConfig) -> ConfigResult<()> {
    validate_config(config)?;
    let content = serde_json::to_string_pretty(config)?;
    std::fs::write(path, content)?;
    Ok(())
}
