//! Completion of under-determined PVT record tables.
//!
//! Black-oil input often only describes the saturated state at some outer
//! nodes: the record carries a single sample. Two-dimensional interpolation
//! needs at least two inner samples per node, so the missing under-saturated
//! samples are synthesized from the first later record that has them (the
//! "master" record). Every extra master sample is expressed as ratios to the
//! master's first sample, and the same ratios are applied to the deficient
//! record's single sample.

use crate::error::{TableError, TableResult};
use bo_core::Real;
use tracing::debug;

/// One row of a PVT record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PvtSample {
    /// Inner coordinate (pressure for live oil, Rv for wet gas).
    pub inner: Real,
    /// Formation volume factor.
    pub b: Real,
    /// Viscosity [Pa s].
    pub mu: Real,
}

impl PvtSample {
    pub fn new(inner: Real, b: Real, mu: Real) -> Self {
        Self { inner, b, mu }
    }
}

/// An outer node of a PVT table together with its inner samples.
///
/// The first sample describes the saturated state.
#[derive(Debug, Clone, PartialEq)]
pub struct PvtRecord {
    /// Outer coordinate (Rs for live oil, pressure for wet gas).
    pub outer: Real,
    pub samples: Vec<PvtSample>,
}

impl PvtRecord {
    pub fn new(outer: Real, samples: Vec<PvtSample>) -> Self {
        Self { outer, samples }
    }

    /// The saturated (first) sample.
    pub fn saturated(&self) -> Option<&PvtSample> {
        self.samples.first()
    }
}

/// Extend every single-sample record using the next record with two or more
/// samples as a template. Returns the number of records that were extended.
pub fn extend_undersaturated(records: &mut [PvtRecord]) -> TableResult<usize> {
    let mut extended = 0;

    for idx in 0..records.len() {
        match records[idx].samples.len() {
            0 => return Err(TableError::EmptyRecord { index: idx }),
            1 => {}
            _ => continue,
        }

        let master_idx = (idx + 1..records.len())
            .find(|&j| records[j].samples.len() > 1)
            .ok_or(TableError::MissingMasterRecord { index: idx })?;

        let master = &records[master_idx].samples;
        let first = master[0];
        for (what, value) in [("inner", first.inner), ("b", first.b), ("mu", first.mu)] {
            if value == 0.0 {
                return Err(TableError::DegenerateMaster {
                    index: master_idx,
                    what,
                });
            }
        }

        let base = records[idx].samples[0];
        let synthesized: Vec<PvtSample> = master[1..]
            .iter()
            .map(|s| PvtSample {
                inner: base.inner * (s.inner / first.inner),
                b: base.b * (s.b / first.b),
                mu: base.mu * (s.mu / first.mu),
            })
            .collect();

        debug!(
            record = idx,
            master = master_idx,
            added = synthesized.len(),
            "extended PVT record from master"
        );
        records[idx].samples.extend(synthesized);
        extended += 1;
    }

    Ok(extended)
}
