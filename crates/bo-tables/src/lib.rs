//! bo-tables: tabulated functions used by every black-oil PVT relation.
//!
//! Provides:
//! - `Tabulated1d`: piecewise-linear or monotone-spline function of one variable
//! - `Tabulated2d`: function on an irregular grid where every outer node carries
//!   its own inner sampling
//! - `extend_undersaturated`: completes under-determined PVT record tables
//!
//! All evaluation is generic over `bo_core::Evaluation`, so lookups propagate
//! derivatives when called with dual numbers.

pub mod error;
pub mod extension;
pub mod spline;
pub mod tabulated_1d;
pub mod tabulated_2d;

pub use error::{TableError, TableResult};
pub use extension::{PvtRecord, PvtSample, extend_undersaturated};
pub use tabulated_1d::{Interpolation, Tabulated1d};
pub use tabulated_2d::Tabulated2d;

/// Index `i` of the segment `[xs[i], xs[i + 1]]` used to evaluate at `x`.
///
/// Queries outside the sampled range map to the first or last segment so the
/// caller can extrapolate from it. Requires `xs.len() >= 2`.
pub(crate) fn segment_index(xs: &[f64], x: f64) -> usize {
    debug_assert!(xs.len() >= 2);
    let upper = xs.partition_point(|&xi| xi <= x);
    upper.saturating_sub(1).min(xs.len() - 2)
}

#[cfg(test)]
mod tests {
    use super::segment_index;

    #[test]
    fn segment_index_clamps_to_boundary_segments() {
        let xs = [0.0, 1.0, 2.0, 4.0];
        assert_eq!(segment_index(&xs, -5.0), 0);
        assert_eq!(segment_index(&xs, 0.0), 0);
        assert_eq!(segment_index(&xs, 0.5), 0);
        assert_eq!(segment_index(&xs, 1.0), 1);
        assert_eq!(segment_index(&xs, 3.9), 2);
        assert_eq!(segment_index(&xs, 4.0), 2);
        assert_eq!(segment_index(&xs, 10.0), 2);
    }
}
