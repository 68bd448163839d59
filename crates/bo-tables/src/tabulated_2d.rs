//! Tabulated function of two variables on an irregular grid.
//!
//! The grid is a sequence of outer nodes `x_i` (strictly increasing). Each
//! outer node carries its own, independently sized, sequence of inner samples
//! `(y_ij, v_ij)`. Evaluation interpolates along `y` within the two outer nodes
//! bracketing `x` and blends both results linearly in `x`.

use crate::error::{TableError, TableResult};
use crate::segment_index;
use bo_core::{Evaluation, Real};

#[derive(Debug, Clone, PartialEq)]
struct OuterNode {
    x: Real,
    ys: Vec<Real>,
    values: Vec<Real>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Tabulated2d {
    nodes: Vec<OuterNode>,
    /// Outer coordinates, cached for the binary search.
    xs: Vec<Real>,
    finalized: bool,
}

impl Tabulated2d {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a new outer node and return its index.
    ///
    /// Only legal before `finalize`.
    pub fn append_x_pos(&mut self, x: Real) -> usize {
        debug_assert!(!self.finalized, "append_x_pos on a finalized 2-D table");
        self.nodes.push(OuterNode {
            x,
            ys: Vec::new(),
            values: Vec::new(),
        });
        self.xs.push(x);
        self.nodes.len() - 1
    }

    /// Append an inner sample to outer node `x_idx` and return its index.
    ///
    /// Only legal before `finalize`.
    pub fn append_sample_point(&mut self, x_idx: usize, y: Real, value: Real) -> usize {
        debug_assert!(!self.finalized, "append_sample_point on a finalized 2-D table");
        let node = &mut self.nodes[x_idx];
        node.ys.push(y);
        node.values.push(value);
        node.ys.len() - 1
    }

    /// Sort every node's inner samples and check the grid invariants.
    ///
    /// Calling this more than once is harmless.
    pub fn finalize(&mut self) -> TableResult<()> {
        if self.nodes.is_empty() {
            return Err(TableError::TooFewSamples {
                what: "2-D table outer nodes",
                len: 0,
            });
        }
        if let Some(index) = self.xs.windows(2).position(|w| w[1] <= w[0]) {
            return Err(TableError::NotIncreasing {
                what: "2-D table outer coordinate",
                index: index + 1,
            });
        }

        for node in &mut self.nodes {
            if node.ys.len() < 2 {
                return Err(TableError::TooFewSamples {
                    what: "2-D table inner samples",
                    len: node.ys.len(),
                });
            }
            let mut pairs: Vec<(Real, Real)> =
                node.ys.iter().copied().zip(node.values.iter().copied()).collect();
            pairs.sort_by(|a, b| a.0.total_cmp(&b.0));
            if let Some(index) = pairs.windows(2).position(|w| w[1].0 <= w[0].0) {
                return Err(TableError::NotIncreasing {
                    what: "2-D table inner coordinate",
                    index: index + 1,
                });
            }
            node.ys = pairs.iter().map(|&(y, _)| y).collect();
            node.values = pairs.iter().map(|&(_, v)| v).collect();
        }

        self.finalized = true;
        Ok(())
    }

    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    pub fn num_x(&self) -> usize {
        self.nodes.len()
    }

    pub fn num_y(&self, x_idx: usize) -> usize {
        self.nodes[x_idx].ys.len()
    }

    pub fn x_at(&self, x_idx: usize) -> Real {
        self.nodes[x_idx].x
    }

    pub fn y_at(&self, x_idx: usize, y_idx: usize) -> Real {
        self.nodes[x_idx].ys[y_idx]
    }

    pub fn value_at(&self, x_idx: usize, y_idx: usize) -> Real {
        self.nodes[x_idx].values[y_idx]
    }

    pub fn x_min(&self) -> Real {
        self.xs[0]
    }

    pub fn x_max(&self) -> Real {
        self.xs[self.xs.len() - 1]
    }

    /// Evaluate the function at `(x, y)`.
    pub fn eval<D: Evaluation>(&self, x: D, y: D, extrapolate: bool) -> TableResult<D> {
        debug_assert!(self.finalized, "evaluating a 2-D table before finalize");

        let xv = x.re();
        if !extrapolate && (xv < self.x_min() || xv > self.x_max()) {
            return Err(TableError::OutOfRange {
                x: xv,
                min: self.x_min(),
                max: self.x_max(),
            });
        }

        if self.nodes.len() == 1 {
            return self.eval_inner(0, y, extrapolate);
        }

        let i = segment_index(&self.xs, xv);
        let x0 = self.xs[i];
        let x1 = self.xs[i + 1];
        let alpha = (x - x0) / (x1 - x0);

        let v0 = self.eval_inner(i, y, extrapolate)?;
        let v1 = self.eval_inner(i + 1, y, extrapolate)?;
        Ok(v0 + (v1 - v0) * alpha)
    }

    fn eval_inner<D: Evaluation>(&self, x_idx: usize, y: D, extrapolate: bool) -> TableResult<D> {
        let node = &self.nodes[x_idx];
        let yv = y.re();
        let n = node.ys.len();
        if !extrapolate && (yv < node.ys[0] || yv > node.ys[n - 1]) {
            return Err(TableError::OutOfRange {
                x: yv,
                min: node.ys[0],
                max: node.ys[n - 1],
            });
        }

        let j = segment_index(&node.ys, yv);
        let slope = (node.values[j + 1] - node.values[j]) / (node.ys[j + 1] - node.ys[j]);
        Ok((y - node.ys[j]) * slope + node.values[j])
    }
}
