//! Sigmoid kernel — quantized nonlinear warping of blend weights.
//!
//! Purpose
//! -------
//! Warp the linear `(old, new)` blend pair through a logistic curve so that
//! switches ease in and out instead of moving at a constant rate. The curve
//! is tabulated once into 101 buckets and read by bucket index only.
//!
//! Key behaviors
//! -------------
//! - [`SigmoidKernel::global`] returns the process-wide table, built on first
//!   use and never mutated afterwards.
//! - [`SigmoidKernel::bucket`] quantizes a linear `old` weight as
//!   `round(old * 100)`, clamped into `0..=100`.
//! - [`SigmoidKernel::warp`] maps a linear pair to
//!   `(table[bucket], 1 - table[bucket])`.
//!
//! Invariants & assumptions
//! ------------------------
//! - `table[0] == 0`, `table[100] == 1`, and the table is strictly
//!   increasing, so the steady pair `(1, 0)` and the terminal pair `(0, 1)`
//!   are fixed points of the warp.
//! - Warped pairs sum to 1 within rounding of a single subtraction.
//! - The logistic is rescaled so its endpoints land exactly on 0 and 1; the
//!   curve is symmetric around bucket 50.
//!
//! Conventions
//! -----------
//! - Steepness is fixed at [`SIGMOID_STEEPNESS`]; changing it changes every
//!   blend curve, so it is a constant rather than a configuration knob.
use std::sync::OnceLock;

use crate::switching::core::weights::WeightPair;

/// Number of quantization buckets (weights 0.00, 0.01, …, 1.00).
pub const SIGMOID_BUCKETS: usize = 101;

/// Logistic steepness across the unit interval.
pub const SIGMOID_STEEPNESS: f64 = 10.0;

static KERNEL: OnceLock<SigmoidKernel> = OnceLock::new();

fn logistic(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// SigmoidKernel — 101-entry lookup of warped outgoing weights.
///
/// `table[i]` is the warped weight on the outgoing model for a linear
/// outgoing weight of `i / 100`.
#[derive(Debug, Clone, PartialEq)]
pub struct SigmoidKernel {
    table: [f64; SIGMOID_BUCKETS],
}

impl SigmoidKernel {
    /// Shared kernel, built on first access.
    pub fn global() -> &'static SigmoidKernel {
        KERNEL.get_or_init(SigmoidKernel::build)
    }

    fn build() -> SigmoidKernel {
        let half = SIGMOID_STEEPNESS / 2.0;
        let lo = logistic(-half);
        let hi = logistic(half);
        let last = (SIGMOID_BUCKETS - 1) as f64;
        let mut table = [0.0; SIGMOID_BUCKETS];
        for (i, slot) in table.iter_mut().enumerate() {
            let x = SIGMOID_STEEPNESS * (i as f64 / last - 0.5);
            *slot = (logistic(x) - lo) / (hi - lo);
        }
        table[0] = 0.0;
        table[SIGMOID_BUCKETS - 1] = 1.0;
        SigmoidKernel { table }
    }

    /// Bucket index for a linear outgoing weight.
    pub fn bucket(old: f64) -> usize {
        let last = SIGMOID_BUCKETS - 1;
        let scaled = (old * last as f64).round();
        if scaled <= 0.0 {
            0
        } else {
            (scaled as usize).min(last)
        }
    }

    /// Warp a linear pair through the table.
    pub fn warp(&self, linear: WeightPair) -> WeightPair {
        let old = self.table[Self::bucket(linear.old)];
        WeightPair { old, new: 1.0 - old }
    }

    pub fn table(&self) -> &[f64; SIGMOID_BUCKETS] {
        &self.table
    }
}
