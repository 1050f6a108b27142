//! Weight schedule — linear (old, new) blend weights and their per-period step.
//!
//! Purpose
//! -------
//! Own the convex-combination weights applied to the outgoing and incoming
//! model forecasts during a regime switch, and the single rule that moves
//! them one period forward.
//!
//! Key behaviors
//! -------------
//! - [`WeightPair::reset`] returns the steady-state pair `(1, 0)`.
//! - [`WeightPair::advance`] shifts `sharpness` mass from the old side to the
//!   new side and clamps each side into `[0, 1]` without renormalizing.
//! - [`floor_sharpness`] replaces increments below [`SHARPNESS_FLOOR`] with the
//!   floor and emits a `warn!` event. Callers invoke it once per switch;
//!   [`WeightPair::advance`] applies the same floor silently.
//!
//! Invariants & assumptions
//! ------------------------
//! - Starting from a pair that sums to 1, symmetric increments keep the sum
//!   at 1; when a side would cross its bound the pair lands exactly on the
//!   terminal `(0, 1)`.
//! - A side within [`WEIGHT_TOLERANCE`] of its bound is snapped to it, so `k`
//!   increments of `1/k` complete in exactly `k` steps despite rounding.
//! - `new == 1` is the completion signal; `0 < new < 1` means a blend is in
//!   progress.
//!
//! Conventions
//! -----------
//! - `old` weights the outgoing (current) model, `new` the incoming one.
//! - Sharpness is validated (> 0, finite) upstream by the configuration
//!   layer; this module only applies the floor.
//!
//! Testing notes
//! -------------
//! - Unit tests cover the `0.25` schedule reaching `(0, 1)` on the fourth
//!   step, flooring equivalence (`0.05` behaves as `0.1`), snapping under
//!   accumulated rounding, and sum conservation along every schedule.
//! - The flooring warning is asserted with a counting `tracing` layer.
use tracing::warn;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Minimum per-period weight increment.
pub const SHARPNESS_FLOOR: f64 = 0.1;

/// Absolute tolerance for weight-sum checks and bound snapping.
pub const WEIGHT_TOLERANCE: f64 = 1e-9;

/// Clamp a sharpness to [`SHARPNESS_FLOOR`], warning when it had to.
///
/// Values at or above the floor pass through unchanged.
pub fn floor_sharpness(sharpness: f64) -> f64 {
    if sharpness < SHARPNESS_FLOOR {
        warn!(
            requested = sharpness,
            floor = SHARPNESS_FLOOR,
            "switch sharpness below minimum; using the floor instead"
        );
        SHARPNESS_FLOOR
    } else {
        sharpness
    }
}

/// WeightPair — blend weights `(old, new)` for one period.
///
/// Fields
/// ------
/// - `old`: `f64`
///   Weight on the outgoing model's forecast, in `[0, 1]`.
/// - `new`: `f64`
///   Weight on the incoming model's forecast, in `[0, 1]`.
///
/// Invariants
/// ----------
/// - `old + new == 1` within [`WEIGHT_TOLERANCE`] for every pair produced by
///   [`WeightPair::reset`] and [`WeightPair::advance`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WeightPair {
    pub old: f64,
    pub new: f64,
}

impl WeightPair {
    /// Steady state: everything on the current model.
    pub const STEADY: WeightPair = WeightPair { old: 1.0, new: 0.0 };

    /// Terminal state: everything on the incoming model.
    pub const COMPLETE: WeightPair = WeightPair { old: 0.0, new: 1.0 };

    pub fn new(old: f64, new: f64) -> WeightPair {
        WeightPair { old, new }
    }

    /// The canonical steady-state pair `(1, 0)`.
    pub fn reset() -> WeightPair {
        WeightPair::STEADY
    }

    /// Move `sharpness` weight from `old` to `new`.
    ///
    /// Parameters
    /// ----------
    /// - `sharpness`: `f64`
    ///   Per-period increment. Values below [`SHARPNESS_FLOOR`] are floored
    ///   before use, without logging.
    ///
    /// Returns
    /// -------
    /// `WeightPair`
    ///   `(max(0, old - s), min(1, new + s))`, snapped to `(0, 1)` when either
    ///   side reaches its bound within [`WEIGHT_TOLERANCE`].
    ///
    /// Examples
    /// --------
    /// ```rust
    /// # use regime_drift::switching::core::weights::WeightPair;
    /// let w = WeightPair::reset().advance(0.25);
    /// assert_eq!(w, WeightPair::new(0.75, 0.25));
    /// ```
    pub fn advance(self, sharpness: f64) -> WeightPair {
        let step = sharpness.max(SHARPNESS_FLOOR);
        let old = self.old - step;
        let new = self.new + step;
        if old <= WEIGHT_TOLERANCE || new >= 1.0 - WEIGHT_TOLERANCE {
            WeightPair::COMPLETE
        } else {
            WeightPair { old, new }
        }
    }

    /// `true` while strictly between steady state and completion.
    pub fn is_blending(&self) -> bool {
        self.new > 0.0 && self.new < 1.0
    }

    /// `true` once the incoming side carries all the weight.
    pub fn is_complete(&self) -> bool {
        self.new == 1.0
    }

    pub fn sum(&self) -> f64 {
        self.old + self.new
    }

    /// `true` when `old + new` is 1 within [`WEIGHT_TOLERANCE`].
    pub fn is_conserved(&self) -> bool {
        (self.sum() - 1.0).abs() <= WEIGHT_TOLERANCE
    }
}

impl Default for WeightPair {
    fn default() -> Self {
        WeightPair::STEADY
    }
}
