//! Simulation parameters — configuration for one switching run.
//!
//! Purpose
//! -------
//! Collect every knob the switching core reads (horizon, switching
//! probabilities, sharpness presets, dwell time, blend function, and the
//! optional transition map) in one validated, read-only carrier.
//!
//! Key behaviors
//! -------------
//! - [`SimulationParameters`] is a plain data struct with a documented
//!   [`Default`] and a [`SimulationParameters::validate`] pass that rejects
//!   malformed values up front.
//! - [`BlendFunction`] selects linear or sigmoid-warped blending and parses
//!   from the configuration names `"linear"` / `"sig"`.
//! - [`TransitionMap`] holds scheduled switches as
//!   `(iteration, duration, target_model_id)` triples and refuses to be
//!   built from a non-increasing sequence.
//!
//! Invariants & assumptions
//! ------------------------
//! - A [`TransitionMap`] obtained through [`TransitionMap::new`] (or through
//!   `serde` with the `serde` feature) has strictly increasing iterations.
//! - The core never mutates parameters; the scheduler keeps its own cursor
//!   into the transition map.
//!
//! Conventions
//! -----------
//! - `periods` and transition iterations are 0-based period indices.
//! - `seed` and `white_noise_level` are carried for the surrounding pipeline
//!   (RNG construction and the noise stage); the state machine itself does
//!   not read them.
//! - With the `serde` feature, missing fields fall back to [`Default`] and
//!   transition-map entries use the compact triple form.
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::switching::{
    core::{
        kind::SharpnessTable,
        validation::{
            validate_periods, validate_probability, validate_sharpness,
            validate_transition_entries,
        },
    },
    errors::{SwitchError, SwitchResult},
};

/// How blend weights are applied to the two forecasts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum BlendFunction {
    /// Use the linear weight pair directly.
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "linear"))]
    Linear,
    /// Warp the linear pair through the sigmoid kernel.
    #[cfg_attr(feature = "serde", serde(rename = "sig", alias = "sigmoid"))]
    Sigmoid,
}

impl FromStr for BlendFunction {
    type Err = SwitchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "linear" => Ok(BlendFunction::Linear),
            "sig" | "sigmoid" => Ok(BlendFunction::Sigmoid),
            other => Err(SwitchError::UnknownBlendFunction { name: other.to_string() }),
        }
    }
}

impl std::fmt::Display for BlendFunction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BlendFunction::Linear => f.write_str("linear"),
            BlendFunction::Sigmoid => f.write_str("sig"),
        }
    }
}

/// One scheduled switch.
///
/// Fields
/// ------
/// - `iteration`: period at which the switch starts.
/// - `duration`: number of extra periods the blend should take.
/// - `target_model_id`: model that takes over (1-based).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(from = "(usize, usize, usize)", into = "(usize, usize, usize)")
)]
pub struct TransitionEntry {
    pub iteration: usize,
    pub duration: usize,
    pub target_model_id: usize,
}

impl TransitionEntry {
    pub fn new(iteration: usize, duration: usize, target_model_id: usize) -> TransitionEntry {
        TransitionEntry { iteration, duration, target_model_id }
    }

    /// Per-period increment that completes the blend `duration` periods
    /// after it starts: `100 / (duration + 1) / 100`.
    pub fn sharpness(&self) -> f64 {
        100.0 / (self.duration as f64 + 1.0) / 100.0
    }
}

impl From<(usize, usize, usize)> for TransitionEntry {
    fn from((iteration, duration, target_model_id): (usize, usize, usize)) -> Self {
        TransitionEntry { iteration, duration, target_model_id }
    }
}

impl From<TransitionEntry> for (usize, usize, usize) {
    fn from(entry: TransitionEntry) -> Self {
        (entry.iteration, entry.duration, entry.target_model_id)
    }
}

/// TransitionMap — validated, ordered list of scheduled switches.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "Vec<TransitionEntry>", into = "Vec<TransitionEntry>")
)]
pub struct TransitionMap {
    entries: Vec<TransitionEntry>,
}

impl TransitionMap {
    /// Build a map, rejecting non-increasing iterations.
    ///
    /// Errors
    /// ------
    /// - `SwitchError::NonIncreasingTransitionMap` naming the first offending
    ///   entry.
    pub fn new(entries: Vec<TransitionEntry>) -> SwitchResult<TransitionMap> {
        validate_transition_entries(&entries)?;
        Ok(TransitionMap { entries })
    }

    pub fn entries(&self) -> &[TransitionEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl TryFrom<Vec<TransitionEntry>> for TransitionMap {
    type Error = SwitchError;

    fn try_from(entries: Vec<TransitionEntry>) -> Result<Self, Self::Error> {
        TransitionMap::new(entries)
    }
}

impl From<TransitionMap> for Vec<TransitionEntry> {
    fn from(map: TransitionMap) -> Self {
        map.entries
    }
}

/// SimulationParameters — read-only configuration of a switching run.
///
/// Fields
/// ------
/// - `periods`: `usize`
///   Number of periods to generate (≥ 1).
/// - `switching_probability`: `f64`
///   Per-period probability that a random switch starts, in `[0, 1]`.
/// - `abrupt_drift_prob`: `f64`
///   Probability that a started random switch is abrupt rather than
///   gradual, in `[0, 1]`.
/// - `gradual_drift_sharpness`, `abrupt_drift_sharpness`: `f64`
///   Per-period weight increments (> 0; values below 0.1 are floored).
/// - `min_model_len`: `usize`
///   Steady-state periods required after a completed switch before another
///   may start.
/// - `w_func`: [`BlendFunction`]
///   Linear or sigmoid-warped blending.
/// - `use_transition_map`: `bool`
///   Use `transition_map` instead of random switching.
/// - `transition_map`: [`TransitionMap`]
///   Scheduled switches, consumed in order.
/// - `white_noise_level`: `f64`
///   Noise level for the post-processing stage (≥ 0).
/// - `seed`: `Option<u64>`
///   RNG seed for reproducible runs; `None` draws from system entropy.
///
/// Notes
/// -----
/// The default is a 1000-period probabilistic run with rare switches:
/// `switching_probability = 0.01`, `abrupt_drift_prob = 0.3`,
/// `gradual = 0.1`, `abrupt = 0.5`, `min_model_len = 50`, linear blending,
/// `white_noise_level = 0.1`, no seed.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimulationParameters {
    pub periods: usize,
    pub switching_probability: f64,
    pub abrupt_drift_prob: f64,
    pub gradual_drift_sharpness: f64,
    pub abrupt_drift_sharpness: f64,
    pub min_model_len: usize,
    pub w_func: BlendFunction,
    pub use_transition_map: bool,
    pub transition_map: TransitionMap,
    pub white_noise_level: f64,
    pub seed: Option<u64>,
}

impl SimulationParameters {
    /// Check every field that has a domain constraint.
    ///
    /// Errors
    /// ------
    /// - `InvalidPeriods`, `InvalidProbability`, `InvalidSharpness` for the
    ///   corresponding field.
    /// - `NonIncreasingTransitionMap` if the map was assembled by hand.
    pub fn validate(&self) -> SwitchResult<()> {
        validate_periods(self.periods)?;
        validate_probability("switching_probability", self.switching_probability)?;
        validate_probability("abrupt_drift_prob", self.abrupt_drift_prob)?;
        validate_sharpness("gradual_drift_sharpness", self.gradual_drift_sharpness)?;
        validate_sharpness("abrupt_drift_sharpness", self.abrupt_drift_sharpness)?;
        validate_transition_entries(self.transition_map.entries())?;
        if !self.white_noise_level.is_finite() || self.white_noise_level < 0.0 {
            return Err(SwitchError::InvalidNoiseLevel { value: self.white_noise_level });
        }
        Ok(())
    }

    /// Gradual/abrupt sharpness presets (predefined slot empty).
    pub fn sharpness_table(&self) -> SharpnessTable {
        SharpnessTable::new(self.gradual_drift_sharpness, self.abrupt_drift_sharpness)
    }
}

impl Default for SimulationParameters {
    fn default() -> Self {
        SimulationParameters {
            periods: 1000,
            switching_probability: 0.01,
            abrupt_drift_prob: 0.3,
            gradual_drift_sharpness: 0.1,
            abrupt_drift_sharpness: 0.5,
            min_model_len: 50,
            w_func: BlendFunction::Linear,
            use_transition_map: false,
            transition_map: TransitionMap::default(),
            white_noise_level: 0.1,
            seed: None,
        }
    }
}
