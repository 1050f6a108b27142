//! Errors for the switching core (configuration checks, state-machine
//! invariants, and failures reported by forecasting collaborators).
//!
//! This module defines the core error type, [`SwitchError`], and the error
//! type returned by model forecasting capabilities, [`ModelError`]. Both
//! implement `Display`/`Error` and convert to `PyErr` when the
//! `python-bindings` feature is enabled.
//!
//! ## Conventions
//! - **Periods are 0-based**; model ids are **1-based** and contiguous.
//! - Every variant belongs to exactly one [`ErrorCategory`]: configuration
//!   errors are raised before the first period runs, invariant violations
//!   indicate a bug in the state machine, and collaborator failures carry the
//!   model id and period at which the forecast failed.
//! - Nothing in the core retries on error; the only self-correcting behavior
//!   is sharpness flooring, which is logged rather than reported here.
#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

/// Result alias for switching-core operations that may produce [`SwitchError`].
pub type SwitchResult<T> = Result<T, SwitchError>;

/// Result alias for forecasting capabilities that may produce [`ModelError`].
pub type ModelResult<T> = Result<T, ModelError>;

/// Coarse classification of [`SwitchError`] variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Rejected before the run starts.
    Configuration,
    /// The state machine reached a state it should never reach.
    StateInvariant,
    /// A forecasting collaborator failed mid-run.
    Collaborator,
}

/// Unified error type for the switching core.
#[derive(Debug, Clone, PartialEq)]
pub enum SwitchError {
    // ---- Configuration ----
    /// `periods` must be at least 1.
    InvalidPeriods { periods: usize },

    /// Noise level must be finite and ≥ 0.
    InvalidNoiseLevel { value: f64 },

    /// A probability is NaN or outside [0, 1].
    InvalidProbability { name: &'static str, value: f64 },

    /// A sharpness is non-finite or ≤ 0.
    InvalidSharpness { name: &'static str, value: f64 },

    /// Transition-map iterations must be strictly increasing.
    NonIncreasingTransitionMap { index: usize, previous: usize, iteration: usize },

    /// Transition-map target id is 0 or absent from the pool.
    UnknownTargetModel { target: usize, pool_size: usize },

    /// Probabilistic switching needs at least two models to pick from.
    SingleModelPool,

    /// The model pool holds no models.
    EmptyModelPool,

    /// Model ids must be exactly `1..=n`.
    NonContiguousModelIds { expected: usize, found: usize },

    /// Blend function name is neither `linear` nor `sig`.
    UnknownBlendFunction { name: String },

    /// Rejection sampling ran out of attempts.
    SelectionExhausted { current: usize, attempts: usize },

    // ---- State-machine invariants ----
    /// The recorded weight pair does not sum to 1.
    WeightSumViolation { period: usize, w_old: f64, w_new: f64 },

    /// PREDEFINED was chosen without a transition-map entry backing it.
    MissingTransitionEntry { period: usize },

    /// A model id referenced by the state is not in the pool.
    UnknownModel { model_id: usize },

    // ---- Collaborators ----
    /// Forecasting capability failed for a model at a period.
    ForecastFailed { model_id: usize, period: usize, source: ModelError },
}

impl SwitchError {
    /// Category this error belongs to.
    pub fn category(&self) -> ErrorCategory {
        match self {
            SwitchError::InvalidPeriods { .. }
            | SwitchError::InvalidNoiseLevel { .. }
            | SwitchError::InvalidProbability { .. }
            | SwitchError::InvalidSharpness { .. }
            | SwitchError::NonIncreasingTransitionMap { .. }
            | SwitchError::UnknownTargetModel { .. }
            | SwitchError::SingleModelPool
            | SwitchError::EmptyModelPool
            | SwitchError::NonContiguousModelIds { .. }
            | SwitchError::UnknownBlendFunction { .. }
            | SwitchError::SelectionExhausted { .. } => ErrorCategory::Configuration,
            SwitchError::WeightSumViolation { .. }
            | SwitchError::MissingTransitionEntry { .. }
            | SwitchError::UnknownModel { .. } => ErrorCategory::StateInvariant,
            SwitchError::ForecastFailed { .. } => ErrorCategory::Collaborator,
        }
    }
}

impl std::error::Error for SwitchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SwitchError::ForecastFailed { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl std::fmt::Display for SwitchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Configuration ----
            SwitchError::InvalidPeriods { periods } => {
                write!(f, "periods must be at least 1; got: {periods}")
            }
            SwitchError::InvalidNoiseLevel { value } => {
                write!(f, "white_noise_level must be finite and >= 0; got: {value}")
            }
            SwitchError::InvalidProbability { name, value } => {
                write!(f, "{name} must be a probability in [0, 1]; got: {value}")
            }
            SwitchError::InvalidSharpness { name, value } => {
                write!(f, "{name} must be finite and > 0; got: {value}")
            }
            SwitchError::NonIncreasingTransitionMap { index, previous, iteration } => {
                write!(
                    f,
                    "Transition map iterations must be strictly increasing: entry {index} has \
                     iteration {iteration} after {previous}"
                )
            }
            SwitchError::UnknownTargetModel { target, pool_size } => {
                write!(
                    f,
                    "Transition target model {target} is not in the pool (valid ids: 1..={pool_size})"
                )
            }
            SwitchError::SingleModelPool => {
                write!(f, "Probabilistic switching requires at least two models in the pool.")
            }
            SwitchError::EmptyModelPool => write!(f, "Model pool is empty."),
            SwitchError::NonContiguousModelIds { expected, found } => {
                write!(f, "Model ids must be contiguous from 1: expected {expected}, found {found}")
            }
            SwitchError::UnknownBlendFunction { name } => {
                write!(f, "Unknown blend function {name:?} (expected 'linear' or 'sig')")
            }
            SwitchError::SelectionExhausted { current, attempts } => {
                write!(
                    f,
                    "Could not select a model different from {current} after {attempts} draws."
                )
            }
            // ---- State-machine invariants ----
            SwitchError::WeightSumViolation { period, w_old, w_new } => {
                write!(
                    f,
                    "Weight pair ({w_old}, {w_new}) at period {period} does not sum to 1."
                )
            }
            SwitchError::MissingTransitionEntry { period } => {
                write!(f, "PREDEFINED switch at period {period} has no transition map entry.")
            }
            SwitchError::UnknownModel { model_id } => {
                write!(f, "Model {model_id} is not in the pool.")
            }
            // ---- Collaborators ----
            SwitchError::ForecastFailed { model_id, period, source } => {
                write!(f, "Forecast of model {model_id} failed at period {period}: {source}")
            }
        }
    }
}

/// Errors reported by a model's forecasting capability.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelError {
    /// A history value is NaN/±inf.
    NonFiniteHistory { index: usize, value: f64 },

    /// The forecast itself came out NaN/±inf.
    NonFiniteForecast { value: f64 },

    /// Coefficient vector length does not match the declared order.
    CoefficientLength { which: &'static str, expected: usize, actual: usize },

    /// A coefficient is NaN/±inf.
    NonFiniteCoefficient { which: &'static str, index: usize, value: f64 },

    /// Opaque failure from an external backend (e.g. a Python model).
    Backend { status: String },
}

impl std::error::Error for ModelError {}

impl std::fmt::Display for ModelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModelError::NonFiniteHistory { index, value } => {
                write!(f, "History value at index {index} is non-finite: {value}")
            }
            ModelError::NonFiniteForecast { value } => {
                write!(f, "Forecast is non-finite: {value}")
            }
            ModelError::CoefficientLength { which, expected, actual } => {
                write!(f, "{which} coefficients must have length {expected}; got {actual}")
            }
            ModelError::NonFiniteCoefficient { which, index, value } => {
                write!(f, "{which} coefficient at index {index} is non-finite: {value}")
            }
            ModelError::Backend { status } => write!(f, "Model backend failed: {status}"),
        }
    }
}

#[cfg(feature = "python-bindings")]
impl From<SwitchError> for PyErr {
    fn from(err: SwitchError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}

#[cfg(feature = "python-bindings")]
impl From<ModelError> for PyErr {
    fn from(err: ModelError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}
