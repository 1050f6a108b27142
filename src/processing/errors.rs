//! Errors for the post-processing stages (returns preparation, price
//! reconstruction, noise injection, and report assembly).
//!
//! [`ProcessingError`] wraps [`SwitchError`] so a full pipeline run reports
//! a single error type, and maps `statrs` constructor errors for the noise
//! distribution.
#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};
use statrs::distribution::NormalError;

use crate::switching::errors::SwitchError;

/// Result alias for post-processing operations.
pub type ProcessingResult<T> = Result<T, ProcessingError>;

#[derive(Debug, Clone, PartialEq)]
pub enum ProcessingError {
    // ---- Input validation ----
    /// Price series needs at least two observations to yield a return.
    TooFewPrices { len: usize },

    /// A price is NaN/±inf.
    NonFinitePrice { index: usize, value: f64 },

    /// A price is exactly zero; the next return is undefined.
    ZeroPrice { index: usize },

    /// A series value is NaN/±inf.
    NonFiniteValue { index: usize, value: f64 },

    /// Reconstruction anchor must be finite and non-zero.
    InvalidAnchor { value: f64 },

    /// Noise level must be finite and ≥ 0.
    InvalidNoiseLevel { value: f64 },

    // ---- Wrapped ----
    /// Wrapper for statrs::distribution::NormalError.
    InvalidNormalParam { reason: &'static str },

    /// Failure in the switching process.
    Switching(SwitchError),
}

impl std::error::Error for ProcessingError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ProcessingError::Switching(err) => Some(err),
            _ => None,
        }
    }
}

impl std::fmt::Display for ProcessingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProcessingError::TooFewPrices { len } => {
                write!(f, "At least two prices are needed to compute returns; got {len}")
            }
            ProcessingError::NonFinitePrice { index, value } => {
                write!(f, "Price at index {index} is non-finite: {value}")
            }
            ProcessingError::ZeroPrice { index } => {
                write!(f, "Price at index {index} is zero; the following return is undefined")
            }
            ProcessingError::NonFiniteValue { index, value } => {
                write!(f, "Series value at index {index} is non-finite: {value}")
            }
            ProcessingError::InvalidAnchor { value } => {
                write!(f, "Reconstruction anchor must be finite and non-zero; got: {value}")
            }
            ProcessingError::InvalidNoiseLevel { value } => {
                write!(f, "Noise level must be finite and >= 0; got: {value}")
            }
            ProcessingError::InvalidNormalParam { reason } => {
                write!(f, "Invalid normal distribution parameter: {reason}")
            }
            ProcessingError::Switching(err) => write!(f, "Switching process failed: {err}"),
        }
    }
}

impl From<SwitchError> for ProcessingError {
    fn from(err: SwitchError) -> ProcessingError {
        ProcessingError::Switching(err)
    }
}

impl From<NormalError> for ProcessingError {
    fn from(err: NormalError) -> ProcessingError {
        let reason = match err {
            NormalError::MeanInvalid => "mean is NaN",
            NormalError::StandardDeviationInvalid => "standard deviation is NaN or not positive",
            _ => "unrecognized normal distribution error",
        };
        ProcessingError::InvalidNormalParam { reason }
    }
}

#[cfg(feature = "python-bindings")]
impl From<ProcessingError> for PyErr {
    fn from(err: ProcessingError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}
