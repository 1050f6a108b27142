//! Returns preparation and price reconstruction.
//!
//! Purpose
//! -------
//! Convert a price series into percentage returns (the scale regime models
//! are fitted and forecast on), and turn a generated return series back
//! into prices starting from a reconstruction anchor.
//!
//! Conventions
//! -----------
//! - Returns are in percent: `r_t = 100 * (p_t / p_{t-1} - 1)`.
//! - Reconstruction compounds from the anchor:
//!   `price_t = price_{t-1} * (1 + r_t / 100)` with `price_{-1} = anchor`,
//!   one price per return.
use ndarray::{Array1, ArrayView1};

use crate::processing::errors::{ProcessingError, ProcessingResult};

/// Percentage returns of a price series (length `n - 1`).
///
/// Errors
/// ------
/// - `ProcessingError::TooFewPrices` for fewer than two prices.
/// - `ProcessingError::NonFinitePrice` for NaN/±inf prices.
/// - `ProcessingError::ZeroPrice` for a zero price that would be divided by.
pub fn pct_returns(prices: ArrayView1<'_, f64>) -> ProcessingResult<Array1<f64>> {
    if prices.len() < 2 {
        return Err(ProcessingError::TooFewPrices { len: prices.len() });
    }
    for (index, &value) in prices.iter().enumerate() {
        if !value.is_finite() {
            return Err(ProcessingError::NonFinitePrice { index, value });
        }
        if value == 0.0 && index + 1 < prices.len() {
            return Err(ProcessingError::ZeroPrice { index });
        }
    }
    let returns = prices
        .windows(2)
        .into_iter()
        .map(|w| 100.0 * (w[1] / w[0] - 1.0))
        .collect::<Vec<f64>>();
    Ok(Array1::from(returns))
}

/// Compound percentage `returns` into prices starting from `anchor`.
///
/// Errors
/// ------
/// - `ProcessingError::InvalidAnchor` for a NaN/±inf or zero anchor.
/// - `ProcessingError::NonFiniteValue` for NaN/±inf returns.
pub fn reconstruct_prices(
    returns: ArrayView1<'_, f64>, anchor: f64,
) -> ProcessingResult<Array1<f64>> {
    if !anchor.is_finite() || anchor == 0.0 {
        return Err(ProcessingError::InvalidAnchor { value: anchor });
    }
    let mut prices = Vec::with_capacity(returns.len());
    let mut level = anchor;
    for (index, &r) in returns.iter().enumerate() {
        if !r.is_finite() {
            return Err(ProcessingError::NonFiniteValue { index, value: r });
        }
        level *= 1.0 + r / 100.0;
        prices.push(level);
    }
    Ok(Array1::from(prices))
}
