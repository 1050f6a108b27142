//! ARMA(p, d, q) forecaster with known coefficients.
//!
//! Purpose
//! -------
//! Provide a concrete [`ForecastModel`] for regimes whose coefficients were
//! estimated elsewhere. Nothing here fits; the model only evaluates the
//! one-step-ahead conditional mean.
//!
//! Key behaviors
//! -------------
//! - Difference the history `d` times, rebuild in-sample residuals with the
//!   ARMA recursion, forecast the next differenced value, then integrate
//!   back `d` times using the last value of each differencing level.
//! - Validate coefficient lengths against `(p, q)` and finiteness of every
//!   coefficient at construction.
//!
//! Invariants & assumptions
//! ------------------------
//! - Pre-sample observations and residuals are zero. A short history
//!   therefore degrades gracefully toward the intercept.
//! - Histories with NaN/±inf are rejected, as are non-finite forecasts.
//!
//! Conventions
//! -----------
//! - `ar[i]` multiplies `y_{t-1-i}` and `ma[j]` multiplies `e_{t-1-j}`.
//! - `intercept` is the constant of the differenced process, not its mean.
use ndarray::{Array1, ArrayView1};

use crate::switching::{
    errors::{ModelError, ModelResult},
    models::pool::{ForecastModel, ModelLags},
};

/// ArmaModel — fitted ARIMA-style regime model.
///
/// Fields
/// ------
/// - `id`: 1-based pool id.
/// - `input_ts`: series the coefficients were fitted on (returns scale).
/// - `lags`: `(p, d, q)` orders.
/// - `intercept`: constant term `c`.
/// - `ar`: `φ_1..φ_p`.
/// - `ma`: `θ_1..θ_q`.
/// - `rec_price`: last observed price of the fitting data, if known.
#[derive(Debug, Clone, PartialEq)]
pub struct ArmaModel {
    id: usize,
    input_ts: Array1<f64>,
    lags: ModelLags,
    intercept: f64,
    ar: Array1<f64>,
    ma: Array1<f64>,
    rec_price: Option<f64>,
}

impl ArmaModel {
    /// Build a model from known coefficients.
    ///
    /// Errors
    /// ------
    /// - `ModelError::CoefficientLength` if `ar.len() != p` or
    ///   `ma.len() != q`.
    /// - `ModelError::NonFiniteCoefficient` for a NaN/±inf intercept or
    ///   coefficient.
    pub fn new(
        id: usize, input_ts: Array1<f64>, lags: ModelLags, intercept: f64, ar: Array1<f64>,
        ma: Array1<f64>, rec_price: Option<f64>,
    ) -> ModelResult<ArmaModel> {
        check_coefficients("ar", ar.view(), lags.p)?;
        check_coefficients("ma", ma.view(), lags.q)?;
        if !intercept.is_finite() {
            return Err(ModelError::NonFiniteCoefficient {
                which: "intercept",
                index: 0,
                value: intercept,
            });
        }
        Ok(ArmaModel { id, input_ts, lags, intercept, ar, ma, rec_price })
    }

    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    pub fn ar(&self) -> ArrayView1<'_, f64> {
        self.ar.view()
    }

    pub fn ma(&self) -> ArrayView1<'_, f64> {
        self.ma.view()
    }

    /// Conditional mean of `y_t` given `y_{..t}` and `e_{..t}`.
    fn conditional_mean(&self, y: ArrayView1<'_, f64>, e: ArrayView1<'_, f64>, t: usize) -> f64 {
        self.intercept
            + self.ar.dot(&lagged(y, t, self.lags.p))
            + self.ma.dot(&lagged(e, t, self.lags.q))
    }
}

fn check_coefficients(
    which: &'static str, coef: ArrayView1<'_, f64>, order: usize,
) -> ModelResult<()> {
    if coef.len() != order {
        return Err(ModelError::CoefficientLength { which, expected: order, actual: coef.len() });
    }
    if let Some((index, &value)) = coef.iter().enumerate().find(|(_, v)| !v.is_finite()) {
        return Err(ModelError::NonFiniteCoefficient { which, index, value });
    }
    Ok(())
}

/// `[v_{t-1}, v_{t-2}, …, v_{t-order}]`, zero before the sample start.
fn lagged(values: ArrayView1<'_, f64>, t: usize, order: usize) -> Array1<f64> {
    Array1::from_shape_fn(order, |i| if i < t { values[t - 1 - i] } else { 0.0 })
}

impl ForecastModel for ArmaModel {
    fn id(&self) -> usize {
        self.id
    }

    fn lags(&self) -> ModelLags {
        self.lags
    }

    fn input_ts(&self) -> ArrayView1<'_, f64> {
        self.input_ts.view()
    }

    fn forecast(&self, history: ArrayView1<'_, f64>) -> ModelResult<f64> {
        if let Some((index, &value)) = history.iter().enumerate().find(|(_, v)| !v.is_finite()) {
            return Err(ModelError::NonFiniteHistory { index, value });
        }

        let mut level: Vec<f64> = history.to_vec();
        let mut anchors: Vec<Option<f64>> = Vec::with_capacity(self.lags.d);
        for _ in 0..self.lags.d {
            anchors.push(level.last().copied());
            level = level.windows(2).map(|w| w[1] - w[0]).collect();
        }

        let y = Array1::from(level);
        let mut resid = Array1::<f64>::zeros(y.len());
        for t in 0..y.len() {
            resid[t] = y[t] - self.conditional_mean(y.view(), resid.view(), t);
        }

        let mut value = self.conditional_mean(y.view(), resid.view(), y.len());
        value += anchors.iter().flatten().sum::<f64>();

        if !value.is_finite() {
            return Err(ModelError::NonFiniteForecast { value });
        }
        Ok(value)
    }

    fn rec_price(&self) -> Option<f64> {
        self.rec_price
    }
}
