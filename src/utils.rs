#[cfg(feature = "python-bindings")]
use ndarray::{Array1, ArrayView1};

#[cfg(feature = "python-bindings")]
use pyo3::{exceptions::PyTypeError, prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use numpy::{
    IntoPyArray, // Array1 → PyArray
    PyReadonlyArray1,
};

#[cfg(feature = "python-bindings")]
use crate::switching::{
    core::params::{BlendFunction, SimulationParameters, TransitionEntry, TransitionMap},
    errors::{ModelError, ModelResult},
    models::pool::{ForecastModel, ModelLags},
};

/// Copy a 1-D numpy array, pandas Series, or float sequence into an
/// `Array1<f64>`. `name` is used in the error message.
#[cfg(feature = "python-bindings")]
pub fn extract_series(raw: &Bound<'_, PyAny>, name: &str) -> PyResult<Array1<f64>> {
    if let Ok(arr) = raw.extract::<PyReadonlyArray1<f64>>() {
        return Ok(arr.as_array().to_owned());
    }

    if let Ok(obj) = raw.call_method("to_numpy", (false,), None) {
        if let Ok(arr) = obj.extract::<PyReadonlyArray1<f64>>() {
            return Ok(arr.as_array().to_owned());
        }
    }

    let vec: Vec<f64> = raw.extract().map_err(|_| {
        PyTypeError::new_err(format!(
            "{name} must be a 1-D numpy.ndarray, pandas.Series, or sequence of float64"
        ))
    })?;
    Ok(Array1::from(vec))
}

/// PyForecastModel — adapter letting a fitted Python model join a pool.
///
/// The wrapped object must expose `forecast(history) -> float` and a
/// `lags` attribute `(p, d, q)`, plus `input_ts` (array-like) and,
/// optionally, `rec_price`. `lags`, `input_ts`, and `rec_price` are read
/// once at construction; `forecast` is called under the GIL every period
/// with the history as a fresh numpy array.
#[cfg(feature = "python-bindings")]
#[derive(Debug)]
pub struct PyForecastModel {
    id: usize,
    lags: ModelLags,
    input_ts: Array1<f64>,
    rec_price: Option<f64>,
    inner: Py<PyAny>,
}

#[cfg(feature = "python-bindings")]
impl PyForecastModel {
    pub fn from_py(obj: &Bound<'_, PyAny>, id: usize) -> PyResult<PyForecastModel> {
        let (p, d, q): (usize, usize, usize) = obj.getattr("lags")?.extract()?;
        let input_ts = extract_series(&obj.getattr("input_ts")?, "input_ts")?;
        let rec_price = match obj.getattr("rec_price") {
            Ok(value) => value.extract::<Option<f64>>()?,
            Err(_) => None,
        };
        Ok(PyForecastModel {
            id,
            lags: ModelLags::new(p, d, q),
            input_ts,
            rec_price,
            inner: obj.clone().unbind(),
        })
    }
}

#[cfg(feature = "python-bindings")]
impl ForecastModel for PyForecastModel {
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
        Python::with_gil(|py| {
            let hist = history.to_owned().into_pyarray(py);
            self.inner.bind(py).call_method1("forecast", (hist,))?.extract::<f64>()
        })
        .map_err(|err| ModelError::Backend { status: err.to_string() })
    }

    fn rec_price(&self) -> Option<f64> {
        self.rec_price
    }
}

/// Assemble validated [`SimulationParameters`] from Python keyword values.
///
/// `None` leaves the field at its default.
#[cfg(feature = "python-bindings")]
pub fn build_simulation_params(
    periods: Option<usize>, switching_probability: Option<f64>, abrupt_drift_prob: Option<f64>,
    gradual_drift_sharpness: Option<f64>, abrupt_drift_sharpness: Option<f64>,
    min_model_len: Option<usize>, w_func: Option<&str>,
    transition_map: Option<Vec<(usize, usize, usize)>>, white_noise_level: Option<f64>,
    seed: Option<u64>,
) -> PyResult<SimulationParameters> {
    let defaults = SimulationParameters::default();

    let w_func = match w_func {
        Some(name) => name.parse::<BlendFunction>()?,
        None => defaults.w_func,
    };

    let use_transition_map = transition_map.is_some();
    let transition_map = match transition_map {
        Some(triples) => {
            TransitionMap::new(triples.into_iter().map(TransitionEntry::from).collect())?
        }
        None => TransitionMap::default(),
    };

    let params = SimulationParameters {
        periods: periods.unwrap_or(defaults.periods),
        switching_probability: switching_probability.unwrap_or(defaults.switching_probability),
        abrupt_drift_prob: abrupt_drift_prob.unwrap_or(defaults.abrupt_drift_prob),
        gradual_drift_sharpness: gradual_drift_sharpness
            .unwrap_or(defaults.gradual_drift_sharpness),
        abrupt_drift_sharpness: abrupt_drift_sharpness.unwrap_or(defaults.abrupt_drift_sharpness),
        min_model_len: min_model_len.unwrap_or(defaults.min_model_len),
        w_func,
        use_transition_map,
        transition_map,
        white_noise_level: white_noise_level.unwrap_or(defaults.white_noise_level),
        seed,
    };
    params.validate()?;
    Ok(params)
}
