//! regime_drift — regime-switching synthetic time series with labeled drifts.
//!
//! Purpose
//! -------
//! Serve as the crate root for Rust callers and as the PyO3 bridge that
//! exposes the switching generator to Python via the `_regime_drift`
//! extension module. The generator stitches one long series out of one-step
//! forecasts from a fixed pool of fitted models, switching between them
//! gradually, abruptly, or on a schedule, and records every decision.
//!
//! Key behaviors
//! -------------
//! - Re-export the core Rust modules (`switching` and `processing`) as the
//!   public crate surface.
//! - Define `#[pyclass]` wrappers and the `#[pymodule]` initializer for the
//!   `_regime_drift` Python extension when `python-bindings` is enabled.
//! - Register the `switching` and `processing` Python submodules in
//!   `sys.modules` so dotted imports work.
//!
//! Invariants & assumptions
//! ------------------------
//! - All state-machine and numerical work lives in the inner modules; this
//!   file performs only FFI glue, argument defaults, and error mapping.
//! - Python models are adapted through `utils::PyForecastModel`; their ids
//!   are their 1-based positions in the list passed to `run`.
//!
//! Conventions
//! -----------
//! - Errors from the core surface as Python `ValueError`s carrying the Rust
//!   `Display` message.
//! - Logging goes through `tracing`; the library never installs a
//!   subscriber.
//!
//! Downstream usage
//! ----------------
//! - Native Rust code should depend on `switching` (and `processing` for the
//!   report) and can ignore the PyO3 items guarded by `python-bindings`.
//! - The Python packaging layer imports `_regime_drift` and wraps its classes
//!   in user-facing APIs.
//!
//! Testing notes
//! -------------
//! - Core behavior is covered by unit tests in the inner modules and by the
//!   pipeline test under `tests/`. The PyO3 layer is exercised from Python.

pub mod processing;
pub mod switching;
pub mod utils;

#[cfg(feature = "python-bindings")]
use pyo3::{
    prelude::*,
    types::{PyAny, PyDict},
};

#[cfg(feature = "python-bindings")]
use crate::{
    processing::{
        report::{SimulationReport, compute},
        returns::{pct_returns, reconstruct_prices},
    },
    switching::{
        core::{events::SwitchEvent, params::SimulationParameters},
        models::{orchestrator::rng_from_seed, pool::ModelPool},
    },
    utils::{PyForecastModel, build_simulation_params, extract_series},
};

/// SwitchingSimulation — Python-facing runner for the switching generator.
///
/// Purpose
/// -------
/// Hold a validated configuration, run the full pipeline over a list of
/// Python models, and cache the resulting report for inspection.
///
/// Parameters
/// ----------
/// Constructed from Python via `SwitchingSimulation(**kwargs)`; every
/// argument is optional and falls back to `SimulationParameters::default()`:
/// - `periods`, `switching_probability`, `abrupt_drift_prob`,
///   `gradual_drift_sharpness`, `abrupt_drift_sharpness`, `min_model_len`,
///   `white_noise_level`, `seed`.
/// - `w_func`: `"linear"` or `"sig"`.
/// - `transition_map`: list of `(iteration, duration, target_model_id)`;
///   passing it switches to scheduled mode.
///
/// Notes
/// -----
/// - `run` must be called before any result getter; getters raise
///   `RuntimeError` otherwise.
#[cfg(feature = "python-bindings")]
#[pyclass(module = "regime_drift.switching", unsendable)]
pub struct SwitchingSimulation {
    params: SimulationParameters,
    report: Option<SimulationReport>,
}

#[cfg(feature = "python-bindings")]
impl SwitchingSimulation {
    fn report(&self) -> PyResult<&SimulationReport> {
        self.report.as_ref().ok_or_else(|| {
            pyo3::exceptions::PyRuntimeError::new_err("call run() before reading results")
        })
    }
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl SwitchingSimulation {
    #[new]
    #[pyo3(signature = (
        periods = None,
        switching_probability = None,
        abrupt_drift_prob = None,
        gradual_drift_sharpness = None,
        abrupt_drift_sharpness = None,
        min_model_len = None,
        w_func = None,
        transition_map = None,
        white_noise_level = None,
        seed = None
    ))]
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        periods: Option<usize>, switching_probability: Option<f64>,
        abrupt_drift_prob: Option<f64>, gradual_drift_sharpness: Option<f64>,
        abrupt_drift_sharpness: Option<f64>, min_model_len: Option<usize>, w_func: Option<&str>,
        transition_map: Option<Vec<(usize, usize, usize)>>, white_noise_level: Option<f64>,
        seed: Option<u64>,
    ) -> PyResult<SwitchingSimulation> {
        let params = build_simulation_params(
            periods,
            switching_probability,
            abrupt_drift_prob,
            gradual_drift_sharpness,
            abrupt_drift_sharpness,
            min_model_len,
            w_func,
            transition_map,
            white_noise_level,
            seed,
        )?;
        Ok(SwitchingSimulation { params, report: None })
    }

    /// Run the pipeline over `models` (ids are list positions, from 1).
    ///
    /// `seed` overrides the seed given at construction for this run only.
    #[pyo3(signature = (models, seed = None))]
    pub fn run(&mut self, models: Vec<Bound<'_, PyAny>>, seed: Option<u64>) -> PyResult<()> {
        let adapted = models
            .iter()
            .enumerate()
            .map(|(idx, obj)| PyForecastModel::from_py(obj, idx + 1))
            .collect::<PyResult<Vec<_>>>()?;
        let pool = ModelPool::new(adapted)?;
        let mut rng = rng_from_seed(seed.or(self.params.seed));
        self.report = Some(compute(&self.params, &pool, &mut rng)?);
        Ok(())
    }

    #[getter]
    pub fn periods(&self) -> usize {
        self.params.periods
    }

    #[getter]
    pub fn w_func(&self) -> String {
        self.params.w_func.to_string()
    }

    /// Clean generated series.
    #[getter]
    pub fn series(&self) -> PyResult<Vec<f64>> {
        Ok(self.report()?.outcome.series.to_vec())
    }

    #[getter]
    pub fn switch_count(&self) -> PyResult<usize> {
        Ok(self.report()?.outcome.switch_count())
    }

    #[getter]
    pub fn events(&self) -> PyResult<Vec<SwitchEventView>> {
        let report = self.report()?;
        Ok(report.outcome.events.iter().cloned().map(|inner| SwitchEventView { inner }).collect())
    }

    /// Report as `{column: list}`, ready for `pandas.DataFrame(...)`.
    ///
    /// A `price` column is added when prices were reconstructed.
    pub fn table<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyDict>> {
        let report = self.report()?;
        let rows = &report.records;
        let table = PyDict::new(py);
        table.set_item("n_row", rows.iter().map(|r| r.n_row).collect::<Vec<_>>())?;
        let new_switch = rows.iter().map(|r| r.new_switch.name()).collect::<Vec<_>>();
        table.set_item("new_switch", new_switch)?;
        let cur_switch = rows.iter().map(|r| r.cur_switch.clone()).collect::<Vec<_>>();
        table.set_item("cur_switch", cur_switch)?;
        table.set_item("w_old", rows.iter().map(|r| r.w_old).collect::<Vec<_>>())?;
        table.set_item("w_new", rows.iter().map(|r| r.w_new).collect::<Vec<_>>())?;
        table.set_item(
            "current_model_id",
            rows.iter().map(|r| r.current_model_id).collect::<Vec<_>>(),
        )?;
        table.set_item("new_model_id", rows.iter().map(|r| r.new_model_id).collect::<Vec<_>>())?;
        table.set_item("ts", rows.iter().map(|r| r.ts).collect::<Vec<_>>())?;
        table.set_item("ts_n1", rows.iter().map(|r| r.ts_n1).collect::<Vec<_>>())?;
        table.set_item("ts_n2", rows.iter().map(|r| r.ts_n2).collect::<Vec<_>>())?;
        if report.has_prices() {
            table.set_item("price", rows.iter().filter_map(|r| r.price).collect::<Vec<_>>())?;
        }
        Ok(table)
    }
}

/// SwitchEventView — read-only Python view of one recorded period.
#[cfg(feature = "python-bindings")]
#[pyclass(module = "regime_drift.switching")]
pub struct SwitchEventView {
    inner: SwitchEvent,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl SwitchEventView {
    #[getter]
    pub fn period(&self) -> usize {
        self.inner.period
    }

    #[getter]
    pub fn proposed_kind(&self) -> &'static str {
        self.inner.proposed_kind.name()
    }

    #[getter]
    pub fn active_kind(&self) -> String {
        self.inner.active_label.clone()
    }

    #[getter]
    pub fn weights(&self) -> (f64, f64) {
        (self.inner.weights.old, self.inner.weights.new)
    }

    #[getter]
    pub fn sig_weights(&self) -> (f64, f64) {
        (self.inner.sig_weights.old, self.inner.sig_weights.new)
    }

    #[getter]
    pub fn current_model_id(&self) -> usize {
        self.inner.current_model_id
    }

    #[getter]
    pub fn incoming_model_id(&self) -> i64 {
        self.inner.incoming_or_sentinel()
    }

    fn __repr__(&self) -> String {
        format!(
            "SwitchEvent(period={}, proposed={}, active={}, weights=({:.4}, {:.4}), current={}, incoming={})",
            self.inner.period,
            self.inner.proposed_kind,
            self.inner.active_label,
            self.inner.weights.old,
            self.inner.weights.new,
            self.inner.current_model_id,
            self.inner.incoming_or_sentinel()
        )
    }
}

/// Percentage returns (`100 * pct_change`) of a price series.
#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(name = "pct_returns")]
fn py_pct_returns(prices: &Bound<'_, PyAny>) -> PyResult<Vec<f64>> {
    let prices = extract_series(prices, "prices")?;
    Ok(pct_returns(prices.view())?.to_vec())
}

/// Compound percentage returns into prices starting from `anchor`.
#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(name = "reconstruct_prices")]
fn py_reconstruct_prices(returns: &Bound<'_, PyAny>, anchor: f64) -> PyResult<Vec<f64>> {
    let returns = extract_series(returns, "returns")?;
    Ok(reconstruct_prices(returns.view(), anchor)?.to_vec())
}

/// _regime_drift — PyO3 module initializer for the Python extension.
///
/// Creates the `switching` and `processing` submodules, attaches them to
/// `_regime_drift`, and registers them in `sys.modules` under
/// `regime_drift.<name>` so dotted imports resolve.
#[cfg(feature = "python-bindings")]
#[pymodule]
fn _regime_drift<'py>(_py: Python<'py>, m: &Bound<'py, PyModule>) -> PyResult<()> {
    let switching_mod = PyModule::new(_py, "switching")?;
    let processing_mod = PyModule::new(_py, "processing")?;
    switching_module(m, &switching_mod)?;
    processing_module(m, &processing_mod)?;

    let modules = _py.import("sys")?.getattr("modules")?;
    modules.set_item("regime_drift.switching", switching_mod)?;
    modules.set_item("regime_drift.processing", processing_mod)?;
    Ok(())
}

#[cfg(feature = "python-bindings")]
fn switching_module<'py>(
    regime_drift: &Bound<'py, PyModule>, m: &Bound<'py, PyModule>,
) -> PyResult<()> {
    m.add_class::<SwitchingSimulation>()?;
    m.add_class::<SwitchEventView>()?;
    regime_drift.add_submodule(m)?;
    Ok(())
}

#[cfg(feature = "python-bindings")]
fn processing_module<'py>(
    regime_drift: &Bound<'py, PyModule>, m: &Bound<'py, PyModule>,
) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(py_pct_returns, m)?)?;
    m.add_function(wrap_pyfunction!(py_reconstruct_prices, m)?)?;
    regime_drift.add_submodule(m)?;
    Ok(())
}
