//! Report assembly — the per-period table of a full simulation.
//!
//! Purpose
//! -------
//! Run the switching process, add noise, optionally reconstruct prices, and
//! join everything with the event log into one record per period. Writing
//! the table anywhere is left to the caller.
//!
//! Key behaviors
//! -------------
//! - [`compute`] runs the whole pipeline with a caller-owned RNG;
//!   [`compute_seeded`] builds the RNG from `SimulationParameters::seed`.
//! - Noise is drawn after the switching process from the same RNG stream,
//!   so a seed fixes both the series and its noisy variants.
//! - Prices are reconstructed from the generated returns only when model 1
//!   carries a reconstruction anchor.
//!
//! Conventions
//! -----------
//! - Column order follows [`REPORT_COLUMNS`]; `w_old`/`w_new` are the linear
//!   weights, and `new_model_id` is `-1` in steady state.
#[cfg(feature = "serde")]
use serde::Serialize;

use rand::Rng;
use tracing::info;

use crate::{
    processing::{
        errors::ProcessingResult,
        noise::add_noise,
        returns::reconstruct_prices,
    },
    switching::{
        core::{kind::SwitchKind, params::SimulationParameters},
        models::{
            orchestrator::{SwitchingOutcome, rng_from_seed, switching_process},
            pool::{ForecastModel, ModelPool},
        },
    },
};

/// Column names of the tabular report, in order.
pub const REPORT_COLUMNS: [&str; 10] = [
    "n_row",
    "new_switch",
    "cur_switch",
    "w_old",
    "w_new",
    "current_model_id",
    "new_model_id",
    "ts",
    "ts_n1",
    "ts_n2",
];

/// SimulationRecord — one row of the report.
///
/// Fields
/// ------
/// - `n_row`: period index.
/// - `new_switch`: kind proposed by the scheduler this period.
/// - `cur_switch`: label of the active switch (`PREDEFINED_<d>` for
///   scheduled ones).
/// - `w_old`, `w_new`: linear blend weights after the decision.
/// - `current_model_id`, `new_model_id`: outgoing and incoming models
///   (`-1` when none is incoming).
/// - `ts`, `ts_n1`, `ts_n2`: clean, Gaussian-noise, and SNR-noise values.
/// - `price`: reconstructed price, when an anchor was available.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct SimulationRecord {
    pub n_row: usize,
    pub new_switch: SwitchKind,
    pub cur_switch: String,
    pub w_old: f64,
    pub w_new: f64,
    pub current_model_id: usize,
    pub new_model_id: i64,
    pub ts: f64,
    pub ts_n1: f64,
    pub ts_n2: f64,
    pub price: Option<f64>,
}

/// SimulationReport — all records of a run plus the raw switching outcome.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationReport {
    pub records: Vec<SimulationRecord>,
    pub outcome: SwitchingOutcome,
}

impl SimulationReport {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// `true` when prices were reconstructed.
    pub fn has_prices(&self) -> bool {
        self.records.first().is_some_and(|r| r.price.is_some())
    }
}

/// Run the full pipeline: switching, noise, reconstruction, assembly.
///
/// Errors
/// ------
/// - `ProcessingError::Switching` for any configuration, invariant, or
///   forecasting failure in the switching process.
/// - `ProcessingError::InvalidAnchor` if model 1's anchor is zero or
///   non-finite.
pub fn compute<M: ForecastModel, R: Rng + ?Sized>(
    params: &SimulationParameters, pool: &ModelPool<M>, rng: &mut R,
) -> ProcessingResult<SimulationReport> {
    let outcome = switching_process(params, pool, rng)?;
    let noisy = add_noise(outcome.series.view(), params.white_noise_level, rng)?;
    let prices = pool
        .rec_anchor()
        .map(|anchor| reconstruct_prices(outcome.series.view(), anchor))
        .transpose()?;

    let records = outcome
        .events
        .iter()
        .enumerate()
        .map(|(t, event)| SimulationRecord {
            n_row: event.period,
            new_switch: event.proposed_kind,
            cur_switch: event.active_label.clone(),
            w_old: event.weights.old,
            w_new: event.weights.new,
            current_model_id: event.current_model_id,
            new_model_id: event.incoming_or_sentinel(),
            ts: outcome.series[t],
            ts_n1: noisy.gaussian[t],
            ts_n2: noisy.snr[t],
            price: prices.as_ref().map(|p| p[t]),
        })
        .collect::<Vec<_>>();

    info!(
        rows = records.len(),
        switches = outcome.switch_count(),
        prices = prices.is_some(),
        "simulation report assembled"
    );
    Ok(SimulationReport { records, outcome })
}

/// [`compute`] with an RNG built from `params.seed`.
pub fn compute_seeded<M: ForecastModel>(
    params: &SimulationParameters, pool: &ModelPool<M>,
) -> ProcessingResult<SimulationReport> {
    let mut rng = rng_from_seed(params.seed);
    compute(params, pool, &mut rng)
}
