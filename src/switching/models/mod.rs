//! models — forecasting capability, the model pool, and the orchestrator.
//!
//! Purpose
//! -------
//! Connect the model-agnostic switching core to concrete forecasters:
//! define the [`ForecastModel`] capability, hold models in an immutable
//! [`ModelPool`], ship an [`ArmaModel`] with known coefficients, and run the
//! per-period state machine in [`BlendOrchestrator`].
//!
//! Key behaviors
//! -------------
//! - [`switching_process`] validates a configuration against a pool and
//!   returns the generated series plus its event log.
//! - [`BlendOrchestrator::step`] exposes single-period stepping for callers
//!   that want to inspect [`BlendState`] between periods.
//!
//! Invariants & assumptions
//! ------------------------
//! - Pools hold ids `1..=n` and are shared read-only across a run.
//! - Forecast failures are never retried; they surface as
//!   `SwitchError::ForecastFailed`.
//!
//! Testing notes
//! -------------
//! - Orchestrator tests use scripted constant models so every expected
//!   output can be computed by hand.

pub mod arma;
pub mod orchestrator;
pub mod pool;

pub use self::arma::ArmaModel;
pub use self::orchestrator::{
    BlendOrchestrator, BlendState, SwitchingOutcome, rng_from_seed, switching_process,
};
pub use self::pool::{ForecastModel, ModelLags, ModelPool};
