//! switching — regime-switching series generation.
//!
//! Purpose
//! -------
//! Stitch one long series out of one-step forecasts from a fixed pool of
//! fitted models, moving between models through gradual, abrupt, or
//! scheduled switches, and label every period with the switch state that
//! produced it.
//!
//! Key behaviors
//! -------------
//! - [`core`] holds configuration, scheduling, weight schedules, the sigmoid
//!   kernel, model selection, and the event log.
//! - [`models`] holds the forecasting capability, the model pool, an ARMA
//!   forecaster, and the orchestrator that runs the state machine.
//! - [`errors`] defines [`SwitchError`] (configuration, invariant, and
//!   collaborator failures) and [`ModelError`] for forecasters.
//!
//! Invariants & assumptions
//! ------------------------
//! - One switch at a time; blend weights always sum to 1.
//! - Periods are 0-based, model ids 1-based and contiguous.
//! - The whole stack is single-threaded and synchronous.
//!
//! Downstream usage
//! ----------------
//! - Build [`SimulationParameters`] (or deserialize them with the `serde`
//!   feature), wrap fitted models in a [`ModelPool`], and call
//!   [`switching_process`] with an RNG from [`rng_from_seed`].
//! - The `processing` module turns the resulting [`SwitchingOutcome`] into
//!   a noisy, price-reconstructed report.

pub mod core;
pub mod errors;
pub mod models;

#[cfg(test)]
pub(crate) mod test_support;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::core::{
    BlendFunction, SimulationParameters, SwitchEvent, SwitchKind, TransitionEntry, TransitionMap,
    WeightPair,
};
pub use self::errors::{ErrorCategory, ModelError, ModelResult, SwitchError, SwitchResult};
pub use self::models::{
    ArmaModel, BlendOrchestrator, BlendState, ForecastModel, ModelLags, ModelPool,
    SwitchingOutcome, rng_from_seed, switching_process,
};

pub mod prelude {
    pub use super::{
        ArmaModel, BlendFunction, ForecastModel, ModelError, ModelLags, ModelPool, ModelResult,
        SimulationParameters, SwitchError, SwitchEvent, SwitchKind, SwitchResult,
        SwitchingOutcome, TransitionEntry, TransitionMap, WeightPair, rng_from_seed,
        switching_process,
    };
}
