//! core — switch kinds, weight schedules, scheduling, and the event log.
//!
//! Purpose
//! -------
//! Collect the model-agnostic building blocks of the regime-switching
//! generator: configuration types, the per-period scheduling decision, the
//! weight schedule that blends two forecasts, the sigmoid warp, incoming
//! model selection, and the event recorder. The orchestrator in
//! `switching::models` drives these pieces once per period.
//!
//! Key behaviors
//! -------------
//! - Describe a run with [`SimulationParameters`], [`BlendFunction`], and an
//!   optional [`TransitionMap`] of scheduled switches.
//! - Decide whether a switch starts with [`SwitchScheduler::decide`], in
//!   probabilistic or scheduled mode, honoring the re-entrancy and dwell
//!   guards.
//! - Resolve per-kind sharpness through [`SharpnessTable`] and advance the
//!   linear pair with [`WeightPair::advance`] (with sharpness flooring).
//! - Warp linear weights through the precomputed [`SigmoidKernel`].
//! - Pick the incoming model with [`pick_model`] and log each period as a
//!   [`SwitchEvent`] through [`EventRecorder`].
//!
//! Invariants & assumptions
//! ------------------------
//! - Every recorded weight pair sums to 1 within [`WEIGHT_TOLERANCE`].
//! - Only one switch is active at a time; the scheduler returns NONE while a
//!   blend is in progress.
//! - Configuration is validated before the first period; nothing here
//!   mutates the parameters after that.
//!
//! Conventions
//! -----------
//! - Periods are 0-based; model ids are 1-based and contiguous.
//! - Randomness is always a caller-owned `rand::Rng`.
//! - The only logging in this layer is `tracing::warn!` for sharpness
//!   flooring and skipped transition-map entries.
//!
//! Testing notes
//! -------------
//! - Unit tests live next to each submodule. End-to-end behavior of the
//!   state machine is tested at the orchestrator and integration layers.

pub mod events;
pub mod kind;
pub mod params;
pub mod scheduler;
pub mod selector;
pub mod sigmoid;
pub mod validation;
pub mod weights;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::events::{EventRecorder, NO_MODEL_SENTINEL, SwitchEvent};
pub use self::kind::{ActiveSwitch, SharpnessTable, SwitchKind};
pub use self::params::{BlendFunction, SimulationParameters, TransitionEntry, TransitionMap};
pub use self::scheduler::{SwitchDecision, SwitchScheduler};
pub use self::selector::{MAX_SELECTION_ATTEMPTS, pick_model};
pub use self::sigmoid::{SIGMOID_BUCKETS, SIGMOID_STEEPNESS, SigmoidKernel};
pub use self::validation::{
    validate_against_pool, validate_periods, validate_probability, validate_sharpness,
    validate_transition_entries,
};
pub use self::weights::{SHARPNESS_FLOOR, WEIGHT_TOLERANCE, WeightPair, floor_sharpness};

pub mod prelude {
    pub use super::events::{EventRecorder, SwitchEvent};
    pub use super::kind::{SharpnessTable, SwitchKind};
    pub use super::params::{BlendFunction, SimulationParameters, TransitionEntry, TransitionMap};
    pub use super::scheduler::SwitchScheduler;
    pub use super::sigmoid::SigmoidKernel;
    pub use super::weights::WeightPair;
}
