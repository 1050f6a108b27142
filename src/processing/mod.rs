//! processing — stages around the switching core.
//!
//! Purpose
//! -------
//! Prepare inputs for regime models and turn a switching outcome into the
//! final labeled table: percentage returns, price reconstruction, noise
//! injection, and report assembly.
//!
//! Key behaviors
//! -------------
//! - [`pct_returns`] / [`reconstruct_prices`] move between prices and
//!   percentage returns.
//! - [`add_noise`] derives the Gaussian and SNR-noise variants of a series.
//! - [`compute`] runs the switching process and joins events, clean and
//!   noisy series, and prices into a [`SimulationReport`].
//!
//! Invariants & assumptions
//! ------------------------
//! - These stages only consume switching outputs; none of them feeds back
//!   into the state machine.
//! - Errors from the switching layer are wrapped in
//!   [`ProcessingError::Switching`].

pub mod errors;
pub mod noise;
pub mod report;
pub mod returns;

pub use self::errors::{ProcessingError, ProcessingResult};
pub use self::noise::{NoisySeries, add_noise, snr_noise_std};
pub use self::report::{
    REPORT_COLUMNS, SimulationRecord, SimulationReport, compute, compute_seeded,
};
pub use self::returns::{pct_returns, reconstruct_prices};
