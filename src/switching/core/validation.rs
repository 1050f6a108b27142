//! switching::core::validation — shared configuration guards.
//!
//! Purpose
//! -------
//! Centralize the pre-run checks on simulation configuration so the
//! parameter types, the transition map, and the orchestrator all reject bad
//! input with the same [`SwitchError`] variants.
//!
//! Key behaviors
//! -------------
//! - Check probabilities lie in `[0, 1]`, sharpness values are finite and
//!   strictly positive, and `periods ≥ 1`.
//! - Check transition-map iterations are strictly increasing.
//! - Check a configuration against the size of the model pool it will run
//!   on (pool size 1 under probabilistic switching, unknown map targets).
//!
//! Conventions
//! -----------
//! - Sharpness in `(0, 0.1)` is *valid* here; it is floored later with a
//!   warning. Only values ≤ 0 (or non-finite) are configuration errors.
//! - All functions are pure and return `SwitchResult<()>`.
use crate::switching::{
    core::params::{SimulationParameters, TransitionEntry},
    errors::{SwitchError, SwitchResult},
};

/// Reject NaN and values outside `[0, 1]`.
pub fn validate_probability(name: &'static str, value: f64) -> SwitchResult<()> {
    if !(0.0..=1.0).contains(&value) {
        return Err(SwitchError::InvalidProbability { name, value });
    }
    Ok(())
}

/// Reject non-finite and non-positive sharpness values.
pub fn validate_sharpness(name: &'static str, value: f64) -> SwitchResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(SwitchError::InvalidSharpness { name, value });
    }
    Ok(())
}

pub fn validate_periods(periods: usize) -> SwitchResult<()> {
    if periods == 0 {
        return Err(SwitchError::InvalidPeriods { periods });
    }
    Ok(())
}

/// Require strictly increasing `iteration` across entries.
pub fn validate_transition_entries(entries: &[TransitionEntry]) -> SwitchResult<()> {
    for (index, pair) in entries.windows(2).enumerate() {
        let (previous, current) = (pair[0].iteration, pair[1].iteration);
        if current <= previous {
            return Err(SwitchError::NonIncreasingTransitionMap {
                index: index + 1,
                previous,
                iteration: current,
            });
        }
    }
    Ok(())
}

/// Check a validated configuration against a pool of `pool_size` models.
///
/// Errors
/// ------
/// - `SwitchError::EmptyModelPool` when `pool_size == 0`.
/// - `SwitchError::SingleModelPool` under probabilistic switching with a
///   single model (no reselection is possible).
/// - `SwitchError::UnknownTargetModel` when a transition-map target is not in
///   `1..=pool_size`.
pub fn validate_against_pool(params: &SimulationParameters, pool_size: usize) -> SwitchResult<()> {
    if pool_size == 0 {
        return Err(SwitchError::EmptyModelPool);
    }
    if params.use_transition_map {
        for entry in params.transition_map.entries() {
            let target = entry.target_model_id;
            if target == 0 || target > pool_size {
                return Err(SwitchError::UnknownTargetModel { target, pool_size });
            }
        }
    } else if pool_size < 2 {
        return Err(SwitchError::SingleModelPool);
    }
    Ok(())
}
