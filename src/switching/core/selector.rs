//! Model selector — choose the incoming model when a switch starts.
//!
//! Scheduled switches name their target and it is returned as-is (the
//! transition map was checked against the pool before the run). Random
//! switches draw uniformly from `1..=pool_size` and redraw until the id
//! differs from the current model, within a bounded number of attempts.
use rand::Rng;

use crate::switching::errors::{SwitchError, SwitchResult};

/// Upper bound on rejection-sampling draws before giving up.
///
/// With two models the chance of hitting this bound is `2^-1000`.
pub const MAX_SELECTION_ATTEMPTS: usize = 1_000;

/// Pick the model that takes over from `current_id`.
///
/// Parameters
/// ----------
/// - `current_id`: `usize`
///   Id of the model currently generating the series.
/// - `pool_size`: `usize`
///   Number of models; ids are `1..=pool_size`.
/// - `explicit_target`: `Option<usize>`
///   Target fixed by a transition-map entry. Returned unmodified, even if it
///   equals `current_id`.
/// - `rng`: `&mut R`
///   Source of the uniform draws.
///
/// Returns
/// -------
/// `SwitchResult<usize>`
///   The incoming model id.
///
/// Errors
/// ------
/// - `SwitchError::EmptyModelPool` if `pool_size == 0` and no target is given.
/// - `SwitchError::SingleModelPool` if `pool_size == 1` and no target is
///   given; no id other than the current one exists.
/// - `SwitchError::SelectionExhausted` if [`MAX_SELECTION_ATTEMPTS`] draws
///   all hit `current_id`.
pub fn pick_model<R: Rng + ?Sized>(
    current_id: usize, pool_size: usize, explicit_target: Option<usize>, rng: &mut R,
) -> SwitchResult<usize> {
    if let Some(target) = explicit_target {
        return Ok(target);
    }
    match pool_size {
        0 => return Err(SwitchError::EmptyModelPool),
        1 => return Err(SwitchError::SingleModelPool),
        _ => {}
    }
    for _ in 0..MAX_SELECTION_ATTEMPTS {
        let candidate = rng.gen_range(1..=pool_size);
        if candidate != current_id {
            return Ok(candidate);
        }
    }
    Err(SwitchError::SelectionExhausted {
        current: current_id,
        attempts: MAX_SELECTION_ATTEMPTS,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};
    use std::collections::HashSet;

    #[test]
    // Purpose
    // -------
    // Random picks never return the current model and cover every other id.
    //
    // Given
    // -----
    // - Pool of 4, current model 2, 500 draws.
    //
    // Expect
    // ------
    // - No draw equals 2; ids {1, 3, 4} all appear.
    fn random_pick_excludes_current_model() {
        // Arrange
        let mut rng = StdRng::seed_from_u64(42);
        let mut seen = HashSet::new();

        // Act
        for _ in 0..500 {
            let id = pick_model(2, 4, None, &mut rng).expect("pool of 4 is selectable");
            assert_ne!(id, 2);
            assert!((1..=4).contains(&id));
            seen.insert(id);
        }

        // Assert
        assert_eq!(seen, HashSet::from([1, 3, 4]));
    }

    #[test]
    // Purpose
    // -------
    // Explicit targets bypass sampling and the exclusion check.
    fn explicit_target_is_returned_unmodified() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(pick_model(1, 3, Some(3), &mut rng), Ok(3));
        assert_eq!(pick_model(1, 3, Some(1), &mut rng), Ok(1));
        assert_eq!(pick_model(1, 1, Some(1), &mut rng), Ok(1));
    }

    #[test]
    // Purpose
    // -------
    // Unsatisfiable pools fail fast instead of looping forever.
    fn degenerate_pools_are_rejected() {
        let mut rng = StdRng::seed_from_u64(9);
        assert_eq!(pick_model(1, 1, None, &mut rng), Err(SwitchError::SingleModelPool));
        assert_eq!(pick_model(1, 0, None, &mut rng), Err(SwitchError::EmptyModelPool));
    }

    #[test]
    // Purpose
    // -------
    // With two models the only valid pick is the other one.
    fn two_model_pool_always_picks_the_other() {
        let mut rng = StdRng::seed_from_u64(123);
        for _ in 0..100 {
            assert_eq!(pick_model(1, 2, None, &mut rng), Ok(2));
            assert_eq!(pick_model(2, 2, None, &mut rng), Ok(1));
        }
    }
}
