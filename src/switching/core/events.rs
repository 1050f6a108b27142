//! Event log — one structured record per simulated period.
//!
//! Purpose
//! -------
//! Capture every scheduling decision and the blend state that followed it,
//! so a generated series can be labeled and its switches audited after the
//! run.
//!
//! Key behaviors
//! -------------
//! - [`SwitchEvent`] snapshots the post-decision state of one period: the
//!   proposed kind, the active kind label, both weight pairs, and the
//!   current/incoming model ids.
//! - [`EventRecorder::record`] appends an event after checking that the
//!   weight pair in use (linear or sigmoid, per [`BlendFunction`]) sums to 1.
//!
//! Invariants & assumptions
//! ------------------------
//! - The log is append-only and ordered by period.
//! - A period in which a switch starts shows the already-advanced weights.
//! - A weight-sum violation is a state-machine bug and is returned as
//!   `SwitchError::WeightSumViolation`; the offending event is not appended.
//!
//! Conventions
//! -----------
//! - The incoming model is `None` in steady state; tabular exports use the
//!   sentinel `-1` via [`SwitchEvent::incoming_or_sentinel`].
#[cfg(feature = "serde")]
use serde::Serialize;

use crate::switching::{
    core::{kind::SwitchKind, params::BlendFunction, weights::WeightPair},
    errors::{SwitchError, SwitchResult},
};

/// Sentinel used for "no incoming model" in tabular output.
pub const NO_MODEL_SENTINEL: i64 = -1;

/// SwitchEvent — post-decision snapshot of one period.
///
/// Fields
/// ------
/// - `period`: 0-based period index.
/// - `proposed_kind`: what the scheduler returned this period.
/// - `active_kind`: kind of the blend in force after the decision.
/// - `active_label`: display label of `active_kind` (`PREDEFINED_<d>` for
///   scheduled switches).
/// - `weights`: linear `(old, new)` pair after the decision.
/// - `sig_weights`: the same pair warped through the sigmoid kernel.
/// - `current_model_id`: outgoing (or steady) model.
/// - `incoming_model_id`: model being blended in, if any.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct SwitchEvent {
    pub period: usize,
    pub proposed_kind: SwitchKind,
    pub active_kind: SwitchKind,
    pub active_label: String,
    pub weights: WeightPair,
    pub sig_weights: WeightPair,
    pub current_model_id: usize,
    pub incoming_model_id: Option<usize>,
}

impl SwitchEvent {
    /// Weight pair applied under `blend`.
    pub fn applied_weights(&self, blend: BlendFunction) -> WeightPair {
        match blend {
            BlendFunction::Linear => self.weights,
            BlendFunction::Sigmoid => self.sig_weights,
        }
    }

    /// Incoming model id, or [`NO_MODEL_SENTINEL`].
    pub fn incoming_or_sentinel(&self) -> i64 {
        self.incoming_model_id.map_or(NO_MODEL_SENTINEL, |id| id as i64)
    }
}

/// EventRecorder — ordered, append-only event log for one run.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EventRecorder {
    events: Vec<SwitchEvent>,
}

impl EventRecorder {
    pub fn with_capacity(periods: usize) -> EventRecorder {
        EventRecorder { events: Vec::with_capacity(periods) }
    }

    /// Append `event` after checking its applied weights sum to 1.
    ///
    /// Errors
    /// ------
    /// - `SwitchError::WeightSumViolation` with the offending pair.
    pub fn record(&mut self, event: SwitchEvent, blend: BlendFunction) -> SwitchResult<()> {
        let applied = event.applied_weights(blend);
        if !applied.is_conserved() {
            return Err(SwitchError::WeightSumViolation {
                period: event.period,
                w_old: applied.old,
                w_new: applied.new,
            });
        }
        self.events.push(event);
        Ok(())
    }

    pub fn events(&self) -> &[SwitchEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn into_events(self) -> Vec<SwitchEvent> {
        self.events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(period: usize, weights: WeightPair) -> SwitchEvent {
        SwitchEvent {
            period,
            proposed_kind: SwitchKind::None,
            active_kind: SwitchKind::Gradual,
            active_label: "GRADUAL".to_string(),
            weights,
            sig_weights: WeightPair::new(0.9, 0.1),
            current_model_id: 1,
            incoming_model_id: Some(2),
        }
    }

    #[test]
    // Purpose
    // -------
    // Valid events are appended in order.
    fn record_appends_conserved_events() {
        // Arrange
        let mut recorder = EventRecorder::with_capacity(2);

        // Act
        recorder.record(event(0, WeightPair::new(0.5, 0.5)), BlendFunction::Linear).unwrap();
        recorder.record(event(1, WeightPair::new(0.25, 0.75)), BlendFunction::Linear).unwrap();

        // Assert
        assert_eq!(recorder.len(), 2);
        assert_eq!(recorder.events()[1].period, 1);
        assert_eq!(recorder.events()[0].incoming_or_sentinel(), 2);
    }

    #[test]
    // Purpose
    // -------
    // A broken pair is rejected and not appended; the check follows the
    // configured blend function.
    //
    // Given
    // -----
    // - Linear pair (0.5, 0.6); sigmoid pair (0.9, 0.1).
    //
    // Expect
    // ------
    // - Linear recording fails with `WeightSumViolation`.
    // - Sigmoid recording of the same event succeeds.
    fn record_checks_the_configured_pair() {
        // Arrange
        let mut recorder = EventRecorder::default();
        let broken = event(4, WeightPair::new(0.5, 0.6));

        // Act
        let linear = recorder.record(broken.clone(), BlendFunction::Linear);
        let len_after_failure = recorder.len();
        let sigmoid = recorder.record(broken, BlendFunction::Sigmoid);

        // Assert
        assert!(matches!(linear, Err(SwitchError::WeightSumViolation { period: 4, .. })));
        assert_eq!(len_after_failure, 0);
        assert!(sigmoid.is_ok());
        assert_eq!(recorder.len(), 1);
    }

    #[test]
    fn steady_event_uses_sentinel() {
        let mut steady = event(0, WeightPair::STEADY);
        steady.incoming_model_id = None;
        assert_eq!(steady.incoming_or_sentinel(), NO_MODEL_SENTINEL);
    }
}
