//! Switch scheduler — per-period decision on whether a regime switch starts.
//!
//! Purpose
//! -------
//! Decide, once per period, whether a new switch begins and of which kind,
//! either by flipping the configured coins (probabilistic mode) or by
//! walking the transition map (scheduled mode).
//!
//! Key behaviors
//! -------------
//! - Guards first: while a blend is in progress, or while the dwell counter
//!   has not yet exceeded `min_model_len`, the decision is always NONE.
//! - Scheduled mode returns PREDEFINED exactly at an entry's `iteration`,
//!   with the entry's target and a sharpness of `1 / (duration + 1)`.
//! - Probabilistic mode switches with `switching_probability` and, given a
//!   switch, picks ABRUPT with `abrupt_drift_prob`, otherwise GRADUAL.
//!
//! Invariants & assumptions
//! ------------------------
//! - The transition map is consumed strictly in order through a cursor;
//!   an entry whose period has passed (including one blocked by a guard) is
//!   skipped with a `warn!` and never revisited.
//! - The scheduler never mutates the parameters it borrows.
//! - `dwell == None` means no switch has completed yet in this run; the
//!   initial model is not subject to the dwell guard.
//!
//! Conventions
//! -----------
//! - Randomness comes from a caller-owned `rand::Rng`; nothing here seeds.
//! - The returned [`SwitchDecision`] always carries the full sharpness
//!   table so the orchestrator resolves sharpness by kind, never by ordinal.
use rand::Rng;
use tracing::warn;

use crate::switching::core::{
    kind::{SharpnessTable, SwitchKind},
    params::SimulationParameters,
};

/// Outcome of one scheduling decision.
///
/// Fields
/// ------
/// - `kind`: proposed switch kind (NONE when nothing starts).
/// - `sharpness`: per-kind increments; the predefined slot is filled only
///   for PREDEFINED decisions.
/// - `target`: model id fixed by the transition map, if any.
/// - `duration`: transition duration of a PREDEFINED decision.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwitchDecision {
    pub kind: SwitchKind,
    pub sharpness: SharpnessTable,
    pub target: Option<usize>,
    pub duration: Option<usize>,
}

impl SwitchDecision {
    fn none(sharpness: SharpnessTable) -> SwitchDecision {
        SwitchDecision { kind: SwitchKind::None, sharpness, target: None, duration: None }
    }
}

/// SwitchScheduler — stateful decision source for one run.
///
/// Holds a borrowed configuration and a cursor into its transition map.
/// Create one per run; a scheduler that has walked past map entries will
/// not replay them.
#[derive(Debug, Clone)]
pub struct SwitchScheduler<'a> {
    params: &'a SimulationParameters,
    cursor: usize,
}

impl<'a> SwitchScheduler<'a> {
    pub fn new(params: &'a SimulationParameters) -> SwitchScheduler<'a> {
        SwitchScheduler { params, cursor: 0 }
    }

    /// Index of the next unvisited transition-map entry.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Decide whether a switch starts at `period`.
    ///
    /// Parameters
    /// ----------
    /// - `period`: `usize`
    ///   0-based period index; must be non-decreasing across calls.
    /// - `blend_in_progress`: `bool`
    ///   `true` while a previous switch has not completed.
    /// - `dwell`: `Option<usize>`
    ///   Steady periods since the last completed switch, `None` before the
    ///   first completion.
    /// - `rng`: `&mut R`
    ///   Source of the uniform draws in probabilistic mode.
    ///
    /// Returns
    /// -------
    /// `SwitchDecision`
    ///   NONE under either guard; otherwise the mode-specific decision.
    pub fn decide<R: Rng + ?Sized>(
        &mut self, period: usize, blend_in_progress: bool, dwell: Option<usize>, rng: &mut R,
    ) -> SwitchDecision {
        let table = self.params.sharpness_table();
        let blocked = blend_in_progress
            || dwell.is_some_and(|counter| counter <= self.params.min_model_len);

        if self.params.use_transition_map {
            return self.decide_scheduled(period, blocked, table);
        }
        if blocked {
            return SwitchDecision::none(table);
        }
        self.decide_random(table, rng)
    }

    fn decide_scheduled(
        &mut self, period: usize, blocked: bool, table: SharpnessTable,
    ) -> SwitchDecision {
        let entries = self.params.transition_map.entries();
        while let Some(entry) = entries.get(self.cursor) {
            if entry.iteration >= period {
                break;
            }
            warn!(
                iteration = entry.iteration,
                target = entry.target_model_id,
                period,
                "transition map entry passed without starting a switch; skipping"
            );
            self.cursor += 1;
        }

        let Some(entry) = entries.get(self.cursor) else {
            return SwitchDecision::none(table);
        };
        if entry.iteration > period {
            return SwitchDecision::none(table);
        }

        self.cursor += 1;
        if blocked {
            warn!(
                iteration = entry.iteration,
                target = entry.target_model_id,
                "transition map entry blocked by an active blend or dwell time; skipping"
            );
            return SwitchDecision::none(table);
        }
        SwitchDecision {
            kind: SwitchKind::Predefined,
            sharpness: table.with_predefined(entry.sharpness()),
            target: Some(entry.target_model_id),
            duration: Some(entry.duration),
        }
    }

    fn decide_random<R: Rng + ?Sized>(
        &self, table: SharpnessTable, rng: &mut R,
    ) -> SwitchDecision {
        if rng.gen::<f64>() >= self.params.switching_probability {
            return SwitchDecision::none(table);
        }
        let kind = if rng.gen::<f64>() < self.params.abrupt_drift_prob {
            SwitchKind::Abrupt
        } else {
            SwitchKind::Gradual
        };
        SwitchDecision { kind, sharpness: table, target: None, duration: None }
    }
}
