//! Blend orchestrator — the per-period switching state machine.
//!
//! Purpose
//! -------
//! Generate a series of `periods` values by forecasting with the current
//! regime model and, during a switch, blending the current and incoming
//! forecasts with a weight schedule that moves from `(1, 0)` to `(0, 1)`.
//! Every period leaves one [`SwitchEvent`] in the log.
//!
//! Key behaviors
//! -------------
//! - Each period runs, in order: forecast the current model, ask the
//!   [`SwitchScheduler`] for a decision, start a blend on a non-NONE
//!   decision, record the event, blend (or pass the current forecast
//!   through), and bump the dwell counter.
//! - Starting a blend picks the incoming model, resets the weights and
//!   advances them once with the kind's sharpness, so the starting period
//!   already mixes in the incoming model. The sharpness is floored once
//!   here, which is where a below-floor value is reported.
//! - When the advanced weights reach `(0, 1)` the incoming model becomes
//!   current, the weights reset, and the dwell counter restarts at 0.
//!
//! Invariants & assumptions
//! ------------------------
//! - States are STEADY (`incoming_model_id == None`) and BLENDING
//!   (`incoming_model_id == Some(_)`); a blend whose first advance already
//!   lands on `(0, 1)` starts and completes in the same period.
//! - Recorded weight pairs sum to 1 (checked by the [`EventRecorder`]).
//! - While `period < model.lags().max()` a model forecasts from its own
//!   `input_ts`; afterwards from the series generated so far.
//! - Any forecasting failure aborts the run with
//!   `SwitchError::ForecastFailed` tagged with model id and period.
//!
//! Conventions
//! -----------
//! - Run start, switch start, and switch completion log at `info!`; every
//!   period logs at `debug!`.
//! - Randomness is a caller-owned `Rng`; [`rng_from_seed`] builds one from
//!   `SimulationParameters::seed` for callers who do not manage their own.
use ndarray::{Array1, ArrayView1};
use rand::{Rng, SeedableRng, rngs::StdRng};
use tracing::{debug, info};

use crate::switching::{
    core::{
        events::{EventRecorder, SwitchEvent},
        kind::ActiveSwitch,
        params::{BlendFunction, SimulationParameters},
        scheduler::SwitchScheduler,
        selector::pick_model,
        sigmoid::SigmoidKernel,
        validation::validate_against_pool,
        weights::{WeightPair, floor_sharpness},
    },
    errors::{SwitchError, SwitchResult},
    models::pool::{ForecastModel, ModelPool},
};

/// BlendState — mutable state of one run.
///
/// Created fresh per run by [`BlendState::new`] and mutated once per period
/// by [`BlendOrchestrator::step`].
///
/// Fields
/// ------
/// - `current_model_id`: model generating the series (outgoing during a
///   blend). Starts at 1.
/// - `incoming_model_id`: model being blended in; `None` in steady state.
/// - `active`: the switch driving the blend.
/// - `weights`, `sig_weights`: linear and sigmoid-warped `(old, new)` pairs.
/// - `dwell`: periods since the last completed switch; `None` before the
///   first completion.
/// - `output_series`: generated values, append-only.
/// - `events`: per-period event log, append-only.
#[derive(Debug, Clone, PartialEq)]
pub struct BlendState {
    pub current_model_id: usize,
    pub incoming_model_id: Option<usize>,
    pub active: ActiveSwitch,
    pub weights: WeightPair,
    pub sig_weights: WeightPair,
    pub dwell: Option<usize>,
    pub output_series: Vec<f64>,
    pub events: EventRecorder,
}

impl BlendState {
    pub fn new(periods: usize) -> BlendState {
        BlendState {
            current_model_id: 1,
            incoming_model_id: None,
            active: ActiveSwitch::none(),
            weights: WeightPair::reset(),
            sig_weights: WeightPair::reset(),
            dwell: None,
            output_series: Vec::with_capacity(periods),
            events: EventRecorder::with_capacity(periods),
        }
    }

    /// `true` between a switch start and its completion.
    pub fn is_blending(&self) -> bool {
        self.incoming_model_id.is_some()
    }

    fn complete_switch(&mut self, incoming: usize) {
        self.current_model_id = incoming;
        self.incoming_model_id = None;
        self.active = ActiveSwitch::none();
        self.weights = WeightPair::reset();
        self.sig_weights = WeightPair::reset();
        self.dwell = Some(0);
    }
}

/// SwitchingOutcome — outputs of a completed run.
///
/// `series` and `events` both have exactly `periods` entries.
#[derive(Debug, Clone, PartialEq)]
pub struct SwitchingOutcome {
    pub series: Array1<f64>,
    pub events: Vec<SwitchEvent>,
}

impl SwitchingOutcome {
    /// Number of switches that started during the run.
    pub fn switch_count(&self) -> usize {
        self.events.iter().filter(|e| e.proposed_kind.is_switch()).count()
    }
}

/// BlendOrchestrator — drives one run over a borrowed pool.
///
/// Parameters and pool are validated together at construction; after that
/// the orchestrator only reads them.
#[derive(Debug)]
pub struct BlendOrchestrator<'a, M> {
    params: &'a SimulationParameters,
    pool: &'a ModelPool<M>,
    scheduler: SwitchScheduler<'a>,
    kernel: &'static SigmoidKernel,
}

impl<'a, M: ForecastModel> BlendOrchestrator<'a, M> {
    /// Validate `params` against `pool` and prepare a run.
    ///
    /// Errors
    /// ------
    /// - Any configuration error from `SimulationParameters::validate`.
    /// - `SwitchError::SingleModelPool` for probabilistic switching over one
    ///   model, and `SwitchError::UnknownTargetModel` for map targets outside
    ///   the pool.
    pub fn new(
        params: &'a SimulationParameters, pool: &'a ModelPool<M>,
    ) -> SwitchResult<BlendOrchestrator<'a, M>> {
        params.validate()?;
        validate_against_pool(params, pool.len())?;
        Ok(BlendOrchestrator {
            params,
            pool,
            scheduler: SwitchScheduler::new(params),
            kernel: SigmoidKernel::global(),
        })
    }

    /// Run all `periods` steps from a fresh [`BlendState`].
    pub fn run<R: Rng + ?Sized>(mut self, rng: &mut R) -> SwitchResult<SwitchingOutcome> {
        info!(
            periods = self.params.periods,
            pool_size = self.pool.len(),
            scheduled = self.params.use_transition_map,
            w_func = %self.params.w_func,
            "starting switching process"
        );
        let mut state = BlendState::new(self.params.periods);
        for period in 0..self.params.periods {
            self.step(&mut state, period, rng)?;
        }
        Ok(SwitchingOutcome {
            series: Array1::from(state.output_series),
            events: state.events.into_events(),
        })
    }

    /// Advance `state` by one period.
    ///
    /// Errors
    /// ------
    /// - `SwitchError::ForecastFailed` if either model's forecast fails.
    /// - `SwitchError::WeightSumViolation` if the recorded pair is broken.
    /// - `SwitchError::MissingTransitionEntry` if a PREDEFINED decision has
    ///   no sharpness attached.
    pub fn step<R: Rng + ?Sized>(
        &mut self, state: &mut BlendState, period: usize, rng: &mut R,
    ) -> SwitchResult<()> {
        let current = self.pool.get(state.current_model_id)?;
        let current_fc = self.forecast(current, &state.output_series, period)?;

        let decision = self.scheduler.decide(period, state.is_blending(), state.dwell, rng);
        if decision.kind.is_switch() {
            let sharpness = decision
                .sharpness
                .get(decision.kind)
                .map(floor_sharpness)
                .ok_or(SwitchError::MissingTransitionEntry { period })?;
            let incoming =
                pick_model(state.current_model_id, self.pool.len(), decision.target, rng)?;
            state.active =
                ActiveSwitch { kind: decision.kind, duration: decision.duration, sharpness };
            state.incoming_model_id = Some(incoming);
            state.weights = WeightPair::reset().advance(sharpness);
            state.sig_weights = self.kernel.warp(state.weights);
            info!(
                period,
                kind = %state.active.label(),
                from = state.current_model_id,
                to = incoming,
                sharpness,
                "switch started"
            );
        }

        state.events.record(
            SwitchEvent {
                period,
                proposed_kind: decision.kind,
                active_kind: state.active.kind,
                active_label: state.active.label(),
                weights: state.weights,
                sig_weights: state.sig_weights,
                current_model_id: state.current_model_id,
                incoming_model_id: state.incoming_model_id,
            },
            self.params.w_func,
        )?;

        let value = match state.incoming_model_id {
            Some(incoming_id) => {
                let incoming = self.pool.get(incoming_id)?;
                let incoming_fc = self.forecast(incoming, &state.output_series, period)?;
                let applied = match self.params.w_func {
                    BlendFunction::Linear => state.weights,
                    BlendFunction::Sigmoid => state.sig_weights,
                };
                state.weights = state.weights.advance(state.active.sharpness);
                state.sig_weights = self.kernel.warp(state.weights);
                if state.weights.is_complete() {
                    info!(
                        period,
                        from = state.current_model_id,
                        to = incoming_id,
                        "switch completed"
                    );
                    state.complete_switch(incoming_id);
                }
                current_fc * applied.old + incoming_fc * applied.new
            }
            None => current_fc,
        };
        state.output_series.push(value);
        state.dwell = state.dwell.map(|d| d + 1);

        debug!(
            period,
            value,
            current = state.current_model_id,
            w_old = state.weights.old,
            w_new = state.weights.new,
            "period generated"
        );
        Ok(())
    }

    fn forecast(&self, model: &M, output: &[f64], period: usize) -> SwitchResult<f64> {
        let history = if period < model.lags().max() {
            model.input_ts()
        } else {
            ArrayView1::from(output)
        };
        model.forecast(history).map_err(|source| SwitchError::ForecastFailed {
            model_id: model.id(),
            period,
            source,
        })
    }
}

/// Validate, then run one switching process over `pool`.
///
/// Parameters
/// ----------
/// - `params`: `&SimulationParameters`
///   Run configuration; `seed` is ignored here (the caller owns `rng`).
/// - `pool`: `&ModelPool<M>`
///   Fitted models, ids `1..=n`.
/// - `rng`: `&mut R`
///   Source of every random draw in the run.
///
/// Returns
/// -------
/// `SwitchResult<SwitchingOutcome>`
///   The generated series and event log, each of length `periods`.
pub fn switching_process<M: ForecastModel, R: Rng + ?Sized>(
    params: &SimulationParameters, pool: &ModelPool<M>, rng: &mut R,
) -> SwitchResult<SwitchingOutcome> {
    BlendOrchestrator::new(params, pool)?.run(rng)
}

/// Seeded `StdRng`, or one seeded from system entropy for `None`.
pub fn rng_from_seed(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::switching::{
        core::{
            kind::SwitchKind,
            params::{TransitionEntry, TransitionMap},
        },
        errors::{ModelError, ModelResult},
        models::pool::ModelLags,
        test_support::count_warnings,
    };
    use approx::assert_relative_eq;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - The three-model, five-period gradual scenario.
    // - Transition-map fidelity, including completion timing.
    // - Weight conservation, no re-entry, dwell, monotonicity, and model
    //   exclusion on a long random run.
    // - Sigmoid blending, the history rule, and collaborator failures.
    // -------------------------------------------------------------------------

    #[derive(Debug, Clone)]
    enum Behavior {
        Constant(f64),
        HistoryLen,
        Fail,
    }

    #[derive(Debug, Clone)]
    struct Scripted {
        id: usize,
        lags: ModelLags,
        input_ts: Array1<f64>,
        behavior: Behavior,
    }

    impl ForecastModel for Scripted {
        fn id(&self) -> usize {
            self.id
        }
        fn lags(&self) -> ModelLags {
            self.lags
        }
        fn input_ts(&self) -> ArrayView1<'_, f64> {
            self.input_ts.view()
        }
        fn forecast(&self, history: ArrayView1<'_, f64>) -> ModelResult<f64> {
            match self.behavior {
                Behavior::Constant(v) => Ok(v),
                Behavior::HistoryLen => Ok(history.len() as f64),
                Behavior::Fail => Err(ModelError::Backend { status: "diverged".to_string() }),
            }
        }
    }

    fn constant(id: usize, value: f64) -> Scripted {
        Scripted {
            id,
            lags: ModelLags::default(),
            input_ts: Array1::zeros(4),
            behavior: Behavior::Constant(value),
        }
    }

    fn constant_pool(n: usize) -> ModelPool<Scripted> {
        ModelPool::new((1..=n).map(|id| constant(id, id as f64)).collect()).unwrap()
    }

    fn scenario_params(min_model_len: usize) -> SimulationParameters {
        SimulationParameters {
            periods: 5,
            switching_probability: 1.0,
            abrupt_drift_prob: 0.0,
            gradual_drift_sharpness: 0.5,
            min_model_len,
            ..SimulationParameters::default()
        }
    }

    #[test]
    // Purpose
    // -------
    // Three models, five periods, certain gradual switches with sharpness 0.5.
    //
    // Given
    // -----
    // - Constant models returning their id; min_model_len = 0.
    //
    // Expect
    // ------
    // - GRADUAL at period 0 with recorded weights (0.5, 0.5).
    // - The blend completes within period 0: period 1 reports the incoming
    //   model as current.
    // - Each completion leaves dwell = 1 > 0 at the next decision, so every
    //   period proposes GRADUAL and the current model changes every period.
    // - Five outputs and five events.
    fn gradual_scenario_switches_at_period_zero() {
        // Arrange
        let params = scenario_params(0);
        let pool = constant_pool(3);
        let mut rng = StdRng::seed_from_u64(2024);

        // Act
        let out = switching_process(&params, &pool, &mut rng).unwrap();

        // Assert
        assert_eq!(out.series.len(), 5);
        assert_eq!(out.events.len(), 5);
        let first = &out.events[0];
        assert_eq!(first.proposed_kind, SwitchKind::Gradual);
        assert_eq!(first.active_label, "GRADUAL");
        assert_relative_eq!(first.weights.old, 0.5);
        assert_relative_eq!(first.weights.new, 0.5);
        let incoming = first.incoming_model_id.unwrap();
        assert_ne!(incoming, 1);
        assert_relative_eq!(out.series[0], 0.5 * 1.0 + 0.5 * incoming as f64);
        assert_eq!(out.events[1].current_model_id, incoming);

        assert!(out.events.iter().all(|e| e.proposed_kind == SwitchKind::Gradual));
        assert_eq!(out.switch_count(), 5);
        for pair in out.events.windows(2) {
            assert_eq!(pair[0].incoming_model_id, Some(pair[1].current_model_id));
            assert_ne!(pair[1].current_model_id, pair[0].current_model_id);
        }
    }

    #[test]
    // Purpose
    // -------
    // With a dwell longer than the run, the current model changes once.
    // With min_model_len = 0 the guard never blocks after a completed
    // switch, so a single update needs a dwell that outlasts the run.
    //
    // Given
    // -----
    // - The scenario above with min_model_len = 10.
    //
    // Expect
    // ------
    // - Current ids [1, k, k, k, k]; only period 0 proposes a switch.
    // - Steady periods output model k's forecast unchanged.
    fn gradual_scenario_with_dwell_updates_current_once() {
        // Arrange
        let params = scenario_params(10);
        let pool = constant_pool(3);
        let mut rng = StdRng::seed_from_u64(7);

        // Act
        let out = switching_process(&params, &pool, &mut rng).unwrap();

        // Assert
        let ids: Vec<usize> = out.events.iter().map(|e| e.current_model_id).collect();
        let k = ids[1];
        assert_ne!(k, 1);
        assert_eq!(ids, vec![1, k, k, k, k]);
        assert_eq!(out.switch_count(), 1);
        for t in 1..5 {
            assert_eq!(out.events[t].proposed_kind, SwitchKind::None);
            assert_eq!(out.events[t].incoming_or_sentinel(), -1);
            assert_relative_eq!(out.series[t], k as f64);
        }
    }

    #[test]
    // Purpose
    // -------
    // A map entry (10, 4, 3) starts PREDEFINED at 10 and finishes by 14.
    //
    // Given
    // -----
    // - Three constant models, 20 periods, map [(10, 4, 3)].
    //
    // Expect
    // ------
    // - NONE before 10; PREDEFINED_4 at 10 targeting 3 with w_new = 0.2.
    // - w_new rises 0.2, 0.4, 0.6, 0.8 over periods 10..=13.
    // - Model 3 is current from period 14 on, with no incoming model.
    fn transition_map_entry_is_followed() {
        // Arrange
        let params = SimulationParameters {
            periods: 20,
            use_transition_map: true,
            transition_map: TransitionMap::new(vec![TransitionEntry::new(10, 4, 3)]).unwrap(),
            min_model_len: 0,
            ..SimulationParameters::default()
        };
        let pool = constant_pool(3);
        let mut rng = StdRng::seed_from_u64(1);

        // Act
        let out = switching_process(&params, &pool, &mut rng).unwrap();

        // Assert
        assert!(out.events[..10].iter().all(|e| e.proposed_kind == SwitchKind::None));
        let start = &out.events[10];
        assert_eq!(start.proposed_kind, SwitchKind::Predefined);
        assert_eq!(start.active_label, "PREDEFINED_4");
        assert_eq!(start.incoming_model_id, Some(3));
        for (offset, expected) in [0.2, 0.4, 0.6, 0.8].into_iter().enumerate() {
            let e = &out.events[10 + offset];
            assert_relative_eq!(e.weights.new, expected, epsilon = 1e-9);
            assert_eq!(e.active_kind, SwitchKind::Predefined);
        }
        assert_relative_eq!(out.series[10], 0.8 * 1.0 + 0.2 * 3.0, epsilon = 1e-12);
        for e in &out.events[14..] {
            assert_eq!(e.current_model_id, 3);
            assert_eq!(e.incoming_model_id, None);
        }
        assert_relative_eq!(out.series[19], 3.0);
    }

    #[test]
    // Purpose
    // -------
    // A below-floor scheduled sharpness is reported once per switch, not on
    // every blending period.
    //
    // Given
    // -----
    // - Map [(2, 20, 2)]: sharpness 1/21, floored to 0.1.
    //
    // Expect
    // ------
    // - Exactly one WARN event over the run.
    // - The blend runs at the floor: recorded w_new = 0.1 at period 2 and
    //   model 2 is current from period 11.
    fn floored_sharpness_warns_once_per_switch() {
        // Arrange
        let params = SimulationParameters {
            periods: 15,
            use_transition_map: true,
            transition_map: TransitionMap::new(vec![TransitionEntry::new(2, 20, 2)]).unwrap(),
            min_model_len: 0,
            ..SimulationParameters::default()
        };
        let pool = constant_pool(3);
        let mut rng = StdRng::seed_from_u64(3);

        // Act
        let (out, warnings) = count_warnings(|| switching_process(&params, &pool, &mut rng));
        let out = out.unwrap();

        // Assert
        assert_eq!(warnings, 1);
        assert_eq!(out.events[2].active_label, "PREDEFINED_20");
        assert_relative_eq!(out.events[2].weights.new, 0.1, epsilon = 1e-12);
        assert_eq!(out.events[10].current_model_id, 1);
        assert_eq!(out.events[11].current_model_id, 2);
    }

    #[test]
    // Purpose
    // -------
    // Check the state-machine properties over a long random run.
    //
    // Given
    // -----
    // - Four constant models, 3000 periods, p = 0.2, abrupt 0.3,
    //   min_model_len = 5.
    //
    // Expect
    // ------
    // - Every recorded pair sums to 1.
    // - No switch starts while a blend continues.
    // - w_new strictly increases within a blend.
    // - Incoming never equals current at a switch start.
    // - At least min_model_len steady periods follow each completion.
    fn random_run_respects_state_machine_properties() {
        // Arrange
        let params = SimulationParameters {
            periods: 3000,
            switching_probability: 0.2,
            abrupt_drift_prob: 0.3,
            min_model_len: 5,
            ..SimulationParameters::default()
        };
        let pool = constant_pool(4);
        let mut rng = StdRng::seed_from_u64(99);

        // Act
        let out = switching_process(&params, &pool, &mut rng).unwrap();
        let ev = &out.events;

        // Assert
        assert!(out.switch_count() > 10);
        assert!(ev.iter().all(|e| e.weights.is_conserved()));
        let mut last_completion: Option<usize> = None;
        for t in 1..ev.len() {
            let (prev, cur) = (&ev[t - 1], &ev[t]);
            let completed_prev = cur.current_model_id != prev.current_model_id;
            let same_blend = prev.incoming_model_id.is_some() && !completed_prev;
            if same_blend {
                assert_eq!(cur.proposed_kind, SwitchKind::None, "re-entry at {t}");
                assert!(cur.weights.new > prev.weights.new, "non-monotone at {t}");
            }
            if completed_prev {
                last_completion = Some(t - 1);
            }
            if cur.proposed_kind.is_switch() {
                assert_ne!(cur.incoming_model_id, Some(cur.current_model_id));
                if let Some(done) = last_completion {
                    assert!(t - done > params.min_model_len, "dwell violated at {t}");
                }
            }
        }
    }

    #[test]
    // Purpose
    // -------
    // With `w_func = sig` the output uses the warped pair.
    //
    // Given
    // -----
    // - Model 1 returns 0, model 2 returns 10; map [(2, 9, 2)].
    //
    // Expect
    // ------
    // - Each event's sigmoid pair is the kernel warp of its linear pair.
    // - During the blend, output == 10 * sig_weights.new.
    fn sigmoid_blend_uses_warped_weights() {
        // Arrange
        let params = SimulationParameters {
            periods: 15,
            use_transition_map: true,
            transition_map: TransitionMap::new(vec![TransitionEntry::new(2, 9, 2)]).unwrap(),
            w_func: BlendFunction::Sigmoid,
            min_model_len: 0,
            ..SimulationParameters::default()
        };
        let pool = ModelPool::new(vec![constant(1, 0.0), constant(2, 10.0)]).unwrap();
        let kernel = SigmoidKernel::global();
        let mut rng = StdRng::seed_from_u64(3);

        // Act
        let out = switching_process(&params, &pool, &mut rng).unwrap();

        // Assert
        for (t, e) in out.events.iter().enumerate() {
            assert_eq!(e.sig_weights, kernel.warp(e.weights));
            if e.incoming_model_id.is_some() {
                assert_relative_eq!(out.series[t], 10.0 * e.sig_weights.new, epsilon = 1e-12);
            }
        }
        assert_relative_eq!(out.series[14], 10.0);
    }

    #[test]
    // Purpose
    // -------
    // Models read their own input series until the period reaches their
    // largest lag.
    //
    // Given
    // -----
    // - Model 1 forecasts `history.len()`; lags (3, 0, 1); input_ts of 7.
    //
    // Expect
    // ------
    // - Outputs 7, 7, 7 for periods 0..3, then 3, 4 (generated length).
    fn history_switches_from_input_to_generated_series() {
        // Arrange
        let counter = Scripted {
            id: 1,
            lags: ModelLags::new(3, 0, 1),
            input_ts: Array1::zeros(7),
            behavior: Behavior::HistoryLen,
        };
        let pool = ModelPool::new(vec![counter, constant(2, 0.0)]).unwrap();
        let params = SimulationParameters {
            periods: 5,
            switching_probability: 0.0,
            ..SimulationParameters::default()
        };
        let mut rng = StdRng::seed_from_u64(0);

        // Act
        let out = switching_process(&params, &pool, &mut rng).unwrap();

        // Assert
        assert_eq!(out.series.to_vec(), vec![7.0, 7.0, 7.0, 3.0, 4.0]);
    }

    #[test]
    // Purpose
    // -------
    // A failing incoming model aborts the run with its id and period.
    fn incoming_forecast_failure_propagates() {
        // Arrange
        let failing = Scripted { behavior: Behavior::Fail, ..constant(2, 0.0) };
        let pool = ModelPool::new(vec![constant(1, 1.0), failing]).unwrap();
        let params = SimulationParameters {
            periods: 10,
            switching_probability: 1.0,
            ..SimulationParameters::default()
        };
        let mut rng = StdRng::seed_from_u64(5);

        // Act
        let err = switching_process(&params, &pool, &mut rng).unwrap_err();

        // Assert
        assert!(matches!(err, SwitchError::ForecastFailed { model_id: 2, period: 0, .. }));
    }

    #[test]
    // Purpose
    // -------
    // Pool/configuration mismatches are rejected before the first period.
    fn invalid_pool_configurations_fail_fast() {
        let single = constant_pool(1);
        let params = SimulationParameters::default();
        assert!(matches!(
            BlendOrchestrator::new(&params, &single),
            Err(SwitchError::SingleModelPool)
        ));

        let scheduled = SimulationParameters {
            use_transition_map: true,
            transition_map: TransitionMap::new(vec![TransitionEntry::new(3, 2, 4)]).unwrap(),
            ..SimulationParameters::default()
        };
        let pool = constant_pool(3);
        assert!(matches!(
            BlendOrchestrator::new(&scheduled, &pool),
            Err(SwitchError::UnknownTargetModel { target: 4, pool_size: 3 })
        ));

        let bad = SimulationParameters { periods: 0, ..SimulationParameters::default() };
        assert!(matches!(
            BlendOrchestrator::new(&bad, &pool),
            Err(SwitchError::InvalidPeriods { periods: 0 })
        ));
    }

    #[test]
    // Purpose
    // -------
    // A sharpness of 1 switches instantly without leaving the weights stuck.
    //
    // Given
    // -----
    // - Abrupt-only switching with sharpness 1.0 and min_model_len = 2.
    //
    // Expect
    // ------
    // - The switching period outputs the incoming forecast alone.
    // - The next period is steady on the incoming model.
    fn instant_switch_completes_in_its_own_period() {
        // Arrange
        let params = SimulationParameters {
            periods: 3,
            switching_probability: 1.0,
            abrupt_drift_prob: 1.0,
            abrupt_drift_sharpness: 1.0,
            min_model_len: 2,
            ..SimulationParameters::default()
        };
        let pool = constant_pool(2);
        let mut rng = StdRng::seed_from_u64(11);

        // Act
        let out = switching_process(&params, &pool, &mut rng).unwrap();

        // Assert
        assert_eq!(out.events[0].proposed_kind, SwitchKind::Abrupt);
        assert_eq!(out.events[0].weights, WeightPair::COMPLETE);
        assert_relative_eq!(out.series[0], 2.0);
        assert_eq!(out.events[1].current_model_id, 2);
        assert_eq!(out.events[1].weights, WeightPair::STEADY);
        assert_eq!(out.switch_count(), 1);
    }

    #[test]
    fn seeded_runs_are_reproducible() {
        let params = SimulationParameters {
            periods: 400,
            switching_probability: 0.1,
            ..SimulationParameters::default()
        };
        let pool = constant_pool(3);
        let a = switching_process(&params, &pool, &mut rng_from_seed(Some(42))).unwrap();
        let b = switching_process(&params, &pool, &mut rng_from_seed(Some(42))).unwrap();
        assert_eq!(a, b);
    }
}
