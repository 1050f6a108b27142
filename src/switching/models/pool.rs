//! Model pool — the forecasting capability and the fixed set of models a run
//! switches between.
//!
//! Purpose
//! -------
//! Define what the orchestrator needs from a fitted regime model
//! ([`ForecastModel`]) and hold an immutable, id-indexed collection of such
//! models ([`ModelPool`]).
//!
//! Key behaviors
//! -------------
//! - [`ForecastModel`] exposes the model id, its `(p, d, q)` lags, the
//!   series it was fitted on, a fallible one-step forecast, and an optional
//!   price reconstruction anchor.
//! - [`ModelPool::new`] sorts models by id and rejects empty pools and id
//!   sets that are not exactly `1..=n`.
//! - [`ModelPool::get`] resolves an id in O(1).
//!
//! Invariants & assumptions
//! ------------------------
//! - Models are immutable once pooled; `forecast` takes `&self`.
//! - The pool outlives every run that borrows it and is never mutated by a
//!   run.
//!
//! Conventions
//! -----------
//! - Ids are 1-based; `models[i]` holds id `i + 1`.
//! - Only model 1's `rec_price` is consulted for price reconstruction.
use ndarray::ArrayView1;

use crate::switching::errors::{ModelResult, SwitchError, SwitchResult};

/// ModelLags — `(p, d, q)` orders of a fitted model.
///
/// The orchestrator only uses [`ModelLags::max`]: while the period index is
/// below it, the model forecasts from its own `input_ts` rather than from the
/// generated series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ModelLags {
    pub p: usize,
    pub d: usize,
    pub q: usize,
}

impl ModelLags {
    pub fn new(p: usize, d: usize, q: usize) -> ModelLags {
        ModelLags { p, d, q }
    }

    /// Largest of the three orders.
    pub fn max(&self) -> usize {
        self.p.max(self.d).max(self.q)
    }
}

/// Forecasting capability of one fitted regime model.
///
/// Required:
/// - `id() -> usize`: 1-based pool id.
/// - `lags() -> ModelLags`: fitted `(p, d, q)` orders.
/// - `input_ts() -> ArrayView1<f64>`: series the model was fitted on.
/// - `forecast(history) -> ModelResult<f64>`: one-step-ahead forecast given
///   the history, oldest observation first.
///
/// Optional:
/// - `rec_price() -> Option<f64>`: last observed price of the fitting data,
///   used to turn generated returns back into prices. Defaults to `None`.
pub trait ForecastModel {
    fn id(&self) -> usize;
    fn lags(&self) -> ModelLags;
    fn input_ts(&self) -> ArrayView1<'_, f64>;
    fn forecast(&self, history: ArrayView1<'_, f64>) -> ModelResult<f64>;

    fn rec_price(&self) -> Option<f64> {
        None
    }
}

impl<T: ForecastModel + ?Sized> ForecastModel for Box<T> {
    fn id(&self) -> usize {
        (**self).id()
    }

    fn lags(&self) -> ModelLags {
        (**self).lags()
    }

    fn input_ts(&self) -> ArrayView1<'_, f64> {
        (**self).input_ts()
    }

    fn forecast(&self, history: ArrayView1<'_, f64>) -> ModelResult<f64> {
        (**self).forecast(history)
    }

    fn rec_price(&self) -> Option<f64> {
        (**self).rec_price()
    }
}

/// ModelPool — immutable, id-indexed set of fitted models.
#[derive(Debug, Clone)]
pub struct ModelPool<M> {
    models: Vec<M>,
}

impl<M: ForecastModel> ModelPool<M> {
    /// Build a pool from models in any order.
    ///
    /// Errors
    /// ------
    /// - `SwitchError::EmptyModelPool` if `models` is empty.
    /// - `SwitchError::NonContiguousModelIds` if the sorted ids are not
    ///   `1, 2, …, n` (gaps, duplicates, or a zero id).
    pub fn new(mut models: Vec<M>) -> SwitchResult<ModelPool<M>> {
        if models.is_empty() {
            return Err(SwitchError::EmptyModelPool);
        }
        models.sort_by_key(|m| m.id());
        for (idx, model) in models.iter().enumerate() {
            let expected = idx + 1;
            if model.id() != expected {
                return Err(SwitchError::NonContiguousModelIds { expected, found: model.id() });
            }
        }
        Ok(ModelPool { models })
    }

    /// Model with the given id.
    ///
    /// Errors
    /// ------
    /// - `SwitchError::UnknownModel` if `id` is 0 or above `len()`.
    pub fn get(&self, id: usize) -> SwitchResult<&M> {
        id.checked_sub(1)
            .and_then(|idx| self.models.get(idx))
            .ok_or(SwitchError::UnknownModel { model_id: id })
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = usize> + '_ {
        self.models.iter().map(|m| m.id())
    }

    pub fn iter(&self) -> impl Iterator<Item = &M> {
        self.models.iter()
    }

    /// Reconstruction anchor of model 1, if it has one.
    pub fn rec_anchor(&self) -> Option<f64> {
        self.models.first().and_then(|m| m.rec_price())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array1;

    struct Fixed {
        id: usize,
        ts: Array1<f64>,
    }

    impl ForecastModel for Fixed {
        fn id(&self) -> usize {
            self.id
        }
        fn lags(&self) -> ModelLags {
            ModelLags::new(2, 0, 1)
        }
        fn input_ts(&self) -> ArrayView1<'_, f64> {
            self.ts.view()
        }
        fn forecast(&self, _history: ArrayView1<'_, f64>) -> ModelResult<f64> {
            Ok(self.id as f64)
        }
    }

    fn fixed(id: usize) -> Fixed {
        Fixed { id, ts: Array1::zeros(3) }
    }

    #[test]
    // Purpose
    // -------
    // Pools accept ids in any order and index them by id.
    fn pool_sorts_and_indexes_by_id() {
        // Arrange
        let pool = ModelPool::new(vec![fixed(3), fixed(1), fixed(2)]).unwrap();

        // Act
        let ids: Vec<usize> = pool.ids().collect();

        // Assert
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(pool.get(2).map(|m| m.id()), Ok(2));
        assert_eq!(pool.len(), 3);
        assert!(pool.rec_anchor().is_none());
    }

    #[test]
    // Purpose
    // -------
    // Gaps, duplicates, zero ids, and empty pools are configuration errors.
    fn pool_rejects_non_contiguous_ids() {
        assert!(matches!(
            ModelPool::new(vec![fixed(1), fixed(3)]),
            Err(SwitchError::NonContiguousModelIds { expected: 2, found: 3 })
        ));
        assert!(matches!(
            ModelPool::new(vec![fixed(1), fixed(1)]),
            Err(SwitchError::NonContiguousModelIds { expected: 2, found: 1 })
        ));
        assert!(matches!(
            ModelPool::new(vec![fixed(0)]),
            Err(SwitchError::NonContiguousModelIds { expected: 1, found: 0 })
        ));
        assert!(matches!(ModelPool::<Fixed>::new(Vec::new()), Err(SwitchError::EmptyModelPool)));
    }

    #[test]
    fn get_out_of_range_is_unknown_model() {
        let pool = ModelPool::new(vec![fixed(1), fixed(2)]).unwrap();
        assert_eq!(pool.get(0).map(|m| m.id()), Err(SwitchError::UnknownModel { model_id: 0 }));
        assert_eq!(pool.get(3).map(|m| m.id()), Err(SwitchError::UnknownModel { model_id: 3 }));
    }

    #[test]
    // Purpose
    // -------
    // Boxed trait objects forward every method, so heterogeneous pools work.
    fn boxed_models_forward_the_capability() {
        // Arrange
        let boxed: Vec<Box<dyn ForecastModel>> = vec![Box::new(fixed(2)), Box::new(fixed(1))];

        // Act
        let pool = ModelPool::new(boxed).unwrap();
        let model = pool.get(2).unwrap();

        // Assert
        assert_eq!(model.lags().max(), 2);
        assert_eq!(model.input_ts().len(), 3);
        assert_eq!(model.forecast(ArrayView1::from(&[1.0][..])), Ok(2.0));
    }
}
