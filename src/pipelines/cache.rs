use crate::error::{Result, SentimentError};
use once_cell::sync::OnceCell;
use std::sync::Arc;

// The outcome of the first load is stored, failure included. A failed slot never
// calls its loader again.
type LoadOutcome<M> = std::result::Result<Arc<M>, String>;

/// Lazily initialized, memoized handle to an expensive model.
pub struct ModelSlot<M> {
    cell: OnceCell<LoadOutcome<M>>,
}

impl<M> ModelSlot<M> {
    pub fn new() -> Self {
        Self {
            cell: OnceCell::new(),
        }
    }

    /// A slot that is already initialized with `model`.
    pub fn with_model(model: M) -> Self {
        Self {
            cell: OnceCell::with_value(Ok(Arc::new(model))),
        }
    }

    /// A slot whose load already failed.
    pub fn failed(reason: impl Into<String>) -> Self {
        Self {
            cell: OnceCell::with_value(Err(reason.into())),
        }
    }

    pub fn get_or_load<F>(&self, loader: F) -> Result<Arc<M>>
    where
        F: FnOnce() -> Result<M>,
    {
        let outcome = self.cell.get_or_init(|| {
            tracing::info!("loading model");
            match loader() {
                Ok(model) => {
                    tracing::info!("model loaded");
                    Ok(Arc::new(model))
                }
                Err(e) => {
                    tracing::error!(error = %e, "model failed to load");
                    Err(e.to_string())
                }
            }
        });

        match outcome {
            Ok(model) => Ok(Arc::clone(model)),
            Err(reason) => Err(SentimentError::ModelUnavailable(reason.clone())),
        }
    }

    #[allow(dead_code)]
    pub fn is_initialized(&self) -> bool {
        self.cell.get().is_some()
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self.cell.get(), Some(Ok(_)))
    }
}

impl<M> Default for ModelSlot<M> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    struct TestModel {
        id: String,
    }

    #[test]
    fn test_slot_returns_same_instance() {
        let slot = ModelSlot::new();
        let model1 = slot
            .get_or_load(|| {
                Ok(TestModel {
                    id: "original".into(),
                })
            })
            .unwrap();
        let model2 = slot
            .get_or_load(|| Ok(TestModel { id: "new".into() }))
            .unwrap();
        assert_eq!(model1.id, "original");
        assert!(Arc::ptr_eq(&model1, &model2));
    }

    #[test]
    fn test_loader_runs_once() {
        let slot = ModelSlot::new();
        let calls = Cell::new(0);
        for _ in 0..3 {
            slot.get_or_load(|| {
                calls.set(calls.get() + 1);
                Ok(TestModel { id: "m".into() })
            })
            .unwrap();
        }
        assert_eq!(calls.get(), 1);
        assert!(slot.is_loaded());
    }

    #[test]
    fn test_failure_is_permanent() {
        let slot: ModelSlot<TestModel> = ModelSlot::new();
        let calls = Cell::new(0);

        for _ in 0..2 {
            let err = slot
                .get_or_load(|| {
                    calls.set(calls.get() + 1);
                    Err(SentimentError::ModelLoad("missing config.json".into()))
                })
                .err()
                .unwrap();
            assert_eq!(
                err,
                SentimentError::ModelUnavailable("missing config.json".into())
            );
        }

        let err = slot
            .get_or_load(|| Ok(TestModel { id: "late".into() }))
            .err()
            .unwrap();
        assert!(matches!(err, SentimentError::ModelUnavailable(_)));
        assert_eq!(calls.get(), 1);
        assert!(slot.is_initialized());
        assert!(!slot.is_loaded());
    }

    #[test]
    fn test_prefilled_slots() {
        let ready = ModelSlot::with_model(TestModel { id: "x".into() });
        assert!(ready.is_loaded());
        assert_eq!(ready.get_or_load(|| unreachable!()).unwrap().id, "x");

        let broken: ModelSlot<TestModel> = ModelSlot::failed("no model");
        assert!(!broken.is_loaded());
        assert!(broken.get_or_load(|| unreachable!()).is_err());
    }
}
