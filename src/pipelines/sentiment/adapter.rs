use super::model::TextClassifier;
use super::pipeline::{ClassificationResult, SentimentAnalysisPipeline};
use super::{SentimentAnalysisPipelineBuilder, SentimentClassifier};
use crate::config::AppConfig;
use crate::error::{Result, SentimentError};
use crate::pipelines::cache::ModelSlot;
use std::sync::Arc;

type Loader<C> = Box<dyn Fn() -> Result<C> + Send + Sync>;

/// Owns the process-wide classifier and turns its output into a
/// [`ClassificationResult`].
///
/// The classifier is loaded on first use, at most once. A failed load is
/// permanent: every later call reports [`SentimentError::ModelUnavailable`]
/// until the process restarts.
///
/// ```rust
/// use review_sentiment::error::Result;
/// use review_sentiment::sentiment::{ClassifierAdapter, LabelScore};
///
/// # fn main() -> Result<()> {
/// let adapter = ClassifierAdapter::loaded(|_text: &str| -> Result<Vec<LabelScore>> {
///     Ok(vec![LabelScore::new("LABEL_2", 0.93)])
/// });
///
/// let result = adapter.classify("Super fast delivery!")?;
/// assert_eq!(result.label, "LABEL_2");
/// # Ok(())
/// # }
/// ```
pub struct ClassifierAdapter<C> {
    slot: ModelSlot<C>,
    loader: Option<Loader<C>>,
}

impl<C: TextClassifier> ClassifierAdapter<C> {
    /// Load the classifier with `loader` the first time it is needed.
    pub fn new<F>(loader: F) -> Self
    where
        F: Fn() -> Result<C> + Send + Sync + 'static,
    {
        Self {
            slot: ModelSlot::new(),
            loader: Some(Box::new(loader)),
        }
    }

    /// Wrap a classifier that is already loaded.
    pub fn loaded(classifier: C) -> Self {
        Self {
            slot: ModelSlot::with_model(classifier),
            loader: None,
        }
    }

    /// An adapter with no model, e.g. after loading failed elsewhere.
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self {
            slot: ModelSlot::failed(reason),
            loader: None,
        }
    }

    /// The loaded classifier, loading it now if this is the first call.
    ///
    /// # Errors
    ///
    /// [`SentimentError::ModelUnavailable`] if loading failed, now or earlier.
    pub fn ensure_loaded(&self) -> Result<Arc<C>> {
        self.slot.get_or_load(|| match &self.loader {
            Some(loader) => loader(),
            None => Err(SentimentError::Unexpected(
                "no model loader configured".into(),
            )),
        })
    }

    /// Whether a model is loaded. Triggers the load on first call.
    pub fn is_available(&self) -> bool {
        self.ensure_loaded().is_ok()
    }

    /// Classify `text` and keep the classifier's first result.
    ///
    /// # Errors
    ///
    /// - [`SentimentError::ModelUnavailable`] if no model is loaded.
    /// - [`SentimentError::Inference`] if the classifier fails, returns nothing,
    ///   or reports a score outside `[0, 1]`.
    pub fn classify(&self, text: &str) -> Result<ClassificationResult> {
        let classifier = self.ensure_loaded()?;

        let scores = classifier.classify(text).map_err(|e| match e {
            SentimentError::Inference(_) => e,
            other => SentimentError::Inference(other.to_string()),
        })?;

        let top = scores
            .into_iter()
            .next()
            .ok_or_else(|| SentimentError::Inference("classifier returned no results".into()))?;

        ClassificationResult::try_from(top)
    }
}

impl ClassifierAdapter<SentimentAnalysisPipeline<SentimentClassifier>> {
    /// Lazily build the local pipeline described by `config`.
    pub fn from_config(config: &AppConfig) -> Self {
        let config = config.clone();
        Self::new(move || SentimentAnalysisPipelineBuilder::from_config(&config).build())
    }
}
