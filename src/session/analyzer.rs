use super::history::SessionHistory;
use super::record::SentimentRecord;
use crate::config::{AppConfig, DEFAULT_EXCERPT_CHARS};
use crate::error::{Result, SentimentError};
use crate::pipelines::sentiment::{
    ClassifierAdapter, Confidence, LabelMap, Sentiment, TextClassifier,
};
use std::fmt;
use std::sync::Arc;

/// Non-fatal issue attached to a successful [`Analysis`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisWarning {
    /// The classifier returned a label outside the [`LabelMap`]; the review was
    /// recorded as [`Sentiment::Unknown`].
    UnknownLabel {
        /// The raw label, as returned by the classifier.
        label: String,
    },
}

impl fmt::Display for AnalysisWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalysisWarning::UnknownLabel { label } => write!(f, "Unknown Sentiment: {label}"),
        }
    }
}

/// Result of one successful [`ReviewSession::analyze`] call.
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    /// Mapped sentiment.
    pub sentiment: Sentiment,
    /// Classifier confidence.
    pub confidence: Confidence,
    /// Label as returned by the classifier.
    pub raw_label: String,
    /// Set when the result needs the user's attention.
    pub warning: Option<AnalysisWarning>,
}

/// One user's interactive session: the shared classifier plus this session's history.
///
/// Every user action goes through a method on this object and runs to completion
/// before the next one.
///
/// ```rust
/// use review_sentiment::error::{Result, SentimentError};
/// use review_sentiment::sentiment::{ClassifierAdapter, LabelScore, Sentiment};
/// use review_sentiment::session::ReviewSession;
/// use std::sync::Arc;
///
/// # fn main() -> Result<()> {
/// let adapter = Arc::new(ClassifierAdapter::loaded(|_text: &str| -> Result<Vec<LabelScore>> {
///     Ok(vec![LabelScore::new("LABEL_2", 0.93)])
/// }));
/// let mut session = ReviewSession::new(adapter);
///
/// let analysis = session.analyze("Super fast delivery!")?;
/// assert_eq!(analysis.sentiment, Sentiment::Positive);
/// assert_eq!(session.history().len(), 1);
///
/// assert_eq!(session.analyze("   ").unwrap_err(), SentimentError::EmptyInput);
/// assert_eq!(session.history().len(), 1);
/// # Ok(())
/// # }
/// ```
pub struct ReviewSession<C> {
    adapter: Arc<ClassifierAdapter<C>>,
    labels: LabelMap,
    excerpt_chars: usize,
    history: SessionHistory,
}

impl<C: TextClassifier> ReviewSession<C> {
    /// New session with the default label table and excerpt length.
    pub fn new(adapter: Arc<ClassifierAdapter<C>>) -> Self {
        Self {
            adapter,
            labels: LabelMap::default(),
            excerpt_chars: DEFAULT_EXCERPT_CHARS,
            history: SessionHistory::new(),
        }
    }

    /// New session using the labels and excerpt length from `config`.
    pub fn from_config(adapter: Arc<ClassifierAdapter<C>>, config: &AppConfig) -> Self {
        Self::new(adapter)
            .with_labels(config.labels.clone())
            .with_excerpt_chars(config.excerpt_chars)
    }

    /// Replace the label table.
    pub fn with_labels(mut self, labels: LabelMap) -> Self {
        self.labels = labels;
        self
    }

    /// Keep at most `excerpt_chars` characters of each review in history.
    pub fn with_excerpt_chars(mut self, excerpt_chars: usize) -> Self {
        self.excerpt_chars = excerpt_chars;
        self
    }

    /// Classify `review` and record the outcome.
    ///
    /// A record is appended only when this returns `Ok`, including when the label
    /// was unknown (see [`Analysis::warning`]).
    ///
    /// # Errors
    ///
    /// - [`SentimentError::ModelUnavailable`] if the classifier could not be loaded.
    /// - [`SentimentError::EmptyInput`] if `review` is blank.
    /// - [`SentimentError::Inference`] if classification failed.
    pub fn analyze(&mut self, review: &str) -> Result<Analysis> {
        self.adapter.ensure_loaded()?;

        if review.trim().is_empty() {
            return Err(SentimentError::EmptyInput);
        }

        let result = self.adapter.classify(review)?;
        let sentiment = self.labels.map(&result.label);

        let warning = if sentiment == Sentiment::Unknown {
            tracing::warn!(label = %result.label, "classifier returned an unknown label");
            Some(AnalysisWarning::UnknownLabel {
                label: result.label.clone(),
            })
        } else {
            None
        };

        self.history.append(SentimentRecord::new(
            review,
            sentiment,
            result.confidence,
            self.excerpt_chars,
        ));

        tracing::debug!(
            %sentiment,
            confidence = result.confidence.value(),
            history_len = self.history.len(),
            "review analyzed"
        );

        Ok(Analysis {
            sentiment,
            confidence: result.confidence,
            raw_label: result.label,
            warning,
        })
    }

    /// Drop every record from this session's history.
    pub fn clear_history(&mut self) {
        tracing::debug!(cleared = self.history.len(), "history cleared");
        self.history.clear();
    }

    /// This session's history.
    pub fn history(&self) -> &SessionHistory {
        &self.history
    }

    /// The shared classifier.
    pub fn adapter(&self) -> &ClassifierAdapter<C> {
        &self.adapter
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipelines::sentiment::LabelScore;
    use std::cell::RefCell;

    struct Fixed(&'static str, f32);

    impl TextClassifier for Fixed {
        fn classify(&self, _text: &str) -> Result<Vec<LabelScore>> {
            Ok(vec![LabelScore::new(self.0, self.1)])
        }
    }

    /// Answers `LABEL_1` and keeps every text it was asked about.
    #[derive(Default)]
    struct Recording {
        seen: RefCell<Vec<String>>,
    }

    impl TextClassifier for Recording {
        fn classify(&self, text: &str) -> Result<Vec<LabelScore>> {
            self.seen.borrow_mut().push(text.to_owned());
            Ok(vec![LabelScore::new("LABEL_1", 0.5)])
        }
    }

    fn session(label: &'static str, score: f32) -> ReviewSession<Fixed> {
        ReviewSession::new(Arc::new(ClassifierAdapter::loaded(Fixed(label, score))))
    }

    #[test]
    fn unknown_label_is_recorded_with_warning() {
        let mut session = session("LABEL_7", 0.41);
        let analysis = session.analyze("Meh").unwrap();

        assert_eq!(analysis.sentiment, Sentiment::Unknown);
        assert_eq!(
            analysis.warning,
            Some(AnalysisWarning::UnknownLabel {
                label: "LABEL_7".into()
            })
        );
        assert_eq!(
            analysis.warning.unwrap().to_string(),
            "Unknown Sentiment: LABEL_7"
        );
        assert_eq!(session.history().snapshot()[0].sentiment, Sentiment::Unknown);
    }

    #[test]
    fn model_unavailable_wins_over_empty_input() {
        let mut session: ReviewSession<Fixed> =
            ReviewSession::new(Arc::new(ClassifierAdapter::unavailable("no fp-model")));
        assert!(matches!(
            session.analyze(""),
            Err(SentimentError::ModelUnavailable(_))
        ));
        assert!(session.history().is_empty());
    }

    #[test]
    fn config_controls_labels_and_excerpts() {
        let config = AppConfig {
            excerpt_chars: 4,
            labels: LabelMap::new("neg", "neu", "pos"),
            ..AppConfig::default()
        };
        let adapter = Arc::new(ClassifierAdapter::loaded(Fixed("pos", 0.7)));
        let mut session = ReviewSession::from_config(adapter, &config);

        let analysis = session.analyze("Lovely screen").unwrap();
        assert_eq!(analysis.sentiment, Sentiment::Positive);
        assert!(analysis.warning.is_none());
        assert_eq!(session.history().snapshot()[0].review_excerpt, "Love...");
    }

    #[test]
    fn review_is_classified_untrimmed_but_excerpted() {
        let mut session =
            ReviewSession::new(Arc::new(ClassifierAdapter::loaded(Recording::default())));
        session.analyze("  okay product  ").unwrap();
        assert!(session.analyze(" \t ").is_err());

        let classifier = session.adapter().ensure_loaded().unwrap();
        assert_eq!(*classifier.seen.borrow(), ["  okay product  "]);
        assert_eq!(
            session.history().snapshot()[0].review_excerpt,
            "  okay product  "
        );
    }
}
