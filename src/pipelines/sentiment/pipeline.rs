use super::model::{SentimentAnalysisModel, TextClassifier};
use crate::error::{Result, SentimentError};
use crate::pipelines::stats::PipelineStats;
use std::fmt;
use tokenizers::Tokenizer;

// ============ Output types ============

/// One `{label, score}` entry as returned by a classifier.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelScore {
    /// Raw label, e.g. `"LABEL_2"`.
    pub label: String,
    /// Model score for this label.
    pub score: f32,
}

impl LabelScore {
    /// Convenience constructor.
    pub fn new(label: impl Into<String>, score: f32) -> Self {
        Self {
            label: label.into(),
            score,
        }
    }
}

/// Model confidence, always within `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Confidence(f32);

impl Confidence {
    /// Validate a raw score.
    ///
    /// # Errors
    ///
    /// [`SentimentError::Inference`] if `value` is NaN, infinite or outside `0.0..=1.0`.
    pub fn new(value: f32) -> Result<Self> {
        if value.is_finite() && (0.0..=1.0).contains(&value) {
            Ok(Self(value))
        } else {
            Err(SentimentError::Inference(format!(
                "classifier score {value} is outside [0, 1]"
            )))
        }
    }

    /// The underlying score.
    pub fn value(self) -> f32 {
        self.0
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

/// Top prediction for one analysis request.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassificationResult {
    /// Raw label from the classifier.
    pub label: String,
    /// Score of that label.
    pub confidence: Confidence,
}

impl TryFrom<LabelScore> for ClassificationResult {
    type Error = SentimentError;

    fn try_from(value: LabelScore) -> Result<Self> {
        Ok(Self {
            confidence: Confidence::new(value.score)?,
            label: value.label,
        })
    }
}

/// Output from [`SentimentAnalysisPipeline::run`].
#[derive(Debug)]
pub struct Output {
    /// All labels with their probabilities, best first.
    pub predictions: Vec<LabelScore>,
    /// Execution statistics.
    pub stats: PipelineStats,
}

// ============ Pipeline ============

/// Runs a local sentiment model over review text.
///
/// Construct with [`SentimentAnalysisPipelineBuilder`](super::SentimentAnalysisPipelineBuilder).
///
/// # Examples
///
/// ```rust,no_run
/// # use review_sentiment::sentiment::SentimentAnalysisPipelineBuilder;
/// # fn main() -> review_sentiment::error::Result<()> {
/// let pipeline = SentimentAnalysisPipelineBuilder::local("fp-model").build()?;
///
/// let output = pipeline.run("Super fast delivery!")?;
/// let top = &output.predictions[0];
/// println!("{}: {:.2}", top.label, top.score);
/// # Ok(())
/// # }
/// ```
pub struct SentimentAnalysisPipeline<M: SentimentAnalysisModel> {
    pub(crate) model: M,
    pub(crate) tokenizer: Tokenizer,
}

impl<M: SentimentAnalysisModel> SentimentAnalysisPipeline<M> {
    /// Score every label for `text`.
    ///
    /// Inputs longer than the tokenizer's `max_tokens` are truncated, which
    /// [`PipelineStats::truncated`] reports.
    pub fn run(&self, text: &str) -> Result<Output> {
        let mut stats_builder = PipelineStats::start();

        let encoding = self.tokenizer.encode(text, true).map_err(|e| {
            SentimentError::Tokenization(format!(
                "Tokenization failed on '{}': {}",
                text.chars().take(50).collect::<String>(),
                e
            ))
        })?;
        stats_builder.record(&encoding);

        let predictions = self.model.predict_scores(&encoding)?;
        if predictions.is_empty() {
            return Err(SentimentError::Unexpected("No predictions returned".into()));
        }

        let stats = stats_builder.finish(1);
        if stats.truncated {
            tracing::debug!(tokens = stats.tokens_processed, "review truncated");
        }
        tracing::trace!(elapsed = ?stats.total_time, tokens = stats.tokens_processed, "pipeline run");

        Ok(Output { predictions, stats })
    }

    /// Returns the device (CPU/GPU) the model is running on.
    pub fn device(&self) -> &candle_core::Device {
        self.model.device()
    }
}

impl<M: SentimentAnalysisModel> TextClassifier for SentimentAnalysisPipeline<M> {
    fn classify(&self, text: &str) -> Result<Vec<LabelScore>> {
        Ok(self.run(text)?.predictions)
    }
}
