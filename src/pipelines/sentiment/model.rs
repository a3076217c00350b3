use super::pipeline::LabelScore;
use crate::error::Result;
use tokenizers::{Encoding, Tokenizer};

/// A sequence-classification model the pipeline can drive.
pub trait SentimentAnalysisModel {
    /// What the builder needs to load the model (e.g. a model directory).
    type Options: std::fmt::Debug + Clone;

    /// Load the model onto `device`.
    fn new(options: Self::Options, device: candle_core::Device) -> Result<Self>
    where
        Self: Sized;

    /// Every label with its probability for one encoded input, best first.
    fn predict_scores(&self, encoding: &Encoding) -> Result<Vec<LabelScore>>;

    /// Load the tokenizer that matches the model.
    fn get_tokenizer(options: Self::Options, max_tokens: Option<usize>) -> Result<Tokenizer>;

    /// Device the model runs on.
    fn device(&self) -> &candle_core::Device;
}

/// External text-classification function: text in, `{label, score}` list out,
/// best match first.
///
/// Implemented by [`SentimentAnalysisPipeline`](super::SentimentAnalysisPipeline) and by
/// any `Fn(&str) -> Result<Vec<LabelScore>>`, which is handy for stubs.
pub trait TextClassifier {
    /// Classify `text`.
    fn classify(&self, text: &str) -> Result<Vec<LabelScore>>;
}

impl<F> TextClassifier for F
where
    F: Fn(&str) -> Result<Vec<LabelScore>>,
{
    fn classify(&self, text: &str) -> Result<Vec<LabelScore>> {
        self(text)
    }
}
