use candle_core::Device;
use tokenizers::{Encoding, Tokenizer};

use super::bert::SentimentBertModel;
use super::checkpoint::{Architecture, Checkpoint};
use super::modernbert::SentimentModernBertModel;
use crate::error::Result;
use crate::loaders::{ModelDir, TokenizerLoader};
use crate::pipelines::sentiment::model::SentimentAnalysisModel;
use crate::pipelines::sentiment::pipeline::LabelScore;

/// Whichever supported classifier the checkpoint in a [`ModelDir`] declares.
///
/// `config.json`'s `model_type` (or `architectures`) picks the backend:
/// `modernbert` or `bert`. Anything else fails to load with
/// [`SentimentError::ModelLoad`](crate::error::SentimentError::ModelLoad).
pub enum SentimentClassifierModel {
    /// A ModernBERT checkpoint.
    ModernBert(SentimentModernBertModel),
    /// A BERT checkpoint.
    Bert(SentimentBertModel),
}

impl SentimentClassifierModel {
    /// Load the checkpoint in `dir` onto `device`.
    pub fn new(dir: &ModelDir, device: Device) -> Result<Self> {
        let checkpoint = Checkpoint::read(dir)?;
        tracing::info!(architecture = %checkpoint.architecture, "loading classifier");

        Ok(match checkpoint.architecture {
            Architecture::ModernBert => {
                Self::ModernBert(SentimentModernBertModel::from_checkpoint(dir, checkpoint, device)?)
            }
            Architecture::Bert => {
                Self::Bert(SentimentBertModel::from_checkpoint(dir, checkpoint, device)?)
            }
        })
    }
}

impl SentimentAnalysisModel for SentimentClassifierModel {
    type Options = ModelDir;

    fn new(options: Self::Options, device: Device) -> Result<Self> {
        SentimentClassifierModel::new(&options, device)
    }

    fn predict_scores(&self, encoding: &Encoding) -> Result<Vec<LabelScore>> {
        match self {
            Self::ModernBert(model) => model.predict_scores(encoding),
            Self::Bert(model) => model.predict_scores(encoding),
        }
    }

    fn get_tokenizer(options: Self::Options, max_tokens: Option<usize>) -> Result<Tokenizer> {
        TokenizerLoader::new(&options)?
            .with_max_tokens(max_tokens)
            .load()
    }

    fn device(&self) -> &Device {
        match self {
            Self::ModernBert(model) => model.device(),
            Self::Bert(model) => model.device(),
        }
    }
}
