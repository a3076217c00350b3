use candle_core::{Device, IndexOp, Module, Tensor};
use candle_nn::{linear, Linear, VarBuilder};
use candle_transformers::models::bert::{BertModel, Config};
use std::collections::HashMap;
use tokenizers::{Encoding, Tokenizer};

use super::checkpoint::{self, Architecture, Checkpoint};
use crate::error::Result;
use crate::loaders::{ModelDir, TokenizerLoader};
use crate::pipelines::sentiment::pipeline::LabelScore;

/// BERT with the Hugging Face `BertForSequenceClassification` head: the
/// `[CLS]` state goes through the tanh pooler and a linear classifier.
pub struct SentimentBertModel {
    bert: BertModel,
    pooler: Linear,
    classifier: Linear,
    device: Device,
    id2label: HashMap<String, String>,
}

impl SentimentBertModel {
    /// Load config and weights from `dir` onto `device`.
    pub fn new(dir: &ModelDir, device: Device) -> Result<Self> {
        let checkpoint = Checkpoint::read(dir)?;
        Architecture::Bert.expect(checkpoint.architecture)?;
        Self::from_checkpoint(dir, checkpoint, device)
    }

    pub(crate) fn from_checkpoint(dir: &ModelDir, checkpoint: Checkpoint, device: Device) -> Result<Self> {
        let config: Config = checkpoint.config()?;
        let vb = checkpoint::var_builder(&dir.weights_path()?, &device)?;
        let num_labels = checkpoint.id2label.len();

        let (bert, pooler, classifier) = load_classifier(vb, &config, num_labels)?;

        tracing::debug!(
            dir = %dir.path().display(),
            num_labels,
            "BERT classifier ready"
        );

        Ok(Self {
            bert,
            pooler,
            classifier,
            device,
            id2label: checkpoint.id2label,
        })
    }

    /// Device the weights live on.
    pub fn device(&self) -> &Device {
        &self.device
    }

    /// Class probabilities for an encoded review, best first.
    pub fn predict_scores(&self, encoding: &Encoding) -> Result<Vec<LabelScore>> {
        let input_ids = Tensor::new(encoding.get_ids(), &self.device)?.unsqueeze(0)?;
        let token_type_ids = Tensor::new(encoding.get_type_ids(), &self.device)?.unsqueeze(0)?;
        let attention_mask =
            Tensor::new(encoding.get_attention_mask(), &self.device)?.unsqueeze(0)?;

        let hidden = self
            .bert
            .forward(&input_ids, &token_type_ids, Some(&attention_mask))?;
        let cls = hidden.i((.., 0, ..))?.contiguous()?;
        let pooled = self.pooler.forward(&cls)?.tanh()?;
        let logits = self.classifier.forward(&pooled)?;

        checkpoint::label_scores(&logits, &self.id2label)
    }

    /// Load `tokenizer.json` from `dir`, truncating to `max_tokens` when set.
    pub fn get_tokenizer(dir: &ModelDir, max_tokens: Option<usize>) -> Result<Tokenizer> {
        TokenizerLoader::new(dir)?
            .with_max_tokens(max_tokens)
            .load()
    }
}

impl crate::pipelines::sentiment::model::SentimentAnalysisModel for SentimentBertModel {
    type Options = ModelDir;

    fn new(options: Self::Options, device: Device) -> Result<Self> {
        SentimentBertModel::new(&options, device)
    }

    fn predict_scores(&self, encoding: &Encoding) -> Result<Vec<LabelScore>> {
        self.predict_scores(encoding)
    }

    fn get_tokenizer(options: Self::Options, max_tokens: Option<usize>) -> Result<Tokenizer> {
        Self::get_tokenizer(&options, max_tokens)
    }

    fn device(&self) -> &Device {
        &self.device
    }
}

/// Weights live under `bert.*` with `classifier.*` beside them.
fn load_classifier(
    vb: VarBuilder,
    config: &Config,
    num_labels: usize,
) -> Result<(BertModel, Linear, Linear)> {
    let bert = BertModel::load(vb.pp("bert"), config)?;
    let pooler = linear(config.hidden_size, config.hidden_size, vb.pp("bert.pooler.dense"))?;
    let classifier = linear(config.hidden_size, num_labels, vb.pp("classifier"))?;
    Ok((bert, pooler, classifier))
}
