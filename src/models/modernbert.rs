use candle_core::{Device, Tensor};
use candle_nn::VarBuilder;
use candle_transformers::models::modernbert::{
    ClassifierConfig, ClassifierPooling, Config,
    ModernBertForSequenceClassification as CandleModernBertForSequenceClassification,
};
use std::collections::HashMap;
use tokenizers::{Encoding, Tokenizer};

use super::checkpoint::{self, Architecture, Checkpoint};
use crate::error::Result;
use crate::loaders::{ModelDir, TokenizerLoader};
use crate::pipelines::sentiment::pipeline::LabelScore;

/// ModernBERT with a sequence-classification head, loaded from a local [`ModelDir`].
#[derive(Clone)]
pub struct SentimentModernBertModel {
    model: CandleModernBertForSequenceClassification,
    device: Device,
    id2label: HashMap<String, String>,
}

impl SentimentModernBertModel {
    /// Load config and weights from `dir` onto `device`.
    pub fn new(dir: &ModelDir, device: Device) -> Result<Self> {
        let checkpoint = Checkpoint::read(dir)?;
        Architecture::ModernBert.expect(checkpoint.architecture)?;
        Self::from_checkpoint(dir, checkpoint, device)
    }

    pub(crate) fn from_checkpoint(dir: &ModelDir, checkpoint: Checkpoint, device: Device) -> Result<Self> {
        let mut config: Config = checkpoint.config()?;
        patch_config_num_labels(&mut config, &checkpoint.id2label);

        let vb = checkpoint::var_builder(&dir.weights_path()?, &device)?;
        let model = load_classifier(vb, &config)?;

        tracing::debug!(
            dir = %dir.path().display(),
            num_labels = checkpoint.id2label.len(),
            "ModernBERT classifier ready"
        );

        Ok(Self {
            model,
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
        let attention_mask =
            Tensor::new(encoding.get_attention_mask(), &self.device)?.unsqueeze(0)?;

        let logits = self.model.forward(&input_ids, &attention_mask)?;
        checkpoint::label_scores(&logits, &self.id2label)
    }

    /// Load `tokenizer.json` from `dir`, truncating to `max_tokens` when set.
    pub fn get_tokenizer(dir: &ModelDir, max_tokens: Option<usize>) -> Result<Tokenizer> {
        TokenizerLoader::new(dir)?
            .with_max_tokens(max_tokens)
            .load()
    }
}

impl crate::pipelines::sentiment::model::SentimentAnalysisModel for SentimentModernBertModel {
    type Options = ModelDir;

    fn new(options: Self::Options, device: Device) -> Result<Self> {
        SentimentModernBertModel::new(&options, device)
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

fn load_classifier(vb: VarBuilder, config: &Config) -> Result<CandleModernBertForSequenceClassification> {
    Ok(CandleModernBertForSequenceClassification::load(vb, config)?)
}

/// The candle head sizes its output layer from `classifier_config.id2label`,
/// which must agree with the completed label table.
fn patch_config_num_labels(config: &mut Config, id2label: &HashMap<String, String>) {
    let current = config
        .classifier_config
        .as_ref()
        .map(|c| c.id2label.len())
        .unwrap_or(0);

    if current != id2label.len() {
        let label2id: HashMap<String, String> = id2label
            .iter()
            .map(|(k, v)| (v.clone(), k.clone()))
            .collect();

        config.classifier_config = Some(ClassifierConfig {
            id2label: id2label.clone(),
            label2id,
            classifier_pooling: ClassifierPooling::default(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(extra: &str) -> Config {
        serde_json::from_str(&format!(
            r#"{{
                "vocab_size": 50368, "hidden_size": 768, "num_hidden_layers": 22,
                "num_attention_heads": 12, "intermediate_size": 1152, "max_position_embeddings": 8192,
                "layer_norm_eps": 1e-5, "pad_token_id": 50283, "global_attn_every_n_layers": 3,
                "global_rope_theta": 160000.0, "local_attention": 128, "local_rope_theta": 10000.0
                {extra}
            }}"#
        ))
        .unwrap()
    }

    fn three_labels() -> HashMap<String, String> {
        (0..3).map(|i| (i.to_string(), format!("LABEL_{i}"))).collect()
    }

    #[test]
    fn missing_classifier_config_is_filled_from_labels() {
        let mut config = config("");
        patch_config_num_labels(&mut config, &three_labels());

        let classifier = config.classifier_config.unwrap();
        assert_eq!(classifier.id2label, three_labels());
        assert_eq!(classifier.label2id["LABEL_2"], "2");
    }

    #[test]
    fn mismatched_label_count_is_overwritten() {
        let mut config = config(
            r#", "id2label": {"0": "neg", "1": "pos"}, "label2id": {"neg": "0", "pos": "1"}, "classifier_pooling": "mean""#,
        );
        assert_eq!(config.classifier_config.as_ref().unwrap().id2label.len(), 2);

        patch_config_num_labels(&mut config, &three_labels());
        let classifier = config.classifier_config.unwrap();
        assert_eq!(classifier.id2label, three_labels());
        assert_eq!(classifier.classifier_pooling, ClassifierPooling::CLS);
    }

    #[test]
    fn matching_label_count_is_kept() {
        let mut config = config(
            r#", "id2label": {"0": "neg", "1": "neu", "2": "pos"}, "label2id": {"neg": "0", "neu": "1", "pos": "2"}, "classifier_pooling": "cls""#,
        );
        let before = config.classifier_config.clone();
        patch_config_num_labels(&mut config, &three_labels());

        assert_eq!(config.classifier_config, before);
        assert_eq!(config.classifier_config.unwrap().id2label["1"], "neu");
    }

    #[test]
    fn bert_checkpoint_is_not_loaded_as_modernbert() -> Result<()> {
        let tmp = tempfile::tempdir()?;
        std::fs::write(
            tmp.path().join("config.json"),
            r#"{"model_type": "bert", "id2label": {"0": "LABEL_0", "1": "LABEL_1", "2": "LABEL_2"}}"#,
        )?;
        std::fs::write(tmp.path().join("model.safetensors"), b"")?;

        let err = SentimentModernBertModel::new(&ModelDir::new(tmp.path()), Device::Cpu)
            .err()
            .unwrap();
        assert_eq!(
            err,
            crate::error::SentimentError::ModelLoad(
                "unsupported architecture 'bert'; expected modernbert".into()
            )
        );
        Ok(())
    }
}
