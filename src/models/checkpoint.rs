use candle_core::{DType, Device, Tensor, D};
use candle_nn::{ops::softmax, VarBuilder};
use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use crate::error::{Result, SentimentError};
use crate::loaders::ModelDir;
use crate::pipelines::sentiment::pipeline::LabelScore;

/// Encoder family a checkpoint's `config.json` declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Architecture {
    /// `model_type: "modernbert"`, `ModernBertForSequenceClassification`.
    ModernBert,
    /// `model_type: "bert"`, `BertForSequenceClassification`.
    Bert,
}

impl Architecture {
    const SUPPORTED: [Architecture; 2] = [Architecture::ModernBert, Architecture::Bert];

    fn model_type(self) -> &'static str {
        match self {
            Architecture::ModernBert => "modernbert",
            Architecture::Bert => "bert",
        }
    }

    fn class_name(self) -> &'static str {
        match self {
            Architecture::ModernBert => "ModernBertForSequenceClassification",
            Architecture::Bert => "BertForSequenceClassification",
        }
    }

    /// Fail unless the checkpoint is of this architecture.
    pub fn expect(self, found: Architecture) -> Result<()> {
        if self == found {
            Ok(())
        } else {
            Err(unsupported(found.model_type(), &[self]))
        }
    }
}

impl fmt::Display for Architecture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.model_type())
    }
}

fn unsupported(found: &str, expected: &[Architecture]) -> SentimentError {
    let expected = expected
        .iter()
        .map(|a| a.model_type())
        .collect::<Vec<_>>()
        .join(" or ");
    SentimentError::ModelLoad(format!(
        "unsupported architecture '{found}'; expected {expected}"
    ))
}

/// The parts of `config.json` every sequence-classification checkpoint shares.
#[derive(Debug, Deserialize)]
pub struct ClassifierConfigJson {
    #[serde(default)]
    model_type: Option<String>,
    #[serde(default)]
    architectures: Vec<String>,
    #[serde(default)]
    id2label: HashMap<String, String>,
    #[serde(default)]
    label2id: HashMap<String, u32>,
}

impl ClassifierConfigJson {
    fn num_labels(&self) -> usize {
        self.label2id.len().max(self.id2label.len())
    }

    /// Resolve the architecture from `model_type`, falling back to `architectures`.
    pub fn architecture(&self) -> Result<Architecture> {
        if let Some(model_type) = &self.model_type {
            return Architecture::SUPPORTED
                .into_iter()
                .find(|a| a.model_type() == model_type.to_ascii_lowercase())
                .ok_or_else(|| unsupported(model_type, &Architecture::SUPPORTED));
        }

        match self.architectures.first() {
            Some(class) => Architecture::SUPPORTED
                .into_iter()
                .find(|a| a.class_name() == class)
                .ok_or_else(|| unsupported(class, &Architecture::SUPPORTED)),
            None => Err(SentimentError::ModelLoad(
                "config.json names neither model_type nor architectures".into(),
            )),
        }
    }

    /// `id2label` with gaps filled from `label2id`, then from `LABEL_{id}`.
    pub fn complete_id2label(&self) -> Result<HashMap<String, String>> {
        let num_labels = self.num_labels();
        if num_labels == 0 {
            return Err(SentimentError::ModelLoad(
                "config.json declares no labels (id2label/label2id are empty)".into(),
            ));
        }

        let mut id2label = self.id2label.clone();
        for (label, id) in &self.label2id {
            id2label
                .entry(id.to_string())
                .or_insert_with(|| label.clone());
        }
        for id in 0..num_labels {
            id2label
                .entry(id.to_string())
                .or_insert_with(|| default_label(id));
        }
        Ok(id2label)
    }
}

/// A checkpoint directory read far enough to pick a backend.
pub struct Checkpoint {
    /// Raw `config.json`, for the backend's own config type.
    pub config_json: String,
    /// Architecture declared by `config.json`.
    pub architecture: Architecture,
    /// Completed label table.
    pub id2label: HashMap<String, String>,
}

impl Checkpoint {
    /// Read and inspect `config.json`. Weights are not touched.
    pub fn read(dir: &ModelDir) -> Result<Self> {
        let config_json = std::fs::read_to_string(dir.config_path()?)?;
        let header: ClassifierConfigJson = serde_json::from_str(&config_json)?;

        Ok(Self {
            architecture: header.architecture()?,
            id2label: header.complete_id2label()?,
            config_json,
        })
    }

    /// Parse `config.json` into a backend config.
    pub fn config<T: serde::de::DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_str(&self.config_json)?)
    }
}

/// Memory-map `model.safetensors` or read `pytorch_model.bin`.
pub fn var_builder(weights_path: &Path, device: &Device) -> Result<VarBuilder<'static>> {
    let vb = if weights_path.extension().is_some_and(|e| e == "safetensors") {
        unsafe { VarBuilder::from_mmaped_safetensors(&[weights_path], DType::F32, device)? }
    } else {
        VarBuilder::from_pth(weights_path, DType::F32, device)?
    };
    Ok(vb)
}

/// Softmax over `(1, num_labels)` logits, labelled and sorted best first.
pub fn label_scores(logits: &Tensor, id2label: &HashMap<String, String>) -> Result<Vec<LabelScore>> {
    let probs = softmax(logits, D::Minus1)?.squeeze(0)?.to_vec1::<f32>()?;

    let mut scores: Vec<LabelScore> = probs
        .into_iter()
        .enumerate()
        .map(|(id, score)| LabelScore {
            label: id2label
                .get(&id.to_string())
                .cloned()
                .unwrap_or_else(|| default_label(id)),
            score,
        })
        .collect();
    scores.sort_by(|a, b| b.score.total_cmp(&a.score));

    Ok(scores)
}

/// Name Hugging Face gives class `id` when a checkpoint has no `id2label`.
fn default_label(id: usize) -> String {
    format!("LABEL_{id}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> ClassifierConfigJson {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn id2label_is_completed_from_label2id_and_defaults() {
        let raw = parse(r#"{"label2id": {"LABEL_0": 0, "LABEL_1": 1, "LABEL_2": 2}}"#);
        let id2label = raw.complete_id2label().unwrap();
        assert_eq!(id2label.len(), 3);
        assert_eq!(id2label["2"], "LABEL_2");
    }

    #[test]
    fn explicit_id2label_wins() {
        let raw = parse(
            r#"{"id2label": {"0": "negative", "1": "positive"}, "label2id": {"neg": 0, "pos": 1}}"#,
        );
        let id2label = raw.complete_id2label().unwrap();
        assert_eq!(id2label["0"], "negative");
        assert_eq!(id2label["1"], "positive");
    }

    #[test]
    fn config_without_labels_is_rejected() {
        let raw = parse(r#"{"hidden_size": 768}"#);
        assert!(matches!(
            raw.complete_id2label(),
            Err(SentimentError::ModelLoad(_))
        ));
    }

    #[test]
    fn architecture_comes_from_model_type_or_class_name() {
        let raw = parse(r#"{"model_type": "modernbert"}"#);
        assert_eq!(raw.architecture().unwrap(), Architecture::ModernBert);

        let raw = parse(r#"{"model_type": "bert", "architectures": ["ModernBertForSequenceClassification"]}"#);
        assert_eq!(raw.architecture().unwrap(), Architecture::Bert);

        let raw = parse(r#"{"architectures": ["BertForSequenceClassification"]}"#);
        assert_eq!(raw.architecture().unwrap(), Architecture::Bert);

        assert!(matches!(
            parse("{}").architecture(),
            Err(SentimentError::ModelLoad(_))
        ));
    }

    #[test]
    fn distilbert_is_reported_as_unsupported() {
        let raw = parse(r#"{"model_type": "distilbert", "architectures": ["DistilBertForSequenceClassification"], "dim": 768}"#);
        assert_eq!(
            raw.architecture().unwrap_err(),
            SentimentError::ModelLoad(
                "unsupported architecture 'distilbert'; expected modernbert or bert".into()
            )
        );
    }

    #[test]
    fn backends_insist_on_their_own_architecture() {
        assert!(Architecture::Bert.expect(Architecture::Bert).is_ok());
        assert_eq!(
            Architecture::ModernBert.expect(Architecture::Bert).unwrap_err(),
            SentimentError::ModelLoad("unsupported architecture 'bert'; expected modernbert".into())
        );
    }

    #[test]
    fn scores_are_probabilities_best_first() -> Result<()> {
        let logits = Tensor::new(&[[0.1f32, 2.0, -1.0]], &Device::Cpu)?;
        let id2label = HashMap::from([("1".to_string(), "positive".to_string())]);

        let scores = label_scores(&logits, &id2label)?;
        assert_eq!(scores[0].label, "positive");
        assert_eq!(scores[1].label, "LABEL_0");
        assert_eq!(scores[2].label, "LABEL_2");

        let total: f32 = scores.iter().map(|s| s.score).sum();
        assert!((total - 1.0).abs() < 1e-5);
        Ok(())
    }

    #[test]
    fn checkpoint_read_rejects_foreign_architectures_before_weights() -> Result<()> {
        let tmp = tempfile::tempdir()?;
        std::fs::write(
            tmp.path().join("config.json"),
            r#"{"model_type": "distilbert", "dim": 768, "id2label": {"0": "NEGATIVE", "1": "POSITIVE"}}"#,
        )?;
        std::fs::write(tmp.path().join("model.safetensors"), b"")?;

        let err = Checkpoint::read(&ModelDir::new(tmp.path())).err().unwrap();
        assert!(matches!(err, SentimentError::ModelLoad(ref m) if m.contains("'distilbert'")));
        Ok(())
    }
}
