//! Runtime configuration.
//!
//! Every field has a default, so an empty file (or no file at all) gives the
//! stock setup: model in `./fp-model`, CPU inference, 50-character excerpts.
//!
//! ```toml
//! model_dir = "fp-model"
//! max_tokens = 512
//! excerpt_chars = 50
//! cuda_device = 0
//!
//! [labels]
//! negative = "LABEL_0"
//! neutral = "LABEL_1"
//! positive = "LABEL_2"
//! ```

use crate::error::{Result, SentimentError};
use crate::pipelines::sentiment::LabelMap;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Default model directory, relative to the working directory.
pub const DEFAULT_MODEL_DIR: &str = "fp-model";
/// Default tokenizer truncation length.
pub const DEFAULT_MAX_TOKENS: usize = 512;
/// Default length of the review excerpt kept in history.
pub const DEFAULT_EXCERPT_CHARS: usize = 50;

/// Settings for loading the classifier and recording history.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Directory holding `config.json`, `tokenizer.json` and the weights.
    pub model_dir: PathBuf,
    /// CUDA device index; CPU when unset.
    pub cuda_device: Option<usize>,
    /// Inputs longer than this many tokens are truncated.
    pub max_tokens: usize,
    /// Characters of the review kept in each history record.
    pub excerpt_chars: usize,
    /// Raw label to sentiment table. Must match the model's training label order.
    pub labels: LabelMap,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            model_dir: PathBuf::from(DEFAULT_MODEL_DIR),
            cuda_device: None,
            max_tokens: DEFAULT_MAX_TOKENS,
            excerpt_chars: DEFAULT_EXCERPT_CHARS,
            labels: LabelMap::default(),
        }
    }
}

impl AppConfig {
    /// Parse a TOML document.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            SentimentError::Config(format!("failed to read '{}': {e}", path.display()))
        })?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!(path = %path.display(), ?config, "configuration loaded");
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.max_tokens == 0 {
            return Err(SentimentError::Config("max_tokens must be positive".into()));
        }
        let [(negative, _), (neutral, _), (positive, _)] = self.labels.entries();
        if negative == neutral || neutral == positive || negative == positive {
            return Err(SentimentError::Config(
                "labels.negative, labels.neutral and labels.positive must differ".into(),
            ));
        }
        Ok(())
    }
}
