use crate::error::{Result, SentimentError};
use std::path::{Path, PathBuf};
use tokenizers::{Tokenizer, TruncationParams};

const CONFIG_FILE: &str = "config.json";
const TOKENIZER_FILE: &str = "tokenizer.json";
const WEIGHT_FILES: [&str; 2] = ["model.safetensors", "pytorch_model.bin"];

/// Local directory holding a fine-tuned classifier.
///
/// Expected contents: `config.json`, `tokenizer.json`, and either
/// `model.safetensors` or `pytorch_model.bin`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelDir {
    root: PathBuf,
}

impl ModelDir {
    /// Point at `root`. Nothing is read until the model is built.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The directory itself.
    pub fn path(&self) -> &Path {
        &self.root
    }

    pub(crate) fn config_path(&self) -> Result<PathBuf> {
        self.require(CONFIG_FILE)
    }

    pub(crate) fn tokenizer_path(&self) -> Result<PathBuf> {
        self.require(TOKENIZER_FILE)
    }

    pub(crate) fn weights_path(&self) -> Result<PathBuf> {
        WEIGHT_FILES
            .iter()
            .map(|name| self.root.join(name))
            .find(|path| path.is_file())
            .ok_or_else(|| {
                SentimentError::ModelLoad(format!(
                    "No weights in '{}': expected one of {}",
                    self.root.display(),
                    WEIGHT_FILES.join(", ")
                ))
            })
    }

    fn require(&self, filename: &str) -> Result<PathBuf> {
        if !self.root.is_dir() {
            return Err(SentimentError::ModelLoad(format!(
                "Model directory '{}' does not exist",
                self.root.display()
            )));
        }
        let path = self.root.join(filename);
        if path.is_file() {
            Ok(path)
        } else {
            Err(SentimentError::ModelLoad(format!(
                "Missing '{}' in model directory '{}'",
                filename,
                self.root.display()
            )))
        }
    }
}

#[derive(Debug, Clone)]
pub struct TokenizerLoader {
    pub tokenizer_file: PathBuf,
    pub max_tokens: Option<usize>,
}

impl TokenizerLoader {
    pub fn new(dir: &ModelDir) -> Result<Self> {
        Ok(Self {
            tokenizer_file: dir.tokenizer_path()?,
            max_tokens: None,
        })
    }

    pub fn with_max_tokens(mut self, max_tokens: Option<usize>) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn load(&self) -> Result<Tokenizer> {
        let path_str = self.tokenizer_file.display().to_string();

        let mut tokenizer = Tokenizer::from_file(&self.tokenizer_file).map_err(|e| {
            SentimentError::Tokenization(format!(
                "Failed to load tokenizer from '{}': {}",
                path_str, e
            ))
        })?;

        if let Some(max_length) = self.max_tokens {
            tokenizer
                .with_truncation(Some(TruncationParams {
                    max_length,
                    ..Default::default()
                }))
                .map_err(|e| {
                    SentimentError::Tokenization(format!(
                        "Failed to set truncation on '{}': {}",
                        path_str, e
                    ))
                })?;
        }

        tracing::debug!(path = %path_str, max_tokens = ?self.max_tokens, "tokenizer loaded");
        Ok(tokenizer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn missing_directory_is_reported() {
        let dir = ModelDir::new("/definitely/not/a/model/dir");
        let err = dir.config_path().unwrap_err();
        assert!(matches!(err, SentimentError::ModelLoad(ref m) if m.contains("does not exist")));
    }

    #[test]
    fn missing_file_names_the_file() -> Result<()> {
        let tmp = tempfile::tempdir()?;
        fs::write(tmp.path().join(CONFIG_FILE), "{}")?;
        let dir = ModelDir::new(tmp.path());

        assert_eq!(dir.config_path()?, tmp.path().join(CONFIG_FILE));
        let err = dir.tokenizer_path().unwrap_err();
        assert!(err.to_string().contains("tokenizer.json"));
        Ok(())
    }

    #[test]
    fn weights_prefer_safetensors() -> Result<()> {
        let tmp = tempfile::tempdir()?;
        let dir = ModelDir::new(tmp.path());
        assert!(dir.weights_path().is_err());

        fs::write(tmp.path().join("pytorch_model.bin"), b"")?;
        assert_eq!(dir.weights_path()?, tmp.path().join("pytorch_model.bin"));

        fs::write(tmp.path().join("model.safetensors"), b"")?;
        assert_eq!(dir.weights_path()?, tmp.path().join("model.safetensors"));
        Ok(())
    }

    #[test]
    fn unreadable_tokenizer_is_a_tokenization_error() -> Result<()> {
        let tmp = tempfile::tempdir()?;
        fs::write(tmp.path().join(TOKENIZER_FILE), "not json")?;
        let loader = TokenizerLoader::new(&ModelDir::new(tmp.path()))?;
        assert!(matches!(
            loader.load(),
            Err(SentimentError::Tokenization(_))
        ));
        Ok(())
    }
}
