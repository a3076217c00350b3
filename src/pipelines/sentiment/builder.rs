use super::model::SentimentAnalysisModel;
use super::pipeline::SentimentAnalysisPipeline;
use crate::config::AppConfig;
use crate::error::Result;
use crate::loaders::ModelDir;
use crate::pipelines::utils::DeviceRequest;

crate::pipelines::utils::impl_device_methods!(direct: SentimentAnalysisPipelineBuilder<M: SentimentAnalysisModel>);

/// Builder for creating [`SentimentAnalysisPipeline`] instances.
///
/// Use [`Self::local`] or [`Self::from_config`] to load whichever supported
/// architecture the checkpoint declares, or [`Self::modernbert`] / [`Self::bert`]
/// to insist on one.
///
/// # Examples
///
/// ```rust,no_run
/// # use review_sentiment::sentiment::SentimentAnalysisPipelineBuilder;
/// # fn main() -> review_sentiment::error::Result<()> {
/// let pipeline = SentimentAnalysisPipelineBuilder::local("fp-model")
///     .max_tokens(256)
///     .cuda(0)
///     .build()?;
/// # Ok(())
/// # }
/// ```
pub struct SentimentAnalysisPipelineBuilder<M: SentimentAnalysisModel> {
    options: M::Options,
    device_request: DeviceRequest,
    max_tokens: Option<usize>,
}

impl<M: SentimentAnalysisModel> SentimentAnalysisPipelineBuilder<M> {
    pub(crate) fn new(options: M::Options) -> Self {
        Self {
            options,
            device_request: DeviceRequest::Cpu,
            max_tokens: Some(crate::config::DEFAULT_MAX_TOKENS),
        }
    }

    /// Truncate inputs to at most `max_tokens` tokens.
    pub fn max_tokens(mut self, max_tokens: usize) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Builds the pipeline with configured settings.
    ///
    /// # Errors
    ///
    /// Returns an error if model loading or device initialization fails.
    pub fn build(self) -> Result<SentimentAnalysisPipeline<M>> {
        let device = self.device_request.resolve()?;
        tracing::debug!(options = ?self.options, device = ?device, "building sentiment pipeline");

        let model = M::new(self.options.clone(), device)?;
        let tokenizer = M::get_tokenizer(self.options, self.max_tokens)?;

        Ok(SentimentAnalysisPipeline { model, tokenizer })
    }
}

impl SentimentAnalysisPipelineBuilder<super::SentimentClassifier> {
    /// Creates a builder for the classifier stored in `model_dir`; its
    /// `config.json` decides between ModernBERT and BERT.
    pub fn local(model_dir: impl Into<std::path::PathBuf>) -> Self {
        Self::new(ModelDir::new(model_dir))
    }

    /// Creates a builder from the model, device and truncation settings in `config`.
    pub fn from_config(config: &AppConfig) -> Self {
        let mut builder = Self::local(config.model_dir.clone()).max_tokens(config.max_tokens);
        builder.device_request = DeviceRequest::from(config.cuda_device);
        builder
    }
}

impl SentimentAnalysisPipelineBuilder<super::SentimentModernBert> {
    /// Creates a builder for a fine-tuned ModernBERT classifier stored in `model_dir`.
    pub fn modernbert(model_dir: impl Into<std::path::PathBuf>) -> Self {
        Self::new(ModelDir::new(model_dir))
    }
}

impl SentimentAnalysisPipelineBuilder<super::SentimentBert> {
    /// Creates a builder for a fine-tuned BERT classifier stored in `model_dir`.
    pub fn bert(model_dir: impl Into<std::path::PathBuf>) -> Self {
        Self::new(ModelDir::new(model_dir))
    }
}
