//! Review sentiment classification.
//!
//! Three pieces, leaf first:
//!
//! - [`LabelMap`] turns a raw classifier label (`LABEL_0`..`LABEL_2`) into a [`Sentiment`].
//! - [`ClassifierAdapter`] owns the process-wide classifier, loads it on first use and
//!   yields one [`ClassificationResult`] per call.
//! - [`SentimentAnalysisPipeline`] is the local ModernBERT or BERT classifier the
//!   adapter normally wraps.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use review_sentiment::config::AppConfig;
//! use review_sentiment::sentiment::{map_label, ClassifierAdapter};
//!
//! # fn main() -> review_sentiment::error::Result<()> {
//! let adapter = ClassifierAdapter::from_config(&AppConfig::default());
//!
//! let result = adapter.classify("Super fast delivery and amazing product quality!")?;
//! println!("{} ({})", map_label(&result.label), result.confidence);
//! # Ok(())
//! # }
//! ```

// ============ Internal API ============

pub(crate) mod adapter;
pub(crate) mod builder;
pub(crate) mod labels;
pub(crate) mod model;
pub(crate) mod pipeline;

// ============ Public API ============

pub use crate::loaders::ModelDir;
pub use crate::pipelines::stats::PipelineStats;
pub use adapter::ClassifierAdapter;
pub use builder::SentimentAnalysisPipelineBuilder;
pub use labels::{map_label, LabelMap, Sentiment, Tone};
pub use model::{SentimentAnalysisModel, TextClassifier};
pub use pipeline::{ClassificationResult, Confidence, LabelScore, Output, SentimentAnalysisPipeline};

/// Only for generic annotations. Use [`SentimentAnalysisPipelineBuilder::local`].
pub type SentimentClassifier = crate::models::SentimentClassifierModel;

/// Only for generic annotations. Use [`SentimentAnalysisPipelineBuilder::modernbert`].
pub type SentimentModernBert = crate::models::SentimentModernBertModel;

/// Only for generic annotations. Use [`SentimentAnalysisPipelineBuilder::bert`].
pub type SentimentBert = crate::models::SentimentBertModel;
