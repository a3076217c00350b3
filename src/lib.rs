//! Product review sentiment classification with an in-memory session history.
//!
//! Powered by [Candle](https://github.com/huggingface/candle). A fine-tuned
//! sequence classifier is loaded once from a local directory; each review is
//! classified, its raw label mapped to a [`Sentiment`](sentiment::Sentiment), and
//! the outcome appended to the session's history.
//!
//! ```rust,no_run
//! use review_sentiment::config::AppConfig;
//! use review_sentiment::sentiment::ClassifierAdapter;
//! use review_sentiment::session::ReviewSession;
//! use std::sync::Arc;
//!
//! # fn main() -> review_sentiment::error::Result<()> {
//! let config = AppConfig::default();
//! let adapter = Arc::new(ClassifierAdapter::from_config(&config));
//! let mut session = ReviewSession::from_config(adapter, &config);
//!
//! let analysis = session.analyze("Super fast delivery and amazing product quality!")?;
//! println!("{} ({})", analysis.sentiment, analysis.confidence);
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]

// ============ Internal API ============

pub(crate) mod loaders;
pub(crate) mod models;
pub(crate) mod pipelines;

// ============ Public API ============

pub mod config;
pub mod error;
pub mod session;

pub use pipelines::sentiment;
