//! Error types for this crate.
//!
//! All fallible operations return [`Result<T>`] which uses [`SentimentError`] as the error type.

use thiserror::Error;

/// A [`Result`](std::result::Result) alias using [`SentimentError`] as the error type.
pub type Result<T> = std::result::Result<T, SentimentError>;

/// The unified error type for all crate errors.
///
/// Only [`ModelUnavailable`](SentimentError::ModelUnavailable),
/// [`EmptyInput`](SentimentError::EmptyInput) and [`Inference`](SentimentError::Inference)
/// reach a [`ReviewSession`](crate::session::ReviewSession) caller; backend errors are
/// folded into one of those by the classifier adapter.
///
/// # Example
///
/// ```rust
/// use review_sentiment::error::SentimentError;
///
/// fn report(e: &SentimentError) -> String {
///     match e {
///         SentimentError::ModelUnavailable(_) => format!("Model not loaded: {e}"),
///         SentimentError::EmptyInput => "Please enter a review to analyze.".into(),
///         SentimentError::Inference(_) => format!("Error during prediction: {e}"),
///         _ => e.to_string(),
///     }
/// }
///
/// assert_eq!(report(&SentimentError::EmptyInput), "Please enter a review to analyze.");
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum SentimentError {
    /// The model failed to load or was never loaded. Analysis cannot proceed.
    #[error("model unavailable: {0}")]
    ModelUnavailable(String),

    /// The submitted review was blank.
    #[error("review text is empty")]
    EmptyInput,

    /// The classification call itself failed.
    #[error("inference failed: {0}")]
    Inference(String),

    /// Tokenization failure. Check input text or tokenizer file.
    #[error("{0}")]
    Tokenization(String),

    /// Model artifacts missing or malformed.
    #[error("{0}")]
    ModelLoad(String),

    /// Device initialization failure. Fall back to CPU.
    #[error("{0}")]
    Device(String),

    /// Configuration could not be read or parsed.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Internal error. Report if seen.
    #[error("{0}")]
    Unexpected(String),
}

impl SentimentError {
    /// Whether this should be shown to the user as a warning rather than an error.
    pub fn is_warning(&self) -> bool {
        matches!(self, SentimentError::EmptyInput)
    }
}

impl From<candle_core::Error> for SentimentError {
    fn from(value: candle_core::Error) -> Self {
        SentimentError::Unexpected(value.to_string())
    }
}

impl From<std::io::Error> for SentimentError {
    fn from(value: std::io::Error) -> Self {
        SentimentError::Unexpected(value.to_string())
    }
}

impl From<serde_json::Error> for SentimentError {
    fn from(value: serde_json::Error) -> Self {
        SentimentError::ModelLoad(format!("malformed model config: {value}"))
    }
}

impl From<toml::de::Error> for SentimentError {
    fn from(value: toml::de::Error) -> Self {
        SentimentError::Config(value.to_string())
    }
}
