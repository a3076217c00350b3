use crate::pipelines::sentiment::{Confidence, Sentiment};
use chrono::{DateTime, Local};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const ELLIPSIS: &str = "...";

/// One completed analysis, as kept in [`SessionHistory`](super::SessionHistory).
#[derive(Debug, Clone, PartialEq)]
pub struct SentimentRecord {
    /// When the analysis finished.
    pub timestamp: DateTime<Local>,
    /// Start of the review, see [`excerpt`].
    pub review_excerpt: String,
    /// Mapped sentiment.
    pub sentiment: Sentiment,
    /// Classifier confidence.
    pub confidence: Confidence,
}

impl SentimentRecord {
    /// Record an analysis made now.
    pub fn new(
        review: &str,
        sentiment: Sentiment,
        confidence: Confidence,
        excerpt_chars: usize,
    ) -> Self {
        Self::at(Local::now(), review, sentiment, confidence, excerpt_chars)
    }

    /// Record an analysis made at `timestamp`.
    pub fn at(
        timestamp: DateTime<Local>,
        review: &str,
        sentiment: Sentiment,
        confidence: Confidence,
        excerpt_chars: usize,
    ) -> Self {
        Self {
            timestamp,
            review_excerpt: excerpt(review, excerpt_chars),
            sentiment,
            confidence,
        }
    }

    /// Timestamp as `YYYY-MM-DD HH:MM:SS`.
    pub fn formatted_timestamp(&self) -> String {
        self.timestamp.format(TIMESTAMP_FORMAT).to_string()
    }
}

/// First `max_chars` characters of `review`, with `...` appended if anything was cut.
///
/// ```rust
/// use review_sentiment::session::excerpt;
///
/// assert_eq!(excerpt("Great phone", 50), "Great phone");
/// assert_eq!(excerpt("Great phone", 5), "Great...");
/// ```
pub fn excerpt(review: &str, max_chars: usize) -> String {
    match review.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}{ELLIPSIS}", &review[..cut]),
        None => review.to_string(),
    }
}
