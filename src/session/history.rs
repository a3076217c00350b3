use super::record::SentimentRecord;
use crate::pipelines::sentiment::Sentiment;

/// Ordered, append-only list of analyses for one session.
///
/// Insertion order is chronological order. Records are only removed by [`clear`](Self::clear).
#[derive(Debug, Clone, Default)]
pub struct SessionHistory {
    records: Vec<SentimentRecord>,
}

impl SessionHistory {
    /// An empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `record` at the end.
    pub fn append(&mut self, record: SentimentRecord) {
        self.records.push(record);
    }

    /// Remove every record.
    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// Read-only view of every record, oldest first.
    pub fn snapshot(&self) -> &[SentimentRecord] {
        &self.records
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether there are no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Sentiment distribution over all records.
    pub fn summary(&self) -> HistorySummary {
        let mut summary = HistorySummary::default();
        for record in &self.records {
            summary.total += 1;
            match record.sentiment {
                Sentiment::Positive => summary.positive += 1,
                Sentiment::Negative => summary.negative += 1,
                Sentiment::Neutral => summary.neutral += 1,
                Sentiment::Unknown => summary.unknown += 1,
            }
        }
        summary
    }
}

/// Sentiment distribution over a [`SessionHistory`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HistorySummary {
    /// Number of records.
    pub total: usize,
    /// Positive records.
    pub positive: usize,
    /// Negative records.
    pub negative: usize,
    /// Neutral records.
    pub neutral: usize,
    /// Unknown records.
    pub unknown: usize,
}

impl HistorySummary {
    /// Records with `sentiment`.
    pub fn count(&self, sentiment: Sentiment) -> usize {
        match sentiment {
            Sentiment::Positive => self.positive,
            Sentiment::Negative => self.negative,
            Sentiment::Neutral => self.neutral,
            Sentiment::Unknown => self.unknown,
        }
    }

    /// Share of records with `sentiment`, in percent. `0.0` for an empty history.
    pub fn percentage(&self, sentiment: Sentiment) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.count(sentiment) as f64 * 100.0 / self.total as f64
    }
}
