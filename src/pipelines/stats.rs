use std::time::{Duration, Instant};
use tokenizers::Encoding;

/// Statistics for one classifier run.
#[derive(Debug, Clone)]
pub struct PipelineStats {
    /// Total execution time, tokenization included.
    pub total_time: Duration,
    /// Number of reviews classified.
    pub items_processed: usize,
    /// Tokens fed to the model, special tokens included.
    pub tokens_processed: usize,
    /// Whether any review was cut to the tokenizer's `max_tokens`.
    pub truncated: bool,
}

impl PipelineStats {
    /// Start the clock for one run.
    pub(crate) fn start() -> PipelineStatsBuilder {
        PipelineStatsBuilder {
            start_time: Instant::now(),
            tokens_processed: 0,
            truncated: false,
        }
    }
}

/// Accumulates what a run feeds the model until [`finish`](Self::finish).
pub(crate) struct PipelineStatsBuilder {
    start_time: Instant,
    tokens_processed: usize,
    truncated: bool,
}

impl PipelineStatsBuilder {
    /// Count the tokens of one encoded input. Overflow means truncation kicked in.
    pub fn record(&mut self, encoding: &Encoding) {
        self.tokens_processed += encoding.len();
        self.truncated |= !encoding.get_overflowing().is_empty();
    }

    pub fn finish(self, items_processed: usize) -> PipelineStats {
        PipelineStats {
            total_time: self.start_time.elapsed(),
            items_processed,
            tokens_processed: self.tokens_processed,
            truncated: self.truncated,
        }
    }
}
