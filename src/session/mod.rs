//! Per-session state: the history of analyses and the action handler that fills it.

pub(crate) mod analyzer;
pub(crate) mod history;
pub(crate) mod record;

pub use analyzer::{Analysis, AnalysisWarning, ReviewSession};
pub use history::{HistorySummary, SessionHistory};
pub use record::{excerpt, SentimentRecord};
