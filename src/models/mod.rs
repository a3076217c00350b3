// ============ Model implementations ============

pub(crate) mod bert;
pub(crate) mod checkpoint;
pub(crate) mod classifier;
pub(crate) mod modernbert;

pub use bert::SentimentBertModel;
pub use classifier::SentimentClassifierModel;
pub use modernbert::SentimentModernBertModel;
