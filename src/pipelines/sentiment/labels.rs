use serde::Deserialize;
use std::fmt;

/// Human-facing classification of a review's tone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sentiment {
    /// Favourable review.
    Positive,
    /// Unfavourable review.
    Negative,
    /// Neither favourable nor unfavourable.
    Neutral,
    /// The classifier produced a label outside the known table.
    Unknown,
}

impl Sentiment {
    /// Every sentiment, in display order.
    pub const ALL: [Sentiment; 4] = [
        Sentiment::Positive,
        Sentiment::Negative,
        Sentiment::Neutral,
        Sentiment::Unknown,
    ];

    /// Display name (`"Positive"`, `"Negative"`, ...).
    pub fn as_str(self) -> &'static str {
        match self {
            Sentiment::Positive => "Positive",
            Sentiment::Negative => "Negative",
            Sentiment::Neutral => "Neutral",
            Sentiment::Unknown => "Unknown",
        }
    }

    /// Emoji shown next to the label, if any.
    pub fn emoji(self) -> Option<&'static str> {
        match self {
            Sentiment::Positive => Some("😊"),
            Sentiment::Negative => Some("😔"),
            Sentiment::Neutral => Some("😐"),
            Sentiment::Unknown => None,
        }
    }

    /// Colour-coding used when presenting this sentiment.
    pub fn tone(self) -> Tone {
        match self {
            Sentiment::Positive => Tone::Success,
            Sentiment::Negative => Tone::Error,
            Sentiment::Neutral => Tone::Info,
            Sentiment::Unknown => Tone::Warning,
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Presentation tone for a sentiment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    /// Green.
    Success,
    /// Red.
    Error,
    /// Blue.
    Info,
    /// Yellow.
    Warning,
}

/// Lookup table from raw classifier labels to [`Sentiment`].
///
/// The default follows the usual fine-tuning order `LABEL_0` = negative,
/// `LABEL_1` = neutral, `LABEL_2` = positive. That order is a property of the
/// model artifact and cannot be checked here, so models trained with a different
/// order need their own table.
///
/// ```rust
/// use review_sentiment::sentiment::{LabelMap, Sentiment};
///
/// let labels = LabelMap::default();
/// assert_eq!(labels.map("LABEL_2"), Sentiment::Positive);
/// assert_eq!(labels.map("LABEL_9"), Sentiment::Unknown);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LabelMap {
    /// Raw label meaning negative.
    pub negative: String,
    /// Raw label meaning neutral.
    pub neutral: String,
    /// Raw label meaning positive.
    pub positive: String,
}

impl LabelMap {
    /// Build a table from the three raw labels.
    pub fn new(
        negative: impl Into<String>,
        neutral: impl Into<String>,
        positive: impl Into<String>,
    ) -> Self {
        Self {
            negative: negative.into(),
            neutral: neutral.into(),
            positive: positive.into(),
        }
    }

    /// The table's entries in index order.
    pub fn entries(&self) -> [(&str, Sentiment); 3] {
        [
            (self.negative.as_str(), Sentiment::Negative),
            (self.neutral.as_str(), Sentiment::Neutral),
            (self.positive.as_str(), Sentiment::Positive),
        ]
    }

    /// Map a raw label. Anything outside the table is [`Sentiment::Unknown`].
    pub fn map(&self, raw: &str) -> Sentiment {
        self.entries()
            .into_iter()
            .find(|(label, _)| *label == raw)
            .map(|(_, sentiment)| sentiment)
            .unwrap_or(Sentiment::Unknown)
    }
}

impl Default for LabelMap {
    fn default() -> Self {
        Self::new("LABEL_0", "LABEL_1", "LABEL_2")
    }
}

/// Map a raw label with the default table.
pub fn map_label(raw: &str) -> Sentiment {
    LabelMap::default().map(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table_maps_known_labels() {
        assert_eq!(map_label("LABEL_0"), Sentiment::Negative);
        assert_eq!(map_label("LABEL_1"), Sentiment::Neutral);
        assert_eq!(map_label("LABEL_2"), Sentiment::Positive);
    }

    #[test]
    fn anything_else_is_unknown() {
        for raw in ["", "LABEL_3", "label_0", "positive", " LABEL_1", "LABEL_2 "] {
            assert_eq!(map_label(raw), Sentiment::Unknown, "{raw:?}");
        }
    }

    #[test]
    fn custom_table() {
        let labels = LabelMap::new("neg", "neu", "pos");
        assert_eq!(labels.map("pos"), Sentiment::Positive);
        assert_eq!(labels.map("LABEL_2"), Sentiment::Unknown);
    }

    #[test]
    fn tones_and_emoji() {
        assert_eq!(Sentiment::Positive.tone(), Tone::Success);
        assert_eq!(Sentiment::Negative.tone(), Tone::Error);
        assert_eq!(Sentiment::Neutral.tone(), Tone::Info);
        assert_eq!(Sentiment::Unknown.tone(), Tone::Warning);
        assert_eq!(Sentiment::Unknown.emoji(), None);
        assert_eq!(Sentiment::Positive.to_string(), "Positive");
    }
}
