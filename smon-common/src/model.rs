//! Canonical activity record

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Sentiment label attached to every canonical record
///
/// The category set is closed. Raw labels outside the set (and absent
/// labels) normalize to `Neutral`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    #[default]
    Neutral,
    Negative,
}

impl Sentiment {
    /// Normalize a raw sentiment label
    ///
    /// Lower-cases the label; anything other than an exact category name
    /// maps to `Neutral`.
    pub fn from_label(label: &str) -> Self {
        match label.to_lowercase().as_str() {
            "positive" => Sentiment::Positive,
            "negative" => Sentiment::Negative,
            "neutral" => Sentiment::Neutral,
            _ => Sentiment::Neutral,
        }
    }

    /// Canonical lower-case label, as stored and serialized
    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Neutral => "neutral",
            Sentiment::Negative => "negative",
        }
    }
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canonical activity record
///
/// Produced once by the normalizer and immutable afterwards. This is the
/// only shape crossing the normalizer/aggregator boundary; the persistence
/// layer stores and returns snapshots of it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    pub actor_name: Option<String>,
    pub actor_image: Option<String>,
    /// UTC instant, `None` when the raw value was absent or unparseable.
    /// Never holds a partially-parsed value.
    pub timestamp: Option<DateTime<Utc>>,
    pub datatype: Option<String>,
    pub content: Option<String>,
    /// Trimmed, lower-cased, non-empty entries in input order.
    /// Duplicates are permitted.
    pub languages: Vec<String>,
    pub place: Option<String>,
    pub followers: Option<i64>,
    pub sentiment: Sentiment,
    /// Same normalization as `languages`.
    pub streams: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_label_exact_categories() {
        assert_eq!(Sentiment::from_label("positive"), Sentiment::Positive);
        assert_eq!(Sentiment::from_label("neutral"), Sentiment::Neutral);
        assert_eq!(Sentiment::from_label("negative"), Sentiment::Negative);
    }

    #[test]
    fn test_from_label_is_case_insensitive() {
        assert_eq!(Sentiment::from_label("POSITIVE"), Sentiment::Positive);
        assert_eq!(Sentiment::from_label("NeGaTiVe"), Sentiment::Negative);
    }

    #[test]
    fn test_from_label_unrecognized_maps_to_neutral() {
        assert_eq!(Sentiment::from_label("happy"), Sentiment::Neutral);
        assert_eq!(Sentiment::from_label(""), Sentiment::Neutral);
        // Whitespace is not stripped, so a padded label is unrecognized
        assert_eq!(Sentiment::from_label(" positive "), Sentiment::Neutral);
    }

    #[test]
    fn test_default_is_neutral() {
        assert_eq!(Sentiment::default(), Sentiment::Neutral);
    }

    #[test]
    fn test_serializes_as_lowercase_label() {
        assert_eq!(
            serde_json::to_string(&Sentiment::Positive).unwrap(),
            "\"positive\""
        );
        assert_eq!(Sentiment::Negative.to_string(), "negative");
    }
}
