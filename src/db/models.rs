// Data models — the records that flow from intake through to display.
//
// These are separate from the store implementations so the scoring and
// clustering modules can use them without depending on rusqlite directly.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Maximum pulse length in characters.
pub const MAX_TEXT_CHARS: usize = 280;

/// A single anonymous pulse tied to a place and time.
///
/// Immutable once created. Stores only ever append these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    pub id: String,
    pub text: String,
    pub latitude: f64,
    pub longitude: f64,
    pub created_at: DateTime<Utc>,
    pub sentiment: SentimentResult,
    /// Topic labels in keyword-table order (may be empty)
    pub topics: Vec<String>,
}

impl Submission {
    /// Whether this pulse was tagged with the given topic.
    pub fn has_topic(&self, topic: &str) -> bool {
        self.topics.iter().any(|t| t == topic)
    }
}

/// A latitude/longitude pair in degrees. Bounds are not validated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// The output of the sentiment scorer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentResult {
    /// -1.0 (very negative) to 1.0 (very positive)
    pub score: f64,
    /// 0.1 to 1.0, how strongly the tone was expressed
    pub magnitude: f64,
    pub label: SentimentLabel,
}

/// Coarse three-way classification of a pulse's tone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

impl SentimentLabel {
    /// Classify a (pre-clamp) sentiment score.
    pub fn from_score(score: f64) -> Self {
        match score {
            s if s > 0.1 => SentimentLabel::Positive,
            s if s < -0.1 => SentimentLabel::Negative,
            _ => SentimentLabel::Neutral,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentLabel::Positive => "positive",
            SentimentLabel::Negative => "negative",
            SentimentLabel::Neutral => "neutral",
        }
    }

    /// Parse the stored lowercase form. Unknown values are treated as neutral.
    pub fn parse(value: &str) -> Self {
        match value {
            "positive" => SentimentLabel::Positive,
            "negative" => SentimentLabel::Negative,
            _ => SentimentLabel::Neutral,
        }
    }
}

impl std::fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
