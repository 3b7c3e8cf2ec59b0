// Lexicon sentiment scorer — keyword tallies plus injected jitter.
//
// Each whitespace token of the lowercased text is checked for *substring*
// containment against two fixed word lists. A token counts at most once per
// list, but may count toward both ("badass" contains "bad", and would also
// count as positive if it contained a positive word). Substring matching is
// kept as-is: switching to whole-word matching changes observable labels.

use crate::db::models::{SentimentLabel, SentimentResult};

use super::traits::NoiseSource;

pub const POSITIVE_WORDS: &[&str] = &[
    "amazing",
    "great",
    "love",
    "beautiful",
    "incredible",
    "wonderful",
    "awesome",
    "fantastic",
    "perfect",
    "happy",
    "joy",
    "excited",
];

pub const NEGATIVE_WORDS: &[&str] = &[
    "terrible",
    "awful",
    "hate",
    "bad",
    "horrible",
    "frustrating",
    "annoying",
    "disgusting",
    "angry",
    "sad",
    "disappointed",
];

/// Per-hit contribution to the score (positive hits add, negative subtract).
pub const SCORE_STEP: f64 = 0.3;
/// Per-hit contribution to the magnitude, for either polarity.
pub const MAGNITUDE_STEP: f64 = 0.2;
/// Score jitter is drawn from `[-SCORE_JITTER, SCORE_JITTER]`.
pub const SCORE_JITTER: f64 = 0.2;
/// Magnitude jitter is drawn from `[0, MAGNITUDE_JITTER]`.
pub const MAGNITUDE_JITTER: f64 = 0.3;
pub const MAGNITUDE_FLOOR: f64 = 0.1;

/// Keyword hit counts for a piece of text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LexiconTally {
    pub positive_hits: u32,
    pub negative_hits: u32,
}

impl LexiconTally {
    /// Score before jitter and clamping.
    pub fn base_score(&self) -> f64 {
        SCORE_STEP * self.positive_hits as f64 - SCORE_STEP * self.negative_hits as f64
    }

    /// Magnitude before jitter and clamping.
    pub fn base_magnitude(&self) -> f64 {
        MAGNITUDE_STEP * (self.positive_hits + self.negative_hits) as f64
    }
}

/// Count positive and negative keyword hits, one per token per list.
pub fn tally(text: &str) -> LexiconTally {
    let lower = text.to_lowercase();
    let mut tally = LexiconTally::default();

    for token in lower.split_whitespace() {
        if POSITIVE_WORDS.iter().any(|w| token.contains(w)) {
            tally.positive_hits += 1;
        }
        if NEGATIVE_WORDS.iter().any(|w| token.contains(w)) {
            tally.negative_hits += 1;
        }
    }

    tally
}

/// Score a piece of text.
///
/// The label is taken from the jittered score *before* clamping; the
/// returned score is clamped to [-1, 1] and the magnitude to [0.1, 1].
/// Never fails: empty text yields pure jitter.
pub fn analyze_sentiment(text: &str, noise: &dyn NoiseSource) -> SentimentResult {
    let tally = tally(text);

    let raw_score = tally.base_score() + noise.uniform(-SCORE_JITTER, SCORE_JITTER);
    let magnitude = tally.base_magnitude() + noise.uniform(0.0, MAGNITUDE_JITTER);

    SentimentResult {
        score: raw_score.clamp(-1.0, 1.0),
        magnitude: magnitude.clamp(MAGNITUDE_FLOOR, 1.0),
        label: SentimentLabel::from_score(raw_score),
    }
}
