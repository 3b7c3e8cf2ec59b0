// Keyword-table topic extraction.
//
// A topic matches when any of its keywords is a substring of the lowercased
// text. Membership is binary with no ranking, and the output follows the
// table's order, so "car" matching inside "scary" or "bar" inside "barely"
// is expected behavior of the heuristic.

use super::traits::TopicExtractor;

/// The built-in topic table, in output order.
pub const DEFAULT_TOPICS: &[(&str, &[&str])] = &[
    (
        "Street Food",
        &[
            "food",
            "restaurant",
            "eating",
            "delicious",
            "taste",
            "hungry",
            "cafe",
            "bakery",
            "smell",
        ],
    ),
    (
        "Live Music",
        &[
            "music",
            "band",
            "concert",
            "singing",
            "guitar",
            "jazz",
            "performance",
            "sound",
        ],
    ),
    (
        "Traffic & Transit",
        &[
            "traffic", "car", "bus", "subway", "driving", "parking", "rush", "commute",
        ],
    ),
    (
        "Shopping",
        &[
            "shopping", "store", "buy", "market", "sale", "retail", "boutique",
        ],
    ),
    (
        "Parks & Nature",
        &[
            "park", "tree", "garden", "nature", "peaceful", "quiet", "green", "bird",
        ],
    ),
    (
        "Nightlife",
        &["bar", "club", "party", "drinks", "night", "dancing", "crowd"],
    ),
    (
        "Safety",
        &["police", "safe", "dangerous", "security", "crime", "officer"],
    ),
    (
        "Community",
        &[
            "people",
            "friendly",
            "neighborhood",
            "community",
            "local",
            "gathering",
        ],
    ),
];

/// A topic label with its keyword list.
#[derive(Debug, Clone)]
struct TopicRule {
    label: String,
    /// Lowercase keywords
    keywords: Vec<String>,
}

/// Substring keyword matcher over an ordered topic table.
#[derive(Debug, Clone)]
pub struct KeywordExtractor {
    rules: Vec<TopicRule>,
}

impl Default for KeywordExtractor {
    fn default() -> Self {
        Self::from_table(DEFAULT_TOPICS)
    }
}

impl KeywordExtractor {
    /// Build an extractor from a static table. Keywords are lowercased.
    pub fn from_table(table: &[(&str, &[&str])]) -> Self {
        let rules = table
            .iter()
            .map(|(label, keywords)| TopicRule {
                label: label.to_string(),
                keywords: keywords.iter().map(|k| k.to_lowercase()).collect(),
            })
            .collect();
        Self { rules }
    }

    /// All topic labels in table order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|r| r.label.as_str())
    }
}

impl TopicExtractor for KeywordExtractor {
    fn extract(&self, text: &str) -> Vec<String> {
        let lower = text.to_lowercase();
        self.rules
            .iter()
            .filter(|rule| rule.keywords.iter().any(|k| lower.contains(k.as_str())))
            .map(|rule| rule.label.clone())
            .collect()
    }
}
