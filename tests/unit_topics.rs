// Unit tests for keyword-table topic extraction.
//
// Tests KeywordExtractor::extract invariants: labels come from the table,
// appear at most once, follow table order, and don't depend on case or on
// how often a keyword repeats.

use pulse::topics::keywords::DEFAULT_TOPICS;
use pulse::topics::{KeywordExtractor, TopicExtractor};

const SAMPLE_TEXTS: &[&str] = &[
    "",
    "Amazing food trucks tonight!",
    "Jazz band at the park tonight",
    "Traffic is terrible on the subway, rush hour commute",
    "Police officer helping at the community gathering",
    "Boutique sale at the local market, buy now",
    "Dancing at the club, great drinks and a huge crowd",
    "Nothing relevant here",
];

// ============================================================
// Basic matching
// ============================================================

#[test]
fn single_topic() {
    let extractor = KeywordExtractor::default();
    assert_eq!(
        extractor.extract("Amazing live music at the corner"),
        vec!["Live Music"]
    );
}

#[test]
fn multiple_topics_follow_table_order() {
    let extractor = KeywordExtractor::default();
    // "tonight" contains "night"
    assert_eq!(
        extractor.extract("Jazz band at the park tonight"),
        vec!["Live Music", "Parks & Nature", "Nightlife"]
    );
}

#[test]
fn case_insensitive() {
    let extractor = KeywordExtractor::default();
    assert_eq!(extractor.extract("SUBWAY delays"), vec!["Traffic & Transit"]);
    assert_eq!(
        extractor.extract("SUBWAY delays"),
        extractor.extract("subway delays")
    );
}

#[test]
fn substring_matches_inside_words() {
    let extractor = KeywordExtractor::default();
    // "car" inside "scary", "bar" inside "barely"
    assert_eq!(extractor.extract("scary"), vec!["Traffic & Transit"]);
    assert_eq!(extractor.extract("barely"), vec!["Nightlife"]);
}

#[test]
fn no_keywords_no_topics() {
    let extractor = KeywordExtractor::default();
    assert!(extractor.extract("").is_empty());
    assert!(extractor.extract("Nothing relevant here").is_empty());
}

// ============================================================
// Invariants
// ============================================================

#[test]
fn each_label_at_most_once() {
    let extractor = KeywordExtractor::default();
    assert_eq!(
        extractor.extract("food food restaurant delicious bakery"),
        vec!["Street Food"]
    );
}

#[test]
fn labels_come_from_the_table_in_order() {
    let extractor = KeywordExtractor::default();
    let table: Vec<&str> = DEFAULT_TOPICS.iter().map(|(label, _)| *label).collect();

    for text in SAMPLE_TEXTS {
        let topics = extractor.extract(text);
        let positions: Vec<usize> = topics
            .iter()
            .map(|t| {
                table
                    .iter()
                    .position(|l| l == t)
                    .unwrap_or_else(|| panic!("{t} not in table"))
            })
            .collect();
        assert!(
            positions.windows(2).all(|w| w[0] < w[1]),
            "{text:?} -> {topics:?} out of table order"
        );
    }
}

#[test]
fn extraction_is_deterministic() {
    let a = KeywordExtractor::default();
    let b = KeywordExtractor::default();
    for text in SAMPLE_TEXTS {
        assert_eq!(a.extract(text), a.extract(text));
        assert_eq!(a.extract(text), b.extract(text));
    }
}

#[test]
fn default_table_has_eight_topics() {
    let extractor = KeywordExtractor::default();
    assert_eq!(
        extractor.labels().collect::<Vec<_>>(),
        vec![
            "Street Food",
            "Live Music",
            "Traffic & Transit",
            "Shopping",
            "Parks & Nature",
            "Nightlife",
            "Safety",
            "Community",
        ]
    );
}

#[test]
fn extractor_works_as_trait_object() {
    let extractor: Box<dyn TopicExtractor> = Box::new(KeywordExtractor::default());
    assert_eq!(extractor.extract("hungry"), vec!["Street Food"]);
}
