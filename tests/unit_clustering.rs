// Unit tests for the cluster builder.
//
// Tests build_clusters against hand-placed pulses at a fixed evaluation
// time: the one-hour window, the per-cell size threshold, the dominant
// topic threshold, strength/emergence, and output stability.

use chrono::{DateTime, TimeDelta, TimeZone, Utc};

use pulse::clustering::{build_clusters, ClusterParams, GridCell};
use pulse::db::models::{SentimentLabel, SentimentResult, Submission};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 14, 21, 30, 0).unwrap()
}

fn pulse(id: &str, lat: f64, lng: f64, minutes_ago: i64, topics: &[&str]) -> Submission {
    Submission {
        id: id.to_string(),
        text: format!("pulse {id}"),
        latitude: lat,
        longitude: lng,
        created_at: now() - TimeDelta::minutes(minutes_ago),
        sentiment: SentimentResult {
            score: 0.0,
            magnitude: 0.1,
            label: SentimentLabel::Neutral,
        },
        topics: topics.iter().map(|t| t.to_string()).collect(),
    }
}

/// Three pulses inside cell (4071, -7401).
fn live_music_trio() -> Vec<Submission> {
    vec![
        pulse("a", 40.7121, -74.0051, 5, &["Live Music"]),
        pulse("b", 40.7125, -74.0055, 10, &["Live Music"]),
        pulse("c", 40.7129, -74.0059, 15, &["Live Music"]),
    ]
}

// ============================================================
// Basic cluster
// ============================================================

#[test]
fn three_same_topic_pulses_form_one_emergent_cluster() {
    let clusters = build_clusters(&live_music_trio(), now(), &ClusterParams::default());

    assert_eq!(clusters.len(), 1);
    let c = &clusters[0];
    assert_eq!(c.label, "Live Music");
    assert_eq!(c.submissions.len(), 3);
    assert!((c.strength - 0.6).abs() < 1e-12);
    assert!(c.emergent);
    assert_eq!(c.radius_m, 500.0);
    assert_eq!(c.id, "cluster-4071,-7401-Live Music");
    assert!((c.center.latitude - 40.7125).abs() < 1e-9);
    assert!((c.center.longitude - (-74.0055)).abs() < 1e-9);
}

#[test]
fn members_are_only_pulses_with_the_dominant_topic() {
    let mut subs = live_music_trio();
    subs.push(pulse("d", 40.7122, -74.0052, 3, &["Safety"]));

    let clusters = build_clusters(&subs, now(), &ClusterParams::default());
    assert_eq!(clusters.len(), 1);
    let ids: Vec<&str> = clusters[0].submissions.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, vec!["a", "b", "c"]);
}

#[test]
fn center_includes_off_topic_cell_members() {
    let subs = vec![
        pulse("a", 40.711, -74.009, 5, &["Shopping"]),
        pulse("b", 40.713, -74.007, 5, &["Shopping"]),
        pulse("c", 40.718, -74.002, 5, &[]),
    ];
    let clusters = build_clusters(&subs, now(), &ClusterParams::default());
    assert_eq!(clusters.len(), 1);
    assert!((clusters[0].center.latitude - 40.714).abs() < 1e-9);
    assert!((clusters[0].center.longitude - (-74.006)).abs() < 1e-9);
}

// ============================================================
// Thresholds
// ============================================================

#[test]
fn two_pulse_cell_is_skipped() {
    let subs = vec![
        pulse("a", 40.7121, -74.0051, 5, &["Live Music"]),
        pulse("b", 40.7125, -74.0055, 5, &["Live Music"]),
    ];
    assert!(build_clusters(&subs, now(), &ClusterParams::default()).is_empty());
}

#[test]
fn cell_without_a_repeated_topic_is_skipped() {
    let subs = vec![
        pulse("a", 40.7121, -74.0051, 5, &["Live Music"]),
        pulse("b", 40.7125, -74.0055, 5, &["Shopping"]),
        pulse("c", 40.7129, -74.0059, 5, &["Safety"]),
    ];
    assert!(build_clusters(&subs, now(), &ClusterParams::default()).is_empty());
}

#[test]
fn cell_with_no_topics_is_skipped() {
    let subs = vec![
        pulse("a", 40.7121, -74.0051, 5, &[]),
        pulse("b", 40.7125, -74.0055, 5, &[]),
        pulse("c", 40.7129, -74.0059, 5, &[]),
    ];
    assert!(build_clusters(&subs, now(), &ClusterParams::default()).is_empty());
}

#[test]
fn dominant_count_of_two_is_not_emergent() {
    let subs = vec![
        pulse("a", 40.7121, -74.0051, 5, &["Nightlife"]),
        pulse("b", 40.7125, -74.0055, 5, &["Nightlife"]),
        pulse("c", 40.7129, -74.0059, 5, &["Safety"]),
    ];
    let clusters = build_clusters(&subs, now(), &ClusterParams::default());
    assert_eq!(clusters.len(), 1);
    assert_eq!(clusters[0].label, "Nightlife");
    assert!((clusters[0].strength - 0.4).abs() < 1e-12);
    assert!(!clusters[0].emergent);
}

#[test]
fn tied_topics_resolve_to_smallest_label() {
    let subs = vec![
        pulse("a", 40.7121, -74.0051, 5, &["Street Food", "Nightlife"]),
        pulse("b", 40.7125, -74.0055, 5, &["Street Food", "Nightlife"]),
        pulse("c", 40.7129, -74.0059, 5, &[]),
    ];
    let clusters = build_clusters(&subs, now(), &ClusterParams::default());
    assert_eq!(clusters[0].label, "Nightlife");
}

#[test]
fn strength_caps_at_one() {
    let subs: Vec<Submission> = (0..8)
        .map(|i| pulse(&format!("p{i}"), 40.7125, -74.0055, i, &["Community"]))
        .collect();
    let clusters = build_clusters(&subs, now(), &ClusterParams::default());
    assert_eq!(clusters[0].strength, 1.0);
    assert_eq!(clusters[0].submissions.len(), 8);
}

// ============================================================
// Time window
// ============================================================

#[test]
fn pulses_older_than_an_hour_are_never_members() {
    let mut subs = live_music_trio();
    subs.push(pulse("old1", 40.7121, -74.0051, 61, &["Live Music"]));
    subs.push(pulse("old2", 40.7121, -74.0051, 240, &["Live Music"]));

    let clusters = build_clusters(&subs, now(), &ClusterParams::default());
    for cluster in &clusters {
        for member in &cluster.submissions {
            assert!(now() - member.created_at < TimeDelta::hours(1), "{}", member.id);
        }
    }
    assert_eq!(clusters[0].submissions.len(), 3);
}

#[test]
fn old_pulses_do_not_fill_a_cell() {
    let subs = vec![
        pulse("a", 40.7121, -74.0051, 5, &["Live Music"]),
        pulse("b", 40.7125, -74.0055, 5, &["Live Music"]),
        pulse("old", 40.7129, -74.0059, 90, &["Live Music"]),
    ];
    assert!(build_clusters(&subs, now(), &ClusterParams::default()).is_empty());
}

#[test]
fn future_timestamps_count_as_recent() {
    let subs = vec![
        pulse("a", 40.7121, -74.0051, -5, &["Live Music"]),
        pulse("b", 40.7125, -74.0055, 0, &["Live Music"]),
        pulse("c", 40.7129, -74.0059, 5, &["Live Music"]),
    ];
    assert_eq!(build_clusters(&subs, now(), &ClusterParams::default()).len(), 1);
}

#[test]
fn later_evaluation_time_ages_pulses_out() {
    let subs = live_music_trio();
    let params = ClusterParams::default();
    assert_eq!(build_clusters(&subs, now(), &params).len(), 1);
    // "c" is 15 minutes old at now(); at now() + 50m it is 65 minutes old
    assert!(build_clusters(&subs, now() + TimeDelta::minutes(50), &params).is_empty());
}

// ============================================================
// Geography and stability
// ============================================================

#[test]
fn separate_cells_do_not_combine() {
    // Each cell holds two pulses; together they would be four
    let subs = vec![
        pulse("a", 40.7121, -74.0051, 5, &["Live Music"]),
        pulse("b", 40.7125, -74.0055, 5, &["Live Music"]),
        pulse("c", 40.7221, -74.0051, 5, &["Live Music"]),
        pulse("d", 40.7225, -74.0055, 5, &["Live Music"]),
    ];
    assert!(build_clusters(&subs, now(), &ClusterParams::default()).is_empty());
}

#[test]
fn clusters_are_ordered_by_cell() {
    let mut subs = vec![
        pulse("n1", 40.7321, -74.0051, 5, &["Nightlife"]),
        pulse("n2", 40.7322, -74.0052, 5, &["Nightlife"]),
        pulse("n3", 40.7323, -74.0053, 5, &["Nightlife"]),
    ];
    subs.extend(live_music_trio());

    let clusters = build_clusters(&subs, now(), &ClusterParams::default());
    assert_eq!(clusters.len(), 2);
    assert_eq!(clusters[0].label, "Live Music");
    assert_eq!(clusters[1].label, "Nightlife");

    let params = ClusterParams::default();
    let cells: Vec<GridCell> = clusters
        .iter()
        .map(|c| {
            let first = &c.submissions[0];
            GridCell::containing(first.latitude, first.longitude, params.cell_size_deg)
        })
        .collect();
    assert!(cells[0] < cells[1]);
}

#[test]
fn rebuilding_at_the_same_time_is_identical() {
    let mut subs = live_music_trio();
    subs.push(pulse("x", 40.7321, -74.0051, 20, &["Safety"]));
    subs.push(pulse("y", 40.7322, -74.0052, 25, &["Safety"]));
    subs.push(pulse("z", 40.7323, -74.0053, 30, &["Parks & Nature"]));

    let params = ClusterParams::default();
    let first = build_clusters(&subs, now(), &params);
    let second = build_clusters(&subs, now(), &params);
    assert_eq!(first, second);
    assert_eq!(first.len(), 2);
}

#[test]
fn empty_collection_gives_no_clusters() {
    assert!(build_clusters(&[], now(), &ClusterParams::default()).is_empty());
}

#[test]
fn custom_params_lower_the_thresholds() {
    let params = ClusterParams {
        min_cell_size: 2,
        ..ClusterParams::default()
    };
    let subs = vec![
        pulse("a", 40.7121, -74.0051, 5, &["Live Music"]),
        pulse("b", 40.7125, -74.0055, 5, &["Live Music"]),
    ];
    let clusters = build_clusters(&subs, now(), &params);
    assert_eq!(clusters.len(), 1);
    assert!(!clusters[0].emergent);
}
