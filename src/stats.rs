// Aggregate statistics and the recent-activity feed.
//
// Everything here is a pure function of the collection, the latest
// clusters, and the evaluation time. Display code only renders the result.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::clustering::builder::is_recent;
use crate::clustering::{ClusterParams, TopicCluster};
use crate::db::models::{SentimentLabel, Submission};

/// Number of trending topics surfaced in the stats.
pub const TOP_TOPICS: usize = 5;
/// Default length of the recent feed.
pub const DEFAULT_FEED_LIMIT: usize = 10;

/// Overall vibe of an area, from the average sentiment score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mood {
    Positive,
    Neutral,
    Negative,
}

impl Mood {
    /// Positive above 0.2, Negative below -0.2, else Neutral.
    pub fn from_average(avg: f64) -> Self {
        match avg {
            a if a > 0.2 => Mood::Positive,
            a if a < -0.2 => Mood::Negative,
            _ => Mood::Neutral,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::Positive => "Positive",
            Mood::Neutral => "Neutral",
            Mood::Negative => "Negative",
        }
    }
}

impl std::fmt::Display for Mood {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentimentCounts {
    pub positive: usize,
    pub neutral: usize,
    pub negative: usize,
}

/// A cluster reduced to what the trending list shows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicSummary {
    pub id: String,
    pub label: String,
    pub members: usize,
    pub emergent: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PulseStats {
    pub total: usize,
    pub sentiment: SentimentCounts,
    /// Mean score over all pulses (0.0 when there are none)
    pub average_score: f64,
    pub mood: Mood,
    /// Pulses inside the clustering window
    pub last_hour: usize,
    /// Clusters by member count, largest first, at most TOP_TOPICS
    pub top_topics: Vec<TopicSummary>,
    pub emergent_clusters: usize,
}

/// Compute the stats panel for a collection and its latest clusters.
pub fn compute_stats(
    submissions: &[Submission],
    clusters: &[TopicCluster],
    now: DateTime<Utc>,
    params: &ClusterParams,
) -> PulseStats {
    let mut sentiment = SentimentCounts::default();
    for s in submissions {
        match s.sentiment.label {
            SentimentLabel::Positive => sentiment.positive += 1,
            SentimentLabel::Neutral => sentiment.neutral += 1,
            SentimentLabel::Negative => sentiment.negative += 1,
        }
    }

    let average_score = if submissions.is_empty() {
        0.0
    } else {
        submissions.iter().map(|s| s.sentiment.score).sum::<f64>() / submissions.len() as f64
    };

    let last_hour = submissions
        .iter()
        .filter(|s| is_recent(s, now, params.window))
        .count();

    // Stable sort keeps cluster order for equal sizes
    let mut ranked: Vec<&TopicCluster> = clusters.iter().collect();
    ranked.sort_by(|a, b| b.submissions.len().cmp(&a.submissions.len()));
    let top_topics = ranked
        .into_iter()
        .take(TOP_TOPICS)
        .map(|c| TopicSummary {
            id: c.id.clone(),
            label: c.label.clone(),
            members: c.submissions.len(),
            emergent: c.emergent,
        })
        .collect();

    PulseStats {
        total: submissions.len(),
        sentiment,
        average_score,
        mood: Mood::from_average(average_score),
        last_hour,
        top_topics,
        emergent_clusters: clusters.iter().filter(|c| c.emergent).count(),
    }
}

/// The newest `limit` pulses, newest first. Equal timestamps keep
/// collection order.
pub fn recent_feed(submissions: &[Submission], limit: usize) -> Vec<&Submission> {
    let mut sorted: Vec<&Submission> = submissions.iter().collect();
    sorted.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    sorted.truncate(limit);
    sorted
}

/// Human-readable age: "Just now", "5m ago", "3h ago", "2d ago".
pub fn format_time_ago(now: DateTime<Utc>, then: DateTime<Utc>) -> String {
    let minutes = now.signed_duration_since(then).num_minutes();
    if minutes < 1 {
        return "Just now".to_string();
    }
    if minutes < 60 {
        return format!("{minutes}m ago");
    }
    let hours = minutes / 60;
    if hours < 24 {
        return format!("{hours}h ago");
    }
    format!("{}d ago", hours / 24)
}

/// One row of the recent feed, ready for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedEntry {
    pub id: String,
    pub text: String,
    pub label: SentimentLabel,
    pub score: f64,
    pub topics: Vec<String>,
    pub time_ago: String,
}

pub fn feed_entries(submissions: &[Submission], now: DateTime<Utc>, limit: usize) -> Vec<FeedEntry> {
    recent_feed(submissions, limit)
        .into_iter()
        .map(|s| FeedEntry {
            id: s.id.clone(),
            text: s.text.clone(),
            label: s.sentiment.label,
            score: s.sentiment.score,
            topics: s.topics.clone(),
            time_ago: format_time_ago(now, s.created_at),
        })
        .collect()
}
