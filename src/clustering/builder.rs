// Cluster builder — groups recent pulses into geographic + topical clusters.
//
// One pass:
//   1. keep pulses younger than the window (one hour by default)
//   2. bucket them into grid cells
//   3. drop cells with fewer than `min_cell_size` pulses
//   4. tally topics per cell; the dominant topic is the highest count,
//      ties going to the lexically smallest label
//   5. drop the cell if the dominant count is below `min_topic_count`
//   6. emit one cluster per surviving cell
//
// The pass is total and depends only on its inputs plus the evaluation
// time, so two runs over the same collection at the same `now` agree.

use std::collections::BTreeMap;

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::grid::GridCell;
use crate::db::models::{Coordinates, Submission};

/// Thresholds and constants for a clustering pass.
#[derive(Debug, Clone)]
pub struct ClusterParams {
    /// Only pulses strictly younger than this are considered (default 1 hour)
    pub window: TimeDelta,
    /// Grid cell size in degrees (default 0.01, about 1.1 km at the equator)
    pub cell_size_deg: f64,
    /// Cells with fewer pulses than this are skipped (default 3)
    pub min_cell_size: usize,
    /// The dominant topic must appear at least this often (default 2)
    pub min_topic_count: usize,
    /// Dominant count at or above this marks the cluster emergent (default 3)
    pub emergent_count: usize,
    /// Dominant count at which strength saturates at 1.0 (default 5)
    pub strength_saturation: usize,
    /// Display radius in metres attached to every cluster (default 500)
    pub radius_m: f64,
}

impl Default for ClusterParams {
    fn default() -> Self {
        Self {
            window: TimeDelta::milliseconds(3_600_000),
            cell_size_deg: 0.01,
            min_cell_size: 3,
            min_topic_count: 2,
            emergent_count: 3,
            strength_saturation: 5,
            radius_m: 500.0,
        }
    }
}

/// A spatial + thematic grouping of recent pulses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicCluster {
    /// `cluster-{x},{y}-{label}`; repeats across passes only if cell and topic do
    pub id: String,
    /// The dominant topic
    pub label: String,
    /// Mean position of every pulse in the cell (not just the members)
    pub center: Coordinates,
    pub radius_m: f64,
    /// Pulses in the cell that carry the dominant topic
    pub submissions: Vec<Submission>,
    /// 0.0 to 1.0
    pub strength: f64,
    pub emergent: bool,
}

/// Whether a pulse falls inside the clustering window at `now`.
pub fn is_recent(submission: &Submission, now: DateTime<Utc>, window: TimeDelta) -> bool {
    now.signed_duration_since(submission.created_at) < window
}

/// Run one clustering pass over the full collection.
pub fn build_clusters(
    submissions: &[Submission],
    now: DateTime<Utc>,
    params: &ClusterParams,
) -> Vec<TopicCluster> {
    let mut cells: BTreeMap<GridCell, Vec<&Submission>> = BTreeMap::new();
    for submission in submissions
        .iter()
        .filter(|s| is_recent(s, now, params.window))
    {
        let cell = GridCell::containing(
            submission.latitude,
            submission.longitude,
            params.cell_size_deg,
        );
        cells.entry(cell).or_default().push(submission);
    }

    let mut clusters = Vec::new();

    for (cell, members) in &cells {
        if members.len() < params.min_cell_size {
            continue;
        }

        let Some((topic, count)) = dominant_topic(members) else {
            continue;
        };
        if count < params.min_topic_count {
            continue;
        }

        let n = members.len() as f64;
        let center = Coordinates {
            latitude: members.iter().map(|s| s.latitude).sum::<f64>() / n,
            longitude: members.iter().map(|s| s.longitude).sum::<f64>() / n,
        };

        let topical: Vec<Submission> = members
            .iter()
            .filter(|s| s.has_topic(topic))
            .map(|s| (*s).clone())
            .collect();

        clusters.push(TopicCluster {
            id: format!("cluster-{cell}-{topic}"),
            label: topic.to_string(),
            center,
            radius_m: params.radius_m,
            submissions: topical,
            strength: (count as f64 / params.strength_saturation as f64).min(1.0),
            emergent: count >= params.emergent_count,
        });
    }

    debug!(
        considered = submissions.len(),
        cells = cells.len(),
        clusters = clusters.len(),
        "Clustering pass complete"
    );

    clusters
}

/// The most frequent topic across a cell's pulses and its count.
///
/// Ties go to the lexically smallest label. Returns None when no pulse in
/// the cell has any topic.
pub fn dominant_topic<'a>(members: &[&'a Submission]) -> Option<(&'a str, usize)> {
    let mut counts: BTreeMap<&'a str, usize> = BTreeMap::new();
    for submission in members {
        for topic in &submission.topics {
            *counts.entry(topic.as_str()).or_insert(0) += 1;
        }
    }

    // BTreeMap iterates in ascending label order; keeping the first maximum
    // gives the lexical tie-break.
    let mut best: Option<(&'a str, usize)> = None;
    for (topic, count) in counts {
        let better = match best {
            None => true,
            Some((_, c)) => count > c,
        };
        if better {
            best = Some((topic, count));
        }
    }
    best
}
