// GeoJSON map export — the hand-off to map renderers.
//
// Each pulse becomes a Point feature carrying a sentiment-coloured circle
// style; each cluster becomes a Point feature at its center with its radius,
// strength, and a few member previews. GeoJSON positions are [lng, lat].

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::clustering::TopicCluster;
use crate::db::models::Submission;

pub const POSITIVE_COLOR: &str = "#10B981";
pub const NEGATIVE_COLOR: &str = "#EF4444";
pub const NEUTRAL_COLOR: &str = "#6B7280";

/// How many member texts a cluster feature previews.
const CLUSTER_PREVIEWS: usize = 3;
const PREVIEW_CHARS: usize = 80;

/// Circle styling for a single pulse on the map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerStyle {
    pub color: String,
    pub radius_m: f64,
    pub fill_opacity: f64,
}

impl MarkerStyle {
    /// Colour from the score (±0.2 bands), size and opacity from magnitude.
    pub fn for_submission(submission: &Submission) -> Self {
        let score = submission.sentiment.score;
        let magnitude = submission.sentiment.magnitude;
        let color = if score > 0.2 {
            POSITIVE_COLOR
        } else if score < -0.2 {
            NEGATIVE_COLOR
        } else {
            NEUTRAL_COLOR
        };
        Self {
            color: color.to_string(),
            radius_m: 50.0 + magnitude * 100.0,
            fill_opacity: 0.3 + magnitude * 0.4,
        }
    }
}

fn submission_feature(submission: &Submission) -> Value {
    json!({
        "type": "Feature",
        "geometry": {
            "type": "Point",
            "coordinates": [submission.longitude, submission.latitude],
        },
        "properties": {
            "kind": "pulse",
            "id": submission.id,
            "text": submission.text,
            "created_at": submission.created_at.to_rfc3339(),
            "sentiment": submission.sentiment,
            "topics": submission.topics,
            "style": MarkerStyle::for_submission(submission),
        },
    })
}

fn cluster_feature(cluster: &TopicCluster) -> Value {
    let previews: Vec<String> = cluster
        .submissions
        .iter()
        .take(CLUSTER_PREVIEWS)
        .map(|s| super::truncate_chars(&s.text, PREVIEW_CHARS))
        .collect();

    json!({
        "type": "Feature",
        "geometry": {
            "type": "Point",
            "coordinates": [cluster.center.longitude, cluster.center.latitude],
        },
        "properties": {
            "kind": "cluster",
            "id": cluster.id,
            "label": cluster.label,
            "radius_m": cluster.radius_m,
            "strength": cluster.strength,
            "emergent": cluster.emergent,
            "members": cluster.submissions.len(),
            "previews": previews,
            "more": cluster.submissions.len().saturating_sub(CLUSTER_PREVIEWS),
        },
    })
}

/// Build a FeatureCollection of pulses followed by clusters.
pub fn to_geojson(submissions: &[Submission], clusters: &[TopicCluster]) -> Value {
    let features: Vec<Value> = submissions
        .iter()
        .map(submission_feature)
        .chain(clusters.iter().map(cluster_feature))
        .collect();

    json!({
        "type": "FeatureCollection",
        "features": features,
    })
}

/// Write the export to `path`, creating parent directories as needed.
/// Returns the path written.
pub fn write_geojson(
    submissions: &[Submission],
    clusters: &[TopicCluster],
    path: &str,
) -> Result<String> {
    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory for {path}"))?;
        }
    }

    let body = serde_json::to_string_pretty(&to_geojson(submissions, clusters))?;
    std::fs::write(path, body).with_context(|| format!("Failed to write map export to {path}"))?;

    Ok(path.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::{SentimentLabel, SentimentResult};
    use chrono::Utc;

    fn pulse(score: f64, magnitude: f64) -> Submission {
        Submission {
            id: "p".to_string(),
            text: "x".to_string(),
            latitude: 40.7,
            longitude: -74.0,
            created_at: Utc::now(),
            sentiment: SentimentResult {
                score,
                magnitude,
                label: SentimentLabel::from_score(score),
            },
            topics: vec![],
        }
    }

    #[test]
    fn test_marker_colour_bands() {
        assert_eq!(MarkerStyle::for_submission(&pulse(0.3, 0.5)).color, POSITIVE_COLOR);
        // Labelled positive (> 0.1) but still drawn neutral (<= 0.2)
        assert_eq!(MarkerStyle::for_submission(&pulse(0.15, 0.5)).color, NEUTRAL_COLOR);
        assert_eq!(MarkerStyle::for_submission(&pulse(-0.5, 0.5)).color, NEGATIVE_COLOR);
    }

    #[test]
    fn test_marker_size_scales_with_magnitude() {
        let style = MarkerStyle::for_submission(&pulse(0.0, 0.5));
        assert!((style.radius_m - 100.0).abs() < 1e-9);
        assert!((style.fill_opacity - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_positions_are_lng_lat() {
        let fc = to_geojson(&[pulse(0.0, 0.1)], &[]);
        assert_eq!(fc["type"], "FeatureCollection");
        let coords = &fc["features"][0]["geometry"]["coordinates"];
        assert_eq!(coords[0], -74.0);
        assert_eq!(coords[1], 40.7);
        assert_eq!(fc["features"][0]["properties"]["sentiment"]["label"], "neutral");
    }
}
