// Recluster pass — read the full collection and rebuild clusters from scratch.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use tracing::info;

use crate::clustering::{build_clusters, ClusterParams, TopicCluster};
use crate::db::traits::SubmissionStore;

/// Run one clustering pass against the store at evaluation time `now`.
pub async fn run(
    store: &dyn SubmissionStore,
    params: &ClusterParams,
    now: DateTime<Utc>,
) -> Result<Vec<TopicCluster>> {
    let submissions = store
        .all()
        .await
        .context("Failed to load pulses for clustering")?;

    let clusters = build_clusters(&submissions, now, params);

    info!(
        pulses = submissions.len(),
        clusters = clusters.len(),
        emergent = clusters.iter().filter(|c| c.emergent).count(),
        "Recluster pass"
    );

    Ok(clusters)
}
