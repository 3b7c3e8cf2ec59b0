// Periodic recluster loop.
//
// Each tick optionally appends one simulated pulse, then runs a full
// recluster pass and hands the clusters to the caller. The append is
// awaited before the pass starts, so every pass sees the previous appends.

use std::time::Duration;

use anyhow::Result;
use chrono::Utc;
use rand::rngs::StdRng;
use tracing::{debug, info};

use crate::clustering::{ClusterParams, TopicCluster};
use crate::db::traits::SubmissionStore;
use crate::sentiment::NoiseSource;
use crate::topics::TopicExtractor;

pub struct WatchOptions {
    pub interval: Duration,
    /// Stop after this many passes; None runs until the task is dropped
    pub ticks: Option<u64>,
    /// Append one generated pulse before each pass
    pub simulate: bool,
}

/// Run the loop. Returns the number of passes completed.
#[allow(clippy::too_many_arguments)]
pub async fn run<F>(
    store: &dyn SubmissionStore,
    params: &ClusterParams,
    options: &WatchOptions,
    noise: &dyn NoiseSource,
    extractor: &dyn TopicExtractor,
    rng: &mut StdRng,
    mut on_pass: F,
) -> Result<u64>
where
    F: FnMut(u64, &[TopicCluster]),
{
    let mut interval = tokio::time::interval(options.interval);
    let mut passes = 0u64;

    info!(
        interval_ms = options.interval.as_millis() as u64,
        simulate = options.simulate,
        "Watching for pulses"
    );

    loop {
        if options.ticks.is_some_and(|max| passes >= max) {
            break;
        }
        interval.tick().await;

        let now = Utc::now();
        if options.simulate {
            let pulse = crate::mock::new_submission(rng, now, noise, extractor);
            debug!(id = %pulse.id, "Simulated pulse");
            store.append(&pulse).await?;
        }

        let clusters = super::recluster::run(store, params, now).await?;
        passes += 1;
        on_pass(passes, &clusters);
    }

    Ok(passes)
}
