// Submission intake — raw text + location in, scored Submission out.
//
// Validation lives here, not in the scorer or extractor: those stay total.
// Text must be non-empty after trimming and at most MAX_TEXT_CHARS long,
// and a location is required. Coordinate bounds are not checked.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use tracing::info;

use crate::db::models::{Coordinates, Submission, MAX_TEXT_CHARS};
use crate::db::traits::SubmissionStore;
use crate::sentiment::{analyze_sentiment, NoiseSource};
use crate::topics::TopicExtractor;

/// Score and tag a pulse without validating it.
///
/// Sentiment and topics are computed independently from the same text.
pub fn score_pulse(
    id: String,
    text: &str,
    location: Coordinates,
    created_at: DateTime<Utc>,
    noise: &dyn NoiseSource,
    extractor: &dyn TopicExtractor,
) -> Submission {
    Submission {
        id,
        text: text.to_string(),
        latitude: location.latitude,
        longitude: location.longitude,
        created_at,
        sentiment: analyze_sentiment(text, noise),
        topics: extractor.extract(text),
    }
}

/// Validate user input and build a new Submission.
pub fn build_submission(
    text: &str,
    location: Option<Coordinates>,
    created_at: DateTime<Utc>,
    noise: &dyn NoiseSource,
    extractor: &dyn TopicExtractor,
) -> Result<Submission> {
    let text = text.trim();
    if text.is_empty() {
        anyhow::bail!("A pulse needs some text. Share what's happening around you.");
    }

    let chars = text.chars().count();
    if chars > MAX_TEXT_CHARS {
        anyhow::bail!(
            "Pulse is {} characters; the limit is {}.",
            chars,
            MAX_TEXT_CHARS
        );
    }

    let Some(location) = location else {
        anyhow::bail!("No location available. Pass --lat and --lng to place the pulse.");
    };

    Ok(score_pulse(
        new_submission_id(created_at),
        text,
        location,
        created_at,
        noise,
        extractor,
    ))
}

/// Validate, score, and append a pulse to the store.
pub async fn submit(
    store: &dyn SubmissionStore,
    text: &str,
    location: Option<Coordinates>,
    created_at: DateTime<Utc>,
    noise: &dyn NoiseSource,
    extractor: &dyn TopicExtractor,
) -> Result<Submission> {
    let submission = build_submission(text, location, created_at, noise, extractor)?;

    store
        .append(&submission)
        .await
        .context("Failed to store pulse")?;

    info!(
        id = %submission.id,
        label = %submission.sentiment.label,
        topics = submission.topics.len(),
        "Pulse submitted"
    );

    Ok(submission)
}

/// `pulse-{unix_millis}-{8 hex digits}`.
pub fn new_submission_id(created_at: DateTime<Utc>) -> String {
    format!(
        "pulse-{}-{:08x}",
        created_at.timestamp_millis(),
        rand::random::<u32>()
    )
}
