// Mock pulses for demos and the `watch --simulate` loop.
//
// Every generated pulse goes through the same scorer and extractor as real
// intake, so the mock data exercises the whole flow.

use chrono::{DateTime, TimeDelta, Utc};
use rand::Rng;

use crate::db::models::{Coordinates, Submission};
use crate::pipeline::intake::score_pulse;
use crate::sentiment::NoiseSource;
use crate::topics::TopicExtractor;

/// Lower Manhattan.
pub const BASE_LOCATION: Coordinates = Coordinates {
    latitude: 40.7128,
    longitude: -74.0060,
};

/// Generated points land within ±JITTER_DEG/2 of the base on each axis.
pub const JITTER_DEG: f64 = 0.02;

/// Seed pulses are spread over this many hours before `now`.
pub const SEED_SPAN_HOURS: f64 = 4.0;

pub const SEED_TEXTS: &[&str] = &[
    "Amazing street musician playing jazz here, the whole block feels alive!",
    "Traffic is absolutely terrible right now, been stuck for 20 minutes",
    "The coffee shop here has the most incredible smell of fresh bread",
    "Beautiful sunset over the park, so peaceful and quiet",
    "Crowded but energetic night market, great food everywhere",
    "Police presence is heavy today, feels a bit tense",
    "Local community gathering in the square, really friendly vibes",
    "New boutique opened with amazing fashion, love the local shopping scene",
    "Street food vendor has the best tacos I've ever tasted",
    "Concert in the park tonight, hundreds of people dancing",
    "Rush hour chaos but the energy is infectious",
    "Quiet corner cafe perfect for working, great atmosphere",
    "Farmers market buzzing with activity and fresh produce",
    "Late night food trucks creating a party atmosphere",
    "Morning joggers everywhere, healthy community vibe",
];

pub const DYNAMIC_TEXTS: &[&str] = &[
    "Just discovered this hidden gem of a bookstore",
    "The energy here is electric tonight!",
    "Peaceful morning walk, birds chirping everywhere",
    "Food truck festival is amazing, so many options",
    "Construction noise is really disrupting the peace",
    "Street art exhibition transformed this whole block",
    "Local band playing covers, drawing a crowd",
    "Early morning yoga class in the park",
    "Weekend market has incredible local crafts",
    "Late night study session at the 24/7 cafe",
];

fn jittered_location(rng: &mut impl Rng) -> Coordinates {
    Coordinates {
        latitude: BASE_LOCATION.latitude + rng.random_range(-0.5..0.5) * JITTER_DEG,
        longitude: BASE_LOCATION.longitude + rng.random_range(-0.5..0.5) * JITTER_DEG,
    }
}

/// The seed collection: one pulse per SEED_TEXTS entry, ids `mock-{i}`,
/// created at random points in the last four hours.
pub fn mock_submissions(
    rng: &mut impl Rng,
    now: DateTime<Utc>,
    noise: &dyn NoiseSource,
    extractor: &dyn TopicExtractor,
) -> Vec<Submission> {
    let span_ms = (SEED_SPAN_HOURS * 3_600_000.0) as i64;

    SEED_TEXTS
        .iter()
        .enumerate()
        .map(|(i, text)| {
            let location = jittered_location(rng);
            let created_at = now - TimeDelta::milliseconds(rng.random_range(0..span_ms));
            score_pulse(
                format!("mock-{i}"),
                text,
                location,
                created_at,
                noise,
                extractor,
            )
        })
        .collect()
}

/// One fresh pulse created at `now`, as the live demo would receive.
pub fn new_submission(
    rng: &mut impl Rng,
    now: DateTime<Utc>,
    noise: &dyn NoiseSource,
    extractor: &dyn TopicExtractor,
) -> Submission {
    let text = DYNAMIC_TEXTS[rng.random_range(0..DYNAMIC_TEXTS.len())];
    let location = jittered_location(rng);
    let id = format!(
        "dynamic-{}-{:08x}",
        now.timestamp_millis(),
        rng.random::<u32>()
    );
    score_pulse(id, text, location, now, noise, extractor)
}
