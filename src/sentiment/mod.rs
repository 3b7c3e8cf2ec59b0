// Sentiment scoring — keyword lexicon with injectable jitter.
//
// The NoiseSource trait isolates the randomness so the scorer is
// reproducible under test; lexicon holds the word lists and the scorer.

pub mod lexicon;
pub mod traits;

pub use lexicon::analyze_sentiment;
pub use traits::{FixedNoise, NoiseSource, RandNoise, ZeroNoise};
