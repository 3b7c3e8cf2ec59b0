// Topic extractor trait — swap-ready abstraction.
//
// The default implementation is a fixed keyword table, but this lets the
// intake pipeline take any labeller (a custom table in tests, or a real
// classifier later) without changing the rest of the flow.

/// Trait for tagging a single pulse with topic labels.
pub trait TopicExtractor: Send + Sync {
    /// Return the matching topic labels, in the extractor's own stable order.
    /// Must be deterministic: identical text yields an identical list.
    fn extract(&self, text: &str) -> Vec<String>;
}
