// Topic extraction — keyword-table tagging behind a swappable trait.

pub mod keywords;
pub mod traits;

pub use keywords::KeywordExtractor;
pub use traits::TopicExtractor;
