// Topic clustering — grid bucketing plus dominant-topic selection.

pub mod builder;
pub mod grid;

pub use builder::{build_clusters, ClusterParams, TopicCluster};
pub use grid::GridCell;
