// Submission store trait — backend-agnostic async interface for the collection.
//
// Implementors: MemoryStore (session-lifetime Vec behind a RwLock) and
// SqliteStore (wraps rusqlite). Scoring and clustering never touch a store
// directly; the intake and recluster pipelines do, through this trait.
//
// All methods are async so both the in-memory and the rusqlite-via-Mutex
// backends fit behind a single interface.

use anyhow::Result;
use async_trait::async_trait;

use super::models::Submission;

#[async_trait]
pub trait SubmissionStore: Send + Sync {
    /// Append a submission. The record is either fully visible to later
    /// reads or not visible at all.
    async fn append(&self, submission: &Submission) -> Result<()>;

    /// The full collection in insertion order.
    async fn all(&self) -> Result<Vec<Submission>>;

    /// The newest submissions by creation time, newest first.
    async fn recent(&self, limit: usize) -> Result<Vec<Submission>>;

    /// Number of stored submissions.
    async fn count(&self) -> Result<usize>;
}
