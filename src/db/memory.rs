// MemoryStore — the session-lifetime collection behind the SubmissionStore trait.
//
// Appends take the write lock for the whole push, so readers see either the
// complete record or nothing.

use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::RwLock;

use super::models::Submission;
use super::traits::SubmissionStore;

#[derive(Default)]
pub struct MemoryStore {
    submissions: RwLock<Vec<Submission>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing collection (e.g. mock data).
    pub fn with_submissions(submissions: Vec<Submission>) -> Self {
        Self {
            submissions: RwLock::new(submissions),
        }
    }
}

#[async_trait]
impl SubmissionStore for MemoryStore {
    async fn append(&self, submission: &Submission) -> Result<()> {
        let mut guard = self.submissions.write().await;
        guard.push(submission.clone());
        Ok(())
    }

    async fn all(&self) -> Result<Vec<Submission>> {
        Ok(self.submissions.read().await.clone())
    }

    async fn recent(&self, limit: usize) -> Result<Vec<Submission>> {
        let guard = self.submissions.read().await;
        Ok(crate::stats::recent_feed(&guard, limit)
            .into_iter()
            .cloned()
            .collect())
    }

    async fn count(&self) -> Result<usize> {
        Ok(self.submissions.read().await.len())
    }
}
