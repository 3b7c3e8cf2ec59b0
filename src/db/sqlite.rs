// SqliteStore — rusqlite backend implementing the SubmissionStore trait.
//
// rusqlite's Connection is !Sync, so it sits behind a tokio Mutex and each
// trait call holds the lock for one short synchronous query. An append is a
// single INSERT; a reader never sees a partial record.

use anyhow::Result;
use async_trait::async_trait;
use rusqlite::Connection;
use tokio::sync::Mutex;

use super::models::Submission;
use super::traits::SubmissionStore;

pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Wrap an already-opened rusqlite Connection.
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    pub async fn table_count(&self) -> Result<i64> {
        let conn = self.conn.lock().await;
        super::schema::table_count(&conn)
    }
}

#[async_trait]
impl SubmissionStore for SqliteStore {
    async fn append(&self, submission: &Submission) -> Result<()> {
        let conn = self.conn.lock().await;
        super::queries::insert_submission(&conn, submission)
    }

    async fn all(&self) -> Result<Vec<Submission>> {
        let conn = self.conn.lock().await;
        super::queries::get_all_submissions(&conn)
    }

    async fn recent(&self, limit: usize) -> Result<Vec<Submission>> {
        let conn = self.conn.lock().await;
        super::queries::get_recent_submissions(&conn, limit)
    }

    async fn count(&self) -> Result<usize> {
        let conn = self.conn.lock().await;
        super::queries::count_submissions(&conn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::{SentimentLabel, SentimentResult};
    use crate::db::schema::create_tables;
    use chrono::Utc;

    fn test_store() -> SqliteStore {
        let conn = Connection::open_in_memory().unwrap();
        create_tables(&conn).unwrap();
        SqliteStore::new(conn)
    }

    #[tokio::test]
    async fn test_trait_append_then_read() {
        let store = test_store();
        let pulse = Submission {
            id: "pulse-1".to_string(),
            text: "Concert in the park tonight".to_string(),
            latitude: 40.7128,
            longitude: -74.006,
            created_at: Utc::now(),
            sentiment: SentimentResult {
                score: 0.12,
                magnitude: 0.25,
                label: SentimentLabel::Positive,
            },
            topics: vec!["Live Music".to_string(), "Parks & Nature".to_string()],
        };
        store.append(&pulse).await.unwrap();

        assert_eq!(store.count().await.unwrap(), 1);
        let all = store.all().await.unwrap();
        assert_eq!(all[0].id, "pulse-1");
        assert_eq!(all[0].topics, pulse.topics);
        assert_eq!(store.recent(10).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_trait_table_count() {
        let store = test_store();
        assert_eq!(store.table_count().await.unwrap(), 2);
    }
}
