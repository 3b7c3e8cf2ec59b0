// Database queries — SQL for the submissions table.
//
// Every database interaction goes through this module. This keeps SQL
// contained in one place and gives the rest of the app clean Rust interfaces.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};

use super::models::{SentimentLabel, SentimentResult, Submission};

const SELECT_COLUMNS: &str = "id, text, latitude, longitude, created_at,
    sentiment_score, sentiment_magnitude, sentiment_label, topics";

/// Insert a submission. Fails if the id already exists.
pub fn insert_submission(conn: &Connection, submission: &Submission) -> Result<()> {
    let topics_json = serde_json::to_string(&submission.topics)?;
    conn.execute(
        "INSERT INTO submissions (id, text, latitude, longitude, created_at,
            created_secs, created_nanos,
            sentiment_score, sentiment_magnitude, sentiment_label, topics)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
        params![
            submission.id,
            submission.text,
            submission.latitude,
            submission.longitude,
            submission.created_at.to_rfc3339(),
            submission.created_at.timestamp(),
            submission.created_at.timestamp_subsec_nanos(),
            submission.sentiment.score,
            submission.sentiment.magnitude,
            submission.sentiment.label.as_str(),
            topics_json,
        ],
    )
    .with_context(|| format!("Failed to insert submission {}", submission.id))?;
    Ok(())
}

/// Load every submission in insertion order.
pub fn get_all_submissions(conn: &Connection) -> Result<Vec<Submission>> {
    let sql = format!("SELECT {SELECT_COLUMNS} FROM submissions ORDER BY rowid");
    load_submissions(conn, &sql, params![])
}

/// Load the newest submissions by creation time, newest first. Ordering
/// uses the full nanosecond timestamp; equal timestamps keep insertion order.
pub fn get_recent_submissions(conn: &Connection, limit: usize) -> Result<Vec<Submission>> {
    let sql = format!(
        "SELECT {SELECT_COLUMNS} FROM submissions
         ORDER BY created_secs DESC, created_nanos DESC, rowid ASC LIMIT ?1"
    );
    load_submissions(conn, &sql, params![limit as i64])
}

pub fn count_submissions(conn: &Connection) -> Result<usize> {
    let count: i64 = conn.query_row("SELECT COUNT(*) FROM submissions", [], |row| row.get(0))?;
    Ok(count as usize)
}

/// Raw column values, converted to a Submission outside the rusqlite closure
/// so timestamp and JSON parse failures surface as anyhow errors.
struct SubmissionRow {
    id: String,
    text: String,
    latitude: f64,
    longitude: f64,
    created_at: String,
    score: f64,
    magnitude: f64,
    label: String,
    topics: String,
}

impl SubmissionRow {
    fn into_submission(self) -> Result<Submission> {
        let created_at = DateTime::parse_from_rfc3339(&self.created_at)
            .with_context(|| format!("Bad created_at for submission {}", self.id))?
            .with_timezone(&Utc);
        let topics: Vec<String> = serde_json::from_str(&self.topics)
            .with_context(|| format!("Bad topics JSON for submission {}", self.id))?;

        Ok(Submission {
            id: self.id,
            text: self.text,
            latitude: self.latitude,
            longitude: self.longitude,
            created_at,
            sentiment: SentimentResult {
                score: self.score,
                magnitude: self.magnitude,
                label: SentimentLabel::parse(&self.label),
            },
            topics,
        })
    }
}

fn load_submissions(
    conn: &Connection,
    sql: &str,
    params: &[&dyn rusqlite::ToSql],
) -> Result<Vec<Submission>> {
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map(params, |row| {
            Ok(SubmissionRow {
                id: row.get(0)?,
                text: row.get(1)?,
                latitude: row.get(2)?,
                longitude: row.get(3)?,
                created_at: row.get(4)?,
                score: row.get(5)?,
                magnitude: row.get(6)?,
                label: row.get(7)?,
                topics: row.get(8)?,
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    rows.into_iter().map(SubmissionRow::into_submission).collect()
}
