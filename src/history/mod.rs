//! Append-only persistence of graded results.
//!
//! One row per graded question, stamped with an ISO-8601 UTC timestamp.
//! This is the storage side of the result contract; rendering and analytics
//! are left to callers.

use crate::grading::GradedAnswer;
use chrono::{DateTime, Utc};
use rusqlite::Connection;
use std::path::Path;
use std::sync::Mutex;
use thiserror::Error;
use tracing::debug;

/// Errors from result persistence.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum HistoryError {
    /// The underlying database failed.
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// A stored timestamp did not parse as ISO-8601.
    #[error("invalid stored timestamp: {0}")]
    InvalidTimestamp(String),
}

/// A persisted graded-result row.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StoredResult {
    /// When the batch containing this row was stored (UTC).
    pub timestamp: DateTime<Utc>,
    /// The question text.
    pub question: String,
    /// The student's answer.
    pub student: String,
    /// The reference answer.
    pub answer: String,
    /// Score in `[0, 1]`.
    pub score: f64,
    /// Grader feedback.
    pub feedback: String,
}

/// SQLite-backed append-only store for graded results.
#[derive(Debug)]
pub struct ResultStore {
    conn: Mutex<Connection>,
}

impl ResultStore {
    /// Open (or create) a result store at the given path.
    ///
    /// # Errors
    ///
    /// Returns [`HistoryError`] when the database cannot be opened or the
    /// schema cannot be created.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, HistoryError> {
        Self::from_connection(Connection::open(path)?)
    }

    /// Open an in-memory result store. Used by tests and throwaway sessions.
    ///
    /// # Errors
    ///
    /// Returns [`HistoryError`] when the schema cannot be created.
    pub fn open_in_memory() -> Result<Self, HistoryError> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self, HistoryError> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS results (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                timestamp TEXT NOT NULL,
                question TEXT NOT NULL,
                student TEXT NOT NULL,
                answer TEXT NOT NULL,
                score REAL NOT NULL,
                feedback TEXT NOT NULL
            )",
            [],
        )?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Append a batch of graded answers, all stamped with the same
    /// timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`HistoryError`] when the insert fails.
    pub fn append(&self, graded: &[GradedAnswer]) -> Result<(), HistoryError> {
        let now = Utc::now().to_rfc3339();
        let mut conn = self.conn.lock().expect("result store mutex poisoned");
        let tx = conn.transaction()?;
        for g in graded {
            tx.execute(
                "INSERT INTO results (timestamp, question, student, answer, score, feedback)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                rusqlite::params![now, g.question, g.student, g.answer, g.score, g.feedback],
            )?;
        }
        tx.commit()?;
        debug!(rows = graded.len(), "graded results stored");
        Ok(())
    }

    /// Read back up to `limit` rows, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`HistoryError`] when the query fails or a stored timestamp
    /// is corrupt.
    pub fn recent(&self, limit: usize) -> Result<Vec<StoredResult>, HistoryError> {
        let conn = self.conn.lock().expect("result store mutex poisoned");
        let mut stmt = conn.prepare(
            "SELECT timestamp, question, student, answer, score, feedback
             FROM results ORDER BY id DESC LIMIT ?1",
        )?;

        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let rows = stmt.query_map([limit], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, f64>(4)?,
                row.get::<_, String>(5)?,
            ))
        })?;

        let mut results = Vec::new();
        for row in rows {
            let (timestamp, question, student, answer, score, feedback) = row?;
            let timestamp = DateTime::parse_from_rfc3339(&timestamp)
                .map_err(|_| HistoryError::InvalidTimestamp(timestamp.clone()))?
                .with_timezone(&Utc);
            results.push(StoredResult {
                timestamp,
                question,
                student,
                answer,
                score,
                feedback,
            });
        }
        Ok(results)
    }

    /// Number of stored rows.
    ///
    /// # Errors
    ///
    /// Returns [`HistoryError`] when the query fails.
    pub fn len(&self) -> Result<usize, HistoryError> {
        let conn = self.conn.lock().expect("result store mutex poisoned");
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM results", [], |row| row.get(0))?;
        Ok(usize::try_from(count).unwrap_or(0))
    }

    /// Whether the store holds no rows.
    ///
    /// # Errors
    ///
    /// Returns [`HistoryError`] when the query fails.
    pub fn is_empty(&self) -> Result<bool, HistoryError> {
        Ok(self.len()? == 0)
    }
}
