//! Append-only SQLite log of every successful prediction.

mod schema;

use std::path::{Path, PathBuf};

use log::debug;
use rusqlite::{params, Connection};
use serde::Serialize;

use crate::{error::Result, features::Submission};

pub use schema::{connect, ensure_schema, table_exists};

/// One persisted row of the `predictions` table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionRecord {
    pub id: i64,
    pub age: u32,
    pub sex: String,
    pub bmi: f64,
    pub children: u32,
    pub smoker: String,
    pub region: String,
    pub prediction: f64,
}

/// Handle to the prediction log file.
///
/// Holds only the path: every operation opens its own connection and
/// closes it when done.
#[derive(Debug, Clone)]
pub struct PredictionLog {
    path: PathBuf,
}

impl PredictionLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn open(&self) -> Result<Connection> {
        Ok(connect(&self.path)?)
    }

    /// Appends one row for `submission` and returns its id.
    ///
    /// Categorical fields are stored exactly as submitted.
    ///
    /// # Errors
    /// Returns `AppError::StorageUnavailable` if the database cannot be
    /// opened, the table cannot be created, or the insert fails.
    pub fn record(&self, submission: &Submission, prediction: f64) -> Result<i64> {
        let conn = self.open()?;
        ensure_schema(&conn)?;

        conn.execute(
            "INSERT INTO predictions (age, sex, bmi, children, smoker, region, prediction)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                submission.age,
                submission.sex,
                submission.bmi,
                submission.children,
                submission.smoker,
                submission.region,
                prediction,
            ],
        )?;

        let id = conn.last_insert_rowid();
        debug!(id = id; "prediction recorded");
        Ok(id)
    }

    /// Returns up to `limit` rows, newest first.
    pub fn recent(&self, limit: usize) -> Result<Vec<PredictionRecord>> {
        let conn = self.open()?;
        if !table_exists(&conn)? {
            return Ok(Vec::new());
        }

        let mut stmt = conn.prepare(
            "SELECT id, age, sex, bmi, children, smoker, region, prediction
             FROM predictions ORDER BY id DESC LIMIT ?1",
        )?;

        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let rows = stmt.query_map([limit], |row| {
            Ok(PredictionRecord {
                id: row.get(0)?,
                age: row.get(1)?,
                sex: row.get(2)?,
                bmi: row.get(3)?,
                children: row.get(4)?,
                smoker: row.get(5)?,
                region: row.get(6)?,
                prediction: row.get(7)?,
            })
        })?;

        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    /// Number of rows logged so far.
    pub fn count(&self) -> Result<u64> {
        let conn = self.open()?;
        if !table_exists(&conn)? {
            return Ok(0);
        }

        let count: i64 = conn.query_row("SELECT COUNT(*) FROM predictions", [], |row| row.get(0))?;
        Ok(count as u64)
    }
}
