use std::{path::Path, time::Duration};

use rusqlite::Connection;

/// How long a writer waits on a locked database file before giving up.
pub const BUSY_TIMEOUT_MS: u64 = 5000;

const PREDICTIONS_TABLE: &str = "
CREATE TABLE IF NOT EXISTS predictions (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    age INTEGER,
    sex TEXT,
    bmi REAL,
    children INTEGER,
    smoker TEXT,
    region TEXT,
    prediction REAL
);";

/// Opens `path` with the busy timeout applied, so readers and writers
/// wait on a locked file instead of failing immediately.
pub fn connect(path: &Path) -> Result<Connection, rusqlite::Error> {
    let conn = Connection::open(path)?;
    conn.busy_timeout(Duration::from_millis(BUSY_TIMEOUT_MS))?;
    Ok(conn)
}

/// Creates the `predictions` table if it does not exist yet.
///
/// Safe to run on every connection and from concurrent processes.
pub fn ensure_schema(conn: &Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(PREDICTIONS_TABLE)
}

/// Returns `true` if the `predictions` table has been created.
pub fn table_exists(conn: &Connection) -> Result<bool, rusqlite::Error> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'predictions'",
        [],
        |row| row.get(0),
    )?;
    Ok(count > 0)
}
