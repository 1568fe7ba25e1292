use rusqlite::Connection;

use crate::error::StoreError;

/// Bootstrap DDL, applied on every open. `IF NOT EXISTS` keeps reopening a
/// populated file harmless.
const DDL: &str = "
CREATE TABLE IF NOT EXISTS sites (
    id      INTEGER PRIMARY KEY,
    name    TEXT NOT NULL,
    address TEXT NOT NULL DEFAULT '',
    city    TEXT NOT NULL DEFAULT ''
);

CREATE TABLE IF NOT EXISTS cohorts (
    id                INTEGER PRIMARY KEY,
    site_id           INTEGER NOT NULL REFERENCES sites(id),
    course_name       TEXT NOT NULL,
    normalized_course TEXT NOT NULL,
    start_date        TEXT,
    end_date          TEXT,
    enrolled          INTEGER NOT NULL DEFAULT 0,
    graduated         INTEGER NOT NULL DEFAULT 0,
    total_seats       INTEGER NOT NULL DEFAULT 0,
    occupied_seats    INTEGER NOT NULL DEFAULT 0,
    available_seats   INTEGER NOT NULL DEFAULT 0
);

CREATE TABLE IF NOT EXISTS enrollments (
    id         INTEGER PRIMARY KEY,
    student_id INTEGER NOT NULL,
    cohort_id  INTEGER NOT NULL REFERENCES cohorts(id),
    status     TEXT NOT NULL DEFAULT 'ativa'
);

CREATE INDEX IF NOT EXISTS idx_cohorts_site ON cohorts(site_id);
CREATE INDEX IF NOT EXISTS idx_enrollments_cohort ON enrollments(cohort_id);
";

pub fn init(conn: &Connection) -> Result<(), StoreError> {
    conn.execute_batch(DDL)?;
    Ok(())
}
