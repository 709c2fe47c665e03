//! SQL schema for the Leavebook SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS subjects (
    user_id     TEXT NOT NULL,
    name        TEXT NOT NULL,
    course_type TEXT NOT NULL,              -- 'lecture' | 'lab'
    credits     REAL NOT NULL,
    total_hours REAL NOT NULL,              -- fixed at creation
    leave_taken REAL NOT NULL DEFAULT 0,    -- rewritten by recalc only
    created_at  TEXT NOT NULL,
    PRIMARY KEY (user_id, name, course_type)
);

-- Insertion order (rowid) is the display order of a user's events.
CREATE TABLE IF NOT EXISTS events (
    event_id    TEXT PRIMARY KEY,
    user_id     TEXT NOT NULL,
    subject     TEXT NOT NULL,
    course_type TEXT NOT NULL,
    date        TEXT NOT NULL,              -- YYYY-MM-DD
    hours       REAL NOT NULL,
    note        TEXT NOT NULL DEFAULT '',
    recorded_at TEXT NOT NULL,              -- RFC 3339 UTC; server-assigned
    FOREIGN KEY (user_id, subject, course_type)
        REFERENCES subjects(user_id, name, course_type)
);

CREATE INDEX IF NOT EXISTS events_user_idx    ON events(user_id);
CREATE INDEX IF NOT EXISTS events_subject_idx ON events(user_id, subject, course_type);

PRAGMA user_version = 1;
";
