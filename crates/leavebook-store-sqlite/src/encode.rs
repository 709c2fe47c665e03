//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings, calendar dates as `YYYY-MM-DD`,
//! UUIDs as hyphenated lowercase strings. Decoders run inside connection
//! closures, so failures surface as [`rusqlite::Error`].

use chrono::{DateTime, NaiveDate, Utc};
use leavebook_core::{
  event::AttendanceEvent,
  subject::{CourseType, Subject, SubjectKey},
};
use rusqlite::{Row, types::Type};
use uuid::Uuid;

fn conversion_failure<E>(column: usize, e: E) -> rusqlite::Error
where
  E: std::error::Error + Send + Sync + 'static,
{
  rusqlite::Error::FromSqlConversionFailure(column, Type::Text, Box::new(e))
}

// ─── Uuid ─────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

fn decode_uuid(column: usize, s: &str) -> rusqlite::Result<Uuid> {
  Uuid::parse_str(s).map_err(|e| conversion_failure(column, e))
}

// ─── Dates ────────────────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

fn decode_dt(column: usize, s: &str) -> rusqlite::Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| conversion_failure(column, e))
}

pub fn encode_date(d: NaiveDate) -> String { d.format("%Y-%m-%d").to_string() }

fn decode_date(column: usize, s: &str) -> rusqlite::Result<NaiveDate> {
  NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| conversion_failure(column, e))
}

// ─── CourseType ───────────────────────────────────────────────────────────────

pub fn encode_course_type(c: CourseType) -> &'static str { c.into() }

fn decode_course_type(column: usize, s: &str) -> rusqlite::Result<CourseType> {
  CourseType::parse(s).map_err(|e| conversion_failure(column, e))
}

// ─── Rows ─────────────────────────────────────────────────────────────────────

/// Column list matching [`subject_from_row`].
pub const SUBJECT_COLUMNS: &str =
  "name, course_type, credits, total_hours, leave_taken, created_at";

pub fn subject_from_row(row: &Row<'_>) -> rusqlite::Result<Subject> {
  let course_type: String = row.get(1)?;
  let created_at: String = row.get(5)?;

  Ok(Subject {
    key:         SubjectKey {
      name:        row.get(0)?,
      course_type: decode_course_type(1, &course_type)?,
    },
    credits:     row.get(2)?,
    total_hours: row.get(3)?,
    leave_taken: row.get(4)?,
    created_at:  decode_dt(5, &created_at)?,
  })
}

/// Column list matching [`event_from_row`].
pub const EVENT_COLUMNS: &str =
  "event_id, subject, course_type, date, hours, note, recorded_at";

pub fn event_from_row(row: &Row<'_>) -> rusqlite::Result<AttendanceEvent> {
  let event_id: String = row.get(0)?;
  let course_type: String = row.get(2)?;
  let date: String = row.get(3)?;
  let recorded_at: String = row.get(6)?;

  Ok(AttendanceEvent {
    event_id:    decode_uuid(0, &event_id)?,
    subject:     SubjectKey {
      name:        row.get(1)?,
      course_type: decode_course_type(2, &course_type)?,
    },
    date:        decode_date(3, &date)?,
    hours:       row.get(4)?,
    note:        row.get(5)?,
    recorded_at: decode_dt(6, &recorded_at)?,
  })
}
