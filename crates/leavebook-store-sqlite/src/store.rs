//! [`SqliteStore`]: the SQLite implementation of [`LedgerStore`].

use std::path::Path;

use chrono::Utc;
use leavebook_core::{
  Error as CoreError,
  event::{self, AttendanceEvent, EventEdit, NewEvent},
  ledger,
  store::LedgerStore,
  subject::{NewSubject, Subject, SubjectKey},
  user::UserId,
};
use rusqlite::{Connection, OptionalExtension as _};
use uuid::Uuid;

use crate::{
  Result,
  encode::{
    EVENT_COLUMNS, SUBJECT_COLUMNS, encode_course_type, encode_date, encode_dt,
    encode_uuid, event_from_row, subject_from_row,
  },
  schema::SCHEMA,
};

// ─── Connection-thread helpers ───────────────────────────────────────────────
//
// These run inside `Connection::call` closures. Anything that must happen
// atomically with a mutation (notably the recalculation) is composed here
// rather than across separate `call`s.

fn load_subjects(conn: &Connection, user: &str) -> rusqlite::Result<Vec<Subject>> {
  let mut stmt = conn.prepare(&format!(
    "SELECT {SUBJECT_COLUMNS} FROM subjects WHERE user_id = ?1 ORDER BY rowid"
  ))?;
  stmt
    .query_map(rusqlite::params![user], subject_from_row)?
    .collect()
}

fn load_events(conn: &Connection, user: &str) -> rusqlite::Result<Vec<AttendanceEvent>> {
  let mut stmt = conn.prepare(&format!(
    "SELECT {EVENT_COLUMNS} FROM events WHERE user_id = ?1 ORDER BY rowid"
  ))?;
  stmt
    .query_map(rusqlite::params![user], event_from_row)?
    .collect()
}

fn load_event(
  conn: &Connection,
  user: &str,
  event_id: &str,
) -> rusqlite::Result<Option<AttendanceEvent>> {
  conn
    .query_row(
      &format!("SELECT {EVENT_COLUMNS} FROM events WHERE user_id = ?1 AND event_id = ?2"),
      rusqlite::params![user, event_id],
      event_from_row,
    )
    .optional()
}

fn subject_exists(
  conn: &Connection,
  user: &str,
  name: &str,
  course_type: &str,
) -> rusqlite::Result<bool> {
  Ok(
    conn
      .query_row(
        "SELECT 1 FROM subjects WHERE user_id = ?1 AND name = ?2 AND course_type = ?3",
        rusqlite::params![user, name, course_type],
        |_| Ok(true),
      )
      .optional()?
      .unwrap_or(false),
  )
}

/// Rebuild and persist `leave_taken` for every subject of `user` from the
/// current event list.
fn recalc_user(conn: &Connection, user: &str) -> rusqlite::Result<Vec<Subject>> {
  let mut subjects = load_subjects(conn, user)?;
  let events = load_events(conn, user)?;
  ledger::recalc(&mut subjects, &events);

  let mut stmt = conn.prepare(
    "UPDATE subjects SET leave_taken = ?1
     WHERE user_id = ?2 AND name = ?3 AND course_type = ?4",
  )?;
  for s in &subjects {
    stmt.execute(rusqlite::params![
      s.leave_taken,
      user,
      s.key.name,
      encode_course_type(s.key.course_type),
    ])?;
  }
  Ok(subjects)
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// An attendance ledger backed by a single SQLite file, shared by all users
/// and keyed by a `user_id` column.
///
/// Cloning is cheap: the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store: useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── LedgerStore impl ────────────────────────────────────────────────────────

impl LedgerStore for SqliteStore {
  type Error = crate::Error;

  // ── Subjects ──────────────────────────────────────────────────────────────

  async fn add_subject(&self, user: UserId, input: NewSubject) -> Result<Subject> {
    let subject = Subject::create(input, Utc::now());

    let user_str   = user.to_string();
    let name       = subject.key.name.clone();
    let type_str   = encode_course_type(subject.key.course_type);
    let credits    = subject.credits;
    let total      = subject.total_hours;
    let created_at = encode_dt(subject.created_at);

    let inserted = self
      .conn
      .call(move |conn| {
        let changed = conn.execute(
          "INSERT OR IGNORE INTO subjects
             (user_id, name, course_type, credits, total_hours, leave_taken, created_at)
           VALUES (?1, ?2, ?3, ?4, ?5, 0, ?6)",
          rusqlite::params![user_str, name, type_str, credits, total, created_at],
        )?;
        Ok(changed == 1)
      })
      .await?;

    if !inserted {
      tracing::warn!(%user, subject = %subject.key, "duplicate subject rejected");
      return Err(CoreError::DuplicateSubject(subject.key).into());
    }

    tracing::info!(%user, subject = %subject.key, total_hours = subject.total_hours, "subject added");
    Ok(subject)
  }

  async fn list_subjects(&self, user: UserId) -> Result<Vec<Subject>> {
    let user_str = user.to_string();
    let subjects = self
      .conn
      .call(move |conn| Ok(load_subjects(conn, &user_str)?))
      .await?;
    Ok(subjects)
  }

  async fn delete_subject(&self, user: UserId, key: SubjectKey) -> Result<()> {
    let user_str = user.to_string();
    let name     = key.name.clone();
    let type_str = encode_course_type(key.course_type);

    let removed: Option<usize> = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let events = tx.execute(
          "DELETE FROM events WHERE user_id = ?1 AND subject = ?2 AND course_type = ?3",
          rusqlite::params![user_str, name, type_str],
        )?;
        let subjects = tx.execute(
          "DELETE FROM subjects WHERE user_id = ?1 AND name = ?2 AND course_type = ?3",
          rusqlite::params![user_str, name, type_str],
        )?;
        if subjects == 0 {
          // Nothing to delete; the transaction rolls back on drop.
          return Ok(None);
        }
        tx.commit()?;
        Ok(Some(events))
      })
      .await?;

    match removed {
      Some(events) => {
        tracing::info!(%user, subject = %key, events, "subject deleted with its events");
        Ok(())
      }
      None => Err(CoreError::SubjectNotFound(key).into()),
    }
  }

  // ── Events ────────────────────────────────────────────────────────────────

  async fn add_event(&self, user: UserId, input: NewEvent) -> Result<AttendanceEvent> {
    let event = input.into_event(Uuid::new_v4(), Utc::now(), event::today());

    let user_str    = user.to_string();
    let id_str      = encode_uuid(event.event_id);
    let name        = event.subject.name.clone();
    let type_str    = encode_course_type(event.subject.course_type);
    let date_str    = encode_date(event.date);
    let hours       = event.hours;
    let note        = event.note.clone();
    let recorded_at = encode_dt(event.recorded_at);

    let inserted = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        if !subject_exists(&tx, &user_str, &name, type_str)? {
          return Ok(false);
        }
        tx.execute(
          "INSERT INTO events
             (event_id, user_id, subject, course_type, date, hours, note, recorded_at)
           VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
          rusqlite::params![id_str, user_str, name, type_str, date_str, hours, note, recorded_at],
        )?;
        recalc_user(&tx, &user_str)?;
        tx.commit()?;
        Ok(true)
      })
      .await?;

    if !inserted {
      return Err(CoreError::SubjectNotFound(event.subject).into());
    }

    tracing::info!(%user, event_id = %event.event_id, subject = %event.subject, hours, "event added");
    Ok(event)
  }

  async fn list_events(&self, user: UserId) -> Result<Vec<AttendanceEvent>> {
    let user_str = user.to_string();
    let events = self
      .conn
      .call(move |conn| Ok(load_events(conn, &user_str)?))
      .await?;
    Ok(events)
  }

  async fn get_event(&self, user: UserId, event_id: Uuid) -> Result<Option<AttendanceEvent>> {
    let user_str = user.to_string();
    let id_str   = encode_uuid(event_id);
    let event = self
      .conn
      .call(move |conn| Ok(load_event(conn, &user_str, &id_str)?))
      .await?;
    Ok(event)
  }

  async fn edit_event(
    &self,
    user:     UserId,
    event_id: Uuid,
    edit:     EventEdit,
  ) -> Result<AttendanceEvent> {
    let user_str = user.to_string();
    let id_str   = encode_uuid(event_id);

    let updated = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let Some(mut event) = load_event(&tx, &user_str, &id_str)? else {
          return Ok(None);
        };
        event.apply(edit);
        tx.execute(
          "UPDATE events SET hours = ?1, note = ?2 WHERE user_id = ?3 AND event_id = ?4",
          rusqlite::params![event.hours, event.note, user_str, id_str],
        )?;
        recalc_user(&tx, &user_str)?;
        tx.commit()?;
        Ok(Some(event))
      })
      .await?;

    let event = updated.ok_or(CoreError::EventNotFound(event_id))?;
    tracing::info!(%user, %event_id, hours = event.hours, "event edited");
    Ok(event)
  }

  async fn delete_event(&self, user: UserId, event_id: Uuid) -> Result<()> {
    let user_str = user.to_string();
    let id_str   = encode_uuid(event_id);

    let deleted = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let changed = tx.execute(
          "DELETE FROM events WHERE user_id = ?1 AND event_id = ?2",
          rusqlite::params![user_str, id_str],
        )?;
        if changed == 0 {
          return Ok(false);
        }
        recalc_user(&tx, &user_str)?;
        tx.commit()?;
        Ok(true)
      })
      .await?;

    if !deleted {
      return Err(CoreError::EventNotFound(event_id).into());
    }
    tracing::info!(%user, %event_id, "event deleted");
    Ok(())
  }

  // ── Maintenance ───────────────────────────────────────────────────────────

  async fn recalc(&self, user: UserId) -> Result<Vec<Subject>> {
    let user_str = user.to_string();
    let subjects = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let subjects = recalc_user(&tx, &user_str)?;
        tx.commit()?;
        Ok(subjects)
      })
      .await?;

    tracing::debug!(%user, subjects = subjects.len(), "ledger recalculated");
    Ok(subjects)
  }
}
