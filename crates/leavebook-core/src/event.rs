//! Attendance events: dated records of leave taken against a subject.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Result, number, subject::SubjectKey};

/// A single dated record of leave hours for one subject.
///
/// Events are identified by a UUID assigned at creation, so deleting one
/// never shifts the identity of another. Only `hours` and `note` may change
/// after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceEvent {
  pub event_id:    Uuid,
  pub subject:     SubjectKey,
  pub date:        NaiveDate,
  /// Hours of leave taken.
  pub hours:       f64,
  pub note:        String,
  pub recorded_at: DateTime<Utc>,
}

impl AttendanceEvent {
  pub fn apply(&mut self, edit: EventEdit) {
    self.hours = edit.hours;
    self.note = edit.note;
  }
}

/// Input for [`crate::store::LedgerStore::add_event`].
#[derive(Debug, Clone)]
pub struct NewEvent {
  pub subject: SubjectKey,
  pub hours:   f64,
  pub note:    String,
  /// Defaults to the current local date when `None`.
  pub date:    Option<NaiveDate>,
}

impl NewEvent {
  pub fn new(subject: SubjectKey, hours: f64) -> Result<Self> {
    Ok(Self {
      subject,
      hours: number::check("hours", hours)?,
      note: String::new(),
      date: None,
    })
  }

  pub fn with_note(mut self, note: impl Into<String>) -> Self {
    self.note = note.into();
    self
  }

  pub fn on(mut self, date: NaiveDate) -> Self {
    self.date = Some(date);
    self
  }

  /// Assign identity and timestamps. `today` fills in a missing date.
  pub fn into_event(
    self,
    event_id: Uuid,
    recorded_at: DateTime<Utc>,
    today: NaiveDate,
  ) -> AttendanceEvent {
    AttendanceEvent {
      event_id,
      subject: self.subject,
      date: self.date.unwrap_or(today),
      hours: self.hours,
      note: self.note,
      recorded_at,
    }
  }
}

/// The mutable part of an event.
#[derive(Debug, Clone)]
pub struct EventEdit {
  pub hours: f64,
  pub note:  String,
}

impl EventEdit {
  pub fn new(hours: f64, note: impl Into<String>) -> Result<Self> {
    Ok(Self { hours: number::check("hours", hours)?, note: note.into() })
  }
}

/// The current local calendar date.
pub fn today() -> NaiveDate { chrono::Local::now().date_naive() }

#[cfg(test)]
mod tests {
  use super::*;
  use crate::subject::CourseType;

  #[test]
  fn missing_date_defaults_to_today() {
    let today = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
    let event = NewEvent::new(SubjectKey::new("Math", CourseType::Lab), 2.0)
      .unwrap()
      .into_event(Uuid::new_v4(), Utc::now(), today);
    assert_eq!(event.date, today);
  }

  #[test]
  fn explicit_date_is_kept() {
    let today = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
    let day = NaiveDate::from_ymd_opt(2024, 2, 14).unwrap();
    let event = NewEvent::new(SubjectKey::new("Math", CourseType::Lab), 2.0)
      .unwrap()
      .on(day)
      .into_event(Uuid::new_v4(), Utc::now(), today);
    assert_eq!(event.date, day);
  }

  #[test]
  fn edit_touches_only_hours_and_note() {
    let mut event = NewEvent::new(SubjectKey::new("Math", CourseType::Lab), 2.0)
      .unwrap()
      .with_note("dentist")
      .into_event(Uuid::new_v4(), Utc::now(), today());
    let before = event.clone();

    event.apply(EventEdit::new(3.5, "dentist, rescheduled").unwrap());

    assert_eq!(event.hours, 3.5);
    assert_eq!(event.note, "dentist, rescheduled");
    assert_eq!(event.event_id, before.event_id);
    assert_eq!(event.subject, before.subject);
    assert_eq!(event.date, before.date);
  }
}
