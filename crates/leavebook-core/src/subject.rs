//! Subject: a course a user is tracked against.
//!
//! A subject's scheduled hours are fixed when it is created. Its leave budget
//! is always derived from those hours on read; only `leave_taken` changes
//! afterwards, and only through [`crate::ledger::recalc`].

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, IntoStaticStr};

use crate::{Error, Result, number};

/// Scheduled contact hours per credit over a term.
pub const HOURS_PER_CREDIT: f64 = 15.0;

/// Lab courses meet twice as often per credit as lectures.
pub const LAB_HOURS_MULTIPLIER: f64 = 2.0;

/// Fraction of scheduled hours that may be taken as leave.
pub const ALLOWED_LEAVE_FRACTION: f64 = 0.25;

// ─── Course type ─────────────────────────────────────────────────────────────

#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Serialize,
  Deserialize,
  Display,
  EnumString,
  IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum CourseType {
  Lecture,
  Lab,
}

impl CourseType {
  /// Case-insensitive parse of the form value (`"lecture"` / `"lab"`).
  pub fn parse(raw: &str) -> Result<Self> {
    raw
      .trim()
      .to_ascii_lowercase()
      .parse()
      .map_err(|_| Error::UnknownCourseType(raw.to_owned()))
  }

  fn hours_multiplier(self) -> f64 {
    match self {
      Self::Lecture => 1.0,
      Self::Lab => LAB_HOURS_MULTIPLIER,
    }
  }
}

/// Scheduled hours for a course: `credits × 15`, doubled for labs.
pub fn total_hours(credits: f64, course_type: CourseType) -> f64 {
  credits * HOURS_PER_CREDIT * course_type.hours_multiplier()
}

/// The leave budget for a course with `total_hours` scheduled hours.
pub fn allowed_leave(total_hours: f64) -> f64 { total_hours * ALLOWED_LEAVE_FRACTION }

// ─── Identity ────────────────────────────────────────────────────────────────

/// The natural key of a subject within one user's ledger.
///
/// A lecture and a lab may share a name; they are distinct subjects.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubjectKey {
  pub name:        String,
  pub course_type: CourseType,
}

impl SubjectKey {
  pub fn new(name: impl Into<String>, course_type: CourseType) -> Self {
    Self { name: name.into().trim().to_owned(), course_type }
  }
}

impl fmt::Display for SubjectKey {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{} ({})", self.name, self.course_type)
  }
}

// ─── Subject ─────────────────────────────────────────────────────────────────

/// Input for [`crate::store::LedgerStore::add_subject`].
#[derive(Debug, Clone)]
pub struct NewSubject {
  pub key:     SubjectKey,
  pub credits: f64,
}

impl NewSubject {
  pub fn new(
    name: impl Into<String>,
    credits: f64,
    course_type: CourseType,
  ) -> Result<Self> {
    let credits = number::check("credits", credits)?;
    if !total_hours(credits, course_type).is_finite() {
      return Err(Error::InvalidNumeric { field: "credits", value: credits.to_string() });
    }
    Ok(Self { key: SubjectKey::new(name, course_type), credits })
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subject {
  #[serde(flatten)]
  pub key:         SubjectKey,
  pub credits:     f64,
  /// Fixed at creation; never recomputed.
  pub total_hours: f64,
  /// Cached sum of event hours for this subject.
  pub leave_taken: f64,
  pub created_at:  DateTime<Utc>,
}

impl Subject {
  /// Build a fresh subject with no leave recorded.
  pub fn create(input: NewSubject, created_at: DateTime<Utc>) -> Self {
    Self {
      total_hours: total_hours(input.credits, input.key.course_type),
      key: input.key,
      credits: input.credits,
      leave_taken: 0.0,
      created_at,
    }
  }

  pub fn allowed_leave(&self) -> f64 { allowed_leave(self.total_hours) }

  /// May be negative once leave exceeds the budget.
  pub fn remaining_leave(&self) -> f64 { self.allowed_leave() - self.leave_taken }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn subject(credits: f64, course_type: CourseType) -> Subject {
    Subject::create(
      NewSubject::new("Math", credits, course_type).unwrap(),
      Utc::now(),
    )
  }

  #[test]
  fn lecture_hours_are_credits_times_fifteen() {
    assert_eq!(subject(3.0, CourseType::Lecture).total_hours, 45.0);
  }

  #[test]
  fn lab_hours_are_doubled() {
    assert_eq!(subject(3.0, CourseType::Lab).total_hours, 90.0);
  }

  #[test]
  fn allowed_leave_is_a_quarter_of_scheduled_hours() {
    let mut s = subject(3.0, CourseType::Lab);
    assert_eq!(s.allowed_leave(), 22.5);
    s.leave_taken = 15.0;
    assert_eq!(s.allowed_leave(), 22.5);
    assert_eq!(s.remaining_leave(), 7.5);
  }

  #[test]
  fn remaining_leave_goes_negative_on_over_leave() {
    let mut s = subject(1.0, CourseType::Lecture);
    s.leave_taken = 5.0;
    assert_eq!(s.remaining_leave(), -1.25);
  }

  #[test]
  fn course_type_parse_is_case_insensitive() {
    assert_eq!(CourseType::parse("Lab").unwrap(), CourseType::Lab);
    assert_eq!(CourseType::parse(" lecture ").unwrap(), CourseType::Lecture);
    assert!(matches!(
      CourseType::parse("seminar"),
      Err(Error::UnknownCourseType(_))
    ));
  }

  #[test]
  fn key_trims_name_and_displays_like_a_flash_message() {
    let key = SubjectKey::new("  Physics ", CourseType::Lab);
    assert_eq!(key.name, "Physics");
    assert_eq!(key.to_string(), "Physics (lab)");
  }

  #[test]
  fn negative_credits_are_rejected() {
    assert!(NewSubject::new("Math", -3.0, CourseType::Lecture).is_err());
  }

  #[test]
  fn credits_whose_hours_overflow_are_rejected() {
    assert!(matches!(
      NewSubject::new("Math", 1e308, CourseType::Lab),
      Err(Error::InvalidNumeric { field: "credits", .. })
    ));
    assert!(NewSubject::new("Math", 1e300, CourseType::Lab).is_ok());
  }

  #[test]
  fn static_name_matches_display() {
    for ct in [CourseType::Lecture, CourseType::Lab] {
      let name: &'static str = ct.into();
      assert_eq!(name, ct.to_string());
      assert_eq!(CourseType::parse(name).unwrap(), ct);
    }
  }
}
