//! The summary read model: never stored, always derived.

use serde::{Deserialize, Serialize};

use crate::{
  event::AttendanceEvent,
  subject::{CourseType, Subject, allowed_leave},
  user::UserId,
};

/// Percentage of `part` in `whole`, rounded to two decimal places.
///
/// A zero `whole` yields `0.0` rather than a division failure.
pub fn percentage(part: f64, whole: f64) -> f64 {
  if whole == 0.0 {
    return 0.0;
  }
  (part / whole * 100.0 * 100.0).round() / 100.0
}

/// Derived figures for one subject.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectSummary {
  pub name:                  String,
  pub course_type:           CourseType,
  pub credits:               f64,
  pub total_hours:           f64,
  pub leave_taken:           f64,
  pub allowed_leave:         f64,
  /// May be negative.
  pub remaining_leave:       f64,
  /// Share of scheduled hours not taken as leave. Like `remaining_leave`,
  /// negative once leave taken exceeds the scheduled hours.
  pub attendance_percentage: f64,
}

impl From<&Subject> for SubjectSummary {
  fn from(s: &Subject) -> Self {
    Self {
      name:                  s.key.name.clone(),
      course_type:           s.key.course_type,
      credits:               s.credits,
      total_hours:           s.total_hours,
      leave_taken:           s.leave_taken,
      allowed_leave:         s.allowed_leave(),
      remaining_leave:       s.remaining_leave(),
      attendance_percentage: percentage(s.total_hours - s.leave_taken, s.total_hours),
    }
  }
}

/// Figures summed across all of a user's subjects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Totals {
  pub total_hours:           f64,
  pub leave_taken:           f64,
  pub allowed_leave:         f64,
  pub remaining_leave:       f64,
  pub attendance_percentage: f64,
}

/// Everything the summary page shows for one user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Summary {
  pub user:     UserId,
  pub subjects: Vec<SubjectSummary>,
  pub events:   Vec<AttendanceEvent>,
  pub totals:   Totals,
}

impl Summary {
  pub fn build(user: UserId, subjects: &[Subject], events: Vec<AttendanceEvent>) -> Self {
    let total_hours: f64 = subjects.iter().map(|s| s.total_hours).sum();
    let leave_taken: f64 = subjects.iter().map(|s| s.leave_taken).sum();
    let allowed = allowed_leave(total_hours);

    Self {
      user,
      subjects: subjects.iter().map(SubjectSummary::from).collect(),
      events,
      totals: Totals {
        total_hours,
        leave_taken,
        allowed_leave: allowed,
        remaining_leave: allowed - leave_taken,
        attendance_percentage: percentage(total_hours - leave_taken, total_hours),
      },
    }
  }
}
