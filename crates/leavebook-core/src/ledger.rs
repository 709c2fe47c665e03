//! Recalculation of cached leave totals from the attendance ledger.
//!
//! `Subject::leave_taken` is a cache. After every event mutation it is
//! rebuilt from scratch by [`recalc`]; nothing else writes it.

use crate::{event::AttendanceEvent, subject::{Subject, SubjectKey}};

/// Replace every subject's `leave_taken` with the sum of hours of the events
/// whose key matches. Subjects with no events end at zero. Idempotent.
pub fn recalc(subjects: &mut [Subject], events: &[AttendanceEvent]) {
  for subject in subjects.iter_mut() {
    subject.leave_taken = leave_taken(&subject.key, events);
  }
}

/// Sum of event hours recorded against `key`.
pub fn leave_taken(key: &SubjectKey, events: &[AttendanceEvent]) -> f64 {
  events
    .iter()
    .filter(|e| &e.subject == key)
    .map(|e| e.hours)
    .sum()
}
