//! Plain-text rendering of ledger views for the terminal.

use std::fmt::Write as _;

use leavebook_core::{
  event::AttendanceEvent,
  summary::{Summary, SubjectSummary},
};

/// Trim trailing zeros: `45` rather than `45.00`, `7.5` rather than `7.50`.
fn hours(h: f64) -> String {
  let s = format!("{h:.2}");
  s.trim_end_matches('0').trim_end_matches('.').to_owned()
}

pub fn subjects(rows: &[SubjectSummary]) -> String {
  if rows.is_empty() {
    return "No subjects yet.\n".to_owned();
  }

  let width = rows.iter().map(|r| r.name.len()).max().unwrap_or(0).max("SUBJECT".len());
  let mut out = String::new();
  let _ = writeln!(
    out,
    "{:<width$}  {:<7}  {:>7}  {:>6}  {:>7}  {:>6}  {:>9}  {:>7}",
    "SUBJECT", "TYPE", "CREDITS", "HOURS", "ALLOWED", "TAKEN", "REMAINING", "ATTEND%"
  );
  for r in rows {
    let _ = writeln!(
      out,
      "{:<width$}  {:<7}  {:>7}  {:>6}  {:>7}  {:>6}  {:>9}  {:>7.2}",
      r.name,
      r.course_type.to_string(),
      hours(r.credits),
      hours(r.total_hours),
      hours(r.allowed_leave),
      hours(r.leave_taken),
      hours(r.remaining_leave),
      r.attendance_percentage,
    );
  }
  out
}

pub fn events(events: &[AttendanceEvent]) -> String {
  if events.is_empty() {
    return "No attendance recorded yet.\n".to_owned();
  }

  let mut out = String::new();
  for e in events {
    let _ = writeln!(
      out,
      "{}  {}  {:<20}  {:>5}h  {}",
      e.event_id,
      e.date,
      e.subject.to_string(),
      hours(e.hours),
      e.note,
    );
  }
  out
}

pub fn summary(s: &Summary) -> String {
  let mut out = format!("Summary for {}\n\n", s.user);
  out.push_str(&subjects(&s.subjects));
  let t = &s.totals;
  let _ = writeln!(
    out,
    "\nTotal: {} of {} allowed leave hours taken, {} remaining ({:.2}% attendance)\n",
    hours(t.leave_taken),
    hours(t.allowed_leave),
    hours(t.remaining_leave),
    t.attendance_percentage,
  );
  out.push_str(&events(&s.events));
  out
}
