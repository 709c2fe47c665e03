//! The `LedgerStore` trait.
//!
//! The trait is implemented by storage backends (e.g.
//! `leavebook-store-sqlite`). The API layer depends on this abstraction, not
//! on any concrete backend.

use std::future::Future;

use uuid::Uuid;

use crate::{
  DomainError,
  event::{AttendanceEvent, EventEdit, NewEvent},
  subject::{NewSubject, Subject, SubjectKey},
  user::UserId,
};

/// Abstraction over a per-user attendance ledger.
///
/// Every event mutation must leave each subject's `leave_taken` equal to the
/// sum of its events' hours; backends achieve this by running
/// [`crate::ledger::recalc`] as part of the same write.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait LedgerStore: Send + Sync {
  type Error: DomainError + std::error::Error + Send + Sync + 'static;

  // ── Subjects ──────────────────────────────────────────────────────────

  /// Register a subject. Fails with `DuplicateSubject` if the user already
  /// has one with the same name and course type; the ledger is unchanged.
  fn add_subject(
    &self,
    user: UserId,
    input: NewSubject,
  ) -> impl Future<Output = Result<Subject, Self::Error>> + Send + '_;

  /// All of a user's subjects in creation order.
  fn list_subjects(
    &self,
    user: UserId,
  ) -> impl Future<Output = Result<Vec<Subject>, Self::Error>> + Send + '_;

  /// Remove a subject together with every event recorded against it.
  fn delete_subject(
    &self,
    user: UserId,
    key: SubjectKey,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Events ────────────────────────────────────────────────────────────

  /// Append an event. The referenced subject must exist.
  fn add_event(
    &self,
    user: UserId,
    input: NewEvent,
  ) -> impl Future<Output = Result<AttendanceEvent, Self::Error>> + Send + '_;

  /// All of a user's events in insertion order.
  fn list_events(
    &self,
    user: UserId,
  ) -> impl Future<Output = Result<Vec<AttendanceEvent>, Self::Error>> + Send + '_;

  /// Retrieve one event. Returns `None` if not found.
  fn get_event(
    &self,
    user: UserId,
    event_id: Uuid,
  ) -> impl Future<Output = Result<Option<AttendanceEvent>, Self::Error>> + Send + '_;

  /// Replace an event's hours and note. Date and subject are immutable.
  fn edit_event(
    &self,
    user: UserId,
    event_id: Uuid,
    edit: EventEdit,
  ) -> impl Future<Output = Result<AttendanceEvent, Self::Error>> + Send + '_;

  fn delete_event(
    &self,
    user: UserId,
    event_id: Uuid,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Maintenance ───────────────────────────────────────────────────────

  /// Rebuild every subject's `leave_taken` from the event list, persist, and
  /// return the updated subjects.
  fn recalc(
    &self,
    user: UserId,
  ) -> impl Future<Output = Result<Vec<Subject>, Self::Error>> + Send + '_;
}
