//! Integration tests for `SqliteStore` against an in-memory database.

use chrono::NaiveDate;
use leavebook_core::{
  DomainError, Error as CoreError,
  event::{EventEdit, NewEvent},
  ledger,
  store::LedgerStore,
  subject::{CourseType, NewSubject, SubjectKey},
  user::{Roster, UserId},
};
use uuid::Uuid;

use crate::{Error, SqliteStore};

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn user(name: &str) -> UserId { Roster::default().resolve(name).unwrap() }

fn natasha() -> UserId { user("natasha") }

fn math_lab() -> SubjectKey { SubjectKey::new("Math", CourseType::Lab) }

async fn add_math_lab(s: &SqliteStore) {
  s.add_subject(natasha(), NewSubject::new("Math", 3.0, CourseType::Lab).unwrap())
    .await
    .unwrap();
}

async fn log(s: &SqliteStore, key: SubjectKey, hours: f64) -> Uuid {
  s.add_event(natasha(), NewEvent::new(key, hours).unwrap())
    .await
    .unwrap()
    .event_id
}

async fn leave_taken(s: &SqliteStore, key: &SubjectKey) -> f64 {
  s.list_subjects(natasha())
    .await
    .unwrap()
    .into_iter()
    .find(|sub| &sub.key == key)
    .expect("subject present")
    .leave_taken
}

// ─── Subjects ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn add_subject_computes_hours_and_starts_at_zero() {
  let s = store().await;

  let lecture = s
    .add_subject(natasha(), NewSubject::new("Math", 3.0, CourseType::Lecture).unwrap())
    .await
    .unwrap();
  let lab = s
    .add_subject(natasha(), NewSubject::new("Math", 3.0, CourseType::Lab).unwrap())
    .await
    .unwrap();

  assert_eq!(lecture.total_hours, 45.0);
  assert_eq!(lab.total_hours, 90.0);
  assert_eq!(lab.leave_taken, 0.0);

  let listed = s.list_subjects(natasha()).await.unwrap();
  assert_eq!(listed, vec![lecture, lab]);
}

#[tokio::test]
async fn duplicate_subject_is_rejected_and_list_unchanged() {
  let s = store().await;
  add_math_lab(&s).await;

  let err = s
    .add_subject(natasha(), NewSubject::new("Math", 4.0, CourseType::Lab).unwrap())
    .await
    .unwrap_err();

  assert!(matches!(err.domain(), Some(CoreError::DuplicateSubject(k)) if *k == math_lab()));
  let listed = s.list_subjects(natasha()).await.unwrap();
  assert_eq!(listed.len(), 1);
  assert_eq!(listed[0].credits, 3.0);
}

#[tokio::test]
async fn subjects_are_scoped_per_user() {
  let s = store().await;
  add_math_lab(&s).await;

  // Same key for another user is not a duplicate.
  s.add_subject(user("keerthana"), NewSubject::new("Math", 1.0, CourseType::Lab).unwrap())
    .await
    .unwrap();

  assert_eq!(s.list_subjects(natasha()).await.unwrap().len(), 1);
  assert_eq!(s.list_subjects(user("keerthana")).await.unwrap().len(), 1);
}

#[tokio::test]
async fn delete_subject_cascades_to_its_events_only() {
  let s = store().await;
  add_math_lab(&s).await;
  s.add_subject(natasha(), NewSubject::new("Art", 1.0, CourseType::Lecture).unwrap())
    .await
    .unwrap();
  let art = SubjectKey::new("Art", CourseType::Lecture);

  log(&s, math_lab(), 2.0).await;
  let kept = log(&s, art.clone(), 1.0).await;
  log(&s, math_lab(), 3.0).await;

  s.delete_subject(natasha(), math_lab()).await.unwrap();

  let subjects = s.list_subjects(natasha()).await.unwrap();
  assert_eq!(subjects.len(), 1);
  assert_eq!(subjects[0].key, art);
  assert_eq!(subjects[0].leave_taken, 1.0);

  let events = s.list_events(natasha()).await.unwrap();
  assert_eq!(events.len(), 1);
  assert_eq!(events[0].event_id, kept);
}

#[tokio::test]
async fn delete_missing_subject_is_not_found() {
  let s = store().await;
  let err = s.delete_subject(natasha(), math_lab()).await.unwrap_err();
  assert!(matches!(err, Error::Core(CoreError::SubjectNotFound(_))));
}

// ─── Events ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn add_event_updates_leave_taken() {
  let s = store().await;
  add_math_lab(&s).await;

  log(&s, math_lab(), 10.0).await;
  log(&s, math_lab(), 5.0).await;

  let subject = &s.list_subjects(natasha()).await.unwrap()[0];
  assert_eq!(subject.allowed_leave(), 22.5);
  assert_eq!(subject.leave_taken, 15.0);
  assert_eq!(subject.remaining_leave(), 7.5);
}

#[tokio::test]
async fn over_leave_is_permitted() {
  let s = store().await;
  add_math_lab(&s).await;

  log(&s, math_lab(), 30.0).await;

  let subject = &s.list_subjects(natasha()).await.unwrap()[0];
  assert_eq!(subject.remaining_leave(), -7.5);
}

#[tokio::test]
async fn event_against_missing_subject_is_rejected() {
  let s = store().await;
  add_math_lab(&s).await;

  let lecture = SubjectKey::new("Math", CourseType::Lecture);
  let err = s
    .add_event(natasha(), NewEvent::new(lecture.clone(), 1.0).unwrap())
    .await
    .unwrap_err();

  assert!(matches!(err.domain(), Some(CoreError::SubjectNotFound(k)) if *k == lecture));
  assert!(s.list_events(natasha()).await.unwrap().is_empty());
}

#[tokio::test]
async fn event_date_and_note_roundtrip() {
  let s = store().await;
  add_math_lab(&s).await;
  let day = NaiveDate::from_ymd_opt(2024, 9, 2).unwrap();

  let added = s
    .add_event(
      natasha(),
      NewEvent::new(math_lab(), 1.5).unwrap().with_note("fever").on(day),
    )
    .await
    .unwrap();

  let fetched = s
    .get_event(natasha(), added.event_id)
    .await
    .unwrap()
    .expect("event present");
  assert_eq!(fetched.date, day);
  assert_eq!(fetched.note, "fever");
  assert_eq!(fetched.hours, 1.5);
  assert_eq!(fetched.subject, math_lab());
}

#[tokio::test]
async fn events_are_not_visible_to_other_users() {
  let s = store().await;
  add_math_lab(&s).await;
  let id = log(&s, math_lab(), 1.0).await;

  let other = user("keerthana");
  assert!(s.get_event(other.clone(), id).await.unwrap().is_none());
  let err = s.delete_event(other, id).await.unwrap_err();
  assert!(matches!(err.domain(), Some(CoreError::EventNotFound(_))));
}

#[tokio::test]
async fn edit_event_changes_hours_and_note_and_recalculates() {
  let s = store().await;
  add_math_lab(&s).await;
  let id = log(&s, math_lab(), 2.0).await;
  log(&s, math_lab(), 1.0).await;

  let before = s.get_event(natasha(), id).await.unwrap().unwrap();
  let edited = s
    .edit_event(natasha(), id, EventEdit::new(4.0, "longer than planned").unwrap())
    .await
    .unwrap();

  assert_eq!(edited.hours, 4.0);
  assert_eq!(edited.note, "longer than planned");
  assert_eq!(edited.date, before.date);
  assert_eq!(edited.subject, before.subject);
  assert_eq!(leave_taken(&s, &math_lab()).await, 5.0);
}

#[tokio::test]
async fn edit_missing_event_is_not_found() {
  let s = store().await;
  let id = Uuid::new_v4();
  let err = s
    .edit_event(natasha(), id, EventEdit::new(1.0, "").unwrap())
    .await
    .unwrap_err();
  assert!(matches!(err, Error::Core(CoreError::EventNotFound(missing)) if missing == id));
}

#[tokio::test]
async fn delete_event_keeps_earlier_events_and_matches_rescan() {
  let s = store().await;
  add_math_lab(&s).await;
  log(&s, math_lab(), 1.0).await;
  log(&s, math_lab(), 2.0).await;
  let doomed = log(&s, math_lab(), 3.0).await;
  log(&s, math_lab(), 4.0).await;

  let before = s.list_events(natasha()).await.unwrap();
  s.delete_event(natasha(), doomed).await.unwrap();
  let after = s.list_events(natasha()).await.unwrap();

  assert_eq!(after.len(), 3);
  assert_eq!(&after[..2], &before[..2]);
  assert_eq!(after[2], before[3]);
  assert_eq!(
    leave_taken(&s, &math_lab()).await,
    ledger::leave_taken(&math_lab(), &after)
  );
  assert_eq!(leave_taken(&s, &math_lab()).await, 7.0);
}

#[tokio::test]
async fn delete_event_twice_is_not_found() {
  let s = store().await;
  add_math_lab(&s).await;
  let id = log(&s, math_lab(), 1.0).await;

  s.delete_event(natasha(), id).await.unwrap();
  let err = s.delete_event(natasha(), id).await.unwrap_err();
  assert!(matches!(err.domain(), Some(CoreError::EventNotFound(_))));
}

// ─── Recalc ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn recalc_is_idempotent() {
  let s = store().await;
  add_math_lab(&s).await;
  log(&s, math_lab(), 2.5).await;
  log(&s, math_lab(), 0.5).await;

  let first = s.recalc(natasha()).await.unwrap();
  let second = s.recalc(natasha()).await.unwrap();

  assert_eq!(first, second);
  assert_eq!(first[0].leave_taken, 3.0);
  assert_eq!(s.list_subjects(natasha()).await.unwrap(), second);
}

#[tokio::test]
async fn recalc_on_empty_ledger_returns_nothing() {
  let s = store().await;
  assert!(s.recalc(natasha()).await.unwrap().is_empty());
}

// ─── Persistence ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn file_store_survives_reopen() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("ledger.db");

  {
    let s = SqliteStore::open(&path).await.unwrap();
    add_math_lab(&s).await;
    log(&s, math_lab(), 6.0).await;
  }

  let reopened = SqliteStore::open(&path).await.unwrap();
  assert_eq!(leave_taken(&reopened, &math_lab()).await, 6.0);
  assert_eq!(reopened.list_events(natasha()).await.unwrap().len(), 1);
}
