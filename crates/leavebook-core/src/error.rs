//! Error types for `leavebook-core`.

use thiserror::Error;
use uuid::Uuid;

use crate::subject::SubjectKey;

/// Recoverable domain errors. None of these should terminate the process;
/// each is reported to the caller as a human-readable message.
#[derive(Debug, Error)]
pub enum Error {
  #[error("{0} already exists")]
  DuplicateSubject(SubjectKey),

  #[error("subject not found: {0}")]
  SubjectNotFound(SubjectKey),

  #[error("attendance event not found: {0}")]
  EventNotFound(Uuid),

  #[error("unknown user: {0:?}")]
  UnknownUser(String),

  #[error("unknown course type: {0:?} (expected \"lecture\" or \"lab\")")]
  UnknownCourseType(String),

  #[error("invalid number for {field}: {value:?}")]
  InvalidNumeric { field: &'static str, value: String },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Implemented by backend error types so callers can tell a recoverable
/// domain error apart from an internal storage failure.
pub trait DomainError {
  /// The domain error carried by this value, if any.
  fn domain(&self) -> Option<&Error>;
}

impl DomainError for Error {
  fn domain(&self) -> Option<&Error> { Some(self) }
}
