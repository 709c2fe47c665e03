//! Error type for `leavebook-store-sqlite`.

use leavebook_core::DomainError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error(transparent)]
  Core(#[from] leavebook_core::Error),

  /// Anything the database itself reports: I/O failures, corruption,
  /// undecodable rows. Never a recoverable domain condition.
  #[error("storage error: {0}")]
  Database(#[from] tokio_rusqlite::Error),
}

impl DomainError for Error {
  fn domain(&self) -> Option<&leavebook_core::Error> {
    match self {
      Error::Core(e) => Some(e),
      Error::Database(_) => None,
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
